use banker::{ErrorType, PlayerDraft, RosterDraft, Session};

fn new_game() -> Session {
    Session::new(RosterDraft::default().check().unwrap())
}

fn balances(session: &Session) -> Vec<i64> {
    session.roster().players().iter().map(|p| p.balance()).collect()
}

#[test]
fn a_short_game() {
    let mut session = new_game();
    session.transact("g 100").unwrap();
    session.transact("100 m").unwrap();
    session.transact("z 100 g -200").unwrap();
    assert_eq!(balances(&session), vec![1400, 1600, 1600, 1500, 1500]);
    assert_eq!(session.roster().total(), 7600);

    let lines: Vec<_> = session.history().iter().map(|h| h.to_string()).collect();
    assert_eq!(
        lines,
        vec!["g 100 => g +100", "100 m => m +100", "z 100 g -200 => g -200, z +100"]
    );

    session.undo().unwrap();
    session.undo().unwrap();
    session.undo().unwrap();
    assert_eq!(balances(&session), vec![1500; 5]);
    let err = session.undo().unwrap_err();
    assert_eq!(err.r#type, ErrorType::NoHistory);
    assert_eq!(err.msg, "No transaction to undo.");
}

#[test]
fn undo_is_the_inverse_of_apply() {
    let lines = ["g 100 m 50 s -20", "t -1500 z 1500", "m 0", "s 7 s 8 s 9"];
    let mut session = new_game();
    let mut snapshots = vec![];
    for line in lines {
        snapshots.push(balances(&session));
        session.transact(line).unwrap();
    }
    while let Some(expected) = snapshots.pop() {
        session.undo().unwrap();
        assert_eq!(balances(&session), expected);
    }
}

#[test]
fn zero_change_is_still_a_transaction() {
    let mut session = new_game();
    let applied = session.transact("m 0").unwrap();
    assert_eq!(applied.get(&'m'), Some(&0));
    assert_eq!(session.history().len(), 1);
}

#[test]
fn reset_returns_to_setup() {
    let mut session = new_game();
    session.transact("s -500").unwrap();
    let (mut draft, history) = session.reset();
    draft.add_player().unwrap();
    draft.players[5].name = "Ann".to_string();
    draft.move_player(5, 0);
    let mut session = Session::resume(draft.check().unwrap(), history);
    let first = &session.roster().players()[0];
    assert_eq!((first.name().as_str(), first.code()), ("Ann", 'a'));
    assert_eq!(session.roster().get('s').unwrap().balance(), 1000);
    assert_eq!(session.history().len(), 1);
    session.undo().unwrap();
    assert_eq!(session.roster().get('s').unwrap().balance(), 1500);
}

#[test]
fn custom_roster() {
    let draft = RosterDraft {
        players: vec![PlayerDraft::new("Ann", "A", 200), PlayerDraft::new("Bob", "b", 0)],
    };
    let mut session = Session::new(draft.check().unwrap());
    session.transact("a -50 B 50").unwrap();
    assert_eq!(balances(&session), vec![150, 50]);
    // g is not at this table
    assert!(session.transact("g 100").is_err());
}
