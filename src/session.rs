use crate::parse::Parser;
use crate::{ChangeSet, Error, ErrorType, HistoryEntry, Local, Roster, RosterDraft};
use getset::Getters;

/// A running game: the roster, the applied transactions, and the changes of
/// the last one for highlighting.
#[derive(Debug, Clone, Getters)]
pub struct Session {
    /// Returns the players and their balances.
    #[getset(get = "pub")]
    roster: Roster,

    /// Returns the applied transactions, oldest first.
    #[getset(get = "pub")]
    history: Vec<HistoryEntry>,

    /// Returns the changes of the most recent transaction. Empty after an undo.
    #[getset(get = "pub")]
    last_change: ChangeSet,
}

impl Session {
    pub fn new(roster: Roster) -> Self {
        Session::resume(roster, vec![])
    }

    /// Starts a game that keeps the transactions of an earlier one, so they
    /// can still be listed and undone.
    pub fn resume(roster: Roster, history: Vec<HistoryEntry>) -> Self {
        Session {
            roster,
            history,
            last_change: ChangeSet::new(),
        }
    }

    /// Parses `line` against the roster and applies the result.
    pub fn transact(&mut self, line: &str) -> Result<ChangeSet, Error> {
        let changes = Parser::parse(line, &self.roster)?;
        self.apply(line.trim(), changes)
    }

    /// Applies `changes` to every player at once and records them under
    /// `input`. Codes missing from the roster are skipped. Returns the changes
    /// that took effect, which may be empty.
    pub fn apply(&mut self, input: &str, changes: ChangeSet) -> Result<ChangeSet, Error> {
        if changes.is_empty() {
            return Err(Error::new(
                ErrorType::NoInstructions,
                "No valid instructions parsed from input.",
            ));
        }
        let mut effective = ChangeSet::new();
        let mut balances = vec![];
        for (code, delta) in changes {
            let player = match self.roster.get(code) {
                Some(player) => player,
                None => {
                    log::warn!("Skipped change {} for unknown code {}.", delta, code);
                    continue;
                }
            };
            // undo must be able to negate every recorded delta
            let balance = delta
                .checked_neg()
                .and_then(|_| player.balance.checked_add(delta))
                .ok_or_else(|| {
                    Error::new(
                        ErrorType::Overflow,
                        format!("The balance of {} is out of range.", player.name),
                    )
                })?;
            balances.push((code, balance));
            effective.insert(code, delta);
        }

        for (code, balance) in balances {
            if let Some(player) = self.roster.get_mut(code) {
                player.balance = balance;
            }
        }
        log::info!("Applied {:?}: {:?}", input, effective);
        self.history.push(HistoryEntry {
            input: input.to_string(),
            changes: effective.clone(),
            recorded_at: Local::now(),
        });
        self.last_change = effective.clone();
        Ok(effective)
    }

    /// Reverts the most recent transaction and returns the reversal that was
    /// applied. Players removed since then are skipped.
    pub fn undo(&mut self) -> Result<ChangeSet, Error> {
        let entry = self
            .history
            .pop()
            .ok_or_else(|| Error::new(ErrorType::NoHistory, "No transaction to undo."))?;
        let mut reverted = ChangeSet::new();
        for (code, delta) in &entry.changes {
            match self.roster.get_mut(*code) {
                Some(player) => {
                    // balances edited during setup may no longer fit
                    player.balance = player.balance.saturating_sub(*delta);
                    reverted.insert(*code, -*delta);
                }
                None => log::warn!("Cannot undo {} for missing code {}.", delta, code),
            }
        }
        log::info!("Undid {:?}: {:?}", entry.input, reverted);
        self.last_change.clear();
        Ok(reverted)
    }

    /// Leaves the game and returns to setup with the current players and
    /// balances. The history is handed back for [`Session::resume`].
    pub fn reset(self) -> (RosterDraft, Vec<HistoryEntry>) {
        (RosterDraft::from(&self.roster), self.history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(RosterDraft::default().check().unwrap())
    }

    fn balance(session: &Session, code: char) -> i64 {
        session.roster().get(code).unwrap().balance()
    }

    #[test]
    fn transact_updates_balances_and_history() {
        let mut s = session();
        let applied = s.transact("  z 100 g -200 ").unwrap();
        assert_eq!(applied, ChangeSet::from([('g', -200), ('z', 100)]));
        assert_eq!(balance(&s, 'z'), 1600);
        assert_eq!(balance(&s, 'g'), 1300);
        assert_eq!(s.history().len(), 1);
        assert_eq!(s.history()[0].input(), "z 100 g -200");
        assert_eq!(s.last_change(), &applied);
    }

    #[test]
    fn failed_transaction_changes_nothing() {
        let mut s = session();
        s.transact("g 100").unwrap();
        let before = s.roster().clone();
        for line in ["m", "100 200", "", "q 50"] {
            assert!(s.transact(line).is_err());
        }
        assert_eq!(s.roster(), &before);
        assert_eq!(s.history().len(), 1);
        assert_eq!(s.last_change(), &ChangeSet::from([('g', 100)]));
    }

    #[test]
    fn last_change_is_replaced() {
        let mut s = session();
        s.transact("g 100").unwrap();
        s.transact("m 5").unwrap();
        assert_eq!(s.last_change(), &ChangeSet::from([('m', 5)]));
    }

    #[test]
    fn apply_skips_unknown_codes() {
        let mut s = session();
        let applied = s
            .apply("manual", ChangeSet::from([('g', 1), ('q', 2)]))
            .unwrap();
        assert_eq!(applied, ChangeSet::from([('g', 1)]));

        // nothing to apply, but the line is still recorded
        let applied = s.apply("stale", ChangeSet::from([('q', 2)])).unwrap();
        assert!(applied.is_empty());
        assert_eq!(s.history().len(), 2);
        assert_eq!(s.history()[1].to_string(), "stale =>");
        assert!(s.last_change().is_empty());
        assert_eq!(balance(&s, 'g'), 1501);
        assert!(s.undo().unwrap().is_empty());
        assert_eq!(balance(&s, 'g'), 1501);

        let err = s.apply("manual", ChangeSet::new()).unwrap_err();
        assert_eq!(err.r#type, ErrorType::NoInstructions);
        assert_eq!(s.history().len(), 1);
    }

    #[test]
    fn overflow_is_atomic() {
        let mut s = session();
        let err = s
            .apply("big", ChangeSet::from([('g', 5), ('m', i64::MAX)]))
            .unwrap_err();
        assert_eq!(err.r#type, ErrorType::Overflow);
        assert_eq!(balance(&s, 'g'), 1500);
        assert!(s.history().is_empty());
    }

    #[test]
    fn unnegatable_delta_is_rejected() {
        let mut s = session();
        let err = s.transact("-9223372036854775808 g").unwrap_err();
        assert_eq!(err.r#type, ErrorType::Overflow);
        assert_eq!(balance(&s, 'g'), 1500);
        assert!(s.history().is_empty());

        s.transact("-9223372036854775807 g").unwrap();
        let reverted = s.undo().unwrap();
        assert_eq!(reverted, ChangeSet::from([('g', i64::MAX)]));
        assert_eq!(balance(&s, 'g'), 1500);
    }

    #[test]
    fn undo_restores_balances() {
        let mut s = session();
        let before = s.roster().clone();
        s.transact("g 100 m 50 s -20").unwrap();
        s.transact("g 50 g 50").unwrap();
        assert_eq!(balance(&s, 'g'), 1700);
        let reverted = s.undo().unwrap();
        assert_eq!(reverted, ChangeSet::from([('g', -100)]));
        assert!(s.last_change().is_empty());
        s.undo().unwrap();
        assert_eq!(s.roster(), &before);
        assert_eq!(s.undo().unwrap_err().r#type, ErrorType::NoHistory);
        assert_eq!(s.roster(), &before);
    }

    #[test]
    fn undo_skips_removed_players() {
        let mut s = session();
        s.transact("g 100 m 50").unwrap();
        s.roster.players.retain(|p| p.code() != 'm');
        let reverted = s.undo().unwrap();
        assert_eq!(reverted, ChangeSet::from([('g', -100)]));
        assert_eq!(balance(&s, 'g'), 1500);
    }

    #[test]
    fn reset_keeps_current_players() {
        let mut s = session();
        s.transact("t 250").unwrap();
        let (draft, history) = s.reset();
        assert_eq!(history.len(), 1);
        assert_eq!(draft.players.len(), 5);
        assert_eq!(draft.players[3].code, "t");
        assert_eq!(draft.players[3].balance, 1750);
        assert_eq!(draft.players[3].name, "Tyrone");
    }

    #[test]
    fn resumed_game_can_undo_earlier_transactions() {
        let mut s = session();
        s.transact("t 250 m 10").unwrap();
        let (mut draft, history) = s.reset();
        draft.remove(1);
        let mut s = Session::resume(draft.check().unwrap(), history);
        assert!(s.last_change().is_empty());
        assert_eq!(s.undo().unwrap(), ChangeSet::from([('t', -250)]));
        assert_eq!(balance(&s, 't'), 1500);
        assert!(s.roster().get('m').is_none());
    }
}
