use banker::parse::{Parser as LineParser, Pass};
use banker::utils::{format_delta, format_money, parse_amount};
use banker::{PlayerDraft, RosterDraft, Session};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP: &str = "\
Type a transaction such as `g 100 m -50`, or a command:
  :balances  show every player
  :history   list applied transactions, newest first
  :undo      revert the last transaction
  :reset     back to setup with the current players, keeping history
  :quit      leave";

const SETUP_HELP: &str = "\
Edit the players, then start the game:
  :add [NAME]         add a player with the next free shortcode
  :rm N               remove player N
  :mv FROM TO         move player FROM to row TO
  :name N NAME        rename player N
  :code N C           change the shortcode of player N
  :balance N AMOUNT   set the balance of player N
  :list               show the players
  :start              start the game
  :quit               leave";

fn parse_player(arg: &str) -> Result<PlayerDraft, String> {
    let mut parts = arg.splitn(3, ':');
    let name = parts.next().unwrap_or_default();
    let code = parts
        .next()
        .ok_or_else(|| format!("expected NAME:CODE[:BALANCE], got {:?}", arg))?;
    let balance = match parts.next() {
        Some(num) => parse_amount(num).map_err(|e| e.msg)?,
        None => banker::utils::STARTING_BALANCE,
    };
    Ok(PlayerDraft::new(name, code, balance))
}

#[derive(Debug, Parser)]
#[command(
    name = "banker",
    about = "Keeps the cash of a board game from free-form banker lines.",
    version = VERSION,
)]
struct Cli {
    /// A player as NAME:CODE[:BALANCE]; repeat for each player. Defaults to
    /// the five standard players.
    #[arg(short, long = "player", value_parser = parse_player)]
    players: Vec<PlayerDraft>,
    /// Overrides the balance of every player.
    #[arg(short, long)]
    starting_balance: Option<i64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Read transactions from stdin, one per line.
    Play,
    /// Show how a line would be resolved without applying it.
    Parse {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        line: Vec<String>,
    },
}

fn balances(session: &Session) {
    for player in session.roster().players() {
        let delta = session
            .last_change()
            .get(&player.code())
            .filter(|d| **d != 0)
            .map(|d| format!(" {}", format_delta(*d)))
            .unwrap_or_default();
        println!(
            "{:<12} ({}) {:>10}{}",
            player.name(),
            player.code(),
            format_money(player.balance()),
            delta
        );
    }
}

fn history_list(session: &Session) {
    if session.history().is_empty() {
        println!("No transactions yet");
    }
    for entry in session.history().iter().rev() {
        println!("{} {}", entry.recorded_at().format("%H:%M:%S"), entry);
    }
}

fn explain(draft: RosterDraft, line: &str) {
    let roster = match draft.check() {
        Ok(roster) => roster,
        Err(errors) => return report(&errors),
    };
    let resolution = LineParser::resolve(line, &roster.codes());
    for pairing in &resolution.pairings {
        let pass = match pairing.pass {
            Pass::Adjacent => "adjacent",
            Pass::Nearest => "nearest",
        };
        let (_, number_src) = &resolution.words[pairing.number_at];
        let (_, code_src) = &resolution.words[pairing.code_at];
        println!(
            "{} {:>8}  [{}] -> [{}]  ({})",
            pairing.code, pairing.amount, number_src, code_src, pass
        );
    }
    for position in &resolution.ignored {
        let (text, src) = &resolution.words[*position];
        println!("ignored {:?} [{}]", text, src);
    }
    match banker::parse_line(line, &roster) {
        Ok(changes) => println!("=> {:?}", changes),
        Err(error) => println!("{}", error),
    }
}

fn report(errors: &[banker::Error]) {
    for error in errors {
        eprintln!("{}", error);
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Setup {
    Edited,
    Start,
    Quit,
}

fn row(arg: Option<&str>, draft: &RosterDraft) -> Result<usize, String> {
    let arg = arg.ok_or("Missing player number.")?;
    let n: usize = arg
        .parse()
        .map_err(|_| format!("Invalid player number {:?}.", arg))?;
    if n == 0 || n > draft.players.len() {
        return Err(format!("There is no player {}.", n));
    }
    Ok(n - 1)
}

fn edit(draft: &mut RosterDraft, line: &str) -> Result<Setup, String> {
    let mut args = line.split_whitespace();
    match args.next().unwrap_or_default() {
        ":add" => {
            draft.add_player().map_err(|e| e.msg)?;
            let name = args.collect::<Vec<_>>().join(" ");
            if let Some(player) = draft.players.last_mut() {
                player.name = name;
            }
        }
        ":rm" => {
            let i = row(args.next(), draft)?;
            draft.remove(i);
        }
        ":mv" => {
            let from = row(args.next(), draft)?;
            let to = args
                .next()
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or("Missing target row.")?;
            draft.move_player(from, to.saturating_sub(1));
        }
        ":name" => {
            let i = row(args.next(), draft)?;
            draft.players[i].name = args.collect::<Vec<_>>().join(" ");
        }
        ":code" => {
            let i = row(args.next(), draft)?;
            draft.players[i].code = args.next().ok_or("Missing shortcode.")?.to_string();
        }
        ":balance" => {
            let i = row(args.next(), draft)?;
            let amount = args.next().ok_or("Missing amount.")?;
            draft.players[i].balance = parse_amount(amount).map_err(|e| e.msg)?;
        }
        ":list" => {}
        ":start" => return Ok(Setup::Start),
        ":quit" | ":q" => return Ok(Setup::Quit),
        _ => return Err(format!("Unknown setup command {:?}, try :start.", line.trim())),
    }
    Ok(Setup::Edited)
}

fn list(draft: &RosterDraft) {
    for (i, player) in draft.players.iter().enumerate() {
        println!(
            "{:>2}. {:<12} ({}) {:>10}",
            i + 1,
            player.name,
            player.code,
            format_money(player.balance)
        );
    }
}

fn prompt<B: BufRead>(lines: &mut io::Lines<B>, prompt: &str) -> io::Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;
    lines.next().transpose()
}

/// Edits `draft` until the banker starts the game. Returns `false` if they
/// quit instead.
fn setup<B: BufRead>(draft: &mut RosterDraft, lines: &mut io::Lines<B>) -> io::Result<bool> {
    println!("{}", SETUP_HELP);
    list(draft);
    loop {
        let line = match prompt(lines, "setup> ")? {
            Some(line) => line,
            None => return Ok(false),
        };
        match edit(draft, &line) {
            Ok(Setup::Edited) => list(draft),
            Ok(Setup::Start) => return Ok(true),
            Ok(Setup::Quit) => return Ok(false),
            Err(msg) => println!("{}", msg),
        }
    }
}

fn play(mut draft: RosterDraft) -> io::Result<()> {
    let mut lines = io::stdin().lock().lines();
    let mut history = vec![];
    let mut in_setup = false;
    loop {
        if in_setup && !setup(&mut draft, &mut lines)? {
            return Ok(());
        }
        let roster = match draft.check() {
            Ok(roster) => roster,
            Err(errors) => {
                report(&errors);
                in_setup = true;
                continue;
            }
        };
        let mut session = Session::resume(roster, history);
        balances(&session);
        loop {
            let line = match prompt(&mut lines, "> ")? {
                Some(line) => line,
                None => return Ok(()),
            };
            match line.trim() {
                ":quit" | ":q" => return Ok(()),
                ":help" => println!("{}", HELP),
                ":balances" => balances(&session),
                ":history" => history_list(&session),
                ":undo" => match session.undo() {
                    Ok(_) => {
                        println!("Last transaction undone.");
                        balances(&session);
                    }
                    Err(error) => println!("{}", error.msg),
                },
                ":reset" => break,
                _ => match session.transact(&line) {
                    Ok(_) => balances(&session),
                    Err(error) => println!("{}", error.msg),
                },
            }
        }
        (draft, history) = session.reset();
        log::info!("Back to setup with {} players", draft.players.len());
        in_setup = true;
    }
}

fn main() -> io::Result<()> {
    pretty_env_logger::init();
    let args = Cli::parse();
    let mut draft = if args.players.is_empty() {
        RosterDraft::default()
    } else {
        RosterDraft {
            players: args.players,
        }
    };
    if let Some(balance) = args.starting_balance {
        for player in draft.players.iter_mut() {
            player.balance = balance;
        }
    }
    match args.command {
        Commands::Play => play(draft)?,
        Commands::Parse { line } => explain(draft, &line.join(" ")),
    }
    Ok(())
}
