//! # banker
//!
//! banker keeps the cash of every player at a board-game table and updates it
//! from free-form lines such as `g 100 m -50` typed by the banker.
//!
//! A line is split into words, each number is paired with a player shortcode
//! (adjacent words first, then the nearest one left), and the resulting net
//! changes are applied to all players at once and recorded for undo.

mod checker;
mod ledger;
pub mod parse;
mod session;
pub mod utils;

pub use checker::{check_roster, PlayerDraft, RosterDraft};
pub use ledger::*;
pub use parse::{parse_line, valid_codes, Resolution};
pub use session::Session;
