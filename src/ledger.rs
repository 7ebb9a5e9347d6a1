use crate::utils::format_delta_plain;
pub use chrono::{DateTime, Local};
use getset::{CopyGetters, Getters};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// A player's shortcode, always a lowercase ASCII letter once a roster has
/// been checked.
pub type Code = char;

/// Net balance changes of one transaction line, keyed by shortcode.
pub type ChangeSet = BTreeMap<Code, i64>;

/// Represents a range of columns (1-based, end exclusive) in a transaction
/// line.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Source {
    pub start: usize,
    pub end: usize,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Kinds of errors that `banker` reports to the caller. None of them is fatal:
/// the session is left untouched whenever one is returned.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// The transaction line is blank.
    EmptyInput,
    /// Nothing in the line resolved to a (code, amount) pair.
    NoInstructions,
    /// Undo was requested but no transaction has been recorded.
    NoHistory,
    /// A sum or a balance does not fit in an `i64`.
    Overflow,
    /// The player setup is invalid.
    Roster,
}

/// Contains the full information of an error.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Error {
    pub msg: String,
    pub r#type: ErrorType,
}

impl Error {
    pub(crate) fn new(r#type: ErrorType, msg: impl Into<String>) -> Self {
        Error {
            msg: msg.into(),
            r#type,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.r#type, self.msg)
    }
}

impl std::error::Error for Error {}

/// A player at the table.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct Player {
    /// Returns the display name, unique case-insensitively.
    #[getset(get = "pub")]
    pub(crate) name: String,

    /// Returns the shortcode used in transaction lines.
    #[getset(get_copy = "pub")]
    pub(crate) code: Code,

    /// Returns the current cash balance.
    #[getset(get_copy = "pub")]
    pub(crate) balance: i64,
}

/// The ordered list of players of a running game. Only
/// [`check_roster`](crate::check_roster) builds one, so codes and names are
/// always valid and unique.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Roster {
    pub(crate) players: Vec<Player>,
}

impl Roster {
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn get(&self, code: Code) -> Option<&Player> {
        self.players.iter().find(|p| p.code == code)
    }

    pub(crate) fn get_mut(&mut self, code: Code) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.code == code)
    }

    /// Returns the set of shortcodes a transaction line may refer to.
    pub fn codes(&self) -> HashSet<Code> {
        self.players.iter().map(|p| p.code).collect()
    }

    /// Returns the sum of all balances.
    pub fn total(&self) -> i64 {
        self.players.iter().map(|p| p.balance).sum()
    }
}

/// One applied transaction, kept for undo and for display.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct HistoryEntry {
    /// Returns the line as typed by the banker.
    #[getset(get = "pub")]
    pub(crate) input: String,

    /// Returns the changes that were actually applied.
    #[getset(get = "pub")]
    pub(crate) changes: ChangeSet,

    /// Returns the time the transaction was applied.
    #[getset(get = "pub")]
    pub(crate) recorded_at: DateTime<Local>,
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} =>", self.input)?;
        for (i, (code, delta)) in self.changes.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{}{} {}", sep, code, format_delta_plain(*delta))?;
        }
        Ok(())
    }
}
