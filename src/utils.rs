//! Useful functions for setting up games and displaying balances.

use crate::{Error, ErrorType, PlayerDraft};

/// The balance a newly added player starts with.
pub const STARTING_BALANCE: i64 = 1500;

/// Parses a balance typed during setup.
#[inline]
pub fn parse_amount(num_str: &str) -> Result<i64, Error> {
    num_str.trim().parse::<i64>().map_err(|_| {
        Error::new(
            ErrorType::Roster,
            format!("Invalid amount {:?}.", num_str.trim()),
        )
    })
}

/// The players every new game is seeded with.
pub fn default_players() -> Vec<PlayerDraft> {
    [
        ("Giselle", "g"),
        ("Mia", "m"),
        ("Zian", "z"),
        ("Tyrone", "t"),
        ("Stany", "s"),
    ]
    .iter()
    .map(|(name, code)| PlayerDraft::new(*name, *code, STARTING_BALANCE))
    .collect()
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formats a balance, e.g. `$1,500` or `-$20`.
pub fn format_money(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    format!("{}${}", sign, group_thousands(amount.unsigned_abs()))
}

/// Formats a change for highlighting, e.g. `(+$100)` or `(-$20)`.
pub fn format_delta(delta: i64) -> String {
    let sign = if delta < 0 { '-' } else { '+' };
    format!("({}${})", sign, group_thousands(delta.unsigned_abs()))
}

/// Formats a change for history lines, e.g. `+100` or `-20`.
pub fn format_delta_plain(delta: i64) -> String {
    if delta > 0 {
        format!("+{}", delta)
    } else {
        delta.to_string()
    }
}
