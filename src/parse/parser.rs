use super::lexer::tokenize;
use super::resolver::{self, Pairing};
use crate::{ChangeSet, Code, Error, ErrorType, Roster, Source};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The outcome of resolving one transaction line, kept whole so that the
/// banker can see which word went where.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolution {
    /// Every word of the line with its column range.
    pub words: Vec<(String, Source)>,
    /// Adjacent pairings in line order, then nearest-match pairings.
    pub pairings: Vec<Pairing>,
    /// Positions of words that ended up in no pairing.
    pub ignored: Vec<usize>,
}

impl Resolution {
    /// Sums the pairings per code.
    pub fn changes(&self) -> Result<ChangeSet, Error> {
        let mut changes = ChangeSet::new();
        for pairing in &self.pairings {
            let total = changes.entry(pairing.code).or_insert(0);
            *total = total.checked_add(pairing.amount).ok_or_else(|| {
                Error::new(
                    ErrorType::Overflow,
                    format!("The total for {} is out of range.", pairing.code),
                )
            })?;
        }
        Ok(changes)
    }

    pub fn is_empty(&self) -> bool {
        self.pairings.is_empty()
    }
}

pub struct Parser;

impl Parser {
    /// Runs the lexer and both pairing passes over `line`.
    pub fn resolve(line: &str, codes: &HashSet<Code>) -> Resolution {
        let words = tokenize(line);
        let (mut pairings, claims) = resolver::adjacent(&words, codes);
        pairings.extend(resolver::nearest(&words, codes, &claims));

        let mut used = HashSet::new();
        for pairing in &pairings {
            used.insert(pairing.number_at);
            used.insert(pairing.code_at);
        }
        let ignored = words
            .iter()
            .map(|w| w.position)
            .filter(|p| !used.contains(p))
            .collect();
        Resolution {
            words: words.iter().map(|w| (w.text.to_string(), w.src)).collect(),
            pairings,
            ignored,
        }
    }

    /// Resolves `line` against the codes of `roster` and returns the net
    /// change per code.
    pub fn parse(line: &str, roster: &Roster) -> Result<ChangeSet, Error> {
        if line.trim().is_empty() {
            return Err(Error::new(
                ErrorType::EmptyInput,
                "Please enter a transaction line.",
            ));
        }
        let resolution = Self::resolve(line, &roster.codes());
        if resolution.is_empty() {
            return Err(Error::new(
                ErrorType::NoInstructions,
                "No valid instructions parsed from input.",
            ));
        }
        resolution.changes()
    }
}

/// Returns the shortcodes a line may refer to.
pub fn valid_codes(roster: &Roster) -> HashSet<Code> {
    roster.codes()
}

/// Resolves `line` against `roster`. See [`Parser::parse`].
pub fn parse_line(line: &str, roster: &Roster) -> Result<ChangeSet, Error> {
    Parser::parse(line, roster)
}
