//! Pairs numbers with shortcodes in two passes.
//!
//! The adjacency pass runs first and claims every valid code it visits plus
//! any number it pairs with. The nearest-match pass then only sees what is
//! left unclaimed.

use super::{Token, Word};
use crate::Code;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// The pass that produced a [`Pairing`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pass {
    Adjacent,
    Nearest,
}

/// A number assigned to a player code.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pairing {
    pub code: Code,
    pub amount: i64,
    pub number_at: usize,
    pub code_at: usize,
    pub pass: Pass,
}

/// Word positions consumed by the adjacency pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Claims(BTreeSet<usize>);

impl Claims {
    /// Marks `position` as consumed. Returns `false` if it already was.
    pub fn claim(&mut self, position: usize) -> bool {
        self.0.insert(position)
    }

    pub fn is_claimed(&self, position: usize) -> bool {
        self.0.contains(&position)
    }
}

fn valid_code(word: &Word, codes: &HashSet<Code>) -> Option<Code> {
    match word.token {
        Token::Code(code) if codes.contains(&code) => Some(code),
        _ => None,
    }
}

fn free_number(words: &[Word], index: Option<usize>, claims: &Claims) -> Option<(usize, i64)> {
    let word = words.get(index?)?;
    match word.token {
        Token::Number(amount) if !claims.is_claimed(word.position) => {
            Some((word.position, amount))
        }
        _ => None,
    }
}

/// Pairs every valid code with the number right before it, or failing that
/// the number right after it.
///
/// `words` must be the full output of the lexer, so that a word's index
/// equals its position.
pub fn adjacent(words: &[Word], codes: &HashSet<Code>) -> (Vec<Pairing>, Claims) {
    let mut claims = Claims::default();
    let mut pairings = vec![];
    for (i, word) in words.iter().enumerate() {
        let code = match valid_code(word, codes) {
            Some(code) if !claims.is_claimed(word.position) => code,
            _ => continue,
        };
        let found = free_number(words, i.checked_sub(1), &claims)
            .or_else(|| free_number(words, Some(i + 1), &claims));
        if let Some((number_at, amount)) = found {
            claims.claim(number_at);
            log::debug!("adjacent: {} at {} <- {} at {}", code, word.position, amount, number_at);
            pairings.push(Pairing {
                code,
                amount,
                number_at,
                code_at: word.position,
                pass: Pass::Adjacent,
            });
        }
        claims.claim(word.position);
    }
    (pairings, claims)
}

/// Pairs each number left unclaimed with the closest valid code left
/// unclaimed. Earlier codes win ties, and a code is taken by at most one
/// number.
pub fn nearest(words: &[Word], codes: &HashSet<Code>, claims: &Claims) -> Vec<Pairing> {
    let free = words.iter().filter(|w| !claims.is_claimed(w.position));
    let mut numbers = vec![];
    let mut pool = vec![];
    for word in free {
        if let Token::Number(amount) = word.token {
            numbers.push((word.position, amount));
        } else if let Some(code) = valid_code(word, codes) {
            pool.push((word.position, code));
        }
    }

    let mut pairings = vec![];
    for (number_at, amount) in numbers {
        let mut best: Option<(usize, usize)> = None;
        for (k, (code_at, _)) in pool.iter().enumerate() {
            let dist = number_at.abs_diff(*code_at);
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((k, dist));
            }
        }
        let (code_at, code) = match best {
            Some((k, _)) => pool.remove(k),
            None => {
                log::debug!("nearest: {} at {} has no code left", amount, number_at);
                continue;
            }
        };
        log::debug!("nearest: {} at {} <- {} at {}", code, code_at, amount, number_at);
        pairings.push(Pairing {
            code,
            amount,
            number_at,
            code_at,
            pass: Pass::Nearest,
        });
    }
    pairings
}
