use std::collections::HashSet;

use crate::utils::{default_players, STARTING_BALANCE};
use crate::{Error, ErrorType, Player, Roster};

/// A row of the setup form, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerDraft {
    pub name: String,
    pub code: String,
    pub balance: i64,
}

impl PlayerDraft {
    pub fn new(name: impl Into<String>, code: impl Into<String>, balance: i64) -> Self {
        PlayerDraft {
            name: name.into(),
            code: code.into(),
            balance,
        }
    }
}

impl From<&Player> for PlayerDraft {
    fn from(player: &Player) -> Self {
        PlayerDraft::new(player.name.clone(), player.code.to_string(), player.balance)
    }
}

/// The editable list of players shown before a game starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterDraft {
    pub players: Vec<PlayerDraft>,
}

impl Default for RosterDraft {
    fn default() -> Self {
        RosterDraft {
            players: default_players(),
        }
    }
}

impl From<&Roster> for RosterDraft {
    fn from(roster: &Roster) -> Self {
        RosterDraft {
            players: roster.players.iter().map(PlayerDraft::from).collect(),
        }
    }
}

impl RosterDraft {
    pub fn empty() -> Self {
        RosterDraft { players: vec![] }
    }

    /// Appends an unnamed player with the first free letter as its code and
    /// returns that code.
    pub fn add_player(&mut self) -> Result<char, Error> {
        let used: HashSet<String> = self
            .players
            .iter()
            .map(|p| p.code.trim().to_lowercase())
            .collect();
        let code = ('a'..='z')
            .find(|c| !used.contains(&c.to_string()))
            .ok_or_else(|| {
                Error::new(ErrorType::Roster, "Every letter is already a shortcode.")
            })?;
        self.players
            .push(PlayerDraft::new("", code.to_string(), STARTING_BALANCE));
        Ok(code)
    }

    pub fn remove(&mut self, index: usize) -> Option<PlayerDraft> {
        if index < self.players.len() {
            Some(self.players.remove(index))
        } else {
            None
        }
    }

    /// Moves the row at `from` to `to`. `to` is clamped into the list.
    pub fn move_player(&mut self, from: usize, to: usize) {
        if from >= self.players.len() {
            return;
        }
        let to = to.min(self.players.len() - 1);
        if from == to {
            return;
        }
        let item = self.players.remove(from);
        self.players.insert(to, item);
    }

    pub fn check(&self) -> Result<Roster, Vec<Error>> {
        check_roster(self)
    }
}

fn roster_error(row: usize, msg: &str) -> Error {
    Error::new(ErrorType::Roster, format!("Player {}: {}", row + 1, msg))
}

/// Validates the setup form and builds the [`Roster`] of a new game.
///
/// Names and codes are trimmed and codes lowercased. Codes are checked before
/// names; every problem is reported.
pub fn check_roster(draft: &RosterDraft) -> Result<Roster, Vec<Error>> {
    let mut errors = vec![];

    let mut codes = Vec::with_capacity(draft.players.len());
    let mut code_set = HashSet::new();
    for (row, player) in draft.players.iter().enumerate() {
        let code = player.code.trim().to_lowercase();
        let mut chars = code.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => {
                if !code_set.insert(c) {
                    errors.push(roster_error(row, "Player shortcodes must be unique."));
                }
                codes.push(c);
            }
            _ => {
                errors.push(roster_error(
                    row,
                    "Each player must have a single-letter shortcode.",
                ));
            }
        }
    }

    let mut names = Vec::with_capacity(draft.players.len());
    let mut name_set = HashSet::new();
    for (row, player) in draft.players.iter().enumerate() {
        let name = player.name.trim();
        if name.is_empty() {
            errors.push(roster_error(row, "Each player must have a name."));
        } else if !name_set.insert(name.to_lowercase()) {
            errors.push(roster_error(row, "Player names must be unique."));
        }
        names.push(name.to_string());
    }

    if !errors.is_empty() {
        return Err(errors);
    }
    let players = names
        .into_iter()
        .zip(codes)
        .zip(draft.players.iter())
        .map(|((name, code), p)| Player {
            name,
            code,
            balance: p.balance,
        })
        .collect();
    Ok(Roster { players })
}
