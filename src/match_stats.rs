use crate::types::{AccountId, GameId, PlayerName};
use itertools::Itertools;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

/// Resolved player. Two identities are the same player iff their account ids match.
#[derive(Debug, Clone, Eq)]
pub struct PlayerIdentity {
    pub account_id: AccountId,
    pub name: PlayerName,
}

impl PartialEq for PlayerIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.account_id == other.account_id
    }
}

impl Hash for PlayerIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.account_id.hash(state);
    }
}

/// Non-empty, ordered set of teammates whose presence is tracked.
#[derive(Debug, Clone)]
pub struct DuoSet {
    members: Vec<PlayerIdentity>,
    ids: HashSet<AccountId>,
    names: HashSet<PlayerName>,
}

impl DuoSet {
    /// Returns `None` for an empty member list.
    pub fn new(members: Vec<PlayerIdentity>) -> Option<DuoSet> {
        if members.is_empty() {
            return None;
        }
        let ids = members.iter().map(|m| m.account_id.clone()).collect();
        let names = members.iter().map(|m| m.name.clone()).collect();
        Some(DuoSet {
            members,
            ids,
            names,
        })
    }

    pub fn members(&self) -> &[PlayerIdentity] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Either the account id or the name is enough, so renamed or re-created
    /// accounts are still recognized.
    pub fn contains(&self, account_id: &str, name: &str) -> bool {
        self.ids.contains(account_id) || self.names.contains(name)
    }

    /// One resolved name per line, in input order.
    pub fn display_names(&self) -> String {
        self.members.iter().map(|m| m.name.as_str()).join("\n")
    }
}

/// Pointer to a match, as returned by match list pagination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSummary {
    pub game_id: GameId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Blue,
    Red,
}

impl Side {
    /// Slots 1-5 play on the first side, everything else on the second.
    pub fn from_slot(slot: u8) -> Side {
        match slot {
            1..=5 => Side::Blue,
            _ => Side::Red,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::Blue => 0,
            Side::Red => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub account_id: AccountId,
    pub name: PlayerName,
    pub slot: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Team {
    pub side: Side,
    pub outcome: Outcome,
}

/// Full match data needed to decide duo presence.
#[derive(Debug, Clone)]
pub struct MatchDetail {
    game_id: GameId,
    participants: Vec<Participant>,
    teams: [Team; 2],
}

impl MatchDetail {
    /// Orders teams by side so that `team(side)` is a plain index.
    /// Returns `None` unless the two teams cover both sides.
    pub fn new(game_id: GameId, participants: Vec<Participant>, teams: [Team; 2]) -> Option<Self> {
        let [first, second] = teams;
        let teams = match (first.side, second.side) {
            (Side::Blue, Side::Red) => [first, second],
            (Side::Red, Side::Blue) => [second, first],
            _ => return None,
        };
        Some(MatchDetail {
            game_id,
            participants,
            teams,
        })
    }

    pub fn game_id(&self) -> &GameId {
        &self.game_id
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn team(&self, side: Side) -> &Team {
        &self.teams[side.index()]
    }

    pub fn is_won_by(&self, side: Side) -> bool {
        self.team(side).outcome == Outcome::Win
    }
}
