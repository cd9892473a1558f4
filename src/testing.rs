//! In-memory `StatsApi` used by unit tests.
use crate::data_retrieval::api::{ApiError, PageRequest, StatsApi};
use crate::match_stats::{
    MatchDetail, MatchSummary, Outcome, Participant, PlayerIdentity, Side, Team,
};
use crate::types::{AccountId, GameId, Region};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

pub fn player(name: &str) -> PlayerIdentity {
    PlayerIdentity {
        account_id: format!("acc-{}", name),
        name: name.to_string(),
    }
}

pub fn game_id(index: usize) -> GameId {
    format!("g{}", index)
}

/// Match `index` with ten filler participants, `players` placed in the given
/// slots and `winner` taking the game.
pub fn match_with(index: usize, players: &[(&PlayerIdentity, u8)], winner: Side) -> MatchDetail {
    let participants = (1..=10u8)
        .map(|slot| match players.iter().find(|(_, s)| *s == slot) {
            Some((p, _)) => Participant {
                account_id: p.account_id.clone(),
                name: p.name.clone(),
                slot,
            },
            None => Participant {
                account_id: format!("filler-{}-{}", index, slot),
                name: format!("Filler {} {}", index, slot),
                slot,
            },
        })
        .collect();
    let outcome = |side: Side| {
        if side == winner {
            Outcome::Win
        } else {
            Outcome::Loss
        }
    };
    let teams = [
        Team {
            side: Side::Blue,
            outcome: outcome(Side::Blue),
        },
        Team {
            side: Side::Red,
            outcome: outcome(Side::Red),
        },
    ];
    MatchDetail::new(game_id(index), participants, teams).unwrap()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Lookup,
    /// Page with this index.
    Page(usize),
    /// Match with this position in the history.
    Detail(usize),
}

#[derive(Default)]
struct Calls {
    lookups: Vec<String>,
    pages: Vec<usize>,
    details: usize,
}

pub struct FakeApi {
    players: HashMap<String, PlayerIdentity>,
    history: Vec<MatchDetail>,
    failure: Option<Failure>,
    failures_left: Mutex<usize>,
    calls: Mutex<Calls>,
}

impl FakeApi {
    pub fn new() -> Self {
        FakeApi {
            players: HashMap::new(),
            history: vec![],
            failure: None,
            failures_left: Mutex::new(0),
            calls: Mutex::new(Calls::default()),
        }
    }

    /// `len` matches without any known player, blue side always winning.
    pub fn with_history(len: usize) -> Self {
        let mut api = FakeApi::new();
        api.history = (0..len).map(|i| match_with(i, &[], Side::Blue)).collect();
        api
    }

    pub fn with_player(mut self, identity: PlayerIdentity) -> Self {
        self.players.insert(identity.name.clone(), identity);
        self
    }

    pub fn with_match(mut self, detail: MatchDetail) -> Self {
        let index = detail.game_id()[1..].parse::<usize>().unwrap();
        self.history[index] = detail;
        self
    }

    pub fn failing(self, failure: Failure) -> Self {
        self.failing_times(failure, usize::MAX)
    }

    pub fn failing_times(mut self, failure: Failure, times: usize) -> Self {
        self.failure = Some(failure);
        self.failures_left = Mutex::new(times);
        self
    }

    pub fn lookup_calls(&self) -> usize {
        self.calls.lock().unwrap().lookups.len()
    }

    pub fn page_calls(&self) -> usize {
        self.calls.lock().unwrap().pages.len()
    }

    pub fn requested_pages(&self) -> Vec<usize> {
        self.calls.lock().unwrap().pages.clone()
    }

    pub fn detail_calls(&self) -> usize {
        self.calls.lock().unwrap().details
    }

    fn fail_if(&self, target: Failure) -> Result<(), ApiError> {
        if self.failure != Some(target) {
            return Ok(());
        }
        let mut left = self.failures_left.lock().unwrap();
        if *left == 0 {
            return Ok(());
        }
        *left -= 1;
        Err(ApiError::Status {
            status: 503,
            url: format!("{:?}", target),
        })
    }
}

#[async_trait]
impl StatsApi for FakeApi {
    async fn lookup_player_by_name(
        &self,
        _region: &Region,
        name: &str,
    ) -> Result<PlayerIdentity, ApiError> {
        self.calls.lock().unwrap().lookups.push(name.to_string());
        self.fail_if(Failure::Lookup)?;
        self.players
            .get(name)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(name.to_string()))
    }

    async fn list_recent_matches(
        &self,
        _region: &Region,
        _account_id: &AccountId,
        page: PageRequest,
    ) -> Result<Vec<MatchSummary>, ApiError> {
        self.calls.lock().unwrap().pages.push(page.index);
        self.fail_if(Failure::Page(page.index))?;
        let begin = page.begin_index().min(self.history.len());
        let end = page.end_index().min(self.history.len());
        Ok(self.history[begin..end]
            .iter()
            .map(|m| MatchSummary {
                game_id: m.game_id().clone(),
            })
            .collect())
    }

    async fn get_match_detail(
        &self,
        _region: &Region,
        game_id: &GameId,
    ) -> Result<MatchDetail, ApiError> {
        self.calls.lock().unwrap().details += 1;
        let index = game_id[1..].parse::<usize>().unwrap();
        self.fail_if(Failure::Detail(index))?;
        self.history
            .get(index)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(game_id.clone()))
    }
}
