use crate::match_stats::{MatchDetail, MatchSummary, PlayerIdentity};
use crate::types::{AccountId, GameId, Region};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("resource not found: {0}")]
    NotFound(String),
    #[error("upstream responded with status {status} for {url}")]
    Status { status: u16, url: String },
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unable to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// One page of a player's match list. Page `index` covers entries
/// `[index * size, (index + 1) * size)` of the upstream history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub index: usize,
    pub size: usize,
}

impl PageRequest {
    pub fn begin_index(&self) -> usize {
        self.index * self.size
    }

    pub fn end_index(&self) -> usize {
        (self.index + 1) * self.size
    }
}

/// Calls the duo search needs from a game statistics service.
#[async_trait]
pub trait StatsApi: Send + Sync {
    async fn lookup_player_by_name(
        &self,
        region: &Region,
        name: &str,
    ) -> Result<PlayerIdentity, ApiError>;

    async fn list_recent_matches(
        &self,
        region: &Region,
        account_id: &AccountId,
        page: PageRequest,
    ) -> Result<Vec<MatchSummary>, ApiError>;

    async fn get_match_detail(
        &self,
        region: &Region,
        game_id: &GameId,
    ) -> Result<MatchDetail, ApiError>;
}
