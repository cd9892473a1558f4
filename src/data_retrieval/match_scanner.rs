use crate::data_retrieval::api::{ApiError, PageRequest, StatsApi};
use crate::error::DuoError;
use crate::match_stats::{MatchDetail, MatchSummary, PlayerIdentity};
use crate::types::Region;
use serde::Deserialize;
use std::collections::VecDeque;
use std::future::Future;
use std::time::Duration;
use strum_macros::{Display, EnumString};

/// What to do when an upstream call fails in the middle of a scan.
#[derive(Deserialize, Display, EnumString, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop at the first failure.
    Abort,
    /// Repeat the failed call up to `max_retries` times before stopping.
    Retry,
}

pub const DEFAULT_PAGE_SIZE: usize = 100;
pub const DEFAULT_MAX_RETRIES: u32 = 3;

#[derive(Debug, Clone)]
pub struct ScanSettings {
    pub page_size: usize,
    pub policy: FailurePolicy,
    pub max_retries: u32,
    pub retry_delay: Duration,
}

impl Default for ScanSettings {
    fn default() -> Self {
        ScanSettings {
            page_size: DEFAULT_PAGE_SIZE,
            policy: FailurePolicy::Abort,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: Duration::from_secs(1),
        }
    }
}

/// Checks that `requested` is a positive multiple of `page_size`.
pub fn validate_scan_depth(requested: usize, page_size: usize) -> Result<usize, DuoError> {
    if page_size == 0 || requested == 0 || requested % page_size != 0 {
        return Err(DuoError::InvalidIterationCount {
            requested,
            page_size,
        });
    }
    Ok(requested)
}

/// Walks a player's match history page by page, resolving every listed match
/// to its details. Yields at most `requested` matches, stops for good at the
/// first unrecovered failure and cannot be restarted.
pub struct MatchScanner<'a, A: StatsApi + ?Sized> {
    api: &'a A,
    region: Region,
    player: PlayerIdentity,
    settings: ScanSettings,
    requested: usize,
    total_pages: usize,
    next_page: usize,
    pending: VecDeque<MatchSummary>,
    yielded: usize,
    finished: bool,
}

impl<'a, A: StatsApi + ?Sized> MatchScanner<'a, A> {
    pub fn new(
        api: &'a A,
        region: Region,
        player: PlayerIdentity,
        requested: usize,
        settings: ScanSettings,
    ) -> Result<Self, DuoError> {
        validate_scan_depth(requested, settings.page_size)?;
        Ok(MatchScanner {
            api,
            region,
            player,
            total_pages: requested / settings.page_size,
            settings,
            requested,
            next_page: 0,
            pending: VecDeque::new(),
            yielded: 0,
            finished: false,
        })
    }

    pub fn requested(&self) -> usize {
        self.requested
    }

    pub fn pages_fetched(&self) -> usize {
        self.next_page
    }

    /// Games covered by the pages requested so far, failed page included.
    pub fn attempted(&self) -> usize {
        (self.next_page * self.settings.page_size).min(self.requested)
    }

    /// Next resolved match, `None` once the scan is over.
    pub async fn next_match(&mut self) -> Option<Result<MatchDetail, ApiError>> {
        if self.finished {
            return None;
        }
        if self.pending.is_empty() {
            if let Err(e) = self.fetch_next_page().await {
                self.finished = true;
                return Some(Err(e));
            }
        }
        let summary = match self.pending.pop_front() {
            Some(summary) => summary,
            None => {
                self.finished = true;
                return None;
            }
        };
        let api = self.api;
        let region = &self.region;
        let game_id = &summary.game_id;
        let detail = with_policy(&self.settings, || api.get_match_detail(region, game_id)).await;
        match detail {
            Ok(detail) => {
                self.yielded += 1;
                if self.yielded >= self.requested {
                    self.finished = true;
                }
                Some(Ok(detail))
            }
            Err(e) => {
                warn!("Unable to resolve match {}: {}", summary.game_id, e);
                self.finished = true;
                Some(Err(e))
            }
        }
    }

    /// Leaves `pending` empty when there are no more pages or the history ran out.
    async fn fetch_next_page(&mut self) -> Result<(), ApiError> {
        if self.next_page >= self.total_pages {
            return Ok(());
        }
        let page = PageRequest {
            index: self.next_page,
            size: self.settings.page_size,
        };
        self.next_page += 1;
        info!(
            "Scanning page {}/{} of {}'s history.",
            self.next_page, self.total_pages, self.player.name
        );
        let api = self.api;
        let region = &self.region;
        let account_id = &self.player.account_id;
        let mut summaries =
            with_policy(&self.settings, || api.list_recent_matches(region, account_id, page))
                .await
                .map_err(|e| {
                    warn!("Unable to fetch page {}: {}", page.index, e);
                    e
                })?;
        summaries.truncate(self.settings.page_size);
        if summaries.len() < self.settings.page_size {
            info!(
                "History exhausted after {} matches.",
                page.begin_index() + summaries.len()
            );
            self.total_pages = self.next_page;
        }
        self.pending.extend(summaries);
        Ok(())
    }
}

/// Runs `call`, repeating it on failure when the policy allows.
async fn with_policy<T, F, Fut>(settings: &ScanSettings, mut call: F) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let retries = match settings.policy {
        FailurePolicy::Abort => 0,
        FailurePolicy::Retry => settings.max_retries,
    };
    let mut attempt = 0;
    loop {
        match call().await {
            Ok(val) => return Ok(val),
            Err(e) if attempt < retries => {
                attempt += 1;
                warn!("Error ({}) occured, retry {}/{}.", e, attempt, retries);
                tokio::time::sleep(settings.retry_delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}
