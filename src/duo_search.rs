use crate::analyzers::duo::classify;
use crate::analyzers::outcome::{OutcomeAggregator, ScanResult};
use crate::data_retrieval::api::StatsApi;
use crate::data_retrieval::match_scanner::{MatchScanner, ScanSettings};
use crate::error::DuoError;
use crate::match_stats::{DuoSet, PlayerIdentity};
use crate::progress::ScanObserver;
use crate::types::Region;

/// Everything a scan needs, already resolved and validated.
pub struct DuoSearch {
    pub player: PlayerIdentity,
    pub duos: DuoSet,
    pub games: usize,
}

/// Scans `search.games` recent matches of the player and tallies the ones
/// a duo played in. On an unrecovered upstream failure the scan stops and
/// the partial tally is returned inside `ScanInterrupted`.
pub async fn find_duo_games<A: StatsApi + ?Sized>(
    api: &A,
    region: &Region,
    settings: ScanSettings,
    search: &DuoSearch,
    observer: &mut dyn ScanObserver,
) -> Result<ScanResult, DuoError> {
    let mut scanner = MatchScanner::new(
        api,
        region.clone(),
        search.player.clone(),
        search.games,
        settings,
    )?;
    info!(
        "Now searching user {}'s last {} games for summoners: {}",
        search.player.name,
        search.games,
        search.duos.display_names().replace('\n', ", ")
    );
    let mut aggregator = OutcomeAggregator::new(scanner.requested());
    while let Some(next) = scanner.next_match().await {
        match next {
            Ok(match_) => {
                aggregator.observe(classify(&match_, &search.duos));
                observer.on_progress_tick(aggregator.scanned(), search.games);
            }
            Err(e) => {
                aggregator.set_attempted(scanner.attempted());
                let partial = aggregator.finalize();
                observer.on_scan_failed(&partial, &e);
                return Err(DuoError::ScanInterrupted { partial, source: e });
            }
        }
    }
    aggregator.set_attempted(scanner.attempted());
    let result = aggregator.finalize();
    info!(
        "Scanned {} games over {} pages.",
        result.scanned,
        scanner.pages_fetched()
    );
    observer.on_scan_complete(&result);
    Ok(result)
}
