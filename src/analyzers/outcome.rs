use super::analyzers_utils::WinRatio;
use crate::analyzers::duo::DuoGame;
use std::fmt;

/// Tally of a (possibly partial) scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanResult {
    /// Games the caller asked to scan.
    pub requested: usize,
    /// Games covered by the pages fetched so far, including a page whose
    /// fetch failed.
    pub attempted: usize,
    /// Games actually classified so far.
    pub scanned: usize,
    /// Outcome of the games with at least one duo present.
    pub duo_games: WinRatio,
}

impl ScanResult {
    pub fn participated(&self) -> usize {
        self.duo_games.total() as usize
    }

    pub fn wins(&self) -> usize {
        self.duo_games.wins as usize
    }

    pub fn losses(&self) -> usize {
        self.duo_games.losses as usize
    }

    /// `None` when no duo game was found.
    pub fn win_percentage(&self) -> Option<f64> {
        self.duo_games.as_percent()
    }
}

impl fmt::Display for ScanResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Search Results")?;
        writeln!(f, "Games Searched: {}", self.scanned)?;
        writeln!(f, "Duo Games: {}", self.participated())?;
        writeln!(f, "Games Won: {}", self.wins())?;
        writeln!(f, "Games Lost: {}", self.losses())?;
        match self.win_percentage() {
            Some(pct) => write!(f, "Win Percentage: {:.2}%", pct),
            None => write!(f, "Win Percentage: n/a"),
        }
    }
}

pub struct OutcomeAggregator {
    result: ScanResult,
}

impl OutcomeAggregator {
    pub fn new(requested: usize) -> Self {
        OutcomeAggregator {
            result: ScanResult {
                requested,
                attempted: 0,
                scanned: 0,
                duo_games: WinRatio::default(),
            },
        }
    }

    pub fn observe(&mut self, classification: Option<DuoGame>) {
        self.result.scanned += 1;
        if let Some(game) = classification {
            self.result.duo_games.add_score(game.won);
        }
    }

    pub fn set_attempted(&mut self, attempted: usize) {
        self.result.attempted = attempted;
    }

    pub fn scanned(&self) -> usize {
        self.result.scanned
    }

    /// Current totals; safe to call mid-scan.
    pub fn finalize(&self) -> ScanResult {
        self.result
    }
}
