/// Wins and losses of some tracked setup.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct WinRatio {
    pub wins: u32,
    pub losses: u32,
}

impl WinRatio {
    pub fn add_score(&mut self, win: bool) {
        if win {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
    }

    /// `None` while no game was recorded.
    pub fn as_percent(&self) -> Option<f64> {
        if self.total() == 0 {
            None
        } else {
            Some(self.wins as f64 / self.total() as f64 * 100.0)
        }
    }

    pub fn total(&self) -> u32 {
        self.wins + self.losses
    }
}
