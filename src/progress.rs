use crate::analyzers::outcome::ScanResult;
use crate::data_retrieval::api::ApiError;
use std::io::Write;

/// Receives scan events. `on_progress_tick` fires once per processed match,
/// then exactly one of `on_scan_complete` and `on_scan_failed` closes the scan.
pub trait ScanObserver {
    fn on_progress_tick(&mut self, current: usize, total: usize);
    fn on_scan_complete(&mut self, result: &ScanResult);
    fn on_scan_failed(&mut self, partial: &ScanResult, reason: &ApiError);
}

fn percent(current: usize, total: usize) -> usize {
    if total == 0 {
        0
    } else {
        current * 100 / total
    }
}

/// Logs every `step` ticks and the final outcome.
pub struct LogObserver {
    step: usize,
}

impl LogObserver {
    pub fn new(step: usize) -> Self {
        LogObserver { step: step.max(1) }
    }
}

impl ScanObserver for LogObserver {
    fn on_progress_tick(&mut self, current: usize, total: usize) {
        if current % self.step == 0 || current == total {
            info!("Processed {}/{} matches.", current, total);
        }
    }

    fn on_scan_complete(&mut self, result: &ScanResult) {
        info!(
            "Scan finished. Count: {}, Play Count: {}, Wins: {}, Losses: {}",
            result.scanned,
            result.participated(),
            result.wins(),
            result.losses()
        );
    }

    fn on_scan_failed(&mut self, partial: &ScanResult, reason: &ApiError) {
        error!(
            "Scan interrupted after {}/{} matches ({} attempted): {}",
            partial.scanned, partial.requested, partial.attempted, reason
        );
    }
}

/// Prints `current/total - pct%` lines and the final report.
pub struct ConsoleProgress<W: Write> {
    out: W,
}

impl<W: Write> ConsoleProgress<W> {
    pub fn new(out: W) -> Self {
        ConsoleProgress { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{}", line) {
            warn!("Unable to write progress: {}", e);
        }
    }
}

impl<W: Write> ScanObserver for ConsoleProgress<W> {
    fn on_progress_tick(&mut self, current: usize, total: usize) {
        let line = format!("{}/{} - {}%", current, total, percent(current, total));
        self.emit(&line);
    }

    fn on_scan_complete(&mut self, result: &ScanResult) {
        let report = format!("All done!\n{}", result);
        self.emit(&report);
    }

    fn on_scan_failed(&mut self, partial: &ScanResult, reason: &ApiError) {
        let report = format!(
            "There was an error when processing matches: {}\nPartial {}",
            reason, partial
        );
        self.emit(&report);
    }
}

/// Forwards every event to both observers.
pub struct Tee<'a> {
    first: &'a mut dyn ScanObserver,
    second: &'a mut dyn ScanObserver,
}

impl<'a> Tee<'a> {
    pub fn new(first: &'a mut dyn ScanObserver, second: &'a mut dyn ScanObserver) -> Self {
        Tee { first, second }
    }
}

impl<'a> ScanObserver for Tee<'a> {
    fn on_progress_tick(&mut self, current: usize, total: usize) {
        self.first.on_progress_tick(current, total);
        self.second.on_progress_tick(current, total);
    }

    fn on_scan_complete(&mut self, result: &ScanResult) {
        self.first.on_scan_complete(result);
        self.second.on_scan_complete(result);
    }

    fn on_scan_failed(&mut self, partial: &ScanResult, reason: &ApiError) {
        self.first.on_scan_failed(partial, reason);
        self.second.on_scan_failed(partial, reason);
    }
}
