//! Import progress reporting.

/// Trait for receiving import progress updates.
pub trait ImportProgress {
    /// Called when a phase starts (e.g., "Indexing assets").
    fn on_phase(&self, message: &str);

    /// Called after each sheet is segmented.
    fn on_sheet(&self, current: usize, total: usize, name: &str, blocks: usize);

    /// Called when the import is complete.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn on_phase(&self, _message: &str) {}
    fn on_sheet(&self, _current: usize, _total: usize, _name: &str, _blocks: usize) {}
    fn on_complete(&self, _message: &str) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl ImportProgress for LogProgress {
    fn on_phase(&self, message: &str) {
        log::info!("{}", message);
    }

    fn on_sheet(&self, current: usize, total: usize, name: &str, blocks: usize) {
        log::info!("  [{}/{}] {} ({} block(s))", current, total, name, blocks);
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}
