//! Pass and engine counters.

use std::ops::AddAssign;

/// Counters for one scheduler pass (or a sum of passes).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Records the pass looked at.
    pub visited: u32,
    /// Records left shown.
    pub shown: u32,
    /// Records left hidden.
    pub hidden: u32,
    /// Records skipped (clean, or item unavailable).
    pub skipped: u32,
    /// Outbound widget calls issued.
    pub repaints: u32,
}

impl AddAssign for PassStats {
    fn add_assign(&mut self, rhs: Self) {
        self.visited += rhs.visited;
        self.shown += rhs.shown;
        self.hidden += rhs.hidden;
        self.skipped += rhs.skipped;
        self.repaints += rhs.repaints;
    }
}

/// What one [`crate::OverlayEngine::tick`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Position passes run.
    pub position_passes: u32,
    /// Content passes run.
    pub content_passes: u32,
    /// Summed position pass counters.
    pub position: PassStats,
    /// Summed content pass counters.
    pub content: PassStats,
}

/// Lifetime counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Ticks processed.
    pub ticks: u64,
    /// Position passes run.
    pub position_passes: u64,
    /// Content passes run.
    pub content_passes: u64,
    /// Display records created.
    pub records_created: u64,
    /// Display records removed.
    pub records_removed: u64,
    /// Attribute-change notifications that marked a record dirty.
    pub notifications: u64,
    /// Sub-element writes issued by content passes.
    pub repaints: u64,
    /// Appearances that could not get a widget.
    pub starved: u64,
}

impl EngineStats {
    pub(crate) fn record_tick(&mut self, report: &TickReport) {
        self.ticks += 1;
        self.position_passes += u64::from(report.position_passes);
        self.content_passes += u64::from(report.content_passes);
        self.repaints += u64::from(report.content.repaints);
    }
}
