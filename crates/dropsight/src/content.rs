//! # Content Refresh Loop
//!
//! Low-frequency pass that repaints dirty records only. A clean record
//! costs one flag check.

use dropsight_core::FixedInterval;
use dropsight_ui::{FoodPalette, WidgetBackend};

use crate::attributes::PaintContext;
use crate::config::FeatureToggles;
use crate::host::FrameContext;
use crate::registry::DisplayRegistry;
use crate::stats::PassStats;

pub(crate) struct ContentRefresh {
    timer: FixedInterval,
}

impl ContentRefresh {
    pub(crate) fn new(interval: f32) -> Self {
        Self {
            timer: FixedInterval::from_secs(interval),
        }
    }

    pub(crate) fn set_interval(&mut self, interval: f32) {
        self.timer.set_interval(interval);
    }

    pub(crate) fn due(&mut self, delta_secs: f32) -> u32 {
        self.timer.accumulate(delta_secs)
    }

    /// Repaints every dirty record whose item is readable.
    ///
    /// A record whose item read misses stays dirty and is retried next pass.
    pub(crate) fn run_pass(
        registry: &mut DisplayRegistry,
        ctx: &FrameContext<'_>,
        features: &FeatureToggles,
        palette: &FoodPalette,
        backend: &mut dyn WidgetBackend,
    ) -> PassStats {
        let paint = PaintContext {
            features,
            palette,
            localizer: ctx.localizer,
            teleport_all: ctx.teleport_all,
        };
        let mut stats = PassStats::default();

        for record in registry.iter_mut() {
            stats.visited += 1;
            if !record.is_dirty() {
                stats.skipped += 1;
                continue;
            }
            let Some(item) = ctx.items.item(record.entity()) else {
                stats.skipped += 1;
                continue;
            };
            stats.repaints += record.paint(item, &paint, backend);
            if record.is_visible() {
                stats.shown += 1;
            } else {
                stats.hidden += 1;
            }
        }

        stats
    }
}
