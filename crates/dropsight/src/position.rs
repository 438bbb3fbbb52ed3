//! # Position Scheduler
//!
//! High-frequency pass: culls each record and places the survivors.
//!
//! ## Per-record pipeline
//!
//! ```text
//! suppressed? ──yes──> hide
//!     │ no
//! excluded (fish under water)? ──yes──> hide
//!     │ no
//! dist² > max²? ──yes──> hide
//!     │ no
//! project(pos + offset [- camera offset]) behind viewer? ──yes──> hide
//!     │ no
//! set position, then show (on transition only)
//! ```
//!
//! Distance is compared squared against a squared threshold and never
//! against a linear one.

use dropsight_core::FixedInterval;
use dropsight_shared::{Vec2, Vec3};
use dropsight_ui::WidgetBackend;

use crate::config::GeneralConfig;
use crate::error::Collaborator;
use crate::host::{FrameContext, ItemKind, Projector, ViewerState, WorldItem};
use crate::registry::DisplayRegistry;
use crate::stats::PassStats;

/// Placement values derived from [`GeneralConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSettings {
    /// Squared cull distance.
    pub max_distance_sq: f32,
    /// World offset added before projection.
    pub world_offset: Vec3,
    /// Subtract the viewer camera's offset before projection.
    pub subtract_camera_offset: bool,
}

impl PositionSettings {
    /// Derives settings from the general config section.
    #[must_use]
    pub fn from_general(general: &GeneralConfig) -> Self {
        Self {
            max_distance_sq: general.max_distance * general.max_distance,
            world_offset: general.world_offset,
            subtract_camera_offset: general.subtract_camera_offset,
        }
    }
}

/// Why a badge is hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cull {
    /// Full-screen UI, busy input, or overlays toggled off.
    Suppressed,
    /// Item state forbids an overlay (fish under water).
    Excluded,
    /// Farther than the max distance.
    OutOfRange,
    /// Projected behind the camera.
    BehindViewer,
}

/// Outcome of placing one item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Hide the widget.
    Hidden(Cull),
    /// Show the widget at this screen position.
    Shown(Vec2),
}

/// Squared-distance range check.
#[inline]
#[must_use]
pub fn within_range(distance_sq: f32, max_distance_sq: f32) -> bool {
    distance_sq <= max_distance_sq
}

/// Decides where (and whether) an item's badge shows this pass.
#[must_use]
pub fn place(
    item: &WorldItem,
    viewer: &ViewerState,
    camera: &dyn Projector,
    settings: &PositionSettings,
    suppressed: bool,
) -> Placement {
    if suppressed || viewer.blocks_overlays() {
        return Placement::Hidden(Cull::Suppressed);
    }
    if item.kind == ItemKind::Fish && item.fish.is_some_and(|fish| !fish.overlay_allowed()) {
        return Placement::Hidden(Cull::Excluded);
    }
    if !within_range(
        viewer.position.distance_squared(item.position),
        settings.max_distance_sq,
    ) {
        return Placement::Hidden(Cull::OutOfRange);
    }

    let mut anchor = item.position + settings.world_offset;
    if settings.subtract_camera_offset {
        anchor = anchor - viewer.camera_offset;
    }
    let screen = camera.world_to_screen(anchor);
    if !screen.is_in_front() {
        return Placement::Hidden(Cull::BehindViewer);
    }
    Placement::Shown(screen.xy())
}

/// Fixed-interval culling and placement loop.
pub(crate) struct PositionScheduler {
    timer: FixedInterval,
    settings: PositionSettings,
    /// Collaborator missing on the previous pass, for transition logging.
    missing: Option<Collaborator>,
}

impl PositionScheduler {
    pub(crate) fn new(general: &GeneralConfig) -> Self {
        Self {
            timer: FixedInterval::from_secs(general.position_interval),
            settings: PositionSettings::from_general(general),
            missing: None,
        }
    }

    pub(crate) fn configure(&mut self, general: &GeneralConfig) {
        self.timer.set_interval(general.position_interval);
        self.settings = PositionSettings::from_general(general);
    }

    pub(crate) const fn settings(&self) -> PositionSettings {
        self.settings
    }

    /// Passes due after a frame of `delta_secs`.
    pub(crate) fn due(&mut self, delta_secs: f32) -> u32 {
        self.timer.accumulate(delta_secs)
    }

    /// Runs one pass over every record.
    ///
    /// Without a viewer or camera the pass does nothing and tries again
    /// next time.
    pub(crate) fn run_pass(
        &mut self,
        registry: &mut DisplayRegistry,
        ctx: &FrameContext<'_>,
        backend: &mut dyn WidgetBackend,
        suppressed: bool,
    ) -> PassStats {
        let mut stats = PassStats::default();

        let (viewer, camera) = match (ctx.viewer, ctx.camera) {
            (Some(viewer), Some(camera)) => (viewer, camera),
            (viewer, _) => {
                let missing = if viewer.is_none() {
                    Collaborator::Viewer
                } else {
                    Collaborator::Camera
                };
                if self.missing != Some(missing) {
                    tracing::debug!(%missing, "position pass disabled until collaborator returns");
                    self.missing = Some(missing);
                }
                stats.skipped = u32::try_from(registry.len()).unwrap_or(u32::MAX);
                return stats;
            }
        };
        if let Some(missing) = self.missing.take() {
            tracing::debug!(%missing, "collaborator available, position pass resumed");
        }

        for record in registry.iter_mut() {
            stats.visited += 1;
            let Some(item) = ctx.items.item(record.entity()) else {
                stats.skipped += 1;
                continue;
            };

            match place(item, &viewer, camera, &self.settings, suppressed) {
                Placement::Shown(position) => {
                    record.place(backend, position);
                    stats.repaints += 1;
                    if record.set_visible(backend, true) {
                        stats.repaints += 1;
                    }
                    stats.shown += 1;
                }
                Placement::Hidden(_) => {
                    if record.set_visible(backend, false) {
                        stats.repaints += 1;
                    }
                    stats.hidden += 1;
                }
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::FishState;
    use dropsight_shared::{IconId, ScreenPoint};

    fn front(p: Vec3) -> ScreenPoint {
        ScreenPoint::new(p.x * 100.0, p.y * 100.0, p.z)
    }

    fn settings(max_distance: f32) -> PositionSettings {
        PositionSettings::from_general(&GeneralConfig {
            max_distance,
            world_offset: Vec3::new(0.0, 0.5, 0.0),
            ..GeneralConfig::default()
        })
    }

    fn item_at(x: f32, z: f32) -> WorldItem {
        WorldItem::new(Vec3::new(x, 0.0, z), IconId(1))
    }

    #[test]
    fn test_shown_with_offset() {
        let viewer = ViewerState::at(Vec3::ZERO);
        let placement = place(&item_at(1.0, 2.0), &viewer, &front, &settings(10.0), false);
        assert_eq!(placement, Placement::Shown(Vec2::new(100.0, 50.0)));
    }

    #[test]
    fn test_camera_offset_subtracted() {
        let mut viewer = ViewerState::at(Vec3::ZERO);
        viewer.camera_offset = Vec3::new(0.0, 0.5, 0.0);
        let mut s = settings(10.0);
        s.subtract_camera_offset = true;

        let placement = place(&item_at(1.0, 2.0), &viewer, &front, &s, false);
        assert_eq!(placement, Placement::Shown(Vec2::new(100.0, 0.0)));
    }

    #[test]
    fn test_cull_order() {
        let viewer = ViewerState::at(Vec3::ZERO);
        let mut fish = item_at(1.0, 1.0);
        fish.kind = ItemKind::Fish;
        fish.fish = Some(FishState::default());

        assert_eq!(
            place(&fish, &viewer, &front, &settings(10.0), true),
            Placement::Hidden(Cull::Suppressed)
        );
        assert_eq!(
            place(&fish, &viewer, &front, &settings(10.0), false),
            Placement::Hidden(Cull::Excluded)
        );
        assert_eq!(
            place(&item_at(20.0, 0.0), &viewer, &front, &settings(10.0), false),
            Placement::Hidden(Cull::OutOfRange)
        );
        assert_eq!(
            place(&item_at(1.0, -1.0), &viewer, &front, &settings(10.0), false),
            Placement::Hidden(Cull::BehindViewer)
        );
    }

    #[test]
    fn test_fish_state_ignored_on_other_kinds() {
        let viewer = ViewerState::at(Vec3::ZERO);
        let mut item = item_at(1.0, 2.0);
        item.fish = Some(FishState::default());

        assert_eq!(
            place(&item, &viewer, &front, &settings(10.0), false),
            Placement::Shown(Vec2::new(100.0, 50.0))
        );
        item.kind = ItemKind::Fish;
        assert_eq!(
            place(&item, &viewer, &front, &settings(10.0), false),
            Placement::Hidden(Cull::Excluded)
        );
    }

    #[test]
    fn test_blocked_viewer_suppresses() {
        let mut viewer = ViewerState::at(Vec3::ZERO);
        viewer.input_free = false;
        assert_eq!(
            place(&item_at(1.0, 1.0), &viewer, &front, &settings(10.0), false),
            Placement::Hidden(Cull::Suppressed)
        );
    }

    #[test]
    fn test_squared_cull_matches_linear() {
        let max_distance = 10.0_f32;
        let max_sq = max_distance * max_distance;
        for step in 0..=400 {
            let distance = step as f32 * 0.05;
            assert_eq!(
                within_range(distance * distance, max_sq),
                distance <= max_distance,
                "mismatch at {distance}"
            );
        }
    }
}
