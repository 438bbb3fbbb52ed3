//! # Tuning Defaults
//!
//! Baseline values used when the host supplies no configuration.
//! The persistence layer may override every one of them at runtime.

use crate::math::Vec3;

// =============================================================================
// SCHEDULING
// =============================================================================

/// Seconds between two position passes.
pub const DEFAULT_POSITION_INTERVAL: f32 = 0.01;

/// Seconds between two content passes.
///
/// Item data changes far less often than the camera moves.
pub const DEFAULT_CONTENT_INTERVAL: f32 = 0.25;

// =============================================================================
// PLACEMENT
// =============================================================================

/// Maximum viewer distance (world units) at which a badge is shown.
pub const DEFAULT_MAX_DISTANCE: f32 = 10.0;

/// World-space offset added to the item position before projection.
pub const DEFAULT_WORLD_OFFSET: Vec3 = Vec3::new(0.0, 0.5, 0.0);

// =============================================================================
// WIDGET POOL
// =============================================================================

/// Widgets created up-front when the pool is warmed.
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

/// Hard ceiling on widgets alive at once (owned + idle).
pub const DEFAULT_MAX_CAPACITY: usize = 512;
