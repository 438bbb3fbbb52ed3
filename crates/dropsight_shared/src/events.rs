//! Inbound events from the host to the overlay core.
//!
//! The host fires these on whatever thread it likes; the engine marshals
//! them onto its tick thread before touching the registry or the pool.

use crate::entity::EntityKey;
use crate::math::Vec3;

/// Per-feature show/hide toggles exposed to the configuration layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Panel background behind the badge
    Background,
    /// Stack-count text for stackable items
    Amount,
    /// Quality tier text
    Quality,
    /// Durability bar for worn items
    Durability,
    /// Localized item name
    Name,
    /// Marker for items that cannot be teleported
    NoTeleport,
    /// Tinted icon for consumables
    FoodColoring,
}

/// Who performed a tracked mutation.
///
/// Only mutations the local viewer is authoritative for are forwarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationOrigin {
    /// The local peer owns the object and made the change
    Local,
    /// A change replicated from another peer
    Remote,
}

/// A single configuration value change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigChange {
    /// Seconds between position passes (must be > 0)
    PositionInterval(f32),
    /// Seconds between content passes (must be > 0)
    ContentInterval(f32),
    /// Maximum display distance (must be > 0)
    MaxDistance(f32),
    /// World-space offset applied before projection
    WorldOffset(Vec3),
    /// Subtract the camera's own offset before projection
    SubtractCameraOffset(bool),
    /// Show or hide one sub-element feature
    Feature(Feature, bool),
    /// Global suppress toggle (hotkey state)
    OverlaysHidden(bool),
}

/// Events the host delivers to the overlay core.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    /// A trackable world object came into existence
    ObjectAppeared(EntityKey),
    /// A tracked world object is about to be destroyed
    ObjectRemoved(EntityKey),
    /// A tracked attribute of the object changed
    AttributeChanged(EntityKey),
    /// A configuration value changed
    ConfigChanged(ConfigChange),
}
