//! # DROPSIGHT Shared
//!
//! Common types used by the host integration and the overlay core.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on the widget backend or the engine crate.
//! If you need widget types, put them in `dropsight_ui`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod entity;
pub mod events;
pub mod math;

pub use constants::{
    DEFAULT_CONTENT_INTERVAL, DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_CAPACITY,
    DEFAULT_MAX_DISTANCE, DEFAULT_POSITION_INTERVAL, DEFAULT_WORLD_OFFSET,
};
pub use entity::{EntityKey, IconId};
pub use events::{ConfigChange, Feature, HostEvent, MutationOrigin};
pub use math::{ScreenPoint, Vec2, Vec3};
