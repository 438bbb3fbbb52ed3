//! # DROPSIGHT
//!
//! Overlay display engine for world items: one screen-space badge per
//! tracked object, kept correct and cheap every frame.
//!
//! ## Architecture
//!
//! ```text
//!   host hooks (any thread)              tick thread
//! ┌─────────────────────┐  inbox   ┌──────────────────────────────────┐
//! │ appeared / removed  │─────────>│ OverlayEngine                    │
//! │ attribute changed   │          │  ├── DisplayRegistry (records)   │
//! │ config changed      │          │  ├── WidgetPool      (widgets)   │
//! └─────────────────────┘          │  ├── PositionScheduler (fast)    │
//!                                  │  └── ContentRefresh   (slow)     │
//!                                  └───────────────┬──────────────────┘
//!                                                  │ WidgetBackend
//!                                                  v
//!                                          host UI toolkit
//! ```
//!
//! ## Rules
//!
//! 1. **One writer of content** - notifications only mark records dirty;
//!    the content pass is the only code that writes sub-elements
//! 2. **Diff, don't repaint** - every sub-element write is gated on the
//!    record's cache of last-painted values
//! 3. **Owned widgets == live records** - a widget is acquired when a
//!    record is created and released exactly once when it is retired

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod attributes;
pub mod bus;
pub mod config;
mod content;
pub mod engine;
pub mod error;
pub mod host;
pub mod position;
mod record;
mod registry;
pub mod stats;

pub use attributes::{consumable_tint, FoodWarning, DURABILITY_EPSILON};
pub use bus::{ChangeBus, ChangePublisher, EventSender, Subscription};
pub use config::{FeatureToggles, GeneralConfig, OverlayConfig, PoolSettings};
pub use engine::{OverlayEngine, RecordState};
pub use error::{Collaborator, OverlayError, OverlayResult};
pub use host::{
    Durability, FishState, FrameContext, ItemKind, ItemSource, Localizer, Nourishment, PassThrough,
    Projector, ViewerState, WorldItem,
};
pub use position::{place, within_range, Cull, Placement, PositionSettings};
pub use stats::{EngineStats, PassStats, TickReport};
