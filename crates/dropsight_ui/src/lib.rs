//! # DROPSIGHT UI Surface
//!
//! Everything the overlay core says to the host UI toolkit goes through
//! [`WidgetBackend`]:
//!
//! ```text
//! ┌──────────────┐   acquire/release   ┌──────────────┐
//! │  WidgetPool  │────────────────────>│              │
//! └──────────────┘                     │              │
//! ┌──────────────┐   active/position   │   Widget     │
//! │  Position    │────────────────────>│   Backend    │
//! │  Scheduler   │                     │   (host)     │
//! └──────────────┘                     │              │
//! ┌──────────────┐   sub-elements      │              │
//! │  Content     │────────────────────>│              │
//! │  Refresh     │                     └──────────────┘
//! └──────────────┘
//! ```
//!
//! [`RecordingBackend`] implements the trait without any UI so the engine
//! can run headless.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod render;
pub mod style;
pub mod widget;

pub use render::{ElementMirror, RecordedValue, RecordingBackend, WidgetCommand, WidgetMirror};
pub use style::{Color, FoodPalette};
pub use widget::{SubElement, SubElementMask, SubElementValue, WidgetBackend, WidgetId};
