//! Widget handles and the outbound backend trait.
//!
//! A badge widget is one screen-space element with a fixed set of
//! sub-elements (icon, texts, bar, markers).

mod backend;

pub use backend::{SubElement, SubElementMask, SubElementValue, WidgetBackend, WidgetId};
