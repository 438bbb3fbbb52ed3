//! Headless widget backend.
//!
//! Records every outbound call and mirrors the resulting widget state, so
//! the engine can run without a UI toolkit and tests can assert on what a
//! real backend would have been told.

use std::collections::HashMap;

use dropsight_core::PoolSource;
use dropsight_shared::{IconId, Vec2};

use crate::style::Color;
use crate::widget::{SubElement, SubElementValue, WidgetBackend, WidgetId};

/// An outbound call, as recorded.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetCommand {
    /// A widget was created.
    Create(WidgetId),
    /// A widget was deactivated on its way back into the pool.
    Deactivate(WidgetId),
    /// A widget was destroyed.
    Destroy(WidgetId),
    /// Whole-widget visibility.
    SetActive {
        /// Target widget.
        widget: WidgetId,
        /// New state.
        active: bool,
    },
    /// Screen placement.
    SetPosition {
        /// Target widget.
        widget: WidgetId,
        /// Pixel position.
        position: Vec2,
    },
    /// Sub-element write.
    SetSubElement {
        /// Target widget.
        widget: WidgetId,
        /// Target sub-element.
        element: SubElement,
        /// Written value (text copied).
        value: RecordedValue,
    },
}

/// Owned copy of a [`SubElementValue`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedValue {
    /// Visibility.
    Visible(bool),
    /// Icon sprite.
    Icon(IconId),
    /// Text.
    Text(String),
    /// Bar fill.
    Fill(f32),
    /// Tint.
    Tint(Color),
}

impl From<SubElementValue<'_>> for RecordedValue {
    fn from(value: SubElementValue<'_>) -> Self {
        match value {
            SubElementValue::Visible(v) => Self::Visible(v),
            SubElementValue::Icon(icon) => Self::Icon(icon),
            SubElementValue::Text(text) => Self::Text(text.to_owned()),
            SubElementValue::Fill(fill) => Self::Fill(fill),
            SubElementValue::Tint(color) => Self::Tint(color),
        }
    }
}

/// Mirrored state of one sub-element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementMirror {
    /// Last visibility written.
    pub visible: bool,
    /// Last icon written.
    pub icon: Option<IconId>,
    /// Last text written.
    pub text: Option<String>,
    /// Last fill written.
    pub fill: Option<f32>,
    /// Last tint written.
    pub tint: Option<Color>,
    /// Total writes to this element.
    pub writes: u32,
}

/// Mirrored state of one widget.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetMirror {
    /// Whole-widget visibility.
    pub active: bool,
    /// Last screen position.
    pub position: Option<Vec2>,
    /// Per sub-element state, indexed by [`SubElement::index`].
    pub elements: [ElementMirror; SubElement::COUNT],
    /// Number of `set_active` calls received.
    pub activations: u32,
}

impl WidgetMirror {
    /// Mirror of one sub-element.
    #[must_use]
    pub fn element(&self, element: SubElement) -> &ElementMirror {
        &self.elements[element.index()]
    }

    /// Total sub-element writes across all elements.
    #[must_use]
    pub fn sub_element_writes(&self) -> u32 {
        self.elements.iter().map(|e| e.writes).sum()
    }
}

/// A [`WidgetBackend`] with no UI behind it.
pub struct RecordingBackend {
    /// Live widgets.
    widgets: HashMap<WidgetId, WidgetMirror>,
    /// Command log (only filled while recording).
    commands: Vec<WidgetCommand>,
    /// Whether to append to the command log.
    recording: bool,
    /// Whether `create` succeeds (template present).
    template_ready: bool,
    /// ID counter for generating unique IDs.
    next_id: u64,
    /// Widgets destroyed so far.
    destroyed: u64,
}

impl RecordingBackend {
    /// Creates a backend that records every command.
    #[must_use]
    pub fn new() -> Self {
        Self {
            widgets: HashMap::with_capacity(256),
            commands: Vec::with_capacity(1024),
            recording: true,
            template_ready: true,
            next_id: 1,
            destroyed: 0,
        }
    }

    /// Creates a backend that only mirrors state (no command log).
    ///
    /// Used by benches where the log would dominate the measurement.
    #[must_use]
    pub fn mirror_only() -> Self {
        Self {
            recording: false,
            ..Self::new()
        }
    }

    /// Makes widget creation succeed or fail, as if the host template
    /// were present or missing.
    pub fn set_template_ready(&mut self, ready: bool) {
        self.template_ready = ready;
    }

    /// Recorded commands.
    #[must_use]
    pub fn commands(&self) -> &[WidgetCommand] {
        &self.commands
    }

    /// Sub-element writes in the log addressed to one widget.
    #[must_use]
    pub fn sub_element_commands(&self, widget: WidgetId) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, WidgetCommand::SetSubElement { widget: w, .. } if *w == widget))
            .count()
    }

    /// Mirror of a live widget.
    #[must_use]
    pub fn widget(&self, widget: WidgetId) -> Option<&WidgetMirror> {
        self.widgets.get(&widget)
    }

    /// Number of live widgets (owned by the pool in any state).
    #[must_use]
    pub fn live_widgets(&self) -> usize {
        self.widgets.len()
    }

    /// Number of widgets currently shown.
    #[must_use]
    pub fn active_widgets(&self) -> usize {
        self.widgets.values().filter(|w| w.active).count()
    }

    /// Widgets destroyed so far.
    #[must_use]
    pub const fn destroyed(&self) -> u64 {
        self.destroyed
    }

    fn record(&mut self, command: WidgetCommand) {
        if self.recording {
            self.commands.push(command);
        }
    }
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl PoolSource for RecordingBackend {
    type Handle = WidgetId;

    fn create(&mut self) -> Option<WidgetId> {
        if !self.template_ready {
            return None;
        }
        let id = WidgetId::new(self.next_id);
        self.next_id += 1;
        self.widgets.insert(id, WidgetMirror::default());
        self.record(WidgetCommand::Create(id));
        Some(id)
    }

    fn deactivate(&mut self, handle: WidgetId) {
        if let Some(mirror) = self.widgets.get_mut(&handle) {
            mirror.active = false;
        }
        self.record(WidgetCommand::Deactivate(handle));
    }

    fn destroy(&mut self, handle: WidgetId) {
        self.widgets.remove(&handle);
        self.destroyed += 1;
        self.record(WidgetCommand::Destroy(handle));
    }
}

impl WidgetBackend for RecordingBackend {
    fn set_active(&mut self, widget: WidgetId, active: bool) {
        if let Some(mirror) = self.widgets.get_mut(&widget) {
            mirror.active = active;
            mirror.activations += 1;
        }
        self.record(WidgetCommand::SetActive { widget, active });
    }

    fn set_screen_position(&mut self, widget: WidgetId, position: Vec2) {
        if let Some(mirror) = self.widgets.get_mut(&widget) {
            mirror.position = Some(position);
        }
        self.record(WidgetCommand::SetPosition { widget, position });
    }

    fn set_sub_element(
        &mut self,
        widget: WidgetId,
        element: SubElement,
        value: SubElementValue<'_>,
    ) {
        if let Some(mirror) = self.widgets.get_mut(&widget) {
            let slot = &mut mirror.elements[element.index()];
            slot.writes += 1;
            match value {
                SubElementValue::Visible(v) => slot.visible = v,
                SubElementValue::Icon(icon) => slot.icon = Some(icon),
                SubElementValue::Text(text) => slot.text = Some(text.to_owned()),
                SubElementValue::Fill(fill) => slot.fill = Some(fill),
                SubElementValue::Tint(color) => slot.tint = Some(color),
            }
        }
        if self.recording {
            self.commands.push(WidgetCommand::SetSubElement {
                widget,
                element,
                value: value.into(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_tracks_writes() {
        let mut backend = RecordingBackend::new();
        let id = backend.create().unwrap();

        backend.set_sub_element(id, SubElement::Amount, SubElementValue::Text("5"));
        backend.set_sub_element(id, SubElement::Amount, SubElementValue::Visible(true));
        backend.set_active(id, true);

        let mirror = backend.widget(id).unwrap();
        assert!(mirror.active);
        assert_eq!(mirror.element(SubElement::Amount).text.as_deref(), Some("5"));
        assert!(mirror.element(SubElement::Amount).visible);
        assert_eq!(mirror.sub_element_writes(), 2);
        assert_eq!(backend.sub_element_commands(id), 2);
    }

    #[test]
    fn test_missing_template_refuses_create() {
        let mut backend = RecordingBackend::new();
        backend.set_template_ready(false);
        assert!(backend.create().is_none());

        backend.set_template_ready(true);
        assert!(backend.create().is_some());
    }

    #[test]
    fn test_mirror_only_keeps_no_log() {
        let mut backend = RecordingBackend::mirror_only();
        let id = backend.create().unwrap();
        backend.set_active(id, true);

        assert!(backend.commands().is_empty());
        assert_eq!(backend.active_widgets(), 1);
    }
}
