//! Core widget types and the backend trait.

use dropsight_core::PoolSource;
use dropsight_shared::{IconId, Vec2};

use crate::style::Color;

/// Unique identifier for a host widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(pub u64);

impl WidgetId {
    /// Creates a new widget ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// The fixed sub-elements of a badge widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SubElement {
    /// Panel background.
    Background = 0,
    /// Item icon.
    Icon = 1,
    /// Stack count text.
    Amount = 2,
    /// Quality tier text.
    Quality = 3,
    /// Durability bar.
    Durability = 4,
    /// Localized name text.
    Name = 5,
    /// Non-teleportable marker.
    NoTeleport = 6,
    /// Consumable tint icon.
    Food = 7,
    /// Equipped marker.
    Equipped = 8,
}

impl SubElement {
    /// Number of sub-elements.
    pub const COUNT: usize = 9;

    /// Dense index (0..COUNT).
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A value written to one sub-element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SubElementValue<'a> {
    /// Show or hide the sub-element.
    Visible(bool),
    /// Replace the icon sprite.
    Icon(IconId),
    /// Replace the text.
    Text(&'a str),
    /// Set a bar fill fraction (0-1).
    Fill(f32),
    /// Set the tint color.
    Tint(Color),
}

/// One bit per [`SubElement`] (bitfield for efficiency).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubElementMask(u16);

impl SubElementMask {
    /// No bits set.
    pub const EMPTY: Self = Self(0);

    /// Returns true if the element's bit is set.
    #[inline]
    #[must_use]
    pub const fn has(self, element: SubElement) -> bool {
        (self.0 & (1 << element as u16)) != 0
    }

    /// Sets or clears the element's bit.
    #[inline]
    pub fn assign(&mut self, element: SubElement, on: bool) {
        if on {
            self.0 |= 1 << element as u16;
        } else {
            self.0 &= !(1 << element as u16);
        }
    }
}

/// Outbound interface to the host UI toolkit.
///
/// Creation, deactivation and destruction come from [`PoolSource`]; the
/// engine only reaches them through the widget pool.
pub trait WidgetBackend: PoolSource<Handle = WidgetId> {
    /// Shows or hides the whole widget.
    fn set_active(&mut self, widget: WidgetId, active: bool);

    /// Moves the widget to a screen position (pixels).
    fn set_screen_position(&mut self, widget: WidgetId, position: Vec2);

    /// Writes one sub-element.
    fn set_sub_element(
        &mut self,
        widget: WidgetId,
        element: SubElement,
        value: SubElementValue<'_>,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_bits() {
        let mut mask = SubElementMask::EMPTY;
        mask.assign(SubElement::Amount, true);
        mask.assign(SubElement::Equipped, true);

        assert!(mask.has(SubElement::Amount));
        assert!(mask.has(SubElement::Equipped));
        assert!(!mask.has(SubElement::Icon));

        mask.assign(SubElement::Amount, false);
        assert!(!mask.has(SubElement::Amount));
    }

    #[test]
    fn test_indices_dense() {
        assert_eq!(SubElement::Background.index(), 0);
        assert_eq!(SubElement::Equipped.index(), SubElement::COUNT - 1);
    }
}
