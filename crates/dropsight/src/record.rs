//! # Display Record
//!
//! Per-entity bookkeeping: the owned widget, the diff cache of
//! last-painted values and the show/hide state last applied.
//!
//! A record is created with a widget already acquired and is consumed by
//! [`DisplayRecord::retire`], which is the only path back to the pool.

use dropsight_core::WidgetPool;
use dropsight_shared::{EntityKey, IconId, Vec2};
use dropsight_ui::{Color, SubElementMask, WidgetBackend, WidgetId};

use crate::attributes::{PaintContext, Painter, ATTRIBUTES};
use crate::bus::Subscription;
use crate::error::OverlayResult;
use crate::host::WorldItem;

/// Last-painted attribute values.
///
/// Only ever compared against freshly derived values; never read back as
/// the truth about an item.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct AttributeCache {
    pub(crate) icon: Option<IconId>,
    pub(crate) stack: Option<u32>,
    pub(crate) quality: Option<u32>,
    pub(crate) durability: Option<f32>,
    /// Name token last localized.
    pub(crate) name_token: Option<String>,
    /// Localized name not yet written.
    pub(crate) name_text: Option<String>,
    pub(crate) name_blank: bool,
    pub(crate) food_tint: Option<Color>,
    /// Sub-elements last written as visible.
    pub(crate) shown: SubElementMask,
    /// At least one full paint has happened.
    pub(crate) primed: bool,
}

/// One tracked world object and its widget.
pub(crate) struct DisplayRecord {
    entity: EntityKey,
    widget: WidgetId,
    cache: AttributeCache,
    dirty: bool,
    visible: bool,
    _subscription: Subscription,
}

impl DisplayRecord {
    pub(crate) fn new(entity: EntityKey, widget: WidgetId, subscription: Subscription) -> Self {
        Self {
            entity,
            widget,
            cache: AttributeCache::default(),
            dirty: true,
            visible: false,
            _subscription: subscription,
        }
    }

    pub(crate) const fn entity(&self) -> EntityKey {
        self.entity
    }

    pub(crate) const fn widget(&self) -> WidgetId {
        self.widget
    }

    pub(crate) const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) const fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Applies a show/hide decision; only transitions reach the backend.
    ///
    /// Returns true if a call was issued.
    pub(crate) fn set_visible(&mut self, backend: &mut dyn WidgetBackend, visible: bool) -> bool {
        if self.visible == visible {
            return false;
        }
        backend.set_active(self.widget, visible);
        self.visible = visible;
        true
    }

    pub(crate) fn place(&self, backend: &mut dyn WidgetBackend, position: Vec2) {
        backend.set_screen_position(self.widget, position);
    }

    /// Re-derives every attribute and writes what changed.
    ///
    /// The first paint writes every visibility bit unconditionally. Clears
    /// the dirty flag and returns the number of sub-element writes.
    pub(crate) fn paint(
        &mut self,
        item: &WorldItem,
        ctx: &PaintContext<'_>,
        backend: &mut dyn WidgetBackend,
    ) -> u32 {
        let force = !self.cache.primed;
        let mut painter = Painter::new(backend, self.widget);
        for row in &ATTRIBUTES {
            row.apply(item, ctx, &mut self.cache, &mut painter, force);
        }
        self.cache.primed = true;
        self.dirty = false;
        painter.writes()
    }

    /// Hands the widget back to the pool and drops the subscription.
    pub(crate) fn retire(
        self,
        pool: &mut WidgetPool<WidgetId>,
        backend: &mut dyn WidgetBackend,
    ) -> OverlayResult<()> {
        pool.release(backend, self.widget)?;
        Ok(())
    }
}
