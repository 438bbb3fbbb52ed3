//! # Attribute Table
//!
//! Each displayable attribute is one row: an optional feature flag, a
//! domain precondition, and a renderer that diffs against the record's
//! cache. The content pass evaluates every row the same way:
//!
//! ```text
//! visible = feature enabled && precondition(item)
//! if visible changed (or first paint) -> write Visible(visible)
//! if visible                          -> render(item) (writes only on change)
//! ```

use dropsight_shared::Feature;
use dropsight_ui::{Color, FoodPalette, SubElement, SubElementValue, WidgetBackend, WidgetId};

use crate::config::FeatureToggles;
use crate::host::{ItemKind, Localizer, Nourishment, WorldItem};
use crate::record::AttributeCache;

/// Fraction changes at or below this are treated as jitter.
pub const DURABILITY_EPSILON: f32 = 1.0e-4;

/// Inputs shared by every row during one paint.
pub struct PaintContext<'a> {
    /// Feature show flags.
    pub features: &'a FeatureToggles,
    /// Consumable tints.
    pub palette: &'a FoodPalette,
    /// Name localization.
    pub localizer: &'a dyn Localizer,
    /// Global "teleport everything" override.
    pub teleport_all: bool,
}

/// Counts writes to one widget.
pub(crate) struct Painter<'a> {
    backend: &'a mut dyn WidgetBackend,
    widget: WidgetId,
    writes: u32,
}

impl<'a> Painter<'a> {
    pub(crate) fn new(backend: &'a mut dyn WidgetBackend, widget: WidgetId) -> Self {
        Self {
            backend,
            widget,
            writes: 0,
        }
    }

    fn write(&mut self, element: SubElement, value: SubElementValue<'_>) {
        self.backend.set_sub_element(self.widget, element, value);
        self.writes += 1;
    }

    pub(crate) const fn writes(&self) -> u32 {
        self.writes
    }
}

type Precondition = fn(&WorldItem, &PaintContext<'_>, &mut AttributeCache) -> bool;
type Render = fn(&WorldItem, &PaintContext<'_>, &mut AttributeCache, &mut Painter<'_>);

/// One displayable attribute.
pub(crate) struct AttributeRow {
    element: SubElement,
    feature: Option<Feature>,
    precondition: Precondition,
    render: Render,
}

/// Every attribute, in paint order.
pub(crate) static ATTRIBUTES: [AttributeRow; SubElement::COUNT] = [
    AttributeRow {
        element: SubElement::Background,
        feature: Some(Feature::Background),
        precondition: always,
        render: no_content,
    },
    AttributeRow {
        element: SubElement::Icon,
        feature: None,
        precondition: always,
        render: render_icon,
    },
    AttributeRow {
        element: SubElement::Amount,
        feature: Some(Feature::Amount),
        precondition: |item, _, _| item.max_stack > 1,
        render: render_amount,
    },
    AttributeRow {
        element: SubElement::Quality,
        feature: Some(Feature::Quality),
        precondition: |item, _, _| item.max_quality > 1,
        render: render_quality,
    },
    AttributeRow {
        element: SubElement::Durability,
        feature: Some(Feature::Durability),
        precondition: shows_durability,
        render: render_durability,
    },
    AttributeRow {
        element: SubElement::Name,
        feature: Some(Feature::Name),
        precondition: has_name,
        render: render_name,
    },
    AttributeRow {
        element: SubElement::NoTeleport,
        feature: Some(Feature::NoTeleport),
        precondition: |item, ctx, _| !item.teleportable && !ctx.teleport_all,
        render: no_content,
    },
    AttributeRow {
        element: SubElement::Food,
        feature: Some(Feature::FoodColoring),
        precondition: |item, _, _| {
            item.kind == ItemKind::Consumable && item.nourishment.any_positive()
        },
        render: render_food,
    },
    AttributeRow {
        element: SubElement::Equipped,
        feature: None,
        precondition: |item, _, _| item.equipped,
        render: no_content,
    },
];

impl AttributeRow {
    /// Evaluates the row against the current item.
    ///
    /// With `force`, the visibility write happens even if the cache says
    /// nothing changed (first paint).
    pub(crate) fn apply(
        &self,
        item: &WorldItem,
        ctx: &PaintContext<'_>,
        cache: &mut AttributeCache,
        painter: &mut Painter<'_>,
        force: bool,
    ) {
        let enabled = self.feature.map_or(true, |f| ctx.features.is_enabled(f));
        let visible = enabled && (self.precondition)(item, ctx, cache);

        if force || cache.shown.has(self.element) != visible {
            painter.write(self.element, SubElementValue::Visible(visible));
            cache.shown.assign(self.element, visible);
        }
        if visible {
            (self.render)(item, ctx, cache, painter);
        }
    }
}

fn always(_: &WorldItem, _: &PaintContext<'_>, _: &mut AttributeCache) -> bool {
    true
}

fn no_content(
    _: &WorldItem,
    _: &PaintContext<'_>,
    _: &mut AttributeCache,
    _: &mut Painter<'_>,
) {
}

fn shows_durability(item: &WorldItem, _: &PaintContext<'_>, _: &mut AttributeCache) -> bool {
    item.durability.is_some_and(|d| d.max > 0.0 && d.fraction() < 1.0)
}

/// Localizes the name when its token changes; a blank result hides the row.
fn has_name(item: &WorldItem, ctx: &PaintContext<'_>, cache: &mut AttributeCache) -> bool {
    if cache.name_token.as_deref() != Some(item.name.as_str()) {
        let text = ctx.localizer.localize(&item.name);
        cache.name_blank = text.trim().is_empty();
        cache.name_text = Some(text);
        cache.name_token = Some(item.name.clone());
    }
    !cache.name_blank
}

fn render_icon(
    item: &WorldItem,
    _: &PaintContext<'_>,
    cache: &mut AttributeCache,
    painter: &mut Painter<'_>,
) {
    if cache.icon != Some(item.icon) {
        painter.write(SubElement::Icon, SubElementValue::Icon(item.icon));
        cache.icon = Some(item.icon);
    }
}

fn render_amount(
    item: &WorldItem,
    _: &PaintContext<'_>,
    cache: &mut AttributeCache,
    painter: &mut Painter<'_>,
) {
    if cache.stack != Some(item.stack) {
        painter.write(SubElement::Amount, SubElementValue::Text(&item.stack.to_string()));
        cache.stack = Some(item.stack);
    }
}

fn render_quality(
    item: &WorldItem,
    _: &PaintContext<'_>,
    cache: &mut AttributeCache,
    painter: &mut Painter<'_>,
) {
    if cache.quality != Some(item.quality) {
        painter.write(SubElement::Quality, SubElementValue::Text(&item.quality.to_string()));
        cache.quality = Some(item.quality);
    }
}

fn render_durability(
    item: &WorldItem,
    _: &PaintContext<'_>,
    cache: &mut AttributeCache,
    painter: &mut Painter<'_>,
) {
    let Some(durability) = item.durability else { return };
    let fraction = durability.fraction();
    let changed = cache
        .durability
        .map_or(true, |last| (last - fraction).abs() > DURABILITY_EPSILON);
    if changed {
        painter.write(SubElement::Durability, SubElementValue::Fill(fraction));
        cache.durability = Some(fraction);
    }
}

fn render_name(
    _: &WorldItem,
    _: &PaintContext<'_>,
    cache: &mut AttributeCache,
    painter: &mut Painter<'_>,
) {
    if let Some(text) = cache.name_text.take() {
        painter.write(SubElement::Name, SubElementValue::Text(&text));
    }
}

fn render_food(
    item: &WorldItem,
    ctx: &PaintContext<'_>,
    cache: &mut AttributeCache,
    painter: &mut Painter<'_>,
) {
    let tint = consumable_tint(item.nourishment, ctx.palette);
    if cache.food_tint != Some(tint) {
        painter.write(SubElement::Food, SubElementValue::Tint(tint));
        cache.food_tint = Some(tint);
    }
}

/// Which resource a consumable under-serves most.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodWarning {
    /// Health and stamina are both under half the special value.
    Special,
    /// Stamina is under half of health.
    Health,
    /// Health is under half of stamina.
    Stamina,
    /// Balanced.
    Neutral,
}

impl FoodWarning {
    /// Classifies nourishment values. First match wins, in this order.
    #[must_use]
    pub fn classify(n: Nourishment) -> Self {
        if n.health < n.special / 2.0 && n.stamina < n.special / 2.0 {
            Self::Special
        } else if n.stamina < n.health / 2.0 {
            Self::Health
        } else if n.health < n.stamina / 2.0 {
            Self::Stamina
        } else {
            Self::Neutral
        }
    }

    /// Palette entry for this warning.
    #[must_use]
    pub const fn color(self, palette: &FoodPalette) -> Color {
        match self {
            Self::Special => palette.special,
            Self::Health => palette.health,
            Self::Stamina => palette.stamina,
            Self::Neutral => palette.neutral,
        }
    }
}

/// Tint for a consumable's icon.
#[must_use]
pub fn consumable_tint(nourishment: Nourishment, palette: &FoodPalette) -> Color {
    FoodWarning::classify(nourishment).color(palette)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Durability, PassThrough};
    use dropsight_core::PoolSource;
    use dropsight_shared::{IconId, Vec3};
    use dropsight_ui::RecordingBackend;

    fn row(element: SubElement) -> &'static AttributeRow {
        &ATTRIBUTES[element.index()]
    }

    fn apply_row(
        element: SubElement,
        item: &WorldItem,
        features: &FeatureToggles,
        cache: &mut AttributeCache,
        force: bool,
    ) -> (u32, RecordingBackend, WidgetId) {
        let mut backend = RecordingBackend::new();
        let widget = backend.create().unwrap();
        let palette = FoodPalette::default();
        let ctx = PaintContext {
            features,
            palette: &palette,
            localizer: &PassThrough,
            teleport_all: false,
        };
        let mut painter = Painter::new(&mut backend, widget);
        row(element).apply(item, &ctx, cache, &mut painter, force);
        let writes = painter.writes();
        (writes, backend, widget)
    }

    #[test]
    fn test_table_order_matches_elements() {
        for (i, row) in ATTRIBUTES.iter().enumerate() {
            assert_eq!(row.element.index(), i);
        }
    }

    #[test]
    fn test_food_priority_chain() {
        assert_eq!(FoodWarning::classify(Nourishment::new(3.0, 3.0, 10.0)), FoodWarning::Special);
        assert_eq!(FoodWarning::classify(Nourishment::new(10.0, 2.0, 0.0)), FoodWarning::Health);
        assert_eq!(FoodWarning::classify(Nourishment::new(2.0, 10.0, 0.0)), FoodWarning::Stamina);
        assert_eq!(FoodWarning::classify(Nourishment::new(5.0, 5.0, 0.0)), FoodWarning::Neutral);
    }

    #[test]
    fn test_food_tint_uses_palette() {
        let palette = FoodPalette::default();
        assert_eq!(
            consumable_tint(Nourishment::new(10.0, 2.0, 0.0), &palette),
            palette.health
        );
        assert_eq!(consumable_tint(Nourishment::new(5.0, 5.0, 0.0), &palette), Color::WHITE);
    }

    #[test]
    fn test_amount_hidden_for_single_stack() {
        let item = WorldItem::new(Vec3::ZERO, IconId(1));
        let mut cache = AttributeCache::default();
        let (writes, backend, widget) =
            apply_row(SubElement::Amount, &item, &FeatureToggles::ALL_ON, &mut cache, true);

        assert_eq!(writes, 1); // the forced Visible(false)
        let mirror = backend.widget(widget).unwrap();
        assert!(!mirror.element(SubElement::Amount).visible);
        assert!(mirror.element(SubElement::Amount).text.is_none());
    }

    #[test]
    fn test_amount_disabled_by_feature() {
        let mut item = WorldItem::new(Vec3::ZERO, IconId(1));
        item.max_stack = 50;
        item.stack = 5;
        let mut cache = AttributeCache::default();
        let (writes, _, _) =
            apply_row(SubElement::Amount, &item, &FeatureToggles::default(), &mut cache, false);

        assert_eq!(writes, 0);
        assert!(cache.stack.is_none());
    }

    #[test]
    fn test_amount_repaints_only_on_change() {
        let mut item = WorldItem::new(Vec3::ZERO, IconId(1));
        item.max_stack = 50;
        item.stack = 5;
        let mut cache = AttributeCache::default();

        let (first, _, _) =
            apply_row(SubElement::Amount, &item, &FeatureToggles::ALL_ON, &mut cache, true);
        assert_eq!(first, 2); // Visible(true) + text
        let (second, _, _) =
            apply_row(SubElement::Amount, &item, &FeatureToggles::ALL_ON, &mut cache, false);
        assert_eq!(second, 0);

        item.stack = 6;
        let (third, backend, widget) =
            apply_row(SubElement::Amount, &item, &FeatureToggles::ALL_ON, &mut cache, false);
        assert_eq!(third, 1);
        let text = &backend.widget(widget).unwrap().element(SubElement::Amount).text;
        assert_eq!(text.as_deref(), Some("6"));
    }

    #[test]
    fn test_pristine_item_shows_no_durability() {
        let mut item = WorldItem::new(Vec3::ZERO, IconId(1));
        item.durability = Some(Durability { current: 100.0, max: 100.0 });
        let ctx = PaintContext {
            features: &FeatureToggles::ALL_ON,
            palette: &FoodPalette::default(),
            localizer: &PassThrough,
            teleport_all: false,
        };
        assert!(!shows_durability(&item, &ctx, &mut AttributeCache::default()));
    }

    #[test]
    fn test_durability_ignores_jitter() {
        let mut item = WorldItem::new(Vec3::ZERO, IconId(1));
        item.durability = Some(Durability { current: 50.0, max: 100.0 });
        let mut cache = AttributeCache::default();
        apply_row(SubElement::Durability, &item, &FeatureToggles::ALL_ON, &mut cache, true);

        item.durability = Some(Durability { current: 50.000_01, max: 100.0 });
        let (writes, _, _) =
            apply_row(SubElement::Durability, &item, &FeatureToggles::ALL_ON, &mut cache, false);
        assert_eq!(writes, 0);

        item.durability = Some(Durability { current: 40.0, max: 100.0 });
        let (writes, _, _) =
            apply_row(SubElement::Durability, &item, &FeatureToggles::ALL_ON, &mut cache, false);
        assert_eq!(writes, 1);
    }

    #[test]
    fn test_no_teleport_respects_global_override() {
        let mut item = WorldItem::new(Vec3::ZERO, IconId(1));
        item.teleportable = false;
        let palette = FoodPalette::default();
        let mut ctx = PaintContext {
            features: &FeatureToggles::ALL_ON,
            palette: &palette,
            localizer: &PassThrough,
            teleport_all: false,
        };
        let mut cache = AttributeCache::default();
        assert!((row(SubElement::NoTeleport).precondition)(&item, &ctx, &mut cache));
        ctx.teleport_all = true;
        assert!(!(row(SubElement::NoTeleport).precondition)(&item, &ctx, &mut cache));
    }

    #[test]
    fn test_blank_name_hidden() {
        let mut item = WorldItem::new(Vec3::ZERO, IconId(1));
        item.name = "   ".to_owned();
        let mut cache = AttributeCache::default();
        let (_, backend, widget) =
            apply_row(SubElement::Name, &item, &FeatureToggles::ALL_ON, &mut cache, true);
        assert!(!backend.widget(widget).unwrap().element(SubElement::Name).visible);
    }

    /// Localizer with no translation for anything.
    struct BlankLocalizer;

    impl Localizer for BlankLocalizer {
        fn localize(&self, _: &str) -> String {
            String::new()
        }
    }

    #[test]
    fn test_blank_localized_name_hidden() {
        let mut item = WorldItem::new(Vec3::ZERO, IconId(1));
        item.name = "$item_untranslated".to_owned();
        let mut cache = AttributeCache::default();
        let mut backend = RecordingBackend::new();
        let widget = backend.create().unwrap();
        let palette = FoodPalette::default();
        let ctx = PaintContext {
            features: &FeatureToggles::ALL_ON,
            palette: &palette,
            localizer: &BlankLocalizer,
            teleport_all: false,
        };

        let mut painter = Painter::new(&mut backend, widget);
        row(SubElement::Name).apply(&item, &ctx, &mut cache, &mut painter, true);
        assert_eq!(painter.writes(), 1); // the forced Visible(false)

        let name = backend.widget(widget).unwrap().element(SubElement::Name);
        assert!(!name.visible);
        assert!(name.text.is_none());
        assert!(cache.name_blank);
    }

    #[test]
    fn test_name_shown_once_token_translates() {
        let mut item = WorldItem::new(Vec3::ZERO, IconId(1));
        item.name = String::new();
        let mut cache = AttributeCache::default();
        apply_row(SubElement::Name, &item, &FeatureToggles::ALL_ON, &mut cache, true);

        item.name = "Wood".to_owned();
        let (writes, backend, widget) =
            apply_row(SubElement::Name, &item, &FeatureToggles::ALL_ON, &mut cache, false);
        assert_eq!(writes, 2); // Visible(true) + text
        let name = backend.widget(widget).unwrap().element(SubElement::Name);
        assert!(name.visible);
        assert_eq!(name.text.as_deref(), Some("Wood"));

        let (again, _, _) =
            apply_row(SubElement::Name, &item, &FeatureToggles::ALL_ON, &mut cache, false);
        assert_eq!(again, 0);
    }
}
