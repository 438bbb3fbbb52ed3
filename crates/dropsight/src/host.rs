//! # Host Collaborators
//!
//! The engine reads world state through these traits and never stores a
//! reference to a world object beyond one tick.

use std::collections::HashMap;
use std::hash::BuildHasher;

use dropsight_shared::{EntityKey, IconId, ScreenPoint, Vec3};

/// Broad item category, as far as the overlay cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemKind {
    /// Anything without special overlay rules.
    #[default]
    Generic,
    /// Food and potions.
    Consumable,
    /// Live fish (subject to the underwater exclusion).
    Fish,
}

/// Wear state of an item that supports durability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Durability {
    /// Remaining durability.
    pub current: f32,
    /// Durability when pristine.
    pub max: f32,
}

impl Durability {
    /// Remaining fraction in `0..=1`; a non-positive max reads as pristine.
    #[must_use]
    pub fn fraction(self) -> f32 {
        if self.max > 0.0 {
            (self.current / self.max).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

/// Nourishment values of a consumable.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Nourishment {
    /// Health restored.
    pub health: f32,
    /// Stamina restored.
    pub stamina: f32,
    /// Special resource restored (eitr).
    pub special: f32,
}

impl Nourishment {
    /// Creates nourishment values.
    #[must_use]
    pub const fn new(health: f32, stamina: f32, special: f32) -> Self {
        Self {
            health,
            stamina,
            special,
        }
    }

    /// True when at least one value is positive.
    #[must_use]
    pub fn any_positive(self) -> bool {
        self.health > 0.0 || self.stamina > 0.0 || self.special > 0.0
    }
}

/// Motion state of a fish item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FishState {
    /// Currently above the water surface.
    pub out_of_water: bool,
    /// Mid-jump.
    pub jumping: bool,
    /// The current jump started on land.
    pub jumped_from_land: bool,
}

impl FishState {
    /// Whether showing a badge is fair play.
    ///
    /// Hidden while submerged, and while mid-jump unless the jump started
    /// on land.
    #[must_use]
    pub const fn overlay_allowed(self) -> bool {
        self.out_of_water && !(self.jumping && !self.jumped_from_land)
    }
}

/// Everything the overlay reads from one world item.
///
/// The host owns these values; the engine only borrows them for a pass.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldItem {
    /// World position.
    pub position: Vec3,
    /// Current icon.
    pub icon: IconId,
    /// Stack count.
    pub stack: u32,
    /// Stacking capacity.
    pub max_stack: u32,
    /// Quality tier.
    pub quality: u32,
    /// Highest quality tier the item supports.
    pub max_quality: u32,
    /// Raw (unlocalized) name token.
    pub name: String,
    /// Wear, if the item uses durability.
    pub durability: Option<Durability>,
    /// Whether the item may pass through portals.
    pub teleportable: bool,
    /// Category.
    pub kind: ItemKind,
    /// Nourishment values (consumables).
    pub nourishment: Nourishment,
    /// Equipped by its holder.
    pub equipped: bool,
    /// Fish motion state, if the item is a live fish.
    pub fish: Option<FishState>,
}

impl WorldItem {
    /// A plain single-stack item at a position.
    #[must_use]
    pub fn new(position: Vec3, icon: IconId) -> Self {
        Self {
            position,
            icon,
            stack: 1,
            max_stack: 1,
            quality: 1,
            max_quality: 1,
            name: String::new(),
            durability: None,
            teleportable: true,
            kind: ItemKind::Generic,
            nourishment: Nourishment::default(),
            equipped: false,
            fish: None,
        }
    }
}

impl Default for WorldItem {
    fn default() -> Self {
        Self::new(Vec3::ZERO, IconId::default())
    }
}

/// Read access to the host's world items.
pub trait ItemSource {
    /// Current state of an item.
    ///
    /// `None` is a transient miss (object mid-teardown); the engine skips the
    /// record for this tick.
    fn item(&self, key: EntityKey) -> Option<&WorldItem>;
}

impl<S: BuildHasher> ItemSource for HashMap<EntityKey, WorldItem, S> {
    fn item(&self, key: EntityKey) -> Option<&WorldItem> {
        self.get(&key)
    }
}

/// World-to-screen projection of the viewer camera.
pub trait Projector {
    /// Projects a world point; negative depth means behind the camera.
    fn world_to_screen(&self, world: Vec3) -> ScreenPoint;
}

impl<F: Fn(Vec3) -> ScreenPoint> Projector for F {
    fn world_to_screen(&self, world: Vec3) -> ScreenPoint {
        self(world)
    }
}

/// Resolves raw name tokens into display text.
pub trait Localizer {
    /// Localized text for a token.
    fn localize(&self, token: &str) -> String;
}

/// Leaves tokens untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl Localizer for PassThrough {
    fn localize(&self, token: &str) -> String {
        token.to_owned()
    }
}

impl<S: BuildHasher> Localizer for HashMap<String, String, S> {
    fn localize(&self, token: &str) -> String {
        self.get(token).cloned().unwrap_or_else(|| token.to_owned())
    }
}

/// Viewer state sampled once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewerState {
    /// Viewer (player) world position.
    pub position: Vec3,
    /// The camera's own offset from the viewer.
    pub camera_offset: Vec3,
    /// The viewer's input is free (not typing, not in a menu).
    pub input_free: bool,
    /// Another full-screen panel is open.
    pub panel_open: bool,
}

impl ViewerState {
    /// A viewer at a position with free input and no panel open.
    #[must_use]
    pub const fn at(position: Vec3) -> Self {
        Self {
            position,
            camera_offset: Vec3::ZERO,
            input_free: true,
            panel_open: false,
        }
    }

    /// True when the host UI state forbids overlays.
    #[inline]
    #[must_use]
    pub const fn blocks_overlays(&self) -> bool {
        self.panel_open || !self.input_free
    }
}

/// Host collaborators for one tick.
#[derive(Clone, Copy)]
pub struct FrameContext<'a> {
    /// Viewer state, if a local viewer exists.
    pub viewer: Option<ViewerState>,
    /// Camera projection, if a camera exists.
    pub camera: Option<&'a dyn Projector>,
    /// World items.
    pub items: &'a dyn ItemSource,
    /// Name localization.
    pub localizer: &'a dyn Localizer,
    /// Global "teleport everything" override.
    pub teleport_all: bool,
}

impl<'a> FrameContext<'a> {
    /// A context with items only; viewer and camera missing.
    #[must_use]
    pub fn new(items: &'a dyn ItemSource) -> Self {
        Self {
            viewer: None,
            camera: None,
            items,
            localizer: &PassThrough,
            teleport_all: false,
        }
    }

    /// Sets the viewer.
    #[must_use]
    pub fn with_viewer(mut self, viewer: ViewerState) -> Self {
        self.viewer = Some(viewer);
        self
    }

    /// Sets the camera.
    #[must_use]
    pub fn with_camera(mut self, camera: &'a dyn Projector) -> Self {
        self.camera = Some(camera);
        self
    }

    /// Sets the localizer.
    #[must_use]
    pub fn with_localizer(mut self, localizer: &'a dyn Localizer) -> Self {
        self.localizer = localizer;
        self
    }

    /// Sets the teleport override.
    #[must_use]
    pub fn with_teleport_all(mut self, teleport_all: bool) -> Self {
        self.teleport_all = teleport_all;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fish_overlay_rules() {
        let submerged = FishState::default();
        assert!(!submerged.overlay_allowed());

        let landed = FishState {
            out_of_water: true,
            ..FishState::default()
        };
        assert!(landed.overlay_allowed());

        let leaping_from_water = FishState {
            out_of_water: true,
            jumping: true,
            jumped_from_land: false,
        };
        assert!(!leaping_from_water.overlay_allowed());

        let flopping_on_land = FishState {
            out_of_water: true,
            jumping: true,
            jumped_from_land: true,
        };
        assert!(flopping_on_land.overlay_allowed());
    }

    #[test]
    fn test_durability_fraction() {
        assert_eq!(Durability { current: 50.0, max: 200.0 }.fraction(), 0.25);
        assert_eq!(Durability { current: 5.0, max: 0.0 }.fraction(), 1.0);
    }

    #[test]
    fn test_map_localizer_falls_back_to_token() {
        let mut table = HashMap::new();
        table.insert("$item_wood".to_owned(), "Wood".to_owned());

        assert_eq!(table.localize("$item_wood"), "Wood");
        assert_eq!(table.localize("$item_stone"), "$item_stone");
    }

    #[test]
    fn test_viewer_blocking() {
        let mut viewer = ViewerState::at(Vec3::ZERO);
        assert!(!viewer.blocks_overlays());
        viewer.panel_open = true;
        assert!(viewer.blocks_overlays());
    }
}
