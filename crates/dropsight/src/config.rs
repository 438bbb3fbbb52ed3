//! # Configuration Surface
//!
//! Tunable values supplied by the host's persistence layer, loaded from TOML
//! once at startup and again whenever the host reloads its config file.
//!
//! ```toml
//! [general]
//! position_interval = 0.01
//! content_interval = 0.25
//! max_distance = 10.0
//! world_offset = [0.0, 0.5, 0.0]
//!
//! [features]
//! show_amount = true
//! show_durability = true
//! ```

use std::path::Path;

use dropsight_core::PoolConfig;
use dropsight_shared::{
    Feature, Vec3, DEFAULT_CONTENT_INTERVAL, DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_CAPACITY,
    DEFAULT_MAX_DISTANCE, DEFAULT_POSITION_INTERVAL, DEFAULT_WORLD_OFFSET,
};
use dropsight_ui::FoodPalette;
use serde::{Deserialize, Serialize};

use crate::error::{OverlayError, OverlayResult};

/// Scheduling and placement values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Seconds between position passes.
    pub position_interval: f32,
    /// Seconds between content passes.
    pub content_interval: f32,
    /// Maximum viewer distance for a badge to show.
    pub max_distance: f32,
    /// World offset added to the item position before projection.
    pub world_offset: Vec3,
    /// Subtract the camera's own offset before projection.
    pub subtract_camera_offset: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            position_interval: DEFAULT_POSITION_INTERVAL,
            content_interval: DEFAULT_CONTENT_INTERVAL,
            max_distance: DEFAULT_MAX_DISTANCE,
            world_offset: DEFAULT_WORLD_OFFSET,
            subtract_camera_offset: false,
        }
    }
}

/// Per-feature show flags. Everything is off until the user opts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct FeatureToggles {
    /// Panel background.
    pub show_background: bool,
    /// Stack count.
    pub show_amount: bool,
    /// Quality tier.
    pub show_quality: bool,
    /// Durability bar.
    pub show_durability: bool,
    /// Localized name.
    pub show_name: bool,
    /// Non-teleportable marker.
    pub show_no_teleport: bool,
    /// Consumable tint.
    pub show_food_icon: bool,
}

impl FeatureToggles {
    /// Every feature switched on.
    pub const ALL_ON: Self = Self {
        show_background: true,
        show_amount: true,
        show_quality: true,
        show_durability: true,
        show_name: true,
        show_no_teleport: true,
        show_food_icon: true,
    };

    /// Whether a feature is enabled.
    #[must_use]
    pub const fn is_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::Background => self.show_background,
            Feature::Amount => self.show_amount,
            Feature::Quality => self.show_quality,
            Feature::Durability => self.show_durability,
            Feature::Name => self.show_name,
            Feature::NoTeleport => self.show_no_teleport,
            Feature::FoodColoring => self.show_food_icon,
        }
    }

    /// Sets a feature; returns true if the value changed.
    pub fn set(&mut self, feature: Feature, enabled: bool) -> bool {
        let slot = match feature {
            Feature::Background => &mut self.show_background,
            Feature::Amount => &mut self.show_amount,
            Feature::Quality => &mut self.show_quality,
            Feature::Durability => &mut self.show_durability,
            Feature::Name => &mut self.show_name,
            Feature::NoTeleport => &mut self.show_no_teleport,
            Feature::FoodColoring => &mut self.show_food_icon,
        };
        let changed = *slot != enabled;
        *slot = enabled;
        changed
    }
}

/// Widget pool sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolSettings {
    /// Widgets created when the pool is warmed.
    pub initial_capacity: usize,
    /// Ceiling on widgets alive at once.
    pub max_capacity: usize,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_capacity: DEFAULT_MAX_CAPACITY,
        }
    }
}

impl PoolSettings {
    /// Pool limits for [`dropsight_core::WidgetPool`].
    #[must_use]
    pub const fn to_pool_config(self) -> PoolConfig {
        PoolConfig::new(self.initial_capacity, self.max_capacity)
    }
}

/// Complete overlay configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Scheduling and placement.
    pub general: GeneralConfig,
    /// Feature show flags.
    pub features: FeatureToggles,
    /// Pool sizing.
    pub pool: PoolSettings,
    /// Consumable tints.
    pub palette: FoodPalette,
}

impl OverlayConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// [`OverlayError::Parse`] for malformed TOML,
    /// [`OverlayError::InvalidConfig`] for out-of-range values.
    pub fn from_toml_str(source: &str) -> OverlayResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// [`OverlayError::Io`] if the file cannot be read, otherwise as
    /// [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> OverlayResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Serializes to TOML (for writing a default file).
    ///
    /// # Errors
    ///
    /// [`OverlayError::InvalidConfig`] if a value cannot be represented.
    pub fn to_toml_string(&self) -> OverlayResult<String> {
        toml::to_string_pretty(self).map_err(|e| OverlayError::InvalidConfig(e.to_string()))
    }

    /// Checks every value.
    ///
    /// # Errors
    ///
    /// [`OverlayError::InvalidConfig`] naming the first bad value.
    pub fn validate(&self) -> OverlayResult<()> {
        positive("general.position_interval", self.general.position_interval)?;
        positive("general.content_interval", self.general.content_interval)?;
        positive("general.max_distance", self.general.max_distance)?;
        finite_offset("general.world_offset", self.general.world_offset)?;

        if self.pool.max_capacity == 0 {
            return Err(OverlayError::InvalidConfig(
                "pool.max_capacity must be greater than zero".to_owned(),
            ));
        }
        if self.pool.initial_capacity > self.pool.max_capacity {
            return Err(OverlayError::InvalidConfig(format!(
                "pool.initial_capacity ({}) exceeds pool.max_capacity ({})",
                self.pool.initial_capacity, self.pool.max_capacity
            )));
        }
        Ok(())
    }
}

/// Accepts finite values strictly greater than zero.
pub(crate) fn positive(name: &str, value: f32) -> OverlayResult<f32> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(OverlayError::InvalidConfig(format!(
            "{name} must be a finite value > 0, got {value}"
        )))
    }
}

/// Accepts offsets with finite components.
pub(crate) fn finite_offset(name: &str, value: Vec3) -> OverlayResult<Vec3> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(OverlayError::InvalidConfig(format!(
            "{name} must be finite, got {value:?}"
        )))
    }
}
