//! Mathematical types shared between the host and the overlay core.
//!
//! World positions come in as [`Vec3`], projected results go out as
//! [`ScreenPoint`].

use serde::{Deserialize, Serialize};

/// 3D Vector - world positions and offsets
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Vec3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Vec3 {
    /// Creates a new Vec3
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Converts to array
    #[must_use]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Creates from array
    #[must_use]
    pub const fn from_array(arr: [f32; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    /// Distance squared (avoids sqrt)
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f32 {
        let d = self - other;
        d.x * d.x + d.y * d.y + d.z * d.z
    }

    /// True when every component is finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(arr: [f32; 3]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(v: Vec3) -> Self {
        v.to_array()
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// 2D Vector - UI positions
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
}

impl Vec2 {
    /// Creates a new Vec2
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Result of projecting a world point through the viewer camera.
///
/// `depth` is the signed distance along the view axis; a negative value
/// means the point lies behind the camera.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenPoint {
    /// Horizontal screen coordinate (pixels)
    pub x: f32,
    /// Vertical screen coordinate (pixels)
    pub y: f32,
    /// Signed view depth
    pub depth: f32,
}

impl ScreenPoint {
    /// Creates a new screen point
    #[must_use]
    pub const fn new(x: f32, y: f32, depth: f32) -> Self {
        Self { x, y, depth }
    }

    /// True when the projected point is in front of the viewer.
    #[inline]
    #[must_use]
    pub fn is_in_front(self) -> bool {
        self.depth >= 0.0
    }

    /// Drops the depth component.
    #[inline]
    #[must_use]
    pub const fn xy(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(Vec3::from([1.0, 2.0, 3.0]), a);
        assert!(!Vec3::new(f32::NAN, 0.0, 0.0).is_finite());
    }

    #[test]
    fn test_distance_squared_matches_distance() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(4.0, 4.0, 0.0);
        let d = b - a;
        let linear = (d.x * d.x + d.y * d.y + d.z * d.z).sqrt();
        assert_eq!(a.distance_squared(b), 25.0);
        assert_eq!(linear * linear, a.distance_squared(b));
    }

    #[test]
    fn test_screen_point_depth_sign() {
        assert!(ScreenPoint::new(10.0, 10.0, 0.0).is_in_front());
        assert!(!ScreenPoint::new(10.0, 10.0, -0.1).is_in_front());
        assert_eq!(ScreenPoint::new(1.0, 2.0, 3.0).xy(), Vec2::new(1.0, 2.0));
    }
}
