//! # World Object Identity
//!
//! The overlay core never owns world objects. It refers to them through
//! lightweight keys handed out by the host:
//! - Lower 32 bits: host slot index
//! - Upper 32 bits: generation counter for detecting stale references

use std::fmt;

/// Non-owning identity of a tracked world object.
///
/// Two keys with the same index but different generations refer to
/// different objects; the registry keys records by the full value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct EntityKey(u64);

impl EntityKey {
    /// Creates a key from a host slot index and generation.
    #[inline]
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | (index as u64))
    }

    /// Creates a key from an opaque host instance id.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw 64-bit value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Returns the index portion of the key.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0 as u32
    }

    /// Returns the generation portion of the key.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }
}

impl fmt::Debug for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityKey({}v{})", self.index(), self.generation())
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index(), self.generation())
    }
}

/// Host-side identity of an icon sprite.
///
/// Compared by value only; the overlay never loads the image itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct IconId(pub u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_packing() {
        let key = EntityKey::new(42, 7);
        assert_eq!(key.index(), 42);
        assert_eq!(key.generation(), 7);
        assert_eq!(EntityKey::from_raw(key.raw()), key);
    }

    #[test]
    fn test_generation_distinguishes_keys() {
        assert_ne!(EntityKey::new(3, 0), EntityKey::new(3, 1));
        assert_eq!(format!("{}", EntityKey::new(3, 1)), "3v1");
    }
}
