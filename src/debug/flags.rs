use std::ops::{BitOr, BitOrAssign};

/// Categories of debug information a caller wants collected.
///
/// The [`DebugCache`](super::DebugCache) itself ignores these; producers test
/// them to skip building records nobody will look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DebugFlags(u32);

impl DebugFlags {
    pub const NONE: Self = Self(0);
    pub const LISTENERS: Self = Self(1 << 0);
    pub const SOURCES: Self = Self(1 << 1);
    pub const DETECTORS: Self = Self(1 << 2);
    pub const OBJECT_MESHES: Self = Self(1 << 3);
    pub const DIFFRACTION_EDGES: Self = Self(1 << 4);
    pub const DIRECT_PATHS: Self = Self(1 << 5);
    pub const DIFFRACTION_PATHS: Self = Self(1 << 6);
    pub const SPECULAR_PATHS: Self = Self(1 << 7);
    pub const DIFFUSE_PATHS: Self = Self(1 << 8);
    pub const TRANSMISSION_PATHS: Self = Self(1 << 9);
    pub const ALL: Self = Self((1 << 10) - 1);

    pub const fn from_bits_truncate(bits: u32) -> Self {
        Self(bits & Self::ALL.0)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether every flag in `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn set(&mut self, other: Self, enabled: bool) {
        if enabled {
            self.0 |= other.0;
        } else {
            self.0 &= !other.0;
        }
    }
}

impl BitOr for DebugFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for DebugFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_operations() {
        let mut flags = DebugFlags::DIRECT_PATHS | DebugFlags::SPECULAR_PATHS;
        assert!(flags.contains(DebugFlags::DIRECT_PATHS));
        assert!(!flags.contains(DebugFlags::DIFFUSE_PATHS));

        flags.set(DebugFlags::DIRECT_PATHS, false);
        flags |= DebugFlags::LISTENERS;
        assert_eq!(flags, DebugFlags::SPECULAR_PATHS | DebugFlags::LISTENERS);

        assert!(DebugFlags::default().is_empty());
        assert!(DebugFlags::ALL.contains(DebugFlags::TRANSMISSION_PATHS));
        assert_eq!(DebugFlags::from_bits_truncate(u32::MAX), DebugFlags::ALL);
    }
}
