//! Configuration for propagation

use crate::debug::DebugFlags;
use crate::frequency::FrequencyBands;
use crate::scene::MaterialTable;

/// Settings shared by scene preprocessing and the tracers.
#[derive(Debug, Clone, PartialEq)]
pub struct PropagationDesc {
    /// Bands that materials are projected onto
    pub frequency_bands: FrequencyBands,
    /// Debug information the tracers should record
    pub debug_flags: DebugFlags,
    /// Distance a point may lie on the wrong side of an edge plane and still
    /// count as seeing around the edge
    pub diffraction_offset: f32,
}

impl Default for PropagationDesc {
    fn default() -> Self {
        Self {
            frequency_bands: FrequencyBands::default(),
            debug_flags: DebugFlags::NONE,
            diffraction_offset: 0.001,
        }
    }
}

impl PropagationDesc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frequency_bands(mut self, bands: FrequencyBands) -> Self {
        self.frequency_bands = bands;
        self
    }

    pub fn debug_flags(mut self, flags: DebugFlags) -> Self {
        self.debug_flags = flags;
        self
    }

    pub fn diffraction_offset(mut self, offset: f32) -> Self {
        self.diffraction_offset = offset;
        self
    }

    /// An empty material table using the configured bands.
    pub fn material_table(&self) -> MaterialTable {
        MaterialTable::new(self.frequency_bands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_setters() {
        let bands = FrequencyBands::new([50.0, 100.0, 200.0, 400.0, 800.0, 1600.0, 3200.0, 6400.0]);
        let desc = PropagationDesc::new()
            .frequency_bands(bands)
            .debug_flags(DebugFlags::DIRECT_PATHS)
            .diffraction_offset(0.01);

        assert_eq!(desc.diffraction_offset, 0.01);
        assert!(desc.debug_flags.contains(DebugFlags::DIRECT_PATHS));
        assert_eq!(desc.material_table().frequency_bands(), &bands);
        assert_eq!(PropagationDesc::default().diffraction_offset, 0.001);
    }
}
