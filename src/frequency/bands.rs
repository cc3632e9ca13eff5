use super::FREQUENCY_COUNT;
use std::ops::Range;

/// Partition of the spectrum into [`FREQUENCY_COUNT`] bands.
///
/// Each band is described by its center frequency. Band `i` spans from the
/// crossover below it to the crossover above it, where each crossover sits at
/// the geometric mean of the two adjacent centers. The first band extends
/// down to 0 Hz and the last one up to `f32::MAX`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyBands {
    centers: [f32; FREQUENCY_COUNT],
    crossovers: [f32; FREQUENCY_COUNT - 1],
}

impl FrequencyBands {
    /// Octave bands centered at 63 Hz through 8 kHz.
    pub const OCTAVE_CENTERS: [f32; FREQUENCY_COUNT] =
        [63.0, 125.0, 250.0, 500.0, 1000.0, 2000.0, 4000.0, 8000.0];

    /// Creates bands from their center frequencies, which are sorted ascending.
    pub fn new(mut centers: [f32; FREQUENCY_COUNT]) -> Self {
        centers.sort_by(f32::total_cmp);

        let mut crossovers = [0.0; FREQUENCY_COUNT - 1];
        for (i, crossover) in crossovers.iter_mut().enumerate() {
            *crossover = (centers[i] * centers[i + 1]).sqrt();
        }

        Self {
            centers,
            crossovers,
        }
    }

    pub fn band_count(&self) -> usize {
        FREQUENCY_COUNT
    }

    pub fn center(&self, band: usize) -> f32 {
        self.centers[band]
    }

    pub fn centers(&self) -> &[f32; FREQUENCY_COUNT] {
        &self.centers
    }

    pub fn crossover_count(&self) -> usize {
        FREQUENCY_COUNT - 1
    }

    /// Frequency separating band `index` from band `index + 1`.
    pub fn crossover(&self, index: usize) -> f32 {
        self.crossovers[index]
    }

    /// Frequency range covered by `band`.
    pub fn band_range(&self, band: usize) -> Range<f32> {
        let low = if band == 0 {
            0.0
        } else {
            self.crossovers[band - 1]
        };
        let high = if band + 1 == FREQUENCY_COUNT {
            f32::MAX
        } else {
            self.crossovers[band]
        };
        low..high
    }
}

impl Default for FrequencyBands {
    fn default() -> Self {
        Self::new(Self::OCTAVE_CENTERS)
    }
}
