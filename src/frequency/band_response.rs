use super::FREQUENCY_COUNT;
use std::ops::{Index, IndexMut, Mul, MulAssign};

/// One gain per simulated frequency band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyBandResponse(pub [f32; FREQUENCY_COUNT]);

impl FrequencyBandResponse {
    pub fn new(gains: [f32; FREQUENCY_COUNT]) -> Self {
        Self(gains)
    }

    /// The same gain in every band.
    pub fn splat(gain: f32) -> Self {
        Self([gain; FREQUENCY_COUNT])
    }

    pub fn gains(&self) -> &[f32; FREQUENCY_COUNT] {
        &self.0
    }

    pub fn average(&self) -> f32 {
        self.0.iter().sum::<f32>() / FREQUENCY_COUNT as f32
    }

    pub fn max(&self) -> f32 {
        self.0.iter().copied().fold(f32::MIN, f32::max)
    }

    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.0.iter().copied()
    }
}

impl Default for FrequencyBandResponse {
    fn default() -> Self {
        Self::splat(1.0)
    }
}

impl Index<usize> for FrequencyBandResponse {
    type Output = f32;

    fn index(&self, band: usize) -> &f32 {
        &self.0[band]
    }
}

impl IndexMut<usize> for FrequencyBandResponse {
    fn index_mut(&mut self, band: usize) -> &mut f32 {
        &mut self.0[band]
    }
}

impl Mul for FrequencyBandResponse {
    type Output = Self;

    fn mul(mut self, rhs: Self) -> Self {
        self *= rhs;
        self
    }
}

impl MulAssign for FrequencyBandResponse {
    fn mul_assign(&mut self, rhs: Self) {
        for (gain, other) in self.0.iter_mut().zip(rhs.0) {
            *gain *= other;
        }
    }
}

impl Mul<f32> for FrequencyBandResponse {
    type Output = Self;

    fn mul(mut self, rhs: f32) -> Self {
        for gain in &mut self.0 {
            *gain *= rhs;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_response_arithmetic() {
        let mut a = FrequencyBandResponse::splat(0.5);
        a[3] = 1.0;
        let b = FrequencyBandResponse::splat(0.5);

        let product = a * b;
        assert_eq!(product[0], 0.25);
        assert_eq!(product[3], 0.5);
        assert_eq!((b * 2.0)[7], 1.0);
        assert_eq!(a.max(), 1.0);
        assert_eq!(a.average(), (0.5 * 7.0 + 1.0) / 8.0);
    }

    #[test]
    fn test_default_is_unity() {
        assert!(FrequencyBandResponse::default().iter().all(|g| g == 1.0));
    }
}
