use super::{FrequencyBandResponse, FrequencyBands, MAX_AUDIBLE_FREQUENCY, MIN_AUDIBLE_FREQUENCY};

/// A piecewise-linear gain curve over frequency.
///
/// Points are kept sorted by frequency with no duplicates. Between points the
/// gain is interpolated linearly, outside them it is held at the nearest end
/// point. A response with no points has unity gain everywhere.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyResponse {
    points: Vec<(f32, f32)>,
}

impl FrequencyResponse {
    /// Unity response with no points.
    pub fn new() -> Self {
        Self::default()
    }

    /// Constant `gain` across the audible range.
    pub fn flat(gain: f32) -> Self {
        Self {
            points: vec![(MIN_AUDIBLE_FREQUENCY, gain), (MAX_AUDIBLE_FREQUENCY, gain)],
        }
    }

    /// Builds a response from `(frequency, gain)` pairs in any order. Later
    /// pairs replace earlier ones at the same frequency.
    pub fn from_points(points: impl IntoIterator<Item = (f32, f32)>) -> Self {
        let mut response = Self::new();
        for (frequency, gain) in points {
            response.set_frequency(frequency, gain);
        }
        response
    }

    pub fn frequency_count(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn frequency(&self, index: usize) -> f32 {
        self.points[index].0
    }

    pub fn gain(&self, index: usize) -> f32 {
        self.points[index].1
    }

    pub fn set_gain(&mut self, index: usize, gain: f32) {
        self.points[index].1 = gain;
    }

    pub fn iter(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.points.iter().copied()
    }

    /// Interpolated gain at `frequency`.
    pub fn gain_at(&self, frequency: f32) -> f32 {
        let (first, last) = match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return 1.0,
        };

        if frequency <= first.0 {
            return first.1;
        }
        if frequency >= last.0 {
            return last.1;
        }

        // First point strictly above `frequency`; exists and is > 0 because of the checks above.
        let upper = self.points.partition_point(|&(f, _)| f <= frequency);
        let (f0, g0) = self.points[upper - 1];
        let (f1, g1) = self.points[upper];
        g0 + (g1 - g0) * (frequency - f0) / (f1 - f0)
    }

    /// Inserts a point, or replaces the gain of an existing point at the same frequency.
    pub fn set_frequency(&mut self, frequency: f32, gain: f32) {
        match self
            .points
            .binary_search_by(|(f, _)| f.total_cmp(&frequency))
        {
            Ok(index) => self.points[index].1 = gain,
            Err(index) => self.points.insert(index, (frequency, gain)),
        }
    }

    /// Removes the point at `index`, returning whether it existed.
    pub fn remove_frequency_at(&mut self, index: usize) -> bool {
        if index < self.points.len() {
            self.points.remove(index);
            true
        } else {
            false
        }
    }

    /// Removes the point at exactly `frequency`, returning whether it existed.
    pub fn remove_frequency(&mut self, frequency: f32) -> bool {
        match self.points.iter().position(|&(f, _)| f == frequency) {
            Some(index) => {
                self.points.remove(index);
                true
            }
            None => false,
        }
    }

    /// Replaces every point with a flat response of `gain`.
    pub fn reset(&mut self, gain: f32) {
        *self = Self::flat(gain);
    }

    /// Average gain over `[low, high]`, integrated with the trapezoid rule.
    ///
    /// The bounds are swapped if reversed. An empty range returns the gain at
    /// that frequency.
    pub fn band_gain(&self, low: f32, high: f32) -> f32 {
        match self.points.len() {
            0 => return 1.0,
            1 => return self.points[0].1,
            _ => {}
        }

        let (low, high) = if high < low { (high, low) } else { (low, high) };
        if low == high {
            return self.gain_at(low);
        }

        let interior = self
            .points
            .iter()
            .map(|&(f, _)| f)
            .filter(|&f| f > low && f < high);

        let mut total = 0.0;
        let mut previous = (low, self.gain_at(low));
        for frequency in interior.chain(std::iter::once(high)) {
            let gain = self.gain_at(frequency);
            total += 0.5 * (previous.1 + gain) * (frequency - previous.0);
            previous = (frequency, gain);
        }

        total / (high - low)
    }

    /// Samples the response at the center of every band.
    pub fn band_response(&self, bands: &FrequencyBands) -> FrequencyBandResponse {
        let mut response = FrequencyBandResponse::splat(1.0);
        for (band, &center) in bands.centers().iter().enumerate() {
            response[band] = self.gain_at(center);
        }
        response
    }

    pub fn max(&self) -> f32 {
        self.points
            .iter()
            .map(|&(_, gain)| gain)
            .reduce(f32::max)
            .unwrap_or(1.0)
    }

    /// Average gain over the span of the response's own points.
    pub fn average(&self) -> f32 {
        match self.points.as_slice() {
            [] => 1.0,
            [(_, gain)] => *gain,
            [first, .., last] => {
                let total: f32 = self
                    .points
                    .windows(2)
                    .map(|pair| 0.5 * (pair[0].1 + pair[1].1) * (pair[1].0 - pair[0].0))
                    .sum();
                total / (last.0 - first.0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_empty_response_is_unity() {
        let response = FrequencyResponse::new();
        assert_eq!(response.gain_at(1000.0), 1.0);
        assert_eq!(response.average(), 1.0);
        assert_eq!(response.max(), 1.0);
        assert_eq!(response.band_gain(100.0, 200.0), 1.0);
    }

    #[test]
    fn test_points_stay_sorted() {
        let mut response = FrequencyResponse::from_points([(1000.0, 0.5), (100.0, 1.0)]);
        response.set_frequency(500.0, 0.7);
        response.set_frequency(1000.0, 0.4);

        let frequencies: Vec<f32> = response.iter().map(|(f, _)| f).collect();
        assert_eq!(frequencies, vec![100.0, 500.0, 1000.0]);
        assert_eq!(response.gain(2), 0.4);
    }

    #[test]
    fn test_interpolation_and_clamping() {
        let response = FrequencyResponse::from_points([(100.0, 1.0), (200.0, 0.0)]);
        assert!(close(response.gain_at(150.0), 0.5));
        assert!(close(response.gain_at(125.0), 0.75));
        assert_eq!(response.gain_at(10.0), 1.0);
        assert_eq!(response.gain_at(10_000.0), 0.0);
        assert_eq!(response.gain_at(200.0), 0.0);
    }

    #[test]
    fn test_average_uses_trapezoid_rule() {
        let response =
            FrequencyResponse::from_points([(0.0, 0.0), (100.0, 1.0), (300.0, 1.0)]);
        // (0.5 * 100 + 200) / 300
        assert!(close(response.average(), 250.0 / 300.0));
        assert_eq!(FrequencyResponse::from_points([(50.0, 0.3)]).average(), 0.3);
        assert!(close(FrequencyResponse::flat(0.4).average(), 0.4));
    }

    #[test]
    fn test_band_gain() {
        let response = FrequencyResponse::from_points([(100.0, 0.0), (200.0, 1.0)]);
        assert!(close(response.band_gain(100.0, 200.0), 0.5));
        assert!(close(response.band_gain(200.0, 100.0), 0.5));
        assert!(close(response.band_gain(150.0, 150.0), 0.5));
        // Held flat beyond the last point: (0.5 * 100 + 100) / 200
        assert!(close(response.band_gain(100.0, 300.0), 0.75));
    }

    #[test]
    fn test_remove_and_reset() {
        let mut response = FrequencyResponse::from_points([(100.0, 0.2), (200.0, 0.4)]);
        assert!(response.remove_frequency(100.0));
        assert!(!response.remove_frequency(100.0));
        assert!(!response.remove_frequency_at(3));
        assert!(response.remove_frequency_at(0));
        assert!(response.is_empty());

        response.reset(0.25);
        assert_eq!(response.frequency_count(), 2);
        assert_eq!(response.max(), 0.25);
    }

    #[test]
    fn test_band_response_samples_centers() {
        let response = FrequencyResponse::from_points([(125.0, 0.2), (8000.0, 0.9)]);
        let bands = FrequencyBands::default();
        let projected = response.band_response(&bands);
        assert_eq!(projected[0], 0.2);
        assert_eq!(projected[1], 0.2);
        assert_eq!(projected[7], 0.9);
    }
}
