//! Frequency-dependent gains.
//!
//! Acoustic materials are described by sparse response curves
//! ([`FrequencyResponse`]) that are projected onto a fixed set of bands
//! ([`FrequencyBands`]) once per scene, producing a dense
//! [`FrequencyBandResponse`] that the tracer multiplies along each path.

mod band_response;
mod bands;
mod response;

pub use band_response::FrequencyBandResponse;
pub use bands::FrequencyBands;
pub use response::FrequencyResponse;

/// Number of frequency bands simulated per path.
pub const FREQUENCY_COUNT: usize = 8;

/// Lowest frequency of the audible range, in Hz.
pub const MIN_AUDIBLE_FREQUENCY: f32 = 20.0;

/// Highest frequency of the audible range, in Hz.
pub const MAX_AUDIBLE_FREQUENCY: f32 = 20_000.0;
