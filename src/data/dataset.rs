//! Recorded Dataset Module
//! Final speed of the projectile for each electromagnet activation delay.

use super::series::{MeasurementSeries, SeriesError};

/// Delay between the sensor trigger and magnet activation (ms).
pub const ACTIVATION_TIMES_MS: [f64; 16] = [
    0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0,
];

/// Measured final speed (m/s^2) for each activation time.
pub const FINAL_SPEEDS: [f64; 16] = [
    0.123194014,
    0.123194014,
    0.126756805,
    0.113236446,
    0.095248831,
    0.100499095,
    0.100112425,
    0.09991978,
    0.102262132,
    0.100693121,
    0.083368018,
    0.086522568,
    0.102858305,
    0.086200676,
    0.087989283,
    0.090161694,
];

/// Measurement uncertainty, same units as the final speed.
pub const ERROR_MAGNITUDES: [f64; 16] = [
    0.012, 0.003, 0.02, 0.02, 0.03, 0.02, 0.01, 0.01, 0.003, 0.012, 0.021, 0.0121, 0.013, 0.01,
    0.0123, 0.01,
];

/// Build the validated electromagnet timing series.
pub fn electromagnet_timing() -> Result<MeasurementSeries, SeriesError> {
    MeasurementSeries::from_slices(&ACTIVATION_TIMES_MS, &FINAL_SPEEDS, &ERROR_MAGNITUDES)
}
