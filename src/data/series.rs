//! Measurement Series Module
//! Holds the parallel activation time / final speed / error sequences and
//! validates them before anything is drawn.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    #[error(
        "Length mismatch: activation_time has {activation_time} values, \
         final_speed has {final_speed}, error_magnitude has {error_magnitude}"
    )]
    LengthMismatch {
        activation_time: usize,
        final_speed: usize,
        error_magnitude: usize,
    },
    #[error("{field}[{index}] is not a finite number ({value})")]
    NonFinite {
        field: &'static str,
        index: usize,
        value: f64,
    },
    #[error("error_magnitude[{index}] is negative ({value})")]
    NegativeError { index: usize, value: f64 },
}

/// One recorded observation: a single index across the three sequences.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub activation_time: f64,
    pub final_speed: f64,
    pub error_magnitude: f64,
}

impl Observation {
    /// Bottom of the error bar.
    pub fn lower(&self) -> f64 {
        self.final_speed - self.error_magnitude
    }

    /// Top of the error bar.
    pub fn upper(&self) -> f64 {
        self.final_speed + self.error_magnitude
    }
}

/// Validated measurement series.
///
/// Construction is the only way in, so a value of this type always has three
/// sequences of equal length holding finite numbers, with non-negative errors.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementSeries {
    activation_time: Vec<f64>,
    final_speed: Vec<f64>,
    error_magnitude: Vec<f64>,
}

impl MeasurementSeries {
    /// Validate and build a series. Lengths are checked first, then values.
    pub fn new(
        activation_time: Vec<f64>,
        final_speed: Vec<f64>,
        error_magnitude: Vec<f64>,
    ) -> Result<Self, SeriesError> {
        if activation_time.len() != final_speed.len()
            || activation_time.len() != error_magnitude.len()
        {
            return Err(SeriesError::LengthMismatch {
                activation_time: activation_time.len(),
                final_speed: final_speed.len(),
                error_magnitude: error_magnitude.len(),
            });
        }

        for (field, values) in [
            ("activation_time", &activation_time),
            ("final_speed", &final_speed),
            ("error_magnitude", &error_magnitude),
        ] {
            if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite())
            {
                return Err(SeriesError::NonFinite {
                    field,
                    index,
                    value,
                });
            }
        }

        if let Some((index, &value)) = error_magnitude.iter().enumerate().find(|(_, e)| **e < 0.0) {
            return Err(SeriesError::NegativeError { index, value });
        }

        Ok(Self {
            activation_time,
            final_speed,
            error_magnitude,
        })
    }

    /// Convenience constructor for literal data.
    pub fn from_slices(
        activation_time: &[f64],
        final_speed: &[f64],
        error_magnitude: &[f64],
    ) -> Result<Self, SeriesError> {
        Self::new(
            activation_time.to_vec(),
            final_speed.to_vec(),
            error_magnitude.to_vec(),
        )
    }

    pub fn len(&self) -> usize {
        self.activation_time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activation_time.is_empty()
    }

    /// Iterate observations in recorded order.
    pub fn observations(&self) -> impl Iterator<Item = Observation> + '_ {
        self.activation_time
            .iter()
            .zip(&self.final_speed)
            .zip(&self.error_magnitude)
            .map(|((&activation_time, &final_speed), &error_magnitude)| Observation {
                activation_time,
                final_speed,
                error_magnitude,
            })
    }

    /// Min and max activation time, or None for an empty series.
    pub fn x_bounds(&self) -> Option<(f64, f64)> {
        Self::bounds(self.activation_time.iter().copied())
    }

    /// Min and max of the error bar extents, or None for an empty series.
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        Self::bounds(self.observations().flat_map(|o| [o.lower(), o.upper()]))
    }

    fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
        values.fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
    }
}
