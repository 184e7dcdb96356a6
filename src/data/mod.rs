//! Data module - Measurement series and the recorded dataset

mod dataset;
mod series;

pub use dataset::electromagnet_timing;
pub use series::MeasurementSeries;
