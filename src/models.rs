//! Data models for the flood risk pipeline.
//!
//! Upstream payloads mirror the Open-Meteo forecast and flood APIs closely
//! enough for `serde` to decode them directly. `EnvironmentalSnapshot` is the
//! canonical merged reading the classifier consumes.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---

pub const UNIT_PRECIPITATION: &str = "mm";
pub const UNIT_SOIL_MOISTURE: &str = "m³/m³";
pub const UNIT_RIVER_DISCHARGE: &str = "m³/s";

/// Outcome of one upstream fetch.
///
/// A failed or timed-out fetch is `Absent`, which is distinct from a
/// payload that is present but reports zeros.
#[derive(Debug, Clone, PartialEq)]
pub enum Source<T> {
    // ---
    Present(T),
    Absent,
}

impl<T> Source<T> {
    // ---
    pub fn is_present(&self) -> bool {
        matches!(self, Source::Present(_))
    }
}

impl<T> From<Option<T>> for Source<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(payload) => Source::Present(payload),
            None => Source::Absent,
        }
    }
}

/// Raw forecast payload from the weather API
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeatherPayload {
    // ---
    #[serde(default)]
    pub elevation: f64,
    pub daily: WeatherDaily,
    pub daily_units: WeatherDailyUnits,
    pub hourly: WeatherHourly,
    pub hourly_units: WeatherHourlyUnits,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeatherDaily {
    #[serde(default)]
    pub precipitation_sum: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeatherDailyUnits {
    pub precipitation_sum: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeatherHourly {
    #[serde(default)]
    pub soil_moisture_0_to_1cm: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeatherHourlyUnits {
    pub soil_moisture_0_to_1cm: String,
}

/// Raw river discharge payload from the flood API
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HydrologyPayload {
    // ---
    pub daily: HydrologyDaily,
    pub daily_units: HydrologyDailyUnits,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HydrologyDaily {
    #[serde(default)]
    pub river_discharge_mean: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HydrologyDailyUnits {
    pub river_discharge_mean: String,
}

/// A measured value with its unit, e.g. `(12.4, "mm")`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub value: f64,
    pub unit: String,
}

impl Reading {
    // ---
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }

    /// Value from a series at `index`; gaps and nulls read as zero.
    pub fn from_series(series: &[Option<f64>], index: usize, unit: &str) -> Self {
        let value = series.get(index).copied().flatten().unwrap_or(0.0);
        Self::new(value, unit)
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// Canonical environmental reading for one coordinate at one hour.
///
/// Every field is always populated; a missing source contributes zeros.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvironmentalSnapshot {
    // ---
    pub elevation: f64,
    pub precipitation_sum: Reading,
    pub soil_moisture_surface: Reading,
    pub river_discharge_mean: Reading,
    pub hour_of_day: u32,
}

impl EnvironmentalSnapshot {
    // ---
    pub fn zeroed(hour_of_day: u32) -> Self {
        Self {
            elevation: 0.0,
            precipitation_sum: Reading::new(0.0, UNIT_PRECIPITATION),
            soil_moisture_surface: Reading::new(0.0, UNIT_SOIL_MOISTURE),
            river_discharge_mean: Reading::new(0.0, UNIT_RIVER_DISCHARGE),
            hour_of_day,
        }
    }
}
