//! Merge of the weather and hydrology payloads into one snapshot.
//!
//! Each source arrives as a [`Source`] so every presence/absence combination
//! is an explicit match arm. The merge never fails.

use chrono::{Local, Timelike};

use crate::models::{
    EnvironmentalSnapshot, HydrologyPayload, Reading, Source, WeatherPayload,
    UNIT_PRECIPITATION, UNIT_RIVER_DISCHARGE, UNIT_SOIL_MOISTURE,
};

// ---

/// Merge both sources using the current local hour.
pub fn aggregate(
    weather: Source<WeatherPayload>,
    hydrology: Source<HydrologyPayload>,
) -> EnvironmentalSnapshot {
    // ---
    aggregate_at(weather, hydrology, Local::now().hour())
}

/// Merge both sources for a fixed `hour_of_day` (0-23).
pub fn aggregate_at(
    weather: Source<WeatherPayload>,
    hydrology: Source<HydrologyPayload>,
    hour_of_day: u32,
) -> EnvironmentalSnapshot {
    // ---
    let mut snapshot = EnvironmentalSnapshot::zeroed(hour_of_day);

    match (weather, hydrology) {
        (Source::Present(w), Source::Present(h)) => {
            apply_weather(&mut snapshot, &w);
            apply_hydrology(&mut snapshot, &h);
        }
        (Source::Present(w), Source::Absent) => apply_weather(&mut snapshot, &w),
        (Source::Absent, Source::Present(h)) => apply_hydrology(&mut snapshot, &h),
        (Source::Absent, Source::Absent) => {}
    }

    snapshot
}

fn apply_weather(snapshot: &mut EnvironmentalSnapshot, weather: &WeatherPayload) {
    // ---
    snapshot.elevation = weather.elevation;
    snapshot.precipitation_sum = Reading::from_series(
        &weather.daily.precipitation_sum,
        0,
        unit_or(&weather.daily_units.precipitation_sum, UNIT_PRECIPITATION),
    );
    snapshot.soil_moisture_surface = Reading::from_series(
        &weather.hourly.soil_moisture_0_to_1cm,
        snapshot.hour_of_day as usize,
        unit_or(&weather.hourly_units.soil_moisture_0_to_1cm, UNIT_SOIL_MOISTURE),
    );
}

fn apply_hydrology(snapshot: &mut EnvironmentalSnapshot, hydrology: &HydrologyPayload) {
    // ---
    snapshot.river_discharge_mean = Reading::from_series(
        &hydrology.daily.river_discharge_mean,
        0,
        unit_or(&hydrology.daily_units.river_discharge_mean, UNIT_RIVER_DISCHARGE),
    );
}

/// Upstream unit, or the fixed default when the payload leaves it blank.
fn unit_or<'a>(unit: &'a str, default: &'static str) -> &'a str {
    if unit.trim().is_empty() {
        default
    } else {
        unit
    }
}
