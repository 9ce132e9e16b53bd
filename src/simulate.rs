//! Parametric what-if flood risk simulator.
//!
//! Combines forest cover, rainfall and soil absorption into a flood
//! probability. The probability is clamped to `0..=100`. Runoff and the
//! per-factor impacts are left unclamped so extreme rainfall shows its full
//! magnitude.

use serde::{Deserialize, Serialize};

// ---

pub const DEFAULT_FOREST_COVER: f64 = 60.0;
pub const DEFAULT_RAINFALL_MM: f64 = 150.0;

/// Rainfall (mm) that maps to a factor of exactly 1.
pub const RAINFALL_REFERENCE_MM: f64 = 300.0;

/// Soil's ability to absorb rainfall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilAbsorption {
    Low,
    #[default]
    Medium,
    High,
}

impl SoilAbsorption {
    // ---
    /// Parse a label; anything unrecognized is `Medium`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "low" => SoilAbsorption::Low,
            "high" => SoilAbsorption::High,
            _ => SoilAbsorption::Medium,
        }
    }

    /// Poorly absorbing soil contributes more runoff.
    pub fn factor(self) -> f64 {
        match self {
            SoilAbsorption::Low => 0.9,
            SoilAbsorption::Medium => 0.5,
            SoilAbsorption::High => 0.2,
        }
    }
}

/// Step classification of flood probability, also used as recommendation
/// priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    // ---
    /// Strict lower bounds: a probability of exactly 70 is `High`.
    pub fn from_probability(probability: u32) -> Self {
        if probability > 70 {
            RiskLevel::Critical
        } else if probability > 50 {
            RiskLevel::High
        } else if probability > 30 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Display color as a hex string.
    pub fn color(self) -> &'static str {
        match self {
            RiskLevel::Low => "#10b981",
            RiskLevel::Medium => "#f59e0b",
            RiskLevel::High => "#ef4444",
            RiskLevel::Critical => "#991b1b",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    pub forest_cover_percent: f64,
    pub rainfall_mm: f64,
    pub soil_absorption: SoilAbsorption,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            forest_cover_percent: DEFAULT_FOREST_COVER,
            rainfall_mm: DEFAULT_RAINFALL_MM,
            soil_absorption: SoilAbsorption::Medium,
        }
    }
}

impl SimulationParameters {
    pub fn simulate(&self) -> RiskSimulationResult {
        simulate(self.forest_cover_percent, self.rainfall_mm, self.soil_absorption)
    }
}

/// Per-dimension contribution scores, 0-100 (rainfall may exceed 100).
///
/// Unclamped scores saturate at `u64::MAX`, which needs rainfall above
/// roughly 5.5e18 mm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactors {
    pub forest_impact: u64,
    pub rainfall_impact: u64,
    pub soil_impact: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskSimulationResult {
    // ---
    pub flood_probability: u32,
    /// Unclamped; saturates at `u64::MAX` like the factor scores.
    pub water_runoff: u64,
    pub environmental_health: u32,
    pub risk_level: RiskLevel,
    pub factors: RiskFactors,
}

/// Run one scenario.
///
/// `forest_cover` is clamped to `0..=100` and `rainfall` to `>= 0`; NaN
/// and infinite values count as zero for both.
pub fn simulate(
    forest_cover: f64,
    rainfall: f64,
    soil_absorption: SoilAbsorption,
) -> RiskSimulationResult {
    // ---
    let forest_cover = finite_or_zero(forest_cover).clamp(0.0, 100.0);
    let rainfall = finite_or_zero(rainfall).max(0.0);

    let forest_factor = 1.0 - forest_cover / 100.0;
    let rainfall_factor = rainfall / RAINFALL_REFERENCE_MM;
    let soil_factor = soil_absorption.factor();

    let base = forest_factor * 40.0 + rainfall_factor * 40.0 + soil_factor * 20.0;
    let flood_probability = round_percent(base.clamp(0.0, 100.0));

    let water_runoff =
        round_score((forest_factor * 0.5 + rainfall_factor * 0.3 + soil_factor * 0.2) * 100.0);

    RiskSimulationResult {
        flood_probability,
        water_runoff,
        environmental_health: 100 - flood_probability,
        risk_level: RiskLevel::from_probability(flood_probability),
        factors: RiskFactors {
            forest_impact: round_score(forest_factor * 100.0),
            rainfall_impact: round_score(rainfall_factor * 100.0),
            soil_impact: round_score(soil_factor * 100.0),
        },
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

// Already clamped to 0..=100.
fn round_percent(value: f64) -> u32 {
    value.round() as u32
}

// Non-negative and finite here; `as` saturates at u64::MAX.
fn round_score(value: f64) -> u64 {
    value.round() as u64
}
