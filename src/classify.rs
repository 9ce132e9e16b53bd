//! Rule-based flood risk classification of an [`EnvironmentalSnapshot`].
//!
//! Each sub-verdict is an independent threshold ladder over one field:
//!
//! | verdict          | field                 | moderate from | severe from |
//! |------------------|-----------------------|---------------|-------------|
//! | `soil_condition` | soil moisture (m³/m³) | 0.30          | 0.40        |
//! | `river_status`   | discharge (m³/s)      | 100           | 500         |
//! | `rain_analysis`  | precipitation (mm)    | 20            | 50          |
//!
//! `drainage` combines elevation with the rain band. The summary escalates
//! to `high` on any severe verdict, otherwise it follows the weighted share
//! of moderate verdicts.

use serde::Serialize;

use crate::models::EnvironmentalSnapshot;

// ---

pub const SOIL_MODERATE: f64 = 0.30;
pub const SOIL_SEVERE: f64 = 0.40;

pub const RIVER_MODERATE: f64 = 100.0;
pub const RIVER_SEVERE: f64 = 500.0;

pub const RAIN_MODERATE: f64 = 20.0;
pub const RAIN_SEVERE: f64 = 50.0;

/// Elevation (m) below which terrain drains poorly.
pub const LOW_LYING_ELEVATION: f64 = 10.0;
/// Elevation (m) below which only severe rain overwhelms drainage.
pub const MID_ELEVATION: f64 = 50.0;

const WEIGHT_RAIN: u32 = 2;
const WEIGHT_RIVER: u32 = 2;
const WEIGHT_SOIL: u32 = 1;
const WEIGHT_DRAINAGE: u32 = 1;
const WEIGHT_TOTAL: u32 = WEIGHT_RAIN + WEIGHT_RIVER + WEIGHT_SOIL + WEIGHT_DRAINAGE;

/// Severity band shared by all sub-verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Moderate,
    Severe,
}

impl Severity {
    // ---
    fn from_ladder(value: f64, moderate: f64, severe: f64) -> Self {
        if value >= severe {
            Severity::Severe
        } else if value >= moderate {
            Severity::Moderate
        } else {
            Severity::Normal
        }
    }
}

/// One categorical verdict with its human-readable label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub severity: Severity,
    pub label: &'static str,
}

/// Summary flood potential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FloodPotential {
    Low,
    Moderate,
    High,
}

impl FloodPotential {
    // ---
    pub fn label(self) -> &'static str {
        match self {
            FloodPotential::Low => "Low flood potential: conditions are safe",
            FloodPotential::Moderate => "Moderate flood potential: stay alert",
            FloodPotential::High => "High flood potential: danger, prepare to evacuate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverallVerdict {
    pub potential: FloodPotential,
    pub label: &'static str,
}

impl From<FloodPotential> for OverallVerdict {
    fn from(potential: FloodPotential) -> Self {
        Self {
            potential,
            label: potential.label(),
        }
    }
}

/// Classifier output for one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FloodAssessment {
    // ---
    pub drainage: Verdict,
    pub soil_condition: Verdict,
    pub river_status: Verdict,
    pub rain_analysis: Verdict,
    pub overall_flood_potential: OverallVerdict,
    pub hour_of_day: u32,
}

/// Classify a snapshot. Negative or NaN readings count as zero.
pub fn classify(snapshot: &EnvironmentalSnapshot) -> FloodAssessment {
    // ---
    let elevation = non_negative(snapshot.elevation);
    let rain_mm = non_negative(snapshot.precipitation_sum.value);
    let soil = non_negative(snapshot.soil_moisture_surface.value);
    let discharge = non_negative(snapshot.river_discharge_mean.value);

    let rain_analysis = rain_verdict(rain_mm);
    let soil_condition = soil_verdict(soil);
    let river_status = river_verdict(discharge);
    let drainage = drainage_verdict(elevation, rain_analysis.severity);

    let potential = overall_potential(&drainage, &soil_condition, &river_status, &rain_analysis);

    FloodAssessment {
        drainage,
        soil_condition,
        river_status,
        rain_analysis,
        overall_flood_potential: potential.into(),
        hour_of_day: snapshot.hour_of_day,
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.max(0.0)
    }
}

fn soil_verdict(moisture: f64) -> Verdict {
    // ---
    let severity = Severity::from_ladder(moisture, SOIL_MODERATE, SOIL_SEVERE);
    let label = match severity {
        Severity::Normal => "Dry to moist: soil still absorbs water well",
        Severity::Moderate => "Wet: soil absorption is reduced",
        Severity::Severe => "Saturated: soil can no longer absorb rainfall",
    };
    Verdict { severity, label }
}

fn river_verdict(discharge: f64) -> Verdict {
    // ---
    let severity = Severity::from_ladder(discharge, RIVER_MODERATE, RIVER_SEVERE);
    let label = match severity {
        Severity::Normal => "Normal: river discharge within safe limits",
        Severity::Moderate => "Elevated: river discharge is rising",
        Severity::Severe => "Critical: river discharge may overflow its banks",
    };
    Verdict { severity, label }
}

fn rain_verdict(rain_mm: f64) -> Verdict {
    // ---
    let severity = Severity::from_ladder(rain_mm, RAIN_MODERATE, RAIN_SEVERE);
    let label = if rain_mm == 0.0 {
        "No rain today"
    } else if rain_mm < RAIN_MODERATE {
        "Light rain"
    } else if rain_mm < RAIN_SEVERE {
        "Moderate rain"
    } else if rain_mm < 100.0 {
        "Heavy rain"
    } else if rain_mm < 150.0 {
        "Very heavy rain"
    } else {
        "Extreme rain"
    };
    Verdict { severity, label }
}

fn drainage_verdict(elevation: f64, rain: Severity) -> Verdict {
    // ---
    let low_lying = elevation < LOW_LYING_ELEVATION;
    let severity = if low_lying && rain >= Severity::Moderate {
        Severity::Severe
    } else if low_lying || (elevation < MID_ELEVATION && rain == Severity::Severe) {
        Severity::Moderate
    } else {
        Severity::Normal
    };
    let label = match severity {
        Severity::Normal => "Good: terrain drains runoff naturally",
        Severity::Moderate => "Limited: low terrain slows natural drainage",
        Severity::Severe => "Poor: low terrain cannot drain the incoming rain",
    };
    Verdict { severity, label }
}

fn overall_potential(
    drainage: &Verdict,
    soil: &Verdict,
    river: &Verdict,
    rain: &Verdict,
) -> FloodPotential {
    // ---
    let weighted = [
        (rain, WEIGHT_RAIN),
        (river, WEIGHT_RIVER),
        (soil, WEIGHT_SOIL),
        (drainage, WEIGHT_DRAINAGE),
    ];

    if weighted.iter().any(|(v, _)| v.severity == Severity::Severe) {
        return FloodPotential::High;
    }

    let moderate: u32 = weighted
        .iter()
        .filter(|(v, _)| v.severity == Severity::Moderate)
        .map(|(_, w)| w)
        .sum();

    // Majority means at least half of the total weight.
    if moderate * 2 >= WEIGHT_TOTAL {
        FloodPotential::Moderate
    } else {
        FloodPotential::Low
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::models::Reading;

    fn snapshot(elevation: f64, rain: f64, soil: f64, discharge: f64) -> EnvironmentalSnapshot {
        // ---
        EnvironmentalSnapshot {
            elevation,
            precipitation_sum: Reading::new(rain, "mm"),
            soil_moisture_surface: Reading::new(soil, "m³/m³"),
            river_discharge_mean: Reading::new(discharge, "m³/s"),
            hour_of_day: 14,
        }
    }

    #[test]
    fn test_calm_conditions_are_low() {
        // ---
        let a = classify(&snapshot(120.0, 2.0, 0.15, 20.0));

        assert_eq!(a.rain_analysis.severity, Severity::Normal);
        assert_eq!(a.rain_analysis.label, "Light rain");
        assert_eq!(a.soil_condition.severity, Severity::Normal);
        assert_eq!(a.river_status.severity, Severity::Normal);
        assert_eq!(a.drainage.severity, Severity::Normal);
        assert_eq!(a.overall_flood_potential.potential, FloodPotential::Low);
        assert_eq!(a.hour_of_day, 14);
    }

    #[test]
    fn test_any_severe_verdict_escalates_to_high() {
        // ---
        let a = classify(&snapshot(200.0, 0.0, 0.1, 650.0));

        assert_eq!(a.river_status.severity, Severity::Severe);
        assert_eq!(a.overall_flood_potential.potential, FloodPotential::High);
    }

    #[test]
    fn test_weighted_moderate_majority() {
        // ---
        // rain (2) + soil (1) = 3 of 6
        let a = classify(&snapshot(200.0, 30.0, 0.35, 10.0));
        assert_eq!(a.overall_flood_potential.potential, FloodPotential::Moderate);

        // soil (1) alone is a minority
        let b = classify(&snapshot(200.0, 0.0, 0.35, 10.0));
        assert_eq!(b.soil_condition.severity, Severity::Moderate);
        assert_eq!(b.overall_flood_potential.potential, FloodPotential::Low);

        // soil (1) + drainage (1) is still a minority
        let c = classify(&snapshot(5.0, 0.0, 0.35, 10.0));
        assert_eq!(c.drainage.severity, Severity::Moderate);
        assert_eq!(c.overall_flood_potential.potential, FloodPotential::Low);
    }

    #[test]
    fn test_threshold_boundaries() {
        // ---
        assert_eq!(soil_verdict(0.2999).severity, Severity::Normal);
        assert_eq!(soil_verdict(SOIL_MODERATE).severity, Severity::Moderate);
        assert_eq!(soil_verdict(SOIL_SEVERE).severity, Severity::Severe);
        assert_eq!(river_verdict(99.9).severity, Severity::Normal);
        assert_eq!(river_verdict(RIVER_MODERATE).severity, Severity::Moderate);
        assert_eq!(river_verdict(RIVER_SEVERE).severity, Severity::Severe);
        assert_eq!(rain_verdict(RAIN_MODERATE).severity, Severity::Moderate);
        assert_eq!(rain_verdict(RAIN_SEVERE).severity, Severity::Severe);
    }

    #[test]
    fn test_rain_labels_are_finer_than_bands() {
        // ---
        assert_eq!(rain_verdict(0.0).label, "No rain today");
        assert_eq!(rain_verdict(75.0).label, "Heavy rain");
        assert_eq!(rain_verdict(120.0).label, "Very heavy rain");
        assert_eq!(rain_verdict(180.0).label, "Extreme rain");
        assert_eq!(rain_verdict(180.0).severity, Severity::Severe);
    }

    #[test]
    fn test_drainage_combines_elevation_and_rain() {
        // ---
        assert_eq!(drainage_verdict(3.0, Severity::Moderate).severity, Severity::Severe);
        assert_eq!(drainage_verdict(3.0, Severity::Normal).severity, Severity::Moderate);
        assert_eq!(drainage_verdict(30.0, Severity::Severe).severity, Severity::Moderate);
        assert_eq!(drainage_verdict(30.0, Severity::Moderate).severity, Severity::Normal);
        assert_eq!(drainage_verdict(80.0, Severity::Severe).severity, Severity::Normal);
    }

    #[test]
    fn test_negative_and_nan_inputs_clamp_to_zero() {
        // ---
        let a = classify(&snapshot(f64::NAN, -12.0, -0.5, f64::NAN));

        assert_eq!(a.rain_analysis.label, "No rain today");
        assert_eq!(a.river_status.severity, Severity::Normal);
        // zero elevation is low-lying
        assert_eq!(a.drainage.severity, Severity::Moderate);
    }

    #[test]
    fn test_zeroed_snapshot_classifies() {
        // ---
        let a = classify(&EnvironmentalSnapshot::zeroed(0));

        assert_eq!(a.overall_flood_potential.potential, FloodPotential::Low);
    }

    #[test]
    fn test_classify_is_deterministic() {
        // ---
        let snap = snapshot(7.5, 64.0, 0.42, 480.0);

        assert_eq!(classify(&snap), classify(&snap));
        assert_eq!(
            classify(&snap).overall_flood_potential.label,
            FloodPotential::High.label()
        );
    }
}
