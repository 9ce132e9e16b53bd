use axum::{extract::Query, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{debug, info_span};
use uuid::Uuid;

use crate::{
    recommend, sort_by_priority, Recommendation, RiskSimulationResult, SimulationParameters,
    SoilAbsorption,
};

// ---

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/api/simulate", get(handler))
}

/// Query parameters for a what-if scenario.
///
/// Omitted, blank, malformed or non-finite values use the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct SimulateQuery {
    forest_cover: Option<String>,
    rainfall: Option<String>,
    soil_absorption: Option<String>,
    /// `priority` sorts recommendations highest first; anything else keeps
    /// rule order.
    order: Option<String>,
}

impl SimulateQuery {
    // ---
    fn parameters(&self) -> SimulationParameters {
        let defaults = SimulationParameters::default();
        SimulationParameters {
            forest_cover_percent: parse_number(self.forest_cover.as_deref())
                .unwrap_or(defaults.forest_cover_percent),
            rainfall_mm: parse_number(self.rainfall.as_deref()).unwrap_or(defaults.rainfall_mm),
            soil_absorption: self
                .soil_absorption
                .as_deref()
                .map(SoilAbsorption::from_label)
                .unwrap_or(defaults.soil_absorption),
        }
    }

    fn sort_by_priority(&self) -> bool {
        self.order
            .as_deref()
            .is_some_and(|o| o.eq_ignore_ascii_case("priority"))
    }
}

fn parse_number(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

#[derive(Debug, Serialize)]
struct SimulationResponse {
    parameters: SimulationParameters,
    result: RiskSimulationResult,
    risk_color: &'static str,
    recommendations: Vec<Recommendation>,
}

async fn handler(Query(params): Query<SimulateQuery>) -> Json<SimulationResponse> {
    Json(run_scenario(&params))
}

fn run_scenario(params: &SimulateQuery) -> SimulationResponse {
    // ---
    let request_id = Uuid::new_v4();
    let _span = info_span!("simulate", %request_id).entered();

    let parameters = params.parameters();
    let result = parameters.simulate();

    let mut recommendations = recommend(&result);
    if params.sort_by_priority() {
        recommendations = sort_by_priority(recommendations);
    }

    debug!(
        "Simulated {:?} -> {}% ({:?}), {} recommendations",
        parameters,
        result.flood_probability,
        result.risk_level,
        recommendations.len()
    );

    SimulationResponse {
        parameters,
        result,
        risk_color: result.risk_level.color(),
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_missing_parameters_use_defaults() {
        // ---
        let params = SimulateQuery::default().parameters();

        assert_eq!(params, SimulationParameters::default());
    }

    #[test]
    fn test_unknown_soil_label_is_medium() {
        // ---
        let query = SimulateQuery {
            soil_absorption: Some("peat".to_string()),
            ..SimulateQuery::default()
        };

        assert_eq!(query.parameters().soil_absorption, SoilAbsorption::Medium);
    }

    #[test]
    fn test_malformed_numbers_use_defaults() {
        // ---
        let defaults = SimulationParameters::default();
        for (forest, rain) in [("abc", "lots"), ("", " "), ("inf", "NaN")] {
            let query = SimulateQuery {
                forest_cover: Some(forest.to_string()),
                rainfall: Some(rain.to_string()),
                ..SimulateQuery::default()
            };
            let params = query.parameters();

            assert_eq!(params.forest_cover_percent, defaults.forest_cover_percent);
            assert_eq!(params.rainfall_mm, defaults.rainfall_mm);
        }
    }

    #[test]
    fn test_order_flag() {
        // ---
        let query = SimulateQuery {
            order: Some("Priority".to_string()),
            ..SimulateQuery::default()
        };

        assert!(query.sort_by_priority());
        assert!(!SimulateQuery::default().sort_by_priority());
    }

    #[test]
    fn test_run_scenario_sorted_puts_critical_first() {
        // ---
        let query = SimulateQuery {
            forest_cover: Some("10".to_string()),
            rainfall: Some(" 280 ".to_string()),
            soil_absorption: Some("low".to_string()),
            order: Some("priority".to_string()),
        };

        let response = run_scenario(&query);

        assert_eq!(response.risk_color, "#991b1b");
        assert!(response
            .recommendations
            .windows(2)
            .all(|w| w[0].priority >= w[1].priority));
    }
}
