use axum::{
    extract::Query, extract::State, http::StatusCode, response::IntoResponse, response::Response,
    routing::get, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::{aggregate, classify, Coordinates, FloodAssessment, UpstreamClient};

// ---

pub fn router() -> Router<UpstreamClient> {
    // ---
    Router::new().route("/api/predict-flood", get(handler))
}

/// Query parameters for a flood prediction
#[derive(Debug, Deserialize)]
pub struct PredictQuery {
    latitude: Option<String>,
    longitude: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    lat: String,
    lng: String,
    error: &'static str,
}

#[derive(Debug, Serialize)]
struct SourceStatus {
    weather: bool,
    hydrology: bool,
}

#[derive(Debug, Serialize)]
struct FloodPrediction {
    elevation: f64,
    precipitation_sum: String,
    soil_moisture: String,
    river_discharge_mean: String,
    hour_of_day: u32,
    sources: SourceStatus,
    assessment: FloodAssessment,
}

#[derive(Debug, Serialize)]
struct PredictionResponse {
    request_id: Uuid,
    generated_at: DateTime<Utc>,
    lat: f64,
    lng: f64,
    flood_prediction: FloodPrediction,
}

async fn handler(
    Query(params): Query<PredictQuery>,
    State(upstream): State<UpstreamClient>,
) -> Response {
    // ---
    let request_id = Uuid::new_v4();
    let span = info_span!("predict_flood", %request_id);

    predict(params, upstream, request_id).instrument(span).await
}

async fn predict(params: PredictQuery, upstream: UpstreamClient, request_id: Uuid) -> Response {
    // ---
    info!("GET /api/predict-flood - {:?}", params);

    let coords = match parse_coordinates(&params) {
        Ok(coords) => coords,
        Err(error) => {
            debug!("Rejecting request: {}", error);
            let body = ErrorBody {
                lat: params.latitude.unwrap_or_default(),
                lng: params.longitude.unwrap_or_default(),
                error,
            };
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }
    };

    // Step 1: fan out to both upstreams
    let (weather, hydrology) = upstream.fetch_sources(coords).await;
    let sources = SourceStatus {
        weather: weather.is_present(),
        hydrology: hydrology.is_present(),
    };

    // Step 2: merge and classify
    let snapshot = aggregate(weather, hydrology);
    let assessment = classify(&snapshot);

    info!(
        "Assessment complete: {:?} (weather={}, hydrology={})",
        assessment.overall_flood_potential.potential, sources.weather, sources.hydrology
    );

    let body = PredictionResponse {
        request_id,
        generated_at: Utc::now(),
        lat: coords.latitude,
        lng: coords.longitude,
        flood_prediction: FloodPrediction {
            elevation: snapshot.elevation,
            precipitation_sum: snapshot.precipitation_sum.to_string(),
            soil_moisture: snapshot.soil_moisture_surface.to_string(),
            river_discharge_mean: snapshot.river_discharge_mean.to_string(),
            hour_of_day: snapshot.hour_of_day,
            sources,
            assessment,
        },
    };
    (StatusCode::OK, Json(body)).into_response()
}

fn parse_coordinates(params: &PredictQuery) -> Result<Coordinates, &'static str> {
    // ---
    let (Some(lat), Some(lng)) = (
        non_empty(params.latitude.as_deref()),
        non_empty(params.longitude.as_deref()),
    ) else {
        return Err("Missing latitude or longitude in query parameters.");
    };

    match (lat.trim().parse::<f64>(), lng.trim().parse::<f64>()) {
        (Ok(latitude), Ok(longitude)) if latitude.is_finite() && longitude.is_finite() => {
            Ok(Coordinates {
                latitude,
                longitude,
            })
        }
        _ => Err("Latitude and longitude must be decimal numbers."),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
