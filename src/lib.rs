//! Flood risk assessment engine and what-if simulator.
//!
//! The crate has two pipelines that share a risk vocabulary but no state:
//! - real-world: upstream fetch → [`aggregate`] → [`classify`]
//! - hypothetical: [`simulate`] → [`recommend`]
//!
//! The core modules (`aggregate`, `classify`, `simulate`, `recommend`) are
//! pure and never log. Network access and tracing live in `upstream` and
//! `routes`.
//!
//! This crate follows the Explicit Module Boundary Pattern (EMBP): sibling
//! modules import each other through the re-exports below rather than
//! reaching into one another's paths.

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod models;
pub mod recommend;
pub mod routes;
pub mod simulate;
pub mod upstream;

pub use aggregate::{aggregate, aggregate_at};
pub use classify::{classify, FloodAssessment, FloodPotential, Severity, Verdict};
pub use config::Config;
pub use models::{EnvironmentalSnapshot, HydrologyPayload, Reading, Source, WeatherPayload};
pub use recommend::{recommend, sort_by_priority, Priority, Recommendation};
pub use simulate::{
    simulate, RiskFactors, RiskLevel, RiskSimulationResult, SimulationParameters, SoilAbsorption,
};
pub use upstream::{Coordinates, UpstreamClient};
