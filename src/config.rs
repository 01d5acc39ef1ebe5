//! Engine configuration.
//!
//! Plain `serde`-deserializable structs with sensible defaults; the routing
//! layer owns where the values come from (file, env, flags). `RUST_LOG` stays
//! the only environment knob this crate reads itself.

use serde::Deserialize;

/// Top-level configuration for the lifecycle engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Concurrent-preparation capacity reported to the predictor.
    pub vendor_capacity: u32,
    /// Peak-demand multiplier (>= 1) reported to the predictor.
    pub rush_factor: f64,
    /// Deterministic fallback estimate parameters.
    pub heuristic: HeuristicConfig,
    /// Remote scoring service; `None` runs on the heuristic alone.
    pub predictor: Option<PredictorConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            vendor_capacity: 3,
            rush_factor: 1.5,
            heuristic: HeuristicConfig::default(),
            predictor: None,
        }
    }
}

/// Constants for the deterministic wait-time formula
/// `active_orders * per_order_minutes + base_minutes`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HeuristicConfig {
    pub base_minutes: u32,
    pub per_order_minutes: u32,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            base_minutes: 5,
            per_order_minutes: 5,
        }
    }
}

/// Connection details for the remote regression scoring service.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictorConfig {
    /// Prediction endpoint, e.g. `http://127.0.0.1:8001/predict`.
    pub url: String,
    /// Per-request deadline in milliseconds. Exceeding it counts as a
    /// predictor failure and resolves to the heuristic for that request.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    2_000
}

impl PredictorConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_ms: default_timeout_ms(),
        }
    }
}
