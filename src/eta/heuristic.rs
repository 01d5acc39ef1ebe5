//! Deterministic wait-time formula. The universal fallback.

use async_trait::async_trait;

use crate::config::HeuristicConfig;
use crate::eta::predictor::{Predictor, PredictorError};
use crate::eta::EtaInputs;

/// `active_orders * per_order_minutes + base_minutes`.
///
/// No external dependency and no failure mode, which is exactly what makes it
/// usable as the fallback behind the learned predictor.
#[derive(Debug, Clone)]
pub struct HeuristicPredictor {
    base_minutes: u32,
    per_order_minutes: u32,
}

impl HeuristicPredictor {
    pub fn new(config: &HeuristicConfig) -> Self {
        Self {
            base_minutes: config.base_minutes,
            per_order_minutes: config.per_order_minutes,
        }
    }

    /// The formula itself, usable synchronously.
    pub fn formula(&self, active_orders: u32) -> u32 {
        active_orders * self.per_order_minutes + self.base_minutes
    }
}

#[async_trait]
impl Predictor for HeuristicPredictor {
    async fn predict(&self, inputs: &EtaInputs) -> Result<f64, PredictorError> {
        Ok(f64::from(self.formula(inputs.active_orders)))
    }
}
