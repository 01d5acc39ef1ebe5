//! Wait-time estimation.
//!
//! [`EtaEstimator`] turns raw order context into a bounded integer minute
//! estimate. It validates inputs, delegates the arithmetic to an injected
//! [`Predictor`], and clamps the result; it holds no other business logic.
//!
//! The production wiring injects a [`FallbackPredictor`] (learned model with
//! the heuristic behind it), built once at startup. Predictor failures never
//! leave this module: the estimator keeps its own heuristic as the last
//! resort, so `estimate` can only fail on invalid input.

pub mod heuristic;
pub mod learned;
pub mod predictor;

pub use heuristic::HeuristicPredictor;
pub use learned::LearnedPredictor;
pub use predictor::{FallbackPredictor, Predictor, PredictorError};

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

/// Raw context for one estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EtaInputs {
    /// Minutes of preparation work in the order itself.
    pub prep_minutes: u32,
    /// The vendor's not-yet-collected order count at estimation time.
    pub active_orders: u32,
    /// The vendor's concurrent-preparation capacity.
    pub capacity: u32,
    /// Fractional hour of day, `0.0..24.0`.
    pub time_of_day: f64,
    /// Peak-demand multiplier, `>= 1`.
    pub rush_factor: f64,
}

impl EtaInputs {
    fn validate(&self) -> Result<(), EtaError> {
        if self.capacity < 1 {
            return Err(EtaError::InvalidInput("capacity must be >= 1".into()));
        }
        if !self.time_of_day.is_finite() || !(0.0..24.0).contains(&self.time_of_day) {
            return Err(EtaError::InvalidInput(
                "time_of_day must be a fractional hour in 0..24".into(),
            ));
        }
        if !self.rush_factor.is_finite() || self.rush_factor < 1.0 {
            return Err(EtaError::InvalidInput("rush_factor must be >= 1".into()));
        }
        Ok(())
    }
}

/// Estimation failures surfaced to callers.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EtaError {
    #[error("invalid estimation input: {0}")]
    InvalidInput(String),
}

/// Computes the estimate: validate, predict, round, clamp to `>= 1`.
#[derive(Clone)]
pub struct EtaEstimator {
    predictor: Arc<dyn Predictor>,
    heuristic: HeuristicPredictor,
}

impl EtaEstimator {
    /// `predictor` is normally the fallback composition built at startup;
    /// `heuristic` is the estimator's own last resort, kept so a predictor
    /// failure can never reach a lifecycle caller no matter what was injected.
    pub fn new(predictor: Arc<dyn Predictor>, heuristic: HeuristicPredictor) -> Self {
        Self { predictor, heuristic }
    }

    /// Estimated minutes until pickup, always `>= 1`.
    ///
    /// # Errors
    /// [`EtaError::InvalidInput`] for malformed inputs. Predictor failures do
    /// not error: they resolve to the heuristic value for this one call.
    pub async fn estimate(&self, inputs: &EtaInputs) -> Result<u32, EtaError> {
        inputs.validate()?;

        let raw = match self.predictor.predict(inputs).await {
            Ok(minutes) => minutes,
            Err(error) => {
                warn!(%error, "Prediction failed past the fallback, using heuristic");
                f64::from(self.heuristic.formula(inputs.active_orders))
            }
        };

        let rounded = raw.round();
        if !rounded.is_finite() || rounded < 1.0 {
            return Ok(1);
        }
        Ok(rounded as u32)
    }
}
