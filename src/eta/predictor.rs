//! The predictor capability and its fallback composition.

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::eta::heuristic::HeuristicPredictor;
use crate::eta::EtaInputs;

/// Why a prediction attempt failed.
///
/// Internal to the estimation layer: every variant is recovered by falling
/// back to the heuristic, and none is ever surfaced to lifecycle callers.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PredictorError {
    /// The scoring service was unreachable or the request timed out.
    #[error("prediction request failed: {0}")]
    Transport(String),

    /// The scoring service answered with a non-success status.
    #[error("prediction service returned status {0}")]
    Status(u16),

    /// The response body did not match the expected contract.
    #[error("malformed prediction response: {0}")]
    Malformed(String),

    /// The scoring service client could not be constructed at startup.
    #[error("prediction client unavailable: {0}")]
    Unavailable(String),
}

/// Capability that turns estimation inputs into raw predicted minutes.
///
/// Implementations: [`HeuristicPredictor`] (deterministic, always available),
/// [`LearnedPredictor`](crate::eta::LearnedPredictor) (remote regression
/// model), and [`FallbackPredictor`] composing the two.
#[async_trait]
pub trait Predictor: Send + Sync {
    async fn predict(&self, inputs: &EtaInputs) -> Result<f64, PredictorError>;
}

/// Decorator that absorbs primary-predictor failures with the heuristic.
///
/// Constructed once at startup and injected into the estimator. The fallback
/// decision is made fresh on every call — a failure is never cached, so the
/// primary is tried again on the next request and may have recovered.
pub struct FallbackPredictor<P: Predictor> {
    primary: P,
    fallback: HeuristicPredictor,
}

impl<P: Predictor> FallbackPredictor<P> {
    pub fn new(primary: P, fallback: HeuristicPredictor) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl<P: Predictor> Predictor for FallbackPredictor<P> {
    async fn predict(&self, inputs: &EtaInputs) -> Result<f64, PredictorError> {
        match self.primary.predict(inputs).await {
            Ok(minutes) => Ok(minutes),
            Err(error) => {
                warn!(%error, "Predictor unavailable, falling back to heuristic");
                self.fallback.predict(inputs).await
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{FailingPredictor, FixedPredictor};
    use super::*;
    use crate::config::HeuristicConfig;

    fn inputs(active_orders: u32) -> EtaInputs {
        EtaInputs {
            prep_minutes: 5,
            active_orders,
            capacity: 3,
            time_of_day: 11.5,
            rush_factor: 1.5,
        }
    }

    #[tokio::test]
    async fn passes_through_a_healthy_primary() {
        let fallback = FallbackPredictor::new(
            FixedPredictor(42.0),
            HeuristicPredictor::new(&HeuristicConfig::default()),
        );
        assert_eq!(fallback.predict(&inputs(2)).await, Ok(42.0));
    }

    #[tokio::test]
    async fn recovers_every_failure_with_the_heuristic_value() {
        let heuristic = HeuristicPredictor::new(&HeuristicConfig::default());
        let expected = heuristic.predict(&inputs(2)).await.unwrap();

        for error in [
            PredictorError::Transport("connection refused".into()),
            PredictorError::Status(503),
            PredictorError::Malformed("missing field".into()),
        ] {
            let fallback = FallbackPredictor::new(FailingPredictor(error), heuristic.clone());
            assert_eq!(fallback.predict(&inputs(2)).await, Ok(expected));
        }
    }
}
