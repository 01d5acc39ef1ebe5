//! System wiring and lifecycle management.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::clients::OrderStoreClient;
use crate::config::EngineConfig;
use crate::eta::{EtaEstimator, FallbackPredictor, HeuristicPredictor, LearnedPredictor, Predictor};
use crate::order_store;
use crate::service::OrderLifecycleService;
use crate::token::TokenIssuer;

/// The runtime orchestrator for the order lifecycle engine.
///
/// `CanteenSystem` is responsible for:
/// - **Lifecycle management**: starting the store actor and shutting it down
/// - **Dependency wiring**: composing the predictor stack once at startup and
///   injecting it, with the token issuer and store client, into the service
///
/// # Predictor wiring
///
/// With a configured scoring service, the estimator receives
/// `FallbackPredictor(LearnedPredictor, HeuristicPredictor)`; if the learned
/// client cannot even be constructed, or no service is configured, the
/// heuristic runs alone. Either way the engine always has a working predictor.
pub struct CanteenSystem {
    /// The lifecycle operations: create, advance, pickup, queue.
    pub orders: OrderLifecycleService,

    /// Direct store access for diagnostics and tests.
    pub store: OrderStoreClient,

    /// Task handles for running actors (used for graceful shutdown).
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CanteenSystem {
    /// Spawns the store actor and wires the service per `config`.
    pub fn new(config: EngineConfig) -> Self {
        let (store_actor, store_client) = order_store::new();
        let store_handle = tokio::spawn(store_actor.run());

        let heuristic = HeuristicPredictor::new(&config.heuristic);
        let predictor: Arc<dyn Predictor> = match &config.predictor {
            Some(predictor_config) => match LearnedPredictor::new(predictor_config) {
                Ok(learned) => {
                    info!(url = %predictor_config.url, "Learned predictor enabled with heuristic fallback");
                    Arc::new(FallbackPredictor::new(learned, heuristic.clone()))
                }
                Err(e) => {
                    warn!(error = %e, "Learned predictor unavailable at startup, using heuristic");
                    Arc::new(heuristic.clone())
                }
            },
            None => Arc::new(heuristic.clone()),
        };
        let estimator = EtaEstimator::new(predictor, heuristic);

        let orders = OrderLifecycleService::new(
            store_client.clone(),
            estimator,
            TokenIssuer,
            &config,
        );

        Self {
            orders,
            store: store_client,
            handles: vec![store_handle],
        }
    }

    /// Gracefully shuts down the system: drops every client handle (closing
    /// the store channel) and waits for the actor tasks to finish.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.orders);
        drop(self.store);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
