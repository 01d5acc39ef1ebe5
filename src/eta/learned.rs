//! Client for the external regression scoring service.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PredictorConfig;
use crate::eta::predictor::{Predictor, PredictorError};
use crate::eta::EtaInputs;

/// Wire request for the scoring service, sent as query parameters.
#[derive(Debug, Serialize)]
struct PredictRequest {
    prep_time: u32,
    active_orders: u32,
    vendor_capacity: u32,
    time_of_day: f64,
    rush_factor: f64,
}

/// Wire response from the scoring service.
#[derive(Debug, Deserialize)]
struct PredictResponse {
    predicted_wait_time_minutes: i64,
}

/// Predictor backed by a regression model served over HTTP.
///
/// Every call is bounded by the configured timeout; any transport failure,
/// non-success status, or contract violation is reported as a
/// [`PredictorError`] for the fallback layer to absorb. Nothing is cached:
/// the service is retried fresh on the next prediction.
pub struct LearnedPredictor {
    client: reqwest::Client,
    url: String,
}

impl LearnedPredictor {
    /// Builds the HTTP client with connect and request deadlines.
    ///
    /// # Errors
    /// [`PredictorError::Unavailable`] when the client cannot be constructed;
    /// the runtime treats that as "model unavailable at load time" and wires
    /// the heuristic alone.
    pub fn new(config: &PredictorConfig) -> Result<Self, PredictorError> {
        let timeout = Duration::from_millis(config.timeout_ms);
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| PredictorError::Unavailable(e.to_string()))?;
        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }
}

#[async_trait]
impl Predictor for LearnedPredictor {
    async fn predict(&self, inputs: &EtaInputs) -> Result<f64, PredictorError> {
        let request = PredictRequest {
            prep_time: inputs.prep_minutes,
            active_orders: inputs.active_orders,
            vendor_capacity: inputs.capacity,
            time_of_day: inputs.time_of_day,
            rush_factor: inputs.rush_factor,
        };

        let response = self
            .client
            .post(&self.url)
            .query(&request)
            .send()
            .await
            .map_err(|e| PredictorError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PredictorError::Status(status.as_u16()));
        }

        let body: PredictResponse = response
            .json()
            .await
            .map_err(|e| PredictorError::Malformed(e.to_string()))?;
        debug!(minutes = body.predicted_wait_time_minutes, "Scoring service responded");

        Ok(body.predicted_wait_time_minutes as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn inputs() -> EtaInputs {
        EtaInputs {
            prep_minutes: 5,
            active_orders: 2,
            capacity: 3,
            time_of_day: 11.5,
            rush_factor: 1.5,
        }
    }

    fn config(url: String) -> PredictorConfig {
        PredictorConfig {
            url,
            timeout_ms: 500,
        }
    }

    /// Serves exactly one canned HTTP response, then closes.
    async fn one_shot_server(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{}/predict", addr)
    }

    #[tokio::test]
    async fn returns_the_service_prediction() {
        let url =
            one_shot_server("HTTP/1.1 200 OK", r#"{"predicted_wait_time_minutes": 12}"#).await;
        let predictor = LearnedPredictor::new(&config(url)).unwrap();
        assert_eq!(predictor.predict(&inputs()).await, Ok(12.0));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let url = one_shot_server(
            "HTTP/1.1 503 Service Unavailable",
            r#"{"detail": "model not loaded"}"#,
        )
        .await;
        let predictor = LearnedPredictor::new(&config(url)).unwrap();
        assert_eq!(
            predictor.predict(&inputs()).await,
            Err(PredictorError::Status(503))
        );
    }

    #[tokio::test]
    async fn malformed_body_is_an_error() {
        let url = one_shot_server("HTTP/1.1 200 OK", r#"{"wait": "soon"}"#).await;
        let predictor = LearnedPredictor::new(&config(url)).unwrap();
        match predictor.predict(&inputs()).await {
            Err(PredictorError::Malformed(_)) => {}
            other => panic!("expected malformed response error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_error() {
        // Bind then drop to obtain a port nothing is listening on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let predictor =
            LearnedPredictor::new(&config(format!("http://{}/predict", addr))).unwrap();
        match predictor.predict(&inputs()).await {
            Err(PredictorError::Transport(_)) => {}
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unresponsive_service_times_out() {
        // Accepts the connection but never answers; the request deadline fires.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(socket);
        });

        let predictor = LearnedPredictor::new(&PredictorConfig {
            url: format!("http://{}/predict", addr),
            timeout_ms: 100,
        })
        .unwrap();
        match predictor.predict(&inputs()).await {
            Err(PredictorError::Transport(_)) => {}
            other => panic!("expected timeout as transport error, got {:?}", other),
        }
    }
}
