//! pzo-http
//!
//! reqwest-backed [`OrderGateway`]: one `POST` of the draft as JSON per
//! submission, no retries, no timeout of its own.
//!
//! Response mapping:
//!
//! | Response                       | Result                            |
//! |--------------------------------|-----------------------------------|
//! | 2xx + `{ "message": .. }`      | `Ok(Outcome::success(message))`   |
//! | non-2xx + `{ "message": .. }`  | `Ok(Outcome::failure(message))`   |
//! | any status, other body         | `Err(GatewayError::Decode { .. })`|
//! | no response                    | `Err(GatewayError::Transport(..))`|

use pzo_config::EndpointConfig;
use pzo_form::{GatewayError, OrderGateway, Outcome};
use pzo_schemas::{MessageBody, OrderDraft};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct HttpOrderGateway {
    http: reqwest::Client,
    order_url: String,
}

impl HttpOrderGateway {
    /// Gateway posting to the full order URL (e.g. `http://localhost:9009/api/order`).
    pub fn new(order_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), order_url)
    }

    pub fn from_endpoint(endpoint: &EndpointConfig) -> Self {
        Self::new(endpoint.order_url())
    }

    /// Reuse an existing client (connection pool, proxy settings).
    pub fn with_client(http: reqwest::Client, order_url: impl Into<String>) -> Self {
        Self {
            http,
            order_url: order_url.into(),
        }
    }

    pub fn order_url(&self) -> &str {
        &self.order_url
    }
}

#[async_trait::async_trait]
impl OrderGateway for HttpOrderGateway {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn submit(&self, draft: &OrderDraft) -> Result<Outcome, GatewayError> {
        debug!(
            url = %self.order_url,
            size = %draft.size,
            toppings = draft.toppings.len(),
            "posting order"
        );

        let resp = self
            .http
            .post(&self.order_url)
            .json(draft)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %self.order_url, error = %e, "order request failed");
                GatewayError::Transport(e.to_string())
            })?;

        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| GatewayError::Transport(format!("reading response body: {e}")))?;

        let body: MessageBody = serde_json::from_slice(&bytes).map_err(|e| {
            warn!(status = status.as_u16(), error = %e, "order response is not {{ message }}");
            GatewayError::Decode {
                status: status.as_u16(),
                detail: e.to_string(),
            }
        })?;

        if status.is_success() {
            info!(status = status.as_u16(), "order accepted");
            Ok(Outcome::success(body.message))
        } else {
            warn!(status = status.as_u16(), message = %body.message, "order rejected");
            Ok(Outcome::failure(body.message))
        }
    }
}

// -----------------
// Tests (no network beyond the local mock)
// -----------------
