//! HTTP gate client implementation

use super::verdict::{interpret, Verdict};
use super::{GateError, GateService};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

/// Wire request for one gate exchange
#[derive(Debug, Serialize)]
struct GateRequest<'a> {
    context: &'a [String],
    /// Serialized as an explicit `null` when no choice has been made yet
    binding: Option<&'a str>,
}

/// Gate client speaking the wire protocol over a single configured endpoint
pub struct HttpGateClient {
    client: Client,
    endpoint: String,
}

impl HttpGateClient {
    /// The client sets no request timeout of its own; the transport's
    /// defaults apply.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl GateService for HttpGateClient {
    async fn query(&self, context: &[String], binding: Option<&str>) -> Result<Verdict, GateError> {
        let request = GateRequest { context, binding };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GateError::network(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    GateError::network(format!("Connection failed: {e}"))
                } else {
                    GateError::network(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GateError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(GateError::status(status.as_u16(), body));
        }

        // A body that is not JSON at all is an unsupported verdict, not a
        // failed exchange.
        match serde_json::from_str::<Value>(&body) {
            Ok(raw) => Ok(interpret(raw)),
            Err(_) => Ok(Verdict::Unsupported {
                raw: Value::String(body),
            }),
        }
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
