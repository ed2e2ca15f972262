//! The request pipeline shared by every PlateMate operation.
//!
//! # Design
//! `ApiClient` holds a `reqwest::Client` and a base URL and carries no other
//! state between calls. Every backend operation, whatever its domain, flows
//! through [`ApiClient::execute`]: serialize the payload, issue exactly one
//! POST, classify the outcome into an [`ApiError`] or deserialize the success
//! envelope. The per-domain facades are thin adapters over this one function.
//!
//! The backend signals application failures in-band: an HTTP 200 response
//! whose body carries an `error` string field is a failure, so the pipeline
//! inspects the body before trusting it as a result.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;

/// Path prefix shared by every endpoint.
const API_BASE: &str = "/api";

/// Asynchronous client for the PlateMate backend.
///
/// Cheap to clone; the inner `reqwest::Client` is a shared handle. Concurrent
/// calls are fully independent: connection reuse is the transport's business,
/// and no buffers or caches are shared at this layer.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Execute one request/response exchange against `endpoint`.
    ///
    /// `endpoint` is the `/{Service}/{operation}` suffix; the body is any
    /// JSON-serializable payload (operations without arguments send `{}`).
    /// Exactly one exchange is attempted: no retries, no timeout beyond the
    /// transport's defaults. Failures map onto the three [`ApiError`]
    /// variants:
    ///
    /// - transport failure, or a body that is not the expected JSON shape,
    ///   becomes [`ApiError::Network`];
    /// - a non-2xx status becomes [`ApiError::Http`] before the body is
    ///   interpreted;
    /// - a 2xx body carrying an `error` string becomes
    ///   [`ApiError::Application`], taking precedence over the success shape.
    pub async fn execute<T, B>(&self, endpoint: &str, payload: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}{}", self.base_url, API_BASE, endpoint);
        debug!(%endpoint, "dispatching request");

        // `.json` also sets the application/json content-type header.
        let response = self
            .http
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if let Some(message) = body.get("error").and_then(Value::as_str) {
            return Err(ApiError::Application(message.to_string()));
        }

        serde_json::from_value(body).map_err(|e| ApiError::Network(format!("invalid response body: {e}")))
    }

    /// Like [`ApiClient::execute`] for operations whose success payload
    /// carries nothing the caller needs.
    pub async fn execute_unit<B>(&self, endpoint: &str, payload: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.execute::<Value, B>(endpoint, payload).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let client = ApiClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn client_is_cloneable() {
        let client = ApiClient::new("http://localhost:3000");
        let clone = client.clone();
        assert_eq!(clone.base_url, client.base_url);
    }
}
