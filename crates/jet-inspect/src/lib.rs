//! Fetching the cluster-status document from the appjet backend.
//!
//! The inspect endpoint requires the session's bearer token, which the
//! [`SessionStore`] stamps onto the request; this crate never sees the
//! token itself. A fetched body is classified into a [`TreeModel`] at the
//! boundary so every downstream consumer works on tagged data.

use std::time::Duration;

use jet_session::SessionStore;
use jet_tree::TreeModel;
use thiserror::Error;
use tracing::debug;

/// Request timeout. A hardening bound, not inherited protocol behavior.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from status-document retrieval.
///
/// Callers log these and keep whatever document they last rendered; a
/// failed fetch never tears down the console.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be completed at the transport level.
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("inspect request failed with status {0}")]
    Status(u16),

    /// The response body was not a JSON document.
    #[error("could not decode status document: {0}")]
    Decode(String),
}

/// Client for `GET {base}/appjet/inspect`.
#[derive(Debug, Clone)]
pub struct InspectClient {
    http: reqwest::Client,
    base_url: String,
}

impl InspectClient {
    /// Create a client for the inspect endpoint under `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the current status document, authorized by `session`.
    ///
    /// # Errors
    ///
    /// [`FetchError::Transport`] when the request cannot be sent,
    /// [`FetchError::Status`] on a non-2xx response,
    /// [`FetchError::Decode`] when the body is not JSON.
    pub async fn fetch(&self, session: &SessionStore) -> Result<TreeModel, FetchError> {
        let url = format!("{}/appjet/inspect", self.base_url);
        debug!(url = %url, "fetching status document");

        let request = session.authorize(self.http.get(&url).timeout(REQUEST_TIMEOUT));
        let response = request
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let raw: serde_json::Value = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;
        debug!("status document fetched");
        Ok(TreeModel::classify(raw))
    }
}
