//! The session store and its login/logout protocol.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::AuthError;
use crate::session::{Session, SessionView};

/// Request timeout. The upstream protocol specifies none; this bound is a
/// hardening addition so a dead backend cannot hang the console.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Successful login body.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// Owner of the process-wide session and the authentication protocol.
///
/// Cloning is cheap and every clone shares the same session cell, so the
/// store can be handed to spawned tasks while all consumers observe one
/// session. The session is only ever written as a whole value under the
/// write lock; two racing logins can interleave their HTTP calls but never
/// their field writes — readers see one coherent session or the other.
#[derive(Debug, Clone)]
pub struct SessionStore {
    http: reqwest::Client,
    base_url: String,
    session: Arc<RwLock<Session>>,
}

impl SessionStore {
    /// Create a store talking to the identity endpoints under `base_url`.
    /// The session starts empty and unauthenticated.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            session: Arc::new(RwLock::new(Session::default())),
        }
    }

    /// Authenticate against `POST {base}/appjet/login`.
    ///
    /// On any 2xx response the body's `token` replaces the session in one
    /// write. On a non-2xx response the session is left exactly as it was.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidCredentials`] when the backend rejects the
    /// credentials; [`AuthError::Transport`] when the request cannot be
    /// sent or the success body cannot be decoded.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let url = format!("{}/appjet/login", self.base_url);
        debug!(url = %url, username, "sending login request");

        let response = self
            .http
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            debug!(status = %response.status(), username, "login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let TokenResponse { token } = response
            .json()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        *self.session.write() = Session::authenticated(username, token);
        info!(username, "login successful");
        Ok(())
    }

    /// Invalidate the session via `GET {base}/appjet/logout/{token}`.
    ///
    /// The local session is cleared no matter what the server answered;
    /// the server's status and body are ignored. Only a request that could
    /// not be sent at all is reported, and the session is cleared even
    /// then. The server may therefore still consider the token valid — an
    /// inherited simplification, kept deliberately.
    ///
    /// # Errors
    ///
    /// [`AuthError::Transport`] when the request could not be sent.
    pub async fn logout(&self) -> Result<(), AuthError> {
        let token = self.session.read().auth_token.clone();
        let url = format!("{}/appjet/logout/{token}", self.base_url);
        debug!(url = %url, "sending logout request");

        let result = self.http.get(&url).timeout(REQUEST_TIMEOUT).send().await;
        *self.session.write() = Session::default();

        match result {
            Ok(response) => {
                debug!(status = %response.status(), "logout request completed");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "logout request could not be sent; session cleared locally");
                Err(AuthError::Transport(e.to_string()))
            }
        }
    }

    /// Token-free snapshot of the current session.
    pub fn view(&self) -> SessionView {
        let session = self.session.read();
        SessionView {
            display_name: session.display_name.clone(),
            is_authenticated: session.is_authenticated,
        }
    }

    /// Stamp the bearer token onto an outgoing request.
    ///
    /// This is the only path by which the token leaves the store. An
    /// unauthenticated session leaves the request untouched.
    pub fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let session = self.session.read();
        if session.is_authenticated {
            request.header(AUTHORIZATION, session.auth_token.clone())
        } else {
            request
        }
    }
}
