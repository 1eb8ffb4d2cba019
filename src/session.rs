//! Login against the remote server.
//!
//! `POST {base}/login` with a JSON `{username, password}` body. No retry, no
//! token storage: the token goes back to the caller, who hands it to the
//! graph screen.

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::error::{AuthError, LOGIN_FAILED_MESSAGE};
use crate::models::{LoginErrorBody, LoginRequest, LoginResponse, SessionToken};

// ---

#[derive(Debug, Clone)]
pub struct SessionClient {
    // ---
    http: Client,
    base_url: String,
}

impl SessionClient {
    // ---
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub fn login_url(&self) -> String {
        format!("{}/login", self.base_url.trim_end_matches('/'))
    }

    /// Exchange credentials for a session token.
    ///
    /// Empty usernames and passwords are sent as-is; the server decides.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<SessionToken, AuthError> {
        // ---
        let url = self.login_url();
        debug!("POST {} as '{}'", url, username);

        let response = self
            .http
            .post(&url)
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(|e| {
                warn!("Login request to {} failed: {}", url, e);
                AuthError::NetworkUnavailable(e)
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            warn!("Reading login response from {} failed: {}", url, e);
            AuthError::NetworkUnavailable(e)
        })?;

        if !status.is_success() {
            let message = serde_json::from_slice::<LoginErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| LOGIN_FAILED_MESSAGE.to_string());
            info!("Login rejected with HTTP {}: {}", status, message);
            return Err(AuthError::Rejected(message));
        }

        let LoginResponse { token } = serde_json::from_slice(&body).map_err(|e| {
            warn!("Login succeeded with HTTP {} but body was unusable: {}", status, e);
            AuthError::InvalidResponse(e.to_string())
        })?;

        info!("Login succeeded for '{}'", username);
        Ok(SessionToken::new(token))
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_login_url_tolerates_trailing_slash() {
        // ---
        let with_slash = SessionClient::new(Client::new(), "http://localhost:3000/");
        let without = SessionClient::new(Client::new(), "http://localhost:3000");

        assert_eq!(with_slash.login_url(), "http://localhost:3000/login");
        assert_eq!(without.login_url(), with_slash.login_url());
    }
}
