//! Error taxonomy for the dashboard client.
//!
//! `AuthError` is user-facing: its `Display` output is exactly the message
//! the login screen shows. `FetchError` is operator-facing only; the graph
//! screen logs it and keeps showing whatever it had before.

use reqwest::StatusCode;

/// Message shown when the server rejects a login without saying why.
pub const LOGIN_FAILED_MESSAGE: &str = "Erro no login";

/// Message shown when the login request cannot reach the server.
pub const CONNECT_FAILED_MESSAGE: &str = "Erro ao conectar-se ao servidor.";

/// Message shown when the server answers OK with an unusable body.
pub const INVALID_RESPONSE_MESSAGE: &str = "Resposta inválida do servidor.";

// ---

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The server answered with a non-OK status.
    #[error("{0}")]
    Rejected(String),

    /// The request never completed (refused, timed out, DNS, TLS...).
    #[error("{}", CONNECT_FAILED_MESSAGE)]
    NetworkUnavailable(#[source] reqwest::Error),

    /// OK status, but the body did not carry a token.
    #[error("{}", INVALID_RESPONSE_MESSAGE)]
    InvalidResponse(String),
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("sensor server responded with HTTP {0}")]
    Status(StatusCode),

    #[error("malformed sensor payload: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown chart variant '{0}' (expected 'line' or 'bar')")]
pub struct ParseChartVariantError(pub String);

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_rejected_displays_server_message_verbatim() {
        // ---
        let err = AuthError::Rejected("bad creds".to_string());
        assert_eq!(err.to_string(), "bad creds");
    }

    #[test]
    fn test_invalid_response_hides_detail() {
        // ---
        let err = AuthError::InvalidResponse("missing field `token`".to_string());
        assert_eq!(err.to_string(), INVALID_RESPONSE_MESSAGE);
    }

    #[test]
    fn test_fetch_status_mentions_code() {
        // ---
        let err = FetchError::Status(StatusCode::UNAUTHORIZED);
        assert!(err.to_string().contains("401"));
    }
}
