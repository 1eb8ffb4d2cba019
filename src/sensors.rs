//! Sensor reading retrieval.
//!
//! `GET {base}/dados-sensores` with the session token as a bearer credential.
//! The whole set is fetched every time; there is no paging and no cache.

use std::future::Future;

use reqwest::Client;
use tracing::debug;

use crate::error::FetchError;
use crate::models::{decode_readings, SensorReading, SessionToken};

// ---

/// Anything the graph screen can load readings from.
pub trait ReadingsSource: Send + Sync + 'static {
    fn load_readings(
        &self,
        token: &SessionToken,
    ) -> impl Future<Output = Result<Vec<SensorReading>, FetchError>> + Send;
}

#[derive(Debug, Clone)]
pub struct SensorClient {
    // ---
    http: Client,
    base_url: String,
}

impl SensorClient {
    // ---
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub fn readings_url(&self) -> String {
        format!("{}/dados-sensores", self.base_url.trim_end_matches('/'))
    }

    /// Fetch and decode the full reading set.
    pub async fn load_readings(
        &self,
        token: &SessionToken,
    ) -> Result<Vec<SensorReading>, FetchError> {
        // ---
        let url = self.readings_url();
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        let readings = decode_readings(&body)?;
        debug!("Fetched {} readings from {}", readings.len(), url);
        Ok(readings)
    }
}

impl ReadingsSource for SensorClient {
    fn load_readings(
        &self,
        token: &SessionToken,
    ) -> impl Future<Output = Result<Vec<SensorReading>, FetchError>> + Send {
        SensorClient::load_readings(self, token)
    }
}
