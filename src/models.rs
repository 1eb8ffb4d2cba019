//! Data models shared by the login and graph screens.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::FetchError;

// ---

/// Username and password as typed into the login form.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    // ---
    pub username: String,
    pub password: String,
}

impl Credentials {
    // ---
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"****")
            .finish()
    }
}

/// Opaque bearer token issued by the server on a successful login.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    // ---
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionToken(<{} chars>)", self.0.len())
    }
}

/// Body of `POST /login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    // ---
    pub username: &'a str,
    pub password: &'a str,
}

/// Success body of `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    // ---
    pub token: String,
}

/// Failure body of `POST /login`. Every field is optional on the wire.
#[derive(Debug, Default, Deserialize)]
pub struct LoginErrorBody {
    // ---
    #[serde(default)]
    pub message: Option<String>,
}

/// One timestamped reading from `GET /dados-sensores`.
///
/// Fields beyond the three the dashboard plots are kept in `extra` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    // ---
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub temperatura: f64,
    pub umidade: f64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SensorReading {
    // ---
    pub fn new(timestamp: DateTime<Utc>, temperatura: f64, umidade: f64) -> Self {
        Self {
            timestamp,
            temperatura,
            umidade,
            extra: serde_json::Map::new(),
        }
    }
}

/// Decode a sensor payload, rejecting it whole if any element is malformed.
pub fn decode_readings(body: &[u8]) -> Result<Vec<SensorReading>, FetchError> {
    // ---
    Ok(serde_json::from_slice(body)?)
}

/// Offset-carrying forms tried after RFC 3339. A trailing `Z` is rewritten
/// to `+00:00` before these run.
const OFFSET_FORMATS: [&str; 8] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%z",
    "%Y-%m-%d %H:%M%:z",
];

/// Forms without an offset; read as UTC.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    // ---
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid ISO-8601 timestamp '{raw}'"))
    })
}

/// Parse the ISO-8601 shapes sensor servers emit: `T` or space separator,
/// optional seconds and fraction, `Z` / `+hh:mm` / `+hhmm` or no offset
/// (UTC), or a bare date (midnight UTC).
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    // ---
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    let zulu = raw
        .strip_suffix('Z')
        .or_else(|| raw.strip_suffix('z'))
        .map(|rest| format!("{rest}+00:00"));
    let with_offset = zulu.as_deref().unwrap_or(raw);

    if let Some(ts) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(with_offset, fmt).ok())
    {
        return Some(ts.with_timezone(&Utc));
    }

    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_decode_keeps_server_order_and_extra_fields() {
        // ---
        let body = br#"[
            {"timestamp": "2025-03-26T18:45:00Z", "temperatura": 22.5, "umidade": 48, "sensor": "sala"},
            {"timestamp": "2025-03-26T17:00:00.000Z", "temperatura": 21, "umidade": 50.5}
        ]"#;

        let readings = decode_readings(body).unwrap();

        assert_eq!(readings.len(), 2);
        assert_eq!(
            readings[0].timestamp,
            Utc.with_ymd_and_hms(2025, 3, 26, 18, 45, 0).unwrap()
        );
        assert_eq!(readings[0].temperatura, 22.5);
        assert_eq!(readings[0].umidade, 48.0);
        assert_eq!(readings[0].extra["sensor"], "sala");
        assert_eq!(readings[1].timestamp.hour(), 17);
        assert!(readings[1].extra.is_empty());
    }

    #[test]
    fn test_decode_converts_offsets_to_utc() {
        // ---
        let body = br#"[{"timestamp": "2025-03-26T15:45:00-03:00", "temperatura": 1, "umidade": 2}]"#;
        let readings = decode_readings(body).unwrap();
        assert_eq!(readings[0].timestamp.hour(), 18);
    }

    #[test]
    fn test_decode_accepts_timestamp_without_offset_as_utc() {
        // ---
        let body = br#"[{"timestamp": "2025-03-26T18:45:00", "temperatura": 1, "umidade": 2}]"#;
        let readings = decode_readings(body).unwrap();
        assert_eq!(
            readings[0].timestamp,
            Utc.with_ymd_and_hms(2025, 3, 26, 18, 45, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_timestamp_iso_variants() {
        // ---
        let expected = Utc.with_ymd_and_hms(2025, 3, 26, 18, 45, 0).unwrap();

        let cases = [
            "2025-03-26T18:45:00Z",
            "2025-03-26T18:45:00.000Z",
            "2025-03-26T21:45:00+0300",
            "2025-03-26T21:45:00+03:00",
            "2025-03-26 18:45:00",
            "2025-03-26 18:45:00.250",
            "2025-03-26 15:45:00-03:00",
            "2025-03-26 15:45:00-0300",
            "2025-03-26T18:45Z",
            "2025-03-26T18:45",
            "2025-03-26 18:45",
            "2025-03-26T21:45+03:00",
            "2025-03-26T21:45+0300",
        ];

        for raw in cases {
            let parsed = parse_timestamp(raw);
            assert!(parsed.is_some(), "{raw} should parse");
            let parsed = parsed.unwrap();
            assert_eq!(
                parsed.timestamp(),
                expected.timestamp(),
                "{raw} parsed as {parsed}"
            );
        }

        // Date-only is midnight UTC
        assert_eq!(
            parse_timestamp("2025-03-26"),
            Some(Utc.with_ymd_and_hms(2025, 3, 26, 0, 0, 0).unwrap())
        );

        assert_eq!(parse_timestamp("26/03/2025 18:45"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn test_decode_mixed_timestamp_forms_keeps_every_reading() {
        // ---
        let body = br#"[
            {"timestamp": "2025-03-26T18:45:00Z", "temperatura": 20, "umidade": 50},
            {"timestamp": "2025-03-26T18:45Z", "temperatura": 21, "umidade": 51},
            {"timestamp": "2025-03-26 18:45:00", "temperatura": 22, "umidade": 52}
        ]"#;

        let readings = decode_readings(body).unwrap();

        assert_eq!(readings.len(), 3);
        assert!(readings.iter().all(|r| r.timestamp == readings[0].timestamp));
    }

    #[test]
    fn test_decode_rejects_malformed_payloads() {
        // ---
        // Not an array
        assert!(decode_readings(br#"{"results": []}"#).is_err());

        // Missing field
        assert!(decode_readings(br#"[{"timestamp": "2025-03-26T18:45:00Z", "temperatura": 1}]"#).is_err());

        // Wrong type
        assert!(decode_readings(
            br#"[{"timestamp": "2025-03-26T18:45:00Z", "temperatura": "hot", "umidade": 2}]"#
        )
        .is_err());

        // Unparseable timestamp
        assert!(decode_readings(br#"[{"timestamp": "yesterday", "temperatura": 1, "umidade": 2}]"#).is_err());

        // Not JSON at all
        assert!(decode_readings(b"<html>502 Bad Gateway</html>").is_err());
    }

    #[test]
    fn test_decode_empty_array() {
        // ---
        assert!(decode_readings(b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_secrets_are_not_debug_printed() {
        // ---
        let creds = Credentials::new("ana", "hunter2");
        let token = SessionToken::new("eyJhbGciOi");

        assert!(!format!("{creds:?}").contains("hunter2"));
        assert!(!format!("{token:?}").contains("eyJ"));
    }
}
