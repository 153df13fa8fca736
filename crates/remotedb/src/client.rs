//! HTTP lookup client for the remote user database
//!
//! One GET per lookup against `{base}/authenticate`, with connect and total
//! timeouts both bounded by the configured number of seconds. The response
//! must be a JSON object with string fields `password` and `vlan`; any other
//! shape is rejected without producing a partial result.

use crate::config::RemoteDbConfig;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum RemoteDbError {
    #[error("HTTP client setup error: {0}")]
    Client(String),
    #[error("Could not connect to remote database: {0}")]
    Connect(String),
    #[error("Remote database request timed out: {0}")]
    Timeout(String),
    #[error("HTTP transport error: {0}")]
    Transport(String),
    #[error("Failed to read response body: {0}")]
    Body(String),
    #[error("Invalid JSON in response: {0}")]
    InvalidJson(String),
    #[error("Response is not a JSON object")]
    NotAnObject,
    #[error("Missing or non-string field in response: {0}")]
    MissingField(&'static str),
}

impl RemoteDbError {
    /// Connect failures and timeouts are logged with an extra diagnostic
    /// line; the outward failure signal is the same for all variants.
    pub fn is_connect_or_timeout(&self) -> bool {
        matches!(self, RemoteDbError::Connect(_) | RemoteDbError::Timeout(_))
    }
}

/// User entry returned by the remote database
///
/// Ephemeral: lives only for the duration of the lookup that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEntry {
    /// NT password hash for the user
    pub password: String,
    /// VLAN identifier to assign to the session
    pub vlan: String,
}

/// HTTP client for the remote user database
///
/// Holds a shared `reqwest::Client` configured with the module timeouts.
/// Safe to share across concurrently dispatched requests.
pub struct RemoteDbClient {
    config: RemoteDbConfig,
    client: reqwest::Client,
}

impl RemoteDbClient {
    /// Create a new lookup client from a validated configuration
    pub fn new(config: RemoteDbConfig) -> Result<Self, RemoteDbError> {
        let timeout = Duration::from_secs(config.timeout);
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteDbError::Client(e.to_string()))?;

        Ok(RemoteDbClient { config, client })
    }

    /// Build the lookup URI for a username and calling station
    ///
    /// The interpolated values are deliberately not URI-encoded, matching the
    /// query contract of existing remote database deployments.
    pub fn lookup_uri(&self, username: &str, mac: &str) -> String {
        format!(
            "{}/authenticate?login={}&mac={}",
            self.config.endpoint(),
            username,
            mac
        )
    }

    /// Fetch the user entry for a username and calling station
    pub async fn fetch(&self, username: &str, mac: &str) -> Result<UserEntry, RemoteDbError> {
        let uri = self.lookup_uri(username, mac);
        debug!(uri = %uri, "Calling remote database");

        let response = self
            .client
            .get(&uri)
            .send()
            .await
            .map_err(classify_transport_error)?;

        // The HTTP status is not inspected; the body decides.
        let body = response
            .text()
            .await
            .map_err(|e| RemoteDbError::Body(e.to_string()))?;

        parse_entry(&body)
    }
}

fn classify_transport_error(error: reqwest::Error) -> RemoteDbError {
    if error.is_timeout() {
        RemoteDbError::Timeout(error.to_string())
    } else if error.is_connect() {
        RemoteDbError::Connect(error.to_string())
    } else {
        RemoteDbError::Transport(error.to_string())
    }
}

/// Parse a response body into a user entry
///
/// Requires a JSON object with string fields `password` and `vlan`.
fn parse_entry(body: &str) -> Result<UserEntry, RemoteDbError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| RemoteDbError::InvalidJson(e.to_string()))?;

    let object = value.as_object().ok_or(RemoteDbError::NotAnObject)?;

    let vlan = object
        .get("vlan")
        .and_then(Value::as_str)
        .ok_or(RemoteDbError::MissingField("vlan"))?;

    let password = object
        .get("password")
        .and_then(Value::as_str)
        .ok_or(RemoteDbError::MissingField("password"))?;

    Ok(UserEntry {
        password: password.to_string(),
        vlan: vlan.to_string(),
    })
}
