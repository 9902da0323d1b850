//! Cloud Firestore over its REST v1 API.
//!
//! Each [`DocumentStore::create`] is a single `documents:commit` request holding one write:
//! an `update` of a fresh client-generated document id, guarded by `exists = false`, with a
//! `REQUEST_TIME` transform for every [`FieldValue::ServerTimestamp`] field. This is how the
//! Firestore client libraries implement "add with server timestamp" in one round trip.

use crate::io::store::traits::{
    DocumentBody, DocumentStore, ErrorKind, FieldValue, StoreError, StoreResult,
};
use rand::Rng;
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::fmt;
use std::time::Duration;
use tracing::debug;

const PUBLIC_ENDPOINT: &str = "https://firestore.googleapis.com";
const AUTO_ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const AUTO_ID_LEN: usize = 20;

/// Connection settings for [`FirestoreStore`].
#[derive(Clone)]
pub struct FirestoreConfig {
    pub project_id: String,
    pub database: String,
    /// OAuth2 bearer token for the public endpoint.
    pub access_token: Option<String>,
    /// `host:port` of a local emulator. Takes precedence over the public endpoint.
    pub emulator_host: Option<String>,
    pub timeout_secs: u64,
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            database: "(default)".to_string(),
            access_token: None,
            emulator_host: None,
            timeout_secs: 30,
        }
    }
}

impl fmt::Debug for FirestoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FirestoreConfig")
            .field("project_id", &self.project_id)
            .field("database", &self.database)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("emulator_host", &self.emulator_host)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl FirestoreConfig {
    fn base_url(&self) -> String {
        match &self.emulator_host {
            Some(host) if host.starts_with("http://") || host.starts_with("https://") => {
                host.trim_end_matches('/').to_string()
            }
            Some(host) => format!("http://{}", host.trim_end_matches('/')),
            None => PUBLIC_ENDPOINT.to_string(),
        }
    }

    /// The bearer token to send. The emulator accepts the fixed `owner` token.
    fn bearer(&self) -> StoreResult<String> {
        if self.emulator_host.is_some() {
            return Ok(self
                .access_token
                .clone()
                .unwrap_or_else(|| "owner".to_string()));
        }
        match self.access_token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Ok(token.to_string()),
            _ => Err(StoreError::new(
                ErrorKind::Authentication,
                "no access token configured for the Firestore endpoint",
            )),
        }
    }

    /// # Errors
    ///
    /// Returns an error if the project id is empty or no credentials are available.
    pub fn validate(&self) -> StoreResult<()> {
        if self.project_id.trim().is_empty() {
            return Err(StoreError::new(
                ErrorKind::InvalidInput,
                "Firestore project id is empty",
            ));
        }
        if self.database.trim().is_empty() {
            return Err(StoreError::new(
                ErrorKind::InvalidInput,
                "Firestore database id is empty",
            ));
        }
        self.bearer().map(|_| ())
    }
}

/// Blocking Firestore client holding one authenticated HTTP session.
pub struct FirestoreStore {
    client: HttpClient,
    config: FirestoreConfig,
}

impl FirestoreStore {
    /// Build the HTTP session for `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is incomplete or the HTTP client cannot be built.
    pub fn connect(config: FirestoreConfig) -> StoreResult<Self> {
        config.validate()?;
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.bearer()?))
            .map_err(|e| {
                StoreError::new(ErrorKind::Authentication, "access token is not a valid header")
                    .with_source(e.to_string())
            })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| {
                StoreError::new(ErrorKind::Other, "build HTTP client").with_source(e.to_string())
            })?;
        Ok(Self { client, config })
    }

    fn database_path(&self) -> String {
        format!(
            "projects/{}/databases/{}",
            self.config.project_id, self.config.database
        )
    }

    fn commit_url(&self) -> String {
        format!(
            "{}/v1/{}/documents:commit",
            self.config.base_url(),
            self.database_path()
        )
    }
}

impl DocumentStore for FirestoreStore {
    fn create(&self, collection: &str, document: DocumentBody) -> StoreResult<String> {
        let id = auto_id();
        let name = format!("{}/documents/{collection}/{id}", self.database_path());
        let body = commit_body(&name, &document);
        debug!(%name, "committing document");

        let response = self
            .client
            .post(self.commit_url())
            .json(&body)
            .send()
            .map_err(|e| {
                let kind = if e.is_timeout() {
                    ErrorKind::Timeout
                } else {
                    ErrorKind::Network
                };
                StoreError::new(kind, "Firestore request failed").with_source(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .map(|b| b.error.message)
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(StoreError::new(
                kind_for_status(status),
                format!("Firestore commit failed ({status}): {message}"),
            ));
        }
        Ok(id)
    }
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// A 20-character id from the same alphabet the Firestore SDKs use for `add()`.
fn auto_id() -> String {
    let mut rng = rand::rng();
    (0..AUTO_ID_LEN)
        .map(|_| AUTO_ID_ALPHABET[rng.random_range(0..AUTO_ID_ALPHABET.len())] as char)
        .collect()
}

fn kind_for_status(status: StatusCode) -> ErrorKind {
    match status {
        StatusCode::UNAUTHORIZED => ErrorKind::Authentication,
        StatusCode::FORBIDDEN => ErrorKind::Authorization,
        StatusCode::NOT_FOUND => ErrorKind::NotFound,
        StatusCode::CONFLICT => ErrorKind::AlreadyExists,
        StatusCode::BAD_REQUEST => ErrorKind::InvalidInput,
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ErrorKind::Timeout,
        StatusCode::TOO_MANY_REQUESTS => ErrorKind::RateLimited,
        StatusCode::SERVICE_UNAVAILABLE => ErrorKind::ServiceUnavailable,
        s if s.is_server_error() => ErrorKind::InternalError,
        _ => ErrorKind::Other,
    }
}

fn commit_body(name: &str, document: &DocumentBody) -> Value {
    let mut fields = Map::new();
    let mut transforms = Vec::new();
    for (key, value) in document {
        if *value == FieldValue::ServerTimestamp {
            transforms.push(json!({
                "fieldPath": field_path(key),
                "setToServerValue": "REQUEST_TIME",
            }));
        } else {
            fields.insert(key.clone(), encode_value(value));
        }
    }
    json!({
        "writes": [{
            "update": { "name": name, "fields": fields },
            "currentDocument": { "exists": false },
            "updateTransforms": transforms,
        }]
    })
}

/// Field paths that are not plain identifiers must be backtick-quoted.
fn field_path(key: &str) -> String {
    let simple = key
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if simple {
        key.to_string()
    } else {
        format!("`{}`", key.replace('\\', "\\\\").replace('`', "\\`"))
    }
}

fn encode_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::String(s) => json!({ "stringValue": s }),
        FieldValue::Bool(b) => json!({ "booleanValue": b }),
        FieldValue::Array(items) => {
            json!({ "arrayValue": { "values": items.iter().map(encode_value).collect::<Vec<_>>() } })
        }
        FieldValue::Map(entries) => {
            let fields: Map<String, Value> = entries
                .iter()
                .map(|(k, v)| (k.clone(), encode_value(v)))
                .collect();
            json!({ "mapValue": { "fields": fields } })
        }
        // nested server timestamps are not expressible as a top-level transform
        FieldValue::ServerTimestamp => json!({ "nullValue": null }),
    }
}
