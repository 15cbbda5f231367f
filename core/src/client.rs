//! Request builder, envelope parser and blocking client for the store.
//!
//! # Design
//! `ClavisClient` holds only the configuration and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. `Clavis` glues the two halves together around a pooled
//! `ureq::Agent`, issuing exactly one request per call.

use crate::config::ClavisConfig;
use crate::error::ClavisError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport;
use crate::types::{GetResponse, SetRequest, SetResponse};

/// Stateless request builder and response parser.
///
/// Never touches the network; the caller executes the round-trip between
/// `build_*` and `parse_*`.
#[derive(Debug, Clone)]
pub struct ClavisClient {
    config: ClavisConfig,
}

impl ClavisClient {
    pub fn new(config: ClavisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClavisConfig {
        &self.config
    }

    /// `GET {base}/get?key={key}`.
    ///
    /// The key is placed into the query string as-is; callers must pass
    /// query-safe keys.
    pub fn build_get(&self, key: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/get?key={key}", self.config.base_url()),
            headers: vec![self.authorization()],
            body: None,
        }
    }

    /// `POST {base}/set` with a `{"key", "value"}` JSON body.
    pub fn build_set(&self, key: &str, value: &str) -> Result<HttpRequest, ClavisError> {
        let input = SetRequest {
            key: key.to_string(),
            value: value.to_string(),
        };
        let body = serde_json::to_string(&input).map_err(|e| ClavisError::Encode(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/set", self.config.base_url()),
            headers: vec![
                self.authorization(),
                ("content-type".to_string(), "application/json".to_string()),
            ],
            body: Some(body),
        })
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<String, ClavisError> {
        let envelope: GetResponse = decode(&response)?;
        check_code(envelope.code, envelope.msg)?;
        Ok(envelope.data)
    }

    pub fn parse_set(&self, response: HttpResponse) -> Result<(), ClavisError> {
        let envelope: SetResponse = decode(&response)?;
        check_code(envelope.code, envelope.msg)
    }

    fn authorization(&self) -> (String, String) {
        ("Authorization".to_string(), format!("Bearer {}", self.config.token()))
    }
}

/// Decode the envelope. The HTTP status is not consulted.
fn decode<T: serde::de::DeserializeOwned>(response: &HttpResponse) -> Result<T, ClavisError> {
    serde_json::from_str(&response.body).map_err(|e| ClavisError::Decode(e.to_string()))
}

/// Map a nonzero envelope code to `ClavisError::Remote`.
fn check_code(code: u32, msg: String) -> Result<(), ClavisError> {
    if code == 0 {
        return Ok(());
    }
    Err(ClavisError::Remote(msg))
}

/// Blocking client for a clavis store.
///
/// Cheap to clone; clones share the agent's connection pool and may be used
/// from several threads at once.
#[derive(Debug, Clone)]
pub struct Clavis {
    client: ClavisClient,
    agent: ureq::Agent,
}

impl Clavis {
    /// Client configured from `CLAVIS_URL` and `CLAVIS_TOKEN`.
    pub fn from_env() -> Result<Self, ClavisError> {
        Ok(Self::new(ClavisConfig::from_env()?))
    }

    pub fn new(config: ClavisConfig) -> Self {
        Self::with_agent(config, transport::default_agent())
    }

    /// Use a caller-built agent, e.g. one with timeouts or a proxy.
    ///
    /// The agent must be configured with `http_status_as_error(false)`,
    /// otherwise error envelopes sent with a 4xx/5xx status surface as
    /// `Transport` errors instead of `Remote`.
    pub fn with_agent(config: ClavisConfig, agent: ureq::Agent) -> Self {
        Self {
            client: ClavisClient::new(config),
            agent,
        }
    }

    pub fn config(&self) -> &ClavisConfig {
        self.client.config()
    }

    /// Fetch the value stored under `key`.
    pub fn get(&self, key: &str) -> Result<String, ClavisError> {
        let req = self.client.build_get(key);
        let response = transport::execute(&self.agent, req)?;
        self.client.parse_get(response)
    }

    /// Store `value` under `key`.
    pub fn set(&self, key: &str, value: &str) -> Result<(), ClavisError> {
        let req = self.client.build_set(key, value)?;
        let response = transport::execute(&self.agent, req)?;
        self.client.parse_set(response)
    }
}
