//! Client configuration.
//!
//! # Design
//! `ClavisConfig` is an explicit value handed to `Clavis::new`. The
//! environment is only one source: `from_env` reads `CLAVIS_URL` and
//! `CLAVIS_TOKEN`, while `from_lookup` accepts any name-to-value function so
//! tests never have to mutate the process environment.

use std::fmt;

use crate::error::ClavisError;

/// Environment variable holding the store's base URL.
pub const URL_ENV: &str = "CLAVIS_URL";

/// Environment variable holding the bearer token.
pub const TOKEN_ENV: &str = "CLAVIS_TOKEN";

/// Base URL and bearer token of a clavis store. Immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct ClavisConfig {
    base_url: String,
    token: String,
}

impl ClavisConfig {
    /// Validates both values and strips trailing `/` from `base_url`.
    ///
    /// The URL is checked before the token, so a config missing both reports
    /// the URL.
    pub fn new(base_url: &str, token: &str) -> Result<Self, ClavisError> {
        if base_url.is_empty() {
            return Err(ClavisError::Config(format!("{URL_ENV} is empty")));
        }
        if token.is_empty() {
            return Err(ClavisError::Config(format!("{TOKEN_ENV} is empty")));
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// Builds a config from `CLAVIS_URL` / `CLAVIS_TOKEN` as returned by
    /// `lookup`. A missing value is treated like an empty one.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClavisError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(URL_ENV).unwrap_or_default();
        let token = lookup(TOKEN_ENV).unwrap_or_default();
        Self::new(&base_url, &token)
    }

    /// Builds a config from the process environment.
    pub fn from_env() -> Result<Self, ClavisError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for ClavisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClavisConfig")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}
