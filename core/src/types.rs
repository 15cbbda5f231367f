//! Wire envelopes exchanged with the store.
//!
//! # Design
//! `code` is required so an arbitrary JSON object is not mistaken for
//! success. `msg` and `data` default to empty, whether absent or `null`: the
//! store leaves `data` out of failure envelopes.

use serde::{Deserialize, Deserializer, Serialize};

/// Reads a string field, mapping `null` to the empty string.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Envelope returned by `GET /get`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GetResponse {
    pub code: u32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub msg: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: String,
}

/// Envelope returned by `POST /set`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SetResponse {
    pub code: u32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub msg: String,
}

/// Body of `POST /set`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SetRequest {
    pub key: String,
    pub value: String,
}
