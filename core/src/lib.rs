//! Blocking client for the clavis key-value secret store.
//!
//! # Overview
//! The store speaks a tiny HTTP+JSON protocol: `GET /get?key=..` and
//! `POST /set`, both authenticated with a bearer token, both answering with a
//! `{code, msg, ..}` envelope where `code == 0` means success.
//!
//! # Design
//! - `ClavisClient` builds `HttpRequest` values and parses `HttpResponse`
//!   values without touching the network (host-does-IO pattern).
//! - `Clavis` pairs a `ClavisClient` with a pooled `ureq::Agent` and performs
//!   one blocking round-trip per call. Nothing is retried or cached.
//! - Configuration is an explicit `ClavisConfig`; reading `CLAVIS_URL` and
//!   `CLAVIS_TOKEN` from the environment is one way to build it.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::{Clavis, ClavisClient};
pub use config::ClavisConfig;
pub use error::ClavisError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{GetResponse, SetRequest, SetResponse};
