//! Executes `HttpRequest` values over the network with `ureq`.
//!
//! The agent is expected to hand back 4xx/5xx responses as data: the store's
//! envelope, not the HTTP status, decides success.

use crate::error::ClavisError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Agent with ureq's status-code-as-error behavior disabled.
pub fn default_agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent()
}

/// Perform one round-trip and read the whole body, without a size limit.
///
/// The ureq response, and with it the pooled connection, is released when
/// this function returns, whether or not the body was read successfully.
pub fn execute(agent: &ureq::Agent, req: HttpRequest) -> Result<HttpResponse, ClavisError> {
    tracing::debug!(method = req.method.as_str(), url = %req.path, "clavis request");

    let result = match req.method {
        HttpMethod::Get => {
            let mut builder = agent.get(&req.path);
            for (name, value) in &req.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            builder.call()
        }
        HttpMethod::Post => {
            let mut builder = agent.post(&req.path);
            for (name, value) in &req.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            match req.body {
                Some(body) => builder.send(body.as_bytes()),
                None => builder.send_empty(),
            }
        }
    };
    let mut response = result.map_err(|e| ClavisError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    let body = response
        .body_mut()
        .with_config()
        .limit(u64::MAX)
        .read_to_string()
        .map_err(|e| ClavisError::Io(e.to_string()))?;

    tracing::debug!(status, bytes = body.len(), "clavis response");

    Ok(HttpResponse { status, headers, body })
}
