//! Kroki HTTP client.

use std::time::Duration;
use ureq::Agent;

use crate::consts::GRAPHVIZ_ENDPOINT;
use crate::error::DotError;

/// Create HTTP agent with the specified timeout.
///
/// Status codes are not treated as transport errors so the response body can
/// be reported.
pub(crate) fn create_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}

/// Send a Graphviz source to Kroki and return the rendered image bytes.
///
/// Handles HTTP errors by reading the response body for error details.
pub(crate) fn send_diagram_request(
    agent: &Agent,
    source: &str,
    server_url: &str,
    format: &str,
) -> Result<Vec<u8>, DotError> {
    let url = format!("{server_url}/{GRAPHVIZ_ENDPOINT}/{format}");

    let response = agent
        .post(&url)
        .header("Content-Type", "text/plain")
        .send(source.as_bytes())
        .map_err(|e| DotError::Http(e.to_string()))?;

    let status = response.status().as_u16();
    let mut body = response.into_body();

    if status >= 400 {
        let error_body = body
            .read_to_string()
            .unwrap_or_else(|_| String::from("(unable to read error body)"));
        return Err(DotError::Http(format!("HTTP {status}: {error_body}")));
    }

    body.read_to_vec().map_err(|e| DotError::Http(e.to_string()))
}
