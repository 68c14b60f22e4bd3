//! HTTP helpers shared by the API providers

use math_quorum_application::ports::llm_gateway::GatewayError;
use math_quorum_domain::core::string::truncate;
use math_quorum_domain::is_usable_api_key;
use reqwest::StatusCode;

/// Longest error body quoted in a `RequestFailed` message
const ERROR_BODY_LIMIT: usize = 300;

/// Resolve an API key from the explicit value or the environment variable.
pub fn resolve_api_key(explicit: Option<&str>, env_var: &str) -> Option<String> {
    select_api_key(explicit, std::env::var(env_var).ok())
}

/// The explicit key wins over the environment; placeholders are rejected.
pub(crate) fn select_api_key(explicit: Option<&str>, from_env: Option<String>) -> Option<String> {
    explicit
        .map(str::to_string)
        .or(from_env)
        .map(|key| key.trim().to_string())
        .filter(|key| is_usable_api_key(key))
}

pub(crate) fn map_reqwest_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

/// Map a non-success status and its body to a gateway error.
pub(crate) fn status_error(status: StatusCode, body: &str) -> GatewayError {
    let message = format!(
        "API returned status code {} - {}",
        status.as_u16(),
        truncate(body.trim(), ERROR_BODY_LIMIT)
    );
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            GatewayError::AuthenticationFailed(message)
        }
        _ => GatewayError::RequestFailed(message),
    }
}

/// Send a request and return the body of a successful response.
pub(crate) async fn send_for_body(request: reqwest::RequestBuilder) -> Result<String, GatewayError> {
    let response = request.send().await.map_err(map_reqwest_error)?;
    let status = response.status();
    let body = response.text().await.map_err(map_reqwest_error)?;
    if !status.is_success() {
        return Err(status_error(status, &body));
    }
    Ok(body)
}
