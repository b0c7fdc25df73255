//! Translation of transport outcomes into the error taxonomy.

use crate::platform::error::{ErrorCode, PlatformError};
use crate::platform::ports::{HttpResponse, TransportError};
use crate::task::domain::Platform;

/// Longest response excerpt carried into an error message.
const MAX_BODY_EXCERPT: usize = 200;

/// Wraps a transport failure as the cause of a taxonomy error.
///
/// Timeouts and connection failures become `network_error`; anything else
/// becomes `platform_api_error`.
#[must_use]
pub fn transport_failure(platform: Platform, action: &str, err: TransportError) -> PlatformError {
    let code = match err {
        TransportError::Timeout | TransportError::Connect(_) => ErrorCode::NetworkError,
        TransportError::Other(_) => ErrorCode::PlatformApiError,
    };
    tracing::warn!(%platform, action, error = %err, "platform request failed");
    PlatformError::new(code, format!("failed to {action}"))
        .with_platform(platform.as_str())
        .with_cause(err)
}

/// Maps a non-success status to its taxonomy code.
#[must_use]
pub const fn status_code(status: u16) -> ErrorCode {
    match status {
        401 => ErrorCode::AuthenticationFailed,
        403 => ErrorCode::PermissionDenied,
        404 => ErrorCode::NotFound,
        429 => ErrorCode::RateLimited,
        _ => ErrorCode::PlatformApiError,
    }
}

/// Builds the error for a non-success response.
///
/// `detail` is the platform's own explanation when one could be extracted
/// from the body; otherwise a short excerpt of the raw body is used.
#[must_use]
pub fn status_failure(
    platform: Platform,
    action: &str,
    response: &HttpResponse,
    detail: Option<String>,
) -> PlatformError {
    let code = status_code(response.status);
    let explanation = detail.unwrap_or_else(|| excerpt(&response.body));
    let message = if explanation.is_empty() {
        format!("{action} failed with status {}", response.status)
    } else {
        format!(
            "{action} failed with status {}: {explanation}",
            response.status
        )
    };
    tracing::debug!(%platform, status = response.status, %code, "platform returned failure status");
    PlatformError::new(code, message).with_platform(platform.as_str())
}

/// Builds the error for a response body that could not be decoded.
#[must_use]
pub fn decode_failure(platform: Platform, action: &str, err: serde_json::Error) -> PlatformError {
    PlatformError::api(format!("failed to decode {action} response"))
        .with_platform(platform.as_str())
        .with_cause(err)
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    trimmed
        .char_indices()
        .nth(MAX_BODY_EXCERPT)
        .map_or_else(|| trimmed.to_owned(), |(end, _)| format!("{}...", trimmed.get(..end).unwrap_or(trimmed)))
}
