//! Error taxonomy shared by every platform adapter.
//!
//! Adapter failures cross the [`PlatformClient`](super::ports::PlatformClient)
//! boundary only as [`PlatformError`]. Transport and decoding failures are
//! attached as the error's cause and never returned directly. Callers branch
//! on [`ErrorCode`]; two errors with the same code compare equal regardless
//! of message, platform, task or cause.

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Result type returned across the platform boundary.
pub type PlatformResult<T> = Result<T, PlatformError>;

/// Shared, cloneable error cause.
pub type ErrorCause = Arc<dyn StdError + Send + Sync>;

/// Closed set of failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Credentials were rejected.
    AuthenticationFailed,
    /// The requested entity does not exist.
    NotFound,
    /// The caller supplied incomplete or malformed input.
    InvalidInput,
    /// The platform returned an unexpected failure.
    PlatformApiError,
    /// Concurrent modification detected.
    SyncConflict,
    /// No adapter is registered for the requested platform type.
    PlatformNotSupported,
    /// Adapter configuration is missing or malformed.
    InvalidConfig,
    /// The platform throttled the request.
    RateLimited,
    /// The credentials lack the required permission.
    PermissionDenied,
    /// The request never completed (connection, timeout, cancellation).
    NetworkError,
}

impl ErrorCode {
    /// Returns the stable wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AuthenticationFailed => "authentication_failed",
            Self::NotFound => "not_found",
            Self::InvalidInput => "invalid_input",
            Self::PlatformApiError => "platform_api_error",
            Self::SyncConflict => "sync_conflict",
            Self::PlatformNotSupported => "platform_not_supported",
            Self::InvalidConfig => "invalid_config",
            Self::RateLimited => "rate_limited",
            Self::PermissionDenied => "permission_denied",
            Self::NetworkError => "network_error",
        }
    }

    /// Returns the message used when a failure carries no specific text.
    #[must_use]
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::AuthenticationFailed => "Authentication failed",
            Self::NotFound => "Resource not found",
            Self::InvalidInput => "Invalid input provided",
            Self::PlatformApiError => "Platform API error",
            Self::SyncConflict => "Synchronization conflict",
            Self::PlatformNotSupported => "Platform not supported",
            Self::InvalidConfig => "Invalid configuration",
            Self::RateLimited => "Rate limit exceeded",
            Self::PermissionDenied => "Permission denied",
            Self::NetworkError => "Network error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured platform failure.
#[derive(Debug, Clone)]
pub struct PlatformError {
    code: ErrorCode,
    message: String,
    platform: Option<String>,
    task_id: Option<String>,
    cause: Option<ErrorCause>,
}

impl PlatformError {
    /// Creates an error with an explicit message.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            platform: None,
            task_id: None,
            cause: None,
        }
    }

    /// Creates an error carrying the code's default message.
    #[must_use]
    pub fn from_code(code: ErrorCode) -> Self {
        Self::new(code, code.default_message())
    }

    /// Shorthand for [`ErrorCode::InvalidInput`].
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Shorthand for [`ErrorCode::InvalidConfig`].
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidConfig, message)
    }

    /// Shorthand for [`ErrorCode::NotFound`] carrying the requested id.
    #[must_use]
    pub fn not_found(task_id: impl Into<String>) -> Self {
        Self::from_code(ErrorCode::NotFound).with_task_id(task_id)
    }

    /// Shorthand for [`ErrorCode::PlatformApiError`].
    #[must_use]
    pub fn api(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PlatformApiError, message)
    }

    /// Shorthand for [`ErrorCode::NetworkError`].
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NetworkError, message)
    }

    /// Tags the originating platform. Empty values are ignored.
    #[must_use]
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = non_empty(platform.into());
        self
    }

    /// Tags the task the failure concerns. Empty values are ignored.
    #[must_use]
    pub fn with_task_id(mut self, task_id: impl Into<String>) -> Self {
        self.task_id = non_empty(task_id.into());
        self
    }

    /// Attaches the underlying failure.
    #[must_use]
    pub fn with_cause(mut self, cause: impl StdError + Send + Sync + 'static) -> Self {
        self.cause = Some(Arc::new(cause));
        self
    }

    /// Attaches an already shared cause.
    #[must_use]
    pub fn with_shared_cause(mut self, cause: ErrorCause) -> Self {
        self.cause = Some(cause);
        self
    }

    /// Returns the failure kind.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the originating platform, if tagged.
    #[must_use]
    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    /// Returns the task identifier, if tagged.
    #[must_use]
    pub fn task_id(&self) -> Option<&str> {
        self.task_id.as_deref()
    }

    /// Returns the wrapped cause, if any.
    #[must_use]
    pub fn cause(&self) -> Option<&ErrorCause> {
        self.cause.as_ref()
    }

    /// Returns whether both errors describe the same kind of failure.
    #[must_use]
    pub fn is(&self, other: &Self) -> bool {
        self.code == other.code
    }

    /// Returns whether this is an authentication failure.
    #[must_use]
    pub fn is_authentication_error(&self) -> bool {
        self.code == ErrorCode::AuthenticationFailed
    }

    /// Returns whether this is a missing-entity failure.
    #[must_use]
    pub fn is_not_found_error(&self) -> bool {
        self.code == ErrorCode::NotFound
    }

    /// Returns whether the platform throttled the request.
    #[must_use]
    pub fn is_rate_limit_error(&self) -> bool {
        self.code == ErrorCode::RateLimited
    }
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(platform) = &self.platform {
            write!(f, " (platform: {platform})")?;
        }
        if let Some(task_id) = &self.task_id {
            write!(f, " (task: {task_id})")?;
        }
        if let Some(cause) = &self.cause {
            write!(f, ": {cause}")?;
        }
        Ok(())
    }
}

impl StdError for PlatformError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn StdError + 'static))
    }
}

impl PartialEq for PlatformError {
    fn eq(&self, other: &Self) -> bool {
        self.is(other)
    }
}

impl Eq for PlatformError {}

impl From<ErrorCode> for PlatformError {
    fn from(code: ErrorCode) -> Self {
        Self::from_code(code)
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}
