//! Credential-acquisition contract for delegated-token platforms.

use crate::platform::domain::{AuthToken, RequestContext};
use crate::platform::error::PlatformResult;
use async_trait::async_trait;

/// Obtains and manages access tokens.
///
/// Adapters that authenticate with static credentials do not need a
/// provider; backends using delegated flows plug one in at construction.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Acquires a fresh token.
    async fn authenticate(&self, ctx: &RequestContext) -> PlatformResult<AuthToken>;

    /// Exchanges `token` for a renewed one.
    async fn refresh_token(
        &self,
        ctx: &RequestContext,
        token: &AuthToken,
    ) -> PlatformResult<AuthToken>;

    /// Invalidates `token`.
    async fn revoke_token(&self, ctx: &RequestContext, token: &AuthToken) -> PlatformResult<()>;

    /// Confirms `token` is still usable.
    ///
    /// # Errors
    ///
    /// Returns `authentication_failed` when the token is empty or expired.
    async fn validate_token(&self, ctx: &RequestContext, token: &AuthToken)
    -> PlatformResult<()>;
}
