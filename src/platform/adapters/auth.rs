//! Auth provider serving a fixed token.

use super::SharedClock;
use crate::platform::domain::{AuthToken, RequestContext};
use crate::platform::error::{ErrorCode, PlatformError, PlatformResult};
use crate::platform::ports::AuthProvider;
use async_trait::async_trait;
use mockable::DefaultClock;
use std::sync::{Arc, RwLock};

/// Provider for static API tokens.
///
/// `authenticate` and `refresh_token` hand back the configured token;
/// `revoke_token` marks it unusable for this provider.
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: AuthToken,
    revoked: Arc<RwLock<bool>>,
    clock: SharedClock,
}

impl StaticTokenProvider {
    /// Creates a provider with the system clock.
    #[must_use]
    pub fn new(token: AuthToken) -> Self {
        Self::with_clock(token, Arc::new(DefaultClock))
    }

    /// Creates a provider with an explicit clock.
    #[must_use]
    pub fn with_clock(token: AuthToken, clock: SharedClock) -> Self {
        Self {
            token,
            revoked: Arc::new(RwLock::new(false)),
            clock,
        }
    }

    fn is_revoked(&self) -> bool {
        self.revoked.read().map_or(true, |flag| *flag)
    }

    fn check(&self, token: &AuthToken) -> PlatformResult<()> {
        if token.access_token.trim().is_empty() {
            return Err(PlatformError::new(
                ErrorCode::AuthenticationFailed,
                "access token is empty",
            ));
        }
        if token.is_expired(self.clock.as_ref()) {
            return Err(PlatformError::new(
                ErrorCode::AuthenticationFailed,
                "access token has expired",
            ));
        }
        if self.is_revoked() && token.access_token == self.token.access_token {
            return Err(PlatformError::new(
                ErrorCode::AuthenticationFailed,
                "access token was revoked",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl AuthProvider for StaticTokenProvider {
    async fn authenticate(&self, ctx: &RequestContext) -> PlatformResult<AuthToken> {
        ctx.ensure_active()?;
        self.check(&self.token)?;
        Ok(self.token.clone())
    }

    async fn refresh_token(
        &self,
        ctx: &RequestContext,
        token: &AuthToken,
    ) -> PlatformResult<AuthToken> {
        ctx.ensure_active()?;
        if token.access_token != self.token.access_token {
            return Err(PlatformError::new(
                ErrorCode::AuthenticationFailed,
                "token was not issued by this provider",
            ));
        }
        self.check(&self.token)?;
        Ok(self.token.clone())
    }

    async fn revoke_token(&self, ctx: &RequestContext, token: &AuthToken) -> PlatformResult<()> {
        ctx.ensure_active()?;
        if token.access_token == self.token.access_token {
            let mut flag = self
                .revoked
                .write()
                .map_err(|err| PlatformError::api(err.to_string()))?;
            *flag = true;
        }
        Ok(())
    }

    async fn validate_token(&self, ctx: &RequestContext, token: &AuthToken) -> PlatformResult<()> {
        ctx.ensure_active()?;
        self.check(token)
    }
}
