//! Earthdata login session.

use std::fmt;

/// Environment variable holding an Earthdata Login bearer token.
pub const TOKEN_ENV_VAR: &str = "EARTHDATA_TOKEN";

/// Authenticated handle to Earthdata, shared read-only across requests.
///
/// The token is obtained out of band (Earthdata Login user profile) and is
/// never logged.
#[derive(Clone, Default)]
pub struct EarthdataSession {
    token: Option<String>,
}

impl EarthdataSession {
    pub fn with_token(token: impl Into<String>) -> Self {
        let token = token.into();
        let token = token.trim();
        Self {
            token: (!token.is_empty()).then(|| token.to_string()),
        }
    }

    /// Session without credentials. Searches still work, downloads will not.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Read the token from `EARTHDATA_TOKEN`, falling back to anonymous.
    pub fn from_env() -> Self {
        std::env::var(TOKEN_ENV_VAR)
            .map(Self::with_token)
            .unwrap_or_default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub(crate) fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

impl fmt::Debug for EarthdataSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EarthdataSession")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
