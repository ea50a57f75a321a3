//! Credential validation collaborator.

use std::collections::HashMap;

use async_trait::async_trait;

/// An authenticated principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Opaque user id as issued by the users service.
    pub user_id: String,
}

/// External "validate token → identity" lookup.
///
/// An unknown or expired token is an absence, never an error: the RPC
/// surface degrades to its insecure defaults instead of failing.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Resolves a session token to the identity it was issued for.
    async fn validate(&self, token: &str) -> Option<Identity>;
}

/// Token-table validator backed by a fixed map.
///
/// Stands in for the users service in deployments that inject sessions via
/// configuration, and in tests.
#[derive(Debug, Default)]
pub struct StaticSessionValidator {
    tokens: HashMap<String, String>,
}

impl StaticSessionValidator {
    /// Builds a validator from `(token, user id)` pairs.
    #[must_use]
    pub fn new(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            tokens: pairs.into_iter().collect(),
        }
    }

    /// Parses a comma-separated `token=user` spec, the format the server
    /// accepts via configuration. Blank or malformed pairs are skipped.
    #[must_use]
    pub fn from_spec(spec: &str) -> Self {
        Self::new(spec.split(',').filter_map(|pair| {
            let (token, user) = pair.split_once('=')?;
            let (token, user) = (token.trim(), user.trim());
            if token.is_empty() || user.is_empty() {
                return None;
            }
            Some((token.to_owned(), user.to_owned()))
        }))
    }
}

#[async_trait]
impl SessionValidator for StaticSessionValidator {
    async fn validate(&self, token: &str) -> Option<Identity> {
        self.tokens.get(token).map(|user_id| Identity {
            user_id: user_id.clone(),
        })
    }
}
