//! Bearer-credential gate in front of the RPC surface.

use std::sync::Arc;

use crate::validator::{Identity, SessionValidator};

const BEARER_PREFIX: &str = "Bearer ";

/// Authenticates an `Authorization` header value against the external
/// session validator.
///
/// Every RPC entry point calls [`IdentityGate::authenticate`] exactly once
/// before touching entity state; the response status is derived from the
/// outcome, independent of the business result.
#[derive(Clone)]
pub struct IdentityGate {
    validator: Arc<dyn SessionValidator>,
}

impl IdentityGate {
    #[must_use]
    pub fn new(validator: Arc<dyn SessionValidator>) -> Self {
        Self { validator }
    }

    /// Resolves an optional header value to a principal.
    ///
    /// Strips the bearer prefix when present and forwards the remainder to
    /// the validator. An absent header or invalid credential yields `None`,
    /// never an error.
    pub async fn authenticate(&self, header: Option<&str>) -> Option<Identity> {
        let token = header?.strip_prefix(BEARER_PREFIX).unwrap_or(header?);
        self.validator.validate(token).await
    }
}
