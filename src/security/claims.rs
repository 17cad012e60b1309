use std::sync::Arc;

use http::Extensions;
use serde::{Deserialize, Serialize};

/// Capability the authorization gate needs from an identity payload.
///
/// Any claims shape can take part in role checks by exposing its roles
/// here; the gate never downcasts to a concrete token type.
pub trait RoleClaims: Send + Sync {
    fn roles(&self) -> &[String];
}

/// Decoded token payload as issued by the auth service.
///
/// Decoding and signature checks happen before dispatch; the payload is
/// then attached to the request context as `Arc<TokenPayload>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    /// Subject id
    pub id: i64,
    /// Expiry as a unix timestamp in seconds
    pub exp: i64,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl TokenPayload {
    /// Parse a payload from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not a valid payload document.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn is_expired(&self, now_unix: i64) -> bool {
        self.exp <= now_unix
    }
}

impl RoleClaims for TokenPayload {
    fn roles(&self) -> &[String] {
        &self.roles
    }
}

/// Context predicate deciding whether a request is authenticated.
pub type AuthPredicate = Arc<dyn Fn(&Extensions) -> bool + Send + Sync>;

/// Context accessor producing the role claims of the caller, if any.
pub type ClaimsExtractor = Arc<dyn Fn(&Extensions) -> Option<Arc<dyn RoleClaims>> + Send + Sync>;

/// Predicate that treats a request as authenticated when the context holds a `T`.
#[must_use]
pub fn context_contains<T>() -> AuthPredicate
where
    T: Send + Sync + 'static,
{
    Arc::new(|ctx: &Extensions| ctx.get::<T>().is_some())
}

/// Extractor that reads an `Arc<T>` stored in the context.
#[must_use]
pub fn claims_in_context<T>() -> ClaimsExtractor
where
    T: RoleClaims + 'static,
{
    Arc::new(|ctx: &Extensions| {
        ctx.get::<Arc<T>>()
            .map(|claims| Arc::clone(claims) as Arc<dyn RoleClaims>)
    })
}
