//! # Security Module
//!
//! Identity plumbing consumed by the auth middleware. Token parsing and
//! verification belong to the caller; by the time a request is dispatched
//! its context either carries claims or it doesn't.
//!
//! - [`AuthPredicate`] answers "is this caller authenticated?" from the context.
//! - [`ClaimsExtractor`] produces the caller's [`RoleClaims`].
//! - [`TokenPayload`] is the stock claims shape; any type implementing
//!   [`RoleClaims`] works with the authorization gate.
//!
//! ```rust
//! use exactmux::security::{claims_in_context, context_contains, TokenPayload};
//! use std::sync::Arc;
//!
//! let is_authenticated = context_contains::<Arc<TokenPayload>>();
//! let claims = claims_in_context::<TokenPayload>();
//! ```

mod claims;

pub use claims::{
    claims_in_context, context_contains, AuthPredicate, ClaimsExtractor, RoleClaims, TokenPayload,
};
