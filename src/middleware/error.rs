use std::fmt;

/// Middleware configuration error
///
/// Returned by constructors that validate their inputs up front, so that a
/// bad value is caught at startup instead of on the first request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MiddlewareConfigError {
    /// Redirect target cannot be sent as a `Location` header
    InvalidRedirectUrl {
        /// The rejected URL
        url: String,
    },
    /// An authorization gate was configured without any role
    NoRequiredRoles,
}

impl fmt::Display for MiddlewareConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MiddlewareConfigError::InvalidRedirectUrl { url } => {
                write!(
                    f,
                    "middleware configuration error: redirect URL {:?} is not a valid header value",
                    url
                )
            }
            MiddlewareConfigError::NoRequiredRoles => {
                write!(
                    f,
                    "middleware configuration error: authorization requires at least one role"
                )
            }
        }
    }
}

impl std::error::Error for MiddlewareConfigError {}
