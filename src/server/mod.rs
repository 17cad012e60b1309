//! # Server Types
//!
//! The request descriptor and response sink that sit at the dispatch
//! boundary. The network listener itself is someone else's job: a server
//! adapter converts its native request into a [`Request`], hands the router a
//! [`ResponseWriter`], and flushes whatever was written.
//!
//! [`HandlerResponse`] is the buffered writer used by `Router::dispatch` and
//! throughout the tests.

pub mod request;
pub mod response;

pub use request::{Request, RequestId, REQUEST_ID_HEADER};
pub use response::{HandlerResponse, ResponseWriter};
