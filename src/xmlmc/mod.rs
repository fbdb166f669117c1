//! XMLMC method-call transport.
//!
//! Every remote operation is a named method on a service path. Parameters
//! are staged on the client one at a time and sent with the next
//! [`Xmlmc::invoke`]; staging is cleared after each invoke whether or not
//! the call succeeded.

mod client;
#[cfg(test)]
pub(crate) mod testing;

pub use client::XmlmcClient;

use thiserror::Error;

/// Failure to complete a method call at the transport level.
///
/// A call that reaches the server and comes back with a failure status is
/// not a transport error; that is decided by the response classifier.
#[derive(Debug, Error)]
pub enum XmlmcError {
    #[error("no XMLMC endpoint for instance '{instance}': {reason}")]
    EndpointUnavailable { instance: String, reason: String },

    #[error("{method} request to {url} failed: {source}")]
    Http {
        url: String,
        method: String,
        source: ureq::Error,
    },
}

/// The consumed surface of a method-call session.
pub trait Xmlmc {
    /// Stage a parameter for the next invoke. Order is preserved.
    fn set_param(&mut self, name: &str, value: &str);

    /// Send the staged parameters as `service::method` and return the raw
    /// response body.
    fn invoke(&mut self, service: &str, method: &str) -> Result<String, XmlmcError>;
}
