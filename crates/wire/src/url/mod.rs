//! Absolute URLs and the builder that validates them.
//!
//! # Architecture
//!
//! - [`UrlBuilder`]: an immutable-by-value builder accumulating scheme,
//!   `host:port`, path segments and query pairs. Nothing is validated until
//!   [`UrlBuilder::build`] is called.
//! - [`AbsoluteUrl`]: the validated result. It always carries an http(s)
//!   scheme, a host and a port, and renders its wire format with the path and
//!   query escaped exactly once.
//! - [`HostAndPort`]: host and port pair produced by [`HostAndPort::parse`].
//!
//! # Example
//!
//! ```
//! use micro_wire::url::UrlBuilder;
//!
//! let url = UrlBuilder::new()
//!     .http()
//!     .host_and_port(" h:80 ")
//!     .join_path("a b")
//!     .query("k e", "v e")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(url.wire_format(), "http://h:80/a%20b?k+e=v+e");
//! ```

mod absolute_url;
mod builder;
mod host_and_port;

pub use absolute_url::AbsoluteUrl;
pub use builder::UrlBuilder;
pub use host_and_port::{HostAndPort, has_port, is_hostname, parse_port};

use std::fmt::{Display, Formatter};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    #[error("invalid url: {reason}")]
    InvalidUrl { reason: String },

    #[error("invalid hostname: {host:?}")]
    InvalidHostname { host: String },

    #[error("invalid port: {port:?}")]
    InvalidPort { port: String },
}

impl UrlError {
    pub fn invalid_url<S: ToString>(str: S) -> Self {
        Self::InvalidUrl { reason: str.to_string() }
    }

    pub fn invalid_hostname<S: ToString>(host: S) -> Self {
        Self::InvalidHostname { host: host.to_string() }
    }

    pub fn invalid_port<S: ToString>(port: S) -> Self {
        Self::InvalidPort { port: port.to_string() }
    }
}

/// The schemes an [`AbsoluteUrl`] may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    pub fn default_port(self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }

    pub fn is_secure(self) -> bool {
        self == Scheme::Https
    }
}

impl Display for Scheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Port used when a url of the given scheme names none.
pub fn default_port(scheme: Scheme) -> u16 {
    scheme.default_port()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ports() {
        assert_eq!(default_port(Scheme::Http), 80);
        assert_eq!(default_port(Scheme::Https), 443);
    }

    #[test]
    fn scheme_display() {
        assert_eq!(Scheme::Http.to_string(), "http");
        assert_eq!(Scheme::Https.to_string(), "https");
        assert!(Scheme::Https.is_secure());
        assert!(!Scheme::Http.is_secure());
    }
}
