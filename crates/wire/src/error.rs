use std::error::Error;
use std::io;
use thiserror::Error;

use crate::url::UrlError;

/// Opaque error raised by a [`Transport`](crate::sender::Transport).
pub type TransportError = Box<dyn Error + Send + Sync>;

/// Every failure that can surface while building, sending or handling a message.
///
/// The first error raised inside an exchange stops all further work and is
/// returned as is, so callers can branch on the variant.
#[derive(Error, Debug)]
pub enum WireError {
    #[error("url error: {source}")]
    Url {
        #[from]
        source: UrlError,
    },

    #[error("nil argument: {what}")]
    NilArgument { what: String },

    #[error("unexpected response: {reason}")]
    UnexpectedResponse { reason: String },

    #[error("invalid header: {reason}")]
    InvalidHeader { reason: String },

    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("invalid status code: {code}")]
    InvalidStatusCode { code: u16 },

    #[error("unparsable protocol version: {input:?}")]
    UnparsableProtocolVersion { input: String },

    #[error("invalid body: {reason}")]
    InvalidBody { reason: String },

    #[error("serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    #[error("transport error: {source}")]
    Transport { source: TransportError },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl WireError {
    pub fn nil_argument<S: ToString>(what: S) -> Self {
        Self::NilArgument { what: what.to_string() }
    }

    pub fn unexpected_response<S: ToString>(str: S) -> Self {
        Self::UnexpectedResponse { reason: str.to_string() }
    }

    pub fn invalid_header<S: ToString>(str: S) -> Self {
        Self::InvalidHeader { reason: str.to_string() }
    }

    pub fn invalid_request<S: ToString>(str: S) -> Self {
        Self::InvalidRequest { reason: str.to_string() }
    }

    pub fn invalid_status_code(code: u16) -> Self {
        Self::InvalidStatusCode { code }
    }

    pub fn unparsable_protocol_version<S: ToString>(input: S) -> Self {
        Self::UnparsableProtocolVersion { input: input.to_string() }
    }

    pub fn invalid_body<S: ToString>(str: S) -> Self {
        Self::InvalidBody { reason: str.to_string() }
    }

    pub fn transport<E: Into<TransportError>>(e: E) -> Self {
        Self::Transport { source: e.into() }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_errors_convert() {
        let error: WireError = UrlError::invalid_port("70000").into();
        assert!(matches!(error, WireError::Url { source: UrlError::InvalidPort { .. } }));
    }

    #[test]
    fn transport_error_keeps_message() {
        let error = WireError::transport("connection refused");
        assert_eq!(error.to_string(), "transport error: connection refused");
    }

    #[test]
    fn nil_argument_names_the_argument() {
        let error = WireError::nil_argument("response handler");
        assert_eq!(error.to_string(), "nil argument: response handler");
    }
}
