use std::io::Read;

use crate::WireError;
use crate::body::Body;
use crate::protocol::{Fields, Method, ProtocolVersion, StatusCode};
use crate::url::AbsoluteUrl;

/// Writes the parts shared by requests and responses.
///
/// Writing the same header twice replaces the earlier value.
pub trait MessageWriter<'a> {
    fn header(&mut self, name: &str, value: &str) -> Result<(), WireError>;

    fn body(&mut self, body: Body<'a>) -> Result<(), WireError>;
}

pub trait RequestWriter<'a>: MessageWriter<'a> {
    fn request_line(&mut self, method: Method, url: &AbsoluteUrl) -> Result<(), WireError>;
}

pub trait ResponseWriter<'a>: MessageWriter<'a> {
    fn status_line(&mut self, code: StatusCode, reason: &str) -> Result<(), WireError>;
}

/// Reads the parts shared by requests and responses.
pub trait MessageReader {
    /// The last value of the named header, looked up case-insensitively.
    fn header(&self, name: &str) -> Option<&str>;

    fn headers(&self) -> Fields;

    /// The body stream. Never absent: an empty stream stands in for a missing
    /// or already released body.
    fn body(&mut self) -> &mut dyn Read;

    /// Releases the underlying body stream. Calling it again has no effect.
    fn close_body(&mut self);
}

pub trait RequestReader: MessageReader {
    /// The method and the request target.
    fn request_line(&self) -> (Method, String);
}

pub trait ResponseReader: MessageReader {
    /// The status code and its reason phrase.
    fn status_line(&self) -> (StatusCode, String);

    fn version(&self) -> ProtocolVersion;
}
