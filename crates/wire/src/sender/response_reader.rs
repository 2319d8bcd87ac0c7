use std::io::Read;

use http::{HeaderMap, Response};
use tracing::debug;

use crate::WireError;
use crate::body::Body;
use crate::protocol::{Fields, MessageReader, ProtocolVersion, ResponseReader, StatusCode};

/// [`ResponseReader`] over an [`http::Response`].
#[derive(Debug)]
pub struct HttpResponseReader {
    status: StatusCode,
    reason: String,
    version: ProtocolVersion,
    headers: HeaderMap,
    body: Option<Body<'static>>,
}

impl TryFrom<Response<Body<'static>>> for HttpResponseReader {
    type Error = WireError;

    fn try_from(response: Response<Body<'static>>) -> Result<Self, Self::Error> {
        let (parts, body) = response.into_parts();
        let status = StatusCode::try_from(parts.status)?;
        let reason = parts.status.canonical_reason().unwrap_or_default().to_owned();
        let version = ProtocolVersion::try_from(parts.version)?;

        Ok(Self { status, reason, version, headers: parts.headers, body: Some(body) })
    }
}

impl MessageReader for HttpResponseReader {
    fn header(&self, name: &str) -> Option<&str> {
        last_header(&self.headers, name)
    }

    fn headers(&self) -> Fields {
        Fields::from_header_map(&self.headers)
    }

    fn body(&mut self) -> &mut dyn Read {
        self.body.get_or_insert_with(Body::empty)
    }

    fn close_body(&mut self) {
        if let Some(body) = self.body.take() {
            debug!(streaming = body.is_streaming(), "release response body");
        }
    }
}

impl ResponseReader for HttpResponseReader {
    fn status_line(&self) -> (StatusCode, String) {
        (self.status, self.reason.clone())
    }

    fn version(&self) -> ProtocolVersion {
        self.version
    }
}

/// The last value of a header, `None` if that value is not visible ASCII.
pub(crate) fn last_header<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers.get_all(name).iter().next_back().and_then(|value| value.to_str().ok())
}
