use std::io::Read;

use http::{HeaderMap, Request, Response};
use tracing::{debug, warn};

use crate::WireError;
use crate::body::Body;
use crate::error::TransportError;
use crate::protocol::{
    Fields, MessageReader, MessageWriter, Method, RequestReader, ResponseWriter, StatusCode,
};
use crate::sender::Transport;
use crate::sender::request_buffer::to_header;
use crate::sender::response_reader::last_header;

/// Answers a request on the server side.
pub trait RequestHandler {
    fn handle(&self, request: &mut dyn RequestReader, response: &mut dyn ResponseWriter<'static>) -> Result<(), WireError>;
}

impl<F> RequestHandler for F
where
    F: Fn(&mut dyn RequestReader, &mut dyn ResponseWriter<'static>) -> Result<(), WireError>,
{
    fn handle(&self, request: &mut dyn RequestReader, response: &mut dyn ResponseWriter<'static>) -> Result<(), WireError> {
        self(request, response)
    }
}

/// A [`Transport`] that hands requests to an in-process [`RequestHandler`].
///
/// A failing handler is answered with `500 Internal Server Error` and the
/// error message as body.
#[derive(Debug, Clone)]
pub struct Loopback<H> {
    handler: H,
}

impl<H: RequestHandler> Loopback<H> {
    pub fn new(handler: H) -> Self {
        Self { handler }
    }
}

impl<H: RequestHandler> Transport for Loopback<H> {
    fn round_trip(&self, request: Request<Body<'_>>) -> Result<Response<Body<'static>>, TransportError> {
        let mut reader = HttpRequestReader::buffer(request)?;
        let mut writer = ResponseBuffer::new();

        if let Err(e) = self.handler.handle(&mut reader, &mut writer) {
            warn!(cause = %e, "request handler failed");
            writer = ResponseBuffer::new();
            writer.status_line(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")?;
            writer.body(Body::from(e.to_string()))?;
        }

        Ok(writer.into_response()?)
    }
}

/// [`RequestReader`] over a request whose body has been read into memory.
#[derive(Debug)]
pub struct HttpRequestReader {
    method: Method,
    target: String,
    headers: HeaderMap,
    body: Option<Body<'static>>,
}

impl HttpRequestReader {
    /// Reads the whole request body so the reader no longer borrows from
    /// the request.
    pub fn buffer(request: Request<Body<'_>>) -> Result<Self, WireError> {
        let (parts, body) = request.into_parts();
        let method = Method::try_from(&parts.method)?;
        let content = body.into_bytes()?;
        debug!(%method, uri = %parts.uri, size = content.len(), "buffer request");

        Ok(Self { method, target: parts.uri.to_string(), headers: parts.headers, body: Some(Body::once(content)) })
    }
}

impl MessageReader for HttpRequestReader {
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
        self.body = None;
    }
}

impl RequestReader for HttpRequestReader {
    fn request_line(&self) -> (Method, String) {
        (self.method, self.target.clone())
    }
}

/// Collects what a [`RequestHandler`] writes. The status defaults to
/// `200 OK`.
#[derive(Debug)]
pub struct ResponseBuffer {
    status: StatusCode,
    headers: HeaderMap,
    body: Body<'static>,
}

impl Default for ResponseBuffer {
    fn default() -> Self {
        Self { status: StatusCode::OK, headers: HeaderMap::new(), body: Body::empty() }
    }
}

impl ResponseBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_response(self) -> Result<Response<Body<'static>>, WireError> {
        let status =
            http::StatusCode::try_from(self.status).map_err(|_e| WireError::invalid_status_code(self.status.as_u16()))?;

        let mut response = Response::new(self.body);
        *response.status_mut() = status;
        *response.headers_mut() = self.headers;
        Ok(response)
    }
}

impl MessageWriter<'static> for ResponseBuffer {
    fn header(&mut self, name: &str, value: &str) -> Result<(), WireError> {
        let (name, value) = to_header(name, value)?;
        self.headers.insert(name, value);
        Ok(())
    }

    fn body(&mut self, body: Body<'static>) -> Result<(), WireError> {
        self.body = body;
        Ok(())
    }
}

/// The reason phrase is not carried by [`http::Response`], so only the
/// code is kept.
impl ResponseWriter<'static> for ResponseBuffer {
    fn status_line(&mut self, code: StatusCode, _reason: &str) -> Result<(), WireError> {
        self.status = code;
        Ok(())
    }
}
