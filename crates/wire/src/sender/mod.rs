//! The reference [`Sender`] and the transport seam below it.
//!
//! # Architecture
//!
//! [`HttpSender`] runs one exchange per call:
//!
//! 1. a fresh [`RequestBuffer`] receives everything the request builder writes
//! 2. the buffer becomes an [`http::Request`]
//! 3. a [`Transport`] turns it into an [`http::Response`]
//! 4. the response is wrapped into an [`HttpResponseReader`]
//!
//! The first failing step ends the exchange. Any synchronous
//! request-in/response-out function can serve as the transport through
//! [`transport_fn`]; [`Loopback`] answers in-process with a
//! [`RequestHandler`].

mod loopback;
mod request_buffer;
mod response_reader;

pub use loopback::{HttpRequestReader, Loopback, RequestHandler, ResponseBuffer};
pub use request_buffer::RequestBuffer;
pub use response_reader::HttpResponseReader;

use http::{Request, Response};
use tracing::{debug, warn};

use crate::body::Body;
use crate::error::TransportError;
use crate::protocol::{RequestBuilder, ResponseReader, Sender};
use crate::WireError;

/// Moves a request over the wire and returns the response.
pub trait Transport {
    fn round_trip(&self, request: Request<Body<'_>>) -> Result<Response<Body<'static>>, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn round_trip(&self, request: Request<Body<'_>>) -> Result<Response<Body<'static>>, TransportError> {
        (**self).round_trip(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn round_trip(&self, request: Request<Body<'_>>) -> Result<Response<Body<'static>>, TransportError> {
        (**self).round_trip(request)
    }
}

#[derive(Debug)]
pub struct TransportFn<F> {
    f: F,
}

impl<F> Transport for TransportFn<F>
where
    F: Fn(Request<Body<'_>>) -> Result<Response<Body<'static>>, TransportError>,
{
    fn round_trip(&self, request: Request<Body<'_>>) -> Result<Response<Body<'static>>, TransportError> {
        (self.f)(request)
    }
}

pub fn transport_fn<F>(f: F) -> TransportFn<F>
where
    F: Fn(Request<Body<'_>>) -> Result<Response<Body<'static>>, TransportError>,
{
    TransportFn { f }
}

#[derive(Debug, Clone)]
pub struct HttpSender<T> {
    transport: T,
}

impl<T: Transport> HttpSender<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: Transport> Sender for HttpSender<T> {
    fn send<'a>(&self, builder: &RequestBuilder<'a>) -> Result<Box<dyn ResponseReader>, WireError> {
        let mut buffer = RequestBuffer::new();
        builder.build(&mut buffer)?;
        let request = buffer.into_request()?;

        debug!(method = %request.method(), uri = %request.uri(), "send request");
        let response = self.transport.round_trip(request).map_err(|e| {
            warn!(cause = %e, "transport failed");
            WireError::transport(e)
        })?;
        debug!(status = %response.status(), "receive response");

        Ok(Box::new(HttpResponseReader::try_from(response)?))
    }
}
