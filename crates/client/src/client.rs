//! The two-phase exchange: build and send a request, then handle the
//! response.
//!
//! [`Client::request`] composes the request builders and hands them to the
//! [`Sender`], capturing either a response reader or the first error.
//! [`Response::handle`] then returns that error untouched, or runs the
//! response handlers in order and releases the response body exactly once,
//! whichever way handling ends.

use std::fmt::{Debug, Formatter};

use micro_wire::WireError;
use micro_wire::protocol::{RequestBuilder, ResponseHandler, ResponseReader, Sender};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Client<S> {
    sender: S,
}

impl<S: Sender> Client<S> {
    pub fn new(sender: S) -> Self {
        Self { sender }
    }

    pub fn sender(&self) -> &S {
        &self.sender
    }

    /// Builds the request from `builders` and sends it.
    ///
    /// A `None` builder fails the exchange before anything is sent.
    pub fn request<'a, I, B>(&self, builders: I) -> Response
    where
        I: IntoIterator<Item = B>,
        B: Into<Option<RequestBuilder<'a>>>,
    {
        let builders: Option<Vec<RequestBuilder<'a>>> = builders.into_iter().map(Into::into).collect();
        let outcome = match builders {
            Some(builders) => self.sender.send(&RequestBuilder::compose(builders)),
            None => Err(WireError::nil_argument("request builder")),
        };
        Response { outcome }
    }
}

/// The outcome of the request phase: a response to handle or the error that
/// stopped the exchange.
pub struct Response {
    outcome: Result<Box<dyn ResponseReader>, WireError>,
}

impl Response {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Runs the handlers in order, stopping at the first error.
    ///
    /// An error from the request phase is returned without running any
    /// handler. Otherwise the response body is released once the handlers are
    /// done, even if one of them fails or is `None`.
    pub fn handle<'h, I, H>(self, handlers: I) -> Result<(), WireError>
    where
        I: IntoIterator<Item = H>,
        H: Into<Option<ResponseHandler<'h>>>,
    {
        let mut guard = ReleaseGuard { reader: self.outcome? };

        let handlers: Option<Vec<ResponseHandler<'h>>> = handlers.into_iter().map(Into::into).collect();
        let handlers = handlers.ok_or_else(|| WireError::nil_argument("response handler"))?;

        ResponseHandler::compose(handlers).handle(guard.reader.as_mut())
    }

    /// Releases the response without looking at it.
    pub fn finish(self) -> Result<(), WireError> {
        self.handle(Vec::<ResponseHandler<'_>>::new())
    }
}

impl Debug for Response {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.outcome {
            Ok(reader) => f.debug_struct("Response").field("status", &reader.status_line().0).finish(),
            Err(e) => f.debug_struct("Response").field("error", e).finish(),
        }
    }
}

struct ReleaseGuard {
    reader: Box<dyn ResponseReader>,
}

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        debug!("close response body");
        self.reader.close_body();
    }
}
