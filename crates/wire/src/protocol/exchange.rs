//! The stop-at-first-error composition algebra.
//!
//! A [`RequestBuilder`] writes part of a request and a [`ResponseHandler`]
//! reads part of a response. Composing several of either kind runs them in
//! order and returns the first error, skipping everything after it. The
//! composite is again a builder (or handler), so compositions nest freely.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::WireError;
use crate::protocol::{RequestWriter, ResponseReader};

type BuildFn<'a> = dyn Fn(&mut dyn RequestWriter<'a>) -> Result<(), WireError> + Send + Sync + 'a;

type HandleFn<'h> = dyn FnMut(&mut dyn ResponseReader) -> Result<(), WireError> + 'h;

/// Writes some part of a request: a header, the request line, the body...
///
/// Builders are cheap to clone and can be shared across threads.
#[derive(Clone)]
pub struct RequestBuilder<'a> {
    f: Arc<BuildFn<'a>>,
}

impl<'a> RequestBuilder<'a> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut dyn RequestWriter<'a>) -> Result<(), WireError> + Send + Sync + 'a,
    {
        Self { f: Arc::new(f) }
    }

    pub fn build(&self, writer: &mut dyn RequestWriter<'a>) -> Result<(), WireError> {
        (self.f)(writer)
    }

    /// Runs the builders in order, stopping at the first error.
    pub fn compose<I>(builders: I) -> Self
    where
        I: IntoIterator<Item = RequestBuilder<'a>>,
    {
        let builders: Vec<_> = builders.into_iter().collect();
        Self::new(move |writer| {
            for builder in &builders {
                builder.build(writer)?;
            }
            Ok(())
        })
    }

    pub fn and_then(self, next: RequestBuilder<'a>) -> Self {
        Self::compose([self, next])
    }
}

impl Debug for RequestBuilder<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestBuilder").finish_non_exhaustive()
    }
}

/// Reads some part of a response: checks the status, decodes the body...
pub struct ResponseHandler<'h> {
    f: Box<HandleFn<'h>>,
}

impl<'h> ResponseHandler<'h> {
    pub fn new<F>(f: F) -> Self
    where
        F: FnMut(&mut dyn ResponseReader) -> Result<(), WireError> + 'h,
    {
        Self { f: Box::new(f) }
    }

    pub fn handle(&mut self, reader: &mut dyn ResponseReader) -> Result<(), WireError> {
        (self.f)(reader)
    }

    /// Runs the handlers in order, stopping at the first error.
    pub fn compose<I>(handlers: I) -> Self
    where
        I: IntoIterator<Item = ResponseHandler<'h>>,
    {
        let mut handlers: Vec<_> = handlers.into_iter().collect();
        Self::new(move |reader| {
            for handler in &mut handlers {
                handler.handle(reader)?;
            }
            Ok(())
        })
    }

    pub fn and_then(self, next: ResponseHandler<'h>) -> Self {
        Self::compose([self, next])
    }
}

impl Debug for ResponseHandler<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseHandler").finish_non_exhaustive()
    }
}

/// Performs an exchange: builds the request, sends it and hands back a
/// reader over the response.
///
/// Implementations must not keep per-call mutable state, so one sender can
/// serve concurrent exchanges.
pub trait Sender {
    fn send<'a>(&self, builder: &RequestBuilder<'a>) -> Result<Box<dyn ResponseReader>, WireError>;
}

impl<S: Sender + ?Sized> Sender for &S {
    fn send<'a>(&self, builder: &RequestBuilder<'a>) -> Result<Box<dyn ResponseReader>, WireError> {
        (**self).send(builder)
    }
}

impl<S: Sender + ?Sized> Sender for Arc<S> {
    fn send<'a>(&self, builder: &RequestBuilder<'a>) -> Result<Box<dyn ResponseReader>, WireError> {
        (**self).send(builder)
    }
}
