//! Request builders writing the body.
//!
//! Buffered content (bytes, text, JSON) goes out with a `Content-Length`
//! header; streamed content does not.

use std::io::Read;

use bytes::Bytes;
use micro_wire::body::{BodySerializer, ByteBody, JsonBody, StreamingBody, StringBody, write_body};
use micro_wire::protocol::RequestBuilder;
use serde::Serialize;

/// Writes whatever the serializer produces.
pub fn body<'a, S>(serializer: S) -> RequestBuilder<'a>
where
    S: BodySerializer<'a> + Send + Sync + 'a,
{
    RequestBuilder::new(move |writer| write_body(writer, &serializer))
}

pub fn bytes<'a>(content: impl Into<Bytes>) -> RequestBuilder<'a> {
    body(ByteBody::new(content))
}

pub fn text<'a>(content: impl Into<String>) -> RequestBuilder<'a> {
    body(StringBody::new(content))
}

/// Serializes the value as JSON each time the request is built.
pub fn json<'a, T>(value: T) -> RequestBuilder<'a>
where
    T: Serialize + Send + Sync + 'a,
{
    body(JsonBody(value))
}

/// Streams the reader as body. The reader is consumed by the first build;
/// building again fails.
pub fn stream<'a, R>(reader: R) -> RequestBuilder<'a>
where
    R: Read + Send + 'a,
{
    body(StreamingBody::new(reader))
}
