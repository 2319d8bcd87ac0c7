//! Message bodies and the codecs producing and consuming them.
//!
//! [`Body`] is what travels between writers, senders and transports. A
//! [`BodySerializer`] turns caller content into a `Body` and tells whether
//! its size is known upfront; [`write_body`] uses that to decide whether a
//! `Content-Length` header goes out. A [`BodyDeserializer`] consumes a
//! response stream without closing it.

mod codec;

pub use codec::{
    BodyDeserializer, BodySerializer, ByteBody, BytesTarget, JsonBody, JsonTarget, StreamingBody, StringBody,
    StringTarget, read_body, read_json_body, write_body,
};

use bytes::{Buf, Bytes};
use std::fmt::{Debug, Formatter};
use std::io::{self, Read};

/// A message body: nothing, a buffer of known size, or an open stream.
pub struct Body<'a> {
    inner: Kind<'a>,
}

enum Kind<'a> {
    Once(Option<Bytes>),
    Stream(Box<dyn Read + Send + 'a>),
}

impl<'a> Body<'a> {
    pub fn empty() -> Self {
        Self { inner: Kind::Once(None) }
    }

    pub fn once(bytes: Bytes) -> Self {
        Self { inner: Kind::Once(Some(bytes)) }
    }

    pub fn stream<R>(reader: R) -> Self
    where
        R: Read + Send + 'a,
    {
        Self { inner: Kind::Stream(Box::new(reader)) }
    }

    pub fn is_streaming(&self) -> bool {
        matches!(self.inner, Kind::Stream(_))
    }

    /// The exact number of bytes left, when known.
    pub fn size_hint(&self) -> Option<u64> {
        match &self.inner {
            Kind::Once(None) => Some(0),
            Kind::Once(Some(bytes)) => Some(bytes.len() as u64),
            Kind::Stream(_) => None,
        }
    }

    /// Drains the body into a single buffer.
    pub fn into_bytes(self) -> io::Result<Bytes> {
        match self.inner {
            Kind::Once(option_bytes) => Ok(option_bytes.unwrap_or_default()),
            Kind::Stream(mut reader) => {
                let mut buf = Vec::new();
                reader.read_to_end(&mut buf)?;
                Ok(Bytes::from(buf))
            }
        }
    }
}

impl Read for Body<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.inner {
            Kind::Once(None) => Ok(0),
            Kind::Once(Some(bytes)) => {
                let n = bytes.len().min(buf.len());
                buf[..n].copy_from_slice(&bytes[..n]);
                bytes.advance(n);
                Ok(n)
            }
            Kind::Stream(reader) => reader.read(buf),
        }
    }
}

impl Default for Body<'_> {
    fn default() -> Self {
        Self::empty()
    }
}

impl Debug for Body<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.inner {
            Kind::Once(option_bytes) => f.debug_tuple("Body::Once").field(option_bytes).finish(),
            Kind::Stream(_) => f.write_str("Body::Stream"),
        }
    }
}

impl From<()> for Body<'_> {
    fn from(_: ()) -> Self {
        Self::empty()
    }
}

impl From<Bytes> for Body<'_> {
    fn from(bytes: Bytes) -> Self {
        Self::once(bytes)
    }
}

impl From<Vec<u8>> for Body<'_> {
    fn from(value: Vec<u8>) -> Self {
        Self::once(Bytes::from(value))
    }
}

impl From<String> for Body<'_> {
    fn from(value: String) -> Self {
        Self::once(Bytes::from(value))
    }
}

impl From<&'static str> for Body<'_> {
    fn from(value: &'static str) -> Self {
        if value.is_empty() { Self::empty() } else { Self::once(Bytes::from_static(value.as_bytes())) }
    }
}
