use std::io::Read;
use std::sync::{Mutex, PoisonError};

use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::WireError;
use crate::body::Body;
use crate::header::write_content_length;
use crate::protocol::{MessageReader, MessageWriter};

/// Turns caller content into a [`Body`].
///
/// Buffered serializers report their exact size; streaming ones report 0,
/// which callers ignore.
pub trait BodySerializer<'a> {
    fn streaming(&self) -> bool;

    fn serialize(&self) -> Result<(Body<'a>, u64), WireError>;
}

/// Consumes a body stream. Implementations never close the stream.
pub trait BodyDeserializer {
    fn deserialize(&mut self, body: &mut dyn Read) -> Result<(), WireError>;
}

/// Writes `Content-Length` for buffered bodies, then the body itself.
///
/// Nothing is written if serialization fails.
pub fn write_body<'a, W, S>(msg: &mut W, serializer: &S) -> Result<(), WireError>
where
    W: MessageWriter<'a> + ?Sized,
    S: BodySerializer<'a> + ?Sized,
{
    let (body, size) = serializer.serialize()?;
    if !serializer.streaming() {
        write_content_length(msg, size)?;
    }
    msg.body(body)
}

/// Hands the body stream to `deserializer`, which must be present.
pub fn read_body<R, D>(msg: &mut R, deserializer: Option<&mut D>) -> Result<(), WireError>
where
    R: MessageReader + ?Sized,
    D: BodyDeserializer + ?Sized,
{
    let Some(deserializer) = deserializer else {
        return Err(WireError::nil_argument("body deserializer"));
    };
    deserializer.deserialize(msg.body())
}

/// Decodes a JSON body into `output`, which must be present.
pub fn read_json_body<R, T>(msg: &mut R, output: Option<&mut T>) -> Result<(), WireError>
where
    R: MessageReader + ?Sized,
    T: DeserializeOwned,
{
    read_body(msg, Some(&mut JsonTarget::<T>::new(output)))
}

#[derive(Debug, Clone)]
pub struct ByteBody(Bytes);

impl ByteBody {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }
}

impl<'a> BodySerializer<'a> for ByteBody {
    fn streaming(&self) -> bool {
        false
    }

    fn serialize(&self) -> Result<(Body<'a>, u64), WireError> {
        Ok((Body::once(self.0.clone()), self.0.len() as u64))
    }
}

#[derive(Debug, Clone)]
pub struct StringBody(Bytes);

impl StringBody {
    pub fn new(text: impl Into<String>) -> Self {
        Self(Bytes::from(text.into()))
    }
}

impl<'a> BodySerializer<'a> for StringBody {
    fn streaming(&self) -> bool {
        false
    }

    fn serialize(&self) -> Result<(Body<'a>, u64), WireError> {
        Ok((Body::once(self.0.clone()), self.0.len() as u64))
    }
}

/// Serializes its value as JSON.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<'a, T: Serialize> BodySerializer<'a> for JsonBody<T> {
    fn streaming(&self) -> bool {
        false
    }

    fn serialize(&self) -> Result<(Body<'a>, u64), WireError> {
        let buf = serde_json::to_vec(&self.0)?;
        let size = buf.len() as u64;
        Ok((Body::from(buf), size))
    }
}

/// Hands a caller supplied stream over as the body.
///
/// The stream can only be handed over once; serializing again fails.
pub struct StreamingBody<'a> {
    reader: Mutex<Option<Box<dyn Read + Send + 'a>>>,
}

impl<'a> StreamingBody<'a> {
    pub fn new<R>(reader: R) -> Self
    where
        R: Read + Send + 'a,
    {
        Self { reader: Mutex::new(Some(Box::new(reader))) }
    }
}

impl<'a> BodySerializer<'a> for StreamingBody<'a> {
    fn streaming(&self) -> bool {
        true
    }

    fn serialize(&self) -> Result<(Body<'a>, u64), WireError> {
        let mut guard = self.reader.lock().unwrap_or_else(PoisonError::into_inner);
        let reader = guard.take().ok_or_else(|| WireError::invalid_body("stream has been consumed"))?;
        Ok((Body::stream(reader), 0))
    }
}

impl std::fmt::Debug for StreamingBody<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamingBody").finish_non_exhaustive()
    }
}

/// Copies the body into a byte buffer.
#[derive(Debug)]
pub struct BytesTarget<'o> {
    output: Option<&'o mut Vec<u8>>,
}

impl<'o> BytesTarget<'o> {
    pub fn new(output: impl Into<Option<&'o mut Vec<u8>>>) -> Self {
        Self { output: output.into() }
    }
}

impl BodyDeserializer for BytesTarget<'_> {
    fn deserialize(&mut self, body: &mut dyn Read) -> Result<(), WireError> {
        let output = self.output.as_deref_mut().ok_or_else(|| WireError::nil_argument("bytes output"))?;
        body.read_to_end(output)?;
        Ok(())
    }
}

/// Reads the body as UTF-8 text.
#[derive(Debug)]
pub struct StringTarget<'o> {
    output: Option<&'o mut String>,
}

impl<'o> StringTarget<'o> {
    pub fn new(output: impl Into<Option<&'o mut String>>) -> Self {
        Self { output: output.into() }
    }
}

impl BodyDeserializer for StringTarget<'_> {
    fn deserialize(&mut self, body: &mut dyn Read) -> Result<(), WireError> {
        let output = self.output.as_deref_mut().ok_or_else(|| WireError::nil_argument("string output"))?;
        body.read_to_string(output)?;
        Ok(())
    }
}

/// Decodes a JSON body into the output value.
///
/// An empty or `null` payload leaves the output untouched.
#[derive(Debug)]
pub struct JsonTarget<'o, T> {
    output: Option<&'o mut T>,
}

impl<'o, T> JsonTarget<'o, T> {
    pub fn new(output: impl Into<Option<&'o mut T>>) -> Self {
        Self { output: output.into() }
    }
}

impl<T: DeserializeOwned> BodyDeserializer for JsonTarget<'_, T> {
    fn deserialize(&mut self, body: &mut dyn Read) -> Result<(), WireError> {
        let output = self.output.as_deref_mut().ok_or_else(|| WireError::nil_argument("json output"))?;

        let mut buf = Vec::new();
        body.read_to_end(&mut buf)?;
        let payload = buf.trim_ascii();
        if payload.is_empty() || payload == b"null" {
            return Ok(());
        }

        *output = serde_json::from_slice(payload)?;
        Ok(())
    }
}
