//! Response handlers checking the status line or decoding the body.

use std::ops::RangeInclusive;

use micro_wire::WireError;
use micro_wire::body::{BodyDeserializer, BytesTarget, JsonTarget, StringTarget, read_body};
use micro_wire::protocol::{ResponseHandler, ResponseReader, StatusCode};
use serde::de::DeserializeOwned;

fn unexpected_status(reader: &dyn ResponseReader, expected: &str) -> WireError {
    let (code, reason) = reader.status_line();
    WireError::unexpected_response(format!("status {code} {reason}, expected {expected}"))
}

/// Fails unless the status is `2xx`.
pub fn expect_success<'h>() -> ResponseHandler<'h> {
    expect_status_in(200..=299)
}

/// Fails unless the status is one of `codes`. An empty set never matches.
pub fn expect_status_one_of<'h, I>(codes: I) -> ResponseHandler<'h>
where
    I: IntoIterator<Item = StatusCode>,
{
    let codes: Vec<StatusCode> = codes.into_iter().collect();
    ResponseHandler::new(move |reader| {
        let (code, _) = reader.status_line();
        if codes.contains(&code) {
            return Ok(());
        }
        let expected: Vec<String> = codes.iter().map(ToString::to_string).collect();
        Err(unexpected_status(reader, &format!("one of [{}]", expected.join(", "))))
    })
}

/// Fails unless the status falls within `range`.
pub fn expect_status_in<'h>(range: RangeInclusive<u16>) -> ResponseHandler<'h> {
    ResponseHandler::new(move |reader| {
        let (code, _) = reader.status_line();
        if range.contains(&code.as_u16()) {
            return Ok(());
        }
        Err(unexpected_status(reader, &format!("{}..={}", range.start(), range.end())))
    })
}

/// Feeds the body to the deserializer.
pub fn read_response<'h, D>(mut deserializer: D) -> ResponseHandler<'h>
where
    D: BodyDeserializer + 'h,
{
    ResponseHandler::new(move |reader| read_body(reader, Some(&mut deserializer)))
}

/// Decodes a JSON body into `output`. Empty and `null` bodies leave it as is.
pub fn read_json_response<'h, T>(output: &'h mut T) -> ResponseHandler<'h>
where
    T: DeserializeOwned,
{
    read_response(JsonTarget::new(Some(output)))
}

pub fn read_text_response(output: &mut String) -> ResponseHandler<'_> {
    read_response(StringTarget::new(Some(output)))
}

pub fn read_bytes_response(output: &mut Vec<u8>) -> ResponseHandler<'_> {
    read_response(BytesTarget::new(Some(output)))
}
