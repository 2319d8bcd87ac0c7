//! Writers for the headers most requests need.

use mime::Mime;

use crate::WireError;
use crate::protocol::MessageWriter;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_LENGTH: &str = "Content-Length";
pub const ACCEPT: &str = "Accept";
pub const AUTHORIZATION: &str = "Authorization";

/// Supplies the token sent by [`write_bearer_token`], e.g. from an OAuth
/// flow or a credentials file.
#[cfg_attr(test, mockall::automock)]
pub trait TokenProvider: Send + Sync {
    fn token(&self) -> Result<String, WireError>;
}

impl<F> TokenProvider for F
where
    F: Fn() -> Result<String, WireError> + Send + Sync,
{
    fn token(&self) -> Result<String, WireError> {
        self()
    }
}

pub fn write_content_type<'a, W>(msg: &mut W, content_type: &Mime) -> Result<(), WireError>
where
    W: MessageWriter<'a> + ?Sized,
{
    msg.header(CONTENT_TYPE, content_type.as_ref())
}

pub fn write_content_length<'a, W>(msg: &mut W, size: u64) -> Result<(), WireError>
where
    W: MessageWriter<'a> + ?Sized,
{
    msg.header(CONTENT_LENGTH, &size.to_string())
}

/// Writes the media types as one comma-separated `Accept` header, or
/// nothing at all if there are none.
pub fn write_accept<'a, W>(msg: &mut W, media_types: &[Mime]) -> Result<(), WireError>
where
    W: MessageWriter<'a> + ?Sized,
{
    if media_types.is_empty() {
        return Ok(());
    }
    let value = media_types.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
    msg.header(ACCEPT, &value)
}

pub fn write_authorization<'a, W>(msg: &mut W, value: &str) -> Result<(), WireError>
where
    W: MessageWriter<'a> + ?Sized,
{
    msg.header(AUTHORIZATION, value)
}

/// Asks the provider for a token and writes `Authorization: Bearer <token>`.
///
/// A provider failure is returned as is and nothing is written.
pub fn write_bearer_token<'a, W>(msg: &mut W, provider: Option<&dyn TokenProvider>) -> Result<(), WireError>
where
    W: MessageWriter<'a> + ?Sized,
{
    let provider = provider.ok_or_else(|| WireError::nil_argument("token provider"))?;
    let token = provider.token()?;
    write_authorization(msg, &format!("Bearer {token}"))
}
