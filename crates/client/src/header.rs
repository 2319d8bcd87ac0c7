//! Request builders writing common headers.

use std::sync::Arc;

use mime::Mime;
use micro_wire::header::{
    TokenProvider, write_accept, write_authorization, write_bearer_token, write_content_length, write_content_type,
};
use micro_wire::protocol::RequestBuilder;

/// Writes an arbitrary header.
pub fn header<'a>(name: impl Into<String>, value: impl Into<String>) -> RequestBuilder<'a> {
    let (name, value) = (name.into(), value.into());
    RequestBuilder::new(move |writer| writer.header(&name, &value))
}

pub fn content_type<'a>(content_type: Mime) -> RequestBuilder<'a> {
    RequestBuilder::new(move |writer| write_content_type(writer, &content_type))
}

pub fn content_length<'a>(size: u64) -> RequestBuilder<'a> {
    RequestBuilder::new(move |writer| write_content_length(writer, size))
}

/// Writes a single `Accept` header listing every media type, or nothing if
/// there are none.
pub fn accept<'a, I>(media_types: I) -> RequestBuilder<'a>
where
    I: IntoIterator<Item = Mime>,
{
    let media_types: Vec<Mime> = media_types.into_iter().collect();
    RequestBuilder::new(move |writer| write_accept(writer, &media_types))
}

pub fn authorization<'a>(value: impl Into<String>) -> RequestBuilder<'a> {
    let value = value.into();
    RequestBuilder::new(move |writer| write_authorization(writer, &value))
}

/// Fetches a token from the provider each time the request is built.
pub fn bearer_token<'a, P>(provider: P) -> RequestBuilder<'a>
where
    P: TokenProvider + 'a,
{
    RequestBuilder::new(move |writer| write_bearer_token(writer, Some(&provider)))
}

/// Like [`bearer_token`], for a provider that may be missing. Building the
/// request fails with `NilArgument` when it is.
pub fn bearer_token_opt<'a>(provider: Option<Arc<dyn TokenProvider + 'a>>) -> RequestBuilder<'a> {
    RequestBuilder::new(move |writer| write_bearer_token(writer, provider.as_deref()))
}
