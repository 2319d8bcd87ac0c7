//! Request-line builders.

use micro_wire::protocol::{Method, RequestBuilder};
use micro_wire::url::{AbsoluteUrl, UrlBuilder, UrlError};

/// Anything a request line can target.
///
/// Raw strings, parsed urls and builders all go through [`UrlBuilder`], so
/// every variant is validated the same way.
#[derive(Debug, Clone)]
pub enum TargetUrl {
    Raw(String),
    Parsed(url::Url),
    Builder(UrlBuilder),
    Absolute(AbsoluteUrl),
}

impl TargetUrl {
    pub fn resolve(&self) -> Result<AbsoluteUrl, UrlError> {
        match self {
            TargetUrl::Raw(raw) => UrlBuilder::from_seed(raw).build(),
            TargetUrl::Parsed(url) => UrlBuilder::from_url(url).build(),
            TargetUrl::Builder(builder) => builder.build(),
            TargetUrl::Absolute(url) => Ok(url.clone()),
        }
    }
}

impl From<&str> for TargetUrl {
    fn from(raw: &str) -> Self {
        TargetUrl::Raw(raw.to_owned())
    }
}

impl From<String> for TargetUrl {
    fn from(raw: String) -> Self {
        TargetUrl::Raw(raw)
    }
}

impl From<url::Url> for TargetUrl {
    fn from(url: url::Url) -> Self {
        TargetUrl::Parsed(url)
    }
}

impl From<&url::Url> for TargetUrl {
    fn from(url: &url::Url) -> Self {
        TargetUrl::Parsed(url.clone())
    }
}

impl From<UrlBuilder> for TargetUrl {
    fn from(builder: UrlBuilder) -> Self {
        TargetUrl::Builder(builder)
    }
}

impl From<AbsoluteUrl> for TargetUrl {
    fn from(url: AbsoluteUrl) -> Self {
        TargetUrl::Absolute(url)
    }
}

impl From<&AbsoluteUrl> for TargetUrl {
    fn from(url: &AbsoluteUrl) -> Self {
        TargetUrl::Absolute(url.clone())
    }
}

/// Writes the request line.
///
/// The target is resolved right away; an invalid url fails every build of
/// the returned builder.
pub fn request_line<'a>(method: Method, url: impl Into<TargetUrl>) -> RequestBuilder<'a> {
    let resolved = url.into().resolve();
    RequestBuilder::new(move |writer| match &resolved {
        Ok(url) => writer.request_line(method, url),
        Err(e) => Err(e.clone().into()),
    })
}

macro_rules! method_builder {
    ($fn_name:ident, $method:ident) => {
        #[doc = concat!("Writes a ", stringify!($method), " request line for the url.")]
        #[inline]
        pub fn $fn_name<'a>(url: impl Into<TargetUrl>) -> RequestBuilder<'a> {
            request_line(Method::$method, url)
        }
    };
}

method_builder!(get, Get);
method_builder!(head, Head);
method_builder!(post, Post);
method_builder!(put, Put);
method_builder!(patch, Patch);
method_builder!(delete, Delete);
method_builder!(options, Options);
