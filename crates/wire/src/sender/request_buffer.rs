use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Request};

use crate::WireError;
use crate::body::Body;
use crate::protocol::{MessageWriter, Method, RequestWriter};
use crate::url::AbsoluteUrl;

/// Collects what request builders write until it is turned into an
/// [`http::Request`].
#[derive(Debug, Default)]
pub struct RequestBuffer<'a> {
    request_line: Option<(Method, AbsoluteUrl)>,
    headers: HeaderMap,
    body: Body<'a>,
}

impl<'a> RequestBuffer<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Fails if no request line was written.
    pub fn into_request(self) -> Result<Request<Body<'a>>, WireError> {
        let (method, url) = self.request_line.ok_or_else(|| WireError::invalid_request("missing request line"))?;
        let uri = http::Uri::try_from(&url).map_err(WireError::invalid_request)?;

        let mut request = Request::new(self.body);
        *request.method_mut() = method.into();
        *request.uri_mut() = uri;
        *request.headers_mut() = self.headers;
        Ok(request)
    }
}

impl<'a> MessageWriter<'a> for RequestBuffer<'a> {
    fn header(&mut self, name: &str, value: &str) -> Result<(), WireError> {
        let (name, value) = to_header(name, value)?;
        self.headers.insert(name, value);
        Ok(())
    }

    fn body(&mut self, body: Body<'a>) -> Result<(), WireError> {
        self.body = body;
        Ok(())
    }
}

impl<'a> RequestWriter<'a> for RequestBuffer<'a> {
    fn request_line(&mut self, method: Method, url: &AbsoluteUrl) -> Result<(), WireError> {
        self.request_line = Some((method, url.clone()));
        Ok(())
    }
}

pub(crate) fn to_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), WireError> {
    let header_name =
        HeaderName::from_bytes(name.as_bytes()).map_err(|e| WireError::invalid_header(format!("{name:?}: {e}")))?;
    let header_value =
        HeaderValue::from_str(value).map_err(|e| WireError::invalid_header(format!("{name}: {value:?}: {e}")))?;
    Ok((header_name, header_value))
}
