use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::url::{HostAndPort, Scheme};

/// Characters escaped inside a single path segment.
const PATH_SEGMENT: &AsciiSet =
    &CONTROLS.add(b' ').add(b'"').add(b'#').add(b'<').add(b'>').add(b'?').add(b'`').add(b'{').add(b'}').add(b'/').add(b'%');

/// A validated url with an http(s) scheme, a host and a port.
///
/// Only [`UrlBuilder::build`](crate::url::UrlBuilder::build) creates one.
/// Path segments and query values are kept unescaped; escaping happens once
/// while rendering the wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbsoluteUrl {
    scheme: Scheme,
    host_and_port: HostAndPort,
    path: Vec<String>,
    query: BTreeMap<String, Vec<String>>,
    raw_query: String,
}

impl AbsoluteUrl {
    pub(crate) fn new(
        scheme: Scheme,
        host_and_port: HostAndPort,
        path: Vec<String>,
        query: BTreeMap<String, Vec<String>>,
        raw_query: String,
    ) -> Self {
        Self { scheme, host_and_port, path, query, raw_query }
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn secure(&self) -> bool {
        self.scheme.is_secure()
    }

    pub fn host(&self) -> &str {
        self.host_and_port.host()
    }

    pub fn port(&self) -> u16 {
        self.host_and_port.port()
    }

    pub fn host_and_port(&self) -> &HostAndPort {
        &self.host_and_port
    }

    /// The unescaped path, always starting with `/`.
    pub fn path(&self) -> String {
        format!("/{}", self.path.join("/"))
    }

    pub fn path_segments(&self) -> &[String] {
        &self.path
    }

    /// The path as sent on the wire, each segment percent-escaped.
    pub fn escaped_path(&self) -> String {
        let segments: Vec<String> =
            self.path.iter().map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string()).collect();
        format!("/{}", segments.join("/"))
    }

    pub fn query(&self) -> &BTreeMap<String, Vec<String>> {
        &self.query
    }

    /// Query keys in ascending order.
    pub fn query_keys(&self) -> impl Iterator<Item = &str> {
        self.query.keys().map(String::as_str)
    }

    pub fn query_values(&self, key: &str) -> &[String] {
        self.query.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// The encoded query string without the leading `?`, empty if there is none.
    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }

    /// Path plus query, as found in a request line.
    pub fn path_and_query(&self) -> String {
        let mut target = self.escaped_path();
        if !self.raw_query.is_empty() {
            target.push('?');
            target.push_str(&self.raw_query);
        }
        target
    }

    /// Renders `scheme://host:port/path[?query]`.
    pub fn wire_format(&self) -> String {
        format!("{}://{}{}", self.scheme, self.host_and_port, self.path_and_query())
    }
}

impl Display for AbsoluteUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.wire_format())
    }
}

impl TryFrom<&AbsoluteUrl> for http::Uri {
    type Error = http::uri::InvalidUri;

    fn try_from(url: &AbsoluteUrl) -> Result<Self, Self::Error> {
        url.wire_format().parse()
    }
}

#[cfg(test)]
mod tests {
    use crate::url::UrlBuilder;

    #[test]
    fn accessors() {
        let url = UrlBuilder::new()
            .https()
            .host_and_port("api.some.host:8443")
            .join_path("v1/items")
            .query("page", "2")
            .build()
            .unwrap();

        assert!(url.secure());
        assert_eq!(url.host(), "api.some.host");
        assert_eq!(url.port(), 8443);
        assert_eq!(url.path(), "/v1/items");
        assert_eq!(url.raw_query(), "page=2");
        assert_eq!(url.path_and_query(), "/v1/items?page=2");
        assert_eq!(url.to_string(), "https://api.some.host:8443/v1/items?page=2");
    }

    #[test]
    fn escapes_reserved_segment_characters() {
        let url = UrlBuilder::new().http().host_and_port("h").join_path("a?b").join_path("c#d").join_path("50%").build().unwrap();

        assert_eq!(url.path(), "/a?b/c#d/50%");
        assert_eq!(url.escaped_path(), "/a%3Fb/c%23d/50%25");
    }

    #[test]
    fn empty_path_is_root() {
        let url = UrlBuilder::new().http().host_and_port("h").build().unwrap();
        assert_eq!(url.path(), "/");
        assert_eq!(url.escaped_path(), "/");
        assert_eq!(url.raw_query(), "");
    }

    #[test]
    fn converts_to_uri() {
        let url = UrlBuilder::new().http().host_and_port("h:8080").join_path("a b").query("q", "x y").build().unwrap();
        let uri = http::Uri::try_from(&url).unwrap();

        assert_eq!(uri.scheme_str(), Some("http"));
        assert_eq!(uri.host(), Some("h"));
        assert_eq!(uri.port_u16(), Some(8080));
        assert_eq!(uri.path(), "/a%20b");
        assert_eq!(uri.query(), Some("q=x+y"));
    }
}
