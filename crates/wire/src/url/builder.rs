use std::collections::BTreeMap;

use percent_encoding::percent_decode_str;
use tracing::trace;

use crate::url::host_and_port::HostAndPort;
use crate::url::{AbsoluteUrl, Scheme, UrlError, has_port, is_hostname};

/// Fluent, immutable-by-value builder for an [`AbsoluteUrl`].
///
/// Every setter consumes the builder and hands back the updated value, so a
/// builder can be cloned and branched freely. Validation only happens in
/// [`UrlBuilder::build`], which never yields a partially valid url.
#[derive(Debug, Clone, Default)]
pub struct UrlBuilder {
    seed_error: Option<UrlError>,
    scheme: Option<String>,
    host_and_port: String,
    path: Vec<String>,
    query: BTreeMap<String, Vec<String>>,
}

impl UrlBuilder {
    /// A builder with no scheme, host, path or query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the builder from a raw url string.
    ///
    /// A parse failure is kept and reported by [`UrlBuilder::build`].
    pub fn from_seed(raw: &str) -> Self {
        match url::Url::parse(raw.trim()) {
            Ok(parsed) => Self::from_url(&parsed),
            Err(e) => {
                trace!(url = raw, cause = %e, "unparsable seed url");
                Self { seed_error: Some(UrlError::invalid_url(format!("{raw:?}: {e}"))), ..Self::default() }
            }
        }
    }

    /// Seeds the builder from an already parsed url.
    pub fn from_url(url: &url::Url) -> Self {
        let host_and_port = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_owned(),
            (None, _) => String::new(),
        };

        let mut builder = Self { scheme: Some(url.scheme().to_owned()), host_and_port, ..Self::default() };

        for segment in url.path_segments().into_iter().flatten() {
            let decoded = percent_decode_str(segment).decode_utf8_lossy();
            builder.push_segment(&decoded);
        }

        for (key, value) in url.query_pairs() {
            builder.query.entry(key.into_owned()).or_default().push(value.into_owned());
        }

        builder
    }

    pub fn http(mut self) -> Self {
        self.scheme = Some(Scheme::Http.as_str().to_owned());
        self
    }

    pub fn https(mut self) -> Self {
        self.scheme = Some(Scheme::Https.as_str().to_owned());
        self
    }

    /// Sets `host` or `host:port`; whitespace around it is dropped.
    pub fn host_and_port(mut self, host_and_port: &str) -> Self {
        self.host_and_port = host_and_port.trim().to_owned();
        self
    }

    /// Appends a slash-separated path to the current one.
    ///
    /// Empty segments and `.` are dropped, `..` removes the previous segment,
    /// so `join_path("a/").join_path("/b")` yields `/a/b`.
    pub fn join_path(mut self, path: impl AsRef<str>) -> Self {
        for segment in path.as_ref().split('/') {
            self.push_segment(segment);
        }
        self
    }

    pub fn join_paths<I, S>(self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        paths.into_iter().fold(self, |builder, path| builder.join_path(path))
    }

    /// Adds a value to the query parameter `key`, keeping earlier values.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.entry(key.into()).or_default().push(value.into());
        self
    }

    /// Validates what was accumulated so far.
    ///
    /// Checks run in order: seed parse error, scheme, then host and port.
    pub fn build(&self) -> Result<AbsoluteUrl, UrlError> {
        if let Some(e) = &self.seed_error {
            return Err(e.clone());
        }

        let scheme = match self.scheme.as_deref() {
            Some("http") => Scheme::Http,
            Some("https") => Scheme::Https,
            Some(other) => return Err(UrlError::invalid_url(format!("unsupported scheme {other:?}"))),
            None => return Err(UrlError::invalid_url("not an absolute url: missing scheme")),
        };

        let host_and_port = if has_port(&self.host_and_port) {
            HostAndPort::parse(&self.host_and_port)?
        } else {
            is_hostname(&self.host_and_port)?;
            HostAndPort::new(&self.host_and_port, scheme.default_port())
        };

        let pairs: Vec<(&str, &str)> = self
            .query
            .iter()
            .flat_map(|(key, values)| values.iter().map(move |value| (key.as_str(), value.as_str())))
            .collect();
        let raw_query = serde_urlencoded::to_string(pairs).map_err(UrlError::invalid_url)?;

        Ok(AbsoluteUrl::new(scheme, host_and_port, self.path.clone(), self.query.clone(), raw_query))
    }

    fn push_segment(&mut self, segment: &str) {
        match segment {
            "" | "." => {}
            ".." => {
                self.path.pop();
            }
            _ => self.path.push(segment.to_owned()),
        }
    }
}

impl From<&AbsoluteUrl> for UrlBuilder {
    fn from(url: &AbsoluteUrl) -> Self {
        Self {
            seed_error: None,
            scheme: Some(url.scheme().as_str().to_owned()),
            host_and_port: url.host_and_port().to_string(),
            path: url.path_segments().to_vec(),
            query: url.query().clone(),
        }
    }
}
