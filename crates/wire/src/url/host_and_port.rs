use std::fmt::{Display, Formatter};
use std::net::{IpAddr, Ipv6Addr};

use crate::url::UrlError;
use crate::utils::ensure;

const MAX_HOSTNAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// A validated host together with a port.
///
/// IPv6 literals are stored without brackets and rendered with them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostAndPort {
    host: String,
    port: u16,
}

impl HostAndPort {
    /// Parses `host:port`, trimming surrounding whitespace first.
    ///
    /// The host must pass [`is_hostname`] and the port [`parse_port`]. IPv6
    /// hosts need brackets here since the port is always required, e.g.
    /// `[::1]:8080`.
    pub fn parse(raw: &str) -> Result<Self, UrlError> {
        let trimmed = raw.trim();
        let (host, port) = split_host_port(trimmed).ok_or_else(|| UrlError::invalid_hostname(trimmed))?;
        is_hostname(host)?;
        let port = parse_port(port)?;
        Ok(Self { host: host.to_owned(), port })
    }

    /// Pairs an already validated host with a port.
    pub(crate) fn new(host: &str, port: u16) -> Self {
        Self { host: strip_brackets(host).to_owned(), port }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn is_ipv6(&self) -> bool {
        self.host.parse::<Ipv6Addr>().is_ok()
    }
}

impl Display for HostAndPort {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_ipv6() {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// Parses a port number in `0..=65535`, ignoring surrounding whitespace.
pub fn parse_port(raw: &str) -> Result<u16, UrlError> {
    raw.trim().parse::<u16>().map_err(|_| UrlError::invalid_port(raw))
}

/// Checks `host` is either an IP literal or a DNS-style hostname.
///
/// Hostnames are dot-separated labels of 1 to 63 characters drawn from
/// `[A-Za-z0-9_-]`, with a total length below 254. IPv6 literals may come
/// with or without brackets.
pub fn is_hostname(host: &str) -> Result<(), UrlError> {
    if is_ip_literal(host) {
        return Ok(());
    }

    ensure!(!host.is_empty() && host.len() <= MAX_HOSTNAME_LEN, UrlError::invalid_hostname(host));
    ensure!(host.split('.').all(is_label), UrlError::invalid_hostname(host));
    Ok(())
}

/// Tells whether `host_port` splits into a host and a port.
///
/// Only the shape is checked: `some.host:` has a (empty) port while `::1`
/// and `[::1]` have none.
pub fn has_port(host_port: &str) -> bool {
    split_host_port(host_port.trim()).is_some()
}

fn is_ip_literal(host: &str) -> bool {
    match host.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
        Some(inner) => inner.parse::<Ipv6Addr>().is_ok(),
        None => host.parse::<IpAddr>().is_ok(),
    }
}

fn is_label(label: &str) -> bool {
    (1..=MAX_LABEL_LEN).contains(&label.len())
        && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

fn strip_brackets(host: &str) -> &str {
    host.strip_prefix('[').and_then(|h| h.strip_suffix(']')).unwrap_or(host)
}

/// Splits at the last colon. A bracketed host must close right before that
/// colon and an unbracketed one may not contain colons at all.
pub(crate) fn split_host_port(host_port: &str) -> Option<(&str, &str)> {
    let colon = host_port.rfind(':')?;
    let (host, port) = (&host_port[..colon], &host_port[colon + 1..]);

    let host = match host.strip_prefix('[') {
        Some(rest) => rest.strip_suffix(']')?,
        None => host,
    };

    if host.contains([':', '[', ']']) && !host_port.starts_with('[') {
        return None;
    }
    if host.contains(['[', ']']) || port.contains(['[', ']']) {
        return None;
    }

    Some((host, port))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_label(len: usize) -> String {
        "x".repeat(len)
    }

    #[test]
    fn invalid_hostnames() {
        let too_long = format!("{}.com", long_label(64));
        let fixtures = [
            "",
            "\n",
            ":",
            ":80",
            "some.host:",
            "some host",
            "some host.com",
            "what?is.this",
            "em@il",
            "what.the.h*ll",
            "trailing.dot.",
            too_long.as_str(),
        ];

        for host in fixtures {
            let result = is_hostname(host);
            assert_eq!(result, Err(UrlError::invalid_hostname(host)), "host: {host:?}");
        }
    }

    #[test]
    fn valid_hostnames() {
        let longest_label = format!("{}.com", long_label(63));
        let fixtures = ["::123", "[::123]", "1.2.3.4", "_h.com", "a-b.some_where", "some.host", longest_label.as_str()];

        for host in fixtures {
            assert_eq!(is_hostname(host), Ok(()), "host: {host:?}");
        }
    }

    #[test]
    fn hostname_length_limit() {
        let labels = vec![long_label(63); 4];
        let too_long = labels.join(".");
        assert_eq!(too_long.len(), 255);
        assert!(is_hostname(&too_long).is_err());

        let fits = too_long[..253].trim_end_matches('.');
        assert_eq!(is_hostname(fits), Ok(()));
    }

    #[test]
    fn parse_ports() {
        assert_eq!(parse_port("443"), Ok(443));
        assert_eq!(parse_port(" 0 "), Ok(0));
        assert_eq!(parse_port("65535"), Ok(65535));

        for raw in ["70000", "65536", "-1", "", "eighty", "8o"] {
            assert_eq!(parse_port(raw), Err(UrlError::invalid_port(raw)), "port: {raw:?}");
        }
    }

    #[test]
    fn detect_port() {
        assert!(has_port("h:80"));
        assert!(has_port("[::1]:80"));
        assert!(has_port("some.host:"));
        assert!(has_port(":80"));

        assert!(!has_port("h"));
        assert!(!has_port("::1"));
        assert!(!has_port("[::1]"));
        assert!(!has_port("[::1"));
        assert!(!has_port("a:b:c"));
    }

    #[test]
    fn parse_valid_host_and_port() {
        let fixtures = [
            (" h:0 ", "h", 0),
            ("h:65535", "h", 65535),
            ("[::123]:1", "::123", 1),
            ("1.2.3.4:65535", "1.2.3.4", 65535),
        ];

        for (raw, host, port) in fixtures {
            let parsed = HostAndPort::parse(raw).unwrap();
            assert_eq!(parsed.host(), host);
            assert_eq!(parsed.port(), port);
        }
    }

    #[test]
    fn parse_invalid_host_and_port() {
        assert_eq!(HostAndPort::parse("some.host:123456789"), Err(UrlError::invalid_port("123456789")));
        assert_eq!(HostAndPort::parse("some host:80"), Err(UrlError::invalid_hostname("some host")));
        assert_eq!(HostAndPort::parse("some.host"), Err(UrlError::invalid_hostname("some.host")));
        assert_eq!(HostAndPort::parse("some.host:"), Err(UrlError::invalid_port("")));
    }

    #[test]
    fn display_brackets_ipv6() {
        assert_eq!(HostAndPort::parse("[::1]:8080").unwrap().to_string(), "[::1]:8080");
        assert_eq!(HostAndPort::parse("1.2.3.4:80").unwrap().to_string(), "1.2.3.4:80");
        assert_eq!(HostAndPort::new("[::1]", 443).to_string(), "[::1]:443");
    }
}
