use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::WireError;

const HTTP_VERSION_PREFIX: &str = "HTTP/";

/// An HTTP protocol version, e.g. `HTTP/1.1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProtocolVersion {
    major: u16,
    minor: u16,
}

impl ProtocolVersion {
    pub const HTTP_1_0: ProtocolVersion = ProtocolVersion::new(1, 0);
    pub const HTTP_1_1: ProtocolVersion = ProtocolVersion::new(1, 1);
    pub const HTTP_2_0: ProtocolVersion = ProtocolVersion::new(2, 0);
    pub const HTTP_3_0: ProtocolVersion = ProtocolVersion::new(3, 0);

    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }

    pub fn major(self) -> u16 {
        self.major
    }

    pub fn minor(self) -> u16 {
        self.minor
    }

    /// Parses `HTTP/M.m` or `HTTP/M`, in which case the minor number is 0.
    ///
    /// The `HTTP/` prefix is matched case-insensitively since some servers
    /// send `Http/2` or `HTTP/2` instead of the canonical `HTTP/2.0`.
    pub fn parse(raw: &str) -> Result<Self, WireError> {
        let unparsable = || WireError::unparsable_protocol_version(raw);

        let numbers = raw
            .get(..HTTP_VERSION_PREFIX.len())
            .filter(|prefix| prefix.eq_ignore_ascii_case(HTTP_VERSION_PREFIX))
            .map(|_| &raw[HTTP_VERSION_PREFIX.len()..])
            .ok_or_else(unparsable)?;

        let (major, minor) = numbers.split_once('.').unwrap_or((numbers, "0"));
        let major = parse_number(major).ok_or_else(unparsable)?;
        let minor = parse_number(minor).ok_or_else(unparsable)?;
        Ok(Self { major, minor })
    }
}

fn parse_number(digits: &str) -> Option<u16> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

impl Display for ProtocolVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{HTTP_VERSION_PREFIX}{}.{}", self.major, self.minor)
    }
}

impl FromStr for ProtocolVersion {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<http::Version> for ProtocolVersion {
    type Error = WireError;

    fn try_from(version: http::Version) -> Result<Self, Self::Error> {
        if version == http::Version::HTTP_09 {
            Ok(Self::new(0, 9))
        } else if version == http::Version::HTTP_10 {
            Ok(Self::HTTP_1_0)
        } else if version == http::Version::HTTP_11 {
            Ok(Self::HTTP_1_1)
        } else if version == http::Version::HTTP_2 {
            Ok(Self::HTTP_2_0)
        } else if version == http::Version::HTTP_3 {
            Ok(Self::HTTP_3_0)
        } else {
            Err(WireError::unparsable_protocol_version(format!("{version:?}")))
        }
    }
}

impl TryFrom<ProtocolVersion> for http::Version {
    type Error = WireError;

    fn try_from(version: ProtocolVersion) -> Result<Self, Self::Error> {
        match (version.major, version.minor) {
            (0, 9) => Ok(http::Version::HTTP_09),
            (1, 0) => Ok(http::Version::HTTP_10),
            (1, 1) => Ok(http::Version::HTTP_11),
            (2, 0) => Ok(http::Version::HTTP_2),
            (3, 0) => Ok(http::Version::HTTP_3),
            _ => Err(WireError::unparsable_protocol_version(version)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_versions() {
        let fixtures = [
            ("HTTP/1", ProtocolVersion::new(1, 0)),
            ("Http/1", ProtocolVersion::new(1, 0)),
            ("HttP/1.1", ProtocolVersion::new(1, 1)),
            ("HTTP/21.32", ProtocolVersion::new(21, 32)),
            ("hTTp/21.32", ProtocolVersion::new(21, 32)),
            ("HTTP/2.32", ProtocolVersion::new(2, 32)),
            ("http/21.3", ProtocolVersion::new(21, 3)),
        ];

        for (raw, expected) in fixtures {
            assert_eq!(ProtocolVersion::parse(raw).unwrap(), expected, "input: {raw}");
        }
    }

    #[test]
    fn parse_invalid_versions() {
        for raw in ["", "H", "HTTP", "HTTP/", "HTTP/1.", "HTTPs/1.1", "HTTP/1.2.3", "HTTP/+1", "HTTP/1.-1", "HTTP/é"] {
            let result = ProtocolVersion::parse(raw);
            assert!(matches!(result, Err(WireError::UnparsableProtocolVersion { .. })), "input: {raw}");
        }
    }

    #[test]
    fn parse_then_display_is_identity() {
        for k in 0..20_u16 {
            let raw = format!("HTTP/{}.{}", k, 10 * k + 1);
            assert_eq!(raw.parse::<ProtocolVersion>().unwrap().to_string(), raw);
        }
    }

    #[test]
    fn display_then_parse_is_identity() {
        for k in 0..20_u16 {
            let version = ProtocolVersion::new(k, 10 * k + 1);
            assert_eq!(ProtocolVersion::parse(&version.to_string()).unwrap(), version);
        }
    }

    #[test]
    fn constants() {
        assert_eq!(ProtocolVersion::HTTP_1_1.to_string(), "HTTP/1.1");
        assert_eq!(ProtocolVersion::HTTP_2_0.to_string(), "HTTP/2.0");
        assert_eq!(ProtocolVersion::HTTP_3_0.to_string(), "HTTP/3.0");
        assert_eq!(ProtocolVersion::try_from(http::Version::HTTP_2).unwrap(), ProtocolVersion::HTTP_2_0);
    }

    #[test]
    fn http_version_conversions() {
        for version in [http::Version::HTTP_09, http::Version::HTTP_10, http::Version::HTTP_11, http::Version::HTTP_2] {
            let ours = ProtocolVersion::try_from(version).unwrap();
            assert_eq!(http::Version::try_from(ours).unwrap(), version);
        }

        let result = http::Version::try_from(ProtocolVersion::new(1, 2));
        assert!(matches!(result, Err(WireError::UnparsableProtocolVersion { .. })));
    }
}
