use std::{fmt, result, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind, Result};

/// Charset used when a display name has to be written as an encoded word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Charset {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "UTF-8"))]
    Utf8,
    #[cfg_attr(feature = "serde", serde(rename = "ISO-8859-1"))]
    Latin1,
    #[cfg_attr(feature = "serde", serde(rename = "US-ASCII"))]
    Ascii,
}

impl Charset {
    /// The MIME name of the charset.
    pub fn name(&self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Latin1 => "ISO-8859-1",
            Charset::Ascii => "US-ASCII",
        }
    }

    /// Append the encoded form of `ch` to `buf`.
    pub fn encode_char(&self, ch: char, buf: &mut Vec<u8>) -> Result<()> {
        let limit = match self {
            Charset::Utf8 => {
                let mut bytes = [0; 4];
                buf.extend_from_slice(ch.encode_utf8(&mut bytes).as_bytes());

                return Ok(());
            }
            Charset::Latin1 => 0xff,
            Charset::Ascii => 0x7f,
        };

        let code = ch as u32;
        if code > limit {
            crate::failed!(
                ErrorKind::Encoding,
                "Character '{}' cannot be encoded as {}",
                ch,
                self.name()
            );
        }

        buf.push(code as u8);

        Ok(())
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Charset {
    type Err = Error;

    fn from_str(s: &str) -> result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Charset::Utf8),
            "iso-8859-1" | "iso8859-1" | "latin1" => Ok(Charset::Latin1),
            "us-ascii" | "ascii" => Ok(Charset::Ascii),
            _ => Err(Error::new(
                ErrorKind::Encoding,
                format!("Unsupported charset: {}", s),
            )),
        }
    }
}

/// Mail settings consulted while finalizing addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    #[cfg_attr(feature = "serde", serde(default))]
    default_suffix: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    charset: Charset,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Domain fragment appended to identifiers that have no domain, e.g. `@example.com`.
    pub fn default_suffix<S: Into<String>>(mut self, suffix: S) -> Self {
        self.default_suffix = Some(suffix.into());

        self
    }

    pub fn charset(mut self, charset: Charset) -> Self {
        self.charset = charset;

        self
    }

    pub fn get_default_suffix(&self) -> Option<&str> {
        self.default_suffix.as_deref()
    }

    pub fn get_charset(&self) -> Charset {
        self.charset
    }

    /// The default suffix, but only when it can actually turn an identifier into an address.
    pub(crate) fn usable_suffix(&self) -> Option<&str> {
        self.get_default_suffix()
            .filter(|suffix| suffix.contains('@'))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_charset() {
        assert_eq!("utf-8".parse::<Charset>().unwrap(), Charset::Utf8);
        assert_eq!("ISO-8859-1".parse::<Charset>().unwrap(), Charset::Latin1);
        assert_eq!(" US-ASCII ".parse::<Charset>().unwrap(), Charset::Ascii);

        let error = "EBCDIC".parse::<Charset>().unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::Encoding));
        assert_eq!(error.to_string(), "Unsupported charset: EBCDIC");
    }

    #[test]
    fn encode_chars() {
        let mut buf = Vec::new();

        Charset::Latin1.encode_char('é', &mut buf).unwrap();
        assert_eq!(buf, vec![0xe9]);

        assert!(Charset::Ascii.encode_char('é', &mut buf).is_err());
        assert!(Charset::Latin1.encode_char('€', &mut buf).is_err());
    }

    #[test]
    fn suffix_without_at_is_ignored() {
        let config = Config::new().default_suffix("example.com");

        assert_eq!(config.get_default_suffix(), Some("example.com"));
        assert_eq!(config.usable_suffix(), None);

        let config = Config::new().default_suffix("@example.com");
        assert_eq!(config.usable_suffix(), Some("@example.com"));
    }
}
