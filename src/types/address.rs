use std::{borrow::Cow, fmt};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::set::SetKey;

/// Characters that force a display name to be quoted when it is rendered.
const PHRASE_SPECIALS: &str = "()<>@,;:\\\".[]";

/// Which header a recipient ends up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Destination {
    #[default]
    To,
    Cc,
}

/// A single entry of a recipient list, before or during resolution.
///
/// The address part is not guaranteed to contain a domain: it can be a bare
/// user or group identifier until the list has been finalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressToken {
    name: Option<String>,
    address: String,
    destination: Destination,
}

impl AddressToken {
    pub fn new<A: Into<String>>(name: Option<String>, address: A) -> Self {
        Self {
            name,
            address: address.into(),
            destination: Destination::default(),
        }
    }

    pub fn with_destination(mut self, destination: Destination) -> Self {
        self.destination = destination;

        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn destination(&self) -> Destination {
        self.destination
    }

    pub fn has_domain(&self) -> bool {
        self.address.contains('@')
    }
}

impl SetKey for AddressToken {
    fn set_key(&self) -> String {
        self.address.to_lowercase()
    }
}

/// Renders the token as `address` or `name <address>`, quoting the name when needed.
impl fmt::Display for AddressToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name.as_ref() {
            Some(name) => write!(f, "{} <{}>", quote_phrase(name), self.address),
            None => write!(f, "{}", self.address),
        }
    }
}

fn quote_phrase(phrase: &str) -> Cow<'_, str> {
    if phrase.contains(['"', '\\']) {
        let mut quoted = String::with_capacity(phrase.len() + 4);

        quoted.push('"');
        for ch in phrase.chars() {
            if ch == '"' || ch == '\\' {
                quoted.push('\\');
            }
            quoted.push(ch);
        }
        quoted.push('"');

        return Cow::Owned(quoted);
    }

    let needs_quoting = phrase.chars().any(|ch| {
        (ch < ' ' && !matches!(ch, '\r' | '\n' | '\t'))
            || ch >= '\u{7f}'
            || PHRASE_SPECIALS.contains(ch)
    });

    if needs_quoting {
        Cow::Owned(format!("\"{}\"", phrase))
    } else {
        Cow::Borrowed(phrase)
    }
}

/// A fully resolved recipient, ready to be placed in a mail header.
///
/// The display name, if any, is already in its header-safe encoded form.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FinalAddress {
    name: Option<String>,
    address: String,
}

impl FinalAddress {
    pub fn new<A: Into<String>>(name: Option<String>, address: A) -> Self {
        Self {
            name,
            address: address.into(),
        }
    }

    /// The encoded display name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// The display name with any encoded words decoded again.
    pub fn decoded_name(&self) -> Result<Option<String>> {
        match self.name.as_ref() {
            Some(name) => {
                let raw = format!("To: {}", name);
                let (header, _) = mailparse::parse_header(raw.as_bytes())?;

                Ok(Some(header.get_value()))
            }
            None => Ok(None),
        }
    }

    /// Whether the address is a deliverable `local@domain` address.
    ///
    /// Identifiers that could not be resolved and had no default suffix
    /// applied stay in the list and report `false` here.
    pub fn is_complete(&self) -> bool {
        validator::validate_email(self.address.as_str())
    }

    pub fn full(&self) -> String {
        self.to_string()
    }
}

impl SetKey for FinalAddress {
    fn set_key(&self) -> String {
        self.address.to_lowercase()
    }
}

impl fmt::Display for FinalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name.as_ref() {
            Some(name) => write!(f, "{} <{}>", name, self.address),
            None => write!(f, "{}", self.address),
        }
    }
}

impl From<FinalAddress> for email::Mailbox {
    fn from(address: FinalAddress) -> Self {
        match address.name {
            Some(name) => email::Mailbox::new_with_name(name, address.address),
            None => email::Mailbox::new(address.address),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn render_token() {
        let plain = AddressToken::new(None, "a@example.com");
        assert_eq!(plain.to_string(), "a@example.com");

        let named = AddressToken::new(Some("Jane Doe".into()), "jane@example.com");
        assert_eq!(named.to_string(), "Jane Doe <jane@example.com>");

        let special = AddressToken::new(Some("Doe, Jane".into()), "jane@example.com");
        assert_eq!(special.to_string(), "\"Doe, Jane\" <jane@example.com>");

        let escaped = AddressToken::new(Some("Jane \"JD\" Doe".into()), "jane@example.com");
        assert_eq!(
            escaped.to_string(),
            "\"Jane \\\"JD\\\" Doe\" <jane@example.com>"
        );
    }

    #[test]
    fn keys_ignore_case_and_name() {
        let first = AddressToken::new(Some("A".into()), "Jane@Example.com");
        let second = AddressToken::new(None, "jane@example.com");

        assert_eq!(first.set_key(), second.set_key());
    }

    #[test]
    fn completeness() {
        assert!(FinalAddress::new(None, "jane@example.com").is_complete());
        assert!(!FinalAddress::new(None, "jane").is_complete());
    }

    #[test]
    fn into_mailbox() {
        let mailbox: email::Mailbox =
            FinalAddress::new(Some("Jane".into()), "jane@example.com").into();

        assert_eq!(mailbox.name, Some(String::from("Jane")));
        assert_eq!(mailbox.address, "jane@example.com");
    }
}
