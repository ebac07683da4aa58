use log::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    directory::Directory,
    error::{Error, ErrorKind},
    expand::EnvVars,
    types::Destination,
    RecipientResolver,
};

/// Outcome of checking a recipient list typed into a form.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(tag = "kind", content = "message", rename_all = "lowercase")
)]
pub enum ValidationResult {
    Ok,
    Error(String),
}

impl ValidationResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, ValidationResult::Ok)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ValidationResult::Ok => None,
            ValidationResult::Error(message) => Some(message),
        }
    }

    #[cfg(feature = "json")]
    pub fn to_json(&self) -> crate::error::Result<String> {
        crate::types::json::to_json(self)
    }
}

impl From<Error> for ValidationResult {
    fn from(error: Error) -> Self {
        match error.kind() {
            ErrorKind::AddressSyntax { fragment, .. } => {
                ValidationResult::Error(format!("{}: \"{}\"", error.message(), fragment))
            }
            _ => ValidationResult::Error(error.message().to_string()),
        }
    }
}

impl<D: Directory> RecipientResolver<D> {
    /// Run the list through the whole pipeline for both destinations, without
    /// any variables, and report the first failure.
    pub fn validate(&self, spec: &str) -> ValidationResult {
        let env = EnvVars::new();

        for destination in [Destination::To, Destination::Cc] {
            match self.resolve_for(spec, &env, destination) {
                Ok(addresses) => {
                    for address in addresses.iter().filter(|address| !address.is_complete()) {
                        warn!("Recipient {} has no usable mail domain", address.address());
                    }
                }
                Err(error) => return error.into(),
            }
        }

        ValidationResult::Ok
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::{
        directory::InMemoryDirectory,
        types::{Charset, Config},
    };

    fn resolver(config: Config) -> RecipientResolver<InMemoryDirectory> {
        RecipientResolver::new(InMemoryDirectory::new().user("jane"), config)
    }

    #[test]
    fn valid_lists() {
        let resolver = resolver(Config::new());

        assert!(resolver.validate("").is_ok());
        assert!(resolver.validate("a@x.com, cc:Bob <b@x.com>").is_ok());
        assert!(resolver.validate("jane unknown").is_ok());
    }

    #[test]
    fn syntax_errors_carry_the_fragment() {
        let result = resolver(Config::new()).validate("not an address <<<");

        assert!(!result.is_ok());
        assert_eq!(result.message(), Some("Missing '>': \"<<<\""));
    }

    #[test]
    fn syntax_error_in_cc_only() {
        let result = resolver(Config::new()).validate("a@x.com, cc:Bob <b@x.com");

        assert!(!result.is_ok());
    }

    #[test]
    fn encoding_errors_carry_the_message() {
        let resolver = resolver(Config::new().charset(Charset::Ascii));
        let result = resolver.validate("Jürgen <j@x.com>, a@x.com");

        assert_eq!(
            result,
            ValidationResult::Error(String::from(
                "Character 'ü' cannot be encoded as US-ASCII"
            ))
        );
    }

    #[cfg(feature = "json")]
    #[test]
    fn json() {
        assert_eq!(ValidationResult::Ok.to_json().unwrap(), r#"{"kind":"ok"}"#);
        assert_eq!(
            ValidationResult::Error(String::from("bad")).to_json().unwrap(),
            r#"{"kind":"error","message":"bad"}"#
        );
    }
}
