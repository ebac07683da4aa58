mod encode;
mod finalize;
mod resolve;
mod validate;

pub mod directory;
pub mod error;
pub mod expand;
pub mod parse;
pub mod types;

use log::trace;

pub use directory::{Directory, GroupDetails, InMemoryDirectory, UserDetails};
pub use error::{Error, ErrorKind, Result};
pub use expand::EnvVars;
pub use types::{AddressToken, Charset, Config, Destination, FinalAddress};
pub use validate::ValidationResult;

/// Turns free-form recipient lists into concrete mail addresses, using a
/// directory to resolve user and group names.
pub struct RecipientResolver<D> {
    directory: D,
    config: Config,
}

impl<D: Directory> RecipientResolver<D> {
    pub fn new(directory: D, config: Config) -> Self {
        Self { directory, config }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolve the To recipients of `spec`.
    pub fn resolve(&self, spec: &str, env: &EnvVars) -> Result<Vec<FinalAddress>> {
        self.resolve_for(spec, env, Destination::To)
    }

    /// Resolve the recipients of `spec` that belong to `destination`.
    ///
    /// The result is ordered by first appearance and holds each address once.
    /// A syntax or encoding error fails the whole call.
    pub fn resolve_for(
        &self,
        spec: &str,
        env: &EnvVars,
        destination: Destination,
    ) -> Result<Vec<FinalAddress>> {
        if spec.trim().is_empty() {
            return Ok(Vec::new());
        }

        let expanded = expand::normalize(spec, env);

        trace!("Normalized recipient list: {}", expanded);

        let tokens = parse::split(&expanded)?.into_destination(destination);
        let tokens = resolve::resolve_identities(&self.directory, tokens);

        finalize::finalize(&self.directory, &self.config, tokens)
    }

    pub fn is_group(&self, name: &str) -> bool {
        self.directory.lookup_group(name).is_some()
    }

    pub fn user_details(&self, id: &str) -> Option<UserDetails> {
        self.directory.lookup_user(id)
    }

    /// The email configured for a user id, if the user exists and has one.
    pub fn configured_email(&self, id: &str) -> Option<String> {
        finalize::configured_email(&self.directory, id)
    }
}
