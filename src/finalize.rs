use log::debug;

use crate::{
    directory::Directory,
    encode::encode_word,
    error::Result,
    types::{AddressSet, AddressToken, Config, FinalAddress},
};

/// The address a user configured, logging the resolution.
pub fn configured_email<D: Directory + ?Sized>(directory: &D, id: &str) -> Option<String> {
    let email = directory.configured_email(id)?;

    debug!("Resolved {} to {}", id, email);

    Some(email)
}

/// Turn resolved tokens into concrete addresses with header-safe display names.
///
/// Identifiers first take the user's configured email, then the default
/// suffix. An identifier that gets neither is kept as is.
pub fn finalize<D: Directory + ?Sized>(
    directory: &D,
    config: &Config,
    tokens: AddressSet<AddressToken>,
) -> Result<Vec<FinalAddress>> {
    let mut finalized = AddressSet::new();

    for token in tokens {
        let mut address = token.address().to_string();

        if !address.contains('@') {
            if let Some(email) = configured_email(directory, &address) {
                address = email;
            }
        }

        if !address.contains('@') {
            if let Some(suffix) = config.usable_suffix() {
                address.push_str(suffix);
            }
        }

        let name = match token.name() {
            Some(name) => Some(encode_word(name, config.get_charset())?),
            None => None,
        };

        finalized.insert(FinalAddress::new(name, address));
    }

    Ok(finalized.into_vec())
}
