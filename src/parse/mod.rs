//! Splitting a normalized recipient list into its To and Cc parts.

pub mod address;

use crate::{
    error::Result,
    types::{AddressSet, AddressToken, Destination},
};

/// Inline marker that moves the following recipient to Cc.
pub const CC_MARKER: &str = "cc:";

#[derive(Debug, Default)]
pub struct Split {
    to: AddressSet<AddressToken>,
    cc: AddressSet<AddressToken>,
}

impl Split {
    pub fn to(&self) -> &AddressSet<AddressToken> {
        &self.to
    }

    pub fn cc(&self) -> &AddressSet<AddressToken> {
        &self.cc
    }

    pub fn into_destination(self, destination: Destination) -> AddressSet<AddressToken> {
        match destination {
            Destination::To => self.to,
            Destination::Cc => self.cc,
        }
    }
}

/// Parse the list with all markers removed, then decide per token whether
/// a marker preceded it in `expanded`.
///
/// The decision is a plain substring search on the unstripped text, so a
/// recipient whose text is a prefix of a Cc recipient is classified as Cc
/// too (`a@x.com, cc:a@x.com.au` puts both on Cc).
pub fn split(expanded: &str) -> Result<Split> {
    let stripped = expanded.replace(CC_MARKER, "");
    let mut split = Split::default();

    for token in address::address_list(&stripped)? {
        if is_cc(expanded, &token) {
            split.cc.insert(token.with_destination(Destination::Cc));
        } else {
            split.to.insert(token.with_destination(Destination::To));
        }
    }

    Ok(split)
}

fn is_cc(expanded: &str, token: &AddressToken) -> bool {
    match token.name() {
        Some(name) => {
            expanded.contains(&format!("{}{}", CC_MARKER, name))
                || expanded.contains(&format!("{}\"{}\"", CC_MARKER, token))
        }
        None => expanded.contains(&format!("{}{}", CC_MARKER, token.address())),
    }
}
