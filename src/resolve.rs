use std::collections::HashSet;

use log::debug;

use crate::{
    directory::{Directory, GroupDetails},
    types::{AddressSet, AddressToken, Destination},
};

/// Replace group names with their members and drop identifiers the directory does not know.
///
/// Literal addresses and known user ids pass through untouched. Group members
/// are appended after the surviving entries, without a display name.
pub fn resolve_identities<D: Directory + ?Sized>(
    directory: &D,
    tokens: AddressSet<AddressToken>,
) -> AddressSet<AddressToken> {
    let users = directory.list_users();
    let known: HashSet<&str> = users.iter().map(String::as_str).collect();

    let mut resolved = AddressSet::new();
    let mut groups: Vec<(GroupDetails, Destination)> = Vec::new();

    for token in tokens {
        if token.has_domain() || known.contains(token.address()) {
            resolved.insert(token);
            continue;
        }

        match directory.lookup_group(token.address()) {
            Some(group) => groups.push((group, token.destination())),
            None => debug!("Dropping unknown recipient {}", token.address()),
        }
    }

    for (group, destination) in groups {
        let members = group_members(directory, &users, group.name());

        debug!("Expanded group {} to {} member(s)", group.name(), members.len());

        for member in members {
            resolved.insert(AddressToken::new(None, member).with_destination(destination));
        }
    }

    resolved
}

/// Users holding an authority named exactly like the group.
///
/// Every user is looked up, so the cost grows with groups x users x authorities.
fn group_members<'u, D: Directory + ?Sized>(
    directory: &D,
    users: &'u [String],
    group: &str,
) -> Vec<&'u str> {
    users
        .iter()
        .filter(|id| {
            directory
                .lookup_user(id)
                .map(|details| details.has_authority(group))
                .unwrap_or(false)
        })
        .map(String::as_str)
        .collect()
}
