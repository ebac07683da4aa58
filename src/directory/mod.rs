//! Access to the identity store that user and group names are resolved against.

use std::{rc::Rc, sync::Arc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod memory;

pub use memory::InMemoryDirectory;

/// A user as seen by the security realm.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UserDetails {
    id: String,
    authorities: Vec<String>,
}

impl UserDetails {
    pub fn new<I, A>(id: I, authorities: A) -> Self
    where
        I: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Self {
            id: id.into(),
            authorities: authorities.into_iter().map(Into::into).collect(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Roles and group memberships granted to the user.
    pub fn authorities(&self) -> &[String] {
        &self.authorities
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.iter().any(|granted| granted == authority)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroupDetails {
    name: String,
}

impl GroupDetails {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Read-only queries against a user and group store.
///
/// Lookups that fail for any reason report `None`; callers treat that as
/// "no such entry" and move on.
pub trait Directory {
    fn lookup_group(&self, name: &str) -> Option<GroupDetails>;

    fn lookup_user(&self, id: &str) -> Option<UserDetails>;

    /// Every known user id. Implementations must not page.
    fn list_users(&self) -> Vec<String>;

    /// The email address a user configured for themselves, if any. It may lack a domain.
    fn configured_email(&self, id: &str) -> Option<String>;
}

macro_rules! forward_directory {
    ($($ptr:ty),*) => {
        $(
            impl<D: Directory + ?Sized> Directory for $ptr {
                fn lookup_group(&self, name: &str) -> Option<GroupDetails> {
                    (**self).lookup_group(name)
                }

                fn lookup_user(&self, id: &str) -> Option<UserDetails> {
                    (**self).lookup_user(id)
                }

                fn list_users(&self) -> Vec<String> {
                    (**self).list_users()
                }

                fn configured_email(&self, id: &str) -> Option<String> {
                    (**self).configured_email(id)
                }
            }
        )*
    };
}

forward_directory!(&D, Box<D>, Rc<D>, Arc<D>);
