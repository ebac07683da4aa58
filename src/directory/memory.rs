use super::{Directory, GroupDetails, UserDetails};

#[derive(Debug, Clone)]
struct MemoryUser {
    id: String,
    email: Option<String>,
    authorities: Vec<String>,
}

/// A directory held entirely in memory. Users are listed in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    users: Vec<MemoryUser>,
    groups: Vec<String>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    fn user_mut(&mut self, id: &str) -> &mut MemoryUser {
        let index = match self.users.iter().position(|user| user.id == id) {
            Some(index) => index,
            None => {
                self.users.push(MemoryUser {
                    id: id.to_string(),
                    email: None,
                    authorities: Vec::new(),
                });

                self.users.len() - 1
            }
        };

        &mut self.users[index]
    }

    pub fn user<I: AsRef<str>>(mut self, id: I) -> Self {
        self.user_mut(id.as_ref());

        self
    }

    pub fn user_with_email<I: AsRef<str>, E: Into<String>>(mut self, id: I, email: E) -> Self {
        self.user_mut(id.as_ref()).email = Some(email.into());

        self
    }

    /// Grant an authority to a user, creating the user if needed.
    pub fn grant<I: AsRef<str>, A: Into<String>>(mut self, id: I, authority: A) -> Self {
        let authority = authority.into();
        let user = self.user_mut(id.as_ref());

        if !user.authorities.contains(&authority) {
            user.authorities.push(authority);
        }

        self
    }

    pub fn group<N: Into<String>>(mut self, name: N) -> Self {
        let name = name.into();

        if !self.groups.contains(&name) {
            self.groups.push(name);
        }

        self
    }

    /// Register a group and grant its authority to each of `members`.
    pub fn group_with_members<N, M>(self, name: N, members: M) -> Self
    where
        N: Into<String>,
        M: IntoIterator,
        M::Item: AsRef<str>,
    {
        let name = name.into();
        let mut directory = self.group(name.clone());

        for member in members {
            directory = directory.grant(member, name.clone());
        }

        directory
    }
}

impl Directory for InMemoryDirectory {
    fn lookup_group(&self, name: &str) -> Option<GroupDetails> {
        self.groups
            .iter()
            .find(|group| *group == name)
            .map(GroupDetails::new)
    }

    fn lookup_user(&self, id: &str) -> Option<UserDetails> {
        self.users
            .iter()
            .find(|user| user.id == id)
            .map(|user| UserDetails::new(user.id.clone(), user.authorities.clone()))
    }

    fn list_users(&self) -> Vec<String> {
        self.users.iter().map(|user| user.id.clone()).collect()
    }

    fn configured_email(&self, id: &str) -> Option<String> {
        self.users
            .iter()
            .find(|user| user.id == id)
            .and_then(|user| user.email.clone())
    }
}
