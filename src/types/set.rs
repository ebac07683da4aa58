use std::collections::HashSet;

/// The identity used to collapse duplicate recipients.
pub trait SetKey {
    fn set_key(&self) -> String;
}

/// An insertion ordered collection that keeps the first of any duplicates.
#[derive(Debug, Clone)]
pub struct AddressSet<T> {
    entries: Vec<T>,
    keys: HashSet<String>,
}

impl<T> Default for AddressSet<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            keys: HashSet::new(),
        }
    }
}

impl<T: SetKey> AddressSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the entry unless an equal one is already present. Returns whether it was added.
    pub fn insert(&mut self, entry: T) -> bool {
        if !self.keys.insert(entry.set_key()) {
            return false;
        }

        self.entries.push(entry);

        true
    }

    pub fn contains(&self, entry: &T) -> bool {
        self.keys.contains(&entry.set_key())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.entries
    }
}

impl<T: SetKey> Extend<T> for AddressSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for entry in iter {
            self.insert(entry);
        }
    }
}

impl<T: SetKey> FromIterator<T> for AddressSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);

        set
    }
}

impl<T> IntoIterator for AddressSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    impl SetKey for &str {
        fn set_key(&self) -> String {
            self.to_lowercase()
        }
    }

    #[test]
    fn first_occurrence_wins() {
        let set: AddressSet<&str> = vec!["b", "A", "a", "c", "B"].into_iter().collect();

        assert_eq!(set.into_vec(), vec!["b", "A", "c"]);
    }

    #[test]
    fn insert_reports_duplicates() {
        let mut set = AddressSet::new();

        assert!(set.insert("x"));
        assert!(!set.insert("X"));
        assert!(set.contains(&"x"));
        assert_eq!(set.len(), 1);
    }
}
