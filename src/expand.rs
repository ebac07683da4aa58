use std::{
    collections::{BTreeMap, HashMap},
    sync::OnceLock,
};

use regex::{Captures, Regex};

/// `$NAME` or `${NAME}`; braces additionally allow dots in the name.
const VARIABLE_PATTERN: &str = r"\$([A-Za-z0-9_]+|\{[A-Za-z0-9_.]+\})";

fn variable_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();

    REGEX.get_or_init(|| Regex::new(VARIABLE_PATTERN).expect("variable pattern is valid"))
}

/// ASCII white space runs; no-break and other Unicode spaces are kept.
const SPACE_PATTERN: &str = r"[ \t\n\x0B\x0C\r]+";

fn space_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();

    REGEX.get_or_init(|| Regex::new(SPACE_PATTERN).expect("space pattern is valid"))
}

/// Variables available for substitution in a recipient list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvVars {
    vars: BTreeMap<String, String>,
}

impl EnvVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) -> Option<String> {
        self.vars.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Substitute every known variable reference in `input`.
    ///
    /// References to unknown variables are kept verbatim. Substituted values are
    /// not expanded a second time.
    pub fn expand(&self, input: &str) -> String {
        variable_regex()
            .replace_all(input, |caps: &Captures| {
                let name = caps[1].trim_start_matches('{').trim_end_matches('}');

                match self.get(name) {
                    Some(value) => value.to_string(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}

impl From<HashMap<String, String>> for EnvVars {
    fn from(vars: HashMap<String, String>) -> Self {
        Self {
            vars: vars.into_iter().collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvVars {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// Collapse whitespace runs into a single space. A list without any comma is
/// taken to be space separated and gets its spaces turned into commas.
pub fn fixup_spaces(input: &str) -> String {
    let collapsed = space_regex().replace_all(input, " ");

    if collapsed.contains(' ') && !collapsed.contains(',') {
        collapsed.replace(' ', ",")
    } else {
        collapsed.into_owned()
    }
}

/// Expand variables and normalize delimiters of a raw recipient list.
pub fn normalize(raw: &str, env: &EnvVars) -> String {
    fixup_spaces(&env.expand(raw))
}

#[cfg(test)]
mod test {
    use super::*;

    fn env() -> EnvVars {
        vec![
            ("TEAM", "dev@example.com qa@example.com"),
            ("OWNER", "jane"),
            ("build.user", "bob"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn expand_known_variables() {
        let env = env();

        assert_eq!(env.expand("$OWNER"), "jane");
        assert_eq!(env.expand("${OWNER}, cc:$TEAM"), "jane, cc:dev@example.com qa@example.com");
        assert_eq!(env.expand("${build.user}"), "bob");
    }

    #[test]
    fn unknown_variables_stay_literal() {
        let env = env();

        assert_eq!(env.expand("$MISSING, ${ALSO_MISSING}"), "$MISSING, ${ALSO_MISSING}");
        assert_eq!(env.expand("cost: $"), "cost: $");
    }

    #[test]
    fn values_are_not_expanded_twice() {
        let env: EnvVars = vec![("A", "$B"), ("B", "b")].into_iter().collect();

        assert_eq!(env.expand("$A"), "$B");
    }

    #[test]
    fn fixup() {
        assert_eq!(fixup_spaces("a@x.com  \t b@x.com\nc"), "a@x.com,b@x.com,c");
        assert_eq!(
            fixup_spaces("Jane Doe <jane@x.com>,   bob"),
            "Jane Doe <jane@x.com>, bob"
        );
        assert_eq!(fixup_spaces(" a@x.com"), ",a@x.com");
        assert_eq!(fixup_spaces("a@x.com"), "a@x.com");
        assert_eq!(fixup_spaces("a\x0B\x0Cb"), "a,b");
    }

    #[test]
    fn no_break_space_is_not_a_separator() {
        assert_eq!(
            fixup_spaces("Jürgen\u{a0}Müller <jm@x.com>"),
            "Jürgen\u{a0}Müller,<jm@x.com>"
        );
        assert_eq!(
            fixup_spaces("Jürgen\u{a0}Müller <jm@x.com>, a@x.com"),
            "Jürgen\u{a0}Müller <jm@x.com>, a@x.com"
        );
    }

    #[test]
    fn normalize_expands_before_fixup() {
        assert_eq!(
            normalize("$TEAM", &env()),
            "dev@example.com,qa@example.com"
        );
    }

    #[test]
    fn from_hash_map() {
        let mut vars = HashMap::new();
        vars.insert(String::from("X"), String::from("y"));

        let env = EnvVars::from(vars);
        assert_eq!(env.get("X"), Some("y"));
        assert!(!env.is_empty());
    }
}
