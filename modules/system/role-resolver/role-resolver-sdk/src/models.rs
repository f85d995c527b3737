//! Domain models for the role resolver module.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One directory entry: a distinguished name and its attributes.
///
/// Attribute names are case-insensitive, as in LDAP; they are stored
/// lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub dn: String,
    #[serde(default, deserialize_with = "lowercase_keys")]
    attributes: BTreeMap<String, Vec<String>>,
}

impl DirectoryEntry {
    #[must_use]
    pub fn new(dn: impl Into<String>) -> Self {
        Self {
            dn: dn.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Add values to the named attribute.
    #[must_use]
    pub fn with_attribute<I, S>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes
            .entry(name.to_ascii_lowercase())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// Values of the named attribute; `None` if the entry lacks it.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&[String]> {
        self.attributes
            .get(&name.to_ascii_lowercase())
            .map(Vec::as_slice)
    }
}

fn lowercase_keys<'de, D>(deserializer: D) -> Result<BTreeMap<String, Vec<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = BTreeMap::<String, Vec<String>>::deserialize(deserializer)?;
    let mut attributes: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, values) in raw {
        attributes
            .entry(name.to_ascii_lowercase())
            .or_default()
            .extend(values);
    }
    Ok(attributes)
}

/// Authorization role, e.g. `ROLE_ADMINS`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleName(String);

impl RoleName {
    /// Role derived from a directory value: `prefix` followed by the value
    /// uppercased.
    #[must_use]
    pub fn from_value(prefix: &str, value: &str) -> Self {
        Self(format!("{prefix}{}", value.to_uppercase()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn attribute_names_are_case_insensitive() {
        let entry = DirectoryEntry::new("cn=admins,ou=groups,dc=example,dc=org")
            .with_attribute("CN", ["admins"])
            .with_attribute("cn", ["administrators"]);

        assert_eq!(
            entry.attribute("Cn"),
            Some(&["admins".to_owned(), "administrators".to_owned()][..])
        );
        assert!(entry.attribute("member").is_none());
    }

    #[test]
    fn deserialized_attribute_names_are_lowercased() {
        let entry: DirectoryEntry = serde_json::from_str(
            r#"{"dn":"uid=casuser,ou=people","attributes":{"UID":["casuser"]}}"#,
        )
        .unwrap();

        assert_eq!(entry.attribute("uid"), Some(&["casuser".to_owned()][..]));
    }

    #[test]
    fn role_name_is_prefixed_and_uppercased() {
        let role = RoleName::from_value("ROLE_", "Help-Desk");

        assert_eq!(role.as_str(), "ROLE_HELP-DESK");
        assert_eq!(role.to_string(), "ROLE_HELP-DESK");
    }
}
