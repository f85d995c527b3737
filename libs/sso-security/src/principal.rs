use std::collections::BTreeMap;

/// `Principal` is the authenticated identity produced by credential validation.
///
/// It carries the principal identifier and a multi-valued attribute mapping.
/// A principal is immutable once built; resolvers only ever read it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Principal {
    /// Principal identifier (usually the username).
    id: String,
    /// Attribute name to one-or-many values.
    #[serde(default)]
    attributes: BTreeMap<String, Vec<String>>,
}

impl Principal {
    /// Create a new `Principal` builder
    #[must_use]
    pub fn builder(id: impl Into<String>) -> PrincipalBuilder {
        PrincipalBuilder {
            id: id.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Create a principal that carries no attributes.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self::builder(id).build()
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn attributes(&self) -> &BTreeMap<String, Vec<String>> {
        &self.attributes
    }

    /// Values of the named attribute, if the principal has it.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&[String]> {
        self.attributes.get(name).map(Vec::as_slice)
    }

    /// Returns `true` if any value of `name` satisfies `predicate`.
    pub fn has_attribute_value(&self, name: &str, predicate: impl Fn(&str) -> bool) -> bool {
        self.attribute(name)
            .is_some_and(|values| values.iter().any(|v| predicate(v)))
    }
}

pub struct PrincipalBuilder {
    id: String,
    attributes: BTreeMap<String, Vec<String>>,
}

impl PrincipalBuilder {
    /// Append a single value to the named attribute.
    #[must_use]
    pub fn attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes
            .entry(name.to_owned())
            .or_default()
            .push(value.into());
        self
    }

    /// Replace the named attribute with the given values.
    #[must_use]
    pub fn attribute_values<I, S>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes
            .insert(name.to_owned(), values.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn build(self) -> Principal {
        Principal {
            id: self.id,
            attributes: self.attributes,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_principal_builder_full() {
        let principal = Principal::builder("casuser")
            .attribute("memberOf", "staff")
            .attribute("memberOf", "faculty")
            .attribute_values("mail", ["casuser@example.org"])
            .build();

        assert_eq!(principal.id(), "casuser");
        assert_eq!(
            principal.attribute("memberOf"),
            Some(&["staff".to_owned(), "faculty".to_owned()][..])
        );
        assert_eq!(
            principal.attribute("mail"),
            Some(&["casuser@example.org".to_owned()][..])
        );
    }

    #[test]
    fn test_principal_without_attributes() {
        let principal = Principal::new("casuser");

        assert_eq!(principal.id(), "casuser");
        assert!(principal.attributes().is_empty());
        assert!(principal.attribute("memberOf").is_none());
    }

    #[test]
    fn test_attribute_values_replaces_previous() {
        let principal = Principal::builder("casuser")
            .attribute("memberOf", "staff")
            .attribute_values("memberOf", ["admins"])
            .build();

        assert_eq!(principal.attribute("memberOf"), Some(&["admins".to_owned()][..]));
    }

    #[test]
    fn test_has_attribute_value() {
        let principal = Principal::builder("casuser")
            .attribute("memberOf", "cn=admins,ou=groups")
            .build();

        assert!(principal.has_attribute_value("memberOf", |v| v.starts_with("cn=admins")));
        assert!(!principal.has_attribute_value("memberOf", |v| v == "staff"));
        assert!(!principal.has_attribute_value("mail", |_| true));
    }

    #[test]
    fn test_principal_serialize_deserialize() {
        let original = Principal::builder("casuser")
            .attribute("memberOf", "staff")
            .build();

        let serialized = serde_json::to_string(&original).unwrap();
        let deserialized: Principal = serde_json::from_str(&serialized).unwrap();

        assert_eq!(deserialized, original);
    }

    #[test]
    fn test_principal_deserialize_without_attributes() {
        let principal: Principal = serde_json::from_str(r#"{"id":"casuser"}"#).unwrap();

        assert_eq!(principal.id(), "casuser");
        assert!(principal.attributes().is_empty());
    }
}
