//! Search filter templates.
//!
//! Templates name parameters in braces, e.g. `(member={user})`. Values are
//! escaped when the filter is rendered so they cannot change its structure.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::error::DirectoryError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    template: String,
    params: BTreeMap<String, String>,
}

impl SearchFilter {
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            params: BTreeMap::new(),
        }
    }

    /// Bind `value` to the `{name}` placeholder.
    #[must_use]
    pub fn with_param(mut self, name: &str, value: impl Into<String>) -> Self {
        self.params.insert(name.to_owned(), value.into());
        self
    }

    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Render the filter with every placeholder replaced by its escaped value.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFilter` if a placeholder is unbound or unterminated.
    pub fn render(&self) -> Result<String, DirectoryError> {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();
        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let Some(end) = after.find('}') else {
                return Err(DirectoryError::InvalidFilter(format!(
                    "unterminated placeholder in '{}'",
                    self.template
                )));
            };
            let name = &after[..end];
            let value = self.params.get(name).ok_or_else(|| {
                DirectoryError::InvalidFilter(format!("unbound parameter '{name}'"))
            })?;
            out.push_str(&escape_filter_value(value));
            rest = &after[end + 1..];
        }
        out.push_str(rest);
        Ok(out)
    }
}

/// Escape a value for use inside a search filter (RFC 4515).
#[must_use]
pub fn escape_filter_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' | '*' | '(' | ')' | '\0' => {
                let _ = write!(out, "\\{:02x}", u32::from(c));
            }
            _ => out.push(c),
        }
    }
    out
}
