//! In-memory directory.
//!
//! Evaluates the subset of RFC 4515 filters the role resolver needs:
//! equality `(attr=value)`, presence `(attr=*)` and `&` conjunctions.
//! Values compare case-insensitively. The pseudo-attribute `dn` matches the
//! entry's distinguished name.

use async_trait::async_trait;
use role_resolver_sdk::{DirectoryEntry, DirectoryError, DirectorySearch, SearchFilter};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    entries: Vec<DirectoryEntry>,
}

impl StaticDirectory {
    #[must_use]
    pub fn new(entries: Vec<DirectoryEntry>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl DirectorySearch for StaticDirectory {
    async fn search(&self, filter: &SearchFilter) -> Result<Vec<DirectoryEntry>, DirectoryError> {
        let rendered = filter.render()?;
        let parsed = Filter::parse(&rendered)?;
        let found: Vec<DirectoryEntry> = self
            .entries
            .iter()
            .filter(|entry| parsed.matches(entry))
            .cloned()
            .collect();
        debug!(filter = %rendered, count = found.len(), "Static directory search");
        Ok(found)
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Filter {
    Equal { attribute: String, value: String },
    Present { attribute: String },
    And(Vec<Filter>),
}

impl Filter {
    fn parse(input: &str) -> Result<Self, DirectoryError> {
        let mut parser = Parser {
            input: input.trim(),
            pos: 0,
        };
        let filter = parser.filter()?;
        if parser.pos != parser.input.len() {
            return Err(parser.error("trailing characters"));
        }
        Ok(filter)
    }

    fn matches(&self, entry: &DirectoryEntry) -> bool {
        match self {
            Self::And(parts) => parts.iter().all(|part| part.matches(entry)),
            Self::Present { attribute } => {
                attribute == "dn" || entry.attribute(attribute).is_some_and(|v| !v.is_empty())
            }
            Self::Equal { attribute, value } => {
                if attribute == "dn" {
                    return entry.dn.eq_ignore_ascii_case(value);
                }
                entry
                    .attribute(attribute)
                    .is_some_and(|values| values.iter().any(|v| v.eq_ignore_ascii_case(value)))
            }
        }
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn error(&self, reason: &str) -> DirectoryError {
        DirectoryError::InvalidFilter(format!("{reason} at offset {} in '{}'", self.pos, self.input))
    }

    fn expect(&mut self, c: char) -> Result<(), DirectoryError> {
        if self.input[self.pos..].starts_with(c) {
            self.pos += c.len_utf8();
            Ok(())
        } else {
            Err(self.error(&format!("expected '{c}'")))
        }
    }

    fn filter(&mut self) -> Result<Filter, DirectoryError> {
        self.expect('(')?;
        let filter = if self.input[self.pos..].starts_with('&') {
            self.pos += 1;
            let mut parts = Vec::new();
            while self.input[self.pos..].starts_with('(') {
                parts.push(self.filter()?);
            }
            if parts.is_empty() {
                return Err(self.error("empty conjunction"));
            }
            Filter::And(parts)
        } else {
            self.item()?
        };
        self.expect(')')?;
        Ok(filter)
    }

    fn item(&mut self) -> Result<Filter, DirectoryError> {
        let rest = &self.input[self.pos..];
        let end = rest.find(')').ok_or_else(|| self.error("unterminated item"))?;
        let item = &rest[..end];
        let (attribute, raw) = item
            .split_once('=')
            .ok_or_else(|| self.error("expected '='"))?;
        let attribute = attribute.trim().to_ascii_lowercase();
        if attribute.is_empty() || raw.contains('(') {
            return Err(self.error("malformed item"));
        }
        let filter = if raw == "*" {
            Filter::Present { attribute }
        } else {
            Filter::Equal {
                attribute,
                value: unescape(raw).ok_or_else(|| self.error("bad escape"))?,
            }
        };
        self.pos += end;
        Ok(filter)
    }
}

/// Reverse `\xx` hex escapes.
fn unescape(raw: &str) -> Option<String> {
    let mut bytes = Vec::with_capacity(raw.len());
    let mut iter = raw.bytes();
    while let Some(b) = iter.next() {
        if b == b'\\' {
            let hi = char::from(iter.next()?).to_digit(16)?;
            let lo = char::from(iter.next()?).to_digit(16)?;
            bytes.push(u8::try_from(hi * 16 + lo).ok()?);
        } else {
            bytes.push(b);
        }
    }
    String::from_utf8(bytes).ok()
}
