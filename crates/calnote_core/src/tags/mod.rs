//! Runtime tag registry.
//!
//! # Responsibility
//! - Own the ordered set of category labels offered for notes.
//! - Provide the default tag for freshly synthesized entries.
//!
//! # Invariants
//! - Tags are unique by exact string match and keep insertion order.
//! - The registry is never empty; the first tag is the default.
//! - Tags are never removed during a session.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Built-in tag seed; the first entry is the default tag.
pub const DEFAULT_TAGS: &[&str] = &["金融", "日记", "专业课"];

/// Tag registry construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagRegistryError {
    /// Seed contained no non-blank tag.
    EmptySeed,
}

impl Display for TagRegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySeed => write!(f, "tag seed must contain at least one non-blank tag"),
        }
    }
}

impl Error for TagRegistryError {}

/// Ordered, grow-only set of known tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRegistry {
    tags: Vec<String>,
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self {
            tags: DEFAULT_TAGS.iter().map(|tag| (*tag).to_string()).collect(),
        }
    }
}

impl TagRegistry {
    /// Builds a registry from `seed`, skipping blanks and duplicates.
    pub fn with_seed<I, T>(seed: I) -> Result<Self, TagRegistryError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut registry = Self { tags: Vec::new() };
        registry.absorb(seed);
        if registry.tags.is_empty() {
            return Err(TagRegistryError::EmptySeed);
        }
        Ok(registry)
    }

    /// Returns known tags in insertion order.
    pub fn known_tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the tag assigned to new blank entries.
    pub fn default_tag(&self) -> &str {
        // Construction guarantees at least one tag.
        self.tags.first().map(String::as_str).unwrap_or(DEFAULT_TAGS[0])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag == name.trim())
    }

    /// Appends `name` if it is non-blank and not yet known.
    ///
    /// Surrounding whitespace is trimmed first; the trimmed name is then
    /// matched exactly (case-sensitive) against known tags, so `" Health "`
    /// and `"Health"` are the same tag while `"health"` is a different one.
    ///
    /// Returns `true` when the registry grew. Blank names are ignored.
    pub fn add_tag(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.tags.push(name.to_string());
        true
    }

    /// Adds every tag from `tags`; returns how many were new.
    pub fn absorb<I, T>(&mut self, tags: I) -> usize
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        tags.into_iter()
            .filter(|tag| self.add_tag(tag.as_ref()))
            .count()
    }

    /// Resolves a requested tag to one the registry knows.
    ///
    /// Non-blank names are registered on first use; blank names fall back to
    /// the default tag.
    pub fn resolve(&mut self, name: &str) -> String {
        let name = name.trim();
        if name.is_empty() {
            return self.default_tag().to_string();
        }
        self.add_tag(name);
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{TagRegistry, TagRegistryError, DEFAULT_TAGS};

    #[test]
    fn default_registry_uses_builtin_seed() {
        let registry = TagRegistry::default();
        assert_eq!(registry.known_tags(), DEFAULT_TAGS);
        assert_eq!(registry.default_tag(), "金融");
    }

    #[test]
    fn with_seed_rejects_blank_only_seed() {
        let err = TagRegistry::with_seed(["", "  "]).unwrap_err();
        assert_eq!(err, TagRegistryError::EmptySeed);
    }

    #[test]
    fn with_seed_deduplicates_and_keeps_order() {
        let registry = TagRegistry::with_seed(["work", "home", "work"]).unwrap();
        assert_eq!(registry.known_tags(), ["work", "home"]);
    }

    #[test]
    fn resolve_falls_back_to_default_for_blank_names() {
        let mut registry = TagRegistry::default();
        assert_eq!(registry.resolve("   "), "金融");
        assert_eq!(registry.resolve(" Health "), "Health");
        assert!(registry.contains("Health"));
    }
}
