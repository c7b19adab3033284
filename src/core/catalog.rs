//! # Tag Catalog
//!
//! The ordered list of tags the panel offers as filters. Order is display
//! order, and the truncation engine measures tags in exactly this order.
//!
//! The catalog is fixed when the app is constructed. Nothing mutates it
//! afterwards, so it hands out plain slices.

use log::debug;

/// Tags shown when the config does not supply its own list.
pub const DEFAULT_TAGS: &[&str] = &[
    "writing",
    "research",
    "science",
    "technology",
    "art",
    "music",
    "history",
    "literature",
    "mathematics",
    "programming",
    "design",
    "photography",
    "biology",
    "chemistry",
    "physics",
    "psychology",
    "philosophy",
    "business",
    "economics",
    "politics",
    "environment",
    "health",
    "fitness",
    "food",
    "travel",
    "sports",
    "fashion",
    "culture",
    "education",
    "language",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCatalog {
    tags: Vec<String>,
}

impl Default for TagCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_TAGS.iter().map(|t| t.to_string()))
    }
}

impl TagCatalog {
    /// Build a catalog from an ordered list of tags.
    ///
    /// Surrounding whitespace is trimmed, blank entries are dropped and a
    /// repeated tag keeps its first position.
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for tag in tags {
            let tag: String = tag.into();
            let tag = tag.trim();
            if tag.is_empty() {
                continue;
            }
            if unique.iter().any(|t| t == tag) {
                debug!("Dropping duplicate catalog tag '{}'", tag);
                continue;
            }
            unique.push(tag.to_string());
        }
        Self { tags: unique }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// The first `count` tags in display order (clamped to the catalog size).
    pub fn prefix(&self, count: usize) -> &[String] {
        &self.tags[..count.min(self.tags.len())]
    }
}
