use crate::config::CATEGORY_PATTERNS;
use crate::models::CategoryTag;

/// Maps listing-page URLs to categories by ordered substring match
#[derive(Debug, Clone)]
pub struct CategoryResolver {
    patterns: Vec<(String, CategoryTag)>,
}

impl CategoryResolver {
    pub fn new(patterns: impl IntoIterator<Item = (String, CategoryTag)>) -> Self {
        Self {
            patterns: patterns.into_iter().collect(),
        }
    }

    /// The first pattern contained in `url` wins
    pub fn resolve(&self, url: &str) -> CategoryTag {
        self.patterns
            .iter()
            .find(|(pattern, _)| url.contains(pattern.as_str()))
            .map(|(_, tag)| *tag)
            .unwrap_or(CategoryTag::UNKNOWN)
    }
}

impl Default for CategoryResolver {
    fn default() -> Self {
        Self::new(
            CATEGORY_PATTERNS
                .iter()
                .map(|(pattern, tag)| (pattern.to_string(), *tag)),
        )
    }
}
