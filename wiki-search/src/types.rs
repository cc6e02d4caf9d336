//! Core types returned by encyclopedia lookups.

use serde::{Deserialize, Serialize};

/// Details of a single resolved encyclopedia page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDetail {
    /// The canonical page title (after redirects are followed).
    pub title: String,
    /// Category names without the `Category:` namespace prefix, in the
    /// order the service reported them, without duplicates.
    pub categories: Vec<String>,
}

impl PageDetail {
    /// Build a page detail, dropping repeated category names.
    pub fn new(title: impl Into<String>, categories: impl IntoIterator<Item = String>) -> Self {
        let mut unique: Vec<String> = Vec::new();
        for category in categories {
            if !unique.contains(&category) {
                unique.push(category);
            }
        }
        Self {
            title: title.into(),
            categories: unique,
        }
    }
}
