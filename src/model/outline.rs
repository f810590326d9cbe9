//! Outline types: the only artifact visible to callers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Heading level, serialized as `"H1"` .. `"H4"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
}

impl HeadingLevel {
    /// All levels, shallowest first.
    pub const ALL: [HeadingLevel; 4] = [Self::H1, Self::H2, Self::H3, Self::H4];

    /// Level for a 1-based depth, or `None` outside 1..=4.
    pub fn from_depth(depth: u32) -> Option<Self> {
        match depth {
            1 => Some(Self::H1),
            2 => Some(Self::H2),
            3 => Some(Self::H3),
            4 => Some(Self::H4),
            _ => None,
        }
    }

    /// 1-based depth.
    pub fn depth(self) -> u32 {
        match self {
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
            Self::H4 => 4,
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.depth())
    }
}

/// A single heading of the inferred outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Heading level
    pub level: HeadingLevel,
    /// Heading text
    pub text: String,
    /// Page index (same base as the source fragments)
    pub page: u32,
}

impl OutlineEntry {
    /// Create a new outline entry.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }

    /// Uniqueness key: (level, lowercased text, page).
    pub fn key(&self) -> (HeadingLevel, String, u32) {
        (self.level, self.text.to_lowercase(), self.page)
    }
}

/// Title and outline of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineResult {
    /// Document title (possibly empty)
    pub title: String,
    /// Headings in document order
    pub outline: Vec<OutlineEntry>,
}

impl OutlineResult {
    /// Create a result.
    pub fn new(title: impl Into<String>, outline: Vec<OutlineEntry>) -> Self {
        Self {
            title: title.into(),
            outline,
        }
    }

    /// The result emitted for unreadable documents.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if neither a title nor any heading was found.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.outline.is_empty()
    }

    /// Number of headings.
    pub fn heading_count(&self) -> usize {
        self.outline.len()
    }

    /// Nest the flat outline into a tree.
    ///
    /// Each entry becomes a child of the closest preceding entry with a
    /// shallower level.
    pub fn to_tree(&self) -> Vec<OutlineNode> {
        let mut roots = Vec::new();
        let mut stack: Vec<OutlineNode> = Vec::new();

        for entry in &self.outline {
            while stack
                .last()
                .is_some_and(|top| top.entry.level >= entry.level)
            {
                close_top(&mut stack, &mut roots);
            }
            stack.push(OutlineNode::new(entry.clone()));
        }
        while !stack.is_empty() {
            close_top(&mut stack, &mut roots);
        }

        roots
    }
}

fn close_top(stack: &mut Vec<OutlineNode>, roots: &mut Vec<OutlineNode>) {
    if let Some(node) = stack.pop() {
        match stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => roots.push(node),
        }
    }
}

/// A heading with its nested sub-headings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineNode {
    /// The heading itself
    pub entry: OutlineEntry,
    /// Child headings
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// Create a leaf node.
    pub fn new(entry: OutlineEntry) -> Self {
        Self {
            entry,
            children: Vec::new(),
        }
    }

    /// Get the total number of nodes (including this one).
    pub fn total_items(&self) -> usize {
        1 + self.children.iter().map(|c| c.total_items()).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level_serialization() {
        let entry = OutlineEntry::new(HeadingLevel::H2, "Background", 3);
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"level":"H2","text":"Background","page":3}"#);
    }

    #[test]
    fn test_heading_level_depth() {
        assert_eq!(HeadingLevel::from_depth(3), Some(HeadingLevel::H3));
        assert_eq!(HeadingLevel::from_depth(0), None);
        assert_eq!(HeadingLevel::from_depth(5), None);
        assert_eq!(HeadingLevel::H4.depth(), 4);
        assert_eq!(HeadingLevel::H2.to_string(), "H2");
    }

    #[test]
    fn test_entry_key_is_case_insensitive() {
        let a = OutlineEntry::new(HeadingLevel::H1, "Scope of Work", 1);
        let b = OutlineEntry::new(HeadingLevel::H1, "SCOPE OF WORK", 1);
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_outline_tree() {
        let result = OutlineResult::new(
            "Guide",
            vec![
                OutlineEntry::new(HeadingLevel::H1, "Chapter 1", 1),
                OutlineEntry::new(HeadingLevel::H2, "Section 1.1", 2),
                OutlineEntry::new(HeadingLevel::H3, "Detail 1.1.1", 2),
                OutlineEntry::new(HeadingLevel::H2, "Section 1.2", 5),
                OutlineEntry::new(HeadingLevel::H1, "Chapter 2", 7),
            ],
        );

        let tree = result.to_tree();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].total_items(), 4);
        assert_eq!(tree[0].children.len(), 2);
        assert_eq!(tree[0].children[0].children[0].entry.text, "Detail 1.1.1");
        assert_eq!(tree[1].entry.text, "Chapter 2");
    }

    #[test]
    fn test_empty_result() {
        let result = OutlineResult::empty();
        assert!(result.is_empty());
        assert_eq!(
            serde_json::to_string(&result).unwrap(),
            r#"{"title":"","outline":[]}"#
        );
    }
}
