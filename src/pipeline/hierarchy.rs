//! Hierarchy normalization.
//!
//! One left-to-right pass that tracks, per level, the last accepted entry on
//! the current branch. An entry whose parent level is not open is promoted
//! until it is, so the first entry is always H1 and no level is skipped.

use std::collections::HashSet;

use crate::model::{HeadingLevel, OutlineEntry};

const DEPTHS: usize = HeadingLevel::ALL.len();

/// Open entries of the current branch, indexed by depth - 1.
#[derive(Debug, Default)]
struct Branch {
    open: [Option<usize>; DEPTHS],
}

impl Branch {
    /// Deepest level `level` may keep given the open parents.
    fn repair(&self, level: HeadingLevel) -> HeadingLevel {
        let mut depth = level.depth() as usize;
        while depth > 1 && self.open[depth - 2].is_none() {
            depth -= 1;
        }
        HeadingLevel::from_depth(depth as u32).unwrap_or(HeadingLevel::H1)
    }

    /// Record `index` at `level`, closing every deeper level.
    fn accept(&mut self, level: HeadingLevel, index: usize) {
        let depth = level.depth() as usize;
        self.open[depth - 1] = Some(index);
        for slot in self.open.iter_mut().skip(depth) {
            *slot = None;
        }
    }
}

/// Deduplicate and repair level nesting.
///
/// Duplicates on (level, lowercased text, page) are dropped both before and
/// after repair.
pub fn normalize_hierarchy(entries: Vec<OutlineEntry>) -> Vec<OutlineEntry> {
    let mut seen_source = HashSet::new();
    let mut seen_output = HashSet::new();
    let mut branch = Branch::default();
    let mut result: Vec<OutlineEntry> = Vec::with_capacity(entries.len());

    for mut entry in entries {
        if !seen_source.insert(entry.key()) {
            continue;
        }

        let repaired = branch.repair(entry.level);
        if repaired != entry.level {
            log::debug!(
                "normalize_hierarchy: {} -> {} for {:?} (page {})",
                entry.level,
                repaired,
                entry.text,
                entry.page
            );
            entry.level = repaired;
        }

        if !seen_output.insert(entry.key()) {
            continue;
        }

        branch.accept(entry.level, result.len());
        result.push(entry);
    }

    result
}

/// Whether the outline starts at H1 and never skips a level.
pub fn is_well_nested(entries: &[OutlineEntry]) -> bool {
    let mut branch = Branch::default();
    for (index, entry) in entries.iter().enumerate() {
        if branch.repair(entry.level) != entry.level {
            return false;
        }
        branch.accept(entry.level, index);
    }
    true
}
