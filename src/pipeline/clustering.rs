//! Style clustering and level assignment.
//!
//! Candidates sharing a rounded font size, boldness and indentation tier
//! form one style cluster. Clusters are ranked by an explicit composite key
//! (size descending, bold first, less indented first) and mapped onto
//! H1, H2, ... with every cluster past the depth cap sharing the deepest
//! level.

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use crate::model::{HeadingLevel, OutlineEntry};

use super::candidates::HeadingCandidate;
use super::options::PipelineOptions;

/// Cluster key: (rounded size, bold, indentation tier).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleKey {
    /// Font size in rounding steps (size / step, halves to even)
    pub size_steps: i64,
    /// Bold face
    pub bold: bool,
    /// Indentation tier
    pub tier: u8,
}

impl StyleKey {
    /// Key of a candidate.
    pub fn of(candidate: &HeadingCandidate, step: f32) -> Self {
        Self {
            size_steps: (candidate.line.size / step).round_ties_even() as i64,
            bold: candidate.line.bold,
            tier: candidate.tier,
        }
    }

    /// Rounded font size in points.
    pub fn size(&self, step: f32) -> f32 {
        self.size_steps as f32 * step
    }

    /// Sort key: larger first, bold first, less indented first.
    fn rank_key(&self) -> (Reverse<i64>, bool, u8) {
        (Reverse(self.size_steps), !self.bold, self.tier)
    }
}

/// One style group with its assigned level.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleCluster {
    /// Shared style
    pub key: StyleKey,
    /// Assigned heading level
    pub level: HeadingLevel,
    /// Candidate texts in document order
    pub texts: Vec<String>,
}

/// Groups candidates and assigns levels.
pub struct StyleClusterer<'a> {
    options: &'a PipelineOptions,
}

impl<'a> StyleClusterer<'a> {
    /// Create a clusterer.
    pub fn new(options: &'a PipelineOptions) -> Self {
        Self { options }
    }

    fn step(&self) -> f32 {
        if self.options.size_rounding_step > 0.0 {
            self.options.size_rounding_step
        } else {
            0.5
        }
    }

    /// Ranked clusters, shallowest level first.
    pub fn clusters(&self, candidates: &[HeadingCandidate]) -> Vec<StyleCluster> {
        let step = self.step();
        let mut groups: HashMap<StyleKey, Vec<String>> = HashMap::new();
        for candidate in candidates {
            groups
                .entry(StyleKey::of(candidate, step))
                .or_default()
                .push(candidate.line.text.clone());
        }

        let mut ranked: Vec<(StyleKey, Vec<String>)> = groups.into_iter().collect();
        ranked.sort_by_key(|(key, _)| key.rank_key());

        let max_depth = self.options.max_level.depth();
        ranked
            .into_iter()
            .enumerate()
            .map(|(rank, (key, texts))| {
                let depth = (rank as u32 + 1).min(max_depth);
                StyleCluster {
                    key,
                    level: HeadingLevel::from_depth(depth).unwrap_or(HeadingLevel::H1),
                    texts,
                }
            })
            .collect()
    }

    /// One entry per candidate occurrence, deduplicated on (text, page).
    pub fn assign(&self, candidates: &[HeadingCandidate]) -> Vec<OutlineEntry> {
        let step = self.step();
        let clusters = self.clusters(candidates);

        for cluster in &clusters {
            log::debug!(
                "StyleClusterer: {} <- size {} bold {} tier {} ({} headings)",
                cluster.level,
                cluster.key.size(step),
                cluster.key.bold,
                cluster.key.tier,
                cluster.texts.len()
            );
        }

        let levels: HashMap<StyleKey, HeadingLevel> =
            clusters.iter().map(|c| (c.key, c.level)).collect();

        let mut seen: HashSet<(&str, u32)> = HashSet::new();
        let mut entries = Vec::new();
        for candidate in candidates {
            let Some(level) = levels.get(&StyleKey::of(candidate, step)) else {
                continue;
            };
            if seen.insert((candidate.line.text.as_str(), candidate.line.page)) {
                entries.push(OutlineEntry::new(
                    *level,
                    candidate.line.text.clone(),
                    candidate.line.page,
                ));
            }
        }

        entries
    }
}
