//! Immutable in-memory store.
//!
//! A [`StoreBuilder`] collects normalized entities and is consumed by
//! [`StoreBuilder::build`]. The resulting [`CurriculumStore`] has no mutating
//! methods, so once built it can be shared across tasks without locking.

use crate::model::{Block, Challenge, Curriculum, Superblock};
use curriculum_types::{BlockId, ChallengeId, SuperblockId};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Collects normalized entities for a [`CurriculumStore`].
#[derive(Debug)]
pub struct StoreBuilder {
    curriculum: Curriculum,
    superblocks: IndexMap<SuperblockId, Superblock>,
    blocks: IndexMap<BlockId, Block>,
}

impl StoreBuilder {
    /// Start a store for a curriculum.
    pub fn new(curriculum: Curriculum) -> Self {
        Self {
            curriculum,
            superblocks: IndexMap::new(),
            blocks: IndexMap::new(),
        }
    }

    /// Add superblocks, keeping iteration order.
    pub fn superblocks(mut self, superblocks: impl IntoIterator<Item = Superblock>) -> Self {
        self.superblocks
            .extend(superblocks.into_iter().map(|s| (s.id.clone(), s)));
        self
    }

    /// Add blocks, keeping iteration order.
    pub fn blocks(mut self, blocks: impl IntoIterator<Item = Block>) -> Self {
        self.blocks
            .extend(blocks.into_iter().map(|b| (b.id.clone(), b)));
        self
    }

    /// Derive the challenge table and freeze everything.
    ///
    /// Challenges are keyed by id in block order. A repeated id replaces the
    /// earlier entry.
    pub fn build(self) -> CurriculumStore {
        let mut challenges = IndexMap::new();
        for challenge in self.blocks.values().flat_map(|b| b.challenges.iter()) {
            challenges.insert(challenge.id.clone(), challenge.clone());
        }

        debug!(
            "Built store with {} superblocks, {} blocks, {} challenges",
            self.superblocks.len(),
            self.blocks.len(),
            challenges.len()
        );

        CurriculumStore {
            curriculum: self.curriculum,
            superblocks: self.superblocks,
            blocks: self.blocks,
            challenges,
        }
    }
}

/// Read-only lookup tables for the loaded curriculum.
#[derive(Debug)]
pub struct CurriculumStore {
    curriculum: Curriculum,
    superblocks: IndexMap<SuperblockId, Superblock>,
    blocks: IndexMap<BlockId, Block>,
    challenges: IndexMap<ChallengeId, Challenge>,
}

impl CurriculumStore {
    pub(crate) fn curriculum(&self) -> &Curriculum {
        &self.curriculum
    }

    pub(crate) fn superblock(&self, id: &str) -> Option<&Superblock> {
        self.superblocks.get(id)
    }

    pub(crate) fn block(&self, id: &str) -> Option<&Block> {
        self.blocks.get(id)
    }

    pub(crate) fn challenge(&self, id: &str) -> Option<&Challenge> {
        self.challenges.get(id)
    }

    /// Entity counts.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            superblocks: self.superblocks.len(),
            blocks: self.blocks.len(),
            challenges: self.challenges.len(),
            certifications: self.curriculum.certifications.len(),
        }
    }
}

/// Store statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Number of superblocks
    pub superblocks: usize,
    /// Number of blocks
    pub blocks: usize,
    /// Number of challenges
    pub challenges: usize,
    /// Number of certification entries in the manifest
    pub certifications: usize,
}

impl fmt::Display for StoreStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} superblocks, {} blocks, {} challenges, {} certifications",
            self.superblocks, self.blocks, self.challenges, self.certifications
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curriculum_types::BlockLayout;

    fn block(id: &str, challenges: &[(&str, &str)]) -> Block {
        let block_id = BlockId::new(id).unwrap();
        Block {
            id: block_id.clone(),
            name: id.to_string(),
            help_category: "HTML-CSS".to_string(),
            challenges: challenges
                .iter()
                .map(|(cid, title)| Challenge {
                    id: ChallengeId::new(*cid).unwrap(),
                    title: title.to_string(),
                    block: block_id.clone(),
                })
                .collect(),
            block_layout: BlockLayout::ChallengeList,
            block_label: None,
            is_upcoming_change: false,
            uses_multifile_editor: None,
            has_editable_boundaries: None,
            disable_loop_protect_tests: None,
            disable_loop_protect_preview: None,
            required: None,
            template: None,
            superblocks: vec![SuperblockId::new("sb").unwrap()],
        }
    }

    fn curriculum() -> Curriculum {
        Curriculum {
            superblocks: vec![SuperblockId::new("sb").unwrap()],
            certifications: vec![SuperblockId::new("sb").unwrap(), SuperblockId::new("legacy").unwrap()],
        }
    }

    #[test]
    fn test_build_indexes_challenges() {
        let store = StoreBuilder::new(curriculum())
            .blocks([block("a", &[("c1", "One"), ("c2", "Two")]), block("b", &[("c3", "Three")])])
            .build();

        assert_eq!(store.challenge("c3").unwrap().block, BlockId::new("b").unwrap());
        assert!(store.challenge("missing").is_none());
        assert_eq!(
            store.stats(),
            StoreStats {
                superblocks: 0,
                blocks: 2,
                challenges: 3,
                certifications: 2
            }
        );
    }

    #[test]
    fn test_later_challenge_wins_on_collision() {
        let store = StoreBuilder::new(curriculum())
            .blocks([block("a", &[("dup", "First")]), block("b", &[("dup", "Second")])])
            .build();

        let challenge = store.challenge("dup").unwrap();
        assert_eq!(challenge.title, "Second");
        assert_eq!(challenge.block, BlockId::new("b").unwrap());
        assert_eq!(store.stats().challenges, 1);
    }

    #[test]
    fn test_stats_display() {
        let stats = StoreStats {
            superblocks: 1,
            blocks: 2,
            challenges: 3,
            certifications: 4,
        };
        assert_eq!(
            stats.to_string(),
            "1 superblocks, 2 blocks, 3 challenges, 4 certifications"
        );
    }

    #[test]
    fn test_store_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CurriculumStore>();
    }
}
