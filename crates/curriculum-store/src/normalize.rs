//! Raw document to normalized entity transforms.

use crate::model::{Block, Challenge, Chapter, Curriculum, Module, Superblock};
use crate::raw::{RawBlock, RawChapter, RawCurriculum, RawSuperblock, SourceFile, SuperblockShape};
use crate::validate::CheckedBlock;
use curriculum_types::{BlockId, SuperblockId};
use indexmap::IndexMap;
use std::collections::HashSet;

/// Block id to every superblock listing it, in discovery order.
pub type ParentIndex = IndexMap<BlockId, Vec<SuperblockId>>;

/// Normalize the manifest.
pub fn normalize_curriculum(raw: &RawCurriculum) -> Curriculum {
    Curriculum {
        superblocks: raw.superblocks.clone(),
        certifications: raw.certifications.clone(),
    }
}

/// Normalize one superblock. Chapters, when present, are flattened into the
/// block list in order; duplicates are kept.
pub fn normalize_superblock(
    id: &SuperblockId,
    raw: &RawSuperblock,
    certifications: &HashSet<SuperblockId>,
) -> Superblock {
    let (blocks, chapters) = match &raw.shape {
        SuperblockShape::Flat(blocks) => (blocks.clone(), None),
        SuperblockShape::Hierarchical(chapters) => {
            let blocks: Vec<BlockId> = raw.shape.block_refs().into_iter().cloned().collect();
            let chapters: Vec<Chapter> = chapters
                .iter()
                .map(|chapter| normalize_chapter(id, chapter))
                .collect();
            (blocks, Some(chapters))
        }
    };

    Superblock {
        id: id.clone(),
        name: raw.name.clone().unwrap_or_else(|| id.to_string()),
        blocks,
        chapters,
        is_certification: certifications.contains(id),
    }
}

fn normalize_chapter(superblock: &SuperblockId, raw: &RawChapter) -> Chapter {
    let modules = raw
        .modules
        .iter()
        .map(|module| Module {
            id: module.dashed_name.clone(),
            blocks: module.blocks.clone(),
            module_type: module.module_type.clone(),
            coming_soon: module.coming_soon,
            chapter: raw.dashed_name.clone(),
            superblock: superblock.clone(),
        })
        .collect();

    Chapter {
        id: raw.dashed_name.clone(),
        modules,
        coming_soon: raw.coming_soon,
        superblock: superblock.clone(),
    }
}

/// Invert superblock block lists into a block to parents index.
///
/// Superblocks are walked in the order given; a superblock appears at most
/// once in any block's parent list.
pub fn build_parent_index<'a>(superblocks: impl IntoIterator<Item = &'a Superblock>) -> ParentIndex {
    let mut index = ParentIndex::new();

    for superblock in superblocks {
        for block in &superblock.blocks {
            let parents = index.entry(block.clone()).or_default();
            if !parents.contains(&superblock.id) {
                parents.push(superblock.id.clone());
            }
        }
    }

    index
}

/// Normalize one block from its document and validated values.
///
/// # Panics
///
/// Panics when `parents` is empty. Every loaded block is referenced by some
/// superblock, so an empty parent list means the reverse index is wrong,
/// which is a bug in the pipeline rather than bad input.
pub fn normalize_block(
    id: &BlockId,
    file: &SourceFile<RawBlock>,
    checked: CheckedBlock,
    parents: &[SuperblockId],
) -> Block {
    if parents.is_empty() {
        panic!(
            "block \"{}\" ({}) has no parent superblock; the parent index is inconsistent",
            id,
            file.path.display()
        );
    }

    let raw = &file.document;
    let challenges = checked
        .challenges
        .into_iter()
        .map(|(challenge_id, title)| Challenge {
            id: challenge_id,
            title,
            block: id.clone(),
        })
        .collect();

    Block {
        id: id.clone(),
        name: raw.name.clone(),
        help_category: raw.help_category.clone(),
        challenges,
        block_layout: checked.layout,
        block_label: checked.label,
        is_upcoming_change: raw.is_upcoming_change,
        uses_multifile_editor: raw.uses_multifile_editor,
        has_editable_boundaries: raw.has_editable_boundaries,
        disable_loop_protect_tests: raw.disable_loop_protect_tests,
        disable_loop_protect_preview: raw.disable_loop_protect_preview,
        required: checked.required,
        template: checked.template,
        superblocks: parents.to_vec(),
    }
}
