//! Reference and shape validation over raw documents.
//!
//! All checks are pure and stop at the first problem. A block that passes
//! comes back as a [`CheckedBlock`] holding the typed values, so the
//! normalizer never has to interpret raw literals again.

use crate::model::RequiredResource;
use crate::raw::{RawBlock, RawCurriculum, SourceFile};
use crate::source::{BlockFiles, SuperblockFiles};
use curriculum_types::{
    BlockId, BlockLabel, BlockLayout, ChallengeId, ErrorKind, LoadResult, ValidationError,
};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

/// Field tag used for superblock reference failures.
pub const BLOCKS_FIELD: &str = "blocks";

/// Typed block values that passed enum and shape validation.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckedBlock {
    /// Mapped layout
    pub layout: BlockLayout,
    /// Mapped label, if the document has one
    pub label: Option<BlockLabel>,
    /// External resources
    pub required: Option<Vec<RequiredResource>>,
    /// Template identifier
    pub template: Option<String>,
    /// `(id, title)` pairs in challenge order
    pub challenges: Vec<(ChallengeId, String)>,
}

/// Checked blocks keyed by id, in the order the block files were loaded.
pub type CheckedBlocks = IndexMap<BlockId, CheckedBlock>;

/// Curriculum-level cross-reference check.
///
/// Always succeeds: the certification list legitimately names retired
/// superblocks that are no longer part of the structure.
pub fn validate_curriculum(
    _curriculum: &SourceFile<RawCurriculum>,
    _superblocks: &SuperblockFiles,
) -> LoadResult<()> {
    Ok(())
}

/// Every block a superblock references, flat or nested, must be loaded.
pub fn validate_superblock_references(
    superblocks: &SuperblockFiles,
    blocks: &BlockFiles,
) -> LoadResult<()> {
    for (superblock_id, file) in superblocks {
        for block_id in file.document.shape.block_refs() {
            if !blocks.contains_key(block_id) {
                return Err(ValidationError::new(
                    ErrorKind::Reference,
                    format!(
                        "Superblock \"{}\" references block \"{}\", which does not exist",
                        superblock_id, block_id
                    ),
                    &file.path,
                )
                .with_field(BLOCKS_FIELD));
            }
        }
    }
    Ok(())
}

/// Enum conformance for one block: layout, label, required resources, template.
pub fn validate_block_enums(id: &BlockId, file: &SourceFile<RawBlock>) -> LoadResult<()> {
    checked_layout(id, file)?;
    checked_label(file)?;
    checked_required(file)?;
    checked_template(file)?;
    Ok(())
}

/// Challenge list shape for one block.
pub fn validate_challenges(id: &BlockId, file: &SourceFile<RawBlock>) -> LoadResult<()> {
    checked_challenges(id, file).map(|_| ())
}

/// Enum and shape checks for one block, keeping the typed results.
pub fn check_block(id: &BlockId, file: &SourceFile<RawBlock>) -> LoadResult<CheckedBlock> {
    Ok(CheckedBlock {
        layout: checked_layout(id, file)?,
        label: checked_label(file)?,
        required: checked_required(file)?,
        template: checked_template(file)?,
        challenges: checked_challenges(id, file)?,
    })
}

/// Run every check over a loaded curriculum.
pub fn validate_all(
    curriculum: &SourceFile<RawCurriculum>,
    superblocks: &SuperblockFiles,
    blocks: &BlockFiles,
) -> LoadResult<CheckedBlocks> {
    validate_curriculum(curriculum, superblocks)?;
    validate_superblock_references(superblocks, blocks)?;

    let mut checked = CheckedBlocks::with_capacity(blocks.len());
    for (id, file) in blocks {
        checked.insert(id.clone(), check_block(id, file)?);
    }

    debug!(
        "Validated {} superblocks and {} blocks",
        superblocks.len(),
        blocks.len()
    );
    Ok(checked)
}

fn checked_layout(id: &BlockId, file: &SourceFile<RawBlock>) -> LoadResult<BlockLayout> {
    let enum_error = |message: String| {
        ValidationError::new(ErrorKind::Enum, message, &file.path).with_field("blockLayout")
    };

    match &file.document.block_layout {
        Some(Value::String(raw)) => raw
            .parse::<BlockLayout>()
            .map_err(|e| enum_error(format!("{}", e))),
        Some(other) => Err(enum_error(format!(
            "Invalid blockLayout {}; expected one of: {}",
            other,
            literals(BlockLayout::ALL.iter().map(|l| l.as_raw()))
        ))),
        None => Err(enum_error(format!(
            "Block \"{}\" has no blockLayout; expected one of: {}",
            id,
            literals(BlockLayout::ALL.iter().map(|l| l.as_raw()))
        ))),
    }
}

fn checked_label(file: &SourceFile<RawBlock>) -> LoadResult<Option<BlockLabel>> {
    let enum_error = |message: String| {
        ValidationError::new(ErrorKind::Enum, message, &file.path).with_field("blockLabel")
    };

    match &file.document.block_label {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(raw)) => raw
            .parse::<BlockLabel>()
            .map(Some)
            .map_err(|e| enum_error(format!("{}", e))),
        Some(other) => Err(enum_error(format!(
            "Invalid blockLabel {}; expected one of: {}",
            other,
            literals(BlockLabel::ALL.iter().map(|l| l.as_raw()))
        ))),
    }
}

fn checked_required(
    file: &SourceFile<RawBlock>,
) -> LoadResult<Option<Vec<RequiredResource>>> {
    let Some(entries) = &file.document.required else {
        return Ok(None);
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let src = entry.get("src");
            let link = entry.get("link");
            match (src, link) {
                (Some(Value::String(url)), None) => Ok(RequiredResource::Src(url.clone())),
                (None, Some(Value::String(url))) => Ok(RequiredResource::Link(url.clone())),
                _ => Err(ValidationError::new(
                    ErrorKind::Enum,
                    format!(
                        "Invalid required resource {}; expected exactly one of \"src\" or \"link\" as a string",
                        entry
                    ),
                    &file.path,
                )
                .with_field(format!("required[{}]", index))),
            }
        })
        .collect::<LoadResult<Vec<_>>>()
        .map(Some)
}

fn checked_template(file: &SourceFile<RawBlock>) -> LoadResult<Option<String>> {
    match &file.document.template {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(template)) => Ok(Some(template.clone())),
        Some(other) => Err(ValidationError::new(
            ErrorKind::Enum,
            format!("Invalid template {}; expected a string", other),
            &file.path,
        )
        .with_field("template")),
    }
}

/// Validated `(id, title)` pairs in order.
fn checked_challenges(
    block: &BlockId,
    file: &SourceFile<RawBlock>,
) -> LoadResult<Vec<(ChallengeId, String)>> {
    let entries = file.document.challenge_order.as_deref().unwrap_or(&[]);
    if entries.is_empty() {
        return Err(ValidationError::new(
            ErrorKind::Shape,
            format!("Block \"{}\" has an empty challengeOrder", block),
            &file.path,
        )
        .with_field("challengeOrder"));
    }

    let shape_error = |index: usize, key: &str| {
        ValidationError::new(
            ErrorKind::Shape,
            format!(
                "Block \"{}\" challengeOrder[{}] needs a non-empty string {}",
                block, index, key
            ),
            &file.path,
        )
        .with_field(format!("challengeOrder[{}].{}", index, key))
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| -> LoadResult<(ChallengeId, String)> {
            let id = non_empty_str(entry.get("id"))
                .and_then(|id| ChallengeId::new(id).ok())
                .ok_or_else(|| shape_error(index, "id"))?;
            let title = non_empty_str(entry.get("title"))
                .ok_or_else(|| shape_error(index, "title"))?;
            Ok((id, title.to_string()))
        })
        .collect()
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
        _ => None,
    }
}

fn literals<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values.collect::<Vec<_>>().join(", ")
}
