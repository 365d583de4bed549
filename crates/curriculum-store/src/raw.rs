//! Raw curriculum documents as they are stored on disk.
//!
//! These types mirror the JSON files closely. Fields the validator is
//! responsible for (enum literals, required resources, challenge entries) are
//! kept as loose `serde_json::Value`s so a bad value surfaces as a precise
//! validation error rather than a generic parse failure.

use curriculum_types::{BlockId, SuperblockId};
use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;

/// A parsed document together with the file it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile<T> {
    /// Absolute path of the file
    pub path: PathBuf,
    /// Parsed contents
    pub document: T,
}

impl<T> SourceFile<T> {
    /// Pair a document with its path.
    pub fn new(path: impl Into<PathBuf>, document: T) -> Self {
        Self {
            path: path.into(),
            document,
        }
    }
}

/// `curriculum.json`: the manifest listing superblocks and certifications.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawCurriculum {
    /// Superblocks to load, in display order
    pub superblocks: Vec<SuperblockId>,
    /// Superblocks that award a certification. May name superblocks that are
    /// not part of the current structure.
    #[serde(default)]
    pub certifications: Vec<SuperblockId>,
}

/// `superblocks/<id>.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "SuperblockDocument")]
pub struct RawSuperblock {
    /// Display name, if the document carries one
    pub name: Option<String>,
    /// Which schema generation the document uses
    pub shape: SuperblockShape,
}

/// The two superblock schema generations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuperblockShape {
    /// Legacy `blocks: [...]`
    Flat(Vec<BlockId>),
    /// v9 `chapters -> modules -> blocks`
    Hierarchical(Vec<RawChapter>),
}

impl SuperblockShape {
    /// Every block reference in document order, duplicates included.
    pub fn block_refs(&self) -> Vec<&BlockId> {
        match self {
            SuperblockShape::Flat(blocks) => blocks.iter().collect(),
            SuperblockShape::Hierarchical(chapters) => chapters
                .iter()
                .flat_map(|chapter| chapter.modules.iter())
                .flat_map(|module| module.blocks.iter())
                .collect(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SuperblockDocument {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    blocks: Option<Vec<BlockId>>,
    #[serde(default)]
    chapters: Option<Vec<RawChapter>>,
}

impl TryFrom<SuperblockDocument> for RawSuperblock {
    type Error = String;

    fn try_from(doc: SuperblockDocument) -> Result<Self, Self::Error> {
        let shape = match (doc.chapters, doc.blocks) {
            (Some(chapters), _) => SuperblockShape::Hierarchical(chapters),
            (None, Some(blocks)) => SuperblockShape::Flat(blocks),
            (None, None) => {
                return Err("superblock must define either `blocks` or `chapters`".to_string())
            }
        };
        Ok(Self {
            name: doc.name,
            shape,
        })
    }
}

/// A v9 chapter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawChapter {
    /// Chapter identifier
    pub dashed_name: String,
    /// Chapter is announced but not yet available
    #[serde(default)]
    pub coming_soon: bool,
    /// Modules in order
    #[serde(default)]
    pub modules: Vec<RawModule>,
}

/// A v9 module.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawModule {
    /// Module identifier
    pub dashed_name: String,
    /// Free-form module type tag (e.g. `review`, `exam`)
    #[serde(default)]
    pub module_type: Option<String>,
    /// Module is announced but not yet available
    #[serde(default)]
    pub coming_soon: bool,
    /// Blocks in order
    #[serde(default)]
    pub blocks: Vec<BlockId>,
}

/// `blocks/<id>.json`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBlock {
    /// Display name
    pub name: String,
    /// Dashed name as recorded in the file (the file name is authoritative)
    #[serde(default)]
    pub dashed_name: Option<String>,
    /// Forum help category
    pub help_category: String,
    /// Layout literal, checked by the validator
    #[serde(default)]
    pub block_layout: Option<Value>,
    /// Label literal, checked by the validator
    #[serde(default)]
    pub block_label: Option<Value>,
    /// Block is not yet released
    #[serde(default)]
    pub is_upcoming_change: bool,
    /// Challenge entries, checked by the validator. `null` reads as absent.
    #[serde(default)]
    pub challenge_order: Option<Vec<Value>>,
    /// Editor feature flag
    #[serde(default)]
    pub uses_multifile_editor: Option<bool>,
    /// Editor feature flag
    #[serde(default)]
    pub has_editable_boundaries: Option<bool>,
    /// Loop-protect toggle for tests
    #[serde(default)]
    pub disable_loop_protect_tests: Option<bool>,
    /// Loop-protect toggle for the preview
    #[serde(default)]
    pub disable_loop_protect_preview: Option<bool>,
    /// External scripts and stylesheets, checked by the validator
    #[serde(default)]
    pub required: Option<Vec<Value>>,
    /// Template identifier, checked by the validator
    #[serde(default)]
    pub template: Option<Value>,
}
