//! Normalized curriculum entities.
//!
//! Every entity is built once by the load pipeline and never mutated. Optional
//! values are `Option`s and serialize as `null`, so consumers never have to
//! tell "absent" apart from "empty".

use curriculum_types::{BlockId, BlockLabel, BlockLayout, ChallengeId, SuperblockId};
use serde::Serialize;

/// The curriculum manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Curriculum {
    /// Superblocks in display order
    pub superblocks: Vec<SuperblockId>,
    /// Superblocks that award a certification (may include retired ones)
    pub certifications: Vec<SuperblockId>,
}

/// A major curriculum area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Superblock {
    /// Dashed name
    pub id: SuperblockId,
    /// Display name
    pub name: String,
    /// Every block in order, flattened from chapters when present
    pub blocks: Vec<BlockId>,
    /// Chapter structure, only for v9 superblocks
    pub chapters: Option<Vec<Chapter>>,
    /// Whether completing this superblock awards a certification
    pub is_certification: bool,
}

/// A v9 chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    /// Dashed name
    pub id: String,
    /// Modules in order
    pub modules: Vec<Module>,
    /// Announced but not yet available
    pub coming_soon: bool,
    /// Owning superblock
    pub superblock: SuperblockId,
}

/// A v9 module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    /// Dashed name
    pub id: String,
    /// Blocks in order
    pub blocks: Vec<BlockId>,
    /// Free-form type tag
    pub module_type: Option<String>,
    /// Announced but not yet available
    pub coming_soon: bool,
    /// Owning chapter
    pub chapter: String,
    /// Owning superblock
    pub superblock: SuperblockId,
}

/// A learning unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Dashed name
    pub id: BlockId,
    /// Display name
    pub name: String,
    /// Forum help category
    pub help_category: String,
    /// Challenges in order
    pub challenges: Vec<Challenge>,
    /// Presentation layout
    pub block_layout: BlockLayout,
    /// Pedagogical label
    pub block_label: Option<BlockLabel>,
    /// Not yet released
    pub is_upcoming_change: bool,
    /// Editor feature flag
    pub uses_multifile_editor: Option<bool>,
    /// Editor feature flag
    pub has_editable_boundaries: Option<bool>,
    /// Loop-protect toggle for tests
    pub disable_loop_protect_tests: Option<bool>,
    /// Loop-protect toggle for the preview
    pub disable_loop_protect_preview: Option<bool>,
    /// External resources the challenges need
    pub required: Option<Vec<RequiredResource>>,
    /// Template identifier
    pub template: Option<String>,
    /// Every superblock that lists this block; never empty
    pub superblocks: Vec<SuperblockId>,
}

/// An external resource a block requires. Serializes as `{"src": url}` or
/// `{"link": url}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequiredResource {
    /// Script URL
    Src(String),
    /// Stylesheet URL
    Link(String),
}

/// Challenge metadata. Content is intentionally not part of the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    /// Challenge id
    pub id: ChallengeId,
    /// Title
    pub title: String,
    /// Owning block
    pub block: BlockId,
}
