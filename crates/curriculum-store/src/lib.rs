//! # Curriculum Store
//!
//! Loads the curriculum JSON tree once and serves it from memory:
//! - Raw document types and the superblock schema generations
//! - Async sources with fail-fast bulk reads
//! - Reference, enum, and challenge shape validation
//! - Normalization into canonical entities with multi-parent blocks
//! - An immutable store behind the [`DataProvider`] trait
//!
//! ```no_run
//! use curriculum_store::{load_from_dir, DataProvider};
//!
//! # async fn run() -> curriculum_types::LoadResult<()> {
//! let provider = load_from_dir("curriculum").await?;
//! if let Some(block) = provider.block("basic-html-and-html5") {
//!     println!("{} has {} challenges", block.name, block.challenges.len());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod provider;
pub mod raw;
pub mod source;
pub mod store;
pub mod validate;

pub use model::{Block, Challenge, Chapter, Curriculum, Module, RequiredResource, Superblock};
pub use normalize::{build_parent_index, ParentIndex};
pub use pipeline::{load_from_dir, LoadPipeline};
pub use provider::{DataProvider, StoreProvider};
pub use raw::{SourceFile, SuperblockShape};
pub use source::{CurriculumSource, DirectorySource};
pub use store::{CurriculumStore, StoreBuilder, StoreStats};
