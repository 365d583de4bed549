//! # Curriculum Types
//!
//! Core types and enums shared across all curriculum crates.
//!
//! This crate provides the fundamental building blocks for the curriculum
//! store, including:
//!
//! - Type-safe identifiers for superblocks, blocks, and challenges
//! - The fixed block layout and block label enumerations
//! - The load pipeline error type and the workspace-wide error enum
//! - Shared configuration structures
//!
//! ## Example
//!
//! ```
//! use curriculum_types::{BlockId, BlockLayout};
//!
//! let block = BlockId::new("basic-html-and-html5").unwrap();
//! assert_eq!(block.as_str(), "basic-html-and-html5");
//!
//! let layout: BlockLayout = "challenge-grid".parse().unwrap();
//! assert_eq!(layout.as_symbol(), "CHALLENGE_GRID");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod identifiers;
pub mod enums;
pub mod config;

// Re-export common types for convenience
pub use errors::{CurriculumError, ErrorKind, LoadResult, Result, UnknownVariant, ValidationError};
pub use identifiers::{BlockId, ChallengeId, InvalidIdentifier, SuperblockId};
pub use enums::{BlockLabel, BlockLayout, LogLevel};
