//! # Curriculum Core
//!
//! Configuration, logging, lifecycle state, and common functionality shared
//! by the curriculum store and its binary.
//!
//! This crate provides:
//!
//! - **Configuration**: Multi-layer configuration (defaults, file, programmatic, environment)
//! - **Logging**: `tracing` subscriber setup with pretty/json/compact output and file sinks
//! - **Lifecycle**: Start time and readiness, injected rather than global
//! - **Time Utilities**: Duration formatting and measurement
//! - **File Operations**: Path expansion and absolutization
//!
//! ## Example
//!
//! ```no_run
//! use curriculum_core::{config::{AppConfig, Config}, log, state::Lifecycle};
//!
//! let config = Config::load("curriculum.yml")?.with_defaults(&AppConfig::default())?;
//! let app = AppConfig::from_config(&config)?;
//! let _guard = log::init_from_config(&app.log)?;
//!
//! let lifecycle = Lifecycle::new();
//! lifecycle.mark_ready();
//! # Ok::<(), curriculum_types::CurriculumError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod log;
pub mod util;
pub mod state;
pub mod time;

// Re-export commonly used items
pub use config::{AppConfig, Config};
pub use curriculum_types::{CurriculumError, Result};
