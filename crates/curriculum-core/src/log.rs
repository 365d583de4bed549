//! Logging system for the curriculum store.
//!
//! Installs a global `tracing` subscriber from a [`LogConfig`]. `RUST_LOG`
//! takes precedence over the configured level when it is set.

use curriculum_types::bail;
use curriculum_types::config::{LogConfig, LogFormat};
use curriculum_types::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Initialize logging from configuration.
///
/// When the configuration names a file, logs are written through a
/// non-blocking appender and the returned guard must be held until exit so
/// buffered lines are flushed.
pub fn init_from_config(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_filter()));

    let (writer, guard) = match &config.path {
        Some(path) => {
            let Some(file_name) = path.file_name() else {
                bail!(Config, "Log path has no file name: {}", path.display());
            };
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => std::path::PathBuf::from("."),
            };
            std::fs::create_dir_all(&dir)?;

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stderr), None),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(config.path.is_none())
        .with_target(false);

    let installed = match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    if let Err(e) = installed {
        bail!("Failed to initialize logging: {}", e);
    }

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use curriculum_types::CurriculumError;
    use std::path::PathBuf;

    #[test]
    fn test_log_path_without_file_name_is_rejected() {
        let config = LogConfig {
            path: Some(PathBuf::from("/")),
            ..LogConfig::default()
        };

        match init_from_config(&config) {
            Err(CurriculumError::Config(msg)) => assert!(msg.contains("no file name")),
            other => panic!("unexpected: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_second_subscriber_is_reported() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = LogConfig {
            path: Some(dir.path().join("first.log")),
            ..LogConfig::default()
        };
        let _guard = init_from_config(&config);

        let config = LogConfig {
            path: Some(dir.path().join("second.log")),
            ..LogConfig::default()
        };
        match init_from_config(&config) {
            Err(CurriculumError::Other(msg)) => assert!(msg.contains("Failed to initialize logging")),
            other => panic!("unexpected: {:?}", other.map(|_| ())),
        }
    }
}
