//! Tracing configuration and log routing.
//!
//! The server logs to stdout using a compact formatter and to a file. When
//! `DOC_SUMMARIZER_LOG_FILE` is set, logs are appended to that path; otherwise they go to
//! `logs/doc-summarizer.log`. The `summarize-file` CLI keeps stdout for its JSON result, so
//! it logs to stderr only and never touches the filesystem.
use std::path::PathBuf;
use std::sync::OnceLock;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_FILE_ENV: &str = "DOC_SUMMARIZER_LOG_FILE";
const DEFAULT_LOG_DIR: &str = "logs";
const DEFAULT_LOG_FILE: &str = "doc-summarizer.log";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Where the server's file layer writes.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LogTarget {
    /// Append to an explicit file chosen through the environment.
    Explicit(PathBuf),
    /// Rolling-free appender under the default logs directory.
    Default,
}

fn resolve_log_target(explicit: Option<String>) -> LogTarget {
    match explicit.filter(|path| !path.trim().is_empty()) {
        Some(path) => LogTarget::Explicit(PathBuf::from(path)),
        None => LogTarget::Default,
    }
}

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Configure tracing for the HTTP server: compact stdout plus a non-blocking file layer.
///
/// Respects `RUST_LOG` (defaults to `info`). The file writer guard lives for the process.
pub fn init_tracing() {
    let stdout_layer = fmt::layer().with_target(false).compact();
    let registry = tracing_subscriber::registry()
        .with(env_filter("info"))
        .with(stdout_layer);

    match configure_file_writer(resolve_log_target(std::env::var(LOG_FILE_ENV).ok())) {
        Some(writer) => {
            let file_layer = fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_ansi(false)
                .compact();
            registry.with(file_layer).init();
        }
        None => registry.init(),
    }
}

/// Configure tracing for command-line use: stderr only, `warn` unless `RUST_LOG` says otherwise.
///
/// Skipped PDF pages and summarizer failures surface here; raising `RUST_LOG` to `debug`
/// shows per-chunk progress.
pub fn init_cli_tracing() {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();
    tracing_subscriber::registry()
        .with(env_filter("warn"))
        .with(stderr_layer)
        .init();
}

/// Build a non-blocking writer for `target`, or `None` when it cannot be opened.
fn configure_file_writer(target: LogTarget) -> Option<NonBlocking> {
    let (non_blocking, guard) = match target {
        LogTarget::Explicit(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|err| eprintln!("Failed to open log file {}: {err}", path.display()))
                .ok()?;
            tracing_appender::non_blocking(file)
        }
        LogTarget::Default => {
            if let Err(err) = std::fs::create_dir_all(DEFAULT_LOG_DIR) {
                eprintln!("Failed to create logs directory: {err}");
                return None;
            }
            tracing_appender::non_blocking(tracing_appender::rolling::never(
                DEFAULT_LOG_DIR,
                DEFAULT_LOG_FILE,
            ))
        }
    };
    let _ = LOG_GUARD.set(guard);
    Some(non_blocking)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_override_falls_back_to_default_file() {
        assert_eq!(resolve_log_target(None), LogTarget::Default);
        assert_eq!(resolve_log_target(Some("  ".into())), LogTarget::Default);
        assert_eq!(
            resolve_log_target(Some("/var/log/summarizer.log".into())),
            LogTarget::Explicit(PathBuf::from("/var/log/summarizer.log"))
        );
    }

    #[test]
    fn explicit_target_is_created_on_demand() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("service.log");
        assert!(configure_file_writer(LogTarget::Explicit(path.clone())).is_some());
        assert!(path.exists());
    }

    #[test]
    fn unopenable_target_disables_file_layer() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("service.log");
        assert!(configure_file_writer(LogTarget::Explicit(path)).is_none());
    }
}
