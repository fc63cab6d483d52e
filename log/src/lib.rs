//! Logging setup for boundary navigation hosts, with file output and optional stdout.
//!
//! Logs always go to a file at `warn` level (or higher if a filter is set).
//! Stdout logging is enabled when `BOUNDARY_NAV_LOG` or `RUST_LOG` is set, or in
//! debug builds.
//!
//! ## Environment Variables
//!
//! 1. **`BOUNDARY_NAV_LOG`** (highest priority) - crate-specific logging control
//! 2. **`RUST_LOG`** - Standard tracing environment variable
//! 3. **Default** - `warn` globally, `info` for the boundary_nav crates
//!
//! ## Log File Location
//!
//! Default: `<data_local_dir>/boundary_nav/logs/boundary-nav-<pid>.log`
//! - macOS: `~/Library/Application Support/boundary_nav/logs/boundary-nav-12345.log`
//! - Linux: `~/.local/share/boundary_nav/logs/boundary-nav-12345.log`
//!
//! Override with [`LogConfig::log_file_path`].

use std::{
    env,
    path::{Path, PathBuf},
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

const ENV_VAR: &str = "BOUNDARY_NAV_LOG";
const CRATES: [&str; 2] = ["boundary_nav", "boundary_nav_log"];

/// Returned from [`init`]; must be held alive to ensure log file flushing.
pub struct LogGuard {
    _file_guard: WorkerGuard,
    pub log_file: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    /// A file path (has an extension) or a directory to place the log file in.
    pub log_file_path: Option<PathBuf>,
}

/// Initialize logging.
///
/// Respects the environment variable priority described in the module docs:
/// `BOUNDARY_NAV_LOG` > `RUST_LOG` > default settings.
///
/// The returned [`LogGuard`] must be held for the lifetime of the program --
/// dropping it flushes and stops the background file writer.
pub fn init(config: LogConfig) -> Result<LogGuard, Box<dyn std::error::Error + Send + Sync>> {
    let (log_dir, filename) = resolve_log_path(config.log_file_path);

    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, &filename);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_filter(create_file_filter());

    let stdout_enabled =
        env::var(ENV_VAR).is_ok() || env::var("RUST_LOG").is_ok() || cfg!(debug_assertions);

    let stdout_layer = if stdout_enabled {
        Some(fmt::layer().with_filter(create_filter()))
    } else {
        None
    };

    Registry::default()
        .with(file_layer)
        .with(stdout_layer)
        .try_init()?;

    Ok(LogGuard {
        _file_guard: file_guard,
        log_file: log_dir.join(filename),
    })
}

/// Initialize logging for tests.
///
/// Stdout-only (no file output). Will not crash if called multiple times or if
/// logging is already initialized by another test.
pub fn test() {
    let _ = fmt()
        .with_env_filter(create_filter())
        .with_test_writer()
        .try_init();
}

fn resolve_log_path(override_path: Option<PathBuf>) -> (PathBuf, String) {
    let filename = format!("boundary-nav-{}.log", std::process::id());

    if let Some(path) = override_path {
        if path.extension().is_some() {
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or(filename);
            return (dir.to_path_buf(), name);
        }
        return (path, filename);
    }

    let dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("boundary_nav")
        .join("logs");

    (dir, filename)
}

/// File filter: uses user-specified level if set, otherwise defaults to `warn`.
fn create_file_filter() -> EnvFilter {
    if env::var(ENV_VAR).is_ok() || env::var("RUST_LOG").is_ok() {
        return create_filter();
    }
    EnvFilter::new("warn")
}

fn create_filter() -> EnvFilter {
    EnvFilter::new(filter_directives(
        env::var(ENV_VAR).ok().as_deref(),
        env::var("RUST_LOG").ok().as_deref(),
    ))
}

/// Filter directives by priority: crate var, then `RUST_LOG`, then defaults.
fn filter_directives(crate_var: Option<&str>, rust_log: Option<&str>) -> String {
    if let Some(value) = crate_var {
        return expand_crate_log(value);
    }

    if let Some(value) = rust_log {
        return value.to_string();
    }

    expand_crate_log("info")
}

/// Expand a bare level into per-crate directives.
///
/// - `debug` becomes `warn,boundary_nav=debug,boundary_nav_log=debug`
/// - `boundary_nav=trace` is used as-is (advanced syntax)
fn expand_crate_log(value: &str) -> String {
    if value.contains('=') || value.contains(':') || value.contains(',') {
        return value.to_string();
    }

    let mut directives = String::from("warn");
    for name in CRATES {
        directives.push_str(&format!(",{name}={value}"));
    }
    directives
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directives() {
        assert_eq!(
            filter_directives(None, None),
            "warn,boundary_nav=info,boundary_nav_log=info"
        );
    }

    #[test]
    fn crate_var_wins_over_rust_log() {
        assert_eq!(
            filter_directives(Some("trace"), Some("error")),
            "warn,boundary_nav=trace,boundary_nav_log=trace"
        );
        assert_eq!(filter_directives(None, Some("error")), "error");
    }

    #[test]
    fn advanced_syntax_passes_through() {
        assert_eq!(expand_crate_log("boundary_nav=debug"), "boundary_nav=debug");
        assert_eq!(expand_crate_log("warn,boundary_nav::gate=trace"), "warn,boundary_nav::gate=trace");
    }

    #[test]
    fn file_override_splits_dir_and_name() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("session.log");

        let (resolved_dir, name) = resolve_log_path(Some(file));
        assert_eq!(resolved_dir, dir.path());
        assert_eq!(name, "session.log");
    }

    #[test]
    fn directory_override_keeps_default_name() {
        let dir = tempfile::tempdir().unwrap();

        let (resolved_dir, name) = resolve_log_path(Some(dir.path().to_path_buf()));
        assert_eq!(resolved_dir, dir.path());
        assert!(name.starts_with("boundary-nav-"));
        assert!(name.ends_with(".log"));
    }

    #[test]
    fn test_init_is_repeatable() {
        test();
        test();
    }
}
