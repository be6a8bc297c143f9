//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production environments
//! Features:
//! - Console output, pretty or JSON
//! - Daily rotating application logs (deleted after the retention window)
//! - Security logs (target `security`), kept permanently

use std::fs;
use std::path::{Path, PathBuf};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, prelude::*};

/// Days an application log file is kept
pub const APP_LOG_RETENTION_DAYS: i64 = 14;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Clean up application log files older than `retention_days`
///
/// Only `app/app.YYYY-MM-DD` files are considered; security logs are never removed.
/// Returns the number of deleted files.
pub fn cleanup_old_logs(log_dir: &Path, retention_days: i64) -> anyhow::Result<usize> {
    let cutoff = chrono::Local::now().date_naive() - chrono::Duration::days(retention_days);

    let app_log_dir = log_dir.join("app");
    if !app_log_dir.exists() {
        return Ok(0);
    }

    let mut removed = 0;
    for entry in fs::read_dir(app_log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        // RollingFileAppender names files `app.YYYY-MM-DD`
        let Some(date_part) = name.strip_prefix("app.") else {
            continue;
        };
        if let Ok(date) = chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
            if date < cutoff {
                fs::remove_file(&path)?;
                removed += 1;
                tracing::info!(file = %name, "Deleted old log file");
            }
        }
    }

    Ok(removed)
}

fn console_layer(json_format: bool) -> BoxedLayer {
    if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .boxed()
    }
}

fn file_layer<F>(json_format: bool, appender: RollingFileAppender, filter: F) -> BoxedLayer
where
    F: Fn(&tracing::Metadata<'_>) -> bool + Send + Sync + 'static,
{
    let filter = tracing_subscriber::filter::filter_fn(filter);
    let writer = std::sync::Mutex::new(appender);
    if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(writer)
            .with_filter(filter)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_ansi(false)
            .with_writer(writer)
            .with_filter(filter)
            .boxed()
    }
}

/// Initialize the logging system with optional daily rotating files
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug"); `RUST_LOG` takes precedence
/// * `json_format` - Whether to use JSON format (true for production)
/// * `log_dir` - Optional directory for file logging
///
/// # Examples
/// ```no_run
/// // Development setup (console only)
/// booking_server::init_logger_with_file("debug", false, None)?;
///
/// // Production setup (console + file)
/// booking_server::init_logger_with_file("info", true, Some("./logs"))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let mut layers: Vec<BoxedLayer> = vec![console_layer(json_format)];

    if let Some(dir) = log_dir {
        let log_dir = Path::new(dir);
        let app_log_dir = log_dir.join("app");
        let security_log_dir = log_dir.join("security");
        fs::create_dir_all(&app_log_dir)?;
        fs::create_dir_all(&security_log_dir)?;

        // Application logs: everything except target "security"
        let app_log = RollingFileAppender::new(Rotation::DAILY, app_log_dir, "app");
        layers.push(file_layer(json_format, app_log, |meta| {
            meta.target() != "security"
        }));

        // Security logs: never deleted
        let security_log = RollingFileAppender::new(Rotation::DAILY, security_log_dir, "security");
        layers.push(file_layer(json_format, security_log, |meta| {
            meta.target() == "security"
        }));

        tokio::spawn(periodic_cleanup(log_dir.to_path_buf()));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()?;

    Ok(())
}

/// Periodic cleanup task - runs every hour to clean old logs
async fn periodic_cleanup(log_dir: PathBuf) {
    use tokio::time::{Duration, sleep};

    loop {
        sleep(Duration::from_secs(3600)).await;

        if let Err(e) = cleanup_old_logs(&log_dir, APP_LOG_RETENTION_DAYS) {
            tracing::error!(error = %e, "Failed to cleanup old logs");
        }
    }
}

/// Initialize the logging system (console only)
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    init_logger_with_file(level, json_format, None)
}

/// Security log helper - records security-related events
///
/// Security logs go to `security/security.YYYY-MM-DD` when file logging is on
/// and are never deleted.
///
/// # Examples
/// ```ignore
/// security_log!(WARN, "login_failed", email = %email);
/// security_log!(WARN, "manager_required", user_id = %user.id);
/// ```
#[macro_export]
macro_rules! security_log {
    (WARN, $event:expr, $($arg:tt)*) => {
        tracing::warn!(
            target: "security",
            event = $event,
            level = "WARN",
            $($arg)*
        );
    };
    (INFO, $event:expr, $($arg:tt)*) => {
        tracing::info!(
            target: "security",
            event = $event,
            level = "INFO",
            $($arg)*
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleanup_removes_only_expired_app_logs() {
        let dir = tempfile::tempdir().unwrap();
        let app_dir = dir.path().join("app");
        let security_dir = dir.path().join("security");
        fs::create_dir_all(&app_dir).unwrap();
        fs::create_dir_all(&security_dir).unwrap();

        let today = chrono::Local::now().date_naive();
        let old = today - chrono::Duration::days(30);
        let old_name = format!("app.{}", old.format("%Y-%m-%d"));
        let fresh_name = format!("app.{}", today.format("%Y-%m-%d"));
        let security_name = format!("security.{}", old.format("%Y-%m-%d"));

        fs::write(app_dir.join(&old_name), "old").unwrap();
        fs::write(app_dir.join(&fresh_name), "fresh").unwrap();
        fs::write(app_dir.join("notes.txt"), "keep").unwrap();
        fs::write(security_dir.join(&security_name), "keep").unwrap();

        let removed = cleanup_old_logs(dir.path(), APP_LOG_RETENTION_DAYS).unwrap();

        assert_eq!(removed, 1);
        assert!(!app_dir.join(old_name).exists());
        assert!(app_dir.join(fresh_name).exists());
        assert!(app_dir.join("notes.txt").exists());
        assert!(security_dir.join(security_name).exists());
    }

    #[test]
    fn cleanup_without_app_dir_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(cleanup_old_logs(dir.path(), 1).unwrap(), 0);
    }
}
