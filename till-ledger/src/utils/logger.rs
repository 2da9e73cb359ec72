//! Logging Infrastructure
//!
//! Structured logging for the till:
//! - console output (pretty in development, JSON in production)
//! - daily rotating application logs under `app/` (removed after 14 days)
//! - permanent audit logs under `audit/` (target `audit`)
//! - permanent security logs under `security/` (target `security`)

use std::fs;
use std::path::Path;
use tracing::Metadata;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer, Registry, filter::filter_fn, fmt, layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Days an application log file is kept
const APP_LOG_RETENTION_DAYS: i64 = 14;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

fn is_app_event(meta: &Metadata<'_>) -> bool {
    meta.target() != "audit" && meta.target() != "security"
}

fn is_audit_event(meta: &Metadata<'_>) -> bool {
    meta.target() == "audit"
}

fn is_security_event(meta: &Metadata<'_>) -> bool {
    meta.target() == "security"
}

/// Remove application log files older than the retention window
///
/// Files are named `app.YYYY-MM-DD.log`; audit and security logs are never touched.
pub fn cleanup_old_logs(log_dir: &Path) -> anyhow::Result<usize> {
    let app_log_dir = log_dir.join("app");
    if !app_log_dir.exists() {
        return Ok(0);
    }

    // tracing-appender 按 UTC 日期命名日志文件
    let cutoff = chrono::Utc::now().date_naive() - chrono::Duration::days(APP_LOG_RETENTION_DAYS);
    let mut removed = 0;

    for entry in fs::read_dir(&app_log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(date_part) = name
            .strip_prefix("app.")
            .and_then(|rest| rest.strip_suffix(".log"))
        else {
            continue;
        };
        if let Ok(date) = chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            && date < cutoff
        {
            fs::remove_file(&path)?;
            removed += 1;
            tracing::info!(file = %name, "Deleted old log file");
        }
    }

    Ok(removed)
}

fn file_layer(
    dir: &Path,
    prefix: &str,
    json_format: bool,
    keep: fn(&Metadata<'_>) -> bool,
) -> anyhow::Result<BoxedLayer> {
    let target_dir = dir.join(prefix);
    fs::create_dir_all(&target_dir)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .build(target_dir)?;

    let layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(appender));

    Ok(if json_format {
        layer
            .json()
            .with_current_span(true)
            .with_filter(filter_fn(keep))
            .boxed()
    } else {
        layer.with_filter(filter_fn(keep)).boxed()
    })
}

fn console_layer(json_format: bool) -> BoxedLayer {
    if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    }
}

/// Initialize the logging system
///
/// # Arguments
/// * `level` - default filter when `RUST_LOG` is not set (e.g. "info", "debug")
/// * `json_format` - JSON output (production) instead of human-readable output
/// * `log_dir` - optional directory for rotating log files
///
/// # Examples
/// ```no_run
/// use till_ledger::init_logger_with_file;
///
/// // Development setup (console only)
/// init_logger_with_file("debug", false, None)?;
///
/// // Production setup (console + files)
/// init_logger_with_file("info", true, Some("./work_dir/logs"))?;
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
        fs::create_dir_all(log_dir)?;

        layers.push(file_layer(log_dir, "app", json_format, is_app_event)?);
        layers.push(file_layer(log_dir, "audit", json_format, is_audit_event)?);
        layers.push(file_layer(log_dir, "security", json_format, is_security_event)?);

        // 启动时清理一次过期日志
        if let Err(e) = cleanup_old_logs(log_dir) {
            eprintln!("Failed to cleanup old logs: {e}");
        }
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()?;

    Ok(())
}

/// Initialize the logging system (console only)
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    init_logger_with_file(level, json_format, None)
}
