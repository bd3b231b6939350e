use crate::config::{Config, DebugLogRotation};
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "sift-debug.log";

/// Keeps the non-blocking writer flushing until dropped.
pub struct LogGuard(#[allow(dead_code)] WorkerGuard);

/// Initialize debug logging.
///
/// When `debug` is enabled, logs are written to `sift-debug.log` next to the
/// config file unless `debug_log_path` says otherwise. When `debug` is
/// disabled, this is a no-op: the terminal UI owns stdout.
pub fn init(config: &Config, config_file: &Path) -> Result<Option<LogGuard>> {
    if !config.debug {
        return Ok(None);
    }

    let rotation = config
        .debug_log_rotation
        .unwrap_or(DebugLogRotation::Session);
    let keep = config.debug_log_keep;
    let base = resolve_base_log_path(config.debug_log_path.as_deref(), config_file);

    let (writer, log_path_for_display, guard): (NonBlocking, PathBuf, WorkerGuard) = match rotation {
        DebugLogRotation::None => {
            ensure_parent_dir(&base)?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&base)
                .with_context(|| format!("Failed to open log file: {}", base.display()))?;

            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            (non_blocking, base, guard)
        }
        DebugLogRotation::Daily => {
            let (dir, base_name) = split_dir_and_name(&base)?;
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

            cleanup_rotated_logs(&dir, RotationKind::Daily { base_name: base_name.clone() }, keep)?;

            let appender = tracing_appender::rolling::daily(&dir, &base_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (non_blocking, base, guard)
        }
        DebugLogRotation::Session => {
            let (dir, base_name) = split_dir_and_name(&base)?;
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

            cleanup_rotated_logs(&dir, RotationKind::Session { base_name: base_name.clone() }, keep)?;

            let session_path = build_session_log_path(&dir, &base_name);
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&session_path)
                .with_context(|| format!("Failed to open log file: {}", session_path.display()))?;

            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            (non_blocking, session_path, guard)
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("sift=debug,warn"))
        .unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .with_writer(writer)
        .try_init()
        .ok(); // Already initialized in tests.

    tracing::info!("debug logging enabled");
    tracing::info!(log_file = %log_path_for_display.display(), rotation = ?rotation, "writing logs to file");

    Ok(Some(LogGuard(guard)))
}

fn resolve_base_log_path(config_value: Option<&str>, config_file: &Path) -> PathBuf {
    let Some(raw) = config_value else {
        return config_file.with_file_name(LOG_FILE_NAME);
    };

    let path = PathBuf::from(expand_tilde(raw));

    // Trailing separator or an existing directory means "put the log in here".
    if raw.ends_with(std::path::MAIN_SEPARATOR) || path.is_dir() {
        return path.join(LOG_FILE_NAME);
    }

    path
}

pub(crate) fn expand_tilde(raw: &str) -> String {
    if raw == "~" || raw.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            let suffix = raw.strip_prefix('~').unwrap_or("");
            return format!("{}{}", home.display(), suffix);
        }
    }
    raw.to_string()
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    Ok(())
}

fn split_dir_and_name(path: &Path) -> Result<(PathBuf, String)> {
    let dir = path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .context("Invalid debug_log_path: not valid UTF-8")?
        .to_string();
    Ok((dir, name))
}

fn build_session_log_path(dir: &Path, base_name: &str) -> PathBuf {
    let ts = chrono::Local::now().format("%Y%m%d-%H%M%S").to_string();
    dir.join(format!("{base_name}.session-{ts}"))
}

enum RotationKind {
    Daily { base_name: String },
    Session { base_name: String },
}

fn cleanup_rotated_logs(dir: &Path, kind: RotationKind, keep: Option<usize>) -> Result<()> {
    let keep = keep.unwrap_or(match kind {
        RotationKind::Daily { .. } => 7,
        RotationKind::Session { .. } => 20,
    });

    if keep == 0 {
        return Ok(());
    }

    let prefix = match &kind {
        // tracing_appender::rolling::daily uses: `{base_name}.{YYYY-MM-DD}`
        RotationKind::Daily { base_name } => format!("{base_name}."),
        RotationKind::Session { base_name } => format!("{base_name}.session-"),
    };

    let mut candidates: Vec<String> = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read log directory: {}", dir.display()))?
    {
        let entry = entry?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else { continue };
        if name.starts_with(&prefix) {
            candidates.push(name.to_string());
        }
    }

    // Newest first; both suffix formats sort lexicographically by time.
    candidates.sort();
    candidates.reverse();

    for name in candidates.iter().skip(keep) {
        let path = dir.join(name);
        if let Err(e) = std::fs::remove_file(&path) {
            tracing::debug!(error = %e, file = %path.display(), "failed to remove old log file");
        }
    }

    Ok(())
}

/// Best-effort redaction for API keys that may be echoed back in error bodies
/// or URLs: OpenAI style `sk-...` and Google style `AIza...`.
pub fn redact_secrets(input: &str) -> String {
    const PATTERNS: [(&str, &str); 2] = [("sk-", "sk-***REDACTED***"), ("AIza", "AIza***REDACTED***")];

    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut last = 0usize;
    let mut i = 0usize;

    'scan: while i < input.len() {
        for (prefix, replacement) in PATTERNS {
            if input[i..].starts_with(prefix) && i + prefix.len() < input.len() {
                let mut j = i + prefix.len();
                while j < input.len() {
                    match bytes[j] {
                        b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' => j += 1,
                        _ => break,
                    }
                }

                // Require a minimum length to reduce false positives.
                if j.saturating_sub(i + prefix.len()) >= 8 {
                    out.push_str(&input[last..i]);
                    out.push_str(replacement);
                    last = j;
                    i = j;
                    continue 'scan;
                }
            }
        }

        let step = input[i..].chars().next().map(char::len_utf8).unwrap_or(1);
        i += step;
    }

    out.push_str(&input[last..]);
    out
}
