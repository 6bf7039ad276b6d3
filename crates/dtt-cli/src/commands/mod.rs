//! Command handler modules for dtt-cli.
//!
//! Shared utilities used by multiple command paths live here.
//! Command-specific logic lives in the submodules.

pub mod plan;
pub mod risk;
pub mod window;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use dtt_config::{report_unused_keys, ConfigSurface, DeskConfig, UnusedKeyPolicy};
use dtt_plan::GateAnswers;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Logs go to stderr so stdout stays parseable. `RUST_LOG` overrides `warn`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load layered config (none = defaults) and warn about keys this command
/// never reads.
pub fn load_config(paths: &[String], surface: ConfigSurface) -> Result<DeskConfig> {
    let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
    let (loaded, desk) = dtt_config::load_desk_config(&path_refs)?;
    tracing::debug!(config_hash = %loaded.config_hash, layers = paths.len(), "config loaded");

    let report = report_unused_keys(surface, &loaded.config_json, UnusedKeyPolicy::Warn)?;
    if !report.is_clean() {
        tracing::warn!(
            surface = %report.surface,
            unused = ?report.unused_leaf_pointers,
            "config keys not read by this command"
        );
    }
    Ok(desk)
}

/// `--now` in RFC3339, or the system clock, expressed in `tz`.
pub fn resolve_now(now: Option<&str>, tz: Tz) -> Result<DateTime<Tz>> {
    match now {
        Some(raw) => {
            let parsed = DateTime::parse_from_rfc3339(raw.trim())
                .with_context(|| format!("invalid --now '{}': expected RFC3339", raw))?;
            Ok(parsed.with_timezone(&tz))
        }
        None => Ok(Utc::now().with_timezone(&tz)),
    }
}

/// Read a checklist answers document. `.json` is parsed as JSON, anything
/// else as YAML. A UTF-8 BOM is tolerated.
pub fn load_answers(path: &str) -> Result<GateAnswers> {
    let bytes = fs::read(path).with_context(|| format!("read answers file failed: {}", path))?;
    let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(&bytes);
    let raw = std::str::from_utf8(bytes).context("answers file must be UTF-8 text")?;

    let is_json = Path::new(path)
        .extension()
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        serde_json::from_str(raw).context("answers file must contain valid JSON answers")
    } else if raw.trim().is_empty() {
        Ok(GateAnswers::default())
    } else {
        serde_yaml::from_str(raw).context("answers file must contain valid YAML answers")
    }
}

/// Render a money/ratio figure with two decimals.
pub fn fmt2(v: f64) -> String {
    format!("{:.2}", v)
}
