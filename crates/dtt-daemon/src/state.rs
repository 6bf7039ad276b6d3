//! Shared state for dtt-daemon.
//!
//! Immutable after boot: every request is evaluated independently against
//! the loaded desk config and the injected clock.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use dtt_config::{DeskConfig, LoadedConfig};
use serde::{Deserialize, Serialize};

/// Source of "now". Swapped for a fixed instant in tests.
pub type Clock = fn() -> DateTime<Utc>;

pub fn system_clock() -> DateTime<Utc> {
    Utc::now()
}

// ---------------------------------------------------------------------------
// BuildInfo
// ---------------------------------------------------------------------------

/// Static build metadata included in health / status responses.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BuildInfo {
    pub service: &'static str,
    pub version: &'static str,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct AppState {
    pub build: BuildInfo,
    /// Base account profile, timezone and bind address.
    pub desk: DeskConfig,
    /// Validated `desk.window.timezone`.
    pub tz: Tz,
    pub config_hash: String,
    pub clock: Clock,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Built-in defaults, no config files.
    pub fn new() -> Self {
        Self {
            build: build_info(),
            desk: DeskConfig::default(),
            tz: dtt_window::DEFAULT_TIMEZONE,
            config_hash: String::new(),
            clock: system_clock,
        }
    }

    pub fn from_config(loaded: &LoadedConfig, desk: DeskConfig) -> anyhow::Result<Self> {
        let tz = desk.timezone()?;
        Ok(Self {
            build: build_info(),
            desk,
            tz,
            config_hash: loaded.config_hash.clone(),
            clock: system_clock,
        })
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Current instant in the desk timezone.
    pub fn now(&self) -> DateTime<Tz> {
        (self.clock)().with_timezone(&self.tz)
    }
}

fn build_info() -> BuildInfo {
    BuildInfo {
        service: "dtt-daemon",
        version: env!("CARGO_PKG_VERSION"),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

static START: std::sync::OnceLock<std::time::Instant> = std::sync::OnceLock::new();

/// Pin the uptime origin. Called once at boot; later calls are no-ops.
pub fn mark_started() {
    START.get_or_init(std::time::Instant::now);
}

/// Seconds since `mark_started` (or since the first call, if never marked).
pub fn uptime_secs() -> u64 {
    START
        .get_or_init(std::time::Instant::now)
        .elapsed()
        .as_secs()
}
