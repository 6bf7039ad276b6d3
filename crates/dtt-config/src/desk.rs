use anyhow::{anyhow, Context, Result};
use chrono_tz::Tz;
use dtt_risk::AccountProfile;
use dtt_window::DEFAULT_TIMEZONE;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_DAEMON_ADDR: &str = "127.0.0.1:8899";

/// Typed view of the merged config. Every section is optional; missing keys
/// take the defaults the desk form opens with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    pub account: AccountProfile,
    pub window: WindowSettings,
    pub daemon: DaemonSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// IANA name. The 4H block table is anchored to UTC-5 local time.
    pub timezone: String,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.name().to_string(),
        }
    }
}

impl WindowSettings {
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| anyhow!("CONFIG_INVALID window.timezone={:?}: {e}", self.timezone))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaemonSettings {
    pub addr: String,
}

impl Default for DaemonSettings {
    fn default() -> Self {
        Self {
            addr: DEFAULT_DAEMON_ADDR.to_string(),
        }
    }
}

impl DeskConfig {
    /// Deserialize and validate. Only `window.timezone` is checked here;
    /// account numbers are validated by the sizer on every call.
    pub fn from_json(v: &Value) -> Result<Self> {
        let cfg: DeskConfig = if v.is_null() {
            DeskConfig::default()
        } else {
            serde_json::from_value(v.clone()).context("CONFIG_INVALID")?
        };
        cfg.window.tz()?;
        Ok(cfg)
    }

    pub fn timezone(&self) -> Result<Tz> {
        self.window.tz()
    }
}
