//! Request and response types for all dtt-daemon HTTP endpoints.
//!
//! No business logic lives here.

use dtt_plan::GateAnswers;
use dtt_risk::{BreachReport, RiskResult};
use dtt_window::TimeContext;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// /v1/health  /v1/status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub daemon_uptime_secs: u64,
    /// SHA-256 of the canonical config the daemon booted with.
    pub config_hash: String,
    pub timezone: &'static str,
    /// Clock reading in the desk timezone, RFC3339.
    pub now: String,
}

// ---------------------------------------------------------------------------
// Errors (400 / 422)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Offending input field, when one can be named.
    pub field: Option<String>,
}

// ---------------------------------------------------------------------------
// /v1/risk
// ---------------------------------------------------------------------------

/// Sized and breached are both 200: a breach is a verdict, not a fault.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RiskResponse {
    Sized { result: RiskResult },
    Breached { breach: BreachReport },
}

// ---------------------------------------------------------------------------
// /v1/plan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanRequest {
    pub answers: GateAnswers,
    /// RFC3339. Absent = the daemon clock.
    pub now: Option<String>,
}

// ---------------------------------------------------------------------------
// /v1/window
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WindowQuery {
    pub now: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WindowResponse {
    #[serde(flatten)]
    pub time_context: TimeContext,
    /// e.g. "19:00 → 23:00"
    pub candle: String,
    /// e.g. "21:00 → 23:00"
    pub entry_window: String,
}

impl From<TimeContext> for WindowResponse {
    fn from(ctx: TimeContext) -> Self {
        Self {
            candle: ctx.candle_label(),
            entry_window: ctx.window_label(),
            time_context: ctx,
        }
    }
}
