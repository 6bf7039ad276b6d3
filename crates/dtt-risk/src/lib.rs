//! dtt-risk
//!
//! Per-trade risk sizing for personal and prop-firm accounts.
//!
//! Goals:
//! - Dollar risk per trade from the selected risk mode
//! - Prop-firm remaining-drawdown budgeting with a daily-drawdown cap
//! - Required leverage for a given stop distance and margin allocation
//! - Breached max drawdown reported as a terminal outcome, not a panic
//!
//! Deterministic, pure logic. No IO, no time, no broker calls.

mod engine;
mod types;

pub use engine::{compute_risk, leverage_for, validate_profile};
pub use types::*;

/// Fraction of the prop-firm daily drawdown allowance a single trade may use.
pub const DAILY_CAP_FRACTION: f64 = 0.40;
