//! dtt-plan
//!
//! DTT trade plan (Direction → Target → Timing) as an ordered gate pipeline.
//!
//! Architectural decisions:
//! - Gates run in a fixed order and short-circuit on the first failure
//! - A failed gate is a value (`GateOutcome::Failed`), never an error
//! - Unanswered questions fail their gate; they never panic
//! - The caller supplies `now`; the pipeline never reads a clock
//!
//! Pure deterministic logic. Rendering belongs to the caller.

pub mod answers;
mod evaluator;
mod gates;
mod snapshot;

pub use answers::*;
pub use evaluator::{
    evaluate_trade_plan, score_pct, GateResult, TradePlanResult, TradeState,
};
pub use gates::{
    gate_alignment, gate_context, gate_preparation, gate_target, gate_timing,
    location_adjustment, FailReason, GateId, GateOutcome, Question,
};
pub use snapshot::{
    location_advisories, snapshot_text, Advisory, DisciplineBand, MarketContext, TradeGuidance,
};

/// Normalization constant for the discipline score.
pub const MAX_SCORE: f64 = 5.75;

/// Lowest score a pass can report.
pub const MIN_SCORE: f64 = -0.75;
