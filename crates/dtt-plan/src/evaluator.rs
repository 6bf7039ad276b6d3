use chrono::DateTime;
use chrono_tz::Tz;
use dtt_window::{time_context, TimeContext};
use serde::Serialize;

use crate::answers::GateAnswers;
use crate::gates::{
    gate_alignment, gate_context, gate_preparation, gate_target, gate_timing, GateId, GateOutcome,
};
use crate::snapshot::{
    location_advisories, snapshot_text, Advisory, DisciplineBand, MarketContext, TradeGuidance,
};
use crate::{MAX_SCORE, MIN_SCORE};

// ============================================================================
// Types
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeState {
    /// Initial state; also where alignment, target and timing failures land.
    Waiting,
    /// Direction & context failed. Terminal for this pass.
    NoTrade,
    /// Every gate passed inside the entry window.
    TradeReady,
}

impl TradeState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeState::Waiting => "WAITING",
            TradeState::NoTrade => "NO_TRADE",
            TradeState::TradeReady => "TRADE_READY",
        }
    }
}

/// One evaluated gate, in evaluation order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GateResult {
    pub gate: GateId,
    #[serde(flatten)]
    pub outcome: GateOutcome,
}

/// Output of one evaluation pass.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TradePlanResult {
    pub trade_state: TradeState,
    pub discipline_score: f64,
    pub max_score: f64,
    /// `floor(discipline_score / max_score * 100)`, clamped to 0..=100.
    pub score_pct: i64,
    pub band: DisciplineBand,
    pub market_context: MarketContext,
    pub time_context: TimeContext,
    /// Only gates that were actually evaluated; a halt truncates the list.
    pub gate_results: Vec<GateResult>,
    pub advisories: Vec<Advisory>,
    /// Present iff `trade_state == TradeReady`.
    pub guidance: Option<TradeGuidance>,
    /// Present iff `trade_state == TradeReady`.
    pub snapshot_text: Option<String>,
}

impl TradePlanResult {
    pub fn is_ready(&self) -> bool {
        self.trade_state == TradeState::TradeReady
    }

    pub fn evaluated_gates(&self) -> Vec<GateId> {
        self.gate_results.iter().map(|g| g.gate).collect()
    }

    pub fn outcome_of(&self, gate: GateId) -> Option<&GateOutcome> {
        self.gate_results
            .iter()
            .find(|g| g.gate == gate)
            .map(|g| &g.outcome)
    }
}

// ============================================================================
// Pass state
// ============================================================================

/// Accumulator for a single pass. Only moves forward.
struct PlanState {
    discipline_score: f64,
    trade_state: TradeState,
    gate_results: Vec<GateResult>,
}

impl PlanState {
    fn new() -> Self {
        Self {
            discipline_score: 0.0,
            trade_state: TradeState::Waiting,
            gate_results: Vec::with_capacity(5),
        }
    }

    /// Record a gate. Passed gates add their points; a failure sets
    /// `on_fail` and returns `false` so the caller halts.
    fn advance(&mut self, gate: GateId, outcome: GateOutcome, on_fail: TradeState) -> bool {
        let passed = match &outcome {
            GateOutcome::Passed { points } => {
                self.discipline_score += points;
                true
            }
            GateOutcome::Failed { .. } => {
                self.trade_state = on_fail;
                false
            }
        };
        self.gate_results.push(GateResult { gate, outcome });
        passed
    }

    fn finish(
        self,
        answers: &GateAnswers,
        time_context: TimeContext,
        advisories: Vec<Advisory>,
    ) -> TradePlanResult {
        debug_assert!(
            (MIN_SCORE..=MAX_SCORE).contains(&self.discipline_score),
            "discipline score {} out of range",
            self.discipline_score
        );

        let score_pct = score_pct(self.discipline_score);
        let market_context = MarketContext::infer(answers.direction, answers.daily_bias);
        let ready = self.trade_state == TradeState::TradeReady;

        TradePlanResult {
            trade_state: self.trade_state,
            discipline_score: self.discipline_score,
            max_score: MAX_SCORE,
            score_pct,
            band: DisciplineBand::from_pct(score_pct),
            market_context,
            time_context,
            gate_results: self.gate_results,
            advisories,
            guidance: ready.then(|| TradeGuidance::for_direction(answers.direction)),
            snapshot_text: ready.then(|| {
                snapshot_text(
                    answers.direction,
                    market_context,
                    answers.daily_location,
                    score_pct,
                )
            }),
        }
    }
}

/// Normalized discipline percentage, floored and clamped to 0..=100.
pub fn score_pct(discipline_score: f64) -> i64 {
    let pct = (discipline_score / MAX_SCORE * 100.0).floor();
    (pct as i64).clamp(0, 100)
}

// ============================================================================
// Public API
// ============================================================================

/// Run the checklist once.
///
/// Gates run in order Preparation → Context → Alignment → Target → Timing.
/// The first failing gate sets the terminal state (NO_TRADE for context,
/// WAITING otherwise) and nothing after it is evaluated or scored.
///
/// `now` must already be in the desk timezone; it is used for every window
/// calculation in this pass.
pub fn evaluate_trade_plan(answers: &GateAnswers, now: DateTime<Tz>) -> TradePlanResult {
    let window = time_context(now);
    let mut plan = PlanState::new();
    let mut advisories = Vec::new();

    // Gate 0 is informational: it scores but cannot halt.
    plan.advance(GateId::Preparation, gate_preparation(answers), TradeState::Waiting);
    if answers.daily_zones == crate::answers::ZonesMarked::Absent {
        advisories.push(Advisory::DailyZonesAbsent);
    }

    if !plan.advance(GateId::Context, gate_context(answers), TradeState::NoTrade) {
        return plan.finish(answers, window, advisories);
    }
    advisories.extend(location_advisories(answers.direction, answers.daily_location));

    if !plan.advance(GateId::Alignment, gate_alignment(answers), TradeState::Waiting) {
        return plan.finish(answers, window, advisories);
    }

    if !plan.advance(GateId::Target, gate_target(answers), TradeState::Waiting) {
        return plan.finish(answers, window, advisories);
    }

    if plan.advance(GateId::Timing, gate_timing(answers, &window), TradeState::Waiting) {
        plan.trade_state = TradeState::TradeReady;
    }

    plan.finish(answers, window, advisories)
}
