//! Individual gate checks.
//!
//! Each gate is a pure function of the answers (and, for timing, the window
//! context) returning a [`GateOutcome`]. Gates never look at each other; the
//! ordering and short-circuiting live in [`crate::evaluate_trade_plan`].

use dtt_window::TimeContext;
use serde::Serialize;

use crate::answers::{
    Answer, DailyLocation, Direction, GateAnswers, HtfReaction, HtfTraffic, RewardRisk,
    Structure15m, TargetSpace, ZonesMarked,
};

// ---------------------------------------------------------------------------
// Scoring constants
// ---------------------------------------------------------------------------

pub const PREPARATION_BASELINE: f64 = 0.5;
pub const ZONES_ABSENT_PENALTY: f64 = 0.5;
pub const CONTEXT_POINTS: f64 = 1.0;
pub const LOCATION_AGAINST_PENALTY: f64 = 0.25;
pub const LOCATION_FAVORABLE_BONUS: f64 = 1.0;
pub const ALIGNMENT_POINTS: f64 = 1.25;
pub const TARGET_POINTS: f64 = 1.0;
pub const TIMING_POINTS: f64 = 1.0;

// ---------------------------------------------------------------------------
// Outcome types
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateId {
    Preparation,
    Context,
    Alignment,
    Target,
    Timing,
}

impl GateId {
    pub fn label(&self) -> &'static str {
        match self {
            GateId::Preparation => "Gate 0: Preparation",
            GateId::Context => "Gate 1: Direction & Context",
            GateId::Alignment => "Gate 1.5: Alignment",
            GateId::Target => "Gate 2: Target & Structure",
            GateId::Timing => "Gate 3: Timing & Entry",
        }
    }
}

/// Checklist question, used to name what was left unanswered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Question {
    Direction,
    DailyBias,
    HtfTraffic,
    DailyLocation,
    Structure4h,
    Structure1h,
    TargetSpace,
    RewardRisk,
    HtfReaction,
    EntryTimeframe,
    EntrySignal,
    Structure15m,
}

/// Why a gate did not pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "question", rename_all = "snake_case")]
pub enum FailReason {
    Unanswered(Question),
    HtfTrafficCrowded,
    Structure4hAgainstDirection,
    Structure1hAgainstDirection,
    TargetTooClose,
    BelowTwoR,
    NoHtfRejection,
    Structure15mExtended,
    OutsideEntryWindow,
}

impl FailReason {
    pub fn message(&self) -> &'static str {
        match self {
            FailReason::Unanswered(_) => "required question left unanswered",
            FailReason::HtfTrafficCrowded => "major HTF levels in the way",
            FailReason::Structure4hAgainstDirection => "4H structure does not support the direction",
            FailReason::Structure1hAgainstDirection => "1H structure does not support the direction",
            FailReason::TargetTooClose => "target too close to next HTF level",
            FailReason::BelowTwoR => "2R not achievable",
            FailReason::NoHtfRejection => "no clear HTF rejection / flip",
            FailReason::Structure15mExtended => "15m structure extended / late",
            FailReason::OutsideEntryWindow => "not in entry window",
        }
    }
}

/// Tagged result of one gate.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GateOutcome {
    Passed { points: f64 },
    Failed { reasons: Vec<FailReason> },
}

impl GateOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, GateOutcome::Passed { .. })
    }

    fn from_reasons(reasons: Vec<FailReason>, points: f64) -> Self {
        if reasons.is_empty() {
            GateOutcome::Passed { points }
        } else {
            GateOutcome::Failed { reasons }
        }
    }
}

fn require<A: Answer>(answer: &A, q: Question, reasons: &mut Vec<FailReason>) {
    if !answer.is_answered() {
        reasons.push(FailReason::Unanswered(q));
    }
}

// ---------------------------------------------------------------------------
// Gate 0: Preparation (never blocks)
// ---------------------------------------------------------------------------

pub fn gate_preparation(a: &GateAnswers) -> GateOutcome {
    let points = if a.daily_zones == ZonesMarked::Absent {
        PREPARATION_BASELINE - ZONES_ABSENT_PENALTY
    } else {
        PREPARATION_BASELINE
    };
    GateOutcome::Passed { points }
}

// ---------------------------------------------------------------------------
// Gate 1: Direction & Context
// ---------------------------------------------------------------------------

/// Non-blocking score adjustment for where price sits in today's range.
///
/// Buying the low / selling the high earns a bonus; buying the high or
/// selling the low costs a quarter point.
pub fn location_adjustment(direction: Direction, location: DailyLocation) -> f64 {
    match (direction, location) {
        (Direction::Long, DailyLocation::NearDailyLow)
        | (Direction::Short, DailyLocation::NearDailyHigh) => LOCATION_FAVORABLE_BONUS,
        (Direction::Long, DailyLocation::NearDailyHigh)
        | (Direction::Short, DailyLocation::NearDailyLow) => -LOCATION_AGAINST_PENALTY,
        _ => 0.0,
    }
}

pub fn gate_context(a: &GateAnswers) -> GateOutcome {
    let mut reasons = Vec::new();
    require(&a.direction, Question::Direction, &mut reasons);
    require(&a.daily_bias, Question::DailyBias, &mut reasons);
    match a.htf_traffic {
        HtfTraffic::Aligned => {}
        HtfTraffic::Crowded => reasons.push(FailReason::HtfTrafficCrowded),
        HtfTraffic::Unanswered => reasons.push(FailReason::Unanswered(Question::HtfTraffic)),
    }
    require(&a.daily_location, Question::DailyLocation, &mut reasons);

    GateOutcome::from_reasons(
        reasons,
        CONTEXT_POINTS + location_adjustment(a.direction, a.daily_location),
    )
}

// ---------------------------------------------------------------------------
// Gate 1.5: Alignment
// ---------------------------------------------------------------------------

/// 4H first; 1H is only read once 4H supports the direction.
pub fn gate_alignment(a: &GateAnswers) -> GateOutcome {
    if !a.structure_4h.is_answered() {
        return GateOutcome::Failed {
            reasons: vec![FailReason::Unanswered(Question::Structure4h)],
        };
    }
    if !a.structure_4h.supports(a.direction) {
        return GateOutcome::Failed {
            reasons: vec![FailReason::Structure4hAgainstDirection],
        };
    }

    if !a.structure_1h.is_answered() {
        return GateOutcome::Failed {
            reasons: vec![FailReason::Unanswered(Question::Structure1h)],
        };
    }
    if !a.structure_1h.supports(a.direction) {
        return GateOutcome::Failed {
            reasons: vec![FailReason::Structure1hAgainstDirection],
        };
    }

    GateOutcome::Passed {
        points: ALIGNMENT_POINTS,
    }
}

// ---------------------------------------------------------------------------
// Gate 2: Target
// ---------------------------------------------------------------------------

pub fn gate_target(a: &GateAnswers) -> GateOutcome {
    let mut reasons = Vec::new();
    match a.target_space {
        TargetSpace::ClearSpace => {}
        TargetSpace::TooClose => reasons.push(FailReason::TargetTooClose),
        TargetSpace::Unanswered => reasons.push(FailReason::Unanswered(Question::TargetSpace)),
    }
    match a.reward_risk {
        RewardRisk::TwoROrBetter => {}
        RewardRisk::BelowTwoR => reasons.push(FailReason::BelowTwoR),
        RewardRisk::Unanswered => reasons.push(FailReason::Unanswered(Question::RewardRisk)),
    }
    match a.htf_reaction {
        HtfReaction::ClearRejection => {}
        HtfReaction::OpenSpace => reasons.push(FailReason::NoHtfRejection),
        HtfReaction::Unanswered => reasons.push(FailReason::Unanswered(Question::HtfReaction)),
    }
    GateOutcome::from_reasons(reasons, TARGET_POINTS)
}

// ---------------------------------------------------------------------------
// Gate 3: Timing & Entry
// ---------------------------------------------------------------------------

/// Entry criteria and the execution window are checked independently; both
/// must hold.
pub fn gate_timing(a: &GateAnswers, window: &TimeContext) -> GateOutcome {
    let mut reasons = Vec::new();
    require(&a.entry_timeframe, Question::EntryTimeframe, &mut reasons);
    require(&a.entry_signal, Question::EntrySignal, &mut reasons);

    if a.entry_timeframe.requires_15m_confirmation() {
        match a.structure_15m {
            Structure15m::AlignedCorrected => {}
            Structure15m::ExtendedLate => reasons.push(FailReason::Structure15mExtended),
            Structure15m::Unanswered => {
                reasons.push(FailReason::Unanswered(Question::Structure15m))
            }
        }
    }

    if !window.in_window {
        reasons.push(FailReason::OutsideEntryWindow);
    }

    GateOutcome::from_reasons(reasons, TIMING_POINTS)
}
