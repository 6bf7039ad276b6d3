//! Human-facing summaries derived from a finished pass: market context,
//! advisories, trade guidance, discipline band and the shareable snapshot.

use serde::Serialize;

use crate::answers::{Answer, DailyBias, DailyLocation, Direction};

// ---------------------------------------------------------------------------
// Market context
// ---------------------------------------------------------------------------

/// Expected daily move inferred from direction × daily bias.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketContext {
    Forming,
    ContinuationTowardDailyHigh,
    PullbackTowardDailyLowerHigh,
    ContinuationTowardDailyLowerLow,
    PullbackTowardDailyHigherLow,
}

impl MarketContext {
    pub fn infer(direction: Direction, bias: DailyBias) -> Self {
        match (direction, bias) {
            (Direction::Long, DailyBias::Continuation) => MarketContext::ContinuationTowardDailyHigh,
            (Direction::Long, DailyBias::Pullback) => MarketContext::PullbackTowardDailyLowerHigh,
            (Direction::Short, DailyBias::Continuation) => {
                MarketContext::ContinuationTowardDailyLowerLow
            }
            (Direction::Short, DailyBias::Pullback) => MarketContext::PullbackTowardDailyHigherLow,
            _ => MarketContext::Forming,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MarketContext::Forming => "Context forming",
            MarketContext::ContinuationTowardDailyHigh => "Likely continuation toward Daily High",
            MarketContext::PullbackTowardDailyLowerHigh => "Likely pullback toward Daily Lower High",
            MarketContext::ContinuationTowardDailyLowerLow => {
                "Likely continuation toward Daily Lower Low"
            }
            MarketContext::PullbackTowardDailyHigherLow => "Likely pullback toward Daily Higher Low",
        }
    }
}

// ---------------------------------------------------------------------------
// Advisories
// ---------------------------------------------------------------------------

/// Informational warnings. They never change the trade state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Advisory {
    DailyZonesAbsent,
    LongNearDailyHigh,
    ShortNearDailyLow,
    MidRangeEntry,
}

impl Advisory {
    pub fn message(&self) -> &'static str {
        match self {
            Advisory::DailyZonesAbsent => "Daily zones not marked; mark them before planning",
            Advisory::LongNearDailyHigh => "Longing near the daily high increases pullback risk",
            Advisory::ShortNearDailyLow => "Shorting near the daily low risks selling the bottom",
            Advisory::MidRangeEntry => "Mid-range entries require conservative stop placement",
        }
    }
}

/// Location warnings raised once direction & context have passed.
pub fn location_advisories(direction: Direction, location: DailyLocation) -> Vec<Advisory> {
    let mut out = Vec::new();
    match (direction, location) {
        (Direction::Long, DailyLocation::NearDailyHigh) => out.push(Advisory::LongNearDailyHigh),
        (Direction::Short, DailyLocation::NearDailyLow) => out.push(Advisory::ShortNearDailyLow),
        _ => {}
    }
    if location == DailyLocation::MiddleOfRange {
        out.push(Advisory::MidRangeEntry);
    }
    out
}

// ---------------------------------------------------------------------------
// Trade guidance
// ---------------------------------------------------------------------------

/// Stop placement and in-trade rules shown once a plan is ready.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TradeGuidance {
    pub stop_loss: &'static str,
    pub management: [&'static str; 2],
}

impl TradeGuidance {
    pub fn for_direction(direction: Direction) -> Self {
        let stop_loss = match direction {
            Direction::Short => "Above last valid 15m–4H Lower High",
            _ => "Below last valid 15m–4H Higher Low",
        };
        Self {
            stop_loss,
            management: [
                "Exit early if 15m structure flips against the position",
                "Entry reason = Exit reason",
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// Discipline band
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisciplineBand {
    High,
    Moderate,
    Low,
}

impl DisciplineBand {
    pub fn from_pct(score_pct: i64) -> Self {
        if score_pct >= 75 {
            DisciplineBand::High
        } else if score_pct >= 50 {
            DisciplineBand::Moderate
        } else {
            DisciplineBand::Low
        }
    }

    /// e.g. `"High discipline (82%)"`.
    pub fn describe(&self, score_pct: i64) -> String {
        let word = match self {
            DisciplineBand::High => "High",
            DisciplineBand::Moderate => "Moderate",
            DisciplineBand::Low => "Low",
        };
        format!("{word} discipline ({score_pct}%)")
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Shareable plain-text summary of a ready trade.
pub fn snapshot_text(
    direction: Direction,
    context: MarketContext,
    location: DailyLocation,
    score_pct: i64,
) -> String {
    format!(
        "DTT Trade Snapshot\n\
         \n\
         Direction: {}\n\
         Market context: {}\n\
         Entry location: {}\n\
         HTF traffic: Clear\n\
         Timing: Optimal window\n\
         Trade plan discipline: {}%",
        direction.label(),
        context.label(),
        location.label(),
        score_pct
    )
}
