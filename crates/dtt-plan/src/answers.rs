//! Checklist answers.
//!
//! Every question is its own enum with an explicit `Unanswered` variant. It is
//! the serde default, so a missing key in an answers document means the
//! question was skipped, never that a real choice was made.

use serde::{Deserialize, Serialize};

/// Common surface for all answer enums.
pub trait Answer {
    fn is_answered(&self) -> bool;
    /// Text shown on the checklist form for this choice.
    fn label(&self) -> &'static str;
}

const UNANSWERED: &str = "Unanswered";

// ---------------------------------------------------------------------------
// Gate 0: Preparation
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZonesMarked {
    #[default]
    Unanswered,
    Marked,
    Absent,
}

impl Answer for ZonesMarked {
    fn is_answered(&self) -> bool {
        *self != ZonesMarked::Unanswered
    }
    fn label(&self) -> &'static str {
        match self {
            ZonesMarked::Unanswered => UNANSWERED,
            ZonesMarked::Marked => "Yes – daily zones marked",
            ZonesMarked::Absent => "No – daily zones not marked",
        }
    }
}

// ---------------------------------------------------------------------------
// Gate 1: Direction & Context
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Unanswered,
    Long,
    Short,
}

impl Answer for Direction {
    fn is_answered(&self) -> bool {
        *self != Direction::Unanswered
    }
    fn label(&self) -> &'static str {
        match self {
            Direction::Unanswered => UNANSWERED,
            Direction::Long => "Long",
            Direction::Short => "Short",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DailyBias {
    #[default]
    Unanswered,
    /// HH for longs / LL for shorts.
    Continuation,
    /// HL for longs / LH for shorts.
    Pullback,
}

impl Answer for DailyBias {
    fn is_answered(&self) -> bool {
        *self != DailyBias::Unanswered
    }
    fn label(&self) -> &'static str {
        match self {
            DailyBias::Unanswered => UNANSWERED,
            DailyBias::Continuation => "Continuation (HH / LL)",
            DailyBias::Pullback => "Pullback (HL / LH)",
        }
    }
}

/// Weekly / monthly levels between price and target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HtfTraffic {
    #[default]
    Unanswered,
    Aligned,
    Crowded,
}

impl Answer for HtfTraffic {
    fn is_answered(&self) -> bool {
        *self != HtfTraffic::Unanswered
    }
    fn label(&self) -> &'static str {
        match self {
            HtfTraffic::Unanswered => UNANSWERED,
            HtfTraffic::Aligned => "Aligned – no major levels in the way",
            HtfTraffic::Crowded => "Crowded – major HTF levels nearby",
        }
    }
}

/// Price location within today's range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DailyLocation {
    #[default]
    Unanswered,
    NearDailyLow,
    MiddleOfRange,
    NearDailyHigh,
}

impl Answer for DailyLocation {
    fn is_answered(&self) -> bool {
        *self != DailyLocation::Unanswered
    }
    fn label(&self) -> &'static str {
        match self {
            DailyLocation::Unanswered => UNANSWERED,
            DailyLocation::NearDailyLow => "Near Daily Low",
            DailyLocation::MiddleOfRange => "Middle of Range",
            DailyLocation::NearDailyHigh => "Near Daily High",
        }
    }
}

// ---------------------------------------------------------------------------
// Gate 1.5: Alignment
// ---------------------------------------------------------------------------

/// Market structure read on the 4H or 1H chart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Structure {
    #[default]
    Unanswered,
    BullishIntact,
    BullishBos,
    BearishIntact,
    BearishBos,
    Ranging,
}

impl Structure {
    /// `true` if this structure carries a trade in `direction`.
    pub fn supports(&self, direction: Direction) -> bool {
        match direction {
            Direction::Long => matches!(self, Structure::BullishIntact | Structure::BullishBos),
            Direction::Short => matches!(self, Structure::BearishIntact | Structure::BearishBos),
            Direction::Unanswered => false,
        }
    }
}

impl Answer for Structure {
    fn is_answered(&self) -> bool {
        *self != Structure::Unanswered
    }
    fn label(&self) -> &'static str {
        match self {
            Structure::Unanswered => UNANSWERED,
            Structure::BullishIntact => "Bullish – structure intact",
            Structure::BullishBos => "Bullish – break of structure",
            Structure::BearishIntact => "Bearish – structure intact",
            Structure::BearishBos => "Bearish – break of structure",
            Structure::Ranging => "Still rejecting / ranging",
        }
    }
}

// ---------------------------------------------------------------------------
// Gate 2: Target
// ---------------------------------------------------------------------------

/// Clear space to the next daily HTF support / resistance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetSpace {
    #[default]
    Unanswered,
    ClearSpace,
    TooClose,
}

impl Answer for TargetSpace {
    fn is_answered(&self) -> bool {
        *self != TargetSpace::Unanswered
    }
    fn label(&self) -> &'static str {
        match self {
            TargetSpace::Unanswered => UNANSWERED,
            TargetSpace::ClearSpace => "Yes – clean space",
            TargetSpace::TooClose => "No – target too close",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardRisk {
    #[default]
    Unanswered,
    TwoROrBetter,
    BelowTwoR,
}

impl Answer for RewardRisk {
    fn is_answered(&self) -> bool {
        *self != RewardRisk::Unanswered
    }
    fn label(&self) -> &'static str {
        match self {
            RewardRisk::Unanswered => UNANSWERED,
            RewardRisk::TwoROrBetter => "Yes",
            RewardRisk::BelowTwoR => "No",
        }
    }
}

/// Reaction from daily–monthly support / resistance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HtfReaction {
    #[default]
    Unanswered,
    ClearRejection,
    OpenSpace,
}

impl Answer for HtfReaction {
    fn is_answered(&self) -> bool {
        *self != HtfReaction::Unanswered
    }
    fn label(&self) -> &'static str {
        match self {
            HtfReaction::Unanswered => UNANSWERED,
            HtfReaction::ClearRejection => "Yes – clear rejection / flip",
            HtfReaction::OpenSpace => "No – reacting from open space",
        }
    }
}

// ---------------------------------------------------------------------------
// Gate 3: Timing & Entry
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryTimeframe {
    #[default]
    #[serde(rename = "unanswered")]
    Unanswered,
    #[serde(rename = "15m")]
    M15,
    #[serde(rename = "30m")]
    M30,
    #[serde(rename = "1h")]
    H1,
}

impl EntryTimeframe {
    /// Higher entry timeframes need the 15m chart to have corrected first.
    pub fn requires_15m_confirmation(&self) -> bool {
        matches!(self, EntryTimeframe::M30 | EntryTimeframe::H1)
    }
}

impl Answer for EntryTimeframe {
    fn is_answered(&self) -> bool {
        *self != EntryTimeframe::Unanswered
    }
    fn label(&self) -> &'static str {
        match self {
            EntryTimeframe::Unanswered => UNANSWERED,
            EntryTimeframe::M15 => "15m",
            EntryTimeframe::M30 => "30m",
            EntryTimeframe::H1 => "1H",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntrySignal {
    #[default]
    Unanswered,
    StructureBreak,
    ReversalPattern,
}

impl Answer for EntrySignal {
    fn is_answered(&self) -> bool {
        *self != EntrySignal::Unanswered
    }
    fn label(&self) -> &'static str {
        match self {
            EntrySignal::Unanswered => UNANSWERED,
            EntrySignal::StructureBreak => {
                "Break of structure + Engulfing candle + Volume increase"
            }
            EntrySignal::ReversalPattern => {
                "Double top/bottom OR H&S/inverse H&S + Engulfing candle + Volume increase"
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Structure15m {
    #[default]
    Unanswered,
    AlignedCorrected,
    ExtendedLate,
}

impl Answer for Structure15m {
    fn is_answered(&self) -> bool {
        *self != Structure15m::Unanswered
    }
    fn label(&self) -> &'static str {
        match self {
            Structure15m::Unanswered => UNANSWERED,
            Structure15m::AlignedCorrected => "Aligned and corrected",
            Structure15m::ExtendedLate => "Extended / late",
        }
    }
}

// ---------------------------------------------------------------------------
// GateAnswers
// ---------------------------------------------------------------------------

/// Full snapshot of the checklist for one evaluation pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateAnswers {
    // Gate 0
    pub daily_zones: ZonesMarked,

    // Gate 1
    pub direction: Direction,
    pub daily_bias: DailyBias,
    pub htf_traffic: HtfTraffic,
    pub daily_location: DailyLocation,

    // Gate 1.5
    pub structure_4h: Structure,
    pub structure_1h: Structure,

    // Gate 2
    pub target_space: TargetSpace,
    pub reward_risk: RewardRisk,
    pub htf_reaction: HtfReaction,

    // Gate 3
    pub entry_timeframe: EntryTimeframe,
    pub entry_signal: EntrySignal,
    pub structure_15m: Structure15m,
}
