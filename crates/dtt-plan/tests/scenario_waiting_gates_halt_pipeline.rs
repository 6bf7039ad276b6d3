//! Alignment, target and timing failures leave the plan WAITING.

use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;
use dtt_plan::*;
use dtt_window::DEFAULT_TIMEZONE;

fn local(h: u32, m: u32) -> DateTime<Tz> {
    DEFAULT_TIMEZONE
        .with_ymd_and_hms(2026, 6, 9, h, m, 0)
        .single()
        .unwrap()
}

fn ready_long_from_low() -> GateAnswers {
    GateAnswers {
        daily_zones: ZonesMarked::Marked,
        direction: Direction::Long,
        daily_bias: DailyBias::Pullback,
        htf_traffic: HtfTraffic::Aligned,
        daily_location: DailyLocation::NearDailyLow,
        structure_4h: Structure::BullishBos,
        structure_1h: Structure::BullishIntact,
        target_space: TargetSpace::ClearSpace,
        reward_risk: RewardRisk::TwoROrBetter,
        htf_reaction: HtfReaction::ClearRejection,
        entry_timeframe: EntryTimeframe::M30,
        entry_signal: EntrySignal::StructureBreak,
        structure_15m: Structure15m::AlignedCorrected,
    }
}

#[test]
fn scenario_4h_against_direction_waits_without_reading_1h() {
    let a = GateAnswers {
        structure_4h: Structure::Ranging,
        structure_1h: Structure::BearishBos,
        ..ready_long_from_low()
    };
    let r = evaluate_trade_plan(&a, local(22, 30));

    assert_eq!(r.trade_state, TradeState::Waiting);
    assert_eq!(*r.evaluated_gates().last().unwrap(), GateId::Alignment);
    assert_eq!(
        r.outcome_of(GateId::Alignment),
        Some(&GateOutcome::Failed {
            reasons: vec![FailReason::Structure4hAgainstDirection]
        })
    );
    // 0.5 + (1 + 1 bonus for buying the low)
    assert!((r.discipline_score - 2.5).abs() < 1e-12);
}

#[test]
fn scenario_1h_against_direction_waits() {
    let a = GateAnswers {
        structure_1h: Structure::BearishIntact,
        ..ready_long_from_low()
    };
    let r = evaluate_trade_plan(&a, local(22, 30));
    assert_eq!(r.trade_state, TradeState::Waiting);
    assert_eq!(
        r.outcome_of(GateId::Alignment),
        Some(&GateOutcome::Failed {
            reasons: vec![FailReason::Structure1hAgainstDirection]
        })
    );
    assert!(r.outcome_of(GateId::Target).is_none());
}

#[test]
fn scenario_target_too_close_waits_and_skips_timing() {
    let a = GateAnswers {
        target_space: TargetSpace::TooClose,
        reward_risk: RewardRisk::BelowTwoR,
        ..ready_long_from_low()
    };
    let r = evaluate_trade_plan(&a, local(22, 30));

    assert_eq!(r.trade_state, TradeState::Waiting);
    assert_eq!(
        r.outcome_of(GateId::Target),
        Some(&GateOutcome::Failed {
            reasons: vec![FailReason::TargetTooClose, FailReason::BelowTwoR]
        })
    );
    assert!(r.outcome_of(GateId::Timing).is_none());
    // 0.5 + 2.0 + 1.25
    assert!((r.discipline_score - 3.75).abs() < 1e-12);
    assert!(r.snapshot_text.is_none());
}

#[test]
fn scenario_outside_window_waits_even_with_entry_confirmed() {
    let r = evaluate_trade_plan(&ready_long_from_low(), local(20, 0));

    assert_eq!(r.trade_state, TradeState::Waiting);
    assert_eq!(
        r.outcome_of(GateId::Timing),
        Some(&GateOutcome::Failed {
            reasons: vec![FailReason::OutsideEntryWindow]
        })
    );
    assert!(!r.time_context.in_window);
    assert_eq!(r.time_context.minutes_to_window, Some(60));
    // Timing point withheld: 0.5 + 2.0 + 1.25 + 1.0
    assert!((r.discipline_score - 4.75).abs() < 1e-12);
    assert!(r.snapshot_text.is_none());
}

#[test]
fn scenario_higher_entry_timeframe_needs_corrected_15m() {
    let a = GateAnswers {
        entry_timeframe: EntryTimeframe::H1,
        structure_15m: Structure15m::ExtendedLate,
        ..ready_long_from_low()
    };
    let r = evaluate_trade_plan(&a, local(22, 30));

    assert_eq!(r.trade_state, TradeState::Waiting);
    assert_eq!(
        r.outcome_of(GateId::Timing),
        Some(&GateOutcome::Failed {
            reasons: vec![FailReason::Structure15mExtended]
        })
    );
}

#[test]
fn scenario_15m_entry_ignores_15m_structure() {
    let a = GateAnswers {
        entry_timeframe: EntryTimeframe::M15,
        structure_15m: Structure15m::ExtendedLate,
        ..ready_long_from_low()
    };
    let r = evaluate_trade_plan(&a, local(22, 30));
    assert_eq!(r.trade_state, TradeState::TradeReady);
    // 0.5 + 2.0 + 1.25 + 1.0 + 1.0
    assert!((r.discipline_score - MAX_SCORE).abs() < 1e-12);
}

#[test]
fn scenario_long_near_high_penalized_and_warned() {
    let a = GateAnswers {
        daily_location: DailyLocation::NearDailyHigh,
        ..ready_long_from_low()
    };
    let r = evaluate_trade_plan(&a, local(22, 30));

    assert_eq!(r.trade_state, TradeState::TradeReady);
    // 0.5 + 0.75 + 1.25 + 1.0 + 1.0
    assert!((r.discipline_score - 4.5).abs() < 1e-12);
    assert_eq!(r.score_pct, 78);
    assert_eq!(r.advisories, vec![Advisory::LongNearDailyHigh]);
}
