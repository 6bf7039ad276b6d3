//! Every gate answered favourably, inside the entry window.

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

/// Long from mid-range: no location bonus or penalty.
fn ready_long() -> GateAnswers {
    GateAnswers {
        daily_zones: ZonesMarked::Marked,
        direction: Direction::Long,
        daily_bias: DailyBias::Continuation,
        htf_traffic: HtfTraffic::Aligned,
        daily_location: DailyLocation::MiddleOfRange,
        structure_4h: Structure::BullishIntact,
        structure_1h: Structure::BullishBos,
        target_space: TargetSpace::ClearSpace,
        reward_risk: RewardRisk::TwoROrBetter,
        htf_reaction: HtfReaction::ClearRejection,
        entry_timeframe: EntryTimeframe::M15,
        entry_signal: EntrySignal::StructureBreak,
        structure_15m: Structure15m::Unanswered,
    }
}

#[test]
fn scenario_full_pass_scores_four_point_seven_five() {
    let r = evaluate_trade_plan(&ready_long(), local(22, 30));

    assert_eq!(r.trade_state, TradeState::TradeReady);
    assert!((r.discipline_score - 4.75).abs() < 1e-12);
    assert_eq!(r.score_pct, 82);
    assert_eq!(r.band, DisciplineBand::High);
    assert_eq!(
        r.evaluated_gates(),
        vec![
            GateId::Preparation,
            GateId::Context,
            GateId::Alignment,
            GateId::Target,
            GateId::Timing
        ]
    );
    assert!(r.gate_results.iter().all(|g| g.outcome.is_passed()));
    assert_eq!(r.advisories, vec![Advisory::MidRangeEntry]);
}

#[test]
fn scenario_ready_plan_carries_snapshot_and_guidance() {
    let r = evaluate_trade_plan(&ready_long(), local(22, 30));

    let text = r.snapshot_text.as_deref().expect("snapshot when ready");
    assert!(text.contains("Direction: Long"));
    assert!(text.contains("Market context: Likely continuation toward Daily High"));
    assert!(text.contains("Entry location: Middle of Range"));
    assert!(text.contains("HTF traffic: Clear"));
    assert!(text.contains("Timing: Optimal window"));
    assert!(text.contains("Trade plan discipline: 82%"));

    let g = r.guidance.expect("guidance when ready");
    assert_eq!(g.stop_loss, "Below last valid 15m–4H Higher Low");
}

#[test]
fn scenario_perfect_short_reaches_max_score() {
    let a = GateAnswers {
        direction: Direction::Short,
        daily_bias: DailyBias::Pullback,
        daily_location: DailyLocation::NearDailyHigh,
        structure_4h: Structure::BearishBos,
        structure_1h: Structure::BearishIntact,
        entry_timeframe: EntryTimeframe::H1,
        entry_signal: EntrySignal::ReversalPattern,
        structure_15m: Structure15m::AlignedCorrected,
        ..ready_long()
    };
    let r = evaluate_trade_plan(&a, local(9, 0));

    assert_eq!(r.trade_state, TradeState::TradeReady);
    assert!((r.discipline_score - MAX_SCORE).abs() < 1e-12);
    assert_eq!(r.score_pct, 100);
    assert!(r.advisories.is_empty());
    assert!(r
        .snapshot_text
        .unwrap()
        .contains("Likely pullback toward Daily Higher Low"));
}

#[test]
fn scenario_ready_result_serializes_state_and_gates() {
    let r = evaluate_trade_plan(&ready_long(), local(22, 30));
    let v = serde_json::to_value(&r).unwrap();

    assert_eq!(v["trade_state"], "TRADE_READY");
    assert_eq!(v["score_pct"], 82);
    assert_eq!(v["gate_results"][2]["gate"], "alignment");
    assert_eq!(v["gate_results"][2]["outcome"], "passed");
    assert_eq!(v["gate_results"][2]["points"], 1.25);
    assert_eq!(v["time_context"]["in_window"], true);
}
