//! `dtt plan`: run the checklist once and report the verdict.

use anyhow::Result;
use dtt_config::ConfigSurface;
use dtt_plan::{evaluate_trade_plan, GateOutcome, TradePlanResult};

use super::window::print_time_context;
use super::{load_answers, load_config, resolve_now};

pub fn run_plan(
    answers_path: &str,
    now: Option<&str>,
    config_paths: &[String],
    json: bool,
) -> Result<()> {
    let desk = load_config(config_paths, ConfigSurface::Plan)?;
    let tz = desk.timezone()?;
    let answers = load_answers(answers_path)?;
    let now = resolve_now(now, tz)?;

    let result = evaluate_trade_plan(&answers, now);
    tracing::info!(
        trade_state = result.trade_state.as_str(),
        score_pct = result.score_pct,
        gates = result.gate_results.len(),
        "trade plan evaluated"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_lines(&result);
    }
    Ok(())
}

fn print_lines(r: &TradePlanResult) {
    println!("trade_state={}", r.trade_state.as_str());
    println!(
        "discipline_score={} max_score={} score_pct={}",
        r.discipline_score, r.max_score, r.score_pct
    );
    println!("discipline={}", r.band.describe(r.score_pct));
    println!("market_context={}", r.market_context.label());

    for g in &r.gate_results {
        match &g.outcome {
            GateOutcome::Passed { points } => {
                println!("gate=\"{}\" outcome=PASSED points={}", g.gate.label(), points)
            }
            GateOutcome::Failed { reasons } => {
                let msgs: Vec<&str> = reasons.iter().map(|r| r.message()).collect();
                println!(
                    "gate=\"{}\" outcome=FAILED reasons={:?}",
                    g.gate.label(),
                    msgs
                );
            }
        }
    }

    for a in &r.advisories {
        println!("advisory={}", a.message());
    }

    print_time_context(&r.time_context);

    if let Some(g) = &r.guidance {
        println!("stop_loss={}", g.stop_loss);
        for m in g.management {
            println!("management={}", m);
        }
    }
    if let Some(text) = &r.snapshot_text {
        println!();
        println!("{}", text);
    }
}
