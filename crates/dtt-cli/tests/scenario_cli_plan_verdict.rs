use assert_cmd::Command;
use predicates::prelude::*;

const READY_LONG: &str = r#"
daily_zones: marked
direction: long
daily_bias: continuation
htf_traffic: aligned
daily_location: middle_of_range
structure_4h: bullish_intact
structure_1h: bullish_bos
target_space: clear_space
reward_risk: two_r_or_better
htf_reaction: clear_rejection
entry_timeframe: 15m
entry_signal: structure_break
"#;

// 22:30 in UTC-5.
const IN_WINDOW: &str = "2026-06-10T03:30:00Z";
// 20:00 in UTC-5.
const BEFORE_WINDOW: &str = "2026-06-09T20:00:00-05:00";

fn dtt(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("dtt").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

fn write(dir: &tempfile::TempDir, name: &str, body: &str) -> String {
    let p = dir.path().join(name);
    std::fs::write(&p, body).unwrap();
    p.to_string_lossy().into_owned()
}

#[test]
fn ready_plan_prints_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let answers = write(&dir, "answers.yaml", READY_LONG);

    dtt(&dir)
        .args(["plan", "--answers", &answers, "--now", IN_WINDOW])
        .assert()
        .success()
        .stdout(predicate::str::contains("trade_state=TRADE_READY"))
        .stdout(predicate::str::contains("score_pct=82"))
        .stdout(predicate::str::contains("discipline=High discipline (82%)"))
        .stdout(predicate::str::contains("candle=19:00 → 23:00"))
        .stdout(predicate::str::contains("DTT Trade Snapshot"))
        .stdout(predicate::str::contains("Trade plan discipline: 82%"));
}

#[test]
fn before_window_waits_without_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let answers = write(&dir, "answers.yml", READY_LONG);

    dtt(&dir)
        .args(["plan", "--answers", &answers, "--now", BEFORE_WINDOW])
        .assert()
        .success()
        .stdout(predicate::str::contains("trade_state=WAITING"))
        .stdout(predicate::str::contains("not in entry window"))
        .stdout(predicate::str::contains("minutes_to_window=60"))
        .stdout(predicate::str::contains("DTT Trade Snapshot").not());
}

#[test]
fn crowded_htf_is_no_trade_in_json() {
    let dir = tempfile::tempdir().unwrap();
    let answers = write(
        &dir,
        "answers.json",
        r#"{"direction": "short", "daily_bias": "pullback", "htf_traffic": "crowded", "daily_location": "near_daily_high"}"#,
    );

    let out = dtt(&dir)
        .args(["plan", "--answers", &answers, "--now", IN_WINDOW, "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["trade_state"], "NO_TRADE");
    assert_eq!(v["gate_results"].as_array().unwrap().len(), 2);
    assert_eq!(v["gate_results"][1]["reasons"][0]["code"], "htf_traffic_crowded");
    assert!(v["snapshot_text"].is_null());
}

#[test]
fn bad_now_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let answers = write(&dir, "answers.yaml", READY_LONG);

    dtt(&dir)
        .args(["plan", "--answers", &answers, "--now", "tonight"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --now"));
}

#[test]
fn missing_answers_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    dtt(&dir)
        .args(["plan", "--answers", "nope.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("read answers file failed"));
}
