use assert_cmd::Command;
use predicates::prelude::*;

fn dtt(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("dtt").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn defaults_size_a_prop_firm_trade() {
    let dir = tempfile::tempdir().unwrap();
    // 10k drawdown budget / 20 trades = 500; cap is 40% of 5k daily.
    dtt(&dir)
        .arg("risk")
        .assert()
        .success()
        .stdout(predicate::str::contains("account_type=PROP_FIRM risk_mode=BALANCED"))
        .stdout(predicate::str::contains("risk_dollars=500.00"))
        .stdout(predicate::str::contains("position_size=25000.00"))
        .stdout(predicate::str::contains("leverage=0.50"))
        .stdout(predicate::str::contains("capped=false"))
        .stdout(predicate::str::contains("note=Risk within prop firm limits"));
}

#[test]
fn personal_flags_override_config() {
    let dir = tempfile::tempdir().unwrap();
    dtt(&dir)
        .args([
            "risk",
            "--account-type",
            "personal",
            "--current-balance",
            "25000",
            "--risk-mode",
            "aggressive",
            "--stop-loss-pct",
            "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("risk_dollars=1250.00"))
        .stdout(predicate::str::contains("leverage=10.00"))
        .stdout(predicate::str::contains("prop_firm").not());
}

#[test]
fn tight_daily_drawdown_caps_risk() {
    let dir = tempfile::tempdir().unwrap();
    dtt(&dir)
        .args(["risk", "--daily-drawdown-pct", "1", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""capped": true"#))
        .stdout(predicate::str::contains(r#""risk_dollars": 400.0"#))
        .stdout(predicate::str::contains("capped_to_daily_drawdown"));
}

#[test]
fn exhausted_drawdown_is_a_breach() {
    let dir = tempfile::tempdir().unwrap();
    dtt(&dir)
        .args(["risk", "--current-balance", "90000"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("RISK_BREACH"))
        .stderr(predicate::str::contains("remaining_dd=0.00"));
}

#[test]
fn zero_stop_is_invalid_input() {
    let dir = tempfile::tempdir().unwrap();
    dtt(&dir)
        .args(["risk", "--stop-loss-pct", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("RISK_INVALID_INPUT field=stop_loss_pct"));
}

#[test]
fn account_profile_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("desk.yaml");
    std::fs::write(
        &cfg,
        "account:\n  account_type: personal\n  current_balance: 10000\n  risk_mode: sustainable\n",
    )
    .unwrap();

    dtt(&dir)
        .args(["risk", "--config", cfg.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("account_type=PERSONAL risk_mode=SUSTAINABLE"))
        .stdout(predicate::str::contains("risk_dollars=100.00"));
}
