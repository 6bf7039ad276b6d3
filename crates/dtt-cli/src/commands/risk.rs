//! `dtt risk`: size one trade.

use anyhow::{bail, Result};
use clap::Args;
use dtt_config::ConfigSurface;
use dtt_risk::{compute_risk, AccountProfile, AccountType, RiskMode, RiskResult, SizingError};

use super::{fmt2, load_config};

/// Flag overrides applied on top of the configured account profile.
#[derive(Args, Debug, Default)]
pub struct RiskArgs {
    /// PERSONAL | PROP_FIRM
    #[arg(long)]
    pub account_type: Option<String>,

    #[arg(long)]
    pub starting_balance: Option<f64>,

    #[arg(long)]
    pub current_balance: Option<f64>,

    /// AGGRESSIVE | BALANCED | SUSTAINABLE
    #[arg(long)]
    pub risk_mode: Option<String>,

    #[arg(long)]
    pub stop_loss_pct: Option<f64>,

    #[arg(long)]
    pub margin_pct: Option<f64>,

    #[arg(long)]
    pub max_drawdown_pct: Option<f64>,

    #[arg(long)]
    pub daily_drawdown_pct: Option<f64>,
}

impl RiskArgs {
    pub fn apply(self, mut p: AccountProfile) -> Result<AccountProfile> {
        if let Some(t) = self.account_type.as_deref() {
            p.account_type = parse_account_type(t)?;
        }
        if let Some(m) = self.risk_mode.as_deref() {
            p.risk_mode = parse_risk_mode(m)?;
        }
        if let Some(v) = self.starting_balance {
            p.starting_balance = v;
        }
        if let Some(v) = self.current_balance {
            p.current_balance = v;
        }
        if let Some(v) = self.stop_loss_pct {
            p.stop_loss_pct = v;
        }
        if let Some(v) = self.margin_pct {
            p.margin_pct = v;
        }
        if self.max_drawdown_pct.is_some() {
            p.max_drawdown_pct = self.max_drawdown_pct;
        }
        if self.daily_drawdown_pct.is_some() {
            p.daily_drawdown_pct = self.daily_drawdown_pct;
        }
        Ok(p)
    }
}

pub fn parse_account_type(s: &str) -> Result<AccountType> {
    match s.trim().to_uppercase().replace('-', "_").as_str() {
        "PERSONAL" => Ok(AccountType::Personal),
        "PROP_FIRM" | "PROP" => Ok(AccountType::PropFirm),
        other => bail!(
            "invalid --account-type '{}'. expected one of: PERSONAL | PROP_FIRM",
            other
        ),
    }
}

pub fn parse_risk_mode(s: &str) -> Result<RiskMode> {
    match s.trim().to_uppercase().as_str() {
        "AGGRESSIVE" => Ok(RiskMode::Aggressive),
        "BALANCED" => Ok(RiskMode::Balanced),
        "SUSTAINABLE" => Ok(RiskMode::Sustainable),
        other => bail!(
            "invalid --risk-mode '{}'. expected one of: AGGRESSIVE | BALANCED | SUSTAINABLE",
            other
        ),
    }
}

/// Execute `dtt risk`.
pub fn run_risk(config_paths: &[String], overrides: RiskArgs, json: bool) -> Result<()> {
    let desk = load_config(config_paths, ConfigSurface::Risk)?;
    let profile = overrides.apply(desk.account)?;

    let result = match compute_risk(&profile) {
        Ok(r) => r,
        Err(SizingError::Breach(b)) => {
            tracing::warn!(
                remaining_dd = b.remaining_dd,
                drawdown_used = b.drawdown_used,
                "max drawdown breached"
            );
            bail!(
                "RISK_BREACH: account has breached max drawdown; stop trading. \
                 max_dd_dollars={} drawdown_used={} remaining_dd={}",
                fmt2(b.max_dd_dollars),
                fmt2(b.drawdown_used),
                fmt2(b.remaining_dd)
            );
        }
        Err(SizingError::Validation(e)) => {
            bail!("RISK_INVALID_INPUT field={}: {}", e.field(), e);
        }
    };

    tracing::info!(
        account_type = profile.account_type.as_str(),
        risk_dollars = result.risk_dollars,
        capped = result.capped,
        "trade sized"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_lines(&profile, &result);
    }
    Ok(())
}

fn print_lines(profile: &AccountProfile, r: &RiskResult) {
    println!(
        "account_type={} risk_mode={}",
        profile.account_type.as_str(),
        profile.risk_mode.as_str()
    );
    println!("risk_dollars={}", fmt2(r.risk_dollars));
    println!("position_size={}", fmt2(r.position_size));
    println!("margin_used={}", fmt2(r.margin_used));
    println!("leverage={}", fmt2(r.leverage));
    println!("capped={}", r.capped);
    println!("note={}", r.note.message());
    if let Some(pf) = &r.prop_firm {
        println!(
            "prop_firm max_dd={} daily_dd={} used={} remaining={} base_risk={} daily_cap={}",
            fmt2(pf.max_dd_dollars),
            fmt2(pf.daily_dd_dollars),
            fmt2(pf.drawdown_used),
            fmt2(pf.remaining_dd),
            fmt2(pf.base_risk),
            fmt2(pf.daily_cap)
        );
    }
}
