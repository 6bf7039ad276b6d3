use crate::{
    AccountProfile, AccountType, BreachReport, PropFirmBreakdown, RiskNote, RiskResult,
    SizingError, ValidationError, DAILY_CAP_FRACTION,
};

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

/// Reject inputs that would make the sizing formula divide by zero, go
/// negative, or silently produce infinities.
///
/// Prop-firm rules are only checked for prop-firm accounts; a personal
/// profile may carry stale drawdown fields without failing.
pub fn validate_profile(p: &AccountProfile) -> Result<(), ValidationError> {
    finite("starting_balance", p.starting_balance)?;
    finite("current_balance", p.current_balance)?;
    finite("stop_loss_pct", p.stop_loss_pct)?;
    finite("margin_pct", p.margin_pct)?;

    if p.stop_loss_pct <= 0.0 {
        return Err(ValidationError::NonPositiveStopLoss {
            stop_loss_pct: p.stop_loss_pct,
        });
    }
    if p.margin_pct <= 0.0 || p.margin_pct > 100.0 {
        return Err(ValidationError::MarginOutOfRange {
            margin_pct: p.margin_pct,
        });
    }
    // current_balance is the margin base; zero would make leverage 0/0.
    if p.current_balance <= 0.0 {
        return Err(ValidationError::BalanceOutOfRange {
            field: "current_balance",
            value: p.current_balance,
        });
    }
    if p.starting_balance < 0.0 {
        return Err(ValidationError::BalanceOutOfRange {
            field: "starting_balance",
            value: p.starting_balance,
        });
    }

    if p.account_type == AccountType::PropFirm {
        prop_rule("max_drawdown_pct", p.max_drawdown_pct)?;
        prop_rule("daily_drawdown_pct", p.daily_drawdown_pct)?;
    }

    Ok(())
}

fn finite(field: &'static str, v: f64) -> Result<(), ValidationError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFinite { field })
    }
}

fn prop_rule(field: &'static str, v: Option<f64>) -> Result<f64, ValidationError> {
    let v = v.ok_or(ValidationError::MissingPropFirmRule { field })?;
    finite(field, v)?;
    if v <= 0.0 {
        return Err(ValidationError::NonPositivePropFirmRule { field, value: v });
    }
    Ok(v)
}

// ---------------------------------------------------------------------------
// Core sizing
// ---------------------------------------------------------------------------

/// Leverage needed to carry `risk_dollars` at the given stop distance with
/// `margin_pct` of `current_balance` posted as margin.
///
/// Returns `(position_size, margin_used, leverage)`. Callers must validate
/// inputs first; this function does not guard against zero divisors.
pub fn leverage_for(
    risk_dollars: f64,
    stop_loss_pct: f64,
    current_balance: f64,
    margin_pct: f64,
) -> (f64, f64, f64) {
    let stop_fraction = stop_loss_pct / 100.0;
    let position_size = risk_dollars / stop_fraction;
    let margin_used = current_balance * (margin_pct / 100.0);
    (position_size, margin_used, position_size / margin_used)
}

/// Main evaluator: dollar risk and leverage for one account snapshot.
///
/// Order of checks:
/// 1. Validation (nothing is computed on bad input).
/// 2. Prop-firm breach (nothing is sized once max drawdown is exhausted).
/// 3. Sizing + leverage.
pub fn compute_risk(p: &AccountProfile) -> Result<RiskResult, SizingError> {
    validate_profile(p)?;

    let (risk_dollars, note, capped, prop_firm) = match p.account_type {
        AccountType::Personal => {
            let risk_dollars = p.current_balance * (p.risk_mode.personal_risk_pct() / 100.0);
            (risk_dollars, RiskNote::PersonalModeApplied, false, None)
        }
        AccountType::PropFirm => {
            let b = prop_firm_budget(p)?;
            let capped = b.base_risk > b.daily_cap;
            let (risk_dollars, note) = if capped {
                (b.daily_cap, RiskNote::CappedToDailyDrawdown)
            } else {
                (b.base_risk, RiskNote::WithinPropLimits)
            };
            (risk_dollars, note, capped, Some(b))
        }
    };

    let (position_size, margin_used, leverage) =
        leverage_for(risk_dollars, p.stop_loss_pct, p.current_balance, p.margin_pct);

    Ok(RiskResult {
        risk_dollars,
        position_size,
        margin_used,
        leverage,
        note,
        capped,
        prop_firm,
    })
}

fn prop_firm_budget(p: &AccountProfile) -> Result<PropFirmBreakdown, SizingError> {
    let max_dd_pct = prop_rule("max_drawdown_pct", p.max_drawdown_pct)?;
    let daily_dd_pct = prop_rule("daily_drawdown_pct", p.daily_drawdown_pct)?;

    let max_dd_dollars = p.starting_balance * (max_dd_pct / 100.0);
    let daily_dd_dollars = p.starting_balance * (daily_dd_pct / 100.0);

    // Profit above the starting balance makes drawdown_used negative and
    // widens the remaining budget.
    let drawdown_used = p.starting_balance - p.current_balance;
    let remaining_dd = max_dd_dollars - drawdown_used;

    if remaining_dd <= 0.0 {
        return Err(SizingError::Breach(BreachReport {
            max_dd_dollars,
            drawdown_used,
            remaining_dd,
        }));
    }

    Ok(PropFirmBreakdown {
        max_dd_dollars,
        daily_dd_dollars,
        drawdown_used,
        remaining_dd,
        base_risk: remaining_dd / p.risk_mode.divider(),
        daily_cap: daily_dd_dollars * DAILY_CAP_FRACTION,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RiskMode;

    #[test]
    fn leverage_matches_hand_calculation() {
        // $2,000 risk at a 2% stop = $100k notional; 50% of $100k margin = $50k.
        let (pos, margin, lev) = leverage_for(2_000.0, 2.0, 100_000.0, 50.0);
        assert!((pos - 100_000.0).abs() < 1e-9);
        assert!((margin - 50_000.0).abs() < 1e-9);
        assert!((lev - 2.0).abs() < 1e-12);
    }

    #[test]
    fn personal_profile_ignores_missing_prop_rules() {
        let p = AccountProfile::personal(10_000.0, RiskMode::Sustainable, 1.0, 10.0);
        assert!(validate_profile(&p).is_ok());
    }

    #[test]
    fn prop_profile_requires_daily_rule() {
        let mut p = AccountProfile::prop_firm(50_000.0, RiskMode::Balanced, 10.0, 5.0);
        p.daily_drawdown_pct = None;
        assert_eq!(
            validate_profile(&p),
            Err(ValidationError::MissingPropFirmRule {
                field: "daily_drawdown_pct"
            })
        );
    }

    #[test]
    fn nan_stop_is_non_finite_not_non_positive() {
        let p = AccountProfile::default().with_trade_setup(f64::NAN, 50.0);
        assert_eq!(
            validate_profile(&p),
            Err(ValidationError::NonFinite {
                field: "stop_loss_pct"
            })
        );
    }

    #[test]
    fn profit_above_start_widens_budget() {
        let p = AccountProfile::prop_firm(100_000.0, RiskMode::Sustainable, 10.0, 5.0)
            .with_current_balance(104_000.0);
        let r = compute_risk(&p).unwrap();
        let b = r.prop_firm.unwrap();
        assert!((b.drawdown_used + 4_000.0).abs() < 1e-9);
        assert!((b.remaining_dd - 14_000.0).abs() < 1e-9);
        // 14_000 / 40 = 350 < daily cap 2_000
        assert!((r.risk_dollars - 350.0).abs() < 1e-9);
        assert!(!r.capped);
    }
}
