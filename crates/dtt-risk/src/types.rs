use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Which rule set sizes the trade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Own capital: fixed percentage of current balance per risk mode.
    Personal,
    /// Funded account: risk is budgeted out of the remaining max drawdown.
    #[default]
    PropFirm,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Personal => "PERSONAL",
            AccountType::PropFirm => "PROP_FIRM",
        }
    }
}

/// How hard the account is pushed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskMode {
    Aggressive,
    #[default]
    Balanced,
    Sustainable,
}

impl RiskMode {
    /// Number of trades the remaining prop-firm drawdown is spread across.
    pub fn divider(&self) -> f64 {
        match self {
            RiskMode::Aggressive => 10.0,
            RiskMode::Balanced => 20.0,
            RiskMode::Sustainable => 40.0,
        }
    }

    /// Percent of current balance risked per trade on a personal account.
    pub fn personal_risk_pct(&self) -> f64 {
        match self {
            RiskMode::Aggressive => 5.0,
            RiskMode::Balanced => 2.0,
            RiskMode::Sustainable => 1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskMode::Aggressive => "AGGRESSIVE",
            RiskMode::Balanced => "BALANCED",
            RiskMode::Sustainable => "SUSTAINABLE",
        }
    }
}

/// Account parameters for one sizing call.
///
/// All percentages are expressed in percent (2.0 = 2%), not fractions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountProfile {
    pub account_type: AccountType,
    /// Balance the prop-firm drawdown rules are measured from.
    pub starting_balance: f64,
    pub current_balance: f64,
    pub risk_mode: RiskMode,
    /// Stop distance from entry, in percent of price.
    pub stop_loss_pct: f64,
    /// Share of current balance posted as margin, in percent.
    pub margin_pct: f64,
    /// Prop-firm only.
    pub max_drawdown_pct: Option<f64>,
    /// Prop-firm only.
    pub daily_drawdown_pct: Option<f64>,
}

impl Default for AccountProfile {
    fn default() -> Self {
        Self {
            account_type: AccountType::PropFirm,
            starting_balance: 100_000.0,
            current_balance: 100_000.0,
            risk_mode: RiskMode::Balanced,
            stop_loss_pct: 2.0,
            margin_pct: 50.0,
            max_drawdown_pct: Some(10.0),
            daily_drawdown_pct: Some(5.0),
        }
    }
}

impl AccountProfile {
    /// Personal account with no prop-firm rules attached.
    pub fn personal(balance: f64, risk_mode: RiskMode, stop_loss_pct: f64, margin_pct: f64) -> Self {
        Self {
            account_type: AccountType::Personal,
            starting_balance: balance,
            current_balance: balance,
            risk_mode,
            stop_loss_pct,
            margin_pct,
            max_drawdown_pct: None,
            daily_drawdown_pct: None,
        }
    }

    /// Prop-firm account; `current_balance` defaults to `starting_balance`.
    pub fn prop_firm(
        starting_balance: f64,
        risk_mode: RiskMode,
        max_drawdown_pct: f64,
        daily_drawdown_pct: f64,
    ) -> Self {
        Self {
            account_type: AccountType::PropFirm,
            starting_balance,
            current_balance: starting_balance,
            risk_mode,
            max_drawdown_pct: Some(max_drawdown_pct),
            daily_drawdown_pct: Some(daily_drawdown_pct),
            ..Self::default()
        }
    }

    pub fn with_current_balance(mut self, current_balance: f64) -> Self {
        self.current_balance = current_balance;
        self
    }

    pub fn with_trade_setup(mut self, stop_loss_pct: f64, margin_pct: f64) -> Self {
        self.stop_loss_pct = stop_loss_pct;
        self.margin_pct = margin_pct;
        self
    }
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Which rule produced the dollar risk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskNote {
    PersonalModeApplied,
    WithinPropLimits,
    CappedToDailyDrawdown,
}

impl RiskNote {
    pub fn message(&self) -> &'static str {
        match self {
            RiskNote::PersonalModeApplied => {
                "Personal account risk applied based on selected risk mode."
            }
            RiskNote::WithinPropLimits => "Risk within prop firm limits",
            RiskNote::CappedToDailyDrawdown => "Risk capped to protect daily drawdown",
        }
    }
}

/// Intermediate prop-firm figures, all in account currency.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropFirmBreakdown {
    pub max_dd_dollars: f64,
    pub daily_dd_dollars: f64,
    pub drawdown_used: f64,
    pub remaining_dd: f64,
    pub base_risk: f64,
    pub daily_cap: f64,
}

/// Sizing recommendation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskResult {
    pub risk_dollars: f64,
    /// Notional position implied by `risk_dollars` at the given stop distance.
    pub position_size: f64,
    pub margin_used: f64,
    pub leverage: f64,
    pub note: RiskNote,
    /// True when the daily-drawdown cap replaced the drawdown-budget risk.
    pub capped: bool,
    pub prop_firm: Option<PropFirmBreakdown>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Numeric input rejected before any computation.
#[derive(Clone, Debug, PartialEq)]
pub enum ValidationError {
    NonFinite { field: &'static str },
    NonPositiveStopLoss { stop_loss_pct: f64 },
    MarginOutOfRange { margin_pct: f64 },
    BalanceOutOfRange { field: &'static str, value: f64 },
    MissingPropFirmRule { field: &'static str },
    NonPositivePropFirmRule { field: &'static str, value: f64 },
}

impl ValidationError {
    /// Name of the offending input field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::NonFinite { field }
            | ValidationError::BalanceOutOfRange { field, .. }
            | ValidationError::MissingPropFirmRule { field }
            | ValidationError::NonPositivePropFirmRule { field, .. } => field,
            ValidationError::NonPositiveStopLoss { .. } => "stop_loss_pct",
            ValidationError::MarginOutOfRange { .. } => "margin_pct",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NonFinite { field } => write!(f, "{field} must be a finite number"),
            ValidationError::NonPositiveStopLoss { stop_loss_pct } => {
                write!(f, "stop_loss_pct must be > 0 (got {stop_loss_pct})")
            }
            ValidationError::MarginOutOfRange { margin_pct } => {
                write!(f, "margin_pct must be in (0, 100] (got {margin_pct})")
            }
            ValidationError::BalanceOutOfRange { field, value } => {
                write!(f, "{field} out of range (got {value})")
            }
            ValidationError::MissingPropFirmRule { field } => {
                write!(f, "{field} is required for prop firm accounts")
            }
            ValidationError::NonPositivePropFirmRule { field, value } => {
                write!(f, "{field} must be > 0 (got {value})")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Evidence attached to a max-drawdown breach.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BreachReport {
    pub max_dd_dollars: f64,
    pub drawdown_used: f64,
    pub remaining_dd: f64,
}

/// Why no sizing was produced.
#[derive(Clone, Debug, PartialEq)]
pub enum SizingError {
    Validation(ValidationError),
    /// Prop-firm max drawdown exhausted. Terminal: trading must stop.
    Breach(BreachReport),
}

impl SizingError {
    pub fn is_breach(&self) -> bool {
        matches!(self, SizingError::Breach(_))
    }
}

impl fmt::Display for SizingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizingError::Validation(e) => write!(f, "invalid input: {e}"),
            SizingError::Breach(b) => write!(
                f,
                "account has breached max drawdown (used {:.2} of {:.2}, remaining {:.2})",
                b.drawdown_used, b.max_dd_dollars, b.remaining_dd
            ),
        }
    }
}

impl std::error::Error for SizingError {}

impl From<ValidationError> for SizingError {
    fn from(e: ValidationError) -> Self {
        SizingError::Validation(e)
    }
}
