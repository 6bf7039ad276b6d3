//! Axum router and all HTTP handlers for dtt-daemon.
//!
//! `build_router` is the single entry point; `main.rs` calls it and attaches
//! middleware layers. Handlers are pure functions of the request and the
//! immutable `AppState`.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::DateTime;
use chrono_tz::Tz;
use dtt_plan::evaluate_trade_plan;
use dtt_risk::{compute_risk, AccountProfile, SizingError};
use dtt_window::time_context;
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    api_types::{
        ErrorResponse, HealthResponse, PlanRequest, RiskResponse, StatusResponse, WindowQuery,
        WindowResponse,
    },
    state::{uptime_secs, AppState},
};

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the complete application router wired to the given shared state.
///
/// Middleware layers (CORS, tracing) are **not** applied here; `main.rs`
/// attaches them after this call so tests can use the bare router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/health", get(health))
        .route("/v1/status", get(status_handler))
        .route("/v1/risk", post(risk))
        .route("/v1/plan", post(plan))
        .route("/v1/window", get(window))
        .with_state(state)
}

fn error_response(status: StatusCode, error: String, field: Option<&str>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error,
            field: field.map(str::to_string),
        }),
    )
        .into_response()
}

/// Explicit RFC3339 instant, or the state clock.
#[allow(clippy::result_large_err)]
fn resolve_now(st: &AppState, raw: Option<&str>) -> Result<DateTime<Tz>, Response> {
    match raw {
        None => Ok(st.now()),
        Some(s) => DateTime::parse_from_rfc3339(s.trim())
            .map(|dt| dt.with_timezone(&st.tz))
            .map_err(|e| {
                error_response(
                    StatusCode::BAD_REQUEST,
                    format!("INVALID_NOW: expected RFC3339 ({e})"),
                    Some("now"),
                )
            }),
    }
}

// ---------------------------------------------------------------------------
// GET /v1/health
// ---------------------------------------------------------------------------

pub(crate) async fn health(State(st): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            ok: true,
            service: st.build.service,
            version: st.build.version,
        }),
    )
}

// ---------------------------------------------------------------------------
// GET /v1/status
// ---------------------------------------------------------------------------

pub(crate) async fn status_handler(State(st): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(StatusResponse {
            service: st.build.service,
            version: st.build.version,
            daemon_uptime_secs: uptime_secs(),
            config_hash: st.config_hash.clone(),
            timezone: st.tz.name(),
            now: st.now().to_rfc3339(),
        }),
    )
}

// ---------------------------------------------------------------------------
// POST /v1/risk
// ---------------------------------------------------------------------------

/// Size one trade.
///
/// The body is a partial `AccountProfile`; omitted fields come from the
/// configured account.
pub(crate) async fn risk(State(st): State<Arc<AppState>>, Json(body): Json<Value>) -> Response {
    let profile = match overlay_profile(&st.desk.account, body) {
        Ok(p) => p,
        Err(e) => {
            return error_response(StatusCode::UNPROCESSABLE_ENTITY, e.error, e.field.as_deref())
        }
    };

    match compute_risk(&profile) {
        Ok(result) => {
            info!(
                account_type = profile.account_type.as_str(),
                risk_dollars = result.risk_dollars,
                capped = result.capped,
                "trade sized"
            );
            (StatusCode::OK, Json(RiskResponse::Sized { result })).into_response()
        }
        Err(SizingError::Breach(breach)) => {
            warn!(remaining_dd = breach.remaining_dd, "max drawdown breached");
            (StatusCode::OK, Json(RiskResponse::Breached { breach })).into_response()
        }
        Err(SizingError::Validation(e)) => error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("RISK_INVALID_INPUT: {e}"),
            Some(e.field()),
        ),
    }
}

/// Body that could not be laid over the configured account.
#[derive(Debug)]
struct OverlayError {
    error: String,
    field: Option<String>,
}

fn overlay_profile(base: &AccountProfile, body: Value) -> Result<AccountProfile, OverlayError> {
    let Value::Object(overrides) = body else {
        return Err(OverlayError {
            error: "RISK_INVALID_INPUT: body must be a JSON object".to_string(),
            field: None,
        });
    };
    let base = match serde_json::to_value(base) {
        Ok(Value::Object(m)) => m,
        _ => serde_json::Map::new(),
    };

    let mut merged = base.clone();
    merged.extend(overrides.clone());
    serde_json::from_value(Value::Object(merged)).map_err(|e| OverlayError {
        error: format!("RISK_INVALID_INPUT: {e}"),
        field: offending_field(&base, &overrides),
    })
}

/// First override key (sorted) that fails on its own over the base profile.
fn offending_field(
    base: &serde_json::Map<String, Value>,
    overrides: &serde_json::Map<String, Value>,
) -> Option<String> {
    let mut keys: Vec<&String> = overrides.keys().collect();
    keys.sort();
    keys.into_iter()
        .find(|key| {
            let mut single = base.clone();
            single.insert((*key).clone(), overrides[key.as_str()].clone());
            serde_json::from_value::<AccountProfile>(Value::Object(single)).is_err()
        })
        .cloned()
}

// ---------------------------------------------------------------------------
// POST /v1/plan
// ---------------------------------------------------------------------------

pub(crate) async fn plan(State(st): State<Arc<AppState>>, Json(req): Json<PlanRequest>) -> Response {
    let now = match resolve_now(&st, req.now.as_deref()) {
        Ok(n) => n,
        Err(resp) => return resp,
    };

    let result = evaluate_trade_plan(&req.answers, now);
    info!(
        trade_state = result.trade_state.as_str(),
        score_pct = result.score_pct,
        gates = result.gate_results.len(),
        "trade plan evaluated"
    );
    (StatusCode::OK, Json(result)).into_response()
}

// ---------------------------------------------------------------------------
// GET /v1/window
// ---------------------------------------------------------------------------

pub(crate) async fn window(
    State(st): State<Arc<AppState>>,
    Query(q): Query<WindowQuery>,
) -> Response {
    let now = match resolve_now(&st, q.now.as_deref()) {
        Ok(n) => n,
        Err(resp) => return resp,
    };
    (StatusCode::OK, Json(WindowResponse::from(time_context(now)))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn overlay_keeps_base_fields() {
        let base = AccountProfile::default();
        let p = overlay_profile(&base, json!({"risk_mode": "aggressive"})).unwrap();
        assert_eq!(p.risk_mode, dtt_risk::RiskMode::Aggressive);
        assert_eq!(p.starting_balance, base.starting_balance);
    }

    #[test]
    fn overlay_rejects_non_object() {
        let err = overlay_profile(&AccountProfile::default(), json!([1, 2])).unwrap_err();
        assert!(err.error.starts_with("RISK_INVALID_INPUT"));
        assert_eq!(err.field, None);
    }

    #[test]
    fn overlay_names_unknown_enum_field() {
        let err = overlay_profile(&AccountProfile::default(), json!({"risk_mode": "reckless"}))
            .unwrap_err();
        assert_eq!(err.field.as_deref(), Some("risk_mode"));
    }

    #[test]
    fn overlay_names_first_bad_field_among_good_ones() {
        let body = json!({
            "account_type": "personal",
            "margin_pct": "lots",
            "risk_mode": "bold",
        });
        let err = overlay_profile(&AccountProfile::default(), body).unwrap_err();
        assert_eq!(err.field.as_deref(), Some("margin_pct"));
    }
}
