//! dtt-window
//!
//! Fixed 4H execution windows.
//!
//! Deterministic, pure logic. No IO, no wall-clock: callers read the clock
//! once per evaluation and pass `now` in, already in the desk timezone.
//!
//! # Design
//!
//! The trading day (desk timezone, UTC-5 by default) is cut into six
//! contiguous 4-hour candles anchored at 23, 03, 07, 11, 15 and 19 o'clock.
//! The 23:00 candle wraps midnight and closes at 03:00 the next day.
//!
//! The final two hours of every candle form the **entry window**. An entry is
//! only considered well-timed when `now` lies in
//! `[block_end - 2h, block_end]`.

use chrono::{DateTime, Duration, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use serde::Serialize;

/// Desk timezone used when none is configured (fixed UTC-5, no DST).
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Bogota;

/// Length of one candle.
pub const BLOCK_HOURS: i64 = 4;

/// Length of the entry window at the end of each candle.
pub const ENTRY_WINDOW_HOURS: i64 = 2;

// ---------------------------------------------------------------------------
// BlockSpec
// ---------------------------------------------------------------------------

/// One 4H candle as local wall-clock hours, `[start_hour, end_hour)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BlockSpec {
    pub start_hour: u32,
    pub end_hour: u32,
}

/// The six candles of the trading day, in the order they are checked.
pub const BLOCKS: [BlockSpec; 6] = [
    BlockSpec { start_hour: 23, end_hour: 3 },
    BlockSpec { start_hour: 3, end_hour: 7 },
    BlockSpec { start_hour: 7, end_hour: 11 },
    BlockSpec { start_hour: 11, end_hour: 15 },
    BlockSpec { start_hour: 15, end_hour: 19 },
    BlockSpec { start_hour: 19, end_hour: 23 },
];

impl BlockSpec {
    /// `true` for the 23:00 → 03:00 candle.
    pub fn wraps_midnight(&self) -> bool {
        self.start_hour > self.end_hour
    }

    /// `true` if local `hour` (0..24) falls inside `[start_hour, end_hour)`.
    pub fn contains_hour(&self, hour: u32) -> bool {
        if self.wraps_midnight() {
            hour >= self.start_hour || hour < self.end_hour
        } else {
            self.start_hour <= hour && hour < self.end_hour
        }
    }
}

/// The candle containing local `hour`.
///
/// The blocks tile the whole day, so every hour in `0..24` has exactly one.
pub fn block_for_hour(hour: u32) -> BlockSpec {
    let hour = hour % 24;
    BLOCKS
        .iter()
        .copied()
        .find(|b| b.contains_hour(hour))
        .unwrap_or(BLOCKS[0])
}

// ---------------------------------------------------------------------------
// TimeContext
// ---------------------------------------------------------------------------

/// Where `now` sits relative to the current candle and its entry window.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimeContext {
    pub block_start: DateTime<Tz>,
    pub block_end: DateTime<Tz>,
    pub entry_window_start: DateTime<Tz>,
    pub now: DateTime<Tz>,
    pub in_window: bool,
    /// Whole minutes until the next entry window opens. `None` when in window.
    pub minutes_to_window: Option<i64>,
}

impl TimeContext {
    /// Current candle, e.g. `"19:00 → 23:00"`.
    pub fn candle_label(&self) -> String {
        format!(
            "{} → {}",
            self.block_start.format("%H:%M"),
            self.block_end.format("%H:%M")
        )
    }

    /// Valid entry window, e.g. `"21:00 → 23:00"`.
    pub fn window_label(&self) -> String {
        format!(
            "{} → {}",
            self.entry_window_start.format("%H:%M"),
            self.block_end.format("%H:%M")
        )
    }
}

/// Locate `now` in its 4H candle and entry window.
///
/// `now` carries the desk timezone; the local hour decides the candle. For
/// hours 00–02 the containing candle started at 23:00 on the previous day.
///
/// Candle boundaries are local wall-clock hours, so a DST shift inside a
/// candle changes its absolute length but never its anchor hours.
pub fn time_context(now: DateTime<Tz>) -> TimeContext {
    let tz = now.timezone();
    let hour = now.hour();
    let block = block_for_hour(hour);

    let mut start_date = now.date_naive();
    if block.wraps_midnight() && hour < block.start_hour {
        start_date = start_date.pred_opt().unwrap_or(start_date);
    }
    let start_local =
        start_date.and_time(NaiveTime::MIN) + Duration::hours(i64::from(block.start_hour));
    let end_local = start_local + Duration::hours(BLOCK_HOURS);
    let entry_local = end_local - Duration::hours(ENTRY_WINDOW_HOURS);

    let block_start = resolve_local(&tz, start_local);
    let block_end = resolve_local(&tz, end_local);
    let entry_window_start = resolve_local(&tz, entry_local);

    let in_window = entry_window_start <= now && now <= block_end;

    let minutes_to_window = if in_window {
        None
    } else {
        let mut minutes = floor_minutes(entry_window_start, now);
        if minutes < 0 {
            // Boundary case: the window already passed, wait for the next candle's.
            let next_entry = resolve_local(&tz, end_local + Duration::hours(ENTRY_WINDOW_HOURS));
            minutes = floor_minutes(next_entry, now);
        }
        Some(minutes)
    };

    TimeContext {
        block_start,
        block_end,
        entry_window_start,
        now,
        in_window,
        minutes_to_window,
    }
}

/// Local wall-clock time to an instant in `tz`.
///
/// Ambiguous times (clocks set back) take the earlier instant. Times inside
/// a spring-forward gap move one hour later.
fn resolve_local(tz: &Tz, local: NaiveDateTime) -> DateTime<Tz> {
    if let Some(dt) = tz.from_local_datetime(&local).earliest() {
        return dt;
    }
    tz.from_local_datetime(&(local + Duration::hours(1)))
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&local))
}

/// Convenience wrapper: convert a UTC instant into `tz` and locate it.
pub fn time_context_at(now_utc: DateTime<Utc>, tz: Tz) -> TimeContext {
    time_context(now_utc.with_timezone(&tz))
}

fn floor_minutes(target: DateTime<Tz>, now: DateTime<Tz>) -> i64 {
    (target - now).num_seconds().div_euclid(60)
}

// ---------------------------------------------------------------------------
// Unit tests (fast, no external dependencies)
// ---------------------------------------------------------------------------
