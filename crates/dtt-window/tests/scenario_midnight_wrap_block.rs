//! The 23:00 → 03:00 candle spans two calendar days.

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use dtt_window::*;

fn local(d: u32, h: u32, m: u32) -> DateTime<Tz> {
    DEFAULT_TIMEZONE
        .with_ymd_and_hms(2026, 5, d, h, m, 0)
        .single()
        .unwrap()
}

#[test]
fn scenario_after_midnight_belongs_to_previous_day_block() {
    let ctx = time_context(local(13, 0, 30));

    assert_eq!(ctx.block_start, local(12, 23, 0));
    assert_eq!(ctx.block_end, local(13, 3, 0));
    assert_eq!(ctx.entry_window_start, local(13, 1, 0));
    assert!(!ctx.in_window);
    assert_eq!(ctx.minutes_to_window, Some(30));
}

#[test]
fn scenario_inside_wrap_window_after_one_am() {
    let ctx = time_context(local(13, 1, 30));
    assert_eq!(ctx.block_start, local(12, 23, 0));
    assert!(ctx.in_window);
}

#[test]
fn scenario_before_midnight_starts_same_day() {
    let ctx = time_context(local(12, 23, 10));

    assert_eq!(ctx.block_start, local(12, 23, 0));
    assert_eq!(ctx.block_end, local(13, 3, 0));
    assert!(!ctx.in_window);
    assert_eq!(ctx.minutes_to_window, Some(110));
    assert_eq!(ctx.candle_label(), "23:00 → 03:00");
    assert_eq!(ctx.window_label(), "01:00 → 03:00");
}

#[test]
fn scenario_utc_instant_is_localized_before_bucketing() {
    // 05:30 UTC = 00:30 desk time.
    let utc = Utc.with_ymd_and_hms(2026, 5, 13, 5, 30, 0).unwrap();
    let ctx = time_context_at(utc, DEFAULT_TIMEZONE);
    assert_eq!(ctx.block_start, local(12, 23, 0));
    assert_eq!(ctx.minutes_to_window, Some(30));
}
