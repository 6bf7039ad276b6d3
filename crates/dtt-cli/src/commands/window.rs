//! `dtt window`: where are we in the 4H cycle.

use anyhow::Result;
use dtt_config::ConfigSurface;
use dtt_window::{time_context, TimeContext};

use super::{load_config, resolve_now};

pub fn run_window(now: Option<&str>, config_paths: &[String]) -> Result<()> {
    let desk = load_config(config_paths, ConfigSurface::Plan)?;
    let tz = desk.timezone()?;
    let ctx = time_context(resolve_now(now, tz)?);
    print_time_context(&ctx);
    Ok(())
}

pub fn print_time_context(ctx: &TimeContext) {
    println!("now={}", ctx.now.to_rfc3339());
    println!("candle={}", ctx.candle_label());
    println!("entry_window={}", ctx.window_label());
    println!("in_window={}", ctx.in_window);
    match ctx.minutes_to_window {
        Some(m) => println!("minutes_to_window={}", m),
        None => println!("minutes_to_window=-"),
    }
}
