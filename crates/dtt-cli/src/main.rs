use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::risk::RiskArgs;

#[derive(Parser)]
#[command(name = "dtt")]
#[command(about = "DTT desk CLI: risk sizing, trade plan checklist, 4H window", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Size one trade from the account profile (config + flag overrides)
    Risk {
        /// Layered config paths in merge order
        #[arg(long = "config")]
        config_paths: Vec<String>,

        #[command(flatten)]
        overrides: RiskArgs,

        /// Print the full result as JSON instead of key=value lines
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Evaluate a trade plan checklist
    Plan {
        /// Answers document (.yaml / .yml / .json)
        #[arg(long)]
        answers: String,

        /// Evaluation instant (RFC3339). Defaults to the system clock.
        #[arg(long)]
        now: Option<String>,

        /// Layered config paths in merge order
        #[arg(long = "config")]
        config_paths: Vec<String>,

        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Show the current 4H candle and entry window
    Window {
        /// Evaluation instant (RFC3339). Defaults to the system clock.
        #[arg(long)]
        now: Option<String>,

        /// Layered config paths in merge order
        #[arg(long = "config")]
        config_paths: Vec<String>,
    },

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order (base -> local overrides)
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

fn main() -> Result<()> {
    // Missing .env.local is not an error.
    let _ = dotenvy::from_filename(".env.local");
    commands::init_tracing();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Risk {
            config_paths,
            overrides,
            json,
        } => commands::risk::run_risk(&config_paths, overrides, json)?,

        Commands::Plan {
            answers,
            now,
            config_paths,
            json,
        } => commands::plan::run_plan(&answers, now.as_deref(), &config_paths, json)?,

        Commands::Window { now, config_paths } => {
            commands::window::run_window(now.as_deref(), &config_paths)?
        }

        Commands::ConfigHash { paths } => {
            let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
            let loaded = dtt_config::load_layered_yaml(&path_refs)?;
            println!("config_hash={}", loaded.config_hash);
            println!("{}", loaded.canonical_json);
        }
    }

    Ok(())
}
