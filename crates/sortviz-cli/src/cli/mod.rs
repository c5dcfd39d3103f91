//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use sortviz_core::input::parse_values;
use sortviz_core::{Algorithm, config, interrupt, logging};

mod commands;

#[derive(Parser)]
#[command(name = "sortviz")]
#[command(version)]
#[command(about = "Step-by-step walkthroughs of bubble, selection and insertion sort")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Runs one sort without the UI and prints the narration
    Run {
        /// bubble, selection or insertion (default: from config)
        #[arg(short, long)]
        algorithm: Option<Algorithm>,

        /// Numbers to sort, separated by commas or spaces (default: from config)
        #[arg(short, long)]
        values: Option<String>,

        /// Milliseconds per full beat (default: from config)
        #[arg(short, long, env = "SORTVIZ_DELAY_MS")]
        delay_ms: Option<u64>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Print a fresh config generated from defaults
    Generate,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    interrupt::init()?;

    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = config::Config::load().context("load config")?;
    let _log_guard = logging::init(&config.log).context("init logging")?;

    let Some(command) = cli.command else {
        return visualize(&config).await;
    };

    match command {
        Commands::Run {
            algorithm,
            values,
            delay_ms,
        } => {
            let values = match values {
                Some(raw) => {
                    let parsed = parse_values(&raw);
                    if parsed.is_empty() {
                        anyhow::bail!("No valid numbers in --values '{raw}'");
                    }
                    parsed
                }
                None => config.values.clone(),
            };
            commands::run::run(commands::run::RunOptions {
                algorithm: algorithm.unwrap_or(config.algorithm),
                values: &values,
                delay_ms: delay_ms.unwrap_or(config.delay_ms),
            })
            .await
        }

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Generate => commands::config::generate(),
        },
    }
}

#[cfg(feature = "tui")]
async fn visualize(config: &config::Config) -> Result<()> {
    commands::visualize::run(config).await
}

#[cfg(not(feature = "tui"))]
async fn visualize(_config: &config::Config) -> Result<()> {
    anyhow::bail!("sortviz was built without the `tui` feature; use `sortviz run`")
}
