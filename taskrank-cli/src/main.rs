use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use taskrank_core::{DEFAULT_SUGGESTIONS, SortStrategy, analyze_tasks_with, rank, suggest};
use taskrank_ingest::{parse_tasks_csv, parse_tasks_json};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod config;
mod output;
mod server;
mod state;

#[derive(Parser, Debug)]
#[command(
    name = "taskrank",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TASKRANK_BUILD_SHA"), ")"),
    about = "Rank tasks by urgency, importance, effort and dependency impact"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score and rank a batch of tasks (JSON array, or CSV with --csv)
    Analyze {
        /// Input file (reads stdin when omitted)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Treat the input file as CSV with a header row
        #[arg(long, requires = "file")]
        csv: bool,

        /// Reference date (YYYY-MM-DD); defaults to today in the configured zone
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Ordering: smart, fastest, impact or deadline
        #[arg(long, default_value_t = SortStrategy::Smart)]
        sort: SortStrategy,

        /// Print the raw {tasks, cycles, warnings} JSON document
        #[arg(long)]
        json: bool,
    },

    /// Show top suggestions from the built-in demo batch
    Suggest {
        #[arg(long, default_value_t = DEFAULT_SUGGESTIONS)]
        limit: usize,

        #[arg(long)]
        today: Option<NaiveDate>,

        #[arg(long)]
        json: bool,
    },

    /// Serve the analyze/suggest HTTP API
    Serve {
        /// Bind host (default from config)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (default from config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Manage ~/.taskrank/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze {
            file,
            csv,
            today,
            sort,
            json,
        } => {
            let cfg = config::load_config()?;
            let today = cfg.reference_date(today)?;

            let tasks = if csv {
                let Some(path) = file.as_deref() else {
                    bail!("--csv requires --file <path>");
                };
                parse_tasks_csv(path).with_context(|| format!("parsing {}", path.display()))?
            } else {
                let text = state::read_input(file.as_deref())?;
                parse_tasks_json(&text).context("parsing task JSON")?
            };
            debug!(count = tasks.len(), %today, "loaded tasks");

            let mut analysis = analyze_tasks_with(&tasks, today, &cfg.scoring);
            rank(&mut analysis.tasks, sort);

            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                println!("# Ranked tasks ({today}, sort: {sort})\n");
                print!("{}", output::render_analysis(&analysis));
            }
        }

        Command::Suggest { limit, today, json } => {
            let cfg = config::load_config()?;
            let today = cfg.reference_date(today)?;
            let top = suggest(today, limit, &cfg.scoring);

            if json {
                println!("{}", serde_json::to_string_pretty(&top)?);
            } else {
                print!("{}", output::render_suggestions(&top));
            }
        }

        Command::Serve { host, port } => {
            let cfg = config::load_config()?;
            let host = host.unwrap_or_else(|| cfg.server.host.clone());
            let port = port.unwrap_or(cfg.server.port);
            server::serve(&cfg, &host, port).await?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
        },
    }

    Ok(())
}
