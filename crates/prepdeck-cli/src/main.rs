//! prepdeck CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "prepdeck", version, about = "Mock interview practice on the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive interview session
    Start {
        /// Job role to practice (e.g. "software-engineer")
        #[arg(long)]
        role: Option<String>,

        /// Difficulty label recorded with the result
        #[arg(long)]
        difficulty: Option<String>,

        /// Custom question bank TOML (default: built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Resume the saved draft instead of starting fresh
        #[arg(long)]
        resume: bool,

        /// Directory holding the history file
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List available roles and their question counts
    Roles {
        /// Custom question bank TOML (default: built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Browse past interview results
    History {
        #[command(subcommand)]
        action: HistoryAction,

        /// Directory holding the history file
        #[arg(long, global = true)]
        data_dir: Option<PathBuf>,

        /// Config file path
        #[arg(long, global = true)]
        config: Option<PathBuf>,
    },

    /// Aggregate statistics over the interview history
    Stats {
        /// Directory holding the history file
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List all stored results, newest first
    List,
    /// Show one result in full
    Show {
        /// Result id (UUID)
        id: String,
    },
    /// Delete one result
    Delete {
        /// Result id (UUID)
        id: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("prepdeck=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Start {
            role,
            difficulty,
            bank,
            resume,
            data_dir,
            config,
        } => commands::start::execute(role, difficulty, bank, resume, data_dir, config).await,
        Commands::Roles { bank, config } => commands::roles::execute(bank, config),
        Commands::History {
            action,
            data_dir,
            config,
        } => match action {
            HistoryAction::List => commands::history::list(data_dir, config).await,
            HistoryAction::Show { id } => commands::history::show(&id, data_dir, config).await,
            HistoryAction::Delete { id } => {
                commands::history::delete(&id, data_dir, config).await
            }
        },
        Commands::Stats { data_dir, config } => commands::stats::execute(data_dir, config).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
