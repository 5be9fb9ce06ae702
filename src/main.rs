//! # tasklist
//!
//! A terminal client for a remote task service. It shows the tasks due today,
//! tomorrow, this week or this month, lets you hide or show completed tasks,
//! and creates, completes and deletes tasks through the service's HTTP API.
//!
//! ## Usage
//!
//! ### Interactive Mode (TUI)
//!
//! ```bash
//! tasklist
//! # or explicitly, starting on the week screen
//! tasklist ui --horizon week
//! ```
//!
//! #### TUI Key Bindings
//!
//! *   `q`: Quit
//! *   `a`: Add new task
//! *   `Space`: Toggle the selected task done / pending
//! *   `d`: Delete selected task
//! *   `c`: Toggle Show/Hide Completed Tasks
//! *   `m`: Open the menu to switch between Today, Tomorrow, Week and Month
//! *   `r`: Reload
//!
//! ### Command Line Interface (CLI)
//!
//! ```bash
//! tasklist list --horizon week --all
//! tasklist add "Buy milk" --date 2026-10-20
//! tasklist toggle 12
//! tasklist delete 12
//! ```
//!
//! ## Configuration
//!
//! `~/.config/tasklist/config.toml` (or `TASKLIST_CONFIG`):
//!
//! ```toml
//! server = "http://localhost:3000"
//! token = "..."
//! timeout_secs = 10
//! language = "pt-BR"          # or "en"
//! preference_scope = "shared" # or "per-screen"
//! days_ahead = 0              # first screen: 0, 1, 7 or 30
//! ```
//!
//! `TASKLIST_SERVER` and `--server` override `server`. The show/hide
//! completed preference is kept in `~/.local/share/tasklist/preferences.json`
//! (or `TASKLIST_PREFS`).

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use tasklist::client::HttpTaskService;
use tasklist::commands::*;
use tasklist::config::Config;
use tasklist::horizon::Horizon;
use tasklist::storage::{data_dir, prefs_path, FilePreferenceStore};
use tasklist::tui::app::App;
use tasklist::tui::run_tui;
use tasklist::logging;
use tracing::info;

#[derive(Parser)]
#[command(name = "tasklist", version)]
#[command(about = "Terminal client for a remote task list", long_about = None)]
struct Cli {
    /// Config file (default: ~/.config/tasklist/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Task service base URL
    #[arg(long, global = true)]
    server: Option<String>,
    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List tasks up to the end of a horizon
    List {
        #[arg(short = 'H', long, value_enum, default_value_t = Horizon::Today)]
        horizon: Horizon,
        /// Show completed tasks
        #[arg(short, long)]
        all: bool,
    },
    /// Add a new task
    Add {
        /// Task description (quoted if it has spaces)
        desc: String,
        /// Estimate date in YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Toggle a task between done and pending
    Toggle {
        id: u64,
    },
    /// Remove a task
    Delete {
        id: u64,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Open interactive TUI
    Ui {
        /// Screen to open first (default from config)
        #[arg(short = 'H', long, value_enum)]
        horizon: Option<Horizon>,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "tasklist", &mut io::stdout());
        return Ok(());
    }

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(server) = cli.server {
        config.server = server;
    }
    let messages = config.language.messages();

    let interactive = matches!(cli.command, None | Some(Commands::Ui { .. }));
    if interactive {
        let log_file = config
            .log_file
            .clone()
            .unwrap_or_else(|| data_dir().join("tasklist.log"));
        logging::init_file(cli.verbose, &log_file)?;
    } else {
        logging::init_stderr(cli.verbose)?;
    }

    let service = HttpTaskService::new(&config.server, config.token.clone(), config.timeout())
        .context("failed to build HTTP client")?;
    info!(server = %config.server, "task service configured");

    match cli.command {
        Some(Commands::List { horizon, all }) => cmd_list(&service, horizon, all, messages),
        Some(Commands::Add { desc, date }) => cmd_add(&service, desc, date, messages),
        Some(Commands::Toggle { id }) => cmd_toggle(&service, id),
        Some(Commands::Delete { id }) => cmd_delete(&service, id),
        Some(Commands::Completions { .. }) => Ok(()),
        Some(Commands::Ui { horizon }) => open_ui(service, &config, horizon),
        None => open_ui(service, &config, None),
    }
}

fn open_ui(service: HttpTaskService, config: &Config, horizon: Option<Horizon>) -> Result<()> {
    let prefs = FilePreferenceStore::new(prefs_path());
    let app = App::new(
        Box::new(service),
        Box::new(prefs),
        config.language.messages(),
        config.preference_scope,
        horizon.unwrap_or(config.days_ahead),
    );
    run_tui(app).map_err(|e| anyhow::anyhow!("Error running TUI: {}", e))
}
