pub mod commands;
pub mod output;
pub mod ui;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::ConfigManager;
use crate::core::window::{MonthFilter, TimeWindow, YearFilter};
use crate::errors::CliError;

#[derive(Parser)]
#[command(name = "franchise-core")]
#[command(version, about = "Franchise/VIP business management dashboard", long_about = None)]
pub struct Cli {
    /// Path to the config directory (default: the platform config dir)
    #[arg(short = 'C', long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// ASCII-only output without color
    #[arg(long, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate statistics and derived metrics across every collection
    Dashboard(WindowArgs),

    /// List direct sales
    Sales(ListArgs),

    /// List other expenses
    Expenses(ListArgs),

    /// Franchise summary rollups
    Franchises(SearchArgs),

    /// Royalty history for one franchise
    Royalty {
        /// Franchise identifier, e.g. FR-001
        franchise_id: String,
    },

    /// VIP monthly business uploads
    Vip(WindowArgs),

    /// VIP-franchise monthly business uploads
    VipFranchise(WindowArgs),

    /// Company revenue monthly uploads
    Company(WindowArgs),

    /// Head-office staff directory
    Staff(SearchArgs),

    /// Salary history for one staff member
    Salary {
        /// Head-office staff identifier
        ho_id: String,
    },

    /// Export a collection's filtered records to an .xlsx workbook
    Export(commands::export::ExportArgs),

    /// Delete records on the backend
    Delete {
        #[command(subcommand)]
        target: commands::delete::DeleteTarget,
    },

    /// Show the active configuration
    Config,
}

#[derive(Args, Clone)]
pub struct WindowArgs {
    /// Month name or "All"
    #[arg(long, default_value = "All")]
    pub month: MonthFilter,

    /// Calendar year or "All"
    #[arg(long, default_value = "All")]
    pub year: YearFilter,
}

impl WindowArgs {
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.month.clone(), self.year)
    }
}

#[derive(Args, Clone)]
pub struct ListArgs {
    #[command(flatten)]
    pub window: WindowArgs,

    /// Case-insensitive text filter
    #[arg(long)]
    pub search: Option<String>,

    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

#[derive(Args, Clone)]
pub struct SearchArgs {
    /// Case-insensitive text filter
    #[arg(long)]
    pub search: Option<String>,

    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

pub fn run_cli() -> Result<(), CliError> {
    let cli = Cli::parse();
    output::set_preferences(output::OutputPreferences {
        plain_mode: cli.plain,
        quiet_mode: false,
    });

    let config_manager = match &cli.config_dir {
        Some(dir) => ConfigManager::with_base_dir(dir.clone()),
        None => ConfigManager::new(),
    }?;
    let config = config_manager.load()?;

    commands::dispatch(&cli, &config_manager, &config)
}
