pub mod dashboard;
pub mod delete;
pub mod export;
pub mod listings;

use crate::cli::{output, Cli, Commands};
use crate::client::ApiClient;
use crate::config::{Config, ConfigManager};
use crate::core::dashboard::DashboardManager;
use crate::errors::CliError;

pub fn dispatch(cli: &Cli, config_manager: &ConfigManager, config: &Config) -> Result<(), CliError> {
    match &cli.command {
        Commands::Dashboard(args) => dashboard::run(manager(config), args),
        Commands::Sales(args) => listings::sales(manager(config), args, config),
        Commands::Expenses(args) => listings::expenses(manager(config), args, config),
        Commands::Franchises(args) => listings::franchises(manager(config), args, config),
        Commands::Royalty { franchise_id } => listings::royalty(manager(config), franchise_id),
        Commands::Vip(args) => listings::vip(manager(config), args, config),
        Commands::VipFranchise(args) => listings::vip_franchise(manager(config), args, config),
        Commands::Company(args) => listings::company(manager(config), args, config),
        Commands::Staff(args) => listings::staff(manager(config), args, config),
        Commands::Salary { ho_id } => listings::salary(manager(config), ho_id),
        Commands::Export(args) => export::run(manager(config), args),
        Commands::Delete { target } => delete::run(manager(config), target),
        Commands::Config => show_config(config_manager, config),
    }
}

fn manager(config: &Config) -> DashboardManager {
    let client = ApiClient::new(config.backend_url.clone(), config.timeout_secs);
    DashboardManager::new(Box::new(client))
}

/// Prints every queued notification, clearing the queue.
pub(crate) fn flush_notifications(manager: &mut DashboardManager) {
    for notification in manager.drain_notifications() {
        output::notify(&notification);
    }
}

fn show_config(config_manager: &ConfigManager, config: &Config) -> Result<(), CliError> {
    output::section("Configuration");
    output::info(format!("Config file:  {}", config_manager.path().display()));
    output::info(format!("Backend URL:  {}", config.backend_url));
    output::info(format!("Timeout:      {}s", config.timeout_secs));
    output::info(format!("Page size:    {}", config.page_size));
    Ok(())
}
