use clap::{Args, Subcommand};
use dialoguer::Confirm;

use crate::cli::commands::flush_notifications;
use crate::cli::output;
use crate::core::dashboard::DashboardManager;
use crate::core::window::{month_index, MONTH_NAMES};
use crate::domain::common::RecordKind;
use crate::errors::CliError;

#[derive(Args, Clone)]
pub struct MonthYearArgs {
    /// Month name, e.g. January
    #[arg(long)]
    pub month: String,

    /// Calendar year, e.g. 2024
    #[arg(long)]
    pub year: i32,
}

#[derive(Subcommand, Clone)]
pub enum DeleteTarget {
    /// Delete a franchise and its history
    Franchise {
        franchise_id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Delete a head-office staff record
    Staff {
        ho_id: String,
        #[arg(long)]
        yes: bool,
    },

    /// Delete one month of VIP business
    Vip {
        #[command(flatten)]
        target: MonthYearArgs,
        #[arg(long)]
        yes: bool,
    },

    /// Delete one month of VIP-franchise business
    VipFranchise {
        #[command(flatten)]
        target: MonthYearArgs,
        #[arg(long)]
        yes: bool,
    },

    /// Delete one month of company revenue
    Company {
        #[command(flatten)]
        target: MonthYearArgs,
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(mut manager: DashboardManager, target: &DeleteTarget) -> Result<(), CliError> {
    match target {
        DeleteTarget::Franchise { franchise_id, yes } => {
            if confirmed(*yes, &format!("Delete franchise {franchise_id}?"))? {
                manager.delete_franchise(franchise_id)?;
            }
        }
        DeleteTarget::Staff { ho_id, yes } => {
            if confirmed(*yes, &format!("Delete HO record {ho_id}?"))? {
                manager.delete_ho_staff(ho_id)?;
            }
        }
        DeleteTarget::Vip { target, yes } => {
            delete_monthly(&mut manager, RecordKind::Vip, target, *yes)?;
        }
        DeleteTarget::VipFranchise { target, yes } => {
            delete_monthly(&mut manager, RecordKind::VipFranchise, target, *yes)?;
        }
        DeleteTarget::Company { target, yes } => {
            delete_monthly(&mut manager, RecordKind::CompanyRevenue, target, *yes)?;
        }
    }
    flush_notifications(&mut manager);
    Ok(())
}

fn delete_monthly(
    manager: &mut DashboardManager,
    kind: RecordKind,
    target: &MonthYearArgs,
    yes: bool,
) -> Result<(), CliError> {
    let month = canonical_month(&target.month)?;
    let prompt = format!(
        "Are you sure you want to delete the {} record for {month} {}?",
        kind.label(),
        target.year
    );
    if confirmed(yes, &prompt)? {
        manager.delete_monthly(kind, month, target.year)?;
    }
    Ok(())
}

fn canonical_month(name: &str) -> Result<&'static str, CliError> {
    month_index(name)
        .map(|idx| MONTH_NAMES[idx as usize])
        .ok_or_else(|| CliError::Input(format!("unknown month name: {name}")))
}

fn confirmed(skip_prompt: bool, prompt: &str) -> Result<bool, CliError> {
    if skip_prompt {
        return Ok(true);
    }
    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|err| CliError::Command(err.to_string()))?;
    if !confirmed {
        output::info("Nothing deleted");
    }
    Ok(confirmed)
}
