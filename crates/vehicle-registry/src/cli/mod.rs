//! Command-line interface for the vehicle registry.
//!
//! This module provides the CLI structure and rendering helpers for the
//! `vreg` binary.

mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AdminAction, AdminCommand, CategoryArg, CategoryFilterArg, ConfigCommand, ExportCommand,
    FilterArgs, FindCommand, ListCommand, OutputFormat, RegisterCommand, ShowCommand,
    StatsCommand, TypeFilterArg, VehicleChanges, VehicleDetails, VehicleTypeArg,
};

/// vreg - Campus vehicle registration and lookup
///
/// Register vehicles with owner details, search and filter the registry,
/// export backups and extracts, and manage entries behind the admin password.
#[derive(Debug, Parser)]
#[command(name = "vreg")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every registered vehicle
    List(ListCommand),

    /// Register a new vehicle
    Register(RegisterCommand),

    /// Search and filter the registry
    Find(FindCommand),

    /// Show every detail of one vehicle
    Show(ShowCommand),

    /// List the departments present in the registry
    Departments,

    /// Show registry counts
    Stats(StatsCommand),

    /// Export a JSON backup or CSV extract
    #[command(subcommand)]
    Export(ExportCommand),

    /// Update, delete, or import (requires the admin password)
    Admin(AdminCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
