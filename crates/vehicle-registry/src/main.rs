//! `vreg` - CLI for the vehicle registry
//!
//! This binary is the front end for registering, finding, exporting, and
//! administering campus vehicle records.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use vehicle_registry::cli::output::{render_detail, render_plain, render_stats, render_table};
use vehicle_registry::cli::{
    AdminAction, AdminCommand, Cli, Command, ConfigCommand, ExportCommand, OutputFormat,
    RegisterCommand, ShowCommand,
};
use vehicle_registry::{init_logging, transfer, validation, Config, Registry, Vehicle, VehicleInput};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    // Validating a specific file must work even when the active config is broken.
    if let Command::Config(ConfigCommand::Validate { file }) = &cli.command {
        validate_config(file.clone().or_else(|| cli.config.clone()));
        return Ok(());
    }

    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;

    match cli.command {
        Command::List(cmd) => {
            let registry = open_registry(&config)?;
            let all: Vec<&Vehicle> = registry.list_all().iter().collect();
            print_vehicles(&all, cmd.format)
        }
        Command::Register(cmd) => handle_register(&mut open_registry(&config)?, cmd),
        Command::Find(cmd) => {
            let registry = open_registry(&config)?;
            let criteria = cmd.filters.criteria(cmd.query.as_deref());
            print_vehicles(&registry.filter(&criteria), cmd.format)
        }
        Command::Show(cmd) => handle_show(&open_registry(&config)?, &cmd),
        Command::Departments => {
            for department in open_registry(&config)?.departments() {
                println!("{department}");
            }
            Ok(())
        }
        Command::Stats(cmd) => {
            let stats = open_registry(&config)?.stats();
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("{}", render_stats(&stats));
            }
            Ok(())
        }
        Command::Export(cmd) => handle_export(&config, &open_registry(&config)?, cmd),
        Command::Admin(cmd) => handle_admin(&config, cmd),
        Command::Config(cmd) => handle_config(&config, &cmd),
    }
}

fn open_registry(config: &Config) -> Result<Registry> {
    Registry::open_with_config(config).with_context(|| {
        format!(
            "failed to open registry at {}",
            config.database_path().display()
        )
    })
}

fn handle_register(registry: &mut Registry, cmd: RegisterCommand) -> Result<()> {
    let input = VehicleInput::from(cmd.details);
    validation::validate(&input)?;
    let added = registry.add(input)?;
    println!(
        "Registered {} ({}) with id {}",
        added.vehicle_number, added.model, added.id
    );
    Ok(())
}

fn handle_show(registry: &Registry, cmd: &ShowCommand) -> Result<()> {
    let vehicle = registry
        .get(&cmd.id)
        .with_context(|| format!("no vehicle with id {}", cmd.id))?;
    if cmd.json {
        println!("{}", serde_json::to_string_pretty(vehicle)?);
    } else {
        println!("{}", render_detail(vehicle));
    }
    Ok(())
}

fn print_vehicles(vehicles: &[&Vehicle], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Plain => {
            let text = render_plain(vehicles);
            if !text.is_empty() {
                println!("{text}");
            }
        }
        OutputFormat::Table => println!("{}", render_table(vehicles)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(vehicles)?),
    }
    Ok(())
}

fn handle_export(config: &Config, registry: &Registry, cmd: ExportCommand) -> Result<()> {
    match cmd {
        ExportCommand::Json { output } => {
            let contents = registry.export_json()?;
            let path =
                output.unwrap_or_else(|| transfer::json_backup_filename(&config.registry.name).into());
            write_output(&path, &contents)?;
            report_export(&path, registry.list_all().len());
        }
        ExportCommand::Csv {
            query,
            filters,
            output,
        } => {
            let view = registry.filter(&filters.criteria(query.as_deref()));
            let contents = Registry::export_csv(&view)?;
            let path = output.unwrap_or_else(|| transfer::csv_filename(&config.registry.name).into());
            write_output(&path, &contents)?;
            report_export(&path, view.len());
        }
    }
    Ok(())
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    if path == Path::new("-") {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{contents}")?;
        return Ok(());
    }
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

fn report_export(path: &Path, count: usize) {
    if path != Path::new("-") {
        eprintln!("Exported {count} vehicle(s) to {}", path.display());
    }
}

fn handle_admin(config: &Config, cmd: AdminCommand) -> Result<()> {
    config.admin.authorize(&cmd.password)?;
    let mut registry = open_registry(config)?;

    match cmd.action {
        AdminAction::Update { id, changes } => {
            let Some(existing) = registry.get(&id) else {
                println!("No vehicle with id {id}; nothing changed");
                return Ok(());
            };
            let input = changes.apply(VehicleInput::from(existing));
            validation::validate(&input)?;
            if registry.update(&id, input)? {
                println!("Updated vehicle {id}");
            }
        }
        AdminAction::Delete { id } => {
            if registry.delete(&id)? {
                println!("Deleted vehicle {id}");
            } else {
                println!("No vehicle with id {id}; nothing changed");
            }
        }
        AdminAction::Import { file } => {
            let contents = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let count = registry.import_json(&contents)?;
            println!("Imported {count} vehicle(s) from {}", file.display());
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if *json {
                let mut shown = config.clone();
                shown.admin.password = "<redacted>".to_string();
                println!("{}", serde_json::to_string_pretty(&shown)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Storage key:        {}", config.storage.storage_key);
                println!();
                println!("[Registry]");
                println!("  Name:               {}", config.registry.name);
                println!("  Seed policy:        {:?}", config.registry.seed);
                println!("  On corrupt data:    {:?}", config.registry.on_corrupt);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => validate_config(file.clone()),
    }
    Ok(())
}

fn validate_config(file: Option<PathBuf>) {
    let path = file.unwrap_or_else(Config::default_config_path);
    println!("Validating configuration: {}", path.display());
    match Config::load_from(Some(path)) {
        Ok(_) => println!("Configuration is valid."),
        Err(e) => println!("Configuration error: {e}"),
    }
}
