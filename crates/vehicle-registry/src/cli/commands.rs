//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands and how their
//! arguments map onto registry inputs and filter criteria.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::filter::FilterCriteria;
use crate::vehicle::{Category, VehicleInput, VehicleType};

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Register command arguments.
#[derive(Debug, Args)]
pub struct RegisterCommand {
    /// Vehicle and owner details
    #[command(flatten)]
    pub details: VehicleDetails,
}

/// Find command arguments.
#[derive(Debug, Args)]
pub struct FindCommand {
    /// Text to look for in plate number, owner name, or model
    pub query: Option<String>,

    /// Categorical filters
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Vehicle id
    pub id: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Stats command arguments.
#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Export commands.
#[derive(Debug, Subcommand)]
pub enum ExportCommand {
    /// Write a JSON backup of the whole registry
    Json {
        /// Destination file ("-" for stdout); defaults to `<name>-vehicles-backup.json`
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Write a CSV extract of the vehicles matching the given filters
    Csv {
        /// Text to look for in plate number, owner name, or model
        query: Option<String>,

        /// Categorical filters
        #[command(flatten)]
        filters: FilterArgs,

        /// Destination file ("-" for stdout); defaults to `<name>-vehicles.csv`
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

/// Admin command arguments.
#[derive(Debug, Args)]
pub struct AdminCommand {
    /// Admin password
    #[arg(long, env = "VREG_ADMIN_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// The admin action to perform
    #[command(subcommand)]
    pub action: AdminAction,
}

/// Password-gated registry changes.
#[derive(Debug, Subcommand)]
pub enum AdminAction {
    /// Edit a registered vehicle; omitted fields keep their current values
    Update {
        /// Vehicle id
        id: String,

        /// Fields to change
        #[command(flatten)]
        changes: VehicleChanges,
    },

    /// Remove a registered vehicle
    Delete {
        /// Vehicle id
        id: String,
    },

    /// Replace the whole registry with a JSON backup
    Import {
        /// Backup file to restore
        file: PathBuf,
    },
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Full vehicle and owner details for a new registration.
#[derive(Debug, Args)]
pub struct VehicleDetails {
    /// Vehicle type
    #[arg(short = 't', long = "type", value_enum)]
    pub vehicle_type: VehicleTypeArg,

    /// Plate number
    #[arg(short, long)]
    pub number: String,

    /// Make and model
    #[arg(short, long)]
    pub model: String,

    /// Body colour
    #[arg(long)]
    pub color: String,

    /// Electric or hybrid drivetrain (implied for EVs)
    #[arg(long)]
    pub ev: bool,

    /// Owner's full name
    #[arg(short, long)]
    pub owner: String,

    /// Owner's email address
    #[arg(short, long)]
    pub email: String,

    /// Owner's phone number
    #[arg(short, long)]
    pub phone: String,

    /// Employee or student id
    #[arg(long)]
    pub member_id: String,

    /// Department
    #[arg(short, long)]
    pub department: String,

    /// Owner category
    #[arg(long, value_enum)]
    pub category: CategoryArg,
}

impl From<VehicleDetails> for VehicleInput {
    fn from(details: VehicleDetails) -> Self {
        Self {
            vehicle_type: details.vehicle_type.into(),
            vehicle_number: details.number,
            model: details.model,
            color: details.color,
            ev_status: details.ev,
            owner_name: details.owner,
            email: details.email,
            employee_student_id: details.member_id,
            department: details.department,
            category: details.category.into(),
            phone_number: details.phone,
        }
    }
}

/// Optional replacements for an existing record's fields.
#[derive(Debug, Default, Args)]
pub struct VehicleChanges {
    /// Vehicle type
    #[arg(short = 't', long = "type", value_enum)]
    pub vehicle_type: Option<VehicleTypeArg>,

    /// Plate number
    #[arg(short, long)]
    pub number: Option<String>,

    /// Make and model
    #[arg(short, long)]
    pub model: Option<String>,

    /// Body colour
    #[arg(long)]
    pub color: Option<String>,

    /// Electric or hybrid drivetrain
    #[arg(long)]
    pub ev: Option<bool>,

    /// Owner's full name
    #[arg(short, long)]
    pub owner: Option<String>,

    /// Owner's email address
    #[arg(short, long)]
    pub email: Option<String>,

    /// Owner's phone number
    #[arg(short, long)]
    pub phone: Option<String>,

    /// Employee or student id
    #[arg(long)]
    pub member_id: Option<String>,

    /// Department
    #[arg(short, long)]
    pub department: Option<String>,

    /// Owner category
    #[arg(long, value_enum)]
    pub category: Option<CategoryArg>,
}

impl VehicleChanges {
    /// Overlay these changes on `base`.
    #[must_use]
    pub fn apply(self, mut base: VehicleInput) -> VehicleInput {
        if let Some(t) = self.vehicle_type {
            base.vehicle_type = t.into();
        }
        if let Some(number) = self.number {
            base.vehicle_number = number;
        }
        if let Some(model) = self.model {
            base.model = model;
        }
        if let Some(color) = self.color {
            base.color = color;
        }
        if let Some(ev) = self.ev {
            base.ev_status = ev;
        }
        if let Some(owner) = self.owner {
            base.owner_name = owner;
        }
        if let Some(email) = self.email {
            base.email = email;
        }
        if let Some(phone) = self.phone {
            base.phone_number = phone;
        }
        if let Some(member_id) = self.member_id {
            base.employee_student_id = member_id;
        }
        if let Some(department) = self.department {
            base.department = department;
        }
        if let Some(category) = self.category {
            base.category = category.into();
        }
        base
    }
}

/// Categorical filters shared by `find` and `export csv`.
#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Vehicle type
    #[arg(short = 't', long = "type", value_enum, default_value = "all")]
    pub vehicle_type: TypeFilterArg,

    /// Owner category
    #[arg(long, value_enum, default_value = "all")]
    pub category: CategoryFilterArg,

    /// Department name, or "all"
    #[arg(short, long, default_value = "all")]
    pub department: String,
}

impl FilterArgs {
    /// Combine these filters with a search term.
    #[must_use]
    pub fn criteria(&self, query: Option<&str>) -> FilterCriteria {
        FilterCriteria {
            search: query.unwrap_or_default().to_string(),
            vehicle_type: self.vehicle_type.into(),
            category: self.category.into(),
            department: (self.department != "all").then(|| self.department.clone()),
        }
    }
}

/// Vehicle type argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VehicleTypeArg {
    /// Four-wheeler
    Car,
    /// Two-wheeler
    Bike,
    /// Electric vehicle
    Ev,
}

impl From<VehicleTypeArg> for VehicleType {
    fn from(arg: VehicleTypeArg) -> Self {
        match arg {
            VehicleTypeArg::Car => Self::Car,
            VehicleTypeArg::Bike => Self::Bike,
            VehicleTypeArg::Ev => Self::Ev,
        }
    }
}

/// Owner category argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    /// Faculty member
    Faculty,
    /// Student
    Student,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Faculty => Self::Faculty,
            CategoryArg::Student => Self::Student,
        }
    }
}

/// Vehicle type filter argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TypeFilterArg {
    /// Any type
    #[default]
    All,
    /// Cars only
    Car,
    /// Bikes only
    Bike,
    /// Electric vehicles only
    Ev,
}

impl From<TypeFilterArg> for Option<VehicleType> {
    fn from(arg: TypeFilterArg) -> Self {
        match arg {
            TypeFilterArg::All => None,
            TypeFilterArg::Car => Some(VehicleType::Car),
            TypeFilterArg::Bike => Some(VehicleType::Bike),
            TypeFilterArg::Ev => Some(VehicleType::Ev),
        }
    }
}

/// Owner category filter argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CategoryFilterArg {
    /// Any category
    #[default]
    All,
    /// Faculty only
    Faculty,
    /// Students only
    Student,
}

impl From<CategoryFilterArg> for Option<Category> {
    fn from(arg: CategoryFilterArg) -> Self {
        match arg {
            CategoryFilterArg::All => None,
            CategoryFilterArg::Faculty => Some(Category::Faculty),
            CategoryFilterArg::Student => Some(Category::Student),
        }
    }
}

/// Output format for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One line per vehicle
    Plain,
    /// Aligned columns
    #[default]
    Table,
    /// JSON array
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::fixtures::input;

    fn filters(vehicle_type: TypeFilterArg, category: CategoryFilterArg, dept: &str) -> FilterArgs {
        FilterArgs {
            vehicle_type,
            category,
            department: dept.to_string(),
        }
    }

    #[test]
    fn test_filter_args_all_means_unconstrained() {
        let criteria = filters(TypeFilterArg::All, CategoryFilterArg::All, "all").criteria(None);
        assert_eq!(criteria, FilterCriteria::all());
    }

    #[test]
    fn test_filter_args_map_to_criteria() {
        let criteria = filters(TypeFilterArg::Ev, CategoryFilterArg::Student, "ECE")
            .criteria(Some("nexon"));
        assert_eq!(
            criteria,
            FilterCriteria::all()
                .search("nexon")
                .vehicle_type(VehicleType::Ev)
                .category(Category::Student)
                .department("ECE")
        );
    }

    #[test]
    fn test_vehicle_details_into_input() {
        let details = VehicleDetails {
            vehicle_type: VehicleTypeArg::Bike,
            number: "ts09fa5678".to_string(),
            model: "Royal Enfield Classic".to_string(),
            color: "Black".to_string(),
            ev: false,
            owner: "Arjun Reddy".to_string(),
            email: "arjun.reddy@vnrvjiet.ac.in".to_string(),
            phone: "+91 8765432109".to_string(),
            member_id: "21B91A0501".to_string(),
            department: "ECE".to_string(),
            category: CategoryArg::Student,
        };

        let input = VehicleInput::from(details);
        assert_eq!(input.vehicle_type, VehicleType::Bike);
        assert_eq!(input.employee_student_id, "21B91A0501");
        assert_eq!(input.category, Category::Student);
        // Normalization happens in the registry, not here.
        assert_eq!(input.vehicle_number, "ts09fa5678");
    }

    #[test]
    fn test_vehicle_changes_overlay() {
        let base = input(VehicleType::Car, "TS09EA1234", "Honda City");
        let changes = VehicleChanges {
            model: Some("Honda Amaze".to_string()),
            category: Some(CategoryArg::Student),
            ..VehicleChanges::default()
        };

        let updated = changes.apply(base.clone());
        assert_eq!(updated.model, "Honda Amaze");
        assert_eq!(updated.category, Category::Student);
        assert_eq!(updated.vehicle_number, base.vehicle_number);
        assert_eq!(updated.owner_name, base.owner_name);
    }

    #[test]
    fn test_empty_changes_keep_base() {
        let base = input(VehicleType::Ev, "TS09GA9999", "Tata Nexon EV");
        assert_eq!(VehicleChanges::default().apply(base.clone()), base);
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }
}
