//! Text rendering for listings and detail views.

use std::fmt::Write as _;

use crate::filter::RegistryStats;
use crate::vehicle::Vehicle;

const TABLE_HEADERS: [&str; 8] = [
    "ID",
    "Number",
    "Type",
    "Model",
    "Owner",
    "Department",
    "Category",
    "Registered",
];

fn table_row(v: &Vehicle) -> [String; 8] {
    [
        v.id.clone(),
        v.vehicle_number.clone(),
        v.vehicle_type.to_string(),
        v.model.clone(),
        v.owner_name.clone(),
        v.department.clone(),
        v.category.to_string(),
        v.registered_at.to_string(),
    ]
}

fn format_line<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell.as_ref()))
        .collect::<Vec<_>>()
        .join("  ");
    line.trim_end().to_string()
}

/// Render vehicles as aligned columns.
#[must_use]
pub fn render_table(vehicles: &[&Vehicle]) -> String {
    let rows: Vec<[String; 8]> = vehicles.iter().map(|v| table_row(v)).collect();

    let mut widths = TABLE_HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    let rule = widths.map(|w| "-".repeat(w));

    let mut out = String::new();
    let _ = writeln!(out, "{}", format_line(&TABLE_HEADERS, &widths));
    let _ = writeln!(out, "{}", format_line(&rule, &widths));
    for row in &rows {
        let _ = writeln!(out, "{}", format_line(row, &widths));
    }
    let _ = write!(out, "{} vehicle(s)", rows.len());
    out
}

/// Render one vehicle per line.
#[must_use]
pub fn render_plain(vehicles: &[&Vehicle]) -> String {
    vehicles
        .iter()
        .map(|v| {
            format!(
                "{}  {} {} ({}) - {}, {} {}",
                v.id,
                v.vehicle_number,
                v.model,
                v.vehicle_type,
                v.owner_name,
                v.department,
                v.category
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render every field of one vehicle.
#[must_use]
pub fn render_detail(v: &Vehicle) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Vehicle {}", v.vehicle_number);
    let _ = writeln!(out, "{}", "=".repeat(8 + v.vehicle_number.chars().count()));
    let _ = writeln!(out, "  ID:              {}", v.id);
    let _ = writeln!(out, "  Type:            {}", v.vehicle_type);
    let _ = writeln!(out, "  Model:           {}", v.model);
    let _ = writeln!(out, "  Color:           {}", v.color);
    let _ = writeln!(
        out,
        "  Electric:        {}",
        if v.ev_status { "yes" } else { "no" }
    );
    let _ = writeln!(out, "  Owner:           {}", v.owner_name);
    let _ = writeln!(out, "  Email:           {}", v.email);
    let _ = writeln!(out, "  Phone:           {}", v.phone_number);
    let _ = writeln!(out, "  Employee/Student ID: {}", v.employee_student_id);
    let _ = writeln!(out, "  Department:      {}", v.department);
    let _ = writeln!(out, "  Category:        {}", v.category);
    let _ = write!(out, "  Registered:      {}", v.registered_at);
    out
}

/// Render the headline counts.
#[must_use]
pub fn render_stats(stats: &RegistryStats) -> String {
    format!(
        "Total vehicles:  {}\nCars:            {}\nBikes:           {}\nEVs:             {}",
        stats.total, stats.cars, stats.bikes, stats.evs
    )
}
