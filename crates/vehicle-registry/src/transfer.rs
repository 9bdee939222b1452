//! Backup, extract, and restore formats.
//!
//! - JSON backup: the full registry, pretty-printed, every field.
//! - CSV extract: a filtered view with a fixed column order.
//! - JSON restore: a top-level array of records that wholesale-replaces the
//!   registry.

use tracing::debug;

use crate::error::{Error, Result};
use crate::vehicle::Vehicle;

/// Column headers of the CSV extract, in order.
pub const CSV_HEADERS: [&str; 8] = [
    "Vehicle Number",
    "Type",
    "Model",
    "Owner Name",
    "Department",
    "Category",
    "Phone Number",
    "Email",
];

/// Default filename for a JSON backup of the registry called `name`.
#[must_use]
pub fn json_backup_filename(name: &str) -> String {
    format!("{name}-vehicles-backup.json")
}

/// Default filename for a CSV extract of the registry called `name`.
#[must_use]
pub fn csv_filename(name: &str) -> String {
    format!("{name}-vehicles.csv")
}

/// Serialize every record as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn export_json(vehicles: &[Vehicle]) -> Result<String> {
    Ok(serde_json::to_string_pretty(vehicles)?)
}

/// Serialize a filtered view as CSV.
///
/// Rows are newline-separated with no trailing newline. Fields containing a
/// comma, quote, or line break are quoted; all others are written verbatim.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn export_csv(vehicles: &[&Vehicle]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADERS)?;
    for v in vehicles {
        let vehicle_type = v.vehicle_type.to_string();
        let category = v.category.to_string();
        writer.write_record([
            v.vehicle_number.as_str(),
            vehicle_type.as_str(),
            v.model.as_str(),
            v.owner_name.as_str(),
            v.department.as_str(),
            category.as_str(),
            v.phone_number.as_str(),
            v.email.as_str(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
    let mut out = String::from_utf8(bytes)
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
    if out.ends_with('\n') {
        out.pop();
    }
    debug!("Exported {} rows as CSV", vehicles.len());
    Ok(out)
}

/// Parse an uploaded backup.
///
/// The payload must be a JSON array whose elements are vehicle records. Every
/// element is checked against the record shape before anything is written,
/// which is stricter than a plain "is it an array" check; see the import
/// notes in `DESIGN.md`. The records are returned as stored; no write-time
/// normalization is applied.
///
/// # Errors
///
/// Returns [`Error::InvalidImport`] if the text is not JSON, the top-level
/// value is not an array, or an element is not a vehicle record.
pub fn parse_import(contents: &str) -> Result<Vec<Vehicle>> {
    let value: serde_json::Value = serde_json::from_str(contents)
        .map_err(|e| Error::invalid_import(format!("not valid JSON: {e}")))?;

    if !value.is_array() {
        return Err(Error::invalid_import("top-level value is not an array"));
    }

    serde_json::from_value(value)
        .map_err(|e| Error::invalid_import(format!("not a list of vehicle records: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::sample_vehicles;
    use crate::vehicle::fixtures::vehicle;
    use crate::vehicle::Category;

    const HEADER: &str = "Vehicle Number,Type,Model,Owner Name,Department,Category,Phone Number,Email";

    #[test]
    fn test_filenames() {
        assert_eq!(json_backup_filename("vnr"), "vnr-vehicles-backup.json");
        assert_eq!(csv_filename("vnr"), "vnr-vehicles.csv");
    }

    #[test]
    fn test_export_json_is_pretty_array() {
        let json = export_json(&sample_vehicles()).unwrap();
        assert!(json.starts_with("[\n"));
        assert!(json.contains("\"vehicleNumber\": \"TS09EA1234\""));
    }

    #[test]
    fn test_export_then_import_reproduces_list() {
        let vehicles = sample_vehicles();
        let restored = parse_import(&export_json(&vehicles).unwrap()).unwrap();
        assert_eq!(restored, vehicles);
    }

    #[test]
    fn test_export_csv_empty_is_header_only() {
        assert_eq!(export_csv(&[]).unwrap(), HEADER);
    }

    #[test]
    fn test_export_csv_rows_in_column_order() {
        let vehicles = sample_vehicles();
        let view: Vec<&Vehicle> = vehicles.iter().take(2).collect();

        let csv = export_csv(&view).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER);
        assert_eq!(
            lines[1],
            "TS09EA1234,Car,Honda City,Dr. Rajesh Kumar,CSE,Faculty,+91 9876543210,rajesh.kumar@vnrvjiet.ac.in"
        );
        assert_eq!(
            lines[2],
            "TS09FA5678,Bike,Royal Enfield Classic,Arjun Reddy,ECE,Student,+91 8765432109,arjun.reddy@vnrvjiet.ac.in"
        );
    }

    #[test]
    fn test_export_csv_quotes_embedded_commas() {
        let v = vehicle("9", "TS01AA0001", "Maruti Swift, VXi", "CSE", Category::Student);
        let csv = export_csv(&[&v]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains("\"Maruti Swift, VXi\""));

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(record.len(), CSV_HEADERS.len());
        assert_eq!(&record[2], "Maruti Swift, VXi");
    }

    #[test]
    fn test_import_rejects_non_array() {
        let err = parse_import(r#"{"foo": 1}"#).unwrap_err();
        assert!(err.is_invalid_import());
        assert!(err.to_string().contains("not an array"));
    }

    #[test]
    fn test_import_rejects_malformed_json() {
        let err = parse_import("[{").unwrap_err();
        assert!(err.is_invalid_import());
    }

    #[test]
    fn test_import_rejects_wrong_element_shape() {
        let err = parse_import(r#"[{"id": "1"}]"#).unwrap_err();
        assert!(err.is_invalid_import());
    }

    #[test]
    fn test_import_accepts_empty_array() {
        assert!(parse_import("[]").unwrap().is_empty());
    }

    #[test]
    fn test_import_keeps_records_as_stored() {
        let mut vehicles = sample_vehicles();
        vehicles[2].ev_status = false;
        vehicles[0].vehicle_number = "ts09ea1234".to_string();

        let restored = parse_import(&export_json(&vehicles).unwrap()).unwrap();
        assert!(!restored[2].ev_status);
        assert_eq!(restored[0].vehicle_number, "ts09ea1234");
    }
}
