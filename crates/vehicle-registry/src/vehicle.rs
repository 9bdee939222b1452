//! Core vehicle record types.
//!
//! This module defines the registered vehicle-owner pairing and the input
//! shape used to create or replace one. Field names serialize verbatim in
//! camelCase (`vehicleNumber`, `evStatus`, ...) so persisted and exported
//! documents keep a stable layout.

use std::str::FromStr;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Kind of vehicle being registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleType {
    /// Four-wheeler.
    Car,
    /// Two-wheeler.
    Bike,
    /// Electric vehicle; always carries `ev_status = true`.
    #[serde(rename = "EV")]
    Ev,
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Car => write!(f, "Car"),
            Self::Bike => write!(f, "Bike"),
            Self::Ev => write!(f, "EV"),
        }
    }
}

impl FromStr for VehicleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "car" => Ok(Self::Car),
            "bike" => Ok(Self::Bike),
            "ev" => Ok(Self::Ev),
            other => Err(format!("unknown vehicle type: {other}")),
        }
    }
}

/// Owner category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Teaching or administrative staff.
    Faculty,
    /// Enrolled student.
    Student,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Faculty => write!(f, "Faculty"),
            Self::Student => write!(f, "Student"),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "faculty" => Ok(Self::Faculty),
            "student" => Ok(Self::Student),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// A registered vehicle and its owner.
///
/// `id` and `registered_at` are assigned when the record is added and are
/// never changed by later updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    /// Opaque unique identifier.
    pub id: String,
    /// Kind of vehicle.
    pub vehicle_type: VehicleType,
    /// Plate identifier, uppercase.
    pub vehicle_number: String,
    /// Make and model.
    pub model: String,
    /// Body colour.
    pub color: String,
    /// Electric or hybrid drivetrain.
    pub ev_status: bool,
    /// Owner's full name.
    pub owner_name: String,
    /// Owner's email address.
    pub email: String,
    /// Employee or student roll number.
    pub employee_student_id: String,
    /// Owning department.
    pub department: String,
    /// Owner category.
    pub category: Category,
    /// Owner's phone number.
    pub phone_number: String,
    /// Date the record was created.
    pub registered_at: NaiveDate,
}

/// Everything about a vehicle except its identity and registration date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleInput {
    /// Kind of vehicle.
    pub vehicle_type: VehicleType,
    /// Plate identifier as entered.
    pub vehicle_number: String,
    /// Make and model.
    pub model: String,
    /// Body colour.
    pub color: String,
    /// Electric or hybrid drivetrain.
    pub ev_status: bool,
    /// Owner's full name.
    pub owner_name: String,
    /// Owner's email address.
    pub email: String,
    /// Employee or student roll number.
    pub employee_student_id: String,
    /// Owning department.
    pub department: String,
    /// Owner category.
    pub category: Category,
    /// Owner's phone number.
    pub phone_number: String,
}

impl VehicleInput {
    /// Apply write-time normalization.
    ///
    /// The plate is uppercased and `ev_status` is forced on for EVs.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.vehicle_number = self.vehicle_number.to_uppercase();
        self.ev_status = self.vehicle_type == VehicleType::Ev || self.ev_status;
        self
    }

    /// Build a full record from this input.
    ///
    /// The input is used as-is; callers normalize first.
    #[must_use]
    pub fn into_vehicle(self, id: String, registered_at: NaiveDate) -> Vehicle {
        Vehicle {
            id,
            vehicle_type: self.vehicle_type,
            vehicle_number: self.vehicle_number,
            model: self.model,
            color: self.color,
            ev_status: self.ev_status,
            owner_name: self.owner_name,
            email: self.email,
            employee_student_id: self.employee_student_id,
            department: self.department,
            category: self.category,
            phone_number: self.phone_number,
            registered_at,
        }
    }
}

impl From<&Vehicle> for VehicleInput {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            vehicle_type: vehicle.vehicle_type,
            vehicle_number: vehicle.vehicle_number.clone(),
            model: vehicle.model.clone(),
            color: vehicle.color.clone(),
            ev_status: vehicle.ev_status,
            owner_name: vehicle.owner_name.clone(),
            email: vehicle.email.clone(),
            employee_student_id: vehicle.employee_student_id.clone(),
            department: vehicle.department.clone(),
            category: vehicle.category,
            phone_number: vehicle.phone_number.clone(),
        }
    }
}

impl Vehicle {
    /// Generate a fresh record identifier.
    #[must_use]
    pub fn new_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Today's date in UTC, with no time-of-day component.
    #[must_use]
    pub fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    /// Whether this vehicle counts toward the EV total.
    #[must_use]
    pub fn is_electric(&self) -> bool {
        self.vehicle_type == VehicleType::Ev || self.ev_status
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::input;
    use super::*;

    #[test]
    fn test_vehicle_type_serializes_as_labels() {
        assert_eq!(serde_json::to_string(&VehicleType::Ev).unwrap(), "\"EV\"");
        assert_eq!(serde_json::to_string(&VehicleType::Car).unwrap(), "\"Car\"");
        let parsed: VehicleType = serde_json::from_str("\"Bike\"").unwrap();
        assert_eq!(parsed, VehicleType::Bike);
    }

    #[test]
    fn test_vehicle_type_from_str_is_case_insensitive() {
        assert_eq!("ev".parse::<VehicleType>().unwrap(), VehicleType::Ev);
        assert_eq!("CAR".parse::<VehicleType>().unwrap(), VehicleType::Car);
        assert!("truck".parse::<VehicleType>().is_err());
    }

    #[test]
    fn test_category_display_and_parse() {
        assert_eq!(Category::Student.to_string(), "Student");
        assert_eq!("faculty".parse::<Category>().unwrap(), Category::Faculty);
        assert!("staff".parse::<Category>().is_err());
    }

    #[test]
    fn test_normalized_uppercases_plate() {
        let normalized = input(VehicleType::Car, "ts09ea1234", "Honda City").normalized();
        assert_eq!(normalized.vehicle_number, "TS09EA1234");
        assert!(!normalized.ev_status);
    }

    #[test]
    fn test_normalized_forces_ev_status_for_ev() {
        let normalized = input(VehicleType::Ev, "TS09GA9999", "Tata Nexon EV").normalized();
        assert!(normalized.ev_status);
    }

    #[test]
    fn test_normalized_keeps_user_ev_flag_for_other_types() {
        let mut hybrid = input(VehicleType::Car, "TS09AB0001", "Toyota Hyryder");
        hybrid.ev_status = true;
        assert!(hybrid.normalized().ev_status);
    }

    #[test]
    fn test_vehicle_serializes_camel_case_fields() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let vehicle = input(VehicleType::Ev, "TS09GA9999", "Tata Nexon EV")
            .normalized()
            .into_vehicle("3".to_string(), date);

        let json = serde_json::to_value(&vehicle).unwrap();
        assert_eq!(json["vehicleType"], "EV");
        assert_eq!(json["vehicleNumber"], "TS09GA9999");
        assert_eq!(json["evStatus"], true);
        assert_eq!(json["employeeStudentId"], "F001");
        assert_eq!(json["phoneNumber"], "+91 9876543210");
        assert_eq!(json["registeredAt"], "2024-02-01");
    }

    #[test]
    fn test_input_from_vehicle_drops_identity() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let original = input(VehicleType::Bike, "TS09FA5678", "Royal Enfield Classic");
        let vehicle = original.clone().into_vehicle("2".to_string(), date);
        assert_eq!(VehicleInput::from(&vehicle), original);
    }

    #[test]
    fn test_new_id_is_unique() {
        assert_ne!(Vehicle::new_id(), Vehicle::new_id());
    }

    #[test]
    fn test_is_electric() {
        let date = Vehicle::today();
        let mut car = input(VehicleType::Car, "A", "B").into_vehicle("1".to_string(), date);
        assert!(!car.is_electric());
        car.ev_status = true;
        assert!(car.is_electric());

        let ev = input(VehicleType::Ev, "C", "D").into_vehicle("2".to_string(), date);
        assert!(ev.is_electric());
    }
}
