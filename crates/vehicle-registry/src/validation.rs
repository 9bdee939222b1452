//! Form-level checks on submitted vehicle details.
//!
//! The registry core trusts its inputs. Front ends run [`validate`] before
//! calling `add` or `update` so that blank or malformed fields never reach
//! the store.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::vehicle::VehicleInput;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{0,15}$").expect("valid phone regex"));

/// Whether `email` has the `local@domain.tld` shape.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Whether `phone`, ignoring whitespace, is an optional `+` and up to 16
/// digits with no leading zero.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    PHONE.is_match(&compact)
}

/// Collect one message per failing field, in form order.
#[must_use]
pub fn problems(input: &VehicleInput) -> Vec<String> {
    let mut problems = Vec::new();
    let mut required = |value: &str, message: &str| {
        let blank = value.trim().is_empty();
        if blank {
            problems.push(message.to_string());
        }
        !blank
    };

    required(&input.vehicle_number, "Vehicle number is required");
    required(&input.model, "Model is required");
    required(&input.color, "Color is required");
    required(&input.owner_name, "Owner name is required");
    let has_email = required(&input.email, "Email is required");
    required(&input.employee_student_id, "ID is required");
    required(&input.department, "Department is required");
    let has_phone = required(&input.phone_number, "Phone number is required");

    if has_email && !is_valid_email(&input.email) {
        problems.push("Invalid email format".to_string());
    }
    if has_phone && !is_valid_phone(&input.phone_number) {
        problems.push("Invalid phone number".to_string());
    }
    problems
}

/// Check every field of `input`.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] listing every failing field.
pub fn validate(input: &VehicleInput) -> Result<()> {
    let problems = problems(input);
    if problems.is_empty() {
        Ok(())
    } else {
        Err(Error::InvalidInput { problems })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::fixtures::input;
    use crate::vehicle::VehicleType;

    #[test]
    fn test_valid_input_passes() {
        assert!(validate(&input(VehicleType::Car, "TS09EA1234", "Honda City")).is_ok());
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a.b@vnrvjiet.ac.in"));
        assert!(!is_valid_email("no-at-sign.example.com"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("has space@x.com"));
    }

    #[test]
    fn test_phone_shapes() {
        assert!(is_valid_phone("+91 9876543210"));
        assert!(is_valid_phone("9876543210"));
        assert!(!is_valid_phone("09876543210"));
        assert!(!is_valid_phone("+91-98765"));
        assert!(!is_valid_phone("12345678901234567"));
    }

    #[test]
    fn test_blank_fields_reported() {
        let mut blank = input(VehicleType::Bike, "  ", "");
        blank.email = String::new();

        let problems = problems(&blank);
        assert!(problems.contains(&"Vehicle number is required".to_string()));
        assert!(problems.contains(&"Model is required".to_string()));
        assert!(problems.contains(&"Email is required".to_string()));
        // A blank email is not also reported as malformed.
        assert!(!problems.contains(&"Invalid email format".to_string()));
    }

    #[test]
    fn test_all_problems_reported_together() {
        let mut bad = input(VehicleType::Car, "TS09EA1234", "Honda City");
        bad.email = "nope".to_string();
        bad.phone_number = "abc".to_string();

        match validate(&bad).unwrap_err() {
            Error::InvalidInput { problems } => {
                assert_eq!(
                    problems,
                    vec![
                        "Invalid email format".to_string(),
                        "Invalid phone number".to_string()
                    ]
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
