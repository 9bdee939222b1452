//! Derived views over the registry.
//!
//! Filtering never mutates the source list and never reorders it: the result
//! is the input with non-matching records dropped.

use std::collections::BTreeSet;

use crate::vehicle::{Category, Vehicle, VehicleType};

/// Search term plus categorical constraints.
///
/// `None` on a categorical field means "all" (no constraint). Active
/// constraints combine with the text match by logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-insensitive substring matched against plate, owner, and model.
    pub search: String,
    /// Exact vehicle type.
    pub vehicle_type: Option<VehicleType>,
    /// Exact owner category.
    pub category: Option<Category>,
    /// Exact department name.
    pub department: Option<String>,
}

impl FilterCriteria {
    /// Criteria that match every record.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Set the free-text search term.
    #[must_use]
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    /// Constrain the vehicle type.
    #[must_use]
    pub fn vehicle_type(mut self, vehicle_type: VehicleType) -> Self {
        self.vehicle_type = Some(vehicle_type);
        self
    }

    /// Constrain the owner category.
    #[must_use]
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Constrain the department.
    #[must_use]
    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Whether `vehicle` satisfies every active predicate.
    #[must_use]
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        self.matches_lowered(&self.search.to_lowercase(), vehicle)
    }

    /// Keep the records that match, in their original order.
    pub fn apply<'a, I>(&self, vehicles: I) -> Vec<&'a Vehicle>
    where
        I: IntoIterator<Item = &'a Vehicle>,
    {
        let needle = self.search.to_lowercase();
        vehicles
            .into_iter()
            .filter(|v| self.matches_lowered(&needle, v))
            .collect()
    }

    fn matches_lowered(&self, needle: &str, vehicle: &Vehicle) -> bool {
        let text = needle.is_empty()
            || vehicle.vehicle_number.to_lowercase().contains(needle)
            || vehicle.owner_name.to_lowercase().contains(needle)
            || vehicle.model.to_lowercase().contains(needle);

        text && self.vehicle_type.map_or(true, |t| vehicle.vehicle_type == t)
            && self.category.map_or(true, |c| vehicle.category == c)
            && self
                .department
                .as_deref()
                .map_or(true, |d| vehicle.department == d)
    }
}

/// Distinct department names present in `vehicles`, sorted.
#[must_use]
pub fn departments(vehicles: &[Vehicle]) -> Vec<String> {
    vehicles
        .iter()
        .map(|v| v.department.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Headline counts shown above the registry table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct RegistryStats {
    /// Every record.
    pub total: usize,
    /// Records of type Car.
    pub cars: usize,
    /// Records of type Bike.
    pub bikes: usize,
    /// Records of type EV or flagged electric.
    pub evs: usize,
}

impl RegistryStats {
    /// Count `vehicles`.
    #[must_use]
    pub fn from_vehicles(vehicles: &[Vehicle]) -> Self {
        vehicles.iter().fold(
            Self {
                total: vehicles.len(),
                ..Self::default()
            },
            |mut stats, v| {
                match v.vehicle_type {
                    VehicleType::Car => stats.cars += 1,
                    VehicleType::Bike => stats.bikes += 1,
                    VehicleType::Ev => {}
                }
                if v.is_electric() {
                    stats.evs += 1;
                }
                stats
            },
        )
    }
}
