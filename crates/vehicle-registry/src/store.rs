//! Persistent home for the vehicle list.
//!
//! The whole registry lives as one JSON array under a single storage key.
//! There are no partial writes: every mutation recomputes the list in memory
//! and hands the full result to [`RegistryStore::save`].
//!
//! What happens on first run and on unreadable data is decided explicitly by
//! a [`SeedProvider`] and a [`CorruptPolicy`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::storage::Storage;
use crate::vehicle::{Category, Vehicle, VehicleType};

/// Supplies the initial registry contents when nothing is stored yet.
pub trait SeedProvider: std::fmt::Debug {
    /// Records to install on first load.
    fn seed(&self) -> Vec<Vehicle>;
}

/// Seeds the three demonstration records.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleSeed;

/// Seeds nothing; the registry starts empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptySeed;

impl SeedProvider for SampleSeed {
    fn seed(&self) -> Vec<Vehicle> {
        sample_vehicles()
    }
}

impl SeedProvider for EmptySeed {
    fn seed(&self) -> Vec<Vehicle> {
        Vec::new()
    }
}

/// Which seed provider a deployment uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedPolicy {
    /// Install the demonstration records.
    #[default]
    Sample,
    /// Start with an empty registry.
    Empty,
}

impl SeedPolicy {
    /// Build the provider for this policy.
    #[must_use]
    pub fn provider(self) -> Box<dyn SeedProvider> {
        match self {
            Self::Sample => Box::new(SampleSeed),
            Self::Empty => Box::new(EmptySeed),
        }
    }
}

/// What to do when the stored list cannot be decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorruptPolicy {
    /// Refuse to load and report [`Error::CorruptState`].
    #[default]
    Fail,
    /// Log a warning and load an empty registry. The bad value stays in
    /// storage until the next save overwrites it.
    Empty,
}

/// Loads and saves the full vehicle list under one storage key.
#[derive(Debug)]
pub struct RegistryStore {
    storage: Storage,
    key: String,
    seed: Box<dyn SeedProvider>,
    on_corrupt: CorruptPolicy,
}

impl RegistryStore {
    /// Wrap `storage`, keeping the list under `key`.
    ///
    /// Defaults to [`SampleSeed`] and [`CorruptPolicy::Fail`].
    #[must_use]
    pub fn new(storage: Storage, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            seed: Box::new(SampleSeed),
            on_corrupt: CorruptPolicy::default(),
        }
    }

    /// Replace the seed provider.
    #[must_use]
    pub fn with_seed(mut self, seed: Box<dyn SeedProvider>) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the corrupted-state policy.
    #[must_use]
    pub fn with_corrupt_policy(mut self, policy: CorruptPolicy) -> Self {
        self.on_corrupt = policy;
        self
    }

    /// The storage key holding the list.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying key-value backend.
    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Read the stored list.
    ///
    /// When nothing is stored, the seed set is persisted and returned.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails, or if the stored value is corrupted
    /// and the policy is [`CorruptPolicy::Fail`].
    pub fn load(&self) -> Result<Vec<Vehicle>> {
        let Some(raw) = self.storage.get(&self.key)? else {
            let seeded = self.seed.seed();
            info!(
                "No stored registry under {}, seeding {} records",
                self.key,
                seeded.len()
            );
            self.save(&seeded)?;
            return Ok(seeded);
        };

        match serde_json::from_str::<Vec<Vehicle>>(&raw) {
            Ok(vehicles) => {
                debug!("Loaded {} vehicles from {}", vehicles.len(), self.key);
                Ok(vehicles)
            }
            Err(source) => match self.on_corrupt {
                CorruptPolicy::Fail => Err(Error::CorruptState {
                    key: self.key.clone(),
                    source,
                }),
                CorruptPolicy::Empty => {
                    warn!(
                        "Stored registry under {} is corrupted ({}), treating as empty",
                        self.key, source
                    );
                    Ok(Vec::new())
                }
            },
        }
    }

    /// Overwrite the stored list with `vehicles`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or storage fails.
    pub fn save(&self, vehicles: &[Vehicle]) -> Result<()> {
        let encoded = serde_json::to_string(vehicles)?;
        self.storage.set(&self.key, &encoded)?;
        debug!("Saved {} vehicles to {}", vehicles.len(), self.key);
        Ok(())
    }

    /// Bulk-overwrite the stored list with externally supplied records.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or storage fails.
    pub fn replace(&self, vehicles: &[Vehicle]) -> Result<()> {
        info!(
            "Replacing stored registry under {} with {} records",
            self.key,
            vehicles.len()
        );
        self.save(vehicles)
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// The demonstration records installed by [`SampleSeed`].
#[must_use]
pub fn sample_vehicles() -> Vec<Vehicle> {
    vec![
        Vehicle {
            id: "1".to_string(),
            vehicle_type: VehicleType::Car,
            vehicle_number: "TS09EA1234".to_string(),
            model: "Honda City".to_string(),
            color: "White".to_string(),
            ev_status: false,
            owner_name: "Dr. Rajesh Kumar".to_string(),
            email: "rajesh.kumar@vnrvjiet.ac.in".to_string(),
            employee_student_id: "F001".to_string(),
            department: "CSE".to_string(),
            category: Category::Faculty,
            phone_number: "+91 9876543210".to_string(),
            registered_at: date(2024, 1, 15),
        },
        Vehicle {
            id: "2".to_string(),
            vehicle_type: VehicleType::Bike,
            vehicle_number: "TS09FA5678".to_string(),
            model: "Royal Enfield Classic".to_string(),
            color: "Black".to_string(),
            ev_status: false,
            owner_name: "Arjun Reddy".to_string(),
            email: "arjun.reddy@vnrvjiet.ac.in".to_string(),
            employee_student_id: "21B91A0501".to_string(),
            department: "ECE".to_string(),
            category: Category::Student,
            phone_number: "+91 8765432109".to_string(),
            registered_at: date(2024, 1, 20),
        },
        Vehicle {
            id: "3".to_string(),
            vehicle_type: VehicleType::Ev,
            vehicle_number: "TS09GA9999".to_string(),
            model: "Tata Nexon EV".to_string(),
            color: "Blue".to_string(),
            ev_status: true,
            owner_name: "Prof. Priya Sharma".to_string(),
            email: "priya.sharma@vnrvjiet.ac.in".to_string(),
            employee_student_id: "F045".to_string(),
            department: "MECH".to_string(),
            category: Category::Faculty,
            phone_number: "+91 7654321098".to_string(),
            registered_at: date(2024, 2, 1),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const KEY: &str = "vnr-parking-vehicles";

    fn create_test_store() -> RegistryStore {
        let storage = Storage::open_in_memory().expect("failed to create test storage");
        RegistryStore::new(storage, KEY)
    }

    #[test]
    fn test_sample_vehicles_cover_types_and_categories() {
        let samples = sample_vehicles();
        assert_eq!(samples.len(), 3);

        let types: HashSet<_> = samples.iter().map(|v| v.vehicle_type).collect();
        assert_eq!(types.len(), 3);
        let categories: HashSet<_> = samples.iter().map(|v| v.category).collect();
        assert_eq!(categories.len(), 2);

        let ids: HashSet<_> = samples.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
        assert!(samples
            .iter()
            .filter(|v| v.vehicle_type == VehicleType::Ev)
            .all(|v| v.ev_status));
    }

    #[test]
    fn test_load_seeds_and_persists_on_first_run() {
        let store = create_test_store();
        assert!(store.storage().get(KEY).unwrap().is_none());

        let loaded = store.load().unwrap();
        assert_eq!(loaded, sample_vehicles());
        assert!(store.storage().get(KEY).unwrap().is_some());
    }

    #[test]
    fn test_load_with_empty_seed() {
        let store = create_test_store().with_seed(SeedPolicy::Empty.provider());
        assert!(store.load().unwrap().is_empty());
        assert_eq!(store.storage().get(KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_seed_not_reapplied_once_stored() {
        let store = create_test_store();
        store.save(&[]).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let store = create_test_store();
        let mut vehicles = sample_vehicles();
        vehicles.truncate(2);

        store.save(&vehicles).unwrap();
        assert_eq!(store.load().unwrap(), vehicles);
    }

    #[test]
    fn test_persisted_layout_uses_verbatim_field_names() {
        let store = create_test_store();
        store.save(&sample_vehicles()[..1]).unwrap();

        let raw = store.storage().get(KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let first = &value[0];
        for field in [
            "id",
            "vehicleType",
            "vehicleNumber",
            "model",
            "color",
            "evStatus",
            "ownerName",
            "email",
            "employeeStudentId",
            "department",
            "category",
            "phoneNumber",
            "registeredAt",
        ] {
            assert!(first.get(field).is_some(), "missing field {field}");
        }
    }

    #[test]
    fn test_replace_overwrites_everything() {
        let store = create_test_store();
        store.load().unwrap();

        let replacement = vec![sample_vehicles().remove(2)];
        store.replace(&replacement).unwrap();
        assert_eq!(store.load().unwrap(), replacement);
    }

    #[test]
    fn test_corrupt_state_fails_by_default() {
        let store = create_test_store();
        store.storage().set(KEY, "{not json").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, Error::CorruptState { .. }));
    }

    #[test]
    fn test_corrupt_state_treated_as_empty_when_configured() {
        let store = create_test_store().with_corrupt_policy(CorruptPolicy::Empty);
        store.storage().set(KEY, "{\"foo\": 1}").unwrap();

        assert!(store.load().unwrap().is_empty());
        // The bad value is left alone until the next save.
        assert_eq!(
            store.storage().get(KEY).unwrap().as_deref(),
            Some("{\"foo\": 1}")
        );
    }

    #[test]
    fn test_policy_serde_names() {
        assert_eq!(
            serde_json::to_string(&SeedPolicy::Empty).unwrap(),
            "\"empty\""
        );
        let policy: CorruptPolicy = serde_json::from_str("\"fail\"").unwrap();
        assert_eq!(policy, CorruptPolicy::Fail);
    }
}
