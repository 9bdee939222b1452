//! The registry handle.
//!
//! [`Registry`] owns the in-memory vehicle list and the store that mirrors
//! it. Every mutation is applied to the list and then the whole list is
//! saved before the call returns, so the next reader (or the next process)
//! sees it. Consumers are handed a `&Registry` or `&mut Registry`; there is
//! no shared global.

use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;
use crate::filter::{departments, FilterCriteria, RegistryStats};
use crate::storage::Storage;
use crate::store::RegistryStore;
use crate::transfer;
use crate::vehicle::{Vehicle, VehicleInput};

/// In-memory registry backed by a [`RegistryStore`].
#[derive(Debug)]
pub struct Registry {
    store: RegistryStore,
    vehicles: Vec<Vehicle>,
}

impl Registry {
    /// Load the registry from `store`, seeding it on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn open(store: RegistryStore) -> Result<Self> {
        let vehicles = store.load()?;
        info!("Registry opened with {} vehicles", vehicles.len());
        Ok(Self { store, vehicles })
    }

    /// Open the database and policies named by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the store cannot be read.
    pub fn open_with_config(config: &Config) -> Result<Self> {
        let storage = Storage::open(config.database_path())?;
        let store = RegistryStore::new(storage, config.storage.storage_key.clone())
            .with_seed(config.registry.seed.provider())
            .with_corrupt_policy(config.registry.on_corrupt);
        Self::open(store)
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &RegistryStore {
        &self.store
    }

    /// Every record, in registration order.
    #[must_use]
    pub fn list_all(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Look up a record by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    /// Register a new vehicle.
    ///
    /// The input is normalized, given a fresh id and today's date, appended,
    /// and persisted. Returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails; the in-memory list is rolled back.
    pub fn add(&mut self, input: VehicleInput) -> Result<&Vehicle> {
        let mut id = Vehicle::new_id();
        while self.get(&id).is_some() {
            id = Vehicle::new_id();
        }
        let vehicle = input.normalized().into_vehicle(id, Vehicle::today());

        self.vehicles.push(vehicle);
        if let Err(e) = self.store.save(&self.vehicles) {
            self.vehicles.pop();
            return Err(e);
        }

        let added = &self.vehicles[self.vehicles.len() - 1];
        info!("Registered {} as {}", added.vehicle_number, added.id);
        Ok(added)
    }

    /// Replace every field of the record `id` except `id` and `registered_at`.
    ///
    /// Returns `false` and leaves the list untouched when no record matches.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails; the record is restored.
    pub fn update(&mut self, id: &str, input: VehicleInput) -> Result<bool> {
        let Some(index) = self.vehicles.iter().position(|v| v.id == id) else {
            debug!("Update of unknown id {} ignored", id);
            return Ok(false);
        };

        let existing = &self.vehicles[index];
        let replacement = input
            .normalized()
            .into_vehicle(existing.id.clone(), existing.registered_at);
        let previous = std::mem::replace(&mut self.vehicles[index], replacement);

        if let Err(e) = self.store.save(&self.vehicles) {
            self.vehicles[index] = previous;
            return Err(e);
        }
        info!("Updated vehicle {}", id);
        Ok(true)
    }

    /// Remove the record `id`.
    ///
    /// Returns `false` and leaves the list untouched when no record matches.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails; the record is restored.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let Some(index) = self.vehicles.iter().position(|v| v.id == id) else {
            debug!("Delete of unknown id {} ignored", id);
            return Ok(false);
        };

        let removed = self.vehicles.remove(index);
        if let Err(e) = self.store.save(&self.vehicles) {
            self.vehicles.insert(index, removed);
            return Err(e);
        }
        info!("Deleted vehicle {} ({})", id, removed.vehicle_number);
        Ok(true)
    }

    /// Records matching `criteria`, in registration order.
    #[must_use]
    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&Vehicle> {
        criteria.apply(&self.vehicles)
    }

    /// Distinct departments present, sorted.
    #[must_use]
    pub fn departments(&self) -> Vec<String> {
        departments(&self.vehicles)
    }

    /// Headline counts.
    #[must_use]
    pub fn stats(&self) -> RegistryStats {
        RegistryStats::from_vehicles(&self.vehicles)
    }

    /// Serialize the whole registry as a JSON backup.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn export_json(&self) -> Result<String> {
        transfer::export_json(&self.vehicles)
    }

    /// Serialize a filtered view as CSV.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn export_csv(view: &[&Vehicle]) -> Result<String> {
        transfer::export_csv(view)
    }

    /// Replace the registry with the records in a JSON backup.
    ///
    /// On success the store is overwritten and the in-memory list is reloaded
    /// from it. On failure nothing changes. Returns the number of records now
    /// in the registry.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidImport`] for a malformed payload, or a
    /// storage error if the replacement cannot be written or read back.
    pub fn import_json(&mut self, contents: &str) -> Result<usize> {
        let imported = transfer::parse_import(contents)?;
        self.store.replace(&imported)?;
        self.vehicles = self.store.load()?;
        info!("Imported {} vehicles", self.vehicles.len());
        Ok(self.vehicles.len())
    }
}
