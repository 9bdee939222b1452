//! `vehicle_registry` - Campus vehicle registration and lookup
//!
//! This library keeps a registry of vehicle-owner records in a local `SQLite`
//! key-value store and provides the operations a front end needs: add,
//! update, delete, filtered search, JSON backup and restore, and CSV
//! extracts.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod registry;
pub mod storage;
pub mod store;
pub mod transfer;
pub mod validation;
pub mod vehicle;

pub use config::Config;
pub use error::{Error, Result};
pub use filter::{FilterCriteria, RegistryStats};
pub use logging::init_logging;
pub use registry::Registry;
pub use storage::Storage;
pub use store::{CorruptPolicy, RegistryStore, SeedPolicy, SeedProvider};
pub use vehicle::{Category, Vehicle, VehicleInput, VehicleType};
