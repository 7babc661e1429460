pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{InMemoryStore, JsonFileStore};
pub use config::Settings;
pub use crate::core::{engine::InvariantEngine, service::AssignmentService};
pub use domain::interval::{overlaps, Interval};
pub use domain::model::{Address, Assignment, AssignmentId, Company, CompanyId, NewAssignment, SupplierNumber};
pub use utils::error::{RegistryError, Result};
