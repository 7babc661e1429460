pub mod engine;
pub mod invariant;
pub mod pool;
pub mod service;

pub use crate::domain::interval::{overlaps, Interval};
pub use crate::domain::model::{Assignment, AssignmentId, Company, CompanyId, SupplierNumber};
pub use crate::domain::ports::{AssignmentSource, AssignmentStore, CompanyDirectory, ConfigProvider};
pub use crate::utils::error::Result;
