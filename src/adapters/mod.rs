// Adapters layer: concrete collaborators for the ports in `domain::ports`.

pub mod csv_import;
pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::{InMemoryStore, RegistryData};
