use crate::domain::interval::Interval;
use crate::domain::model::{AssignmentId, CompanyId, SupplierNumber};
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Invalid interval: end {end} is before start {start}")]
    InvalidInterval { start: NaiveDate, end: NaiveDate },

    #[error("Supplier number {supplier_number} is already assigned within {interval}")]
    Overlap {
        supplier_number: SupplierNumber,
        interval: Interval,
    },

    #[error("Assignment not found for id: {id}")]
    NotFound { id: AssignmentId },

    #[error("Unknown company: {id}")]
    UnknownCompany { id: CompanyId },

    #[error("Supplier number {number} is not part of the pool")]
    UnknownSupplierNumber { number: SupplierNumber },

    #[error("Store error: {message}")]
    StoreError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Domain,
    Storage,
    Configuration,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for a command that failed with this severity.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl RegistryError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RegistryError::InvalidInterval { .. }
            | RegistryError::Overlap { .. }
            | RegistryError::NotFound { .. }
            | RegistryError::UnknownCompany { .. }
            | RegistryError::UnknownSupplierNumber { .. } => ErrorCategory::Domain,
            RegistryError::StoreError { .. }
            | RegistryError::IoError(_)
            | RegistryError::SerializationError(_) => ErrorCategory::Storage,
            RegistryError::ConfigError { .. } | RegistryError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            RegistryError::CsvError(_) | RegistryError::ValidationError { .. } => {
                ErrorCategory::Input
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Domain => ErrorSeverity::Medium,
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RegistryError::InvalidInterval { .. } => "Make sure valid_to is on or after valid_from",
            RegistryError::Overlap { .. } => {
                "Pick another supplier number or adjust the validity period"
            }
            RegistryError::NotFound { .. } => "List assignments to look up an existing id",
            RegistryError::UnknownCompany { .. } => "Register the company before assigning a number",
            RegistryError::UnknownSupplierNumber { .. } => {
                "Seed the pool or raise the pool size in the configuration"
            }
            RegistryError::StoreError { .. }
            | RegistryError::IoError(_)
            | RegistryError::SerializationError(_) => {
                "Check that the data file exists, is readable and holds valid JSON"
            }
            RegistryError::CsvError(_) => {
                "Check the CSV header: supplier_number,company,valid_from,valid_to"
            }
            RegistryError::ConfigError { .. } | RegistryError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command line flags"
            }
            RegistryError::ValidationError { .. } => "Correct the input and try again",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RegistryError::Overlap {
                supplier_number, ..
            } => format!(
                "Supplier number {} is already assigned in the selected period.",
                supplier_number
            ),
            RegistryError::IoError(e) => format!("Could not access the data file: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
