use crate::domain::interval::Interval;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupplierNumber(pub u32);

impl SupplierNumber {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for SupplierNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssignmentId(pub Uuid);

impl AssignmentId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for AssignmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(pub Uuid);

impl CompanyId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Postal address and contact person of a company.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    #[serde(default)]
    pub mail: Option<String>,
    #[serde(default)]
    pub address: Address,
}

impl Company {
    pub fn new(name: impl Into<String>, mail: Option<String>) -> Self {
        Self {
            id: CompanyId::generate(),
            name: name.into(),
            mail,
            address: Address::default(),
        }
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address = address;
        self
    }

    /// Name for pick lists: `Hof Müller (Musterdorf)`, or just the name when
    /// the city is unknown.
    pub fn label(&self) -> String {
        match self.address.city.as_deref() {
            Some(city) if !city.is_empty() => format!("{} ({})", self.name, city),
            _ => self.name.clone(),
        }
    }
}

/// Binding of a supplier number to a company for a validity period.
///
/// `id` stays `None` until a store has persisted the assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    #[serde(default)]
    pub id: Option<AssignmentId>,
    pub company_id: CompanyId,
    pub supplier_number: SupplierNumber,
    pub valid_from: NaiveDate,
    #[serde(default)]
    pub valid_to: Option<NaiveDate>,
}

impl Assignment {
    pub fn new(
        company_id: CompanyId,
        supplier_number: SupplierNumber,
        valid_from: NaiveDate,
        valid_to: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: None,
            company_id,
            supplier_number,
            valid_from,
            valid_to,
        }
    }

    pub fn interval(&self) -> Interval {
        Interval {
            start: self.valid_from,
            end: self.valid_to,
        }
    }

    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.interval().contains(date)
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "unsaved".to_string());
        write!(
            f,
            "{} nr={} company={} {}",
            id,
            self.supplier_number,
            self.company_id,
            self.interval()
        )
    }
}

/// Caller-supplied fields for creating or updating an assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAssignment {
    pub company_id: CompanyId,
    pub supplier_number: SupplierNumber,
    pub valid_from: NaiveDate,
    pub valid_to: Option<NaiveDate>,
}

impl NewAssignment {
    pub fn into_assignment(self, id: Option<AssignmentId>) -> Assignment {
        Assignment {
            id,
            company_id: self.company_id,
            supplier_number: self.supplier_number,
            valid_from: self.valid_from,
            valid_to: self.valid_to,
        }
    }
}

/// A pool entry annotated with whoever holds it on the queried date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberStatus {
    pub number: SupplierNumber,
    pub holder: Option<String>,
}

impl fmt::Display for NumberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.holder {
            Some(name) => write!(f, "Nr. {} ({})", self.number, name),
            None => write!(f, "Nr. {} (free)", self.number),
        }
    }
}
