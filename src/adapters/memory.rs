use crate::domain::model::{Assignment, AssignmentId, Company, CompanyId, SupplierNumber};
use crate::domain::ports::{AssignmentSource, AssignmentStore, CompanyDirectory};
use crate::utils::error::{RegistryError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Plain snapshot of everything a store holds. Also the on-disk layout of
/// the JSON file store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryData {
    #[serde(default)]
    pub supplier_numbers: BTreeSet<SupplierNumber>,
    #[serde(default)]
    pub companies: Vec<Company>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

impl RegistryData {
    pub fn company_name(&self, id: CompanyId) -> Option<String> {
        self.companies
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
    }

    pub fn upsert_company(&mut self, company: Company) -> Company {
        match self.companies.iter_mut().find(|c| c.id == company.id) {
            Some(existing) => *existing = company.clone(),
            None => self.companies.push(company.clone()),
        }
        company
    }

    pub fn get_assignment(&self, id: AssignmentId) -> Option<Assignment> {
        self.assignments.iter().find(|a| a.id == Some(id)).cloned()
    }

    pub fn upsert_assignment(&mut self, mut assignment: Assignment) -> Assignment {
        let id = *assignment.id.get_or_insert_with(AssignmentId::generate);
        match self.assignments.iter_mut().find(|a| a.id == Some(id)) {
            Some(existing) => *existing = assignment.clone(),
            None => self.assignments.push(assignment.clone()),
        }
        assignment
    }

    pub fn remove_assignment(&mut self, id: AssignmentId) -> bool {
        let before = self.assignments.len();
        self.assignments.retain(|a| a.id != Some(id));
        self.assignments.len() != before
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: RwLock<RegistryData>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: RegistryData) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }

    pub fn snapshot(&self) -> Result<RegistryData> {
        Ok(self.read()?.clone())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, RegistryData>> {
        self.data.read().map_err(|_| RegistryError::StoreError {
            message: "in-memory store lock poisoned".to_string(),
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, RegistryData>> {
        self.data.write().map_err(|_| RegistryError::StoreError {
            message: "in-memory store lock poisoned".to_string(),
        })
    }
}

#[async_trait]
impl AssignmentSource for InMemoryStore {
    async fn list_all_assignments(&self) -> Result<Vec<Assignment>> {
        Ok(self.read()?.assignments.clone())
    }
}

#[async_trait]
impl CompanyDirectory for InMemoryStore {
    async fn company_name(&self, id: CompanyId) -> Result<Option<String>> {
        Ok(self.read()?.company_name(id))
    }

    async fn save_company(&self, company: Company) -> Result<Company> {
        Ok(self.write()?.upsert_company(company))
    }

    async fn list_companies(&self) -> Result<Vec<Company>> {
        Ok(self.read()?.companies.clone())
    }
}

#[async_trait]
impl AssignmentStore for InMemoryStore {
    async fn get_assignment(&self, id: AssignmentId) -> Result<Option<Assignment>> {
        Ok(self.read()?.get_assignment(id))
    }

    async fn save_assignment(&self, assignment: Assignment) -> Result<Assignment> {
        Ok(self.write()?.upsert_assignment(assignment))
    }

    async fn delete_assignment(&self, id: AssignmentId) -> Result<bool> {
        Ok(self.write()?.remove_assignment(id))
    }

    async fn supplier_numbers(&self) -> Result<Vec<SupplierNumber>> {
        Ok(self.read()?.supplier_numbers.iter().copied().collect())
    }

    async fn has_supplier_number(&self, number: SupplierNumber) -> Result<bool> {
        Ok(self.read()?.supplier_numbers.contains(&number))
    }

    async fn insert_supplier_number(&self, number: SupplierNumber) -> Result<()> {
        self.write()?.supplier_numbers.insert(number);
        Ok(())
    }
}
