use crate::domain::model::{Assignment, AssignmentId, Company, CompanyId, SupplierNumber};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read access to persisted assignments.
#[async_trait]
pub trait AssignmentSource: Send + Sync {
    async fn list_all_assignments(&self) -> Result<Vec<Assignment>>;

    async fn list_assignments_for(&self, number: SupplierNumber) -> Result<Vec<Assignment>> {
        let all = self.list_all_assignments().await?;
        Ok(all
            .into_iter()
            .filter(|a| a.supplier_number == number)
            .collect())
    }
}

#[async_trait]
pub trait CompanyDirectory: Send + Sync {
    /// Display name for a company, `None` if the id is unknown.
    async fn company_name(&self, id: CompanyId) -> Result<Option<String>>;

    async fn company_exists(&self, id: CompanyId) -> Result<bool> {
        Ok(self.company_name(id).await?.is_some())
    }

    async fn save_company(&self, company: Company) -> Result<Company>;

    async fn list_companies(&self) -> Result<Vec<Company>>;
}

#[async_trait]
pub trait AssignmentStore: AssignmentSource {
    async fn get_assignment(&self, id: AssignmentId) -> Result<Option<Assignment>>;

    /// Inserts when `id` is `None` (a fresh id is generated), replaces otherwise.
    async fn save_assignment(&self, assignment: Assignment) -> Result<Assignment>;

    /// Returns whether anything was removed.
    async fn delete_assignment(&self, id: AssignmentId) -> Result<bool>;

    async fn supplier_numbers(&self) -> Result<Vec<SupplierNumber>>;

    async fn has_supplier_number(&self, number: SupplierNumber) -> Result<bool> {
        Ok(self.supplier_numbers().await?.contains(&number))
    }

    async fn insert_supplier_number(&self, number: SupplierNumber) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn data_path(&self) -> &str;
    fn pool_size(&self) -> u32;
    fn json_logs(&self) -> bool;
}
