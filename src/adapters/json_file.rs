use crate::adapters::memory::RegistryData;
use crate::domain::model::{Assignment, AssignmentId, Company, CompanyId, SupplierNumber};
use crate::domain::ports::{AssignmentSource, AssignmentStore, CompanyDirectory};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Store backed by a single JSON document. Every write rewrites the file
/// through a temporary sibling and a rename; the in-memory copy only changes
/// once the file is written.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    data: Mutex<RegistryData>,
}

impl JsonFileStore {
    /// Opens `path`, starting empty when the file does not exist yet.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let data = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No data file at {}, starting empty", path.display());
                RegistryData::default()
            }
            Err(e) => return Err(e.into()),
        };
        tracing::debug!("Opened data file {}", path.display());

        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, data: &RegistryData) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_vec_pretty(data)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl AssignmentSource for JsonFileStore {
    async fn list_all_assignments(&self) -> Result<Vec<Assignment>> {
        Ok(self.data.lock().await.assignments.clone())
    }
}

#[async_trait]
impl CompanyDirectory for JsonFileStore {
    async fn company_name(&self, id: CompanyId) -> Result<Option<String>> {
        Ok(self.data.lock().await.company_name(id))
    }

    async fn save_company(&self, company: Company) -> Result<Company> {
        let mut data = self.data.lock().await;
        let mut next = data.clone();
        let saved = next.upsert_company(company);
        self.persist(&next).await?;
        *data = next;
        Ok(saved)
    }

    async fn list_companies(&self) -> Result<Vec<Company>> {
        Ok(self.data.lock().await.companies.clone())
    }
}

#[async_trait]
impl AssignmentStore for JsonFileStore {
    async fn get_assignment(&self, id: AssignmentId) -> Result<Option<Assignment>> {
        Ok(self.data.lock().await.get_assignment(id))
    }

    async fn save_assignment(&self, assignment: Assignment) -> Result<Assignment> {
        let mut data = self.data.lock().await;
        let mut next = data.clone();
        let saved = next.upsert_assignment(assignment);
        self.persist(&next).await?;
        *data = next;
        Ok(saved)
    }

    async fn delete_assignment(&self, id: AssignmentId) -> Result<bool> {
        let mut data = self.data.lock().await;
        let mut next = data.clone();
        let removed = next.remove_assignment(id);
        if removed {
            self.persist(&next).await?;
            *data = next;
        }
        Ok(removed)
    }

    async fn supplier_numbers(&self) -> Result<Vec<SupplierNumber>> {
        Ok(self.data.lock().await.supplier_numbers.iter().copied().collect())
    }

    async fn has_supplier_number(&self, number: SupplierNumber) -> Result<bool> {
        Ok(self.data.lock().await.supplier_numbers.contains(&number))
    }

    async fn insert_supplier_number(&self, number: SupplierNumber) -> Result<()> {
        let mut data = self.data.lock().await;
        let mut next = data.clone();
        if next.supplier_numbers.insert(number) {
            self.persist(&next).await?;
            *data = next;
        }
        Ok(())
    }
}
