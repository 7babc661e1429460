use crate::core::engine::InvariantEngine;
use crate::domain::interval::Interval;
use crate::domain::model::{Assignment, AssignmentId, NewAssignment, SupplierNumber};
use crate::domain::ports::{AssignmentSource, AssignmentStore, CompanyDirectory};
use crate::utils::error::{RegistryError, Result};
use chrono::NaiveDate;
use tokio::sync::Mutex;

/// Create/update/delete workflow for assignments.
///
/// `create` and `update` hold `write_gate` from the overlap check until the
/// write returns, so two calls through the same service cannot both pass the
/// check. Writers that go to the store directly are not serialized.
pub struct AssignmentService<S: AssignmentStore + CompanyDirectory> {
    store: S,
    write_gate: Mutex<()>,
}

impl<S: AssignmentStore + CompanyDirectory> AssignmentService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_gate: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn engine(&self) -> InvariantEngine<'_, S, S> {
        InvariantEngine::new(&self.store, &self.store)
    }

    pub async fn create(&self, request: NewAssignment) -> Result<Assignment> {
        let _guard = self.write_gate.lock().await;
        self.ensure_acceptable(&request, None).await?;

        let saved = self.store.save_assignment(request.into_assignment(None)).await?;
        tracing::info!("Created assignment {}", saved);
        Ok(saved)
    }

    pub async fn update(&self, id: AssignmentId, request: NewAssignment) -> Result<Assignment> {
        let _guard = self.write_gate.lock().await;
        if self.store.get_assignment(id).await?.is_none() {
            return Err(RegistryError::NotFound { id });
        }
        self.ensure_acceptable(&request, Some(id)).await?;

        let saved = self
            .store
            .save_assignment(request.into_assignment(Some(id)))
            .await?;
        tracing::info!("Updated assignment {}", saved);
        Ok(saved)
    }

    /// Deleting never needs an overlap check.
    pub async fn delete(&self, id: AssignmentId) -> Result<bool> {
        let removed = self.store.delete_assignment(id).await?;
        if removed {
            tracing::info!("Deleted assignment {}", id);
        } else {
            tracing::debug!("No assignment {} to delete", id);
        }
        Ok(removed)
    }

    pub async fn get(&self, id: AssignmentId) -> Result<Option<Assignment>> {
        self.store.get_assignment(id).await
    }

    pub async fn list(&self) -> Result<Vec<Assignment>> {
        self.store.list_all_assignments().await
    }

    pub async fn list_for(&self, number: SupplierNumber) -> Result<Vec<Assignment>> {
        self.store.list_assignments_for(number).await
    }

    /// Interval, pool and overlap checks for a number without a company.
    /// Lets callers reject a request before registering anything for it.
    pub async fn check_slot(
        &self,
        number: SupplierNumber,
        valid_from: NaiveDate,
        valid_to: Option<NaiveDate>,
        exclude: Option<AssignmentId>,
    ) -> Result<()> {
        let interval = Interval::new(valid_from, valid_to)?;

        if !self.store.has_supplier_number(number).await? {
            return Err(RegistryError::UnknownSupplierNumber { number });
        }

        let overlap = self
            .engine()
            .has_overlapping_assignment(number, valid_from, valid_to, exclude)
            .await?;
        if overlap {
            tracing::warn!(
                "Rejected nr {} for {}: overlaps an existing assignment",
                number,
                interval
            );
            return Err(RegistryError::Overlap {
                supplier_number: number,
                interval,
            });
        }
        Ok(())
    }

    async fn ensure_acceptable(
        &self,
        request: &NewAssignment,
        exclude: Option<AssignmentId>,
    ) -> Result<()> {
        Interval::new(request.valid_from, request.valid_to)?;

        if !self.store.company_exists(request.company_id).await? {
            return Err(RegistryError::UnknownCompany {
                id: request.company_id,
            });
        }

        self.check_slot(
            request.supplier_number,
            request.valid_from,
            request.valid_to,
            exclude,
        )
        .await
    }
}
