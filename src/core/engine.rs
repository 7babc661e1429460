use crate::core::invariant;
use crate::domain::interval::Interval;
use crate::domain::model::{Assignment, AssignmentId, SupplierNumber};
use crate::domain::ports::{AssignmentSource, CompanyDirectory};
use crate::utils::error::Result;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Answers overlap and point-in-time questions against whatever the source
/// currently holds. Holds no state of its own; source and directory errors
/// are returned as-is.
pub struct InvariantEngine<'a, S: AssignmentSource, D: CompanyDirectory> {
    source: &'a S,
    directory: &'a D,
}

impl<'a, S: AssignmentSource, D: CompanyDirectory> InvariantEngine<'a, S, D> {
    pub fn new(source: &'a S, directory: &'a D) -> Self {
        Self { source, directory }
    }

    /// Fails with `InvalidInterval` when `valid_to` is before `valid_from`;
    /// otherwise reports whether the candidate collides with any other
    /// assignment of the same number.
    pub async fn has_overlapping_assignment(
        &self,
        number: SupplierNumber,
        valid_from: NaiveDate,
        valid_to: Option<NaiveDate>,
        exclude: Option<AssignmentId>,
    ) -> Result<bool> {
        let candidate = Interval::new(valid_from, valid_to)?;
        let existing = self.source.list_assignments_for(number).await?;

        let overlap = invariant::has_overlapping_assignment(&existing, number, &candidate, exclude);
        tracing::debug!(
            "Overlap check for nr {} {} (excluding {:?}) against {} assignment(s): {}",
            number,
            candidate,
            exclude,
            existing.len(),
            overlap
        );
        Ok(overlap)
    }

    pub async fn get_active_assignment(
        &self,
        number: SupplierNumber,
        date: NaiveDate,
    ) -> Result<Option<Assignment>> {
        let existing = self.source.list_assignments_for(number).await?;
        Ok(invariant::find_active_assignment(&existing, number, date).cloned())
    }

    /// Display names of every number held on `date`.
    pub async fn get_active_supplier_names(
        &self,
        date: NaiveDate,
    ) -> Result<BTreeMap<SupplierNumber, String>> {
        let all = self.source.list_all_assignments().await?;
        let holders = invariant::active_holders(&all, date);

        let mut names = BTreeMap::new();
        for (number, company_id) in holders {
            match self.directory.company_name(company_id).await? {
                Some(name) => {
                    names.insert(number, name);
                }
                None => tracing::warn!(
                    "Assignment for nr {} references unknown company {}",
                    number,
                    company_id
                ),
            }
        }
        Ok(names)
    }
}
