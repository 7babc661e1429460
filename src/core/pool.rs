use crate::core::engine::InvariantEngine;
use crate::domain::model::{NumberStatus, SupplierNumber};
use crate::domain::ports::{AssignmentSource, AssignmentStore, CompanyDirectory};
use crate::utils::error::Result;
use chrono::NaiveDate;

pub const DEFAULT_POOL_SIZE: u32 = 10;

/// Makes sure numbers `1..=size` exist. Returns only the ones that were
/// missing, so running it again is a no-op.
pub async fn seed_pool<S: AssignmentStore>(store: &S, size: u32) -> Result<Vec<SupplierNumber>> {
    let mut inserted = Vec::new();
    for value in 1..=size {
        let number = SupplierNumber::new(value);
        if !store.has_supplier_number(number).await? {
            store.insert_supplier_number(number).await?;
            inserted.push(number);
        }
    }

    if inserted.is_empty() {
        tracing::debug!("Supplier number pool already holds 1..={}", size);
    } else {
        tracing::info!("Seeded {} supplier number(s)", inserted.len());
    }
    Ok(inserted)
}

/// Pool annotated with the holder of each number on `date`.
pub async fn available_numbers<S: AssignmentSource, D: CompanyDirectory>(
    engine: &InvariantEngine<'_, S, D>,
    pool: &[SupplierNumber],
    date: NaiveDate,
) -> Result<Vec<NumberStatus>> {
    let mut names = engine.get_active_supplier_names(date).await?;
    let mut numbers = pool.to_vec();
    numbers.sort();

    Ok(numbers
        .into_iter()
        .map(|number| NumberStatus {
            number,
            holder: names.remove(&number),
        })
        .collect())
}
