use crate::core::service::AssignmentService;
use crate::domain::model::{Company, NewAssignment, SupplierNumber};
use crate::domain::ports::{AssignmentStore, CompanyDirectory};
use crate::utils::error::{ErrorCategory, RegistryError, Result};
use crate::utils::validation::validate_company_name;
use chrono::NaiveDate;
use serde::Deserialize;
use std::io::Read;

/// One line of an assignment CSV:
/// `supplier_number,company,valid_from,valid_to` with an empty `valid_to`
/// for open-ended rows.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImportRow {
    pub supplier_number: u32,
    pub company: String,
    pub valid_from: NaiveDate,
    pub valid_to: Option<NaiveDate>,
}

#[derive(Debug, Default)]
pub struct ImportReport {
    pub imported: usize,
    /// 1-based data line number and the reason it was skipped.
    pub rejected: Vec<(usize, RegistryError)>,
}

pub fn parse_rows<R: Read>(reader: R) -> Result<Vec<ImportRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for row in csv_reader.deserialize::<ImportRow>() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Feeds rows through the service one at a time, so each row is checked
/// against everything imported before it. Companies are matched by name and
/// registered only once their row has passed the slot checks.
pub async fn import_rows<S: AssignmentStore + CompanyDirectory>(
    service: &AssignmentService<S>,
    rows: Vec<ImportRow>,
) -> Result<ImportReport> {
    let mut report = ImportReport::default();

    for (index, row) in rows.into_iter().enumerate() {
        let line = index + 1;
        match import_row(service, row).await {
            Ok(()) => report.imported += 1,
            Err(e) if is_row_rejection(&e) => {
                tracing::warn!("Skipping CSV line {}: {}", line, e);
                report.rejected.push((line, e));
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!(
        "CSV import finished: {} imported, {} rejected",
        report.imported,
        report.rejected.len()
    );
    Ok(report)
}

async fn import_row<S: AssignmentStore + CompanyDirectory>(
    service: &AssignmentService<S>,
    row: ImportRow,
) -> Result<()> {
    validate_company_name(&row.company)?;
    let number = SupplierNumber::new(row.supplier_number);

    let company = match find_company(service.store(), &row.company).await? {
        Some(company) => company,
        None => {
            service
                .check_slot(number, row.valid_from, row.valid_to, None)
                .await?;
            tracing::debug!("Registering company '{}' from CSV", row.company);
            service
                .store()
                .save_company(Company::new(row.company, None))
                .await?
        }
    };

    let request = NewAssignment {
        company_id: company.id,
        supplier_number: number,
        valid_from: row.valid_from,
        valid_to: row.valid_to,
    };
    service.create(request).await?;
    Ok(())
}

fn is_row_rejection(error: &RegistryError) -> bool {
    matches!(error.category(), ErrorCategory::Domain | ErrorCategory::Input)
}

async fn find_company<D: CompanyDirectory>(directory: &D, name: &str) -> Result<Option<Company>> {
    Ok(directory
        .list_companies()
        .await?
        .into_iter()
        .find(|c| c.name == name))
}
