use anyhow::Result;
use chrono::NaiveDate;
use std::sync::Arc;
use supplier_registry::core::pool::{available_numbers, seed_pool};
use supplier_registry::core::CompanyDirectory;
use supplier_registry::{
    AssignmentId, AssignmentService, Company, CompanyId, InMemoryStore, NewAssignment,
    RegistryError, SupplierNumber,
};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn request(company: CompanyId, n: u32, from: &str, to: Option<&str>) -> NewAssignment {
    NewAssignment {
        company_id: company,
        supplier_number: SupplierNumber::new(n),
        valid_from: d(from),
        valid_to: to.map(d),
    }
}

async fn seeded_service() -> Result<(AssignmentService<InMemoryStore>, Company, Company)> {
    let store = InMemoryStore::new();
    seed_pool(&store, 10).await?;
    let mueller = store.save_company(Company::new("Hof Müller", None)).await?;
    let huber = store.save_company(Company::new("Biofarm Huber", None)).await?;
    Ok((AssignmentService::new(store), mueller, huber))
}

#[tokio::test]
async fn test_create_assigns_id_and_rejects_overlap() -> Result<()> {
    let (service, mueller, huber) = seeded_service().await?;

    let saved = service
        .create(request(mueller.id, 1, "2025-01-01", Some("2025-12-31")))
        .await?;
    assert!(saved.id.is_some());

    let clash = service
        .create(request(huber.id, 1, "2025-12-31", None))
        .await;
    match clash {
        Err(RegistryError::Overlap {
            supplier_number, ..
        }) => assert_eq!(supplier_number, SupplierNumber::new(1)),
        other => panic!("expected overlap, got {:?}", other),
    }

    service.create(request(huber.id, 1, "2026-01-01", None)).await?;
    assert_eq!(service.list_for(SupplierNumber::new(1)).await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_second_open_ended_assignment_is_rejected() -> Result<()> {
    let (service, mueller, huber) = seeded_service().await?;

    service.create(request(mueller.id, 4, "2025-01-01", None)).await?;
    let result = service.create(request(huber.id, 4, "2030-01-01", None)).await;
    assert!(matches!(result, Err(RegistryError::Overlap { .. })));
    Ok(())
}

#[tokio::test]
async fn test_update_does_not_collide_with_itself() -> Result<()> {
    let (service, mueller, huber) = seeded_service().await?;

    let first = service
        .create(request(mueller.id, 2, "2025-01-01", Some("2025-06-30")))
        .await?;
    let id = first.id.expect("saved assignment has an id");

    let extended = service
        .update(id, request(mueller.id, 2, "2025-01-01", Some("2025-09-30")))
        .await?;
    assert_eq!(extended.id, Some(id));
    assert_eq!(extended.valid_to, Some(d("2025-09-30")));

    service
        .create(request(huber.id, 2, "2025-10-01", None))
        .await?;
    let into_huber = service
        .update(id, request(mueller.id, 2, "2025-01-01", Some("2025-10-01")))
        .await;
    assert!(matches!(into_huber, Err(RegistryError::Overlap { .. })));

    let unchanged = service.get(id).await?.expect("still stored");
    assert_eq!(unchanged.valid_to, Some(d("2025-09-30")));
    Ok(())
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() -> Result<()> {
    let (service, mueller, _) = seeded_service().await?;

    let result = service
        .update(AssignmentId::generate(), request(mueller.id, 1, "2025-01-01", None))
        .await;
    assert!(matches!(result, Err(RegistryError::NotFound { .. })));
    Ok(())
}

#[tokio::test]
async fn test_rejects_invalid_requests() -> Result<()> {
    let (service, mueller, _) = seeded_service().await?;

    let reversed = service
        .create(request(mueller.id, 1, "2025-02-01", Some("2025-01-01")))
        .await;
    assert!(matches!(reversed, Err(RegistryError::InvalidInterval { .. })));

    let stranger = service
        .create(request(CompanyId::generate(), 1, "2025-01-01", None))
        .await;
    assert!(matches!(stranger, Err(RegistryError::UnknownCompany { .. })));

    let outside_pool = service.create(request(mueller.id, 11, "2025-01-01", None)).await;
    assert!(matches!(
        outside_pool,
        Err(RegistryError::UnknownSupplierNumber { .. })
    ));

    assert!(service.list().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_delete_frees_the_number() -> Result<()> {
    let (service, mueller, huber) = seeded_service().await?;

    let saved = service.create(request(mueller.id, 3, "2025-01-01", None)).await?;
    let id = saved.id.expect("saved assignment has an id");

    assert!(service.delete(id).await?);
    assert!(!service.delete(id).await?);
    service.create(request(huber.id, 3, "2025-01-01", None)).await?;
    Ok(())
}

#[tokio::test]
async fn test_concurrent_creates_only_one_wins() -> Result<()> {
    let (service, mueller, huber) = seeded_service().await?;
    let service = Arc::new(service);

    let a = {
        let service = Arc::clone(&service);
        tokio::spawn(async move {
            service
                .create(request(mueller.id, 5, "2025-01-01", Some("2025-12-31")))
                .await
        })
    };
    let b = {
        let service = Arc::clone(&service);
        tokio::spawn(async move {
            service
                .create(request(huber.id, 5, "2025-06-01", None))
                .await
        })
    };

    let results = [a.await?, b.await?];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(service.list_for(SupplierNumber::new(5)).await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_seed_is_idempotent_and_available_numbers() -> Result<()> {
    let (service, mueller, _) = seeded_service().await?;

    assert!(seed_pool(service.store(), 10).await?.is_empty());
    let extra = seed_pool(service.store(), 12).await?;
    assert_eq!(extra, vec![SupplierNumber::new(11), SupplierNumber::new(12)]);

    service.create(request(mueller.id, 3, "2025-01-01", None)).await?;
    let pool = vec![SupplierNumber::new(4), SupplierNumber::new(3)];
    let statuses = available_numbers(&service.engine(), &pool, d("2025-05-05")).await?;

    let rendered: Vec<String> = statuses.iter().map(|s| s.to_string()).collect();
    assert_eq!(rendered, vec!["Nr. 3 (Hof Müller)", "Nr. 4 (free)"]);
    Ok(())
}
