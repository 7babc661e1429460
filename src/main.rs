use chrono::Local;
use clap::Parser;
use std::str::FromStr;
use supplier_registry::adapters::csv_import;
use supplier_registry::config::cli::{AssignmentArgs, Command, CompanyCommand};
use supplier_registry::core::pool;
use supplier_registry::core::{AssignmentStore, CompanyDirectory, ConfigProvider};
use supplier_registry::utils::logger;
use supplier_registry::utils::validation::validate_company_name;
use supplier_registry::{
    AssignmentId, AssignmentService, CliConfig, Company, CompanyId, JsonFileStore, NewAssignment,
    RegistryError, Result, Settings, SupplierNumber,
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    let settings = match Settings::resolve(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if settings.json_logs() {
        logger::init_json_logger(cli.verbose, settings.log_level.as_deref());
    } else {
        logger::init_cli_logger(cli.verbose, settings.log_level.as_deref());
    }
    tracing::debug!("Effective settings: {:?}", settings);

    if let Err(e) = run(cli.command, &settings).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        std::process::exit(e.severity().exit_code());
    }

    Ok(())
}

async fn run(command: Command, settings: &Settings) -> Result<()> {
    let store = JsonFileStore::open(settings.data_path()).await?;
    let service = AssignmentService::new(store);
    let today = Local::now().date_naive();

    match command {
        Command::Seed => {
            let inserted = pool::seed_pool(service.store(), settings.pool_size()).await?;
            println!("Seeded {} supplier number(s)", inserted.len());
        }
        Command::Company(CompanyCommand::Add {
            name,
            mail,
            address,
        }) => {
            validate_company_name(&name)?;
            let company = service
                .store()
                .save_company(Company::new(name.trim(), mail).with_address(address.into()))
                .await?;
            println!("{}  {}", company.id, company.label());
        }
        Command::Company(CompanyCommand::List) => {
            for company in service.store().list_companies().await? {
                println!(
                    "{}  {}  {}",
                    company.id,
                    company.label(),
                    company.mail.as_deref().unwrap_or("-")
                );
            }
        }
        Command::Assign(args) => {
            let request = to_request(service.store(), args).await?;
            let saved = service.create(request).await?;
            println!("✅ {}", saved);
        }
        Command::Update { id, assignment } => {
            let request = to_request(service.store(), assignment).await?;
            let saved = service.update(AssignmentId(id), request).await?;
            println!("✅ {}", saved);
        }
        Command::Unassign { id } => {
            if service.delete(AssignmentId(id)).await? {
                println!("✅ Assignment {} removed", id);
            } else {
                return Err(RegistryError::NotFound {
                    id: AssignmentId(id),
                });
            }
        }
        Command::List { number } => {
            let assignments = match number {
                Some(n) => service.list_for(SupplierNumber::new(n)).await?,
                None => service.list().await?,
            };
            for assignment in assignments {
                let name = service
                    .store()
                    .company_name(assignment.company_id)
                    .await?
                    .unwrap_or_else(|| "?".to_string());
                println!("{}  ({})", assignment, name);
            }
        }
        Command::Check {
            number,
            from,
            to,
            exclude,
        } => {
            let overlap = service
                .engine()
                .has_overlapping_assignment(
                    SupplierNumber::new(number),
                    from,
                    to,
                    exclude.map(AssignmentId),
                )
                .await?;
            if overlap {
                println!("Nr. {} is already assigned in that period", number);
            } else {
                println!("Nr. {} is free in that period", number);
            }
        }
        Command::Active { number, date } => {
            let date = date.unwrap_or(today);
            match service
                .engine()
                .get_active_assignment(SupplierNumber::new(number), date)
                .await?
            {
                Some(assignment) => println!("{}", assignment),
                None => println!("Nr. {} has no active assignment on {}", number, date),
            }
        }
        Command::Available { date } => {
            let numbers = service.store().supplier_numbers().await?;
            let statuses =
                pool::available_numbers(&service.engine(), &numbers, date.unwrap_or(today)).await?;
            for status in statuses {
                println!("{}", status);
            }
        }
        Command::Import { file } => {
            let reader = std::fs::File::open(&file)?;
            let rows = csv_import::parse_rows(reader)?;
            let report = csv_import::import_rows(&service, rows).await?;
            println!("Imported {} assignment(s)", report.imported);
            for (line, reason) in &report.rejected {
                println!("  line {}: {}", line, reason);
            }
        }
    }

    Ok(())
}

async fn to_request<D: CompanyDirectory>(directory: &D, args: AssignmentArgs) -> Result<NewAssignment> {
    let company_id = resolve_company(directory, &args.company).await?;
    Ok(NewAssignment {
        company_id,
        supplier_number: SupplierNumber::new(args.number),
        valid_from: args.from,
        valid_to: args.to,
    })
}

/// Accepts either a company UUID or an exact company name.
async fn resolve_company<D: CompanyDirectory>(directory: &D, value: &str) -> Result<CompanyId> {
    if let Ok(uuid) = Uuid::from_str(value) {
        return Ok(CompanyId(uuid));
    }

    directory
        .list_companies()
        .await?
        .into_iter()
        .find(|c| c.name == value)
        .map(|c| c.id)
        .ok_or_else(|| RegistryError::ValidationError {
            message: format!("no company named '{}'", value),
        })
}
