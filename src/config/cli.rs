use crate::domain::model::Address;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

#[derive(Debug, Clone, Parser)]
#[command(name = "supplier-registry")]
#[command(about = "Assigns supplier numbers to companies without overlapping validity periods")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Overrides storage.data_path
    #[arg(long)]
    pub data: Option<String>,

    /// Overrides pool.size
    #[arg(long)]
    pub pool_size: Option<u32>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create missing supplier numbers 1..=pool size
    Seed,
    /// Manage companies
    #[command(subcommand)]
    Company(CompanyCommand),
    /// Bind a supplier number to a company
    Assign(AssignmentArgs),
    /// Change an existing assignment
    Update {
        #[arg(long)]
        id: Uuid,
        #[command(flatten)]
        assignment: AssignmentArgs,
    },
    /// Remove an assignment
    Unassign {
        #[arg(long)]
        id: Uuid,
    },
    /// List assignments
    List {
        #[arg(long)]
        number: Option<u32>,
    },
    /// Report whether a period collides with an existing assignment
    Check {
        #[arg(long)]
        number: u32,
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: Option<NaiveDate>,
        #[arg(long)]
        exclude: Option<Uuid>,
    },
    /// Show who holds a number on a date (default: today)
    Active {
        #[arg(long)]
        number: u32,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List the pool with the current holder of each number
    Available {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Import assignments from a CSV file
    Import { file: String },
}

#[derive(Debug, Clone, Subcommand)]
pub enum CompanyCommand {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        mail: Option<String>,
        #[command(flatten)]
        address: AddressArgs,
    },
    List,
}

#[derive(Debug, Clone, Args)]
pub struct AddressArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub street: Option<String>,
    #[arg(long)]
    pub zip: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
}

impl From<AddressArgs> for Address {
    fn from(args: AddressArgs) -> Self {
        Address {
            first_name: args.first_name,
            last_name: args.last_name,
            street: args.street,
            zip: args.zip,
            city: args.city,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct AssignmentArgs {
    #[arg(long)]
    pub number: u32,
    /// Company id or exact company name
    #[arg(long)]
    pub company: String,
    #[arg(long)]
    pub from: NaiveDate,
    /// Leave out for an open-ended assignment
    #[arg(long)]
    pub to: Option<NaiveDate>,
}
