//! `proptax` command-line front end.
//!
//! # Responsibility
//! - Seed a process-local store and run one engine operation against it.
//! - Print results as JSON on stdout; report errors on stderr.
//!
//! # Invariants
//! - Nothing is persisted; every invocation starts from its seed data.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use proptax_core::{
    core_version, default_log_level, init_logging, LoggingConfig, MunicipalityService, PageRequest,
    PropertyDraft, PropertyFilter, PropertyPatch, PropertyService, ServiceError, Store,
};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::process::ExitCode;

/// Property assessment and tax tracker.
#[derive(Parser, Debug)]
#[command(name = "proptax", version, about, long_about = None)]
struct Args {
    /// Directory holding `municipalities.csv` and `properties.csv`.
    /// The built-in demo dataset is used when omitted.
    #[arg(long, global = true, env = "PROPTAX_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true, env = "PROPTAX_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when omitted.
    #[arg(long, global = true, env = "PROPTAX_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// List properties with optional filters.
    List {
        /// Case-insensitive roll-number substring.
        #[arg(short, long)]
        search: Option<String>,
        /// Exact municipality id.
        #[arg(short, long)]
        municipality: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Show one property with its tax breakdown.
    Show { roll_number: String },
    /// Create a property.
    Create {
        roll_number: String,
        assessment_value: Decimal,
        municipality: String,
    },
    /// Update the value and/or municipality of a property.
    Update {
        roll_number: String,
        #[arg(long)]
        value: Option<Decimal>,
        #[arg(long)]
        municipality: Option<String>,
    },
    /// Delete a property and print the remaining listing.
    Delete { roll_number: String },
    /// Print dashboard totals.
    Dashboard,
    /// List municipalities.
    Municipalities,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(service_err) = err.downcast_ref::<ServiceError>() {
                warn!(
                    "event=command module=cli status=error error_code={} error={}",
                    service_err.code(),
                    service_err
                );
                eprintln!("error ({}): {service_err}", service_err.http_status());
                for (field, message) in service_err.field_errors() {
                    eprintln!("  {field}: {message}");
                }
            } else {
                eprintln!("error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    if let Some(log_dir) = &args.log_dir {
        let level = args.log_level.as_deref().unwrap_or(default_log_level());
        let config = LoggingConfig::new(level, log_dir)?;
        init_logging(&config)?;
    }
    info!(
        "event=cli_start module=cli status=ok version={}",
        core_version()
    );

    let store = match &args.data_dir {
        Some(dir) => Store::open_dir(dir)
            .with_context(|| format!("failed to seed store from `{}`", dir.display()))?,
        None => Store::open_demo()?,
    };
    let output = execute(&store, args.command)?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    store.dispose();
    Ok(())
}

fn execute(store: &Store, command: Command) -> Result<Value> {
    let properties = PropertyService::for_store(store);

    let value = match command {
        Command::List {
            search,
            municipality,
            page,
            page_size,
        } => {
            let filter = PropertyFilter {
                search_text: search,
                municipality_id: municipality,
            };
            let request = PageRequest {
                page_number: page,
                page_size,
            };
            serde_json::to_value(properties.list_properties(&filter, &request)?)?
        }
        Command::Show { roll_number } => {
            serde_json::to_value(properties.get_property_detail(&roll_number)?)?
        }
        Command::Create {
            roll_number,
            assessment_value,
            municipality,
        } => serde_json::to_value(properties.create_property(PropertyDraft {
            roll_number,
            assessment_value,
            municipality_id: municipality,
        })?)?,
        Command::Update {
            roll_number,
            value,
            municipality,
        } => {
            let patch = PropertyPatch {
                assessment_value: value,
                municipality_id: municipality,
            };
            serde_json::to_value(properties.update_property(&roll_number, &patch)?)?
        }
        Command::Delete { roll_number } => {
            properties.delete_property(&roll_number)?;
            let remaining =
                properties.list_properties(&PropertyFilter::default(), &PageRequest::default())?;
            json!({ "deleted": roll_number, "remaining": remaining })
        }
        Command::Dashboard => serde_json::to_value(properties.dashboard()?)?,
        Command::Municipalities => {
            serde_json::to_value(MunicipalityService::for_store(store).list_municipalities())?
        }
    };

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::{execute, Command};
    use proptax_core::{ServiceError, Store};

    #[test]
    fn delete_prints_deleted_roll_and_remaining_listing() {
        let store = Store::open_demo().unwrap();
        let output = execute(
            &store,
            Command::Delete {
                roll_number: "P001".to_string(),
            },
        )
        .unwrap();

        assert_eq!(output["deleted"], "P001");
        assert_eq!(output["remaining"]["total_count"], 11);
        assert_eq!(output["remaining"]["items"][0]["roll_number"], "P002");
    }

    #[test]
    fn delete_of_missing_roll_surfaces_not_found() {
        let store = Store::open_demo().unwrap();
        let err = execute(
            &store,
            Command::Delete {
                roll_number: "P999".to_string(),
            },
        )
        .unwrap_err();

        let service_err = err.downcast_ref::<ServiceError>().unwrap();
        assert_eq!(service_err.http_status(), 404);
    }
}
