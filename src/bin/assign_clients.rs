//! Offline bulk assignment of clients from a CSV file.
//!
//! Usage: `assign_clients <csv> <assignee-email> [salesperson|fieldperson]`

use std::env;
use std::fs::File;

use dotenvy::dotenv;
use leadtrack::db::establish_connection_pool;
use leadtrack::domain::types::{AssigneeRole, UserEmail};
use leadtrack::forms::assign::parse_client_rows;
use leadtrack::models::config::ServerConfig;
use leadtrack::repository::{DieselRepository, UserReader};
use leadtrack::services::clients::import_clients;

struct Args {
    csv_path: String,
    assignee: UserEmail,
    role: Option<AssigneeRole>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = env::args().skip(1);
    let usage = "usage: assign_clients <csv> <assignee-email> [salesperson|fieldperson]";

    let csv_path = args.next().ok_or(usage)?;
    let assignee = args
        .next()
        .ok_or(usage)
        .and_then(|email| UserEmail::new(email).map_err(|_| "invalid assignee email"))?;
    let role = args
        .next()
        .map(|role| role.parse::<AssigneeRole>())
        .transpose()
        .map_err(|e| e.to_string())?;

    Ok(Args {
        csv_path,
        assignee,
        role,
    })
}

fn run(args: Args, server_config: &ServerConfig) -> Result<bool, String> {
    let pool = establish_connection_pool(&server_config.database_url)
        .map_err(|e| format!("Failed to establish database connection: {e}"))?;
    let repo = DieselRepository::new(pool);

    let assignee = repo
        .get_user_by_email(&args.assignee)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("No user with email {}", args.assignee))?;

    let role = match args.role {
        Some(role) => role,
        None => AssigneeRole::try_from(assignee.role).map_err(|e| e.to_string())?,
    };

    let file = File::open(&args.csv_path)
        .map_err(|e| format!("Cannot open {}: {e}", args.csv_path))?;
    let parsed = parse_client_rows(file).map_err(|e| e.to_string())?;
    if parsed.rows.is_empty() {
        return Err(format!("No valid clients in {}", args.csv_path));
    }

    let report = import_clients(&repo, assignee.id, role, parsed);
    for failed in &report.failed {
        log::warn!("{} ({}): {}", failed.name, failed.phone, failed.reason);
    }
    log::info!(
        "Assigned {} clients to {} as {role}; {} failed, {} duplicates, {} invalid",
        report.assigned,
        assignee.email,
        report.failed.len(),
        report.duplicates,
        report.invalid
    );

    Ok(report.failed.is_empty())
}

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let args = match parse_args() {
        Ok(args) => args,
        Err(err) => {
            log::error!("{err}");
            std::process::exit(2);
        }
    };

    let server_config = match ServerConfig::load() {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            std::process::exit(1);
        }
    };

    match run(args, &server_config) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    }
}
