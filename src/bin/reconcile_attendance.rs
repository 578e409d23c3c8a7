//! CLI tool to reconcile attendance directly against the database.
//!
//! Usage:
//!   cargo run --bin reconcile-attendance -- --org <uuid> [--employee <uuid>] [--date 2026-10-17]

use std::env;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use trackpro_lib::config::Config;
use trackpro_lib::db::DbPool;
use trackpro_lib::services::attendance::AttendanceDeriver;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    let mut org: Option<String> = None;
    let mut employee: Option<String> = None;
    let mut date: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--org" | "-o" => {
                i += 1;
                if i < args.len() {
                    org = Some(args[i].clone());
                }
            }
            "--employee" | "-e" => {
                i += 1;
                if i < args.len() {
                    employee = Some(args[i].clone());
                }
            }
            "--date" | "-d" => {
                i += 1;
                if i < args.len() {
                    date = Some(args[i].clone());
                }
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let organization_id = match org.as_deref().map(Uuid::parse_str) {
        Some(Ok(id)) => id,
        Some(Err(e)) => {
            eprintln!("Error: invalid --org: {}", e);
            std::process::exit(1);
        }
        None => {
            eprintln!("Error: --org is required");
            print_usage();
            std::process::exit(1);
        }
    };

    let employee_id = match employee.as_deref().map(Uuid::parse_str) {
        Some(Ok(id)) => Some(id),
        Some(Err(e)) => {
            eprintln!("Error: invalid --employee: {}", e);
            std::process::exit(1);
        }
        None => None,
    };

    let date = match date.as_deref() {
        Some(s) => match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            Ok(d) => d,
            Err(e) => {
                eprintln!("Error: invalid --date (expected YYYY-MM-DD): {}", e);
                std::process::exit(1);
            }
        },
        None => Utc::now().date_naive(),
    };

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    let pool = match DbPool::new(&config).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = pool.run_migrations().await {
        eprintln!("Error: Failed to run migrations: {}", e);
        std::process::exit(1);
    }

    let deriver = AttendanceDeriver::new(&pool, &config.attendance.default_leave_type);
    let summary = match deriver
        .reconcile_batch(organization_id, employee_id, date)
        .await
    {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: Reconciliation failed: {}", e);
            std::process::exit(1);
        }
    };

    println!();
    println!("Attendance reconciled for {}", date);
    println!();
    println!("  Processed:          {}", summary.processed);
    println!("  Present:            {}", summary.present);
    println!("  Half day:           {}", summary.half_day);
    println!("  Absent:             {}", summary.absent);
    println!("  Leave:              {}", summary.leave);
    println!("  New leave requests: {}", summary.new_leave_requests);
    println!("  Failed:             {}", summary.failed);

    if !summary.errors.is_empty() {
        println!();
        for failure in &summary.errors {
            match failure.employee_id {
                Some(id) => println!("  ✗ {}: {}", id, failure.message),
                None => println!("  ✗ {}", failure.message),
            }
        }
        std::process::exit(1);
    }
    println!();
}

fn print_usage() {
    eprintln!();
    eprintln!(
        "Usage: reconcile-attendance --org <uuid> [--employee <uuid>] [--date <YYYY-MM-DD>]"
    );
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --org, -o       Organization to reconcile (required)");
    eprintln!("  --employee, -e  Reconcile a single employee (default: all active)");
    eprintln!("  --date, -d      Day to reconcile (default: today, UTC)");
    eprintln!("  --help, -h      Show this help");
    eprintln!();
}
