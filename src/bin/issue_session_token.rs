//! CLI tool to mint a session token with the configured secret.
//!
//! Usage:
//!   cargo run --bin issue-session-token -- --employee <uuid> --org <uuid> --role manager

use std::env;

use uuid::Uuid;

use trackpro_lib::auth::SessionVerifier;
use trackpro_lib::config::Config;
use trackpro_lib::models::Role;

fn main() {
    dotenvy::dotenv().ok();

    let args: Vec<String> = env::args().collect();

    let mut employee: Option<String> = None;
    let mut org: Option<String> = None;
    let mut role = "employee".to_string();
    let mut ttl = "3600".to_string();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--employee" | "-e" => {
                i += 1;
                if i < args.len() {
                    employee = Some(args[i].clone());
                }
            }
            "--org" | "-o" => {
                i += 1;
                if i < args.len() {
                    org = Some(args[i].clone());
                }
            }
            "--role" | "-r" => {
                i += 1;
                if i < args.len() {
                    role = args[i].clone();
                }
            }
            "--ttl" | "-t" => {
                i += 1;
                if i < args.len() {
                    ttl = args[i].clone();
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

    let employee_id = parse_uuid_arg("--employee", employee);
    let organization_id = parse_uuid_arg("--org", org);

    let role = match Role::parse(&role) {
        Some(r) => r,
        None => {
            eprintln!(
                "Error: Invalid role '{}'. Must be admin, manager, or employee",
                role
            );
            std::process::exit(1);
        }
    };

    let ttl_secs: u64 = match ttl.parse() {
        Ok(t) if t > 0 => t,
        _ => {
            eprintln!("Error: --ttl must be a positive number of seconds");
            std::process::exit(1);
        }
    };

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    let verifier = SessionVerifier::new(&config.session);
    match verifier.issue(employee_id, organization_id, role, ttl_secs) {
        Ok(token) => println!("{}", token),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn parse_uuid_arg(flag: &str, value: Option<String>) -> Uuid {
    match value.as_deref().map(Uuid::parse_str) {
        Some(Ok(id)) => id,
        Some(Err(e)) => {
            eprintln!("Error: invalid {}: {}", flag, e);
            std::process::exit(1);
        }
        None => {
            eprintln!("Error: {} is required", flag);
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!();
    eprintln!(
        "Usage: issue-session-token --employee <uuid> --org <uuid> [--role <role>] [--ttl <secs>]"
    );
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --employee, -e  Employee the token is issued to (required)");
    eprintln!("  --org, -o       Organization of the employee (required)");
    eprintln!("  --role, -r      Role: admin, manager, employee (default: employee)");
    eprintln!("  --ttl, -t       Lifetime in seconds (default: 3600)");
    eprintln!("  --help, -h      Show this help");
    eprintln!();
}
