//! SmartLog command-line entry point.
//!
//! ## CLI Subcommands
//!
//! - `smartlog config show [--json]` - Effective configuration
//! - `smartlog config defaults` - Built-in defaults
//! - `smartlog config validate` - Check for suspicious settings (exit 0/1)
//! - `smartlog version` - Print version

use std::process::ExitCode;

use smartlog::cli;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match command {
        "config" => {
            let subcommand = args.get(2).map(|s| s.as_str()).unwrap_or("show");
            let code = match subcommand {
                "show" => {
                    let json_output = args.get(3).map(|s| s.as_str()) == Some("--json");
                    cli::run_show(json_output)
                }
                "defaults" => cli::run_defaults(),
                "validate" => cli::run_validate(),
                _ => {
                    eprintln!("Unknown config subcommand: {}", subcommand);
                    print_usage();
                    1
                }
            };
            ExitCode::from(code as u8)
        }
        "help" | "--help" | "-h" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "version" | "--version" | "-V" => {
            println!("smartlog {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    println!("smartlog {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("USAGE:");
    println!("    smartlog <COMMAND>");
    println!();
    println!("COMMANDS:");
    println!("    config show [--json]   Print the effective configuration");
    println!("    config defaults        Print built-in defaults");
    println!("    config validate        Check configuration (exit 1 on warnings)");
    println!("    version                Print version");
    println!("    help                   Print this message");
    println!();
    println!("Configuration is read from SMARTLOG_* environment variables and the");
    println!("TOML file named by SMARTLOG_CONFIG.");
}
