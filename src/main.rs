//! Route table command-line tool.
//!
//! Loads a TOML route file and checks it, lists its compiled routes,
//! resolves a path, or renders a path for a target. Results are printed
//! as JSON on stdout; logs go to stderr.
//!
//! ```text
//! route-template --config routes.toml check
//! route-template --config routes.toml list
//! route-template --config routes.toml resolve /item/42
//! route-template --config routes.toml render items.show id=42
//! ```

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use indexmap::IndexMap;
use serde_json::json;

use route_template::config::{load_config, ConfigError, RouteTableConfig};
use route_template::observability::init_logging;
use route_template::{RouteTable, Value, ValueTypeRegistry};

#[derive(Parser)]
#[command(name = "route-template")]
#[command(about = "Compile, inspect and exercise URL route tables", long_about = None)]
struct Cli {
    /// Route file (TOML)
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the route file
    Check,
    /// List routes in priority order with their compiled form
    List,
    /// Resolve a path to a target and typed parameters
    Resolve { path: String },
    /// Render a path for a target from NAME=VALUE pairs
    Render {
        target: String,
        #[arg(value_parser = parse_assignment)]
        values: Vec<(String, String)>,
    },
}

fn parse_assignment(arg: &str) -> Result<(String, String), String> {
    arg.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected NAME=VALUE, got `{arg}`"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(ConfigError::Validation(errors)) => {
            for error in &errors {
                eprintln!("error: {error}");
            }
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config.observability) {
        eprintln!("warning: logging not initialized: {e}");
    }

    match run(cli.command, &config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Runs a command; `Ok(false)` means it completed without a result.
fn run(command: Commands, config: &RouteTableConfig) -> Result<bool, Box<dyn Error>> {
    let registry = ValueTypeRegistry::default();
    let table = RouteTable::from_config(config, &registry)?;

    match command {
        Commands::Check => {
            print_json(&json!({ "valid": true, "routes": table.len() }))?;
            Ok(true)
        }
        Commands::List => {
            let routes: Vec<_> = table
                .snapshot()
                .iter()
                .enumerate()
                .map(|(index, route)| {
                    let params: Vec<_> = route
                        .pattern()
                        .param_names()
                        .map(|name| {
                            let binding = route.binding(name);
                            json!({
                                "name": name,
                                "type": binding.map(|b| b.value_type().name()),
                                "format": binding.and_then(|b| b.options().format.as_deref()),
                                "constraint": route.pattern().constraint(name),
                            })
                        })
                        .collect();
                    json!({
                        "index": index,
                        "template": route.template(),
                        "target": route.target(),
                        "regex": route.pattern().regex_source(),
                        "engine": route.pattern().engine_name(),
                        "params": params,
                    })
                })
                .collect();
            print_json(&json!(routes))?;
            Ok(true)
        }
        Commands::Resolve { path } => match table.resolve(&path) {
            Some(hit) => {
                print_json(&json!({
                    "matched": true,
                    "target": hit.target(),
                    "template": hit.route.template(),
                    "params": hit.params,
                    "raw": hit.raw,
                }))?;
                Ok(true)
            }
            None => {
                print_json(&json!({ "matched": false, "path": path }))?;
                Ok(false)
            }
        },
        Commands::Render { target, values } => {
            let snapshot = table.snapshot();
            let Some(route) = snapshot.iter().find(|r| *r.target() == target) else {
                return Err(format!("no route for target `{target}`").into());
            };

            let mut typed: IndexMap<String, Value> = IndexMap::with_capacity(values.len());
            for (name, raw) in values {
                let value = match route.binding(&name) {
                    Some(binding) => binding
                        .parse(&raw)
                        .map_err(|e| format!("parameter `{name}`: {e}"))?,
                    None => Value::from(raw),
                };
                typed.insert(name, value);
            }

            let path = table.url_for(&target, &typed)?;
            print_json(&json!({ "target": target, "path": path }))?;
            Ok(true)
        }
    }
}

fn print_json(value: &serde_json::Value) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
