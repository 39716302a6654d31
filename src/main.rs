//! Derives a relational schema from a population of facts.
//!
//! ```text
//! factloom [population.json] [--config <settings file>]
//! ```
//!
//! The population is a JSON array of fact shapes, e.g.
//! `[{"type": "factSymbol", "verb": "loves", "nouns": ["Alice", "Bob"]}]`,
//! read from stdin when no file is given. The mapping output is printed as
//! JSON, followed by the DDL for its tables.

use std::io::Read;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use factloom::rmap::Rmap;
use factloom::serialize::facts_from_json;
use factloom::settings::Settings;
use factloom::{FactloomError, Result};

fn run(arguments: Vec<String>) -> Result<()> {
    let mut population_path = None;
    let mut settings_path = None;
    let mut arguments = arguments.into_iter();
    while let Some(argument) = arguments.next() {
        if argument == "--config" {
            settings_path = Some(arguments.next().ok_or_else(|| {
                FactloomError::Config("--config needs a path".to_string())
            })?);
        } else {
            population_path = Some(argument);
        }
    }
    let settings = Settings::load(settings_path.as_deref())?;
    let json = match &population_path {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| FactloomError::Serialization(format!("{}: {}", path, e)))?,
        None => {
            let mut json = String::new();
            std::io::stdin()
                .read_to_string(&mut json)
                .map_err(|e| FactloomError::Serialization(e.to_string()))?;
            json
        }
    };
    let facts = facts_from_json(&json)?;
    info!(facts = facts.len(), source = population_path.as_deref().unwrap_or("stdin"), "population read");
    let output = Rmap::new(settings).run(&facts, &[], None);
    println!("{}", serde_json::to_string_pretty(&output)?);
    for statement in output.schema.ddl() {
        println!("{};", statement);
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    match run(std::env::args().skip(1).collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "mapping failed");
            ExitCode::FAILURE
        }
    }
}
