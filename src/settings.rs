//! Settings for the relational mapping.
//!
//! Values are layered: built-in defaults, then an optional settings file,
//! then `FACTLOOM_*` environment variables. Library callers that never load
//! anything get [`Settings::default`], which equals the built-in defaults.

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

pub const DEFAULT_SETTINGS_FILE: &str = "factloom";
pub const ENVIRONMENT_PREFIX: &str = "FACTLOOM";

/// How a unary fact is to be interpreted.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorldAssumption {
    /// Absence of the fact says nothing.
    Open,
    /// Absence of the fact means it does not hold.
    Closed,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Settings {
    /// Verbs whose facts are references rather than information.
    pub reference_predicates: Vec<String>,
    pub unary_world: WorldAssumption,
    /// Appended to a thing's name to name its key column.
    pub key_suffix: String,
    /// Key column of tables made for independent objects.
    pub independent_key: String,
    /// Timestamp column of tables made for independent objects.
    pub independent_timestamp: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reference_predicates: vec![
                "identifies".to_string(),
                "references".to_string(),
                "refers_to".to_string(),
            ],
            unary_world: WorldAssumption::Open,
            key_suffix: "_id".to_string(),
            independent_key: "id".to_string(),
            independent_timestamp: "created_at".to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from `path` (any format `config` understands, extension
    /// optional) or from `factloom.*` in the working directory when no path
    /// is given. A missing file is not an error.
    pub fn load(path: Option<&str>) -> Result<Settings> {
        Settings::load_with(path, Settings::environment())
    }
    /// The `FACTLOOM_*` environment layer. List values are comma separated.
    pub fn environment() -> Environment {
        Environment::with_prefix(ENVIRONMENT_PREFIX)
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("reference_predicates")
    }
    /// As [`Settings::load`], with `environment` as the top layer.
    pub fn load_with(path: Option<&str>, environment: Environment) -> Result<Settings> {
        let defaults = Settings::default();
        let file = path.unwrap_or(DEFAULT_SETTINGS_FILE);
        let settings = Config::builder()
            .set_default("reference_predicates", defaults.reference_predicates.clone())?
            .set_default("unary_world", "open")?
            .set_default("key_suffix", defaults.key_suffix.clone())?
            .set_default("independent_key", defaults.independent_key.clone())?
            .set_default("independent_timestamp", defaults.independent_timestamp.clone())?
            .add_source(File::with_name(file).required(path.is_some()))
            .add_source(environment)
            .build()?
            .try_deserialize::<Settings>()?;
        debug!(file, ?settings, "settings loaded");
        Ok(settings)
    }
    pub fn is_reference(&self, verb: &str) -> bool {
        self.reference_predicates.iter().any(|p| p == verb)
    }
}
