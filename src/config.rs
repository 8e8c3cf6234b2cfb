use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;
use crate::parser::DEFAULT_DELIMITER;

const CONFIG_FILE: &str = "curator";
const ENV_PREFIX: &str = "CURATOR";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Block-start literal in search payloads.
    pub delimiter: String,
    pub db_path: PathBuf,
    /// Searches shown by `history` when no count is given.
    pub history_limit: usize,
    pub export_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            delimiter: DEFAULT_DELIMITER.to_string(),
            db_path: PathBuf::from("data/curator.sqlite"),
            history_limit: 10,
            export_path: PathBuf::from("coleccion_articulos.md"),
        }
    }
}

impl Settings {
    /// Defaults, then an optional `curator.toml`, then `CURATOR_*` variables.
    pub fn load() -> Result<Self> {
        Self::build(
            Config::builder().add_source(File::with_name(CONFIG_FILE).required(false)),
            Environment::with_prefix(ENV_PREFIX),
        )
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        env: Environment,
    ) -> Result<Self> {
        let d = Settings::default();
        let settings = builder
            .set_default("delimiter", d.delimiter)?
            .set_default("db_path", d.db_path.to_string_lossy().into_owned())?
            .set_default("history_limit", d.history_limit as u64)?
            .set_default("export_path", d.export_path.to_string_lossy().into_owned())?
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}
