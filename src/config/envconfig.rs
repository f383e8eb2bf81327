use std::path::PathBuf;

use ::config as config_rs;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Raw `KEY=value` pairs standing in for the process environment.
pub type EnvVars = config_rs::Map<String, String>;

/// Settings read from `APP_<SECTION>__<KEY>` variables, e.g.
/// `APP_DATABASE__URL` lands in `database.url`.
pub trait EnvConfig: Sized + DeserializeOwned {
    const PREFIX: &'static str = "APP";
    const SEPARATOR: &'static str = "__";

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn from_env() -> Result<Self> {
        Self::from_vars(None)
    }

    /// `None` reads the process environment.
    fn from_vars(vars: Option<EnvVars>) -> Result<Self> {
        let environment = config_rs::Environment::with_prefix(Self::PREFIX)
            .prefix_separator("_")
            .separator(Self::SEPARATOR)
            .try_parsing(true)
            .source(vars);

        let cfg = config_rs::Config::builder()
            .add_source(environment)
            .build()
            .context("failed to read APP_* variables")?
            .try_deserialize::<Self>()
            .context("failed to deserialize APP_* variables into config")?;

        cfg.validate()?;
        Ok(cfg)
    }
}

/// Result of looking for a `.env` file in the launch directory (or one of
/// its parents). Loaded before tracing is up, reported after.
#[derive(Debug)]
pub enum Dotenv {
    Loaded(PathBuf),
    Missing,
    Unreadable(dotenvy::Error),
}

impl Dotenv {
    pub fn load() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => Self::Loaded(path),
            Err(err) if err.not_found() => Self::Missing,
            Err(err) => Self::Unreadable(err),
        }
    }

    pub fn log(&self) {
        match self {
            Self::Loaded(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            Self::Missing => tracing::debug!("no .env file found, using process environment"),
            Self::Unreadable(err) => tracing::warn!(error = %err, "ignoring unreadable .env"),
        }
    }
}
