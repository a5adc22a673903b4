//! Client-side settings for catalog queries and paging.
//!
//! Settings are layered: compiled-in defaults, then an optional JSON file,
//! then environment variables.

use crate::{
    env::{ENV_CASE_INSENSITIVE, ENV_COMPUTE_TOTALS, ENV_HOME_ZONE, ENV_MAX_ROWS, EnvSource},
    error::ConfigError,
};
use model::pagination::descriptor::PagingStyle;
use planner::query::ast::options::QueryOptions;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, str::FromStr};
use tracing::{debug, info, warn};

pub const DEFAULT_MAX_ROWS: usize = 5000;
pub const DEFAULT_HOME_ZONE: &str = "tempZone";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ClientSettings {
    /// Rows requested per batch; also the listing page size.
    pub max_rows: usize,

    /// Zone of the connected server. Paths in other zones are routed there.
    pub home_zone: String,

    pub paging_style: PagingStyle,

    /// Ask the server to compute the total row count on listing queries.
    pub compute_total_row_count: bool,

    pub case_insensitive_where: bool,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_MAX_ROWS,
            home_zone: DEFAULT_HOME_ZONE.to_string(),
            paging_style: PagingStyle::default(),
            compute_total_row_count: true,
            case_insensitive_where: false,
        }
    }
}

impl ClientSettings {
    /// Loads defaults, overlays `path` when given, then `env`, and validates
    /// the result.
    pub fn load(path: Option<&Path>, env: &EnvSource) -> Result<Self, ConfigError> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply_env(env)?;
        settings.validate()?;

        info!(
            max_rows = settings.max_rows,
            home_zone = %settings.home_zone,
            compute_totals = settings.compute_total_row_count,
            "Client settings loaded"
        );
        Ok(settings)
    }

    /// Reads a JSON settings file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!("Reading client settings from {}", path.display());
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn apply_env(&mut self, env: &EnvSource) -> Result<(), ConfigError> {
        if let Some(rows) = parse_env::<usize>(env, ENV_MAX_ROWS)? {
            self.max_rows = rows;
        }
        if let Some(zone) = env.get(ENV_HOME_ZONE) {
            self.home_zone = zone.trim().to_string();
        }
        if let Some(flag) = parse_env_flag(env, ENV_COMPUTE_TOTALS)? {
            self.compute_total_row_count = flag;
        }
        if let Some(flag) = parse_env_flag(env, ENV_CASE_INSENSITIVE)? {
            self.case_insensitive_where = flag;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_rows == 0 {
            return Err(ConfigError::Invalid(
                "max_rows must be greater than zero".to_string(),
            ));
        }
        if self.home_zone.trim().is_empty() {
            return Err(ConfigError::Invalid("home_zone must not be empty".to_string()));
        }
        if self.home_zone.contains('/') {
            return Err(ConfigError::Invalid(format!(
                "home_zone '{}' must not contain '/'",
                self.home_zone
            )));
        }
        if self.max_rows > 100_000 {
            warn!(
                "max_rows {} is very large, servers usually cap batches lower",
                self.max_rows
            );
        }
        Ok(())
    }

    /// Options applied to every listing query.
    pub fn query_options(&self) -> QueryOptions {
        let mut options = QueryOptions::empty();
        if self.compute_total_row_count {
            options |= QueryOptions::RETURN_TOTAL_ROW_COUNT;
        }
        if self.case_insensitive_where {
            options |= QueryOptions::UPPER_CASE_WHERE;
        }
        options
    }
}

fn parse_env<T: FromStr>(env: &EnvSource, key: &str) -> Result<Option<T>, ConfigError> {
    env.get(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|_| ConfigError::InvalidEnvValue {
                key: key.to_string(),
                value: raw.to_string(),
            })
        })
        .transpose()
}

fn parse_env_flag(env: &EnvSource, key: &str) -> Result<Option<bool>, ConfigError> {
    env.get(key)
        .map(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidEnvValue {
                key: key.to_string(),
                value: raw.to_string(),
            }),
        })
        .transpose()
}
