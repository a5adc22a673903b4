use std::collections::HashMap;

pub const ENV_MAX_ROWS: &str = "CATALOG_MAX_ROWS";
pub const ENV_HOME_ZONE: &str = "CATALOG_HOME_ZONE";
pub const ENV_COMPUTE_TOTALS: &str = "CATALOG_COMPUTE_TOTALS";
pub const ENV_CASE_INSENSITIVE: &str = "CATALOG_CASE_INSENSITIVE";

/// A snapshot of environment variables. Settings read through this instead of
/// `std::env` so tests can supply their own values.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    vars: HashMap<String, String>,
}

impl EnvSource {
    /// Captures the current process environment.
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }
}

impl From<HashMap<String, String>> for EnvSource {
    fn from(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }
}
