use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::dashboard::constants::{DEBUG_MODE, DEFAULT_BIND_ADDR, DEFAULT_DATA_FILE, SHEET_NAME};
use crate::error::{DashboardError, Result};

/// Config file read from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.toml";

/// Runtime settings: defaults, then config file, then environment.
///
/// Command line flags are applied on top by the binary.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_file: PathBuf,
    pub sheet: String,
    pub bind_addr: String,
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            sheet: SHEET_NAME.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            debug: DEBUG_MODE,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    data_file: Option<PathBuf>,
    sheet: Option<String>,
    bind_addr: Option<String>,
    debug: Option<bool>,
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Settings {
    fn apply_file(&mut self, file: FileConfig) {
        if let Some(v) = file.data_file {
            self.data_file = v;
        }
        if let Some(v) = file.sheet {
            self.sheet = v;
        }
        if let Some(v) = file.bind_addr {
            self.bind_addr = v;
        }
        if let Some(v) = file.debug {
            self.debug = v;
        }
    }

    /// Apply `FOOD_DASHBOARD_*` variables read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("FOOD_DASHBOARD_DATA_FILE") {
            self.data_file = PathBuf::from(v);
        }
        if let Some(v) = lookup("FOOD_DASHBOARD_SHEET") {
            self.sheet = v;
        }
        if let Some(v) = lookup("FOOD_DASHBOARD_BIND") {
            self.bind_addr = v;
        }
        if let Some(v) = lookup("FOOD_DASHBOARD_DEBUG") {
            match parse_bool(&v) {
                Some(debug) => self.debug = debug,
                None => warn!(value = %v, "ignoring FOOD_DASHBOARD_DEBUG"),
            }
        }
    }
}

/// Load settings from `config_path` (or `dashboard.toml` if present) and
/// the environment.
///
/// An explicitly named config file must exist; the default one is optional.
pub fn load_settings(config_path: Option<&Path>) -> Result<Settings> {
    let mut settings = Settings::default();
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    match fs::read_to_string(&path) {
        Ok(raw) => settings.apply_file(toml::from_str(&raw)?),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            if config_path.is_some() {
                return Err(DashboardError::ResourceNotFound(path.display().to_string()));
            }
        }
        Err(e) => return Err(e.into()),
    }

    settings.apply_env(|key| std::env::var(key).ok());
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.data_file, PathBuf::from("foodinfo.xlsx"));
        assert_eq!(settings.sheet, "FoodList");
        assert_eq!(settings.bind_addr, "127.0.0.1:8050");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "data_file = \"data/food.xlsx\"\ndebug = false").unwrap();

        let settings = load_settings(Some(file.path())).unwrap();
        assert_eq!(settings.data_file, PathBuf::from("data/food.xlsx"));
        assert!(!settings.debug);
        assert_eq!(settings.sheet, "FoodList");
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "port = 80").unwrap();
        assert!(matches!(
            load_settings(Some(file.path())),
            Err(DashboardError::Config(_))
        ));
    }

    #[test]
    fn test_missing_explicit_config_fails() {
        let err = load_settings(Some(Path::new("no/such/dashboard.toml"))).unwrap_err();
        assert!(matches!(err, DashboardError::ResourceNotFound(_)));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("FOOD_DASHBOARD_SHEET", "Sheet2"),
            ("FOOD_DASHBOARD_BIND", "0.0.0.0:9000"),
            ("FOOD_DASHBOARD_DEBUG", "off"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        settings.apply_env(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(settings.sheet, "Sheet2");
        assert_eq!(settings.bind_addr, "0.0.0.0:9000");
        assert!(!settings.debug);
        assert_eq!(settings.data_file, PathBuf::from("foodinfo.xlsx"));
    }

    #[test]
    fn test_invalid_debug_value_is_ignored() {
        let mut settings = Settings::default();
        settings.apply_env(|key| (key == "FOOD_DASHBOARD_DEBUG").then(|| "maybe".to_string()));
        assert_eq!(settings.debug, DEBUG_MODE);
    }
}
