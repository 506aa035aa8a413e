use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_INDICATORS_PATH: &str = "SDG_attributes_ANEXO.xlsx";
pub const DEFAULT_SCORES_PATH: &str = "BASE.csv";
pub const DEFAULT_LOG_FILE: &str = "sdg_port_radar.log";
pub const DEFAULT_PORTS: [&str; 6] = ["Port A", "Port B", "Port C", "Port D", "Port E", "Port F"];

/// Locations of the input files and the port columns to read from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub indicators_path: PathBuf,
    pub scores_path: PathBuf,
    pub ports: Vec<String>,
    pub log_file: PathBuf,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    /// Builds the configuration from a key lookup, falling back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let indicators_path = lookup("INDICATORS_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_INDICATORS_PATH), PathBuf::from);
        let scores_path =
            lookup("SCORES_PATH").map_or_else(|| PathBuf::from(DEFAULT_SCORES_PATH), PathBuf::from);
        let log_file =
            lookup("LOG_FILE").map_or_else(|| PathBuf::from(DEFAULT_LOG_FILE), PathBuf::from);

        let ports = lookup("PORTS")
            .map(|raw| parse_ports(&raw))
            .filter(|ports| !ports.is_empty())
            .unwrap_or_else(default_ports);

        let debug = lookup("DEBUG").is_some_and(|value| {
            matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes")
        });

        Self {
            indicators_path,
            scores_path,
            ports,
            log_file,
            debug,
        }
    }
}

/// Initializes the application configuration from `.env` and the process environment
pub fn init_app_config() -> AppConfig {
    // Load environment variables from .env file
    dotenv().ok();

    AppConfig::from_lookup(|key| env::var(key).ok().filter(|value| !value.trim().is_empty()))
}

pub fn default_ports() -> Vec<String> {
    DEFAULT_PORTS.iter().map(ToString::to_string).collect()
}

/// Splits a comma-separated port list, dropping blanks and duplicates
pub fn parse_ports(raw: &str) -> Vec<String> {
    let mut ports: Vec<String> = Vec::new();
    for port in raw.split(',').map(str::trim).filter(|port| !port.is_empty()) {
        if !ports.iter().any(|known| known == port) {
            ports.push(port.to_string());
        }
    }
    ports
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_apply_without_environment() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.indicators_path, PathBuf::from(DEFAULT_INDICATORS_PATH));
        assert_eq!(config.scores_path, PathBuf::from(DEFAULT_SCORES_PATH));
        assert_eq!(config.ports.len(), 6);
        assert_eq!(config.ports[0], "Port A");
        assert!(!config.debug);
    }

    #[test]
    fn lookup_overrides_paths_and_ports() {
        let values: HashMap<&str, &str> = [
            ("SCORES_PATH", "data/scores.csv"),
            ("PORTS", "Itaqui, Santos ,Itaqui,,Suape"),
            ("DEBUG", "1"),
        ]
        .into_iter()
        .collect();

        let config = AppConfig::from_lookup(|key| values.get(key).map(ToString::to_string));
        assert_eq!(config.scores_path, PathBuf::from("data/scores.csv"));
        assert_eq!(config.ports, vec!["Itaqui", "Santos", "Suape"]);
        assert!(config.debug);
    }

    #[test]
    fn blank_port_list_keeps_defaults() {
        let config = AppConfig::from_lookup(|key| (key == "PORTS").then(|| " , ".to_string()));
        assert_eq!(config.ports, default_ports());
    }
}
