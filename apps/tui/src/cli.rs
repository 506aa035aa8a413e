use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "sdg_port_radar", version, about = "SDG port indicator dashboard")]
pub struct CliArgs {
    /// Print the selected views and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the indicator spreadsheet path
    #[arg(long, value_name = "PATH")]
    pub indicators: Option<String>,

    /// Override the port score table path
    #[arg(long, value_name = "PATH")]
    pub scores: Option<String>,

    /// Comma-separated port columns
    #[arg(long, value_name = "LIST")]
    pub ports: Option<String>,

    /// SDG category of the attributes table (headless)
    #[arg(long, value_name = "NAME")]
    pub category: Option<String>,

    /// SDG theme of the radar views (headless)
    #[arg(long, value_name = "NAME")]
    pub theme: Option<String>,

    /// Area filter, "ALL" for every area (headless)
    #[arg(long, value_name = "NAME")]
    pub area: Option<String>,

    /// Port compared against the average (headless)
    #[arg(long, value_name = "NAME")]
    pub port: Option<String>,

    /// Radar frame, "polygon" or "circle" (headless)
    #[arg(long, value_name = "SHAPE")]
    pub frame: Option<String>,

    /// Write the HTML table and SVG radars into this directory
    #[arg(long, value_name = "DIR")]
    pub export: Option<PathBuf>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(path) = &self.indicators {
            std::env::set_var("INDICATORS_PATH", path);
        }
        if let Some(path) = &self.scores {
            std::env::set_var("SCORES_PATH", path);
        }
        if let Some(ports) = &self.ports {
            std::env::set_var("PORTS", ports);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    /// Any flag that only makes sense without the terminal UI
    pub const fn wants_headless(&self) -> bool {
        self.headless || self.json || self.export.is_some()
    }
}
