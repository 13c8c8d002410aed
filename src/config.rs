use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::pricing;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub aws: AwsConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwsConfig {
    /// Region the inventory queries run against. The bundled price table is
    /// only valid for ca-central-1; a different region logs a warning.
    pub region: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Default output format (csv, table, json)
    pub format: String,
    /// Skip CloudWatch traffic queries (traffic reported as zero)
    pub skip_traffic: bool,
    /// Override the per-GB egress price estimated from previous bills
    pub traffic_price_per_gb: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            aws: AwsConfig {
                region: pricing::PRICING_REGION.to_string(),
            },
            report: ReportConfig {
                format: "csv".to_string(),
                skip_traffic: false,
                traffic_price_per_gb: None,
            },
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = if let Some(p) = path {
            p.to_path_buf()
        } else {
            // Try .costctl.toml in current dir, then ~/.config/costctl/config.toml
            let local = PathBuf::from(".costctl.toml");
            if local.exists() {
                local
            } else {
                dirs::config_dir()
                    .map(|d| d.join("costctl").join("config.toml"))
                    .unwrap_or_else(|| PathBuf::from(".costctl.toml"))
            }
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
            let config: Config = toml::from_str(&content).with_context(|| {
                let mut err = format!("Failed to parse config: {}", config_path.display());
                err.push_str("\n  Common issues:");
                err.push_str("\n    - Invalid TOML syntax");
                err.push_str("\n    - Incorrect value types");
                err.push_str("\n  Tip: Run 'costctl init' to create a new config file");
                err
            })?;
            config.validate()?;
            Ok(config)
        } else {
            // Use defaults but warn if user explicitly provided a path
            if path.is_some() {
                eprintln!("WARNING: Config file not found: {}", config_path.display());
                eprintln!("   Using default configuration. Run 'costctl init' to create a config file.");
            }
            Ok(Config::default())
        }
    }

    fn validate(&self) -> std::result::Result<(), ConfigError> {
        if let Some(price) = self.report.traffic_price_per_gb {
            if !price.is_finite() || price < 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: "report.traffic_price_per_gb".to_string(),
                    reason: "must be a non-negative number".to_string(),
                });
            }
        }
        match self.report.format.as_str() {
            "csv" | "table" | "json" => Ok(()),
            other => Err(ConfigError::InvalidValue {
                field: "report.format".to_string(),
                reason: format!("{} is not one of csv, table, json", other),
            }),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}

pub fn init_config(output: &Path) -> Result<()> {
    let config = Config::default();
    config.save(output)?;
    println!("Created config file: {}", output.display());
    Ok(())
}
