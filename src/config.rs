use crate::cli::Args;
use anyhow::{anyhow, Result};
use std::path::PathBuf;

/// Settings for one run, fixed after startup.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub instance_id: String,
    pub api_key: String,
    pub csv_path: Option<PathBuf>,
    pub default_workflow_id: Option<String>,
    pub endpoint: Option<String>,
    pub log_dir: PathBuf,
    pub strict: bool,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl RunConfig {
    pub fn from_args(args: Args) -> Self {
        Self {
            instance_id: non_empty(args.instance).unwrap_or_default(),
            api_key: non_empty(args.apikey).unwrap_or_default(),
            csv_path: args.csv.filter(|path| !path.as_os_str().is_empty()),
            default_workflow_id: non_empty(args.defaultbpm),
            endpoint: non_empty(args.endpoint),
            log_dir: args.log_dir,
            strict: args.strict,
        }
    }

    /// Names of the connection settings that were not provided. The
    /// instance is not needed when an explicit endpoint is configured.
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_key.is_empty() {
            missing.push("apikey");
        }
        if self.instance_id.is_empty() && self.endpoint.is_none() {
            missing.push("instance");
        }
        if self.csv_path.is_none() {
            missing.push("csv");
        }
        missing
    }

    /// Report missing settings. Lenient runs only warn and carry on (later
    /// steps fail on their own); strict runs stop here.
    pub fn check_startup(&self) -> Result<()> {
        let missing = self.missing_settings();
        for name in &missing {
            tracing::warn!("{name} parameter not provided");
        }
        if self.strict && !missing.is_empty() {
            return Err(anyhow!(
                "missing required parameters: {}",
                missing.join(", ")
            ));
        }
        Ok(())
    }
}
