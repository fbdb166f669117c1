//! Command-line flags.
//!
//! Nothing is required at parse time; missing connection settings are
//! reported by [`crate::config::RunConfig::check_startup`].
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "bpmspawner",
    disable_version_flag = true,
    about = "Spawn BPM workflows against service-desk requests listed in a CSV",
    after_help = "CSV format: no header, two columns per line: <request reference>,<catalog id>\nThe catalog id may be empty.\n\nExamples:\n  bpmspawner --instance acme --apikey <key> --csv requests.csv\n  bpmspawner --instance acme --apikey <key> --csv requests.csv --defaultbpm com.hornbill.servicemanager/incident"
)]
pub struct Args {
    /// Instance ID, used to discover the API endpoint
    #[arg(long, value_name = "ID", env = "BPMSPAWNER_INSTANCE")]
    pub instance: Option<String>,

    /// API key sent with every call
    #[arg(long, value_name = "KEY", env = "BPMSPAWNER_APIKEY", hide_env_values = true)]
    pub apikey: Option<String>,

    /// CSV file to process
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Default BPM to use for all requests in the CSV (catalog ids are ignored)
    #[arg(long, value_name = "ID")]
    pub defaultbpm: Option<String>,

    /// XMLMC endpoint URL; skips endpoint discovery for the instance
    #[arg(long, value_name = "URL", env = "BPMSPAWNER_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Directory for the run log
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub log_dir: PathBuf,

    /// Abort when instance, apikey or csv is missing instead of warning
    #[arg(long)]
    pub strict: bool,

    /// Print the version number and exit
    #[arg(long)]
    pub version: bool,
}
