//! Shared helpers for driving the built binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Scratch directory holding CSV inputs and the run log.
pub struct Workspace {
    pub dir: TempDir,
}

/// Outcome of one binary invocation plus the run log it produced.
#[derive(Debug)]
pub struct RunOutput {
    pub output: Output,
    pub log: Option<String>,
}

impl RunOutput {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn log_text(&self) -> &str {
        self.log.as_deref().expect("run log was written")
    }
}

impl Workspace {
    pub fn temp() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn write_csv(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("write csv");
        path
    }

    pub fn log_dir(&self) -> PathBuf {
        self.dir.path().join("logs")
    }

    /// Run the binary with a clean environment and this workspace's log dir.
    pub fn run(&self, args: &[&str]) -> RunOutput {
        let log_dir = self.log_dir();
        let output = Command::new(env!("CARGO_BIN_EXE_bpmspawner"))
            .args(args)
            .arg("--log-dir")
            .arg(&log_dir)
            .env_remove("BPMSPAWNER_INSTANCE")
            .env_remove("BPMSPAWNER_APIKEY")
            .env_remove("BPMSPAWNER_ENDPOINT")
            .env_remove("RUST_LOG")
            .output()
            .expect("run bpmspawner");
        RunOutput {
            output,
            log: read_run_log(&log_dir),
        }
    }
}

fn read_run_log(log_dir: &Path) -> Option<String> {
    let entries = std::fs::read_dir(log_dir).ok()?;
    let mut logs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("bpmspawner_") && name.ends_with(".log"))
        })
        .collect();
    logs.sort();
    let last = logs.pop()?;
    std::fs::read_to_string(last).ok()
}
