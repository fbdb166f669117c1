//! Per-row decision flow.
//!
//! Each row picks its workflow source in fixed priority order: the
//! configured default, then "server decides" when the row has no catalog id,
//! then a catalog lookup. A catalog lookup that yields nothing ends the row
//! without a spawn attempt.

use crate::catalog::resolve_catalog_workflow;
use crate::counters::RunCounters;
use crate::csv_input::Row;
use crate::logging::ROW_TARGET;
use crate::spawner::{spawn_bpm, SpawnOutcome};
use crate::xmlmc::Xmlmc;

/// Where a row's workflow id comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowSource<'a> {
    /// The process-wide default overrides the row.
    Default(&'a str),
    /// No catalog id on the row; the server applies its own policy.
    ServerDefault,
    /// Resolve through the catalog record with this id.
    Catalog(&'a str),
}

/// Terminal state of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    Spawned,
    SpawnFailed,
    CatalogUnresolved,
}

pub fn workflow_source<'a>(
    default_workflow: Option<&'a str>,
    row: &'a Row,
) -> WorkflowSource<'a> {
    match default_workflow {
        Some(default) => WorkflowSource::Default(default),
        None if row.catalog_id.is_empty() => WorkflowSource::ServerDefault,
        None => WorkflowSource::Catalog(&row.catalog_id),
    }
}

/// Drives rows through lookup and spawn against one client and keeps the
/// run's counters.
pub struct RowOrchestrator<'c, C: Xmlmc> {
    client: &'c mut C,
    default_workflow: Option<String>,
    counters: RunCounters,
}

impl<'c, C: Xmlmc> RowOrchestrator<'c, C> {
    /// An empty default is treated as no default.
    pub fn new(client: &'c mut C, default_workflow: Option<String>) -> Self {
        Self {
            client,
            default_workflow: default_workflow.filter(|id| !id.is_empty()),
            counters: RunCounters::default(),
        }
    }

    pub fn counters(&self) -> RunCounters {
        self.counters
    }

    pub fn process_row(&mut self, row: &Row) -> RowOutcome {
        tracing::debug!(
            target: ROW_TARGET,
            request_ref = %row.request_ref,
            "processing request"
        );
        let workflow_id = match workflow_source(self.default_workflow.as_deref(), row) {
            WorkflowSource::Default(default) => {
                tracing::info!(
                    target: ROW_TARGET,
                    request_ref = %row.request_ref,
                    workflow_id = default,
                    "using default BPM"
                );
                Some(default.to_string())
            }
            WorkflowSource::ServerDefault => {
                tracing::info!(
                    target: ROW_TARGET,
                    request_ref = %row.request_ref,
                    "no catalog id provided"
                );
                None
            }
            WorkflowSource::Catalog(catalog_id) => {
                self.counters.catalogs_checked += 1;
                tracing::info!(
                    target: ROW_TARGET,
                    request_ref = %row.request_ref,
                    catalog_id,
                    "retrieving BPM for catalog"
                );
                let resolved =
                    resolve_catalog_workflow(&mut *self.client, &row.request_ref, catalog_id);
                match resolved {
                    Some(resolved) => {
                        self.counters.catalogs_returned += 1;
                        Some(resolved)
                    }
                    None => {
                        self.counters.catalogs_error += 1;
                        tracing::warn!(
                            target: ROW_TARGET,
                            request_ref = %row.request_ref,
                            catalog_id,
                            "unable to retrieve catalog record"
                        );
                        return RowOutcome::CatalogUnresolved;
                    }
                }
            }
        };

        match spawn_bpm(&mut *self.client, &row.request_ref, workflow_id.as_deref()) {
            SpawnOutcome::Spawned { process_id } => {
                self.counters.spawned_success += 1;
                tracing::debug!(
                    target: ROW_TARGET,
                    request_ref = %row.request_ref,
                    process_id = %process_id,
                    "request complete"
                );
                RowOutcome::Spawned
            }
            SpawnOutcome::Failed => {
                self.counters.spawned_fail += 1;
                RowOutcome::SpawnFailed
            }
        }
    }
}
