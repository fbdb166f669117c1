//! Per-run outcome counters and the closing summary.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunCounters {
    pub spawned_success: u64,
    pub spawned_fail: u64,
    pub catalogs_checked: u64,
    pub catalogs_returned: u64,
    pub catalogs_error: u64,
}

impl RunCounters {
    /// Rows that reached a terminal outcome. Every processed row lands in
    /// exactly one of spawned, spawn failed or catalog error.
    pub fn rows_accounted(&self) -> u64 {
        self.spawned_success + self.spawned_fail + self.catalogs_error
    }

    /// Write the end-of-run report. Failure counts log at error level when
    /// non-zero.
    pub fn log_summary(&self, total_lines: u64) {
        tracing::info!("Total Requests: {total_lines}");
        tracing::info!(
            "Request BPM Spawned Successfully: {}",
            self.spawned_success
        );
        if self.spawned_fail > 0 {
            tracing::error!("Request BPM Spawned Errors: {}", self.spawned_fail);
        } else {
            tracing::info!("Request BPM Spawned Errors: {}", self.spawned_fail);
        }
        tracing::info!("Catalog IDs Provided: {}", self.catalogs_checked);
        tracing::info!(
            "Catalog Records Returned Successfully: {}",
            self.catalogs_returned
        );
        if self.catalogs_error > 0 {
            tracing::error!("Catalog Records Errors: {}", self.catalogs_error);
        } else {
            tracing::info!("Catalog Records Errors: {}", self.catalogs_error);
        }
    }
}
