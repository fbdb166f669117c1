use crate::config::RunConfig;
use crate::counters::RunCounters;
use crate::csv_input::{count_lines, open_rows, Row};
use crate::orchestrator::RowOrchestrator;
use crate::progress::Progress;
use crate::xmlmc::{Xmlmc, XmlmcClient};
use anyhow::Result;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the whole batch.
///
/// An unreadable or empty CSV ends the run early but is not an error for the
/// caller; only a strict-mode configuration failure is.
pub fn run(config: &RunConfig) -> Result<()> {
    tracing::info!("Hornbill Service Manager BPM Spawner v{VERSION}");
    config.check_startup()?;

    tracing::info!("Instance: {}", config.instance_id);
    let Some(csv_path) = config.csv_path.as_deref() else {
        tracing::error!("no CSV file to process");
        return Ok(());
    };
    tracing::info!("CSV File: {}", csv_path.display());

    let total = match count_lines(csv_path) {
        Ok(total) => total,
        Err(err) => {
            tracing::error!(
                "error retrieving line count of CSV [{}]: {err:#}",
                csv_path.display()
            );
            return Ok(());
        }
    };
    if total == 0 {
        tracing::error!("zero rows found in CSV [{}]", csv_path.display());
        return Ok(());
    }
    tracing::info!("{total} rows found in [{}]", csv_path.display());

    let rows = match open_rows(csv_path) {
        Ok(rows) => rows,
        Err(err) => {
            tracing::error!("{err:#}");
            return Ok(());
        }
    };

    let mut client = match config.endpoint.as_deref() {
        Some(endpoint) => {
            XmlmcClient::with_endpoint(endpoint, &config.instance_id, &config.api_key)
        }
        None => XmlmcClient::discover(&config.instance_id, &config.api_key),
    };

    let counters = process_rows(
        &mut client,
        config.default_workflow_id.clone(),
        rows,
        total,
    );
    tracing::info!("rows processed: {}", counters.rows_accounted());
    counters.log_summary(total);
    Ok(())
}

/// Feed rows one at a time through a fresh orchestrator.
pub fn process_rows<C: Xmlmc>(
    client: &mut C,
    default_workflow: Option<String>,
    rows: impl IntoIterator<Item = Row>,
    total: u64,
) -> RunCounters {
    let mut orchestrator = RowOrchestrator::new(client, default_workflow);
    let mut progress = Progress::start(total);
    for row in rows {
        orchestrator.process_row(&row);
        progress.increment();
    }
    progress.finish();
    orchestrator.counters()
}
