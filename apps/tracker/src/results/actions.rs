//! Save-and-remove and clear-all pipelines of the results table.
//!
//! Every step is isolated: a failed upsert does not stop the delete, and the
//! refresh always runs last.

use tracing::{debug, info};

use crate::models::RecordId;
use crate::notify::Toast;
use crate::pipeline::{PipelineReport, ERROR_DELETING, ERROR_REFRESHING, ERROR_UPSERTING};
use crate::platform::Platform;
use crate::results::columns::SAVE_ACTION;
use crate::results::table::ResultsTable;

/// Dispatches a row action from the table's action menu. Unknown actions
/// are ignored.
pub async fn handle_row_action(
    table: &mut ResultsTable,
    platform: &Platform,
    action: &str,
    row: RecordId,
) -> PipelineReport {
    match action {
        SAVE_ACTION => save_row(table, platform, row).await,
        other => {
            debug!("Ignoring unknown row action '{other}'");
            PipelineReport::new()
        }
    }
}

/// Saves one row as a job application, removes it from the job list and refreshes.
pub async fn save_row(
    table: &mut ResultsTable,
    platform: &Platform,
    row: RecordId,
) -> PipelineReport {
    info!("Saving job {row} as job application");
    let ids = [row];
    let mut report = PipelineReport::new();

    if report
        .step(
            "upsert_job_applications",
            ERROR_UPSERTING,
            platform.applications.upsert_job_applications(&ids),
        )
        .await
        .is_some()
    {
        report.notify(Toast::success("Success", "Job Application saved"));
    }

    report
        .step("delete_jobs", ERROR_DELETING, platform.jobs.delete_jobs(&ids))
        .await;

    report
        .step("refresh", ERROR_REFRESHING, table.refresh(platform.jobs.as_ref()))
        .await;

    report
}

/// Saves every selected row. The selection is cleared only once the delete succeeded.
pub async fn save_selected(table: &mut ResultsTable, platform: &Platform) -> PipelineReport {
    if table.selection.is_empty() {
        return PipelineReport::rejected(Toast::error(
            "No job selected",
            "Select at least one job to save as job application",
        ));
    }

    let ids = table.selection.ids().to_vec();
    info!("Saving {} selected jobs as job applications", ids.len());
    let mut report = PipelineReport::new();

    if report
        .step(
            "upsert_job_applications",
            ERROR_UPSERTING,
            platform.applications.upsert_job_applications(&ids),
        )
        .await
        .is_some()
    {
        report.notify(Toast::success("Success", "Job Applications saved"));
    }

    if report
        .step("delete_jobs", ERROR_DELETING, platform.jobs.delete_jobs(&ids))
        .await
        .is_some()
    {
        table.selection.deselect_all();
    }

    report
        .step("refresh", ERROR_REFRESHING, table.refresh(platform.jobs.as_ref()))
        .await;

    report
}

/// Deletes every job record and refreshes.
pub async fn clear_all(table: &mut ResultsTable, platform: &Platform) -> PipelineReport {
    info!("Clearing all job results");
    let mut report = PipelineReport::new();

    if report
        .step(
            "delete_all_jobs",
            ERROR_DELETING,
            platform.jobs.delete_all_jobs(),
        )
        .await
        .is_some()
    {
        report.notify(Toast::success("Success", "All results cleared"));
    }

    report
        .step("refresh", ERROR_REFRESHING, table.refresh(platform.jobs.as_ref()))
        .await;

    report
}
