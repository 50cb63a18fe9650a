use chrono::NaiveDate;
use tracing::info;

use crate::notify::Toast;
use crate::pipeline::{PipelineReport, ERROR_REFRESHING, ERROR_SEARCHING};
use crate::platform::Platform;
use crate::results::ResultsTable;
use crate::search::form::SearchForm;

/// Validates the form, submits the job-board search, then refreshes the
/// result set. The refresh runs even when the search call failed.
pub async fn run_search(
    form: &SearchForm,
    table: &mut ResultsTable,
    platform: &Platform,
    today: NaiveDate,
) -> PipelineReport {
    if let Err(toast) = form.validate(today) {
        return PipelineReport::rejected(toast);
    }

    let request = form.to_request(today);
    info!(
        "Submitting job search: keywords={:?} location={:?} radius_km={:.2} since={}",
        request.keywords, request.location, request.radius_km, request.posted_since
    );

    let mut report = PipelineReport::new();

    if report
        .step(
            "submit_search",
            ERROR_SEARCHING,
            platform.job_board.submit_search(&request),
        )
        .await
        .is_some()
    {
        report.notify(Toast::success(
            "Success",
            "If you see no results, change your job search filters and try again",
        ));
    }

    report
        .step("refresh", ERROR_REFRESHING, table.refresh(platform.jobs.as_ref()))
        .await;

    report
}
