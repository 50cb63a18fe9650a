use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{JobField, RecordId};
use crate::pipeline::PipelineReport;
use crate::results::actions::{clear_all, handle_row_action, save_selected};
use crate::results::{SelectionEvent, SortDirection};
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortRequest {
    pub field_name: String,
    pub sort_direction: SortDirection,
}

#[derive(Deserialize)]
pub struct RowActionRequest {
    pub action: String,
    pub row: RecordId,
}

/// GET /api/v1/jobs
pub async fn handle_get_jobs(State(state): State<AppState>) -> Response {
    let table = state.results.lock().await;
    Json(table.view()).into_response()
}

/// POST /api/v1/jobs/refresh
pub async fn handle_refresh(State(state): State<AppState>) -> Result<Response, AppError> {
    let mut table = state.results.lock().await;
    table.refresh(state.platform.jobs.as_ref()).await?;
    Ok(Json(table.view()).into_response())
}

/// POST /api/v1/jobs/sort
pub async fn handle_sort(
    State(state): State<AppState>,
    Json(req): Json<SortRequest>,
) -> Result<Response, AppError> {
    let field = req
        .field_name
        .parse::<JobField>()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let mut table = state.results.lock().await;
    table.sort(field, req.sort_direction);
    Ok(Json(table.view()).into_response())
}

/// POST /api/v1/jobs/selection
pub async fn handle_selection(
    State(state): State<AppState>,
    Json(event): Json<SelectionEvent>,
) -> Response {
    let mut table = state.results.lock().await;
    table.selection.apply(event);
    Json(table.view()).into_response()
}

/// POST /api/v1/jobs/row-action
pub async fn handle_row_action_request(
    State(state): State<AppState>,
    Json(req): Json<RowActionRequest>,
) -> Result<Json<PipelineReport>, AppError> {
    let mut table = state.results.lock().await;
    if table.find_row(&req.row).is_none() {
        return Err(AppError::NotFound(format!("Job {} not found", req.row)));
    }
    let report = handle_row_action(&mut table, &state.platform, &req.action, req.row).await;
    Ok(Json(report))
}

/// POST /api/v1/jobs/save-selected
pub async fn handle_save_selected(State(state): State<AppState>) -> Json<PipelineReport> {
    let mut table = state.results.lock().await;
    Json(save_selected(&mut table, &state.platform).await)
}

/// DELETE /api/v1/jobs
pub async fn handle_clear_all(State(state): State<AppState>) -> Json<PipelineReport> {
    let mut table = state.results.lock().await;
    Json(clear_all(&mut table, &state.platform).await)
}
