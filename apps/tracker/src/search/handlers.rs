use axum::{extract::State, Json};
use chrono::{Local, NaiveDate};

use crate::pipeline::PipelineReport;
use crate::search::form::SearchFormView;
use crate::search::{run_search, FormChange};
use crate::state::AppState;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// GET /api/v1/search
pub async fn handle_get_search(State(state): State<AppState>) -> Json<SearchFormView> {
    let form = state.search.lock().await;
    Json(form.view(today()))
}

/// PATCH /api/v1/search
pub async fn handle_form_change(
    State(state): State<AppState>,
    Json(change): Json<FormChange>,
) -> Json<SearchFormView> {
    let mut form = state.search.lock().await;
    form.apply(change);
    Json(form.view(today()))
}

/// POST /api/v1/search
pub async fn handle_search(State(state): State<AppState>) -> Json<PipelineReport> {
    let form = state.search.lock().await;
    let mut table = state.results.lock().await;
    let report = run_search(&form, &mut table, &state.platform, today()).await;
    Json(report)
}
