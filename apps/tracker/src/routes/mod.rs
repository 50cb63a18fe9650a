pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::calculator::handlers as take_home;
use crate::results::handlers as jobs;
use crate::search::handlers as search;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Job search form
        .route(
            "/api/v1/search",
            get(search::handle_get_search)
                .patch(search::handle_form_change)
                .post(search::handle_search),
        )
        // Results table
        .route(
            "/api/v1/jobs",
            get(jobs::handle_get_jobs).delete(jobs::handle_clear_all),
        )
        .route("/api/v1/jobs/refresh", post(jobs::handle_refresh))
        .route("/api/v1/jobs/sort", post(jobs::handle_sort))
        .route("/api/v1/jobs/selection", post(jobs::handle_selection))
        .route("/api/v1/jobs/row-action", post(jobs::handle_row_action_request))
        .route("/api/v1/jobs/save-selected", post(jobs::handle_save_selected))
        // Take-home pay calculator
        .route(
            "/api/v1/take-home",
            get(take_home::handle_get_calculator).patch(take_home::handle_salary_edit),
        )
        .route(
            "/api/v1/take-home/calculate",
            post(take_home::handle_calculate),
        )
        .route("/api/v1/take-home/reset", post(take_home::handle_reset))
        .with_state(state)
}
