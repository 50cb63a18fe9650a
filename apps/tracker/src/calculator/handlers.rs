use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::calculator::workflow::CalculatorView;
use crate::calculator::Submission;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SalaryEdit {
    pub salary: String,
}

#[derive(Serialize)]
pub struct CalculationResponse {
    pub submission: Submission,
    pub calculator: CalculatorView,
}

/// GET /api/v1/take-home
pub async fn handle_get_calculator(State(state): State<AppState>) -> Json<CalculatorView> {
    let calculator = state.calculator.lock().await;
    Json(calculator.view())
}

/// PATCH /api/v1/take-home
pub async fn handle_salary_edit(
    State(state): State<AppState>,
    Json(req): Json<SalaryEdit>,
) -> Json<CalculatorView> {
    let mut calculator = state.calculator.lock().await;
    calculator.edit_salary(req.salary);
    Json(calculator.view())
}

/// POST /api/v1/take-home/calculate
pub async fn handle_calculate(State(state): State<AppState>) -> Json<CalculationResponse> {
    let mut calculator = state.calculator.lock().await;
    let submission = calculator.submit(state.platform.taxes.as_ref()).await;
    Json(CalculationResponse {
        submission,
        calculator: calculator.view(),
    })
}

/// POST /api/v1/take-home/reset
pub async fn handle_reset(State(state): State<AppState>) -> Json<CalculatorView> {
    let mut calculator = state.calculator.lock().await;
    calculator.reset();
    Json(calculator.view())
}
