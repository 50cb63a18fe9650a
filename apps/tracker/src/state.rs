use std::sync::Arc;

use tokio::sync::Mutex;

use crate::calculator::TakeHomeCalculator;
use crate::platform::Platform;
use crate::results::ResultsTable;
use crate::search::SearchForm;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Each component sits behind its own async mutex, held for the whole
/// handler: events for one component are handled one at a time, across
/// every awaited remote call. Handlers that need both the form and the
/// table lock the form first.
#[derive(Clone)]
pub struct AppState {
    pub platform: Platform,
    pub search: Arc<Mutex<SearchForm>>,
    pub results: Arc<Mutex<ResultsTable>>,
    pub calculator: Arc<Mutex<TakeHomeCalculator>>,
}

impl AppState {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            search: Arc::new(Mutex::new(SearchForm::default())),
            results: Arc::new(Mutex::new(ResultsTable::new())),
            calculator: Arc::new(Mutex::new(TakeHomeCalculator::new())),
        }
    }
}
