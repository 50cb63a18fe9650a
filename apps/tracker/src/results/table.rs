use serde::Serialize;
use tracing::info;

use crate::models::{Job, JobField, RecordId};
use crate::platform::{JobStore, PlatformError};
use crate::results::columns::{job_columns, ColumnDef};
use crate::results::comparator::{sort_jobs, SortDirection};
use crate::results::SelectionSet;

/// State of the results table: the current result set, its sort indicators
/// and the rows marked for bulk action.
#[derive(Debug, Clone, Default)]
pub struct ResultsTable {
    rows: Vec<Job>,
    sorted_by: Option<JobField>,
    sort_direction: SortDirection,
    pub selection: SelectionSet,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView<'a> {
    pub columns: Vec<ColumnDef>,
    pub rows: &'a [Job],
    pub sorted_by: Option<JobField>,
    pub sort_direction: SortDirection,
    pub default_sort_direction: SortDirection,
    pub selected: &'a SelectionSet,
}

impl ResultsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_row(&self, id: &RecordId) -> Option<&Job> {
        self.rows.iter().find(|job| &job.id == id)
    }

    /// Replaces the result set with a fresh query. Sort indicators are kept;
    /// the selection is left as is.
    pub async fn refresh(&mut self, jobs: &dyn JobStore) -> Result<(), PlatformError> {
        let rows = jobs.query_jobs().await?;
        info!("Result set refreshed: {} jobs", rows.len());
        self.rows = rows;
        Ok(())
    }

    pub fn sort(&mut self, field: JobField, direction: SortDirection) {
        sort_jobs(&mut self.rows, field, direction);
        self.sorted_by = Some(field);
        self.sort_direction = direction;
    }

    pub fn view(&self) -> TableView<'_> {
        TableView {
            columns: job_columns(),
            rows: &self.rows,
            sorted_by: self.sorted_by,
            sort_direction: self.sort_direction,
            default_sort_direction: SortDirection::default(),
            selected: &self.selection,
        }
    }
}

#[cfg(test)]
impl ResultsTable {
    pub fn with_rows(rows: Vec<Job>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    pub fn rows(&self) -> &[Job] {
        &self.rows
    }
}
