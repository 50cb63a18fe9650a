use serde::{Deserialize, Serialize};

use crate::models::RecordId;

/// Row-selection callback from the results table, one variant per table action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum SelectionEvent {
    SelectAllRows {
        #[serde(rename = "selectedRows")]
        selected_rows: Vec<RecordId>,
    },
    DeselectAllRows,
    RowSelect { value: RecordId },
    RowDeselect { value: RecordId },
}

/// Record ids marked for bulk action.
///
/// Appends do not deduplicate: selecting the same row twice stores it twice.
/// `deselect` removes every occurrence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SelectionSet {
    ids: Vec<RecordId>,
}

impl SelectionSet {
    pub fn select_all(&mut self, ids: impl IntoIterator<Item = RecordId>) {
        self.ids.extend(ids);
    }

    pub fn deselect_all(&mut self) {
        self.ids.clear();
    }

    pub fn select(&mut self, id: RecordId) {
        self.ids.push(id);
    }

    pub fn deselect(&mut self, id: &RecordId) {
        self.ids.retain(|selected| selected != id);
    }

    pub fn apply(&mut self, event: SelectionEvent) {
        match event {
            SelectionEvent::SelectAllRows { selected_rows } => self.select_all(selected_rows),
            SelectionEvent::DeselectAllRows => self.deselect_all(),
            SelectionEvent::RowSelect { value } => self.select(value),
            SelectionEvent::RowDeselect { value } => self.deselect(&value),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[RecordId] {
        &self.ids
    }
}

#[cfg(test)]
impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::fake::job;

    #[test]
    fn test_deselect_all_empties_set() {
        let rows = vec![job("1", "A", "X"), job("2", "B", "Y")];
        let mut selection = SelectionSet::new();
        selection.select_all(rows.iter().map(|j| j.id.clone()));
        selection.select(RecordId::new("3"));
        selection.deselect_all();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_deselect_after_select_removes_id() {
        let mut selection = SelectionSet::new();
        let id = RecordId::new("a01");
        selection.select(id.clone());
        selection.select(RecordId::new("a02"));
        selection.deselect(&id);
        assert!(!selection.ids().contains(&id));
        assert_eq!(selection.ids().len(), 1);
    }

    #[test]
    fn test_select_all_appends_duplicates() {
        let rows = vec![job("1", "A", "X"), job("2", "B", "Y")];
        let mut selection = SelectionSet::new();
        selection.select(RecordId::new("1"));
        selection.select_all(rows.iter().map(|j| j.id.clone()));
        assert_eq!(selection.ids().len(), 3);

        // deselect drops every copy
        selection.deselect(&RecordId::new("1"));
        assert_eq!(selection.ids(), &[RecordId::new("2")]);
    }

    #[test]
    fn test_events_parse_from_table_actions() {
        let mut selection = SelectionSet::new();
        let events = [
            r#"{"action": "selectAllRows", "selectedRows": ["1", "2"]}"#,
            r#"{"action": "rowDeselect", "value": "1"}"#,
            r#"{"action": "rowSelect", "value": "3"}"#,
        ];
        for raw in events {
            selection.apply(serde_json::from_str(raw).unwrap());
        }
        assert_eq!(selection.ids(), &[RecordId::new("2"), RecordId::new("3")]);

        selection.apply(serde_json::from_str(r#"{"action": "deselectAllRows"}"#).unwrap());
        assert!(selection.is_empty());
    }
}
