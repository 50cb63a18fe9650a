use serde::Serialize;

use crate::models::JobField;

/// Name of the only row action the table offers.
pub const SAVE_ACTION: &str = "save";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Text,
    Url,
    Action,
}

#[derive(Debug, Clone, Serialize)]
pub struct RowAction {
    pub label: &'static str,
    pub name: &'static str,
}

pub const ROW_ACTIONS: &[RowAction] = &[RowAction {
    label: "Save As Job Application",
    name: SAVE_ACTION,
}];

/// Column definition consumed by the table renderer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_name: Option<JobField>,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub wrap_text: bool,
    pub sortable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_actions: Option<&'static [RowAction]>,
}

/// Six read-only data columns (all sortable, only the link is a URL) plus
/// the trailing row action menu.
pub fn job_columns() -> Vec<ColumnDef> {
    let mut columns: Vec<ColumnDef> = JobField::ALL
        .into_iter()
        .map(|field| {
            let is_link = field == JobField::Link;
            ColumnDef {
                label: Some(field.label()),
                field_name: Some(field),
                column_type: if is_link {
                    ColumnType::Url
                } else {
                    ColumnType::Text
                },
                wrap_text: !is_link,
                sortable: true,
                row_actions: None,
            }
        })
        .collect();

    columns.push(ColumnDef {
        label: None,
        field_name: None,
        column_type: ColumnType::Action,
        wrap_text: false,
        sortable: false,
        row_actions: Some(ROW_ACTIONS),
    });

    columns
}
