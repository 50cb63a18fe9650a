// Results table: client-side ordering, row selection, and the pipelines
// behind the table's row action and bulk buttons.

pub mod actions;
pub mod columns;
pub mod comparator;
pub mod handlers;
pub mod selection;
pub mod table;

pub use comparator::SortDirection;
pub use selection::{SelectionEvent, SelectionSet};
pub use table::ResultsTable;
