// Job search form and the search → refresh pipeline.

pub mod form;
pub mod handlers;
pub mod pipeline;

pub use form::{FormChange, SearchForm};
pub use pipeline::run_search;
