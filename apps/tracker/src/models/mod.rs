pub mod job;

pub use job::{Job, JobField, RecordId};
