pub mod currency;
pub mod handlers;
pub mod workflow;

pub use workflow::{Submission, TakeHomeCalculator};
