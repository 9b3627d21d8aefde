pub mod outcome;
pub mod query;
