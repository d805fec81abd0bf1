pub mod db;

pub mod budgets;
pub mod categories;
pub mod goals;
pub mod reports;
pub mod sources;
pub mod transactions;

pub mod constants;
pub mod errors;
pub mod schema;

pub use errors::{Error, Result};
pub use reports::*;
