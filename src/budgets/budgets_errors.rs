use thiserror::Error;

#[derive(Error, Debug)]
pub enum BudgetError {
    #[error("Invalid budget data: {0}")]
    InvalidData(String),

    #[error("Budget not found: {0}")]
    NotFound(String),
}
