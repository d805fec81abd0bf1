use thiserror::Error;

#[derive(Error, Debug)]
pub enum GoalError {
    #[error("Invalid goal data: {0}")]
    InvalidData(String),

    #[error("Goal not found: {0}")]
    NotFound(String),
}
