use thiserror::Error;

use crate::model::TaskId;

#[derive(Debug, Error)]
pub enum TaskMasterError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Unexpected data file layout: {0}")]
    Format(String),

    #[error("No task with ID {0}")]
    TaskNotFound(TaskId),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<serde_json::Error> for TaskMasterError {
    fn from(e: serde_json::Error) -> Self {
        TaskMasterError::Json(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TaskMasterError>;
