use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MessageError {
    #[error("Template references unknown field: {0}")]
    MissingPlaceholder(String),

    #[error("Action aborted: {0}")]
    EditorAborted(String),

    #[error("Action aborted! Message is empty.")]
    AbortedEmptyMessage,

    #[error(
        "Action aborted! The current text has lines starting with '#' or CRLF line endings \
         and cannot be edited in the editor without changing it. Use -m to replace it."
    )]
    UneditableBody,

    #[error("Invalid value for {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, MessageError>;
