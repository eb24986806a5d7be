//! Error types for the biolock session crate

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("session task has stopped")]
    Closed,
}
