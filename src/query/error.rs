use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Invalid date: {0} (expected YYYY-MM-DD or MM/DD/YYYY)")]
    InvalidDate(String),
}

pub type Result<T> = std::result::Result<T, QueryError>;
