use crate::schema::RecordKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InsightsError {
    #[error("CSV must include date and amount columns. Found headers: {}", .headers.join(", "))]
    MissingColumn { headers: Vec<String> },

    #[error("No {kind} records found in the uploaded data")]
    EmptyData { kind: RecordKind },

    #[error("Invalid amount '{value}' on line {line}")]
    InvalidAmount { line: u64, value: String },

    #[error("Invalid date '{value}' on line {line}: expected YYYY-MM-DD, YYYY/MM/DD, MM/DD/YYYY or YYYY-MM")]
    InvalidDate { line: u64, value: String },

    #[error("Malformed row on line {line}: {details}")]
    MalformedRow { line: u64, details: String },

    #[error("Invalid inflation table: {0}")]
    InvalidInflationTable(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, InsightsError>;
