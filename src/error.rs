//! Crate-level error type and HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("File must be an Excel file (.xlsx or .xls)")]
    UnsupportedFileType,

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("Excel file is empty")]
    EmptySpreadsheet,

    #[error("Missing required columns: {}. Excel file must contain: hallticket_no, name", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("No valid student data found in the Excel file")]
    NoValidRows,

    #[error("Duplicate hall ticket number found. Some students may already exist in the database.")]
    DuplicateHallTicket,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Error processing file: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// HTTP status for this error. Client input problems are 4xx; everything
    /// else surfaces as a 500.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UnsupportedFileType
            | Self::InvalidUpload(_)
            | Self::EmptySpreadsheet
            | Self::MissingColumns(_)
            | Self::NoValidRows
            | Self::DuplicateHallTicket => StatusCode::BAD_REQUEST,
            Self::Database(_) | Self::Spreadsheet(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
