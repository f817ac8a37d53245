//! Student upload and listing handlers.

use crate::{services::spreadsheet, state::AppState, Error, Result};
use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub class_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub class_id: Option<String>,
}

/// `POST /upload-students?class_id=...`
///
/// Accepts a multipart `file` field holding an `.xlsx`/`.xls` workbook and
/// bulk-inserts its rows tagged with `class_id`.
pub async fn upload_students(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    mut multipart: Multipart,
) -> Result<Response> {
    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::InvalidUpload(e.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field
                .file_name()
                .map(ToString::to_string)
                .ok_or_else(|| Error::InvalidUpload("File field has no filename".to_string()))?;
            let bytes = field
                .bytes()
                .await
                .map_err(|e| Error::InvalidUpload(e.to_string()))?;
            file = Some((filename, bytes));
        }
    }

    let (filename, bytes) =
        file.ok_or_else(|| Error::InvalidUpload("No file uploaded".to_string()))?;

    if !spreadsheet::has_spreadsheet_extension(&filename) {
        return Err(Error::UnsupportedFileType);
    }

    tracing::debug!(class_id = %query.class_id, filename = %filename, "Upload received");

    let count = state
        .student_service
        .import_spreadsheet(&query.class_id, &bytes)
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": format!("Successfully uploaded {count} students"),
            "class_id": query.class_id,
            "students_count": count,
        })),
    )
        .into_response())
}

/// `GET /students?class_id=...`
pub async fn list_students(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Response> {
    // An empty class_id behaves like no filter.
    let class_id = query.class_id.as_deref().filter(|c| !c.is_empty());

    let students = state.student_service.list(class_id).await?;

    Ok((StatusCode::OK, Json(students)).into_response())
}
