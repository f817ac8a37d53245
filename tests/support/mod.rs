//! Shared test harness: an in-process app backed by in-memory SQLite.

use anyhow::Result;
use axum::body::{to_bytes, Body, Bytes};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use rust_xlsxwriter::Workbook;
use std::future::Future;
use std::pin::Pin;
use student_roster::{api::create_router, config::Config, state::AppState};
use tower::ServiceExt;

pub const TEST_BOUNDARY: &str = "roster-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Drive one request through the router and collect the response.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<(String, Vec<u8>)>,
    ) -> Result<(StatusCode, HeaderMap, Bytes)> {
        let builder = Request::builder().method(method).uri(path);
        let request = match body {
            Some((content_type, bytes)) => builder
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(bytes))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await?;

        Ok((status, headers, body))
    }
}

pub async fn with_test_app<F>(test: F) -> Result<()>
where
    F: FnOnce(TestApp) -> Pin<Box<dyn Future<Output = Result<()>>>>,
{
    with_test_app_with_config(|_| {}, test).await
}

pub async fn with_test_app_with_config<C, F>(configure: C, test: F) -> Result<()>
where
    C: FnOnce(&mut Config),
    F: FnOnce(TestApp) -> Pin<Box<dyn Future<Output = Result<()>>>>,
{
    let mut config = Config::load()?;
    config.database.url = "sqlite::memory:".to_string();
    // One pooled connection keeps the in-memory database alive and shared
    // across every query in the test.
    config.database.pool_min_size = 1;
    config.database.pool_max_size = 1;
    configure(&mut config);

    let state = AppState::new(config).await?;
    let router = create_router(state.clone());

    test(TestApp { router, state }).await
}

pub fn assert_status(actual: StatusCode, expected: StatusCode, context: &str) {
    assert_eq!(actual, expected, "unexpected status for {context}");
}

/// Multipart body carrying one file field, as browsers send it.
pub fn multipart_file(filename: &str, bytes: &[u8]) -> (String, Vec<u8>) {
    multipart_named_file("file", filename, bytes)
}

pub fn multipart_named_file(field: &str, filename: &str, bytes: &[u8]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{TEST_BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(
        b"Content-Type: application/vnd.openxmlformats-officedocument.spreadsheetml.sheet\r\n\r\n",
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{TEST_BOUNDARY}--\r\n").as_bytes());

    (
        format!("multipart/form-data; boundary={TEST_BOUNDARY}"),
        body,
    )
}

/// Workbook with the standard `hallticket_no`/`name` header row.
pub fn student_workbook(rows: &[(&str, &str)]) -> Result<Vec<u8>> {
    workbook_with_headers(&["hallticket_no", "name"], rows)
}

pub fn workbook_with_headers(headers: &[&str], rows: &[(&str, &str)]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, title) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *title)?;
    }
    for (i, (hallticket_no, name)) in rows.iter().enumerate() {
        sheet.write_string(i as u32 + 1, 0, *hallticket_no)?;
        sheet.write_string(i as u32 + 1, 1, *name)?;
    }
    Ok(workbook.save_to_buffer()?)
}

pub async fn student_count(pool: &sqlx::SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
