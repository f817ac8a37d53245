//! Student service - business logic for spreadsheet imports and listings.

use crate::{
    db::StudentRepository,
    models::{NewStudent, Student},
    services::spreadsheet,
    Error, Result,
};

pub struct StudentService {
    repo: StudentRepository,
}

impl StudentService {
    pub fn new(repo: StudentRepository) -> Self {
        Self { repo }
    }

    /// Parse an uploaded workbook and bulk-insert its rows under `class_id`.
    ///
    /// Returns the number of inserted students. All rows go in one
    /// transaction; there are no partial-success semantics.
    pub async fn import_spreadsheet(&self, class_id: &str, bytes: &[u8]) -> Result<usize> {
        let rows = spreadsheet::parse_student_rows(bytes)?;
        if rows.is_empty() {
            return Err(Error::NoValidRows);
        }

        let students: Vec<NewStudent> = rows
            .into_iter()
            .map(|row| NewStudent {
                class_id: class_id.to_string(),
                hallticket_no: row.hallticket_no,
                name: row.name,
            })
            .collect();

        let inserted = self.repo.insert_batch(&students).await?;

        tracing::info!(class_id, students = inserted, "Bulk insert committed");

        Ok(inserted)
    }

    /// List stored students, optionally restricted to one class.
    pub async fn list(&self, class_id: Option<&str>) -> Result<Vec<Student>> {
        self.repo.list(class_id).await
    }
}
