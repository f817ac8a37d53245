//! Student repository - SQLite-backed persistence for student rows.

use crate::{
    models::{NewStudent, Student},
    Error, Result,
};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct StudentRepository {
    pool: SqlitePool,
}

impl StudentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a batch of students in one transaction.
    ///
    /// The whole batch commits or the whole batch rolls back: a uniqueness
    /// violation on `hallticket_no` aborts the transaction and surfaces as
    /// [`Error::DuplicateHallTicket`]; any other database failure surfaces
    /// as [`Error::Database`].
    pub async fn insert_batch(&self, students: &[NewStudent]) -> Result<usize> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        for student in students {
            let result = sqlx::query(
                "INSERT INTO students (class_id, hallticket_no, name) VALUES (?, ?, ?)",
            )
            .bind(&student.class_id)
            .bind(&student.hallticket_no)
            .bind(&student.name)
            .execute(&mut *tx)
            .await;

            if let Err(e) = result {
                tx.rollback().await.ok();
                if let sqlx::Error::Database(ref db_err) = e {
                    if db_err.is_unique_violation() {
                        return Err(Error::DuplicateHallTicket);
                    }
                }
                return Err(Error::Database(e));
            }
        }

        tx.commit().await.map_err(Error::Database)?;

        Ok(students.len())
    }

    /// List stored students, optionally restricted to one class.
    ///
    /// No ORDER BY: rows come back in storage order.
    pub async fn list(&self, class_id: Option<&str>) -> Result<Vec<Student>> {
        let students = match class_id {
            Some(class_id) => {
                sqlx::query_as::<_, Student>(
                    "SELECT id, class_id, hallticket_no, name FROM students WHERE class_id = ?",
                )
                .bind(class_id)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, Student>(
                    "SELECT id, class_id, hallticket_no, name FROM students",
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(Error::Database)?;

        Ok(students)
    }
}
