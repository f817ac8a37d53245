//! Student entity

use serde::Serialize;

/// A stored student row.
///
/// `hallticket_no` is unique across the whole table; `class_id` groups
/// students into a class/section and is supplied by the uploader.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Student {
    pub id: i64,
    pub class_id: String,
    pub hallticket_no: String,
    pub name: String,
}

/// A student pending insertion (no id yet).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub class_id: String,
    pub hallticket_no: String,
    pub name: String,
}
