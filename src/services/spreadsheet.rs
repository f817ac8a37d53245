//! Spreadsheet decoding and row cleaning for student uploads.
//!
//! The pipeline mirrors the upload contract: locate the required header
//! columns, drop rows missing either value, stringify and trim the cells,
//! then collapse duplicate hall-ticket numbers (first occurrence wins).

use crate::{Error, Result};
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use std::collections::HashSet;
use std::io::Cursor;

/// Columns the uploaded sheet must carry, in reporting order.
pub const REQUIRED_COLUMNS: [&str; 2] = ["hallticket_no", "name"];

/// One cleaned data row from an uploaded sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRow {
    pub hallticket_no: String,
    pub name: String,
}

/// Accepted upload extensions. Matching is case-sensitive.
pub fn has_spreadsheet_extension(filename: &str) -> bool {
    filename.ends_with(".xlsx") || filename.ends_with(".xls")
}

/// Decode the first worksheet of an uploaded workbook into cleaned,
/// de-duplicated student rows.
pub fn parse_student_rows(bytes: &[u8]) -> Result<Vec<StudentRow>> {
    if bytes.is_empty() {
        return Err(Error::EmptySpreadsheet);
    }

    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range?,
        None => return Err(Error::EmptySpreadsheet),
    };

    extract_rows(&range)
}

fn extract_rows(range: &Range<Data>) -> Result<Vec<StudentRow>> {
    let mut rows = range.rows();

    // A sheet with no header row reports every required column as missing.
    let header = rows.next().ok_or_else(all_columns_missing)?;
    let (hallticket_col, name_col) = locate_columns(header)?;

    let mut seen = HashSet::new();
    let mut students = Vec::new();
    for row in rows {
        let hallticket_no = match cell_value(row.get(hallticket_col)) {
            Some(value) => value.trim().to_string(),
            None => continue,
        };
        let name = match cell_value(row.get(name_col)) {
            Some(value) => value.trim().to_string(),
            None => continue,
        };

        // First occurrence of a hall-ticket number wins.
        if !seen.insert(hallticket_no.clone()) {
            continue;
        }

        students.push(StudentRow {
            hallticket_no,
            name,
        });
    }

    Ok(students)
}

fn all_columns_missing() -> Error {
    Error::MissingColumns(REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect())
}

/// Find the required columns in the header row; header matching is exact.
fn locate_columns(header: &[Data]) -> Result<(usize, usize)> {
    let position = |column: &str| {
        header
            .iter()
            .position(|cell| cell_value(Some(cell)).as_deref() == Some(column))
    };

    let hallticket_col = position(REQUIRED_COLUMNS[0]);
    let name_col = position(REQUIRED_COLUMNS[1]);

    match (hallticket_col, name_col) {
        (Some(h), Some(n)) => Ok((h, n)),
        _ => {
            let missing = REQUIRED_COLUMNS
                .iter()
                .zip([hallticket_col, name_col])
                .filter(|(_, found)| found.is_none())
                .map(|(column, _)| column.to_string())
                .collect();
            Err(Error::MissingColumns(missing))
        }
    }
}

/// Stringify a cell. Absent, empty, and error cells count as missing.
/// Integral floats render without a trailing `.0` so numeric hall-ticket
/// columns round-trip as plain digit strings.
fn cell_value(cell: Option<&Data>) -> Option<String> {
    match cell? {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(s.clone()),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                Some((*f as i64).to_string())
            } else {
                Some(f.to_string())
            }
        }
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(dt.as_f64().to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
    }
}
