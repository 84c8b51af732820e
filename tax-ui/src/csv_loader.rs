//! CSV loader for activity rows.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does **not** matter. Header
//! names are case-sensitive.
//!
//! | Column                       | Required | Notes                                            |
//! |------------------------------|----------|--------------------------------------------------|
//! | `name`                       | yes      | Activity description                             |
//! | `sales`                      | yes      | Free text; digits are extracted on submission    |
//! | `code`                       | no       | Defaults to the row's position (1-based)         |
//! | `activity_type`              | no       | `goods` (default), `services`, `industrial`, `agricultural` |
//! | `activity_percentage`        | no       | Free text                                        |
//! | `non_specialized_percentage` | no       | Free text                                        |
//!
//! ### Example
//!
//! ```csv
//! code,name,activity_type,activity_percentage,sales
//! 101,Retail,goods,15,"3,000,000,000"
//! 102,Repairs,services,10,450000000
//! ```
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tax_core::ActivityType;

use crate::models::ActivityRow;

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    code: Option<String>,
    name: String,
    #[serde(default)]
    activity_type: Option<String>,
    #[serde(default)]
    activity_percentage: String,
    #[serde(default)]
    non_specialized_percentage: String,
    sales: String,
}

/// Errors that can occur while loading activity rows.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Bad structure, a missing required column, and the like.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// `row` is 1-based, counting data rows only.
    #[error("unrecognised activity type '{value}' on row {row}")]
    InvalidActivityType { value: String, row: usize },
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<ActivityRow, CsvLoadError> {
    let activity_type = match row.activity_type.as_deref().map(str::trim) {
        None | Some("") => ActivityType::default(),
        Some(value) => value
            .parse()
            .map_err(|_| CsvLoadError::InvalidActivityType {
                value: value.to_string(),
                row: row_number,
            })?,
    };

    let id = u32::try_from(row_number).unwrap_or(u32::MAX);
    let mut activity = ActivityRow::new(id);
    if let Some(code) = row.code.filter(|code| !code.is_empty()) {
        activity.code = code;
    }
    activity.name = row.name;
    activity.activity_type = activity_type;
    activity.activity_percentage = row.activity_percentage;
    activity.non_specialized_percentage = row.non_specialized_percentage;
    activity.sales = row.sales;
    Ok(activity)
}

/// Parses CSV text into activity rows, in file order, with ids counting
/// from 1.
pub fn load_from_str(input: &str) -> Result<Vec<ActivityRow>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| convert_row(result?, idx + 1))
        .collect()
}

pub fn load_from_file(path: &Path) -> Result<Vec<ActivityRow>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const MINIMAL_CSV: &str = "\
name,sales
Retail,1000
";

    const FULL_CSV: &str = "\
code,name,activity_type,activity_percentage,non_specialized_percentage,sales
101,Retail,goods,15,5,\"3,000,000,000\"
102,Repairs,Services,10,,450000000
,Farm,agricultural,,,20
";

    #[test]
    fn test_minimal_csv_uses_defaults() {
        let rows = load_from_str(MINIMAL_CSV).expect("should parse minimal CSV");

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.id, 1);
        assert_eq!(row.code, "1");
        assert_eq!(row.name, "Retail");
        assert_eq!(row.activity_type, ActivityType::Goods);
        assert_eq!(row.activity_percentage, "");
        assert_eq!(row.sales, "1000");
    }

    #[test]
    fn test_full_csv_keeps_order_and_values() {
        let rows = load_from_str(FULL_CSV).expect("should parse full CSV");

        let summary: Vec<(u32, &str, ActivityType)> = rows
            .iter()
            .map(|row| (row.id, row.code.as_str(), row.activity_type))
            .collect();
        assert_eq!(
            summary,
            vec![
                (1, "101", ActivityType::Goods),
                (2, "102", ActivityType::Services),
                (3, "3", ActivityType::Agricultural),
            ]
        );
        assert_eq!(rows[0].sales, "3,000,000,000");
        assert_eq!(rows[0].non_specialized_percentage, "5");
    }

    #[test]
    fn test_invalid_activity_type_reports_row() {
        let csv = "name,activity_type,sales\nA,goods,1\nB,mining,2\n";

        match load_from_str(csv).unwrap_err() {
            CsvLoadError::InvalidActivityType { value, row } => {
                assert_eq!(value, "mining");
                assert_eq!(row, 2);
            }
            other => panic!("expected InvalidActivityType, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_required_column_returns_parse_error() {
        let csv = "code,name\n1,Retail\n";

        assert!(matches!(load_from_str(csv), Err(CsvLoadError::Parse(_))));
    }

    #[test]
    fn test_header_only_is_empty() {
        let rows = load_from_str("name,sales\n").expect("header-only CSV is valid");

        assert!(rows.is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_from_file(Path::new("/nonexistent/activities.csv"));

        assert!(matches!(result, Err(CsvLoadError::Io { .. })));
    }
}
