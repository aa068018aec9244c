//! Header-indexed CSV tables with spreadsheet-style missing cells.
use std::hash::Hash;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use indexmap::IndexSet;

use crate::error::PipelineError;

/// Cell values treated as missing, in addition to the empty string.
pub const MISSING_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_missing(cell: &str) -> bool {
    cell.is_empty() || MISSING_MARKERS.contains(&cell)
}

/// One input row; `None` marks a missing cell.
pub type RawRow = Vec<Option<String>>;

#[derive(Debug, Clone)]
pub struct RawTable {
    pub path: PathBuf,
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// Read a whole CSV (header row required) into memory.
    pub fn from_reader<R: Read>(path: &Path, reader: R) -> Result<Self, PipelineError> {
        let csv_err = |source| PipelineError::Csv {
            path: path.to_path_buf(),
            source,
        };
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .trim(csv::Trim::None)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()
            .map_err(csv_err)?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        let mut rec = StringRecord::new();
        while rdr.read_record(&mut rec).map_err(csv_err)? {
            rows.push(
                rec.iter()
                    .map(|cell| (!is_missing(cell)).then(|| cell.to_string()))
                    .collect(),
            );
        }

        Ok(Self {
            path: path.to_path_buf(),
            headers,
            rows,
        })
    }

    /// Index of a column that must be present.
    pub fn column(&self, name: &'static str) -> Result<usize, PipelineError> {
        self.optional_column(name)
            .ok_or_else(|| PipelineError::MissingColumn {
                path: self.path.clone(),
                column: name,
            })
    }

    pub fn optional_column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// Remove rows identical to an earlier row, keeping first occurrences in order.
///
/// Returns the surviving rows and how many were removed.
pub fn drop_duplicates<T: Eq + Hash>(rows: Vec<T>) -> (Vec<T>, usize) {
    let before = rows.len();
    let unique: IndexSet<T> = rows.into_iter().collect();
    let removed = before - unique.len();
    (unique.into_iter().collect(), removed)
}

/// Keep rows where every listed column is present; returns survivors and the drop count.
pub fn retain_complete(rows: Vec<RawRow>, required: &[usize]) -> (Vec<RawRow>, usize) {
    let before = rows.len();
    let kept: Vec<RawRow> = rows
        .into_iter()
        .filter(|row| required.iter().all(|&idx| row[idx].is_some()))
        .collect();
    let removed = before - kept.len();
    (kept, removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(csv: &str) -> RawTable {
        RawTable::from_reader(Path::new("fixture.csv"), csv.as_bytes()).expect("fixture parses")
    }

    #[test]
    fn missing_markers_become_none() {
        let t = table("a,b,c\nN/A,,x\nnan,NULL,  \n");
        assert_eq!(t.headers, vec!["a", "b", "c"]);
        assert_eq!(t.rows[0], vec![None, None, Some("x".to_string())]);
        // whitespace-only cells are real values
        assert_eq!(t.rows[1], vec![None, None, Some("  ".to_string())]);
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let t = table("Name,Year\nTetris,1989\n");
        let err = t.column("Platform").unwrap_err();
        assert!(err.to_string().contains("`Platform`"));
        assert_eq!(t.column("Year").expect("present"), 1);
    }

    #[test]
    fn ragged_rows_are_a_csv_error() {
        let err = RawTable::from_reader(Path::new("bad.csv"), "a,b\n1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, PipelineError::Csv { .. }));
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let rows = vec![
            vec![Some("b".to_string()), None],
            vec![Some("a".to_string()), None],
            vec![Some("b".to_string()), None],
        ];
        let (kept, removed) = drop_duplicates(rows);
        assert_eq!(removed, 1);
        assert_eq!(kept[0][0].as_deref(), Some("b"));
        assert_eq!(kept[1][0].as_deref(), Some("a"));
    }

    #[test]
    fn drop_duplicates_is_idempotent() {
        let rows: Vec<RawRow> = ["x", "y", "x", "z", "y"]
            .iter()
            .map(|v| vec![Some(v.to_string())])
            .collect();
        let (once, _) = drop_duplicates(rows);
        let (twice, removed_again) = drop_duplicates(once.clone());
        assert_eq!(once, twice);
        assert_eq!(removed_again, 0);
    }

    #[test]
    fn retain_complete_checks_only_required_columns() {
        let rows = vec![
            vec![Some("1".to_string()), None],
            vec![None, Some("2".to_string())],
        ];
        let (kept, removed) = retain_complete(rows, &[0]);
        assert_eq!(removed, 1);
        assert_eq!(kept.len(), 1);
    }
}
