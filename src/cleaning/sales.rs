//! Cleaning rules for the regional sales export (`vgsales.csv`).
use tracing::debug;

use super::identity::GameId;
use super::raw::{drop_duplicates, retain_complete, RawTable};
use super::report::{CleaningReport, DropReason};
use crate::error::PipelineError;
use crate::normalization::normalize_label;

pub const COL_RANK: &str = "Rank";
pub const COL_NAME: &str = "Name";
pub const COL_PLATFORM: &str = "Platform";
pub const COL_YEAR: &str = "Year";
pub const COL_GENRE: &str = "Genre";
pub const COL_PUBLISHER: &str = "Publisher";
pub const SALES_COLUMNS: [&str; 5] = [
    "NA_Sales",
    "EU_Sales",
    "JP_Sales",
    "Other_Sales",
    "Global_Sales",
];

#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    /// Source ordering when the export carries one; otherwise the store assigns it.
    pub rank: Option<i64>,
    pub game_id: GameId,
    pub name: String,
    pub platform: String,
    pub year: i32,
    pub genre: String,
    pub publisher: String,
    pub na_sales: f64,
    pub eu_sales: f64,
    pub jp_sales: f64,
    pub other_sales: f64,
    pub global_sales: f64,
}

struct Columns {
    rank: Option<usize>,
    name: usize,
    platform: usize,
    year: usize,
    genre: usize,
    publisher: usize,
    sales: [usize; 5],
}

impl Columns {
    fn resolve(table: &RawTable) -> Result<Self, PipelineError> {
        Ok(Self {
            rank: table.optional_column(COL_RANK),
            name: table.column(COL_NAME)?,
            platform: table.column(COL_PLATFORM)?,
            year: table.column(COL_YEAR)?,
            genre: table.column(COL_GENRE)?,
            publisher: table.column(COL_PUBLISHER)?,
            sales: [
                table.column(SALES_COLUMNS[0])?,
                table.column(SALES_COLUMNS[1])?,
                table.column(SALES_COLUMNS[2])?,
                table.column(SALES_COLUMNS[3])?,
                table.column(SALES_COLUMNS[4])?,
            ],
        })
    }
}

/// Apply the sales cleaning rules in order: completeness on the descriptive
/// columns, exact-duplicate removal, year coercion, sales coercion, label
/// normalization, then identity.
pub fn clean_sales(table: RawTable) -> Result<(Vec<SalesRecord>, CleaningReport), PipelineError> {
    let cols = Columns::resolve(&table)?;
    let mut report = CleaningReport::new(table.rows.len());

    let (rows, missing) = retain_complete(
        table.rows,
        &[cols.year, cols.publisher, cols.name, cols.platform, cols.genre],
    );
    report.record(DropReason::MissingRequired, missing);

    // Duplicates are judged on the raw text, before the year is coerced.
    let (rows, duplicates) = drop_duplicates(rows);
    report.record(DropReason::Duplicate, duplicates);

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        let cell = |idx: usize| row[idx].as_deref().unwrap_or_default();

        let Some(year) = parse_integral(cell(cols.year)).and_then(|y| i32::try_from(y).ok())
        else {
            debug!(year = cell(cols.year), "dropping sales row with invalid year");
            report.record(DropReason::InvalidYear, 1);
            continue;
        };

        let figures: Option<Vec<f64>> = cols
            .sales
            .iter()
            .map(|&idx| row[idx].as_deref().and_then(parse_number))
            .collect();
        let Some(figures) = figures else {
            report.record(DropReason::InvalidSales, 1);
            continue;
        };

        records.push(SalesRecord {
            rank: cols
                .rank
                .and_then(|idx| row[idx].as_deref())
                .and_then(parse_integral),
            game_id: GameId::mint(),
            name: cell(cols.name).to_string(),
            platform: normalize_label(cell(cols.platform)),
            year,
            genre: normalize_label(cell(cols.genre)),
            publisher: normalize_label(cell(cols.publisher)),
            na_sales: figures[0],
            eu_sales: figures[1],
            jp_sales: figures[2],
            other_sales: figures[3],
            global_sales: figures[4],
        });
    }

    report.rows_kept = records.len();
    Ok((records, report))
}

/// Finite float; `None` for text, NaN and infinities.
fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Whole number written either as `2006` or `2006.0`.
fn parse_integral(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if let Ok(v) = trimmed.parse::<i64>() {
        return Some(v);
    }
    let v = parse_number(trimmed)?;
    if v.fract() != 0.0 || v < i64::MIN as f64 || v > i64::MAX as f64 {
        return None;
    }
    Some(v as i64)
}
