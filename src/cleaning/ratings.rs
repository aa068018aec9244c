//! Cleaning rules for the review/rating export (`games.csv`).
use chrono::NaiveDate;
use indexmap::IndexMap;

use super::identity::GameId;
use super::raw::{drop_duplicates, retain_complete, RawTable};
use super::report::{CleaningReport, DropReason};
use crate::error::PipelineError;
use crate::normalization::{normalize_label, parse_rating, parse_release_date, parse_review_count};

pub const COL_TITLE: &str = "Title";
pub const COL_RELEASE_DATE: &str = "Release Date";
pub const COL_RATING: &str = "Rating";
pub const COL_REVIEWS: &str = "Number of Reviews";
pub const COL_GENRES: &str = "Genres";
pub const COL_SUMMARY: &str = "Summary";

#[derive(Debug, Clone, PartialEq)]
pub struct RatingRecord {
    pub game_id: GameId,
    pub title: Option<String>,
    pub release_date: NaiveDate,
    pub rating: f64,
    pub number_of_reviews: i64,
    pub genres: Option<String>,
    pub summary: Option<String>,
    /// Remaining input columns, untouched and in input order.
    pub extra: IndexMap<String, Option<String>>,
}

/// Apply the ratings cleaning rules in order: completeness on the raw text,
/// exact-duplicate removal, extraction of rating/date/review count, a second
/// completeness check on the extracted values, title normalization, identity.
pub fn clean_ratings(
    table: RawTable,
) -> Result<(Vec<RatingRecord>, CleaningReport), PipelineError> {
    let title_idx = table.column(COL_TITLE)?;
    let date_idx = table.column(COL_RELEASE_DATE)?;
    let rating_idx = table.column(COL_RATING)?;
    let reviews_idx = table.column(COL_REVIEWS)?;
    let genres_idx = table.optional_column(COL_GENRES);
    let summary_idx = table.optional_column(COL_SUMMARY);

    let known = [
        Some(title_idx),
        Some(date_idx),
        Some(rating_idx),
        Some(reviews_idx),
        genres_idx,
        summary_idx,
    ];
    let extra_cols: Vec<(usize, &String)> = table
        .headers
        .iter()
        .enumerate()
        .filter(|(idx, _)| !known.contains(&Some(*idx)))
        .collect();

    let mut report = CleaningReport::new(table.rows.len());

    let (rows, missing) = retain_complete(table.rows, &[rating_idx, date_idx, reviews_idx]);
    report.record(DropReason::MissingRequired, missing);

    // Duplicates are judged on the raw text, before any extraction.
    let (rows, duplicates) = drop_duplicates(rows);
    report.record(DropReason::Duplicate, duplicates);

    let mut records = Vec::with_capacity(rows.len());
    for mut row in rows {
        let cell = |idx: usize| row[idx].as_deref().unwrap_or_default();

        let Some(rating) = parse_rating(cell(rating_idx)) else {
            report.record(DropReason::InvalidRating, 1);
            continue;
        };
        let Some(release_date) = parse_release_date(cell(date_idx)) else {
            report.record(DropReason::InvalidReleaseDate, 1);
            continue;
        };
        let Some(number_of_reviews) = parse_review_count(cell(reviews_idx)) else {
            report.record(DropReason::InvalidReviewCount, 1);
            continue;
        };

        let title = row[title_idx].as_deref().map(normalize_label);
        let extra = extra_cols
            .iter()
            .map(|(idx, name)| ((*name).clone(), row[*idx].take()))
            .collect();

        records.push(RatingRecord {
            game_id: GameId::mint(),
            title,
            release_date,
            rating,
            number_of_reviews,
            genres: genres_idx.and_then(|idx| row[idx].take()),
            summary: summary_idx.and_then(|idx| row[idx].take()),
            extra,
        });
    }

    report.rows_kept = records.len();
    Ok((records, report))
}
