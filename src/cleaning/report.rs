use std::collections::BTreeMap;
use std::fmt;

use tracing::info;

/// Why a row did not survive cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DropReason {
    MissingRequired,
    Duplicate,
    InvalidYear,
    InvalidSales,
    InvalidRating,
    InvalidReleaseDate,
    InvalidReviewCount,
}

impl DropReason {
    pub fn as_str(self) -> &'static str {
        match self {
            DropReason::MissingRequired => "missing_required",
            DropReason::Duplicate => "duplicate",
            DropReason::InvalidYear => "invalid_year",
            DropReason::InvalidSales => "invalid_sales",
            DropReason::InvalidRating => "invalid_rating",
            DropReason::InvalidReleaseDate => "invalid_release_date",
            DropReason::InvalidReviewCount => "invalid_review_count",
        }
    }
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row accounting for one dataset. Rows are never rejected loudly, so this is
/// the only record of what the cleaning rules removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleaningReport {
    pub rows_read: usize,
    pub rows_kept: usize,
    dropped: BTreeMap<DropReason, usize>,
}

impl CleaningReport {
    pub fn new(rows_read: usize) -> Self {
        Self {
            rows_read,
            ..Self::default()
        }
    }

    pub fn record(&mut self, reason: DropReason, count: usize) {
        if count > 0 {
            *self.dropped.entry(reason).or_default() += count;
        }
    }

    pub fn dropped(&self, reason: DropReason) -> usize {
        self.dropped.get(&reason).copied().unwrap_or(0)
    }

    pub fn total_dropped(&self) -> usize {
        self.dropped.values().sum()
    }

    pub fn reasons(&self) -> impl Iterator<Item = (DropReason, usize)> + '_ {
        self.dropped.iter().map(|(r, n)| (*r, *n))
    }

    pub fn log(&self, dataset: &str) {
        info!(
            dataset,
            rows_read = self.rows_read,
            rows_kept = self.rows_kept,
            rows_dropped = self.total_dropped(),
            "cleaned dataset"
        );
        for (reason, count) in self.reasons() {
            info!(dataset, reason = %reason, count, "dropped rows");
        }
    }
}
