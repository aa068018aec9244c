//! Cleaning pipeline: raw CSV exports in, typed records with fresh ids out.
pub mod identity;
pub mod ratings;
pub mod raw;
pub mod report;
pub mod sales;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::{info, instrument};

pub use identity::GameId;
pub use ratings::{clean_ratings, RatingRecord};
pub use raw::RawTable;
pub use report::{CleaningReport, DropReason};
pub use sales::{clean_sales, SalesRecord};

use crate::error::PipelineError;

#[derive(Debug, Clone)]
pub struct CleanedDatasets {
    pub sales: Vec<SalesRecord>,
    pub ratings: Vec<RatingRecord>,
    pub sales_report: CleaningReport,
    pub ratings_report: CleaningReport,
}

/// Read and clean both exports.
///
/// Both files are opened before either is parsed, so a missing file aborts
/// the run without doing any work.
#[instrument(skip_all, fields(sales = %sales_path.display(), ratings = %ratings_path.display()))]
pub fn clean_datasets(
    sales_path: &Path,
    ratings_path: &Path,
) -> Result<CleanedDatasets, PipelineError> {
    info!("loading and cleaning data");
    let missing = |source| PipelineError::MissingInput {
        sales: sales_path.to_path_buf(),
        ratings: ratings_path.to_path_buf(),
        source,
    };
    let sales_file = File::open(sales_path).map_err(missing)?;
    let ratings_file = File::open(ratings_path).map_err(missing)?;

    let sales_table = RawTable::from_reader(sales_path, BufReader::new(sales_file))?;
    let ratings_table = RawTable::from_reader(ratings_path, BufReader::new(ratings_file))?;

    let (sales, sales_report) = clean_sales(sales_table)?;
    let (ratings, ratings_report) = clean_ratings(ratings_table)?;
    sales_report.log("sales");
    ratings_report.log("ratings");
    info!(
        sales = sales.len(),
        ratings = ratings.len(),
        "data cleaning complete"
    );

    Ok(CleanedDatasets {
        sales,
        ratings,
        sales_report,
        ratings_report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::io::Write;
    use tempfile::TempDir;

    const SALES: &str = "Rank,Name,Platform,Year,Genre,Publisher,NA_Sales,EU_Sales,JP_Sales,Other_Sales,Global_Sales\n\
        1,Tetris,GB,1989,Puzzle,Nintendo,23.2,2.26,4.22,0.58,30.26\n\
        2,Tetris,NES,N/A,Puzzle,Nintendo,2.97,0.69,1.81,0.11,5.58\n";
    const RATINGS: &str = "Title,Release Date,Rating,Number of Reviews,Genres,Summary\n\
        Tetris,\"Jun 14, 1989\",4.1,\"2,001\",\"['Puzzle']\",Blocks.\n";

    fn write(dir: &TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = File::create(&path).expect("create fixture");
        f.write_all(body.as_bytes()).expect("write fixture");
        path
    }

    #[test]
    fn cleans_both_datasets_with_disjoint_ids() {
        let dir = TempDir::new().expect("tempdir");
        let sales = write(&dir, "vgsales.csv", SALES);
        let ratings = write(&dir, "games.csv", RATINGS);

        let cleaned = clean_datasets(&sales, &ratings).expect("cleaning succeeds");
        assert_eq!(cleaned.sales.len(), 1);
        assert_eq!(cleaned.ratings.len(), 1);
        assert_eq!(cleaned.sales_report.dropped(DropReason::MissingRequired), 1);

        // Same game in both exports, but identity is never shared.
        assert_eq!(cleaned.sales[0].name.to_lowercase(), "tetris");
        assert_eq!(cleaned.ratings[0].title.as_deref(), Some("tetris"));
        let ids: HashSet<GameId> = cleaned
            .sales
            .iter()
            .map(|r| r.game_id)
            .chain(cleaned.ratings.iter().map(|r| r.game_id))
            .collect();
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn missing_file_aborts_and_names_both_inputs() {
        let dir = TempDir::new().expect("tempdir");
        let sales = write(&dir, "vgsales.csv", SALES);
        let ratings = dir.path().join("games.csv");

        let err = clean_datasets(&sales, &ratings).unwrap_err();
        assert!(matches!(err, PipelineError::MissingInput { .. }));
        let msg = err.to_string();
        assert!(msg.contains("vgsales.csv") && msg.contains("games.csv"));
        assert_eq!(err.exit_code(), 1);
    }
}
