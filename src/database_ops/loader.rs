//! Full destructive reload of the cleaned datasets into SQLite.
use std::collections::HashMap;

use chrono::NaiveDate;
use indexmap::IndexMap;
use rusqlite::{params, Transaction};
use tracing::{error, info, instrument, warn};

use super::db::Db;
use super::schema;
use crate::cleaning::{GameId, RatingRecord, SalesRecord};
use crate::error::{LoadError, LoadStage};
use crate::normalization::format_release_date;

/// One row of the combined `games` table.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRow<'a> {
    pub game_id: GameId,
    pub title: Option<&'a str>,
    pub release_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub games: usize,
    pub sales: usize,
    pub ratings: usize,
}

/// Build the `games` rows as the union of both datasets.
///
/// Sales rows contribute `(game_id, name)`, rating rows `(game_id, title)`.
/// Release dates come from the ratings dataset by id, so sales-derived rows
/// never get one. Rows are not matched by title; the first row per id wins.
pub fn reconcile_games<'a>(
    sales: &'a [SalesRecord],
    ratings: &'a [RatingRecord],
) -> Vec<GameRow<'a>> {
    let release_dates: HashMap<GameId, NaiveDate> = ratings
        .iter()
        .map(|r| (r.game_id, r.release_date))
        .collect();

    let candidates = sales
        .iter()
        .map(|s| (s.game_id, Some(s.name.as_str())))
        .chain(ratings.iter().map(|r| (r.game_id, r.title.as_deref())));

    let mut games: IndexMap<GameId, GameRow<'a>> =
        IndexMap::with_capacity(sales.len() + ratings.len());
    for (game_id, title) in candidates {
        games.entry(game_id).or_insert_with(|| GameRow {
            game_id,
            title,
            release_date: release_dates.get(&game_id).copied(),
        });
    }
    games.into_values().collect()
}

/// Drop, recreate and populate all three tables in one transaction.
///
/// Nothing is committed unless every insert succeeds; on error the
/// transaction is rolled back and the previous tables are left as they were.
#[instrument(skip_all, fields(sales = sales.len(), ratings = ratings.len()))]
pub fn load(
    db: &mut Db,
    sales: &[SalesRecord],
    ratings: &[RatingRecord],
) -> Result<LoadSummary, LoadError> {
    let tx = db
        .conn
        .transaction()
        .map_err(LoadError::at(LoadStage::Begin))?;

    match write_all(&tx, sales, ratings) {
        Ok(summary) => {
            tx.commit().map_err(LoadError::at(LoadStage::Commit))?;
            info!(
                games = summary.games,
                sales = summary.sales,
                ratings = summary.ratings,
                "all data inserted"
            );
            Ok(summary)
        }
        Err(err) => {
            match &err {
                LoadError::Stage { stage, source } => {
                    error!(%stage, error = %source, "error during database setup; rolling back")
                }
                other => error!(error = %other, "error during database setup; rolling back"),
            }
            if let Err(rollback_err) = tx.rollback() {
                warn!(error = %rollback_err, "rollback failed");
            }
            Err(err)
        }
    }
}

fn write_all(
    tx: &Transaction<'_>,
    sales: &[SalesRecord],
    ratings: &[RatingRecord],
) -> Result<LoadSummary, LoadError> {
    info!("creating tables");
    schema::recreate(tx).map_err(LoadError::at(LoadStage::Schema))?;

    info!("populating tables");
    let games = reconcile_games(sales, ratings);
    insert_games(tx, &games).map_err(LoadError::at(LoadStage::Games))?;
    insert_sales(tx, sales).map_err(LoadError::at(LoadStage::Sales))?;
    insert_ratings(tx, ratings).map_err(LoadError::at(LoadStage::Ratings))?;

    Ok(LoadSummary {
        games: games.len(),
        sales: sales.len(),
        ratings: ratings.len(),
    })
}

fn insert_games(tx: &Transaction<'_>, games: &[GameRow<'_>]) -> rusqlite::Result<()> {
    let mut stmt =
        tx.prepare_cached("INSERT INTO games (game_id, title, release_date) VALUES (?1, ?2, ?3)")?;
    for g in games {
        stmt.execute(params![
            g.game_id,
            g.title,
            g.release_date.map(format_release_date)
        ])?;
    }
    Ok(())
}

fn insert_sales(tx: &Transaction<'_>, sales: &[SalesRecord]) -> rusqlite::Result<()> {
    let mut stmt = tx.prepare_cached(
        "INSERT INTO sales_data (rank, game_id, name, platform, year, genre, publisher, \
         na_sales, eu_sales, jp_sales, other_sales, global_sales) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
    )?;
    for s in sales {
        stmt.execute(params![
            s.rank,
            s.game_id,
            s.name,
            s.platform,
            s.year,
            s.genre,
            s.publisher,
            s.na_sales,
            s.eu_sales,
            s.jp_sales,
            s.other_sales,
            s.global_sales
        ])?;
    }
    Ok(())
}

fn insert_ratings(tx: &Transaction<'_>, ratings: &[RatingRecord]) -> rusqlite::Result<()> {
    let mut stmt = tx.prepare_cached(
        "INSERT INTO ratings_data (game_id, rating, number_of_reviews, genres, summary) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for r in ratings {
        stmt.execute(params![
            r.game_id,
            r.rating,
            r.number_of_reviews,
            r.genres,
            r.summary
        ])?;
    }
    Ok(())
}
