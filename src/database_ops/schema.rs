//! DDL for the three destination tables.
use rusqlite::Connection;

pub const GAMES: &str = "games";
pub const SALES_DATA: &str = "sales_data";
pub const RATINGS_DATA: &str = "ratings_data";

/// Tables in creation order; dependents reference `games`.
pub const TABLES: [&str; 3] = [GAMES, SALES_DATA, RATINGS_DATA];

const DROP_TABLES: &str = r#"
DROP TABLE IF EXISTS ratings_data;
DROP TABLE IF EXISTS sales_data;
DROP TABLE IF EXISTS games;
"#;

const CREATE_GAMES: &str = r#"
CREATE TABLE games (
    game_id TEXT PRIMARY KEY,
    title TEXT,
    release_date TEXT
);
"#;

const CREATE_SALES_DATA: &str = r#"
CREATE TABLE sales_data (
    rank INTEGER PRIMARY KEY,
    game_id TEXT,
    name TEXT,
    platform TEXT,
    year INTEGER,
    genre TEXT,
    publisher TEXT,
    na_sales REAL,
    eu_sales REAL,
    jp_sales REAL,
    other_sales REAL,
    global_sales REAL,
    FOREIGN KEY (game_id) REFERENCES games(game_id)
);
"#;

const CREATE_RATINGS_DATA: &str = r#"
CREATE TABLE ratings_data (
    game_id TEXT PRIMARY KEY,
    rating REAL,
    number_of_reviews INTEGER,
    genres TEXT,
    summary TEXT,
    FOREIGN KEY (game_id) REFERENCES games(game_id)
);
"#;

/// Drop (dependents first) and recreate every table. Runs inside the caller's transaction.
pub fn recreate(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(DROP_TABLES)?;
    conn.execute_batch(CREATE_GAMES)?;
    conn.execute_batch(CREATE_SALES_DATA)?;
    conn.execute_batch(CREATE_RATINGS_DATA)?;
    Ok(())
}

/// User tables currently present, sorted by name.
pub fn table_names(conn: &Connection) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(names)
}

/// Column names of a table in declaration order.
pub fn column_names(conn: &Connection, table: &str) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_exactly_three_tables_over_prior_state() {
        let conn = Connection::open_in_memory().expect("in-memory db");
        conn.execute_batch(
            "CREATE TABLE games (legacy TEXT); CREATE TABLE unrelated (x INTEGER);",
        )
        .expect("seed prior state");

        recreate(&conn).expect("recreate");
        recreate(&conn).expect("recreate is repeatable");

        let tables = table_names(&conn).expect("list tables");
        assert_eq!(tables, vec!["games", "ratings_data", "sales_data", "unrelated"]);
        assert_eq!(
            column_names(&conn, GAMES).expect("columns"),
            vec!["game_id", "title", "release_date"]
        );
        assert_eq!(
            column_names(&conn, RATINGS_DATA).expect("columns"),
            vec!["game_id", "rating", "number_of_reviews", "genres", "summary"]
        );
        assert_eq!(column_names(&conn, SALES_DATA).expect("columns").len(), 12);
    }

    #[test]
    fn dependents_declare_foreign_keys_to_games() {
        let conn = Connection::open_in_memory().expect("in-memory db");
        recreate(&conn).expect("recreate");
        for table in [SALES_DATA, RATINGS_DATA] {
            let target: String = conn
                .query_row(
                    &format!("SELECT \"table\" FROM pragma_foreign_key_list('{table}')"),
                    [],
                    |row| row.get(0),
                )
                .expect("fk declared");
            assert_eq!(target, GAMES);
        }
    }
}
