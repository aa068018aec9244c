use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tracing::{info, instrument};

use crate::error::LoadError;

#[derive(Debug, Clone, Copy, Default)]
pub struct DbOptions {
    /// Turn on `PRAGMA foreign_keys`; keys are only declared otherwise.
    pub enforce_foreign_keys: bool,
}

/// Exclusive handle on the destination SQLite file for one run.
///
/// Acquired once with [`Db::open`] and released with [`Db::close`]; dropping
/// the handle on an error path also closes the connection.
#[derive(Debug)]
pub struct Db {
    pub(crate) conn: Connection,
    path: PathBuf,
}

impl Db {
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn open(path: &Path, options: DbOptions) -> Result<Self, LoadError> {
        let conn = Connection::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self {
            conn,
            path: path.to_path_buf(),
        };
        db.apply(options)?;
        info!("connected to sqlite database");
        Ok(db)
    }

    pub fn open_in_memory(options: DbOptions) -> Result<Self, LoadError> {
        let path = PathBuf::from(":memory:");
        let conn = Connection::open_in_memory().map_err(|source| LoadError::Open {
            path: path.clone(),
            source,
        })?;
        let db = Self { conn, path };
        db.apply(options)?;
        Ok(db)
    }

    fn apply(&self, options: DbOptions) -> Result<(), LoadError> {
        self.conn
            .pragma_update(None, "foreign_keys", options.enforce_foreign_keys)
            .map_err(|source| LoadError::Open {
                path: self.path.clone(),
                source,
            })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Release the connection. Consumes the handle so it cannot be closed twice.
    pub fn close(self) -> Result<(), LoadError> {
        let path = self.path;
        self.conn
            .close()
            .map_err(|(_, source)| LoadError::Close { source })?;
        info!(path = %path.display(), "sqlite connection closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foreign_keys_follow_options() {
        let off = Db::open_in_memory(DbOptions::default()).expect("open");
        let on = Db::open_in_memory(DbOptions {
            enforce_foreign_keys: true,
        })
        .expect("open");
        let read = |db: &Db| -> bool {
            db.connection()
                .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
                .expect("pragma")
        };
        assert!(!read(&off));
        assert!(read(&on));
    }

    #[test]
    fn open_fails_for_unreachable_path() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join("missing-dir").join("video_games.db");
        let err = Db::open(&path, DbOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
    }

    #[test]
    fn close_releases_file_handle() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join("video_games.db");
        let db = Db::open(&path, DbOptions::default()).expect("open");
        assert_eq!(db.path(), path.as_path());
        db.close().expect("close");
        // Reopening proves nothing is left locked.
        Db::open(&path, DbOptions::default())
            .expect("reopen")
            .close()
            .expect("close again");
    }
}
