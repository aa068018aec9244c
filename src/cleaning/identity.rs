use std::fmt;

use rusqlite::types::{ToSql, ToSqlOutput};
use uuid::Uuid;

/// Synthetic key minted per cleaned row.
///
/// Rows are never matched across datasets by title, so a sales row and a
/// rating row for the same game carry different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GameId(Uuid);

impl GameId {
    /// Fresh random (v4) id.
    pub fn mint() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl ToSql for GameId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn minted_ids_are_unique_v4() {
        let ids: HashSet<GameId> = (0..1000).map(|_| GameId::mint()).collect();
        assert_eq!(ids.len(), 1000);
        assert!(ids.iter().all(|id| id.as_uuid().get_version_num() == 4));
    }

    #[test]
    fn displays_as_hyphenated_lowercase() {
        let text = GameId::mint().to_string();
        assert_eq!(text.len(), 36);
        assert_eq!(text, text.to_lowercase());
        assert!(Uuid::parse_str(&text).is_ok());
    }
}
