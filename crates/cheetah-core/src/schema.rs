// crates/cheetah-core/src/schema.rs - Fixed sheet schema

use rusqlite::Connection;

/// The schema script every sheet is created from
///
/// Three relations: `commands`, `tags` (unique text), and the `command_tags`
/// join with cascading foreign keys and a `(command_id, tag_id)` uniqueness
/// constraint.
pub const SCHEMA: &str = include_str!("../sql/schema.sql");

/// Apply the schema inside a single transaction
pub(crate) fn apply(conn: &mut Connection) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(SCHEMA)?;
    tx.commit()
}

/// Turn on foreign-key enforcement for this connection
///
/// SQLite ships with enforcement off and ignores the pragma inside an open
/// transaction, so this must run right after the connection is opened.
pub(crate) fn enable_foreign_keys(conn: &Connection) -> rusqlite::Result<()> {
    conn.pragma_update(None, "foreign_keys", true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_schema_creates_three_tables() {
        let mut conn = Connection::open_in_memory().unwrap();
        apply(&mut conn).unwrap();
        assert_eq!(table_names(&conn), vec!["command_tags", "commands", "tags"]);
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let conn = Connection::open_in_memory().unwrap();
        enable_foreign_keys(&conn).unwrap();
        let on: bool = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert!(on);
    }

    #[test]
    fn test_duplicate_association_rejected() {
        let mut conn = Connection::open_in_memory().unwrap();
        enable_foreign_keys(&conn).unwrap();
        apply(&mut conn).unwrap();
        conn.execute("INSERT INTO commands (tool) VALUES ('git')", []).unwrap();
        conn.execute("INSERT INTO tags (tag) VALUES ('vcs')", []).unwrap();
        conn.execute("INSERT INTO command_tags VALUES (1, 1)", []).unwrap();
        assert!(conn.execute("INSERT INTO command_tags VALUES (1, 1)", []).is_err());
    }
}
