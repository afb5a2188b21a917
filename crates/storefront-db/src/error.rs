//! Mapping of rusqlite failures onto the storefront error categories.

use rusqlite::ErrorCode;
use storefront_common::Error;

/// Returns true when SQLite rejected a write because of a constraint.
pub fn is_constraint_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation
    )
}

/// Classify a failure raised while writing rows.
pub fn write_error(e: rusqlite::Error) -> Error {
    if is_constraint_violation(&e) {
        Error::constraint(e.to_string())
    } else {
        Error::database(e)
    }
}

/// Classify a failure raised while running a read query.
pub fn query_error(e: rusqlite::Error) -> Error {
    Error::query(e.to_string())
}

/// Classify a failure raised while creating tables.
pub fn schema_error(e: rusqlite::Error) -> Error {
    Error::schema(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rusqlite::Connection;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY);")
            .unwrap();
        conn
    }

    #[test]
    fn duplicate_key_is_constraint() {
        let conn = conn();
        conn.execute("INSERT INTO t (id) VALUES (1)", []).unwrap();
        let err = conn.execute("INSERT INTO t (id) VALUES (1)", []).unwrap_err();
        assert!(is_constraint_violation(&err));
        assert_matches!(write_error(err), Error::Constraint(_));
    }

    #[test]
    fn missing_table_is_not_constraint() {
        let conn = conn();
        let err = conn
            .execute("INSERT INTO missing (id) VALUES (1)", [])
            .unwrap_err();
        assert!(!is_constraint_violation(&err));
        assert_matches!(write_error(err), Error::Database { .. });
    }

    #[test]
    fn read_and_schema_categories() {
        let conn = conn();
        let err = conn.prepare("SELECT nope FROM t").unwrap_err();
        assert_matches!(query_error(err), Error::Query(msg) if msg.contains("nope"));

        let err = conn.execute_batch("CREATE TABLE t (id INTEGER);").unwrap_err();
        assert_matches!(schema_error(err), Error::Schema(msg) if msg.contains("already exists"));
    }
}
