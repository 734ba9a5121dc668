/// Schema versioning for the state database
///
/// Each migration is a batch of SQL tagged with the version it brings the
/// database to. Pending steps run in order, each inside its own transaction
/// together with the version bump.

use rusqlite::Connection;
use crate::storage::StorageError;

/// One schema step
struct Migration {
    version: i32,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    description: "app_state table",
    sql: "CREATE TABLE IF NOT EXISTS app_state (
              profile TEXT PRIMARY KEY,
              state_json TEXT NOT NULL,
              updated_at TEXT NOT NULL
          );",
}];

/// Highest version this build knows how to read
fn latest_version() -> i32 {
    MIGRATIONS.last().map(|m| m.version).unwrap_or(0)
}

/// Bring the schema up to date
///
/// Runs on every open. A file written by a newer build is refused rather
/// than guessed at.
pub fn initialize_database(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY);")?;

    let stored = stored_version(conn)?;
    let latest = latest_version();
    if stored > latest {
        return Err(StorageError::Migration(format!(
            "database is at schema version {}, this build supports up to {}",
            stored, latest
        )));
    }

    for step in MIGRATIONS.iter().filter(|m| m.version > stored) {
        apply(conn, step)?;
    }
    Ok(())
}

/// Stored schema version, 0 for a fresh file
fn stored_version(conn: &Connection) -> Result<i32, StorageError> {
    let version: Option<i32> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(version.unwrap_or(0))
}

fn apply(conn: &Connection, step: &Migration) -> Result<(), StorageError> {
    conn.execute_batch(&format!(
        "BEGIN;
         {}
         DELETE FROM schema_version;
         INSERT INTO schema_version (version) VALUES ({});
         COMMIT;",
        step.sql, step.version
    ))
    .map_err(|e| {
        // Leave the file at the previous version if the step failed
        let _ = conn.execute_batch("ROLLBACK;");
        StorageError::Migration(format!("v{} ({}) failed: {}", step.version, step.description, e))
    })?;

    tracing::info!("Applied migration v{}: {}", step.version, step.description);
    Ok(())
}
