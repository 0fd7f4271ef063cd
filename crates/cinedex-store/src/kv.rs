//! Key-value helpers over the `kv` table.

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};

/// Reads a value, `None` when the key is absent.
///
/// # Errors
///
/// Returns an error if the query fails.
pub(crate) fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
    conn.query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
        row.get(0)
    })
    .optional()
    .with_context(|| format!("failed to read kv key {key}"))
}

/// Writes a value, replacing any existing one.
///
/// # Errors
///
/// Returns an error if the statement fails.
pub(crate) fn put(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO kv (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )
    .with_context(|| format!("failed to write kv key {key}"))?;
    Ok(())
}

/// Deletes a key, ignoring absent keys.
///
/// # Errors
///
/// Returns an error if the statement fails.
pub(crate) fn delete(conn: &Connection, key: &str) -> Result<()> {
    conn.execute("DELETE FROM kv WHERE key = ?1", params![key])
        .with_context(|| format!("failed to delete kv key {key}"))?;
    Ok(())
}
