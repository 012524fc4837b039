//! Connection provider and scoped sessions

use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rusqlite::{Connection, OpenFlags};

use super::errors::{DbError, DbResult};
use crate::config::DatabaseConfig;

/// Hands out one connection per request.
///
/// The provider never creates a database file; the target must already
/// exist. After [`close`](Self::close) no new sessions are handed out, while
/// sessions already acquired stay usable until dropped.
#[derive(Debug)]
pub struct ConnectionProvider {
    path: PathBuf,
    flags: OpenFlags,
    busy_timeout: Duration,
    closed: AtomicBool,
}

impl ConnectionProvider {
    /// Open a provider and verify the database is reachable
    pub fn open(config: &DatabaseConfig) -> DbResult<Self> {
        let provider = Self {
            path: config.path.clone(),
            flags: open_flags(config.read_only),
            busy_timeout: Duration::from_secs(config.busy_timeout_secs),
            closed: AtomicBool::new(false),
        };

        // Probe once; an unreachable database fails here.
        drop(provider.acquire()?);

        tracing::info!(
            path = %provider.path.display(),
            read_only = config.read_only,
            "connection provider opened"
        );

        Ok(provider)
    }

    /// Acquire a scoped session
    pub fn acquire(&self) -> DbResult<Session> {
        if self.closed.load(Ordering::Acquire) {
            return Err(DbError::Closed);
        }

        let conn = Connection::open_with_flags(&self.path, self.flags)?;
        conn.busy_timeout(self.busy_timeout)?;

        tracing::trace!(path = %self.path.display(), "session acquired");
        Ok(Session { conn })
    }

    /// Stop handing out sessions
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            tracing::info!(path = %self.path.display(), "connection provider closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    pub fn is_read_only(&self) -> bool {
        self.flags.contains(OpenFlags::SQLITE_OPEN_READ_ONLY)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn open_flags(read_only: bool) -> OpenFlags {
    let base = OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    if read_only {
        base | OpenFlags::SQLITE_OPEN_READ_ONLY
    } else {
        base | OpenFlags::SQLITE_OPEN_READ_WRITE
    }
}

/// A connection borrowed for the duration of one request.
///
/// Dropping the session closes the connection.
#[derive(Debug)]
pub struct Session {
    conn: Connection,
}

impl Deref for Session {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        &self.conn
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        tracing::trace!("session released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_db(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("test.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch("CREATE TABLE items (id INTEGER PRIMARY KEY, name TEXT);")
            .unwrap();
        path
    }

    #[test]
    fn test_open_and_acquire() {
        let dir = TempDir::new().unwrap();
        let path = create_db(&dir);

        let provider = ConnectionProvider::open(&DatabaseConfig::with_path(&path)).unwrap();
        let session = provider.acquire().unwrap();
        let count: i64 = session
            .query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
        assert!(!provider.is_read_only());
    }

    #[test]
    fn test_missing_database_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let config = DatabaseConfig::with_path(dir.path().join("absent.db"));

        let result = ConnectionProvider::open(&config);
        assert!(matches!(result, Err(DbError::Unavailable(_))));
        assert!(!dir.path().join("absent.db").exists());
    }

    #[test]
    fn test_acquire_after_close_fails() {
        let dir = TempDir::new().unwrap();
        let path = create_db(&dir);
        let provider = ConnectionProvider::open(&DatabaseConfig::with_path(&path)).unwrap();

        let held = provider.acquire().unwrap();
        provider.close();

        assert!(provider.is_closed());
        assert_eq!(provider.acquire().unwrap_err(), DbError::Closed);
        // Sessions acquired before close remain usable
        assert!(held.execute("INSERT INTO items (name) VALUES ('a')", []).is_ok());
    }

    #[test]
    fn test_read_only_rejects_writes() {
        let dir = TempDir::new().unwrap();
        let path = create_db(&dir);
        let config = DatabaseConfig {
            read_only: true,
            ..DatabaseConfig::with_path(&path)
        };

        let provider = ConnectionProvider::open(&config).unwrap();
        assert!(provider.is_read_only());

        let session = provider.acquire().unwrap();
        assert!(session
            .execute("INSERT INTO items (name) VALUES ('a')", [])
            .is_err());
    }
}
