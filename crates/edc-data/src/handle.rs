//! Process-wide read-only database handle.
//!
//! The DuckDB file is opened once, lazily, the first time a request needs
//! it, and shared by every request afterwards. It is always opened with
//! `access_mode = READ_ONLY`; other readers may hold the file at the same
//! time.
//!
//! There is no hot reload: if the file is replaced while the server runs,
//! the process keeps serving the database it opened. Restart to pick up a
//! new file.

use crate::error::{DataError, Result};
use duckdb::{AccessMode, Config, Connection};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, error, info, warn};

/// Directory, relative to the parent of the application root, holding the
/// database file.
pub const DATABASE_DIR: &str = "database";

/// Database file name.
pub const DATABASE_FILE: &str = "data.duckdb";

/// Default database location for an application rooted at `app_root`:
/// `<app_root>/../database/data.duckdb`.
pub fn default_database_path(app_root: &Path) -> PathBuf {
    app_root.join("..").join(DATABASE_DIR).join(DATABASE_FILE)
}

/// An open, read-only DuckDB database.
///
/// Holds one root connection; [`connect`](Self::connect) hands out fresh
/// connections to the same database instance.
pub struct DatabaseHandle {
    path: PathBuf,
    /// Root connection. `Connection` is `Send` but not `Sync`, so it sits
    /// behind a mutex that is held only while cloning.
    root: Mutex<Connection>,
}

impl DatabaseHandle {
    /// Open `path` read-only.
    ///
    /// # Errors
    ///
    /// `DataError::Configuration` if the file does not exist (an empty
    /// database is never created), `DataError::Open` if DuckDB cannot open it.
    pub fn open_read_only(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            warn!(path = %path.display(), "Database file not found");
            return Err(DataError::not_found(path));
        }

        let open_error = |source: duckdb::Error| {
            error!(path = %path.display(), error = %source, "Failed to open database");
            DataError::Open {
                path: path.to_path_buf(),
                source,
            }
        };
        let config = Config::default()
            .access_mode(AccessMode::ReadOnly)
            .map_err(open_error)?;
        let connection = Connection::open_with_flags(path, config).map_err(open_error)?;

        info!(path = %path.display(), "Opened DuckDB database (read-only)");

        Ok(Self {
            path: path.to_path_buf(),
            root: Mutex::new(connection),
        })
    }

    /// Open a new connection against the shared database.
    pub fn connect(&self) -> Result<Connection> {
        let connection = self.root.lock().try_clone()?;
        debug!(path = %self.path.display(), "Opened DuckDB connection");
        Ok(connection)
    }
}

impl std::fmt::Debug for DatabaseHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseHandle")
            .field("path", &self.path)
            .field("access_mode", &"READ_ONLY")
            .finish()
    }
}

/// Lazily initializes and then shares a single [`DatabaseHandle`].
///
/// Cheap to share behind an `Arc`; the handle itself is created at most
/// once per provider. A failed initialization is not cached, so a file
/// that appears later is picked up by the next call.
#[derive(Debug)]
pub struct HandleProvider {
    path: PathBuf,
    handle: OnceCell<Arc<DatabaseHandle>>,
}

impl HandleProvider {
    /// Provider for the database file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            handle: OnceCell::new(),
        }
    }

    /// Whether the handle has been opened yet.
    pub fn is_initialized(&self) -> bool {
        self.handle.initialized()
    }

    /// Return the shared handle, opening the database on first use.
    ///
    /// Concurrent first callers wait on the same initialization.
    pub async fn get_handle(&self) -> Result<Arc<DatabaseHandle>> {
        self.handle
            .get_or_try_init(|| async {
                info!(path = %self.path.display(), "Create DB instance...");
                DatabaseHandle::open_read_only(&self.path).map(Arc::new)
            })
            .await
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn create_database(path: &Path) {
        let conn = Connection::open(path).unwrap();
        conn.execute_batch("CREATE TABLE t (x INTEGER); INSERT INTO t VALUES (1), (2);")
            .unwrap();
    }

    #[test]
    fn test_default_path_is_sibling_database_dir() {
        let path = default_database_path(Path::new("/srv/app/webapp"));
        assert_eq!(
            path,
            PathBuf::from("/srv/app/webapp/../database/data.duckdb")
        );
    }

    #[test]
    fn test_missing_file_is_configuration_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.duckdb");

        let err = DatabaseHandle::open_read_only(&path).unwrap_err();
        assert!(matches!(err, DataError::Configuration { .. }));
        // Must not create an empty database as a side effect
        assert!(!path.exists());
    }

    #[test]
    fn test_handle_refuses_writes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.duckdb");
        create_database(&path);

        let handle = DatabaseHandle::open_read_only(&path).unwrap();
        let conn = handle.connect().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM t", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 2);
        assert!(conn.execute("INSERT INTO t VALUES (3)", []).is_err());
    }

    #[tokio::test]
    async fn test_provider_initializes_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.duckdb");
        create_database(&path);

        let provider = HandleProvider::new(&path);
        assert!(!provider.is_initialized());

        let first = provider.get_handle().await.unwrap();
        let second = provider.get_handle().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(provider.is_initialized());
    }

    #[tokio::test]
    async fn test_provider_retries_after_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.duckdb");
        let provider = HandleProvider::new(&path);

        let err = provider.get_handle().await.unwrap_err();
        assert!(err.is_configuration());
        assert!(!provider.is_initialized());

        create_database(&path);
        assert!(provider.get_handle().await.is_ok());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_open_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.duckdb");
        std::fs::write(&path, b"this is not a duckdb file").unwrap();

        let provider = HandleProvider::new(&path);
        let err = provider.get_handle().await.unwrap_err();
        assert!(matches!(err, DataError::Open { .. }));
        assert_eq!(err.to_string(), "Failed to open database.");
        assert!(!err.to_string().contains(&*path.to_string_lossy()));
        assert!(!provider.is_initialized());
    }
}
