use rusqlite::{params, params_from_iter, Connection};
use std::path::Path;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::dog::Dog;
use crate::error::{Result, StoreError};
use crate::schema::{columns, dogs_table, DOGS_TABLE, SCHEMA_VERSION};

/// Owner of the database handle for the `dogs` table.
///
/// The connection is opened on the first operation and kept until the store
/// is dropped. Each operation runs as a single statement; nothing spans
/// operations.
pub struct DogStore {
    config: StoreConfig,
    connection: Mutex<Option<Connection>>,
}

impl DogStore {
    /// Creates a store for the configured path without touching the disk.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            connection: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        self.config.path()
    }

    pub fn is_open(&self) -> bool {
        self.connection
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Inserts `dog`, fully replacing any row with the same id.
    pub fn upsert(&self, dog: &Dog) -> Result<()> {
        let map = dog.to_map();
        let names: Vec<&str> = map.keys().copied().collect();
        let placeholders: Vec<String> = (1..=names.len()).map(|i| format!("?{i}")).collect();
        let sql = format!(
            "INSERT OR REPLACE INTO {DOGS_TABLE} ({}) VALUES ({})",
            names.join(", "),
            placeholders.join(", ")
        );

        self.with_connection(|conn| {
            conn.execute(&sql, params_from_iter(map.values()))
                .map_err(StoreError::StorageWrite)?;
            debug!(id = dog.id(), "upserted dog");
            Ok(())
        })
    }

    /// Returns every stored dog in storage order.
    pub fn list_all(&self) -> Result<Vec<Dog>> {
        self.with_connection(|conn| {
            let mut stmt = conn
                .prepare(&format!("SELECT * FROM {DOGS_TABLE}"))
                .map_err(StoreError::StorageRead)?;
            let mut rows = stmt.query([]).map_err(StoreError::StorageRead)?;

            let mut dogs = Vec::new();
            while let Some(row) = rows.next().map_err(StoreError::StorageRead)? {
                dogs.push(Dog::from_row(row)?);
            }
            debug!(count = dogs.len(), "listed dogs");
            Ok(dogs)
        })
    }

    /// Overwrites the row whose id matches `dog`. Returns the number of rows
    /// changed; a missing id changes nothing and is not an error.
    pub fn update(&self, dog: &Dog) -> Result<usize> {
        let mut map = dog.to_map();
        let id = map.remove(columns::ID);
        let assignments: Vec<String> = map
            .keys()
            .enumerate()
            .map(|(i, name)| format!("{name} = ?{}", i + 1))
            .collect();
        let sql = format!(
            "UPDATE {DOGS_TABLE} SET {} WHERE {} = ?{}",
            assignments.join(", "),
            columns::ID,
            map.len() + 1
        );

        self.with_connection(|conn| {
            let changed = conn
                .execute(&sql, params_from_iter(map.values().chain(id.iter())))
                .map_err(StoreError::StorageWrite)?;
            debug!(id = dog.id(), changed, "updated dog");
            Ok(changed)
        })
    }

    /// Removes the row with `id`. Returns the number of rows removed.
    pub fn delete(&self, id: i64) -> Result<usize> {
        self.with_connection(|conn| {
            let removed = conn
                .execute(
                    &format!("DELETE FROM {DOGS_TABLE} WHERE {} = ?1", columns::ID),
                    params![id],
                )
                .map_err(StoreError::StorageWrite)?;
            debug!(id, removed, "deleted dog");
            Ok(removed)
        })
    }

    /// Runs `f` against the connection, opening it first if needed. A failed
    /// open leaves the store closed so the next call retries. A poisoned lock
    /// is recovered, since SQLite rolls back any statement a panic interrupted.
    fn with_connection<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let mut guard = self
            .connection
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let conn = match guard.take() {
            Some(conn) => conn,
            None => self.open()?,
        };
        let conn = guard.insert(conn);
        f(conn)
    }

    fn open(&self) -> Result<Connection> {
        let path = self.path();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StoreError::unavailable(path, e))?;
            }
        }

        let conn = Connection::open(path).map_err(|e| StoreError::unavailable(path, e))?;
        initialize_schema(&conn).map_err(|e| StoreError::unavailable(path, e))?;
        info!("opened dog store at {}", path.display());
        Ok(conn)
    }
}

fn initialize_schema(conn: &Connection) -> rusqlite::Result<()> {
    let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    conn.execute(&dogs_table().create_sql(), [])?;

    match version {
        0 => {
            conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
            info!(version = SCHEMA_VERSION, "created {DOGS_TABLE} table");
        }
        SCHEMA_VERSION => {}
        other => warn!(
            found = other,
            expected = SCHEMA_VERSION,
            "unexpected schema version, opening as-is"
        ),
    }
    Ok(())
}
