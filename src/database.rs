//! Store abstraction, redb-backed implementation and shared application state
//!
//! Records live in an embedded redb database running on redb's in-memory
//! backend, so nothing survives a restart. Each store is one table whose
//! values are JSON-serialized records.

use std::{marker::PhantomData, sync::Arc};

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use redb::{
    backends::InMemoryBackend, Database, ReadableDatabase, ReadableTable, TableDefinition,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::StoreError;
use crate::model::{Account, UrlRecord};

/// URL records
///
/// Key: short code (e.g., "b2xVn2")
/// Value: JSON-serialized [`UrlRecord`]
pub const TABLE_URLS: TableDefinition<&str, &str> = TableDefinition::new("urls_v1");

/// Registered accounts
///
/// Key: account id
/// Value: JSON-serialized [`Account`]
pub const TABLE_ACCOUNTS: TableDefinition<&str, &str> = TableDefinition::new("accounts_v1");

/// Key-value store of records addressed by a string key
///
/// Handlers only ever talk to this trait, which keeps them independent of
/// the backing database and lets tests build isolated stores.
pub trait Store<V>: Send + Sync {
    /// Looks up a single record.
    fn get(&self, key: &str) -> Result<Option<V>, StoreError>;

    /// Inserts or replaces the record under `key`.
    fn put(&self, key: &str, value: &V) -> Result<(), StoreError>;

    /// Removes a record, returning it if it existed.
    fn delete(&self, key: &str) -> Result<Option<V>, StoreError>;

    /// Returns every record in key order.
    fn scan(&self) -> Result<Vec<V>, StoreError>;
}

/// A [`Store`] backed by a single redb table
pub struct RedbStore<V> {
    db: Arc<Database>,
    table: TableDefinition<'static, &'static str, &'static str>,
    _record: PhantomData<fn() -> V>,
}

impl<V> RedbStore<V> {
    pub fn new(db: Arc<Database>, table: TableDefinition<'static, &'static str, &'static str>) -> Self {
        Self {
            db,
            table,
            _record: PhantomData,
        }
    }
}

impl<V> Store<V> for RedbStore<V>
where
    V: Serialize + DeserializeOwned,
{
    fn get(&self, key: &str) -> Result<Option<V>, StoreError> {
        let read_txn = self.db.begin_read().map_err(redb::Error::from)?;
        let table = read_txn.open_table(self.table).map_err(redb::Error::from)?;

        let record = match table.get(key).map_err(redb::Error::from)? {
            Some(guard) => Some(serde_json::from_str::<V>(guard.value())?),
            None => None,
        };
        Ok(record)
    }

    fn put(&self, key: &str, value: &V) -> Result<(), StoreError> {
        let record_json = serde_json::to_string(value)?;

        let write_txn = self.db.begin_write().map_err(redb::Error::from)?;
        {
            let mut table = write_txn.open_table(self.table).map_err(redb::Error::from)?;
            table
                .insert(key, record_json.as_str())
                .map_err(redb::Error::from)?;
        }
        write_txn.commit().map_err(redb::Error::from)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<Option<V>, StoreError> {
        let write_txn = self.db.begin_write().map_err(redb::Error::from)?;
        let removed = {
            let mut table = write_txn.open_table(self.table).map_err(redb::Error::from)?;
            let guard = table.remove(key).map_err(redb::Error::from)?;
            guard
                .map(|guard| serde_json::from_str::<V>(guard.value()))
                .transpose()?
        };
        write_txn.commit().map_err(redb::Error::from)?;
        Ok(removed)
    }

    fn scan(&self) -> Result<Vec<V>, StoreError> {
        let read_txn = self.db.begin_read().map_err(redb::Error::from)?;
        let table = read_txn.open_table(self.table).map_err(redb::Error::from)?;

        let mut records = Vec::new();
        for entry in table.iter().map_err(redb::Error::from)? {
            let (_, value) = entry.map_err(redb::Error::from)?;
            records.push(serde_json::from_str::<V>(value.value())?);
        }
        Ok(records)
    }
}

/// Creates the in-memory database and the tables the stores expect
///
/// Tables have to exist before the first read transaction opens them.
pub fn init_db() -> Result<Database, redb::Error> {
    let db = Database::builder().create_with_backend(InMemoryBackend::new())?;

    let write_txn = db.begin_write()?;
    {
        write_txn.open_table(TABLE_URLS)?;
        write_txn.open_table(TABLE_ACCOUNTS)?;
    }
    write_txn.commit()?;

    Ok(db)
}

/// Application state shared across all request handlers
///
/// Constructed once at startup; cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub urls: Arc<dyn Store<UrlRecord>>,
    pub accounts: Arc<dyn Store<Account>>,

    /// Signs and verifies the session cookie
    pub cookie_key: Key,
}

impl AppState {
    /// Builds empty URL and account stores on a fresh in-memory database.
    pub fn in_memory(cookie_key: Key) -> Result<Self, StoreError> {
        let db = Arc::new(init_db()?);

        Ok(Self {
            urls: Arc::new(RedbStore::<UrlRecord>::new(db.clone(), TABLE_URLS)),
            accounts: Arc::new(RedbStore::<Account>::new(db, TABLE_ACCOUNTS)),
            cookie_key,
        })
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Records every fresh process starts with.
///
/// They are stored without an owner rather than under a placeholder user id
/// such as `"1"`, which a registered account could end up holding. Nobody
/// can edit or delete them.
pub fn seed_urls(urls: &dyn Store<UrlRecord>) -> Result<(), StoreError> {
    for (short_code, long_url) in [
        ("b2xVn2", "http://www.lighthouselabs.ca"),
        ("9sm5xK", "http://www.google.com"),
    ] {
        let record = UrlRecord::new(short_code.to_string(), long_url.to_string(), None);
        urls.put(short_code, &record)?;
    }
    Ok(())
}
