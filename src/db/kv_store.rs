use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::db::DbError;

/// Async key-value store holding one JSON document per key.
///
/// Every call is an independent round trip. Read-modify-write sequences
/// built on top of it are not atomic: two concurrent writers to the same
/// key race and the last write wins.
#[derive(Clone)]
pub enum KeyValueStore {
    Postgres(PgPool),
    Memory(Arc<RwLock<HashMap<String, String>>>),
}

impl KeyValueStore {
    pub fn postgres(pool: PgPool) -> Self {
        KeyValueStore::Postgres(pool)
    }

    pub fn in_memory() -> Self {
        KeyValueStore::Memory(Arc::new(RwLock::new(HashMap::new())))
    }

    #[instrument(skip(self))]
    pub async fn get_raw(&self, key: &str) -> Result<Option<String>, DbError> {
        let value = match self {
            KeyValueStore::Postgres(pool) => {
                sqlx::query_scalar::<_, String>("SELECT value FROM kv_store WHERE key = $1")
                    .bind(key)
                    .fetch_optional(pool)
                    .await?
            }
            KeyValueStore::Memory(map) => map.read().await.get(key).cloned(),
        };

        debug!(found = value.is_some(), "Read key");
        Ok(value)
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    pub async fn set_raw(&self, key: &str, value: String) -> Result<(), DbError> {
        match self {
            KeyValueStore::Postgres(pool) => {
                sqlx::query(
                    r#"
                    INSERT INTO kv_store (key, value, updated_at)
                    VALUES ($1, $2, NOW())
                    ON CONFLICT (key) DO UPDATE SET
                        value = EXCLUDED.value,
                        updated_at = NOW()
                    "#,
                )
                .bind(key)
                .bind(value)
                .execute(pool)
                .await?;
            }
            KeyValueStore::Memory(map) => {
                map.write().await.insert(key.to_string(), value);
            }
        }

        debug!("Wrote key");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, key: &str) -> Result<(), DbError> {
        match self {
            KeyValueStore::Postgres(pool) => {
                sqlx::query("DELETE FROM kv_store WHERE key = $1")
                    .bind(key)
                    .execute(pool)
                    .await?;
            }
            KeyValueStore::Memory(map) => {
                map.write().await.remove(key);
            }
        }

        debug!("Removed key");
        Ok(())
    }

    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, DbError> {
        match self.get_raw(key).await? {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), DbError> {
        let text = serde_json::to_string(value)?;
        self.set_raw(key, text).await
    }
}
