use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::db::{AlertRecord, DbError, KeyValueStore};

pub const ALERT_HISTORY_KEY: &str = "alert_history";
pub const MAX_ALERT_HISTORY: usize = 50;

/// Capped, newest-first alert history stored as a single JSON array.
#[derive(Clone)]
pub struct AlertHistoryRepository {
    store: KeyValueStore,
}

impl AlertHistoryRepository {
    pub fn new(store: KeyValueStore) -> Self {
        Self { store }
    }

    /// Read failures are logged and surface as an empty history.
    #[instrument(skip(self))]
    pub async fn get_alert_history(&self) -> Vec<AlertRecord> {
        match self.store.get_json::<Vec<AlertRecord>>(ALERT_HISTORY_KEY).await {
            Ok(Some(history)) => {
                debug!("Loaded {} alerts from history", history.len());
                history
            }
            Ok(None) => {
                debug!("No alert history stored yet");
                Vec::new()
            }
            Err(e) => {
                error!("Failed to read alert history, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Prepend `alert`, dropping anything past the cap.
    #[instrument(skip(self, alert), fields(alert_id = %alert.id, alert_type = ?alert.alert_type))]
    pub async fn add_alert(&self, alert: AlertRecord) -> Result<(), DbError> {
        let mut history = self.get_alert_history().await;
        history.insert(0, alert);

        if history.len() > MAX_ALERT_HISTORY {
            debug!(
                "Dropping {} oldest alerts past the cap",
                history.len() - MAX_ALERT_HISTORY
            );
            history.truncate(MAX_ALERT_HISTORY);
        }

        self.store.set_json(ALERT_HISTORY_KEY, &history).await
    }

    /// Returns false when no alert has this id.
    #[instrument(skip(self))]
    pub async fn mark_alert_read(&self, id: Uuid) -> Result<bool, DbError> {
        let mut history = self.get_alert_history().await;

        let Some(alert) = history.iter_mut().find(|a| a.id == id) else {
            debug!("Alert {} not found in history", id);
            return Ok(false);
        };
        alert.read = true;

        self.store.set_json(ALERT_HISTORY_KEY, &history).await?;
        Ok(true)
    }

    /// Returns how many alerts changed from unread to read.
    #[instrument(skip(self))]
    pub async fn mark_all_read(&self) -> Result<usize, DbError> {
        let mut history = self.get_alert_history().await;
        let mut changed = 0;

        for alert in history.iter_mut().filter(|a| !a.read) {
            alert.read = true;
            changed += 1;
        }

        if changed > 0 {
            self.store.set_json(ALERT_HISTORY_KEY, &history).await?;
        }
        info!("Marked {} alerts as read", changed);
        Ok(changed)
    }

    pub async fn unread_count(&self) -> usize {
        self.get_alert_history()
            .await
            .iter()
            .filter(|a| !a.read)
            .count()
    }

    #[instrument(skip(self))]
    pub async fn clear_alert_history(&self) -> Result<(), DbError> {
        self.store.remove(ALERT_HISTORY_KEY).await?;
        info!("Cleared alert history");
        Ok(())
    }
}
