use tracing::{debug, error, info, instrument};

use crate::db::{DbError, KeyValueStore, NotificationSettings};

pub const SETTINGS_KEY: &str = "notification_settings";

#[derive(Clone)]
pub struct SettingsRepository {
    store: KeyValueStore,
}

impl SettingsRepository {
    pub fn new(store: KeyValueStore) -> Self {
        Self { store }
    }

    /// An absent record, or one that cannot be read, yields the defaults.
    #[instrument(skip(self))]
    pub async fn get_settings(&self) -> NotificationSettings {
        match self.store.get_json::<NotificationSettings>(SETTINGS_KEY).await {
            Ok(Some(settings)) => settings,
            Ok(None) => {
                debug!("No notification settings stored, using defaults");
                NotificationSettings::default()
            }
            Err(e) => {
                error!("Failed to read notification settings, using defaults: {}", e);
                NotificationSettings::default()
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn save_settings(&self, settings: &NotificationSettings) -> Result<(), DbError> {
        self.store.set_json(SETTINGS_KEY, settings).await?;
        info!("Saved notification settings");
        Ok(())
    }
}
