use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::alerts::{AlertEvaluator, Notification, NotificationCapability};
use crate::db::{AlertHistoryRepository, AlertRecord, DbError, NotificationSettings, SettingsRepository};
use crate::fetcher::WeatherReading;

#[derive(Clone)]
pub struct AlertService {
    history_repo: AlertHistoryRepository,
    settings_repo: SettingsRepository,
    evaluator: Arc<AlertEvaluator>,
    notifier: NotificationCapability,
}

impl AlertService {
    pub fn new(
        history_repo: AlertHistoryRepository,
        settings_repo: SettingsRepository,
        notifier: NotificationCapability,
    ) -> Self {
        let evaluator = AlertEvaluator::new();
        debug!(rules = ?evaluator.alert_types(), "Alert evaluator ready");
        Self {
            history_repo,
            settings_repo,
            evaluator: Arc::new(evaluator),
            notifier,
        }
    }

    /// Evaluate a reading against the stored settings, notify and record.
    ///
    /// Each fired alert is dispatched on its own task and appended to the
    /// history without waiting for delivery. Dispatch and store failures
    /// are logged; the fired alerts are returned either way.
    #[instrument(skip(self, reading), fields(city = %city, temperature_f = reading.temperature_f))]
    pub async fn evaluate_conditions(&self, reading: &WeatherReading, city: &str) -> Vec<AlertRecord> {
        let settings = self.settings_repo.get_settings().await;
        let now_ms = Utc::now().timestamp_millis();
        let alerts = self
            .evaluator
            .evaluate_conditions(reading, &settings, city, now_ms);

        if alerts.is_empty() {
            debug!("No alert thresholds crossed for {}", city);
            return alerts;
        }
        info!("{} alert(s) fired for {}", alerts.len(), city);

        for alert in &alerts {
            self.spawn_dispatch(alert);

            if let Err(e) = self.history_repo.add_alert(alert.clone()).await {
                error!("Failed to record alert {} in history: {}", alert.id, e);
            }
        }

        alerts
    }

    fn spawn_dispatch(&self, alert: &AlertRecord) {
        if !self.notifier.is_available() {
            debug!("Notification dispatch unavailable, alert {} recorded only", alert.id);
            return;
        }

        let notifier = self.notifier.clone();
        let notification = Notification::for_alert(alert);
        let alert_id = alert.id;
        tokio::spawn(async move {
            if let Err(e) = notifier.dispatch(&notification).await {
                warn!("Failed to dispatch notification for alert {}: {}", alert_id, e);
            }
        });
    }

    pub async fn get_alert_history(&self) -> Vec<AlertRecord> {
        self.history_repo.get_alert_history().await
    }

    pub async fn mark_alert_read(&self, id: Uuid) -> Result<bool, DbError> {
        self.history_repo.mark_alert_read(id).await
    }

    pub async fn mark_all_read(&self) -> Result<usize, DbError> {
        self.history_repo.mark_all_read().await
    }

    pub async fn unread_count(&self) -> usize {
        self.history_repo.unread_count().await
    }

    pub async fn clear_alert_history(&self) -> Result<(), DbError> {
        self.history_repo.clear_alert_history().await
    }

    pub async fn get_settings(&self) -> NotificationSettings {
        self.settings_repo.get_settings().await
    }

    pub async fn save_settings(&self, settings: &NotificationSettings) -> Result<(), DbError> {
        self.settings_repo.save_settings(settings).await
    }
}
