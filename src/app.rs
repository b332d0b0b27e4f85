use sqlx::PgPool;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::alerts::NotificationCapability;
use crate::api::{create_router, AppState};
use crate::config::Config;
use crate::db::{AlertHistoryRepository, KeyValueStore, SettingsRepository, WidgetLayoutRepository};
use crate::fetcher::WeatherFetcher;
use crate::scheduler;
use crate::services::{AdvisoryService, AlertService, WidgetService};

/// Application with the spawned weather scheduler and HTTP server.
pub struct Application {
    pub server_handle: JoinHandle<Result<(), std::io::Error>>,
    pub weather_scheduler_handle: JoinHandle<()>,
}

/// Wire repositories and services over a key-value store.
pub fn build_state(store: KeyValueStore, notifier: NotificationCapability) -> AppState {
    let history_repo = AlertHistoryRepository::new(store.clone());
    let settings_repo = SettingsRepository::new(store.clone());
    let widget_repo = WidgetLayoutRepository::new(store);

    AppState {
        advisory_service: AdvisoryService::default(),
        alert_service: AlertService::new(history_repo, settings_repo, notifier),
        widget_service: WidgetService::new(widget_repo),
    }
}

impl Application {
    /// Build and initialize the application
    ///
    /// This creates all services, repositories and the fetcher, and spawns:
    /// - HTTP API server (Axum)
    /// - Weather scheduler (configurable interval, default 30 min)
    pub async fn build(config: Config, pool: PgPool) -> Result<Self, Box<dyn std::error::Error>> {
        info!("Initializing application components");

        let notifier = NotificationCapability::resolve(
            config.notifications_enabled,
            config.push_gateway_url.clone(),
            config.push_device_token.clone(),
        );
        info!("Notification channel: {}", notifier.describe());

        let state = build_state(KeyValueStore::postgres(pool), notifier);

        let fetcher = WeatherFetcher::new(
            config.weather_api_url.clone(),
            config.weather_api_key.clone(),
        );

        info!("Spawning weather scheduler");
        let weather_scheduler_handle = {
            let fetcher_clone = fetcher.clone();
            let alert_service_clone = state.alert_service.clone();
            let cities = config.weather_cities.clone();
            let interval = config.refresh_interval_minutes;
            let concurrency = config.fetch_concurrency;

            tokio::spawn(async move {
                scheduler::start_weather_scheduler(
                    fetcher_clone,
                    alert_service_clone,
                    cities,
                    interval,
                    concurrency,
                )
                .await;
            })
        };

        let app = create_router(state).layer(TraceLayer::new_for_http());

        let addr = config.server_addr();
        info!("Starting HTTP server on {}", addr);

        let server_handle = tokio::spawn(async move {
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            axum::serve(listener, app).await
        });

        info!("Application initialized successfully");

        Ok(Self {
            server_handle,
            weather_scheduler_handle,
        })
    }

    /// Run until the server stops. The scheduler runs in the background.
    pub async fn run_until_stopped(self) -> Result<(), Box<dyn std::error::Error>> {
        self.server_handle.await??;
        Ok(())
    }
}
