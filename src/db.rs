pub mod alert_history_repository;
pub mod error;
pub mod kv_store;
pub mod models;
pub mod settings_repository;
pub mod widget_layout_repository;

pub use alert_history_repository::AlertHistoryRepository;
pub use error::DbError;
pub use kv_store::KeyValueStore;
pub use models::*;
pub use settings_repository::SettingsRepository;
pub use widget_layout_repository::WidgetLayoutRepository;
