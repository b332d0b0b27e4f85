pub mod advisory_service;
pub mod alert_service;
pub mod widget_service;

pub use advisory_service::AdvisoryService;
pub use alert_service::AlertService;
pub use widget_service::WidgetService;
