pub mod notifier;
pub mod rules;

pub use notifier::{Notification, NotificationCapability, NotifyError};
pub use rules::{AlertEvaluator, AlertRule};
