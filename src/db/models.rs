use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// Persisted documents. Wire names are camelCase so the stored JSON matches
// what clients already read.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum AlertType {
    ExtremeHeat,
    FreezeWarning,
    FrostAdvisory,
    HighWind,
    HighHumidity,
}

impl AlertType {
    pub fn title(self) -> &'static str {
        match self {
            AlertType::ExtremeHeat => "Extreme Heat Warning",
            AlertType::FreezeWarning => "Freeze Warning",
            AlertType::FrostAdvisory => "Frost Advisory",
            AlertType::HighWind => "High Wind Warning",
            AlertType::HighHumidity => "High Humidity Advisory",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlertRecord {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub message: String,
    pub severity: AlertSeverity,
    pub city: String,
    /// Epoch milliseconds
    pub timestamp: i64,
    pub read: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationSettings {
    pub enabled: bool,
    pub extreme_heat: bool,
    pub freeze_warning: bool,
    pub high_wind: bool,
    pub heavy_rain: bool,
    pub frost: bool,
    pub humidity: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            extreme_heat: true,
            freeze_warning: true,
            high_wind: true,
            heavy_rain: true,
            frost: true,
            humidity: false,
        }
    }
}

impl NotificationSettings {
    /// Master switch AND the per-type flag.
    pub fn allows(&self, alert_type: AlertType) -> bool {
        if !self.enabled {
            return false;
        }
        match alert_type {
            AlertType::ExtremeHeat => self.extreme_heat,
            AlertType::FreezeWarning => self.freeze_warning,
            AlertType::FrostAdvisory => self.frost,
            AlertType::HighWind => self.high_wind,
            AlertType::HighHumidity => self.humidity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WidgetType {
    CurrentConditions,
    HourlyForecast,
    DailyForecast,
    SevereAlerts,
    PlantingCalendar,
    CropAdvice,
    ElevationZone,
}

impl WidgetType {
    pub const ALL: [WidgetType; 7] = [
        WidgetType::CurrentConditions,
        WidgetType::HourlyForecast,
        WidgetType::DailyForecast,
        WidgetType::SevereAlerts,
        WidgetType::PlantingCalendar,
        WidgetType::CropAdvice,
        WidgetType::ElevationZone,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WidgetType::CurrentConditions => "current_conditions",
            WidgetType::HourlyForecast => "hourly_forecast",
            WidgetType::DailyForecast => "daily_forecast",
            WidgetType::SevereAlerts => "severe_alerts",
            WidgetType::PlantingCalendar => "planting_calendar",
            WidgetType::CropAdvice => "crop_advice",
            WidgetType::ElevationZone => "elevation_zone",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    pub id: String,
    pub widget_type: WidgetType,
    pub enabled: bool,
    pub position: usize,
}

pub fn default_widget_layout() -> Vec<WidgetConfig> {
    WidgetType::ALL
        .into_iter()
        .enumerate()
        .map(|(position, widget_type)| WidgetConfig {
            id: widget_type.as_str().to_string(),
            widget_type,
            enabled: true,
            position,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = NotificationSettings::default();
        assert!(settings.enabled);
        assert!(settings.extreme_heat && settings.freeze_warning && settings.high_wind);
        assert!(settings.heavy_rain && settings.frost);
        assert!(!settings.humidity);
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: NotificationSettings =
            serde_json::from_str(r#"{"enabled": false}"#).unwrap();
        assert!(!settings.enabled);
        assert!(settings.extreme_heat);
        assert!(!settings.humidity);
    }

    #[test]
    fn test_master_switch_gates_everything() {
        let settings = NotificationSettings {
            enabled: false,
            ..NotificationSettings::default()
        };
        assert!(!settings.allows(AlertType::ExtremeHeat));
        assert!(NotificationSettings::default().allows(AlertType::FrostAdvisory));
        assert!(!NotificationSettings::default().allows(AlertType::HighHumidity));
    }

    #[test]
    fn test_alert_record_wire_format() {
        let record = AlertRecord {
            id: Uuid::nil(),
            alert_type: AlertType::ExtremeHeat,
            message: "hot".to_string(),
            severity: AlertSeverity::High,
            city: "Fresno".to_string(),
            timestamp: 1_700_000_000_000,
            read: false,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "extremeHeat");
        assert_eq!(json["severity"], "high");
        assert_eq!(json["timestamp"], 1_700_000_000_000i64);
    }

    #[test]
    fn test_default_widget_layout_positions() {
        let layout = default_widget_layout();
        assert_eq!(layout.len(), WidgetType::ALL.len());
        for (i, widget) in layout.iter().enumerate() {
            assert_eq!(widget.position, i);
            assert!(widget.enabled);
        }
        assert_eq!(layout[0].id, "current_conditions");
    }
}
