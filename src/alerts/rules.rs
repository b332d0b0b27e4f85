use uuid::Uuid;

use crate::db::{AlertRecord, AlertSeverity, AlertType, NotificationSettings};
use crate::fetcher::WeatherReading;

pub const EXTREME_HEAT_F: f64 = 95.0;
pub const FREEZE_F: f64 = 32.0;
pub const FROST_CEILING_F: f64 = 40.0;
pub const HIGH_WIND_MPH: f64 = 30.0;
pub const HIGH_HUMIDITY_PCT: f64 = 85.0;
pub const HUMID_HEAT_F: f64 = 75.0;

/// A single threshold condition over a weather reading.
pub trait AlertRule: Send + Sync {
    fn alert_type(&self) -> AlertType;

    fn severity(&self) -> AlertSeverity;

    /// Message for the alert record, or `None` when the condition is not met.
    fn evaluate(&self, reading: &WeatherReading, city: &str) -> Option<String>;
}

pub struct ExtremeHeatRule;

impl AlertRule for ExtremeHeatRule {
    fn alert_type(&self) -> AlertType {
        AlertType::ExtremeHeat
    }

    fn severity(&self) -> AlertSeverity {
        AlertSeverity::High
    }

    fn evaluate(&self, reading: &WeatherReading, city: &str) -> Option<String> {
        (reading.temperature_f > EXTREME_HEAT_F).then(|| {
            format!(
                "Extreme heat in {}: {:.0}°F. Limit outdoor work and water crops early.",
                city, reading.temperature_f
            )
        })
    }
}

pub struct FreezeWarningRule;

impl AlertRule for FreezeWarningRule {
    fn alert_type(&self) -> AlertType {
        AlertType::FreezeWarning
    }

    fn severity(&self) -> AlertSeverity {
        AlertSeverity::High
    }

    fn evaluate(&self, reading: &WeatherReading, city: &str) -> Option<String> {
        (reading.temperature_f < FREEZE_F).then(|| {
            format!(
                "Freezing temperatures in {}: {:.0}°F. Protect tender plants and exposed pipes.",
                city, reading.temperature_f
            )
        })
    }
}

pub struct FrostAdvisoryRule;

impl AlertRule for FrostAdvisoryRule {
    fn alert_type(&self) -> AlertType {
        AlertType::FrostAdvisory
    }

    fn severity(&self) -> AlertSeverity {
        AlertSeverity::Medium
    }

    fn evaluate(&self, reading: &WeatherReading, city: &str) -> Option<String> {
        let t = reading.temperature_f;
        (t >= FREEZE_F && t < FROST_CEILING_F).then(|| {
            format!(
                "Frost possible in {}: {:.0}°F. Cover sensitive crops tonight.",
                city, t
            )
        })
    }
}

pub struct HighWindRule;

impl AlertRule for HighWindRule {
    fn alert_type(&self) -> AlertType {
        AlertType::HighWind
    }

    fn severity(&self) -> AlertSeverity {
        AlertSeverity::High
    }

    fn evaluate(&self, reading: &WeatherReading, city: &str) -> Option<String> {
        (reading.wind_speed_mph > HIGH_WIND_MPH).then(|| {
            format!(
                "High winds in {}: {:.0} mph. Secure row covers and stake tall plants.",
                city, reading.wind_speed_mph
            )
        })
    }
}

pub struct HighHumidityRule;

impl AlertRule for HighHumidityRule {
    fn alert_type(&self) -> AlertType {
        AlertType::HighHumidity
    }

    fn severity(&self) -> AlertSeverity {
        AlertSeverity::Medium
    }

    fn evaluate(&self, reading: &WeatherReading, city: &str) -> Option<String> {
        (reading.humidity_pct > HIGH_HUMIDITY_PCT && reading.temperature_f > HUMID_HEAT_F).then(|| {
            format!(
                "Hot and humid in {}: {:.0}% humidity at {:.0}°F. Watch for fungal disease.",
                city, reading.humidity_pct, reading.temperature_f
            )
        })
    }
}

/// Runs every threshold rule against a reading.
///
/// Rules are independent; several can fire for the same reading. Nothing
/// is remembered between calls, so an unchanged reading fires the same
/// alerts every time.
pub struct AlertEvaluator {
    rules: Vec<Box<dyn AlertRule>>,
}

impl AlertEvaluator {
    pub fn new() -> Self {
        let rules: Vec<Box<dyn AlertRule>> = vec![
            Box::new(ExtremeHeatRule),
            Box::new(FreezeWarningRule),
            Box::new(FrostAdvisoryRule),
            Box::new(HighWindRule),
            Box::new(HighHumidityRule),
        ];

        Self { rules }
    }

    pub fn evaluate_conditions(
        &self,
        reading: &WeatherReading,
        settings: &NotificationSettings,
        city: &str,
        timestamp_ms: i64,
    ) -> Vec<AlertRecord> {
        if !settings.enabled {
            return Vec::new();
        }

        self.rules
            .iter()
            .filter(|rule| settings.allows(rule.alert_type()))
            .filter_map(|rule| {
                let message = rule.evaluate(reading, city)?;
                Some(AlertRecord {
                    id: Uuid::new_v4(),
                    alert_type: rule.alert_type(),
                    message,
                    severity: rule.severity(),
                    city: city.to_string(),
                    timestamp: timestamp_ms,
                    read: false,
                })
            })
            .collect()
    }

    pub fn alert_types(&self) -> Vec<AlertType> {
        self.rules.iter().map(|r| r.alert_type()).collect()
    }
}

impl Default for AlertEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn reading(temperature_f: f64, wind_speed_mph: f64, humidity_pct: f64) -> WeatherReading {
        WeatherReading {
            city: "Testville".to_string(),
            temperature_f,
            feels_like_f: None,
            humidity_pct,
            wind_speed_mph,
            wind_gust_mph: 0.0,
            rain_1h_in: 0.0,
            conditions: None,
            observed_at: Utc::now(),
        }
    }

    fn all_enabled() -> NotificationSettings {
        NotificationSettings {
            humidity: true,
            ..NotificationSettings::default()
        }
    }

    fn types(records: &[AlertRecord]) -> Vec<AlertType> {
        records.iter().map(|r| r.alert_type).collect()
    }

    #[test]
    fn test_heat_only() {
        let evaluator = AlertEvaluator::new();
        let alerts = evaluator.evaluate_conditions(&reading(96.0, 10.0, 50.0), &all_enabled(), "Testville", 1);
        assert_eq!(types(&alerts), vec![AlertType::ExtremeHeat]);
        assert_eq!(alerts[0].severity, AlertSeverity::High);
        assert_eq!(alerts[0].city, "Testville");
        assert!(!alerts[0].read);
    }

    #[test]
    fn test_frost_and_wind_without_humidity() {
        let evaluator = AlertEvaluator::new();
        let alerts = evaluator.evaluate_conditions(&reading(36.0, 35.0, 90.0), &all_enabled(), "Testville", 1);
        assert_eq!(types(&alerts), vec![AlertType::FrostAdvisory, AlertType::HighWind]);
        assert_eq!(alerts[0].severity, AlertSeverity::Medium);
        assert_eq!(alerts[1].severity, AlertSeverity::High);
    }

    #[test]
    fn test_temperature_boundaries() {
        let evaluator = AlertEvaluator::new();
        let s = all_enabled();
        assert!(evaluator.evaluate_conditions(&reading(95.0, 0.0, 0.0), &s, "c", 1).is_empty());
        assert_eq!(
            types(&evaluator.evaluate_conditions(&reading(32.0, 0.0, 0.0), &s, "c", 1)),
            vec![AlertType::FrostAdvisory]
        );
        assert_eq!(
            types(&evaluator.evaluate_conditions(&reading(31.9, 0.0, 0.0), &s, "c", 1)),
            vec![AlertType::FreezeWarning]
        );
        assert!(evaluator.evaluate_conditions(&reading(40.0, 0.0, 0.0), &s, "c", 1).is_empty());
        assert!(evaluator.evaluate_conditions(&reading(60.0, 30.0, 0.0), &s, "c", 1).is_empty());
    }

    #[test]
    fn test_humid_heat() {
        let evaluator = AlertEvaluator::new();
        let alerts = evaluator.evaluate_conditions(&reading(80.0, 5.0, 90.0), &all_enabled(), "c", 1);
        assert_eq!(types(&alerts), vec![AlertType::HighHumidity]);

        // Humidity is off by default
        let alerts = evaluator.evaluate_conditions(&reading(80.0, 5.0, 90.0), &NotificationSettings::default(), "c", 1);
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_master_switch_off() {
        let evaluator = AlertEvaluator::new();
        let settings = NotificationSettings {
            enabled: false,
            ..all_enabled()
        };
        assert!(evaluator.evaluate_conditions(&reading(100.0, 50.0, 95.0), &settings, "c", 1).is_empty());
    }

    #[test]
    fn test_individual_gate() {
        let evaluator = AlertEvaluator::new();
        let settings = NotificationSettings {
            high_wind: false,
            ..all_enabled()
        };
        let alerts = evaluator.evaluate_conditions(&reading(100.0, 50.0, 10.0), &settings, "c", 1);
        assert_eq!(types(&alerts), vec![AlertType::ExtremeHeat]);
    }

    #[test]
    fn test_repeat_evaluation_fires_again() {
        let evaluator = AlertEvaluator::new();
        let r = reading(20.0, 0.0, 0.0);
        let first = evaluator.evaluate_conditions(&r, &all_enabled(), "c", 1);
        let second = evaluator.evaluate_conditions(&r, &all_enabled(), "c", 2);
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_ne!(first[0].id, second[0].id);
    }

    #[test]
    fn test_rule_set() {
        assert_eq!(AlertEvaluator::new().alert_types().len(), 5);
    }
}
