use std::env;

const DEFAULT_REFRESH_INTERVAL_MINUTES: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub weather_api_url: String,
    pub weather_api_key: String,
    pub weather_cities: Vec<String>,
    pub refresh_interval_minutes: u64,
    pub fetch_concurrency: usize,
    pub notifications_enabled: bool,
    pub push_gateway_url: Option<String>,
    pub push_device_token: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Config {
            database_url: env::var("DATABASE_URL")?,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            weather_api_url: env::var("WEATHER_API_URL")?,
            weather_api_key: env::var("WEATHER_API_KEY")?,
            weather_cities: parse_city_list(&env::var("WEATHER_CITIES").unwrap_or_default()),
            refresh_interval_minutes: parse_refresh_interval(
                &env::var("WEATHER_REFRESH_INTERVAL_MINUTES").unwrap_or_default(),
            ),
            fetch_concurrency: env::var("WEATHER_FETCH_CONCURRENCY")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .unwrap_or(4),
            notifications_enabled: env::var("NOTIFICATIONS_ENABLED")
                .map(|v| !matches!(v.trim().to_lowercase().as_str(), "false" | "0" | "no" | "off"))
                .unwrap_or(true),
            push_gateway_url: env::var("PUSH_GATEWAY_URL").ok().filter(|v| !v.trim().is_empty()),
            push_device_token: env::var("PUSH_DEVICE_TOKEN").ok().filter(|v| !v.trim().is_empty()),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Minutes between weather refreshes. Missing, unparsable or zero values
/// fall back to 30.
pub fn parse_refresh_interval(value: &str) -> u64 {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|minutes| *minutes > 0)
        .unwrap_or(DEFAULT_REFRESH_INTERVAL_MINUTES)
}

/// Comma-separated city names; blanks are dropped.
pub fn parse_city_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|city| !city.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_city_list() {
        assert_eq!(
            parse_city_list(" Fresno, Boise ,, Casper "),
            vec!["Fresno", "Boise", "Casper"]
        );
        assert!(parse_city_list("").is_empty());
    }

    #[test]
    fn test_refresh_interval_rejects_zero() {
        assert_eq!(parse_refresh_interval("0"), 30);
        assert_eq!(parse_refresh_interval(""), 30);
        assert_eq!(parse_refresh_interval("soon"), 30);
        assert_eq!(parse_refresh_interval(" 15 "), 15);
    }
}
