use futures::stream::{self, StreamExt};
use std::time::Duration;
use tokio::time;
use tracing::{debug, error, info, instrument, warn};

use crate::fetcher::WeatherFetcher;
use crate::services::AlertService;

#[instrument(skip(fetcher, alert_service, cities), fields(interval_minutes = %interval_minutes, cities = cities.len()))]
pub async fn start_weather_scheduler(
    fetcher: WeatherFetcher,
    alert_service: AlertService,
    cities: Vec<String>,
    interval_minutes: u64,
    concurrency: usize,
) {
    if cities.is_empty() {
        warn!("No cities configured; weather scheduler not started");
        return;
    }

    // A zero period would panic inside `interval`
    let interval_minutes = interval_minutes.max(1);
    let mut interval = time::interval(Duration::from_secs(interval_minutes.saturating_mul(60)));

    info!(
        "Weather scheduler started with {} minute interval for {} cities",
        interval_minutes,
        cities.len()
    );

    loop {
        interval.tick().await;
        debug!("Scheduler tick - refreshing weather");

        let fired = refresh_and_evaluate(&fetcher, &alert_service, &cities, concurrency).await;
        if fired > 0 {
            info!("Weather refresh fired {} alert(s)", fired);
        } else {
            debug!("Weather refresh fired no alerts");
        }
    }
}

/// One refresh pass: fetch every city (bounded concurrency), then evaluate
/// readings one at a time so history appends within a pass do not race.
/// Returns the number of alerts fired.
#[instrument(skip(fetcher, alert_service, cities))]
pub async fn refresh_and_evaluate(
    fetcher: &WeatherFetcher,
    alert_service: &AlertService,
    cities: &[String],
    concurrency: usize,
) -> usize {
    let results: Vec<_> = stream::iter(cities.to_vec())
        .map(|city| {
            let fetcher = fetcher.clone();
            async move {
                let result = fetcher.fetch_current(&city).await;
                (city, result)
            }
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    let mut fired = 0;
    for (city, result) in results {
        match result {
            Ok(reading) => {
                debug!(
                    "{}: {:.1}°F, wind {:.1} mph, humidity {:.0}%",
                    city, reading.temperature_f, reading.wind_speed_mph, reading.humidity_pct
                );
                fired += alert_service.evaluate_conditions(&reading, &city).await.len();
            }
            Err(e) => {
                error!("Failed to fetch weather for {}: {}", city, e);
            }
        }
    }

    fired
}
