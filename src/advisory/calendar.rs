use chrono::Month;
use serde::Serialize;
use utoipa::ToSchema;

use super::climate::ClimateZoneKey;
use super::months::{is_month_in_range, month_index, MONTHS};
use super::schedule::{ScheduleTable, SeasonalTiming};

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Activities {
    pub planting: Vec<String>,
    pub harvesting: Vec<String>,
    pub maintenance: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyActivity {
    pub month: String,
    pub activities: Activities,
    pub weather_considerations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlantingAdvice {
    pub crop: String,
    pub reason: String,
    pub optimal: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentRecommendations {
    pub plant_now: Vec<PlantingAdvice>,
    /// Present in the response shape but never populated
    pub plant_soon: Vec<PlantingAdvice>,
    pub harvest_now: Vec<String>,
}

/// Planting and harvest scheduling over the crop timing table.
#[derive(Debug, Clone)]
pub struct ClimateScheduler {
    table: ScheduleTable,
}

impl ClimateScheduler {
    pub fn new() -> Self {
        Self::with_table(ScheduleTable::builtin())
    }

    pub fn with_table(table: ScheduleTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ScheduleTable {
        &self.table
    }

    pub fn seasonal_timing(&self, crop: &str, zone: ClimateZoneKey) -> Option<&SeasonalTiming> {
        self.table.timing(crop, zone)
    }

    /// Twelve entries, January through December, whatever the table holds.
    pub fn generate_monthly_calendar(&self, zone: ClimateZoneKey) -> Vec<MonthlyActivity> {
        MONTHS
            .iter()
            .map(|&month| {
                let mut activities = Activities {
                    maintenance: maintenance_tasks(month, zone),
                    ..Activities::default()
                };

                for schedule in self.table.crops() {
                    let Some(timing) = schedule.timings.get(&zone) else {
                        continue;
                    };

                    for window in &timing.planting_windows {
                        if is_month_in_range(month, window.start, window.end) {
                            let label = if window.optimal { "Optimal" } else { "Alternative" };
                            activities
                                .planting
                                .push(format!("{} ({})", schedule.crop, label));
                        }
                    }

                    if timing.harvest_mentions(month) {
                        activities.harvesting.push(schedule.crop.clone());
                    }
                }

                MonthlyActivity {
                    month: month.name().to_string(),
                    activities,
                    weather_considerations: weather_considerations(month, zone),
                }
            })
            .collect()
    }

    /// A crop appears in `plant_now` once per window containing `month`.
    pub fn current_recommendations(&self, month: Month, zone: ClimateZoneKey) -> CurrentRecommendations {
        let mut recommendations = CurrentRecommendations::default();

        for schedule in self.table.crops() {
            let Some(timing) = schedule.timings.get(&zone) else {
                continue;
            };

            for window in &timing.planting_windows {
                if is_month_in_range(month, window.start, window.end) {
                    recommendations.plant_now.push(PlantingAdvice {
                        crop: schedule.crop.clone(),
                        reason: window.reason.clone(),
                        optimal: window.optimal,
                    });
                }
            }

            if timing.harvest_mentions(month) {
                recommendations.harvest_now.push(schedule.crop.clone());
            }
        }

        recommendations
    }
}

impl Default for ClimateScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

// Northern-hemisphere meteorological seasons.
fn season(month: Month) -> Season {
    match month_index(month) {
        11 | 0 | 1 => Season::Winter,
        2..=4 => Season::Spring,
        5..=7 => Season::Summer,
        _ => Season::Autumn,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Static maintenance tasks for a (month, zone) pair.
pub fn maintenance_tasks(month: Month, zone: ClimateZoneKey) -> Vec<String> {
    use ClimateZoneKey::*;
    use Season::*;

    let items: &[&str] = match (zone, season(month)) {
        (Tropical, Winter) => &["Irrigate during the dry season", "Mulch to hold soil moisture"],
        (Tropical, Spring) => &["Prepare beds before the rains", "Clear drainage channels"],
        (Tropical, Summer) => &["Scout for fungal disease after rain", "Stake tall crops against storms"],
        (Tropical, Autumn) => &["Weed aggressively as rains taper", "Add compost for the dry-season crop"],
        (Subtropical, Winter) => &["Prune fruit trees", "Protect tender plants on cold nights"],
        (Subtropical, Spring) => &["Fertilise new plantings", "Set up drip irrigation"],
        (Subtropical, Summer) => &["Water early in the morning", "Apply shade cloth to greens"],
        (Subtropical, Autumn) => &["Clear spent summer crops", "Sow cover crops"],
        (Temperate, Winter) => &["Plan crop rotation", "Service tools and order seed"],
        (Temperate, Spring) => &["Harden off seedlings", "Turn in compost", "Watch for late frost"],
        (Temperate, Summer) => &["Mulch and water deeply", "Succession sow quick crops"],
        (Temperate, Autumn) => &["Harvest and store roots", "Plant garlic", "Mulch perennials"],
        (Continental, Winter) => &["Start onions and leeks indoors", "Check stored produce"],
        (Continental, Spring) => &["Start warm-season seeds indoors", "Prepare beds once thawed"],
        (Continental, Summer) => &["Water consistently", "Side-dress heavy feeders"],
        (Continental, Autumn) => &["Cover crops before the first frost", "Clean and store cold frames"],
    };

    strings(items)
}

/// Static weather notes for a (month, zone) pair.
pub fn weather_considerations(month: Month, zone: ClimateZoneKey) -> Vec<String> {
    use ClimateZoneKey::*;
    use Season::*;

    let items: &[&str] = match (zone, season(month)) {
        (Tropical, Winter) => &["Dry season; irrigation needed"],
        (Tropical, Spring) => &["Rains begin; watch for waterlogging"],
        (Tropical, Summer) => &["Heavy rain and storms", "High humidity favours disease"],
        (Tropical, Autumn) => &["Rains taper off"],
        (Subtropical, Winter) => &["Occasional frost on clear nights"],
        (Subtropical, Spring) => &["Rapid warming; last frost early"],
        (Subtropical, Summer) => &["Heat stress above 35°C", "Afternoon thunderstorms"],
        (Subtropical, Autumn) => &["Mild, ideal for cool-season crops"],
        (Temperate, Winter) => &["Hard frost and frozen ground"],
        (Temperate, Spring) => &["Late frost risk", "Variable rainfall"],
        (Temperate, Summer) => &["Warm days; dry spells possible"],
        (Temperate, Autumn) => &["First frost arrives", "Shortening days slow growth"],
        (Continental, Winter) => &["Deep freeze and snow cover"],
        (Continental, Spring) => &["Frost possible into late spring", "Cold, wet soils"],
        (Continental, Summer) => &["Short warm season", "Hail and thunderstorms"],
        (Continental, Autumn) => &["Early frost", "Rapid cooling"],
    };

    strings(items)
}
