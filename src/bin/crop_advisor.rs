/// Offline crop advisor: query the elevation and climate tables from the shell
use chrono::{Datelike, Month, Utc};
use clap::{Parser, Subcommand};
use field_weather_service::advisory::{
    classify_climate, climate_zone, parse_month, ClimateScheduler, ClimateZoneKey, CropCategory,
    ElevationAdvisor,
};

#[derive(Parser)]
#[command(name = "crop-advisor")]
#[command(about = "Crop recommendations by elevation and planting calendars by climate zone", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Crops suited to an elevation
    Elevation {
        /// Elevation in meters
        #[arg(allow_negative_numbers = true)]
        meters: f64,

        /// Only show the N easiest crops
        #[arg(long)]
        top: Option<usize>,

        /// Only show one category (vegetable, fruit, grain, herb, flower, tree)
        #[arg(long)]
        category: Option<String>,
    },
    /// Climate zone for an average temperature in °C
    Classify {
        #[arg(allow_negative_numbers = true)]
        avg_temp_c: f64,
    },
    /// Twelve-month planting and harvest calendar for a zone
    Calendar {
        /// tropical, subtropical, temperate or continental
        zone: String,
    },
    /// What to plant and harvest this month
    Recommend {
        zone: String,

        /// Month name (defaults to the current month)
        #[arg(long)]
        month: Option<String>,
    },
}

fn parse_zone(zone: &str) -> Result<ClimateZoneKey, Box<dyn std::error::Error>> {
    ClimateZoneKey::parse(zone).ok_or_else(|| format!("Unknown climate zone: {zone}").into())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Elevation {
            meters,
            top,
            category,
        } => {
            let advisor = ElevationAdvisor::new();
            let zone = advisor.zone_for(meters);
            println!("{} m: {} ({})", meters, zone.name, zone.climate_label);
            println!("{}\n", zone.description);

            let category = category
                .map(|name| {
                    CropCategory::parse(&name).ok_or_else(|| format!("Unknown category: {name}"))
                })
                .transpose()?;

            let crops = match (top, category) {
                (Some(n), Some(category)) => advisor.top_crops_in_category(meters, category, n),
                (None, Some(category)) => advisor.crops_by_category(meters, category),
                (Some(n), None) => advisor.top_crops(meters, n),
                (None, None) => advisor.recommend_crops(meters).crops.to_vec(),
            };

            for crop in crops {
                println!(
                    "  {} {:<14} {:?}/{:?}  {}",
                    crop.icon, crop.name, crop.category, crop.difficulty, crop.growing_season
                );
            }
        }
        Command::Classify { avg_temp_c } => {
            let zone = climate_zone(classify_climate(avg_temp_c));
            println!("{avg_temp_c}°C: {} ({})", zone.name, zone.temperature_range);
            println!("{}", zone.description);
            println!("Growing season: {}", zone.growing_season);
        }
        Command::Calendar { zone } => {
            let zone = parse_zone(&zone)?;
            let scheduler = ClimateScheduler::new();
            for month in scheduler.generate_monthly_calendar(zone) {
                println!("{}", month.month);
                if !month.activities.planting.is_empty() {
                    println!("  plant:   {}", month.activities.planting.join(", "));
                }
                if !month.activities.harvesting.is_empty() {
                    println!("  harvest: {}", month.activities.harvesting.join(", "));
                }
                for task in &month.activities.maintenance {
                    println!("  - {task}");
                }
            }
        }
        Command::Recommend { zone, month } => {
            let zone = parse_zone(&zone)?;
            let month = match month {
                Some(name) => parse_month(&name).ok_or_else(|| format!("Unknown month: {name}"))?,
                None => Month::try_from(Utc::now().month() as u8)?,
            };

            let scheduler = ClimateScheduler::new();
            let recommendations = scheduler.current_recommendations(month, zone);

            println!("{} in {}", month.name(), zone);
            println!("Plant now:");
            for advice in &recommendations.plant_now {
                let marker = if advice.optimal { "*" } else { " " };
                println!("  {marker} {}: {}", advice.crop, advice.reason);
            }
            println!("Harvest now: {}", recommendations.harvest_now.join(", "));
        }
    }

    Ok(())
}
