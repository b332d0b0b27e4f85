pub mod calendar;
pub mod climate;
pub mod elevation;
pub mod months;
pub mod schedule;

pub use calendar::{ClimateScheduler, CurrentRecommendations, MonthlyActivity, PlantingAdvice};
pub use climate::{classify_climate, climate_zone, climate_zones, ClimateZoneDef, ClimateZoneKey};
pub use elevation::{CropCategory, CropRecommendation, Difficulty, ElevationAdvisor, ElevationZone};
pub use months::{is_month_in_range, is_month_name_in_range, parse_month};
pub use schedule::{GrowthStage, PlantingWindow, ScheduleTable, SeasonalTiming};
