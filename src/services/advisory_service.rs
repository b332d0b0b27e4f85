use chrono::Month;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::advisory::{
    classify_climate, climate_zone, climate_zones, ClimateScheduler, ClimateZoneDef,
    ClimateZoneKey, CropCategory, CropRecommendation, CurrentRecommendations, ElevationAdvisor,
    ElevationZone, MonthlyActivity, SeasonalTiming,
};

// API response DTOs
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ElevationAdvice {
    pub elevation_m: f64,
    pub zone: String,
    pub climate_label: String,
    pub description: String,
    pub crops: Vec<CropRecommendation>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CropSuitability {
    pub crop: String,
    pub elevation_m: f64,
    pub zone: String,
    pub suitable: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClimateClassification {
    pub avg_temp_c: f64,
    pub zone: ClimateZoneDef,
}

/// Read-only access to the elevation and climate tables.
#[derive(Clone)]
pub struct AdvisoryService {
    elevation: Arc<ElevationAdvisor>,
    scheduler: Arc<ClimateScheduler>,
}

impl AdvisoryService {
    pub fn new(elevation: ElevationAdvisor, scheduler: ClimateScheduler) -> Self {
        Self {
            elevation: Arc::new(elevation),
            scheduler: Arc::new(scheduler),
        }
    }

    pub fn elevation_zones(&self) -> Vec<ElevationZone> {
        self.elevation.zones().to_vec()
    }

    pub fn recommend_crops(&self, elevation_m: f64) -> ElevationAdvice {
        let recommendation = self.elevation.recommend_crops(elevation_m);
        ElevationAdvice {
            elevation_m,
            zone: recommendation.zone.name.clone(),
            climate_label: recommendation.zone.climate_label.clone(),
            description: recommendation.zone.description.clone(),
            crops: recommendation.crops.to_vec(),
        }
    }

    pub fn top_crops(&self, elevation_m: f64, n: usize) -> Vec<CropRecommendation> {
        self.elevation.top_crops(elevation_m, n)
    }

    pub fn crops_by_category(&self, elevation_m: f64, category: CropCategory) -> Vec<CropRecommendation> {
        self.elevation.crops_by_category(elevation_m, category)
    }

    pub fn crop_suitability(&self, crop: &str, elevation_m: f64) -> CropSuitability {
        CropSuitability {
            crop: crop.to_string(),
            elevation_m,
            zone: self.elevation.zone_for(elevation_m).name.clone(),
            suitable: self.elevation.is_crop_suitable(crop, elevation_m),
        }
    }

    pub fn classify_climate(&self, avg_temp_c: f64) -> ClimateClassification {
        ClimateClassification {
            avg_temp_c,
            zone: climate_zone(classify_climate(avg_temp_c)),
        }
    }

    pub fn climate_zones(&self) -> Vec<ClimateZoneDef> {
        climate_zones()
    }

    pub fn monthly_calendar(&self, zone: ClimateZoneKey) -> Vec<MonthlyActivity> {
        self.scheduler.generate_monthly_calendar(zone)
    }

    pub fn current_recommendations(&self, month: Month, zone: ClimateZoneKey) -> CurrentRecommendations {
        self.scheduler.current_recommendations(month, zone)
    }

    pub fn seasonal_timing(&self, crop: &str, zone: ClimateZoneKey) -> Option<SeasonalTiming> {
        self.scheduler.seasonal_timing(crop, zone).cloned()
    }

    pub fn scheduled_crops(&self) -> Vec<String> {
        self.scheduler
            .table()
            .crop_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

impl Default for AdvisoryService {
    fn default() -> Self {
        Self::new(ElevationAdvisor::new(), ClimateScheduler::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommend_crops_copies_zone() {
        let service = AdvisoryService::default();
        let advice = service.recommend_crops(800.0);
        assert_eq!(advice.zone, "Low Elevation");
        assert_eq!(advice.crops.len(), 8);
    }

    #[test]
    fn test_crop_suitability_reports_zone() {
        let service = AdvisoryService::default();
        let s = service.crop_suitability("kale", 2600.0);
        assert_eq!(s.zone, "High Elevation");
        assert!(s.suitable);
    }

    #[test]
    fn test_classify_climate_returns_definition() {
        let service = AdvisoryService::default();
        let c = service.classify_climate(22.5);
        assert_eq!(c.zone.key, ClimateZoneKey::Subtropical);
    }
}
