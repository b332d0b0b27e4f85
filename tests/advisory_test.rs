// Elevation and climate table behaviour through the public API

use chrono::Month;
use field_weather_service::advisory::{
    classify_climate, climate_zones, ClimateScheduler, ClimateZoneKey, CropCategory,
    CropRecommendation, Difficulty, ElevationAdvisor,
};

#[test]
fn test_elevation_zone_boundaries() {
    let advisor = ElevationAdvisor::new();

    let cases = [
        (0.0, "Coastal Lowlands"),
        (499.9, "Coastal Lowlands"),
        (500.0, "Low Elevation"),
        (1499.0, "Low Elevation"),
        (1500.0, "Mid Elevation"),
        (2500.0, "High Elevation"),
        (3499.9, "High Elevation"),
        (3500.0, "Alpine"),
        (8848.0, "Alpine"),
    ];

    for (meters, expected) in cases {
        assert_eq!(advisor.zone_for(meters).name, expected, "elevation {meters}");
    }
}

#[test]
fn test_negative_elevation_falls_back_to_last_zone() {
    let advisor = ElevationAdvisor::new();
    assert_eq!(advisor.zone_for(-10.0).name, "Alpine");
}

#[test]
fn test_every_elevation_maps_to_exactly_one_zone() {
    let advisor = ElevationAdvisor::new();
    for meters in (0..6000).step_by(50).map(f64::from) {
        let matching = advisor.zones().iter().filter(|z| z.contains(meters)).count();
        assert_eq!(matching, 1, "elevation {meters}");
    }
}

#[test]
fn test_top_crops_at_low_elevation_are_easy_in_table_order() {
    let advisor = ElevationAdvisor::new();
    let top: Vec<String> = advisor
        .top_crops(800.0, 3)
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(top, vec!["Beans", "Zucchini", "Sunflowers"]);
}

#[test]
fn test_top_crops_never_exceeds_zone_size() {
    let advisor = ElevationAdvisor::new();
    let top = advisor.top_crops(100.0, 100);
    assert_eq!(top.len(), advisor.zone_for(100.0).crops.len());

    let ranks: Vec<u8> = top.iter().map(|c| c.difficulty.rank()).collect();
    let mut sorted = ranks.clone();
    sorted.sort();
    assert_eq!(ranks, sorted);
    assert!(advisor.top_crops(100.0, 0).is_empty());
}

#[test]
fn test_crops_by_category_filters() {
    let advisor = ElevationAdvisor::new();
    let trees = advisor.crops_by_category(800.0, CropCategory::Tree);
    assert_eq!(trees.len(), 1);
    assert_eq!(trees[0].name, "Peaches");
    assert_eq!(trees[0].difficulty, Difficulty::Hard);

    let fruit = advisor.crops_by_category(2000.0, CropCategory::Fruit);
    assert!(!fruit.is_empty());
    assert!(fruit.iter().all(|c| c.category == CropCategory::Fruit));

    assert!(advisor.crops_by_category(800.0, CropCategory::Fruit).is_empty());
}

#[test]
fn test_top_crops_in_category_limits_after_filtering() {
    let advisor = ElevationAdvisor::new();
    let names = |crops: Vec<CropRecommendation>| -> Vec<String> {
        crops.into_iter().map(|c| c.name).collect()
    };

    let easiest = advisor.top_crops_in_category(800.0, CropCategory::Vegetable, 2);
    assert_eq!(names(easiest), vec!["Beans", "Zucchini"]);

    let vegetables = advisor.crops_by_category(800.0, CropCategory::Vegetable);
    let all = advisor.top_crops_in_category(800.0, CropCategory::Vegetable, 100);
    assert_eq!(all.len(), vegetables.len());
    assert!(all.iter().all(|c| c.category == CropCategory::Vegetable));

    assert!(advisor
        .top_crops_in_category(800.0, CropCategory::Fruit, 3)
        .is_empty());
}

#[test]
fn test_is_crop_suitable_is_case_insensitive_exact_match() {
    let advisor = ElevationAdvisor::new();
    assert!(advisor.is_crop_suitable("kale", 2600.0));
    assert!(advisor.is_crop_suitable("KALE", 2600.0));
    assert!(!advisor.is_crop_suitable("kal", 2600.0));
    assert!(!advisor.is_crop_suitable("Peaches", 2600.0));
}

#[test]
fn test_classify_climate_thresholds() {
    assert_eq!(classify_climate(30.0), ClimateZoneKey::Tropical);
    assert_eq!(classify_climate(25.0), ClimateZoneKey::Tropical);
    assert_eq!(classify_climate(24.9), ClimateZoneKey::Subtropical);
    assert_eq!(classify_climate(20.0), ClimateZoneKey::Subtropical);
    assert_eq!(classify_climate(15.0), ClimateZoneKey::Temperate);
    assert_eq!(classify_climate(14.9), ClimateZoneKey::Continental);
    assert_eq!(classify_climate(-20.0), ClimateZoneKey::Continental);
    assert_eq!(classify_climate(f64::NAN), ClimateZoneKey::Continental);
}

#[test]
fn test_climate_zones_listed_once_each() {
    let keys: Vec<ClimateZoneKey> = climate_zones().into_iter().map(|z| z.key).collect();
    assert_eq!(keys, ClimateZoneKey::ALL.to_vec());
}

#[test]
fn test_calendar_has_twelve_months_in_order() {
    let scheduler = ClimateScheduler::new();
    for zone in ClimateZoneKey::ALL {
        let calendar = scheduler.generate_monthly_calendar(zone);
        assert_eq!(calendar.len(), 12);
        assert_eq!(calendar[0].month, "January");
        assert_eq!(calendar[11].month, "December");
    }
}

#[test]
fn test_temperate_tomatoes_in_may() {
    let scheduler = ClimateScheduler::new();
    let calendar = scheduler.generate_monthly_calendar(ClimateZoneKey::Temperate);
    let may = &calendar[4];
    assert!(may.activities.planting.contains(&"Tomatoes (Optimal)".to_string()));

    let june = &calendar[5];
    assert!(june.activities.planting.contains(&"Tomatoes (Alternative)".to_string()));
}

#[test]
fn test_current_recommendations_plant_now_and_harvest() {
    let scheduler = ClimateScheduler::new();
    let recs = scheduler.current_recommendations(Month::May, ClimateZoneKey::Temperate);

    let tomatoes = recs
        .plant_now
        .iter()
        .find(|a| a.crop == "Tomatoes")
        .expect("tomatoes plantable in May");
    assert!(tomatoes.optimal);
    assert!(recs.plant_soon.is_empty());

    let august = scheduler.current_recommendations(Month::August, ClimateZoneKey::Temperate);
    assert!(!august.harvest_now.contains(&"Tomatoes".to_string()));
    let july = scheduler.current_recommendations(Month::July, ClimateZoneKey::Temperate);
    assert!(july.harvest_now.contains(&"Tomatoes".to_string()));
}

#[test]
fn test_wrapping_window_for_subtropical_carrots() {
    let scheduler = ClimateScheduler::new();
    for month in [Month::September, Month::December, Month::January, Month::February] {
        let recs = scheduler.current_recommendations(month, ClimateZoneKey::Subtropical);
        assert!(
            recs.plant_now.iter().any(|a| a.crop == "Carrots"),
            "carrots plantable in {}",
            month.name()
        );
    }
    let recs = scheduler.current_recommendations(Month::June, ClimateZoneKey::Subtropical);
    assert!(!recs.plant_now.iter().any(|a| a.crop == "Carrots"));
}

#[test]
fn test_missing_crop_zone_pair_has_no_timing() {
    let scheduler = ClimateScheduler::new();
    assert!(scheduler.seasonal_timing("Beans", ClimateZoneKey::Continental).is_none());
    assert!(scheduler.seasonal_timing("beans", ClimateZoneKey::Temperate).is_some());
    assert!(scheduler.seasonal_timing("Okra", ClimateZoneKey::Tropical).is_none());
}
