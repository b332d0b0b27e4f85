use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CropCategory {
    Vegetable,
    Fruit,
    Grain,
    Herb,
    Flower,
    Tree,
}

impl CropCategory {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "vegetable" => Some(Self::Vegetable),
            "fruit" => Some(Self::Fruit),
            "grain" => Some(Self::Grain),
            "herb" => Some(Self::Herb),
            "flower" => Some(Self::Flower),
            "tree" => Some(Self::Tree),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
}

impl Difficulty {
    /// Sort rank used by `top_crops`: easiest first.
    pub fn rank(self) -> u8 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Moderate => 1,
            Difficulty::Hard => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CropRecommendation {
    pub name: String,
    pub icon: String,
    pub category: CropCategory,
    pub description: String,
    pub growing_season: String,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ElevationZone {
    pub name: String,
    /// Inclusive lower bound in meters
    pub min_elevation: f64,
    /// Exclusive upper bound in meters; `f64::INFINITY` for the top zone
    #[serde(with = "open_bound")]
    #[schema(value_type = Option<f64>)]
    pub max_elevation: f64,
    pub description: String,
    pub climate_label: String,
    pub crops: Vec<CropRecommendation>,
}

impl ElevationZone {
    pub fn contains(&self, elevation_m: f64) -> bool {
        elevation_m >= self.min_elevation && elevation_m < self.max_elevation
    }
}

// JSON has no infinity; the open top bound travels as null.
mod open_bound {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_some(value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}

/// Zone lookup result: the matched zone plus its full crop list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRecommendation<'a> {
    pub zone: &'a ElevationZone,
    pub crops: &'a [CropRecommendation],
}

/// Maps an elevation to one of five fixed growing zones.
///
/// The zone table is built once and never mutated. Zones are ordered by
/// elevation and contiguous over [0, inf); the last zone doubles as the
/// catch-all for anything the scan does not match.
#[derive(Debug, Clone)]
pub struct ElevationAdvisor {
    zones: Vec<ElevationZone>,
}

impl ElevationAdvisor {
    pub fn new() -> Self {
        Self {
            zones: builtin_zones(),
        }
    }

    pub fn zones(&self) -> &[ElevationZone] {
        &self.zones
    }

    /// First zone with `min <= e < max`, otherwise the last zone.
    pub fn zone_for(&self, elevation_m: f64) -> &ElevationZone {
        self.zones
            .iter()
            .find(|zone| zone.contains(elevation_m))
            .or_else(|| self.zones.last())
            .expect("elevation zone table is never empty")
    }

    pub fn recommend_crops(&self, elevation_m: f64) -> ZoneRecommendation<'_> {
        let zone = self.zone_for(elevation_m);
        ZoneRecommendation {
            zone,
            crops: &zone.crops,
        }
    }

    /// Easiest crops first; ties keep table order.
    pub fn top_crops(&self, elevation_m: f64, n: usize) -> Vec<CropRecommendation> {
        easiest(self.zone_for(elevation_m).crops.clone(), n)
    }

    pub fn top_crops_in_category(
        &self,
        elevation_m: f64,
        category: CropCategory,
        n: usize,
    ) -> Vec<CropRecommendation> {
        easiest(self.crops_by_category(elevation_m, category), n)
    }

    pub fn crops_by_category(
        &self,
        elevation_m: f64,
        category: CropCategory,
    ) -> Vec<CropRecommendation> {
        self.zone_for(elevation_m)
            .crops
            .iter()
            .filter(|crop| crop.category == category)
            .cloned()
            .collect()
    }

    pub fn is_crop_suitable(&self, crop_name: &str, elevation_m: f64) -> bool {
        let wanted = crop_name.to_lowercase();
        self.zone_for(elevation_m)
            .crops
            .iter()
            .any(|crop| crop.name.to_lowercase() == wanted)
    }
}

impl Default for ElevationAdvisor {
    fn default() -> Self {
        Self::new()
    }
}

fn easiest(mut crops: Vec<CropRecommendation>, n: usize) -> Vec<CropRecommendation> {
    crops.sort_by_key(|crop| crop.difficulty.rank());
    crops.truncate(n);
    crops
}

fn crop(
    name: &str,
    icon: &str,
    category: CropCategory,
    description: &str,
    growing_season: &str,
    difficulty: Difficulty,
) -> CropRecommendation {
    CropRecommendation {
        name: name.to_string(),
        icon: icon.to_string(),
        category,
        description: description.to_string(),
        growing_season: growing_season.to_string(),
        difficulty,
    }
}

fn zone(
    name: &str,
    min_elevation: f64,
    max_elevation: f64,
    description: &str,
    climate_label: &str,
    crops: Vec<CropRecommendation>,
) -> ElevationZone {
    ElevationZone {
        name: name.to_string(),
        min_elevation,
        max_elevation,
        description: description.to_string(),
        climate_label: climate_label.to_string(),
        crops,
    }
}

fn builtin_zones() -> Vec<ElevationZone> {
    use CropCategory::*;
    use Difficulty::*;

    vec![
        zone(
            "Coastal Lowlands",
            0.0,
            500.0,
            "Warm lowlands and river valleys with long frost-free seasons",
            "Warm, humid, mild winters",
            vec![
                crop("Rice", "🌾", Grain, "Thrives in flooded paddies and warm, wet summers", "Spring to late summer", Moderate),
                crop("Bananas", "🍌", Fruit, "Needs heat, humidity and shelter from wind", "Year-round", Moderate),
                crop("Sweet Potatoes", "🍠", Vegetable, "Heat-loving tubers that tolerate poor soil", "Late spring to autumn", Easy),
                crop("Okra", "🫛", Vegetable, "Productive in long hot summers", "Summer", Easy),
                crop("Citrus", "🍊", Tree, "Oranges, lemons and limes for frost-free sites", "Winter harvest", Hard),
                crop("Basil", "🌿", Herb, "Fast-growing herb for warm beds and containers", "Spring to autumn", Easy),
                crop("Hibiscus", "🌺", Flower, "Showy tropical shrub, heat tolerant", "Year-round bloom", Moderate),
            ],
        ),
        zone(
            "Low Elevation",
            500.0,
            1500.0,
            "Foothills and plains with warm summers and light frosts",
            "Warm summers, cool winters",
            vec![
                crop("Tomatoes", "🍅", Vegetable, "Classic warm-season fruiting crop", "Late spring to early autumn", Moderate),
                crop("Corn", "🌽", Grain, "Tall summer grain, plant in blocks for pollination", "Summer", Moderate),
                crop("Beans", "🫘", Vegetable, "Reliable legumes that fix nitrogen", "Spring to summer", Easy),
                crop("Zucchini", "🥒", Vegetable, "Very productive summer squash", "Summer", Easy),
                crop("Peaches", "🍑", Tree, "Stone fruit needing winter chill and dry summers", "Mid summer", Hard),
                crop("Sunflowers", "🌻", Flower, "Drought-tolerant annual for pollinators", "Summer", Easy),
                crop("Peppers", "🫑", Vegetable, "Heat-loving crop with a long season", "Summer to autumn", Moderate),
                crop("Rosemary", "🌿", Herb, "Woody perennial herb for dry, sunny spots", "Year-round", Easy),
            ],
        ),
        zone(
            "Mid Elevation",
            1500.0,
            2500.0,
            "Upland valleys and plateaus with cool nights and a shorter season",
            "Temperate, cool nights",
            vec![
                crop("Potatoes", "🥔", Vegetable, "Cool nights improve tuber set", "Spring to early autumn", Easy),
                crop("Apples", "🍎", Tree, "Require winter chill, benefit from cool nights", "Late summer to autumn", Hard),
                crop("Wheat", "🌾", Grain, "Winter or spring wheat suits upland fields", "Autumn sown, summer harvest", Moderate),
                crop("Cabbage", "🥬", Vegetable, "Hardy brassica that handles light frost", "Spring and autumn", Easy),
                crop("Strawberries", "🍓", Fruit, "Perennial berries for sunny beds", "Late spring to summer", Moderate),
                crop("Lavender", "💜", Flower, "Drought-tolerant aromatic perennial", "Summer bloom", Moderate),
                crop("Thyme", "🌿", Herb, "Low hardy herb for well-drained soil", "Spring to autumn", Easy),
            ],
        ),
        zone(
            "High Elevation",
            2500.0,
            3500.0,
            "Mountain slopes with intense sun, cold nights and frequent frost",
            "Cool, short frost-free window",
            vec![
                crop("Quinoa", "🌾", Grain, "Andean grain adapted to altitude and cold", "Spring to autumn", Moderate),
                crop("Barley", "🌾", Grain, "Hardy cereal with a short growing cycle", "Summer", Easy),
                crop("Kale", "🥬", Vegetable, "Frost improves flavor; very cold hardy", "Spring to late autumn", Easy),
                crop("Peas", "🫛", Vegetable, "Cool-season legume that tolerates frost", "Spring to early summer", Easy),
                crop("Fava Beans", "🫘", Vegetable, "Cold-tolerant beans for short seasons", "Spring to summer", Moderate),
                crop("Currants", "🍇", Fruit, "Hardy bush fruit for cold sites", "Mid summer", Moderate),
            ],
        ),
        zone(
            "Alpine",
            3500.0,
            f64::INFINITY,
            "Above the tree line; very short season and frost any month",
            "Cold, frost possible year-round",
            vec![
                crop("Radishes", "🌱", Vegetable, "Matures in under a month", "Mid summer", Easy),
                crop("Lettuce", "🥬", Vegetable, "Quick greens under cover", "Summer", Moderate),
                crop("Alpine Strawberries", "🍓", Fruit, "Small hardy berries for sheltered spots", "Summer", Hard),
                crop("Chives", "🌿", Herb, "Perennial herb that survives hard winters", "Summer", Easy),
                crop("Edelweiss", "🤍", Flower, "Native alpine perennial", "Summer bloom", Hard),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zones_are_contiguous() {
        let advisor = ElevationAdvisor::new();
        let zones = advisor.zones();
        assert_eq!(zones.len(), 5);
        assert_eq!(zones[0].min_elevation, 0.0);
        for pair in zones.windows(2) {
            assert_eq!(pair[0].max_elevation, pair[1].min_elevation);
        }
        assert!(zones[4].max_elevation.is_infinite());
    }

    #[test]
    fn test_boundary_is_min_inclusive() {
        let advisor = ElevationAdvisor::new();
        assert_eq!(advisor.zone_for(499.999).name, "Coastal Lowlands");
        assert_eq!(advisor.zone_for(500.0).name, "Low Elevation");
        assert_eq!(advisor.zone_for(3500.0).name, "Alpine");
    }

    #[test]
    fn test_out_of_table_falls_back_to_last_zone() {
        let advisor = ElevationAdvisor::new();
        assert_eq!(advisor.zone_for(9000.0).name, "Alpine");
        assert_eq!(advisor.zone_for(-20.0).name, "Alpine");
        assert_eq!(advisor.zone_for(f64::NAN).name, "Alpine");
    }

    #[test]
    fn test_top_crops_is_stable_by_difficulty() {
        let advisor = ElevationAdvisor::new();
        let top = advisor.top_crops(800.0, 3);
        let names: Vec<&str> = top.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Beans", "Zucchini", "Sunflowers"]);
    }

    #[test]
    fn test_top_crops_larger_than_zone() {
        let advisor = ElevationAdvisor::new();
        assert_eq!(advisor.top_crops(4000.0, 50).len(), 5);
        assert!(advisor.top_crops(4000.0, 0).is_empty());
    }

    #[test]
    fn test_crops_by_category() {
        let advisor = ElevationAdvisor::new();
        let grains = advisor.crops_by_category(3000.0, CropCategory::Grain);
        assert_eq!(grains.len(), 2);
        assert!(grains.iter().all(|c| c.category == CropCategory::Grain));
        assert!(advisor.crops_by_category(3000.0, CropCategory::Tree).is_empty());
    }

    #[test]
    fn test_is_crop_suitable_case_insensitive_exact() {
        let advisor = ElevationAdvisor::new();
        assert!(advisor.is_crop_suitable("tomatoes", 800.0));
        assert!(advisor.is_crop_suitable("TOMATOES", 800.0));
        assert!(!advisor.is_crop_suitable("tomato", 800.0));
        assert!(!advisor.is_crop_suitable("tomatoes", 3000.0));
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(CropCategory::parse("Herb"), Some(CropCategory::Herb));
        assert_eq!(CropCategory::parse("shrub"), None);
    }

    #[test]
    fn test_open_bound_serializes_as_null() {
        let advisor = ElevationAdvisor::new();
        let json = serde_json::to_value(&advisor.zones()[4]).unwrap();
        assert!(json["maxElevation"].is_null());
        let json = serde_json::to_value(&advisor.zones()[0]).unwrap();
        assert_eq!(json["maxElevation"], 500.0);
    }
}
