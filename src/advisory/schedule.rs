//! Per-crop, per-climate-zone seasonal timing data.
//!
//! The table is assembled once at startup and indexed by lowercase crop
//! name. Not every crop has timing for every zone; a missing pair simply
//! means there is no advice for it.

use chrono::Month;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

use super::climate::ClimateZoneKey;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlantingWindow {
    #[schema(value_type = String, example = "March")]
    pub start: Month,
    #[schema(value_type = String, example = "May")]
    pub end: Month,
    pub optimal: bool,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrowthStage {
    pub stage: String,
    pub duration: String,
    pub description: String,
    pub icon: String,
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalTiming {
    pub planting_windows: Vec<PlantingWindow>,
    /// Free text; matched against month names by substring
    pub harvest_time: String,
    pub growth_stages: Vec<GrowthStage>,
    pub frost_considerations: Vec<String>,
}

impl SeasonalTiming {
    /// Case-insensitive substring test of the month name against
    /// `harvest_time`. "July to September" matches July and September only.
    pub fn harvest_mentions(&self, month: Month) -> bool {
        self.harvest_time
            .to_lowercase()
            .contains(&month.name().to_lowercase())
    }
}

#[derive(Debug, Clone)]
pub struct CropSchedule {
    pub crop: String,
    pub timings: HashMap<ClimateZoneKey, SeasonalTiming>,
}

#[derive(Debug, Clone, Default)]
pub struct ScheduleTable {
    crops: Vec<CropSchedule>,
    index: HashMap<String, usize>,
}

impl ScheduleTable {
    pub fn new(crops: Vec<CropSchedule>) -> Self {
        let index = crops
            .iter()
            .enumerate()
            .map(|(i, schedule)| (schedule.crop.to_lowercase(), i))
            .collect();
        Self { crops, index }
    }

    pub fn builtin() -> Self {
        Self::new(builtin_schedules())
    }

    /// Schedules in table order; calendar output follows this order.
    pub fn crops(&self) -> &[CropSchedule] {
        &self.crops
    }

    pub fn crop_names(&self) -> Vec<&str> {
        self.crops.iter().map(|c| c.crop.as_str()).collect()
    }

    pub fn timing(&self, crop: &str, zone: ClimateZoneKey) -> Option<&SeasonalTiming> {
        let idx = self.index.get(&crop.trim().to_lowercase())?;
        self.crops[*idx].timings.get(&zone)
    }
}

fn window(start: Month, end: Month, optimal: bool, reason: &str) -> PlantingWindow {
    PlantingWindow {
        start,
        end,
        optimal,
        reason: reason.to_string(),
    }
}

fn stage(name: &str, duration: &str, description: &str, icon: &str, tips: &[&str]) -> GrowthStage {
    GrowthStage {
        stage: name.to_string(),
        duration: duration.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        tips: tips.iter().map(|t| t.to_string()).collect(),
    }
}

fn timing(
    planting_windows: Vec<PlantingWindow>,
    harvest_time: &str,
    growth_stages: Vec<GrowthStage>,
    frost: &[&str],
) -> SeasonalTiming {
    SeasonalTiming {
        planting_windows,
        harvest_time: harvest_time.to_string(),
        growth_stages,
        frost_considerations: frost.iter().map(|f| f.to_string()).collect(),
    }
}

fn schedule(crop: &str, timings: Vec<(ClimateZoneKey, SeasonalTiming)>) -> CropSchedule {
    CropSchedule {
        crop: crop.to_string(),
        timings: timings.into_iter().collect(),
    }
}

fn tomato_stages() -> Vec<GrowthStage> {
    vec![
        stage("Germination", "5-10 days", "Seeds sprout in warm soil", "🌱", &["Keep soil at 21-27°C", "Keep evenly moist"]),
        stage("Seedling", "3-4 weeks", "True leaves form; ready to harden off", "🌿", &["Give 14+ hours of light", "Harden off over a week"]),
        stage("Vegetative", "3-4 weeks", "Rapid stem and leaf growth", "🪴", &["Stake or cage early", "Water deeply twice a week"]),
        stage("Flowering", "2-3 weeks", "Yellow flowers open and set fruit", "🌼", &["Avoid high-nitrogen feed", "Shake plants to aid pollination"]),
        stage("Fruiting", "4-8 weeks", "Fruit swells and ripens", "🍅", &["Keep watering consistent to prevent splitting", "Pick at first blush"]),
    ]
}

fn lettuce_stages() -> Vec<GrowthStage> {
    vec![
        stage("Germination", "2-7 days", "Seeds need light and cool soil", "🌱", &["Sow shallowly", "Germination drops above 27°C"]),
        stage("Leaf Development", "3-4 weeks", "Rosette of leaves forms", "🥬", &["Thin to 20 cm spacing", "Mulch to keep roots cool"]),
        stage("Maturity", "2-3 weeks", "Heads firm or leaves reach full size", "✂️", &["Harvest in the morning", "Cut before bolting"]),
    ]
}

fn corn_stages() -> Vec<GrowthStage> {
    vec![
        stage("Emergence", "5-12 days", "Shoots break the surface", "🌱", &["Plant in blocks, not single rows"]),
        stage("Vegetative", "6-8 weeks", "Leaves and stalk grow quickly", "🌿", &["Side-dress nitrogen at knee height"]),
        stage("Tasseling", "1-2 weeks", "Tassels shed pollen onto silks", "🌾", &["Water is critical during pollination"]),
        stage("Ripening", "3 weeks", "Kernels fill and reach milk stage", "🌽", &["Check for milky juice in kernels"]),
    ]
}

fn bean_stages() -> Vec<GrowthStage> {
    vec![
        stage("Germination", "7-10 days", "Seed swells and emerges", "🌱", &["Do not soak seeds too long", "Soil above 16°C"]),
        stage("Vegetative", "3-4 weeks", "Leaves and runners grow", "🌿", &["Provide poles for climbing types"]),
        stage("Flowering", "1-2 weeks", "Small flowers precede pods", "🌸", &["Avoid overhead watering on flowers"]),
        stage("Pod Fill", "2-3 weeks", "Pods lengthen and fill", "🫘", &["Pick every few days to keep plants producing"]),
    ]
}

fn carrot_stages() -> Vec<GrowthStage> {
    vec![
        stage("Germination", "10-21 days", "Slow, uneven sprouting", "🌱", &["Keep the seedbed moist until emergence"]),
        stage("Root Development", "6-8 weeks", "Taproot lengthens and colours", "🥕", &["Thin to 5 cm", "Loose, stone-free soil"]),
        stage("Maturity", "2-4 weeks", "Roots reach full size and sweetness", "🧺", &["Light frost sweetens roots"]),
    ]
}

fn potato_stages() -> Vec<GrowthStage> {
    vec![
        stage("Sprouting", "2-3 weeks", "Seed tubers send up shoots", "🌱", &["Chit tubers before planting"]),
        stage("Vegetative", "4-6 weeks", "Foliage grows and stolons form", "🌿", &["Hill soil around stems"]),
        stage("Tuber Initiation", "2 weeks", "Tubers begin forming at stolon tips", "🥔", &["Keep soil evenly moist"]),
        stage("Bulking", "6-8 weeks", "Tubers swell", "🧺", &["Watch for blight in humid weather"]),
        stage("Maturation", "2-3 weeks", "Foliage dies back; skins set", "🍂", &["Stop watering once foliage yellows"]),
    ]
}

fn garlic_stages() -> Vec<GrowthStage> {
    vec![
        stage("Rooting", "4-6 weeks", "Cloves root before winter", "🌱", &["Plant pointed end up, 5 cm deep"]),
        stage("Dormancy", "8-12 weeks", "Growth pauses in cold weather", "❄️", &["Mulch heavily in cold zones"]),
        stage("Leaf Growth", "8-10 weeks", "Leaves grow as days lengthen", "🌿", &["Remove scapes from hardneck types"]),
        stage("Bulbing", "4-6 weeks", "Bulbs swell and divide into cloves", "🧄", &["Stop watering two weeks before harvest"]),
    ]
}

fn builtin_schedules() -> Vec<CropSchedule> {
    use ClimateZoneKey::*;
    use Month::*;

    vec![
        schedule(
            "Tomatoes",
            vec![
                (
                    Tropical,
                    timing(
                        vec![
                            window(October, December, true, "Dry season avoids fungal disease"),
                            window(May, June, false, "Possible in the early rains with good drainage"),
                        ],
                        "January to March",
                        tomato_stages(),
                        &["No frost risk; heat above 35°C can drop flowers"],
                    ),
                ),
                (
                    Subtropical,
                    timing(
                        vec![
                            window(February, April, true, "Establish before summer heat"),
                            window(August, September, false, "Autumn crop before cool nights"),
                        ],
                        "May to July, November",
                        tomato_stages(),
                        &["Cover young plants if a late cold snap is forecast"],
                    ),
                ),
                (
                    Temperate,
                    timing(
                        vec![
                            window(April, May, true, "Transplant after the last frost"),
                            window(June, June, false, "Late planting shortens the harvest"),
                        ],
                        "July to September",
                        tomato_stages(),
                        &["Transplant only after last frost", "Protect below 10°C at night"],
                    ),
                ),
                (
                    Continental,
                    timing(
                        vec![window(May, June, true, "Soil finally warm enough")],
                        "August to September",
                        tomato_stages(),
                        &["Frost can arrive in early September", "Use row cover on cold nights"],
                    ),
                ),
            ],
        ),
        schedule(
            "Lettuce",
            vec![
                (
                    Tropical,
                    timing(
                        vec![window(November, January, true, "Coolest months reduce bolting")],
                        "December to February",
                        lettuce_stages(),
                        &["Heat, not frost, is the limit; use shade cloth"],
                    ),
                ),
                (
                    Subtropical,
                    timing(
                        vec![
                            window(September, November, true, "Cool autumn weather"),
                            window(January, February, false, "Late winter sowing before spring heat"),
                        ],
                        "November to April",
                        lettuce_stages(),
                        &["Tolerates light frost"],
                    ),
                ),
                (
                    Temperate,
                    timing(
                        vec![
                            window(March, May, true, "Cool spring growth"),
                            window(August, September, false, "Autumn crop"),
                        ],
                        "May to June, October",
                        lettuce_stages(),
                        &["Tolerates light frost", "Cover during hard freezes"],
                    ),
                ),
                (
                    Continental,
                    timing(
                        vec![window(April, June, true, "Sow as soon as soil can be worked")],
                        "June to August",
                        lettuce_stages(),
                        &["Seedlings survive light frost"],
                    ),
                ),
            ],
        ),
        schedule(
            "Corn",
            vec![
                (
                    Tropical,
                    timing(
                        vec![window(April, June, true, "Plant with the onset of the rains")],
                        "July to September",
                        corn_stages(),
                        &["No frost risk"],
                    ),
                ),
                (
                    Subtropical,
                    timing(
                        vec![
                            window(March, April, true, "Warm soil and long days ahead"),
                            window(July, July, false, "Second crop where summers are long"),
                        ],
                        "June to October",
                        corn_stages(),
                        &["Wait until soil is above 16°C"],
                    ),
                ),
                (
                    Temperate,
                    timing(
                        vec![window(May, June, true, "After soil warms past 16°C")],
                        "August to September",
                        corn_stages(),
                        &["Killed by frost; plant after last frost date"],
                    ),
                ),
                (
                    Continental,
                    timing(
                        vec![window(May, May, true, "Short-season varieties only")],
                        "August",
                        corn_stages(),
                        &["Choose varieties under 80 days", "Early autumn frost ends the season"],
                    ),
                ),
            ],
        ),
        schedule(
            "Beans",
            vec![
                (
                    Tropical,
                    timing(
                        vec![
                            window(March, May, true, "Before the heaviest rains"),
                            window(September, October, false, "Late rains planting"),
                        ],
                        "June to July, December",
                        bean_stages(),
                        &["No frost risk"],
                    ),
                ),
                (
                    Subtropical,
                    timing(
                        vec![
                            window(March, April, true, "Warm spring soil"),
                            window(August, September, false, "Autumn succession"),
                        ],
                        "May to June, October to November",
                        bean_stages(),
                        &["Frost kills plants; sow after last frost"],
                    ),
                ),
                (
                    Temperate,
                    timing(
                        vec![window(May, July, true, "Succession sow every three weeks")],
                        "July to September",
                        bean_stages(),
                        &["Frost tender", "Sow only after soil reaches 16°C"],
                    ),
                ),
            ],
        ),
        schedule(
            "Carrots",
            vec![
                (
                    Subtropical,
                    timing(
                        vec![window(September, February, true, "Cool season sweetens roots")],
                        "December to May",
                        carrot_stages(),
                        &["Light frost improves flavour"],
                    ),
                ),
                (
                    Temperate,
                    timing(
                        vec![
                            window(March, May, true, "Spring sowing for summer roots"),
                            window(July, July, false, "Sow for autumn and winter storage"),
                        ],
                        "June to October",
                        carrot_stages(),
                        &["Can stay in the ground through light frost"],
                    ),
                ),
                (
                    Continental,
                    timing(
                        vec![window(April, June, true, "Sow once soil can be worked")],
                        "July to September",
                        carrot_stages(),
                        &["Mulch to extend harvest past first frost"],
                    ),
                ),
            ],
        ),
        schedule(
            "Potatoes",
            vec![
                (
                    Temperate,
                    timing(
                        vec![
                            window(March, April, true, "Plant two weeks before last frost"),
                            window(June, June, false, "Late crop for storage"),
                        ],
                        "July to October",
                        potato_stages(),
                        &["Hill soil over shoots if frost threatens"],
                    ),
                ),
                (
                    Continental,
                    timing(
                        vec![window(May, June, true, "After the ground thaws")],
                        "August to September",
                        potato_stages(),
                        &["Foliage is frost tender; tubers are protected by soil"],
                    ),
                ),
            ],
        ),
        schedule(
            "Garlic",
            vec![
                (
                    Subtropical,
                    timing(
                        vec![window(November, December, true, "Softneck types need mild winters")],
                        "April to May",
                        garlic_stages(),
                        &["Needs some winter chill to form cloves"],
                    ),
                ),
                (
                    Temperate,
                    timing(
                        vec![
                            window(October, November, true, "Root before the ground freezes"),
                            window(February, March, false, "Spring planting gives smaller bulbs"),
                        ],
                        "June to July",
                        garlic_stages(),
                        &["Winter cold is required for bulbing"],
                    ),
                ),
                (
                    Continental,
                    timing(
                        vec![window(September, October, true, "Plant 4-6 weeks before hard freeze")],
                        "July",
                        garlic_stages(),
                        &["Mulch 10 cm deep over winter"],
                    ),
                ),
            ],
        ),
    ]
}
