use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ClimateZoneKey {
    Tropical,
    Subtropical,
    Temperate,
    Continental,
}

impl ClimateZoneKey {
    pub const ALL: [ClimateZoneKey; 4] = [
        ClimateZoneKey::Tropical,
        ClimateZoneKey::Subtropical,
        ClimateZoneKey::Temperate,
        ClimateZoneKey::Continental,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ClimateZoneKey::Tropical => "tropical",
            ClimateZoneKey::Subtropical => "subtropical",
            ClimateZoneKey::Temperate => "temperate",
            ClimateZoneKey::Continental => "continental",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

impl std::fmt::Display for ClimateZoneKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClimateZoneDef {
    pub key: ClimateZoneKey,
    pub name: String,
    pub temperature_range: String,
    pub description: String,
    pub growing_season: String,
}

/// Cascading threshold on average temperature in °C.
///
/// Guards are checked top-down: >= 25 tropical, >= 20 subtropical,
/// >= 15 temperate, anything else (including NaN) continental.
pub fn classify_climate(avg_temp_c: f64) -> ClimateZoneKey {
    if avg_temp_c >= 25.0 {
        ClimateZoneKey::Tropical
    } else if avg_temp_c >= 20.0 {
        ClimateZoneKey::Subtropical
    } else if avg_temp_c >= 15.0 {
        ClimateZoneKey::Temperate
    } else {
        ClimateZoneKey::Continental
    }
}

pub fn climate_zone(key: ClimateZoneKey) -> ClimateZoneDef {
    let (name, temperature_range, description, growing_season) = match key {
        ClimateZoneKey::Tropical => (
            "Tropical",
            "25°C and above",
            "Hot year-round with wet and dry seasons instead of winter",
            "Year-round, timed around the rains",
        ),
        ClimateZoneKey::Subtropical => (
            "Subtropical",
            "20°C to 25°C",
            "Hot summers and mild winters with rare frost",
            "Long season, February to November",
        ),
        ClimateZoneKey::Temperate => (
            "Temperate",
            "15°C to 20°C",
            "Four distinct seasons with moderate frost in winter",
            "April to October",
        ),
        ClimateZoneKey::Continental => (
            "Continental",
            "Below 15°C",
            "Cold winters and warm, short summers",
            "May to September",
        ),
    };

    ClimateZoneDef {
        key,
        name: name.to_string(),
        temperature_range: temperature_range.to_string(),
        description: description.to_string(),
        growing_season: growing_season.to_string(),
    }
}

pub fn climate_zones() -> Vec<ClimateZoneDef> {
    ClimateZoneKey::ALL.into_iter().map(climate_zone).collect()
}
