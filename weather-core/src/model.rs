use std::{fmt, str::FromStr};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Measurement convention sent to the provider and used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    Standard,
    Metric,
    #[default]
    Imperial,
}

impl UnitSystem {
    /// Value of the provider's `units` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Standard => "standard",
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            UnitSystem::Standard => "K",
            UnitSystem::Metric => "°C",
            UnitSystem::Imperial => "°F",
        }
    }

    pub fn speed_suffix(&self) -> &'static str {
        match self {
            UnitSystem::Standard | UnitSystem::Metric => "m/s",
            UnitSystem::Imperial => "mph",
        }
    }

    pub const fn all() -> &'static [UnitSystem] {
        &[UnitSystem::Imperial, UnitSystem::Metric, UnitSystem::Standard]
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitSystem {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "standard" => Ok(UnitSystem::Standard),
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported: imperial, metric, standard."
            )),
        }
    }
}

/// How much of a provider response is kept on a saved reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingDetail {
    /// City, temperature and description only.
    #[default]
    Basic,
    /// Also humidity, pressure and wind speed.
    Extended,
}

/// Provider payload reduced to the fields the app cares about.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub city: String,
    pub temperature: f64,
    pub description: String,
    pub humidity: f64,
    pub pressure: f64,
    pub wind_speed: f64,
}

/// One saved weather result. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReading {
    pub id: String,
    pub city: String,
    #[serde(rename = "temp")]
    pub temperature: i64,
    pub description: String,
    /// Blobs written before units were recorded were always imperial.
    #[serde(default)]
    pub units: UnitSystem,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
}

impl WeatherReading {
    pub fn from_observation(
        id: String,
        observation: Observation,
        units: UnitSystem,
        detail: ReadingDetail,
    ) -> Self {
        let extended = detail == ReadingDetail::Extended;

        Self {
            id,
            city: observation.city,
            temperature: round_half_up(observation.temperature),
            description: observation.description,
            units,
            humidity: extended.then_some(observation.humidity),
            pressure: extended.then_some(observation.pressure),
            wind_speed: extended.then_some(observation.wind_speed),
        }
    }

    pub fn is_extended(&self) -> bool {
        self.humidity.is_some() || self.pressure.is_some() || self.wind_speed.is_some()
    }
}

/// Id for a reading created at `at`, e.g. `2024-05-01T12:30:00.123Z`.
pub fn reading_id(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Rounds to the nearest integer with halves going up (`-2.5 -> -2`, `2.5 -> 3`).
pub fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor as i64 + 1
    } else {
        floor as i64
    }
}
