//! Lookup from a provider condition description to an icon and a background colour.
//!
//! Shared by every surface that renders a reading so the table lives in one place.

/// Icon ids from the Material Community icon set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherIcon {
    Sunny,
    PartlyCloudy,
    Cloudy,
    PartlyRainy,
    Pouring,
    Snowy,
    Fog,
}

impl WeatherIcon {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherIcon::Sunny => "weather-sunny",
            WeatherIcon::PartlyCloudy => "weather-partly-cloudy",
            WeatherIcon::Cloudy => "weather-cloudy",
            WeatherIcon::PartlyRainy => "weather-partly-rainy",
            WeatherIcon::Pouring => "weather-pouring",
            WeatherIcon::Snowy => "weather-snowy",
            WeatherIcon::Fog => "weather-fog",
        }
    }
}

impl std::fmt::Display for WeatherIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionStyle {
    pub icon: WeatherIcon,
    pub color: &'static str,
}

pub const DEFAULT_STYLE: ConditionStyle = ConditionStyle {
    icon: WeatherIcon::Sunny,
    color: "black",
};

const CONDITION_TABLE: &[(&str, ConditionStyle)] = &[
    ("clear sky", style(WeatherIcon::Sunny, "#ffcc29")),
    ("few clouds", style(WeatherIcon::PartlyCloudy, "#96d5f0")),
    ("scattered clouds", style(WeatherIcon::Cloudy, "#afbfc6")),
    ("overcast clouds", style(WeatherIcon::Cloudy, "#afbfc6")),
    ("broken clouds", style(WeatherIcon::PartlyCloudy, "#9dbfd5")),
    ("shower rain", style(WeatherIcon::PartlyRainy, "#7495a4")),
    ("rain", style(WeatherIcon::Pouring, "#7495a4")),
    ("moderate rain", style(WeatherIcon::Pouring, "#7495a4")),
    ("snow", style(WeatherIcon::Snowy, "#ffffff")),
    ("mist", style(WeatherIcon::Fog, "#afbfc6")),
];

const fn style(icon: WeatherIcon, color: &'static str) -> ConditionStyle {
    ConditionStyle { icon, color }
}

/// Exact, case-sensitive match on the description; unknown strings get [`DEFAULT_STYLE`].
pub fn condition_style(description: &str) -> ConditionStyle {
    CONDITION_TABLE
        .iter()
        .find(|(name, _)| *name == description)
        .map(|(_, style)| *style)
        .unwrap_or(DEFAULT_STYLE)
}
