//! Display-ready projection of a saved reading, used by the list and the detail surfaces.

use crate::{
    condition::{ConditionStyle, condition_style},
    model::WeatherReading,
};

#[derive(Debug, Clone, PartialEq)]
pub struct EntryView<'a> {
    pub id: &'a str,
    pub city: &'a str,
    /// e.g. `72°F`
    pub temperature: String,
    pub description: &'a str,
    pub style: ConditionStyle,
    /// Label/value pairs for humidity, pressure and wind, when the reading has them.
    pub details: Vec<(&'static str, String)>,
}

impl<'a> From<&'a WeatherReading> for EntryView<'a> {
    fn from(reading: &'a WeatherReading) -> Self {
        let units = reading.units;
        let mut details = Vec::new();

        if let Some(h) = reading.humidity {
            details.push(("Humidity", format!("{h}%")));
        }
        if let Some(p) = reading.pressure {
            details.push(("Pressure", format!("{p} hPa")));
        }
        if let Some(w) = reading.wind_speed {
            details.push(("Wind", format!("{w} {}", units.speed_suffix())));
        }

        Self {
            id: &reading.id,
            city: &reading.city,
            temperature: format!("{}{}", reading.temperature, units.temperature_suffix()),
            description: &reading.description,
            style: condition_style(&reading.description),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{condition::WeatherIcon, model::UnitSystem};

    #[test]
    fn view_of_extended_reading() {
        let reading = WeatherReading {
            id: "x".into(),
            city: "Seattle".into(),
            temperature: 12,
            description: "mist".into(),
            units: UnitSystem::Metric,
            humidity: Some(93.0),
            pressure: Some(1016.0),
            wind_speed: Some(2.5),
        };

        let view = EntryView::from(&reading);
        assert_eq!(view.temperature, "12°C");
        assert_eq!(view.style.icon, WeatherIcon::Fog);
        assert_eq!(
            view.details,
            vec![
                ("Humidity", "93%".to_string()),
                ("Pressure", "1016 hPa".to_string()),
                ("Wind", "2.5 m/s".to_string()),
            ]
        );
    }

    #[test]
    fn basic_reading_has_no_details() {
        let reading = WeatherReading {
            id: "y".into(),
            city: "Miami".into(),
            temperature: -3,
            description: "tornado".into(),
            units: UnitSystem::Imperial,
            humidity: None,
            pressure: None,
            wind_speed: None,
        };

        let view = EntryView::from(&reading);
        assert_eq!(view.temperature, "-3°F");
        assert!(view.details.is_empty());
        assert_eq!(view.style.color, "black");
    }
}
