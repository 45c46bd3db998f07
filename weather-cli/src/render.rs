//! Terminal rendering for the welcome, list and detail screens.

use myweather_core::{City, EntryView, WeatherIcon, WeatherReading};

pub fn glyph(icon: WeatherIcon) -> &'static str {
    match icon {
        WeatherIcon::Sunny => "☀",
        WeatherIcon::PartlyCloudy => "⛅",
        WeatherIcon::Cloudy => "☁",
        WeatherIcon::PartlyRainy => "🌦",
        WeatherIcon::Pouring => "🌧",
        WeatherIcon::Snowy => "❄",
        WeatherIcon::Fog => "🌫",
    }
}

pub fn welcome() {
    println!("☀  Welcome to myWeather˚");
    println!("   View the weather in your city here!");
    println!();
}

pub fn suggestions(cities: &[&City]) {
    if cities.is_empty() {
        println!("No matching cities.");
        return;
    }
    for city in cities {
        println!("{}", suggestion_label(city));
    }
}

pub fn suggestion_label(city: &City) -> String {
    format!("{}, {}", city.label, city.state)
}

/// One line per entry: `1. ☀ Boston  72°F  clear sky`.
pub fn list_line(position: usize, reading: &WeatherReading) -> String {
    let view = EntryView::from(reading);
    format!(
        "{position}. {} {}  {}  {}",
        glyph(view.style.icon),
        view.city,
        view.temperature,
        view.description
    )
}

pub fn entry_list(entries: &[WeatherReading]) {
    if entries.is_empty() {
        println!("No saved entries yet. Try `myweather add <city>`.");
        return;
    }
    for (i, reading) in entries.iter().enumerate() {
        println!("{}", list_line(i + 1, reading));
    }
}

pub fn entry_detail(reading: &WeatherReading) {
    let view = EntryView::from(reading);

    println!();
    println!("  {} {}", glyph(view.style.icon), view.city);
    println!("  {}", view.temperature);
    println!("  {}", view.description);
    for (label, value) in &view.details {
        println!("  {label}: {value}");
    }
    println!("  ({} on {})", view.style.icon, view.style.color);
    println!("  saved {}", view.id);
    println!();
}

pub fn inline_error(msg: &str) {
    eprintln!("! {msg}");
}
