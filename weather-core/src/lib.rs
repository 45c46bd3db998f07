//! Core library for the `myweather` app.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather client over the OpenWeather current-conditions endpoint
//! - The persisted list of saved readings and the local storage it sits on
//! - City suggestions and the shared condition icon/colour table
//! - `AppState`, the controller the screens read from
//!
//! It is used by `myweather` (the CLI), but can also be reused by other front-ends.

pub mod app;
pub mod cities;
pub mod condition;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod storage;
pub mod store;
pub mod view;

pub use app::{AppState, SubmitOutcome};
pub use cities::{City, MAJOR_CITIES, filter_cities};
pub use condition::{ConditionStyle, WeatherIcon, condition_style};
pub use config::Config;
pub use error::{FetchError, PersistenceError, StoreError};
pub use model::{Observation, ReadingDetail, UnitSystem, WeatherReading};
pub use provider::{WeatherClient, WeatherProvider, client_from_config, provider_from_config};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{ENTRIES_KEY, EntryStore};
pub use view::EntryView;
