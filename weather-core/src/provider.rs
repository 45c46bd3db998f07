use crate::{
    Config,
    error::FetchError,
    model::{Observation, ReadingDetail, UnitSystem, WeatherReading, reading_id},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use chrono::Utc;
use std::fmt::Debug;

pub mod openweather;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for `city`, reported in `units`.
    async fn current(&self, city: &str, units: UnitSystem) -> anyhow::Result<Observation>;
}

#[async_trait]
impl<P: WeatherProvider + ?Sized> WeatherProvider for Box<P> {
    async fn current(&self, city: &str, units: UnitSystem) -> anyhow::Result<Observation> {
        (**self).current(city, units).await
    }
}

/// Turns a city name into a saved-ready [`WeatherReading`].
#[derive(Debug, Clone)]
pub struct WeatherClient<P> {
    provider: P,
    detail: ReadingDetail,
}

impl<P: WeatherProvider> WeatherClient<P> {
    pub fn new(provider: P, detail: ReadingDetail) -> Self {
        Self { provider, detail }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Blank input fails with [`FetchError::EmptyQuery`] without calling the provider.
    /// One provider request otherwise; no retry.
    pub async fn fetch_reading(
        &self,
        city_name: &str,
        units: UnitSystem,
    ) -> Result<WeatherReading, FetchError> {
        let city = city_name.trim();
        if city.is_empty() {
            return Err(FetchError::EmptyQuery);
        }

        let observation = self.provider.current(city, units).await.map_err(|err| {
            tracing::warn!(city, error = %format!("{err:#}"), "weather lookup failed");
            FetchError::Provider(format!("{err:#}"))
        })?;

        let reading = WeatherReading::from_observation(
            reading_id(Utc::now()),
            observation,
            units,
            self.detail,
        );

        tracing::debug!(
            id = %reading.id,
            city = %reading.city,
            temp = reading.temperature,
            "fetched reading"
        );
        Ok(reading)
    }
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
                 Hint: run `myweather configure` or set {}.",
            crate::config::API_KEY_ENV
        )
    })?;

    let provider = OpenWeatherProvider::with_options(
        api_key,
        config.base_url().to_string(),
        config.timeout(),
    )?;

    Ok(Box::new(provider))
}

/// Client wired from config, boxed so the caller need not name the provider type.
pub fn client_from_config(
    config: &Config,
) -> anyhow::Result<WeatherClient<Box<dyn WeatherProvider>>> {
    Ok(WeatherClient::new(provider_from_config(config)?, config.detail))
}
