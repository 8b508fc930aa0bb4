use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::{
    Config,
    error::WeatherError,
    model::{Coordinate, RawWeatherResponse},
    provider::visualcrossing::VisualCrossingProvider,
};

pub mod visualcrossing;

/// Unit system requested from the weather service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitGroup {
    #[default]
    Metric,
    Us,
    Uk,
    Base,
}

impl UnitGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitGroup::Metric => "metric",
            UnitGroup::Us => "us",
            UnitGroup::Uk => "uk",
            UnitGroup::Base => "base",
        }
    }

    pub const fn all() -> &'static [UnitGroup] {
        &[UnitGroup::Metric, UnitGroup::Us, UnitGroup::Uk, UnitGroup::Base]
    }

    /// Suffix for wind speed readings in this unit system.
    pub fn wind_speed_suffix(&self) -> &'static str {
        match self {
            UnitGroup::Metric => " km/h",
            UnitGroup::Us | UnitGroup::Uk => " mph",
            UnitGroup::Base => " m/s",
        }
    }
}

impl std::fmt::Display for UnitGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UnitGroup {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        UnitGroup::all()
            .iter()
            .copied()
            .find(|unit| unit.as_str() == lower)
            .ok_or_else(|| {
                anyhow::anyhow!("Unknown unit group '{value}'. Supported: metric, us, uk, base.")
            })
    }
}

/// Source of raw timeline payloads for a coordinate.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch(&self, coordinate: Coordinate) -> Result<RawWeatherResponse, WeatherError>;
}

/// Construct the provider described by `config`.
pub fn provider_from_config(config: &Config) -> Result<VisualCrossingProvider, WeatherError> {
    let api_key = config.resolved_api_key().ok_or(WeatherError::MissingApiKey)?;

    let mut provider = VisualCrossingProvider::new(api_key).with_unit_group(config.unit_group);
    if let Some(base_url) = &config.base_url {
        provider = provider.with_base_url(base_url.clone());
    }

    Ok(provider)
}
