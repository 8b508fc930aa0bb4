use async_trait::async_trait;
use reqwest::Client;

use crate::{
    error::WeatherError,
    model::{Coordinate, RawWeatherResponse},
    provider::{UnitGroup, WeatherProvider},
};

pub const DEFAULT_BASE_URL: &str = "https://weather.visualcrossing.com";
const TIMELINE_PATH: &str = "/VisualCrossingWebServices/rest/services/timeline/";

/// Visual Crossing timeline API client.
#[derive(Clone)]
pub struct VisualCrossingProvider {
    api_key: String,
    base_url: String,
    unit_group: UnitGroup,
    http: Client,
}

impl VisualCrossingProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            unit_group: UnitGroup::default(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_unit_group(mut self, unit_group: UnitGroup) -> Self {
        self.unit_group = unit_group;
        self
    }

    pub fn unit_group(&self) -> UnitGroup {
        self.unit_group
    }

    /// Timeline URL for `coordinate`, without the query string.
    ///
    /// The comma between latitude and longitude is sent percent-encoded.
    pub fn timeline_url(&self, coordinate: Coordinate) -> String {
        format!(
            "{}{}{}%2C{}",
            self.base_url, TIMELINE_PATH, coordinate.latitude, coordinate.longitude
        )
    }
}

impl std::fmt::Debug for VisualCrossingProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisualCrossingProvider")
            .field("base_url", &self.base_url)
            .field("unit_group", &self.unit_group)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl WeatherProvider for VisualCrossingProvider {
    async fn fetch(&self, coordinate: Coordinate) -> Result<RawWeatherResponse, WeatherError> {
        let url = self.timeline_url(coordinate);
        tracing::debug!(%url, unit_group = %self.unit_group, "requesting timeline");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("unitGroup", self.unit_group.as_str()),
                ("key", self.api_key.as_str()),
                ("contentType", "json"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(WeatherError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let parsed: RawWeatherResponse = serde_json::from_str(&body)?;
        tracing::debug!(
            address = %parsed.address,
            days = parsed.days.len(),
            "decoded timeline"
        );

        Ok(parsed)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
