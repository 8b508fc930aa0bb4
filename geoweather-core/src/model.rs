use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::error::WeatherError;

/// Number of slots in the forecast strip.
pub const FORECAST_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Which slice of `days` becomes the forecast strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ForecastWindow {
    /// `days[0..10]`, today is the first slot.
    #[default]
    IncludeToday,
    /// `days[1..11]`, the strip starts tomorrow.
    StartTomorrow,
}

impl ForecastWindow {
    pub fn range(&self) -> Range<usize> {
        match self {
            ForecastWindow::IncludeToday => 0..FORECAST_LEN,
            ForecastWindow::StartTomorrow => 1..FORECAST_LEN + 1,
        }
    }

    /// Minimum length of `days` this window can be cut from.
    pub fn required_days(&self) -> usize {
        self.range().end
    }
}

/// Timeline payload as sent by the weather service.
///
/// Only the fields the pipeline reads are modelled; everything else in the
/// response is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawWeatherResponse {
    pub timezone: String,
    pub address: String,
    #[serde(rename = "currentConditions")]
    pub current_conditions: RawCurrentConditions,
    pub days: Vec<RawDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCurrentConditions {
    pub temp: f32,
    pub humidity: f32,
    pub windspeed: f32,
    pub conditions: String,
    pub datetime: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDay {
    /// `YYYY-MM-DD`
    pub datetime: String,
    pub temp: f32,
    #[serde(default)]
    pub conditions: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f32,
    pub wind_speed: f32,
    pub humidity: f32,
    pub conditions: String,
    pub timezone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: String,
    pub temperature: f32,
    pub icon: String,
}

/// Everything one successful request publishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentWeather,
    pub forecast: Vec<ForecastDay>,
}

impl RawWeatherResponse {
    /// Split the payload into the current-conditions and forecast view-models.
    ///
    /// Fails instead of truncating when `days` is too short for `window`.
    pub fn into_report(self, window: ForecastWindow) -> Result<WeatherReport, WeatherError> {
        let required = window.required_days();
        let available = self.days.len();
        if available < required {
            return Err(WeatherError::ForecastWindow { required, available });
        }

        let current = CurrentWeather {
            temperature: self.current_conditions.temp,
            wind_speed: self.current_conditions.windspeed,
            humidity: self.current_conditions.humidity,
            conditions: self.current_conditions.conditions,
            timezone: self.timezone,
        };

        let forecast = self
            .days
            .into_iter()
            .skip(window.range().start)
            .take(FORECAST_LEN)
            .map(|day| ForecastDay {
                date: day.datetime,
                temperature: day.temp,
                icon: day.icon,
            })
            .collect();

        Ok(WeatherReport { current, forecast })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(days: usize) -> RawWeatherResponse {
        RawWeatherResponse {
            timezone: "Europe/Paphos_Town".to_string(),
            address: "34.77,32.42".to_string(),
            current_conditions: RawCurrentConditions {
                temp: 21.3,
                humidity: 64.2,
                windspeed: 11.9,
                conditions: "Partially cloudy".to_string(),
                datetime: "14:00:00".to_string(),
            },
            days: (0..days)
                .map(|i| RawDay {
                    datetime: format!("2024-03-{:02}", i + 1),
                    temp: 15.0 + i as f32,
                    conditions: "Clear".to_string(),
                    icon: "clear-day".to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn current_weather_is_direct_mapping() {
        let report = raw(10).into_report(ForecastWindow::IncludeToday).unwrap();

        assert_eq!(report.current.temperature, 21.3);
        assert_eq!(report.current.humidity, 64.2);
        assert_eq!(report.current.wind_speed, 11.9);
        assert_eq!(report.current.conditions, "Partially cloudy");
        assert_eq!(report.current.timezone, "Europe/Paphos_Town");
    }

    #[test]
    fn include_today_takes_first_ten_days() {
        let report = raw(15).into_report(ForecastWindow::IncludeToday).unwrap();

        assert_eq!(report.forecast.len(), FORECAST_LEN);
        assert_eq!(report.forecast[0].date, "2024-03-01");
        assert_eq!(report.forecast[9].date, "2024-03-10");
        assert_eq!(report.forecast[0].icon, "clear-day");
    }

    #[test]
    fn start_tomorrow_skips_today() {
        let report = raw(11).into_report(ForecastWindow::StartTomorrow).unwrap();

        assert_eq!(report.forecast.len(), FORECAST_LEN);
        assert_eq!(report.forecast[0].date, "2024-03-02");
        assert_eq!(report.forecast[9].date, "2024-03-11");
        assert_eq!(report.forecast[0].temperature, 16.0);
    }

    #[test]
    fn short_days_is_reported_not_truncated() {
        let err = raw(10).into_report(ForecastWindow::StartTomorrow).unwrap_err();
        assert!(matches!(
            err,
            WeatherError::ForecastWindow { required: 11, available: 10 }
        ));

        let err = raw(3).into_report(ForecastWindow::IncludeToday).unwrap_err();
        assert!(matches!(
            err,
            WeatherError::ForecastWindow { required: 10, available: 3 }
        ));
    }

    #[test]
    fn json_roundtrip_keeps_f32_values() {
        let original = raw(10);
        let json = serde_json::to_string(&original).unwrap();
        assert!(json.contains("\"currentConditions\""));

        let decoded: RawWeatherResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, original);
        assert_eq!(decoded.current_conditions.temp.to_bits(), 21.3f32.to_bits());
        assert_eq!(decoded.current_conditions.humidity.to_bits(), 64.2f32.to_bits());
        assert_eq!(decoded.current_conditions.windspeed.to_bits(), 11.9f32.to_bits());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let json = r#"{
            "queryCost": 1,
            "latitude": 34.77,
            "timezone": "Asia/Nicosia",
            "address": "Paphos",
            "currentConditions": {
                "temp": 18.5, "humidity": 70.0, "windspeed": 5.4,
                "conditions": "Clear", "datetime": "09:00:00", "uvindex": 3
            },
            "days": [
                {"datetime": "2024-03-01", "temp": 17.0, "icon": "rain", "tempmax": 20.1}
            ]
        }"#;

        let decoded: RawWeatherResponse = serde_json::from_str(json).unwrap();
        assert_eq!(decoded.days.len(), 1);
        assert_eq!(decoded.days[0].conditions, "");
        assert_eq!(decoded.current_conditions.windspeed, 5.4);
    }

    #[test]
    fn window_ranges() {
        assert_eq!(ForecastWindow::IncludeToday.range(), 0..10);
        assert_eq!(ForecastWindow::StartTomorrow.range(), 1..11);
        assert_eq!(ForecastWindow::default(), ForecastWindow::IncludeToday);
    }
}
