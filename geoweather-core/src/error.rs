/// Errors that end a single weather request.
///
/// None of these is retried. The pipeline logs them and hands them back to
/// whoever awaited the request; observers never see a failed request.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Weather service responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode weather JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Forecast window needs {required} days but the response has {available}")]
    ForecastWindow { required: usize, available: usize },

    #[error(
        "No API key configured.\n\
         Hint: run `geoweather configure` or set GEOWEATHER_API_KEY."
    )]
    MissingApiKey,
}

impl WeatherError {
    /// Short machine-friendly label, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            WeatherError::Network(_) => "network",
            WeatherError::Status { .. } => "status",
            WeatherError::Decode(_) => "decode",
            WeatherError::ForecastWindow { .. } => "forecast_window",
            WeatherError::MissingApiKey => "missing_api_key",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_window_message_names_both_counts() {
        let err = WeatherError::ForecastWindow { required: 11, available: 10 };
        let msg = err.to_string();
        assert!(msg.contains("11"));
        assert!(msg.contains("10"));
        assert_eq!(err.kind(), "forecast_window");
    }

    #[test]
    fn decode_error_converts_from_serde() {
        let serde_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: WeatherError = serde_err.into();
        assert!(matches!(err, WeatherError::Decode(_)));
        assert!(err.to_string().starts_with("Failed to decode weather JSON"));
    }
}
