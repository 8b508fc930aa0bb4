/// Icon identifiers the weather service uses in `days[].icon`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherIcon {
    ClearDay,
    ClearNight,
    Cloudy,
    Fog,
    PartlyCloudyDay,
    PartlyCloudyNight,
    Rain,
    Snow,
    Wind,
}

impl WeatherIcon {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherIcon::ClearDay => "clear-day",
            WeatherIcon::ClearNight => "clear-night",
            WeatherIcon::Cloudy => "cloudy",
            WeatherIcon::Fog => "fog",
            WeatherIcon::PartlyCloudyDay => "partly-cloudy-day",
            WeatherIcon::PartlyCloudyNight => "partly-cloudy-night",
            WeatherIcon::Rain => "rain",
            WeatherIcon::Snow => "snow",
            WeatherIcon::Wind => "wind",
        }
    }

    pub const fn all() -> &'static [WeatherIcon] {
        &[
            WeatherIcon::ClearDay,
            WeatherIcon::ClearNight,
            WeatherIcon::Cloudy,
            WeatherIcon::Fog,
            WeatherIcon::PartlyCloudyDay,
            WeatherIcon::PartlyCloudyNight,
            WeatherIcon::Rain,
            WeatherIcon::Snow,
            WeatherIcon::Wind,
        ]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|icon| icon.as_str() == name)
    }

    /// Text glyph for terminal output.
    pub fn glyph(&self) -> &'static str {
        match self {
            WeatherIcon::ClearDay => "☀",
            WeatherIcon::ClearNight => "☾",
            WeatherIcon::Cloudy => "☁",
            WeatherIcon::Fog => "≡",
            WeatherIcon::PartlyCloudyDay | WeatherIcon::PartlyCloudyNight => "⛅",
            WeatherIcon::Rain => "☂",
            WeatherIcon::Snow => "❄",
            WeatherIcon::Wind => "≋",
        }
    }
}

impl std::fmt::Display for WeatherIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Asset key for an icon name. Never fails: names outside the known set
/// are looked up under their own name.
pub fn asset_key(name: &str) -> &str {
    match WeatherIcon::from_name(name) {
        Some(icon) => icon.as_str(),
        None => name,
    }
}
