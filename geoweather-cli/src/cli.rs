use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use geoweather_core::{
    Config, Coordinate, CoordinateSource, CurrentWeather, ForecastDay, ForecastWindow,
    ManualCoordinateSource, UiContext, UnitGroup, WeatherError, WeatherPipeline, WeatherReport,
    display::{city_from_timezone, day_of_month, day_of_week, format_reading},
    icon::{WeatherIcon, asset_key},
};
use tokio::task::JoinHandle;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "geoweather", version, about = "Current weather and 10-day forecast for a coordinate")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and display preferences.
    Configure,

    /// Show weather for a coordinate.
    Show {
        #[arg(allow_hyphen_values = true)]
        latitude: f64,

        #[arg(allow_hyphen_values = true)]
        longitude: f64,

        /// First day of the forecast strip; defaults to the configured one.
        #[arg(long, value_enum)]
        window: Option<WindowArg>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum WindowArg {
    Today,
    Tomorrow,
}

impl From<WindowArg> for ForecastWindow {
    fn from(value: WindowArg) -> Self {
        match value {
            WindowArg::Today => ForecastWindow::IncludeToday,
            WindowArg::Tomorrow => ForecastWindow::StartTomorrow,
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { latitude, longitude, window } => {
                show(Coordinate::new(latitude, longitude), window).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("Visual Crossing API key:")
        .without_confirmation()
        .prompt()
        .context("API key prompt was cancelled")?;
    config.set_api_key(api_key);

    let units: Vec<&str> = UnitGroup::all().iter().map(UnitGroup::as_str).collect();
    let unit = inquire::Select::new("Units:", units)
        .prompt()
        .context("Unit prompt was cancelled")?;
    config.unit_group = UnitGroup::try_from(unit)?;

    let starts = inquire::Select::new("Forecast strip starts:", vec!["today", "tomorrow"])
        .prompt()
        .context("Forecast prompt was cancelled")?;
    config.forecast_window = match starts {
        "tomorrow" => ForecastWindow::StartTomorrow,
        _ => ForecastWindow::IncludeToday,
    };

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

async fn show(coordinate: Coordinate, window: Option<WindowArg>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let (mut ui, dispatcher) = UiContext::new();

    let mut pipeline = WeatherPipeline::from_config(&config, Arc::new(dispatcher))?;
    if let Some(window) = window {
        pipeline = pipeline.with_forecast_window(window.into());
    }

    let unit = config.unit_group;
    let window = pipeline.forecast_window();
    pipeline.on_current_weather(move |weather| print_current(weather, unit));
    pipeline.on_forecast(move |days| print_forecast(days, window));

    // The command-line coordinate stands in for a location fix.
    let source = ManualCoordinateSource::new(config.location_updates);
    tracing::debug!(mode = ?source.mode(), ?window, "location source ready");

    let (tx, mut requests) = tokio::sync::mpsc::unbounded_channel();
    let requester = pipeline.clone();
    source.subscribe(Box::new(move |fix| {
        if tx.send(requester.request_weather(fix)).is_err() {
            tracing::warn!(%fix, "request queue is closed, result will not be reported");
        }
    }));
    source.push_fix(coordinate);
    drop(source);

    while let Some(request) = requests.recv().await {
        drive(&mut ui, request).await?;
    }

    Ok(())
}

/// Run queued UI jobs until `request` resolves; the request only completes
/// after its observers ran on this context.
async fn drive(
    ui: &mut UiContext,
    mut request: JoinHandle<Result<WeatherReport, WeatherError>>,
) -> anyhow::Result<()> {
    let mut ui_open = true;
    loop {
        tokio::select! {
            outcome = &mut request => {
                outcome.context("Weather request task failed")??;
                return Ok(());
            }
            running = ui.run_next(), if ui_open => {
                ui_open = running;
            }
        }
    }
}

fn print_current(weather: &CurrentWeather, unit: UnitGroup) {
    let today = chrono::Local::now().date_naive();
    let weekday = today.format("%A").to_string().to_lowercase();

    println!("{}", city_from_timezone(&weather.timezone).to_uppercase());
    println!("{}", format_reading(weather.temperature, "°"));
    println!("{weekday}  {}", day_of_month(today));
    println!("{}", weather.conditions.to_uppercase());
    println!(
        "temp {}   wind {}   humidity {}",
        format_reading(weather.temperature, "°"),
        format_reading(weather.wind_speed, unit.wind_speed_suffix()),
        format_reading(weather.humidity, "%"),
    );
    println!();
}

fn print_forecast(days: &[ForecastDay], window: ForecastWindow) {
    let starting = match window {
        ForecastWindow::IncludeToday => "today",
        ForecastWindow::StartTomorrow => "tomorrow",
    };
    println!("{}-DAY WEATHER FORECAST (from {starting})", days.len());
    for day in days {
        let name = day_of_week(&day.date).unwrap_or_else(|| day.date.clone());
        let reading = format_reading(day.temperature, "°");
        match WeatherIcon::from_name(&day.icon) {
            Some(icon) => println!("{name:<10} {reading:>5}  {} {icon}", icon.glyph()),
            None => println!("{name:<10} {reading:>5}    {}", asset_key(&day.icon)),
        }
    }
}
