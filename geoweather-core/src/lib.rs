//! Core library for the `geoweather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather provider abstraction and its Visual Crossing client
//! - The fetch/normalize/publish pipeline with its observers and dispatch
//! - Coordinate sources and small presentation helpers
//!
//! It is used by `geoweather-cli`, but can also be embedded by any front end
//! that supplies its own [`Dispatcher`] for its UI thread.

pub mod config;
pub mod dispatch;
pub mod display;
pub mod error;
pub mod icon;
pub mod location;
pub mod model;
pub mod observer;
pub mod pipeline;
pub mod provider;

pub use config::Config;
pub use dispatch::{Dispatcher, ImmediateDispatcher, UiContext, UiDispatcher};
pub use error::WeatherError;
pub use location::{CoordinateSource, LocationUpdates, ManualCoordinateSource};
pub use model::{
    Coordinate, CurrentWeather, FORECAST_LEN, ForecastDay, ForecastWindow, RawWeatherResponse,
    WeatherReport,
};
pub use observer::SubscriptionId;
pub use pipeline::WeatherPipeline;
pub use provider::{UnitGroup, WeatherProvider, visualcrossing::VisualCrossingProvider};
