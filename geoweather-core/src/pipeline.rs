//! Coordinate in, published weather out.
//!
//! A request runs as its own Tokio task: fetch, decode, split into a
//! [`WeatherReport`], then hand the report to the [`Dispatcher`] which runs
//! the observers. Requests are neither de-duplicated nor cancelled, so when
//! several overlap each one publishes as it completes and the last one to
//! finish is what observers end up showing.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::{sync::oneshot, task::JoinHandle};

use crate::{
    Config,
    dispatch::Dispatcher,
    error::WeatherError,
    model::{Coordinate, CurrentWeather, ForecastDay, ForecastWindow, WeatherReport},
    observer::{SubscriptionId, Subscribers},
    provider::{WeatherProvider, provider_from_config},
};

#[derive(Clone)]
pub struct WeatherPipeline {
    provider: Arc<dyn WeatherProvider>,
    dispatcher: Arc<dyn Dispatcher>,
    window: ForecastWindow,
    shared: Arc<Shared>,
}

#[derive(Default)]
struct Shared {
    current: Subscribers<CurrentWeather>,
    forecast: Subscribers<[ForecastDay]>,
    latest: Mutex<Option<WeatherReport>>,
}

impl WeatherPipeline {
    pub fn new(provider: Arc<dyn WeatherProvider>, dispatcher: Arc<dyn Dispatcher>) -> Self {
        Self {
            provider,
            dispatcher,
            window: ForecastWindow::default(),
            shared: Arc::new(Shared::default()),
        }
    }

    /// Pipeline backed by the provider and forecast window from `config`.
    pub fn from_config(
        config: &Config,
        dispatcher: Arc<dyn Dispatcher>,
    ) -> Result<Self, WeatherError> {
        let provider = provider_from_config(config)?;
        Ok(Self::new(Arc::new(provider), dispatcher).with_forecast_window(config.forecast_window))
    }

    pub fn with_forecast_window(mut self, window: ForecastWindow) -> Self {
        self.window = window;
        self
    }

    pub fn forecast_window(&self) -> ForecastWindow {
        self.window
    }

    /// Start a fetch for `coordinate` and return immediately.
    ///
    /// Must be called from within a Tokio runtime. The handle resolves once
    /// every observer has been notified on the dispatcher's context, to the
    /// published report or to the error that stopped the request. Dropping
    /// it leaves the request running.
    pub fn request_weather(
        &self,
        coordinate: Coordinate,
    ) -> JoinHandle<Result<WeatherReport, WeatherError>> {
        let pipeline = self.clone();
        tokio::spawn(async move { pipeline.fetch_and_publish(coordinate).await })
    }

    /// Fetch, normalize and publish in the current task.
    ///
    /// Returns after the dispatched notification job has run, so with a
    /// queueing dispatcher its context must be drained concurrently. On error
    /// nothing is published and the last report stays untouched.
    pub async fn fetch_and_publish(
        &self,
        coordinate: Coordinate,
    ) -> Result<WeatherReport, WeatherError> {
        let outcome = self
            .provider
            .fetch(coordinate)
            .await
            .and_then(|raw| raw.into_report(self.window));

        let report = match outcome {
            Ok(report) => report,
            Err(err) => {
                tracing::warn!(%coordinate, kind = err.kind(), error = %err, "weather request failed");
                return Err(err);
            }
        };

        tracing::info!(
            %coordinate,
            timezone = %report.current.timezone,
            forecast_days = report.forecast.len(),
            "publishing weather"
        );
        let delivered = self.publish(report.clone());
        if delivered.await.is_err() {
            tracing::warn!(%coordinate, "dispatcher dropped the notification job");
        }

        Ok(report)
    }

    /// Queue the notification job; the receiver fires once observers have run.
    fn publish(&self, report: WeatherReport) -> oneshot::Receiver<()> {
        let (done, delivered) = oneshot::channel();
        let shared = self.shared.clone();
        self.dispatcher.dispatch(Box::new(move || {
            *shared.latest.lock() = Some(report.clone());
            shared.current.notify(&report.current);
            shared.forecast.notify(&report.forecast);
            if done.send(()).is_err() {
                tracing::debug!("request no longer awaited, notification delivered anyway");
            }
        }));
        delivered
    }

    pub fn on_current_weather<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&CurrentWeather) + Send + Sync + 'static,
    {
        self.shared.current.subscribe(observer)
    }

    pub fn on_forecast<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&[ForecastDay]) + Send + Sync + 'static,
    {
        self.shared.forecast.subscribe(observer)
    }

    /// Remove an observer from whichever channel it was registered on.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.shared.current.unsubscribe(id) || self.shared.forecast.unsubscribe(id)
    }

    /// Last report handed to observers, if any.
    pub fn latest(&self) -> Option<WeatherReport> {
        self.shared.latest.lock().clone()
    }
}

impl std::fmt::Debug for WeatherPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherPipeline")
            .field("provider", &self.provider)
            .field("window", &self.window)
            .field("current_observers", &self.shared.current.len())
            .field("forecast_observers", &self.shared.forecast.len())
            .finish_non_exhaustive()
    }
}
