//! Coordinate sources feeding the pipeline.
//!
//! Acquiring a fix (permissions, sensors) happens outside this crate. A
//! source only promises to call its subscriber with coordinates; it may also
//! never call it at all, and nothing here waits on it with a timeout.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{model::Coordinate, pipeline::WeatherPipeline};

pub type CoordinateCallback = Box<dyn Fn(Coordinate) + Send + Sync>;

/// How many fixes a source hands to its subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocationUpdates {
    /// Deliver the first fix, then stop.
    #[default]
    SingleShot,
    /// Deliver every fix.
    Continuous,
}

pub trait CoordinateSource: Send + Sync {
    /// Register the callback for new fixes, replacing any earlier one.
    fn subscribe(&self, callback: CoordinateCallback);
}

/// Source whose fixes are pushed in by the embedder.
pub struct ManualCoordinateSource {
    mode: LocationUpdates,
    state: Mutex<SourceState>,
}

#[derive(Default)]
struct SourceState {
    callback: Option<Arc<dyn Fn(Coordinate) + Send + Sync>>,
    stopped: bool,
}

impl ManualCoordinateSource {
    pub fn new(mode: LocationUpdates) -> Self {
        Self { mode, state: Mutex::new(SourceState::default()) }
    }

    pub fn mode(&self) -> LocationUpdates {
        self.mode
    }

    /// True once a single-shot source has delivered its fix.
    pub fn is_stopped(&self) -> bool {
        self.state.lock().stopped
    }

    /// Offer a new fix. Returns whether a subscriber received it.
    ///
    /// Fixes arriving before anyone subscribed are dropped, as are fixes
    /// after a single-shot source has delivered once.
    pub fn push_fix(&self, coordinate: Coordinate) -> bool {
        let callback = {
            let mut state = self.state.lock();
            if state.stopped {
                tracing::debug!(%coordinate, "location updates stopped, ignoring fix");
                return false;
            }
            let Some(callback) = state.callback.clone() else {
                tracing::debug!(%coordinate, "no location subscriber yet, dropping fix");
                return false;
            };
            if self.mode == LocationUpdates::SingleShot {
                state.stopped = true;
            }
            callback
        };

        tracing::info!(%coordinate, "location fix delivered");
        callback(coordinate);
        true
    }
}

impl CoordinateSource for ManualCoordinateSource {
    fn subscribe(&self, callback: CoordinateCallback) {
        self.state.lock().callback = Some(Arc::from(callback));
    }
}

impl std::fmt::Debug for ManualCoordinateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualCoordinateSource")
            .field("mode", &self.mode)
            .field("stopped", &self.is_stopped())
            .finish()
    }
}

/// Request weather for every fix `source` delivers.
///
/// Fixes are expected while a Tokio runtime is running, since each one
/// spawns a request.
pub fn connect(source: &dyn CoordinateSource, pipeline: Arc<WeatherPipeline>) {
    source.subscribe(Box::new(move |coordinate| {
        // Outcome is logged by the pipeline; nobody awaits location-driven requests.
        drop(pipeline.request_weather(coordinate));
    }));
}
