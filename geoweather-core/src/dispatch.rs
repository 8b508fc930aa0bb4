//! Hand-off of observer notifications to the context that owns the UI.
//!
//! Network work finishes on arbitrary runtime workers. Publishing always goes
//! through a [`Dispatcher`], so the thread observers run on is chosen by the
//! embedder rather than by whichever worker received the response.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

pub type Job = Box<dyn FnOnce() + Send + 'static>;

pub trait Dispatcher: Send + Sync {
    fn dispatch(&self, job: Job);
}

/// Runs every job on the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImmediateDispatcher;

impl Dispatcher for ImmediateDispatcher {
    fn dispatch(&self, job: Job) {
        job();
    }
}

/// Sending half of a [`UiContext`].
#[derive(Debug, Clone)]
pub struct UiDispatcher {
    tx: UnboundedSender<Job>,
}

impl Dispatcher for UiDispatcher {
    fn dispatch(&self, job: Job) {
        if self.tx.send(job).is_err() {
            tracing::warn!("UI context is gone, dropping notification");
        }
    }
}

/// Queue of jobs drained by the single UI thread.
pub struct UiContext {
    rx: UnboundedReceiver<Job>,
}

impl UiContext {
    pub fn new() -> (Self, UiDispatcher) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { rx }, UiDispatcher { tx })
    }

    /// Run every job queued so far without waiting. Returns how many ran.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(job) = self.rx.try_recv() {
            job();
            ran += 1;
        }
        ran
    }

    /// Wait for and run the next job. `false` once every dispatcher is dropped.
    pub async fn run_next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(job) => {
                job();
                true
            }
            None => false,
        }
    }

    /// Run jobs until every dispatcher has been dropped.
    pub async fn run(&mut self) {
        while self.run_next().await {}
    }
}

impl std::fmt::Debug for UiContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiContext").finish_non_exhaustive()
    }
}
