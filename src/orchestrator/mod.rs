//! Search orchestration: session lifecycle around the sequential run loop.

mod lookup;
mod search;

pub use search::run_search;

use crate::channel::{self, EventReceiver};
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::types::SearchRequest;
use tokio_util::sync::CancellationToken;

/// One in-flight search run: a background task plus the consumer's event
/// receiver and a cancellation handle.
///
/// The engine is single-shot per session. At most one session should be
/// active at a time; serializing invocations is the caller's job.
#[derive(Debug)]
pub struct SearchSession {
    events: EventReceiver,
    cancel: CancellationToken,
    task: tokio::task::JoinHandle<()>,
}

impl SearchSession {
    /// Validate the request and launch it on a background task.
    ///
    /// Must be called from within a tokio runtime. Rejects caller misuse
    /// (empty term list, field invalid for the direction, bad config)
    /// before any background work starts.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`], [`SearchError::Request`], or
    /// [`SearchError::Http`] if the run cannot be started.
    pub fn start(request: SearchRequest, config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        request.validate()?;
        let client = http::build_client(&config)?;

        let (tx, rx) = channel::channel();
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();
        let task = tokio::spawn(async move {
            run_search(&request, &config, &client, &tx, &task_cancel).await;
        });

        Ok(Self {
            events: rx,
            cancel,
            task,
        })
    }

    /// Request a cooperative stop. Honored at the next term boundary; the
    /// in-flight remote call, if any, runs to completion or timeout first.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// A clone of the session's cancellation token, for wiring into
    /// caller-side shutdown paths.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// The event stream for this run: zero or more `Log` events followed by
    /// exactly one `Done`.
    pub fn events(&mut self) -> &mut EventReceiver {
        &mut self.events
    }

    /// Whether the background task has finished.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
