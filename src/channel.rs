//! Event channel between the background search task and its consumer.
//!
//! A thin wrapper over `tokio::sync::mpsc::unbounded_channel`: publishing
//! never blocks and never fails while a receiver exists, and delivery
//! preserves publish order. Consumers either await [`EventReceiver::recv`]
//! or drain on a timer tick with [`EventReceiver::drain`].

use crate::types::{LogLevel, ResultRecord, SearchEvent};
use tokio::sync::mpsc;

/// Create a connected sender/receiver pair for one search run.
pub fn channel() -> (EventSender, EventReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender { tx }, EventReceiver { rx })
}

/// Publishing side of the event channel. Cloneable; held by the search task.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<SearchEvent>,
}

impl EventSender {
    /// Publish an event. Non-blocking; if the consumer has gone away the
    /// event is dropped silently (the run still completes).
    pub fn publish(&self, event: SearchEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("event receiver dropped; discarding event");
        }
    }

    /// Publish a progress notice.
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.publish(SearchEvent::Log {
            level,
            message: message.into(),
        });
    }

    /// Publish the terminal event carrying the accumulated batch.
    pub fn done(&self, records: Vec<ResultRecord>) {
        self.publish(SearchEvent::Done { records });
    }
}

/// Consuming side of the event channel.
#[derive(Debug)]
pub struct EventReceiver {
    rx: mpsc::UnboundedReceiver<SearchEvent>,
}

impl EventReceiver {
    /// Take every event currently available without blocking. Returns an
    /// empty vec when nothing is pending; callers on a poll cadence simply
    /// reschedule.
    pub fn drain(&mut self) -> Vec<SearchEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }

    /// Await the next event. Returns `None` once the sender is dropped and
    /// the queue is empty.
    pub async fn recv(&mut self) -> Option<SearchEvent> {
        self.rx.recv().await
    }
}
