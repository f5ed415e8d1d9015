//! Scoped log capture for tests.

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

pub type CapturedLogs = Arc<Mutex<Vec<(Level, String)>>>;

struct CaptureLayer {
    events: CapturedLogs,
}

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{:?}", value);
        }
    }
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.events
            .lock()
            .unwrap()
            .push((*event.metadata().level(), visitor.0));
    }
}

/// Install a capturing subscriber for the current thread until the guard drops.
pub fn install_capture() -> (tracing::subscriber::DefaultGuard, CapturedLogs) {
    let events = CapturedLogs::default();
    let subscriber = tracing_subscriber::registry().with(CaptureLayer {
        events: events.clone(),
    });
    (tracing::subscriber::set_default(subscriber), events)
}

pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, Vec<(Level, String)>) {
    let (guard, events) = install_capture();
    let out = f();
    drop(guard);
    let logs = events.lock().unwrap().clone();
    (out, logs)
}

/// Only the events at `level`.
pub fn at_level(events: &CapturedLogs, level: Level) -> Vec<String> {
    events
        .lock()
        .unwrap()
        .iter()
        .filter(|(l, _)| *l == level)
        .map(|(_, m)| m.clone())
        .collect()
}
