//! Captures the analyzer's tracing events so tests can assert on them.
//!
//! Every event the driver emits carries a `source` field naming the log it
//! came from. Tests running in parallel share one global subscriber, so they
//! select their own events with [`events_for_source`].

use std::sync::{Arc, Mutex, Once, OnceLock};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{Layer, layer::Context};

pub type EventLog = Arc<Mutex<Vec<CapturedEvent>>>;

/// One analyzer event, fields rendered to strings.
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: Level,
    pub fields: Vec<(String, String)>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn message(&self) -> Option<&str> {
        self.field("message")
    }

    pub fn is_warning(&self) -> bool {
        self.level == Level::WARN
    }
}

struct CaptureLayer {
    events: EventLog,
}

/// Install the capture subscriber once per test binary and return its log.
pub fn captured_events() -> EventLog {
    static EVENTS: OnceLock<EventLog> = OnceLock::new();
    static INIT: Once = Once::new();

    let events = EVENTS.get_or_init(EventLog::default).clone();

    INIT.call_once(|| {
        let subscriber = tracing_subscriber::registry().with(CaptureLayer {
            events: events.clone(),
        });
        tracing::subscriber::set_global_default(subscriber)
            .expect("failed to set global tracing subscriber");
    });

    events
}

/// Events whose `source` field equals `source`, in emission order.
pub fn events_for_source(source: &str) -> Vec<CapturedEvent> {
    captured_events()
        .lock()
        .unwrap()
        .iter()
        .filter(|e| e.field("source") == Some(source))
        .cloned()
        .collect()
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        // Only the analyzer's own events; dependencies stay out of the log.
        if !event.metadata().target().starts_with("pglens_core") {
            return;
        }

        let mut fields = FieldStrings::default();
        event.record(&mut fields);

        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            fields: fields.0,
        });
    }
}

#[derive(Default)]
struct FieldStrings(Vec<(String, String)>);

impl Visit for FieldStrings {
    fn record_u64(&mut self, field: &Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }
}
