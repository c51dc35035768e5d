//! Narrowing emits structured logs: `trace` on success, `warn` on rejection.

use std::fmt;
use std::sync::{Arc, Mutex};

use leafkit_web::{ChangeInputError, decode_change_event};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;

type Captured = Arc<Mutex<Vec<(Level, String, String)>>>;

/// Records level, message and the `error` field of every event.
struct CaptureLayer(Captured);

#[derive(Default)]
struct FieldVisitor {
    message: String,
    error: String,
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{value:?}"),
            "error" => self.error = format!("{value:?}"),
            _ => {}
        }
    }
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        self.0
            .lock()
            .unwrap()
            .push((*event.metadata().level(), visitor.message, visitor.error));
    }
}

fn capture(f: impl FnOnce()) -> Vec<(Level, String, String)> {
    let captured: Captured = Arc::default();
    let subscriber = tracing_subscriber::registry().with(CaptureLayer(Arc::clone(&captured)));
    tracing::subscriber::with_default(subscriber, f);
    let events = captured.lock().unwrap().clone();
    events
}

#[test]
fn rejection_is_logged_at_warn() {
    let events = capture(|| {
        let err = decode_change_event(r#"{"type":"change","currentTarget":{"nodeName":"DIV"}}"#)
            .unwrap_err();
        assert!(matches!(err, ChangeInputError::InvalidTarget(_)));
    });

    let warn = events
        .iter()
        .find(|(level, _, _)| *level == Level::WARN)
        .expect("a warn event");
    assert_eq!(warn.1, "rejected change event target");
    assert_eq!(
        warn.2,
        "invalid target for `change` event: `DIV` is not an input element"
    );
}

#[test]
fn success_is_logged_at_trace() {
    let events = capture(|| {
        decode_change_event(
            r#"{"type":"input","currentTarget":{"nodeName":"INPUT","type":"range","value":"3"}}"#,
        )
        .unwrap();
    });

    assert!(events.iter().all(|(level, _, _)| *level != Level::WARN));
    assert!(
        events
            .iter()
            .any(|(level, message, _)| *level == Level::TRACE
                && message == "narrowed change event target")
    );
}
