//! Request log macros emit the standard field names.

use std::sync::{Arc, Mutex};

use lindy_telemetry::logging::fields;
use lindy_telemetry::{log_request_complete, log_request_fault};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

#[derive(Clone, Default)]
struct FieldNames(Arc<Mutex<Vec<Vec<String>>>>);

impl<S: Subscriber> Layer<S> for FieldNames {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let names = event.fields().map(|field| field.name().to_string()).collect();
        self.0.lock().unwrap().push(names);
    }
}

#[test]
fn test_request_macros_use_standard_fields() {
    let recorded = FieldNames::default();
    let subscriber = tracing_subscriber::registry().with(recorded.clone());

    tracing::subscriber::with_default(subscriber, || {
        log_request_complete!("GET /pets", 200u16);
        log_request_fault!("GET /pets", "disk offline");
    });

    let events = recorded.0.lock().unwrap();
    assert_eq!(events.len(), 2);
    assert!(events[0].iter().any(|name| name == fields::ROUTE));
    assert!(events[0].iter().any(|name| name == fields::HTTP_STATUS));
    assert!(events[1].iter().any(|name| name == fields::ROUTE));
    assert!(events[1].iter().any(|name| name == fields::ERROR));
}
