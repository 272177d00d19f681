use std::sync::{Arc, Mutex};

use bluff_engine::engine::Engine;
use tracing::Level;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::Registry;

#[derive(Debug, Clone)]
struct Captured {
    level: Level,
    message: String,
    fields: Vec<(String, String)>,
}

#[derive(Clone, Default)]
struct Capture {
    events: Arc<Mutex<Vec<Captured>>>,
}

impl Capture {
    fn events(&self) -> Vec<Captured> {
        self.events.lock().unwrap().clone()
    }

    fn find(&self, message: &str) -> Option<Captured> {
        self.events().into_iter().find(|e| e.message == message)
    }
}

impl<S: tracing::Subscriber> Layer<S> for Capture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        self.events.lock().unwrap().push(Captured {
            level: *event.metadata().level(),
            message: visitor.message.unwrap_or_default(),
            fields: visitor.fields,
        });
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Vec<(String, String)>,
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        let value_str = format!("{:?}", value);
        if field.name() == "message" {
            self.message = Some(value_str);
        } else {
            self.fields.push((field.name().to_string(), value_str));
        }
    }
}

fn with_capture<F: FnOnce()>(f: F) -> Capture {
    let capture = Capture::default();
    let registry = Registry::default().with(capture.clone());
    tracing::subscriber::with_default(registry, f);
    capture
}

fn field<'a>(event: &'a Captured, name: &str) -> Option<&'a str> {
    event
        .fields
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

#[test]
fn round_start_and_check_are_logged_at_info() {
    let capture = with_capture(|| {
        let mut e = Engine::with_seed(9);
        e.add_player(1).unwrap();
        e.add_player(2).unwrap();
        e.process_action(1, "Start").unwrap();
        e.process_action(2, "Start").unwrap();
        let first = e.current_player().unwrap().id();
        let second = if first == 1 { 2 } else { 1 };
        e.process_action(first, "move HighCard 2").unwrap();
        e.process_action(second, "check").unwrap();
    });

    let joined: Vec<_> = capture
        .events()
        .into_iter()
        .filter(|e| e.message == "player joined")
        .collect();
    assert_eq!(joined.len(), 2);

    let started = capture.find("round started").expect("round start logged");
    assert_eq!(started.level, Level::INFO);
    assert_eq!(field(&started, "round"), Some("1"));
    assert_eq!(field(&started, "cards"), Some("2"));

    let check = capture.find("check resolved").expect("check logged");
    assert_eq!(check.level, Level::INFO);
    assert_eq!(field(&check, "claim"), Some("HighCard 2"));
    assert!(field(&check, "holds").is_some());
}

#[test]
fn ignored_actions_are_logged_at_debug() {
    let capture = with_capture(|| {
        let mut e = Engine::with_seed(9);
        e.add_player(1).unwrap();
        e.process_action(1, "move Pair").unwrap();
    });

    let ignored = capture.find("action ignored").expect("ignored action logged");
    assert_eq!(ignored.level, Level::DEBUG);
    assert_eq!(field(&ignored, "player"), Some("1"));
}

#[test]
fn failed_actions_are_logged_at_warn() {
    let capture = with_capture(|| {
        let mut e = Engine::with_seed(9);
        assert!(e.process_action(3, "Get").is_err());
    });

    let failed = capture.find("action failed").expect("failure logged");
    assert_eq!(failed.level, Level::WARN);
}
