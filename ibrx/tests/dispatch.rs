//! Callback delivery through the dispatch surface.

use ibrx::{
    DispatchError, Receiver, Value,
    testing::{FailingListener, RecordingListener},
};

mod common;
use common::{init_tracing, tick_receiver};

#[test]
fn test_tick_price_scenario() {
    init_tracing();
    let receiver = tick_receiver();
    let recorder = RecordingListener::new();
    receiver.register(&recorder.handle(), ["TickPrice"]);

    receiver
        .invoke(
            "tickPrice",
            vec![Value::from(42), Value::from(1), Value::from(101.5)],
        )
        .unwrap();

    let message = recorder.last().unwrap();
    assert_eq!(message.name(), "TickPrice");
    assert_eq!(message.get("tickerId"), Some(&Value::Int(42)));
    assert_eq!(message.get("field"), Some(&Value::Int(1)));
    assert_eq!(message.get("price"), Some(&Value::Float(101.5)));
    assert_eq!(recorder.count(), 1);
}

#[test]
fn test_entry_point_resolves_by_name() {
    let receiver = tick_receiver();
    let recorder = RecordingListener::new();
    receiver.register(&recorder.handle(), ["TickSize"]);

    let entry = receiver.surface().entry("tickSize").unwrap();
    assert_eq!(entry.args(), ["tickerId", "field", "size"]);
    entry
        .call(&receiver, vec![Value::from(3), Value::from(0), Value::from(100)])
        .unwrap();

    assert_eq!(recorder.last().unwrap().get("size"), Some(&Value::Int(100)));
}

#[test]
fn test_extra_arguments_are_dropped() {
    let receiver = tick_receiver();
    let recorder = RecordingListener::new();
    receiver.register(&recorder.handle(), ["TickPrice"]);

    receiver
        .invoke(
            "tickPrice",
            vec![
                Value::from(42),
                Value::from(1),
                Value::from(101.5),
                Value::from(true),
            ],
        )
        .unwrap();

    assert_eq!(recorder.last().unwrap().fields().len(), 3);
}

#[test]
fn test_missing_arguments_are_absent() {
    let receiver = tick_receiver();
    let recorder = RecordingListener::new();
    receiver.register(&recorder.handle(), ["TickPrice"]);

    receiver.invoke("tickPrice", vec![Value::from(42)]).unwrap();

    let message = recorder.last().unwrap();
    assert!(message.contains("tickerId"));
    assert!(!message.contains("field"));
    assert!(!message.contains("price"));
}

#[test]
fn test_unknown_callback_name_fails_invoke() {
    let receiver = tick_receiver();
    let err = receiver.invoke("tickNews", vec![]).unwrap_err();
    assert!(matches!(err, DispatchError::UnknownCallback(ref name) if name == "tickNews"));
}

#[test]
fn test_dispatch_unknown_name_is_silent() {
    let receiver = tick_receiver();
    let recorder = RecordingListener::new();
    receiver.register_all(&recorder.handle());

    receiver.dispatch("tickNews", Default::default()).unwrap();
    assert_eq!(recorder.count(), 0);
}

#[test]
fn test_listener_error_propagates_to_caller() {
    let receiver = tick_receiver();
    let failing = FailingListener::new("strategy rejected tick");
    receiver.register(&failing.handle(), ["TickPrice"]);

    let err = receiver
        .invoke("tickPrice", vec![Value::from(1)])
        .unwrap_err();
    let DispatchError::Listener { key, source } = err else {
        panic!("unexpected error variant");
    };
    assert_eq!(key.as_str(), "TickPrice");
    assert_eq!(source.to_string(), "strategy rejected tick");
    assert_eq!(failing.count(), 1);
}

#[test]
fn test_default_receiver_routes_catalogue_callbacks() {
    let receiver = Receiver::new();
    let recorder = RecordingListener::new();
    receiver.register(&recorder.handle(), ["NextValidId", "ConnectionClosed"]);

    receiver.invoke("nextValidId", vec![Value::from(1001)]).unwrap();
    receiver.invoke("connectionClosed", vec![]).unwrap();
    receiver.invoke("currentTime", vec![Value::from(0)]).unwrap();

    let names: Vec<_> = recorder
        .messages()
        .iter()
        .map(|m| m.name().to_owned())
        .collect();
    assert_eq!(names, ["NextValidId", "ConnectionClosed"]);
}
