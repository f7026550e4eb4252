//! Async consumption of dispatched messages.

use futures::StreamExt;
use ibrx::{
    DispatchError, ListenerRef, Value,
    listeners::{ChannelClosed, channel, filter},
};
use tokio::time::{Duration, timeout};

mod common;
use common::tick_receiver;

#[tokio::test]
async fn test_stream_receives_dispatched_messages() {
    let receiver = tick_receiver();
    let (listener, mut stream) = channel();
    receiver.register(&ListenerRef::new(listener), ["TickPrice", "TickSize"]);

    receiver
        .invoke("tickPrice", vec![Value::from(1), Value::from(4), Value::from(99.0)])
        .unwrap();
    receiver
        .invoke("tickSize", vec![Value::from(1), Value::from(5), Value::from(300)])
        .unwrap();

    let first = timeout(Duration::from_secs(1), stream.next())
        .await
        .unwrap()
        .unwrap();
    let second = stream.next().await.unwrap();
    assert!(first.is("TickPrice"));
    assert!(second.is("TickSize"));
}

#[tokio::test]
async fn test_filtered_stream() {
    let receiver = tick_receiver();
    let (listener, stream) = channel();
    let only_bids = filter(listener, |m: &ibrx::Message| {
        m.get("field") == Some(&Value::Int(1))
    });
    let handle = ListenerRef::new(only_bids);
    receiver.register(&handle, ["TickPrice"]);

    for field in [1, 2, 1] {
        receiver
            .invoke("tickPrice", vec![Value::from(7), Value::from(field)])
            .unwrap();
    }
    receiver.unregister(&handle, ["TickPrice"]);
    drop(handle);

    let received: Vec<_> = stream.collect().await;
    assert_eq!(received.len(), 2);
}

#[test]
fn test_dropped_stream_surfaces_to_caller() {
    let receiver = tick_receiver();
    let (listener, stream) = channel();
    receiver.register(&ListenerRef::new(listener), ["TickPrice"]);
    drop(stream);

    let err = receiver.invoke("tickPrice", vec![]).unwrap_err();
    let DispatchError::Listener { source, .. } = err else {
        panic!("unexpected error variant");
    };
    assert!(source.downcast_ref::<ChannelClosed>().is_some());
}
