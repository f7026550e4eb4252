#![allow(dead_code)]

use ibrx::{ListenerRef, Message, MessageType, Receiver, TypeRegistry};
use std::sync::{Arc, Mutex, Once};

// ============================================================================
// Receivers
// ============================================================================

/// A receiver knowing only `tickPrice` and `tickSize`.
pub fn tick_receiver() -> Receiver {
    let mut types = TypeRegistry::builder();
    types
        .insert(
            "tickPrice",
            MessageType::new("TickPrice", ["tickerId", "field", "price"]),
        )
        .unwrap();
    types
        .insert(
            "tickSize",
            MessageType::new("TickSize", ["tickerId", "field", "size"]),
        )
        .unwrap();

    Receiver::builder()
        .types(Arc::new(types.build()))
        .callbacks([
            ("tickPrice", vec!["tickerId", "field", "price"]),
            ("tickSize", vec!["tickerId", "field", "size"]),
        ])
        .build()
}

/// Install a test subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

// ============================================================================
// Test Listeners
// ============================================================================

pub struct OrderRecorder {
    pub order: Arc<Mutex<Vec<usize>>>,
}

impl OrderRecorder {
    pub fn new() -> Self {
        Self {
            order: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A listener that records `id` each time it is called.
    pub fn listener(&self, id: usize) -> ListenerRef {
        let order = self.order.clone();
        ListenerRef::new(move |_: &Message| order.lock().unwrap().push(id))
    }

    pub fn order(&self) -> Vec<usize> {
        self.order.lock().unwrap().clone()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("reader thread died: {0}")]
pub struct ReaderDied(pub String);
