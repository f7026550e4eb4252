//! Channel listener: bridges synchronous dispatch to async consumers.
//!
//! Dispatch stays synchronous; the listener only clones each message into an
//! unbounded channel, and the other half is a [`Stream`](futures::Stream)
//! that async code can poll at its own pace.

use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
use ibrx_core::{BoxError, Listener, Message};
use thiserror::Error;

/// The stream half was dropped; nobody is reading messages any more.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("message stream was dropped")]
pub struct ChannelClosed;

/// A listener forwarding owned messages into a channel.
#[derive(Clone)]
pub struct ChannelListener {
    tx: UnboundedSender<Message>,
}

/// Create a channel listener and the stream it feeds.
pub fn channel() -> (ChannelListener, UnboundedReceiver<Message>) {
    let (tx, rx) = unbounded();
    (ChannelListener { tx }, rx)
}

impl ChannelListener {
    /// Whether the stream half has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl Listener for ChannelListener {
    fn on_message(&self, message: &Message) -> Result<(), BoxError> {
        self.tx
            .unbounded_send(message.clone())
            .map_err(|_| Box::new(ChannelClosed) as BoxError)
    }
}
