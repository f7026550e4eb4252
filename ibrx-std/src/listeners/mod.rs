//! Standard listener implementations.

pub mod channel;
pub mod filter;
pub mod typed;

pub use channel::{ChannelClosed, ChannelListener, channel};
pub use filter::{FilterListener, filter};
pub use typed::{TypedListener, typed};
