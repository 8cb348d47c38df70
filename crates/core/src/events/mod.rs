//! Event channel module.
//!
//! Provides the auth event types and the typed publish/subscribe channel
//! used to propagate auth transitions from server-driven actions to mounted
//! view subscribers. Subscriptions are explicit handles; there is no
//! ambient registration and no replay of past emissions.

mod bus;
mod event;

pub use bus::*;
pub use event::*;
