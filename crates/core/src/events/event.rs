//! Auth event types.

use serde::{Deserialize, Serialize};

/// Auth transition signals emitted after a server-side auth action resolves.
///
/// These are pure notifications with no payload: the bus mutates nothing,
/// and each subscriber is responsible for refreshing its own view of the
/// session (e.g. re-fetching the current customer).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthEvent {
    /// Auth state changed in some way. Always emitted before the specific
    /// kind, and alone on passive refreshes.
    Changed,

    /// A login completed.
    Login,

    /// A logout completed.
    Logout,
}

/// Payload of the sign-in prompt raised when a guest hits a gated feature
/// (e.g. adding to the wishlist). Consumed by the toast display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPrompt {
    pub title: String,
    pub message: String,
}

impl AuthPrompt {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}
