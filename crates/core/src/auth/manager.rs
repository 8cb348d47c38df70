//! Auth-state manager owning the event and prompt channels.

use std::sync::RwLock;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::events::{AuthEvent, AuthPrompt, EventBus, Subscription};

/// Coarse session state tracked alongside the event stream.
///
/// Events are not replayed: a subscriber that mounts after a transition
/// reads the current state here and subscribes for everything after.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthState {
    /// No auth action has resolved yet this session.
    Unknown,
    SignedIn,
    SignedOut,
}

/// Single owner of the auth event bus and the sign-in prompt channel.
///
/// Server action handlers call the `*_completed` methods after the backend
/// confirms a transition; mounted views subscribe and react. Emission order
/// within one call is fixed: `Changed` always precedes the specific kind,
/// synchronously, so a subscriber observing `Login` has already seen the
/// `Changed` that belongs to it.
pub struct AuthStateManager {
    state: RwLock<AuthState>,
    events: EventBus<AuthEvent>,
    prompts: EventBus<AuthPrompt>,
}

impl AuthStateManager {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(AuthState::Unknown),
            events: EventBus::new("auth-events"),
            prompts: EventBus::new("auth-prompts"),
        }
    }

    /// Current coarse state.
    pub fn state(&self) -> AuthState {
        *self.state.read().unwrap_or_else(|poisoned| {
            warn!("auth state lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn set_state(&self, next: AuthState) {
        let mut state = self.state.write().unwrap_or_else(|poisoned| {
            warn!("auth state lock was poisoned, recovering");
            poisoned.into_inner()
        });
        *state = next;
    }

    /// Subscribe to auth transition events.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&AuthEvent) + Send + Sync + 'static,
    {
        self.events.subscribe(listener)
    }

    /// Subscribe to sign-in prompts for the toast display.
    pub fn subscribe_prompts<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&AuthPrompt) + Send + Sync + 'static,
    {
        self.prompts.subscribe(listener)
    }

    /// A server-side login resolved. Emits `Changed` then `Login`.
    pub fn login_completed(&self) {
        self.set_state(AuthState::SignedIn);
        debug!("auth: login completed, notifying {} listeners", self.events.len());
        self.events.emit(&AuthEvent::Changed);
        self.events.emit(&AuthEvent::Login);
    }

    /// A server-side logout resolved. Emits `Changed` then `Logout`.
    pub fn logout_completed(&self) {
        self.set_state(AuthState::SignedOut);
        debug!("auth: logout completed, notifying {} listeners", self.events.len());
        self.events.emit(&AuthEvent::Changed);
        self.events.emit(&AuthEvent::Logout);
    }

    /// Passive refresh, e.g. on navigation into an account route.
    /// Emits `Changed` only; the coarse state is left as-is.
    pub fn refresh(&self) {
        self.events.emit(&AuthEvent::Changed);
    }

    /// Raise a sign-in prompt for a gated feature (e.g. the wishlist).
    /// A no-op when no toast display is mounted.
    pub fn require_auth_prompt(&self, title: impl Into<String>, message: impl Into<String>) {
        self.prompts.emit(&AuthPrompt::new(title, message));
    }
}

impl Default for AuthStateManager {
    fn default() -> Self {
        Self::new()
    }
}
