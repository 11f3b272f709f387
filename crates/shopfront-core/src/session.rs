// ── Session context ──
//
// The bearer token plus the single teardown path taken when the backend
// rejects it. Whoever owns the session (the CLI) registers what should
// happen on teardown: forget the stored token, print a sign-in hint.

use std::fmt;

use secrecy::SecretString;
use tracing::warn;

type TeardownHook = Box<dyn FnOnce() + Send>;

/// An authenticated editing session.
///
/// The token is opaque. Teardown runs at most once; after it the session
/// is inactive and every editor call fails with `Unauthorized` without
/// touching the network.
pub struct Session {
    token: SecretString,
    on_teardown: Option<TeardownHook>,
    active: bool,
}

impl Session {
    pub fn new(token: SecretString) -> Self {
        Self {
            token,
            on_teardown: None,
            active: true,
        }
    }

    /// Register the hook run on teardown. Replaces any previous hook.
    pub fn on_teardown(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        self.on_teardown = Some(Box::new(hook));
        self
    }

    pub fn token(&self) -> &SecretString {
        &self.token
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// End the session and run the teardown hook. Idempotent.
    pub fn teardown(&mut self) {
        if !self.active {
            return;
        }
        warn!("token rejected by backend, tearing down session");
        self.active = false;
        if let Some(hook) = self.on_teardown.take() {
            hook();
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}
