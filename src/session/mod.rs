//! Idle-timeout session lifecycle.
//!
//! [`SessionMonitor`] watches a stream of user-activity signals and forces a
//! sign-out after a configurable idle timeout. [`AuthSession`] is the owned
//! session value wrapping the monitor: it is created when credentials are
//! accepted and torn down on sign-out, so session state is never ambient
//! global state.

mod monitor;

use std::time::Duration;

use tokio::{sync::mpsc, time::Instant};

pub use monitor::{ActivityListener, SessionMonitor};

use crate::Error;

/// The user-interaction events recognized as session activity.
///
/// The UI-event collaborator forwards these raw interactions; any one of
/// them resets the idle timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivitySignal {
    /// A pointer button was pressed.
    PointerPress,
    /// The pointer moved.
    PointerMove,
    /// A key was pressed.
    KeyPress,
    /// The page was scrolled.
    Scroll,
    /// A touch interaction started.
    TouchStart,
    /// An element was clicked.
    Click,
}

/// Events the session monitor emits towards the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The idle timeout elapsed with no activity; the presentation layer
    /// must navigate back to the authentication screen. Emitted at most once
    /// per session.
    Expired,
}

/// A snapshot of the monitor's session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Whether the session is still active. Becomes false on expiry or
    /// sign-out and never flips back within the same session.
    pub active: bool,
    /// When the most recent activity signal was observed, if any.
    pub last_activity: Option<Instant>,
    /// The configured idle timeout.
    pub timeout: Duration,
}

/// The collaborator that wires raw UI interaction events to the monitor.
///
/// Implementations register the listener with whatever event source the
/// presentation layer uses and call [`ActivityListener::notify`] for each
/// recognized interaction. The listener becomes inert once the session ends;
/// late notifications are ignored.
pub trait ActivitySource {
    /// Registers `listener` to receive interaction events.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ListenerRegistration`] when the underlying event
    /// source rejects the registration. This is non-fatal to the session:
    /// the monitor treats the session as always active until a retry
    /// succeeds.
    fn attach(&mut self, listener: ActivityListener) -> Result<(), Error>;
}

/// An authenticated session with defined creation and teardown.
#[derive(Debug)]
pub struct AuthSession {
    user_id: String,
    monitor: SessionMonitor,
}

impl AuthSession {
    /// Creates the session on credential acceptance and starts its activity
    /// monitor.
    ///
    /// Must be called from within a tokio runtime. The returned receiver
    /// yields [`SessionEvent::Expired`] if the idle timeout fires.
    pub fn sign_in<S: ActivitySource>(
        user_id: &str,
        timeout: Duration,
        source: &mut S,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        tracing::info!(user_id, ?timeout, "session started");
        let (monitor, events) = SessionMonitor::start(timeout, source);

        (
            Self {
                user_id: user_id.to_string(),
                monitor,
            },
            events,
        )
    }

    /// The identifier of the signed-in user.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// The session's activity monitor.
    pub fn monitor(&self) -> &SessionMonitor {
        &self.monitor
    }

    /// Manual sign-out: cancels the pending expiry timer and detaches the
    /// activity listeners before the session value is dropped.
    pub async fn sign_out(self) {
        tracing::info!(user_id = self.user_id, "session signed out");
        self.monitor.stop().await;
    }
}
