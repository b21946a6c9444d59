//! The idle-timeout state machine.
//!
//! The monitor is a single tokio task that owns the expiry deadline. Every
//! activity signal and the timer's own completion arrive through the same
//! task, one at a time, so cancelling the old deadline and arming the new
//! one is atomic by construction: no two expiry deadlines are ever pending.

use std::time::Duration;

use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
    time::{Instant, sleep_until},
};

use crate::Error;

use super::{ActivitySignal, ActivitySource, SessionEvent, SessionState};

/// Messages handled by the monitor task.
#[derive(Debug)]
enum MonitorMessage {
    /// An activity signal forwarded by the UI-event collaborator.
    Activity(ActivitySignal),
    /// A listener registration attempt succeeded; arm the expiry timer.
    ListenersAttached,
    /// Manual sign-out; tear down without emitting an expiry event.
    Stop,
}

/// The handle the UI-event collaborator uses to forward interaction events.
///
/// Cheap to clone. Once the session ends the listener becomes inert and
/// notifications are silently dropped.
#[derive(Debug, Clone)]
pub struct ActivityListener {
    messages: mpsc::UnboundedSender<MonitorMessage>,
}

impl ActivityListener {
    /// Forwards one interaction event to the monitor.
    pub fn notify(&self, signal: ActivitySignal) {
        let _ = self.messages.send(MonitorMessage::Activity(signal));
    }

    /// Whether the session this listener belonged to has ended.
    pub fn is_stale(&self) -> bool {
        self.messages.is_closed()
    }
}

/// Watches user activity and expires the session after the idle timeout.
///
/// Started on sign-in, stopped on sign-out. The expiry event is emitted
/// exactly once, after which the monitor's `Expired` state is terminal: a
/// fresh session requires a fresh authentication, not this component.
#[derive(Debug)]
pub struct SessionMonitor {
    messages: mpsc::UnboundedSender<MonitorMessage>,
    state: watch::Receiver<SessionState>,
    state_writer: watch::Sender<SessionState>,
    task: Option<JoinHandle<()>>,
}

impl SessionMonitor {
    /// Arms the activity listeners and the initial expiry timer.
    ///
    /// Must be called from within a tokio runtime. If the activity source
    /// rejects the listener registration, the failure is logged and the
    /// session runs in always-active mode (the timer stays unarmed, so the
    /// session can never expire silently) until [`Self::retry_attach`]
    /// succeeds.
    pub fn start<S: ActivitySource>(
        timeout: Duration,
        source: &mut S,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(SessionState {
            active: true,
            last_activity: None,
            timeout,
        });

        let armed = match source.attach(ActivityListener {
            messages: message_tx.clone(),
        }) {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(
                    %error,
                    "could not register activity listeners, treating session as always active"
                );
                false
            }
        };

        let task = tokio::spawn(run(
            message_rx,
            event_tx,
            state_tx.clone(),
            timeout,
            armed,
        ));

        (
            Self {
                messages: message_tx,
                state: state_rx,
                state_writer: state_tx,
                task: Some(task),
            },
            event_rx,
        )
    }

    /// Forwards an activity signal directly, bypassing the listener.
    pub fn on_activity(&self, signal: ActivitySignal) {
        let _ = self.messages.send(MonitorMessage::Activity(signal));
    }

    /// Retries the listener registration after a failed attempt at start.
    ///
    /// On success the expiry timer is armed from now.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ListenerRegistration`] when the source rejects the
    /// registration again; the session stays in always-active mode.
    pub fn retry_attach<S: ActivitySource>(&self, source: &mut S) -> Result<(), Error> {
        source.attach(ActivityListener {
            messages: self.messages.clone(),
        })?;
        let _ = self.messages.send(MonitorMessage::ListenersAttached);

        Ok(())
    }

    /// A snapshot of the current session state.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// A state stream for the presentation layer to subscribe to.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.clone()
    }

    /// Tears down the monitor on sign-out: the pending expiry timer is
    /// cancelled and the listener channel closed before this returns, so no
    /// late expiry can fire against a session that no longer exists.
    pub async fn stop(mut self) {
        let _ = self.messages.send(MonitorMessage::Stop);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for SessionMonitor {
    fn drop(&mut self) {
        // A dropped monitor must not leave a live timer behind, and its
        // subscribers must not keep seeing an active session.
        if let Some(task) = self.task.take() {
            task.abort();
            self.state_writer
                .send_modify(|session| session.active = false);
        }
    }
}

async fn run(
    mut messages: mpsc::UnboundedReceiver<MonitorMessage>,
    events: mpsc::UnboundedSender<SessionEvent>,
    state: watch::Sender<SessionState>,
    timeout: Duration,
    mut armed: bool,
) {
    let mut deadline = Instant::now() + timeout;

    loop {
        let message = if armed {
            tokio::select! {
                // Queued activity takes precedence over a simultaneously
                // ready deadline.
                biased;
                message = messages.recv() => message,
                _ = sleep_until(deadline) => {
                    state.send_modify(|session| session.active = false);
                    let _ = events.send(SessionEvent::Expired);
                    tracing::info!(?timeout, "session expired after idle timeout");
                    return;
                }
            }
        } else {
            messages.recv().await
        };

        match message {
            Some(MonitorMessage::Activity(signal)) => {
                let now = Instant::now();
                deadline = now + timeout;
                state.send_modify(|session| session.last_activity = Some(now));
                tracing::trace!(?signal, "activity observed, expiry timer reset");
            }
            Some(MonitorMessage::ListenersAttached) => {
                armed = true;
                deadline = Instant::now() + timeout;
                tracing::info!("activity listeners registered, expiry timer armed");
            }
            Some(MonitorMessage::Stop) | None => {
                state.send_modify(|session| session.active = false);
                return;
            }
        }
    }
}
