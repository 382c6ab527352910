//! Transient notification banner.
//!
//! At most one notification is visible. Showing a new one cancels the
//! previous auto-dismiss timer, and a timer only ever clears the
//! notification it was started for.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use keeg_store_core::Notification;
use serde::Serialize;
use tokio::task::AbortHandle;
use tracing::debug;

/// A notification as currently displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShownNotification {
    pub id: u64,
    #[serde(flatten)]
    pub notification: Notification,
}

/// Holder for the single visible notification.
///
/// Cheap to clone; clones share the same banner.
#[derive(Debug, Clone)]
pub struct Notifier {
    inner: Arc<Mutex<NotifierInner>>,
    dismiss_after: Duration,
}

#[derive(Debug, Default)]
struct NotifierInner {
    current: Option<ShownNotification>,
    timer: Option<AbortHandle>,
    next_id: u64,
}

impl Notifier {
    /// Create a notifier whose notifications disappear after `dismiss_after`.
    #[must_use]
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(NotifierInner::default())),
            dismiss_after,
        }
    }

    /// Replace the visible notification and restart the dismiss timer.
    ///
    /// Must be called from within a tokio runtime. Returns the id assigned to
    /// the notification.
    pub fn show(&self, notification: Notification) -> u64 {
        let mut inner = self.lock();

        inner.next_id += 1;
        let id = inner.next_id;

        if let Some(previous) = inner.timer.take() {
            previous.abort();
        }

        debug!(id, message = %notification.message, "Showing notification");
        inner.current = Some(ShownNotification { id, notification });

        let shared = Arc::clone(&self.inner);
        let dismiss_after = self.dismiss_after;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(dismiss_after).await;
            let mut inner = shared.lock().unwrap_or_else(PoisonError::into_inner);
            if inner.current.as_ref().is_some_and(|shown| shown.id == id) {
                inner.current = None;
                inner.timer = None;
            }
        });
        inner.timer = Some(handle.abort_handle());

        id
    }

    /// The visible notification, if any.
    #[must_use]
    pub fn current(&self) -> Option<ShownNotification> {
        self.lock().current.clone()
    }

    /// Hide the visible notification and cancel its timer.
    pub fn dismiss(&self) {
        let mut inner = self.lock();
        inner.current = None;
        if let Some(timer) = inner.timer.take() {
            timer.abort();
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, NotifierInner> {
        // Every write leaves the state consistent, so poisoning is ignored.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
