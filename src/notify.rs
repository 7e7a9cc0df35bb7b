//! Toast-style notifications raised by accepted submissions.

use serde::Serialize;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

pub trait Notifier: Send {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log and drops them.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        tracing::info!(
            title = %notification.title,
            "{}",
            notification.description
        );
    }
}

/// Keeps notifications until drained. Clones share the same queue.
#[derive(Debug, Default, Clone)]
pub struct ToastQueue {
    pending: Arc<Mutex<Vec<Notification>>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every pending notification, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *pending)
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, notification: Notification) {
        tracing::debug!(title = %notification.title, "toast queued");
        self.pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notification);
    }
}
