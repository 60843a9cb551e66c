//! One-shot delayed notifications

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::notify::{Notification, Notifier};

/// Handle to a scheduled notification.
///
/// Dropping the handle does not cancel it; only `cancel` does.
#[derive(Debug)]
pub struct ScheduledNotification {
    handle: Option<JoinHandle<()>>,
}

impl ScheduledNotification {
    pub fn from_task(handle: JoinHandle<()>) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    /// A handle not backed by a task, for schedulers that deliver elsewhere.
    pub fn detached() -> Self {
        Self { handle: None }
    }

    pub fn cancel(&self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }
}

pub trait Scheduler: Send + Sync {
    fn schedule(&self, delay: Duration, notification: Notification) -> ScheduledNotification;
}

/// Fires notifications from a spawned tokio task. Must be called from within
/// a tokio runtime.
#[derive(Clone)]
pub struct TokioScheduler {
    notifier: Arc<dyn Notifier>,
}

impl TokioScheduler {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, notification: Notification) -> ScheduledNotification {
        let notifier = self.notifier.clone();
        tracing::debug!(delay_secs = delay.as_secs(), "Scheduling delayed notification");

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            notifier.show(notification);
        });

        ScheduledNotification::from_task(handle)
    }
}
