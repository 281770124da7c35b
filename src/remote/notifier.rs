// SPDX-License-Identifier: GPL-3.0-or-later
// src/remote/notifier.rs
//
// Fire-and-forget user feedback channel (toasts, status lines).

use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationStatus {
    Loading,
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub status: NotificationStatus,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn new(status: NotificationStatus, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            title: title.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(pub u64);

/// Receives status updates from the pipeline. Implementations must not block.
pub trait Notifier: Send {
    fn show(&mut self, notification: Notification) -> NotificationId;
    fn update(&mut self, id: NotificationId, notification: Notification);
    fn hide(&mut self, id: NotificationId);
}

/// Writes notifications to the log.
#[derive(Debug, Default)]
pub struct LogNotifier {
    next_id: u64,
}

impl Notifier for LogNotifier {
    fn show(&mut self, n: Notification) -> NotificationId {
        self.next_id += 1;
        log_notification(&n);
        NotificationId(self.next_id)
    }

    fn update(&mut self, _id: NotificationId, n: Notification) {
        log_notification(&n);
    }

    fn hide(&mut self, _id: NotificationId) {}
}

fn log_notification(n: &Notification) {
    match n.status {
        NotificationStatus::Loading | NotificationStatus::Success => {
            log::info!("{}: {}", n.title, n.message);
        }
        NotificationStatus::Failure => log::error!("{}: {}", n.title, n.message),
    }
}

/// What happened to a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationEvent {
    Shown(NotificationId, Notification),
    Updated(NotificationId, Notification),
    Hidden(NotificationId),
}

/// Shared, cloneable record of notifications for hosts that poll for toasts.
#[derive(Debug, Clone, Default)]
pub struct NotificationLog {
    events: Arc<Mutex<Vec<NotificationEvent>>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<NotificationEvent> {
        self.lock().clone()
    }

    /// Latest content of every notification not hidden yet, in show order.
    pub fn visible(&self) -> Vec<(NotificationId, Notification)> {
        let mut visible: Vec<(NotificationId, Notification)> = Vec::new();
        for event in self.lock().iter() {
            match event {
                NotificationEvent::Shown(id, n) => visible.push((*id, n.clone())),
                NotificationEvent::Updated(id, n) => {
                    if let Some(entry) = visible.iter_mut().find(|(v, _)| v == id) {
                        entry.1 = n.clone();
                    }
                }
                NotificationEvent::Hidden(id) => visible.retain(|(v, _)| v != id),
            }
        }
        visible
    }

    fn lock(&self) -> MutexGuard<'_, Vec<NotificationEvent>> {
        // A poisoned log still holds valid events.
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Notifier for NotificationLog {
    fn show(&mut self, notification: Notification) -> NotificationId {
        let mut events = self.lock();
        let id = NotificationId(
            events
                .iter()
                .filter(|e| matches!(e, NotificationEvent::Shown(..)))
                .count() as u64
                + 1,
        );
        events.push(NotificationEvent::Shown(id, notification));
        id
    }

    fn update(&mut self, id: NotificationId, notification: Notification) {
        self.lock().push(NotificationEvent::Updated(id, notification));
    }

    fn hide(&mut self, id: NotificationId) {
        self.lock().push(NotificationEvent::Hidden(id));
    }
}
