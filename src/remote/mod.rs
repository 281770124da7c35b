// SPDX-License-Identifier: GPL-3.0-or-later
// src/remote/mod.rs
//
// Outside collaborators the pipeline talks to: the answering service and the notifier.

mod notifier;
mod submitter;

pub use notifier::{
    LogNotifier, Notification, NotificationEvent, NotificationId, NotificationLog, NotificationStatus,
    Notifier,
};
pub use submitter::{HttpSubmitter, RemoteSubmitter, SubmitError, SubmitResponse, parse_response};
