//! Outcome notifications.
//!
//! The engine reports what happened (board deleted, guard refused, ...) to a
//! sink. Display and timing belong to whoever implements the sink.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;

/// How a notification should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        })
    }
}

/// Receives notifications from the engine
pub trait Notifier {
    fn notify(&self, message: &str, severity: Severity);
}

/// Forwards notifications to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Error => tracing::error!(%severity, "{}", message),
            Severity::Warning => tracing::warn!(%severity, "{}", message),
            Severity::Success | Severity::Info => tracing::info!(%severity, "{}", message),
        }
    }
}

/// A recorded notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

/// Keeps every notification so a front end (or a test) can drain them
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    received: RefCell<Vec<Notification>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything received so far
    pub fn notifications(&self) -> Vec<Notification> {
        self.received.borrow().clone()
    }

    /// Take everything received so far
    pub fn drain(&self) -> Vec<Notification> {
        self.received.borrow_mut().drain(..).collect()
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        self.received.borrow_mut().push(Notification {
            message: message.to_string(),
            severity,
        });
    }
}

impl<N: Notifier + ?Sized> Notifier for std::rc::Rc<N> {
    fn notify(&self, message: &str, severity: Severity) {
        (**self).notify(message, severity)
    }
}
