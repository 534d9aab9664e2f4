//! Short-lived user notifications, the terminal counterpart of a toast

use std::io::Write;
use tracing::warn;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Destructive,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Info,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Destructive,
        }
    }
}

pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

/// Collects notifications, useful for deferring display or for tests
impl Notifier for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

/// Prints one line per notification
pub struct ConsoleNotifier<W: Write> {
    out: W,
}

impl<W: Write> ConsoleNotifier<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Notifier for ConsoleNotifier<W> {
    fn notify(&mut self, notification: Notification) {
        let marker = match notification.severity {
            Severity::Info => "[ok]",
            Severity::Destructive => "[failed]",
        };
        // A notification that cannot be shown is not worth failing the session over
        if let Err(e) = writeln!(
            self.out,
            "{} {}: {}",
            marker, notification.title, notification.description
        ) {
            warn!("Failed to display notification: {}", e);
        }
    }
}
