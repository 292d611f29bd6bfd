//! Notifications
//!
//! Short-lived, user-facing messages ("toasts") emitted by components when
//! something worth telling the user happens. Delivery and display timing are
//! the surface's job; components only push onto a [`Notifier`].

use tokio::sync::mpsc;

/// How a notification should be presented
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Neutral / success information
    Info,
    /// Something went wrong or was rejected
    Destructive,
}

impl Severity {
    /// Human-readable label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Destructive => "destructive",
        }
    }
}

/// A user-facing notification
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    /// Headline, e.g. "File too large"
    pub title: String,
    /// One-sentence explanation
    pub description: String,
    /// Presentation severity
    pub severity: Severity,
}

impl Notification {
    /// Informational notification
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Info,
        }
    }

    /// Destructive (error) notification
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Destructive,
        }
    }

    /// Whether this reports a failure
    #[must_use]
    pub fn is_destructive(&self) -> bool {
        self.severity == Severity::Destructive
    }
}

/// Sending side of the notification channel, cloned into each component
#[derive(Clone, Debug)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl Notifier {
    /// Create a notifier and the receiver the surface drains
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Emit a notification
    pub fn emit(&self, notification: Notification) {
        tracing::debug!(
            title = %notification.title,
            severity = notification.severity.label(),
            "Notification emitted"
        );
        if self.tx.send(notification).is_err() {
            tracing::debug!("No surface listening for notifications");
        }
    }
}
