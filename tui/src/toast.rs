//! Toast Stack
//!
//! Holds the notifications currently on screen. Each toast expires a fixed
//! time after it arrived; only the newest few are shown at once.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use mirra_core::Notification;

/// Most toasts kept at once; older ones are dropped early
const MAX_TOASTS: usize = 3;

/// A notification with its expiry time
#[derive(Clone, Debug)]
pub struct Toast {
    /// What to show
    pub notification: Notification,
    /// When it disappears
    pub expires_at: Instant,
}

/// Notifications waiting to expire, oldest first
#[derive(Debug)]
pub struct ToastStack {
    toasts: VecDeque<Toast>,
    lifetime: Duration,
}

impl ToastStack {
    /// Toasts live for `lifetime`
    pub fn new(lifetime: Duration) -> Self {
        Self {
            toasts: VecDeque::new(),
            lifetime,
        }
    }

    /// Show a notification from `now`
    pub fn push(&mut self, notification: Notification, now: Instant) {
        if self.toasts.len() == MAX_TOASTS {
            self.toasts.pop_front();
        }
        self.toasts.push_back(Toast {
            notification,
            expires_at: now + self.lifetime,
        });
    }

    /// Drop expired toasts; returns whether anything changed
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.expires_at > now);
        before != self.toasts.len()
    }

    /// Dismiss the newest toast
    pub fn dismiss_latest(&mut self) -> Option<Toast> {
        self.toasts.pop_back()
    }

    /// Toasts to draw, newest first
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter().rev()
    }

    /// Number of toasts on screen
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    /// Whether nothing is on screen
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
