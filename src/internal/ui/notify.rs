// src/internal/ui/notify.rs

use std::sync::Mutex;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Success => "success",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }
}

/// A transient banner shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub level: Level,
    pub message: String,
    /// Zero means the banner stays until dismissed.
    pub duration: Duration,
    pub created_at: DateTime<Utc>,
    shown_at: Instant,
}

impl Notification {
    pub fn new(level: Level, message: impl Into<String>, duration: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            message: message.into(),
            duration,
            created_at: Utc::now(),
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        !self.duration.is_zero() && now.saturating_duration_since(self.shown_at) >= self.duration
    }
}

/// Sink for user-facing notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// In-memory banner stack. Newest banner first; expired banners are pruned
/// whenever the board is read or written.
#[derive(Debug, Default)]
pub struct NotificationBoard {
    banners: Mutex<Vec<Notification>>,
}

impl NotificationBoard {
    pub fn new() -> Self {
        Self::default()
    }

    fn banners(&self) -> std::sync::MutexGuard<'_, Vec<Notification>> {
        self.banners.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Banners still visible at `now`.
    pub fn active_at(&self, now: Instant) -> Vec<Notification> {
        let mut banners = self.banners();
        banners.retain(|n| !n.is_expired_at(now));
        banners.clone()
    }

    pub fn active(&self) -> Vec<Notification> {
        self.active_at(Instant::now())
    }

    pub fn latest(&self) -> Option<Notification> {
        self.active().into_iter().next()
    }

    pub fn dismiss(&self, id: Uuid) -> bool {
        let mut banners = self.banners();
        let before = banners.len();
        banners.retain(|n| n.id != id);
        banners.len() != before
    }

    pub fn clear(&self) {
        self.banners().clear();
    }
}

impl Notifier for NotificationBoard {
    fn notify(&self, notification: Notification) {
        debug!(level = notification.level.as_str(), "{}", notification.message);
        let now = Instant::now();
        let mut banners = self.banners();
        banners.retain(|n| !n.is_expired_at(now));
        banners.insert(0, notification);
    }
}

/// Prints banners to stderr as they arrive.
#[derive(Debug, Clone, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn format(notification: &Notification) -> String {
        format!(
            "[{}] {:<7} {}",
            notification.created_at.format("%H:%M:%S"),
            notification.level.as_str().to_uppercase(),
            notification.message
        )
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        debug!(level = notification.level.as_str(), "{}", notification.message);
        eprintln!("{}", Self::format(&notification));
    }
}
