use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

// ============================================================================
// Notification Channels
// ============================================================================
//
// Where event handlers send their side effects. The log channel only writes
// a structured log line; the in-memory channel keeps everything it receives
// and can be told to reject deliveries.
//
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    Email,
    Queue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    /// Email address or queue name
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NotificationError {
    #[error("Channel unavailable: {0}")]
    Unavailable(String),

    #[error("Channel lock poisoned")]
    LockPoisoned,
}

pub trait NotificationChannel: Send + Sync {
    fn deliver(&self, notification: Notification) -> Result<(), NotificationError>;
}

/// Writes every notification to the tracing subscriber
#[derive(Debug, Default)]
pub struct LogChannel;

impl NotificationChannel for LogChannel {
    fn deliver(&self, notification: Notification) -> Result<(), NotificationError> {
        tracing::info!(
            kind = ?notification.kind,
            recipient = %notification.recipient,
            subject = %notification.subject,
            body = %notification.body,
            "Notification delivered"
        );
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryChannel {
    delivered: Mutex<Vec<Notification>>,
    unavailable: Option<String>,
}

impl InMemoryChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// A channel that rejects every delivery with `reason`
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            delivered: Mutex::new(Vec::new()),
            unavailable: Some(reason.into()),
        }
    }

    /// Everything delivered so far, in delivery order. A poisoned lock still
    /// yields the recorded notifications.
    pub fn delivered(&self) -> Vec<Notification> {
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl NotificationChannel for InMemoryChannel {
    fn deliver(&self, notification: Notification) -> Result<(), NotificationError> {
        if let Some(reason) = &self.unavailable {
            return Err(NotificationError::Unavailable(reason.clone()));
        }

        self.delivered
            .lock()
            .map_err(|_| NotificationError::LockPoisoned)?
            .push(notification);
        Ok(())
    }
}
