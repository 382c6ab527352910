//! Transient user-facing notifications.

use serde::{Deserialize, Serialize};

/// Tone of a notification banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Something was added.
    Success,
    /// Something was removed.
    Error,
}

/// A short message shown to the user and dismissed after a delay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    /// "«title» added to cart".
    #[must_use]
    pub fn added_to_cart(title: &str) -> Self {
        Self::success(format!("{title} added to cart"))
    }
}
