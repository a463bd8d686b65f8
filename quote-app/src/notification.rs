//! User-facing outcome of an action. Nothing an action does is fatal; every
//! result, good or bad, ends up as one of these.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    /// Shown highlighted; the action failed or was refused.
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn info(
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind: NotificationKind::Info,
        }
    }

    pub fn destructive(
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind: NotificationKind::Destructive,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Destructive
    }
}

impl fmt::Display for Notification {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}
