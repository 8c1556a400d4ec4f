//! Transient header notices.
//!
//! A notice carries its own expiry deadline; the tick handler in the UI
//! loop drops it once the deadline passes. Nothing runs detached, so a
//! notice can never clear state that was replaced while it waited.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A short-lived message shown in the header.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub text: String,
    pub level: NoticeLevel,
    expires_at: Instant,
}

impl Notice {
    pub fn info(text: impl Into<String>, ttl: Duration) -> Self {
        Self::new(text, NoticeLevel::Info, ttl)
    }

    pub fn error(text: impl Into<String>, ttl: Duration) -> Self {
        Self::new(text, NoticeLevel::Error, ttl)
    }

    fn new(text: impl Into<String>, level: NoticeLevel, ttl: Duration) -> Self {
        Self {
            text: text.into(),
            level,
            expires_at: Instant::now() + ttl,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}
