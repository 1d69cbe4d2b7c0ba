//! Transient status notices
//!
//! One toast is visible at a time; a new one replaces the old. Toasts are
//! never persisted.

use std::fmt;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Success => write!(f, "✓"),
            Severity::Info => write!(f, "i"),
            Severity::Error => write!(f, "!"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub text: String,
    pub severity: Severity,
    pub expires_at: Instant,
}

#[derive(Debug)]
pub struct Toasts {
    ttl: Duration,
    current: Option<Toast>,
}

impl Toasts {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    pub fn show(&mut self, text: impl Into<String>, severity: Severity) {
        self.show_at(text, severity, Instant::now());
    }

    pub fn show_at(&mut self, text: impl Into<String>, severity: Severity, now: Instant) {
        self.current = Some(Toast {
            text: text.into(),
            severity,
            expires_at: now + self.ttl,
        });
    }

    /// Visible toast at `now`, if it has not expired
    pub fn active_at(&self, now: Instant) -> Option<&Toast> {
        self.current.as_ref().filter(|t| now < t.expires_at)
    }

    pub fn active(&self) -> Option<&Toast> {
        self.active_at(Instant::now())
    }

    /// Take the toast for display; it will not be returned again
    pub fn take(&mut self) -> Option<Toast> {
        let now = Instant::now();
        self.current.take().filter(|t| now < t.expires_at)
    }
}
