//! Transient, auto-dismissing notices ("toasts").
//!
//! Components never talk to a global toast queue; they receive an `Arc<dyn Notifier>` and the
//! host decides how notices are shown. [`Toaster`] is the in-process implementation the HTTP
//! host renders from.

use chrono::{DateTime, Duration, Utc};
use std::sync::{Mutex, MutexGuard, PoisonError};

pub const DEFAULT_DURATION_MS: i64 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Blank,
    Error,
}

/// Where a notice is drawn: the page-level toaster or the one inside the detail overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoticeScope {
    #[default]
    Page,
    Overlay,
}

#[derive(Debug, Clone, Default)]
pub struct NoticeOptions {
    /// Fixed id; notifying again with the same id replaces the existing notice.
    pub id: Option<String>,
    pub duration: Option<Duration>,
    pub scope: NoticeScope,
}

impl NoticeOptions {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_duration_ms(mut self, ms: i64) -> Self {
        self.duration = Some(Duration::milliseconds(ms));
        self
    }

    pub fn in_overlay(mut self) -> Self {
        self.scope = NoticeScope::Overlay;
        self
    }
}

pub trait Notifier: Send + Sync {
    /// Shows a notice and returns its id.
    fn notify(&self, message: &str, kind: NoticeKind, options: NoticeOptions) -> String;
    fn dismiss(&self, id: &str);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: String,
    pub message: String,
    pub kind: NoticeKind,
    pub scope: NoticeScope,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Notice {
    pub fn remaining_ms(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_milliseconds().max(0)
    }
}

#[derive(Debug, Default)]
pub struct Toaster {
    inner: Mutex<ToasterInner>,
}

#[derive(Debug, Default)]
struct ToasterInner {
    next_id: u64,
    notices: Vec<Notice>,
}

impl Toaster {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ToasterInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn notify_at(
        &self,
        message: &str,
        kind: NoticeKind,
        options: NoticeOptions,
        now: DateTime<Utc>,
    ) -> String {
        let mut inner = self.lock();
        let id = match options.id {
            Some(id) => id,
            None => {
                inner.next_id += 1;
                format!("notice-{}", inner.next_id)
            }
        };
        let duration = options
            .duration
            .unwrap_or_else(|| Duration::milliseconds(DEFAULT_DURATION_MS));
        let notice = Notice {
            id: id.clone(),
            message: message.to_string(),
            kind,
            scope: options.scope,
            created_at: now,
            expires_at: now + duration,
        };
        match inner.notices.iter_mut().find(|n| n.id == id) {
            Some(existing) => *existing = notice,
            None => inner.notices.push(notice),
        }
        id
    }

    /// Notices still visible at `now`, oldest first. Expired ones are dropped.
    pub fn active(&self, now: DateTime<Utc>) -> Vec<Notice> {
        let mut inner = self.lock();
        inner.notices.retain(|n| n.expires_at > now);
        inner.notices.clone()
    }
}

impl Notifier for Toaster {
    fn notify(&self, message: &str, kind: NoticeKind, options: NoticeOptions) -> String {
        self.notify_at(message, kind, options, Utc::now())
    }

    fn dismiss(&self, id: &str) {
        self.lock().notices.retain(|n| n.id != id);
    }
}
