//! Page-global side effects the detail overlay holds while it is mounted.
//!
//! Both effects are handed out as guards; dropping the guard releases the effect, so every
//! exit path of the overlay (close, re-render, panic unwind) gives them back.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct Document {
    scroll_locks: AtomicUsize,
    key_listeners: AtomicUsize,
}

impl Document {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// `true` while any overlay holds a [`ScrollLock`]; the page renders `overflow: hidden`.
    pub fn scroll_locked(&self) -> bool {
        self.scroll_locks.load(Ordering::SeqCst) > 0
    }

    pub fn key_listener_count(&self) -> usize {
        self.key_listeners.load(Ordering::SeqCst)
    }

    pub fn lock_scroll(self: &Arc<Self>) -> ScrollLock {
        self.scroll_locks.fetch_add(1, Ordering::SeqCst);
        ScrollLock {
            document: Arc::clone(self),
        }
    }

    pub fn listen_keys(self: &Arc<Self>) -> KeyListener {
        self.key_listeners.fetch_add(1, Ordering::SeqCst);
        KeyListener {
            document: Arc::clone(self),
        }
    }
}

#[derive(Debug)]
pub struct ScrollLock {
    document: Arc<Document>,
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        self.document.scroll_locks.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Debug)]
pub struct KeyListener {
    document: Arc<Document>,
}

impl Drop for KeyListener {
    fn drop(&mut self) {
        self.document.key_listeners.fetch_sub(1, Ordering::SeqCst);
    }
}
