//! Delayed view updates that can be invalidated.
//!
//! A view owns a [`ViewGeneration`]. Anything it schedules carries a
//! [`GenerationTicket`] taken at scheduling time. Dismissing the view bumps
//! the generation, so every outstanding ticket goes stale and its payload is
//! dropped instead of applied.
//!
//! Views nest: a [`ViewGeneration::child`] hangs off its parent, and its
//! tickets also go stale when the parent is bumped. The learner session is
//! the root, so signing out cancels everything its screens scheduled.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct ViewGeneration {
    counter: Arc<AtomicU64>,
    parent: Option<Box<GenerationTicket>>,
}

impl ViewGeneration {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> u64 {
        self.counter.load(Ordering::Acquire)
    }

    /// Captures the current generation.
    #[must_use]
    pub fn ticket(&self) -> GenerationTicket {
        GenerationTicket {
            counter: Arc::clone(&self.counter),
            issued: self.current(),
            parent: self.parent.clone(),
        }
    }

    /// A nested view. Bumping it leaves `self` alone; bumping `self` stales
    /// the child and everything it schedules.
    #[must_use]
    pub fn child(&self) -> ViewGeneration {
        ViewGeneration {
            counter: Arc::default(),
            parent: Some(Box::new(self.ticket())),
        }
    }

    /// False once this view or any ancestor has been invalidated since it
    /// was created.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.parent.as_deref().is_none_or(GenerationTicket::is_current)
    }

    /// Makes every outstanding ticket stale. Returns the new generation.
    pub fn invalidate(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::AcqRel) + 1
    }
}

#[derive(Debug, Clone)]
pub struct GenerationTicket {
    counter: Arc<AtomicU64>,
    issued: u64,
    parent: Option<Box<GenerationTicket>>,
}

impl GenerationTicket {
    #[must_use]
    pub fn issued(&self) -> u64 {
        self.issued
    }

    #[must_use]
    pub fn is_current(&self) -> bool {
        self.counter.load(Ordering::Acquire) == self.issued
            && self.parent.as_deref().is_none_or(GenerationTicket::is_current)
    }
}

/// A payload to apply after `delay`, unless its view was dismissed first.
#[derive(Debug, Clone)]
#[must_use = "a deferred update does nothing until it is fired or taken"]
pub struct Deferred<T> {
    ticket: GenerationTicket,
    delay: Duration,
    payload: T,
}

impl<T> Deferred<T> {
    pub fn new(ticket: GenerationTicket, delay: Duration, payload: T) -> Self {
        Self {
            ticket,
            delay,
            payload,
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    #[must_use]
    pub fn is_stale(&self) -> bool {
        !self.ticket.is_current()
    }

    /// Waits out the delay without consuming the update.
    pub async fn elapsed(&self) {
        tokio::time::sleep(self.delay).await;
    }

    /// Returns the payload if the view is still the one that scheduled it.
    pub fn take_if_current(self) -> Option<T> {
        if self.ticket.is_current() {
            Some(self.payload)
        } else {
            debug!(issued = self.ticket.issued(), "discarding stale deferred update");
            None
        }
    }

    /// Sleeps for the delay, then behaves like [`Deferred::take_if_current`].
    pub async fn fire(self) -> Option<T> {
        self.elapsed().await;
        self.take_if_current()
    }
}
