//! The work-queue collaborator.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::collections::VecDeque;

/// A queue that accepts encoded operation tokens.
///
/// Implementations must eventually hand every token to some participant
/// exactly once. Delivery order is not guaranteed.
pub trait WorkQueue {
    /// Add a token to the queue.
    fn enqueue(&mut self, token: String);
}

impl WorkQueue for Vec<String> {
    fn enqueue(&mut self, token: String) {
        self.push(token);
    }
}

/// In-process FIFO queue for a single participant.
#[derive(Debug, Default)]
pub struct LocalQueue {
    tokens: VecDeque<String>,
    enqueued: u64,
}

impl LocalQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the oldest token, if any.
    pub fn dequeue(&mut self) -> Option<String> {
        self.tokens.pop_front()
    }

    /// Number of tokens waiting.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether no tokens are waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of tokens ever enqueued.
    #[must_use]
    pub const fn total_enqueued(&self) -> u64 {
        self.enqueued
    }
}

impl WorkQueue for LocalQueue {
    fn enqueue(&mut self, token: String) {
        self.enqueued += 1;
        self.tokens.push_back(token);
    }
}
