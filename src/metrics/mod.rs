//! Traffic counters for the contacts client.
//!
//! Request timing is not accumulated; the client logs each request's elapsed
//! time at debug level instead.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const COUNTERS: usize = 6;

/// One counted quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    /// HTTP requests sent, successful or not
    Requests,
    /// Requests that ended in a transport failure or a non-2xx status
    Errors,
    ContactsFetched,
    ValidationsFetched,
    ContactsUpdated,
    BytesDownloaded,
}

impl Counter {
    pub const ALL: [Counter; COUNTERS] = [
        Counter::Requests,
        Counter::Errors,
        Counter::ContactsFetched,
        Counter::ValidationsFetched,
        Counter::ContactsUpdated,
        Counter::BytesDownloaded,
    ];

    fn slot(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Counter::Requests => "requests",
            Counter::Errors => "errors",
            Counter::ContactsFetched => "contacts_fetched",
            Counter::ValidationsFetched => "validations_fetched",
            Counter::ContactsUpdated => "contacts_updated",
            Counter::BytesDownloaded => "bytes_downloaded",
        }
    }
}

/// Shared counters. Clones observe the same values.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    counters: Arc<[AtomicU64; COUNTERS]>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, counter: Counter, amount: usize) {
        self.counters[counter.slot()].fetch_add(amount as u64, Ordering::Relaxed);
    }

    pub fn get(&self, counter: Counter) -> u64 {
        self.counters[counter.slot()].load(Ordering::Relaxed)
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, counter) in Counter::ALL.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}={}", counter.as_str(), self.get(*counter))?;
        }
        Ok(())
    }
}
