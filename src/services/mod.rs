//! Read-only remote collaborators (daily tip, exchange rate). Fetching is the
//! host's job; this module parses responses and decides which one to keep.

pub mod exchange;
pub mod insight;

use std::fmt;

/// What a feed currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Remote<T> {
    Loading,
    Ready(T),
    Unavailable,
}

/// Identifies one refresh request. Only the newest ticket may complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// A last-request-wins slot for one remote value.
#[derive(Debug, Clone)]
pub struct Feed<T> {
    name: &'static str,
    latest: u64,
    state: Remote<T>,
}

impl<T> Feed<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            latest: 0,
            state: Remote::Loading,
        }
    }

    pub fn state(&self) -> &Remote<T> {
        &self.state
    }

    /// Starts a refresh. Any ticket handed out earlier becomes stale.
    pub fn begin(&mut self) -> Ticket {
        self.latest += 1;
        self.state = Remote::Loading;
        Ticket(self.latest)
    }

    /// Stores the outcome of the request behind `ticket`. Returns `false` and
    /// leaves the slot untouched when a newer request has been started.
    pub fn complete<E: fmt::Display>(&mut self, ticket: Ticket, result: Result<T, E>) -> bool {
        if ticket.0 != self.latest {
            tracing::debug!(
                feed = self.name,
                ticket = ticket.0,
                latest = self.latest,
                "stale response dropped"
            );
            return false;
        }
        self.state = match result {
            Ok(value) => Remote::Ready(value),
            Err(e) => {
                tracing::warn!(feed = self.name, error = %e, "remote value unavailable");
                Remote::Unavailable
            }
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_request_wins() {
        let mut feed = Feed::<&str>::new("tip");
        assert_eq!(feed.state(), &Remote::Loading);

        let first = feed.begin();
        let second = feed.begin();

        assert!(feed.complete::<String>(second, Ok("fresh")));
        assert!(!feed.complete::<String>(first, Ok("stale")));
        assert_eq!(feed.state(), &Remote::Ready("fresh"));
    }

    #[test]
    fn stale_completion_does_not_overwrite_loading() {
        let mut feed = Feed::<u32>::new("rate");
        let first = feed.begin();
        let _second = feed.begin();

        assert!(!feed.complete::<String>(first, Ok(1)));
        assert_eq!(feed.state(), &Remote::Loading);
    }

    #[test]
    fn failure_marks_unavailable() {
        let mut feed = Feed::<u32>::new("rate");
        let t = feed.begin();

        assert!(feed.complete(t, Err("timeout")));
        assert_eq!(feed.state(), &Remote::Unavailable);
    }
}
