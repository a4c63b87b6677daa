//! Keyed debouncing for as-you-type validation.
//!
//! A [`DebouncedValidator`] tracks one generation counter per key. Each
//! [`submit`](DebouncedValidator::submit) bumps the key's generation, waits for
//! the quiet period, and only runs its check if no newer submission for the
//! same key arrived meanwhile. Results of a check that was overtaken while in
//! flight are discarded as well. Different keys never interfere.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::rc::Rc;
use std::time::Duration;

use crate::timer::sleep;

/// Proof of a submission; valid until the next submission for the same key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<K> {
    key: K,
    generation: u64,
}

#[derive(Debug)]
pub struct DebouncedValidator<K> {
    generations: Rc<RefCell<HashMap<K, u64>>>,
    delay: Duration,
}

impl<K> Clone for DebouncedValidator<K> {
    fn clone(&self) -> Self {
        Self {
            generations: self.generations.clone(),
            delay: self.delay,
        }
    }
}

impl<K: Eq + Hash + Clone> DebouncedValidator<K> {
    pub fn new(delay: Duration) -> Self {
        Self {
            generations: Rc::new(RefCell::new(HashMap::new())),
            delay,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Start a new generation for `key`, superseding any pending one.
    pub fn schedule(&self, key: K) -> Ticket<K> {
        let mut generations = self.generations.borrow_mut();
        let generation = generations.entry(key.clone()).or_insert(0);
        *generation += 1;
        Ticket {
            key,
            generation: *generation,
        }
    }

    pub fn is_current(&self, ticket: &Ticket<K>) -> bool {
        self.generations.borrow().get(&ticket.key) == Some(&ticket.generation)
    }

    /// Supersede whatever is pending for `key` without scheduling a check.
    pub fn cancel(&self, key: K) {
        self.schedule(key);
    }

    /// Run `check` after the quiet period, unless `key` was resubmitted.
    ///
    /// Returns `None` when superseded, before or during the check.
    pub async fn submit<F, Fut, R>(&self, key: K, check: F) -> Option<R>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = R>,
    {
        let ticket = self.schedule(key);
        sleep(self.delay).await;
        if !self.is_current(&ticket) {
            return None;
        }
        let result = check().await;
        self.is_current(&ticket).then_some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const QUIET: Duration = Duration::from_millis(500);

    #[test]
    fn newer_ticket_supersedes_older() {
        let validator = DebouncedValidator::new(QUIET);
        let first = validator.schedule("username");
        let second = validator.schedule("username");
        let other = validator.schedule("email");

        assert!(!validator.is_current(&first));
        assert!(validator.is_current(&second));
        assert!(validator.is_current(&other));

        validator.cancel("username");
        assert!(!validator.is_current(&second));
    }

    #[tokio::test(start_paused = true)]
    async fn only_the_last_keystroke_runs() {
        let validator = DebouncedValidator::new(QUIET);
        let runs = Cell::new(0);
        let check = |value: &'static str| {
            let runs = &runs;
            move || async move {
                runs.set(runs.get() + 1);
                value
            }
        };

        let (a, b, c) = tokio::join!(
            validator.submit("username", check("a")),
            async {
                sleep(Duration::from_millis(100)).await;
                validator.submit("username", check("al")).await
            },
            async {
                sleep(Duration::from_millis(200)).await;
                validator.submit("username", check("ali")).await
            },
        );

        assert_eq!((a, b, c), (None, None, Some("ali")));
        assert_eq!(runs.get(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn separate_keys_do_not_cancel_each_other() {
        let validator = DebouncedValidator::new(QUIET);

        let (user, email) = tokio::join!(
            validator.submit("username", || async { 1 }),
            validator.submit("email", || async { 2 }),
        );

        assert_eq!((user, email), (Some(1), Some(2)));
    }

    #[tokio::test(start_paused = true)]
    async fn result_overtaken_in_flight_is_dropped() {
        let validator = DebouncedValidator::new(QUIET);

        let (slow, fresh) = tokio::join!(
            validator.submit("email", || async {
                sleep(Duration::from_millis(400)).await;
                "stale"
            }),
            async {
                sleep(Duration::from_millis(600)).await;
                validator.submit("email", || async { "fresh" }).await
            },
        );

        assert_eq!(slow, None);
        assert_eq!(fresh, Some("fresh"));
    }
}
