//! Component-scoped cancellation for async effects.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use dioxus::prelude::*;

/// Shared flag flipped once the owner goes away.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Rc<Cell<bool>>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }

    /// Await `fut`, discarding its output if the token was cancelled meanwhile.
    pub async fn guard<F: Future>(&self, fut: F) -> Option<F::Output> {
        if self.is_cancelled() {
            return None;
        }
        let output = fut.await;
        if self.is_cancelled() {
            tracing::debug!("Dropping response for an unmounted view");
            return None;
        }
        Some(output)
    }
}

/// A token cancelled when the calling component unmounts.
pub fn use_cancellation() -> CancellationToken {
    let token = use_hook(CancellationToken::new);
    use_drop({
        let token = token.clone();
        move || token.cancel()
    });
    token
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn live_token_passes_output_through() {
        let token = CancellationToken::new();
        assert_eq!(token.guard(async { 5 }).await, Some(5));
    }

    #[tokio::test]
    async fn cancellation_during_await_discards_output() {
        let token = CancellationToken::new();
        let handle = token.clone();
        let out = token
            .guard(async move {
                handle.cancel();
                "late"
            })
            .await;
        assert_eq!(out, None);
    }

    #[tokio::test]
    async fn cancelled_token_skips_the_future() {
        let token = CancellationToken::new();
        token.cancel();
        let ran = Cell::new(false);
        let out = token.guard(async { ran.set(true) }).await;
        assert!(out.is_none());
        assert!(!ran.get());
    }
}
