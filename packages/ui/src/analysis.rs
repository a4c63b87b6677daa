//! # Analysis progress: stage labels driven by the real request
//!
//! The dashboard shows a stage label while `/predict` is outstanding. Stages
//! only advance when the request lifecycle says so ([`api::PredictPhase`]);
//! the configured floor is a minimum display time per label, never a source
//! of progress.
//!
//! | Event | Stage reached |
//! |-------|---------------|
//! | upload started / `Sent` | `Analyzing` |
//! | `Received` | `Interpreting` |
//! | `Decoded` | `Complete` (passing through `Finalizing`) |
//! | error | `Failed`, shown at once |
//!
//! [`StageTracker::tick`] moves the displayed stage one step toward the
//! reached stage once the current label has been visible for the floor.
//! The result panel is gated on [`StageTracker::is_complete`], which cannot
//! become true before `Decoded`.

use std::time::Duration;

use api::PredictPhase;

use crate::timer::{now_ms, sleep};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Idle,
    Analyzing,
    Interpreting,
    Finalizing,
    Complete,
    Failed,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Idle => "",
            Stage::Analyzing => "Analyzing image...",
            Stage::Interpreting => "Interpreting patterns...",
            Stage::Finalizing => "Finalizing report...",
            Stage::Complete => "Analysis complete",
            Stage::Failed => "Analysis failed",
        }
    }

    fn next(&self) -> Stage {
        match self {
            Stage::Analyzing => Stage::Interpreting,
            Stage::Interpreting => Stage::Finalizing,
            Stage::Finalizing => Stage::Complete,
            other => *other,
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self, Stage::Idle | Stage::Complete | Stage::Failed)
    }
}

/// What the presenter should do after a [`StageTracker::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// The displayed stage moved; re-render and tick again.
    Advanced(Stage),
    /// The current label has not met its floor yet.
    Wait(Duration),
    /// Displayed stage caught up with the request; nothing to do until the next event.
    Pending,
    /// Idle, complete or failed.
    Settled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StageTracker {
    reached: Stage,
    shown: Stage,
    shown_since: f64,
    floor: Duration,
}

impl StageTracker {
    pub fn new(floor: Duration) -> Self {
        Self {
            reached: Stage::Idle,
            shown: Stage::Idle,
            shown_since: 0.0,
            floor,
        }
    }

    /// Begin a new analysis at `now_ms`.
    pub fn start(&mut self, now_ms: f64) {
        self.reached = Stage::Analyzing;
        self.shown = Stage::Analyzing;
        self.shown_since = now_ms;
    }

    pub fn observe(&mut self, phase: PredictPhase, now_ms: f64) {
        let target = match phase {
            PredictPhase::Sent => {
                if self.shown == Stage::Idle {
                    self.start(now_ms);
                }
                return;
            }
            PredictPhase::Received => Stage::Interpreting,
            PredictPhase::Decoded => Stage::Complete,
        };
        if self.reached != Stage::Failed && target > self.reached {
            self.reached = target;
        }
    }

    pub fn fail(&mut self) {
        self.reached = Stage::Failed;
        self.shown = Stage::Failed;
    }

    pub fn reset(&mut self) {
        self.reached = Stage::Idle;
        self.shown = Stage::Idle;
        self.shown_since = 0.0;
    }

    pub fn shown(&self) -> Stage {
        self.shown
    }

    pub fn reached(&self) -> Stage {
        self.reached
    }

    pub fn is_complete(&self) -> bool {
        self.shown == Stage::Complete
    }

    pub fn is_busy(&self) -> bool {
        !self.shown.is_terminal()
    }

    pub fn tick(&mut self, now_ms: f64) -> Tick {
        if self.shown.is_terminal() {
            return Tick::Settled;
        }
        if self.shown == self.reached {
            return Tick::Pending;
        }
        let floor_ms = self.floor.as_secs_f64() * 1000.0;
        let elapsed = now_ms - self.shown_since;
        if elapsed >= floor_ms {
            self.shown = self.shown.next();
            self.shown_since = now_ms;
            Tick::Advanced(self.shown)
        } else {
            Tick::Wait(Duration::from_secs_f64((floor_ms - elapsed) / 1000.0))
        }
    }
}

/// Step a tracker until it settles, sleeping through each floor.
///
/// `step` is called with the current time and returns the tracker's
/// [`Tick`]; while the request is still outstanding the loop polls every `poll`.
pub async fn drive_stages(mut step: impl FnMut(f64) -> Tick, poll: Duration) {
    loop {
        match step(now_ms()) {
            Tick::Advanced(stage) => tracing::trace!("Showing stage {:?}", stage),
            Tick::Wait(remaining) => sleep(remaining).await,
            Tick::Pending => sleep(poll).await,
            Tick::Settled => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const FLOOR: Duration = Duration::from_millis(500);

    #[test]
    fn never_completes_before_decoded() {
        let mut tracker = StageTracker::new(FLOOR);
        tracker.start(0.0);
        tracker.observe(PredictPhase::Received, 10.0);

        let mut now = 0.0;
        for _ in 0..50 {
            now += 1_000.0;
            tracker.tick(now);
        }
        assert_eq!(tracker.shown(), Stage::Interpreting);
        assert!(!tracker.is_complete());
        assert_eq!(tracker.tick(now + 1.0), Tick::Pending);
    }

    #[test]
    fn fast_response_still_shows_each_stage_for_the_floor() {
        let mut tracker = StageTracker::new(FLOOR);
        tracker.observe(PredictPhase::Sent, 0.0);
        tracker.observe(PredictPhase::Received, 50.0);
        tracker.observe(PredictPhase::Decoded, 100.0);

        assert_eq!(tracker.tick(100.0), Tick::Wait(Duration::from_millis(400)));
        assert_eq!(tracker.tick(500.0), Tick::Advanced(Stage::Interpreting));
        assert!(matches!(tracker.tick(700.0), Tick::Wait(_)));
        assert_eq!(tracker.tick(1_000.0), Tick::Advanced(Stage::Finalizing));
        assert_eq!(tracker.tick(1_500.0), Tick::Advanced(Stage::Complete));
        assert!(tracker.is_complete());
        assert_eq!(tracker.tick(9_999.0), Tick::Settled);
    }

    #[test]
    fn failure_is_shown_immediately_and_sticks() {
        let mut tracker = StageTracker::new(FLOOR);
        tracker.start(0.0);
        tracker.fail();
        tracker.observe(PredictPhase::Decoded, 10.0);

        assert_eq!(tracker.shown(), Stage::Failed);
        assert!(!tracker.is_busy());
        assert_eq!(tracker.tick(10_000.0), Tick::Settled);
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut tracker = StageTracker::new(FLOOR);
        tracker.start(0.0);
        tracker.reset();
        assert_eq!(tracker.shown(), Stage::Idle);
        assert_eq!(tracker.reached(), Stage::Idle);
        assert_eq!(tracker.tick(1.0), Tick::Settled);
    }

    #[tokio::test(start_paused = true)]
    async fn driver_holds_each_stage_for_the_floor() {
        let tracker = Rc::new(RefCell::new(StageTracker::new(FLOOR)));
        let started = now_ms();
        {
            let mut t = tracker.borrow_mut();
            t.start(started);
            t.observe(PredictPhase::Received, started);
            t.observe(PredictPhase::Decoded, started);
        }

        let stepper = tracker.clone();
        drive_stages(move |now| stepper.borrow_mut().tick(now), FLOOR).await;

        assert!(tracker.borrow().is_complete());
        assert!(now_ms() - started >= 3.0 * 500.0);
    }

    #[tokio::test(start_paused = true)]
    async fn driver_waits_for_the_response() {
        let tracker = Rc::new(RefCell::new(StageTracker::new(FLOOR)));
        tracker.borrow_mut().start(now_ms());

        let stepper = tracker.clone();
        let responder = tracker.clone();
        tokio::join!(
            drive_stages(move |now| stepper.borrow_mut().tick(now), Duration::from_millis(100)),
            async move {
                sleep(Duration::from_secs(5)).await;
                assert_eq!(responder.borrow().shown(), Stage::Analyzing);
                responder.borrow_mut().observe(PredictPhase::Decoded, now_ms());
            },
        );

        assert!(tracker.borrow().is_complete());
    }
}
