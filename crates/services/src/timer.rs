//! Countdown for timed questions.
//!
//! The controller does not own a clock. Whoever drives it calls
//! [`TimerController::tick`] once per elapsed second, which keeps tests
//! deterministic and lets the terminal driver feed it from a runtime
//! interval.

use std::fmt;

/// Called with the remaining seconds, first with the full value on start.
pub type TickCallback = Box<dyn FnMut(u32) + Send>;
/// Called once when the countdown reaches zero.
pub type ExpireCallback = Box<dyn FnOnce() + Send>;

/// Identifies one started countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

struct ActiveTimer {
    handle: TimerHandle,
    remaining: u32,
    on_tick: TickCallback,
    on_expire: ExpireCallback,
}

/// At most one running countdown at a time.
#[derive(Default)]
pub struct TimerController {
    next_handle: u64,
    active: Option<ActiveTimer>,
}

impl fmt::Debug for TimerController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerController")
            .field("active", &self.active_handle())
            .field("remaining", &self.remaining())
            .finish()
    }
}

impl TimerController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a countdown of `seconds`, cancelling any running one.
    ///
    /// `on_tick(seconds)` fires before this returns. A zero-length countdown
    /// expires immediately.
    pub fn start(
        &mut self,
        seconds: u32,
        mut on_tick: TickCallback,
        on_expire: ExpireCallback,
    ) -> TimerHandle {
        self.active = None;

        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;

        on_tick(seconds);
        if seconds == 0 {
            on_expire();
            return handle;
        }

        self.active = Some(ActiveTimer {
            handle,
            remaining: seconds,
            on_tick,
            on_expire,
        });
        handle
    }

    /// Advance the running countdown by one second.
    ///
    /// Returns `true` if this tick expired the countdown. Without a running
    /// countdown this does nothing.
    pub fn tick(&mut self) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        active.remaining = active.remaining.saturating_sub(1);
        (active.on_tick)(active.remaining);
        if active.remaining > 0 {
            return false;
        }

        if let Some(expired) = self.active.take() {
            (expired.on_expire)();
        }
        true
    }

    /// Stop the countdown identified by `handle` without firing its expiry.
    ///
    /// Stale or repeated handles are ignored.
    pub fn cancel(&mut self, handle: TimerHandle) {
        if self.active_handle() == Some(handle) {
            self.active = None;
        }
    }

    #[must_use]
    pub fn active_handle(&self) -> Option<TimerHandle> {
        self.active.as_ref().map(|active| active.handle)
    }

    #[must_use]
    pub fn remaining(&self) -> Option<u32> {
        self.active.as_ref().map(|active| active.remaining)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};

    struct Watcher {
        ticks: Arc<Mutex<Vec<u32>>>,
        expired: Arc<AtomicU32>,
    }

    impl Watcher {
        fn new() -> Self {
            Self {
                ticks: Arc::new(Mutex::new(Vec::new())),
                expired: Arc::new(AtomicU32::new(0)),
            }
        }

        fn start(&self, timer: &mut TimerController, seconds: u32) -> TimerHandle {
            let ticks = Arc::clone(&self.ticks);
            let expired = Arc::clone(&self.expired);
            timer.start(
                seconds,
                Box::new(move |remaining| ticks.lock().unwrap().push(remaining)),
                Box::new(move || {
                    expired.fetch_add(1, Ordering::SeqCst);
                }),
            )
        }

        fn ticks(&self) -> Vec<u32> {
            self.ticks.lock().unwrap().clone()
        }

        fn expired(&self) -> u32 {
            self.expired.load(Ordering::SeqCst)
        }
    }

    #[test]
    fn start_reports_full_value() {
        let mut timer = TimerController::new();
        let watcher = Watcher::new();
        watcher.start(&mut timer, 5);
        assert_eq!(watcher.ticks(), vec![5]);
        assert_eq!(timer.remaining(), Some(5));
        assert!(timer.is_running());
    }

    #[test]
    fn expires_exactly_once_then_goes_inert() {
        let mut timer = TimerController::new();
        let watcher = Watcher::new();
        watcher.start(&mut timer, 3);

        assert!(!timer.tick());
        assert!(!timer.tick());
        assert!(timer.tick());
        assert!(!timer.tick());
        assert!(!timer.tick());

        assert_eq!(watcher.ticks(), vec![3, 2, 1, 0]);
        assert_eq!(watcher.expired(), 1);
        assert!(!timer.is_running());
    }

    #[test]
    fn double_cancel_is_noop_and_never_expires() {
        let mut timer = TimerController::new();
        let watcher = Watcher::new();
        let handle = watcher.start(&mut timer, 2);

        timer.cancel(handle);
        timer.cancel(handle);
        for _ in 0..5 {
            timer.tick();
        }

        assert_eq!(watcher.expired(), 0);
        assert_eq!(watcher.ticks(), vec![2]);
    }

    #[test]
    fn starting_new_timer_cancels_previous() {
        let mut timer = TimerController::new();
        let first = Watcher::new();
        let second = Watcher::new();
        let old = first.start(&mut timer, 1);
        let new = second.start(&mut timer, 2);
        assert_ne!(old, new);

        timer.cancel(old);
        assert_eq!(timer.active_handle(), Some(new));

        timer.tick();
        timer.tick();
        assert_eq!(first.expired(), 0);
        assert_eq!(second.expired(), 1);
    }

    #[test]
    fn zero_length_countdown_expires_immediately() {
        let mut timer = TimerController::new();
        let watcher = Watcher::new();
        watcher.start(&mut timer, 0);
        assert_eq!(watcher.expired(), 1);
        assert!(!timer.is_running());
    }
}
