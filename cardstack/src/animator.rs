//! A restartable, cancelable timed-progress driver.
//!
//! Animation drivers are often written as self-rescheduling timer
//! closures. Here the animator is a plain polled state object instead: the
//! owner calls [`Animator::tick`] once per frame and interprets the result.
//! That keeps all mutation on one logical thread and makes overlapping
//! animators trivially safe to interleave.

/// Result of polling an [`Animator`] for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tick {
    /// Not running; nothing to do.
    Idle,
    /// In flight, with normalized time clamped to `[0, 1)`.
    Running(f32),
    /// The animation just reached its natural end. The caller should apply
    /// the terminal `t = 1.0` update and then run its completion handling.
    /// Subsequent ticks return [`Tick::Idle`].
    Finished,
}

/// A restartable progress driver over `[0, 1]` normalized time.
///
/// Progress is computed from `(now - origin) / duration` against a caller
/// supplied millisecond clock, so tests can drive it deterministically.
///
/// Lifecycle guarantees:
/// - `awake` has restart semantics: it resets the origin whether or not the
///   animator is already running. Nothing is queued.
/// - after [`Animator::destroy`] or a [`Tick::Finished`], the animator is
///   immediately eligible for `awake` again.
/// - `destroy` reports whether it actually cancelled a running animation
///   (the "premature" signal), exactly once.
#[derive(Clone, Copy, Debug)]
pub struct Animator {
    duration_ms: u64,
    origin_ms: u64,
    running: bool,
}

impl Animator {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms: duration_ms.max(1),
            origin_ms: 0,
            running: false,
        }
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Starts (or restarts) the animation at `now_ms`.
    pub fn awake(&mut self, now_ms: u64) {
        self.origin_ms = now_ms;
        self.running = true;
    }

    /// Clamped normalized time at `now_ms`, regardless of running state.
    pub fn progress(&self, now_ms: u64) -> f32 {
        let elapsed = now_ms.saturating_sub(self.origin_ms);
        (elapsed as f32 / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// Advances the animator by one frame.
    pub fn tick(&mut self, now_ms: u64) -> Tick {
        if !self.running {
            return Tick::Idle;
        }
        let t = self.progress(now_ms);
        if t >= 1.0 {
            self.running = false;
            Tick::Finished
        } else {
            Tick::Running(t)
        }
    }

    /// Cancels the animation. Returns `true` when a running animation was
    /// cut short, i.e. the cancellation was premature.
    pub fn destroy(&mut self) -> bool {
        let was_running = self.running;
        self.running = false;
        was_running
    }
}
