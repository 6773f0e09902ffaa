use crate::event::{Gesture, PointerEvent, PointerPhase};

/// Number of samples kept for velocity estimation.
const VELOCITY_HISTORY: usize = 20;

/// Only samples within this window count toward the release velocity.
const VELOCITY_HORIZON_MS: u64 = 100;

/// Thresholds for [`GestureRecognizer`].
///
/// Values are in logical pixels / milliseconds. The defaults follow common
/// platform conventions (an ~8 px touch slop, a 500 ms long press, a
/// 300 ms double-tap window).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecognizerOptions {
    /// Movement beyond this distance from the press starts a scroll and
    /// cancels tap/long-press recognition.
    pub touch_slop: f32,
    /// Hold duration required for the custom long-press.
    pub long_press_ms: u64,
    /// A second tap landing within this window (and within
    /// `double_tap_slop` of the first) forms a double tap.
    pub double_tap_window_ms: u64,
    pub double_tap_slop: f32,
    /// Release velocities below this (px/s) are not flings.
    pub min_fling_velocity: f32,
    pub max_fling_velocity: f32,
}

impl Default for RecognizerOptions {
    fn default() -> Self {
        Self {
            touch_slop: 8.0,
            long_press_ms: 500,
            double_tap_window_ms: 300,
            double_tap_slop: 64.0,
            min_fling_velocity: 50.0,
            max_fling_velocity: 8_000.0,
        }
    }
}

/// Small ring-buffer velocity estimator over the recent pointer history.
#[derive(Clone, Copy, Debug)]
struct VelocityTracker {
    samples: [Option<(u64, f32)>; VELOCITY_HISTORY],
    index: usize,
}

impl VelocityTracker {
    fn new() -> Self {
        Self {
            samples: [None; VELOCITY_HISTORY],
            index: 0,
        }
    }

    fn clear(&mut self) {
        self.samples = [None; VELOCITY_HISTORY];
        self.index = 0;
    }

    fn push(&mut self, time_ms: u64, y: f32) {
        self.index = (self.index + 1) % VELOCITY_HISTORY;
        self.samples[self.index] = Some((time_ms, y));
    }

    /// Pointer velocity in px/s over the samples inside the horizon, or
    /// `0.0` when there is not enough recent history.
    fn velocity_y(&self, now_ms: u64) -> f32 {
        let mut earliest: Option<(u64, f32)> = None;
        let mut latest: Option<(u64, f32)> = None;
        for sample in self.samples.iter().flatten() {
            if now_ms.saturating_sub(sample.0) > VELOCITY_HORIZON_MS {
                continue;
            }
            if earliest.is_none_or(|(t, _)| sample.0 < t) {
                earliest = Some(*sample);
            }
            if latest.is_none_or(|(t, _)| sample.0 >= t) {
                latest = Some(*sample);
            }
        }
        let (Some((t0, y0)), Some((t1, y1))) = (earliest, latest) else {
            return 0.0;
        };
        if t1 <= t0 {
            return 0.0;
        }
        (y1 - y0) / (t1 - t0) as f32 * 1000.0
    }
}

#[derive(Clone, Copy, Debug)]
struct TouchState {
    down_x: f32,
    down_y: f32,
    down_ms: u64,
    last_x: f32,
    last_y: f32,
    moved_past_slop: bool,
    long_press_fired: bool,
    double_candidate: bool,
}

/// Translates raw pointer events into semantic gestures.
///
/// Event-driven gestures (scroll, double tap, fling) are emitted from
/// [`GestureRecognizer::on_pointer_event`]. Time-driven ones (the deferred
/// tap confirmation and the custom press-and-hold long press) come out of
/// [`GestureRecognizer::poll`], which adapters call once per frame together
/// with the stack tick.
#[derive(Clone, Debug)]
pub struct GestureRecognizer {
    options: RecognizerOptions,
    touch: Option<TouchState>,
    /// A completed tap waiting out the double-tap window.
    pending_tap: Option<(f32, f32, u64)>,
    velocity: VelocityTracker,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(RecognizerOptions::default())
    }
}

impl GestureRecognizer {
    pub fn new(options: RecognizerOptions) -> Self {
        Self {
            options,
            touch: None,
            pending_tap: None,
            velocity: VelocityTracker::new(),
        }
    }

    pub fn options(&self) -> &RecognizerOptions {
        &self.options
    }

    /// Feeds one raw pointer event, emitting any gestures it completes.
    pub fn on_pointer_event(&mut self, ev: PointerEvent, mut emit: impl FnMut(Gesture)) {
        match ev.phase {
            PointerPhase::Down => self.on_down(ev, &mut emit),
            PointerPhase::Move => self.on_move(ev, &mut emit),
            PointerPhase::Up => self.on_up(ev, &mut emit),
            PointerPhase::Cancel => {
                self.touch = None;
                self.pending_tap = None;
                self.velocity.clear();
            }
        }
    }

    /// Advances time-based recognition: confirms a stand-alone tap once
    /// the double-tap window expires, and fires the long press once the
    /// hold crosses the duration threshold without leaving the slop.
    pub fn poll(&mut self, now_ms: u64, mut emit: impl FnMut(Gesture)) {
        if let Some((x, y, t)) = self.pending_tap {
            if now_ms.saturating_sub(t) >= self.options.double_tap_window_ms {
                self.pending_tap = None;
                // Confirmation time, not the original tap time: animations
                // the handler starts must not begin in the past.
                emit(Gesture::TapConfirmed { x, y, time_ms: now_ms });
            }
        }
        if let Some(touch) = &mut self.touch {
            if !touch.long_press_fired
                && !touch.moved_past_slop
                && now_ms.saturating_sub(touch.down_ms) >= self.options.long_press_ms
            {
                touch.long_press_fired = true;
                emit(Gesture::LongPress {
                    x: touch.down_x,
                    y: touch.down_y,
                    time_ms: now_ms,
                });
            }
        }
    }

    fn on_down(&mut self, ev: PointerEvent, emit: &mut impl FnMut(Gesture)) {
        let mut double_candidate = false;
        if let Some((x, y, t)) = self.pending_tap.take() {
            let in_window = ev.time_ms.saturating_sub(t) < self.options.double_tap_window_ms;
            let in_slop = distance(ev.x, ev.y, x, y) <= self.options.double_tap_slop;
            if in_window && in_slop {
                double_candidate = true;
            } else {
                // The previous tap stands alone after all; it confirms at
                // the time of this press.
                emit(Gesture::TapConfirmed { x, y, time_ms: ev.time_ms });
            }
        }
        self.touch = Some(TouchState {
            down_x: ev.x,
            down_y: ev.y,
            down_ms: ev.time_ms,
            last_x: ev.x,
            last_y: ev.y,
            moved_past_slop: false,
            long_press_fired: false,
            double_candidate,
        });
        self.velocity.clear();
        self.velocity.push(ev.time_ms, ev.y);
    }

    fn on_move(&mut self, ev: PointerEvent, emit: &mut impl FnMut(Gesture)) {
        let Some(touch) = &mut self.touch else {
            return;
        };
        let dx = touch.last_x - ev.x;
        let dy = touch.last_y - ev.y;
        touch.last_x = ev.x;
        touch.last_y = ev.y;
        self.velocity.push(ev.time_ms, ev.y);

        if !touch.moved_past_slop
            && distance(ev.x, ev.y, touch.down_x, touch.down_y) > self.options.touch_slop
        {
            touch.moved_past_slop = true;
        }
        // After a long press the move stream belongs to the edit drag.
        if touch.moved_past_slop && !touch.long_press_fired {
            emit(Gesture::Scroll { dx, dy });
        }
    }

    fn on_up(&mut self, ev: PointerEvent, emit: &mut impl FnMut(Gesture)) {
        let Some(touch) = self.touch.take() else {
            return;
        };
        if touch.long_press_fired {
            return;
        }
        if touch.moved_past_slop {
            let v = self.velocity.velocity_y(ev.time_ms);
            if v.abs() >= self.options.min_fling_velocity {
                let max = self.options.max_fling_velocity;
                emit(Gesture::Fling {
                    velocity_y: v.clamp(-max, max),
                });
            }
            return;
        }
        if touch.double_candidate {
            emit(Gesture::DoubleTap {
                x: ev.x,
                y: ev.y,
                time_ms: ev.time_ms,
            });
        } else {
            self.pending_tap = Some((ev.x, ev.y, ev.time_ms));
        }
    }
}

fn distance(x0: f32, y0: f32, x1: f32, y1: f32) -> f32 {
    let dx = x0 - x1;
    let dy = y0 - y1;
    (dx * dx + dy * dy).sqrt()
}
