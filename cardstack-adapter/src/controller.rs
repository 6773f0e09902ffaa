use cardstack::{CardStack, StackOptions, State};

use crate::event::{Gesture, PointerEvent, PointerPhase};
use crate::recognizer::{GestureRecognizer, RecognizerOptions};

/// A framework-neutral controller that wraps a [`cardstack::CardStack`] and
/// a [`GestureRecognizer`].
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_pointer_event` for every raw touch event
/// - `tick(now_ms)` once per frame (animators and time-based gestures)
///
/// and render from `stack().for_each_render_command(..)` (or the render
/// callback configured in [`StackOptions`]).
#[derive(Clone, Debug)]
pub struct Controller {
    stack: CardStack,
    recognizer: GestureRecognizer,
}

impl Controller {
    pub fn new(options: StackOptions) -> Self {
        Self::with_recognizer(options, RecognizerOptions::default())
    }

    pub fn with_recognizer(options: StackOptions, recognizer: RecognizerOptions) -> Self {
        Self {
            stack: CardStack::new(options),
            recognizer: GestureRecognizer::new(recognizer),
        }
    }

    pub fn stack(&self) -> &CardStack {
        &self.stack
    }

    pub fn stack_mut(&mut self) -> &mut CardStack {
        &mut self.stack
    }

    pub fn into_stack(self) -> CardStack {
        self.stack
    }

    pub fn recognizer(&self) -> &GestureRecognizer {
        &self.recognizer
    }

    /// Routes one raw pointer event.
    ///
    /// Raw phases reach the stack directly (touch-down cancels conflicting
    /// animators, moves drive the edit cursor, up/cancel runs release
    /// logic); recognized gestures are dispatched as they complete.
    pub fn on_pointer_event(&mut self, ev: PointerEvent) {
        match ev.phase {
            PointerPhase::Down => self.stack.on_touch_down(ev.x, ev.y, ev.time_ms),
            PointerPhase::Move => {
                if self.stack.state() == State::Edit {
                    self.stack.on_edit_move(ev.y, ev.time_ms);
                }
            }
            PointerPhase::Up | PointerPhase::Cancel => {}
        }

        let Self { stack, recognizer } = self;
        recognizer.on_pointer_event(ev, |gesture| dispatch(stack, gesture));

        // Release handling runs after gesture completion so that e.g. a
        // double tap lands before the release test.
        match ev.phase {
            PointerPhase::Up => self.stack.on_touch_up(ev.time_ms),
            PointerPhase::Cancel => self.stack.on_touch_cancel(ev.time_ms),
            _ => {}
        }
    }

    /// Advances time-based gesture recognition and all stack animators.
    ///
    /// Returns `true` when any layout changed this frame.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let Self { stack, recognizer } = self;
        recognizer.poll(now_ms, |gesture| dispatch(stack, gesture));
        stack.tick(now_ms)
    }
}

fn dispatch(stack: &mut CardStack, gesture: Gesture) {
    match gesture {
        Gesture::TapConfirmed { y, time_ms, .. } => stack.on_tap_confirmed(y, time_ms),
        Gesture::DoubleTap { y, time_ms, .. } => stack.on_double_tap(y, time_ms),
        Gesture::LongPress { y, time_ms, .. } => stack.on_long_press(y, time_ms),
        Gesture::Scroll { dx, dy } => stack.on_scroll(dx, dy),
        // The stack has no kinetic scrolling; a fling ends as a plain
        // release and the rubber band takes it from there.
        Gesture::Fling { .. } => {}
    }
}
