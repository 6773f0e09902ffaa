/// Raw pointer/touch phases delivered by the host UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// One raw pointer event: phase, position, and a millisecond timestamp.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub x: f32,
    pub y: f32,
    pub time_ms: u64,
}

impl PointerEvent {
    pub fn down(x: f32, y: f32, time_ms: u64) -> Self {
        Self {
            phase: PointerPhase::Down,
            x,
            y,
            time_ms,
        }
    }

    pub fn moved(x: f32, y: f32, time_ms: u64) -> Self {
        Self {
            phase: PointerPhase::Move,
            x,
            y,
            time_ms,
        }
    }

    pub fn up(x: f32, y: f32, time_ms: u64) -> Self {
        Self {
            phase: PointerPhase::Up,
            x,
            y,
            time_ms,
        }
    }

    pub fn cancel(x: f32, y: f32, time_ms: u64) -> Self {
        Self {
            phase: PointerPhase::Cancel,
            x,
            y,
            time_ms,
        }
    }
}

/// Semantic gestures produced by [`crate::GestureRecognizer`].
///
/// Scroll distances use the platform convention where positive `dy` means
/// the finger moved up, i.e. the content should scroll down.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Gesture {
    /// A single tap that stands alone (the double-tap window expired).
    /// The coordinates are the original tap's; `time_ms` is the moment of
    /// confirmation, so animations started by the handler begin now rather
    /// than a double-tap window in the past.
    TapConfirmed { x: f32, y: f32, time_ms: u64 },
    DoubleTap { x: f32, y: f32, time_ms: u64 },
    /// Press held past the duration threshold with total movement under
    /// the distance threshold.
    LongPress { x: f32, y: f32, time_ms: u64 },
    Scroll { dx: f32, dy: f32 },
    /// Release velocity exceeded the fling threshold, in px/s.
    Fling { velocity_y: f32 },
}
