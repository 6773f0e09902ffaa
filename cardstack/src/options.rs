use std::sync::Arc;

use crate::easing::Easing;
use crate::types::{CardId, RenderCommand};

/// Fired once per card when it is populated/appended.
pub type OnBindCallback = Arc<dyn Fn(usize, CardId) + Send + Sync>;

/// Fired when entering/leaving the focused single-card view.
pub type CardLifecycleCallback = Arc<dyn Fn(usize, CardId) + Send + Sync>;

/// Fired when a confirmed tap occurs while already in the single-card view,
/// i.e. the host should open a detail screen.
pub type OnEnterDetailConfirmedCallback = Arc<dyn Fn(usize) + Send + Sync>;

/// Fired for every card on every layout recompute.
pub type RenderCallback = Arc<dyn Fn(RenderCommand) + Send + Sync>;

/// Configuration for [`crate::CardStack`].
///
/// Cheap to clone: callbacks are stored in `Arc`s so adapters can tweak a
/// few fields and rebuild without reallocating closures.
#[derive(Clone)]
pub struct StackOptions {
    /// Initial number of cards.
    pub count: usize,
    /// Intrinsic card height in layout units. Recomputation short-circuits
    /// while this is `<= 0` (e.g. before the host has measured anything).
    pub item_height: f32,
    /// Height of the visible container.
    pub container_height: f32,
    /// Fraction of `item_height` exposed per card in the stacked list.
    pub stack_ratio: f32,
    /// Rubber-band factor applied to over-scroll beyond the camera clamp.
    pub stretch_factor: f32,
    /// How far non-focused cards below the focused one are pushed off-screen
    /// when entering the single-card view. `None` derives
    /// `container_height + item_height` (at least one screen height).
    pub unfocused_offset: Option<f32>,
    /// Camera drift beyond which releasing a drag in the single-card view
    /// dismisses back to the list. `None` derives `item_height / 2`.
    pub dismiss_threshold: Option<f32>,
    /// Alpha applied to the card being drag-reordered.
    pub edit_alpha: f32,

    pub easing: Easing,
    pub intro_ms: u64,
    pub list_to_single_ms: u64,
    pub single_to_list_ms: u64,
    pub camera_bounce_ms: u64,
    pub position_adjust_ms: u64,

    pub on_bind: Option<OnBindCallback>,
    pub on_enter_card: Option<CardLifecycleCallback>,
    pub on_leave_card: Option<CardLifecycleCallback>,
    pub on_enter_detail_confirmed: Option<OnEnterDetailConfirmedCallback>,
    /// Render sink invoked for each card on every recompute.
    pub on_render: Option<RenderCallback>,
}

impl StackOptions {
    pub fn new(count: usize, item_height: f32, container_height: f32) -> Self {
        Self {
            count,
            item_height,
            container_height,
            stack_ratio: 0.2,
            stretch_factor: 0.5,
            unfocused_offset: None,
            dismiss_threshold: None,
            edit_alpha: 0.85,
            easing: Easing::SmoothStep,
            intro_ms: 1000,
            list_to_single_ms: 1000,
            single_to_list_ms: 1000,
            camera_bounce_ms: 250,
            position_adjust_ms: 200,
            on_bind: None,
            on_enter_card: None,
            on_leave_card: None,
            on_enter_detail_confirmed: None,
            on_render: None,
        }
    }

    pub fn with_stack_ratio(mut self, stack_ratio: f32) -> Self {
        self.stack_ratio = stack_ratio;
        self
    }

    pub fn with_stretch_factor(mut self, stretch_factor: f32) -> Self {
        self.stretch_factor = stretch_factor;
        self
    }

    pub fn with_unfocused_offset(mut self, unfocused_offset: Option<f32>) -> Self {
        self.unfocused_offset = unfocused_offset;
        self
    }

    pub fn with_dismiss_threshold(mut self, dismiss_threshold: Option<f32>) -> Self {
        self.dismiss_threshold = dismiss_threshold;
        self
    }

    pub fn with_edit_alpha(mut self, edit_alpha: f32) -> Self {
        self.edit_alpha = edit_alpha;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_durations_ms(
        mut self,
        intro: u64,
        list_to_single: u64,
        single_to_list: u64,
        camera_bounce: u64,
        position_adjust: u64,
    ) -> Self {
        self.intro_ms = intro;
        self.list_to_single_ms = list_to_single;
        self.single_to_list_ms = single_to_list;
        self.camera_bounce_ms = camera_bounce;
        self.position_adjust_ms = position_adjust;
        self
    }

    pub fn with_on_bind(
        mut self,
        on_bind: Option<impl Fn(usize, CardId) + Send + Sync + 'static>,
    ) -> Self {
        self.on_bind = on_bind.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_enter_card(
        mut self,
        on_enter_card: Option<impl Fn(usize, CardId) + Send + Sync + 'static>,
    ) -> Self {
        self.on_enter_card = on_enter_card.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_leave_card(
        mut self,
        on_leave_card: Option<impl Fn(usize, CardId) + Send + Sync + 'static>,
    ) -> Self {
        self.on_leave_card = on_leave_card.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_enter_detail_confirmed(
        mut self,
        on_enter_detail_confirmed: Option<impl Fn(usize) + Send + Sync + 'static>,
    ) -> Self {
        self.on_enter_detail_confirmed = on_enter_detail_confirmed.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_render(
        mut self,
        on_render: Option<impl Fn(RenderCommand) + Send + Sync + 'static>,
    ) -> Self {
        self.on_render = on_render.map(|f| Arc::new(f) as _);
        self
    }

    pub(crate) fn resolved_unfocused_offset(&self) -> f32 {
        self.unfocused_offset
            .unwrap_or(self.container_height + self.item_height)
    }

    pub(crate) fn resolved_dismiss_threshold(&self) -> f32 {
        self.dismiss_threshold.unwrap_or(self.item_height / 2.0)
    }
}

impl core::fmt::Debug for StackOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StackOptions")
            .field("count", &self.count)
            .field("item_height", &self.item_height)
            .field("container_height", &self.container_height)
            .field("stack_ratio", &self.stack_ratio)
            .field("stretch_factor", &self.stretch_factor)
            .field("unfocused_offset", &self.unfocused_offset)
            .field("dismiss_threshold", &self.dismiss_threshold)
            .field("edit_alpha", &self.edit_alpha)
            .field("easing", &self.easing)
            .field("intro_ms", &self.intro_ms)
            .field("list_to_single_ms", &self.list_to_single_ms)
            .field("single_to_list_ms", &self.single_to_list_ms)
            .field("camera_bounce_ms", &self.camera_bounce_ms)
            .field("position_adjust_ms", &self.position_adjust_ms)
            .finish_non_exhaustive()
    }
}
