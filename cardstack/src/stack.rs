use crate::animator::{Animator, Tick};
use crate::easing::lerp;
use crate::model::{Card, PositionModel};
use crate::options::StackOptions;
use crate::types::{RenderCommand, State};

/// Live drag-reorder bookkeeping, valid only in [`State::Edit`].
#[derive(Clone, Copy, Debug)]
struct EditDrag {
    /// Current index of the dragged card (updated on every slot swap).
    index: usize,
    /// The editing cursor: the dragged card's live position in content
    /// coordinates, following the touch point minus the grab offset.
    cursor: f32,
    /// Offset of the initial press within the card.
    grab_dy: f32,
}

/// A headless wallet-style card-stack engine.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold any UI objects.
/// - Your adapter drives it by forwarding touch phases and semantic
///   gestures, and by calling [`CardStack::tick`] once per frame with a
///   millisecond clock.
/// - Placement is exposed as immutable [`RenderCommand`] values, via
///   zero-allocation iteration or the optional render callback.
///
/// All mutation happens on one logical thread: gesture handling and
/// animator ticks are mutually exclusive because both go through `&mut
/// self`. Conflicting animators are destroyed before a new owner of the
/// position model starts (e.g. the camera bounce on a fresh touch-down).
#[derive(Clone, Debug)]
pub struct CardStack {
    options: StackOptions,
    model: PositionModel,
    state: State,

    /// Raw camera value, as driven by input and animators. Clamping to
    /// `[0, camera_max]` is applied at layout time while in List.
    camera_y: f32,
    camera_y_target: f32,
    camera_y_origin: f32,

    /// `0..=1` scale applied to the stacked height during the intro.
    intro_scale: f32,

    focused: Option<usize>,
    editing: Option<EditDrag>,

    intro: Animator,
    list_to_single: Animator,
    single_to_list: Animator,
    camera_bounce: Animator,
    position_adjust: Animator,
}

impl CardStack {
    /// Creates a stack with `options.count` cards, in the pre-intro state.
    ///
    /// Call [`CardStack::begin_intro`] to run the slide-in animation, or
    /// [`CardStack::skip_intro`] to jump straight to the settled list.
    pub fn new(options: StackOptions) -> Self {
        sdebug!(
            count = options.count,
            item_height = options.item_height,
            "CardStack::new"
        );
        let mut model = PositionModel::new();
        let on_bind = options.on_bind.clone();
        model.populate(options.count, |index, id| {
            if let Some(cb) = &on_bind {
                cb(index, id);
            }
        });
        Self {
            intro: Animator::new(options.intro_ms),
            list_to_single: Animator::new(options.list_to_single_ms),
            single_to_list: Animator::new(options.single_to_list_ms),
            camera_bounce: Animator::new(options.camera_bounce_ms),
            position_adjust: Animator::new(options.position_adjust_ms),
            options,
            model,
            state: State::Intro,
            camera_y: 0.0,
            camera_y_target: 0.0,
            camera_y_origin: 0.0,
            intro_scale: 0.0,
            focused: None,
            editing: None,
        }
    }

    pub fn options(&self) -> &StackOptions {
        &self.options
    }

    /// Updates the measured card height. Layout resumes on the next
    /// recompute once a positive height is known.
    pub fn set_item_height(&mut self, item_height: f32) {
        if self.options.item_height == item_height {
            return;
        }
        self.options.item_height = item_height;
        if self.state == State::List {
            self.recompute_list_positions();
            self.model.settle();
            self.emit();
        }
    }

    /// Updates the measured container height.
    pub fn set_container_height(&mut self, container_height: f32) {
        if self.options.container_height == container_height {
            return;
        }
        self.options.container_height = container_height;
        if self.state == State::List {
            self.recompute_list_positions();
            self.model.settle();
            self.emit();
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn card_count(&self) -> usize {
        self.model.len()
    }

    pub fn cards(&self) -> &[Card] {
        self.model.cards()
    }

    pub fn position(&self, index: usize) -> Option<f32> {
        self.model.get(index).map(|c| c.position)
    }

    pub fn position_target(&self, index: usize) -> Option<f32> {
        self.model.get(index).map(|c| c.target)
    }

    pub fn focused_item(&self) -> Option<usize> {
        self.focused
    }

    pub fn editing_item(&self) -> Option<usize> {
        self.editing.map(|e| e.index)
    }

    pub fn camera_y(&self) -> f32 {
        self.camera_y
    }

    pub fn is_animating(&self) -> bool {
        self.intro.is_running()
            || self.list_to_single.is_running()
            || self.single_to_list.is_running()
            || self.camera_bounce.is_running()
            || self.position_adjust.is_running()
    }

    // ---- geometry ----------------------------------------------------

    /// Nominal stacked height (intro scale applied, no stretch).
    fn base_stacked(&self) -> f32 {
        self.options.item_height * self.options.stack_ratio * self.intro_scale
    }

    /// Stacked height with the elastic over-scroll stretch applied.
    pub fn stacked_height(&self) -> f32 {
        let base = self.base_stacked();
        if self.state != State::List {
            return base;
        }
        let stretch = self.options.stretch_factor * (self.camera_y - self.clamped_camera()).abs();
        if stretch == 0.0 {
            base
        } else {
            (base - stretch).clamp(1.0, self.options.item_height)
        }
    }

    pub fn camera_max(&self) -> f32 {
        let stacked = self.base_stacked();
        let count = self.model.len() as f32;
        (stacked * count - self.options.container_height - stacked + self.options.item_height)
            .max(0.0)
    }

    fn clamped_camera(&self) -> f32 {
        self.camera_y.clamp(0.0, self.camera_max())
    }

    /// The camera value subtracted from positions at render time. Clamped
    /// while browsing the list; free in the single-card and edit states.
    fn camera_for_layout(&self) -> f32 {
        match self.state {
            State::Intro | State::List => self.clamped_camera(),
            _ => self.camera_y,
        }
    }

    fn layout_ready(&self) -> bool {
        self.options.item_height > 0.0 && !self.model.is_empty()
    }

    /// Settled stacked target for index `i` under the current camera.
    fn stacked_slot_target(&self, index: usize) -> f32 {
        (index as f32 * self.stacked_height()).max(self.clamped_camera())
    }

    /// Maps a touch y to a row index, or `None` when it misses the stack.
    pub fn hit_test(&self, touch_y: f32) -> Option<usize> {
        if !self.layout_ready() {
            return None;
        }
        let stacked = self.stacked_height();
        let content_y = touch_y + self.camera_for_layout();
        let extent = stacked * (self.model.len() - 1) as f32 + self.options.item_height;
        if content_y < 0.0 || content_y > extent {
            return None;
        }
        let index = (content_y / stacked).floor() as isize;
        Some(index.clamp(0, self.model.len() as isize - 1) as usize)
    }

    // ---- population ---------------------------------------------------

    /// Declarative resize: the host supplies/removes backing items to match
    /// `count`; the engine (re)initializes the position arrays. Fires
    /// `on_bind` for every newly created card.
    pub fn populate(&mut self, count: usize) {
        sdebug!(count, "populate");
        self.destroy_all_animators();
        self.focused = None;
        self.editing = None;
        if self.state != State::Intro {
            self.state = State::List;
        }
        let on_bind = self.options.on_bind.clone();
        self.model.populate(count, |index, id| {
            if let Some(cb) = &on_bind {
                cb(index, id);
            }
        });
        self.options.count = count;
        self.recompute_list_positions();
        self.model.settle();
        self.emit();
    }

    /// Appends one card at the end of the stack.
    pub fn append_card(&mut self) -> usize {
        let (index, id) = self.model.append();
        self.options.count = self.model.len();
        if let Some(cb) = &self.options.on_bind {
            cb(index, id);
        }
        let target = self.stacked_slot_target(index);
        if let Some(card) = self.model.get_mut(index) {
            card.position = target;
            card.target = target;
            card.alpha = if self.state == State::Intro { 0.0 } else { 1.0 };
        }
        if self.state == State::List {
            self.recompute_list_positions();
        }
        self.emit();
        index
    }

    // ---- intro ---------------------------------------------------------

    /// Starts the slide-in animation: cards begin fully transparent at
    /// stacked height zero and fan out to the settled list.
    pub fn begin_intro(&mut self, now_ms: u64) {
        self.state = State::Intro;
        self.intro_scale = 0.0;
        self.camera_y = 0.0;
        for card in self.model.cards_mut() {
            card.alpha = 0.0;
            card.position = 0.0;
            card.target = 0.0;
        }
        self.intro.awake(now_ms);
        self.emit();
    }

    /// Jumps straight to the settled list, bypassing the intro.
    pub fn skip_intro(&mut self) {
        self.intro.destroy();
        self.intro_scale = 1.0;
        self.state = State::List;
        for card in self.model.cards_mut() {
            card.alpha = 1.0;
        }
        self.recompute_list_positions();
        self.emit();
    }

    // ---- touch + gesture entry points -----------------------------------

    /// Raw touch-down. Cancels animators that assume ownership of values
    /// the finger is about to drive directly.
    pub fn on_touch_down(&mut self, _x: f32, _y: f32, _now_ms: u64) {
        self.camera_bounce.destroy();
        if self.state == State::List {
            self.position_adjust.destroy();
        }
    }

    /// Drag movement, in the scroll-distance convention: positive `dy`
    /// scrolls the content down (camera increases).
    pub fn on_scroll(&mut self, _dx: f32, dy: f32) {
        match self.state {
            State::List => {
                self.camera_y += dy;
                strace!(camera_y = self.camera_y, "scroll");
                self.recompute_list_positions();
                self.emit();
            }
            State::Single => {
                // Free camera: the focused card tracks the finger. Release
                // decides between snap-back and dismissal.
                self.camera_y += dy;
                self.emit();
            }
            _ => {}
        }
    }

    /// Raw touch-up (or cancel): rubber-band release, single-card
    /// dismissal test, or edit drop, depending on state.
    pub fn on_touch_up(&mut self, now_ms: u64) {
        match self.state {
            State::List => {
                let clamped = self.clamped_camera();
                if self.camera_y != clamped {
                    self.camera_y_origin = self.camera_y;
                    self.camera_y_target = clamped;
                    self.camera_bounce.awake(now_ms);
                }
            }
            State::Single => {
                let drift = (self.camera_y - self.camera_y_target).abs();
                if drift > self.options.resolved_dismiss_threshold() {
                    self.begin_single_to_list(now_ms);
                } else {
                    self.camera_y_origin = self.camera_y;
                    self.camera_bounce.awake(now_ms);
                }
            }
            State::Edit => self.end_edit(now_ms),
            _ => {}
        }
    }

    pub fn on_touch_cancel(&mut self, now_ms: u64) {
        self.on_touch_up(now_ms);
    }

    /// A confirmed single tap: selects a row in List, or signals detail
    /// entry in Single.
    pub fn on_tap_confirmed(&mut self, touch_y: f32, now_ms: u64) {
        match self.state {
            State::List => {
                if let Some(index) = self.hit_test(touch_y) {
                    self.begin_list_to_single(index, now_ms);
                }
            }
            State::Single => {
                if let (Some(index), Some(cb)) =
                    (self.focused, &self.options.on_enter_detail_confirmed)
                {
                    cb(index);
                }
            }
            _ => {}
        }
    }

    /// Double tap in List appends a synthetic card (demo behavior).
    pub fn on_double_tap(&mut self, _touch_y: f32, _now_ms: u64) {
        if self.state == State::List {
            self.append_card();
        }
    }

    /// Custom long-press (held past the duration threshold without moving
    /// past the distance threshold): lifts the pressed card into the edit
    /// drag. Valid from List and Single.
    pub fn on_long_press(&mut self, touch_y: f32, now_ms: u64) {
        let index = match self.state {
            State::List => self.hit_test(touch_y),
            State::Single => self.focused,
            _ => None,
        };
        let Some(index) = index else {
            return;
        };
        self.begin_edit(index, touch_y, now_ms);
    }

    /// Tracks the edit cursor and swaps slots as it crosses midpoints.
    pub fn on_edit_move(&mut self, touch_y: f32, now_ms: u64) {
        if self.state != State::Edit || !self.layout_ready() {
            return;
        }
        let Some(mut drag) = self.editing else {
            return;
        };
        let content_y = touch_y + self.camera_for_layout();
        drag.cursor = content_y - drag.grab_dy;
        if let Some(card) = self.model.get_mut(drag.index) {
            card.position = drag.cursor;
        }

        let stacked = self.stacked_height();
        // Nearest-slot rounding: swap when the cursor crosses the midpoint
        // between two stacked slots.
        let slot = ((drag.cursor + stacked / 2.0) / stacked).floor() as isize;
        let slot = slot.clamp(0, self.model.len() as isize - 1) as usize;
        if slot != drag.index {
            sdebug!(from = drag.index, to = slot, "reorder");
            self.model.move_card(drag.index, slot);
            drag.index = slot;
            self.editing = Some(drag);
            self.retarget_displaced_cards(now_ms);
        } else {
            self.editing = Some(drag);
        }
        self.emit();
    }

    // ---- transitions -----------------------------------------------------

    fn begin_list_to_single(&mut self, index: usize, now_ms: u64) {
        if !self.layout_ready() {
            return;
        }
        self.camera_bounce.destroy();
        self.position_adjust.destroy();

        let stacked = self.stacked_height();
        self.focused = Some(index);
        self.camera_y_origin = self.camera_y;
        self.camera_y_target = (index as f32 * stacked).clamp(0.0, self.camera_max());

        let unfocused = self.options.resolved_unfocused_offset();
        let cam_target = self.camera_y_target;
        self.model.capture_origins();
        for (i, card) in self.model.cards_mut().iter_mut().enumerate() {
            let mut target = (i as f32 * stacked).max(cam_target);
            if i > index {
                // Pushed off-screen below, order preserved by the stacked
                // increments already baked into `target`.
                target += unfocused;
            }
            card.target = target;
        }

        self.state = State::ListToSingle;
        if let Some(cb) = &self.options.on_enter_card {
            if let Some(card) = self.model.get(index) {
                cb(index, card.id);
            }
        }
        sdebug!(index, cam_target, "list_to_single");
        self.list_to_single.awake(now_ms);
    }

    fn begin_single_to_list(&mut self, now_ms: u64) {
        let Some(index) = self.focused else {
            return;
        };
        self.camera_bounce.destroy();

        let stacked = self.stacked_height();
        self.camera_y_origin = self.camera_y;
        // Recenter the previously focused row in the container.
        let centered = index as f32 * stacked
            - (self.options.container_height - self.options.item_height) / 2.0;
        self.camera_y_target = centered.clamp(0.0, self.camera_max());

        let cam_target = self.camera_y_target;
        self.model.capture_origins();
        for (i, card) in self.model.cards_mut().iter_mut().enumerate() {
            card.target = (i as f32 * stacked).max(cam_target);
        }

        self.state = State::SingleToList;
        if let Some(cb) = &self.options.on_leave_card {
            if let Some(card) = self.model.get(index) {
                cb(index, card.id);
            }
        }
        sdebug!(index, cam_target, "single_to_list");
        self.single_to_list.awake(now_ms);
    }

    fn begin_edit(&mut self, index: usize, touch_y: f32, now_ms: u64) {
        if !self.layout_ready() {
            return;
        }
        self.camera_bounce.destroy();
        self.position_adjust.destroy();

        // A cancelled bounce can leave the raw camera outside the clamp.
        // Relax the over-scroll before capturing the grab: once in Edit the
        // camera is used unclamped and the stretch no longer applies, so
        // slot math would otherwise disagree with the grabbed position.
        if self.state == State::List && self.camera_y != self.clamped_camera() {
            self.camera_y = self.clamped_camera();
            self.recompute_list_positions();
        }

        if self.state == State::Single {
            if let (Some(f), Some(cb)) = (self.focused, &self.options.on_leave_card) {
                if let Some(card) = self.model.get(f) {
                    cb(f, card.id);
                }
            }
        }
        self.focused = None;

        let content_y = touch_y + self.camera_for_layout();
        let position = self.model.get(index).map(|c| c.position).unwrap_or(0.0);
        let drag = EditDrag {
            index,
            cursor: position,
            grab_dy: content_y - position,
        };
        if let Some(card) = self.model.get_mut(index) {
            card.alpha = self.options.edit_alpha;
        }
        self.editing = Some(drag);
        self.state = State::Edit;
        sdebug!(index, grab_dy = drag.grab_dy, "edit begin");

        // Settle everything else under the frozen camera so the lifted card
        // is the only thing out of place.
        self.retarget_displaced_cards(now_ms);
        self.emit();
    }

    /// Drops the dragged card at its current slot and animates the whole
    /// stack back to the settled layout.
    fn end_edit(&mut self, now_ms: u64) {
        let Some(drag) = self.editing.take() else {
            self.state = State::List;
            return;
        };
        if let Some(card) = self.model.get_mut(drag.index) {
            card.alpha = 1.0;
        }
        self.state = State::List;
        for i in 0..self.model.len() {
            let target = self.stacked_slot_target(i);
            if let Some(card) = self.model.get_mut(i) {
                card.target = target;
            }
        }
        self.model.capture_origins();
        self.position_adjust.awake(now_ms);
        sdebug!(index = drag.index, "edit drop");
        self.emit();
    }

    /// Recomputes stacked targets for every card except the dragged one and
    /// kicks the adjust animator; the dragged card keeps tracking the
    /// cursor.
    fn retarget_displaced_cards(&mut self, now_ms: u64) {
        let dragged = self.editing.map(|e| e.index);
        for i in 0..self.model.len() {
            if Some(i) == dragged {
                continue;
            }
            let target = self.stacked_slot_target(i);
            if let Some(card) = self.model.get_mut(i) {
                card.origin = card.position;
                card.target = target;
            }
        }
        self.position_adjust.awake(now_ms);
    }

    // ---- per-frame update -------------------------------------------------

    /// Advances all animations by one frame. Returns `true` when anything
    /// moved (and render commands were emitted).
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let mut changed = false;
        changed |= self.tick_intro(now_ms);
        changed |= self.tick_list_to_single(now_ms);
        changed |= self.tick_single_to_list(now_ms);
        changed |= self.tick_camera_bounce(now_ms);
        changed |= self.tick_position_adjust(now_ms);
        if changed {
            self.emit();
        }
        changed
    }

    fn eased(&self, t: f32) -> f32 {
        self.options.easing.sample(t)
    }

    fn tick_intro(&mut self, now_ms: u64) -> bool {
        match self.intro.tick(now_ms) {
            Tick::Idle => false,
            Tick::Running(t) => {
                let e = self.eased(t);
                self.intro_scale = e;
                for card in self.model.cards_mut() {
                    card.alpha = e;
                }
                self.recompute_list_positions();
                true
            }
            Tick::Finished => {
                self.intro_scale = 1.0;
                for card in self.model.cards_mut() {
                    card.alpha = 1.0;
                }
                self.state = State::List;
                self.recompute_list_positions();
                sdebug!("intro settled");
                true
            }
        }
    }

    fn tick_list_to_single(&mut self, now_ms: u64) -> bool {
        match self.list_to_single.tick(now_ms) {
            Tick::Idle => false,
            Tick::Running(t) => {
                let e = self.eased(t);
                self.apply_transition(e);
                true
            }
            Tick::Finished => {
                self.apply_transition(1.0);
                self.state = State::Single;
                sdebug!(focused = ?self.focused, "single settled");
                true
            }
        }
    }

    fn tick_single_to_list(&mut self, now_ms: u64) -> bool {
        match self.single_to_list.tick(now_ms) {
            Tick::Idle => false,
            Tick::Running(t) => {
                let e = self.eased(t);
                self.apply_transition(e);
                true
            }
            Tick::Finished => {
                self.apply_transition(1.0);
                self.focused = None;
                self.state = State::List;
                sdebug!("list settled");
                true
            }
        }
    }

    fn tick_camera_bounce(&mut self, now_ms: u64) -> bool {
        match self.camera_bounce.tick(now_ms) {
            Tick::Idle => false,
            Tick::Running(t) => {
                let e = self.eased(t);
                self.camera_y = lerp(self.camera_y_origin, self.camera_y_target, e);
                if self.state == State::List {
                    self.recompute_list_positions();
                }
                true
            }
            Tick::Finished => {
                self.camera_y = self.camera_y_target;
                if self.state == State::List {
                    self.recompute_list_positions();
                }
                true
            }
        }
    }

    fn tick_position_adjust(&mut self, now_ms: u64) -> bool {
        match self.position_adjust.tick(now_ms) {
            Tick::Idle => false,
            Tick::Running(t) => {
                let e = self.eased(t);
                let dragged = self.editing.map(|d| d.index);
                for (i, card) in self.model.cards_mut().iter_mut().enumerate() {
                    if Some(i) == dragged {
                        continue;
                    }
                    card.position = lerp(card.origin, card.target, e);
                }
                true
            }
            Tick::Finished => {
                let dragged = self.editing.map(|d| d.index);
                for (i, card) in self.model.cards_mut().iter_mut().enumerate() {
                    if Some(i) == dragged {
                        continue;
                    }
                    card.position = card.target;
                }
                true
            }
        }
    }

    /// Interpolates camera + every card from captured origins toward the
    /// transition targets.
    fn apply_transition(&mut self, e: f32) {
        self.camera_y = lerp(self.camera_y_origin, self.camera_y_target, e);
        for card in self.model.cards_mut() {
            card.position = lerp(card.origin, card.target, e);
        }
    }

    /// List-state recompute: items below the scroll line stack at
    /// `stacked_height` increments; items pushed up by the scroll pin at
    /// the camera. Idempotent for a fixed camera.
    fn recompute_list_positions(&mut self) {
        if !self.layout_ready() {
            return;
        }
        let stacked = self.stacked_height();
        let cam = self.clamped_camera();
        for (i, card) in self.model.cards_mut().iter_mut().enumerate() {
            let p = (i as f32 * stacked).max(cam);
            card.position = p;
            card.target = p;
        }
    }

    fn destroy_all_animators(&mut self) {
        self.intro.destroy();
        self.list_to_single.destroy();
        self.single_to_list.destroy();
        self.camera_bounce.destroy();
        self.position_adjust.destroy();
    }

    // ---- render emission ---------------------------------------------------

    /// Visits the current placement of every card, top of the list first,
    /// without allocating.
    pub fn for_each_render_command(&self, mut f: impl FnMut(RenderCommand)) {
        let cam = self.camera_for_layout();
        let lifted = self.editing.map(|e| e.index);
        let count = self.model.len() as u32;
        for (i, card) in self.model.cards().iter().enumerate() {
            let elevation = if Some(i) == lifted { count } else { i as u32 };
            f(RenderCommand {
                index: i,
                id: card.id,
                offset: card.position - cam,
                alpha: card.alpha,
                elevation,
            });
        }
    }

    /// Collects render commands into `out` (clears `out` first).
    ///
    /// Convenience wrapper around [`Self::for_each_render_command`]; reuse
    /// the buffer in your adapter for zero steady-state allocation.
    pub fn collect_render_commands(&self, out: &mut Vec<RenderCommand>) {
        out.clear();
        self.for_each_render_command(|cmd| out.push(cmd));
    }

    fn emit(&self) {
        if let Some(cb) = &self.options.on_render {
            self.for_each_render_command(|cmd| cb(cmd));
        }
    }
}
