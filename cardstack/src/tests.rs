use crate::*;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_f32(&mut self, start: f32, end: f32) -> f32 {
        let unit = (self.next_u64() >> 11) as f32 / (1u64 << 53) as f32;
        start + (end - start) * unit
    }
}

fn assert_close(a: f32, b: f32) {
    assert!((a - b).abs() < 1e-3, "expected {b}, got {a}");
}

fn opts(count: usize) -> StackOptions {
    // item_height 100, container 100, ratio 0.2 -> stacked 20,
    // camera_max = 20*count - 20.
    StackOptions::new(count, 100.0, 100.0).with_easing(Easing::Linear)
}

fn settled(count: usize) -> CardStack {
    let mut stack = CardStack::new(opts(count));
    stack.skip_intro();
    stack
}

fn to_single(stack: &mut CardStack, index: usize, now_ms: u64) {
    let stacked = stack.stacked_height();
    stack.on_tap_confirmed(index as f32 * stacked + 1.0, now_ms);
    assert_eq!(stack.state(), State::ListToSingle);
    assert!(!stack.state().is_stable());
    stack.tick(now_ms + stack.options().list_to_single_ms);
    assert_eq!(stack.state(), State::Single);
    assert!(stack.state().is_stable());
}

// ---- animator -------------------------------------------------------------

#[test]
fn animator_premature_destroy_reports_once() {
    let mut a = Animator::new(100);
    a.awake(0);
    assert_eq!(a.tick(50), Tick::Running(0.5));
    assert!(a.destroy());
    assert_eq!(a.tick(60), Tick::Idle);
    assert!(!a.destroy());
}

#[test]
fn animator_natural_completion_finishes_once() {
    let mut a = Animator::new(100);
    a.awake(0);
    assert_eq!(a.tick(100), Tick::Finished);
    assert_eq!(a.tick(150), Tick::Idle);
    assert!(!a.destroy());
}

#[test]
fn animator_restarts_after_destroy() {
    let mut a = Animator::new(100);
    a.awake(0);
    a.destroy();
    a.awake(200);
    assert_eq!(a.tick(250), Tick::Running(0.5));
    // Re-awaking while running resets the origin.
    a.awake(300);
    assert_eq!(a.tick(350), Tick::Running(0.5));
}

#[test]
fn animator_zero_duration_is_clamped() {
    let mut a = Animator::new(0);
    assert_eq!(a.duration_ms(), 1);
    a.awake(10);
    assert_eq!(a.tick(11), Tick::Finished);
}

// ---- interpolation ----------------------------------------------------------

#[test]
fn lerp_and_inverse_roundtrip() {
    assert_close(lerp(10.0, 20.0, 0.25), 12.5);
    assert_close(inverse_lerp(10.0, 20.0, 12.5), 0.25);
    assert_close(inverse_lerp(5.0, 5.0, 7.0), 0.0);
}

#[test]
fn easing_endpoints_are_fixed() {
    for easing in [Easing::Linear, Easing::SmoothStep, Easing::EaseInOutCubic] {
        assert_close(easing.sample(0.0), 0.0);
        assert_close(easing.sample(1.0), 1.0);
    }
}

// ---- list state ----------------------------------------------------------

#[test]
fn settled_positions_respect_stack_order() {
    let mut stack = settled(5);
    let stacked = stack.stacked_height();
    for i in 0..5 {
        assert_close(stack.position(i).unwrap(), i as f32 * stacked);
        assert!(stack.position(i).unwrap() >= i as f32 * stacked);
    }
    stack.on_scroll(0.0, 50.0);
    for i in 0..5 {
        assert!(stack.position(i).unwrap() >= i as f32 * stack.stacked_height());
    }
}

#[test]
fn scroll_scenario_five_items() {
    let mut stack = settled(5);
    assert_close(stack.camera_max(), 80.0);
    stack.on_scroll(0.0, 50.0);
    assert_close(stack.camera_y(), 50.0);
    for i in 0..5 {
        assert_close(stack.position(i).unwrap(), (i as f32 * 20.0).max(50.0));
    }
    assert_close(stack.position(4).unwrap(), 80.0);
}

#[test]
fn recompute_is_idempotent() {
    let mut stack = settled(5);
    stack.on_scroll(0.0, 37.5);
    let mut first = Vec::new();
    stack.collect_render_commands(&mut first);
    stack.on_scroll(0.0, 0.0);
    let mut second = Vec::new();
    stack.collect_render_commands(&mut second);
    assert_eq!(first, second);
}

#[test]
fn camera_clamps_and_bounces_back() {
    let mut stack = settled(5);
    stack.on_touch_down(0.0, 0.0, 0);
    stack.on_scroll(0.0, 1000.0);
    assert_close(stack.camera_y(), 1000.0);
    // Render camera is pinned to the clamp; the over-scroll only shows as
    // stretch.
    let mut out = Vec::new();
    stack.collect_render_commands(&mut out);
    assert_close(out[4].offset, stack.position(4).unwrap() - 80.0);

    stack.on_touch_up(100);
    stack.tick(100 + stack.options().camera_bounce_ms);
    assert_close(stack.camera_y(), 80.0);
    assert_close(stack.stacked_height(), 20.0);
}

#[test]
fn elastic_stretch_compresses_stacked_height() {
    let mut stack = settled(5);
    stack.on_scroll(0.0, 100.0); // 20 past camera_max
    assert_close(stack.stacked_height(), 20.0 - 0.5 * 20.0);
    stack.on_scroll(0.0, 10_000.0);
    assert!(stack.stacked_height() >= 1.0);
}

#[test]
fn random_scrolls_keep_positions_ordered() {
    let mut rng = Lcg::new(0xC0FFEE);
    let mut stack = settled(8);
    for _ in 0..200 {
        stack.on_scroll(0.0, rng.gen_f32(-60.0, 60.0));
        let stacked = stack.stacked_height();
        for i in 0..8 {
            let p = stack.position(i).unwrap();
            assert!(p >= i as f32 * stacked - 1e-3);
            assert!(p + 1e-3 >= stack.position(i.saturating_sub(1)).unwrap());
        }
    }
}

#[test]
fn hit_test_inverts_settled_layout() {
    let stack = settled(5);
    for i in 0..5usize {
        for eps in [0.0, 5.0, 19.9] {
            assert_eq!(stack.hit_test(i as f32 * 20.0 + eps), Some(i));
        }
    }
    // Touching the exposed body of the last card still resolves to it.
    assert_eq!(stack.hit_test(150.0), Some(4));
    assert_eq!(stack.hit_test(-1.0), None);
    assert_eq!(stack.hit_test(181.0), None);
}

// ---- intro ---------------------------------------------------------------

#[test]
fn intro_fades_and_settles_into_list() {
    let mut stack = CardStack::new(opts(4));
    stack.begin_intro(0);
    assert_eq!(stack.state(), State::Intro);
    assert_close(stack.cards()[0].alpha, 0.0);

    stack.tick(500);
    assert_eq!(stack.state(), State::Intro);
    assert_close(stack.cards()[3].alpha, 0.5);
    assert_close(stack.stacked_height(), 10.0);

    stack.tick(1000);
    assert_eq!(stack.state(), State::List);
    for (i, card) in stack.cards().iter().enumerate() {
        assert_close(card.alpha, 1.0);
        assert_close(card.position, i as f32 * 20.0);
    }
}

// ---- single-card view --------------------------------------------------------

#[test]
fn tap_expands_card_and_pushes_rest_off_screen() {
    let entered = Arc::new(AtomicUsize::new(usize::MAX));
    let entered_cb = Arc::clone(&entered);
    let mut stack = CardStack::new(
        opts(5).with_on_enter_card(Some(move |index, _id| {
            entered_cb.store(index, Ordering::SeqCst);
        })),
    );
    stack.skip_intro();

    to_single(&mut stack, 2, 0);
    assert_eq!(entered.load(Ordering::SeqCst), 2);
    assert_eq!(stack.focused_item(), Some(2));
    assert_close(stack.camera_y(), 40.0);

    let mut out = Vec::new();
    stack.collect_render_commands(&mut out);
    // Focused card sits at the camera; everything below it is pushed at
    // least one container height away.
    assert_close(out[2].offset, 0.0);
    for cmd in &out[3..] {
        assert!(cmd.offset >= 100.0);
    }
}

#[test]
fn small_drift_snaps_back_large_drift_dismisses() {
    let left = Arc::new(AtomicUsize::new(0));
    let left_cb = Arc::clone(&left);
    let mut stack = CardStack::new(
        opts(5).with_on_leave_card(Some(move |_index, _id| {
            left_cb.fetch_add(1, Ordering::SeqCst);
        })),
    );
    stack.skip_intro();
    to_single(&mut stack, 2, 0);

    // Below the dismiss threshold (item_height / 2): bounce back.
    stack.on_touch_down(0.0, 0.0, 2000);
    stack.on_scroll(0.0, 30.0);
    stack.on_touch_up(2000);
    assert_eq!(stack.state(), State::Single);
    stack.tick(2000 + stack.options().camera_bounce_ms);
    assert_close(stack.camera_y(), 40.0);
    assert_eq!(left.load(Ordering::SeqCst), 0);

    // Beyond it: dismiss back to the list.
    stack.on_touch_down(0.0, 0.0, 3000);
    stack.on_scroll(0.0, 60.0);
    stack.on_touch_up(3000);
    assert_eq!(stack.state(), State::SingleToList);
    assert!(!stack.state().is_stable());
    assert_eq!(left.load(Ordering::SeqCst), 1);
    stack.tick(3000 + stack.options().single_to_list_ms);
    assert_eq!(stack.state(), State::List);
    assert_eq!(stack.focused_item(), None);
    for i in 0..5 {
        assert_close(stack.position(i).unwrap(), (i as f32 * 20.0).max(40.0));
    }
}

#[test]
fn tap_in_single_confirms_detail_entry() {
    let detail = Arc::new(AtomicUsize::new(usize::MAX));
    let detail_cb = Arc::clone(&detail);
    let mut stack = CardStack::new(
        opts(5).with_on_enter_detail_confirmed(Some(move |index| {
            detail_cb.store(index, Ordering::SeqCst);
        })),
    );
    stack.skip_intro();
    to_single(&mut stack, 1, 0);

    stack.on_tap_confirmed(50.0, 2000);
    assert_eq!(detail.load(Ordering::SeqCst), 1);
    assert_eq!(stack.state(), State::Single);
}

// ---- edit / drag-reorder ---------------------------------------------------

#[test]
fn drag_past_midpoint_swaps_neighbors() {
    let mut stack = settled(5);
    let ids: Vec<_> = stack.cards().iter().map(|c| c.id).collect();

    stack.on_long_press(45.0, 0);
    assert_eq!(stack.state(), State::Edit);
    assert_eq!(stack.editing_item(), Some(2));

    // Dragged card is lifted above everything and dimmed.
    let mut out = Vec::new();
    stack.collect_render_commands(&mut out);
    assert_eq!(out[2].elevation, 5);
    assert_close(out[2].alpha, stack.options().edit_alpha);

    // Cursor at 51 crosses the midpoint of slot 3 (floor((51+10)/20) = 3).
    stack.on_edit_move(56.0, 16);
    assert_eq!(stack.editing_item(), Some(3));
    let reordered: Vec<_> = stack.cards().iter().map(|c| c.id).collect();
    assert_eq!(
        reordered,
        vec![ids[0], ids[1], ids[3], ids[2], ids[4]],
        "order must be [0,1,3,2,4]"
    );
    // The dragged card keeps tracking the live cursor.
    assert_close(stack.position(3).unwrap(), 51.0);

    stack.on_touch_up(100);
    assert_eq!(stack.state(), State::List);
    assert_eq!(stack.editing_item(), None);
    stack.tick(100 + stack.options().position_adjust_ms);
    stack.collect_render_commands(&mut out);
    for (i, cmd) in out.iter().enumerate() {
        assert_eq!(cmd.elevation, i as u32);
        assert_close(cmd.alpha, 1.0);
        assert_close(stack.position(i).unwrap(), i as f32 * 20.0);
    }
}

#[test]
fn drag_to_top_and_bottom_clamps_to_valid_slots() {
    let mut stack = settled(4);
    stack.on_long_press(45.0, 0);
    stack.on_edit_move(-500.0, 16);
    assert_eq!(stack.editing_item(), Some(0));
    stack.on_edit_move(500.0, 32);
    assert_eq!(stack.editing_item(), Some(3));
    stack.on_touch_up(48);
    stack.tick(48 + stack.options().position_adjust_ms);
    assert_eq!(stack.state(), State::List);
}

#[test]
fn long_press_after_interrupted_bounce_keeps_the_grabbed_slot() {
    let mut stack = settled(5);
    stack.on_touch_down(0.0, 0.0, 0);
    stack.on_scroll(0.0, -20.0);
    stack.on_touch_up(16);
    assert!(stack.is_animating());

    // A new touch legally cancels the bounce, leaving the raw camera
    // outside the clamp.
    stack.on_touch_down(0.0, 0.0, 32);
    assert_close(stack.camera_y(), -20.0);

    // Under the stretched layout (stacked 10) y = 25 lands on row 2.
    stack.on_long_press(25.0, 48);
    assert_eq!(stack.state(), State::Edit);
    assert_eq!(stack.editing_item(), Some(2));
    // Entering Edit relaxed the over-scroll.
    assert_close(stack.camera_y(), 0.0);

    // A 1 px nudge must not reorder.
    stack.on_edit_move(26.0, 64);
    assert_eq!(stack.editing_item(), Some(2));

    stack.on_touch_up(80);
    stack.tick(80 + stack.options().position_adjust_ms);
    assert_eq!(stack.state(), State::List);
    for i in 0..5 {
        assert_close(stack.position(i).unwrap(), i as f32 * 20.0);
    }
}

#[test]
fn long_press_from_single_lifts_focused_card() {
    let mut stack = settled(5);
    to_single(&mut stack, 2, 0);
    stack.on_long_press(10.0, 2000);
    assert_eq!(stack.state(), State::Edit);
    assert_eq!(stack.editing_item(), Some(2));
    assert_eq!(stack.focused_item(), None);
    // Displaced cards animate back toward stacked slots while dragging.
    assert!(stack.is_animating());
}

// ---- population ------------------------------------------------------------

#[test]
fn new_binds_every_card() {
    let bound = Arc::new(AtomicUsize::new(0));
    let bound_cb = Arc::clone(&bound);
    let _stack = CardStack::new(opts(5).with_on_bind(Some(move |_index, _id| {
        bound_cb.fetch_add(1, Ordering::SeqCst);
    })));
    assert_eq!(bound.load(Ordering::SeqCst), 5);
}

#[test]
fn double_tap_appends_a_card() {
    let mut stack = settled(5);
    stack.on_double_tap(0.0, 0);
    assert_eq!(stack.card_count(), 6);
    assert_close(stack.position(5).unwrap(), 100.0);
    // Only meaningful while browsing the list.
    to_single(&mut stack, 0, 100);
    stack.on_double_tap(0.0, 5000);
    assert_eq!(stack.card_count(), 6);
}

#[test]
fn populate_resizes_and_settles() {
    let mut stack = settled(5);
    stack.populate(3);
    assert_eq!(stack.card_count(), 3);
    for i in 0..3 {
        assert_close(stack.position(i).unwrap(), i as f32 * 20.0);
    }
    stack.populate(6);
    assert_eq!(stack.card_count(), 6);
    assert!(!stack.is_animating());
}

#[test]
fn populate_mid_transition_recovers_to_list() {
    let mut stack = settled(5);
    stack.on_tap_confirmed(45.0, 0);
    assert_eq!(stack.state(), State::ListToSingle);
    stack.populate(2);
    assert_eq!(stack.state(), State::List);
    assert_eq!(stack.focused_item(), None);
    assert!(!stack.is_animating());
}

#[test]
fn zero_item_height_short_circuits() {
    let mut stack = CardStack::new(StackOptions::new(5, 0.0, 100.0));
    stack.skip_intro();
    stack.on_scroll(0.0, 50.0);
    assert_eq!(stack.hit_test(10.0), None);
    for i in 0..5 {
        assert_close(stack.position(i).unwrap(), 0.0);
    }
    // Once the host reports a real measurement, layout resumes.
    stack.set_item_height(100.0);
    assert_close(stack.position(4).unwrap(), (4.0 * 20.0_f32).max(50.0));
}

#[test]
fn render_commands_report_ids_and_indexes() {
    let stack = settled(3);
    let mut out = Vec::new();
    stack.collect_render_commands(&mut out);
    assert_eq!(out.len(), 3);
    for (i, cmd) in out.iter().enumerate() {
        assert_eq!(cmd.index, i);
        assert_eq!(cmd.id, stack.cards()[i].id);
    }
}

#[test]
fn render_callback_fires_on_recompute() {
    let frames = Arc::new(AtomicUsize::new(0));
    let frames_cb = Arc::clone(&frames);
    let mut stack = CardStack::new(opts(3).with_on_render(Some(move |_cmd| {
        frames_cb.fetch_add(1, Ordering::SeqCst);
    })));
    stack.skip_intro();
    let after_setup = frames.load(Ordering::SeqCst);
    assert!(after_setup >= 3);
    stack.on_scroll(0.0, 10.0);
    assert_eq!(frames.load(Ordering::SeqCst), after_setup + 3);
}
