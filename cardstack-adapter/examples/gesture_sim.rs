//! Scripted pointer trace through the controller: tap a card open,
//! dismiss it with a drag, then hold-and-drag to reorder.
//!
//! Run with: `cargo run -p cardstack-adapter --example gesture_sim`

use cardstack::StackOptions;
use cardstack_adapter::{Controller, PointerEvent};

fn run_until_settled(ctl: &mut Controller, mut now: u64) -> u64 {
    while ctl.stack().is_animating() {
        now += 16;
        ctl.tick(now);
    }
    now
}

fn dump(label: &str, ctl: &Controller) {
    println!("-- {label} (state {:?})", ctl.stack().state());
    ctl.stack().for_each_render_command(|cmd| {
        println!("   card {} (id {}): offset {:>7.2}", cmd.index, cmd.id, cmd.offset);
    });
}

fn main() {
    let mut ctl = Controller::new(StackOptions::new(5, 100.0, 100.0));
    ctl.stack_mut().skip_intro();
    dump("settled list", &ctl);

    // Tap the third card. The tap confirms after the double-tap window.
    ctl.on_pointer_event(PointerEvent::down(0.0, 45.0, 0));
    ctl.on_pointer_event(PointerEvent::up(0.0, 45.0, 30));
    ctl.tick(400);
    let now = run_until_settled(&mut ctl, 400);
    dump("tapped card 2 open", &ctl);

    // Drag it down past the dismiss threshold and let go.
    ctl.on_pointer_event(PointerEvent::down(0.0, 50.0, now));
    ctl.on_pointer_event(PointerEvent::moved(0.0, 120.0, now + 16));
    ctl.on_pointer_event(PointerEvent::up(0.0, 120.0, now + 32));
    let now = run_until_settled(&mut ctl, now + 32);
    dump("dismissed back to the list", &ctl);

    // Hold the bottom card until the long press fires, drag it one slot
    // up, drop.
    ctl.on_pointer_event(PointerEvent::down(0.0, 45.0, now));
    ctl.tick(now + 500);
    println!("-- long press fired, editing {:?}", ctl.stack().editing_item());
    ctl.on_pointer_event(PointerEvent::moved(0.0, 15.0, now + 516));
    ctl.on_pointer_event(PointerEvent::up(0.0, 15.0, now + 532));
    run_until_settled(&mut ctl, now + 532);
    dump("reordered", &ctl);
}
