//! Headless walkthrough: scroll a five-card stack, over-drag past the
//! clamp, release, and watch the rubber band settle.
//!
//! Run with: `cargo run -p cardstack --example scroll_sim`

use cardstack::{CardStack, StackOptions};

fn dump(label: &str, stack: &CardStack) {
    println!("-- {label} (state {:?}, camera {:.1})", stack.state(), stack.camera_y());
    stack.for_each_render_command(|cmd| {
        println!(
            "   card {} (id {}): offset {:>7.2}  alpha {:.2}  elevation {}",
            cmd.index, cmd.id, cmd.offset, cmd.alpha, cmd.elevation
        );
    });
}

fn main() {
    let mut stack = CardStack::new(StackOptions::new(5, 100.0, 100.0));
    stack.skip_intro();
    dump("settled list", &stack);

    stack.on_scroll(0.0, 50.0);
    dump("after scrolling 50", &stack);

    // Drag well past camera_max; the stack compresses elastically.
    stack.on_scroll(0.0, 100.0);
    println!(
        "-- over-dragged: raw camera {:.1}, stacked height {:.1}",
        stack.camera_y(),
        stack.stacked_height()
    );

    stack.on_touch_up(0);
    let mut now = 0;
    while stack.is_animating() {
        now += 16;
        stack.tick(now);
    }
    dump(&format!("released, settled after {now} ms"), &stack);
}
