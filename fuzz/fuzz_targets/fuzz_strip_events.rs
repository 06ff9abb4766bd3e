#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pstrip_core::capture::PointerCapture;
use pstrip_core::event::{Modifiers, MouseButton, MouseEvent, MouseEventKind};
use pstrip_core::geometry::Rect;
use pstrip_render::frame::Frame;
use pstrip_widgets::{StatefulWidget, StatusStrip, StatusStripState, StripResult};

#[derive(Debug, Arbitrary)]
enum Kind {
    Down,
    Drag,
    Move,
    Up,
}

#[derive(Debug, Arbitrary)]
enum Button {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Arbitrary)]
struct Event {
    kind: Kind,
    button: Button,
    x: u8,
    y: u8,
    shift: bool,
}

#[derive(Debug, Arbitrary)]
struct Input {
    count: u8,
    width: u8,
    clickable: bool,
    selectable: bool,
    events: Vec<Event>,
}

fuzz_target!(|input: Input| {
    if input.events.len() > 256 || input.width == 0 {
        return;
    }
    let names: Vec<String> = (0..input.count).map(|i| format!("p{i}")).collect();
    let mut selected: Vec<String> = Vec::new();
    let capture = PointerCapture::new();
    let mut state = StatusStripState::new(&capture);
    let width = u16::from(input.width);

    for event in &input.events {
        let button = match event.button {
            Button::Left => MouseButton::Left,
            Button::Right => MouseButton::Right,
            Button::Middle => MouseButton::Middle,
        };
        let kind = match event.kind {
            Kind::Down => MouseEventKind::Down(button),
            Kind::Drag => MouseEventKind::Drag(button),
            Kind::Move => MouseEventKind::Moved,
            Kind::Up => MouseEventKind::Up(button),
        };
        let modifiers = if event.shift { Modifiers::SHIFT } else { Modifiers::NONE };
        let mouse = MouseEvent::new(kind, u16::from(event.x), u16::from(event.y)).with_modifiers(modifiers);

        let result = {
            let mut strip = StatusStrip::new(&names).clickable(input.clickable);
            if input.selectable {
                strip = strip.selected(&selected);
            }
            let height = strip.height();
            let mut frame = Frame::with_hit_grid(width, height);
            strip.render(Rect::from_size(width, height), &mut frame, &mut state);
            state.handle_mouse(&strip, &mouse)
        };

        if let StripResult::Released { selection, click } = result {
            if let Some(change) = selection {
                assert!(change.selection.iter().all(|name| names.contains(name)));
                selected = change.selection;
            }
            if let Some(name) = click {
                assert!(input.clickable && names.contains(&name));
            }
        }
        // The capture is held exactly while a press is outstanding.
        assert_eq!(capture.is_held(), state.is_pressed());
    }

    drop(state);
    assert!(!capture.is_held());
});
