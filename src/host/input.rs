//! SDL2 mouse input for imgui
//!
//! Events go into imgui's input queue as they arrive; imgui applies them at
//! the start of the next frame, one button transition per frame, so a press
//! and release within one poll still register as a click.

use imgui::{Io, MouseButton as ImguiButton};
use sdl2::event::{Event, WindowEvent};
use sdl2::mouse::MouseButton;

/// Mouse position imgui treats as "no mouse"
const MOUSE_ABSENT: [f32; 2] = [-f32::MAX, -f32::MAX];

/// Maps an SDL2 button to its imgui counterpart
fn imgui_button(button: MouseButton) -> Option<ImguiButton> {
    match button {
        MouseButton::Left => Some(ImguiButton::Left),
        MouseButton::Right => Some(ImguiButton::Right),
        MouseButton::Middle => Some(ImguiButton::Middle),
        MouseButton::X1 => Some(ImguiButton::Extra1),
        MouseButton::X2 => Some(ImguiButton::Extra2),
        MouseButton::Unknown => None,
    }
}

/// Queues an SDL2 event on `io`; returns false for events that are not mouse input
pub fn handle_event(io: &mut Io, event: &Event) -> bool {
    match *event {
        Event::MouseMotion { x, y, .. } => io.add_mouse_pos_event([x as f32, y as f32]),
        Event::MouseButtonDown { mouse_btn, x, y, .. } => {
            io.add_mouse_pos_event([x as f32, y as f32]);
            if let Some(button) = imgui_button(mouse_btn) {
                io.add_mouse_button_event(button, true);
            }
        }
        Event::MouseButtonUp { mouse_btn, x, y, .. } => {
            io.add_mouse_pos_event([x as f32, y as f32]);
            if let Some(button) = imgui_button(mouse_btn) {
                io.add_mouse_button_event(button, false);
            }
        }
        Event::MouseWheel { x, y, .. } => io.add_mouse_wheel_event([x as f32, y as f32]),
        Event::Window {
            win_event: WindowEvent::Leave,
            ..
        } => io.add_mouse_pos_event(MOUSE_ABSENT),
        _ => return false,
    }
    true
}
