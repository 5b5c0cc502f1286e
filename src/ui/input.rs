/// Input adapter.
///
/// Drains every pending crossterm event without blocking and translates
/// it into the game's `InputEvent`s:
///   - left button down      → Click   (snapped to the object under the cell)
///   - pointer motion        → Hover
///   - Enter / Backspace / Esc / printable keys → Key
///   - Ctrl+C                → Quit
/// Key releases, resizes, and anything outside the scene are dropped.

use std::time::Duration;

use crossterm::event::{
    self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::domain::geometry::RoomLayout;
use crate::sim::resolver::{InputEvent, KeyInput};
use super::layout::Layout;

pub struct InputState {
    events: Vec<InputEvent>,
}

impl InputState {
    pub fn new() -> Self {
        InputState {
            events: Vec::with_capacity(8),
        }
    }

    /// Drain all pending terminal events. Call once per frame.
    pub fn drain_events(&mut self, layout: &Layout, room: &RoomLayout) -> &[InputEvent] {
        self.events.clear();

        while poll(Duration::ZERO).unwrap_or(false) {
            match event::read() {
                Ok(ev) => {
                    if let Some(input) = translate(&ev, layout, room) {
                        self.events.push(input);
                    }
                }
                Err(e) => {
                    log::warn!("terminal event read failed: {e}");
                    break;
                }
            }
        }

        &self.events
    }
}

fn translate(ev: &Event, layout: &Layout, room: &RoomLayout) -> Option<InputEvent> {
    match ev {
        Event::Key(key) => translate_key(key),
        Event::Mouse(mouse) => translate_mouse(mouse, layout, room),
        _ => None,
    }
}

fn translate_key(key: &KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(InputEvent::Quit),
            _ => None,
        };
    }
    let k = match key.code {
        KeyCode::Enter => KeyInput::Confirm,
        KeyCode::Backspace => KeyInput::Backspace,
        KeyCode::Esc => KeyInput::Cancel,
        KeyCode::Char(c) if !c.is_control() => KeyInput::Char(c),
        _ => return None,
    };
    Some(InputEvent::Key(k))
}

fn translate_mouse(mouse: &MouseEvent, layout: &Layout, room: &RoomLayout) -> Option<InputEvent> {
    let point = layout.pointer(room, mouse.column as usize, mouse.row as usize)?;
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::Click(point)),
        MouseEventKind::Moved => Some(InputEvent::Hover(point)),
        _ => None,
    }
}
