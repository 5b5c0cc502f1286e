/// Interaction resolver: turns one input event into PuzzleState rule calls.
///
/// Modal exclusivity is strict. While a prompt is open, pointer input is
/// dropped entirely and keystrokes go to the text buffer; while no prompt is
/// open, keystrokes other than Esc are dropped.

use std::time::Duration;

use crate::domain::event::GameEvent;
use crate::domain::geometry::{GeometryCatalog, ObjectId, Point};
use crate::domain::puzzle::{InputMode, PuzzleState};

/// Keys the game understands.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum KeyInput {
    Confirm,
    Backspace,
    /// Esc: closes an open prompt, otherwise requests quit.
    Cancel,
    Char(char),
}

/// Input already translated into the virtual 1024×768 space.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputEvent {
    Click(Point),
    /// Pointer motion without a button.
    Hover(Point),
    Key(KeyInput),
    Quit,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Resolution {
    Applied,
    Ignored,
    Quit,
}

pub fn resolve(
    state: &mut PuzzleState,
    catalog: &GeometryCatalog,
    input: InputEvent,
    now: Duration,
    events: &mut Vec<GameEvent>,
) -> Resolution {
    let free = state.input_mode() == InputMode::Free;

    match input {
        InputEvent::Quit => Resolution::Quit,

        InputEvent::Click(_) | InputEvent::Hover(_) if !free => Resolution::Ignored,

        InputEvent::Click(p) => match catalog.hit_test(state.current_room(), p) {
            Some(obj) => {
                dispatch_click(state, obj, now, events);
                Resolution::Applied
            }
            None => Resolution::Ignored,
        },

        // Only the key item reacts to hover.
        InputEvent::Hover(p) => match catalog.hit_test(state.current_room(), p) {
            Some(ObjectId::KeyItem) => {
                state.click_key_item(now, events);
                Resolution::Applied
            }
            _ => Resolution::Ignored,
        },

        InputEvent::Key(KeyInput::Cancel) if free => Resolution::Quit,
        InputEvent::Key(_) if free => Resolution::Ignored,

        InputEvent::Key(key) => {
            match key {
                KeyInput::Confirm => state.submit_text(events),
                KeyInput::Backspace => state.backspace(),
                KeyInput::Cancel => state.cancel_prompt(events),
                KeyInput::Char(c) => state.append_char(c),
            }
            Resolution::Applied
        }
    }
}

fn dispatch_click(state: &mut PuzzleState, obj: ObjectId, now: Duration, events: &mut Vec<GameEvent>) {
    match obj {
        ObjectId::Door | ObjectId::FinalDoor => state.click_door(events),
        ObjectId::Box => state.click_riddle_box(events),
        ObjectId::Painting => state.click_painting(),
        ObjectId::ColorBlock(i) => state.click_color_block(i, events),
        ObjectId::PuzzleDevice => state.click_puzzle_device(now, events),
        ObjectId::KeyItem => state.click_key_item(now, events),
    }
}
