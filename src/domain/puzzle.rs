/// PuzzleState: the authoritative record of a running session.
///
/// Every mutation goes through one of the rule methods below. Each rule is
/// atomic: it either applies completely or leaves the state untouched, and
/// reports what happened by pushing `GameEvent`s.
///
/// Invariants held by construction:
///   - `current_room` only moves forward (Room1 → Room2 → Room3).
///   - Solved flags are write-once-true.
///   - `door_unlocked` is set in the same rule that sets `keypad_solved`.
///   - While `input_mode != Free`, scene clicks are ignored.
///   - `color_sequence_input` never stays longer than the target.

use std::time::Duration;

use super::event::GameEvent;
use super::geometry::Room;

// ── Texts ──

pub const MSG_RIDDLE: &str = "Riddle:'Another one?? Fine...my hardest one.... only asked 23 times 'What speaks without a mouth?' ";
pub const MSG_BOX_EMPTY: &str = "The box is empty now.";
pub const MSG_PAINTING_HINT: &str = "There's a note attached...It says 'Start with 1'";
pub const MSG_COLOR_SOLVED: &str = "You solved the painting puzzle! Found a clue!";
pub const MSG_COLOR_FAILED: &str = "Incorrect sequence. Try again!";
pub const MSG_CODE_PROMPT: &str = "Enter the 4-digit code.";
pub const MSG_ENTER_ROOM2: &str = "Entering Room 2...";
pub const MSG_ENTER_ROOM3: &str = "Final Room... something feels different...";
pub const MSG_DEVICE: &str = "You see a strange device...You touch it...Your head appears!";
pub const MSG_HOLOGRAM: &str = "The key... it's changing! Is this real?";
pub const MSG_RIDDLE_SOLVED: &str = "Correct! You found a key and a note....'End with 4'";
pub const MSG_RIDDLE_FAILED: &str = "Incorrect! Try again.";
pub const MSG_KEYPAD_SOLVED: &str = "Correct! The door is unlocked!";
pub const MSG_KEYPAD_FAILED: &str = "Wrong code. Try again.";

const RIDDLE_ANSWER: &str = "echo";
const KEYPAD_CODE: &str = "1234";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BlockColor {
    Red,
    Green,
    Blue,
}

impl BlockColor {
    /// Color of the block at `index` in the painting's block row.
    pub fn from_index(index: usize) -> Option<BlockColor> {
        match index {
            0 => Some(BlockColor::Red),
            1 => Some(BlockColor::Green),
            2 => Some(BlockColor::Blue),
            _ => None,
        }
    }
}

/// The winning order of the painting puzzle.
pub const COLOR_TARGET: [BlockColor; 3] = [BlockColor::Red, BlockColor::Green, BlockColor::Blue];

/// How keystrokes are interpreted.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputMode {
    Free,
    AwaitingRiddleAnswer,
    AwaitingKeypadCode,
}

#[derive(Clone, Debug)]
pub struct PuzzleState {
    current_room: Room,
    riddle_solved: bool,
    keypad_solved: bool,
    door_unlocked: bool,
    key_found: bool,
    painting_puzzle_solved: bool,
    escaped: bool,
    color_sequence_input: Vec<BlockColor>,
    input_mode: InputMode,
    pending_text: String,
    notification: String,
    hologram_trigger_time: Option<Duration>,
    lion_warning_time: Option<Duration>,
}

// ── Construction & queries ──

impl PuzzleState {
    pub fn new() -> Self {
        PuzzleState {
            current_room: Room::Room1,
            riddle_solved: false,
            keypad_solved: false,
            door_unlocked: false,
            key_found: false,
            painting_puzzle_solved: false,
            escaped: false,
            color_sequence_input: Vec::with_capacity(COLOR_TARGET.len() + 1),
            input_mode: InputMode::Free,
            pending_text: String::new(),
            notification: String::new(),
            hologram_trigger_time: None,
            lion_warning_time: None,
        }
    }

    pub fn current_room(&self) -> Room { self.current_room }
    #[cfg(test)]
    pub fn riddle_solved(&self) -> bool { self.riddle_solved }
    #[cfg(test)]
    pub fn keypad_solved(&self) -> bool { self.keypad_solved }
    pub fn door_unlocked(&self) -> bool { self.door_unlocked }
    pub fn key_found(&self) -> bool { self.key_found }
    pub fn painting_puzzle_solved(&self) -> bool { self.painting_puzzle_solved }
    pub fn escaped(&self) -> bool { self.escaped }
    pub fn color_sequence_input(&self) -> &[BlockColor] { &self.color_sequence_input }
    pub fn input_mode(&self) -> InputMode { self.input_mode }
    pub fn pending_text(&self) -> &str { &self.pending_text }
    pub fn notification(&self) -> &str { &self.notification }
    pub fn hologram_triggered(&self) -> bool { self.hologram_trigger_time.is_some() }
    pub fn hologram_trigger_time(&self) -> Option<Duration> { self.hologram_trigger_time }
    pub fn lion_warning_active(&self) -> bool { self.lion_warning_time.is_some() }

    fn is_free(&self) -> bool {
        self.input_mode == InputMode::Free
    }

    fn notify(&mut self, msg: &str) {
        self.notification.clear();
        self.notification.push_str(msg);
    }

    fn enter_mode(&mut self, mode: InputMode, prompt: &str) {
        self.input_mode = mode;
        self.pending_text.clear();
        self.notify(prompt);
    }

    fn advance_room(&mut self, events: &mut Vec<GameEvent>) {
        if let Some(to) = self.current_room.next() {
            self.current_room = to;
            events.push(GameEvent::RoomEntered(to));
        }
    }
}

impl Default for PuzzleState {
    fn default() -> Self {
        PuzzleState::new()
    }
}

// ══════════════════════════════════════════════════════════════
// Scene rules (ignored while a prompt is open)
// ══════════════════════════════════════════════════════════════

impl PuzzleState {
    pub fn click_riddle_box(&mut self, events: &mut Vec<GameEvent>) {
        if !self.is_free() { return; }
        if self.riddle_solved {
            self.notify(MSG_BOX_EMPTY);
        } else {
            self.enter_mode(InputMode::AwaitingRiddleAnswer, MSG_RIDDLE);
            events.push(GameEvent::RiddlePrompted);
        }
    }

    pub fn click_painting(&mut self) {
        if !self.is_free() { return; }
        self.notify(MSG_PAINTING_HINT);
    }

    pub fn click_color_block(&mut self, index: usize, events: &mut Vec<GameEvent>) {
        if !self.is_free() { return; }
        let Some(color) = BlockColor::from_index(index) else { return };

        self.color_sequence_input.push(color);
        events.push(GameEvent::ColorAppended(color));

        if self.color_sequence_input[..] == COLOR_TARGET[..] {
            self.painting_puzzle_solved = true;
            self.notify(MSG_COLOR_SOLVED);
            events.push(GameEvent::ColorPuzzleSolved);
        } else if self.color_sequence_input.len() > COLOR_TARGET.len() {
            self.color_sequence_input.clear();
            self.notify(MSG_COLOR_FAILED);
            events.push(GameEvent::ColorSequenceReset);
        }
    }

    /// The current room's door.
    ///
    /// Room 1 is gated by the keypad. Room 2's door has no gate. Room 3's
    /// door is the exit and ends the session.
    pub fn click_door(&mut self, events: &mut Vec<GameEvent>) {
        if !self.is_free() { return; }
        match self.current_room {
            Room::Room1 if !self.keypad_solved => {
                self.enter_mode(InputMode::AwaitingKeypadCode, MSG_CODE_PROMPT);
                events.push(GameEvent::KeypadPrompted);
            }
            Room::Room1 => {
                self.advance_room(events);
                self.notify(MSG_ENTER_ROOM2);
            }
            Room::Room2 => {
                self.advance_room(events);
                self.notify(MSG_ENTER_ROOM3);
            }
            Room::Room3 => {
                if !self.escaped {
                    self.escaped = true;
                    events.push(GameEvent::ExitReached);
                }
            }
        }
    }

    pub fn click_puzzle_device(&mut self, now: Duration, events: &mut Vec<GameEvent>) {
        if !self.is_free() || self.current_room != Room::Room2 { return; }
        if self.lion_warning_time.is_none() {
            self.lion_warning_time = Some(now);
            events.push(GameEvent::LionWarning);
        }
        self.notify(MSG_DEVICE);
    }

    /// Hovering or clicking the key: starts the hologram timer on first
    /// contact only.
    pub fn click_key_item(&mut self, now: Duration, events: &mut Vec<GameEvent>) {
        if !self.is_free() || self.current_room != Room::Room3 { return; }
        if self.hologram_trigger_time.is_none() {
            self.hologram_trigger_time = Some(now);
            events.push(GameEvent::HologramTriggered);
        }
        self.notify(MSG_HOLOGRAM);
    }
}

// ══════════════════════════════════════════════════════════════
// Text entry rules (only while a prompt is open)
// ══════════════════════════════════════════════════════════════

impl PuzzleState {
    pub fn append_char(&mut self, c: char) {
        if self.is_free() || c.is_control() { return; }
        self.pending_text.push(c);
    }

    pub fn backspace(&mut self) {
        if self.is_free() { return; }
        self.pending_text.pop();
    }

    /// Evaluate the pending text against the open prompt, then close it.
    pub fn submit_text(&mut self, events: &mut Vec<GameEvent>) {
        match self.input_mode {
            InputMode::Free => return,
            InputMode::AwaitingRiddleAnswer => {
                if self.pending_text.to_lowercase() == RIDDLE_ANSWER {
                    self.riddle_solved = true;
                    self.key_found = true;
                    self.notify(MSG_RIDDLE_SOLVED);
                    events.push(GameEvent::RiddleSolved);
                } else {
                    self.notify(MSG_RIDDLE_FAILED);
                    events.push(GameEvent::RiddleFailed);
                }
            }
            InputMode::AwaitingKeypadCode => {
                if self.pending_text == KEYPAD_CODE {
                    self.keypad_solved = true;
                    self.door_unlocked = true;
                    self.notify(MSG_KEYPAD_SOLVED);
                    events.push(GameEvent::KeypadSolved);
                } else {
                    self.notify(MSG_KEYPAD_FAILED);
                    events.push(GameEvent::KeypadFailed);
                }
            }
        }
        self.input_mode = InputMode::Free;
        self.pending_text.clear();
    }

    /// Close the prompt without evaluating it. The notification is kept.
    pub fn cancel_prompt(&mut self, events: &mut Vec<GameEvent>) {
        if self.is_free() { return; }
        self.input_mode = InputMode::Free;
        self.pending_text.clear();
        events.push(GameEvent::PromptCancelled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(s: &mut PuzzleState, text: &str) {
        for c in text.chars() {
            s.append_char(c);
        }
    }

    fn solve_keypad(s: &mut PuzzleState) {
        let mut ev = vec![];
        s.click_door(&mut ev);
        type_text(s, "1234");
        s.submit_text(&mut ev);
    }

    #[test]
    fn fresh_state() {
        let s = PuzzleState::new();
        assert_eq!(s.current_room(), Room::Room1);
        assert_eq!(s.input_mode(), InputMode::Free);
        assert!(!s.riddle_solved() && !s.keypad_solved() && !s.door_unlocked() && !s.key_found());
        assert!(!s.hologram_triggered() && !s.lion_warning_active() && !s.escaped());
        assert!(s.pending_text().is_empty());
        assert!(s.color_sequence_input().is_empty());
    }

    #[test]
    fn color_sequence_in_order_solves() {
        let mut s = PuzzleState::new();
        let mut ev = vec![];
        s.click_color_block(0, &mut ev);
        s.click_color_block(1, &mut ev);
        assert!(!s.painting_puzzle_solved());
        s.click_color_block(2, &mut ev);
        assert!(s.painting_puzzle_solved());
        assert_eq!(s.notification(), MSG_COLOR_SOLVED);
        assert!(ev.contains(&GameEvent::ColorPuzzleSolved));
    }

    #[test]
    fn wrong_sequence_resets_once_overlong() {
        let mut s = PuzzleState::new();
        let mut ev = vec![];
        for i in [2, 1, 0] {
            s.click_color_block(i, &mut ev);
        }
        // full length but wrong: waits for one more block
        assert_eq!(s.color_sequence_input().len(), 3);
        assert!(!s.painting_puzzle_solved());

        s.click_color_block(0, &mut ev);
        assert!(s.color_sequence_input().is_empty());
        assert_eq!(s.notification(), MSG_COLOR_FAILED);
        assert_eq!(ev.last(), Some(&GameEvent::ColorSequenceReset));
    }

    #[test]
    fn extra_block_after_solving_resets_but_keeps_flag() {
        let mut s = PuzzleState::new();
        let mut ev = vec![];
        for i in [0, 1, 2, 2] {
            s.click_color_block(i, &mut ev);
        }
        assert!(s.color_sequence_input().is_empty());
        assert!(s.painting_puzzle_solved());
    }

    #[test]
    fn out_of_range_block_is_ignored() {
        let mut s = PuzzleState::new();
        let mut ev = vec![];
        s.click_color_block(7, &mut ev);
        assert!(s.color_sequence_input().is_empty());
        assert!(ev.is_empty());
    }

    #[test]
    fn riddle_accepts_any_case() {
        let mut s = PuzzleState::new();
        let mut ev = vec![];
        s.click_riddle_box(&mut ev);
        assert_eq!(s.input_mode(), InputMode::AwaitingRiddleAnswer);
        assert_eq!(s.notification(), MSG_RIDDLE);

        type_text(&mut s, "EcHo");
        s.submit_text(&mut ev);
        assert!(s.riddle_solved() && s.key_found());
        assert_eq!(s.input_mode(), InputMode::Free);
        assert!(s.pending_text().is_empty());
        assert_eq!(s.notification(), MSG_RIDDLE_SOLVED);
    }

    #[test]
    fn riddle_wrong_answer() {
        let mut s = PuzzleState::new();
        let mut ev = vec![];
        s.click_riddle_box(&mut ev);
        type_text(&mut s, "echo ");
        s.submit_text(&mut ev);
        assert!(!s.riddle_solved() && !s.key_found());
        assert_eq!(s.input_mode(), InputMode::Free);
        assert_eq!(s.notification(), MSG_RIDDLE_FAILED);
    }

    #[test]
    fn box_is_empty_after_riddle() {
        let mut s = PuzzleState::new();
        let mut ev = vec![];
        s.click_riddle_box(&mut ev);
        type_text(&mut s, "echo");
        s.submit_text(&mut ev);
        s.click_riddle_box(&mut ev);
        assert_eq!(s.input_mode(), InputMode::Free);
        assert_eq!(s.notification(), MSG_BOX_EMPTY);
    }

    #[test]
    fn keypad_requires_exact_code() {
        let mut s = PuzzleState::new();
        let mut ev = vec![];
        s.click_door(&mut ev);
        type_text(&mut s, "12345");
        s.backspace();
        s.backspace();
        s.submit_text(&mut ev);
        assert!(!s.keypad_solved() && !s.door_unlocked());
        assert_eq!(s.notification(), MSG_KEYPAD_FAILED);

        solve_keypad(&mut s);
        assert!(s.keypad_solved() && s.door_unlocked());
    }

    #[test]
    fn door_gated_by_keypad() {
        let mut s = PuzzleState::new();
        let mut ev = vec![];
        s.click_door(&mut ev);
        assert_eq!(s.current_room(), Room::Room1);
        assert_eq!(s.input_mode(), InputMode::AwaitingKeypadCode);
        assert_eq!(s.notification(), MSG_CODE_PROMPT);

        type_text(&mut s, "1234");
        s.submit_text(&mut ev);
        assert_eq!(s.input_mode(), InputMode::Free);

        s.click_door(&mut ev);
        assert_eq!(s.current_room(), Room::Room2);
        assert_eq!(s.notification(), MSG_ENTER_ROOM2);
        assert_eq!(ev.last(), Some(&GameEvent::RoomEntered(Room::Room2)));
    }

    #[test]
    fn room2_door_is_ungated_and_room3_door_escapes() {
        let mut s = PuzzleState::new();
        let mut ev = vec![];
        solve_keypad(&mut s);
        s.click_door(&mut ev);
        s.click_door(&mut ev);
        assert_eq!(s.current_room(), Room::Room3);
        assert!(!s.escaped());

        s.click_door(&mut ev);
        assert!(s.escaped());
        assert_eq!(s.current_room(), Room::Room3);
        assert_eq!(ev.last(), Some(&GameEvent::ExitReached));
    }

    #[test]
    fn scene_clicks_ignored_while_prompt_open() {
        let mut s = PuzzleState::new();
        let mut ev = vec![];
        s.click_riddle_box(&mut ev);
        ev.clear();

        s.click_color_block(0, &mut ev);
        s.click_painting();
        s.click_door(&mut ev);
        assert!(ev.is_empty());
        assert!(s.color_sequence_input().is_empty());
        assert_eq!(s.input_mode(), InputMode::AwaitingRiddleAnswer);
        assert_eq!(s.notification(), MSG_RIDDLE);
    }

    #[test]
    fn typing_ignored_in_free_mode() {
        let mut s = PuzzleState::new();
        let mut ev = vec![];
        type_text(&mut s, "abc");
        s.backspace();
        s.submit_text(&mut ev);
        assert!(s.pending_text().is_empty());
        assert!(ev.is_empty());
    }

    #[test]
    fn cancel_closes_prompt() {
        let mut s = PuzzleState::new();
        let mut ev = vec![];
        s.click_door(&mut ev);
        type_text(&mut s, "12");
        s.cancel_prompt(&mut ev);
        assert_eq!(s.input_mode(), InputMode::Free);
        assert!(s.pending_text().is_empty());
        assert_eq!(s.notification(), MSG_CODE_PROMPT);
        assert!(!s.keypad_solved());
    }

    #[test]
    fn device_captures_time_once() {
        let mut s = PuzzleState::new();
        let mut ev = vec![];
        solve_keypad(&mut s);
        s.click_door(&mut ev);
        ev.clear();

        s.click_puzzle_device(Duration::from_millis(100), &mut ev);
        s.click_puzzle_device(Duration::from_millis(900), &mut ev);
        assert!(s.lion_warning_active());
        assert_eq!(ev, vec![GameEvent::LionWarning]);
        assert_eq!(s.notification(), MSG_DEVICE);
    }

    #[test]
    fn key_item_only_in_room3() {
        let mut s = PuzzleState::new();
        let mut ev = vec![];
        s.click_key_item(Duration::ZERO, &mut ev);
        assert!(!s.hologram_triggered());

        solve_keypad(&mut s);
        s.click_door(&mut ev);
        s.click_door(&mut ev);
        s.click_key_item(Duration::from_millis(500), &mut ev);
        s.click_key_item(Duration::from_millis(1500), &mut ev);
        assert_eq!(s.hologram_trigger_time(), Some(Duration::from_millis(500)));
        assert_eq!(ev.iter().filter(|e| **e == GameEvent::HologramTriggered).count(), 1);
        assert_eq!(s.notification(), MSG_HOLOGRAM);
    }
}
