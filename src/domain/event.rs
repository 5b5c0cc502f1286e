/// Events emitted while resolving input and timers.
/// The frame loop logs them; tests assert on them.

use super::geometry::Room;
use super::puzzle::BlockColor;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameEvent {
    RiddlePrompted,
    RiddleSolved,
    RiddleFailed,
    KeypadPrompted,
    KeypadSolved,
    KeypadFailed,
    PromptCancelled,
    ColorAppended(BlockColor),
    ColorPuzzleSolved,
    ColorSequenceReset,
    RoomEntered(Room),
    LionWarning,
    HologramTriggered,
    ExitReached,
}
