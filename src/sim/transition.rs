/// Room transition controller: decides when a session is over.
///
/// Room advances themselves happen inside the door rule; this controller
/// only watches for the two terminal outcomes, once per frame:
///   1. Narrative ending: the hologram delay has run out in Room 3.
///   2. Escaped: the Room 3 exit was clicked.
/// The narrative check runs first and preempts the ordinary ending.

use std::time::Duration;

use crate::domain::geometry::Room;
use crate::domain::puzzle::PuzzleState;

pub const DEFAULT_HOLOGRAM_DELAY: Duration = Duration::from_millis(2000);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    /// The ordinary ending.
    Escaped,
    /// The hologram reveal: hand-off to the narrative crawl.
    NarrativeEnding,
    /// Explicit quit request.
    Quit,
}

#[derive(Clone, Copy, Debug)]
pub struct RoomTransitionController {
    hologram_delay: Duration,
}

impl RoomTransitionController {
    pub fn new(hologram_delay: Duration) -> Self {
        RoomTransitionController { hologram_delay }
    }

    pub fn evaluate(&self, state: &PuzzleState, now: Duration) -> Option<Outcome> {
        if state.current_room() == Room::Room3 {
            if let Some(t) = state.hologram_trigger_time() {
                if now.saturating_sub(t) >= self.hologram_delay {
                    return Some(Outcome::NarrativeEnding);
                }
            }
        }
        if state.escaped() {
            return Some(Outcome::Escaped);
        }
        None
    }
}

impl Default for RoomTransitionController {
    fn default() -> Self {
        RoomTransitionController::new(DEFAULT_HOLOGRAM_DELAY)
    }
}
