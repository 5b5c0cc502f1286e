/// Session: the single owner of a game's PuzzleState.
///
/// Frame protocol, driven by the main loop:
///   1. `begin_frame()` samples the clock once
///   2. `handle()` for each input event of the frame
///   3. `update()` checks for a terminal outcome
///
/// Once an outcome is reached the session is frozen: further input, even
/// later events of the same frame, is dropped and `update()` keeps returning
/// the same outcome.

use std::time::Duration;

use crate::domain::clock::Clock;
use crate::domain::event::GameEvent;
use crate::domain::geometry::GeometryCatalog;
use crate::domain::puzzle::PuzzleState;
use super::resolver::{self, InputEvent, Resolution};
use super::transition::{Outcome, RoomTransitionController};

pub struct Session<C: Clock> {
    state: PuzzleState,
    catalog: GeometryCatalog,
    controller: RoomTransitionController,
    clock: C,
    now: Duration,
    outcome: Option<Outcome>,
}

impl<C: Clock> Session<C> {
    pub fn new(catalog: GeometryCatalog, controller: RoomTransitionController, clock: C) -> Self {
        let now = clock.now();
        Session {
            state: PuzzleState::new(),
            catalog,
            controller,
            clock,
            now,
            outcome: None,
        }
    }

    pub fn state(&self) -> &PuzzleState { &self.state }
    pub fn catalog(&self) -> &GeometryCatalog { &self.catalog }
    pub fn outcome(&self) -> Option<Outcome> { self.outcome }

    pub fn begin_frame(&mut self) -> Duration {
        self.now = self.clock.now();
        self.now
    }

    pub fn handle(&mut self, input: InputEvent) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.outcome.is_some() {
            return events;
        }

        let res = resolver::resolve(&mut self.state, &self.catalog, input, self.now, &mut events);
        log::debug!("{:?} -> {:?}", input, res);
        // an ending reached mid-batch freezes the rest of the frame's input
        self.outcome = match res {
            Resolution::Quit => Some(Outcome::Quit),
            _ => self.controller.evaluate(&self.state, self.now),
        };
        events
    }

    pub fn update(&mut self) -> Option<Outcome> {
        if self.outcome.is_none() {
            self.outcome = self.controller.evaluate(&self.state, self.now);
        }
        self.outcome
    }
}
