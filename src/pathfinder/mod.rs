//! PathFinder: pick a program, type a career goal, get course recommendations.

pub mod actions;
pub mod fetch;
pub mod logic;
pub mod render;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, InputEvent};

use actions::*;
use logic::{Direction, FetchRequest, Msg};
use state::{Field, FormState, ALL_PROGRAMS};

pub struct PathFinder {
    pub state: FormState,
}

impl PathFinder {
    pub fn new() -> Self {
        Self {
            state: FormState::new(),
        }
    }

    /// Feed one message through `logic::update`. Returns the fetch to start, if any.
    pub fn dispatch(&mut self, msg: Msg) -> Option<FetchRequest> {
        let state = std::mem::take(&mut self.state);
        let (next, request) = logic::update(state, msg);
        self.state = next;
        request
    }

    /// Translate an input event into a message for the current focus.
    pub fn handle_input(&mut self, event: &InputEvent) -> Option<FetchRequest> {
        let msg = match event {
            InputEvent::Click(id) => self.click_msg(*id),
            other => self.key_msg(other),
        }?;
        self.dispatch(msg)
    }

    fn click_msg(&self, action_id: u16) -> Option<Msg> {
        match action_id {
            CLEAR_PROGRAM => Some(Msg::SelectProgram(None)),
            id if (SELECT_PROGRAM_BASE..SELECT_PROGRAM_BASE + ALL_PROGRAMS.len() as u16)
                .contains(&id) =>
            {
                let program = ALL_PROGRAMS[(id - SELECT_PROGRAM_BASE) as usize];
                Some(Msg::SelectProgram(Some(program)))
            }
            FOCUS_CAREER => Some(Msg::Focus(Field::Career)),
            REQUEST_RECOMMENDATIONS => Some(Msg::RequestRecommendations),
            _ => None,
        }
    }

    fn key_msg(&self, event: &InputEvent) -> Option<Msg> {
        match event {
            InputEvent::Tab => return Some(Msg::FocusNext),
            InputEvent::BackTab => return Some(Msg::FocusPrev),
            InputEvent::Enter => return Some(Msg::RequestRecommendations),
            _ => {}
        }

        match self.state.focus {
            Field::Program => match event {
                InputEvent::Key(c @ '1'..='3') => {
                    let index = (*c as u8 - b'1') as usize;
                    Some(Msg::SelectProgram(Some(ALL_PROGRAMS[index])))
                }
                InputEvent::Key('0') | InputEvent::Backspace => Some(Msg::SelectProgram(None)),
                InputEvent::Up => Some(Msg::CycleProgram(Direction::Backward)),
                InputEvent::Down => Some(Msg::CycleProgram(Direction::Forward)),
                _ => None,
            },
            Field::Career => match event {
                InputEvent::Key(c) if !c.is_control() => Some(Msg::CareerInput(*c)),
                InputEvent::Backspace => Some(Msg::CareerBackspace),
                InputEvent::Up => Some(Msg::FocusPrev),
                InputEvent::Down => Some(Msg::FocusNext),
                _ => None,
            },
            Field::Submit => match event {
                InputEvent::Key(' ') => Some(Msg::RequestRecommendations),
                InputEvent::Up => Some(Msg::FocusPrev),
                InputEvent::Down => Some(Msg::FocusNext),
                _ => None,
            },
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, f, area, click_state);
    }
}
