//! PathFinder: pure form logic (no rendering / IO).
//!
//! Every event becomes a [`Msg`]; [`update`] consumes the current
//! [`FormState`] and returns the next one plus, at most, one fetch to start.

use log::{debug, warn};

use super::fetch::FetchError;
use super::state::{
    program_info, CourseRecommendation, Field, FormState, Program, RequestState, ALL_PROGRAMS,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Msg {
    SelectProgram(Option<Program>),
    CycleProgram(Direction),
    CareerInput(char),
    CareerBackspace,
    FocusNext,
    FocusPrev,
    Focus(Field),
    RequestRecommendations,
    FetchCompleted(Result<Vec<CourseRecommendation>, FetchError>),
}

/// A fetch the caller must run and answer with [`Msg::FetchCompleted`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    pub program: Program,
    pub job_title: String,
}

impl FetchRequest {
    pub fn dept_id(&self) -> u8 {
        program_info(self.program).dept_id
    }
}

pub fn update(state: FormState, msg: Msg) -> (FormState, Option<FetchRequest>) {
    match msg {
        Msg::SelectProgram(program) => (FormState { program, ..state }, None),
        Msg::CycleProgram(dir) => {
            let program = cycle_program(state.program, dir);
            (FormState { program, ..state }, None)
        }
        Msg::CareerInput(c) => {
            let mut career = state.career;
            career.push(c);
            (FormState { career, ..state }, None)
        }
        Msg::CareerBackspace => {
            let mut career = state.career;
            career.pop();
            (FormState { career, ..state }, None)
        }
        Msg::FocusNext => {
            let focus = state.focus.next();
            (FormState { focus, ..state }, None)
        }
        Msg::FocusPrev => {
            let focus = state.focus.prev();
            (FormState { focus, ..state }, None)
        }
        Msg::Focus(focus) => (FormState { focus, ..state }, None),
        Msg::RequestRecommendations => request_recommendations(state),
        Msg::FetchCompleted(result) => (complete_fetch(state, result), None),
    }
}

fn request_recommendations(state: FormState) -> (FormState, Option<FetchRequest>) {
    if !state.request_state.trigger_enabled() || !state.is_complete() {
        return (state, None);
    }
    let Some(program) = state.program else {
        return (state, None);
    };

    let request = FetchRequest {
        program,
        job_title: state.career.clone(),
    };
    debug!(
        "requesting recommendations: deptId={} jobTitle={:?}",
        request.dept_id(),
        request.job_title
    );
    let next = FormState {
        request_state: RequestState::Loading,
        ..state
    };
    (next, Some(request))
}

fn complete_fetch(
    state: FormState,
    result: Result<Vec<CourseRecommendation>, FetchError>,
) -> FormState {
    match result {
        Ok(recommendations) => FormState {
            recommendations,
            last_error: None,
            request_state: RequestState::Completed,
            ..state
        },
        Err(err) => {
            warn!("showing no recommendations after failed fetch: {}", err);
            FormState {
                recommendations: Vec::new(),
                last_error: Some(err),
                request_state: RequestState::Completed,
                ..state
            }
        }
    }
}

/// Step through placeholder → IT → DA → CS, wrapping at both ends.
fn cycle_program(current: Option<Program>, dir: Direction) -> Option<Program> {
    // Slot 0 is the placeholder.
    let slots = ALL_PROGRAMS.len() + 1;
    let index = match current {
        None => 0,
        Some(p) => ALL_PROGRAMS.iter().position(|&q| q == p).map_or(0, |i| i + 1),
    };
    let next = match dir {
        Direction::Forward => (index + 1) % slots,
        Direction::Backward => (index + slots - 1) % slots,
    };
    next.checked_sub(1).map(|i| ALL_PROGRAMS[i])
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_program() -> impl Strategy<Value = Program> {
        prop_oneof![
            Just(Program::InformationTechnology),
            Just(Program::DataAnalytics),
            Just(Program::ComputerScience),
        ]
    }

    fn arb_request_state() -> impl Strategy<Value = RequestState> {
        prop_oneof![
            Just(RequestState::Idle),
            Just(RequestState::Loading),
            Just(RequestState::Completed),
        ]
    }

    /// (program, career) pairs where at least one side is empty.
    fn arb_incomplete_inputs() -> impl Strategy<Value = (Option<Program>, String)> {
        prop_oneof![
            ".{0,20}".prop_map(|career| (None, career)),
            proptest::option::of(arb_program()).prop_map(|program| (program, String::new())),
        ]
    }

    proptest! {
        #[test]
        fn prop_incomplete_form_never_requests(
            (program, career) in arb_incomplete_inputs(),
            request_state in arb_request_state(),
        ) {
            let state = FormState { program, career, request_state, ..FormState::new() };
            let (next, req) = update(state.clone(), Msg::RequestRecommendations);
            prop_assert_eq!(req, None);
            prop_assert_eq!(next.request_state, state.request_state);
            prop_assert_eq!(next, state);
        }

        #[test]
        fn prop_complete_form_requests_with_selected_dept(
            program in arb_program(),
            career in ".{1,20}",
        ) {
            let state = FormState {
                program: Some(program),
                career: career.clone(),
                ..FormState::new()
            };
            let (next, req) = update(state, Msg::RequestRecommendations);
            prop_assert_eq!(next.request_state, RequestState::Loading);
            let req = req.unwrap();
            prop_assert_eq!(req.dept_id(), program_info(program).dept_id);
            prop_assert_eq!(req.job_title, career);
        }

        #[test]
        fn prop_fetch_completion_always_leaves_loading(
            ok in any::<bool>(),
            status in 400u16..600,
        ) {
            let state = FormState { request_state: RequestState::Loading, ..FormState::new() };
            let result = if ok { Ok(Vec::new()) } else { Err(FetchError::Status(status)) };
            let (next, _) = update(state, Msg::FetchCompleted(result));
            prop_assert_eq!(next.request_state, RequestState::Completed);
        }
    }
}
