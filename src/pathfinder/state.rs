//! PathFinder form state.

use serde::{Deserialize, Deserializer};

use super::fetch::FetchError;

/// Academic programs offered in the selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Program {
    InformationTechnology,
    DataAnalytics,
    ComputerScience,
}

/// All programs in display order.
pub const ALL_PROGRAMS: [Program; 3] = [
    Program::InformationTechnology,
    Program::DataAnalytics,
    Program::ComputerScience,
];

/// Static info about a program: display name and the department identifier
/// the recommendation endpoint expects.
pub struct ProgramInfo {
    pub name: &'static str,
    pub dept_id: u8,
}

pub fn program_info(program: Program) -> ProgramInfo {
    match program {
        Program::InformationTechnology => ProgramInfo {
            name: "Information Technology",
            dept_id: 1,
        },
        Program::DataAnalytics => ProgramInfo {
            name: "Data Analytics",
            dept_id: 2,
        },
        Program::ComputerScience => ProgramInfo {
            name: "Computer Science",
            dept_id: 3,
        },
    }
}

/// Label of the empty option in the program selector.
pub const PROGRAM_PLACEHOLDER: &str = "Select Program";

/// Placeholder shown in the career field while it is empty.
pub const CAREER_PLACEHOLDER: &str = "Enter your career ambition...";

/// Form control that currently receives keyboard input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Program,
    Career,
    Submit,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Field::Program => Field::Career,
            Field::Career => Field::Submit,
            Field::Submit => Field::Program,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Field::Program => Field::Submit,
            Field::Career => Field::Program,
            Field::Submit => Field::Career,
        }
    }
}

/// Lifecycle of the recommendation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Completed,
}

impl RequestState {
    pub fn trigger_enabled(self) -> bool {
        self != RequestState::Loading
    }

    pub fn button_label(self) -> &'static str {
        match self {
            RequestState::Loading => "Loading...",
            RequestState::Idle | RequestState::Completed => "Get Course Recommendations",
        }
    }
}

/// One course record as returned by the recommendation endpoint.
///
/// Fields are kept verbatim. `courseId` is only used as a list key and may be
/// a number or a string depending on the backend, so it stays untyped. The
/// display fields accept any JSON scalar: one odd record must not cost the
/// whole list.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecommendation {
    #[serde(default)]
    pub course_id: serde_json::Value,
    #[serde(default, deserialize_with = "display_text")]
    pub course_code: String,
    #[serde(default, deserialize_with = "display_text")]
    pub course_name: String,
    #[serde(default, deserialize_with = "display_text")]
    pub course_description: String,
}

/// `null` → empty, string as-is, anything else as its JSON text.
fn display_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

impl CourseRecommendation {
    /// Entry heading, e.g. `CS101: Intro to CS`.
    pub fn heading(&self) -> String {
        format!("{}: {}", self.course_code, self.course_name)
    }
}

/// The whole form. Replaced, never patched in place, by `logic::update`.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FormState {
    pub program: Option<Program>,
    pub career: String,
    pub focus: Field,
    pub request_state: RequestState,
    pub recommendations: Vec<CourseRecommendation>,
    /// Failure of the most recent fetch, cleared by the next success.
    pub last_error: Option<FetchError>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Both inputs present, i.e. a request would be issued.
    pub fn is_complete(&self) -> bool {
        self.program.is_some() && !self.career.is_empty()
    }
}
