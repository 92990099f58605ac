//! PathFinder rendering (read-only from state).

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::ClickableList;

use super::actions::*;
use super::state::{
    program_info, CourseRecommendation, Field, FormState, RequestState, ALL_PROGRAMS,
    CAREER_PLACEHOLDER, PROGRAM_PLACEHOLDER,
};

/// Placeholder row plus one row per program, inside top/bottom borders.
const PROGRAM_HEIGHT: u16 = ALL_PROGRAMS.len() as u16 + 3;
const CAREER_HEIGHT: u16 = 3;
const BUTTON_HEIGHT: u16 = 3;
const FORM_HEIGHT: u16 = PROGRAM_HEIGHT + CAREER_HEIGHT + BUTTON_HEIGHT;

pub fn render(
    state: &FormState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let is_narrow = is_narrow_layout(area.width);
    let borders = if is_narrow {
        Borders::TOP | Borders::BOTTOM
    } else {
        Borders::ALL
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),           // Title bar
            Constraint::Length(1),           // Heading
            Constraint::Length(FORM_HEIGHT), // Form
            Constraint::Min(3),              // Results
        ])
        .split(area);

    render_title(f, chunks[0]);
    render_heading(f, chunks[1]);

    if is_narrow {
        render_form(state, f, chunks[2], borders, click_state);
    } else {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(chunks[2]);
        render_form(state, f, columns[0], borders, click_state);
        render_hints(f, columns[1]);
    }

    render_results(state, f, chunks[3], borders);
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        "Clark University",
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    )
    .alignment(Alignment::Center);
    f.render_widget(title, area);
}

fn render_heading(f: &mut Frame, area: Rect) {
    let heading = Paragraph::new(Line::from(Span::styled(
        " PathFinder",
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    )));
    f.render_widget(heading, area);
}

// ── Form ───────────────────────────────────────────────────────────────

fn render_form(
    state: &FormState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(PROGRAM_HEIGHT),
            Constraint::Length(CAREER_HEIGHT),
            Constraint::Length(BUTTON_HEIGHT),
        ])
        .split(area);

    let mut cs = click_state.borrow_mut();
    render_program_selector(state, f, chunks[0], borders, &mut cs);
    render_career_field(state, f, chunks[1], borders, &mut cs);
    render_button(state, f, chunks[2], borders, &mut cs);
}

fn field_block(title: &'static str, focused: bool, borders: Borders) -> Block<'static> {
    let border_color = if focused { Color::Yellow } else { Color::DarkGray };
    Block::default()
        .borders(borders)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(
            title,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))
}

fn option_line(label: &str, selected: bool) -> Line<'static> {
    let (marker, style) = if selected {
        (
            " (•) ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )
    } else {
        (" ( ) ", Style::default().fg(Color::Gray))
    };
    Line::from(vec![
        Span::styled(marker, style),
        Span::styled(label.to_string(), style),
    ])
}

fn render_program_selector(
    state: &FormState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    cs: &mut ClickState,
) {
    let mut cl = ClickableList::new();
    cl.push_clickable(
        option_line(PROGRAM_PLACEHOLDER, state.program.is_none()),
        CLEAR_PROGRAM,
    );
    for (i, &program) in ALL_PROGRAMS.iter().enumerate() {
        cl.push_clickable(
            option_line(program_info(program).name, state.program == Some(program)),
            SELECT_PROGRAM_BASE + i as u16,
        );
    }
    cl.register_targets(area, cs, 1, 1, 0);

    let block = field_block(
        " Select Your Program ",
        state.focus == Field::Program,
        borders,
    );
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

/// The tail of `text` that fits in `width` columns, leaving one for the cursor.
fn visible_tail(text: &str, width: usize) -> &str {
    let room = width.saturating_sub(1);
    if text.width() <= room {
        return text;
    }
    let mut used = 0;
    let mut start = text.len();
    for (idx, c) in text.char_indices().rev() {
        used += c.width().unwrap_or(0);
        if used > room {
            break;
        }
        start = idx;
    }
    &text[start..]
}

fn render_career_field(
    state: &FormState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    cs: &mut ClickState,
) {
    let focused = state.focus == Field::Career;
    let block = field_block(" Enter Your Career Goal ", focused, borders);
    let inner = block.inner(area);

    let mut spans = vec![Span::raw(" ")];
    if state.career.is_empty() {
        spans.push(Span::styled(
            CAREER_PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        let tail = visible_tail(&state.career, inner.width.saturating_sub(1) as usize);
        spans.push(Span::styled(tail.to_string(), Style::default().fg(Color::White)));
    }
    if focused {
        spans.push(Span::styled(
            "▏",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::SLOW_BLINK),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    cs.add_click_target(area, FOCUS_CAREER);
}

fn render_button(
    state: &FormState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    cs: &mut ClickState,
) {
    let enabled = state.request_state.trigger_enabled();
    let label_style = if enabled {
        Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let border_color = if state.focus == Field::Submit {
        Color::Yellow
    } else {
        Color::Blue
    };

    let label = format!(" {} ", state.request_state.button_label());
    let widget = Paragraph::new(Line::from(Span::styled(label, label_style)))
        .block(
            Block::default()
                .borders(borders)
                .border_style(Style::default().fg(border_color)),
        )
        .alignment(Alignment::Center);
    f.render_widget(widget, area);

    if enabled {
        cs.add_click_target(area, REQUEST_RECOMMENDATIONS);
    }
}

fn render_hints(f: &mut Frame, area: Rect) {
    let key = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let text = Style::default().fg(Color::Gray);
    let lines = vec![
        Line::from(vec![Span::styled(" Tab   ", key), Span::styled("next field", text)]),
        Line::from(vec![Span::styled(" 1-3   ", key), Span::styled("pick program", text)]),
        Line::from(vec![Span::styled(" ↑/↓   ", key), Span::styled("change selection", text)]),
        Line::from(vec![Span::styled(" Enter ", key), Span::styled("get courses", text)]),
        Line::from(""),
        Line::from(Span::styled(
            " Tap an option or the",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            " button to choose it.",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Keys ");
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

// ── Results ────────────────────────────────────────────────────────────

/// Per course: `code: name`, then the description line by line; blank line between.
pub fn course_lines(courses: &[CourseRecommendation]) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(courses.len() * 3);
    for (i, course) in courses.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            format!(" {}", course.heading()),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )));
        for text in course.course_description.split('\n') {
            lines.push(Line::from(Span::styled(
                format!(" {}", text.trim_end_matches('\r')),
                Style::default().fg(Color::Gray),
            )));
        }
    }
    lines
}

/// One-line outcome for a completed fetch that produced no courses.
pub fn status_message(state: &FormState) -> Option<String> {
    if state.request_state != RequestState::Completed || !state.recommendations.is_empty() {
        return None;
    }
    Some(match &state.last_error {
        Some(err) => format!("Could not load recommendations ({}).", err),
        None => "No recommendations found.".to_string(),
    })
}

fn render_results(state: &FormState, f: &mut Frame, area: Rect, borders: Borders) {
    if state.recommendations.is_empty() {
        if let Some(msg) = status_message(state) {
            let color = if state.last_error.is_some() {
                Color::Red
            } else {
                Color::DarkGray
            };
            let widget = Paragraph::new(Line::from(Span::styled(
                format!(" {}", msg),
                Style::default().fg(color),
            )))
            .wrap(Wrap { trim: false });
            let status_area = Rect::new(
                area.x,
                area.y + 1,
                area.width,
                area.height.saturating_sub(1),
            );
            f.render_widget(widget, status_area);
        }
        return;
    }

    let body = Paragraph::new(course_lines(&state.recommendations)).wrap(Wrap { trim: false });
    let inner_width = if borders.contains(Borders::LEFT) {
        area.width.saturating_sub(2)
    } else {
        area.width
    };
    let height = (body.line_count(inner_width) as u16 + 2).min(area.height);

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Red))
        .title(Span::styled(
            " Recommended Courses ",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));
    f.render_widget(
        body.block(block),
        Rect::new(area.x, area.y, area.width, height),
    );
}
