//! Reusable clickable UI components.
//!
//! - [`ClickableList`]: vertical list of lines where some rows are click targets.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::text::Line;

use crate::input::ClickState;

/// A builder that pairs rendered [`Line`]s with click actions.
///
/// Lines are annotated as clickable when they are added, then
/// [`register_targets`](ClickableList::register_targets) is called once to
/// register every target at the row the line actually ends up on.
///
/// # Example
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push_clickable(Line::from("Select Program"), CLEAR_PROGRAM);
/// cl.push_clickable(Line::from("Data Analytics"), SELECT_PROGRAM_BASE + 1);
/// cl.register_targets(area, &mut cs, 1, 1, 0);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
/// ```
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)` pairs.
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Add a clickable line with a semantic action ID.
    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        let idx = self.lines.len() as u16;
        self.actions.push((idx, action_id));
        self.lines.push(line);
    }

    /// Consume the builder, returning the lines for rendering.
    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register click targets for all clickable lines.
    ///
    /// * `area`: the widget area (including borders).
    /// * `top_offset` / `bottom_offset`: border rows above and below the content.
    /// * `inner_width`: content width for wrap calculation. `0` means the
    ///   widget does not wrap and every line occupies exactly one row.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
        inner_width: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);

        let mut visual_starts: Vec<u16> = Vec::with_capacity(self.lines.len());
        let mut visual_heights: Vec<u16> = Vec::with_capacity(self.lines.len());
        let mut cumulative: u16 = 0;
        for line in &self.lines {
            visual_starts.push(cumulative);
            let h = if inner_width == 0 {
                1
            } else {
                let lw = line.width().max(1);
                lw.div_ceil(inner_width as usize) as u16
            };
            visual_heights.push(h);
            cumulative += h;
        }

        for &(line_idx, action_id) in &self.actions {
            let li = line_idx as usize;
            if li >= self.lines.len() {
                continue;
            }
            for r in 0..visual_heights[li] {
                let screen_row = content_y + visual_starts[li] + r;
                if screen_row >= content_end {
                    break;
                }
                cs.add_row_target(area, screen_row, action_id);
            }
        }
    }
}
