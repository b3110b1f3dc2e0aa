use crate::theme::{
    calendar::{CURSOR_STYLE, FADED_STYLE, SELECTED_STYLE, WEEKDAY_STYLE},
    field::{FOCUSED_BORDER_STYLE, HINT_STYLE, ICON_STYLE, INVALID_STYLE, TEXT_CURSOR_STYLE},
    BASE_STYLE,
};
use datefield::grid::{CalendarGrid, GridCell, DAYS_IN_WEEK, GRID_CELLS};
use datefield::{Clock, DateField, DateFormat};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, StatefulWidget, Widget},
};
use time::Date;

pub(crate) const FIELD_WIDTH: u16 = 24;
pub(crate) const FIELD_HEIGHT: u16 = 3;
pub(crate) const POPUP_WIDTH: u16 = 22;
pub(crate) const POPUP_HEIGHT: u16 = 9;

static WEEKDAY_HEADER: &str = "Su Mo Tu We Th Fr Sa";

/// The text box of a date field, with the calendar icon at its right edge
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct TextField {
    text: String,
    hint: String,
    focused: bool,
    valid: bool,
}

impl TextField {
    pub(crate) fn new<F: DateFormat, C: Clock>(field: &DateField<F, C>) -> TextField {
        TextField {
            text: field.raw_text().to_owned(),
            hint: field.hint(),
            focused: field.is_focused(),
            valid: field.is_valid(),
        }
    }

    fn to_line(&self) -> Line<'_> {
        let mut spans = Vec::with_capacity(2);
        if self.text.is_empty() {
            if self.focused {
                spans.push(Span::styled(" ", TEXT_CURSOR_STYLE));
            }
            spans.push(Span::styled(self.hint.as_str(), HINT_STYLE));
        } else {
            let style = if self.valid {
                BASE_STYLE
            } else {
                INVALID_STYLE
            };
            spans.push(Span::styled(self.text.as_str(), style));
            if self.focused {
                spans.push(Span::styled(" ", TEXT_CURSOR_STYLE));
            }
        }
        Line::from(spans)
    }
}

impl Widget for TextField {
    /*
     * ┌ Date ────────────────┐
     * │10/19/2026           ▾│
     * └──────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().title(" Date ").style(BASE_STYLE);
        let block = if self.focused {
            block.border_style(FOCUSED_BORDER_STYLE)
        } else {
            block
        };
        let inner = block.inner(area);
        block.render(area, buf);
        let [text_area, icon_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(2)]).areas(inner);
        self.to_line().render(text_area, buf);
        Span::styled(" ▾", ICON_STYLE).render(icon_area, buf);
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct CalendarPopup;

impl StatefulWidget for CalendarPopup {
    type State = PopupState;

    /*
     * ┌── February 2026 ───┐
     * │Su Mo Tu We Th Fr Sa│
     * │ 1  2  3  4  5  6  7│
     * │ 8  9 10 11 12 13 14│
     * │15 16 17 18 19 20 21│
     * │22 23 24 25 26 27 28│
     * │ 1  2  3  4  5  6  7│
     * │ 8  9 10 11 12 13 14│
     * └────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        Clear.render(area, buf);
        let block = Block::bordered()
            .title(format!(" {} ", state.grid().title()))
            .title_alignment(Alignment::Center)
            .style(BASE_STYLE);
        let inner = block.inner(area);
        block.render(area, buf);
        state.to_text().render(inner, buf);
    }
}

/// The popup's grid together with a keyboard cursor over its cells
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct PopupState {
    grid: CalendarGrid,
    // Index into `grid`'s cells; always less than GRID_CELLS
    cursor: usize,
}

impl PopupState {
    /// Show `grid` with the cursor on its reference date
    pub(crate) fn new(grid: CalendarGrid) -> PopupState {
        let cursor = grid
            .position_of(grid.reference())
            .unwrap_or_else(|| grid.start_offset());
        PopupState { grid, cursor }
    }

    pub(crate) fn grid(&self) -> &CalendarGrid {
        &self.grid
    }

    pub(crate) fn cursor_date(&self) -> Option<Date> {
        self.grid.get(self.cursor).map(GridCell::date)
    }

    pub(crate) fn handle_input(&mut self, input: PopupInput) -> PopupOutput {
        let target = match input {
            PopupInput::Left => self.cursor.checked_sub(1),
            PopupInput::Right => self.cursor.checked_add(1),
            PopupInput::Up => self.cursor.checked_sub(DAYS_IN_WEEK),
            PopupInput::Down => self.cursor.checked_add(DAYS_IN_WEEK),
            PopupInput::Select => {
                return self
                    .cursor_date()
                    .map_or(PopupOutput::Invalid, PopupOutput::Select)
            }
        };
        match target {
            Some(i) if i < GRID_CELLS => {
                self.cursor = i;
                PopupOutput::Ok
            }
            _ => PopupOutput::Invalid,
        }
    }

    fn to_text(&self) -> Text<'static> {
        let mut lines = vec![Line::styled(WEEKDAY_HEADER, WEEKDAY_STYLE)];
        for (row, week) in self.grid.weeks().enumerate() {
            let mut spans = Vec::with_capacity(DAYS_IN_WEEK * 2);
            for (col, cell) in week.iter().enumerate() {
                if col > 0 {
                    spans.push(Span::styled(" ", BASE_STYLE));
                }
                let mut style = if cell.is_faded() {
                    FADED_STYLE
                } else {
                    BASE_STYLE
                };
                if cell.is_selected() {
                    style = style.patch(SELECTED_STYLE);
                }
                if row * DAYS_IN_WEEK + col == self.cursor {
                    style = style.patch(CURSOR_STYLE);
                }
                spans.push(Span::styled(format!("{:>2}", cell.day()), style));
            }
            lines.push(Line::from(spans));
        }
        Text::from(lines)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PopupInput {
    Left,
    Right,
    Up,
    Down,
    Select,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PopupOutput {
    Ok,
    Invalid,
    Select(Date),
}

/// The symbols in each row of `buf`, for comparing against expected text
#[cfg(test)]
pub(crate) fn buffer_rows(buf: &Buffer) -> Vec<String> {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol())
                .collect()
        })
        .collect()
}
