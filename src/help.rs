use ratatui::{
    buffer::Buffer,
    layout::Flex,
    layout::{Alignment, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

static SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Field",
        &[
            ("TAB, ENTER", "Start editing"),
            ("DOWN, F2", "Open the calendar"),
            ("PAGE UP", "Previous month"),
            ("PAGE DOWN", "Next month"),
            ("DELETE", "Clear the date"),
            ("?", "Show this help"),
            ("q, ESC", "Quit"),
        ],
    ),
    (
        "Editing",
        &[
            ("+N, -N", "N days from today"),
            ("TAB, ENTER, ESC", "Stop editing"),
            ("DOWN, F2", "Open the calendar"),
        ],
    ),
    (
        "Calendar",
        &[
            ("ARROWS, hjkl", "Move the cursor"),
            ("PAGE UP, <", "Previous month"),
            ("PAGE DOWN, >", "Next month"),
            ("ENTER, SPACE", "Pick the day"),
            ("ESC", "Close"),
        ],
    ),
];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help(pub(crate) Style);

impl Help {
    fn to_text() -> Text<'static> {
        let mut lines = Vec::new();
        for &(title, bindings) in SECTIONS {
            lines.push(Line::raw(format!("{title}:")));
            for &(keys, action) in bindings {
                lines.push(Line::raw(format!("  {keys:<16}{action}")));
            }
            lines.push(Line::raw(""));
        }
        lines.push(Line::raw("Press the Any Key to dismiss."));
        Text::from(lines)
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Help::to_text();
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.height);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.width);
        let [help_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [help_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(help_area);
        Clear.render(help_area, buf);
        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center),
            )
            .style(self.0)
            .render(help_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::BASE_STYLE;
    use crate::widget::buffer_rows;

    #[test]
    fn test_render_help() {
        let area = Rect::new(0, 0, 60, 30);
        let mut buffer = Buffer::empty(area);
        Help(BASE_STYLE).render(area, &mut buffer);
        let rows = buffer_rows(&buffer);
        assert!(rows.iter().any(|r| r.contains(" Commands ")));
        assert!(rows
            .iter()
            .any(|r| r.contains("  DOWN, F2        Open the calendar")));
        assert!(rows
            .iter()
            .any(|r| r.contains("Press the Any Key to dismiss.")));
    }

    #[test]
    fn test_help_fits_small_terminal() {
        let area = Rect::new(0, 0, 20, 5);
        let mut buffer = Buffer::empty(area);
        Help(BASE_STYLE).render(area, &mut buffer);
        assert_eq!(buffer_rows(&buffer)[0].chars().next(), Some('┌'));
    }
}
