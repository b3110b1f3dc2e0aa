use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const STATUS_STYLE: Style = BASE_STYLE.fg(Color::Gray);

pub(crate) mod field {
    use super::*;

    pub(crate) const FOCUSED_BORDER_STYLE: Style = BASE_STYLE
        .fg(Color::LightCyan)
        .add_modifier(Modifier::BOLD);

    pub(crate) const HINT_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const INVALID_STYLE: Style = BASE_STYLE.fg(Color::LightRed);

    pub(crate) const TEXT_CURSOR_STYLE: Style = BASE_STYLE.add_modifier(Modifier::REVERSED);

    pub(crate) const ICON_STYLE: Style = BASE_STYLE.fg(Color::LightCyan);
}

pub(crate) mod calendar {
    use super::*;

    pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

    pub(crate) const FADED_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const SELECTED_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

    pub(crate) const CURSOR_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);
}
