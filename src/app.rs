use crate::help::Help;
use crate::theme::{BASE_STYLE, STATUS_STYLE};
use crate::widget::{
    CalendarPopup, PopupInput, PopupOutput, PopupState, TextField, FIELD_HEIGHT, FIELD_WIDTH,
    POPUP_HEIGHT, POPUP_WIDTH,
};
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use datefield::{Clock, DateField, DateFormat, FieldEffect, FieldEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    text::Line,
    widgets::{StatefulWidget, Widget},
    DefaultTerminal,
};
use std::collections::VecDeque;
use std::io::{self, Write};
use time::Date;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App<F, C> {
    field: DateField<F, C>,
    popup: Option<PopupState>,
    state: AppState,
}

impl<F: DateFormat, C: Clock> App<F, C> {
    pub(crate) fn new(field: DateField<F, C>) -> App<F, C> {
        App {
            field,
            popup: None,
            state: AppState::Editing,
        }
    }

    pub(crate) fn run(mut self, mut terminal: DefaultTerminal) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Editing => {
                if self.popup.is_some() {
                    self.handle_popup_key(key)
                } else if self.field.is_focused() {
                    self.handle_text_key(key)
                } else {
                    self.handle_field_key(key)
                }
            }
            AppState::Helping => {
                self.state = AppState::Editing;
                true
            }
            AppState::Quitting => false,
        }
    }

    fn handle_field_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Tab | KeyCode::Enter => self.dispatch(FieldEvent::FocusGained),
            KeyCode::Down | KeyCode::F(2) => self.open_calendar(),
            KeyCode::PageUp => self.dispatch(FieldEvent::PrevMonthRequested),
            KeyCode::PageDown => self.dispatch(FieldEvent::NextMonthRequested),
            KeyCode::Delete => self.dispatch(FieldEvent::SelectedDateChanged(None)),
            KeyCode::Char('?') => {
                self.state = AppState::Helping;
                true
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.state = AppState::Quitting;
                true
            }
            _ => false,
        }
    }

    fn handle_text_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char(c) => {
                let mut text = self.field.raw_text().to_owned();
                text.push(c);
                self.dispatch(FieldEvent::TextChanged(text))
            }
            KeyCode::Backspace => {
                let mut text = self.field.raw_text().to_owned();
                text.pop().is_some() && self.dispatch(FieldEvent::TextChanged(text))
            }
            KeyCode::Tab | KeyCode::Enter | KeyCode::Esc => self.dispatch(FieldEvent::FocusLost),
            KeyCode::Down | KeyCode::F(2) => self.open_calendar(),
            _ => false,
        }
    }

    fn handle_popup_key(&mut self, key: KeyCode) -> bool {
        let input = match key {
            KeyCode::Left | KeyCode::Char('h') => PopupInput::Left,
            KeyCode::Right | KeyCode::Char('l') => PopupInput::Right,
            KeyCode::Up | KeyCode::Char('k') => PopupInput::Up,
            KeyCode::Down | KeyCode::Char('j') => PopupInput::Down,
            KeyCode::Enter | KeyCode::Char(' ') => PopupInput::Select,
            KeyCode::PageUp | KeyCode::Char('<') => {
                return self.dispatch(FieldEvent::PrevMonthRequested)
            }
            KeyCode::PageDown | KeyCode::Char('>') => {
                return self.dispatch(FieldEvent::NextMonthRequested)
            }
            KeyCode::Esc => return self.dispatch(FieldEvent::CalendarPopupClosed),
            _ => return false,
        };
        let Some(popup) = self.popup.as_mut() else {
            return false;
        };
        match popup.handle_input(input) {
            PopupOutput::Ok => true,
            PopupOutput::Invalid => false,
            PopupOutput::Select(date) => {
                self.dispatch(FieldEvent::CalendarDayClicked(date));
                self.dispatch(FieldEvent::CalendarPopupClosed)
            }
        }
    }

    fn open_calendar(&mut self) -> bool {
        self.dispatch(FieldEvent::CalendarIconActivated);
        self.popup.is_some()
    }

    fn dispatch(&mut self, event: FieldEvent) -> bool {
        let mut queue = VecDeque::from(self.field.handle(event));
        while let Some(effect) = queue.pop_front() {
            match effect {
                FieldEffect::ShowCalendar => self.popup = self.new_popup(),
                FieldEffect::RedrawCalendar => {
                    if self.popup.is_some() {
                        self.popup = self.new_popup();
                    }
                }
                FieldEffect::DismissCalendar => self.popup = None,
                FieldEffect::FocusTextInput => queue.extend(self.field.focus()),
                FieldEffect::TextReformatted(text) => {
                    log::debug!("Field text reformatted to {text:?}");
                }
                FieldEffect::SelectionChanged { previous, current } => {
                    log::info!("Selected date changed from {previous:?} to {current:?}");
                }
            }
        }
        true
    }

    fn new_popup(&self) -> Option<PopupState> {
        match self.field.calendar() {
            Ok(grid) => Some(PopupState::new(grid)),
            Err(e) => {
                log::warn!("Cannot draw calendar around {}: {e}", self.field.reference_date());
                None
            }
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn status_line(&self) -> Line<'static> {
        fn show(date: Option<Date>) -> String {
            match date {
                Some(d) => d.to_string(),
                None => String::from("none"),
            }
        }
        Line::styled(
            format!(
                "Selected: {}  Rollback: {}",
                show(self.field.selected_date()),
                show(self.field.last_valid_date())
            ),
            STATUS_STYLE,
        )
        .centered()
    }
}

impl<F: DateFormat, C: Clock> Widget for &mut App<F, C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [_, field_area, status_area, _] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [field_area] = Layout::horizontal([FIELD_WIDTH])
            .flex(Flex::Center)
            .areas(field_area);
        TextField::new(&self.field).render(field_area, buf);
        self.status_line().render(status_area, buf);
        if let Some(popup) = self.popup.as_mut() {
            let popup_area = Rect::new(
                field_area.x,
                status_area.bottom(),
                POPUP_WIDTH,
                POPUP_HEIGHT,
            )
            .intersection(area);
            CalendarPopup.render(popup_area, buf, popup);
        }
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Editing,
    Helping,
    Quitting,
}
