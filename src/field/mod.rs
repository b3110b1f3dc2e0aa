//! The focus/validation state machine behind a date-entry field
//!
//! A [`DateField`] owns the text the user sees, the selected date, and the
//! last date that was accepted while the text was valid.  The host UI feeds
//! it [`FieldEvent`]s; each event is handled to completion, including any
//! follow-up actions it causes, and the field answers with the
//! [`FieldEffect`]s the host has to carry out.
//!
//! ```text
//! Unfocused ──focus──▶ Focused(Validating) ──▶ Focused(Valid | Invalid)
//!     ▲                                              │
//!     └──────────── blur / calendar icon ────────────┘
//! ```
mod event;
mod resolve;
pub use self::event::{FieldEffect, FieldEvent, Phase, Validity};
pub use self::resolve::{resolve_input, InputError};
use crate::datemath::{add_months, is_same_day, Clock, OutOfTimeError};
use crate::format::DateFormat;
use crate::grid::CalendarGrid;
use time::{error::ComponentRange, Date, Month};

/// The mutable value of a [`DateField`]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldState {
    raw_text: String,
    selected_date: Option<Date>,
    last_valid_date: Option<Date>,
    is_valid: bool,
    last_seen_text: Option<String>,
}

impl FieldState {
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn selected_date(&self) -> Option<Date> {
        self.selected_date
    }

    /// The rollback date: the selection in effect before the most recent
    /// change made from valid text
    pub fn last_valid_date(&self) -> Option<Date> {
        self.last_valid_date
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// The text seen by the most recent validation pass
    pub fn last_seen_text(&self) -> Option<&str> {
        self.last_seen_text.as_deref()
    }
}

impl Default for FieldState {
    fn default() -> FieldState {
        FieldState {
            raw_text: String::new(),
            selected_date: None,
            last_valid_date: None,
            is_valid: true,
            last_seen_text: None,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DateField<F, C> {
    format: F,
    clock: C,
    phase: Phase,
    state: FieldState,
}

impl<F: DateFormat, C: Clock> DateField<F, C> {
    pub fn new(format: F, clock: C) -> Self {
        DateField {
            format,
            clock,
            phase: Phase::Unfocused,
            state: FieldState::default(),
        }
    }

    /// Start out with `date` selected and displayed
    pub fn with_selected_date(mut self, date: Date) -> Self {
        self.state.raw_text = self.format.format_date(date);
        self.state.selected_date = Some(date);
        self.state.last_valid_date = Some(date);
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_focused(&self) -> bool {
        self.phase.is_focused()
    }

    pub fn state(&self) -> &FieldState {
        &self.state
    }

    pub fn raw_text(&self) -> &str {
        self.state.raw_text()
    }

    pub fn selected_date(&self) -> Option<Date> {
        self.state.selected_date()
    }

    pub fn last_valid_date(&self) -> Option<Date> {
        self.state.last_valid_date()
    }

    pub fn is_valid(&self) -> bool {
        self.state.is_valid()
    }

    pub fn format(&self) -> &F {
        &self.format
    }

    pub fn today(&self) -> Date {
        self.clock.today()
    }

    /// Placeholder text for an empty field
    pub fn hint(&self) -> String {
        self.format.hint(self.clock.today())
    }

    /// Resolve the current text to a date.  `Ok(None)` means the text is
    /// empty.
    pub fn resolve(&self) -> Result<Option<Date>, InputError> {
        resolve_input(&self.state.raw_text, &self.format, &self.clock)
    }

    /// Whether the current text is acceptable: empty, a well-formed offset, or
    /// something the date parser understands.  Unlike a validation pass
    /// during event handling, this does not update any state.
    pub fn validate(&self) -> bool {
        self.resolve().is_ok()
    }

    /// The date the calendar grid should be drawn around.  An empty or
    /// invalid field shows the current month with today selected.
    pub fn reference_date(&self) -> Date {
        if self.state.raw_text.is_empty() || !self.state.is_valid {
            self.clock.today()
        } else {
            self.state.selected_date.unwrap_or_else(|| self.clock.today())
        }
    }

    pub fn calendar(&self) -> Result<CalendarGrid, OutOfTimeError> {
        CalendarGrid::generate(self.reference_date())
    }

    pub fn set_text<S: Into<String>>(&mut self, text: S) -> Vec<FieldEffect> {
        self.handle(FieldEvent::TextChanged(text.into()))
    }

    pub fn focus(&mut self) -> Vec<FieldEffect> {
        self.handle(FieldEvent::FocusGained)
    }

    pub fn blur(&mut self) -> Vec<FieldEffect> {
        self.handle(FieldEvent::FocusLost)
    }

    pub fn open_calendar(&mut self) -> Vec<FieldEffect> {
        self.handle(FieldEvent::CalendarIconActivated)
    }

    pub fn close_calendar(&mut self) -> Vec<FieldEffect> {
        self.handle(FieldEvent::CalendarPopupClosed)
    }

    pub fn next_month(&mut self) -> Vec<FieldEffect> {
        self.handle(FieldEvent::NextMonthRequested)
    }

    pub fn prev_month(&mut self) -> Vec<FieldEffect> {
        self.handle(FieldEvent::PrevMonthRequested)
    }

    /// Write to the selected date from outside, as a data binding would
    pub fn set_selected_date(&mut self, date: Option<Date>) -> Vec<FieldEffect> {
        self.handle(FieldEvent::SelectedDateChanged(date))
    }

    /// Select the day a user clicked on in the calendar grid.  The text is
    /// not parsed; the date is assigned directly.
    pub fn select_date_from_grid(
        &mut self,
        day: u8,
        month: u8,
        year: i32,
    ) -> Result<Vec<FieldEffect>, ComponentRange> {
        let date = Date::from_calendar_date(year, Month::try_from(month)?, day)?;
        Ok(self.handle(FieldEvent::CalendarDayClicked(date)))
    }

    /// Deliver one event and run every action it leads to
    pub fn handle(&mut self, event: FieldEvent) -> Vec<FieldEffect> {
        let mut effects = Vec::new();
        log::trace!("{:?} received {:?}", self.phase, event);
        match (self.phase, event) {
            (_, FieldEvent::TextChanged(text)) => self.text_changed(text, &mut effects),
            (_, FieldEvent::SelectedDateChanged(date)) => {
                self.assign_selected_date(date, &mut effects);
            }
            (_, FieldEvent::CalendarDayClicked(date)) => {
                self.assign_selected_date(Some(date), &mut effects);
            }
            (Phase::Unfocused, FieldEvent::FocusGained) => self.enter_validating(&mut effects),
            (Phase::Unfocused, FieldEvent::CalendarIconActivated) => {
                effects.push(FieldEffect::ShowCalendar);
            }
            (Phase::Unfocused, FieldEvent::NextMonthRequested) => {
                self.step_month(1, &mut effects);
            }
            (Phase::Unfocused, FieldEvent::PrevMonthRequested) => {
                self.step_month(-1, &mut effects);
            }
            (Phase::Unfocused, FieldEvent::CalendarPopupClosed) => {
                effects.push(FieldEffect::DismissCalendar);
                effects.push(FieldEffect::FocusTextInput);
            }
            (Phase::Focused(_), FieldEvent::FocusLost) => self.enter_unfocused(&mut effects),
            (Phase::Focused(_), FieldEvent::CalendarIconActivated) => {
                // The popup takes focus away from the text input.
                effects.push(FieldEffect::ShowCalendar);
                self.enter_unfocused(&mut effects);
            }
            (phase, event) => log::trace!("Ignoring {event:?} in {phase:?}"),
        }
        effects
    }

    fn text_changed(&mut self, text: String, effects: &mut Vec<FieldEffect>) {
        self.state.raw_text = text;
        match self.phase {
            Phase::Unfocused => {
                self.state.is_valid = self.check_text();
                if self.state.is_valid {
                    effects.push(FieldEffect::RedrawCalendar);
                }
            }
            Phase::Focused(_) => {
                if self.state.last_seen_text.as_deref() == Some(self.state.raw_text.as_str()) {
                    log::trace!("Text {:?} already validated", self.state.raw_text);
                    return;
                }
                self.enter_validating(effects);
            }
        }
    }

    /// One validation pass: records the text it looked at
    fn check_text(&mut self) -> bool {
        self.state.last_seen_text = Some(self.state.raw_text.clone());
        self.validate()
    }

    fn enter_validating(&mut self, effects: &mut Vec<FieldEffect>) {
        self.phase = Phase::Focused(Validity::Validating);
        if self.check_text() {
            self.enter_valid(effects);
        } else {
            self.enter_invalid(effects);
        }
    }

    fn enter_valid(&mut self, effects: &mut Vec<FieldEffect>) {
        self.phase = Phase::Focused(Validity::Valid);
        log::debug!("Text {:?} is valid", self.state.raw_text);
        self.state.is_valid = true;
        effects.push(FieldEffect::RedrawCalendar);
        self.update_selected_date(effects);
    }

    fn update_selected_date(&mut self, effects: &mut Vec<FieldEffect>) {
        if self.state.raw_text.is_empty() {
            return;
        }
        let date = match self.resolve() {
            Ok(Some(date)) => date,
            Ok(None) => return,
            Err(e) => {
                log::warn!("Validated text no longer resolves: {e}");
                return;
            }
        };
        match self.state.selected_date {
            None => {
                self.state.last_valid_date = Some(date);
                self.set_selection(Some(date), effects);
            }
            Some(current) if !is_same_day(date, current) => {
                self.state.last_valid_date = Some(current);
                self.set_selection(Some(date), effects);
            }
            Some(_) => (),
        }
    }

    fn enter_invalid(&mut self, effects: &mut Vec<FieldEffect>) {
        self.phase = Phase::Focused(Validity::Invalid);
        log::debug!(
            "Text {:?} is invalid; keeping selection {:?}",
            self.state.raw_text,
            self.state.selected_date
        );
        self.state.is_valid = false;
        effects.push(FieldEffect::RedrawCalendar);
        // No rollback to `last_valid_date` here; the host decides.
    }

    fn enter_unfocused(&mut self, effects: &mut Vec<FieldEffect>) {
        self.phase = Phase::Unfocused;
        if !self.state.is_valid {
            effects.push(FieldEffect::RedrawCalendar);
            return;
        }
        if self.state.raw_text.is_empty() {
            return;
        }
        if let Ok(Some(date)) = self.resolve() {
            let text = self.format.format_date(date);
            self.replace_text(text, effects);
        }
    }

    fn step_month(&mut self, delta: i32, effects: &mut Vec<FieldEffect>) {
        let base = self.state.selected_date.unwrap_or_else(|| self.clock.today());
        match add_months(base, delta) {
            Ok(date) => self.assign_selected_date(Some(date), effects),
            Err(e) => log::warn!("Cannot move {delta} month(s) from {base}: {e}"),
        }
    }

    /// Assignment to the selected date from outside the text input: the
    /// calendar, the month buttons, or a binding
    fn assign_selected_date(&mut self, date: Option<Date>, effects: &mut Vec<FieldEffect>) {
        let changed = self.set_selection(date, effects);
        if self.phase == Phase::Unfocused {
            let text = date.map_or_else(String::new, |d| self.format.format_date(d));
            self.replace_text(text, effects);
            self.state.is_valid = self.check_text();
        } else if changed {
            // The text being edited stays, but the grid follows the selection.
            effects.push(FieldEffect::RedrawCalendar);
        }
    }

    /// Returns `true` if the selection changed
    fn set_selection(&mut self, date: Option<Date>, effects: &mut Vec<FieldEffect>) -> bool {
        let previous = std::mem::replace(&mut self.state.selected_date, date);
        if previous == date {
            return false;
        }
        log::debug!("Selected date changed from {previous:?} to {date:?}");
        effects.push(FieldEffect::SelectionChanged {
            previous,
            current: date,
        });
        true
    }

    /// Set the text programmatically, skipping the change notification when
    /// the text is already identical
    fn replace_text(&mut self, text: String, effects: &mut Vec<FieldEffect>) {
        if text != self.state.raw_text {
            effects.push(FieldEffect::TextReformatted(text.clone()));
            self.text_changed(text, effects);
        }
    }
}
