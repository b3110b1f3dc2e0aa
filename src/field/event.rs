use time::Date;

/// A UI event delivered to a [`DateField`](super::DateField)
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldEvent {
    FocusGained,
    FocusLost,
    /// The text in the input changed, either because the user typed or
    /// because the host set it
    TextChanged(String),
    CalendarIconActivated,
    NextMonthRequested,
    PrevMonthRequested,
    /// The host's binding wrote a new value to the selected date
    SelectedDateChanged(Option<Date>),
    CalendarDayClicked(Date),
    CalendarPopupClosed,
}

/// Something the host UI must do in response to an event
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldEffect {
    /// The calendar grid is stale and should be regenerated
    RedrawCalendar,
    ShowCalendar,
    DismissCalendar,
    /// Give keyboard focus back to the text input
    FocusTextInput,
    /// The field replaced its own text with the canonical form of a date
    TextReformatted(String),
    SelectionChanged {
        previous: Option<Date>,
        current: Option<Date>,
    },
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Phase {
    #[default]
    Unfocused,
    Focused(Validity),
}

impl Phase {
    pub fn is_focused(self) -> bool {
        matches!(self, Phase::Focused(_))
    }
}

/// Substate of [`Phase::Focused`]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Validity {
    /// Transient; a field is never left in this state once an event has
    /// been handled
    Validating,
    Valid,
    Invalid,
}
