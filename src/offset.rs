//! The `+N`/`-N` shorthand for "today plus or minus N days"
use crate::datemath::{add_days, Clock, OutOfTimeError};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::Date;

/// A validated day offset relative to today
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Offset {
    days: i32,
}

impl Offset {
    pub fn days(self) -> i32 {
        self.days
    }

    pub fn apply(self, today: Date) -> Result<Date, OutOfTimeError> {
        add_days(today, i64::from(self.days))
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.days < 0 {
            write!(f, "{}", self.days)
        } else {
            write!(f, "+{}", self.days)
        }
    }
}

impl FromStr for Offset {
    type Err = OffsetError;

    fn from_str(s: &str) -> Result<Offset, OffsetError> {
        if !is_offset_like(s) {
            return Err(OffsetError::NotAnOffset(s.to_owned()));
        }
        let negative = s.starts_with('-');
        // The sign is one byte, so this cannot split a character.
        let operand = &s[1..];
        let invalid = |fault| OffsetError::InvalidOperand {
            text: s.to_owned(),
            fault,
        };
        // A lone zero is "today" whichever sign it carries.
        if operand == "0" {
            return Ok(Offset { days: 0 });
        }
        if operand.starts_with('0') {
            return Err(invalid(OperandFault::LeadingZero));
        }
        if operand.chars().any(char::is_alphabetic) {
            return Err(invalid(OperandFault::ContainsLetters));
        }
        if !operand.chars().all(|ch| ch.is_ascii_digit()) {
            return Err(invalid(OperandFault::NotANumber));
        }
        let magnitude = operand
            .parse::<i32>()
            .map_err(|_| invalid(OperandFault::TooLarge))?;
        let days = if negative { -magnitude } else { magnitude };
        Ok(Offset { days })
    }
}

/// True iff `text` has the shape of an offset: a `+` or `-` followed by at
/// least one more character.  This says nothing about validity; it only
/// decides which validator applies.
pub fn is_offset_like(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(chars.next(), Some('+' | '-')) && chars.next().is_some()
}

pub fn validate(text: &str) -> bool {
    text.parse::<Offset>().is_ok()
}

/// Parse `text` as an offset and apply it to the clock's current date
pub fn evaluate<C: Clock + ?Sized>(text: &str, clock: &C) -> Result<Date, OffsetError> {
    let offset = text.parse::<Offset>()?;
    Ok(offset.apply(clock.today())?)
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum OffsetError {
    #[error("{0:?} is not of the form +N or -N")]
    NotAnOffset(String),
    #[error("invalid day offset {text:?}: {fault}")]
    InvalidOperand { text: String, fault: OperandFault },
    #[error(transparent)]
    OutOfTime(#[from] OutOfTimeError),
}

/// Why the part of an offset after the sign was rejected
#[derive(Copy, Clone, Debug, Eq, Error, Hash, PartialEq)]
pub enum OperandFault {
    #[error("leading zeros are not allowed")]
    LeadingZero,
    #[error("operand contains letters")]
    ContainsLetters,
    #[error("operand is not a number")]
    NotANumber,
    #[error("operand is too large")]
    TooLarge,
}
