use crate::datemath::Clock;
use crate::format::DateFormat;
use crate::offset::{evaluate, is_offset_like, OffsetError};
use thiserror::Error;
use time::Date;

/// Why the text in a field does not denote a date
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum InputError {
    #[error(transparent)]
    InvalidOperand(#[from] OffsetError),
    #[error("{0:?} is not a recognized date")]
    UnparseableDate(String),
}

/// Work out which date, if any, `text` stands for.
///
/// Empty text is valid and denotes no date.  Text shaped like an offset is
/// handled by the offset grammar alone, so a malformed offset is never handed
/// to `format`.  Anything else goes to `format`'s parser.
pub fn resolve_input<F, C>(text: &str, format: &F, clock: &C) -> Result<Option<Date>, InputError>
where
    F: DateFormat + ?Sized,
    C: Clock + ?Sized,
{
    if text.is_empty() {
        Ok(None)
    } else if is_offset_like(text) {
        Ok(Some(evaluate(text, clock)?))
    } else {
        format
            .parse_date(text)
            .map(Some)
            .ok_or_else(|| InputError::UnparseableDate(text.to_owned()))
    }
}
