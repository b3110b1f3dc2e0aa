//! Converting between dates and the text shown in the field
use time::{format_description::BorrowedFormatItem, macros::format_description, Date};

static SHORT_FMT: &[BorrowedFormatItem<'_>] =
    format_description!("[month padding:none]/[day padding:none]/[year]");

static HINT_FMT: &[BorrowedFormatItem<'_>] =
    format_description!("[month]/[day]/[year repr:last_two]");

static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

static LONG_MONTH_FMT: &[BorrowedFormatItem<'_>] =
    format_description!("[month repr:long] [day padding:none], [year]");

static SHORT_MONTH_FMT: &[BorrowedFormatItem<'_>] =
    format_description!("[month repr:short] [day padding:none], [year]");

/// The external parse/format capability the field delegates to for any text
/// that is not an offset
pub trait DateFormat {
    /// Best-effort parse of user-typed text.  Returns `None` if the text does
    /// not name a date.
    fn parse_date(&self, text: &str) -> Option<Date>;

    /// Canonical display form of `date`
    fn format_date(&self, date: Date) -> String;

    /// Placeholder text shown while the field is empty
    fn hint(&self, today: Date) -> String {
        format!("date ex: {}", self.format_date(today))
    }
}

/// US-style short dates, e.g. "10/19/2026"
///
/// Parsing also accepts ISO 8601 dates ("2026-10-19") and written-out
/// months ("October 19, 2026" or "Oct 19, 2026").
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ShortDate;

impl DateFormat for ShortDate {
    fn parse_date(&self, text: &str) -> Option<Date> {
        let text = text.trim();
        [SHORT_FMT, YMD_FMT, LONG_MONTH_FMT, SHORT_MONTH_FMT]
            .into_iter()
            .find_map(|fmt| Date::parse(text, &fmt).ok())
    }

    fn format_date(&self, date: Date) -> String {
        // Only years beyond four digits fail to format, and `Display` copes
        // with those.
        date.format(&SHORT_FMT).unwrap_or_else(|_| date.to_string())
    }

    fn hint(&self, today: Date) -> String {
        match today.format(&HINT_FMT) {
            Ok(s) => format!("date ex: {s}"),
            Err(_) => format!("date ex: {}", self.format_date(today)),
        }
    }
}
