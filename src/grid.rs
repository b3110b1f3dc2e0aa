//! The fixed 6×7 month grid shown in the calendar popup
use crate::datemath::{add_days, day_of_week, first_of_month, OutOfTimeError};
use std::iter::successors;
use std::slice::{Chunks, Iter};
use time::{Date, Month};

pub const DAYS_IN_WEEK: usize = 7;

pub const WEEKS_IN_GRID: usize = 6;

pub const GRID_CELLS: usize = DAYS_IN_WEEK * WEEKS_IN_GRID;

/// One day of a [`CalendarGrid`]
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct GridCell {
    date: Date,
    is_faded: bool,
    is_selected: bool,
}

impl GridCell {
    pub fn date(&self) -> Date {
        self.date
    }

    pub fn day(&self) -> u8 {
        self.date.day()
    }

    pub fn month(&self) -> Month {
        self.date.month()
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// True if the cell pads the grid with a day from the previous or next
    /// month
    pub fn is_faded(&self) -> bool {
        self.is_faded
    }

    pub fn is_selected(&self) -> bool {
        self.is_selected
    }
}

/// Six weeks of days, Sunday first, covering the month of a reference date
#[derive(Clone, Debug, Eq, PartialEq)]
// Invariant: `cells` has exactly GRID_CELLS elements
pub struct CalendarGrid {
    reference: Date,
    cells: Vec<GridCell>,
}

impl CalendarGrid {
    /// Lay out the month containing `reference`.  The first cell is the
    /// Sunday on or before the first of the month, and the cell for
    /// `reference` itself is marked as selected.
    ///
    /// Fails only for months so close to the limits of the calendar that the
    /// padding days cannot be represented.
    pub fn generate(reference: Date) -> Result<CalendarGrid, OutOfTimeError> {
        let anchor = first_of_month(reference)?;
        let start = add_days(anchor, -i64::from(day_of_week(anchor)))?;
        let cells = successors(Some(start), |d| d.next_day())
            .take(GRID_CELLS)
            .map(|date| GridCell {
                date,
                is_faded: date.month() != reference.month(),
                is_selected: marks_as_selected(date, reference),
            })
            .collect::<Vec<_>>();
        if cells.len() < GRID_CELLS {
            return Err(OutOfTimeError);
        }
        Ok(CalendarGrid { reference, cells })
    }

    pub fn reference(&self) -> Date {
        self.reference
    }

    /// Month name and year, e.g. "October 2026"
    pub fn title(&self) -> String {
        format!("{} {}", self.reference.month(), self.reference.year())
    }

    /// Number of leading cells taken from the previous month
    pub fn start_offset(&self) -> usize {
        self.cells.iter().take_while(|c| c.is_faded).count()
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<&GridCell> {
        self.cells.get(index)
    }

    pub fn iter(&self) -> Iter<'_, GridCell> {
        self.cells.iter()
    }

    /// The grid's rows, each seven cells long
    pub fn weeks(&self) -> Chunks<'_, GridCell> {
        self.cells.chunks(DAYS_IN_WEEK)
    }

    pub fn position_of(&self, date: Date) -> Option<usize> {
        self.cells.iter().position(|c| c.date == date)
    }
}

impl<'a> IntoIterator for &'a CalendarGrid {
    type Item = &'a GridCell;
    type IntoIter = Iter<'a, GridCell>;

    fn into_iter(self) -> Iter<'a, GridCell> {
        self.iter()
    }
}

/// Whether a grid cell for `date` gets the selection mark in a grid drawn for
/// `reference`.
///
/// Only the month and day are compared, not the year.  Within a single grid
/// this makes no difference, but it means the same day in another year is
/// considered a match.
pub fn marks_as_selected(date: Date, reference: Date) -> bool {
    date.day() == reference.day() && date.month() == reference.month()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datemath::WeekdayExt;
    use time::macros::date;

    fn grid(reference: Date) -> CalendarGrid {
        match CalendarGrid::generate(reference) {
            Ok(g) => g,
            Err(e) => panic!("grid for {reference} failed: {e}"),
        }
    }

    #[test]
    fn test_october_2026() {
        let g = grid(date!(2026 - 10 - 19));
        assert_eq!(g.cells().len(), GRID_CELLS);
        assert_eq!(g.start_offset(), 4);
        assert_eq!(g.title(), "October 2026");
        let dates = g.iter().map(GridCell::date).collect::<Vec<_>>();
        assert_eq!(dates[0], date!(2026 - 09 - 27));
        assert_eq!(dates[3], date!(2026 - 09 - 30));
        assert_eq!(dates[4], date!(2026 - 10 - 01));
        assert_eq!(dates[34], date!(2026 - 10 - 31));
        assert_eq!(dates[35], date!(2026 - 11 - 01));
        assert_eq!(dates[41], date!(2026 - 11 - 07));
        let faded = g
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_faded())
            .map(|(i, _)| i)
            .collect::<Vec<_>>();
        assert_eq!(faded, [0, 1, 2, 3, 35, 36, 37, 38, 39, 40, 41]);
        let selected = g
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_selected())
            .map(|(i, _)| i)
            .collect::<Vec<_>>();
        assert_eq!(selected, [22]);
        assert_eq!(g.position_of(date!(2026 - 10 - 19)), Some(22));
    }

    #[test]
    fn test_month_starting_on_sunday() {
        let g = grid(date!(2026 - 02 - 14));
        assert_eq!(g.start_offset(), 0);
        assert_eq!(g.get(0).map(GridCell::date), Some(date!(2026 - 02 - 01)));
        assert_eq!(g.get(27).map(GridCell::date), Some(date!(2026 - 02 - 28)));
        assert_eq!(g.get(28).map(GridCell::date), Some(date!(2026 - 03 - 01)));
        assert_eq!(g.get(41).map(GridCell::date), Some(date!(2026 - 03 - 14)));
        assert_eq!(g.get(42), None);
    }

    #[test]
    fn test_padding_from_previous_year() {
        let g = grid(date!(2026 - 01 - 01));
        assert_eq!(g.get(0).map(GridCell::date), Some(date!(2025 - 12 - 28)));
        assert!(
            g.iter().take(4).all(GridCell::is_faded),
            "December days should be faded"
        );
        assert_eq!(g.get(4).map(GridCell::is_selected), Some(true));
        assert_eq!(g.get(4).map(GridCell::is_faded), Some(false));
    }

    #[test]
    fn test_invariants_hold_for_every_month() {
        let mut reference = date!(2023 - 01 - 31);
        for _ in 0..48 {
            let g = grid(reference);
            assert_eq!(g.cells().len(), GRID_CELLS);
            assert_eq!(g.weeks().len(), WEEKS_IN_GRID);
            for (i, cell) in g.iter().enumerate() {
                assert_eq!(usize::from(cell.date().weekday().index0()), i % DAYS_IN_WEEK);
                assert_eq!(cell.is_faded(), cell.month() != reference.month());
            }
            let in_month = g.iter().filter(|c| !c.is_faded()).count();
            assert_eq!(
                in_month,
                usize::from(reference.month().length(reference.year()))
            );
            assert_eq!(g.iter().filter(|c| c.is_selected()).count(), 1);
            reference = match crate::datemath::add_months(reference, 1) {
                Ok(d) => d,
                Err(e) => panic!("{e}"),
            };
        }
    }

    #[test]
    fn test_generate_is_pure() {
        let reference = date!(2024 - 02 - 29);
        assert_eq!(grid(reference), grid(reference));
        let first = grid(reference).iter().copied().collect::<Vec<_>>();
        let second = (&grid(reference)).into_iter().copied().collect::<Vec<_>>();
        assert_eq!(first, second);
    }

    #[test]
    fn test_selection_ignores_year() {
        assert!(
            marks_as_selected(date!(2025 - 10 - 19), date!(2026 - 10 - 19)),
            "same month and day in another year is marked"
        );
        assert!(
            !marks_as_selected(date!(2026 - 10 - 18), date!(2026 - 10 - 19)),
            "another day is not marked"
        );
        let last_year = grid(date!(2025 - 10 - 19));
        let this_year = grid(date!(2026 - 10 - 19));
        let marked = |g: &CalendarGrid| g.iter().find(|c| c.is_selected()).map(GridCell::day);
        assert_eq!(marked(&last_year), Some(19));
        assert_eq!(marked(&this_year), Some(19));
    }

    #[test]
    fn test_weeks() {
        let g = grid(date!(2026 - 10 - 19));
        let rows = g.weeks().collect::<Vec<_>>();
        assert_eq!(rows.len(), 6);
        assert!(rows.iter().all(|r| r.len() == DAYS_IN_WEEK), "rows of seven");
        assert_eq!(rows[3][1].date(), date!(2026 - 10 - 19));
    }

    #[test]
    fn test_end_of_time() {
        assert_eq!(CalendarGrid::generate(Date::MAX), Err(OutOfTimeError));
        // January -9999 starts on a Monday, and the Sunday before it cannot
        // be represented.
        assert_eq!(CalendarGrid::generate(Date::MIN), Err(OutOfTimeError));
        // April -9999 starts on a Sunday, so it needs no padding from
        // before it.
        let april = match Date::from_calendar_date(-9999, Month::April, 15) {
            Ok(d) => d,
            Err(e) => panic!("{e}"),
        };
        let g = grid(april);
        assert_eq!(g.start_offset(), 0);
        assert_eq!(
            g.get(0).map(GridCell::date),
            Date::from_calendar_date(-9999, Month::April, 1).ok()
        );
    }
}
