//! A date-entry field: free text, a `+N`/`-N` shorthand for "N days from
//! today", and a popup month grid, reconciled by one explicit state machine.
//!
//! Rendering is left to the host.  The host delivers UI events to a
//! [`DateField`], carries out the [`FieldEffect`]s it returns, and asks
//! [`CalendarGrid::generate`] for the 42 cells to draw.
pub mod datemath;
pub mod field;
pub mod format;
pub mod grid;
pub mod offset;
pub use crate::datemath::{Clock, FixedClock, OutOfTimeError, SystemClock};
pub use crate::field::{DateField, FieldEffect, FieldEvent, FieldState, Phase, Validity};
pub use crate::format::{DateFormat, ShortDate};
pub use crate::grid::{CalendarGrid, GridCell};
pub use crate::offset::{Offset, OffsetError};
