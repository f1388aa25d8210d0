//! Contract violations.
//!
//! None of these are recoverable at runtime: they signal an inconsistent configuration or a
//! misbehaving collaborator. The `try_*` entry points surface them as values so tests can assert
//! on them; the plain entry points abort with the error's message.

use thiserror::Error;

use crate::{Day, DayRange, Month};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A visible day belongs to a registered day range, but no day range item provider is set.
    #[error("day range {range} is visible but no day range item provider is registered")]
    MissingDayRangeItemProvider { range: DayRange },

    /// The origin of `month` could not be derived from an adjacent month with a known origin.
    ///
    /// This happens when the enumerator skips months or disagrees with the frame provider about
    /// ordering.
    #[error("cannot derive the origin of month {month}: no adjacent month origin is known")]
    MissingMonthOrigin { month: Month },

    /// A day range was asked to track a day that it does not contain.
    #[error("day {day} is not a member of day range {range}")]
    DayOutsideRange { day: Day, range: DayRange },

    /// The month index is outside `1..=12` or the day of month is past the month's last day.
    #[error("day {day} does not exist")]
    InvalidDay { day: Day },

    #[error("inverted day range: {lower} is after {upper}")]
    InvertedDayRange { lower: Day, upper: Day },
}
