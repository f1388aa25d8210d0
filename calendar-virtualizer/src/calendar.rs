use core::fmt;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::LayoutError;

/// A calendar month, ordered by `(year, month)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Month {
    pub year: i32,
    /// 1-based month index (`1..=12`).
    pub month: u32,
}

impl Month {
    pub const fn new(year: i32, month: u32) -> Self {
        debug_assert!(month >= 1 && month <= 12, "month index must be in 1..=12");
        Self { year, month }
    }

    pub fn succ(self) -> Self {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    pub fn pred(self) -> Self {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    pub fn number_of_days(&self) -> u32 {
        match self.month {
            4 | 6 | 9 | 11 => 30,
            2 if NaiveDate::from_ymd_opt(self.year, 2, 29).is_some() => 29,
            2 => 28,
            _ => 31,
        }
    }

    pub fn first_day(self) -> Day {
        Day { month: self, day: 1 }
    }

    pub fn last_day(self) -> Day {
        Day {
            month: self,
            day: self.number_of_days(),
        }
    }

    /// The weekday of the 1st of this month.
    ///
    /// Months outside `chrono`'s supported range fall back to Monday.
    pub fn first_weekday(&self) -> Weekday {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.weekday())
            .unwrap_or(Weekday::Mon)
    }

    /// Column (0..7) of the 1st of this month in a grid starting on `first_weekday`.
    pub fn leading_empty_days(&self, first_weekday: Weekday) -> u32 {
        columns_between(first_weekday, self.first_weekday())
    }

    /// Number of week rows needed to lay out every day of the month.
    pub fn number_of_weeks(&self, first_weekday: Weekday) -> u32 {
        (self.leading_empty_days(first_weekday) + self.number_of_days() - 1) / 7 + 1
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

fn columns_between(first_weekday: Weekday, weekday: Weekday) -> u32 {
    (weekday.num_days_from_monday() + 7 - first_weekday.num_days_from_monday()) % 7
}

/// A calendar day, ordered by `(month, day)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Day {
    pub month: Month,
    /// 1-based day of month.
    pub day: u32,
}

impl Day {
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Self {
            month: Month::new(year, month),
            day,
        }
    }

    /// Like [`Day::new`], but rejects days that do not exist on the calendar.
    pub fn try_new(year: i32, month: u32, day: u32) -> Result<Self, LayoutError> {
        let candidate = Self {
            month: Month { year, month },
            day,
        };
        if !candidate.exists() {
            return Err(LayoutError::InvalidDay { day: candidate });
        }
        Ok(candidate)
    }

    /// Whether the month index is in `1..=12` and the day of month is within that month.
    pub fn exists(&self) -> bool {
        (1..=12).contains(&self.month.month)
            && (1..=self.month.number_of_days()).contains(&self.day)
    }

    /// The following day in the same month, if any.
    pub fn succ_in_month(self) -> Option<Self> {
        (self.day < self.month.number_of_days()).then(|| Day {
            month: self.month,
            day: self.day + 1,
        })
    }

    /// The preceding day in the same month, if any.
    pub fn pred_in_month(self) -> Option<Self> {
        (self.day > 1).then(|| Day {
            month: self.month,
            day: self.day - 1,
        })
    }

    /// Whether `other` is the day right before or right after this one, in the same month.
    pub fn is_adjacent_in_month(&self, other: &Day) -> bool {
        self.month == other.month && self.day.abs_diff(other.day) == 1
    }

    /// Column (0..7) of this day in a grid starting on `first_weekday`.
    pub fn column(&self, first_weekday: Weekday) -> u32 {
        (self.month.leading_empty_days(first_weekday) + self.day - 1) % 7
    }

    /// Week row (0-based) of this day within its month.
    pub fn week(&self, first_weekday: Weekday) -> u32 {
        (self.month.leading_empty_days(first_weekday) + self.day - 1) / 7
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.month, self.day)
    }
}

/// A closed, non-empty interval of days.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayRange {
    lower: Day,
    upper: Day,
}

impl DayRange {
    pub fn new(lower: Day, upper: Day) -> Result<Self, LayoutError> {
        for day in [lower, upper] {
            if !day.exists() {
                vwarn!(%day, "DayRange::new: day does not exist");
                return Err(LayoutError::InvalidDay { day });
            }
        }
        if lower > upper {
            vwarn!(%lower, %upper, "DayRange::new: inverted bounds");
            return Err(LayoutError::InvertedDayRange { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    pub fn single(day: Day) -> Self {
        Self {
            lower: day,
            upper: day,
        }
    }

    /// All days of the months `first..=last`.
    pub fn months(first: Month, last: Month) -> Result<Self, LayoutError> {
        Self::new(first.first_day(), last.last_day())
    }

    pub fn lower(&self) -> Day {
        self.lower
    }

    pub fn upper(&self) -> Day {
        self.upper
    }

    pub fn first_month(&self) -> Month {
        self.lower.month
    }

    pub fn last_month(&self) -> Month {
        self.upper.month
    }

    pub fn contains(&self, day: &Day) -> bool {
        self.lower <= *day && *day <= self.upper
    }

    pub fn contains_month(&self, month: &Month) -> bool {
        self.lower.month <= *month && *month <= self.upper.month
    }
}

impl fmt::Display for DayRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.lower, self.upper)
    }
}
