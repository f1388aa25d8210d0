use core::iter;

use crate::{DayRange, ItemId, Month, WeekdayPosition};

/// Walks the canonical item order of a calendar.
///
/// Within each month the order is: month header, the weekday row (first to last position,
/// omitted when weekdays are pinned), then every day of the month that lies inside the dataset
/// bounds. Months follow each other in calendar order.
///
/// Iteration is pull-based: callers stop a direction by not asking for the next item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemEnumerator {
    visible_days: DayRange,
    includes_weekday_rows: bool,
}

impl ItemEnumerator {
    pub fn new(visible_days: DayRange, includes_weekday_rows: bool) -> Self {
        Self {
            visible_days,
            includes_weekday_rows,
        }
    }

    pub fn visible_days(&self) -> DayRange {
        self.visible_days
    }

    /// Whether `item` is one of the items this enumerator yields.
    pub fn contains(&self, item: &ItemId) -> bool {
        match *item {
            ItemId::MonthHeader(month) => self.visible_days.contains_month(&month),
            ItemId::WeekdayInMonth(_, month) => {
                self.includes_weekday_rows && self.visible_days.contains_month(&month)
            }
            ItemId::Day(day) => self.visible_days.contains(&day),
        }
    }

    /// The nearest item this enumerator yields. Days clamp to the dataset bounds; month items
    /// before or after the dataset become the first or last month header.
    pub fn clamp(&self, item: ItemId) -> ItemId {
        if self.contains(&item) {
            return item;
        }
        match item {
            ItemId::Day(day) => {
                ItemId::Day(day.clamp(self.visible_days.lower(), self.visible_days.upper()))
            }
            other => {
                let month = other.month().clamp(
                    self.visible_days.first_month(),
                    self.visible_days.last_month(),
                );
                ItemId::MonthHeader(month)
            }
        }
    }

    /// Yields `start` itself, then every item before it. Nothing when `start` is not
    /// [contained](Self::contains).
    pub fn backward_from(&self, start: ItemId) -> impl Iterator<Item = ItemId> + '_ {
        let first = self.contains(&start).then_some(start);
        iter::successors(first, move |item| self.previous(item))
    }

    /// Yields every item after `start` (exclusive). Nothing when `start` is not
    /// [contained](Self::contains).
    pub fn forward_from(&self, start: ItemId) -> impl Iterator<Item = ItemId> + '_ {
        let first = if self.contains(&start) {
            self.next(&start)
        } else {
            None
        };
        iter::successors(first, move |item| self.next(item))
    }

    pub fn previous(&self, item: &ItemId) -> Option<ItemId> {
        match *item {
            ItemId::MonthHeader(month) => {
                let previous_month = month.pred();
                self.visible_days
                    .contains_month(&previous_month)
                    .then(|| ItemId::Day(previous_month.last_day()))
            }
            ItemId::WeekdayInMonth(position, month) => Some(match position.pred() {
                Some(previous) => ItemId::WeekdayInMonth(previous, month),
                None => ItemId::MonthHeader(month),
            }),
            ItemId::Day(day) => {
                let lower = self.visible_days.lower();
                if day < lower {
                    return None;
                }
                if day == lower {
                    return Some(self.last_item_before_days(day.month));
                }
                Some(match day.pred_in_month() {
                    Some(previous) => ItemId::Day(previous),
                    None => self.last_item_before_days(day.month),
                })
            }
        }
    }

    pub fn next(&self, item: &ItemId) -> Option<ItemId> {
        match *item {
            ItemId::MonthHeader(month) => Some(if self.includes_weekday_rows {
                ItemId::WeekdayInMonth(WeekdayPosition::First, month)
            } else {
                self.first_day_item(month)
            }),
            ItemId::WeekdayInMonth(position, month) => Some(match position.succ() {
                Some(next) => ItemId::WeekdayInMonth(next, month),
                None => self.first_day_item(month),
            }),
            ItemId::Day(day) => {
                if day >= self.visible_days.upper() {
                    return None;
                }
                Some(match day.succ_in_month() {
                    Some(next) => ItemId::Day(next),
                    None => ItemId::MonthHeader(day.month.succ()),
                })
            }
        }
    }

    fn last_item_before_days(&self, month: Month) -> ItemId {
        if self.includes_weekday_rows {
            ItemId::WeekdayInMonth(WeekdayPosition::Last, month)
        } else {
            ItemId::MonthHeader(month)
        }
    }

    fn first_day_item(&self, month: Month) -> ItemId {
        let first = month.first_day();
        if first < self.visible_days.lower() {
            ItemId::Day(self.visible_days.lower())
        } else {
            ItemId::Day(first)
        }
    }
}
