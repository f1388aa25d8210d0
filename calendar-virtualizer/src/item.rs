use crate::{Day, DayRange, Month, Rect};

/// A column of the weekday row, counted from the calendar's first weekday.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeekdayPosition {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Last,
}

impl WeekdayPosition {
    pub const ALL: [WeekdayPosition; 7] = [
        Self::First,
        Self::Second,
        Self::Third,
        Self::Fourth,
        Self::Fifth,
        Self::Sixth,
        Self::Last,
    ];

    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn succ(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn pred(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }
}

/// The canonical addressable unit of the calendar's primary layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemId {
    MonthHeader(Month),
    WeekdayInMonth(WeekdayPosition, Month),
    Day(Day),
}

impl ItemId {
    pub fn month(&self) -> Month {
        match self {
            Self::MonthHeader(month) => *month,
            Self::WeekdayInMonth(_, month) => *month,
            Self::Day(day) => day.month,
        }
    }

    pub fn day(&self) -> Option<Day> {
        match self {
            Self::Day(day) => Some(*day),
            _ => None,
        }
    }
}

/// An item identifier together with its frame, valid for a single build.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutItem {
    pub item: ItemId,
    pub frame: Rect,
}

impl LayoutItem {
    pub fn new(item: ItemId, frame: Rect) -> Self {
        Self { item, frame }
    }
}

/// Where a floating overlay item is anchored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OverlayLocation {
    MonthHeader(Month),
    Day(Day),
}

/// Identity of a visible item. Two visible items with the same kind are the same item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VisibleItemKind {
    MonthHeader(Month),
    WeekdayInMonth(WeekdayPosition, Month),
    Day(Day),
    DayRange(DayRange),
    Overlay(OverlayLocation),
    PinnedWeekday(WeekdayPosition),
}

impl VisibleItemKind {
    /// Whether content for this kind depends only on the kind itself, and can therefore be
    /// carried over from one build to the next.
    pub fn is_cacheable(&self) -> bool {
        !matches!(self, Self::DayRange(_) | Self::Overlay(_))
    }
}

impl From<ItemId> for VisibleItemKind {
    fn from(item: ItemId) -> Self {
        match item {
            ItemId::MonthHeader(month) => Self::MonthHeader(month),
            ItemId::WeekdayInMonth(position, month) => Self::WeekdayInMonth(position, month),
            ItemId::Day(day) => Self::Day(day),
        }
    }
}
