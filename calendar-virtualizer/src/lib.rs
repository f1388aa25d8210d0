//! A headless, incremental viewport virtualizer for month/day calendar layouts.
//!
//! For adapter-level utilities (anchor chaining, scroll anchoring), see the
//! `calendar-virtualizer-adapter` crate.
//!
//! The calendar is an unbounded, totally ordered sequence of items: month headers, weekday
//! rows and days. Given the anchor item of the previous frame and a new viewport, this crate
//! computes exactly the items whose frames intersect the viewport, without enumerating the
//! whole calendar and without recomputing geometry from scratch:
//!
//! - a bidirectional walk outward from the anchor, halted per direction by a layout-specific
//!   miss budget
//! - incremental month origins, with an adjacent-day shortcut for day frames
//! - multi-day range items, floating overlays and pinned weekday headers layered on top
//! - memoized content handles carried from one build to the next
//!
//! Nothing here depends on a UI toolkit. The embedding layer supplies:
//! - the viewport size and scroll offset
//! - content providers (see [`CalendarOptions`])
//! - optionally, a custom [`FrameProvider`] (the bundled [`GridFrameProvider`] lays months out
//!   as seven-column grids)
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod calendar;
mod day_range;
mod enumerator;
mod error;
mod frame;
mod item;
mod options;
mod overlay;
mod pinned;
mod session;
mod types;
mod virtualizer;
mod visible;


pub use calendar::{Day, DayRange, Month};
pub use chrono::Weekday;
pub use enumerator::ItemEnumerator;
pub use error::LayoutError;
pub use frame::{FrameProvider, GridFrameProvider, GridMetrics};
pub use item::{ItemId, LayoutItem, OverlayLocation, VisibleItemKind, WeekdayPosition};
pub use options::{
    CalendarOptions, DayItemProvider, DayRangeItemProvider, DayRangeLayoutContext,
    MonthHeaderItemProvider, MonthsLayout, OverlayItemProvider, OverlayLayoutContext,
    WeekdayItemProvider,
};
pub use session::{ContentCache, Session};
pub use types::{Axis, Point, Rect, ScrollPosition, Size};
pub use virtualizer::CalendarVirtualizer;
pub use visible::{VisibleItem, VisibleItemSet, VisibleItemsResult, WalkStats};
