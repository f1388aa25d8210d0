use chrono::Weekday;

use crate::types::round_half_away;
use crate::{
    Axis, Day, ItemId, LayoutItem, Month, MonthsLayout, Point, Rect, Size, WeekdayPosition,
};

/// Turns item identifiers into frames.
///
/// Every frame is expressed relative to a month origin, which the virtualizer tracks and
/// propagates from month to month as it walks. Implementations must be pure: the same inputs
/// always produce the same frame.
pub trait FrameProvider {
    /// The size of a single day (and weekday) cell.
    fn day_size(&self) -> Size;

    fn frame_of_month(&self, month: Month, origin: Point) -> Rect;

    fn frame_of_month_header(&self, origin: Point) -> Rect;

    fn frame_of_weekday(&self, position: WeekdayPosition, origin: Point) -> Rect;

    fn frame_of_day(&self, day: Day, origin: Point) -> Rect;

    /// Frame of `day`, given the already computed frame of a day adjacent to it in the same
    /// month.
    ///
    /// This is a shortcut only: it must return exactly what [`Self::frame_of_day`] returns.
    fn frame_of_day_adjacent(
        &self,
        day: Day,
        adjacent_day: Day,
        adjacent_frame: Rect,
        origin: Point,
    ) -> Rect {
        let _ = (adjacent_day, adjacent_frame);
        self.frame_of_day(day, origin)
    }

    /// Recovers the origin of the month containing `item` from the item's frame.
    fn origin_of_month_containing(&self, item: &LayoutItem) -> Point;

    /// Origin of `month`, which directly precedes the month whose origin is `origin_of_next`.
    fn origin_of_month_before(&self, month: Month, origin_of_next: Point) -> Point;

    /// Origin of `month`, which directly follows the month whose origin is `origin_of_previous`.
    fn origin_of_month_after(&self, month: Month, origin_of_previous: Point) -> Point;

    /// Frame of a weekday pinned to the top of a vertically scrolling viewport.
    fn frame_of_pinned_weekday(&self, position: WeekdayPosition, vertical_offset: f64) -> Rect;
}

/// Metrics for [`GridFrameProvider`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridMetrics {
    pub month_width: f64,
    pub month_header_height: f64,
    /// Height of a day row (and of the weekday row).
    pub day_height: f64,
    pub horizontal_day_spacing: f64,
    pub vertical_day_spacing: f64,
    /// Space between consecutive months along the scroll axis.
    pub inter_month_spacing: f64,
    pub first_weekday: Weekday,
}

impl GridMetrics {
    /// Square-ish defaults: header as tall as a day row, no spacing, weeks starting on Monday.
    pub fn new(month_width: f64, day_height: f64) -> Self {
        Self {
            month_width,
            month_header_height: day_height,
            day_height,
            horizontal_day_spacing: 0.0,
            vertical_day_spacing: 0.0,
            inter_month_spacing: 0.0,
            first_weekday: Weekday::Mon,
        }
    }

    pub fn with_month_header_height(mut self, height: f64) -> Self {
        self.month_header_height = height;
        self
    }

    pub fn with_day_spacing(mut self, horizontal: f64, vertical: f64) -> Self {
        self.horizontal_day_spacing = horizontal;
        self.vertical_day_spacing = vertical;
        self
    }

    pub fn with_inter_month_spacing(mut self, spacing: f64) -> Self {
        self.inter_month_spacing = spacing;
        self
    }

    pub fn with_first_weekday(mut self, first_weekday: Weekday) -> Self {
        self.first_weekday = first_weekday;
        self
    }

    pub fn day_width(&self) -> f64 {
        (self.month_width - 6.0 * self.horizontal_day_spacing) / 7.0
    }
}

/// A seven-column month grid: a header row, an optional weekday row, then one row per week.
///
/// Vertical layouts stack months top to bottom, horizontal layouts place them left to right.
/// Pinned weekday rows start at `x = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridFrameProvider {
    axis: Axis,
    shows_weekday_row: bool,
    metrics: GridMetrics,
}

impl GridFrameProvider {
    pub fn new(layout: MonthsLayout, metrics: GridMetrics) -> Self {
        Self {
            axis: layout.scroll_axis(),
            shows_weekday_row: !layout.pins_weekdays_to_top(),
            metrics,
        }
    }

    pub fn metrics(&self) -> &GridMetrics {
        &self.metrics
    }

    fn column_step(&self) -> f64 {
        self.metrics.day_width() + self.metrics.horizontal_day_spacing
    }

    fn row_step(&self) -> f64 {
        self.metrics.day_height + self.metrics.vertical_day_spacing
    }

    fn weekday_row_offset(&self) -> f64 {
        self.metrics.month_header_height + self.metrics.vertical_day_spacing
    }

    fn first_week_offset(&self) -> f64 {
        if self.shows_weekday_row {
            self.weekday_row_offset() + self.row_step()
        } else {
            self.weekday_row_offset()
        }
    }

    fn month_height(&self, month: Month) -> f64 {
        let weeks = month.number_of_weeks(self.metrics.first_weekday) as f64;
        self.first_week_offset() + weeks * self.metrics.day_height
            + (weeks - 1.0) * self.metrics.vertical_day_spacing
    }

    fn cell(&self, origin: Point, column: u32, week: u32) -> Rect {
        Rect::new(
            origin.x + column as f64 * self.column_step(),
            origin.y + self.first_week_offset() + week as f64 * self.row_step(),
            self.metrics.day_width(),
            self.metrics.day_height,
        )
    }

    /// Column and week of a cell frame produced by [`Self::cell`] for `origin`.
    fn cell_position(&self, origin: Point, frame: &Rect) -> Option<(u32, u32)> {
        let column_step = self.column_step();
        let row_step = self.row_step();
        if !(column_step > 0.0 && row_step > 0.0) {
            return None;
        }
        let column = round_half_away((frame.x - origin.x) / column_step);
        let week = round_half_away((frame.y - origin.y - self.first_week_offset()) / row_step);
        if !(0.0..7.0).contains(&column) || week < 0.0 {
            return None;
        }
        Some((column as u32, week as u32))
    }
}

impl FrameProvider for GridFrameProvider {
    fn day_size(&self) -> Size {
        Size::new(self.metrics.day_width(), self.metrics.day_height)
    }

    fn frame_of_month(&self, month: Month, origin: Point) -> Rect {
        Rect::new(
            origin.x,
            origin.y,
            self.metrics.month_width,
            self.month_height(month),
        )
    }

    fn frame_of_month_header(&self, origin: Point) -> Rect {
        Rect::new(
            origin.x,
            origin.y,
            self.metrics.month_width,
            self.metrics.month_header_height,
        )
    }

    fn frame_of_weekday(&self, position: WeekdayPosition, origin: Point) -> Rect {
        Rect::new(
            origin.x + position.index() as f64 * self.column_step(),
            origin.y + self.weekday_row_offset(),
            self.metrics.day_width(),
            self.metrics.day_height,
        )
    }

    fn frame_of_day(&self, day: Day, origin: Point) -> Rect {
        let first_weekday = self.metrics.first_weekday;
        self.cell(origin, day.column(first_weekday), day.week(first_weekday))
    }

    fn frame_of_day_adjacent(
        &self,
        day: Day,
        adjacent_day: Day,
        adjacent_frame: Rect,
        origin: Point,
    ) -> Rect {
        if !day.is_adjacent_in_month(&adjacent_day) {
            return self.frame_of_day(day, origin);
        }
        let Some((column, week)) = self.cell_position(origin, &adjacent_frame) else {
            return self.frame_of_day(day, origin);
        };
        let (column, week) = if day > adjacent_day {
            if column == 6 {
                (0, week + 1)
            } else {
                (column + 1, week)
            }
        } else if column == 0 {
            match week.checked_sub(1) {
                Some(week) => (6, week),
                None => return self.frame_of_day(day, origin),
            }
        } else {
            (column - 1, week)
        };
        self.cell(origin, column, week)
    }

    fn origin_of_month_containing(&self, item: &LayoutItem) -> Point {
        let frame = item.frame;
        match item.item {
            ItemId::MonthHeader(_) => frame.origin(),
            ItemId::WeekdayInMonth(position, _) => Point::new(
                frame.x - position.index() as f64 * self.column_step(),
                frame.y - self.weekday_row_offset(),
            ),
            ItemId::Day(day) => {
                let first_weekday = self.metrics.first_weekday;
                Point::new(
                    frame.x - day.column(first_weekday) as f64 * self.column_step(),
                    frame.y
                        - self.first_week_offset()
                        - day.week(first_weekday) as f64 * self.row_step(),
                )
            }
        }
    }

    fn origin_of_month_before(&self, month: Month, origin_of_next: Point) -> Point {
        let spacing = self.metrics.inter_month_spacing;
        match self.axis {
            Axis::Vertical => Point::new(
                origin_of_next.x,
                origin_of_next.y - spacing - self.month_height(month),
            ),
            Axis::Horizontal => Point::new(
                origin_of_next.x - spacing - self.metrics.month_width,
                origin_of_next.y,
            ),
        }
    }

    fn origin_of_month_after(&self, month: Month, origin_of_previous: Point) -> Point {
        let spacing = self.metrics.inter_month_spacing;
        match self.axis {
            Axis::Vertical => Point::new(
                origin_of_previous.x,
                origin_of_previous.y + self.month_height(month.pred()) + spacing,
            ),
            Axis::Horizontal => Point::new(
                origin_of_previous.x + self.metrics.month_width + spacing,
                origin_of_previous.y,
            ),
        }
    }

    fn frame_of_pinned_weekday(&self, position: WeekdayPosition, vertical_offset: f64) -> Rect {
        Rect::new(
            position.index() as f64 * self.column_step(),
            vertical_offset,
            self.metrics.day_width(),
            self.metrics.day_height,
        )
    }
}
