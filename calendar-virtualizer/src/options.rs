use alloc::collections::BTreeSet;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{Axis, Day, DayRange, Month, OverlayLocation, Rect, Size, WeekdayPosition};

/// How months are arranged, which also selects the scroll axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MonthsLayout {
    /// Months stacked top to bottom.
    Vertical { pin_weekdays_to_top: bool },
    /// Months side by side, left to right.
    Horizontal,
}

impl MonthsLayout {
    pub fn scroll_axis(&self) -> Axis {
        match self {
            Self::Vertical { .. } => Axis::Vertical,
            Self::Horizontal => Axis::Horizontal,
        }
    }

    pub fn pins_weekdays_to_top(&self) -> bool {
        matches!(
            self,
            Self::Vertical {
                pin_weekdays_to_top: true
            }
        )
    }

    /// Consecutive off-screen items a walk direction tolerates before it stops.
    ///
    /// Vertical rows never wrap, so the first miss means every later item is off-screen too.
    /// Horizontal months wrap days onto rows, so an item can miss while the next row still hits.
    pub fn max_consecutive_misses(&self) -> usize {
        match self {
            Self::Vertical { .. } => 0,
            Self::Horizontal => 12,
        }
    }
}

impl Default for MonthsLayout {
    fn default() -> Self {
        Self::Vertical {
            pin_weekdays_to_top: false,
        }
    }
}

/// Layout information handed to a day range item provider.
///
/// Frames are local to the day range's bounding rect and aligned to device pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct DayRangeLayoutContext {
    pub day_range: DayRange,
    /// Every laid out day of the range, in ascending order.
    pub days_and_frames: Vec<(Day, Rect)>,
    /// The union of all day frames, in the same local coordinate space.
    pub bounding_unioned_rect_of_days: Rect,
}

/// Layout information handed to an overlay item provider.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayLayoutContext {
    pub overlaid_item_location: OverlayLocation,
    /// Frame of the overlaid item, relative to the viewport and aligned to device pixels.
    pub overlaid_item_frame: Rect,
    pub available_size: Size,
}

pub type MonthHeaderItemProvider<C> = Arc<dyn Fn(Month) -> C + Send + Sync>;
/// `month` is `None` for pinned weekdays.
pub type WeekdayItemProvider<C> = Arc<dyn Fn(Option<Month>, WeekdayPosition) -> C + Send + Sync>;
pub type DayItemProvider<C> = Arc<dyn Fn(Day) -> C + Send + Sync>;
pub type DayRangeItemProvider<C> = Arc<dyn Fn(&DayRangeLayoutContext) -> C + Send + Sync>;
pub type OverlayItemProvider<C> = Arc<dyn Fn(&OverlayLayoutContext) -> C + Send + Sync>;

/// Content and layout configuration for [`crate::CalendarVirtualizer`].
///
/// `C` is an opaque content handle (e.g. a view model). Handles for month headers, weekdays and
/// days are memoized between builds, so providers must return equivalent content for equal
/// inputs.
pub struct CalendarOptions<C> {
    /// Every day the calendar can show.
    pub visible_days: DayRange,
    pub months_layout: MonthsLayout,
    /// Device scale used for pixel alignment.
    pub scale: f64,

    pub month_header_item: MonthHeaderItemProvider<C>,
    pub weekday_item: WeekdayItemProvider<C>,
    pub day_item: DayItemProvider<C>,

    /// Multi-day spans rendered as a single item.
    pub day_ranges: BTreeSet<DayRange>,
    /// Required whenever a day of `day_ranges` becomes visible.
    pub day_range_item: Option<DayRangeItemProvider<C>>,

    pub overlaid_item_locations: BTreeSet<OverlayLocation>,
    pub overlay_item: Option<OverlayItemProvider<C>>,
}

impl<C> Clone for CalendarOptions<C> {
    fn clone(&self) -> Self {
        Self {
            visible_days: self.visible_days,
            months_layout: self.months_layout,
            scale: self.scale,
            month_header_item: Arc::clone(&self.month_header_item),
            weekday_item: Arc::clone(&self.weekday_item),
            day_item: Arc::clone(&self.day_item),
            day_ranges: self.day_ranges.clone(),
            day_range_item: self.day_range_item.clone(),
            overlaid_item_locations: self.overlaid_item_locations.clone(),
            overlay_item: self.overlay_item.clone(),
        }
    }
}

impl<C> CalendarOptions<C> {
    pub fn new(
        visible_days: DayRange,
        month_header_item: impl Fn(Month) -> C + Send + Sync + 'static,
        weekday_item: impl Fn(Option<Month>, WeekdayPosition) -> C + Send + Sync + 'static,
        day_item: impl Fn(Day) -> C + Send + Sync + 'static,
    ) -> Self {
        Self {
            visible_days,
            months_layout: MonthsLayout::default(),
            scale: 1.0,
            month_header_item: Arc::new(month_header_item),
            weekday_item: Arc::new(weekday_item),
            day_item: Arc::new(day_item),
            day_ranges: BTreeSet::new(),
            day_range_item: None,
            overlaid_item_locations: BTreeSet::new(),
            overlay_item: None,
        }
    }

    pub fn with_months_layout(mut self, months_layout: MonthsLayout) -> Self {
        self.months_layout = months_layout;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_day_range_item_provider(
        mut self,
        day_ranges: impl IntoIterator<Item = DayRange>,
        provider: impl Fn(&DayRangeLayoutContext) -> C + Send + Sync + 'static,
    ) -> Self {
        self.day_ranges = day_ranges.into_iter().collect();
        self.day_range_item = Some(Arc::new(provider));
        self
    }

    pub fn with_overlay_item_provider(
        mut self,
        locations: impl IntoIterator<Item = OverlayLocation>,
        provider: impl Fn(&OverlayLayoutContext) -> C + Send + Sync + 'static,
    ) -> Self {
        self.overlaid_item_locations = locations.into_iter().collect();
        self.overlay_item = Some(Arc::new(provider));
        self
    }

    pub(crate) fn pinned_weekdays(&self) -> bool {
        self.months_layout.pins_weekdays_to_top()
    }
}

impl<C> core::fmt::Debug for CalendarOptions<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CalendarOptions")
            .field("visible_days", &self.visible_days)
            .field("months_layout", &self.months_layout)
            .field("scale", &self.scale)
            .field("day_ranges", &self.day_ranges)
            .field("has_day_range_item", &self.day_range_item.is_some())
            .field("overlaid_item_locations", &self.overlaid_item_locations)
            .field("has_overlay_item", &self.overlay_item.is_some())
            .finish_non_exhaustive()
    }
}
