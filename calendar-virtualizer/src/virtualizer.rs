use alloc::collections::{BTreeMap, BTreeSet};

use crate::session::{ContentCache, Session};
use crate::{
    Axis, CalendarOptions, Day, DayRange, FrameProvider, GridFrameProvider, GridMetrics,
    ItemEnumerator, ItemId, LayoutError, LayoutItem, Month, Point, Rect, ScrollPosition, Size,
    VisibleItem, VisibleItemKind, VisibleItemSet, VisibleItemsResult, WalkStats, WeekdayPosition,
};

/// A headless, incremental viewport virtualizer for month/day calendar layouts.
///
/// Each call to [`Self::visible_items`] starts from the previous build's anchor (its centermost
/// item) and walks the calendar outward in both directions until items stop intersecting the
/// viewport. Geometry is derived incrementally from month origins, so the cost of a build is
/// proportional to what is on screen (plus the distance scrolled), never to the size of the
/// calendar.
///
/// This type does not hold any UI objects: content handles `C` come from the providers in
/// [`CalendarOptions`], frames come from a [`FrameProvider`].
#[derive(Clone, Debug)]
pub struct CalendarVirtualizer<C, P = GridFrameProvider> {
    options: CalendarOptions<C>,
    frames: P,
    enumerator: ItemEnumerator,
    viewport_size: Size,
    session: Session<C>,
}

impl<C: Clone> CalendarVirtualizer<C, GridFrameProvider> {
    /// Creates a virtualizer laid out by a [`GridFrameProvider`] matching `options.months_layout`.
    pub fn with_grid(
        options: CalendarOptions<C>,
        metrics: GridMetrics,
        viewport_size: Size,
    ) -> Self {
        let frames = GridFrameProvider::new(options.months_layout, metrics);
        Self::new(options, frames, viewport_size)
    }
}

impl<C: Clone, P: FrameProvider> CalendarVirtualizer<C, P> {
    pub fn new(options: CalendarOptions<C>, frames: P, viewport_size: Size) -> Self {
        vdebug!(
            visible_days = %options.visible_days,
            layout = ?options.months_layout,
            width = viewport_size.width,
            height = viewport_size.height,
            "CalendarVirtualizer::new"
        );
        Self {
            enumerator: enumerator_for(&options),
            options,
            frames,
            viewport_size,
            session: Session::new(),
        }
    }

    pub fn options(&self) -> &CalendarOptions<C> {
        &self.options
    }

    /// Replaces the options. Memoized content is discarded, since providers may have changed.
    pub fn set_options(&mut self, options: CalendarOptions<C>) {
        vtrace!(visible_days = %options.visible_days, "CalendarVirtualizer::set_options");
        self.enumerator = enumerator_for(&options);
        self.options = options;
        self.session = Session::new();
    }

    pub fn frame_provider(&self) -> &P {
        &self.frames
    }

    pub fn enumerator(&self) -> &ItemEnumerator {
        &self.enumerator
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    pub fn set_viewport_size(&mut self, size: Size) {
        self.viewport_size = size;
    }

    pub fn scroll_axis(&self) -> Axis {
        self.options.months_layout.scroll_axis()
    }

    pub fn session(&self) -> &Session<C> {
        &self.session
    }

    /// Drops all memoized content.
    pub fn reset_session(&mut self) {
        self.session = Session::new();
    }

    /// Height reserved at the top of the viewport for pinned weekdays (0 when not pinned).
    pub fn pinned_content_height(&self) -> f64 {
        if self.options.pinned_weekdays() {
            self.frames
                .frame_of_pinned_weekday(WeekdayPosition::First, 0.0)
                .height
        } else {
            0.0
        }
    }

    /// Computes the visible items for a viewport at `offset`.
    ///
    /// `previous_anchor` is usually the previous result's `centermost_layout_item`, or the
    /// output of [`Self::anchor_item`] after a jump.
    ///
    /// # Panics
    /// Panics on a contract violation (see [`LayoutError`]). Use [`Self::try_visible_items`] to
    /// observe violations as values.
    pub fn visible_items(
        &mut self,
        previous_anchor: &LayoutItem,
        offset: Point,
    ) -> VisibleItemsResult<C> {
        match self.try_visible_items(previous_anchor, offset) {
            Ok(result) => result,
            Err(err) => panic!("calendar layout contract violated: {err}"),
        }
    }

    /// Same as [`Self::visible_items`], but reports contract violations instead of panicking.
    ///
    /// On error the session is left as it was before the call.
    pub fn try_visible_items(
        &mut self,
        previous_anchor: &LayoutItem,
        offset: Point,
    ) -> Result<VisibleItemsResult<C>, LayoutError> {
        let (result, cache) = self.build(previous_anchor, offset).inspect_err(|_err| {
            vwarn!(error = %_err, "visible item build failed");
        })?;
        self.session = self.session.next(cache);
        Ok(result)
    }

    /// Lays out `item` as if its month started at `offset`, then moves it along the scroll axis
    /// to satisfy `position` for a viewport at `offset`.
    ///
    /// For a month header the whole month is positioned and the header follows it. The session
    /// is not touched.
    pub fn anchor_item(&self, item: ItemId, offset: Point, position: ScrollPosition) -> LayoutItem {
        let axis = self.scroll_axis();
        let viewport = Rect::from_origin_size(offset, self.viewport_size);
        let reference = match item {
            ItemId::MonthHeader(month) => self.frames.frame_of_month(month, offset),
            ItemId::WeekdayInMonth(weekday, _) => self.frames.frame_of_weekday(weekday, offset),
            ItemId::Day(day) => self.frames.frame_of_day(day, offset),
        };
        let extent = reference.size().along(axis);
        let target = match position {
            ScrollPosition::Centered => viewport.mid_along(axis) - extent / 2.0,
            ScrollPosition::FirstFullyVisiblePosition { padding } => {
                viewport.min_along(axis) + padding + self.pinned_content_height()
            }
            ScrollPosition::LastFullyVisiblePosition { padding } => {
                viewport.max_along(axis) - padding - extent
            }
        };
        let positioned = reference.with_min_along(axis, target);
        let frame = match item {
            ItemId::MonthHeader(_) => self.frames.frame_of_month_header(positioned.origin()),
            _ => positioned,
        };
        vtrace!(item = ?item, ?position, y = frame.y, x = frame.x, "anchor_item");
        LayoutItem::new(item, frame)
    }

    fn build(
        &self,
        previous_anchor: &LayoutItem,
        offset: Point,
    ) -> Result<(VisibleItemsResult<C>, ContentCache<C>), LayoutError> {
        let bounds = Rect::from_origin_size(offset, self.viewport_size);
        let extended_bounds = bounds.union(&previous_anchor.frame);
        vdebug!(
            anchor = ?previous_anchor.item,
            x = offset.x,
            y = offset.y,
            "build visible items"
        );

        if !self.enumerator.contains(&previous_anchor.item) {
            vwarn!(
                anchor = ?previous_anchor.item,
                visible_days = %self.enumerator.visible_days(),
                "anchor lies outside the visible days; nothing can be laid out from it"
            );
        }

        let mut state = BuildState::new(self.options.months_layout.max_consecutive_misses());
        state.origins.insert_containing(previous_anchor, &self.frames);

        let backward = self.enumerator.backward_from(previous_anchor.item);
        let backward_steps =
            self.walk(backward, previous_anchor, &bounds, &extended_bounds, &mut state)?;
        let forward = self.enumerator.forward_from(previous_anchor.item);
        let forward_steps =
            self.walk(forward, previous_anchor, &bounds, &extended_bounds, &mut state)?;
        state.stats = WalkStats {
            backward_steps,
            forward_steps,
        };

        self.handle_pinned_weekdays(&mut state, &bounds);
        self.handle_overlays(&mut state, &bounds);

        let BuildState {
            cache, out, stats, ..
        } = state;
        vdebug!(
            visible = out.visible_items.len(),
            backward_steps = stats.backward_steps,
            forward_steps = stats.forward_steps,
            "build finished"
        );
        Ok((out.into_result(*previous_anchor, stats), cache))
    }

    /// Walks one direction until the miss budget is exhausted. Returns the number of items
    /// enumerated.
    fn walk(
        &self,
        items: impl Iterator<Item = ItemId>,
        anchor: &LayoutItem,
        bounds: &Rect,
        extended_bounds: &Rect,
        state: &mut BuildState<C>,
    ) -> Result<usize, LayoutError> {
        let mut last_handled = *anchor;
        let mut misses = MissCounter::new(state.tolerated_misses);
        let mut steps = 0usize;

        for item in items {
            steps += 1;
            let layout_item = self.layout_item(item, &last_handled, &mut state.origins)?;
            if layout_item.frame.intersects(extended_bounds) {
                misses.record_hit();
                if layout_item.frame.intersects(bounds) {
                    self.handle_visible_item(&layout_item, bounds, state)?;
                }
            } else if misses.record_miss() {
                vtrace!(item = ?item, steps, "walk direction halted");
                break;
            }
            last_handled = layout_item;
        }
        Ok(steps)
    }

    /// Derives the frame of `item` from the month origins known so far, using the adjacent-day
    /// shortcut when `last_handled` is the neighbouring day.
    pub(crate) fn layout_item(
        &self,
        item: ItemId,
        last_handled: &LayoutItem,
        origins: &mut MonthOrigins,
    ) -> Result<LayoutItem, LayoutError> {
        origins.insert_containing(last_handled, &self.frames);
        let origin = origins.origin_of(item.month(), &self.frames)?;
        let frame = match item {
            ItemId::MonthHeader(_) => self.frames.frame_of_month_header(origin),
            ItemId::WeekdayInMonth(position, _) => self.frames.frame_of_weekday(position, origin),
            ItemId::Day(day) => match last_handled.item {
                ItemId::Day(last_day) if day.is_adjacent_in_month(&last_day) => self
                    .frames
                    .frame_of_day_adjacent(day, last_day, last_handled.frame, origin),
                _ => self.frames.frame_of_day(day, origin),
            },
        };
        Ok(LayoutItem::new(item, frame))
    }

    fn handle_visible_item(
        &self,
        layout_item: &LayoutItem,
        bounds: &Rect,
        state: &mut BuildState<C>,
    ) -> Result<(), LayoutError> {
        let item = layout_item.item;
        let kind = VisibleItemKind::from(item);
        let content = state
            .cache
            .value_for(kind, self.session.cache(), || self.provide_content(item));
        state.out.visible_items.insert(VisibleItem {
            kind,
            content,
            frame: layout_item.frame,
        });

        let month = item.month();
        let origin = state.origins.origin_of(month, &self.frames)?;
        let month_frame = *state
            .out
            .frames_for_visible_months
            .entry(month)
            .or_insert_with(|| self.frames.frame_of_month(month, origin));
        state.out.consider_centermost(layout_item, bounds);

        if let ItemId::Day(day) = item {
            state.out.record_visible_day(day, layout_item.frame);
            self.handle_day_ranges(day, layout_item.frame, state)?;
            self.handle_content_boundaries(month, &month_frame, bounds, state);
        }
        Ok(())
    }

    fn provide_content(&self, item: ItemId) -> C {
        match item {
            ItemId::MonthHeader(month) => (self.options.month_header_item)(month),
            ItemId::WeekdayInMonth(position, month) => {
                (self.options.weekday_item)(Some(month), position)
            }
            ItemId::Day(day) => (self.options.day_item)(day),
        }
    }

    /// Records scroll limits once the first or last month of the calendar is on screen.
    fn handle_content_boundaries(
        &self,
        month: Month,
        month_frame: &Rect,
        bounds: &Rect,
        state: &mut BuildState<C>,
    ) {
        if !month_frame.intersects(bounds) {
            return;
        }
        let axis = self.scroll_axis();
        let visible_days = self.options.visible_days;
        if month == visible_days.first_month() {
            state.out.minimum_scroll_offset =
                Some(month_frame.min_along(axis) - self.pinned_content_height());
        }
        if month == visible_days.last_month() {
            state.out.maximum_scroll_offset =
                Some(month_frame.max_along(axis) - self.viewport_size.along(axis));
        }
    }
}

fn enumerator_for<C>(options: &CalendarOptions<C>) -> ItemEnumerator {
    ItemEnumerator::new(options.visible_days, !options.pinned_weekdays())
}

/// Counts consecutive items that missed the extended bounds in one walk direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct MissCounter {
    tolerated: usize,
    consecutive: usize,
}

impl MissCounter {
    pub(crate) fn new(tolerated: usize) -> Self {
        Self {
            tolerated,
            consecutive: 0,
        }
    }

    pub(crate) fn record_hit(&mut self) {
        self.consecutive = 0;
    }

    /// Returns `true` once the run of misses exceeds the tolerated count.
    pub(crate) fn record_miss(&mut self) -> bool {
        self.consecutive += 1;
        self.consecutive > self.tolerated
    }
}

/// Month origins discovered during one build.
#[derive(Clone, Debug, Default)]
pub(crate) struct MonthOrigins {
    origins: BTreeMap<Month, Point>,
}

impl MonthOrigins {
    /// Seeds the origin of the month containing `item`, unless it is already known.
    pub(crate) fn insert_containing<P: FrameProvider>(&mut self, item: &LayoutItem, frames: &P) {
        self.origins
            .entry(item.item.month())
            .or_insert_with(|| frames.origin_of_month_containing(item));
    }

    /// Returns the origin of `month`, deriving it from an adjacent known month if needed.
    pub(crate) fn origin_of<P: FrameProvider>(
        &mut self,
        month: Month,
        frames: &P,
    ) -> Result<Point, LayoutError> {
        if let Some(origin) = self.origins.get(&month) {
            return Ok(*origin);
        }
        let origin = if let Some(previous) = self.origins.get(&month.pred()) {
            frames.origin_of_month_after(month, *previous)
        } else if let Some(next) = self.origins.get(&month.succ()) {
            frames.origin_of_month_before(month, *next)
        } else {
            vwarn!(%month, "no adjacent month origin is known");
            return Err(LayoutError::MissingMonthOrigin { month });
        };
        self.origins.insert(month, origin);
        Ok(origin)
    }
}

pub(crate) struct BuildState<C> {
    pub(crate) tolerated_misses: usize,
    pub(crate) origins: MonthOrigins,
    pub(crate) cache: ContentCache<C>,
    pub(crate) out: ResultBuilder<C>,
    pub(crate) stats: WalkStats,
}

impl<C> BuildState<C> {
    pub(crate) fn new(tolerated_misses: usize) -> Self {
        Self {
            tolerated_misses,
            origins: MonthOrigins::default(),
            cache: ContentCache::default(),
            out: ResultBuilder::default(),
            stats: WalkStats::default(),
        }
    }
}

/// Accumulates the fields of a [`VisibleItemsResult`] during a build.
pub(crate) struct ResultBuilder<C> {
    pub(crate) visible_items: VisibleItemSet<C>,
    centermost: Option<(LayoutItem, f64)>,
    first_visible_day: Option<Day>,
    last_visible_day: Option<Day>,
    pub(crate) frames_for_visible_months: BTreeMap<Month, Rect>,
    pub(crate) frames_for_visible_days: BTreeMap<Day, Rect>,
    pub(crate) minimum_scroll_offset: Option<f64>,
    pub(crate) maximum_scroll_offset: Option<f64>,
    pub(crate) height_of_pinned_content: Option<f64>,
    pub(crate) handled_day_ranges: BTreeSet<DayRange>,
}

impl<C> Default for ResultBuilder<C> {
    fn default() -> Self {
        Self {
            visible_items: VisibleItemSet::new(),
            centermost: None,
            first_visible_day: None,
            last_visible_day: None,
            frames_for_visible_months: BTreeMap::new(),
            frames_for_visible_days: BTreeMap::new(),
            minimum_scroll_offset: None,
            maximum_scroll_offset: None,
            height_of_pinned_content: None,
            handled_day_ranges: BTreeSet::new(),
        }
    }
}

impl<C> ResultBuilder<C> {
    fn consider_centermost(&mut self, layout_item: &LayoutItem, bounds: &Rect) {
        let distance = layout_item.frame.midpoint_distance_squared(bounds);
        match self.centermost {
            Some((_, best)) if best <= distance => {}
            _ => self.centermost = Some((*layout_item, distance)),
        }
    }

    fn record_visible_day(&mut self, day: Day, frame: Rect) {
        self.frames_for_visible_days.insert(day, frame);
        if self.first_visible_day.is_none_or(|first| day < first) {
            self.first_visible_day = Some(day);
        }
        if self.last_visible_day.is_none_or(|last| day > last) {
            self.last_visible_day = Some(day);
        }
    }

    fn into_result(
        self,
        previous_anchor: LayoutItem,
        walk_stats: WalkStats,
    ) -> VisibleItemsResult<C> {
        let visible_day_range = match (self.first_visible_day, self.last_visible_day) {
            (Some(first), Some(last)) => DayRange::new(first, last).ok(),
            _ => None,
        };
        VisibleItemsResult {
            visible_items: self.visible_items,
            centermost_layout_item: self
                .centermost
                .map(|(item, _)| item)
                .unwrap_or(previous_anchor),
            visible_day_range,
            frames_for_visible_months: self.frames_for_visible_months,
            frames_for_visible_days: self.frames_for_visible_days,
            minimum_scroll_offset: self.minimum_scroll_offset,
            maximum_scroll_offset: self.maximum_scroll_offset,
            height_of_pinned_content: self.height_of_pinned_content.unwrap_or(0.0),
            walk_stats,
        }
    }
}
