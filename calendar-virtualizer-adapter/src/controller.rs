use calendar_virtualizer::{
    CalendarVirtualizer, FrameProvider, GridFrameProvider, ItemId, LayoutError, LayoutItem, Point,
    ScrollPosition, Size, VisibleItemsResult,
};

use crate::{ScrollAnchor, apply_anchor};

/// A framework-neutral controller that wraps a [`CalendarVirtualizer`] and provides common
/// adapter workflows (anchor chaining, clamped scrolling, scroll-to-item).
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_scroll` / `on_scroll_clamped` when the UI reports a new scroll offset
/// - `on_viewport_size` when the viewport is resized
/// - `scroll_to_item` for programmatic jumps
///
/// Each of these runs a build and returns its result; the centermost item becomes the anchor of
/// the next build.
#[derive(Clone, Debug)]
pub struct Controller<C, P = GridFrameProvider> {
    v: CalendarVirtualizer<C, P>,
    anchor: LayoutItem,
    offset: Point,
    last_result: Option<VisibleItemsResult<C>>,
    min_scroll_offset: Option<f64>,
    max_scroll_offset: Option<f64>,
}

impl<C: Clone, P: FrameProvider> Controller<C, P> {
    /// Creates a controller scrolled to `Point::ZERO`, with `initial_item` (clamped into the
    /// dataset) placed at `position`.
    ///
    /// No build runs until the first `on_scroll`.
    pub fn new(
        v: CalendarVirtualizer<C, P>,
        initial_item: ItemId,
        position: ScrollPosition,
    ) -> Self {
        let anchor = v.anchor_item(v.enumerator().clamp(initial_item), Point::ZERO, position);
        Self {
            v,
            anchor,
            offset: Point::ZERO,
            last_result: None,
            min_scroll_offset: None,
            max_scroll_offset: None,
        }
    }

    pub fn virtualizer(&self) -> &CalendarVirtualizer<C, P> {
        &self.v
    }

    pub fn virtualizer_mut(&mut self) -> &mut CalendarVirtualizer<C, P> {
        &mut self.v
    }

    pub fn into_virtualizer(self) -> CalendarVirtualizer<C, P> {
        self.v
    }

    /// The anchor the next build starts from.
    pub fn anchor(&self) -> &LayoutItem {
        &self.anchor
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn last_result(&self) -> Option<&VisibleItemsResult<C>> {
        self.last_result.as_ref()
    }

    /// Scroll limits discovered so far, along the scroll axis.
    pub fn scroll_limits(&self) -> (Option<f64>, Option<f64>) {
        (self.min_scroll_offset, self.max_scroll_offset)
    }

    /// Call this when the UI reports a scroll offset change (e.g. user wheel/drag).
    ///
    /// # Panics
    /// Panics on a layout contract violation, like [`CalendarVirtualizer::visible_items`].
    pub fn on_scroll(&mut self, offset: Point) -> &VisibleItemsResult<C> {
        let result = self.v.visible_items(&self.anchor, offset);
        self.accept(offset, result)
    }

    /// Same as [`Self::on_scroll`], but reports contract violations instead of panicking.
    ///
    /// On error the controller is left as it was.
    pub fn try_on_scroll(&mut self, offset: Point) -> Result<&VisibleItemsResult<C>, LayoutError> {
        let result = self.v.try_visible_items(&self.anchor, offset)?;
        Ok(self.accept(offset, result))
    }

    /// Like [`Self::on_scroll`], but first clamps `offset` to the known scroll limits.
    pub fn on_scroll_clamped(&mut self, offset: Point) -> &VisibleItemsResult<C> {
        let offset = self.clamp_offset(offset);
        self.on_scroll(offset)
    }

    /// Clamps `offset` along the scroll axis to the scroll limits discovered so far.
    ///
    /// A limit is only known once the first (or last) month has been on screen. When both are
    /// known and conflict (content shorter than the viewport), the minimum wins.
    pub fn clamp_offset(&self, offset: Point) -> Point {
        let axis = self.v.scroll_axis();
        let mut along = offset.along(axis);
        if let Some(max) = self.max_scroll_offset {
            along = along.min(max);
        }
        if let Some(min) = self.min_scroll_offset {
            along = along.max(min);
        }
        offset.with_along(axis, along)
    }

    /// Moves `item` to `position` within the current viewport and rebuilds. Items outside the
    /// dataset are clamped to the nearest item inside it.
    ///
    /// The calendar is re-anchored around `item`, so previously discovered scroll limits are
    /// dropped.
    pub fn scroll_to_item(
        &mut self,
        item: ItemId,
        position: ScrollPosition,
    ) -> &VisibleItemsResult<C> {
        let item = self.v.enumerator().clamp(item);
        self.anchor = self.v.anchor_item(item, self.offset, position);
        self.min_scroll_offset = None;
        self.max_scroll_offset = None;
        self.on_scroll(self.offset)
    }

    /// Resizes the viewport, keeping the current anchor at the same distance from the viewport's
    /// leading edge, and rebuilds.
    pub fn on_viewport_size(&mut self, size: Size) -> &VisibleItemsResult<C> {
        let anchor = self.capture_anchor();
        self.v.set_viewport_size(size);
        self.anchor = apply_anchor(&self.v, &anchor, self.offset);
        // The maximum depends on the viewport extent.
        self.max_scroll_offset = None;
        self.on_scroll(self.offset)
    }

    /// Captures the current anchor relative to the current offset.
    pub fn capture_anchor(&self) -> ScrollAnchor {
        ScrollAnchor::from_layout_item(&self.anchor, self.offset, self.v.scroll_axis())
    }

    /// Applies a previously captured anchor at the current offset and rebuilds.
    ///
    /// Use this after replacing the options (e.g. a larger dataset) to keep the anchored item
    /// in place. Previously discovered scroll limits are dropped.
    pub fn apply_anchor(&mut self, anchor: &ScrollAnchor) -> &VisibleItemsResult<C> {
        self.anchor = apply_anchor(&self.v, anchor, self.offset);
        self.min_scroll_offset = None;
        self.max_scroll_offset = None;
        self.on_scroll(self.offset)
    }

    fn accept(&mut self, offset: Point, result: VisibleItemsResult<C>) -> &VisibleItemsResult<C> {
        self.offset = offset;
        self.anchor = result.centermost_layout_item;
        if let Some(min) = result.minimum_scroll_offset {
            self.min_scroll_offset = Some(min);
        }
        if let Some(max) = result.maximum_scroll_offset {
            self.max_scroll_offset = Some(max);
        }
        self.last_result.insert(result)
    }
}
