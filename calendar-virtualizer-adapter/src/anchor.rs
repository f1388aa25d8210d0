use core::fmt;

use calendar_virtualizer::{
    Axis, CalendarVirtualizer, FrameProvider, ItemId, LayoutItem, Point, ScrollPosition,
    VisibleItemsResult,
};

/// A scroll anchor that can be used to preserve visual position across viewport or data changes.
///
/// Typical use cases:
/// - resizing the viewport without the calendar jumping
/// - extending the dataset backwards (earlier months) while keeping the current month in place
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollAnchor {
    pub item: ItemId,
    /// Distance from the viewport's leading edge to the item's leading edge, along the scroll
    /// axis. Negative when the item starts before the viewport.
    pub offset_in_viewport: f64,
}

impl ScrollAnchor {
    /// Captures `layout_item` relative to a viewport at `offset`.
    pub fn from_layout_item(layout_item: &LayoutItem, offset: Point, axis: Axis) -> Self {
        Self {
            item: layout_item.item,
            offset_in_viewport: layout_item.frame.min_along(axis) - offset.along(axis),
        }
    }
}

impl fmt::Debug for ScrollAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollAnchor")
            .field("item", &self.item)
            .field("offset_in_viewport", &self.offset_in_viewport)
            .finish()
    }
}

/// Captures an anchor for the centermost item of a build made at `offset`.
pub fn capture_centermost_anchor<C>(
    result: &VisibleItemsResult<C>,
    offset: Point,
    axis: Axis,
) -> ScrollAnchor {
    ScrollAnchor::from_layout_item(&result.centermost_layout_item, offset, axis)
}

/// Lays out a previously captured anchor for a viewport at `offset`.
///
/// The returned item keeps its captured distance from the viewport's leading edge and can be
/// passed as the previous anchor of the next build. An item outside the current dataset is
/// replaced by the nearest item inside it.
pub fn apply_anchor<C: Clone, P: FrameProvider>(
    v: &CalendarVirtualizer<C, P>,
    anchor: &ScrollAnchor,
    offset: Point,
) -> LayoutItem {
    let axis = v.scroll_axis();
    let item = v.enumerator().clamp(anchor.item);
    let placed = v.anchor_item(item, offset, ScrollPosition::Centered);
    let target = offset.along(axis) + anchor.offset_in_viewport;
    LayoutItem::new(placed.item, placed.frame.with_min_along(axis, target))
}
