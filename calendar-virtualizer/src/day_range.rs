//! Multi-day span items.
//!
//! A day range is materialized once per build, the first time any of its days is visible. Its
//! layout context covers every day of the range, including days that are off-screen, so the
//! provider can draw a continuous shape.

use alloc::vec::Vec;

use crate::virtualizer::{BuildState, MonthOrigins};
use crate::{
    CalendarVirtualizer, Day, DayRange, DayRangeLayoutContext, FrameProvider, ItemId, LayoutError,
    LayoutItem, Rect, VisibleItem, VisibleItemKind,
};

impl<C: Clone, P: FrameProvider> CalendarVirtualizer<C, P> {
    /// Materializes every not-yet-handled registered range containing the visible `day`.
    pub(crate) fn handle_day_ranges(
        &self,
        day: Day,
        frame: Rect,
        state: &mut BuildState<C>,
    ) -> Result<(), LayoutError> {
        for range in self.options().day_ranges.iter().filter(|r| r.contains(&day)) {
            if state.out.handled_day_ranges.contains(range) {
                continue;
            }
            let Some(provider) = &self.options().day_range_item else {
                vwarn!(%range, "day range visible without a day range item provider");
                return Err(LayoutError::MissingDayRangeItemProvider { range: *range });
            };

            let (context, bounds) =
                self.day_range_layout_context(*range, day, frame, &mut state.origins)?;
            vtrace!(
                %range,
                days = context.days_and_frames.len(),
                "materializing day range"
            );
            let content = provider(&context);
            state.out.visible_items.insert(VisibleItem {
                kind: VisibleItemKind::DayRange(*range),
                content,
                frame: bounds,
            });
            state.out.handled_day_ranges.insert(*range);
        }
        Ok(())
    }

    /// Lays out every day of `range`, walking outward from `day`, whose frame is known.
    ///
    /// Returns the context with frames local to the range's bounding rect, and that bounding
    /// rect in content coordinates. Both are pixel aligned.
    pub(crate) fn day_range_layout_context(
        &self,
        range: DayRange,
        day: Day,
        frame: Rect,
        origins: &mut MonthOrigins,
    ) -> Result<(DayRangeLayoutContext, Rect), LayoutError> {
        if !range.contains(&day) {
            vwarn!(%day, %range, "day range asked to track a day it does not contain");
            return Err(LayoutError::DayOutsideRange { day, range });
        }
        let known = LayoutItem::new(ItemId::Day(day), frame);

        let mut days_and_frames = Vec::new();
        let mut last_handled = known;
        for item in self.enumerator().backward_from(known.item) {
            let ItemId::Day(member) = item else {
                continue;
            };
            if member < range.lower() {
                break;
            }
            let layout_item = self.layout_item(item, &last_handled, origins)?;
            days_and_frames.push((member, layout_item.frame));
            last_handled = layout_item;
        }
        days_and_frames.reverse();

        let mut last_handled = known;
        for item in self.enumerator().forward_from(known.item) {
            let ItemId::Day(member) = item else {
                continue;
            };
            if member > range.upper() {
                break;
            }
            let layout_item = self.layout_item(item, &last_handled, origins)?;
            days_and_frames.push((member, layout_item.frame));
            last_handled = layout_item;
        }

        let bounds = days_and_frames
            .iter()
            .map(|(_, frame)| *frame)
            .reduce(|acc, frame| acc.union(&frame))
            .unwrap_or(known.frame);

        let scale = self.options().scale;
        let local = |frame: &Rect| frame.translated(-bounds.x, -bounds.y).aligned_to_pixels(scale);
        let context = DayRangeLayoutContext {
            day_range: range,
            days_and_frames: days_and_frames
                .iter()
                .map(|(day, frame)| (*day, local(frame)))
                .collect(),
            bounding_unioned_rect_of_days: local(&bounds),
        };
        Ok((context, bounds.aligned_to_pixels(scale)))
    }
}
