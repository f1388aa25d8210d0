use crate::virtualizer::BuildState;
use crate::{
    CalendarVirtualizer, FrameProvider, OverlayLayoutContext, OverlayLocation, Rect, VisibleItem,
    VisibleItemKind,
};

impl<C: Clone, P: FrameProvider> CalendarVirtualizer<C, P> {
    /// Adds an overlay item for every registered location whose target is visible in this build.
    ///
    /// Overlays cover the whole viewport and position themselves using the target frame in the
    /// context. Targets that are not visible are skipped; nothing is carried over from earlier
    /// builds.
    pub(crate) fn handle_overlays(&self, state: &mut BuildState<C>, bounds: &Rect) {
        let Some(provider) = &self.options().overlay_item else {
            return;
        };

        for location in &self.options().overlaid_item_locations {
            let target = match location {
                OverlayLocation::Day(day) => state.out.frames_for_visible_days.get(day).copied(),
                OverlayLocation::MonthHeader(month) => state
                    .out
                    .frames_for_visible_months
                    .get(month)
                    .map(|month_frame| {
                        self.frame_provider()
                            .frame_of_month_header(month_frame.origin())
                    }),
            };
            let Some(target) = target else {
                vtrace!(location = ?location, "overlay target not visible");
                continue;
            };

            let context = OverlayLayoutContext {
                overlaid_item_location: *location,
                overlaid_item_frame: target
                    .translated(-bounds.x, -bounds.y)
                    .aligned_to_pixels(self.options().scale),
                available_size: bounds.size(),
            };
            let content = provider(&context);
            state.out.visible_items.insert(VisibleItem {
                kind: VisibleItemKind::Overlay(*location),
                content,
                frame: *bounds,
            });
        }
    }
}
