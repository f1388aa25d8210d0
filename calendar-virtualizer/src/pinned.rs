use crate::virtualizer::BuildState;
use crate::{
    CalendarVirtualizer, FrameProvider, Rect, VisibleItem, VisibleItemKind, WeekdayPosition,
};

impl<C: Clone, P: FrameProvider> CalendarVirtualizer<C, P> {
    /// Adds the sticky weekday row of a vertical layout with pinned weekdays.
    ///
    /// The row follows the viewport's top edge rather than the walked geometry. The first
    /// position's height is taken as the height of the whole pinned row.
    pub(crate) fn handle_pinned_weekdays(&self, state: &mut BuildState<C>, bounds: &Rect) {
        if !self.options().months_layout.pins_weekdays_to_top() {
            return;
        }

        for position in WeekdayPosition::ALL {
            let frame = self
                .frame_provider()
                .frame_of_pinned_weekday(position, bounds.min_y());
            let kind = VisibleItemKind::PinnedWeekday(position);
            let content = state.cache.value_for(kind, self.session().cache(), || {
                (self.options().weekday_item)(None, position)
            });
            state.out.visible_items.insert(VisibleItem {
                kind,
                content,
                frame,
            });
            if state.out.height_of_pinned_content.is_none() {
                state.out.height_of_pinned_content = Some(frame.height);
            }
        }
    }
}
