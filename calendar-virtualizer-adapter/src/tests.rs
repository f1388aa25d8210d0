use crate::*;

use alloc::format;
use alloc::string::String;

use calendar_virtualizer::{
    Axis, CalendarOptions, CalendarVirtualizer, Day, DayRange, GridMetrics, ItemId, LayoutError,
    LayoutItem, Month, Point, Rect, ScrollPosition, Size,
};

fn day(year: i32, month: u32, day: u32) -> Day {
    Day::new(year, month, day)
}

fn options(first: Day, last: Day) -> CalendarOptions<String> {
    CalendarOptions::new(
        DayRange::new(first, last).unwrap(),
        |month| format!("header {month}"),
        |month, position| format!("weekday {month:?} {position:?}"),
        |day| format!("day {day}"),
    )
}

fn vertical_2024() -> CalendarVirtualizer<String> {
    CalendarVirtualizer::with_grid(
        options(day(2024, 1, 1), day(2024, 12, 31)),
        GridMetrics::new(350.0, 50.0),
        Size::new(350.0, 600.0),
    )
}

fn top_of_january() -> Controller<String> {
    Controller::new(
        vertical_2024(),
        ItemId::MonthHeader(Month::new(2024, 1)),
        ScrollPosition::FirstFullyVisiblePosition { padding: 0.0 },
    )
}

#[test]
fn controller_chains_anchors_between_scrolls() {
    let mut c = top_of_january();
    assert_eq!(c.anchor().frame, Rect::new(0.0, 0.0, 350.0, 50.0));
    assert!(c.last_result().is_none());

    let first = c.on_scroll(Point::ZERO);
    assert!(first.frames_for_visible_days.contains_key(&day(2024, 1, 1)));
    assert_eq!(first.minimum_scroll_offset, Some(0.0));
    assert_eq!(c.scroll_limits(), (Some(0.0), None));

    // January and February are 350 tall each, so March starts at 700.
    let second = c.on_scroll(Point::new(0.0, 700.0));
    assert_eq!(
        second.frames_for_visible_days.get(&day(2024, 3, 1)),
        Some(&Rect::new(200.0, 800.0, 50.0, 50.0))
    );
    assert!(!second.frames_for_visible_days.contains_key(&day(2024, 1, 1)));
    let centermost = second.centermost_layout_item;

    assert_eq!(c.offset(), Point::new(0.0, 700.0));
    assert_eq!(c.anchor(), &centermost);
    // The minimum stays known after the first month scrolled out.
    assert_eq!(c.scroll_limits(), (Some(0.0), None));
}

#[test]
fn clamped_scroll_respects_discovered_limits() {
    let mut c = top_of_january();
    c.on_scroll(Point::ZERO);

    // Unknown maximum: large offsets pass through.
    assert_eq!(c.clamp_offset(Point::new(0.0, 9000.0)), Point::new(0.0, 9000.0));

    c.on_scroll_clamped(Point::new(0.0, -300.0));
    assert_eq!(c.offset(), Point::ZERO);

    let result = c.scroll_to_item(
        ItemId::Day(day(2024, 12, 31)),
        ScrollPosition::LastFullyVisiblePosition { padding: 0.0 },
    );
    assert_eq!(
        result.frames_for_visible_days[&day(2024, 12, 31)].max_y(),
        600.0
    );
    assert_eq!(result.maximum_scroll_offset, Some(0.0));
    // Re-anchoring dropped the old minimum.
    assert_eq!(c.scroll_limits(), (None, Some(0.0)));

    c.on_scroll_clamped(Point::new(0.0, 500.0));
    assert_eq!(c.offset(), Point::ZERO);
}

#[test]
fn viewport_resize_keeps_the_anchor_in_place() {
    let mut c = top_of_january();
    c.on_scroll(Point::ZERO);
    let before = c.on_scroll(Point::new(0.0, 700.0)).frames_for_visible_days[&day(2024, 3, 15)];

    let after = c.on_viewport_size(Size::new(350.0, 800.0));
    assert_eq!(after.frames_for_visible_days[&day(2024, 3, 15)], before);
    assert!(after.frames_for_visible_days.contains_key(&day(2024, 5, 1)));
    assert_eq!(c.virtualizer().viewport_size(), Size::new(350.0, 800.0));
}

#[test]
fn anchor_preserves_position_across_prepend() {
    let offset = Point::new(0.0, 700.0);
    let mut v1 = vertical_2024();
    let march_15 = LayoutItem::new(
        ItemId::Day(day(2024, 3, 15)),
        Rect::new(200.0, 800.0, 50.0, 50.0),
    );
    let r1 = v1.visible_items(&march_15, offset);

    let anchor = capture_centermost_anchor(&r1, offset, Axis::Vertical);
    assert_eq!(anchor.item, ItemId::MonthHeader(Month::new(2024, 4)));
    assert_eq!(anchor.offset_in_viewport, 250.0);

    // Prepend a whole year: 2024 moves down in absolute terms but must stay put on screen.
    let mut v2 = CalendarVirtualizer::with_grid(
        options(day(2023, 1, 1), day(2024, 12, 31)),
        GridMetrics::new(350.0, 50.0),
        Size::new(350.0, 600.0),
    );
    let placed = apply_anchor(&v2, &anchor, offset);
    assert_eq!(placed.frame, Rect::new(0.0, 950.0, 350.0, 50.0));

    let r2 = v2.visible_items(&placed, offset);
    assert_eq!(r2.frames_for_visible_days, r1.frames_for_visible_days);
    assert_eq!(r2.visible_items, r1.visible_items);
}

#[test]
fn controller_reapplies_anchor_after_options_change() {
    let mut c = top_of_january();
    c.on_scroll(Point::ZERO);
    let before = c.on_scroll(Point::new(0.0, 700.0)).frames_for_visible_days.clone();
    let anchor = c.capture_anchor();

    c.virtualizer_mut()
        .set_options(options(day(2023, 6, 1), day(2024, 12, 31)));
    let after = c.apply_anchor(&anchor);
    assert_eq!(after.frames_for_visible_days, before);
    assert_eq!(c.scroll_limits(), (None, None));
}

#[test]
fn anchor_outside_a_shrunk_dataset_is_clamped() {
    let mut c = top_of_january();
    c.on_scroll(Point::ZERO);
    c.on_scroll(Point::new(0.0, 700.0));
    let anchor = c.capture_anchor();
    assert_eq!(anchor.item.month().year, 2024);

    c.virtualizer_mut()
        .set_options(options(day(2025, 1, 1), day(2025, 12, 31)));
    let after = c.apply_anchor(&anchor);
    assert!(after.frames_for_visible_days.contains_key(&day(2025, 1, 1)));
    assert!(after.frames_for_visible_days.keys().all(|d| d.month.year == 2025));
    assert_eq!(c.anchor().item.month().year, 2025);

    let result = c.scroll_to_item(
        ItemId::Day(day(2026, 3, 1)),
        ScrollPosition::LastFullyVisiblePosition { padding: 0.0 },
    );
    assert_eq!(
        result.frames_for_visible_days[&day(2025, 12, 31)].max_y(),
        c.offset().y + 600.0
    );
}

#[test]
fn failed_scroll_leaves_the_controller_untouched() {
    let mut opts = options(day(2024, 1, 1), day(2024, 12, 31));
    let range = DayRange::new(day(2024, 3, 14), day(2024, 3, 16)).unwrap();
    opts.day_ranges.insert(range);
    let v = CalendarVirtualizer::with_grid(
        opts,
        GridMetrics::new(350.0, 50.0),
        Size::new(350.0, 600.0),
    );
    let mut c = Controller::new(
        v,
        ItemId::MonthHeader(Month::new(2024, 3)),
        ScrollPosition::FirstFullyVisiblePosition { padding: 0.0 },
    );
    let anchor = *c.anchor();

    let err = c.try_on_scroll(Point::new(0.0, 10.0)).unwrap_err();
    assert_eq!(err, LayoutError::MissingDayRangeItemProvider { range });
    assert_eq!(c.offset(), Point::ZERO);
    assert_eq!(c.anchor(), &anchor);
    assert!(c.last_result().is_none());
}
