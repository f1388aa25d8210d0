use alloc::collections::BTreeMap;
use alloc::collections::btree_map::Entry;

use crate::{Day, DayRange, LayoutItem, Month, Rect, VisibleItemKind};

/// A materialized item in a build's result.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibleItem<C> {
    pub kind: VisibleItemKind,
    pub content: C,
    pub frame: Rect,
}

/// The visible items of one build, keyed by identity.
///
/// Inserting a second item with an existing kind is a no-op: the first insertion wins.
/// Iteration is in ascending [`VisibleItemKind`] order, independent of discovery order.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibleItemSet<C> {
    items: BTreeMap<VisibleItemKind, VisibleItem<C>>,
}

impl<C> Default for VisibleItemSet<C> {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }
}

impl<C> VisibleItemSet<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` (and drops `item`) if an item with the same kind is already present.
    pub fn insert(&mut self, item: VisibleItem<C>) -> bool {
        match self.items.entry(item.kind) {
            Entry::Occupied(_) => {
                vtrace!(kind = ?item.kind, "VisibleItemSet: duplicate ignored");
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(item);
                true
            }
        }
    }

    pub fn get(&self, kind: &VisibleItemKind) -> Option<&VisibleItem<C>> {
        self.items.get(kind)
    }

    pub fn contains(&self, kind: &VisibleItemKind) -> bool {
        self.items.contains_key(kind)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VisibleItem<C>> {
        self.items.values()
    }

    pub fn kinds(&self) -> impl Iterator<Item = &VisibleItemKind> {
        self.items.keys()
    }
}

impl<C> IntoIterator for VisibleItemSet<C> {
    type Item = VisibleItem<C>;
    type IntoIter = alloc::collections::btree_map::IntoValues<VisibleItemKind, VisibleItem<C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_values()
    }
}

/// Everything a build discovered about the viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibleItemsResult<C> {
    pub visible_items: VisibleItemSet<C>,
    /// The visible item closest to the viewport's center; seed for the next build.
    ///
    /// Equal to the previous anchor when nothing was visible.
    pub centermost_layout_item: LayoutItem,
    /// First through last visible day, if any day was visible.
    pub visible_day_range: Option<DayRange>,
    pub frames_for_visible_months: BTreeMap<Month, Rect>,
    pub frames_for_visible_days: BTreeMap<Day, Rect>,
    /// Smallest valid scroll offset along the scroll axis, known once the first month is visible.
    pub minimum_scroll_offset: Option<f64>,
    /// Largest valid scroll offset along the scroll axis, known once the last month is visible.
    pub maximum_scroll_offset: Option<f64>,
    pub height_of_pinned_content: f64,
    pub walk_stats: WalkStats,
}

/// How far each walk direction went during a build (diagnostics).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Items enumerated looking backward, the anchor included.
    pub backward_steps: usize,
    /// Items enumerated looking forward.
    pub forward_steps: usize,
}
