use alloc::collections::BTreeMap;

use crate::VisibleItemKind;

/// Content handles keyed by item identity.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentCache<C> {
    entries: BTreeMap<VisibleItemKind, C>,
}

impl<C> Default for ContentCache<C> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<C: Clone> ContentCache<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: &VisibleItemKind) -> Option<&C> {
        self.entries.get(kind)
    }

    pub fn contains(&self, kind: &VisibleItemKind) -> bool {
        self.entries.contains_key(kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the content for `kind`, looking in this cache, then `previous`, then calling
    /// `provide`. Whatever is found is stored in this cache.
    pub(crate) fn value_for(
        &mut self,
        kind: VisibleItemKind,
        previous: &ContentCache<C>,
        provide: impl FnOnce() -> C,
    ) -> C {
        if let Some(content) = self.entries.get(&kind) {
            return content.clone();
        }
        let content = match previous.get(&kind) {
            Some(content) => content.clone(),
            None => provide(),
        };
        self.entries.insert(kind, content.clone());
        content
    }
}

/// State carried from one build to the next.
///
/// A session is created with its virtualizer and replaced wholesale after every successful
/// build; a failed build leaves it untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct Session<C> {
    cache: ContentCache<C>,
    builds: u64,
}

impl<C> Default for Session<C> {
    fn default() -> Self {
        Self {
            cache: ContentCache::default(),
            builds: 0,
        }
    }
}

impl<C: Clone> Session<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content materialized by the last successful build.
    pub fn cache(&self) -> &ContentCache<C> {
        &self.cache
    }

    /// Number of successful builds so far.
    pub fn builds(&self) -> u64 {
        self.builds
    }

    pub(crate) fn next(&self, cache: ContentCache<C>) -> Self {
        Self {
            cache,
            builds: self.builds.saturating_add(1),
        }
    }
}
