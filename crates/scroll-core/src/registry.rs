//! Handle table behind [`TargetId`]s.
//!
//! The host owns identity: when it can find the handle it last issued for an
//! element (e.g. through a weak side table) it passes it to `register`, which
//! keeps the lookup O(1) and never hands out two handles for one element.

use crate::target::TargetId;
use fnv::FnvHashMap;

pub struct HandleRegistry<E> {
    by_id: FnvHashMap<TargetId, E>,
    next: u32,
}

impl<E> Default for HandleRegistry<E> {
    fn default() -> Self {
        Self {
            by_id: FnvHashMap::default(),
            next: 0,
        }
    }
}

impl<E> HandleRegistry<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for `element`. `known` is reused while it is still registered;
    /// otherwise a fresh handle is issued. Handles are never recycled.
    pub fn register(&mut self, known: Option<TargetId>, element: E) -> TargetId {
        if let Some(id) = known.filter(|id| self.by_id.contains_key(id)) {
            return id;
        }
        self.next += 1;
        let id = TargetId(self.next);
        self.by_id.insert(id, element);
        id
    }

    pub fn get(&self, id: TargetId) -> Option<&E> {
        self.by_id.get(&id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Drop entries `live` rejects; returns how many went.
    pub fn retain(&mut self, mut live: impl FnMut(&E) -> bool) -> usize {
        let before = self.by_id.len();
        self.by_id.retain(|_, el| live(el));
        before - self.by_id.len()
    }
}
