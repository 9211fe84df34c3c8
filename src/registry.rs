//! Live-actor bookkeeping
//!
//! A `SpawnRegistry` tracks the handles of currently-live actors so the
//! scheduler can enforce its simultaneous cap and the cleanup pass can sweep
//! actors that left the play field. It is pure bookkeeping: the out-of-bounds
//! predicate comes from the driver, which keeps this component engine-agnostic.

/// Bounded collection of live actor handles.
#[derive(Debug, Clone, Default)]
pub struct SpawnRegistry<H> {
    handles: Vec<H>,
}

impl<H: Copy + PartialEq> SpawnRegistry<H> {
    pub fn new() -> Self {
        Self {
            handles: Vec::new(),
        }
    }

    /// Track a newly spawned actor. Re-registering a live handle is a no-op.
    pub fn register(&mut self, handle: H) {
        if !self.handles.contains(&handle) {
            self.handles.push(handle);
        }
    }

    /// Stop tracking a handle (actor finished or was destroyed). Returns
    /// whether the handle was live.
    pub fn unregister(&mut self, handle: H) -> bool {
        match self.handles.iter().position(|h| *h == handle) {
            Some(index) => {
                let _ = self.handles.remove(index);
                true
            }
            None => false,
        }
    }

    /// Number of live actors
    pub fn count(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn contains(&self, handle: H) -> bool {
        self.handles.contains(&handle)
    }

    /// Live handles in registration order
    pub fn iter(&self) -> impl Iterator<Item = H> + '_ {
        self.handles.iter().copied()
    }

    /// Remove every handle the predicate marks out of bounds (e.g. "actor y
    /// below the screen") and return them so the driver can react - award
    /// escape points, despawn visuals.
    pub fn prune_out_of_bounds(&mut self, mut out_of_bounds: impl FnMut(H) -> bool) -> Vec<H> {
        let mut removed = Vec::new();
        self.handles.retain(|&handle| {
            if out_of_bounds(handle) {
                removed.push(handle);
                false
            } else {
                true
            }
        });
        removed
    }

    /// Drop every handle, returning how many were live
    pub fn clear(&mut self) -> usize {
        let count = self.handles.len();
        self.handles.clear();
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_count() {
        let mut registry = SpawnRegistry::new();
        registry.register(1u32);
        registry.register(2);
        assert_eq!(registry.count(), 2);
        assert!(registry.contains(1));
    }

    #[test]
    fn test_duplicate_register_is_noop() {
        let mut registry = SpawnRegistry::new();
        registry.register(7u32);
        registry.register(7);
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_unregister() {
        let mut registry = SpawnRegistry::new();
        registry.register(1u32);
        assert!(registry.unregister(1));
        assert!(!registry.unregister(1));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_prune_returns_removed_handles() {
        let mut registry = SpawnRegistry::new();
        for id in 0u32..6 {
            registry.register(id);
        }
        let removed = registry.prune_out_of_bounds(|id| id % 2 == 0);
        assert_eq!(removed, vec![0, 2, 4]);
        assert_eq!(registry.count(), 3);
        assert!(registry.contains(1));
        assert!(!registry.contains(2));
    }

    #[test]
    fn test_clear_reports_count() {
        let mut registry = SpawnRegistry::new();
        registry.register(1u32);
        registry.register(2);
        assert_eq!(registry.clear(), 2);
        assert!(registry.is_empty());
    }
}
