use super::ActionResult;

/// Read-only copy of the engine's invalidation flags.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct InvalidationFlags {
    /// Current or target node was set since the last search.
    pub goal_changed: bool,
    /// Registry membership or a transition state changed since the last search.
    pub topology_changed: bool,
    /// The last attempted action reported failure.
    pub attempt_failed: bool,
}

/// Dirty flags deciding whether a tick re-runs the search.
///
/// Each flag has exactly one setting event and one clearing event; there are no
/// raw setters.
#[derive(Debug, Clone)]
pub(crate) struct Invalidation {
    goal_changed: bool,
    topology_changed: bool,
    attempt_failed: bool,
}

impl Invalidation {
    /// A fresh engine has never searched: goal and topology count as changed.
    pub(crate) const fn new() -> Self {
        Self {
            goal_changed: true,
            topology_changed: true,
            attempt_failed: false,
        }
    }

    pub(crate) fn goal_changed(&mut self) {
        self.goal_changed = true;
    }

    pub(crate) fn topology_changed(&mut self) {
        self.topology_changed = true;
    }

    /// A search just ran; goal and topology are accounted for.
    pub(crate) fn replanned(&mut self) {
        self.goal_changed = false;
        self.topology_changed = false;
    }

    pub(crate) fn attempted(&mut self, result: ActionResult) {
        self.attempt_failed = !result.is_success();
    }

    /// Whether the next tick must search instead of reusing the cache.
    ///
    /// - goal or topology changed: always search
    /// - cached edge whose last attempt failed: retry it
    /// - cached edge that succeeded: search from the new position
    /// - nothing cached and nothing changed: the last search already came up
    ///   empty, searching again cannot find anything new
    pub(crate) fn needs_replan(&self, has_cached: bool) -> bool {
        if self.goal_changed || self.topology_changed {
            return true;
        }
        has_cached && !self.attempt_failed
    }

    pub(crate) fn flags(&self) -> InvalidationFlags {
        InvalidationFlags {
            goal_changed: self.goal_changed,
            topology_changed: self.topology_changed,
            attempt_failed: self.attempt_failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_tracker_requires_search() {
        let tracker = Invalidation::new();
        assert!(tracker.needs_replan(false));
        assert_eq!(
            tracker.flags(),
            InvalidationFlags {
                goal_changed: true,
                topology_changed: true,
                attempt_failed: false,
            }
        );
    }

    #[test]
    fn failure_without_changes_retries() {
        let mut tracker = Invalidation::new();
        tracker.replanned();
        tracker.attempted(ActionResult::Failure);
        assert!(!tracker.needs_replan(true));

        tracker.topology_changed();
        assert!(tracker.needs_replan(true));

        tracker.replanned();
        assert!(!tracker.needs_replan(true));
        tracker.goal_changed();
        assert!(tracker.needs_replan(true));
    }

    #[test]
    fn success_forces_search() {
        let mut tracker = Invalidation::new();
        tracker.replanned();
        tracker.attempted(ActionResult::Failure);
        tracker.attempted(ActionResult::Success);
        assert!(tracker.needs_replan(true));
        assert!(!tracker.flags().attempt_failed);
    }

    #[test]
    fn empty_cache_without_changes_skips_search() {
        let mut tracker = Invalidation::new();
        tracker.replanned();
        assert!(!tracker.needs_replan(false));
    }
}
