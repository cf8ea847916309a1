//! Scroll position to active feed index.
//!
//! Each feed item fills exactly one viewport, so the item nearest the top of
//! the viewport is `round(offset / viewport_height)`.  The resolver remembers
//! the last index it reported and stays silent while scroll ticks keep
//! landing on the same item.

use serde::Serialize;
use tracing::debug;

/// Active index for a scroll offset, or `None` when nothing can be active.
///
/// Offsets past the last item clamp to the last index. Negative and NaN
/// offsets count as the top of the feed. A viewport height that is not a
/// positive finite number yields `None`.
pub fn resolve_index(offset: f64, unit_length: f64, item_count: usize) -> Option<usize> {
    if item_count == 0 || !unit_length.is_finite() || unit_length <= 0.0 {
        return None;
    }
    let offset = if offset.is_nan() || offset < 0.0 { 0.0 } else { offset };

    let last = item_count - 1;
    let raw = (offset / unit_length).round();
    if raw >= last as f64 {
        Some(last)
    } else {
        Some(raw as usize)
    }
}

/// A change of active item, emitted once per transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActiveChange {
    pub previous: Option<usize>,
    pub current: Option<usize>,
}

/// Stateful wrapper around [`resolve_index`] that suppresses repeats.
#[derive(Debug, Clone, Default)]
pub struct ActiveItemResolver {
    last: Option<usize>,
    stale: bool,
}

impl ActiveItemResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a scroll tick. Returns `Some` only when the active index
    /// differs from the one last reported (or after [`invalidate`]).
    ///
    /// [`invalidate`]: Self::invalidate
    pub fn resolve(
        &mut self,
        offset: f64,
        unit_length: f64,
        item_count: usize,
    ) -> Option<ActiveChange> {
        let current = resolve_index(offset, unit_length, item_count);
        let forced = self.stale && current.is_some();
        if current == self.last && !forced {
            return None;
        }

        let change = ActiveChange {
            previous: self.last,
            current,
        };
        self.last = current;
        self.stale = false;
        debug!(previous = ?change.previous, current = ?change.current, "active item changed");
        Some(change)
    }

    /// Index last reported, if any.
    pub fn current(&self) -> Option<usize> {
        self.last
    }

    /// Force the next [`resolve`](Self::resolve) that lands on an item to
    /// report, even if the index is unchanged. Used when the items under the
    /// viewport were replaced.
    pub fn invalidate(&mut self) {
        self.stale = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_nearest_item() {
        assert_eq!(resolve_index(0.0, 800.0, 5), Some(0));
        assert_eq!(resolve_index(1600.0, 800.0, 5), Some(2));
        assert_eq!(resolve_index(399.0, 800.0, 5), Some(0));
        assert_eq!(resolve_index(400.0, 800.0, 5), Some(1));
    }

    #[test]
    fn clamps_past_the_end() {
        assert_eq!(resolve_index(10_000.0, 800.0, 5), Some(4));
        assert_eq!(resolve_index(f64::INFINITY, 800.0, 5), Some(4));
    }

    #[test]
    fn empty_feed_has_no_active_item() {
        assert_eq!(resolve_index(400.0, 800.0, 0), None);
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(resolve_index(-50.0, 800.0, 3), Some(0));
        assert_eq!(resolve_index(f64::NAN, 800.0, 3), Some(0));
        assert_eq!(resolve_index(100.0, 0.0, 3), None);
        assert_eq!(resolve_index(100.0, f64::NAN, 3), None);
    }

    #[test]
    fn repeated_ticks_on_same_item_are_silent() {
        let mut resolver = ActiveItemResolver::new();
        assert_eq!(
            resolver.resolve(0.0, 800.0, 5),
            Some(ActiveChange {
                previous: None,
                current: Some(0)
            })
        );
        assert_eq!(resolver.resolve(120.0, 800.0, 5), None);
        assert_eq!(resolver.resolve(390.0, 800.0, 5), None);

        assert_eq!(
            resolver.resolve(820.0, 800.0, 5),
            Some(ActiveChange {
                previous: Some(0),
                current: Some(1)
            })
        );
        assert_eq!(resolver.current(), Some(1));
    }

    #[test]
    fn emptying_the_feed_reports_once() {
        let mut resolver = ActiveItemResolver::new();
        resolver.resolve(800.0, 800.0, 3);
        assert_eq!(
            resolver.resolve(800.0, 800.0, 0),
            Some(ActiveChange {
                previous: Some(1),
                current: None
            })
        );
        assert_eq!(resolver.resolve(800.0, 800.0, 0), None);
    }

    #[test]
    fn invalidate_forces_one_report() {
        let mut resolver = ActiveItemResolver::new();
        resolver.resolve(0.0, 800.0, 3);
        resolver.invalidate();
        assert_eq!(
            resolver.resolve(0.0, 800.0, 4),
            Some(ActiveChange {
                previous: Some(0),
                current: Some(0)
            })
        );
        assert_eq!(resolver.resolve(0.0, 800.0, 4), None);
    }
}
