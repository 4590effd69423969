//! Bounded sliding window of chart points.

/// An ordered sequence of (unix-seconds, value) points with halving
/// compaction.
///
/// Appending the point that fills the window to capacity copies the newest
/// half to the front and truncates, so the visible window always covers the
/// most recent half-to-full capacity of samples. This is not a strict FIFO
/// ring: compaction discards the oldest half in one step.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    points: Vec<(f64, f64)>,
    capacity: usize,
}

impl SlidingWindow {
    /// A window holding at most `capacity` points. Capacities below 2 are
    /// bumped to 2 so compaction always keeps at least one point.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            points: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a point, compacting when the append fills the window.
    pub fn push(&mut self, x: f64, y: f64) {
        self.points.push((x, y));
        if self.points.len() == self.capacity {
            let keep = self.capacity / 2;
            self.points.copy_within(keep.., 0);
            self.points.truncate(keep);
        }
    }

    /// The current points, oldest first.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
