//! Closed time intervals used to align two series.

use serde::Serialize;

/// Closed interval `[start, end]` of Unix seconds.
///
/// Built from two series' ranges by [`TimeWindow::intersect`]; an empty or
/// inverted intersection has no `TimeWindow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    start: i64,
    end: i64,
}

impl TimeWindow {
    /// Creates a window, or `None` when `end < start`.
    pub fn new(start: i64, end: i64) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Intersection `[max(a.start, b.start), min(a.end, b.end)]`.
    ///
    /// A single shared instant is a valid one-point window.
    pub fn intersect(a: TimeWindow, b: TimeWindow) -> Option<Self> {
        Self::new(a.start.max(b.start), a.end.min(b.end))
    }

    /// Window spanning the first and last timestamp of a sorted slice.
    pub fn spanning(timestamps: &[i64]) -> Option<Self> {
        match (timestamps.first(), timestamps.last()) {
            (Some(&s), Some(&e)) => Self::new(s, e),
            _ => None,
        }
    }

    /// Returns the inclusive start.
    pub fn start(&self) -> i64 {
        self.start
    }

    /// Returns the inclusive end.
    pub fn end(&self) -> i64 {
        self.end
    }

    /// Length of the window in seconds.
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }

    /// Returns `true` if `t` lies inside the closed window.
    pub fn contains(&self, t: i64) -> bool {
        self.start <= t && t <= self.end
    }

    /// Boolean mask over `timestamps`: `true` where the window contains it.
    pub fn mask(&self, timestamps: &[i64]) -> Vec<bool> {
        timestamps.iter().map(|&t| self.contains(t)).collect()
    }
}

/// Keep the elements of `data` whose mask entry is `true`.
///
/// # Panics
///
/// Panics if `data` and `mask` differ in length.
pub fn apply_mask<T: Copy>(data: &[T], mask: &[bool]) -> Vec<T> {
    assert_eq!(data.len(), mask.len(), "apply_mask: length mismatch");
    data.iter()
        .zip(mask)
        .filter(|&(_, &keep)| keep)
        .map(|(&v, _)| v)
        .collect()
}
