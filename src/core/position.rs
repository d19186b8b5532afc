//! Scroll offset primitives shared across capture, persistence and replay.

use position_store::StoredPositions;

/// One viewport offset pair, in CSS pixels.
///
/// Offsets are captured with whatever precision the viewport reports and only
/// rounded when they are applied back, see [`ScrollPoint::trunc`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollPoint {
    pub x: f64,
    pub y: f64,
}

impl ScrollPoint {
    /// Top left corner of the page.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whole-pixel form used when the pair is applied to a viewport.
    #[must_use]
    pub fn trunc(self) -> Self {
        Self {
            x: self.x.trunc(),
            y: self.y.trunc(),
        }
    }
}

/// Offsets captured per history depth within one tracking epoch.
///
/// Index `n` holds the offsets the page had when the user left the history
/// entry of depth `n`. Both axes always move together, so out-of-sync x and y
/// sequences cannot be represented.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionLog {
    points: Vec<ScrollPoint>,
}

impl PositionLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `point` at `index`, growing the log with origin entries when the
    /// index lies past the end.
    pub fn record(&mut self, index: usize, point: ScrollPoint) {
        if index >= self.points.len() {
            self.points.resize(index + 1, ScrollPoint::ORIGIN);
        }
        self.points[index] = point;
    }

    /// Drops every entry at `len` and beyond.
    pub fn truncate(&mut self, len: usize) {
        self.points.truncate(len);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<ScrollPoint> {
        self.points.get(index).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn to_stored(&self) -> StoredPositions {
        StoredPositions::new(
            self.points.iter().map(|point| point.x).collect(),
            self.points.iter().map(|point| point.y).collect(),
        )
    }

    /// Rebuilds a log from its stored shape.
    ///
    /// Sequences of unequal length can only come from a tampered or foreign
    /// payload; the extra tail carries no usable pair, so it is dropped.
    #[must_use]
    pub fn from_stored(stored: &StoredPositions) -> Self {
        let points = stored
            .x_positions
            .iter()
            .zip(stored.y_positions.iter())
            .map(|(&x, &y)| ScrollPoint::new(x, y))
            .collect();
        Self { points }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_grows_with_origin_entries() {
        let mut log = PositionLog::new();
        log.record(2, ScrollPoint::new(5.0, 7.0));

        assert_eq!(log.len(), 3);
        assert_eq!(log.get(0), Some(ScrollPoint::ORIGIN));
        assert_eq!(log.get(1), Some(ScrollPoint::ORIGIN));
        assert_eq!(log.get(2), Some(ScrollPoint::new(5.0, 7.0)));
    }

    #[test]
    fn record_overwrites_existing_entries() {
        let mut log = PositionLog::new();
        log.record(0, ScrollPoint::new(1.0, 2.0));
        log.record(0, ScrollPoint::new(3.0, 4.0));

        assert_eq!(log.len(), 1);
        assert_eq!(log.get(0), Some(ScrollPoint::new(3.0, 4.0)));
    }

    #[test]
    fn truncate_drops_the_tail() {
        let mut log = PositionLog::new();
        log.record(0, ScrollPoint::new(1.0, 1.0));
        log.record(1, ScrollPoint::new(2.0, 2.0));
        log.record(2, ScrollPoint::new(3.0, 3.0));

        log.truncate(1);

        assert_eq!(log.len(), 1);
        assert_eq!(log.get(1), None);
    }

    #[test]
    fn stored_form_keeps_axes_aligned() {
        let mut log = PositionLog::new();
        log.record(0, ScrollPoint::new(1.5, 10.0));
        log.record(1, ScrollPoint::new(2.5, 20.0));

        let stored = log.to_stored();

        assert_eq!(stored.x_positions, vec![1.5, 2.5]);
        assert_eq!(stored.y_positions, vec![10.0, 20.0]);
        assert_eq!(PositionLog::from_stored(&stored), log);
    }

    #[test]
    fn from_stored_zips_to_the_shorter_axis() {
        let stored = position_store::StoredPositions::new(vec![1.0, 2.0, 3.0], vec![9.0]);

        let log = PositionLog::from_stored(&stored);

        assert_eq!(log.len(), 1);
        assert_eq!(log.get(0), Some(ScrollPoint::new(1.0, 9.0)));
    }

    #[test]
    fn trunc_drops_fractional_pixels() {
        assert_eq!(
            ScrollPoint::new(10.7, 20.2).trunc(),
            ScrollPoint::new(10.0, 20.0)
        );
    }
}
