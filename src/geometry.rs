use strum::{Display, EnumString};

/// A point in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left() && point.x <= self.right() && point.y >= self.top() && point.y <= self.bottom()
    }
}

/// Horizontal layout direction of the track.
///
/// The track start (the leading edge the active segment grows from) is the
/// left edge in [`LayoutDirection::LeftToRight`] and the right edge in
/// [`LayoutDirection::RightToLeft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum LayoutDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl LayoutDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::LeftToRight => Self::RightToLeft,
            Self::RightToLeft => Self::LeftToRight,
        }
    }
}

/// Per-paint track geometry supplied by the host control.
///
/// `thumb` and `secondary` are x coordinates in the same space as `bounds`.
/// Instances are recomputed on every paint call and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackGeometry {
    pub bounds: Rect,
    pub thumb: f32,
    pub secondary: Option<f32>,
}

impl TrackGeometry {
    pub fn new(bounds: Rect, thumb: f32) -> Self {
        Self { bounds, thumb, secondary: None }
    }

    pub fn with_secondary(mut self, secondary: f32) -> Self {
        self.secondary = Some(secondary);
        self
    }

    /// The x coordinate of the track's leading edge.
    pub fn track_start(&self, direction: LayoutDirection) -> f32 {
        match direction {
            LayoutDirection::LeftToRight => self.bounds.left(),
            LayoutDirection::RightToLeft => self.bounds.right(),
        }
    }

    /// The x coordinate of the track's trailing edge.
    pub fn track_end(&self, direction: LayoutDirection) -> f32 {
        match direction {
            LayoutDirection::LeftToRight => self.bounds.right(),
            LayoutDirection::RightToLeft => self.bounds.left(),
        }
    }

    fn clamped_thumb(&self) -> f32 {
        self.thumb.clamp(self.bounds.left(), self.bounds.right())
    }

    /// The active (played) segment as `(min_x, max_x)`.
    pub fn active_span(&self, direction: LayoutDirection) -> (f32, f32) {
        let thumb = self.clamped_thumb();
        match direction {
            LayoutDirection::LeftToRight => (self.bounds.left(), thumb),
            LayoutDirection::RightToLeft => (thumb, self.bounds.right()),
        }
    }

    /// The inactive (remaining) segment as `(min_x, max_x)`.
    pub fn inactive_span(&self, direction: LayoutDirection) -> (f32, f32) {
        let thumb = self.clamped_thumb();
        match direction {
            LayoutDirection::LeftToRight => (thumb, self.bounds.right()),
            LayoutDirection::RightToLeft => (self.bounds.left(), thumb),
        }
    }

    /// The secondary (e.g. buffered-ahead) segment as `(min_x, max_x)`.
    ///
    /// Present only when a secondary position was supplied and it lies
    /// strictly farther from the track start than the thumb.
    pub fn secondary_span(&self, direction: LayoutDirection) -> Option<(f32, f32)> {
        let secondary = self.secondary?.clamp(self.bounds.left(), self.bounds.right());
        let thumb = self.clamped_thumb();
        match direction {
            LayoutDirection::LeftToRight if secondary > thumb => Some((thumb, secondary)),
            LayoutDirection::RightToLeft if secondary < thumb => Some((secondary, thumb)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn bounds() -> Rect {
        Rect::new(10.0, 0.0, 100.0, 4.0)
    }

    #[test]
    fn spans_left_to_right() {
        let geometry = TrackGeometry::new(bounds(), 40.0);
        assert_eq!(geometry.active_span(LayoutDirection::LeftToRight), (10.0, 40.0));
        assert_eq!(geometry.inactive_span(LayoutDirection::LeftToRight), (40.0, 110.0));
    }

    #[test]
    fn spans_right_to_left() {
        let geometry = TrackGeometry::new(bounds(), 40.0);
        assert_eq!(geometry.active_span(LayoutDirection::RightToLeft), (40.0, 110.0));
        assert_eq!(geometry.inactive_span(LayoutDirection::RightToLeft), (10.0, 40.0));
    }

    #[test]
    fn thumb_is_clamped_into_bounds() {
        let geometry = TrackGeometry::new(bounds(), 500.0);
        assert_eq!(geometry.active_span(LayoutDirection::LeftToRight), (10.0, 110.0));
        let geometry = TrackGeometry::new(bounds(), -3.0);
        assert_eq!(geometry.active_span(LayoutDirection::LeftToRight), (10.0, 10.0));
    }

    #[rstest]
    #[case(LayoutDirection::LeftToRight, 60.0, Some((40.0, 60.0)))]
    #[case(LayoutDirection::LeftToRight, 40.0, None)]
    #[case(LayoutDirection::LeftToRight, 30.0, None)]
    #[case(LayoutDirection::RightToLeft, 30.0, Some((30.0, 40.0)))]
    #[case(LayoutDirection::RightToLeft, 40.0, None)]
    #[case(LayoutDirection::RightToLeft, 60.0, None)]
    fn secondary_only_when_past_thumb(
        #[case] direction: LayoutDirection,
        #[case] secondary: f32,
        #[case] expected: Option<(f32, f32)>,
    ) {
        let geometry = TrackGeometry::new(bounds(), 40.0).with_secondary(secondary);
        assert_eq!(geometry.secondary_span(direction), expected);
    }

    #[test]
    fn secondary_absent_when_not_supplied() {
        let geometry = TrackGeometry::new(bounds(), 40.0);
        assert_eq!(geometry.secondary_span(LayoutDirection::LeftToRight), None);
    }

    #[test]
    fn direction_parses_from_kebab_case() {
        let direction: LayoutDirection = "right-to-left".parse().expect("failed to parse");
        assert_eq!(direction, LayoutDirection::RightToLeft);
        assert_eq!(LayoutDirection::LeftToRight.to_string(), "left-to-right");
    }
}
