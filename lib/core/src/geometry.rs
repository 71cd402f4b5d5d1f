// Plane geometry for node placement and pointer hit-testing
use serde::{Deserialize, Serialize};

/// Diameter of the circle drawn for a node; the hit zone uses half of it.
pub const NODE_DIAMETER: i32 = 10;

/// Half-thickness of the quadrilateral drawn for a link.
pub const LINK_RADIUS: f64 = 4.0;

/// An integer position on the drawing plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two points
    #[inline]
    #[must_use]
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Is `point` inside the circular click zone of a node centred at `center`?
///
/// The boundary counts as inside.
#[inline]
pub fn in_node_zone(center: Point, point: Point) -> bool {
    let radius = i64::from(NODE_DIAMETER / 2);
    let dx = i64::from(point.x) - i64::from(center.x);
    let dy = i64::from(point.y) - i64::from(center.y);
    dx * dx + dy * dy <= radius * radius
}

/// Thin quadrilateral running along a link, used as its click zone.
///
/// Corners are `a - o`, `a + o`, `b + o`, `b - o`, where `o` is the offset
/// perpendicular to the link with length [`LINK_RADIUS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkZone {
    corners: [Point; 4],
}

impl LinkZone {
    /// Build the zone between two endpoints. Coincident endpoints have no zone.
    pub fn between(a: Point, b: Point) -> Option<Self> {
        let dx = f64::from(b.x) - f64::from(a.x);
        let dy = f64::from(b.y) - f64::from(a.y);
        let len = (dx * dx + dy * dy).sqrt();
        if len == 0.0 {
            return None;
        }

        let ox = -dy * LINK_RADIUS / len;
        let oy = dx * LINK_RADIUS / len;
        let corner = |p: Point, sign: f64| {
            Point::new(
                round_half_up(f64::from(p.x) + sign * ox),
                round_half_up(f64::from(p.y) + sign * oy),
            )
        };

        Some(Self {
            corners: [corner(a, -1.0), corner(a, 1.0), corner(b, 1.0), corner(b, -1.0)],
        })
    }

    #[inline]
    pub fn corners(&self) -> &[Point; 4] {
        &self.corners
    }

    /// Boundary-inclusive containment test
    pub fn contains(&self, point: Point) -> bool {
        let (min_x, max_x, min_y, max_y) = self.bounds();
        if point.x < min_x || point.x > max_x || point.y < min_y || point.y > max_y {
            return false;
        }

        let mut has_pos = false;
        let mut has_neg = false;
        for i in 0..4 {
            let p1 = self.corners[i];
            let p2 = self.corners[(i + 1) % 4];
            let cross = (i64::from(p2.x) - i64::from(p1.x)) * (i64::from(point.y) - i64::from(p1.y))
                - (i64::from(p2.y) - i64::from(p1.y)) * (i64::from(point.x) - i64::from(p1.x));
            if cross > 0 {
                has_pos = true;
            } else if cross < 0 {
                has_neg = true;
            }
            if has_pos && has_neg {
                return false;
            }
        }
        true
    }

    fn bounds(&self) -> (i32, i32, i32, i32) {
        let xs = self.corners.iter().map(|c| c.x);
        let ys = self.corners.iter().map(|c| c.y);
        (
            xs.clone().min().unwrap_or(0),
            xs.max().unwrap_or(0),
            ys.clone().min().unwrap_or(0),
            ys.max().unwrap_or(0),
        )
    }
}

// Halves round towards positive infinity, so corners land on the same
// pixels regardless of which side of the origin they fall.
#[inline]
fn round_half_up(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}
