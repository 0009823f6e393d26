//! Planar geometry primitives for path/boundary crossing tests.
//!
//! Coordinates are decimal degrees treated as a flat plane; that is accurate
//! enough over the few-mile extent of a watch zone.

/// A position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
}

impl Point {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Turn direction of the ordered triple (p, q, r).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    CounterClockwise,
    Collinear,
}

/// Cross-product sign of the triple (p, q, r).
///
/// Collinear is an exact zero: points must lie exactly on the line, there is
/// no epsilon band around it.
pub fn orientation(p: Point, q: Point, r: Point) -> Orientation {
    let cross = (q.lon - p.lon) * (r.lat - q.lat) - (q.lat - p.lat) * (r.lon - q.lon);
    if cross == 0.0 {
        Orientation::Collinear
    } else if cross > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

/// Whether r sits inside the inclusive bounding box of p and q.
///
/// Only meaningful when r is already known to be collinear with p-q.
pub fn on_segment(p: Point, q: Point, r: Point) -> bool {
    r.lon <= p.lon.max(q.lon)
        && r.lon >= p.lon.min(q.lon)
        && r.lat <= p.lat.max(q.lat)
        && r.lat >= p.lat.min(q.lat)
}

/// A directed line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub p: Point,
    pub q: Point,
}

impl Segment {
    pub fn new(p: Point, q: Point) -> Self {
        Self { p, q }
    }

    /// Whether the two segments share at least one point.
    ///
    /// Endpoint touches and collinear overlaps both count as intersections.
    pub fn intersects(&self, other: &Segment) -> bool {
        let (p1, q1) = (self.p, self.q);
        let (p2, q2) = (other.p, other.q);

        let o1 = orientation(p1, q1, p2);
        let o2 = orientation(p1, q1, q2);
        let o3 = orientation(p2, q2, p1);
        let o4 = orientation(p2, q2, q1);

        // General position: each segment's endpoints straddle the other.
        if o1 != o2 && o3 != o4 {
            return true;
        }

        // Collinear endpoints landing on the other segment.
        (o1 == Orientation::Collinear && on_segment(p1, q1, p2))
            || (o2 == Orientation::Collinear && on_segment(p1, q1, q2))
            || (o3 == Orientation::Collinear && on_segment(p2, q2, p1))
            || (o4 == Orientation::Collinear && on_segment(p2, q2, q1))
    }
}
