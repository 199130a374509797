//! Axis-aligned bounding box collision between positioned, sized bodies.

use glam::DVec2;

/// Anything with a centre and a bounding box.
pub trait Body {
    /// Centre of the box, `None` once the body has left play (expired star).
    fn position(&self) -> Option<DVec2>;
    /// Full width and height of the box. The box extends half of each
    /// around the centre.
    fn size(&self) -> DVec2;
}

/// True when the boxes of `a` and `b` overlap or touch.
///
/// A body never collides with itself (same address), and a body without a
/// position collides with nothing.
pub fn colliding<A, B>(a: &A, b: &B) -> bool
where
    A: Body + ?Sized,
    B: Body + ?Sized,
{
    if std::ptr::addr_eq(a, b) {
        return false;
    }
    let (Some(pa), Some(pb)) = (a.position(), b.position()) else {
        return false;
    };
    let ha = a.size() / 2.0;
    let hb = b.size() / 2.0;

    !(pa.x + ha.x < pb.x - hb.x
        || pa.y + ha.y < pb.y - hb.y
        || pa.x - ha.x > pb.x + hb.x
        || pa.y - ha.y > pb.y + hb.y)
}
