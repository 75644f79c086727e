use serde::Deserialize;

use crate::intersect::Intersections;
use crate::shape::Shape;

/// A boolean operation on two solids.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsgOp {
    /// Everything in either operand.
    Union,

    /// Only what both operands share.
    Intersect,

    /// The left operand, minus the right.
    Difference,
}

impl CsgOp {
    /// Whether an intersection survives the operation.
    ///
    /// `left_hit` says which operand was struck. `in_left` and `in_right` say
    /// whether the ray was inside each operand just before this intersection.
    ///
    /// ```
    /// # use glint::csg::CsgOp;
    /// // Entering the left solid while outside the right one: visible.
    /// assert!(CsgOp::Union.intersection_allowed(true, false, false));
    /// // Any hit on the left solid from within the right one is hidden.
    /// assert!(!CsgOp::Union.intersection_allowed(true, true, true));
    /// ```
    pub fn intersection_allowed(&self, left_hit: bool, in_left: bool,
        in_right: bool) -> bool {
        match self {
            CsgOp::Union
                => (left_hit && !in_right) || (!left_hit && !in_left),
            CsgOp::Intersect
                => (left_hit && in_right) || (!left_hit && in_left),
            CsgOp::Difference
                => (left_hit && !in_right) || (!left_hit && in_left),
        }
    }
}

/// Keeps the intersections that lie on the surface of `op(left, right)`.
///
/// `xs` must be sorted by `t` and contain only hits on primitives below
/// `left` or the right operand. Each intersection is judged on the inside
/// flags as they stood before it, then the flag for its operand is toggled.
pub fn filter_intersections<'a>(op: CsgOp, left: &Shape,
    xs: Intersections<'a>) -> Intersections<'a> {
    let mut in_left = false;
    let mut in_right = false;

    let kept = xs.intersections.into_iter().filter(|i| {
        let left_hit = left.includes(i.object);
        let allowed = op.intersection_allowed(left_hit, in_left, in_right);

        if left_hit {
            in_left = !in_left;
        } else {
            in_right = !in_right;
        }

        allowed
    }).collect::<Vec<_>>();

    kept.into()
}

#[cfg(test)]
use crate::intersect::Intersection;

#[cfg(test)]
use crate::matrix::Matrix4D;

#[cfg(test)]
use crate::ray::Ray4D;

#[cfg(test)]
use crate::tuple::{ Point, Vector };

/// Rows are `(left_hit, in_left, in_right, union, intersect, difference)`.
#[cfg(test)]
const TRUTH_TABLE: [(bool, bool, bool, bool, bool, bool); 8] = [
    (true,  true,  true,  false, true,  false),
    (true,  true,  false, true,  false, true ),
    (true,  false, true,  false, true,  false),
    (true,  false, false, true,  false, true ),
    (false, true,  true,  false, true,  true ),
    (false, true,  false, false, true,  true ),
    (false, false, true,  true,  false, false),
    (false, false, false, true,  false, false),
];

#[test]
fn union_truth_table() {
    for &(lhit, inl, inr, expected, _, _) in TRUTH_TABLE.iter() {
        assert_eq!(CsgOp::Union.intersection_allowed(lhit, inl, inr),
            expected, "union({}, {}, {})", lhit, inl, inr);
    }
}

#[test]
fn intersect_truth_table() {
    for &(lhit, inl, inr, _, expected, _) in TRUTH_TABLE.iter() {
        assert_eq!(CsgOp::Intersect.intersection_allowed(lhit, inl, inr),
            expected, "intersect({}, {}, {})", lhit, inl, inr);
    }
}

#[test]
fn difference_truth_table() {
    for &(lhit, inl, inr, _, _, expected) in TRUTH_TABLE.iter() {
        assert_eq!(CsgOp::Difference.intersection_allowed(lhit, inl, inr),
            expected, "difference({}, {}, {})", lhit, inl, inr);
    }
}

#[test]
fn csg_children_are_operands() {
    let c = Shape::csg(CsgOp::Union, Shape::sphere(), Shape::cube());
    let (left, right) = c.operands().unwrap();

    assert!(matches!(left.kind(), crate::shape::ShapeKind::Sphere));
    assert!(matches!(right.kind(), crate::shape::ShapeKind::Cube));
}

#[test]
fn filtering_a_list_of_intersections() {
    let cases = [
        (CsgOp::Union, 0, 3),
        (CsgOp::Intersect, 1, 2),
        (CsgOp::Difference, 0, 1),
    ];

    for &(op, x0, x1) in cases.iter() {
        let c = Shape::csg(op, Shape::sphere(), Shape::cube());
        let (s1, s2) = c.operands().unwrap();
        let xs: Intersections = vec![
            Intersection::new(1.0, s1),
            Intersection::new(2.0, s2),
            Intersection::new(3.0, s1),
            Intersection::new(4.0, s2),
        ].into();
        let expected = [xs.intersections[x0], xs.intersections[x1]];

        let result = filter_intersections(op, s1, xs.clone());

        assert_eq!(result.len(), 2);
        assert_eq!(result.intersections[0], expected[0]);
        assert_eq!(result.intersections[1], expected[1]);
    }
}

#[test]
fn ray_misses_csg_object() {
    let c = Shape::csg(CsgOp::Union, Shape::sphere(), Shape::cube());
    let r = Ray4D::new(Point::new(0.0, 2.0, -5.0), Vector::new(0.0, 0.0, 1.0));

    assert!(c.local_intersect(&r).is_empty());
}

#[test]
fn ray_hits_csg_object() {
    let s2 = Shape::sphere()
        .with_transform(Matrix4D::translation(0.0, 0.0, 0.5))
        .unwrap();
    let c = Shape::csg(CsgOp::Union, Shape::sphere(), s2);
    let (s1, s2) = c.operands().unwrap();
    let r = Ray4D::new(Point::new(0.0, 0.0, -5.0), Vector::new(0.0, 0.0, 1.0));

    let xs = c.local_intersect(&r);

    assert_eq!(xs.len(), 2);
    assert_eq!(xs.intersections[0].t, 4.0);
    assert!(std::ptr::eq(xs.intersections[0].object, s1));
    assert_eq!(xs.intersections[1].t, 6.5);
    assert!(std::ptr::eq(xs.intersections[1].object, s2));
}

#[test]
fn difference_carves_a_hole() {
    let hole = Shape::sphere()
        .with_transform(Matrix4D::scaling(0.5, 0.5, 0.5))
        .unwrap();
    let c = Shape::csg(CsgOp::Difference, Shape::sphere(), hole);
    let r = Ray4D::new(Point::new(0.0, 0.0, -5.0), Vector::new(0.0, 0.0, 1.0));

    let ts: Vec<f64> = c.intersect(&r).intersections.iter()
        .map(|i| i.t)
        .collect();

    assert_eq!(ts, vec![4.0, 4.5, 5.5, 6.0]);
}

#[test]
fn csg_operands_inherit_transform() {
    let c = Shape::csg(CsgOp::Intersect, Shape::sphere(), Shape::cube())
        .with_transform(Matrix4D::translation(0.0, 0.0, 10.0))
        .unwrap();
    let r = Ray4D::new(Point::new(0.0, 0.0, -5.0), Vector::new(0.0, 0.0, 1.0));

    let xs = c.intersect(&r);
    let hit = xs.hit().unwrap();

    assert_eq!(hit.t, 14.0);
    assert_eq!(hit.object.normal_at(r.position(hit.t), &hit),
        Vector::new(0.0, 0.0, -1.0));
}
