use std::cmp::Ordering;

use crate::consts::EPSILON;
use crate::tuple::{ Point, Vector };
use crate::ray::Ray4D;
use crate::shape::Shape;

/// An intersection.
///
/// Parameter `t` is the distance along the ray, in multiples of its direction.
/// `object` is the primitive that was struck; containers never appear here.
/// `uv` holds barycentric coordinates for smooth triangle hits.
#[derive(Copy, Clone, Debug)]
pub struct Intersection<'a> {
    pub t: f64,
    pub object: &'a Shape,
    pub uv: Option<(f64, f64)>,
}

/// Two intersections are equal if their offsets `t` are equal and they point
/// at the *same* object (pointer equality).
impl<'a> PartialEq for Intersection<'a> {
    fn eq(&self, other: &Intersection<'a>) -> bool {
        self.t == other.t && std::ptr::eq(self.object, other.object)
    }
}

impl<'a> Intersection<'a> {
    pub fn new(t: f64, object: &'a Shape) -> Intersection<'a> {
        Intersection { t, object, uv: None }
    }

    pub fn new_uv(t: f64, object: &'a Shape, u: f64, v: f64)
        -> Intersection<'a> {
        Intersection { t, object, uv: Some((u, v)) }
    }
}

/// A collection of intersections.
#[derive(Clone, Debug, Default)]
pub struct Intersections<'a> {
    pub intersections: Vec<Intersection<'a>>,
}

impl<'a> From<Vec<Intersection<'a>>> for Intersections<'a> {
    fn from(intersections: Vec<Intersection<'a>>) -> Intersections<'a> {
        Intersections { intersections }
    }
}

impl<'a> Intersections<'a> {
    pub fn new() -> Intersections<'a> {
        Intersections { intersections: Vec::new() }
    }

    /// Concatenates several collections and sorts the result by `t`.
    pub fn aggregate(all: Vec<Intersections<'a>>) -> Intersections<'a> {
        let mut xs: Intersections = all.into_iter()
            .flat_map(|is| is.intersections)
            .collect::<Vec<_>>()
            .into();

        xs.sort();
        xs
    }

    /// The visible intersection: the smallest non-negative `t`.
    ///
    /// Returns `None` if everything is behind the ray origin.
    ///
    /// ```
    /// # use glint::shape::Shape;
    /// # use glint::intersect::{ Intersection, Intersections };
    /// let s = Shape::sphere();
    /// let xs: Intersections = vec![
    ///     Intersection::new(5.0, &s),
    ///     Intersection::new(-3.0, &s),
    ///     Intersection::new(2.0, &s),
    /// ].into();
    ///
    /// assert_eq!(xs.hit().unwrap().t, 2.0);
    /// ```
    pub fn hit(&self) -> Option<Intersection<'a>> {
        self.intersections.iter()
            .filter(|i| i.t >= 0.0 && i.t.is_finite())
            .min_by(|a, b| a.t.partial_cmp(&b.t).unwrap_or(Ordering::Equal))
            .copied()
    }

    /// Sorts the intersections by `t`. NaNs compare equal to everything.
    pub fn sort(&mut self) {
        self.intersections.sort_by(|a, b|
            a.t.partial_cmp(&b.t).unwrap_or(Ordering::Equal)
        );
    }

    pub fn len(&self) -> usize {
        self.intersections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intersections.is_empty()
    }
}

/// Values derived from an `Intersection`, ready for shading.
#[derive(Clone, Debug)]
pub struct IntersectionComputation<'a> {
    pub t: f64,

    /// The object being intersected.
    pub obj: &'a Shape,

    /// Where the intersection occurs.
    pub point: Point,

    /// `point` nudged along the normal. Origin for shadow and reflection rays,
    /// so a surface doesn't shadow itself ("acne").
    pub over_point: Point,

    /// `point` nudged against the normal. Origin for refracted rays.
    pub under_point: Point,

    pub eyev: Vector,

    /// Surface normal, flipped to face the eye.
    pub normalv: Vector,

    /// The incoming ray, reflected across the normal.
    pub reflectv: Vector,

    /// Whether the ray struck the surface from inside the object.
    pub inside: bool,

    /// Refractive index of the material being exited.
    pub n1: f64,

    /// Refractive index of the material being entered.
    pub n2: f64,
}

impl<'a> IntersectionComputation<'a> {
    /// Prepares shading values for `hit` along `r`.
    ///
    /// `is` should hold every intersection along `r`, sorted by `t`; it is
    /// used to work out which objects the ray is inside of. Without it both
    /// refractive indices are 1.0.
    pub fn new(r: &Ray4D, hit: &Intersection<'a>,
        is: Option<&Intersections<'a>>) -> IntersectionComputation<'a> {
        let t = hit.t;
        let obj = hit.object;
        let point = r.position(t);
        let eyev = -r.direction;
        let mut normalv = obj.normal_at(point, hit);

        let inside = if normalv.dot(&eyev) < 0.0 {
            normalv = -normalv;
            true
        } else {
            false
        };

        let over_point = point + normalv * EPSILON;
        let under_point = point - normalv * EPSILON;
        let reflectv = r.direction.reflect(&normalv);

        let (n1, n2) = match is {
            Some(xs) => Self::refraction_indices(hit, xs),
            None => (1.0, 1.0),
        };

        IntersectionComputation {
            t, obj,
            point, over_point, under_point,
            eyev, normalv, reflectv,
            inside,
            n1, n2,
        }
    }

    /// Walks the intersections in order, tracking which objects the ray is
    /// currently inside, to find the indices on either side of `hit`.
    fn refraction_indices(hit: &Intersection<'a>, is: &Intersections<'a>)
        -> (f64, f64) {
        fn top(containers: &[&Shape]) -> f64 {
            containers.last().map_or(1.0, |s| s.material.refractive_index)
        }

        let mut containers: Vec<&'a Shape> = Vec::new();

        for i in is.intersections.iter() {
            let n1 = top(&containers);

            match containers.iter().position(|&x| std::ptr::eq(x, i.object)) {
                Some(j) => { containers.remove(j); },
                None => containers.push(i.object),
            }

            if i == hit {
                return (n1, top(&containers));
            }
        }

        (1.0, 1.0)
    }

    /// Whether `n1`, `n2` and the angle of incidence rule out refraction.
    pub fn total_internal_reflection(&self) -> bool {
        let ratio = self.n1 / self.n2;
        let cos_i = self.eyev.dot(&self.normalv);
        let sin2_t = ratio.powi(2) * (1.0 - cos_i.powi(2));

        self.n1 > self.n2 && sin2_t > 1.0
    }

    /// The fraction of light reflected at this hit (Schlick's approximation
    /// to the Fresnel equations).
    pub fn schlick(&self) -> f64 {
        if self.total_internal_reflection() {
            return 1.0;
        }

        let mut cos = self.eyev.dot(&self.normalv);

        // Leaving a denser medium: use the transmitted angle instead.
        if self.n1 > self.n2 {
            let n = self.n1 / self.n2;
            let sin2_t = n.powi(2) * (1.0 - cos.powi(2));
            cos = (1.0 - sin2_t).sqrt();
        }

        let r0 = ((self.n1 - self.n2) / (self.n1 + self.n2)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cos).powi(5)
    }
}

#[cfg(test)]
use crate::matrix::Matrix4D;

#[cfg(test)]
use crate::light::Material;

#[cfg(test)]
fn glass_sphere() -> Shape {
    Shape::sphere().with_material(Material {
        transparency: 1.0,
        refractive_index: 1.5,
        ..Material::default()
    })
}

#[test]
fn hit_with_all_positive() {
    let s = Shape::sphere();
    let i1 = Intersection::new(1.0, &s);
    let i2 = Intersection::new(2.0, &s);
    let is: Intersections = vec![i2, i1].into();

    assert_eq!(is.hit(), Some(i1));
}

#[test]
fn hit_with_some_negative() {
    let s = Shape::sphere();
    let i1 = Intersection::new(-1.0, &s);
    let i2 = Intersection::new( 1.0, &s);
    let is: Intersections = vec![i1, i2].into();

    assert_eq!(is.hit(), Some(i2));
}

#[test]
fn hit_with_all_negative() {
    let s = Shape::sphere();
    let is: Intersections = vec![
        Intersection::new(-2.0, &s),
        Intersection::new(-1.0, &s),
    ].into();

    assert_eq!(is.hit(), None);
}

#[test]
fn hit_is_lowest_nonnegative() {
    let s = Shape::sphere();
    let i4 = Intersection::new(2.0, &s);
    let is: Intersections = vec![
        Intersection::new(5.0, &s),
        Intersection::new(7.0, &s),
        Intersection::new(-3.0, &s),
        i4,
    ].into();

    assert_eq!(is.hit(), Some(i4));
}

#[test]
fn aggregate_sorts() {
    let s = Shape::sphere();
    let a: Intersections = vec![Intersection::new(3.0, &s)].into();
    let b: Intersections = vec![
        Intersection::new(-1.0, &s),
        Intersection::new(5.0, &s),
    ].into();

    let all = Intersections::aggregate(vec![a, b]);
    let ts: Vec<f64> = all.intersections.iter().map(|i| i.t).collect();
    assert_eq!(ts, vec![-1.0, 3.0, 5.0]);
}

#[test]
fn precompute_outside_intersection() {
    let r = Ray4D::new(Point::new(0.0, 0.0, -5.0), Vector::new(0.0, 0.0, 1.0));
    let shape = Shape::sphere();
    let i = Intersection::new(4.0, &shape);

    let comps = IntersectionComputation::new(&r, &i, None);

    assert!(std::ptr::eq(comps.obj, &shape));
    assert_eq!(comps.t, 4.0);
    assert_eq!(comps.point, Point::new(0.0, 0.0, -1.0));
    assert_eq!(comps.eyev, Vector::new(0.0, 0.0, -1.0));
    assert_eq!(comps.normalv, Vector::new(0.0, 0.0, -1.0));
    assert!(!comps.inside);
}

#[test]
fn precompute_inside_intersection() {
    let r = Ray4D::new(Point::origin(), Vector::new(0.0, 0.0, 1.0));
    let shape = Shape::sphere();
    let i = Intersection::new(1.0, &shape);

    let comps = IntersectionComputation::new(&r, &i, None);

    assert!(comps.inside);
    assert_eq!(comps.point, Point::new(0.0, 0.0, 1.0));
    assert_eq!(comps.eyev, Vector::new(0.0, 0.0, -1.0));
    assert_eq!(comps.normalv, Vector::new(0.0, 0.0, -1.0));
}

#[test]
fn hit_should_offset_point() {
    let r = Ray4D::new(Point::new(0.0, 0.0, -5.0), Vector::new(0.0, 0.0, 1.0));
    let shape = Shape::sphere()
        .with_transform(Matrix4D::translation(0.0, 0.0, 1.0))
        .unwrap();
    let i = Intersection::new(5.0, &shape);

    let comps = IntersectionComputation::new(&r, &i, None);

    assert!(comps.over_point.z < -EPSILON / 2.0);
    assert!(comps.point.z > comps.over_point.z);
}

#[test]
fn under_point_is_below_surface() {
    let r = Ray4D::new(Point::new(0.0, 0.0, -5.0), Vector::new(0.0, 0.0, 1.0));
    let shape = glass_sphere()
        .with_transform(Matrix4D::translation(0.0, 0.0, 1.0))
        .unwrap();
    let i = Intersection::new(5.0, &shape);
    let xs: Intersections = vec![i].into();

    let comps = IntersectionComputation::new(&r, &i, Some(&xs));

    assert!(comps.under_point.z > EPSILON / 2.0);
    assert!(comps.point.z < comps.under_point.z);
}

#[test]
fn precompute_reflection_vector() {
    let k = 2.0f64.sqrt() / 2.0;
    let shape = Shape::plane();
    let r = Ray4D::new(Point::new(0.0, 1.0, -1.0), Vector::new(0.0, -k, k));
    let i = Intersection::new(2.0f64.sqrt(), &shape);

    let comps = IntersectionComputation::new(&r, &i, None);

    assert_eq!(comps.reflectv, Vector::new(0.0, k, k));
}

#[test]
fn n1_and_n2_at_nested_refractive_boundaries() {
    let a = glass_sphere()
        .with_transform(Matrix4D::scaling(2.0, 2.0, 2.0))
        .unwrap();
    let b = Shape::sphere()
        .with_transform(Matrix4D::translation(0.0, 0.0, -0.25))
        .unwrap()
        .with_material(Material {
            transparency: 1.0,
            refractive_index: 2.0,
            ..Material::default()
        });
    let c = Shape::sphere()
        .with_transform(Matrix4D::translation(0.0, 0.0, 0.25))
        .unwrap()
        .with_material(Material {
            transparency: 1.0,
            refractive_index: 2.5,
            ..Material::default()
        });

    let r = Ray4D::new(Point::new(0.0, 0.0, -4.0), Vector::new(0.0, 0.0, 1.0));
    let xs: Intersections = vec![
        Intersection::new(2.0, &a),
        Intersection::new(2.75, &b),
        Intersection::new(3.25, &c),
        Intersection::new(4.75, &b),
        Intersection::new(5.25, &c),
        Intersection::new(6.0, &a),
    ].into();

    let expected = [
        (1.0, 1.5), (1.5, 2.0), (2.0, 2.5),
        (2.5, 2.5), (2.5, 1.5), (1.5, 1.0),
    ];

    for (i, &(n1, n2)) in xs.intersections.iter().zip(expected.iter()) {
        let comps = IntersectionComputation::new(&r, i, Some(&xs));
        assert_eq!((comps.n1, comps.n2), (n1, n2));
    }
}

#[test]
fn schlick_under_total_internal_reflection() {
    let shape = glass_sphere();
    let k = 2.0f64.sqrt() / 2.0;
    let r = Ray4D::new(Point::new(0.0, 0.0, k), Vector::new(0.0, 1.0, 0.0));
    let xs: Intersections = vec![
        Intersection::new(-k, &shape),
        Intersection::new(k, &shape),
    ].into();

    let comps = IntersectionComputation::new(&r, &xs.intersections[1],
        Some(&xs));

    assert!(comps.total_internal_reflection());
    assert_eq!(comps.schlick(), 1.0);
}

#[test]
fn schlick_with_perpendicular_ray() {
    let shape = glass_sphere();
    let r = Ray4D::new(Point::origin(), Vector::new(0.0, 1.0, 0.0));
    let xs: Intersections = vec![
        Intersection::new(-1.0, &shape),
        Intersection::new(1.0, &shape),
    ].into();

    let comps = IntersectionComputation::new(&r, &xs.intersections[1],
        Some(&xs));

    assert!(crate::feq(comps.schlick(), 0.04));
}

#[test]
fn schlick_with_small_angle_and_n2_greater() {
    let shape = glass_sphere();
    let r = Ray4D::new(Point::new(0.0, 0.99, -2.0),
        Vector::new(0.0, 0.0, 1.0));
    let xs: Intersections = vec![Intersection::new(1.8589, &shape)].into();

    let comps = IntersectionComputation::new(&r, &xs.intersections[0],
        Some(&xs));

    assert!(crate::feq(comps.schlick(), 0.48873));
}
