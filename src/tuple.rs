use std::ops::{ Add, Sub, Neg, Mul, Div };

use crate::feq;

/// A homogeneous 4-component tuple.
///
/// This is the representation matrices operate on. A `w` of `1.0` marks a
/// point, a `w` of `0.0` marks a vector. Arithmetic is deliberately not
/// implemented here; use the typed `Point` and `Vector` instead, which only
/// expose the operations that are geometrically meaningful.
#[derive(Debug, Default, Copy, Clone)]
pub struct Tuple4D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64
}

impl PartialEq for Tuple4D {
    fn eq(&self, other: &Tuple4D) -> bool {
        feq(self.x, other.x) &&
            feq(self.y, other.y) &&
            feq(self.z, other.z) &&
            feq(self.w, other.w)
    }
}

impl Tuple4D {
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Tuple4D {
        Tuple4D { x, y, z, w }
    }

    pub fn is_point(&self) -> bool {
        self.w == 1.0
    }

    pub fn is_vector(&self) -> bool {
        self.w == 0.0
    }

    /// Reinterprets the tuple as a point, if `w == 1.0`.
    pub fn as_point(&self) -> Option<Point> {
        if self.is_point() {
            Some(Point::new(self.x, self.y, self.z))
        } else {
            None
        }
    }

    /// Reinterprets the tuple as a vector, if `w == 0.0`.
    pub fn as_vector(&self) -> Option<Vector> {
        if self.is_vector() {
            Some(Vector::new(self.x, self.y, self.z))
        } else {
            None
        }
    }
}

impl From<Point> for Tuple4D {
    fn from(p: Point) -> Tuple4D {
        Tuple4D { x: p.x, y: p.y, z: p.z, w: 1.0 }
    }
}

impl From<Vector> for Tuple4D {
    fn from(v: Vector) -> Tuple4D {
        Tuple4D { x: v.x, y: v.y, z: v.z, w: 0.0 }
    }
}

/// A position in space.
///
/// Points can be offset by vectors, and subtracting two points yields the
/// vector between them. Adding two points has no meaning, so it does not
/// compile:
///
/// ```compile_fail
/// use glint::tuple::Point;
///
/// let a = Point::new(1.0, 2.0, 3.0);
/// let b = Point::new(4.0, 5.0, 6.0);
/// let _ = a + b;
/// ```
#[derive(Debug, Default, Copy, Clone)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl PartialEq for Point {
    fn eq(&self, other: &Point) -> bool {
        feq(self.x, other.x) &&
            feq(self.y, other.y) &&
            feq(self.z, other.z)
    }
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Point {
        Point { x, y, z }
    }

    pub fn origin() -> Point {
        Point { x: 0.0, y: 0.0, z: 0.0 }
    }
}

/// A direction (and magnitude) in space.
///
/// # Examples
///
/// ```
/// use glint::tuple::Vector;
///
/// let v = Vector::new(1.0, 2.0, 3.0);
/// let w = Vector::new(2.0, 3.0, 4.0);
/// assert_eq!(v.dot(&w), 20.0);
/// assert_eq!(v.cross(&w), Vector::new(-1.0, 2.0, -1.0));
/// ```
#[derive(Debug, Default, Copy, Clone)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl PartialEq for Vector {
    fn eq(&self, other: &Vector) -> bool {
        feq(self.x, other.x) &&
            feq(self.y, other.y) &&
            feq(self.z, other.z)
    }
}

impl Vector {
    pub fn new(x: f64, y: f64, z: f64) -> Vector {
        Vector { x, y, z }
    }

    pub fn zero() -> Vector {
        Vector { x: 0.0, y: 0.0, z: 0.0 }
    }

    pub fn magnitude(&self) -> f64 {
        f64::sqrt(self.x.powi(2) + self.y.powi(2) + self.z.powi(2))
    }

    /// Scales the vector to unit length.
    ///
    /// The zero vector has no direction and is returned unchanged rather than
    /// turned into NaNs.
    pub fn normalize(&self) -> Vector {
        let mag = self.magnitude();
        if mag == 0.0 {
            return *self;
        }

        Vector {
            x: self.x / mag,
            y: self.y / mag,
            z: self.z / mag,
        }
    }

    pub fn dot(&self, other: &Vector) -> f64 {
        self.x * other.x
            + self.y * other.y
            + self.z * other.z
    }

    pub fn cross(&self, other: &Vector) -> Vector {
        Vector {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Reflects a vector across a normal.
    pub fn reflect(&self, normal: &Vector) -> Vector {
        *self - (*normal * (2.0 * self.dot(normal)))
    }
}

impl Sub<Point> for Point {
    type Output = Vector;

    fn sub(self, other: Point) -> Vector {
        Vector {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, other: Vector) -> Point {
        Point {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub<Vector> for Point {
    type Output = Point;

    fn sub(self, other: Vector) -> Point {
        Point {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, other: Vector) -> Vector {
        Vector {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, other: Vector) -> Vector {
        Vector {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

/// Implements scalar right-multiplication for a vector.
///
/// ```
/// use glint::tuple::Vector;
///
/// let v = Vector::new(1.0, -2.0, 3.0);
/// assert_eq!(v * 3.5, Vector::new(3.5, -7.0, 10.5));
/// ```
impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, other: f64) -> Vector {
        Vector {
            x: self.x * other,
            y: self.y * other,
            z: self.z * other,
        }
    }
}

/// Implements scalar left-multiplication for a vector.
impl Mul<Vector> for f64 {
    type Output = Vector;

    fn mul(self, other: Vector) -> Vector {
        other * self
    }
}

impl Div<f64> for Vector {
    type Output = Vector;

    fn div(self, other: f64) -> Vector {
        Vector {
            x: self.x / other,
            y: self.y / other,
            z: self.z / other,
        }
    }
}

/* Tests */

#[test]
fn tuple_with_w1_is_point() {
    let a = Tuple4D::new(4.3, -4.2, 3.1, 1.0);

    assert!(a.is_point());
    assert!(!a.is_vector());
    assert_eq!(a.as_point(), Some(Point::new(4.3, -4.2, 3.1)));
    assert_eq!(a.as_vector(), None);
}

#[test]
fn tuple_with_w0_is_vector() {
    let a = Tuple4D::new(4.3, -4.2, 3.1, 0.0);

    assert!(a.is_vector());
    assert_eq!(a.as_vector(), Some(Vector::new(4.3, -4.2, 3.1)));
    assert_eq!(a.as_point(), None);
}

#[test]
fn point_and_vector_carry_w() {
    assert_eq!(Tuple4D::from(Point::new(4.0, -4.0, 3.0)),
        Tuple4D::new(4.0, -4.0, 3.0, 1.0));
    assert_eq!(Tuple4D::from(Vector::new(4.0, -4.0, 3.0)),
        Tuple4D::new(4.0, -4.0, 3.0, 0.0));
}

#[test]
fn add_vector_to_point() {
    let p = Point::new(3.0, -2.0, 5.0);
    let v = Vector::new(-2.0, 3.0, 1.0);

    assert_eq!(p + v, Point::new(1.0, 1.0, 6.0));
}

#[test]
fn sub_points() {
    let p1 = Point::new(3.0, 2.0, 1.0);
    let p2 = Point::new(5.0, 6.0, 7.0);

    assert_eq!(p1 - p2, Vector::new(-2.0, -4.0, -6.0));
}

#[test]
fn sub_vector_from_point() {
    let p = Point::new(3.0, 2.0, 1.0);
    let v = Vector::new(5.0, 6.0, 7.0);

    assert_eq!(p - v, Point::new(-2.0, -4.0, -6.0));
}

#[test]
fn sub_vectors() {
    let v1 = Vector::new(3.0, 2.0, 1.0);
    let v2 = Vector::new(5.0, 6.0, 7.0);

    assert_eq!(v1 - v2, Vector::new(-2.0, -4.0, -6.0));
}

#[test]
fn neg_vector() {
    let a = Vector::new(1.0, -2.0, 3.0);

    assert_eq!(-a, Vector::new(-1.0, 2.0, -3.0));
}

#[test]
fn mul_fraction() {
    let a = Vector::new(1.0, -2.0, 3.0);

    assert_eq!(a * 0.5, Vector::new(0.5, -1.0, 1.5));
    assert_eq!(0.5 * a, Vector::new(0.5, -1.0, 1.5));
}

#[test]
fn div_scalar() {
    let a = Vector::new(1.0, -2.0, 3.0);

    assert_eq!(a / 2.0, Vector::new(0.5, -1.0, 1.5));
}

#[test]
fn magnitude_neg() {
    let v = Vector::new(-1.0, -2.0, -3.0);

    assert_eq!(v.magnitude(), f64::sqrt(14.0));
}

#[test]
fn normalize_dirty() {
    let v = Vector::new(1.0, 2.0, 3.0);
    let e = Vector::new(
        1.0 / f64::sqrt(14.0),
        2.0 / f64::sqrt(14.0),
        3.0 / f64::sqrt(14.0)
    );

    assert_eq!(v.normalize(), e);
}

#[test]
fn normalized_vectors_have_unit_magnitude() {
    let samples = [
        Vector::new(4.0, 0.0, 0.0),
        Vector::new(1.0, 2.0, 3.0),
        Vector::new(-0.001, 250.0, 3.5),
        Vector::new(-7.0, -7.0, -7.0),
    ];

    for v in samples.iter() {
        assert!(crate::feq(v.normalize().magnitude(), 1.0));
    }
}

#[test]
fn normalize_zero_is_zero() {
    assert_eq!(Vector::zero().normalize(), Vector::zero());
}

#[test]
fn cross_is_perpendicular() {
    let a = Vector::new(1.0, 2.0, 3.0);
    let b = Vector::new(2.0, 3.0, 4.0);
    let c = a.cross(&b);

    assert_eq!(c, Vector::new(-1.0, 2.0, -1.0));
    assert_eq!(b.cross(&a), Vector::new(1.0, -2.0, 1.0));
    assert!(crate::feq(c.dot(&a), 0.0));
    assert!(crate::feq(c.dot(&b), 0.0));
}

#[test]
fn reflect_45() {
    let v = Vector::new(1.0, -1.0, 0.0);
    let n = Vector::new(0.0, 1.0, 0.0);

    assert_eq!(v.reflect(&n), Vector::new(1.0, 1.0, 0.0));
}

#[test]
fn reflect_slanted() {
    let v = Vector::new(0.0, -1.0, 0.0);
    let n = Vector::new(2.0f64.sqrt() / 2.0, 2.0f64.sqrt() / 2.0, 0.0);

    assert_eq!(v.reflect(&n), Vector::new(1.0, 0.0, 0.0));
}
