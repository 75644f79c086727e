use std::fmt;
use std::ops::{ Index, IndexMut, Mul };
use std::convert::From;

use thiserror::Error;

use crate::feq;
use crate::tuple::{ Tuple4D, Point, Vector };

/// Failures from matrix algebra.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    #[error("matrix is not invertible (determinant {determinant})")]
    NotInvertible { determinant: f64 },
}

/// A 2x2 matrix. Only used as the base case for cofactor expansion.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
struct Matrix2D {
    data: [f64; 4],
}

impl From<[f64; 4]> for Matrix2D {
    fn from(data: [f64; 4]) -> Matrix2D {
        Matrix2D { data }
    }
}

impl Index<(usize, usize)> for Matrix2D {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.data[(index.0 * 2) + index.1]
    }
}

impl Matrix2D {
    fn determinant(&self) -> f64 {
        self[(0, 0)] * self[(1, 1)] - self[(0, 1)] * self[(1, 0)]
    }
}

/// A 3x3 matrix.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
struct Matrix3D {
    data: [f64; 9],
}

impl From<[f64; 9]> for Matrix3D {
    fn from(data: [f64; 9]) -> Matrix3D {
        Matrix3D { data }
    }
}

impl Index<(usize, usize)> for Matrix3D {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.data[(index.0 * 3) + index.1]
    }
}

impl Matrix3D {
    /// Drops `row` and `col`, leaving a 2x2 matrix.
    fn submatrix(&self, row: usize, col: usize) -> Matrix2D {
        let mut buf = [0.0; 4];
        let mut count = 0;

        for r in (0..3).filter(|&r| r != row) {
            for c in (0..3).filter(|&c| c != col) {
                buf[count] = self[(r, c)];
                count += 1;
            }
        }

        Matrix2D { data: buf }
    }

    fn minor(&self, row: usize, col: usize) -> f64 {
        self.submatrix(row, col).determinant()
    }

    fn cofactor(&self, row: usize, col: usize) -> f64 {
        let m = self.minor(row, col);
        if (row + col) % 2 == 0 { m } else { -m }
    }

    fn determinant(&self) -> f64 {
        (0..3).map(|c| self[(0, c)] * self.cofactor(0, c)).sum()
    }
}

/// A 4x4 matrix.
///
/// Every transformation in the tracer is one of these: object transforms,
/// pattern transforms and the camera's view transform. Matrices are plain
/// `Copy` values; the builders below return fresh matrices and nothing is
/// modified in place after construction.
///
/// Transformations chain right to left. In `c * b * a`, `a` is applied to a
/// point first.
///
/// # Examples
///
/// ```
/// # use glint::matrix::Matrix4D;
/// # use glint::tuple::Point;
/// use std::f64::consts::PI;
///
/// let t = Matrix4D::translation(10.0, 5.0, 7.0)
///     * Matrix4D::scaling(5.0, 5.0, 5.0)
///     * Matrix4D::rotation_x(PI / 2.0);
///
/// assert_eq!(t * Point::new(1.0, 0.0, 1.0), Point::new(15.0, 0.0, 7.0));
/// ```
///
/// Singular matrices refuse to invert:
///
/// ```
/// # use glint::matrix::{ Matrix4D, MatrixError };
/// let flat = Matrix4D::scaling(1.0, 0.0, 1.0);
/// assert_eq!(flat.inverse(),
///     Err(MatrixError::NotInvertible { determinant: 0.0 }));
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct Matrix4D {
    data: [f64; 16],
}

/// Matrices are compared element-wise, within `FEQ_EPSILON`.
impl PartialEq for Matrix4D {
    fn eq(&self, other: &Matrix4D) -> bool {
        self.data.iter().zip(other.data.iter()).all(|(x, y)| feq(*x, *y))
    }
}

impl Matrix4D {
    /// All zeroes.
    pub fn new() -> Matrix4D {
        Matrix4D { data: [0.0; 16] }
    }

    pub fn identity() -> Matrix4D {
        let mut buf = [0.0; 16];
        buf[0] = 1.0; buf[5] = 1.0; buf[10] = 1.0; buf[15] = 1.0;

        Matrix4D { data: buf }
    }

    /// Offsets points by `x`, `y` and `z`. Vectors are unaffected.
    pub fn translation(x: f64, y: f64, z: f64) -> Matrix4D {
        let mut trans = Self::identity();
        trans[(0, 3)] = x;
        trans[(1, 3)] = y;
        trans[(2, 3)] = z;

        trans
    }

    /// Scales along the X, Y and Z axes. Negative factors reflect.
    pub fn scaling(x: f64, y: f64, z: f64) -> Matrix4D {
        let mut scale = Self::identity();
        scale[(0, 0)] = x;
        scale[(1, 1)] = y;
        scale[(2, 2)] = z;

        scale
    }

    /// Rotates `r` radians about the X axis.
    ///
    /// ```
    /// # use glint::tuple::Point;
    /// # use glint::matrix::Matrix4D;
    /// let m = Matrix4D::rotation_x(std::f64::consts::PI / 2.0);
    /// assert_eq!(m * Point::new(0.0, 1.0, 0.0), Point::new(0.0, 0.0, 1.0));
    /// ```
    pub fn rotation_x(r: f64) -> Matrix4D {
        let mut rotate = Self::identity();
        rotate[(1, 1)] =  r.cos();
        rotate[(1, 2)] = -r.sin();
        rotate[(2, 1)] =  r.sin();
        rotate[(2, 2)] =  r.cos();

        rotate
    }

    /// Rotates `r` radians about the Y axis.
    pub fn rotation_y(r: f64) -> Matrix4D {
        let mut rotate = Self::identity();
        rotate[(0, 0)] =  r.cos();
        rotate[(0, 2)] =  r.sin();
        rotate[(2, 0)] = -r.sin();
        rotate[(2, 2)] =  r.cos();

        rotate
    }

    /// Rotates `r` radians about the Z axis.
    pub fn rotation_z(r: f64) -> Matrix4D {
        let mut rotate = Self::identity();
        rotate[(0, 0)] =  r.cos();
        rotate[(0, 1)] = -r.sin();
        rotate[(1, 0)] =  r.sin();
        rotate[(1, 1)] =  r.cos();

        rotate
    }

    /// Shears each coordinate in proportion to the other two.
    ///
    /// `xy` moves `x` in proportion to `y`, `xz` moves `x` in proportion to
    /// `z`, and so on.
    ///
    /// ```
    /// # use glint::tuple::Point;
    /// # use glint::matrix::Matrix4D;
    /// let m = Matrix4D::shearing(1.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    /// assert_eq!(m * Point::new(2.0, 3.0, 4.0), Point::new(5.0, 3.0, 4.0));
    /// ```
    pub fn shearing(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64)
        -> Matrix4D {
        let mut shear = Self::identity();
        shear[(0, 1)] = xy;
        shear[(0, 2)] = xz;
        shear[(1, 0)] = yx;
        shear[(1, 2)] = yz;
        shear[(2, 0)] = zx;
        shear[(2, 1)] = zy;

        shear
    }

    /// Builds a look-at transform for an eye at `from` looking toward `to`.
    ///
    /// The result moves the *world* relative to the eye. The default
    /// orientation (eye at the origin looking down -Z, `up` along +Y) is the
    /// identity.
    pub fn view_transform(from: Point, to: Point, up: Vector) -> Matrix4D {
        let forward = (to - from).normalize();
        let left = forward.cross(&up.normalize()).normalize();
        let true_up = left.cross(&forward);

        let mut orientation = Matrix4D::identity();
        orientation[(0, 0)] = left.x;
        orientation[(0, 1)] = left.y;
        orientation[(0, 2)] = left.z;

        orientation[(1, 0)] = true_up.x;
        orientation[(1, 1)] = true_up.y;
        orientation[(1, 2)] = true_up.z;

        orientation[(2, 0)] = -forward.x;
        orientation[(2, 1)] = -forward.y;
        orientation[(2, 2)] = -forward.z;

        orientation * Matrix4D::translation(-from.x, -from.y, -from.z)
    }

    /// Returns the transpose of this matrix.
    pub fn transposition(&self) -> Matrix4D {
        let mut buf = *self;

        for r in 0..4 {
            for c in (r+1)..4 {
                buf[(r, c)] = self[(c, r)];
                buf[(c, r)] = self[(r, c)];
            }
        }

        buf
    }

    fn submatrix(&self, row: usize, col: usize) -> Matrix3D {
        let mut buf = [0.0; 9];
        let mut count = 0;

        for r in (0..4).filter(|&r| r != row) {
            for c in (0..4).filter(|&c| c != col) {
                buf[count] = self[(r, c)];
                count += 1;
            }
        }

        Matrix3D { data: buf }
    }

    /// Determinant of the 3x3 submatrix without `row` and `col`.
    pub fn minor(&self, row: usize, col: usize) -> f64 {
        self.submatrix(row, col).determinant()
    }

    /// The minor at `row`, `col`, negated when `row + col` is odd.
    pub fn cofactor(&self, row: usize, col: usize) -> f64 {
        let m = self.minor(row, col);
        if (row + col) % 2 == 0 { m } else { -m }
    }

    /// Laplace expansion along the first row.
    pub fn determinant(&self) -> f64 {
        (0..4).map(|c| self[(0, c)] * self.cofactor(0, c)).sum()
    }

    /// Calculates the inverse (adjugate over determinant).
    ///
    /// Fails with `MatrixError::NotInvertible` when the determinant is
    /// exactly zero.
    pub fn inverse(&self) -> Result<Matrix4D, MatrixError> {
        let determinant = self.determinant();
        if determinant == 0.0 {
            return Err(MatrixError::NotInvertible { determinant });
        }

        let mut inv = Matrix4D::new();
        for r in 0..4 {
            for c in 0..4 {
                inv[(c, r)] = self.cofactor(r, c) / determinant;
            }
        }

        Ok(inv)
    }
}

impl From<[f64; 16]> for Matrix4D {
    fn from(data: [f64; 16]) -> Matrix4D {
        Matrix4D { data }
    }
}

impl Index<(usize, usize)> for Matrix4D {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.data[(index.0 * 4) + index.1]
    }
}

impl IndexMut<(usize, usize)> for Matrix4D {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut f64 {
        &mut self.data[(index.0 * 4) + index.1]
    }
}

/// Matrix product. Not commutative.
///
/// ```
/// # use glint::matrix::Matrix4D;
/// let m1 = Matrix4D::scaling(2.0, 3.0, 4.0);
/// let m2 = Matrix4D::scaling(4.0, 3.0, 2.0);
/// assert_eq!(m1 * m2, Matrix4D::scaling(8.0, 9.0, 8.0));
/// ```
impl Mul<Matrix4D> for Matrix4D {
    type Output = Matrix4D;

    fn mul(self, other: Matrix4D) -> Matrix4D {
        let mut res = Matrix4D::new();

        for r in 0..4 {
            for c in 0..4 {
                res[(r, c)] = self[(r, 0)] * other[(0, c)]
                    + self[(r, 1)] * other[(1, c)]
                    + self[(r, 2)] * other[(2, c)]
                    + self[(r, 3)] * other[(3, c)]
            }
        }

        res
    }
}

/// Matrix by column tuple.
impl Mul<Tuple4D> for Matrix4D {
    type Output = Tuple4D;

    fn mul(self, other: Tuple4D) -> Tuple4D {
        let mut buf = [0.0; 4];

        for (r, out) in buf.iter_mut().enumerate() {
            *out = self[(r, 0)] * other.x
                + self[(r, 1)] * other.y
                + self[(r, 2)] * other.z
                + self[(r, 3)] * other.w;
        }

        Tuple4D::new(buf[0], buf[1], buf[2], buf[3])
    }
}

/// Transforms a point (`w = 1`, so translation applies).
impl Mul<Point> for Matrix4D {
    type Output = Point;

    fn mul(self, other: Point) -> Point {
        let t = self * Tuple4D::from(other);
        Point::new(t.x, t.y, t.z)
    }
}

/// Transforms a vector (`w = 0`, so translation is ignored).
///
/// ```
/// # use glint::tuple::Vector;
/// # use glint::matrix::Matrix4D;
/// let v = Vector::new(1.0, 4.0, 5.0);
/// let m = Matrix4D::scaling(2.0, 2.0, 2.0);
/// assert_eq!(m * v, Vector::new(2.0, 8.0, 10.0));
/// ```
impl Mul<Vector> for Matrix4D {
    type Output = Vector;

    fn mul(self, other: Vector) -> Vector {
        let t = self * Tuple4D::from(other);
        Vector::new(t.x, t.y, t.z)
    }
}

impl fmt::Display for Matrix4D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..4 {
            write!(f, "|")?;
            for c in 0..4 {
                write!(f, " {} |", self[(r, c)])?;
            }

            if r != 3 {
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

#[test]
fn identity() {
    let i = Matrix4D::identity();
    let a: Matrix4D = [ 0.0, 1.0,  2.0,  4.0,
                        1.0, 2.0,  4.0,  8.0,
                        2.0, 4.0,  8.0, 16.0,
                        4.0, 8.0, 16.0, 32.0, ].into();

    assert_eq!(i * a, a);
    assert_eq!(a * i, a);
}

#[test]
fn identity_times_tuple() {
    let t = Tuple4D::new(1.0, 2.0, 3.0, 4.0);

    assert_eq!(Matrix4D::identity() * t, t);
}

#[test]
fn transpose() {
    let a: Matrix4D = [ 0.0, 9.0, 3.0, 0.0,
                        9.0, 8.0, 0.0, 8.0,
                        1.0, 8.0, 5.0, 3.0,
                        0.0, 0.0, 5.0, 8.0, ].into();

    let t: Matrix4D = [ 0.0, 9.0, 1.0, 0.0,
                        9.0, 8.0, 8.0, 0.0,
                        3.0, 0.0, 5.0, 5.0,
                        0.0, 8.0, 3.0, 8.0, ].into();

    assert_eq!(t, a.transposition());
    assert_eq!(t.transposition(), a);
    assert_eq!(Matrix4D::identity().transposition(), Matrix4D::identity());
}

#[test]
fn mat3_submatrix() {
    let a: Matrix3D = [  1.0, 5.0,  0.0,
                        -3.0, 2.0,  7.0,
                         0.0, 6.0, -3.0, ].into();

    let s: Matrix2D = [ -3.0, 2.0,
                         0.0, 6.0  ].into();

    assert_eq!(a.submatrix(0, 2), s);
}

#[test]
fn mat4_submatrix() {
    let a: Matrix4D = [ -6.0, 1.0,  1.0, 6.0,
                        -8.0, 5.0,  8.0, 6.0,
                        -1.0, 0.0,  8.0, 2.0,
                        -7.0, 1.0, -1.0, 1.0, ].into();

    let s: Matrix3D = [ -6.0,  1.0, 6.0,
                        -8.0,  8.0, 6.0,
                        -7.0, -1.0, 1.0, ].into();

    assert_eq!(a.submatrix(2, 1), s);
}

#[test]
fn mat3_cofactor() {
    let a: Matrix3D = [ 3.0,  5.0,  0.0,
                        2.0, -1.0, -7.0,
                        6.0, -1.0,  5.0, ].into();

    assert_eq!(a.minor(0, 0), -12.0);
    assert_eq!(a.cofactor(0, 0), -12.0);
    assert_eq!(a.minor(1, 0), 25.0);
    assert_eq!(a.cofactor(1, 0), -25.0);
}

#[test]
fn mat3_determinant() {
    let a: Matrix3D = [  1.0, 2.0,  6.0,
                        -5.0, 8.0, -4.0,
                         2.0, 6.0,  4.0, ].into();

    assert_eq!(a.cofactor(0, 0), 56.0);
    assert_eq!(a.cofactor(0, 1), 12.0);
    assert_eq!(a.cofactor(0, 2), -46.0);
    assert_eq!(a.determinant(), -196.0);
}

#[test]
fn mat4_determinant() {
    let a: Matrix4D = [ -2.0, -8.0,  3.0,  5.0,
                        -3.0,  1.0,  7.0,  3.0,
                         1.0,  2.0, -9.0,  6.0,
                        -6.0,  7.0,  7.0, -9.0, ].into();

    assert_eq!(a.cofactor(0, 0), 690.0);
    assert_eq!(a.cofactor(0, 1), 447.0);
    assert_eq!(a.cofactor(0, 2), 210.0);
    assert_eq!(a.cofactor(0, 3), 51.0);
    assert_eq!(a.determinant(), -4071.0);
}

#[test]
fn mat4_singular() {
    let a: Matrix4D = [ -4.0,  2.0, -2.0, -3.0,
                         9.0,  6.0,  2.0,  6.0,
                         0.0, -5.0,  1.0, -5.0,
                         0.0,  0.0,  0.0,  0.0, ].into();

    assert_eq!(a.determinant(), 0.0);
    assert!(matches!(a.inverse(), Err(MatrixError::NotInvertible { .. })));
}

#[test]
fn mat4_inverse() {
    let a: Matrix4D = [  8.0, -5.0,  9.0,  2.0,
                         7.0,  5.0,  6.0,  1.0,
                        -6.0,  0.0,  9.0,  6.0,
                        -3.0,  0.0, -9.0, -4.0, ].into();

    let i: Matrix4D = [ -0.15385, -0.15385, -0.28205, -0.53846,
                        -0.07692,  0.12308,  0.02564,  0.03077,
                         0.35897,  0.35897,  0.43590,  0.92308,
                        -0.69231, -0.69231, -0.76923, -1.92308, ].into();

    assert_eq!(a.inverse().unwrap(), i);
}

#[test]
fn mat4_inverse_roundtrips() {
    let a: Matrix4D = [  3.0, -9.0,  7.0,  3.0,
                         3.0,  8.0,  2.0, -9.0,
                        -4.0,  4.0,  4.0,  1.0,
                        -6.0,  5.0, -1.0,  1.0, ].into();

    let inv = a.inverse().unwrap();

    assert_eq!(inv.inverse().unwrap(), a);
    assert_eq!(a * inv, Matrix4D::identity());
}

#[test]
fn mat4_inverse_mult() {
    let a: Matrix4D = [  3.0, -9.0,  7.0,  3.0,
                         3.0,  8.0,  2.0, -9.0,
                        -4.0,  4.0,  4.0,  1.0,
                        -6.0,  5.0, -1.0,  1.0, ].into();

    let b: Matrix4D = [ 8.0,  2.0, 2.0, 2.0,
                        3.0, -1.0, 7.0, 0.0,
                        7.0,  0.0, 5.0, 4.0,
                        6.0, -2.0, 0.0, 5.0  ].into();

    let c = a * b;

    assert_eq!(a, c * b.inverse().unwrap());
}

#[test]
fn mat4_translation() {
    let transform = Matrix4D::translation(5.0, -3.0, 2.0);
    let point = Point::new(-3.0, 4.0, 5.0);

    assert_eq!(transform * point, Point::new(2.0, 1.0, 7.0));
}

#[test]
fn mat4_translation_inverse() {
    let transform = Matrix4D::translation(5.0, -3.0, 2.0);
    let inv = transform.inverse().unwrap();
    let point = Point::new(-3.0, 4.0, 5.0);

    assert_eq!(inv * point, Point::new(-8.0, 7.0, 3.0));
    assert_eq!(inv * (transform * point), point);
}

#[test]
fn mat4_translation_vector() {
    let transform = Matrix4D::translation(5.0, -3.0, 2.0);
    let vector = Vector::new(-3.0, 4.0, 5.0);

    assert_eq!(transform * vector, vector);
}

#[test]
fn mat4_scaling() {
    let transform = Matrix4D::scaling(2.0, 3.0, 4.0);
    let vector = Vector::new(-4.0, 6.0, 8.0);

    assert_eq!(transform * vector, Vector::new(-8.0, 18.0, 32.0));
    assert_eq!(transform.inverse().unwrap() * vector,
        Vector::new(-2.0, 2.0, 2.0));
}

#[test]
fn mat4_scaling_reflection() {
    let transform = Matrix4D::scaling(-1.0, 1.0, 1.0);
    let point = Point::new(2.0, 3.0, 4.0);

    assert_eq!(transform * point, Point::new(-2.0, 3.0, 4.0));
}

#[test]
fn mat4_rotate_x() {
    let half_quarter = Matrix4D::rotation_x(std::f64::consts::PI / 4.0);
    let full_quarter = Matrix4D::rotation_x(std::f64::consts::PI / 2.0);
    let point = Point::new(0.0, 1.0, 0.0);

    assert_eq!(full_quarter * point, Point::new(0.0, 0.0, 1.0));
    assert_eq!(half_quarter * point,
        Point::new(0.0, 2.0f64.sqrt() / 2.0, 2.0f64.sqrt() / 2.0));
}

#[test]
fn mat4_rotate_y() {
    let half_quarter = Matrix4D::rotation_y(std::f64::consts::PI / 4.0);
    let full_quarter = Matrix4D::rotation_y(std::f64::consts::PI / 2.0);
    let point = Point::new(0.0, 0.0, 1.0);

    assert_eq!(full_quarter * point, Point::new(1.0, 0.0, 0.0));
    assert_eq!(half_quarter * point,
        Point::new(2.0f64.sqrt() / 2.0, 0.0, 2.0f64.sqrt() / 2.0));
}

#[test]
fn mat4_rotate_z() {
    let half_quarter = Matrix4D::rotation_z(std::f64::consts::PI / 4.0);
    let full_quarter = Matrix4D::rotation_z(std::f64::consts::PI / 2.0);
    let point = Point::new(0.0, 1.0, 0.0);

    assert_eq!(full_quarter * point, Point::new(-1.0, 0.0, 0.0));
    assert_eq!(half_quarter * point,
        Point::new(-2.0f64.sqrt() / 2.0, 2.0f64.sqrt() / 2.0, 0.0));
}

#[test]
fn mat4_shear() {
    let point = Point::new(2.0, 3.0, 4.0);
    let cases = [
        ([1.0, 0.0, 0.0, 0.0, 0.0, 0.0], Point::new(5.0, 3.0, 4.0)),
        ([0.0, 1.0, 0.0, 0.0, 0.0, 0.0], Point::new(6.0, 3.0, 4.0)),
        ([0.0, 0.0, 1.0, 0.0, 0.0, 0.0], Point::new(2.0, 5.0, 4.0)),
        ([0.0, 0.0, 0.0, 1.0, 0.0, 0.0], Point::new(2.0, 7.0, 4.0)),
        ([0.0, 0.0, 0.0, 0.0, 1.0, 0.0], Point::new(2.0, 3.0, 6.0)),
        ([0.0, 0.0, 0.0, 0.0, 0.0, 1.0], Point::new(2.0, 3.0, 7.0)),
    ];

    for (s, expected) in cases.iter() {
        let m = Matrix4D::shearing(s[0], s[1], s[2], s[3], s[4], s[5]);
        assert_eq!(m * point, *expected);
    }
}

#[test]
fn chained_transforms() {
    let a = Matrix4D::rotation_x(std::f64::consts::PI / 2.0);
    let b = Matrix4D::scaling(5.0, 5.0, 5.0);
    let c = Matrix4D::translation(10.0, 5.0, 7.0);

    let p = Point::new(1.0, 0.0, 1.0);
    let p2 = a * p;
    let p3 = b * p2;
    let p4 = c * p3;

    assert_eq!(p2, Point::new(1.0, -1.0, 0.0));
    assert_eq!(p3, Point::new(5.0, -5.0, 0.0));
    assert_eq!(p4, Point::new(15.0, 0.0, 7.0));
    assert_eq!((c * b * a) * p, p4);
}

#[test]
fn default_view() {
    let from = Point::new(0.0, 0.0, 0.0);
    let to = Point::new(0.0, 0.0, -1.0);
    let up = Vector::new(0.0, 1.0, 0.0);

    assert_eq!(Matrix4D::view_transform(from, to, up), Matrix4D::identity());
}

#[test]
fn positive_z_view() {
    let from = Point::new(0.0, 0.0, 0.0);
    let to = Point::new(0.0, 0.0, 1.0);
    let up = Vector::new(0.0, 1.0, 0.0);

    assert_eq!(Matrix4D::view_transform(from, to, up),
        Matrix4D::scaling(-1.0, 1.0, -1.0));
}

#[test]
fn view_moves_world() {
    let from = Point::new(0.0, 0.0, 8.0);
    let to = Point::new(0.0, 0.0, 0.0);
    let up = Vector::new(0.0, 1.0, 0.0);

    assert_eq!(Matrix4D::view_transform(from, to, up),
        Matrix4D::translation(0.0, 0.0, -8.0));
}

#[test]
fn arbitrary_view() {
    let from = Point::new(1.0, 3.0, 2.0);
    let to = Point::new(4.0, -2.0, 8.0);
    let up = Vector::new(1.0, 1.0, 0.0);

    let a: Matrix4D = [ -0.51450, 0.51450,  0.68599, -2.40098,
                         0.77892, 0.61494,  0.12299, -2.86972,
                        -0.35857, 0.59761, -0.71714,  0.00000,
                         0.00000, 0.00000,  0.00000,  1.00000, ].into();

    assert_eq!(Matrix4D::view_transform(from, to, up), a);
}
