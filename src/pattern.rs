use serde::Deserialize;

use crate::color::Color;
use crate::matrix::{ Matrix4D, MatrixError };
use crate::shape::Shape;
use crate::tuple::Point;

/// The procedural color functions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// Alternating bands across X.
    Stripe,

    /// Concentric rings around the Y axis.
    Ring,

    /// Alternating unit cubes.
    Checker,

    /// Linear blend from `a` to `b` across each unit of X.
    Gradient,

    /// Blend from `a` to `b` across each unit of distance from the Y axis,
    /// reversing direction on alternate bands.
    RadialGradient,
}

/// A two-color pattern with its own transform.
///
/// The transform places the pattern relative to the object it's applied to;
/// scale it down for finer stripes, rotate it to tilt them, and so on.
///
/// # Examples
///
/// ```
/// # use glint::color::Color;
/// # use glint::pattern::Pattern;
/// # use glint::tuple::Point;
/// let p = Pattern::stripe(Color::white(), Color::black());
///
/// assert_eq!(p.pattern_at(Point::new(0.9, 0.0, 0.0)), Color::white());
/// assert_eq!(p.pattern_at(Point::new(1.0, 0.0, 0.0)), Color::black());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pattern {
    pub kind: PatternKind,
    pub a: Color,
    pub b: Color,

    transform: Matrix4D,
    inverse: Matrix4D,
}

impl Pattern {
    pub fn new(kind: PatternKind, a: Color, b: Color) -> Pattern {
        Pattern {
            kind, a, b,
            transform: Matrix4D::identity(),
            inverse: Matrix4D::identity(),
        }
    }

    pub fn stripe(a: Color, b: Color) -> Pattern {
        Self::new(PatternKind::Stripe, a, b)
    }

    pub fn ring(a: Color, b: Color) -> Pattern {
        Self::new(PatternKind::Ring, a, b)
    }

    pub fn checker(a: Color, b: Color) -> Pattern {
        Self::new(PatternKind::Checker, a, b)
    }

    pub fn gradient(a: Color, b: Color) -> Pattern {
        Self::new(PatternKind::Gradient, a, b)
    }

    pub fn radial_gradient(a: Color, b: Color) -> Pattern {
        Self::new(PatternKind::RadialGradient, a, b)
    }

    /// Replaces the pattern's transform.
    pub fn with_transform(mut self, transform: Matrix4D)
        -> Result<Pattern, MatrixError> {
        self.inverse = transform.inverse()?;
        self.transform = transform;
        Ok(self)
    }

    pub fn transform(&self) -> &Matrix4D {
        &self.transform
    }

    /// Samples the pattern at a point in pattern space.
    pub fn pattern_at(&self, p: Point) -> Color {
        match self.kind {
            PatternKind::Stripe => self.pick(p.x.floor()),
            PatternKind::Ring => {
                self.pick((p.x.powi(2) + p.z.powi(2)).sqrt().floor())
            },
            PatternKind::Checker => {
                self.pick(p.x.floor() + p.y.floor() + p.z.floor())
            },
            PatternKind::Gradient => {
                self.a + (self.b - self.a) * (p.x - p.x.floor())
            },
            PatternKind::RadialGradient => {
                let r = (p.x.powi(2) + p.z.powi(2)).sqrt();
                let (from, to) = if is_even(r.floor()) {
                    (self.a, self.b)
                } else {
                    (self.b, self.a)
                };

                from + (to - from) * (r - r.floor())
            },
        }
    }

    /// Samples the pattern at a world-space point on `object`.
    ///
    /// The point passes through the object's space (including every group
    /// above it) before the pattern's own transform.
    pub fn pattern_at_object(&self, object: &Shape, world_point: Point)
        -> Color {
        let object_point = object.world_to_object(world_point);
        self.pattern_at(self.inverse * object_point)
    }

    fn pick(&self, band: f64) -> Color {
        if is_even(band) { self.a } else { self.b }
    }
}

fn is_even(n: f64) -> bool {
    n.rem_euclid(2.0) == 0.0
}

#[cfg(test)]
fn white_black(kind: PatternKind) -> Pattern {
    Pattern::new(kind, Color::white(), Color::black())
}

#[test]
fn stripe_pattern_is_constant_along_y_and_z() {
    let pattern = white_black(PatternKind::Stripe);

    for p in [Point::new(0.0, 0.0, 0.0),
              Point::new(0.0, 1.0, 0.0),
              Point::new(0.0, 2.0, 0.0),
              Point::new(0.0, 0.0, 1.0),
              Point::new(0.0, 0.0, 2.0)].iter() {
        assert_eq!(pattern.pattern_at(*p), Color::white());
    }
}

#[test]
fn stripe_pattern_alternates_along_x() {
    let pattern = white_black(PatternKind::Stripe);
    let cases = [
        ( 0.0, Color::white()),
        ( 0.9, Color::white()),
        ( 1.0, Color::black()),
        (-0.1, Color::black()),
        (-1.0, Color::black()),
        (-1.1, Color::white()),
    ];

    for &(x, expected) in cases.iter() {
        assert_eq!(pattern.pattern_at(Point::new(x, 0.0, 0.0)), expected);
    }
}

#[test]
fn stripes_with_object_transformation() {
    let object = Shape::sphere()
        .with_transform(Matrix4D::scaling(2.0, 2.0, 2.0))
        .unwrap();
    let pattern = white_black(PatternKind::Stripe);

    assert_eq!(pattern.pattern_at_object(&object, Point::new(1.5, 0.0, 0.0)),
        Color::white());
}

#[test]
fn stripes_with_pattern_transformation() {
    let object = Shape::sphere();
    let pattern = white_black(PatternKind::Stripe)
        .with_transform(Matrix4D::scaling(2.0, 2.0, 2.0))
        .unwrap();

    assert_eq!(pattern.pattern_at_object(&object, Point::new(1.5, 0.0, 0.0)),
        Color::white());
}

#[test]
fn stripes_with_both_transformations() {
    let object = Shape::sphere()
        .with_transform(Matrix4D::scaling(2.0, 2.0, 2.0))
        .unwrap();
    let pattern = white_black(PatternKind::Stripe)
        .with_transform(Matrix4D::translation(0.5, 0.0, 0.0))
        .unwrap();

    assert_eq!(pattern.pattern_at_object(&object, Point::new(2.5, 0.0, 0.0)),
        Color::white());
}

#[test]
fn pattern_follows_parent_group() {
    let s = Shape::sphere();
    let g = Shape::group(vec![s])
        .with_transform(Matrix4D::translation(1.0, 0.0, 0.0))
        .unwrap();
    let s = &g.children().unwrap()[0];
    let pattern = white_black(PatternKind::Stripe);

    assert_eq!(pattern.pattern_at_object(s, Point::new(1.5, 0.0, 0.0)),
        Color::white());
    assert_eq!(pattern.pattern_at_object(s, Point::new(2.5, 0.0, 0.0)),
        Color::black());
}

#[test]
fn gradient_interpolates_between_colors() {
    let pattern = white_black(PatternKind::Gradient);
    let cases = [
        (0.0, Color::white()),
        (0.25, Color::rgb(0.75, 0.75, 0.75)),
        (0.5, Color::rgb(0.5, 0.5, 0.5)),
        (0.75, Color::rgb(0.25, 0.25, 0.25)),
    ];

    for &(x, expected) in cases.iter() {
        assert_eq!(pattern.pattern_at(Point::new(x, 0.0, 0.0)), expected);
    }
}

#[test]
fn ring_extends_in_x_and_z() {
    let pattern = white_black(PatternKind::Ring);

    assert_eq!(pattern.pattern_at(Point::new(0.0, 0.0, 0.0)), Color::white());
    assert_eq!(pattern.pattern_at(Point::new(1.0, 0.0, 0.0)), Color::black());
    assert_eq!(pattern.pattern_at(Point::new(0.0, 0.0, 1.0)), Color::black());
    assert_eq!(pattern.pattern_at(Point::new(0.708, 0.0, 0.708)),
        Color::black());
}

#[test]
fn checkers_repeat_in_each_dimension() {
    let pattern = white_black(PatternKind::Checker);
    let cases = [
        (Point::new(0.0, 0.0, 0.0), Color::white()),
        (Point::new(0.99, 0.0, 0.0), Color::white()),
        (Point::new(1.01, 0.0, 0.0), Color::black()),
        (Point::new(0.0, 0.99, 0.0), Color::white()),
        (Point::new(0.0, 1.01, 0.0), Color::black()),
        (Point::new(0.0, 0.0, 0.99), Color::white()),
        (Point::new(0.0, 0.0, 1.01), Color::black()),
        (Point::new(-0.5, 0.0, -0.5), Color::white()),
    ];

    for &(p, expected) in cases.iter() {
        assert_eq!(pattern.pattern_at(p), expected);
    }
}

#[test]
fn radial_gradient_bounces_between_colors() {
    let pattern = white_black(PatternKind::RadialGradient);
    let cases = [
        (Point::new(0.0, 0.0, 0.0), Color::white()),
        (Point::new(0.5, 0.0, 0.0), Color::rgb(0.5, 0.5, 0.5)),
        (Point::new(0.0, 0.0, 0.25), Color::rgb(0.75, 0.75, 0.75)),
        (Point::new(1.0, 0.0, 0.0), Color::black()),
        (Point::new(0.0, 0.0, 1.25), Color::rgb(0.25, 0.25, 0.25)),
        (Point::new(2.0, 5.0, 0.0), Color::white()),
    ];

    for &(p, expected) in cases.iter() {
        assert_eq!(pattern.pattern_at(p), expected);
    }
}
