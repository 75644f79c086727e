use std::sync::Arc;

use crate::consts::EPSILON;
use crate::tuple::{ Point, Vector };
use crate::ray::Ray4D;
use crate::light::Material;
use crate::matrix::{ Matrix4D, MatrixError };
use crate::intersect::{ Intersection, Intersections };
use crate::csg::{ self, CsgOp };

/// Precomputed edges and flat normal of a triangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TriangleInfo {
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
    pub e1: Vector,
    pub e2: Vector,
    pub normal: Vector,
}

impl TriangleInfo {
    pub fn new(p1: Point, p2: Point, p3: Point) -> TriangleInfo {
        let e1 = p2 - p1;
        let e2 = p3 - p1;
        let normal = e2.cross(&e1).normalize();

        TriangleInfo { p1, p2, p3, e1, e2, normal }
    }

    /// Möller-Trumbore. Returns `(t, u, v)` for a hit.
    fn hit(&self, ray: &Ray4D) -> Option<(f64, f64, f64)> {
        let dir_cross_e2 = ray.direction.cross(&self.e2);
        let determinant = self.e1.dot(&dir_cross_e2);

        // Parallel to the triangle's plane.
        if determinant.abs() < EPSILON {
            return None;
        }

        let f = 1.0 / determinant;
        let p1_to_origin = ray.origin - self.p1;
        let u = f * p1_to_origin.dot(&dir_cross_e2);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let origin_cross_e1 = p1_to_origin.cross(&self.e1);
        let v = f * ray.direction.dot(&origin_cross_e1);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        Some((f * self.e2.dot(&origin_cross_e1), u, v))
    }
}

/// A triangle with a normal at each vertex.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SmoothTriangleInfo {
    pub triangle_info: TriangleInfo,
    pub n1: Vector,
    pub n2: Vector,
    pub n3: Vector,
}

/// The geometry of a shape, in object space.
#[derive(Clone, Debug)]
pub enum ShapeKind {
    /// A unit sphere centered at the origin.
    Sphere,

    /// The XZ plane.
    Plane,

    /// An axis-aligned cube with faces at -1 and 1.
    Cube,

    /// A unit-radius cylinder around the Y axis, between `minimum` and
    /// `maximum` (exclusive), capped if `closed`.
    Cylinder { minimum: f64, maximum: f64, closed: bool },

    /// A double-napped cone around the Y axis, apex at the origin. Bounds and
    /// caps work as for cylinders; a cap's radius is its `|y|`.
    Cone { minimum: f64, maximum: f64, closed: bool },

    Triangle(TriangleInfo),

    SmoothTriangle(SmoothTriangleInfo),

    /// An ordered list of shapes sharing a transform. Groups nest.
    Group(Vec<Shape>),

    /// A boolean combination of two subtrees.
    Csg(CsgOp, Box<Shape>, Box<Shape>),
}

/// The space of a container, as seen by its children.
///
/// Children hold a shared, read-only link to the frame of the group or CSG
/// node that owns them. A frame only carries what space conversion needs;
/// it never owns shapes, so the tree has no cycles.
#[derive(Debug)]
pub struct Frame {
    inverse: Matrix4D,
    normal_transform: Matrix4D,
    parent: Option<Arc<Frame>>,
}

impl Frame {
    fn world_to_object(&self, point: Point) -> Point {
        let point = match self.parent {
            Some(ref parent) => parent.world_to_object(point),
            None => point,
        };

        self.inverse * point
    }

    fn normal_to_world(&self, normal: Vector) -> Vector {
        let normal = (self.normal_transform * normal).normalize();

        match self.parent {
            Some(ref parent) => parent.normal_to_world(normal),
            None => normal,
        }
    }
}

/// A renderable object.
///
/// Every variant shares a material and a transform (object space to parent
/// space). The inverse and the normal transform (inverse, transposed) are
/// computed once, when the transform is set.
///
/// Shapes are values. Containers own their children outright and attach each
/// child to a [`Frame`] describing the container's space; the frame is
/// rebuilt whenever the container's transform or position in the tree
/// changes.
///
/// # Examples
///
/// ```
/// # use glint::shape::Shape;
/// # use glint::matrix::Matrix4D;
/// # use glint::tuple::{ Point, Vector };
/// # use glint::ray::Ray4D;
/// let s = Shape::sphere()
///     .with_transform(Matrix4D::scaling(2.0, 2.0, 2.0))
///     .unwrap();
/// let r = Ray4D::new(Point::new(0.0, 0.0, -5.0), Vector::new(0.0, 0.0, 1.0));
///
/// let xs = s.intersect(&r);
/// assert_eq!(xs.len(), 2);
/// assert_eq!(xs.intersections[0].t, 3.0);
/// assert_eq!(xs.intersections[1].t, 7.0);
/// ```
#[derive(Debug)]
pub struct Shape {
    kind: ShapeKind,
    pub material: Material,

    transform: Matrix4D,
    inverse: Matrix4D,
    normal_transform: Matrix4D,
    parent: Option<Arc<Frame>>,
}

impl Shape {
    fn new(kind: ShapeKind) -> Shape {
        Shape {
            kind,
            material: Material::default(),
            transform: Matrix4D::identity(),
            inverse: Matrix4D::identity(),
            normal_transform: Matrix4D::identity(),
            parent: None,
        }
    }

    pub fn sphere() -> Shape {
        Self::new(ShapeKind::Sphere)
    }

    /// The XZ plane, normal pointing up along Y.
    pub fn plane() -> Shape {
        Self::new(ShapeKind::Plane)
    }

    pub fn cube() -> Shape {
        Self::new(ShapeKind::Cube)
    }

    /// An infinitely long cylinder with no caps.
    pub fn cylinder() -> Shape {
        Self::bounded_cylinder(f64::NEG_INFINITY, f64::INFINITY)
    }

    /// A cylinder truncated to `(minimum, maximum)`, open at both ends.
    pub fn bounded_cylinder(minimum: f64, maximum: f64) -> Shape {
        Self::new(ShapeKind::Cylinder { minimum, maximum, closed: false })
    }

    /// A cylinder truncated to `(minimum, maximum)` with end caps.
    pub fn capped_cylinder(minimum: f64, maximum: f64) -> Shape {
        Self::new(ShapeKind::Cylinder { minimum, maximum, closed: true })
    }

    /// An infinite double-napped cone with no caps.
    pub fn cone() -> Shape {
        Self::bounded_cone(f64::NEG_INFINITY, f64::INFINITY)
    }

    pub fn bounded_cone(minimum: f64, maximum: f64) -> Shape {
        Self::new(ShapeKind::Cone { minimum, maximum, closed: false })
    }

    pub fn capped_cone(minimum: f64, maximum: f64) -> Shape {
        Self::new(ShapeKind::Cone { minimum, maximum, closed: true })
    }

    pub fn triangle(p1: Point, p2: Point, p3: Point) -> Shape {
        Self::new(ShapeKind::Triangle(TriangleInfo::new(p1, p2, p3)))
    }

    /// A triangle whose normal is interpolated from `n1`, `n2` and `n3`.
    pub fn smooth_triangle(p1: Point, p2: Point, p3: Point,
        n1: Vector, n2: Vector, n3: Vector) -> Shape {
        Self::new(ShapeKind::SmoothTriangle(SmoothTriangleInfo {
            triangle_info: TriangleInfo::new(p1, p2, p3),
            n1, n2, n3,
        }))
    }

    /// A group owning `children`.
    pub fn group(children: Vec<Shape>) -> Shape {
        let mut group = Self::new(ShapeKind::Group(children));
        group.attach_children();
        group
    }

    /// A CSG node combining `left` and `right` with `op`.
    pub fn csg(op: CsgOp, left: Shape, right: Shape) -> Shape {
        let mut node = Self::new(
            ShapeKind::Csg(op, Box::new(left), Box::new(right))
        );
        node.attach_children();
        node
    }

    /// Replaces the transform.
    ///
    /// Fails if `transform` can't be inverted, since nothing could be
    /// intersected in a collapsed space.
    pub fn with_transform(mut self, transform: Matrix4D)
        -> Result<Shape, MatrixError> {
        self.inverse = transform.inverse()?;
        self.normal_transform = self.inverse.transposition();
        self.transform = transform;
        self.attach_children();

        Ok(self)
    }

    /// Replaces the material.
    pub fn with_material(mut self, material: Material) -> Shape {
        self.material = material;
        self
    }

    /// Replaces the material of this shape and of everything below it.
    pub fn with_shared_material(mut self, material: Material) -> Shape {
        self.share_material(material);
        self
    }

    fn share_material(&mut self, material: Material) {
        self.material = material;

        match self.kind {
            ShapeKind::Group(ref mut children) => {
                for c in children.iter_mut() {
                    c.share_material(material);
                }
            },
            ShapeKind::Csg(_, ref mut left, ref mut right) => {
                left.share_material(material);
                right.share_material(material);
            },
            _ => {},
        }
    }

    /// Appends a child to a group.
    ///
    /// Only groups have children: on any other shape `child` is discarded
    /// (with a warning) and the shape comes back unchanged. Use
    /// [`Shape::csg`] to combine two shapes.
    pub fn with_child(mut self, child: Shape) -> Shape {
        match self.kind {
            ShapeKind::Group(ref mut children) => children.push(child),
            _ => log::warn!("discarding a child added to a non-group shape"),
        }

        self.attach_children();
        self
    }

    /// Appends several children to a group.
    ///
    /// As with [`Shape::with_child`], non-groups discard the children.
    pub fn with_children<I>(mut self, new_children: I) -> Shape
        where I: IntoIterator<Item = Shape> {
        match self.kind {
            ShapeKind::Group(ref mut children) => children.extend(new_children),
            _ => log::warn!("discarding children added to a non-group shape"),
        }

        self.attach_children();
        self
    }

    /// Which primitive or container this is.
    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn transform(&self) -> &Matrix4D {
        &self.transform
    }

    /// Whether this shape is linked into a group or CSG node.
    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    /// Cuts the link to any former container, making this a root shape.
    pub(crate) fn detached(mut self) -> Shape {
        if self.parent.take().is_some() {
            self.attach_children();
        }
        self
    }

    pub fn inverse(&self) -> &Matrix4D {
        &self.inverse
    }

    /// The children of a group, if this is one.
    pub fn children(&self) -> Option<&[Shape]> {
        match self.kind {
            ShapeKind::Group(ref children) => Some(children),
            _ => None,
        }
    }

    /// The left and right operands of a CSG node, if this is one.
    pub fn operands(&self) -> Option<(&Shape, &Shape)> {
        match self.kind {
            ShapeKind::Csg(_, ref left, ref right) => Some((left, right)),
            _ => None,
        }
    }

    /// Number of primitives in this subtree.
    pub fn primitive_count(&self) -> usize {
        match self.kind {
            ShapeKind::Group(ref children)
                => children.iter().map(Shape::primitive_count).sum(),
            ShapeKind::Csg(_, ref left, ref right)
                => left.primitive_count() + right.primitive_count(),
            _ => 1,
        }
    }

    fn frame(&self) -> Frame {
        Frame {
            inverse: self.inverse,
            normal_transform: self.normal_transform,
            parent: self.parent.clone(),
        }
    }

    /// Points every child (recursively) at this shape's current frame.
    fn attach_children(&mut self) {
        let frame = match self.kind {
            ShapeKind::Group(ref children) if children.is_empty() => return,
            ShapeKind::Group(_) | ShapeKind::Csg(..) => Arc::new(self.frame()),
            _ => return,
        };

        match self.kind {
            ShapeKind::Group(ref mut children) => {
                for child in children.iter_mut() {
                    child.parent = Some(Arc::clone(&frame));
                    child.attach_children();
                }
            },
            ShapeKind::Csg(_, ref mut left, ref mut right) => {
                left.parent = Some(Arc::clone(&frame));
                left.attach_children();
                right.parent = Some(frame);
                right.attach_children();
            },
            _ => (),
        }
    }

    /// Whether `other` is this shape or lives somewhere beneath it.
    ///
    /// Identity is by address, not by value.
    pub fn includes(&self, other: &Shape) -> bool {
        match self.kind {
            ShapeKind::Group(ref children)
                => children.iter().any(|c| c.includes(other)),
            ShapeKind::Csg(_, ref left, ref right)
                => left.includes(other) || right.includes(other),
            _ => std::ptr::eq(self, other),
        }
    }

    /// Converts a world-space point into this shape's object space.
    ///
    /// Parents convert first, so inverses are applied outermost to innermost.
    pub fn world_to_object(&self, point: Point) -> Point {
        let point = match self.parent {
            Some(ref parent) => parent.world_to_object(point),
            None => point,
        };

        self.inverse * point
    }

    /// Converts an object-space normal into a normalized world-space normal.
    pub fn normal_to_world(&self, normal: Vector) -> Vector {
        let normal = (self.normal_transform * normal).normalize();

        match self.parent {
            Some(ref parent) => parent.normal_to_world(normal),
            None => normal,
        }
    }

    /// Intersects a ray, given in parent space, with this shape.
    pub fn intersect(&self, ray: &Ray4D) -> Intersections {
        self.local_intersect(&ray.transform(&self.inverse))
    }

    /// The world-space normal at `world_point`.
    ///
    /// `hit` is the intersection that produced the point; smooth triangles
    /// read their barycentric coordinates from it.
    pub fn normal_at(&self, world_point: Point, hit: &Intersection) -> Vector {
        let local_point = self.world_to_object(world_point);
        let local_normal = self.local_normal_at(local_point, hit);
        self.normal_to_world(local_normal)
    }

    /// Intersects a ray already in object space.
    pub fn local_intersect(&self, ray: &Ray4D) -> Intersections {
        match self.kind {
            ShapeKind::Sphere => self.intersect_sphere(ray),
            ShapeKind::Plane => self.intersect_plane(ray),
            ShapeKind::Cube => self.intersect_cube(ray),
            ShapeKind::Cylinder { minimum, maximum, closed }
                => self.intersect_cylinder(ray, minimum, maximum, closed),
            ShapeKind::Cone { minimum, maximum, closed }
                => self.intersect_cone(ray, minimum, maximum, closed),
            ShapeKind::Triangle(ref info) => match info.hit(ray) {
                Some((t, _, _)) => vec![Intersection::new(t, self)].into(),
                None => Intersections::new(),
            },
            ShapeKind::SmoothTriangle(ref info)
                => match info.triangle_info.hit(ray) {
                Some((t, u, v))
                    => vec![Intersection::new_uv(t, self, u, v)].into(),
                None => Intersections::new(),
            },
            ShapeKind::Group(ref children) => {
                let mut xs: Intersections = children.iter()
                    .flat_map(|c| c.intersect(ray).intersections)
                    .collect::<Vec<_>>()
                    .into();
                xs.sort();
                xs
            },
            ShapeKind::Csg(op, ref left, ref right) => {
                let xs = Intersections::aggregate(vec![
                    left.intersect(ray),
                    right.intersect(ray),
                ]);

                csg::filter_intersections(op, left, xs)
            },
        }
    }

    /// The normal at a point already in object space.
    ///
    /// Intersections always name a primitive, never a container, so a group
    /// or CSG node reaching this is a bug.
    pub fn local_normal_at(&self, at: Point, hit: &Intersection) -> Vector {
        match self.kind {
            ShapeKind::Sphere => at - Point::origin(),
            ShapeKind::Plane => Vector::new(0.0, 1.0, 0.0),
            ShapeKind::Cube => Self::normal_at_cube(at),
            ShapeKind::Cylinder { minimum, maximum, closed } => {
                let dist = at.x.powi(2) + at.z.powi(2);

                if closed && dist < 1.0 && at.y >= maximum - EPSILON {
                    Vector::new(0.0, 1.0, 0.0)
                } else if closed && dist < 1.0 && at.y <= minimum + EPSILON {
                    Vector::new(0.0, -1.0, 0.0)
                } else {
                    Vector::new(at.x, 0.0, at.z)
                }
            },
            ShapeKind::Cone { minimum, maximum, closed } => {
                let dist = at.x.powi(2) + at.z.powi(2);

                if closed && dist < maximum.powi(2)
                    && at.y >= maximum - EPSILON {
                    Vector::new(0.0, 1.0, 0.0)
                } else if closed && dist < minimum.powi(2)
                    && at.y <= minimum + EPSILON {
                    Vector::new(0.0, -1.0, 0.0)
                } else {
                    let mut y = dist.sqrt();
                    if at.y > 0.0 {
                        y = -y;
                    }

                    Vector::new(at.x, y, at.z)
                }
            },
            ShapeKind::Triangle(ref info) => info.normal,
            ShapeKind::SmoothTriangle(ref info) => match hit.uv {
                Some((u, v)) => info.n2 * u
                    + info.n3 * v
                    + info.n1 * (1.0 - u - v),
                None => info.triangle_info.normal,
            },
            ShapeKind::Group(_) | ShapeKind::Csg(..) => unreachable!(
                "containers defer normals to their children"
            ),
        }
    }

    fn intersect_sphere(&self, ray: &Ray4D) -> Intersections {
        let sphere_to_ray = ray.origin - Point::origin();

        let a = ray.direction.dot(&ray.direction);
        let b = 2.0 * ray.direction.dot(&sphere_to_ray);
        let c = sphere_to_ray.dot(&sphere_to_ray) - 1.0;

        let discriminant = b.powi(2) - (4.0 * a * c);
        if discriminant < 0.0 {
            return Intersections::new();
        }

        let t1 = (-b - discriminant.sqrt()) / (2.0 * a);
        let t2 = (-b + discriminant.sqrt()) / (2.0 * a);

        vec![Intersection::new(t1, self), Intersection::new(t2, self)].into()
    }

    fn intersect_plane(&self, ray: &Ray4D) -> Intersections {
        if ray.direction.y.abs() < EPSILON {
            return Intersections::new();
        }

        let t = -ray.origin.y / ray.direction.y;
        vec![Intersection::new(t, self)].into()
    }

    fn intersect_cube(&self, ray: &Ray4D) -> Intersections {
        let (xtmin, xtmax) = check_cube_axis(ray.origin.x, ray.direction.x);
        let (ytmin, ytmax) = check_cube_axis(ray.origin.y, ray.direction.y);
        let (ztmin, ztmax) = check_cube_axis(ray.origin.z, ray.direction.z);

        let tmin = xtmin.max(ytmin).max(ztmin);
        let tmax = xtmax.min(ytmax).min(ztmax);

        if tmin > tmax {
            return Intersections::new();
        }

        vec![Intersection::new(tmin, self), Intersection::new(tmax, self)]
            .into()
    }

    fn normal_at_cube(p: Point) -> Vector {
        let xa = p.x.abs();
        let ya = p.y.abs();
        let za = p.z.abs();

        let max_component = xa.max(ya).max(za);
        if max_component == xa {
            Vector::new(p.x, 0.0, 0.0)
        } else if max_component == ya {
            Vector::new(0.0, p.y, 0.0)
        } else {
            Vector::new(0.0, 0.0, p.z)
        }
    }

    fn intersect_cylinder(&self, ray: &Ray4D, minimum: f64, maximum: f64,
        closed: bool) -> Intersections {
        let mut xs = Intersections::new();

        let a = ray.direction.x.powi(2) + ray.direction.z.powi(2);

        // Parallel to the Y axis: only the caps can be hit.
        if a < EPSILON {
            self.intersect_caps(ray, minimum, maximum, closed, |_| 1.0,
                &mut xs);
            return xs;
        }

        let b = 2.0 * ray.origin.x * ray.direction.x
              + 2.0 * ray.origin.z * ray.direction.z;
        let c = ray.origin.x.powi(2) + ray.origin.z.powi(2) - 1.0;

        let disc = b.powi(2) - 4.0 * a * c;
        if disc < 0.0 {
            return xs;
        }

        let t0 = (-b - disc.sqrt()) / (2.0 * a);
        let t1 = (-b + disc.sqrt()) / (2.0 * a);
        self.push_within(ray, t0.min(t1), minimum, maximum, &mut xs);
        self.push_within(ray, t0.max(t1), minimum, maximum, &mut xs);

        self.intersect_caps(ray, minimum, maximum, closed, |_| 1.0, &mut xs);
        xs
    }

    fn intersect_cone(&self, ray: &Ray4D, minimum: f64, maximum: f64,
        closed: bool) -> Intersections {
        let mut xs = Intersections::new();

        let a = ray.direction.x.powi(2)
              - ray.direction.y.powi(2)
              + ray.direction.z.powi(2);

        let b = 2.0 * ray.origin.x * ray.direction.x
              - 2.0 * ray.origin.y * ray.direction.y
              + 2.0 * ray.origin.z * ray.direction.z;

        let c = ray.origin.x.powi(2)
              - ray.origin.y.powi(2)
              + ray.origin.z.powi(2);

        if a.abs() < EPSILON {
            // Parallel to one of the cone's halves: at most one side hit.
            if b.abs() >= EPSILON {
                let t = -c / (2.0 * b);
                self.push_within(ray, t, minimum, maximum, &mut xs);
            }
        } else {
            let disc = b.powi(2) - 4.0 * a * c;
            if disc < 0.0 {
                return xs;
            }

            let t0 = (-b - disc.sqrt()) / (2.0 * a);
            let t1 = (-b + disc.sqrt()) / (2.0 * a);
            self.push_within(ray, t0.min(t1), minimum, maximum, &mut xs);
            self.push_within(ray, t0.max(t1), minimum, maximum, &mut xs);
        }

        self.intersect_caps(ray, minimum, maximum, closed, f64::abs, &mut xs);
        xs
    }

    /// Keeps a side hit only if it falls strictly between the bounds.
    fn push_within<'a>(&'a self, ray: &Ray4D, t: f64, minimum: f64,
        maximum: f64, xs: &mut Intersections<'a>) {
        let y = ray.origin.y + t * ray.direction.y;
        if minimum < y && y < maximum {
            xs.intersections.push(Intersection::new(t, self));
        }
    }

    /// Adds hits on the end caps of a closed cylinder or cone.
    ///
    /// `radius` maps a cap's `y` to its radius.
    fn intersect_caps<'a, F>(&'a self, ray: &Ray4D, minimum: f64,
        maximum: f64, closed: bool, radius: F, xs: &mut Intersections<'a>)
        where F: Fn(f64) -> f64 {
        if !closed || ray.direction.y.abs() < EPSILON {
            return;
        }

        for &y in [minimum, maximum].iter() {
            let t = (y - ray.origin.y) / ray.direction.y;
            let x = ray.origin.x + t * ray.direction.x;
            let z = ray.origin.z + t * ray.direction.z;

            if x.powi(2) + z.powi(2) <= radius(y).powi(2) {
                xs.intersections.push(Intersection::new(t, self));
            }
        }
    }
}

/// Clones start detached: a copy taken out of a container is a root shape
/// until some other container adopts it. Its own children are re-linked to
/// the copy.
impl Clone for Shape {
    fn clone(&self) -> Shape {
        let mut shape = Shape {
            kind: self.kind.clone(),
            material: self.material,
            transform: self.transform,
            inverse: self.inverse,
            normal_transform: self.normal_transform,
            parent: None,
        };

        shape.attach_children();
        shape
    }
}

/// Where a ray enters and leaves the slab `[-1, 1]` along one axis.
fn check_cube_axis(origin: f64, direction: f64) -> (f64, f64) {
    let tmin_numerator = -1.0 - origin;
    let tmax_numerator =  1.0 - origin;

    let (tmin, tmax) = if direction.abs() >= EPSILON {
        (tmin_numerator / direction, tmax_numerator / direction)
    } else {
        (tmin_numerator * f64::INFINITY, tmax_numerator * f64::INFINITY)
    };

    if tmin > tmax {
        (tmax, tmin)
    } else {
        (tmin, tmax)
    }
}

#[cfg(test)]
use crate::feq;

#[cfg(test)]
fn ray(o: (f64, f64, f64), d: (f64, f64, f64)) -> Ray4D {
    Ray4D::new(Point::new(o.0, o.1, o.2), Vector::new(d.0, d.1, d.2))
}

#[cfg(test)]
fn ts(xs: &Intersections) -> Vec<f64> {
    xs.intersections.iter().map(|i| i.t).collect()
}

#[test]
fn ray_intersects_sphere_at_two_points() {
    let s = Shape::sphere();
    let xs = s.intersect(&ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0)));

    assert_eq!(ts(&xs), vec![4.0, 6.0]);
}

#[test]
fn ray_is_tangent_to_sphere() {
    let s = Shape::sphere();
    let xs = s.intersect(&ray((0.0, 1.0, -5.0), (0.0, 0.0, 1.0)));

    assert_eq!(ts(&xs), vec![5.0, 5.0]);
}

#[test]
fn ray_misses_sphere() {
    let s = Shape::sphere();
    let xs = s.intersect(&ray((0.0, 2.0, -5.0), (0.0, 0.0, 1.0)));

    assert!(xs.is_empty());
}

#[test]
fn ray_is_inside_sphere() {
    let s = Shape::sphere();
    let xs = s.intersect(&ray((0.0, 0.0, 0.0), (0.0, 0.0, 1.0)));

    assert_eq!(ts(&xs), vec![-1.0, 1.0]);
}

#[test]
fn sphere_is_behind_ray() {
    let s = Shape::sphere();
    let xs = s.intersect(&ray((0.0, 0.0, 5.0), (0.0, 0.0, 1.0)));

    assert_eq!(ts(&xs), vec![-6.0, -4.0]);
}

#[test]
fn intersections_name_the_object() {
    let s = Shape::sphere();
    let xs = s.intersect(&ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0)));

    assert!(std::ptr::eq(xs.intersections[0].object, &s));
    assert!(std::ptr::eq(xs.intersections[1].object, &s));
}

#[test]
fn intersecting_translated_sphere() {
    let s = Shape::sphere()
        .with_transform(Matrix4D::translation(5.0, 0.0, 0.0))
        .unwrap();
    let xs = s.intersect(&ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0)));

    assert!(xs.is_empty());
}

#[test]
fn singular_transform_is_rejected() {
    let s = Shape::sphere().with_transform(Matrix4D::scaling(0.0, 1.0, 1.0));

    assert!(s.is_err());
}

#[test]
fn normal_on_sphere_axes() {
    let s = Shape::sphere();
    let i = Intersection::new(0.0, &s);

    assert_eq!(s.normal_at(Point::new(1.0, 0.0, 0.0), &i),
        Vector::new(1.0, 0.0, 0.0));
    assert_eq!(s.normal_at(Point::new(0.0, 1.0, 0.0), &i),
        Vector::new(0.0, 1.0, 0.0));
    assert_eq!(s.normal_at(Point::new(0.0, 0.0, 1.0), &i),
        Vector::new(0.0, 0.0, 1.0));
}

#[test]
fn normal_on_sphere_nonaxial() {
    let s = Shape::sphere();
    let k = 3.0f64.sqrt() / 3.0;
    let n = s.normal_at(Point::new(k, k, k), &Intersection::new(0.0, &s));

    assert_eq!(n, Vector::new(k, k, k));
    assert!(feq(n.magnitude(), 1.0));
}

#[test]
fn normal_on_sphere_translated() {
    let s = Shape::sphere()
        .with_transform(Matrix4D::translation(0.0, 1.0, 0.0))
        .unwrap();
    let n = s.normal_at(Point::new(0.0, 1.70711, -0.70711),
        &Intersection::new(0.0, &s));

    assert_eq!(n, Vector::new(0.0, 0.70711, -0.70711));
}

#[test]
fn normal_on_sphere_transformed() {
    let s = Shape::sphere()
        .with_transform(Matrix4D::scaling(1.0, 0.5, 1.0)
            * Matrix4D::rotation_z(std::f64::consts::PI / 5.0))
        .unwrap();
    let k = 2.0f64.sqrt() / 2.0;
    let n = s.normal_at(Point::new(0.0, k, -k), &Intersection::new(0.0, &s));

    assert_eq!(n, Vector::new(0.0, 0.97014, -0.24254));
}

#[test]
fn normal_on_plane_is_constant() {
    let p = Shape::plane();
    let i = Intersection::new(0.0, &p);

    for at in [Point::new(0.0, 0.0, 0.0),
               Point::new(10.0, 0.0, -10.0),
               Point::new(-5.0, 0.0, 150.0)].iter() {
        assert_eq!(p.local_normal_at(*at, &i), Vector::new(0.0, 1.0, 0.0));
    }
}

#[test]
fn ray_parallel_to_plane() {
    let p = Shape::plane();

    assert!(p.local_intersect(&ray((0.0, 10.0, 0.0), (0.0, 0.0, 1.0)))
        .is_empty());
    assert!(p.local_intersect(&ray((0.0, 0.0, 0.0), (0.0, 0.0, 1.0)))
        .is_empty());
}

#[test]
fn ray_intersecting_plane_from_above_and_below() {
    let p = Shape::plane();

    let above = p.local_intersect(&ray((0.0, 1.0, 0.0), (0.0, -1.0, 0.0)));
    let below = p.local_intersect(&ray((0.0, -1.0, 0.0), (0.0, 1.0, 0.0)));

    assert_eq!(ts(&above), vec![1.0]);
    assert_eq!(ts(&below), vec![1.0]);
}

#[test]
fn ray_intersects_cube() {
    let c = Shape::cube();
    let cases = [
        ((5.0, 0.5, 0.0), (-1.0, 0.0, 0.0), 4.0, 6.0),
        ((-5.0, 0.5, 0.0), (1.0, 0.0, 0.0), 4.0, 6.0),
        ((0.5, 5.0, 0.0), (0.0, -1.0, 0.0), 4.0, 6.0),
        ((0.5, -5.0, 0.0), (0.0, 1.0, 0.0), 4.0, 6.0),
        ((0.5, 0.0, 5.0), (0.0, 0.0, -1.0), 4.0, 6.0),
        ((0.5, 0.0, -5.0), (0.0, 0.0, 1.0), 4.0, 6.0),
        ((0.0, 0.5, 0.0), (0.0, 0.0, 1.0), -1.0, 1.0),
    ];

    for &(o, d, t1, t2) in cases.iter() {
        assert_eq!(ts(&c.local_intersect(&ray(o, d))), vec![t1, t2]);
    }
}

#[test]
fn ray_misses_cube() {
    let c = Shape::cube();
    let cases = [
        ((-2.0, 0.0, 0.0), (0.2673, 0.5345, 0.8018)),
        ((0.0, -2.0, 0.0), (0.8018, 0.2673, 0.5345)),
        ((0.0, 0.0, -2.0), (0.5345, 0.8018, 0.2673)),
        ((2.0, 0.0, 2.0), (0.0, 0.0, -1.0)),
        ((0.0, 2.0, 2.0), (0.0, -1.0, 0.0)),
        ((2.0, 2.0, 0.0), (-1.0, 0.0, 0.0)),
    ];

    for &(o, d) in cases.iter() {
        assert!(c.local_intersect(&ray(o, d)).is_empty());
    }
}

#[test]
fn normal_on_cube() {
    let c = Shape::cube();
    let i = Intersection::new(0.0, &c);
    let cases = [
        ((1.0, 0.5, -0.8), (1.0, 0.0, 0.0)),
        ((-1.0, -0.2, 0.9), (-1.0, 0.0, 0.0)),
        ((-0.4, 1.0, -0.1), (0.0, 1.0, 0.0)),
        ((0.3, -1.0, -0.7), (0.0, -1.0, 0.0)),
        ((-0.6, 0.3, 1.0), (0.0, 0.0, 1.0)),
        ((0.4, 0.4, -1.0), (0.0, 0.0, -1.0)),
        ((1.0, 1.0, 1.0), (1.0, 0.0, 0.0)),
        ((-1.0, -1.0, -1.0), (-1.0, 0.0, 0.0)),
    ];

    for &(p, n) in cases.iter() {
        assert_eq!(c.local_normal_at(Point::new(p.0, p.1, p.2), &i),
            Vector::new(n.0, n.1, n.2));
    }
}

#[test]
fn ray_misses_cylinder() {
    let cyl = Shape::cylinder();
    let cases = [
        ((1.0, 0.0, 0.0), (0.0, 1.0, 0.0)),
        ((0.0, 0.0, 0.0), (0.0, 1.0, 0.0)),
        ((0.0, 0.0, -5.0), (1.0, 1.0, 1.0)),
    ];

    for &(o, d) in cases.iter() {
        let d = Vector::new(d.0, d.1, d.2).normalize();
        let r = Ray4D::new(Point::new(o.0, o.1, o.2), d);
        assert!(cyl.local_intersect(&r).is_empty());
    }
}

#[test]
fn ray_strikes_cylinder() {
    let cyl = Shape::cylinder();
    let cases = [
        ((1.0, 0.0, -5.0), (0.0, 0.0, 1.0), 5.0, 5.0),
        ((0.0, 0.0, -5.0), (0.0, 0.0, 1.0), 4.0, 6.0),
        ((0.5, 0.0, -5.0), (0.1, 1.0, 1.0), 6.80798, 7.08872),
    ];

    for &(o, d, t0, t1) in cases.iter() {
        let d = Vector::new(d.0, d.1, d.2).normalize();
        let r = Ray4D::new(Point::new(o.0, o.1, o.2), d);
        let xs = cyl.local_intersect(&r);

        assert_eq!(xs.len(), 2);
        assert!(feq(xs.intersections[0].t, t0));
        assert!(feq(xs.intersections[1].t, t1));
    }
}

#[test]
fn normal_on_cylinder() {
    let cyl = Shape::cylinder();
    let i = Intersection::new(0.0, &cyl);
    let cases = [
        ((1.0, 0.0, 0.0), (1.0, 0.0, 0.0)),
        ((0.0, 5.0, -1.0), (0.0, 0.0, -1.0)),
        ((0.0, -2.0, 1.0), (0.0, 0.0, 1.0)),
        ((-1.0, 1.0, 0.0), (-1.0, 0.0, 0.0)),
    ];

    for &(p, n) in cases.iter() {
        assert_eq!(cyl.local_normal_at(Point::new(p.0, p.1, p.2), &i),
            Vector::new(n.0, n.1, n.2));
    }
}

#[test]
fn intersecting_truncated_cylinder() {
    let cyl = Shape::bounded_cylinder(1.0, 2.0);
    let cases = [
        ((0.0, 1.5, 0.0), (0.1, 1.0, 0.0), 0),
        ((0.0, 3.0, -5.0), (0.0, 0.0, 1.0), 0),
        ((0.0, 0.0, -5.0), (0.0, 0.0, 1.0), 0),
        ((0.0, 2.0, -5.0), (0.0, 0.0, 1.0), 0),
        ((0.0, 1.0, -5.0), (0.0, 0.0, 1.0), 0),
        ((0.0, 1.5, -2.0), (0.0, 0.0, 1.0), 2),
    ];

    for &(o, d, count) in cases.iter() {
        let d = Vector::new(d.0, d.1, d.2).normalize();
        let r = Ray4D::new(Point::new(o.0, o.1, o.2), d);
        assert_eq!(cyl.local_intersect(&r).len(), count);
    }
}

#[test]
fn intersecting_capped_cylinder() {
    let cyl = Shape::capped_cylinder(1.0, 2.0);
    let cases = [
        ((0.0, 3.0, 0.0), (0.0, -1.0, 0.0), 2),
        ((0.0, 3.0, -2.0), (0.0, -1.0, 2.0), 2),
        ((0.0, 4.0, -2.0), (0.0, -1.0, 1.0), 2),
        ((0.0, 0.0, -2.0), (0.0, 1.0, 2.0), 2),
        ((0.0, -1.0, -2.0), (0.0, 1.0, 1.0), 2),
    ];

    for &(o, d, count) in cases.iter() {
        let d = Vector::new(d.0, d.1, d.2).normalize();
        let r = Ray4D::new(Point::new(o.0, o.1, o.2), d);
        assert_eq!(cyl.local_intersect(&r).len(), count);
    }
}

#[test]
fn normal_on_cylinder_caps() {
    let cyl = Shape::capped_cylinder(1.0, 2.0);
    let i = Intersection::new(0.0, &cyl);
    let cases = [
        ((0.0, 1.0, 0.0), (0.0, -1.0, 0.0)),
        ((0.5, 1.0, 0.0), (0.0, -1.0, 0.0)),
        ((0.0, 1.0, 0.5), (0.0, -1.0, 0.0)),
        ((0.0, 2.0, 0.0), (0.0, 1.0, 0.0)),
        ((0.5, 2.0, 0.0), (0.0, 1.0, 0.0)),
        ((0.0, 2.0, 0.5), (0.0, 1.0, 0.0)),
    ];

    for &(p, n) in cases.iter() {
        assert_eq!(cyl.local_normal_at(Point::new(p.0, p.1, p.2), &i),
            Vector::new(n.0, n.1, n.2));
    }
}

#[test]
fn ray_strikes_cone() {
    let cone = Shape::cone();
    let cases = [
        ((0.0, 0.0, -5.0), (0.0, 0.0, 1.0), 5.0, 5.0),
        ((0.0, 0.0, -5.0), (1.0, 1.0, 1.0), 8.66025, 8.66025),
        ((1.0, 1.0, -5.0), (-0.5, -1.0, 1.0), 4.55006, 49.44994),
    ];

    for &(o, d, t0, t1) in cases.iter() {
        let d = Vector::new(d.0, d.1, d.2).normalize();
        let r = Ray4D::new(Point::new(o.0, o.1, o.2), d);
        let xs = cone.local_intersect(&r);

        assert_eq!(xs.len(), 2);
        assert!(feq(xs.intersections[0].t, t0));
        assert!(feq(xs.intersections[1].t, t1));
    }
}

#[test]
fn ray_parallel_to_one_cone_half() {
    let cone = Shape::cone();
    let d = Vector::new(0.0, 1.0, 1.0).normalize();
    let xs = cone.local_intersect(&Ray4D::new(Point::new(0.0, 0.0, -1.0), d));

    assert_eq!(xs.len(), 1);
    assert!(feq(xs.intersections[0].t, 0.35355));
}

#[test]
fn ray_through_apex_parallel_to_cone_misses_side() {
    let cone = Shape::cone();
    let d = Vector::new(0.0, 1.0, 1.0).normalize();
    let xs = cone.local_intersect(&Ray4D::new(Point::origin(), d));

    assert!(xs.is_empty());
}

#[test]
fn intersecting_cone_caps() {
    let cone = Shape::capped_cone(-0.5, 0.5);
    let cases = [
        ((0.0, 0.0, -5.0), (0.0, 1.0, 0.0), 0),
        ((0.0, 0.0, -0.25), (0.0, 1.0, 1.0), 2),
        ((0.0, 0.0, -0.25), (0.0, 1.0, 0.0), 4),
    ];

    for &(o, d, count) in cases.iter() {
        let d = Vector::new(d.0, d.1, d.2).normalize();
        let r = Ray4D::new(Point::new(o.0, o.1, o.2), d);
        assert_eq!(cone.local_intersect(&r).len(), count);
    }
}

#[test]
fn open_cone_has_no_caps() {
    let cone = Shape::bounded_cone(-0.5, 0.5);
    let r = ray((0.0, 0.0, -0.25), (0.0, 1.0, 0.0));

    assert_eq!(cone.local_intersect(&r).len(), 2);
}

#[test]
fn normal_on_cone() {
    let cone = Shape::cone();
    let i = Intersection::new(0.0, &cone);
    let cases = [
        ((0.0, 0.0, 0.0), (0.0, 0.0, 0.0)),
        ((1.0, 1.0, 1.0), (1.0, -(2.0f64.sqrt()), 1.0)),
        ((-1.0, -1.0, 0.0), (-1.0, 1.0, 0.0)),
    ];

    for &(p, n) in cases.iter() {
        assert_eq!(cone.local_normal_at(Point::new(p.0, p.1, p.2), &i),
            Vector::new(n.0, n.1, n.2));
    }
}

#[test]
fn normal_on_cone_caps() {
    let cone = Shape::capped_cone(-1.0, 2.0);
    let i = Intersection::new(0.0, &cone);

    assert_eq!(cone.local_normal_at(Point::new(1.0, 2.0, 0.5), &i),
        Vector::new(0.0, 1.0, 0.0));
    assert_eq!(cone.local_normal_at(Point::new(0.5, -1.0, 0.0), &i),
        Vector::new(0.0, -1.0, 0.0));
}

#[test]
fn empty_group_has_no_intersections() {
    let g = Shape::group(vec![]);
    let xs = g.local_intersect(&ray((0.0, 0.0, 0.0), (0.0, 0.0, 1.0)));

    assert_eq!(g.transform(), &Matrix4D::identity());
    assert!(xs.is_empty());
}

#[test]
fn intersecting_nonempty_group() {
    let s1 = Shape::sphere();
    let s2 = Shape::sphere()
        .with_transform(Matrix4D::translation(0.0, 0.0, -3.0))
        .unwrap();
    let s3 = Shape::sphere()
        .with_transform(Matrix4D::translation(5.0, 0.0, 0.0))
        .unwrap();
    let g = Shape::group(vec![s1, s2, s3]);

    let xs = g.local_intersect(&ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0)));
    let children = g.children().unwrap();

    assert_eq!(xs.len(), 4);
    assert!(std::ptr::eq(xs.intersections[0].object, &children[1]));
    assert!(std::ptr::eq(xs.intersections[1].object, &children[1]));
    assert!(std::ptr::eq(xs.intersections[2].object, &children[0]));
    assert!(std::ptr::eq(xs.intersections[3].object, &children[0]));
}

#[test]
fn intersecting_transformed_group() {
    let s = Shape::sphere()
        .with_transform(Matrix4D::translation(5.0, 0.0, 0.0))
        .unwrap();
    let g = Shape::group(vec![s])
        .with_transform(Matrix4D::scaling(2.0, 2.0, 2.0))
        .unwrap();

    let xs = g.intersect(&ray((10.0, 0.0, -10.0), (0.0, 0.0, 1.0)));
    assert_eq!(xs.len(), 2);
}

#[test]
fn with_child_appends_to_group() {
    let g = Shape::group(vec![])
        .with_child(Shape::sphere())
        .with_child(Shape::cube());

    assert_eq!(g.children().unwrap().len(), 2);
    assert_eq!(g.primitive_count(), 2);
}

#[test]
fn with_child_on_non_group_discards_child() {
    let s = Shape::sphere().with_child(Shape::cube());

    assert!(matches!(s.kind(), ShapeKind::Sphere));
    assert!(s.children().is_none());
    assert_eq!(s.primitive_count(), 1);

    let c = Shape::cube().with_children(vec![Shape::sphere(), Shape::plane()]);
    assert!(matches!(c.kind(), ShapeKind::Cube));
}

#[cfg(test)]
fn nested_sphere(inner_scale: Matrix4D) -> Shape {
    let s = Shape::sphere()
        .with_transform(Matrix4D::translation(5.0, 0.0, 0.0))
        .unwrap();
    let g2 = Shape::group(vec![s])
        .with_transform(inner_scale)
        .unwrap();

    Shape::group(vec![g2])
        .with_transform(Matrix4D::rotation_y(std::f64::consts::PI / 2.0))
        .unwrap()
}

#[test]
fn converting_point_from_world_to_object_space() {
    let g1 = nested_sphere(Matrix4D::scaling(2.0, 2.0, 2.0));
    let s = &g1.children().unwrap()[0].children().unwrap()[0];

    assert_eq!(s.world_to_object(Point::new(-2.0, 0.0, -10.0)),
        Point::new(0.0, 0.0, -1.0));
}

#[test]
fn transform_set_after_nesting_reaches_children() {
    let s = Shape::sphere()
        .with_transform(Matrix4D::translation(5.0, 0.0, 0.0))
        .unwrap();
    let g1 = Shape::group(vec![Shape::group(vec![s])])
        .with_transform(Matrix4D::rotation_y(std::f64::consts::PI / 2.0))
        .unwrap();

    let s = &g1.children().unwrap()[0].children().unwrap()[0];
    assert_eq!(s.world_to_object(Point::new(0.0, 0.0, -5.0)),
        Point::new(0.0, 0.0, 0.0));
}

#[test]
fn converting_normal_from_object_to_world_space() {
    let g1 = nested_sphere(Matrix4D::scaling(1.0, 2.0, 3.0));
    let s = &g1.children().unwrap()[0].children().unwrap()[0];
    let k = 3.0f64.sqrt() / 3.0;

    assert_eq!(s.normal_to_world(Vector::new(k, k, k)),
        Vector::new(0.2857, 0.4286, -0.8571));
}

#[test]
fn finding_normal_on_child_object() {
    let g1 = nested_sphere(Matrix4D::scaling(1.0, 2.0, 3.0));
    let s = &g1.children().unwrap()[0].children().unwrap()[0];

    let n = s.normal_at(Point::new(1.7321, 1.1547, -5.5774),
        &Intersection::new(0.0, s));
    assert_eq!(n, Vector::new(0.2857, 0.4286, -0.8571));
}

#[test]
fn cloned_group_keeps_its_children_linked() {
    let g1 = nested_sphere(Matrix4D::scaling(1.0, 2.0, 3.0)).clone();
    let s = &g1.children().unwrap()[0].children().unwrap()[0];

    assert!(!g1.has_parent());
    assert!(s.has_parent());
    assert_eq!(s.normal_at(Point::new(1.7321, 1.1547, -5.5774),
        &Intersection::new(0.0, s)), Vector::new(0.2857, 0.4286, -0.8571));
}

#[test]
fn cloned_child_is_detached() {
    let g = Shape::group(vec![Shape::sphere()])
        .with_transform(Matrix4D::translation(5.0, 0.0, 0.0))
        .unwrap();
    let inner = &g.children().unwrap()[0];
    let copy = inner.clone();

    assert!(inner.has_parent());
    assert!(!copy.has_parent());
    assert_eq!(inner.world_to_object(Point::new(5.0, 0.0, 0.0)), Point::origin());
    assert_eq!(copy.world_to_object(Point::new(5.0, 0.0, 0.0)),
        Point::new(5.0, 0.0, 0.0));
    assert_eq!(copy.normal_at(Point::new(1.0, 0.0, 0.0),
        &Intersection::new(0.0, &copy)), Vector::new(1.0, 0.0, 0.0));
}

#[test]
fn constructing_triangle() {
    let p1 = Point::new(0.0, 1.0, 0.0);
    let p2 = Point::new(-1.0, 0.0, 0.0);
    let p3 = Point::new(1.0, 0.0, 0.0);
    let t = Shape::triangle(p1, p2, p3);

    if let ShapeKind::Triangle(ti) = *t.kind() {
        assert_eq!(ti.p1, p1);
        assert_eq!(ti.p2, p2);
        assert_eq!(ti.p3, p3);
        assert_eq!(ti.e1, Vector::new(-1.0, -1.0, 0.0));
        assert_eq!(ti.e2, Vector::new(1.0, -1.0, 0.0));
        assert_eq!(ti.normal, Vector::new(0.0, 0.0, -1.0));
    } else {
        unreachable!();
    }
}

#[cfg(test)]
fn unit_triangle() -> Shape {
    Shape::triangle(
        Point::new(0.0, 1.0, 0.0),
        Point::new(-1.0, 0.0, 0.0),
        Point::new(1.0, 0.0, 0.0)
    )
}

#[test]
fn normal_on_triangle_is_flat() {
    let t = unit_triangle();
    let i = Intersection::new(0.0, &t);

    for p in [Point::new(0.0, 0.5, 0.0),
              Point::new(-0.5, 0.75, 0.0),
              Point::new(0.5, 0.25, 0.0)].iter() {
        assert_eq!(t.normal_at(*p, &i), Vector::new(0.0, 0.0, -1.0));
    }
}

#[test]
fn ray_misses_triangle() {
    let t = unit_triangle();
    let cases = [
        ((0.0, -1.0, -2.0), (0.0, 1.0, 0.0)),
        ((1.0, 1.0, -2.0), (0.0, 0.0, 1.0)),
        ((-1.0, 1.0, -2.0), (0.0, 0.0, 1.0)),
        ((0.0, -1.0, -2.0), (0.0, 0.0, 1.0)),
    ];

    for &(o, d) in cases.iter() {
        assert!(t.local_intersect(&ray(o, d)).is_empty());
    }
}

#[test]
fn ray_strikes_triangle() {
    let t = unit_triangle();
    let xs = t.local_intersect(&ray((0.0, 0.5, -2.0), (0.0, 0.0, 1.0)));

    assert_eq!(xs.len(), 1);
    assert!(feq(xs.intersections[0].t, 2.0));
    assert_eq!(xs.intersections[0].uv, None);
}

#[cfg(test)]
fn smooth_triangle() -> Shape {
    Shape::smooth_triangle(
        Point::new(0.0, 1.0, 0.0),
        Point::new(-1.0, 0.0, 0.0),
        Point::new(1.0, 0.0, 0.0),
        Vector::new(0.0, 1.0, 0.0),
        Vector::new(-1.0, 0.0, 0.0),
        Vector::new(1.0, 0.0, 0.0)
    )
}

#[test]
fn smooth_triangle_hit_stores_uv() {
    let s = smooth_triangle();
    let xs = s.local_intersect(&ray((-0.2, 0.3, -2.0), (0.0, 0.0, 1.0)));

    let (u, v) = xs.intersections[0].uv.unwrap();
    assert!(feq(u, 0.45));
    assert!(feq(v, 0.25));
}

#[test]
fn smooth_triangle_interpolates_normal() {
    let s = smooth_triangle();
    let i = Intersection::new_uv(1.0, &s, 0.45, 0.25);

    assert_eq!(s.normal_at(Point::origin(), &i),
        Vector::new(-0.5547, 0.83205, 0.0));
}

#[test]
fn includes_searches_subtrees() {
    let g = Shape::group(vec![Shape::sphere(), Shape::cube()]);
    let c = Shape::csg(CsgOp::Union, g, Shape::plane());
    let (left, right) = c.operands().unwrap();

    assert!(c.includes(&left.children().unwrap()[0]));
    assert!(c.includes(right));
    assert!(!c.includes(&Shape::sphere()));
}

#[test]
fn shared_material_reaches_every_descendant() {
    use crate::color::Color;

    let red = Material { color: Color::red(), ..Material::default() };
    let inner = Shape::csg(CsgOp::Union, Shape::sphere(), Shape::cube());
    let g = Shape::group(vec![Shape::sphere(), inner])
        .with_shared_material(red);

    let children = g.children().unwrap();
    let (left, right) = children[1].operands().unwrap();

    assert_eq!(g.material, red);
    assert_eq!(children[0].material, red);
    assert_eq!(left.material, red);
    assert_eq!(right.material, red);
}
