use crate::ray::Ray4D;
use crate::tuple::Point;
use crate::matrix::{ Matrix4D, MatrixError };
use crate::color::Color;
use crate::world::World;
use crate::canvas::Canvas;
use crate::consts::MAX_BOUNCES;

/// A camera record for generating a canvas.
///
/// This record gives a "frame" of the world. Based on camera parameters,
/// different perspectives can be produced. The canvas sits one unit in front
/// of the camera, along its -Z axis.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// The horizontal size of the resultant canvas.
    pub hsize: usize,

    /// The vertical size of the resultant canvas.
    pub vsize: usize,

    pub half_width: f64,
    pub half_height: f64,
    pub pixel_size: f64,

    /// The angle describing "how much" the camera can see.
    pub field_of_view: f64,

    /// How many times reflected and refracted rays may recurse.
    pub max_bounces: usize,

    /// How the world is oriented relative to the camera (typically a view
    /// transformation).
    transform: Matrix4D,
    inverse: Matrix4D,
}

impl Camera {
    /// A camera at the origin looking down -Z.
    ///
    /// Whichever dimension is longer spans the full field of view.
    pub fn new(hsize: usize, vsize: usize, field_of_view: f64) -> Camera {
        let half_view = (field_of_view / 2.0).tan();
        let aspect = (hsize as f64) / (vsize as f64);

        let half_width: f64;
        let half_height: f64;

        if aspect >= 1.0 {
            half_width = half_view;
            half_height = half_view / aspect;
        } else {
            half_width = half_view * aspect;
            half_height = half_view;
        }

        let pixel_size = half_width * 2.0 / (hsize as f64);
        Camera {
            hsize,
            vsize,
            half_width,
            half_height,
            pixel_size,
            field_of_view,
            max_bounces: MAX_BOUNCES,
            transform: Matrix4D::identity(),
            inverse: Matrix4D::identity(),
        }
    }

    /// Replaces the view transform.
    ///
    /// # Examples
    ///
    /// ```
    /// # use glint::camera::Camera;
    /// # use glint::matrix::Matrix4D;
    /// # use glint::tuple::{ Point, Vector };
    /// let c = Camera::new(160, 120, std::f64::consts::FRAC_PI_3)
    ///     .with_transform(Matrix4D::view_transform(
    ///         Point::new(0.0, 1.5, -5.0),
    ///         Point::new(0.0, 1.0, 0.0),
    ///         Vector::new(0.0, 1.0, 0.0),
    ///     ))
    ///     .unwrap();
    ///
    /// assert_eq!(c.ray_for_pixel(80, 60).origin, Point::new(0.0, 1.5, -5.0));
    /// ```
    pub fn with_transform(mut self, transform: Matrix4D)
        -> Result<Camera, MatrixError> {
        self.inverse = transform.inverse()?;
        self.transform = transform;
        Ok(self)
    }

    pub fn with_max_bounces(mut self, max_bounces: usize) -> Camera {
        self.max_bounces = max_bounces;
        self
    }

    pub fn transform(&self) -> &Matrix4D {
        &self.transform
    }

    /// The ray from the camera through the center of pixel `(px, py)`.
    pub fn ray_for_pixel(&self, px: usize, py: usize) -> Ray4D {
        // Offsets from the edge of the canvas to the pixel's center
        let xoffset = (px as f64 + 0.5) * self.pixel_size;
        let yoffset = (py as f64 + 0.5) * self.pixel_size;

        // The untransformed coordinates of the pixel in world space
        let world_x = self.half_width - xoffset;
        let world_y = self.half_height - yoffset;

        let pixel = self.inverse * Point::new(world_x, world_y, -1.0);
        let origin = self.inverse * Point::origin();
        let direction = (pixel - origin).normalize();

        Ray4D::new(origin, direction)
    }

    /// Renders rows `from..to` (clamped to the image) into a dense row-major
    /// buffer.
    ///
    /// `on_row` is called with each row index once that row is finished.
    /// Nothing outside the returned buffer is touched, so disjoint ranges can
    /// be rendered at the same time.
    pub fn render_rows(&self, w: &World, from: usize, to: usize,
        on_row: Option<&(dyn Fn(usize) + Sync)>) -> Vec<Color> {
        let to = to.min(self.vsize);
        let from = from.min(to);

        let mut pixels = Vec::with_capacity((to - from) * self.hsize);

        for y in from..to {
            for x in 0..self.hsize {
                let ray = self.ray_for_pixel(x, y);
                pixels.push(w.color_at(&ray, self.max_bounces));
            }

            if let Some(f) = on_row {
                f(y);
            }
        }

        pixels
    }

    /// Renders the whole image on the calling thread.
    pub fn render(&self, w: &World) -> Canvas {
        let pixels = self.render_rows(w, 0, self.vsize, None);
        Canvas::from_rows(self.hsize, self.vsize, vec![(0, pixels)])
    }
}

#[cfg(test)]
use crate::tuple::Vector;

#[cfg(test)]
use std::f64::consts::PI;

#[cfg(test)]
fn default_view() -> Camera {
    Camera::new(11, 11, PI / 2.0)
        .with_transform(Matrix4D::view_transform(
            Point::new(0.0, 0.0, -5.0),
            Point::origin(),
            Vector::new(0.0, 1.0, 0.0),
        ))
        .unwrap()
}

#[test]
fn construct_camera() {
    let c = Camera::new(160, 120, PI / 2.0);

    assert_eq!(c.hsize, 160);
    assert_eq!(c.vsize, 120);
    assert_eq!(c.field_of_view, PI / 2.0);
    assert_eq!(c.max_bounces, MAX_BOUNCES);
    assert_eq!(*c.transform(), Matrix4D::identity());
}

#[test]
fn pixel_size_horizontal_canvas() {
    let c = Camera::new(200, 125, PI / 2.0);

    assert!(crate::feq(c.pixel_size, 0.01));
}

#[test]
fn pixel_size_vertical_canvas() {
    let c = Camera::new(125, 200, PI / 2.0);

    assert!(crate::feq(c.pixel_size, 0.01));
}

#[test]
fn ray_through_center() {
    let c = Camera::new(201, 101, PI / 2.0);
    let r = c.ray_for_pixel(100, 50);

    assert_eq!(r.origin, Point::origin());
    assert_eq!(r.direction, Vector::new(0.0, 0.0, -1.0));
}

#[test]
fn ray_through_corner() {
    let c = Camera::new(201, 101, PI / 2.0);
    let r = c.ray_for_pixel(0, 0);

    assert_eq!(r.origin, Point::origin());
    assert_eq!(r.direction, Vector::new(0.66519, 0.33259, -0.66851));
}

#[test]
fn ray_when_camera_transformed() {
    let c = Camera::new(201, 101, PI / 2.0)
        .with_transform(Matrix4D::rotation_y(PI / 4.0)
            * Matrix4D::translation(0.0, -2.0, 5.0))
        .unwrap();
    let r = c.ray_for_pixel(100, 50);

    assert_eq!(r.origin, Point::new(0.0, 2.0, -5.0));
    assert_eq!(r.direction,
        Vector::new(2.0f64.sqrt() / 2.0, 0.0, -(2.0f64.sqrt() / 2.0)));
}

#[test]
fn singular_view_is_rejected() {
    let c = Camera::new(10, 10, PI / 2.0)
        .with_transform(Matrix4D::scaling(0.0, 1.0, 1.0));

    assert!(c.is_err());
}

#[test]
fn render_world_with_camera() {
    let image = default_view().render(&World::new());

    assert_eq!(image.read_pixel(5, 5).unwrap(),
        Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn render_rows_covers_requested_band() {
    use std::sync::Mutex;

    let c = default_view();
    let w = World::new();
    let rows = Mutex::new(Vec::new());
    let record = |row: usize| rows.lock().unwrap().push(row);

    let band = c.render_rows(&w, 5, 7, Some(&record));

    assert_eq!(band.len(), 2 * 11);
    assert_eq!(*rows.lock().unwrap(), vec![5, 6]);
    assert_eq!(band[5], Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn render_rows_clamps_to_image() {
    let c = default_view();
    let w = World::new();

    assert_eq!(c.render_rows(&w, 9, 40, None).len(), 2 * 11);
    assert!(c.render_rows(&w, 20, 40, None).is_empty());
}
