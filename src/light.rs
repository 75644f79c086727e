use crate::consts::VACUUM_RI;
use crate::color::Color;
use crate::pattern::Pattern;
use crate::tuple::{ Point, Vector };
use crate::shape::Shape;

/// A point light.
///
/// A very simple light source. Provides a color and a position where light is
/// produced from.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointLight {
    pub intensity: Color,
    pub position: Point,
}

impl PointLight {
    pub fn new(intensity: Color, position: Point) -> PointLight {
        PointLight { intensity, position }
    }
}

/// A material record.
///
/// Materials use attributes from the Phong reflection model; ambient, diffuse,
/// specular and shininess. `reflective` and `transparency` weight the
/// secondary rays spawned at a hit, and `refractive_index` bends the
/// transmitted one.
///
/// A `pattern`, when present, replaces `color`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    pub color: Color,
    pub pattern: Option<Pattern>,

    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub shininess: f64,

    pub reflective: f64,
    pub refractive_index: f64,
    pub transparency: f64,
}

impl Default for Material {
    fn default() -> Material {
        Material {
            color: Color::rgb(1.0, 1.0, 1.0),
            pattern: None,

            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.0,

            reflective: 0.0,
            refractive_index: VACUUM_RI,
            transparency: 0.0,
        }
    }
}

impl Material {
    /// The surface color of `object` at a world-space point.
    pub fn color_at(&self, object: &Shape, point: Point) -> Color {
        match self.pattern {
            Some(pat) => pat.pattern_at_object(object, point),
            None => self.color,
        }
    }
}

/// Calculate the lighting of a pixel in an environment.
///
/// Takes a material, a single light, a point, the eye vector and the normal
/// vector, and calculates how the light looks from the eye. `obj` is only
/// consulted to place the material's pattern.
///
/// If this point is in a shadow (parameter `in_shadow`), only ambient light is
/// used.
pub fn lighting(m: Material, obj: &Shape, light: PointLight,
    point: Point, eyev: Vector, normalv: Vector, in_shadow: bool) -> Color {
    // Combine surface color with light's color
    let effective_color = m.color_at(obj, point) * light.intensity;

    // Find direction to light source
    let lightv = (light.position - point).normalize();

    let ambient = effective_color * m.ambient;

    if in_shadow {
        return ambient;
    }

    let diffuse;
    let specular;

    // Light on the far side of the surface only contributes ambient
    let light_dot_normal = lightv.dot(&normalv);
    if light_dot_normal < 0.0 {
        diffuse = Color::black();
        specular = Color::black();
    } else {
        diffuse = effective_color * m.diffuse * light_dot_normal;

        let reflectv = (-lightv).reflect(&normalv);
        let reflect_dot_eye = reflectv.dot(&eyev);

        // Reflection points away from the eye
        if reflect_dot_eye <= 0.0 {
            specular = Color::black();
        } else {
            let factor = reflect_dot_eye.powf(m.shininess);
            specular = light.intensity * m.specular * factor;
        }
    }

    ambient + diffuse + specular
}

#[cfg(test)]
fn lit(m: Material, light: PointLight, point: Point, eyev: Vector,
    in_shadow: bool) -> Color {
    let mut s = Shape::sphere();
    s.material = m;

    lighting(m, &s, light, point, eyev, Vector::new(0.0, 0.0, -1.0), in_shadow)
}

#[cfg(test)]
fn white_light_at(x: f64, y: f64, z: f64) -> PointLight {
    PointLight::new(Color::white(), Point::new(x, y, z))
}

#[test]
fn default_material() {
    let m = Material::default();

    assert_eq!(m.color, Color::white());
    assert_eq!(m.ambient, 0.1);
    assert_eq!(m.diffuse, 0.9);
    assert_eq!(m.specular, 0.9);
    assert_eq!(m.shininess, 200.0);
    assert_eq!(m.reflective, 0.0);
    assert_eq!(m.transparency, 0.0);
    assert_eq!(m.refractive_index, 1.0);
}

#[test]
fn eye_between_light_and_surface() {
    let res = lit(Material::default(), white_light_at(0.0, 0.0, -10.0),
        Point::origin(), Vector::new(0.0, 0.0, -1.0), false);

    assert_eq!(res, Color::rgb(1.9, 1.9, 1.9));
}

#[test]
fn eye_between_light_and_surface_offset_45() {
    let eyev = Vector::new(0.0, 2.0f64.sqrt() / 2.0, 2.0f64.sqrt() / 2.0);
    let res = lit(Material::default(), white_light_at(0.0, 0.0, -10.0),
        Point::origin(), eyev, false);

    assert_eq!(res, Color::rgb(1.0, 1.0, 1.0));
}

#[test]
fn eye_opposite_from_surface_offset_45() {
    let res = lit(Material::default(), white_light_at(0.0, 10.0, -10.0),
        Point::origin(), Vector::new(0.0, 0.0, -1.0), false);

    assert_eq!(res, Color::rgb(0.7364, 0.7364, 0.7364));
}

#[test]
fn eye_in_path_of_reflection() {
    let eyev = Vector::new(0.0, -(2.0f64.sqrt()) / 2.0, -(2.0f64.sqrt()) / 2.0);
    let res = lit(Material::default(), white_light_at(0.0, 10.0, -10.0),
        Point::origin(), eyev, false);

    assert_eq!(res, Color::rgb(1.6364, 1.6364, 1.6364));
}

#[test]
fn eye_across_surface_from_light() {
    let res = lit(Material::default(), white_light_at(0.0, 0.0, 10.0),
        Point::origin(), Vector::new(0.0, 0.0, -1.0), false);

    assert_eq!(res, Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn surface_in_shadow() {
    let res = lit(Material::default(), white_light_at(0.0, 0.0, -10.0),
        Point::origin(), Vector::new(0.0, 0.0, -1.0), true);

    assert_eq!(res, Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn lighting_with_stripe_pattern() {
    // Only ambient light, so the pattern color comes through unchanged
    let m = Material {
        color: Color::rgb(0.5, 0.5, 0.5),
        pattern: Some(Pattern::stripe(Color::white(), Color::black())),
        ambient: 1.0,
        diffuse: 0.0,
        specular: 0.0,
        ..Default::default()
    };
    let light = white_light_at(0.0, 0.0, -10.0);
    let eyev = Vector::new(0.0, 0.0, -1.0);

    assert_eq!(lit(m, light, Point::new(0.9, 0.0, 0.0), eyev, false),
        Color::white());
    assert_eq!(lit(m, light, Point::new(1.1, 0.0, 0.0), eyev, false),
        Color::black());
}

#[test]
fn light_intensity_tints_surface() {
    let m = Material { specular: 0.0, ..Default::default() };
    let light = PointLight::new(Color::rgb(1.0, 0.0, 0.0),
        Point::new(0.0, 0.0, -10.0));

    let res = lit(m, light, Point::origin(), Vector::new(0.0, 0.0, -1.0), false);

    assert_eq!(res, Color::rgb(1.0, 0.0, 0.0));
}
