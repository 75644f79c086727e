use crate::ray::Ray4D;
use crate::tuple::Point;
use crate::color::Color;
use crate::matrix::Matrix4D;
use crate::light::{ PointLight, Material, lighting };
use crate::shape::Shape;
use crate::intersect::{ Intersections, IntersectionComputation };

/// A world with objects and lights.
///
/// Worlds collect all objects as well as lights for rendering. Most logic is
/// performed within worlds for the ray tracer. Nothing here mutates the
/// world, so one world can be shared by any number of render threads.
#[derive(Clone, Debug)]
pub struct World {
    pub objects: Vec<Shape>,
    pub lights: Vec<PointLight>,
}

impl Default for World {
    fn default() -> World {
        World::new()
    }
}

impl World {
    /// Creates the default world: a light at `(-10, 10, -10)`, a green unit
    /// sphere and a white half-size sphere inside it.
    pub fn new() -> World {
        let light = PointLight::new(
            Color::rgb(1.0, 1.0, 1.0),
            Point::new(-10.0, 10.0, -10.0)
        );

        let s1 = Shape::sphere().with_material(Material {
            color: Color::rgb(0.8, 1.0, 0.6),
            diffuse: 0.7,
            specular: 0.2,
            ..Default::default()
        });

        let s2 = Shape::sphere()
            .with_transform(Matrix4D::scaling(0.5, 0.5, 0.5))
            .expect("uniform scaling by 0.5 is invertible");

        World::empty().with_light(light).with_objects(vec![s1, s2])
    }

    /// Creates a world with no objects and no lights.
    ///
    /// Unlike [`World::default`], which is the populated default world.
    pub fn empty() -> World {
        World { objects: Vec::new(), lights: Vec::new() }
    }

    pub fn with_light(mut self, light: PointLight) -> World {
        self.lights.push(light);
        self
    }

    pub fn with_lights<I>(mut self, lights: I) -> World
        where I: IntoIterator<Item = PointLight> {
        self.lights.extend(lights);
        self
    }

    /// Adds a top-level object. Top-level objects never have a parent.
    pub fn with_object(mut self, object: Shape) -> World {
        self.objects.push(object.detached());
        self
    }

    pub fn with_objects<I>(mut self, objects: I) -> World
        where I: IntoIterator<Item = Shape> {
        self.objects.extend(objects.into_iter().map(Shape::detached));
        self
    }

    /// Whether `shape` lives somewhere in this world (by identity).
    pub fn contains(&self, shape: &Shape) -> bool {
        self.objects.iter().any(|o| o.includes(shape))
    }

    /// Intersects a ray against all objects in a world, sorted by `t`.
    pub fn intersect(&self, r: &Ray4D) -> Intersections {
        Intersections::aggregate(
            self.objects.iter().map(|o| o.intersect(r)).collect()
        )
    }

    /// Whether anything lies between `p` and `light`.
    pub fn is_shadowed_by(&self, light: &PointLight, p: Point) -> bool {
        let v = light.position - p;
        let distance = v.magnitude();
        let r = Ray4D::new(p, v.normalize());

        match self.intersect(&r).hit() {
            Some(i) => i.t < distance,
            None => false,
        }
    }

    /// Whether `p` is hidden from at least one light.
    pub fn is_shadowed(&self, p: Point) -> bool {
        self.lights.iter().any(|light| self.is_shadowed_by(light, p))
    }

    /// Calculates the color for a hit, based on shadows, lights and the
    /// secondary rays it spawns.
    ///
    /// `remaining` bounds how many more times reflection and refraction may
    /// recurse.
    pub fn shade_hit(&self, comps: &IntersectionComputation,
        remaining: usize) -> Color {
        let m = comps.obj.material;

        let surface = self.lights.iter().fold(Color::black(), |acc, light| {
            let shadowed = self.is_shadowed_by(light, comps.over_point);
            acc + lighting(m, comps.obj, *light, comps.over_point,
                comps.eyev, comps.normalv, shadowed)
        });

        let reflected = self.reflected_color(comps, remaining);
        let refracted = self.refracted_color(comps, remaining);

        if m.reflective > 0.0 && m.transparency > 0.0 {
            let reflectance = comps.schlick();
            surface + reflected * reflectance + refracted * (1.0 - reflectance)
        } else {
            surface + reflected + refracted
        }
    }

    /// The color seen in the mirror direction, scaled by reflectivity.
    pub fn reflected_color(&self, comps: &IntersectionComputation,
        remaining: usize) -> Color {
        let reflective = comps.obj.material.reflective;
        if remaining == 0 || reflective == 0.0 {
            return Color::black();
        }

        let r = Ray4D::new(comps.over_point, comps.reflectv);
        self.color_at(&r, remaining - 1) * reflective
    }

    /// The color seen through the surface, scaled by transparency.
    pub fn refracted_color(&self, comps: &IntersectionComputation,
        remaining: usize) -> Color {
        let transparency = comps.obj.material.transparency;
        if remaining == 0 || transparency == 0.0 {
            return Color::black();
        }

        if comps.total_internal_reflection() {
            return Color::black();
        }

        // Snell's law
        let ratio = comps.n1 / comps.n2;
        let cos_i = comps.eyev.dot(&comps.normalv);
        let sin2_t = ratio.powi(2) * (1.0 - cos_i.powi(2));
        let cos_t = (1.0 - sin2_t).sqrt();

        let direction = comps.normalv * (ratio * cos_i - cos_t)
            - comps.eyev * ratio;
        let r = Ray4D::new(comps.under_point, direction);

        self.color_at(&r, remaining - 1) * transparency
    }

    /// Determines the color seen along a ray. Black if nothing is hit.
    pub fn color_at(&self, r: &Ray4D, remaining: usize) -> Color {
        let xs = self.intersect(r);

        match xs.hit() {
            None => Color::black(),
            Some(i) => {
                let comps = IntersectionComputation::new(r, &i, Some(&xs));
                self.shade_hit(&comps, remaining)
            },
        }
    }
}

#[cfg(test)]
use crate::consts::MAX_BOUNCES;

#[cfg(test)]
use crate::intersect::Intersection;

#[cfg(test)]
use crate::tuple::Vector;

#[cfg(test)]
fn glass_floor(reflective: f64) -> Shape {
    Shape::plane()
        .with_transform(Matrix4D::translation(0.0, -1.0, 0.0))
        .unwrap()
        .with_material(Material {
            reflective,
            transparency: 0.5,
            refractive_index: 1.5,
            ..Default::default()
        })
}

#[cfg(test)]
fn red_ball() -> Shape {
    Shape::sphere()
        .with_transform(Matrix4D::translation(0.0, -3.5, -0.5))
        .unwrap()
        .with_material(Material {
            color: Color::rgb(1.0, 0.0, 0.0),
            ambient: 0.5,
            ..Default::default()
        })
}

#[cfg(test)]
fn diagonal_ray() -> Ray4D {
    let h = 2.0f64.sqrt() / 2.0;
    Ray4D::new(Point::new(0.0, 0.0, -3.0), Vector::new(0.0, -h, h))
}

#[test]
fn default_world_contents() {
    let w = World::new();

    assert_eq!(w.lights,
        vec![PointLight::new(Color::white(), Point::new(-10.0, 10.0, -10.0))]);
    assert_eq!(w.objects.len(), 2);
    assert_eq!(w.objects[0].material.color, Color::rgb(0.8, 1.0, 0.6));
    assert_eq!(*w.objects[1].transform(), Matrix4D::scaling(0.5, 0.5, 0.5));
    assert!(w.contains(&w.objects[1]));
    assert!(!w.contains(&Shape::sphere()));
}

#[test]
fn default_is_the_default_world() {
    let w = World::default();

    assert_eq!(w.lights, World::new().lights);
    assert_eq!(w.objects.len(), 2);
    assert!(World::empty().objects.is_empty());
}

#[test]
fn child_taken_out_of_group_is_top_level() {
    let group = Shape::group(vec![Shape::sphere()])
        .with_transform(Matrix4D::translation(0.5, 0.0, 0.0))
        .unwrap();
    let child = group.children().unwrap()[0].clone();
    assert!(!child.has_parent());

    let w = World::empty().with_object(child);
    let r = Ray4D::new(Point::new(0.0, 0.0, -5.0), Vector::new(0.0, 0.0, 1.0));
    let xs = w.intersect(&r);
    let hit = xs.hit().unwrap();

    assert_eq!(hit.t, 4.0);
    assert_eq!(hit.object.normal_at(r.position(hit.t), &hit),
        Vector::new(0.0, 0.0, -1.0));
    assert_eq!(hit.object.world_to_object(Point::new(0.0, 0.0, -1.0)),
        Point::new(0.0, 0.0, -1.0));
}

#[test]
fn intersect_default_world_with_ray() {
    let w = World::new();
    let r = Ray4D::new(Point::new(0.0, 0.0, -5.0), Vector::new(0.0, 0.0, 1.0));

    let ts: Vec<f64> = w.intersect(&r).intersections.iter()
        .map(|i| i.t)
        .collect();

    assert_eq!(ts, vec![4.0, 4.5, 5.5, 6.0]);
}

#[test]
fn shade_intersection_from_outside() {
    let w = World::new();
    let r = Ray4D::new(Point::new(0.0, 0.0, -5.0), Vector::new(0.0, 0.0, 1.0));
    let i = Intersection::new(4.0, &w.objects[0]);

    let comps = IntersectionComputation::new(&r, &i, None);
    let c = w.shade_hit(&comps, MAX_BOUNCES);

    assert_eq!(c, Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn shade_intersection_from_inside() {
    let mut w = World::new();
    w.lights = vec![
        PointLight::new(Color::white(), Point::new(0.0, 0.25, 0.0))
    ];
    let r = Ray4D::new(Point::origin(), Vector::new(0.0, 0.0, 1.0));
    let i = Intersection::new(0.5, &w.objects[1]);

    let comps = IntersectionComputation::new(&r, &i, None);
    let c = w.shade_hit(&comps, MAX_BOUNCES);

    assert_eq!(c, Color::rgb(0.90498, 0.90498, 0.90498));
}

#[test]
fn shade_intersection_in_shadow() {
    let s2 = Shape::sphere()
        .with_transform(Matrix4D::translation(0.0, 0.0, 10.0))
        .unwrap();
    let w = World::empty()
        .with_light(PointLight::new(Color::white(), Point::new(0.0, 0.0, -10.0)))
        .with_objects(vec![Shape::sphere(), s2]);
    let r = Ray4D::new(Point::new(0.0, 0.0, 5.0), Vector::new(0.0, 0.0, 1.0));
    let i = Intersection::new(4.0, &w.objects[1]);

    let comps = IntersectionComputation::new(&r, &i, None);

    assert_eq!(w.shade_hit(&comps, MAX_BOUNCES), Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn shading_sums_every_light() {
    let light = PointLight::new(Color::white(), Point::new(-10.0, 10.0, -10.0));
    let w = World::new().with_light(light);
    let r = Ray4D::new(Point::new(0.0, 0.0, -5.0), Vector::new(0.0, 0.0, 1.0));

    // Ambient is counted once per light, like every other term
    assert_eq!(w.color_at(&r, MAX_BOUNCES),
        Color::rgb(0.38066, 0.47583, 0.2855) * 2.0);
}

#[test]
fn color_ray_miss() {
    let w = World::new();
    let r = Ray4D::new(Point::new(0.0, 0.0, -5.0), Vector::new(0.0, 1.0, 0.0));

    assert_eq!(w.color_at(&r, MAX_BOUNCES), Color::black());
}

#[test]
fn color_ray_hit() {
    let w = World::new();
    let r = Ray4D::new(Point::new(0.0, 0.0, -5.0), Vector::new(0.0, 0.0, 1.0));

    assert_eq!(w.color_at(&r, MAX_BOUNCES), Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn color_behind_ray() {
    let mut w = World::new();
    w.objects[0].material.ambient = 1.0;
    w.objects[1].material.ambient = 1.0;

    let r = Ray4D::new(Point::new(0.0, 0.0, 0.75), Vector::new(0.0, 0.0, -1.0));

    assert_eq!(w.color_at(&r, MAX_BOUNCES), w.objects[1].material.color);
}

#[test]
fn shadow_collinear_point_and_light() {
    assert!(!World::new().is_shadowed(Point::new(0.0, 10.0, 0.0)));
}

#[test]
fn shadow_light_between_point_and_spheres() {
    assert!(World::new().is_shadowed(Point::new(10.0, -10.0, 10.0)));
}

#[test]
fn shadow_object_behind_light() {
    assert!(!World::new().is_shadowed(Point::new(-20.0, 20.0, -20.0)));
}

#[test]
fn shadow_object_behind_point() {
    assert!(!World::new().is_shadowed(Point::new(-2.0, 2.0, -2.0)));
}

#[test]
fn shadow_from_any_light() {
    let w = World::new()
        .with_light(PointLight::new(Color::white(), Point::new(0.0, 10.0, 0.0)));
    let p = Point::new(10.0, -10.0, 10.0);

    assert!(w.is_shadowed_by(&w.lights[0], p));
    assert!(!w.is_shadowed_by(&w.lights[1], Point::new(0.0, 5.0, 0.0)));
    assert!(w.is_shadowed(p));
}

#[test]
fn reflected_color_for_nonreflective_material() {
    let mut w = World::new();
    w.objects[1].material.ambient = 1.0;
    let r = Ray4D::new(Point::origin(), Vector::new(0.0, 0.0, 1.0));
    let i = Intersection::new(1.0, &w.objects[1]);

    let comps = IntersectionComputation::new(&r, &i, None);

    assert_eq!(w.reflected_color(&comps, MAX_BOUNCES), Color::black());
}

#[test]
fn reflected_color_for_reflective_material() {
    let plane = Shape::plane()
        .with_transform(Matrix4D::translation(0.0, -1.0, 0.0))
        .unwrap()
        .with_material(Material { reflective: 0.5, ..Default::default() });
    let w = World::new().with_object(plane);
    let i = Intersection::new(2.0f64.sqrt(), &w.objects[2]);

    let comps = IntersectionComputation::new(&diagonal_ray(), &i, None);

    assert_eq!(w.reflected_color(&comps, MAX_BOUNCES),
        Color::rgb(0.19032, 0.2379, 0.14274));
    assert_eq!(w.shade_hit(&comps, MAX_BOUNCES),
        Color::rgb(0.87677, 0.92436, 0.82918));
}

#[test]
fn reflected_color_at_maximum_depth() {
    let plane = Shape::plane()
        .with_transform(Matrix4D::translation(0.0, -1.0, 0.0))
        .unwrap()
        .with_material(Material { reflective: 0.5, ..Default::default() });
    let w = World::new().with_object(plane);
    let i = Intersection::new(2.0f64.sqrt(), &w.objects[2]);

    let comps = IntersectionComputation::new(&diagonal_ray(), &i, None);

    assert_eq!(w.reflected_color(&comps, 0), Color::black());
}

#[test]
fn mutually_reflective_surfaces_terminate() {
    let mirror = Material { reflective: 1.0, ..Default::default() };
    let lower = Shape::plane()
        .with_transform(Matrix4D::translation(0.0, -1.0, 0.0))
        .unwrap()
        .with_material(mirror);
    let upper = Shape::plane()
        .with_transform(Matrix4D::translation(0.0, 1.0, 0.0))
        .unwrap()
        .with_material(mirror);
    let w = World::empty()
        .with_light(PointLight::new(Color::white(), Point::origin()))
        .with_objects(vec![lower, upper]);
    let r = Ray4D::new(Point::origin(), Vector::new(0.0, 1.0, 0.0));

    let c = w.color_at(&r, MAX_BOUNCES);

    assert!(c.r.is_finite() && c.g.is_finite() && c.b.is_finite());
}

#[test]
fn refracted_color_of_opaque_surface() {
    let w = World::new();
    let r = Ray4D::new(Point::new(0.0, 0.0, -5.0), Vector::new(0.0, 0.0, 1.0));
    let xs: Intersections = vec![
        Intersection::new(4.0, &w.objects[0]),
        Intersection::new(6.0, &w.objects[0]),
    ].into();

    let comps = IntersectionComputation::new(&r, &xs.intersections[0],
        Some(&xs));

    assert_eq!(w.refracted_color(&comps, MAX_BOUNCES), Color::black());
}

#[test]
fn refracted_color_at_maximum_depth() {
    let mut w = World::new();
    w.objects[0].material.transparency = 1.0;
    w.objects[0].material.refractive_index = 1.5;
    let r = Ray4D::new(Point::new(0.0, 0.0, -5.0), Vector::new(0.0, 0.0, 1.0));
    let xs: Intersections = vec![
        Intersection::new(4.0, &w.objects[0]),
        Intersection::new(6.0, &w.objects[0]),
    ].into();

    let comps = IntersectionComputation::new(&r, &xs.intersections[0],
        Some(&xs));

    assert_eq!(w.refracted_color(&comps, 0), Color::black());
}

#[test]
fn refracted_color_under_total_internal_reflection() {
    let mut w = World::new();
    w.objects[0].material.transparency = 1.0;
    w.objects[0].material.refractive_index = 1.5;
    let h = 2.0f64.sqrt() / 2.0;
    let r = Ray4D::new(Point::new(0.0, 0.0, h), Vector::new(0.0, 1.0, 0.0));
    let xs: Intersections = vec![
        Intersection::new(-h, &w.objects[0]),
        Intersection::new(h, &w.objects[0]),
    ].into();

    // Inside the sphere, so look at the second intersection
    let comps = IntersectionComputation::new(&r, &xs.intersections[1],
        Some(&xs));

    assert_eq!(w.refracted_color(&comps, MAX_BOUNCES), Color::black());
}

#[test]
fn shade_hit_with_transparent_material() {
    let w = World::new().with_objects(vec![glass_floor(0.0), red_ball()]);
    let xs: Intersections = vec![
        Intersection::new(2.0f64.sqrt(), &w.objects[2]),
    ].into();

    let comps = IntersectionComputation::new(&diagonal_ray(),
        &xs.intersections[0], Some(&xs));

    assert_eq!(w.shade_hit(&comps, MAX_BOUNCES),
        Color::rgb(0.93642, 0.68642, 0.68642));
}

#[test]
fn shade_hit_with_reflective_transparent_material() {
    let w = World::new().with_objects(vec![glass_floor(0.5), red_ball()]);
    let xs: Intersections = vec![
        Intersection::new(2.0f64.sqrt(), &w.objects[2]),
    ].into();

    let comps = IntersectionComputation::new(&diagonal_ray(),
        &xs.intersections[0], Some(&xs));

    assert_eq!(w.shade_hit(&comps, MAX_BOUNCES),
        Color::rgb(0.93391, 0.69643, 0.69243));
}
