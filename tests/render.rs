use std::f64::consts::PI;

use glint::camera::Camera;
use glint::color::Color;
use glint::matrix::Matrix4D;
use glint::parallel;
use glint::scene::Scene;
use glint::tuple::{ Point, Vector };
use glint::world::World;

fn default_view(width: usize, height: usize) -> Camera {
    Camera::new(width, height, PI / 2.0)
        .with_transform(Matrix4D::view_transform(
            Point::new(0.0, 0.0, -5.0),
            Point::origin(),
            Vector::new(0.0, 1.0, 0.0),
        ))
        .unwrap()
}

#[test]
fn parallel_render_matches_single_threaded_render() {
    let world = World::new();
    let camera = default_view(21, 13);

    let expected = camera.render(&world);

    for workers in [1, 2, 3, 5, 8, 32].iter() {
        let image = parallel::render(&world, &camera, *workers).unwrap();

        assert_eq!(image, expected, "{} workers", workers);
    }
}

#[test]
fn parallel_render_of_default_world_center() {
    let image = parallel::render(&World::new(), &default_view(11, 11), 4)
        .unwrap();

    assert_eq!(image.read_pixel(5, 5).unwrap(),
        Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn showcase_scene_loads_and_renders() {
    let scene = Scene::from_json(include_str!("../scenes/showcase.json"), ".")
        .unwrap();
    let camera = Camera::new(32, 18, scene.camera.field_of_view)
        .with_transform(*scene.camera.transform())
        .unwrap();

    let image = parallel::render(&scene.world, &camera, 3).unwrap();

    assert_eq!(scene.world.lights.len(), 2);
    assert_eq!(scene.world.objects.len(), 6);
    assert!(image.pixels().iter()
        .all(|c| c.r.is_finite() && c.g.is_finite() && c.b.is_finite()));
    assert!(image.pixels().iter().any(|&c| c != Color::black()));
}
