pub mod consts;

pub mod tuple;
pub mod matrix;
pub mod ray;

pub mod shape;
pub mod csg;
pub mod intersect;

pub mod pattern;
pub mod light;
pub mod world;
pub mod camera;

pub mod color;
pub mod canvas;
pub mod parallel;

pub mod scene;
pub mod obj;

use consts::FEQ_EPSILON;

/// Approximate float equality, for comparing computed geometry.
pub fn feq(left: f64, right: f64) -> bool {
    (left - right).abs() < FEQ_EPSILON
}
