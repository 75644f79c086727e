use std::fs;
use std::io;
use std::path::{ Path, PathBuf };

use serde::Deserialize;
use thiserror::Error;

use crate::color::Color;
use crate::consts::{ VACUUM_RI, AIR_RI, WATER_RI, GLASS_RI, DIAMOND_RI };
use crate::csg::CsgOp;
use crate::light::{ Material, PointLight };
use crate::matrix::{ Matrix4D, MatrixError };
use crate::obj::{ ObjError, ObjParser };
use crate::pattern::{ Pattern, PatternKind };
use crate::shape::Shape;
use crate::tuple::{ Point, Vector };
use crate::world::World;
use crate::camera::Camera;

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("failed to read scene {path}")]
    Read { path: String, #[source] source: io::Error },

    #[error("malformed scene description")]
    Json(#[from] serde_json::Error),

    #[error("unknown color {0:?}")]
    Color(String),

    #[error("unknown medium {0:?}")]
    Medium(String),

    #[error("transform can't be inverted")]
    Transform(#[from] MatrixError),

    #[error("failed to import model {path}")]
    Model { path: String, #[source] source: ObjError },
}

/// A world and the camera looking at it.
///
/// Scenes are described in JSON:
///
/// ```
/// # use glint::scene::Scene;
/// let scene = Scene::from_json(r##"{
///     "camera": {
///         "width": 100, "height": 50, "fov": 1.0472,
///         "from": [0, 1.5, -5], "to": [0, 1, 0], "up": [0, 1, 0]
///     },
///     "lights": [ { "position": [-10, 10, -10] } ],
///     "shapes": [
///         {
///             "type": "plane",
///             "material": {
///                 "pattern": { "type": "checker", "colors": ["white", "#333333"] }
///             }
///         },
///         {
///             "type": "sphere",
///             "transform": [ { "scale": [0.5, 0.5, 0.5] }, { "translate": [0, 1, 0] } ],
///             "material": { "color": [1, 0.2, 0.2], "reflective": 0.3 }
///         }
///     ]
/// }"##, ".").unwrap();
///
/// assert_eq!(scene.world.objects.len(), 2);
/// assert_eq!(scene.camera.hsize, 100);
/// ```
///
/// Transforms are applied in the order listed. Angles are in radians. Colors
/// are `[r, g, b]` arrays, `#RRGGBB` strings or one of the names black,
/// white, red, green, blue, yellow, purple and cyan. A refractive index is a
/// number or one of vacuum, air, water, glass and diamond.
pub struct Scene {
    pub world: World,
    pub camera: Camera,
}

impl Scene {
    /// Loads a scene file. OBJ paths inside it are relative to the file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Scene, SceneError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SceneError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Scene::from_json(&text, base)
    }

    /// Builds a scene from JSON text. OBJ paths are relative to `base`.
    pub fn from_json<P: AsRef<Path>>(text: &str, base: P)
        -> Result<Scene, SceneError> {
        let scene_json: SceneJson = serde_json::from_str(text)?;
        let scene = scene_json.build(base.as_ref())?;

        log::info!("loaded scene with {} objects ({} primitives) and {} lights",
            scene.world.objects.len(),
            scene.world.objects.iter().map(Shape::primitive_count).sum::<usize>(),
            scene.world.lights.len());
        Ok(scene)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SceneJson {
    camera: CameraJson,
    #[serde(default)]
    lights: Vec<LightJson>,
    #[serde(default)]
    shapes: Vec<ShapeJson>,
}

impl SceneJson {
    fn build(self, base: &Path) -> Result<Scene, SceneError> {
        let camera = self.camera.build()?;

        let lights = self.lights.into_iter()
            .map(LightJson::build)
            .collect::<Result<Vec<_>, _>>()?;
        let objects = self.shapes.into_iter()
            .map(|s| s.build(base, None))
            .collect::<Result<Vec<_>, _>>()?;

        let world = World::empty().with_lights(lights).with_objects(objects);
        Ok(Scene { world, camera })
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CameraJson {
    width: usize,
    height: usize,
    fov: f64,
    from: [f64; 3],
    to: [f64; 3],
    #[serde(default = "default_up")]
    up: [f64; 3],
    max_bounces: Option<usize>,
}

fn default_up() -> [f64; 3] {
    [0.0, 1.0, 0.0]
}

impl CameraJson {
    fn build(self) -> Result<Camera, SceneError> {
        let view = Matrix4D::view_transform(
            point(self.from), point(self.to), vector(self.up)
        );

        let mut camera = Camera::new(self.width, self.height, self.fov)
            .with_transform(view)?;
        if let Some(max_bounces) = self.max_bounces {
            camera = camera.with_max_bounces(max_bounces);
        }

        Ok(camera)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LightJson {
    position: [f64; 3],
    #[serde(default = "default_intensity")]
    intensity: ColorJson,
}

fn default_intensity() -> ColorJson {
    ColorJson::Rgb([1.0, 1.0, 1.0])
}

impl LightJson {
    fn build(self) -> Result<PointLight, SceneError> {
        Ok(PointLight::new(self.intensity.build()?, point(self.position)))
    }
}

#[derive(Clone, Deserialize)]
#[serde(untagged)]
enum ColorJson {
    Rgb([f64; 3]),
    Named(String),
}

impl ColorJson {
    fn build(self) -> Result<Color, SceneError> {
        match self {
            ColorJson::Rgb([r, g, b]) => Ok(Color::rgb(r, g, b)),
            ColorJson::Named(name) => named_color(&name)
                .or_else(|| Color::from_hex(&name))
                .ok_or(SceneError::Color(name)),
        }
    }
}

fn named_color(name: &str) -> Option<Color> {
    let color = match name {
        "black" => Color::black(),
        "white" => Color::white(),
        "red" => Color::red(),
        "green" => Color::green(),
        "blue" => Color::blue(),
        "yellow" => Color::rgb(1.0, 1.0, 0.0),
        "purple" => Color::rgb(1.0, 0.0, 1.0),
        "cyan" => Color::rgb(0.0, 1.0, 1.0),
        _ => return None,
    };

    Some(color)
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum TransformJson {
    Translate([f64; 3]),
    Scale([f64; 3]),
    RotateX(f64),
    RotateY(f64),
    RotateZ(f64),
    Shear([f64; 6]),
}

impl TransformJson {
    fn matrix(&self) -> Matrix4D {
        match *self {
            TransformJson::Translate([x, y, z]) => Matrix4D::translation(x, y, z),
            TransformJson::Scale([x, y, z]) => Matrix4D::scaling(x, y, z),
            TransformJson::RotateX(r) => Matrix4D::rotation_x(r),
            TransformJson::RotateY(r) => Matrix4D::rotation_y(r),
            TransformJson::RotateZ(r) => Matrix4D::rotation_z(r),
            TransformJson::Shear([xy, xz, yx, yz, zx, zy])
                => Matrix4D::shearing(xy, xz, yx, yz, zx, zy),
        }
    }
}

/// Chains transforms so the first one listed is applied first.
fn chain(transforms: &[TransformJson]) -> Matrix4D {
    transforms.iter()
        .fold(Matrix4D::identity(), |acc, t| t.matrix() * acc)
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PatternJson {
    #[serde(rename = "type")]
    kind: PatternKind,
    colors: [ColorJson; 2],
    #[serde(default)]
    transform: Vec<TransformJson>,
}

impl PatternJson {
    fn build(self) -> Result<Pattern, SceneError> {
        let [a, b] = self.colors;
        let pattern = Pattern::new(self.kind, a.build()?, b.build()?)
            .with_transform(chain(&self.transform))?;

        Ok(pattern)
    }
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct MaterialJson {
    color: Option<ColorJson>,
    pattern: Option<PatternJson>,
    ambient: Option<f64>,
    diffuse: Option<f64>,
    specular: Option<f64>,
    shininess: Option<f64>,
    reflective: Option<f64>,
    transparency: Option<f64>,
    refractive_index: Option<RefractiveIndexJson>,
}

/// A refractive index, or the name of a common medium.
#[derive(Deserialize)]
#[serde(untagged)]
enum RefractiveIndexJson {
    Value(f64),
    Named(String),
}

impl RefractiveIndexJson {
    fn build(self) -> Result<f64, SceneError> {
        match self {
            RefractiveIndexJson::Value(n) => Ok(n),
            RefractiveIndexJson::Named(name) => match name.as_str() {
                "vacuum" => Ok(VACUUM_RI),
                "air" => Ok(AIR_RI),
                "water" => Ok(WATER_RI),
                "glass" => Ok(GLASS_RI),
                "diamond" => Ok(DIAMOND_RI),
                _ => Err(SceneError::Medium(name)),
            },
        }
    }
}

impl MaterialJson {
    fn build(self) -> Result<Material, SceneError> {
        let d = Material::default();

        Ok(Material {
            color: match self.color {
                Some(c) => c.build()?,
                None => d.color,
            },
            pattern: match self.pattern {
                Some(p) => Some(p.build()?),
                None => None,
            },
            ambient: self.ambient.unwrap_or(d.ambient),
            diffuse: self.diffuse.unwrap_or(d.diffuse),
            specular: self.specular.unwrap_or(d.specular),
            shininess: self.shininess.unwrap_or(d.shininess),
            reflective: self.reflective.unwrap_or(d.reflective),
            transparency: self.transparency.unwrap_or(d.transparency),
            refractive_index: match self.refractive_index {
                Some(n) => n.build()?,
                None => d.refractive_index,
            },
        })
    }
}

#[derive(Deserialize)]
struct ShapeJson {
    #[serde(flatten)]
    kind: ShapeKindJson,
    #[serde(default)]
    transform: Vec<TransformJson>,
    material: Option<MaterialJson>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ShapeKindJson {
    Sphere,
    Plane,
    Cube,
    Cylinder {
        minimum: Option<f64>,
        maximum: Option<f64>,
        #[serde(default)]
        closed: bool,
    },
    Cone {
        minimum: Option<f64>,
        maximum: Option<f64>,
        #[serde(default)]
        closed: bool,
    },
    Triangle {
        p1: [f64; 3],
        p2: [f64; 3],
        p3: [f64; 3],
    },
    SmoothTriangle {
        p1: [f64; 3],
        p2: [f64; 3],
        p3: [f64; 3],
        n1: [f64; 3],
        n2: [f64; 3],
        n3: [f64; 3],
    },
    Group {
        #[serde(default)]
        children: Vec<ShapeJson>,
    },
    Csg {
        op: CsgOp,
        left: Box<ShapeJson>,
        right: Box<ShapeJson>,
    },
    Obj {
        path: PathBuf,
    },
}

impl ShapeJson {
    /// Builds the shape. A container's material is handed down to every
    /// child that doesn't name its own.
    fn build(self, base: &Path, inherited: Option<Material>)
        -> Result<Shape, SceneError> {
        let material = match self.material {
            Some(m) => Some(m.build()?),
            None => inherited,
        };

        let shape = match self.kind {
            ShapeKindJson::Sphere => Shape::sphere(),
            ShapeKindJson::Plane => Shape::plane(),
            ShapeKindJson::Cube => Shape::cube(),
            ShapeKindJson::Cylinder { minimum, maximum, closed } => {
                let (min, max) = bounds(minimum, maximum);
                if closed {
                    Shape::capped_cylinder(min, max)
                } else {
                    Shape::bounded_cylinder(min, max)
                }
            },
            ShapeKindJson::Cone { minimum, maximum, closed } => {
                let (min, max) = bounds(minimum, maximum);
                if closed {
                    Shape::capped_cone(min, max)
                } else {
                    Shape::bounded_cone(min, max)
                }
            },
            ShapeKindJson::Triangle { p1, p2, p3 }
                => Shape::triangle(point(p1), point(p2), point(p3)),
            ShapeKindJson::SmoothTriangle { p1, p2, p3, n1, n2, n3 }
                => Shape::smooth_triangle(point(p1), point(p2), point(p3),
                    vector(n1), vector(n2), vector(n3)),
            ShapeKindJson::Group { children } => {
                let children = children.into_iter()
                    .map(|c| c.build(base, material))
                    .collect::<Result<Vec<_>, _>>()?;
                Shape::group(children)
            },
            ShapeKindJson::Csg { op, left, right } => Shape::csg(op,
                left.build(base, material)?,
                right.build(base, material)?),
            ShapeKindJson::Obj { path } => {
                let path = base.join(path);
                let model = ObjParser::open(&path)
                    .map_err(|source| SceneError::Model {
                        path: path.display().to_string(),
                        source,
                    })?
                    .into_group();

                match material {
                    Some(m) => model.with_shared_material(m),
                    None => model,
                }
            },
        };

        let shape = shape.with_transform(chain(&self.transform))?;
        match material {
            Some(m) => Ok(shape.with_material(m)),
            None => Ok(shape),
        }
    }
}

fn bounds(minimum: Option<f64>, maximum: Option<f64>) -> (f64, f64) {
    (minimum.unwrap_or(f64::NEG_INFINITY), maximum.unwrap_or(f64::INFINITY))
}

fn point([x, y, z]: [f64; 3]) -> Point {
    Point::new(x, y, z)
}

fn vector([x, y, z]: [f64; 3]) -> Vector {
    Vector::new(x, y, z)
}

#[cfg(test)]
use crate::shape::ShapeKind;

#[cfg(test)]
const DEFAULT_WORLD_JSON: &str = r#"{
    "camera": {
        "width": 11, "height": 11, "fov": 1.5707963267948966,
        "from": [0, 0, -5], "to": [0, 0, 0], "up": [0, 1, 0]
    },
    "lights": [ { "position": [-10, 10, -10], "intensity": "white" } ],
    "shapes": [
        {
            "type": "sphere",
            "material": { "color": [0.8, 1.0, 0.6], "diffuse": 0.7, "specular": 0.2 }
        },
        {
            "type": "sphere",
            "transform": [ { "scale": [0.5, 0.5, 0.5] } ]
        }
    ]
}"#;

#[cfg(test)]
fn single_shape(shape: &str) -> Result<Scene, SceneError> {
    let text = format!(r#"{{
        "camera": {{ "width": 4, "height": 4, "fov": 1.0, "from": [0, 0, -5], "to": [0, 0, 0] }},
        "shapes": [ {} ]
    }}"#, shape);

    Scene::from_json(&text, ".")
}

#[test]
fn default_world_scene_renders_like_default_world() {
    let scene = Scene::from_json(DEFAULT_WORLD_JSON, ".").unwrap();
    let image = scene.camera.render(&scene.world);

    assert_eq!(scene.world.lights, World::new().lights);
    assert_eq!(image.read_pixel(5, 5).unwrap(),
        Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn transforms_apply_in_listed_order() {
    let scene = single_shape(r#"{
        "type": "sphere",
        "transform": [ { "scale": [2, 2, 2] }, { "translate": [1, 0, 0] } ]
    }"#).unwrap();

    assert_eq!(*scene.world.objects[0].transform(),
        Matrix4D::translation(1.0, 0.0, 0.0) * Matrix4D::scaling(2.0, 2.0, 2.0));
}

#[test]
fn every_shape_type_parses() {
    let scene = Scene::from_json(r#"{
        "camera": { "width": 4, "height": 4, "fov": 1.0, "from": [0, 0, -5], "to": [0, 0, 0] },
        "shapes": [
            { "type": "sphere" },
            { "type": "plane" },
            { "type": "cube" },
            { "type": "cylinder", "minimum": -1, "maximum": 1, "closed": true },
            { "type": "cone" },
            { "type": "triangle", "p1": [0, 1, 0], "p2": [-1, 0, 0], "p3": [1, 0, 0] },
            { "type": "smooth_triangle",
              "p1": [0, 1, 0], "p2": [-1, 0, 0], "p3": [1, 0, 0],
              "n1": [0, 1, 0], "n2": [-1, 0, 0], "n3": [1, 0, 0] },
            { "type": "group", "children": [ { "type": "sphere" }, { "type": "cube" } ] },
            { "type": "csg", "op": "difference",
              "left": { "type": "cube" }, "right": { "type": "sphere" } }
        ]
    }"#, ".").unwrap();

    let objects = &scene.world.objects;

    assert_eq!(objects.len(), 9);
    assert!(matches!(objects[3].kind(),
        ShapeKind::Cylinder { minimum, maximum, closed: true }
            if *minimum == -1.0 && *maximum == 1.0));
    assert!(matches!(objects[4].kind(),
        ShapeKind::Cone { minimum, closed: false, .. }
            if *minimum == f64::NEG_INFINITY));
    assert!(matches!(objects[6].kind(), ShapeKind::SmoothTriangle(_)));
    assert_eq!(objects[7].primitive_count(), 2);
    assert!(matches!(objects[8].kind(), ShapeKind::Csg(CsgOp::Difference, _, _)));
}

#[test]
fn materials_and_patterns() {
    let scene = single_shape(r##"{
        "type": "sphere",
        "material": {
            "color": "#ff8000",
            "reflective": 0.5,
            "pattern": {
                "type": "radial_gradient",
                "colors": ["red", [0, 0, 1]],
                "transform": [ { "rotate_z": 0.5 } ]
            }
        }
    }"##).unwrap();

    let m = scene.world.objects[0].material;
    let p = m.pattern.unwrap();

    assert_eq!(m.color, Color::rgb(1.0, 128.0 / 255.0, 0.0));
    assert_eq!(m.reflective, 0.5);
    assert_eq!(m.diffuse, Material::default().diffuse);
    assert_eq!(p.kind, PatternKind::RadialGradient);
    assert_eq!((p.a, p.b), (Color::red(), Color::blue()));
    assert_eq!(*p.transform(), Matrix4D::rotation_z(0.5));
}

#[test]
fn containers_hand_their_material_down() {
    let scene = single_shape(r#"{
        "type": "group",
        "material": { "color": "red" },
        "children": [
            { "type": "sphere" },
            { "type": "csg", "op": "union",
              "left": { "type": "cube" },
              "right": { "type": "sphere", "material": { "color": "blue" } } }
        ]
    }"#).unwrap();

    let children = scene.world.objects[0].children().unwrap();
    let (left, right) = children[1].operands().unwrap();

    assert_eq!(children[0].material.color, Color::red());
    assert_eq!(left.material.color, Color::red());
    assert_eq!(right.material.color, Color::blue());
}

#[test]
fn unknown_color_is_an_error() {
    let result = single_shape(r#"{
        "type": "sphere", "material": { "color": "chartreuse" }
    }"#);

    assert!(matches!(result, Err(SceneError::Color(ref c)) if c == "chartreuse"));
}

#[test]
fn refractive_index_by_number_or_medium() {
    let scene = single_shape(r#"{
        "type": "group",
        "children": [
            { "type": "sphere", "material": { "refractive_index": 1.25 } },
            { "type": "sphere", "material": { "refractive_index": "glass" } },
            { "type": "sphere", "material": { "refractive_index": "diamond" } },
            { "type": "sphere" }
        ]
    }"#).unwrap();

    let indices: Vec<f64> = scene.world.objects[0].children().unwrap().iter()
        .map(|c| c.material.refractive_index)
        .collect();

    assert_eq!(indices, vec![1.25, GLASS_RI, DIAMOND_RI, VACUUM_RI]);
}

#[test]
fn unknown_medium_is_an_error() {
    let result = single_shape(r#"{
        "type": "sphere", "material": { "refractive_index": "honey" }
    }"#);

    assert!(matches!(result, Err(SceneError::Medium(ref m)) if m == "honey"));
}

#[test]
fn singular_transform_is_an_error() {
    let result = single_shape(r#"{
        "type": "cube", "transform": [ { "scale": [1, 0, 1] } ]
    }"#);

    assert!(matches!(result, Err(SceneError::Transform(_))));
}

#[test]
fn csg_without_operands_is_an_error() {
    let result = single_shape(r#"{ "type": "csg", "op": "union", "left": { "type": "cube" } }"#);

    assert!(matches!(result, Err(SceneError::Json(_))));
}

#[test]
fn unknown_shape_is_an_error() {
    assert!(matches!(single_shape(r#"{ "type": "teapot" }"#),
        Err(SceneError::Json(_))));
}

#[test]
fn obj_models_load_relative_to_base() {
    let dir = std::env::temp_dir().join(format!("glint-scene-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("tri.obj"), "v 0 1 0\nv -1 0 0\nv 1 0 0\nf 1 2 3\n").unwrap();

    let text = r#"{
        "camera": { "width": 4, "height": 4, "fov": 1.0, "from": [0, 0, -5], "to": [0, 0, 0] },
        "shapes": [ { "type": "obj", "path": "tri.obj" } ]
    }"#;
    let scene = Scene::from_json(text, &dir).unwrap();
    let missing = Scene::from_json(text, dir.join("nowhere"));

    fs::remove_dir_all(&dir).unwrap();

    assert_eq!(scene.world.objects[0].primitive_count(), 1);
    assert!(matches!(missing, Err(SceneError::Model { .. })));
}
