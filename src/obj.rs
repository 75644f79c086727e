use std::io::{ self, prelude::* };
use std::path::Path;
use std::fs::File;
use std::str::FromStr;
use std::collections::BTreeMap;

use thiserror::Error;

use crate::tuple::{ Point, Vector };
use crate::shape::Shape;

#[derive(Error, Debug)]
pub enum ObjError {
    #[error("failed to read model")]
    Io(#[from] io::Error),

    #[error("line {line}: malformed value {text:?}")]
    Malformed { line: usize, text: String },

    #[error("line {line}: {what} index {index} is out of range")]
    OutOfRange { line: usize, what: &'static str, index: usize },
}

/// One corner of a face: a vertex index and an optional normal index, both
/// one-based as written in the file.
#[derive(Copy, Clone, Debug, PartialEq)]
struct FaceVertex {
    vertex: usize,
    normal: Option<usize>,
}

/// A parser for OBJ files.
///
/// Understands vertices (`v`), vertex normals (`vn`), faces (`f`) and named
/// groups (`g`). Anything else is skipped and counted in `ignored_lines`.
///
/// ```
/// # use glint::obj::ObjParser;
/// let parser: ObjParser = "
/// v -1 1 0
/// v -1 0 0
/// v 1 0 0
/// v 1 1 0
///
/// g FirstGroup
/// f 1 2 3
/// g SecondGroup
/// f 1 3 4
/// ".parse().unwrap();
///
/// assert_eq!(parser.group("FirstGroup").unwrap().len(), 1);
/// assert_eq!(parser.into_group().primitive_count(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ObjParser {
    pub ignored_lines: usize,

    pub vertices: Vec<Point>,
    pub normals: Vec<Vector>,

    /// Triangles that appeared before any `g` record.
    pub default_group: Vec<Shape>,

    /// Triangles under each named group. Groups do not nest; a repeated `g`
    /// record switches back to an existing group.
    pub groups: BTreeMap<String, Vec<Shape>>,

    current_group: Option<String>,
}

impl FromStr for ObjParser {
    type Err = ObjError;

    fn from_str(src: &str) -> Result<ObjParser, ObjError> {
        let mut parser = ObjParser::new();
        parser.parse(src.as_bytes())?;
        Ok(parser)
    }
}

impl ObjParser {
    pub fn new() -> ObjParser {
        Default::default()
    }

    /// Parses the OBJ file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<ObjParser, ObjError> {
        let path = path.as_ref();
        let file = File::open(path)?;

        let mut parser = ObjParser::new();
        parser.parse(io::BufReader::new(file))?;

        log::info!("loaded {} triangles from {}",
            parser.triangle_count(), path.display());
        Ok(parser)
    }

    /// Parses OBJ records from `reader`, adding to what was parsed before.
    pub fn parse<R: BufRead>(&mut self, reader: R) -> Result<(), ObjError> {
        let ignored_before = self.ignored_lines;

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            self.handle_command(i + 1, line.trim())?;
        }

        let ignored = self.ignored_lines - ignored_before;
        if ignored > 0 {
            log::warn!("ignored {} unsupported OBJ lines", ignored);
        }

        Ok(())
    }

    /// The triangles of a named group.
    pub fn group(&self, name: &str) -> Option<&[Shape]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    pub fn triangle_count(&self) -> usize {
        self.default_group.len() + self.groups.values().map(Vec::len).sum::<usize>()
    }

    /// Collects everything parsed into one group. Named groups become child
    /// groups of the result.
    pub fn into_group(self) -> Shape {
        let named = self.groups.into_iter()
            .map(|(_, triangles)| Shape::group(triangles));

        Shape::group(self.default_group).with_children(named)
    }

    fn handle_command(&mut self, line_no: usize, line: &str)
        -> Result<(), ObjError> {
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let params: Vec<&str> = line.split_whitespace().collect();
        match params[0] {
            "v" if params.len() >= 4 => {
                let [x, y, z] = parse_triple(line_no, &params[1..4])?;
                self.vertices.push(Point::new(x, y, z));
            },
            "vn" if params.len() >= 4 => {
                let [x, y, z] = parse_triple(line_no, &params[1..4])?;
                self.normals.push(Vector::new(x, y, z));
            },
            "f" if params.len() >= 4 => {
                let face = params[1..].iter()
                    .map(|p| self.parse_face_vertex(line_no, p))
                    .collect::<Result<Vec<_>, _>>()?;

                let triangles = self.fan_triangulation(&face);
                match self.current_group {
                    Some(ref name) => self.groups.entry(name.clone())
                        .or_default()
                        .extend(triangles),
                    None => self.default_group.extend(triangles),
                }
            },
            "g" if params.len() >= 2 => {
                let name = params[1].to_string();
                self.groups.entry(name.clone()).or_default();
                self.current_group = Some(name);
            },
            _ => {
                log::debug!("line {}: ignoring {:?}", line_no, line);
                self.ignored_lines += 1;
            },
        }

        Ok(())
    }

    /// Reads `v`, `v/vt`, `v//vn` or `v/vt/vn`. Texture indices are dropped.
    fn parse_face_vertex(&self, line_no: usize, text: &str)
        -> Result<FaceVertex, ObjError> {
        let malformed = || ObjError::Malformed {
            line: line_no,
            text: text.to_string(),
        };

        let mut attributes = text.split('/');
        let vertex: usize = attributes.next()
            .and_then(|v| v.parse().ok())
            .ok_or_else(malformed)?;
        let normal = match attributes.nth(1) {
            Some(n) if !n.is_empty() => {
                Some(n.parse::<usize>().map_err(|_| malformed())?)
            },
            _ => None,
        };

        if vertex == 0 || vertex > self.vertices.len() {
            return Err(ObjError::OutOfRange {
                line: line_no, what: "vertex", index: vertex
            });
        }

        if let Some(n) = normal {
            if n == 0 || n > self.normals.len() {
                return Err(ObjError::OutOfRange {
                    line: line_no, what: "normal", index: n
                });
            }
        }

        Ok(FaceVertex { vertex, normal })
    }

    /// Partitions a list of vertices into triangles.
    ///
    /// In an OBJ file, faces can be specified like so:
    ///
    /// ```obj
    /// f 1 2 3 4 5
    /// ```
    ///
    /// This face references vertices 1, 2, 3, 4 and 5, which would make a
    /// pentagon of some sort. Since only triangles are supported, the
    /// polygon is cut into a fan around its first vertex:
    ///
    /// ```text
    ///         B *
    ///          / \
    ///         /   \
    ///        /     \
    ///     A *       * C
    ///       |       |
    ///       |       |
    ///       |       |
    ///     E * ----- * D
    /// ```
    ///
    /// That gives `A-B-C`, then `A-C-D`, and finally `A-D-E`. This assumes
    /// the polygon is convex.
    ///
    /// A triangle becomes smooth when all three of its corners carry normals.
    fn fan_triangulation(&self, face: &[FaceVertex]) -> Vec<Shape> {
        // Indices were checked while parsing the face
        let p = |fv: &FaceVertex| self.vertices[fv.vertex - 1];
        let n = |i: usize| self.normals[i - 1];

        (1..face.len() - 1).map(|i| {
            let (a, b, c) = (&face[0], &face[i], &face[i + 1]);

            match (a.normal, b.normal, c.normal) {
                (Some(n1), Some(n2), Some(n3)) => Shape::smooth_triangle(
                    p(a), p(b), p(c), n(n1), n(n2), n(n3)
                ),
                _ => Shape::triangle(p(a), p(b), p(c)),
            }
        }).collect()
    }
}

fn parse_triple(line_no: usize, params: &[&str])
    -> Result<[f64; 3], ObjError> {
    let mut out = [0.0; 3];

    for (slot, text) in out.iter_mut().zip(params) {
        *slot = text.parse().map_err(|_| ObjError::Malformed {
            line: line_no,
            text: text.to_string(),
        })?;
    }

    Ok(out)
}

#[cfg(test)]
use crate::shape::{ ShapeKind, TriangleInfo, SmoothTriangleInfo };

#[cfg(test)]
fn triangle_info(s: &Shape) -> TriangleInfo {
    match *s.kind() {
        ShapeKind::Triangle(t) => t,
        ref other => panic!("expected a triangle, found {:?}", other),
    }
}

#[cfg(test)]
fn smooth_triangle_info(s: &Shape) -> SmoothTriangleInfo {
    match *s.kind() {
        ShapeKind::SmoothTriangle(t) => t,
        ref other => panic!("expected a smooth triangle, found {:?}", other),
    }
}

#[test]
fn ignoring_unrecognized_lines() {
    let parser: ObjParser = "
There was a young lady named Bright
who traveled much faster than light.
She set out one day
in a relative way,
and came back the previous night.
".parse().unwrap();

    assert_eq!(parser.ignored_lines, 5);
    assert_eq!(parser.triangle_count(), 0);
}

#[test]
fn vertex_records() {
    let parser: ObjParser = "
v -1 1 0
v -1.0000 0.5000 0.0000
v 1 0 0
v 1 1 0
".parse().unwrap();

    assert_eq!(parser.vertices, vec![
        Point::new(-1.0, 1.0, 0.0),
        Point::new(-1.0, 0.5, 0.0),
        Point::new( 1.0, 0.0, 0.0),
        Point::new( 1.0, 1.0, 0.0),
    ]);
}

#[test]
fn parsing_triangle_faces() {
    let parser: ObjParser = "
v -1 1 0
v -1 0 0
v 1 0 0
v 1 1 0

f 1 2 3
f 1 3 4
".parse().unwrap();

    let t1 = triangle_info(&parser.default_group[0]);
    let t2 = triangle_info(&parser.default_group[1]);
    let v = &parser.vertices;

    assert_eq!((t1.p1, t1.p2, t1.p3), (v[0], v[1], v[2]));
    assert_eq!((t2.p1, t2.p2, t2.p3), (v[0], v[2], v[3]));
}

#[test]
fn triangulating_polygons() {
    let parser: ObjParser = "
v -1 1 0
v -1 0 0
v 1 0 0
v 1 1 0
v 0 2 0

f 1 2 3 4 5
".parse().unwrap();

    let v = &parser.vertices;
    let ts: Vec<TriangleInfo> = parser.default_group.iter()
        .map(triangle_info)
        .collect();

    assert_eq!(ts.len(), 3);
    assert_eq!((ts[0].p1, ts[0].p2, ts[0].p3), (v[0], v[1], v[2]));
    assert_eq!((ts[1].p1, ts[1].p2, ts[1].p3), (v[0], v[2], v[3]));
    assert_eq!((ts[2].p1, ts[2].p2, ts[2].p3), (v[0], v[3], v[4]));
}

#[test]
fn triangles_in_groups() {
    let parser: ObjParser = "
v -1 1 0
v -1 0 0
v 1 0 0
v 1 1 0

g FirstGroup
f 1 2 3
g SecondGroup
f 1 3 4
".parse().unwrap();

    let t1 = triangle_info(&parser.group("FirstGroup").unwrap()[0]);
    let t2 = triangle_info(&parser.group("SecondGroup").unwrap()[0]);
    let v = &parser.vertices;

    assert!(parser.default_group.is_empty());
    assert_eq!((t1.p1, t1.p2, t1.p3), (v[0], v[1], v[2]));
    assert_eq!((t2.p1, t2.p2, t2.p3), (v[0], v[2], v[3]));
}

#[test]
fn converting_to_a_group() {
    let parser: ObjParser = "
v -1 1 0
v -1 0 0
v 1 0 0
v 1 1 0

f 1 2 4
g FirstGroup
f 1 2 3
g SecondGroup
f 1 3 4
".parse().unwrap();

    let g = parser.into_group();
    let children = g.children().unwrap();

    assert_eq!(children.len(), 3);
    assert!(matches!(children[0].kind(), ShapeKind::Triangle(_)));
    assert_eq!(children[1].children().unwrap().len(), 1);
    assert_eq!(children[2].children().unwrap().len(), 1);
    assert_eq!(g.primitive_count(), 3);
}

#[test]
fn vertex_normal_records() {
    let parser: ObjParser = "
vn 0 0 1
vn 0.707 0 -0.707
vn 1 2 3
".parse().unwrap();

    assert_eq!(parser.normals, vec![
        Vector::new(0.0, 0.0, 1.0),
        Vector::new(0.707, 0.0, -0.707),
        Vector::new(1.0, 2.0, 3.0),
    ]);
}

#[test]
fn faces_with_normals() {
    let parser: ObjParser = "
v 0 1 0
v -1 0 0
v 1 0 0

vn -1 0 0
vn 1 0 0
vn 0 1 0

f 1//3 2//1 3//2
f 1/0/3 2/102/1 3/14/2
".parse().unwrap();

    let t1 = smooth_triangle_info(&parser.default_group[0]);
    let t2 = smooth_triangle_info(&parser.default_group[1]);
    let v = &parser.vertices;
    let n = &parser.normals;

    assert_eq!(t1.triangle_info.p1, v[0]);
    assert_eq!(t1.triangle_info.p2, v[1]);
    assert_eq!(t1.triangle_info.p3, v[2]);
    assert_eq!((t1.n1, t1.n2, t1.n3), (n[2], n[0], n[1]));
    assert_eq!(t1, t2);
}

#[test]
fn malformed_vertex_is_an_error() {
    let result = "v 1 two 3".parse::<ObjParser>();

    assert!(matches!(result,
        Err(ObjError::Malformed { line: 1, ref text }) if text == "two"));
}

#[test]
fn face_index_out_of_range_is_an_error() {
    let result = "v 0 0 0\nv 1 0 0\nf 1 2 3".parse::<ObjParser>();

    assert!(matches!(result,
        Err(ObjError::OutOfRange { line: 3, what: "vertex", index: 3 })));
}
