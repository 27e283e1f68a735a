// src/geometry/tessellator.rs
// Outline command state machine feeding a non-zero winding fill tessellator
// Exists to turn glyph outlines into front-face triangles and oriented boundary contours
// RELEVANT FILES:src/geometry/bezier.rs,src/geometry/contour.rs,src/font/mod.rs,src/glyph/builder.rs

use std::collections::{HashMap, HashSet};

use glam::{Vec2, Vec3};
use lyon_path::{math, Path};
use lyon_tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, FillVertexConstructor,
    VertexBuffers,
};

use super::bezier::CubicBezier;
use super::contour::Contour;
use crate::error::{TextMeshError, TextMeshResult};
use crate::font::PathCommand;

/// Closing points closer than this to the first point are dropped.
const CLOSE_EPSILON: f32 = 1e-5;

/// Sine of the largest turn still treated as a straight boundary.
const COLLINEAR_EPSILON: f32 = 1e-6;

/// Triangulated glyph front face.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TessellatedOutline {
    pub vertices: Vec<Vec3>,
    pub indices: Vec<u32>,
    /// Boundary loops with the filled region on their right-hand side.
    pub contours: Vec<Contour>,
}

impl TessellatedOutline {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[derive(Clone, Copy)]
struct PlanarVertexCtor;
impl FillVertexConstructor<Vec3> for PlanarVertexCtor {
    fn new_vertex(&mut self, v: FillVertex) -> Vec3 {
        let p = v.position();
        Vec3::new(p.x, p.y, 0.0)
    }
}

/// Accumulates closed polygons from outline commands, then triangulates them.
#[derive(Debug, Clone)]
pub struct ContourTessellator {
    resolution: f32,
    extract_contours: bool,
    current: Vec<Vec2>,
    polygons: Vec<Vec<Vec2>>,
}

impl ContourTessellator {
    pub fn new(resolution: f32, extract_contours: bool) -> Self {
        Self {
            resolution: resolution.abs(),
            extract_contours,
            current: Vec::new(),
            polygons: Vec::new(),
        }
    }

    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    /// Closed polygons gathered so far.
    pub fn polygons(&self) -> &[Vec<Vec2>] {
        &self.polygons
    }

    pub fn begin_read(&mut self, expected_contours: usize) {
        self.current.clear();
        self.polygons.clear();
        self.polygons.reserve(expected_contours);
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.close_contour();
        self.current.push(Vec2::new(x, y));
    }

    pub fn line_to(&mut self, x: f32, y: f32) {
        let p = Vec2::new(x, y);
        if self.current.last() != Some(&p) {
            self.current.push(p);
        }
    }

    pub fn curve3(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        let from = self.pen();
        let curve = CubicBezier::from_quadratic(from, Vec2::new(cx, cy), Vec2::new(x, y));
        curve.flatten_into(self.resolution, &mut self.current);
    }

    pub fn curve4(&mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) {
        let from = self.pen();
        let curve = CubicBezier::new(
            from,
            Vec2::new(c1x, c1y),
            Vec2::new(c2x, c2y),
            Vec2::new(x, y),
        );
        curve.flatten_into(self.resolution, &mut self.current);
    }

    /// Current pen position, starting the contour at the origin if needed.
    fn pen(&mut self) -> Vec2 {
        match self.current.last() {
            Some(p) => *p,
            None => {
                self.current.push(Vec2::ZERO);
                Vec2::ZERO
            }
        }
    }

    pub fn close_contour(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let mut contour = std::mem::take(&mut self.current);
        if contour.len() > 1 {
            let first = contour[0];
            if contour
                .last()
                .map_or(false, |last| last.distance(first) < CLOSE_EPSILON)
            {
                contour.pop();
            }
        }
        if contour.len() > 2 {
            self.polygons.push(contour);
        } else {
            log::debug!("Dropping degenerate contour with {} points", contour.len());
        }
    }

    /// Feed a full outline command stream.
    pub fn apply_commands(&mut self, commands: &[PathCommand]) {
        for command in commands {
            match *command {
                PathCommand::MoveTo(x, y) => self.move_to(x, y),
                PathCommand::LineTo(x, y) => self.line_to(x, y),
                PathCommand::CurveQuadratic(cx, cy, x, y) => self.curve3(cx, cy, x, y),
                PathCommand::CurveCubic(c1x, c1y, c2x, c2y, x, y) => {
                    self.curve4(c1x, c1y, c2x, c2y, x, y)
                }
                PathCommand::Close => self.close_contour(),
            }
        }
    }

    /// Close any open contour and triangulate everything gathered.
    pub fn end_read(&mut self) -> TextMeshResult<TessellatedOutline> {
        self.close_contour();
        if self.polygons.is_empty() {
            return Ok(TessellatedOutline::default());
        }

        let mut builder = Path::builder();
        for polygon in &self.polygons {
            builder.begin(math::point(polygon[0].x, polygon[0].y));
            for p in &polygon[1..] {
                builder.line_to(math::point(p.x, p.y));
            }
            builder.end(true);
        }
        let path = builder.build();

        let mut buffers: VertexBuffers<Vec3, u32> = VertexBuffers::new();
        let mut tess = FillTessellator::new();
        tess.tessellate_path(
            path.as_slice(),
            &FillOptions::default().with_fill_rule(FillRule::NonZero),
            &mut BuffersBuilder::new(&mut buffers, PlanarVertexCtor),
        )
        .map_err(|e| TextMeshError::tessellation(format!("fill failed: {:?}", e)))?;

        let VertexBuffers {
            vertices,
            mut indices,
        } = buffers;
        face_negative_z(&vertices, &mut indices);

        let contours = if self.extract_contours {
            boundary_contours(&vertices, &indices)
        } else {
            Vec::new()
        };

        Ok(TessellatedOutline {
            vertices,
            indices,
            contours,
        })
    }
}

/// Tessellate a command stream in one call.
pub fn tessellate_commands(
    commands: &[PathCommand],
    resolution: f32,
    extract_contours: bool,
) -> TextMeshResult<TessellatedOutline> {
    let mut tess = ContourTessellator::new(resolution, extract_contours);
    tess.begin_read(0);
    tess.apply_commands(commands);
    tess.end_read()
}

fn signed_area2(a: Vec3, b: Vec3, c: Vec3) -> f32 {
    (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)
}

/// Reorder each triangle so its geometric normal points along -Z.
fn face_negative_z(vertices: &[Vec3], indices: &mut [u32]) {
    for tri in indices.chunks_exact_mut(3) {
        let a = vertices[tri[0] as usize];
        let b = vertices[tri[1] as usize];
        let c = vertices[tri[2] as usize];
        if signed_area2(a, b, c) > 0.0 {
            tri.swap(1, 2);
        }
    }
}

fn vertex_key(p: Vec3) -> (u32, u32) {
    // adding zero folds -0.0 into 0.0
    ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())
}

/// Trace the outline of the filled region from its triangulation.
///
/// Every triangle winds clockwise in xy, so a directed edge whose reverse
/// belongs to no other triangle is a boundary edge with the fill on its
/// right. Chaining those edges yields one loop per boundary component,
/// whatever the input polygons overlapped.
fn boundary_contours(vertices: &[Vec3], indices: &[u32]) -> Vec<Contour> {
    // coincident vertices must share an index for shared edges to cancel
    let mut welded = HashMap::new();
    let canonical: Vec<u32> = vertices
        .iter()
        .enumerate()
        .map(|(i, &p)| *welded.entry(vertex_key(p)).or_insert(i as u32))
        .collect();
    let xy = |i: u32| vertices[i as usize].truncate();

    let mut edges: Vec<(u32, u32)> = Vec::with_capacity(indices.len());
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| canonical[i as usize]);
        let area = signed_area2(
            vertices[a as usize],
            vertices[b as usize],
            vertices[c as usize],
        );
        if area == 0.0 {
            continue;
        }
        edges.extend_from_slice(&[(a, b), (b, c), (c, a)]);
    }
    let directed: HashSet<(u32, u32)> = edges.iter().copied().collect();
    let boundary: Vec<(u32, u32)> = edges
        .into_iter()
        .filter(|&(a, b)| !directed.contains(&(b, a)))
        .collect();

    let mut outgoing: HashMap<u32, Vec<usize>> = HashMap::new();
    for (e, &(from, _)) in boundary.iter().enumerate() {
        outgoing.entry(from).or_default().push(e);
    }
    // signed turn from `incoming` onto edge `e`; negative turns right
    let turn = |incoming: Vec2, e: usize| {
        let (from, to) = boundary[e];
        let out = xy(to) - xy(from);
        incoming.perp_dot(out).atan2(incoming.dot(out))
    };

    let mut used = vec![false; boundary.len()];
    let mut contours = Vec::new();
    for start in 0..boundary.len() {
        if used[start] {
            continue;
        }
        used[start] = true;
        let (origin, mut head) = boundary[start];
        let mut incoming = xy(head) - xy(origin);
        let mut points = vec![xy(origin)];
        while head != origin {
            points.push(xy(head));
            // at pinch points hug the fill by taking the sharpest right turn
            let next = outgoing.get(&head).and_then(|candidates| {
                candidates
                    .iter()
                    .copied()
                    .filter(|&e| !used[e])
                    .min_by(|&l, &r| turn(incoming, l).total_cmp(&turn(incoming, r)))
            });
            let Some(e) = next else {
                break;
            };
            used[e] = true;
            let to = boundary[e].1;
            incoming = xy(to) - xy(head);
            head = to;
        }

        if head != origin {
            log::debug!("Dropping open boundary chain of {} points", points.len());
            continue;
        }
        let points = drop_collinear(points);
        if points.len() > 2 {
            contours.push(Contour::from_xy(&points));
        }
    }
    contours
}

/// Remove points that neither turn the loop nor end it, including spikes.
fn drop_collinear(mut points: Vec<Vec2>) -> Vec<Vec2> {
    loop {
        let n = points.len();
        if n < 3 {
            return points;
        }
        let kept: Vec<Vec2> = (0..n)
            .filter(|&i| {
                let u = points[i] - points[(i + n - 1) % n];
                let v = points[(i + 1) % n] - points[i];
                u.perp_dot(v).abs() > COLLINEAR_EPSILON * u.length() * v.length()
            })
            .map(|i| points[i])
            .collect();
        if kept.len() == n {
            return points;
        }
        points = kept;
    }
}
