//! Lyon-based tessellation of draw lists.
//!
//! Turns a [`Frame`] into a flat triangle list that the web host uploads as
//! one vertex buffer. Gradient paints are evaluated per vertex, rotations are
//! applied from the transform stack, and everything is scaled into device
//! pixels by the frame's pixel ratio. Text is left to the host.

use bytemuck::{Pod, Zeroable};
use glam::{Affine2, Vec2};
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor,
    StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};

use super::color::Color;
use super::frame::{DrawCommand, Frame, Paint};

/// Segments used for a full turn when flattening arcs.
const ARC_SEGMENTS: f32 = 48.0;

/// Per-vertex data for vector/polygon rendering.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    /// Number of floats per vertex.
    pub const FLOATS: usize = 6;
    /// Stride in bytes.
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4; // 24

    fn new(pos: Vec2, color: Color) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        }
    }
}

/// Vertex constructor for lyon fill tessellation.
struct FillVertexCtor<'a> {
    paint: &'a Paint,
    transform: Affine2,
}

impl FillVertexConstructor<VectorVertex> for FillVertexCtor<'_> {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        let local = Vec2::new(vertex.position().x, vertex.position().y);
        VectorVertex::new(
            self.transform.transform_point2(local),
            self.paint.color_at(local),
        )
    }
}

/// Vertex constructor for lyon stroke tessellation.
struct StrokeVertexCtor {
    color: Color,
    transform: Affine2,
}

impl StrokeVertexConstructor<VectorVertex> for StrokeVertexCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        let local = Vec2::new(vertex.position().x, vertex.position().y);
        VectorVertex::new(self.transform.transform_point2(local), self.color)
    }
}

/// Holds lyon tessellators and the output vertex buffer.
/// Cleared and refilled for every frame.
pub struct Tessellator {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    buffer: Vec<f32>,
    transforms: Vec<Affine2>,
    max_vertices: usize,
}

impl Tessellator {
    pub fn new(max_vertices: usize) -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(max_vertices.min(16384) * VectorVertex::FLOATS),
            transforms: Vec::with_capacity(4),
            max_vertices,
        }
    }

    /// Clear the vertex buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Number of vertices currently in the buffer.
    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / VectorVertex::FLOATS
    }

    pub fn max_vertices(&self) -> usize {
        self.max_vertices
    }

    /// Raw pointer to the flat float buffer (for SAB copy).
    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    pub fn vertices(&self) -> &[f32] {
        &self.buffer
    }

    /// Replace the buffer contents with the triangles of `frame`.
    pub fn tessellate(&mut self, frame: &Frame) {
        self.buffer.clear();
        self.transforms.clear();
        self.transforms
            .push(Affine2::from_scale(Vec2::splat(frame.size.pixel_ratio)));

        for command in frame.iter() {
            self.command(command);
            if self.vertex_count() >= self.max_vertices {
                log::warn!(
                    "vector budget of {} vertices exhausted, truncating frame",
                    self.max_vertices
                );
                self.buffer.truncate(self.max_vertices / 3 * 3 * VectorVertex::FLOATS);
                break;
            }
        }
    }

    fn current(&self) -> Affine2 {
        self.transforms.last().copied().unwrap_or(Affine2::IDENTITY)
    }

    fn command(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::FillRect { origin, size, paint } => {
                let points = [
                    *origin,
                    Vec2::new(origin.x + size.x, origin.y),
                    *origin + *size,
                    Vec2::new(origin.x, origin.y + size.y),
                ];
                if let Some(path) = polygon_path(&points, true) {
                    self.fill_path(&path, paint);
                }
            }
            DrawCommand::FillCircle { center, radius, paint } => {
                let mut builder = Path::builder();
                builder.add_circle(point(center.x, center.y), *radius, lyon::path::Winding::Positive);
                self.fill_path(&builder.build(), paint);
            }
            DrawCommand::StrokeCircle { center, radius, width, color } => {
                let mut builder = Path::builder();
                builder.add_circle(point(center.x, center.y), *radius, lyon::path::Winding::Positive);
                self.stroke_path(&builder.build(), *width, *color);
            }
            DrawCommand::StrokeArc { center, radius, start, end, width, color } => {
                let points = arc_points(*center, *radius, *start, *end);
                if let Some(path) = polygon_path(&points, false) {
                    self.stroke_path(&path, *width, *color);
                }
            }
            DrawCommand::StrokeEllipse { center, radii, rotation, width, color } => {
                if radii.x <= 0.0 || radii.y <= 0.0 {
                    return;
                }
                let mut builder = Path::builder();
                builder.add_ellipse(
                    point(center.x, center.y),
                    lyon::math::vector(radii.x, radii.y),
                    lyon::math::Angle::radians(*rotation),
                    lyon::path::Winding::Positive,
                );
                self.stroke_path(&builder.build(), *width, *color);
            }
            DrawCommand::StrokeBezier { from, ctrl1, ctrl2, to, width, color } => {
                let mut builder = Path::builder();
                builder.begin(point(from.x, from.y));
                builder.cubic_bezier_to(
                    point(ctrl1.x, ctrl1.y),
                    point(ctrl2.x, ctrl2.y),
                    point(to.x, to.y),
                );
                builder.end(false);
                self.stroke_path(&builder.build(), *width, *color);
            }
            DrawCommand::StrokePolyline { points, width, color } => {
                if let Some(path) = polygon_path(points, false) {
                    self.stroke_path(&path, *width, *color);
                }
            }
            DrawCommand::FillPolygon { points, color } => {
                if points.len() < 3 {
                    return;
                }
                if let Some(path) = polygon_path(points, true) {
                    self.fill_path(&path, &Paint::solid(*color));
                }
            }
            DrawCommand::Text { .. } => {}
            DrawCommand::PushRotation { center, angle } => {
                let rotation = Affine2::from_translation(*center)
                    * Affine2::from_angle(*angle)
                    * Affine2::from_translation(-*center);
                let next = self.current() * rotation;
                self.transforms.push(next);
            }
            DrawCommand::PopTransform => {
                // The base (pixel ratio) transform is never popped.
                if self.transforms.len() > 1 {
                    self.transforms.pop();
                }
            }
        }
    }

    /// Flush indexed geometry to the flat buffer as triangle list.
    fn flush_geometry(&mut self) {
        for idx in &self.geometry.indices {
            let v = &self.geometry.vertices[*idx as usize];
            self.buffer.extend_from_slice(bytemuck::cast_slice(std::slice::from_ref(v)));
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        let transform = self.current();
        let result = self.fill_tess.tessellate_path(
            path,
            &FillOptions::tolerance(0.5),
            &mut BuffersBuilder::new(&mut self.geometry, FillVertexCtor { paint, transform }),
        );

        if result.is_ok() {
            self.flush_geometry();
        } else {
            self.geometry.vertices.clear();
            self.geometry.indices.clear();
        }
    }

    fn stroke_path(&mut self, path: &Path, width: f32, color: Color) {
        let transform = self.current();
        let result = self.stroke_tess.tessellate_path(
            path,
            &StrokeOptions::tolerance(0.5).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, StrokeVertexCtor { color, transform }),
        );

        if result.is_ok() {
            self.flush_geometry();
        } else {
            self.geometry.vertices.clear();
            self.geometry.indices.clear();
        }
    }
}

impl Default for Tessellator {
    fn default() -> Self {
        Self::new(65536)
    }
}

fn polygon_path(points: &[Vec2], closed: bool) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    if rest.is_empty() {
        return None;
    }
    let mut builder = Path::builder();
    builder.begin(point(first.x, first.y));
    for p in rest {
        builder.line_to(point(p.x, p.y));
    }
    if closed {
        builder.close();
    } else {
        builder.end(false);
    }
    Some(builder.build())
}

fn arc_points(center: Vec2, radius: f32, start: f32, end: f32) -> Vec<Vec2> {
    let sweep = end - start;
    let segments = ((sweep.abs() / std::f32::consts::TAU) * ARC_SEGMENTS)
        .ceil()
        .max(2.0) as usize;
    (0..=segments)
        .map(|i| {
            let a = start + sweep * i as f32 / segments as f32;
            center + Vec2::new(a.cos(), a.sin()) * radius
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::surface::SurfaceSize;
    use crate::draw::frame::GradientStop;
    use std::mem::size_of;

    fn frame() -> Frame {
        Frame::new(SurfaceSize::new(200.0, 200.0))
    }

    #[test]
    fn vector_vertex_is_24_bytes() {
        assert_eq!(size_of::<VectorVertex>(), 24);
        assert_eq!(VectorVertex::FLOATS, 6);
        assert_eq!(VectorVertex::STRIDE_BYTES, 24);
    }

    #[test]
    fn vertex_casts_to_field_order() {
        let v = VectorVertex::new(Vec2::new(1.0, 2.0), Color::new(0.1, 0.2, 0.3, 0.4));
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&v));
        assert_eq!(floats, &[1.0, 2.0, 0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn fill_polygon_triangle() {
        let mut f = frame();
        f.fill_polygon(
            vec![Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0), Vec2::new(50.0, 100.0)],
            Color::WHITE,
        );
        let mut tess = Tessellator::default();
        tess.tessellate(&f);

        // A triangle should produce exactly 3 vertices (1 triangle)
        assert_eq!(tess.vertex_count(), 3);
    }

    #[test]
    fn fill_rect_produces_triangles() {
        let mut f = frame();
        f.fill_rect(Vec2::ZERO, Vec2::new(100.0, 50.0), Paint::solid(Color::BLACK));
        let mut tess = Tessellator::default();
        tess.tessellate(&f);

        // A rectangle should produce 6 vertices (2 triangles)
        assert_eq!(tess.vertex_count(), 6);
    }

    #[test]
    fn pixel_ratio_scales_output() {
        let mut f = Frame::new(SurfaceSize::new(200.0, 200.0).with_pixel_ratio(2.0));
        f.fill_polygon(
            vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)],
            Color::WHITE,
        );
        let mut tess = Tessellator::default();
        tess.tessellate(&f);
        let max_x = tess
            .vertices()
            .chunks(VectorVertex::FLOATS)
            .map(|v| v[0])
            .fold(f32::MIN, f32::max);
        assert!((max_x - 20.0).abs() < 1e-3, "max_x = {max_x}");
    }

    #[test]
    fn gradient_is_sampled_per_vertex() {
        let mut f = frame();
        f.fill_rect(
            Vec2::ZERO,
            Vec2::new(100.0, 100.0),
            Paint::linear(
                Vec2::ZERO,
                Vec2::new(0.0, 100.0),
                vec![
                    GradientStop::new(0.0, Color::BLACK),
                    GradientStop::new(1.0, Color::WHITE),
                ],
            ),
        );
        let mut tess = Tessellator::default();
        tess.tessellate(&f);
        let reds: Vec<f32> = tess.vertices().chunks(VectorVertex::FLOATS).map(|v| v[2]).collect();
        assert!(reds.iter().any(|r| *r < 0.01));
        assert!(reds.iter().any(|r| *r > 0.99));
    }

    #[test]
    fn rotation_is_applied_and_popped() {
        let mut f = frame();
        f.push_rotation(Vec2::ZERO, std::f32::consts::FRAC_PI_2);
        f.fill_polygon(
            vec![Vec2::new(10.0, 0.0), Vec2::new(10.0, 1.0), Vec2::new(11.0, 0.0)],
            Color::WHITE,
        );
        f.pop_transform();
        f.pop_transform(); // extra pops must not remove the base transform
        let mut tess = Tessellator::default();
        tess.tessellate(&f);
        // (10, 0) rotated a quarter turn lands near (0, 10)
        let has_rotated = tess
            .vertices()
            .chunks(VectorVertex::FLOATS)
            .any(|v| v[0].abs() < 1e-3 && (v[1] - 10.0).abs() < 1e-3);
        assert!(has_rotated);
    }

    #[test]
    fn shapes_produce_vertices() {
        let mut f = frame();
        f.fill_circle(Vec2::splat(50.0), 25.0, Paint::solid(Color::WHITE));
        f.stroke_arc(Vec2::splat(50.0), 30.0, 0.0, 1.0, 2.0, Color::WHITE);
        f.stroke_ellipse(Vec2::splat(50.0), Vec2::new(40.0, 10.0), 0.5, 2.0, Color::WHITE);
        f.stroke_bezier(Vec2::ZERO, Vec2::X * 10.0, Vec2::Y * 10.0, Vec2::ONE * 20.0, 1.0, Color::WHITE);
        let mut tess = Tessellator::default();
        tess.tessellate(&f);
        assert!(tess.vertex_count() > 0);
    }

    #[test]
    fn text_produces_nothing() {
        let mut f = frame();
        f.text("Hilbert", Vec2::splat(10.0), 12.0, Color::WHITE);
        let mut tess = Tessellator::default();
        tess.tessellate(&f);
        assert_eq!(tess.vertex_count(), 0);
    }

    #[test]
    fn budget_truncates_to_whole_triangles() {
        let mut f = frame();
        for i in 0..50 {
            f.fill_circle(Vec2::splat(i as f32), 30.0, Paint::solid(Color::WHITE));
        }
        let mut tess = Tessellator::new(100);
        tess.tessellate(&f);
        assert!(tess.vertex_count() <= 100);
        assert_eq!(tess.vertex_count() % 3, 0);
    }

    #[test]
    fn retessellate_replaces_buffer() {
        let mut f = frame();
        f.fill_rect(Vec2::ZERO, Vec2::new(100.0, 50.0), Paint::solid(Color::BLACK));
        let mut tess = Tessellator::default();
        tess.tessellate(&f);
        tess.tessellate(&f);
        assert_eq!(tess.vertex_count(), 6);
        tess.clear();
        assert_eq!(tess.vertex_count(), 0);
    }
}
