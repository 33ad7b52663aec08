//! Immediate-mode draw lists.
//!
//! Renderers never touch a real canvas. They append [`DrawCommand`]s to a
//! [`Frame`], which the host replays (or the tessellator turns into
//! triangles). A frame is built from scratch every tick.

use glam::Vec2;
use serde::Serialize;

use super::color::Color;
use crate::core::surface::SurfaceSize;

/// A color stop on a gradient, `offset` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}

impl GradientStop {
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// How a filled shape is colored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Paint {
    Solid { color: Color },
    /// Gradient along the line `start -> end`.
    Linear {
        start: Vec2,
        end: Vec2,
        stops: Vec<GradientStop>,
    },
    /// Two-circle radial gradient, canvas semantics.
    #[serde(rename_all = "camelCase")]
    Radial {
        inner_center: Vec2,
        inner_radius: f32,
        outer_center: Vec2,
        outer_radius: f32,
        stops: Vec<GradientStop>,
    },
}

impl Paint {
    pub fn solid(color: Color) -> Self {
        Paint::Solid { color }
    }

    pub fn linear(start: Vec2, end: Vec2, stops: Vec<GradientStop>) -> Self {
        Paint::Linear { start, end, stops }
    }

    /// Radial gradient between two concentric circles.
    pub fn radial(center: Vec2, inner_radius: f32, outer_radius: f32, stops: Vec<GradientStop>) -> Self {
        Paint::Radial {
            inner_center: center,
            inner_radius,
            outer_center: center,
            outer_radius,
            stops,
        }
    }

    /// Color of the paint at `p`, with pad spread outside the gradient.
    pub fn color_at(&self, p: Vec2) -> Color {
        match self {
            Paint::Solid { color } => *color,
            Paint::Linear { start, end, stops } => {
                let axis = *end - *start;
                let len_sq = axis.length_squared();
                let t = if len_sq <= f32::EPSILON {
                    0.0
                } else {
                    (p - *start).dot(axis) / len_sq
                };
                sample_stops(stops, t)
            }
            Paint::Radial {
                inner_center,
                inner_radius,
                outer_center,
                outer_radius,
                stops,
            } => match radial_parameter(*inner_center, *inner_radius, *outer_center, *outer_radius, p) {
                Some(t) => sample_stops(stops, t),
                None => Color::TRANSPARENT,
            },
        }
    }
}

/// Solve for the largest `t` such that `p` lies on the circle interpolated
/// between the two gradient circles, keeping the radius non-negative.
fn radial_parameter(c0: Vec2, r0: f32, c1: Vec2, r1: f32, p: Vec2) -> Option<f32> {
    let dc = c1 - c0;
    let dr = r1 - r0;
    let d = p - c0;
    let a = dc.dot(dc) - dr * dr;
    let b = -2.0 * (d.dot(dc) + r0 * dr);
    let c = d.dot(d) - r0 * r0;

    let valid = |t: f32| r0 + t * dr >= 0.0;

    if a.abs() < 1e-6 {
        if b.abs() < 1e-6 {
            return None;
        }
        let t = -c / b;
        return valid(t).then_some(t);
    }

    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    let t1 = (-b + sq) / (2.0 * a);
    let t2 = (-b - sq) / (2.0 * a);
    let (hi, lo) = if t1 >= t2 { (t1, t2) } else { (t2, t1) };
    if valid(hi) {
        Some(hi)
    } else if valid(lo) {
        Some(lo)
    } else {
        None
    }
}

fn sample_stops(stops: &[GradientStop], t: f32) -> Color {
    let (first, last) = match (stops.first(), stops.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => return Color::TRANSPARENT,
    };
    if t <= first.offset {
        return first.color;
    }
    if t >= last.offset {
        return last.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if t >= a.offset && t <= b.offset {
            let span = b.offset - a.offset;
            if span <= f32::EPSILON {
                return b.color;
            }
            return a.color.lerp(b.color, (t - a.offset) / span);
        }
    }
    last.color
}

/// One drawing primitive. Coordinates are layout pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawCommand {
    FillRect { origin: Vec2, size: Vec2, paint: Paint },
    FillCircle { center: Vec2, radius: f32, paint: Paint },
    StrokeCircle { center: Vec2, radius: f32, width: f32, color: Color },
    /// Arc from `start` to `end` in radians, always with `end >= start`, so a
    /// canvas `arc(start, end)` replay draws the short way round.
    StrokeArc { center: Vec2, radius: f32, start: f32, end: f32, width: f32, color: Color },
    /// Ellipse outline, `rotation` in radians.
    StrokeEllipse { center: Vec2, radii: Vec2, rotation: f32, width: f32, color: Color },
    StrokeBezier { from: Vec2, ctrl1: Vec2, ctrl2: Vec2, to: Vec2, width: f32, color: Color },
    StrokePolyline { points: Vec<Vec2>, width: f32, color: Color },
    FillPolygon { points: Vec<Vec2>, color: Color },
    /// Horizontally centered on `anchor.x`, baseline at `anchor.y`.
    Text { text: String, anchor: Vec2, size: f32, color: Color },
    /// Rotate everything until the matching `PopTransform` around `center`.
    PushRotation { center: Vec2, angle: f32 },
    PopTransform,
}

/// A complete frame: the surface it was laid out for plus its draw calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub size: SurfaceSize,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            commands: Vec::with_capacity(256),
        }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }

    /// Text commands only, in draw order.
    pub fn texts(&self) -> Vec<&DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Text { .. }))
            .collect()
    }

    pub fn fill_rect(&mut self, origin: Vec2, size: Vec2, paint: Paint) {
        self.commands.push(DrawCommand::FillRect { origin, size, paint });
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, paint: Paint) {
        if radius <= 0.0 {
            return;
        }
        self.commands.push(DrawCommand::FillCircle { center, radius, paint });
    }

    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        self.commands.push(DrawCommand::StrokeCircle { center, radius, width, color });
    }

    /// A negative sweep is stored reversed; the stroked points are the same.
    pub fn stroke_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32, width: f32, color: Color) {
        let (start, end) = if end < start { (end, start) } else { (start, end) };
        self.commands.push(DrawCommand::StrokeArc { center, radius, start, end, width, color });
    }

    pub fn stroke_ellipse(&mut self, center: Vec2, radii: Vec2, rotation: f32, width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeEllipse { center, radii, rotation, width, color });
    }

    pub fn stroke_bezier(&mut self, from: Vec2, ctrl1: Vec2, ctrl2: Vec2, to: Vec2, width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeBezier { from, ctrl1, ctrl2, to, width, color });
    }

    pub fn stroke_polyline(&mut self, points: Vec<Vec2>, width: f32, color: Color) {
        if points.len() < 2 {
            return;
        }
        self.commands.push(DrawCommand::StrokePolyline { points, width, color });
    }

    pub fn fill_polygon(&mut self, points: Vec<Vec2>, color: Color) {
        if points.len() < 3 {
            return;
        }
        self.commands.push(DrawCommand::FillPolygon { points, color });
    }

    pub fn text(&mut self, text: impl Into<String>, anchor: Vec2, size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.into(),
            anchor,
            size,
            color,
        });
    }

    pub fn push_rotation(&mut self, center: Vec2, angle: f32) {
        self.commands.push(DrawCommand::PushRotation { center, angle });
    }

    pub fn pop_transform(&mut self) {
        self.commands.push(DrawCommand::PopTransform);
    }
}
