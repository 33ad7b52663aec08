//! Node labels: centred text lines over a translucent backing box.

use glam::Vec2;

use crate::draw::color::Color;
use crate::draw::frame::{Frame, Paint};

/// Measures rendered text width in layout pixels.
pub trait TextMetrics {
    fn measure(&self, text: &str, size: f32) -> f32;
}

/// Fixed-advance estimate for a proportional sans-serif face.
#[derive(Debug, Clone, Copy)]
pub struct ApproxMetrics {
    /// Horizontal advance as a fraction of the font size.
    pub advance: f32,
}

impl Default for ApproxMetrics {
    fn default() -> Self {
        Self { advance: 0.55 }
    }
}

impl TextMetrics for ApproxMetrics {
    fn measure(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * self.advance
    }
}

pub const LABEL_BACKDROP: Color = Color::new(0.0, 0.0, 0.0, 0.5);
const PADDING: f32 = 4.0;
const LINE_SPACING: f32 = 1.3;

/// Draw `lines` centred on `baseline.x`, first baseline at `baseline.y`.
/// Returns the backing box as `(origin, size)`.
pub fn draw_label(
    frame: &mut Frame,
    metrics: &impl TextMetrics,
    baseline: Vec2,
    lines: &[(String, Color)],
    size: f32,
) -> Option<(Vec2, Vec2)> {
    if lines.is_empty() {
        return None;
    }
    let widest = lines
        .iter()
        .map(|(text, _)| metrics.measure(text, size))
        .fold(0.0_f32, f32::max);
    let line_height = size * LINE_SPACING;
    let box_size = Vec2::new(
        widest + 2.0 * PADDING,
        size + line_height * (lines.len() - 1) as f32 + 2.0 * PADDING,
    );
    let origin = Vec2::new(baseline.x - box_size.x / 2.0, baseline.y - size - PADDING);
    frame.fill_rect(origin, box_size, Paint::solid(LABEL_BACKDROP));

    for (i, (text, color)) in lines.iter().enumerate() {
        let anchor = Vec2::new(baseline.x, baseline.y + line_height * i as f32);
        frame.text(text.as_str(), anchor, size, *color);
    }
    Some((origin, box_size))
}
