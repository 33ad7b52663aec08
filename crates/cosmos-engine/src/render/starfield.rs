//! Cosmetic backgrounds. Re-randomised on every call; nothing here is
//! semantically meaningful, so callers never cache it.

use glam::Vec2;

use crate::core::rng::RandomSource;
use crate::core::surface::SurfaceSize;
use crate::draw::color::Color;
use crate::draw::frame::{Frame, GradientStop, Paint};

/// Behind the planet: translucent so the previous frame fades out slowly.
pub const PLANET_BACKGROUND: Color = Color::new(4.0 / 255.0, 11.0 / 255.0, 26.0 / 255.0, 0.3);
pub const MAP_BACKGROUND: Color = Color::new(4.0 / 255.0, 11.0 / 255.0, 26.0 / 255.0, 1.0);

/// Size and opacity ranges for one star layer.
#[derive(Debug, Clone, Copy)]
pub struct StarStyle {
    pub size: (f32, f32),
    pub alpha: (f32, f32),
}

pub const PLANET_STARS: StarStyle = StarStyle { size: (0.5, 1.5), alpha: (0.3, 1.0) };
pub const MAP_STARS: StarStyle = StarStyle { size: (0.5, 2.0), alpha: (0.2, 1.0) };

/// Nebula hues span blue to violet.
const NEBULA_HUE: (f32, f32) = (240.0, 300.0);
const NEBULA_ALPHA: f32 = 0.1;
/// Nebula radius as a fraction of the shorter side.
const NEBULA_RADIUS: (f32, f32) = (0.15, 0.35);

pub fn fill_background(frame: &mut Frame, color: Color) {
    let size = frame.size;
    frame.fill_rect(Vec2::ZERO, Vec2::new(size.width, size.height), Paint::solid(color));
}

/// Scatter `count` white stars uniformly over the surface.
pub fn scatter_stars(frame: &mut Frame, rng: &mut impl RandomSource, count: usize, style: StarStyle) {
    let SurfaceSize { width, height, .. } = frame.size;
    for _ in 0..count {
        let center = Vec2::new(rng.range(0.0, width), rng.range(0.0, height));
        let radius = rng.range(style.size.0, style.size.1);
        let alpha = rng.range(style.alpha.0, style.alpha.1);
        frame.fill_circle(center, radius, Paint::solid(Color::WHITE.with_alpha(alpha)));
    }
}

/// Soft radial blobs, each fading from a faint hue to transparent.
pub fn scatter_nebulae(frame: &mut Frame, rng: &mut impl RandomSource, count: usize) {
    let SurfaceSize { width, height, .. } = frame.size;
    let side = frame.size.min_side();
    for _ in 0..count {
        let center = Vec2::new(rng.range(0.0, width), rng.range(0.0, height));
        let radius = side * rng.range(NEBULA_RADIUS.0, NEBULA_RADIUS.1);
        let hue = rng.range(NEBULA_HUE.0, NEBULA_HUE.1);
        let tint = Color::hsla(hue, 0.7, 0.5, NEBULA_ALPHA);
        let paint = Paint::radial(
            center,
            0.0,
            radius,
            vec![
                GradientStop::new(0.0, tint),
                GradientStop::new(1.0, Color::TRANSPARENT),
            ],
        );
        frame.fill_circle(center, radius, paint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::Rng;
    use crate::draw::frame::DrawCommand;

    fn frame() -> Frame {
        Frame::new(SurfaceSize::new(300.0, 200.0))
    }

    #[test]
    fn stars_stay_on_surface_and_in_range() {
        let mut f = frame();
        let mut rng = Rng::new(8);
        scatter_stars(&mut f, &mut rng, 100, MAP_STARS);
        assert_eq!(f.len(), 100);
        for cmd in f.iter() {
            match cmd {
                DrawCommand::FillCircle { center, radius, paint: Paint::Solid { color } } => {
                    assert!(center.x >= 0.0 && center.x < 300.0);
                    assert!(center.y >= 0.0 && center.y < 200.0);
                    assert!(*radius >= 0.5 && *radius < 2.0);
                    assert!(color.a >= 0.2 && color.a <= 1.0);
                }
                other => panic!("unexpected command {other:?}"),
            }
        }
    }

    #[test]
    fn nebulae_fade_out() {
        let mut f = frame();
        let mut rng = Rng::new(2);
        scatter_nebulae(&mut f, &mut rng, 3);
        assert_eq!(f.len(), 3);
        for cmd in f.iter() {
            let DrawCommand::FillCircle { center, radius, paint } = cmd else {
                panic!("expected circle");
            };
            assert!((paint.color_at(*center).a - NEBULA_ALPHA).abs() < 1e-4);
            let rim = *center + Vec2::new(*radius, 0.0);
            assert!(paint.color_at(rim).a < 1e-4);
        }
    }

    #[test]
    fn background_covers_surface() {
        let mut f = frame();
        fill_background(&mut f, MAP_BACKGROUND);
        assert_eq!(
            f.iter().next(),
            Some(&DrawCommand::FillRect {
                origin: Vec2::ZERO,
                size: Vec2::new(300.0, 200.0),
                paint: Paint::solid(MAP_BACKGROUND),
            })
        );
    }
}
