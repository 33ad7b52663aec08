//! Single-planet surface renderer.
//!
//! Layers, back to front: background, stars, ring, atmosphere, base sphere,
//! rotated surface features, relief shading, edge stroke.

use std::f32::consts::PI;

use glam::Vec2;

use crate::api::view::ViewConfig;
use crate::core::rng::RandomSource;
use crate::core::surface::SurfaceSize;
use crate::draw::color::Color;
use crate::draw::frame::{Frame, GradientStop, Paint};
use crate::universe::model::{Planet, PlanetKind};

use super::features::SurfaceFeature;
use super::starfield::{self, PLANET_BACKGROUND, PLANET_STARS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingRule {
    Never,
    Always,
    /// Ringed when the first UTF-16 unit of the id is a multiple of three.
    ById,
}

/// Per-kind rendering strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetStyle {
    pub feature: SurfaceFeature,
    pub has_atmosphere: bool,
    pub rings: RingRule,
    pub ring_color: Color,
}

const RING_TAN: u32 = 0xa8a29e;
const RING_PURPLE: u32 = 0xc084fc;

impl PlanetStyle {
    pub fn for_kind(kind: PlanetKind) -> Self {
        let (has_atmosphere, rings, ring) = match kind {
            PlanetKind::Barren => (false, RingRule::Never, RING_TAN),
            PlanetKind::Exotic => (true, RingRule::Always, RING_PURPLE),
            PlanetKind::Lush
            | PlanetKind::Desert
            | PlanetKind::Toxic
            | PlanetKind::Irradiated
            | PlanetKind::Frozen
            | PlanetKind::Ocean
            | PlanetKind::Volcanic => (true, RingRule::ById, RING_TAN),
        };
        Self {
            feature: SurfaceFeature::for_kind(kind),
            has_atmosphere,
            rings,
            ring_color: Color::from_rgb_u32(ring),
        }
    }
}

/// Whether `planet` is drawn with a ring.
pub fn has_ring(planet: &Planet) -> bool {
    match PlanetStyle::for_kind(planet.kind).rings {
        RingRule::Never => false,
        RingRule::Always => true,
        RingRule::ById => planet
            .id
            .as_str()
            .encode_utf16()
            .next()
            .is_some_and(|unit| unit % 3 == 0),
    }
}

pub struct PlanetRenderer {
    stars: usize,
    radius_factor: f32,
}

impl PlanetRenderer {
    pub fn new(config: &ViewConfig) -> Self {
        Self {
            stars: config.planet_stars,
            radius_factor: config.planet_radius_factor,
        }
    }

    /// Planet radius for a surface.
    pub fn radius(&self, size: &SurfaceSize) -> f32 {
        size.min_side() * self.radius_factor
    }

    /// Compose one frame. A missing or zero-area surface yields `None`.
    pub fn render(
        &self,
        planet: &Planet,
        surface: Option<SurfaceSize>,
        angle: f32,
        rng: &mut impl RandomSource,
    ) -> Option<Frame> {
        let size = surface.filter(SurfaceSize::is_drawable)?;
        let style = PlanetStyle::for_kind(planet.kind);
        let center = size.center();
        let radius = self.radius(&size);
        let mut frame = Frame::new(size);

        starfield::fill_background(&mut frame, PLANET_BACKGROUND);
        starfield::scatter_stars(&mut frame, rng, self.stars, PLANET_STARS);

        if has_ring(planet) {
            frame.stroke_ellipse(
                center,
                Vec2::new(radius * 1.8, radius * 0.4),
                PI / 6.0,
                radius * 0.1,
                style.ring_color,
            );
        }

        if style.has_atmosphere {
            let glow = Paint::radial(
                center,
                radius,
                radius * 1.15,
                vec![
                    GradientStop::new(0.0, planet.main_color.with_alpha(0x55 as f32 / 255.0)),
                    GradientStop::new(1.0, Color::TRANSPARENT),
                ],
            );
            frame.fill_circle(center, radius * 1.15, glow);
        }

        let base = Paint::linear(
            Vec2::ZERO,
            Vec2::new(0.0, size.height),
            vec![
                GradientStop::new(0.0, planet.main_color),
                GradientStop::new(1.0, planet.secondary_color),
            ],
        );
        frame.fill_circle(center, radius, base);

        frame.push_rotation(center, angle);
        style.feature.draw(&mut frame, rng, center, radius);
        frame.pop_transform();

        let relief = Paint::Radial {
            inner_center: center - Vec2::splat(radius * 0.5),
            inner_radius: 0.0,
            outer_center: center,
            outer_radius: radius * 1.2,
            stops: vec![
                GradientStop::new(0.0, Color::WHITE.with_alpha(0.1)),
                GradientStop::new(0.5, Color::TRANSPARENT),
                GradientStop::new(1.0, Color::BLACK.with_alpha(0.5)),
            ],
        };
        frame.fill_circle(center, radius, relief);

        frame.stroke_circle(center, radius, 2.0, planet.main_color.with_alpha(0x70 as f32 / 255.0));
        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::PlanetId;
    use crate::core::rng::{Rng, SequenceRng};
    use crate::draw::frame::DrawCommand;
    use crate::universe::generator::Generator;

    fn planet(kind: PlanetKind, id: &str) -> Planet {
        let mut rng = Rng::new(42);
        let mut p = Generator::new(&mut rng).planet_of_kind(kind);
        p.id = PlanetId::from(id);
        p
    }

    fn surface() -> Option<SurfaceSize> {
        Some(SurfaceSize::new(400.0, 300.0))
    }

    fn ellipses(frame: &Frame) -> usize {
        frame
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeEllipse { .. }))
            .count()
    }

    #[test]
    fn missing_surface_skips_frame() {
        let renderer = PlanetRenderer::new(&ViewConfig::default());
        let p = planet(PlanetKind::Lush, "a");
        let mut rng = Rng::new(1);
        assert!(renderer.render(&p, None, 0.0, &mut rng).is_none());
        let empty = Some(SurfaceSize::new(0.0, 300.0));
        assert!(renderer.render(&p, empty, 0.0, &mut rng).is_none());
    }

    #[test]
    fn ring_follows_first_code_unit() {
        // 'c' = 99 is a multiple of three, 'a' = 97 is not.
        assert!(has_ring(&planet(PlanetKind::Lush, "c1")));
        assert!(!has_ring(&planet(PlanetKind::Lush, "a1")));
        assert!(has_ring(&planet(PlanetKind::Exotic, "a1")));
        assert!(!has_ring(&planet(PlanetKind::Barren, "c1")));
        assert!(!has_ring(&planet(PlanetKind::Ocean, "")));
    }

    #[test]
    fn layer_order_is_fixed() {
        let renderer = PlanetRenderer::new(&ViewConfig::default());
        let p = planet(PlanetKind::Exotic, "c");
        let mut rng = Rng::new(9);
        let frame = renderer.render(&p, surface(), 0.25, &mut rng).unwrap();
        let cmds = &frame.commands;

        assert!(matches!(cmds[0], DrawCommand::FillRect { .. }));
        // 30 stars follow the background.
        let ring = 1 + 30;
        assert!(matches!(cmds[ring], DrawCommand::StrokeEllipse { .. }));
        assert!(matches!(cmds[ring + 1], DrawCommand::FillCircle { paint: Paint::Radial { .. }, .. }));
        assert!(matches!(cmds[ring + 2], DrawCommand::FillCircle { paint: Paint::Linear { .. }, .. }));
        assert!(matches!(cmds[ring + 3], DrawCommand::PushRotation { angle, .. } if angle == 0.25));
        let n = cmds.len();
        assert!(matches!(cmds[n - 3], DrawCommand::PopTransform));
        assert!(matches!(cmds[n - 2], DrawCommand::FillCircle { paint: Paint::Radial { .. }, .. }));
        assert!(matches!(cmds[n - 1], DrawCommand::StrokeCircle { width, .. } if width == 2.0));
        assert_eq!(ellipses(&frame), 1);
    }

    fn ring_of(p: &Planet) -> (Vec2, Vec2, f32, f32, Color) {
        let renderer = PlanetRenderer::new(&ViewConfig::default());
        let mut rng = Rng::new(4);
        let frame = renderer.render(p, surface(), 0.0, &mut rng).unwrap();
        let ring = frame
            .iter()
            .find_map(|c| match *c {
                DrawCommand::StrokeEllipse { center, radii, rotation, width, color } => {
                    Some((center, radii, rotation, width, color))
                }
                _ => None,
            })
            .unwrap();
        ring
    }

    #[test]
    fn ring_is_a_tilted_flat_ellipse() {
        // r = 0.35 * 300 = 105
        for (kind, rgb) in [(PlanetKind::Exotic, 0xc084fc), (PlanetKind::Volcanic, 0xa8a29e)] {
            let (center, radii, rotation, width, color) = ring_of(&planet(kind, "c7"));
            assert_eq!(center, Vec2::new(200.0, 150.0));
            assert!((radii.x - 189.0).abs() < 1e-3, "{kind}");
            assert!((radii.y - 42.0).abs() < 1e-3, "{kind}");
            assert!((rotation - 30f32.to_radians()).abs() < 1e-5);
            assert!((width - 10.5).abs() < 1e-3);
            assert_eq!(color, Color::from_rgb_u32(rgb), "{kind}");
        }
    }

    #[test]
    fn barren_has_no_glow_or_ring() {
        let renderer = PlanetRenderer::new(&ViewConfig::default());
        let p = planet(PlanetKind::Barren, "c");
        let mut rng = SequenceRng::constant(0.5);
        let frame = renderer.render(&p, surface(), 0.0, &mut rng).unwrap();
        assert_eq!(ellipses(&frame), 0);
        // Background and stars, then the base sphere directly.
        assert!(matches!(
            frame.commands[31],
            DrawCommand::FillCircle { paint: Paint::Linear { .. }, .. }
        ));
    }

    #[test]
    fn radius_tracks_shorter_side() {
        let renderer = PlanetRenderer::new(&ViewConfig::default());
        assert!((renderer.radius(&SurfaceSize::new(400.0, 300.0)) - 105.0).abs() < 1e-3);
    }

    #[test]
    fn base_gradient_runs_top_to_bottom() {
        let renderer = PlanetRenderer::new(&ViewConfig::default());
        let p = planet(PlanetKind::Ocean, "a");
        let mut rng = Rng::new(3);
        let frame = renderer.render(&p, surface(), 0.0, &mut rng).unwrap();
        let base = frame
            .iter()
            .find_map(|c| match c {
                DrawCommand::FillCircle { paint: paint @ Paint::Linear { .. }, .. } => Some(paint),
                _ => None,
            })
            .unwrap();
        assert_eq!(base.color_at(Vec2::new(200.0, 0.0)), p.main_color);
        assert_eq!(base.color_at(Vec2::new(200.0, 300.0)), p.secondary_color);
    }
}
