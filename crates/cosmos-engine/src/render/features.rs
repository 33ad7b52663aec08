//! Per-kind surface detail. Shape and colour rules are fixed by the kind;
//! count and placement re-roll on every frame.

use std::f32::consts::{FRAC_PI_8, PI, TAU};

use glam::Vec2;

use crate::core::rng::RandomSource;
use crate::draw::color::Color;
use crate::draw::frame::{Frame, Paint};
use crate::universe::model::PlanetKind;

/// Primitives drawn per frame, before kind-specific extras.
pub const FEATURE_COUNT: (i32, i32) = (3, 7);
const EXOTIC_RIBBONS: usize = 3;
/// Lava arcs never sweep further than this either way.
pub const MAX_LAVA_SWEEP: f32 = FRAC_PI_8;
const OUTLINE_WIDTH: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceFeature {
    /// Soft green blobs.
    Vegetation,
    /// Thin ochre crater rings.
    Dunes,
    /// White polar cap plus ice blobs on the upper hemisphere.
    IceCap,
    /// Translucent yellow-green clouds.
    ToxicClouds,
    /// Red arcs at varying radii.
    LavaStreams,
    /// Small grey islands.
    Islands,
    /// Three purple bezier ribbons from near the centre to near the rim.
    Ribbons,
    /// Grey stroked craters.
    Craters,
}

impl SurfaceFeature {
    pub fn for_kind(kind: PlanetKind) -> Self {
        match kind {
            PlanetKind::Lush => Self::Vegetation,
            PlanetKind::Desert => Self::Dunes,
            PlanetKind::Frozen => Self::IceCap,
            PlanetKind::Toxic => Self::ToxicClouds,
            PlanetKind::Volcanic => Self::LavaStreams,
            PlanetKind::Ocean => Self::Islands,
            PlanetKind::Exotic => Self::Ribbons,
            PlanetKind::Barren | PlanetKind::Irradiated => Self::Craters,
        }
    }

    /// Append this feature's primitives around `center`.
    pub fn draw(self, frame: &mut Frame, rng: &mut impl RandomSource, center: Vec2, radius: f32) {
        let count = rng.range_inclusive(FEATURE_COUNT.0, FEATURE_COUNT.1) as usize;
        match self {
            Self::Vegetation => {
                let color = Color::from_rgb_u32(0x4ade80).with_alpha(0.7);
                for _ in 0..count {
                    let at = scatter(rng, center, radius * 0.7, 0.0, TAU);
                    let size = radius * rng.range(0.2, 0.7);
                    frame.fill_circle(at, size, Paint::solid(color));
                }
            }
            Self::Dunes => {
                let color = Color::from_rgb_u32(0xf59e0b);
                for _ in 0..count {
                    let at = scatter(rng, center, radius * 0.7, 0.0, TAU);
                    let size = radius * rng.range(0.1, 0.3);
                    frame.stroke_circle(at, size, OUTLINE_WIDTH, color);
                }
            }
            Self::IceCap => {
                let cap = center - Vec2::new(0.0, radius * 0.7);
                frame.fill_circle(cap, radius * 0.5, Paint::solid(Color::WHITE.with_alpha(0.9)));
                let ice = Color::WHITE.with_alpha(0.7);
                for _ in 0..count {
                    // y grows downward, so [PI, TAU) is the upper half.
                    let at = scatter(rng, center, radius * 0.5, PI, TAU);
                    frame.fill_circle(at, radius * 0.15, Paint::solid(ice));
                }
            }
            Self::ToxicClouds => {
                let color = Color::from_rgb_u32(0x84cc16).with_alpha(0.4);
                for _ in 0..count {
                    let at = scatter(rng, center, radius * 0.8, 0.0, TAU);
                    let size = radius * rng.range(0.1, 0.4);
                    frame.fill_circle(at, size, Paint::solid(color));
                }
            }
            Self::LavaStreams => {
                let color = Color::from_rgb_u32(0xef4444);
                for _ in 0..count {
                    let start = rng.range(0.0, TAU);
                    let end = start + rng.range(-MAX_LAVA_SWEEP, MAX_LAVA_SWEEP);
                    let orbit = radius * rng.range(0.7, 1.0);
                    let width = radius * rng.range(0.05, 0.1);
                    frame.stroke_arc(center, orbit, start, end, width, color);
                }
            }
            Self::Islands => {
                let color = Color::from_rgb_u32(0xa3a3a3);
                for _ in 0..count {
                    let at = scatter(rng, center, radius * 0.7, 0.0, TAU);
                    let size = radius * rng.range(0.05, 0.2);
                    frame.fill_circle(at, size, Paint::solid(color));
                }
            }
            Self::Ribbons => {
                let color = Color::from_rgb_u32(0xa855f7);
                for _ in 0..EXOTIC_RIBBONS {
                    let angle = rng.range(0.0, TAU);
                    let from = center + polar(angle, radius * 0.2);
                    let to = center + polar(angle, radius * 0.9);
                    let ctrl1 = center + polar(angle + 0.5, radius * 0.5);
                    let ctrl2 = center + polar(angle - 0.5, radius * 0.6);
                    frame.stroke_bezier(from, ctrl1, ctrl2, to, radius * 0.05, color);
                }
            }
            Self::Craters => {
                let color = Color::from_rgb_u32(0xa3a3a3);
                for _ in 0..count {
                    let at = scatter(rng, center, radius * 0.7, 0.0, TAU);
                    let size = radius * rng.range(0.05, 0.25);
                    frame.stroke_circle(at, size, OUTLINE_WIDTH, color);
                }
            }
        }
    }
}

fn polar(angle: f32, distance: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin()) * distance
}

/// Random point at most `max_distance` from `center`, angle in `[from, to)`.
fn scatter(rng: &mut impl RandomSource, center: Vec2, max_distance: f32, from: f32, to: f32) -> Vec2 {
    let angle = rng.range(from, to);
    let distance = rng.range(0.0, max_distance);
    center + polar(angle, distance)
}
