//! Animated single-planet canvas.

use crate::api::types::PlanetId;
use crate::api::view::ViewConfig;
use crate::core::rng::RandomSource;
use crate::core::rotation::Rotation;
use crate::core::surface::SurfaceSize;
use crate::draw::frame::Frame;
use crate::render::planet::PlanetRenderer;
use crate::universe::model::Planet;

/// Owns the rotation loop and surface size for one planet canvas.
///
/// Switching to a different planet tears the loop down and restarts it from
/// angle zero.
pub struct PlanetViewer {
    renderer: PlanetRenderer,
    rotation: Rotation,
    surface: Option<SurfaceSize>,
    planet: Option<PlanetId>,
}

impl PlanetViewer {
    pub fn new(config: &ViewConfig) -> Self {
        Self {
            renderer: PlanetRenderer::new(config),
            rotation: Rotation::new(config.rotation_step),
            surface: None,
            planet: None,
        }
    }

    /// Re-read the containing box (mount and every window resize).
    pub fn resize(&mut self, size: SurfaceSize) {
        log::debug!("planet surface {}x{} @{}", size.width, size.height, size.pixel_ratio);
        self.surface = Some(size);
    }

    /// The canvas was unmounted. Frames are skipped until the next resize.
    pub fn detach(&mut self) {
        self.surface = None;
        self.planet = None;
        self.rotation.reset();
    }

    pub fn surface(&self) -> Option<SurfaceSize> {
        self.surface
    }

    pub fn angle(&self) -> f32 {
        self.rotation.angle()
    }

    /// Render the next animation tick of `planet`.
    ///
    /// Returns `None` without advancing the rotation when there is nothing to
    /// draw into.
    pub fn frame(&mut self, planet: &Planet, rng: &mut impl RandomSource) -> Option<Frame> {
        if self.planet.as_ref() != Some(&planet.id) {
            self.rotation.reset();
            self.planet = Some(planet.id.clone());
        }
        let frame = self
            .renderer
            .render(planet, self.surface, self.rotation.angle(), rng)?;
        self.rotation.advance();
        Some(frame)
    }
}
