//! Interactive map canvas: planet list or system map.

use glam::Vec2;

use crate::api::types::{Cursor, NodeId, SelectionEvent};
use crate::api::view::ViewConfig;
use crate::core::rng::RandomSource;
use crate::core::surface::SurfaceSize;
use crate::input::interaction::Interaction;
use crate::render::map::{MapFrame, MapRenderer, MapScene, MapSource};

/// Owns the map surface, the hit geometry of the last redraw and a dirty
/// flag. Pointer moves only request a redraw when the hover target changes.
pub struct MapView {
    renderer: MapRenderer,
    interaction: Interaction,
    surface: Option<SurfaceSize>,
    dirty: bool,
    planet_hit_radius: f32,
    system_hit_radius: f32,
}

impl MapView {
    pub fn new(config: &ViewConfig) -> Self {
        Self {
            renderer: MapRenderer::new(config),
            interaction: Interaction::new(config.planet_hit_radius),
            surface: None,
            dirty: true,
            planet_hit_radius: config.planet_hit_radius,
            system_hit_radius: config.system_hit_radius,
        }
    }

    pub fn resize(&mut self, size: SurfaceSize) {
        log::debug!("map surface {}x{} @{}", size.width, size.height, size.pixel_ratio);
        self.surface = Some(size);
        self.dirty = true;
    }

    pub fn detach(&mut self) {
        self.surface = None;
        self.interaction.leave();
    }

    pub fn surface(&self) -> Option<SurfaceSize> {
        self.surface
    }

    /// Returns true when the hover target changed and a redraw is due.
    pub fn pointer_move(&mut self, point: Vec2) -> bool {
        let changed = self.interaction.hover(point);
        self.dirty |= changed;
        changed
    }

    pub fn pointer_leave(&mut self) -> bool {
        let changed = self.interaction.leave();
        self.dirty |= changed;
        changed
    }

    /// Resolve a click against the nodes of the last redraw.
    pub fn click(&self, point: Vec2) -> Option<SelectionEvent> {
        self.interaction.click(point)
    }

    pub fn hovered(&self) -> Option<&NodeId> {
        self.interaction.hovered()
    }

    pub fn cursor(&self) -> Cursor {
        self.interaction.cursor()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Force a redraw on the next render (selection or data changed).
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Redraw and store the new node geometry for hit testing.
    pub fn render(
        &mut self,
        source: MapSource<'_>,
        current: Option<&str>,
        rng: &mut impl RandomSource,
    ) -> Option<MapFrame> {
        let size = self.surface?;
        let hovered = self.interaction.hovered().map(|id| id.as_str().to_owned());
        let scene = MapScene {
            source,
            current,
            hovered: hovered.as_deref(),
        };
        let map = self.renderer.render(&scene, Some(size), rng)?;
        let (radius, galaxy) = match source {
            MapSource::Planets(_) => (self.planet_hit_radius, None),
            MapSource::Systems { galaxy, .. } => (self.system_hit_radius, Some(galaxy.id.clone())),
        };
        self.interaction
            .set_layout(map.nodes.clone(), size.pixel_ratio, radius, galaxy);
        self.dirty = false;
        Some(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::GalaxyId;
    use crate::core::rng::Rng;
    use crate::universe::generator::Generator;

    #[test]
    fn no_surface_no_frame() {
        let mut view = MapView::new(&ViewConfig::default());
        let mut rng = Rng::new(1);
        assert!(view.render(MapSource::Planets(&[]), None, &mut rng).is_none());
        assert!(view.is_dirty());
    }

    #[test]
    fn click_hits_last_drawn_planet() {
        let mut rng = Rng::new(6);
        let planets = Generator::new(&mut rng).planets(4);
        let mut view = MapView::new(&ViewConfig::default());
        view.resize(SurfaceSize::new(800.0, 600.0).with_pixel_ratio(2.0));
        let map = view.render(MapSource::Planets(&planets), None, &mut rng).unwrap();
        assert!(!view.is_dirty());

        let target = &map.nodes[2];
        let event = view.click(target.center).unwrap();
        let first = map
            .nodes
            .iter()
            .find(|n| n.center.distance(target.center) * 2.0 <= 20.0)
            .unwrap();
        assert_eq!(
            event,
            SelectionEvent::SelectPlanet {
                planet_id: crate::api::types::PlanetId::from(first.id.as_str())
            }
        );
    }

    #[test]
    fn hover_marks_dirty_only_on_change() {
        let mut rng = Rng::new(7);
        let universe = Generator::new(&mut rng).initial_universe();
        let galaxy = universe.galaxy(&GalaxyId::from("g1")).unwrap();
        let mut view = MapView::new(&ViewConfig::default());
        view.resize(SurfaceSize::new(800.0, 600.0));
        let source = MapSource::Systems { universe: &universe, galaxy };
        let map = view.render(source, None, &mut rng).unwrap();

        let center = map.nodes[0].center;
        assert!(view.pointer_move(center));
        assert!(view.is_dirty());
        assert_eq!(view.cursor(), Cursor::Pointer);
        view.render(source, None, &mut rng).unwrap();
        assert!(!view.pointer_move(center + Vec2::new(1.0, 0.0)));
        assert!(!view.is_dirty());
        assert!(view.pointer_leave());
        assert_eq!(view.cursor(), Cursor::Default);

        match view.click(center) {
            Some(SelectionEvent::SelectSystem { galaxy_id, .. }) => assert_eq!(galaxy_id.as_str(), "g1"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
