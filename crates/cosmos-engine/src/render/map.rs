//! Galaxy and system map renderer.
//!
//! Two modes share one pipeline: a flat planet list laid out from id digests
//! and joined by a polyline, or a galaxy's systems placed at their stored
//! percentage positions and joined to their nearest discovered neighbours.
//! Node positions are recomputed from the surface size on every call.

use glam::Vec2;

use crate::api::types::NodeId;
use crate::api::view::ViewConfig;
use crate::core::rng::RandomSource;
use crate::core::surface::SurfaceSize;
use crate::draw::color::Color;
use crate::draw::frame::{Frame, Paint};
use crate::layout;
use crate::universe::model::{Galaxy, Planet, StarSystem, Universe};

use super::label::{self, ApproxMetrics};
use super::starfield::{self, MAP_BACKGROUND, MAP_STARS};

/// Node colour for systems not yet discovered.
pub const UNDISCOVERED: Color = Color::new(0x6b as f32 / 255.0, 0x72 as f32 / 255.0, 0x80 as f32 / 255.0, 1.0);
pub const UNKNOWN_SYSTEM: &str = "Unknown System";

const GLOW_ALPHA: f32 = 0x40 as f32 / 255.0;
const PATH_COLOR: Color = Color::new(1.0, 1.0, 1.0, 0.1);
const LINK_COLOR: Color = Color::new(1.0, 1.0, 1.0, 0.15);
const LABEL_GAP: f32 = 20.0;

/// What the map shows.
#[derive(Debug, Clone, Copy)]
pub enum MapSource<'a> {
    Planets(&'a [Planet]),
    Systems {
        universe: &'a Universe,
        galaxy: &'a Galaxy,
    },
}

/// Everything a redraw depends on besides the surface and the dice.
#[derive(Debug, Clone, Copy)]
pub struct MapScene<'a> {
    pub source: MapSource<'a>,
    pub current: Option<&'a str>,
    pub hovered: Option<&'a str>,
}

/// A node as last drawn: identity, centre and core radius in layout pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeLayout {
    pub id: NodeId,
    pub center: Vec2,
    pub radius: f32,
}

/// A rendered map plus the geometry the interaction layer hit-tests against.
#[derive(Debug, Clone, PartialEq)]
pub struct MapFrame {
    pub frame: Frame,
    pub nodes: Vec<NodeLayout>,
    /// Directed links as indices into `nodes`.
    pub links: Vec<(usize, usize)>,
}

/// Deterministic part of a map: where nodes go and how they connect.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapLayout {
    pub nodes: Vec<NodeLayout>,
    pub links: Vec<(usize, usize)>,
}

pub struct MapRenderer {
    stars: usize,
    nebulae: usize,
    planet_margin: f32,
    system_margin: f32,
    font_size: f32,
    neighbor_links: usize,
    metrics: ApproxMetrics,
}

impl MapRenderer {
    pub fn new(config: &ViewConfig) -> Self {
        Self {
            stars: config.map_stars,
            nebulae: config.nebulae,
            planet_margin: config.planet_map_margin,
            system_margin: config.system_map_margin,
            font_size: config.label_font_size,
            neighbor_links: config.neighbor_links,
            metrics: ApproxMetrics { advance: config.label_advance },
        }
    }

    /// Node positions and topology for `scene` on a surface of `size`.
    pub fn layout(&self, scene: &MapScene<'_>, size: &SurfaceSize) -> MapLayout {
        match scene.source {
            MapSource::Planets(planets) => {
                let nodes: Vec<NodeLayout> = planets
                    .iter()
                    .map(|p| NodeLayout {
                        id: NodeId::Planet(p.id.clone()),
                        center: layout::position(
                            p.id.as_str(),
                            size.width,
                            size.height,
                            self.planet_margin,
                        ),
                        radius: planet_core(is(scene.current, p.id.as_str())),
                    })
                    .collect();
                let links = (1..nodes.len()).map(|i| (i - 1, i)).collect();
                MapLayout { nodes, links }
            }
            MapSource::Systems { universe, galaxy } => {
                let systems = drawable_systems(universe, galaxy);
                let nodes: Vec<NodeLayout> = systems
                    .iter()
                    .map(|s| NodeLayout {
                        id: NodeId::System(s.id.clone()),
                        center: layout::scale_percent(
                            s.position,
                            size.width,
                            size.height,
                            self.system_margin,
                        ),
                        radius: system_core(
                            is(scene.current, s.id.as_str()),
                            is(scene.hovered, s.id.as_str()),
                        ),
                    })
                    .collect();

                let discovered: Vec<usize> = (0..systems.len()).filter(|&i| systems[i].discovered).collect();
                let points: Vec<Vec2> = discovered.iter().map(|&i| systems[i].position).collect();
                let links = layout::nearest_links(&points, self.neighbor_links)
                    .into_iter()
                    .map(|(a, b)| (discovered[a], discovered[b]))
                    .collect();
                MapLayout { nodes, links }
            }
        }
    }

    /// Compose one map frame. A missing or zero-area surface yields `None`.
    pub fn render(
        &self,
        scene: &MapScene<'_>,
        surface: Option<SurfaceSize>,
        rng: &mut impl RandomSource,
    ) -> Option<MapFrame> {
        let size = surface.filter(SurfaceSize::is_drawable)?;
        let mut frame = Frame::new(size);
        starfield::fill_background(&mut frame, MAP_BACKGROUND);
        starfield::scatter_stars(&mut frame, rng, self.stars, MAP_STARS);
        starfield::scatter_nebulae(&mut frame, rng, self.nebulae);

        let MapLayout { nodes, links } = self.layout(scene, &size);
        match scene.source {
            MapSource::Planets(planets) => self.draw_planets(&mut frame, scene, planets, &nodes),
            MapSource::Systems { universe, galaxy } => {
                let systems = drawable_systems(universe, galaxy);
                self.draw_systems(&mut frame, scene, &systems, &nodes, &links)
            }
        }
        Some(MapFrame { frame, nodes, links })
    }

    fn draw_planets(&self, frame: &mut Frame, scene: &MapScene<'_>, planets: &[Planet], nodes: &[NodeLayout]) {
        frame.stroke_polyline(nodes.iter().map(|n| n.center).collect(), 1.0, PATH_COLOR);

        for (planet, node) in planets.iter().zip(nodes) {
            let current = is(scene.current, planet.id.as_str());
            let c = node.center;
            let glow = node.radius + if current { 4.0 } else { 3.0 };
            frame.fill_circle(c, glow, Paint::solid(planet.main_color.with_alpha(GLOW_ALPHA)));
            let core = if current { Color::WHITE } else { planet.main_color };
            frame.fill_circle(c, node.radius, Paint::solid(core));
            if current {
                frame.stroke_circle(c, node.radius + 2.0, 1.0, Color::WHITE);
                frame.fill_polygon(
                    vec![
                        Vec2::new(c.x, c.y - 24.0),
                        Vec2::new(c.x + 5.0, c.y - 16.0),
                        Vec2::new(c.x - 5.0, c.y - 16.0),
                    ],
                    Color::WHITE,
                );
            }
            let lines = [
                (planet.name.clone(), Color::WHITE),
                (planet.kind.name().to_owned(), planet.main_color),
            ];
            label::draw_label(frame, &self.metrics, c + Vec2::new(0.0, LABEL_GAP), &lines, self.font_size);
        }
    }

    fn draw_systems(
        &self,
        frame: &mut Frame,
        scene: &MapScene<'_>,
        systems: &[&StarSystem],
        nodes: &[NodeLayout],
        links: &[(usize, usize)],
    ) {
        for &(a, b) in links {
            frame.stroke_polyline(vec![nodes[a].center, nodes[b].center], 1.0, LINK_COLOR);
        }

        for (system, node) in systems.iter().zip(nodes) {
            let current = is(scene.current, system.id.as_str());
            let hovered = is(scene.hovered, system.id.as_str());
            let color = system_color(system);
            let c = node.center;
            frame.fill_circle(c, node.radius + 6.0, Paint::solid(color.with_alpha(GLOW_ALPHA)));
            frame.fill_circle(c, node.radius, Paint::solid(color));
            if current {
                frame.stroke_circle(c, node.radius + 4.0, 1.5, color);
            }
            if current || hovered {
                let lines = system_label(system);
                label::draw_label(
                    frame,
                    &self.metrics,
                    c + Vec2::new(0.0, node.radius + LABEL_GAP),
                    &lines,
                    self.font_size,
                );
            }
        }
    }
}

fn is(selected: Option<&str>, id: &str) -> bool {
    selected == Some(id)
}

fn planet_core(current: bool) -> f32 {
    if current {
        8.0
    } else {
        5.0
    }
}

fn system_core(current: bool, hovered: bool) -> f32 {
    match (current, hovered) {
        (true, _) => 6.0,
        (false, true) => 5.0,
        (false, false) => 4.0,
    }
}

/// Star colour for discovered systems, muted grey otherwise.
pub fn system_color(system: &StarSystem) -> Color {
    if system.discovered {
        system.kind.color()
    } else {
        UNDISCOVERED
    }
}

/// Label lines for a system node.
pub fn system_label(system: &StarSystem) -> Vec<(String, Color)> {
    if !system.discovered {
        return vec![(UNKNOWN_SYSTEM.to_owned(), UNDISCOVERED)];
    }
    let count = system.planets.len();
    let noun = if count == 1 { "planet" } else { "planets" };
    vec![
        (system.name.clone(), Color::WHITE),
        (format!("{} · {} {}", system.kind, count, noun), system.kind.color()),
    ]
}

/// Systems of `galaxy` that can be drawn. Systems without planets break the
/// data model and are skipped.
fn drawable_systems<'a>(universe: &'a Universe, galaxy: &'a Galaxy) -> Vec<&'a StarSystem> {
    universe
        .systems_in(galaxy)
        .filter(|s| {
            if s.planets.is_empty() {
                log::warn!("skipping system {} with no planets", s.id);
                false
            } else {
                true
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::GalaxyId;
    use crate::core::rng::{Rng, SequenceRng};
    use crate::draw::frame::DrawCommand;
    use crate::universe::generator::Generator;
    use crate::universe::model::{GalaxyDraft, GalaxyName};

    const SIZE: SurfaceSize = SurfaceSize { width: 800.0, height: 600.0, pixel_ratio: 1.0 };

    fn background_len() -> usize {
        let c = ViewConfig::default();
        1 + c.map_stars + c.nebulae
    }

    fn universe(discovered: &[bool]) -> Universe {
        let mut rng = Rng::new(31);
        let mut gen = Generator::new(&mut rng);
        let systems = discovered
            .iter()
            .map(|&d| {
                let mut s = gen.star_system();
                s.discovered = d;
                s
            })
            .collect();
        let mut u = Universe::new();
        u.insert_galaxy(GalaxyDraft {
            id: GalaxyId::from("g1"),
            name: GalaxyName::Euclid,
            systems,
            unlocked: true,
        });
        u
    }

    #[test]
    fn discovered_systems_link_to_two_neighbours() {
        let u = universe(&[true, false, true, true, true, false, true]);
        let galaxy = &u.galaxies()[0];
        let scene = MapScene { source: MapSource::Systems { universe: &u, galaxy }, current: None, hovered: None };
        let layout = MapRenderer::new(&ViewConfig::default()).layout(&scene, &SIZE);
        assert_eq!(layout.links.len(), 5 * 2);
        for i in [0, 2, 3, 4, 6] {
            assert_eq!(layout.links.iter().filter(|(a, _)| *a == i).count(), 2);
        }
        assert!(layout.links.iter().all(|(a, b)| ![1, 5].contains(a) && ![1, 5].contains(b)));
    }

    #[test]
    fn redraw_layout_is_idempotent() {
        let u = universe(&[true, true, false, true]);
        let galaxy = &u.galaxies()[0];
        let current = u.system(galaxy.systems[0]).map(|s| s.id.as_str());
        let scene = MapScene { source: MapSource::Systems { universe: &u, galaxy }, current, hovered: None };
        let renderer = MapRenderer::new(&ViewConfig::default());
        let mut rng = SequenceRng::new(vec![0.1, 0.7, 0.4]);
        let a = renderer.render(&scene, Some(SIZE), &mut rng).unwrap();
        let mut other = Rng::new(5);
        let b = renderer.render(&scene, Some(SIZE), &mut other).unwrap();
        assert_eq!(a.nodes, b.nodes);
        assert_eq!(a.links, b.links);
        assert_eq!(a.frame.texts(), b.frame.texts());
    }

    #[test]
    fn empty_planet_list_renders_background_only() {
        let scene = MapScene { source: MapSource::Planets(&[]), current: None, hovered: None };
        let mut rng = Rng::new(1);
        let map = MapRenderer::new(&ViewConfig::default()).render(&scene, Some(SIZE), &mut rng).unwrap();
        assert!(map.nodes.is_empty());
        assert_eq!(map.frame.len(), background_len());
    }

    #[test]
    fn planetless_systems_are_skipped() {
        let mut u = universe(&[true, true]);
        let galaxy_id = u.galaxies()[0].id.clone();
        let mut draft_rng = Rng::new(2);
        let mut broken = Generator::new(&mut draft_rng).star_system();
        broken.planets.clear();
        u.insert_galaxy(GalaxyDraft { id: GalaxyId::from("g9"), name: GalaxyName::Hyades, systems: vec![broken], unlocked: false });
        let renderer = MapRenderer::new(&ViewConfig::default());
        let mut rng = Rng::new(3);

        let g9 = u.galaxy(&GalaxyId::from("g9")).unwrap();
        let scene = MapScene { source: MapSource::Systems { universe: &u, galaxy: g9 }, current: None, hovered: None };
        let map = renderer.render(&scene, Some(SIZE), &mut rng).unwrap();
        assert!(map.nodes.is_empty());
        assert_eq!(map.frame.len(), background_len());

        let g1 = u.galaxy(&galaxy_id).unwrap();
        let scene = MapScene { source: MapSource::Systems { universe: &u, galaxy: g1 }, current: None, hovered: None };
        assert_eq!(renderer.layout(&scene, &SIZE).nodes.len(), 2);
    }

    #[test]
    fn planet_list_uses_digest_positions() {
        let mut rng = Rng::new(8);
        let planets = Generator::new(&mut rng).planets(3);
        let scene = MapScene { source: MapSource::Planets(&planets), current: Some(planets[1].id.as_str()), hovered: None };
        let renderer = MapRenderer::new(&ViewConfig::default());
        let map = renderer.render(&scene, Some(SIZE), &mut rng).unwrap();
        assert_eq!(map.links, vec![(0, 1), (1, 2)]);
        for (p, n) in planets.iter().zip(&map.nodes) {
            assert_eq!(n.center, layout::position(p.id.as_str(), 800.0, 600.0, 80.0));
        }
        assert_eq!(map.nodes[1].radius, 8.0);
        assert_eq!(map.nodes[0].radius, 5.0);
        // Every planet is labelled with its name and kind.
        assert_eq!(map.frame.texts().len(), 6);
        let pennants = map.frame.iter().filter(|c| matches!(c, DrawCommand::FillPolygon { .. })).count();
        assert_eq!(pennants, 1);
    }

    #[test]
    fn system_labels_only_for_current_or_hovered() {
        let u = universe(&[true, false, true]);
        let galaxy = &u.galaxies()[0];
        let ids: Vec<_> = u.systems_in(galaxy).map(|s| s.id.as_str().to_owned()).collect();
        let renderer = MapRenderer::new(&ViewConfig::default());
        let mut rng = Rng::new(4);

        let none = MapScene { source: MapSource::Systems { universe: &u, galaxy }, current: None, hovered: None };
        assert!(renderer.render(&none, Some(SIZE), &mut rng).unwrap().frame.texts().is_empty());

        let scene = MapScene {
            source: MapSource::Systems { universe: &u, galaxy },
            current: Some(&ids[0]),
            hovered: Some(&ids[1]),
        };
        let map = renderer.render(&scene, Some(SIZE), &mut rng).unwrap();
        let texts: Vec<String> = map
            .frame
            .texts()
            .into_iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(texts.len(), 3);
        assert!(texts.contains(&UNKNOWN_SYSTEM.to_owned()));
        assert!(texts.iter().any(|t| t.contains(" · ")));
    }

    #[test]
    fn system_nodes_grow_with_selection() {
        let u = universe(&[true, true, true]);
        let galaxy = &u.galaxies()[0];
        let ids: Vec<_> = u.systems_in(galaxy).map(|s| s.id.as_str().to_owned()).collect();
        let scene = MapScene {
            source: MapSource::Systems { universe: &u, galaxy },
            current: Some(&ids[0]),
            hovered: Some(&ids[1]),
        };
        let mut rng = Rng::new(6);
        let map = MapRenderer::new(&ViewConfig::default()).render(&scene, Some(SIZE), &mut rng).unwrap();
        let radii: Vec<f32> = map.nodes.iter().map(|n| n.radius).collect();
        assert_eq!(radii, vec![6.0, 5.0, 4.0]);

        // Only the current system gets an outline, four pixels past its core.
        let outlines: Vec<_> = map
            .frame
            .iter()
            .filter_map(|c| match *c {
                DrawCommand::StrokeCircle { center, radius, width, color } => Some((center, radius, width, color)),
                _ => None,
            })
            .collect();
        let current = u.systems_in(galaxy).next().unwrap();
        assert_eq!(outlines, vec![(map.nodes[0].center, 10.0, 1.5, system_color(current))]);
    }

    #[test]
    fn label_backdrop_follows_configured_advance() {
        let mut rng = Rng::new(8);
        let planets = Generator::new(&mut rng).planets(1);
        let scene = MapScene { source: MapSource::Planets(&planets), current: None, hovered: None };
        let backdrop_width = |config: &ViewConfig| {
            let mut rng = Rng::new(2);
            let map = MapRenderer::new(config).render(&scene, Some(SIZE), &mut rng).unwrap();
            let width = map.frame
                .iter()
                .skip(1)
                .find_map(|c| match c {
                    DrawCommand::FillRect { size, .. } => Some(size.x),
                    _ => None,
                })
                .unwrap();
            width
        };
        let narrow = backdrop_width(&ViewConfig::default());
        let wide = backdrop_width(&ViewConfig { label_advance: 1.1, ..ViewConfig::default() });
        // Padding is fixed, so the text part doubles.
        assert!(((wide - 8.0) - 2.0 * (narrow - 8.0)).abs() < 1e-3);
    }

    #[test]
    fn undiscovered_systems_are_grey() {
        let u = universe(&[false]);
        let s = u.systems_in(&u.galaxies()[0]).next().unwrap();
        assert_eq!(system_color(s), UNDISCOVERED);
        assert_eq!(system_label(s), vec![(UNKNOWN_SYSTEM.to_owned(), UNDISCOVERED)]);
    }

    #[test]
    fn missing_surface_skips_map() {
        let scene = MapScene { source: MapSource::Planets(&[]), current: None, hovered: None };
        let mut rng = Rng::new(1);
        assert!(MapRenderer::new(&ViewConfig::default()).render(&scene, None, &mut rng).is_none());
    }
}
