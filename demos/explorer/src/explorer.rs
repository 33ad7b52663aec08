/// Explorer: procedural universe browser.
///
/// Holds the canonical universe and the current galaxy/system/planet, routes
/// map clicks and host buttons into navigation, and renders whichever canvas
/// the active tab shows.

use cosmos_engine::*;
use glam::Vec2;
use serde_json::json;

// ── Custom event kinds from the host UI ─────────────────────────────

const CUSTOM_SHOW_PLANET: u32 = 1;
const CUSTOM_SHOW_SYSTEMS: u32 = 2;
const CUSTOM_SHOW_PLANETS: u32 = 3;
/// `a` = galaxy index. Locked galaxies start a warp instead.
const CUSTOM_SELECT_GALAXY: u32 = 4;
const CUSTOM_WARP_COMPLETE: u32 = 5;
const CUSTOM_WARP_CANCEL: u32 = 6;
const CUSTOM_NEW_PLANET: u32 = 7;
/// The canvas was unmounted; frames skip until the next resize.
const CUSTOM_DETACH: u32 = 8;

/// Which canvas is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Planet,
    Systems,
    Planets,
}

impl Tab {
    fn name(self) -> &'static str {
        match self {
            Tab::Planet => "planet",
            Tab::Systems => "systems",
            Tab::Planets => "planets",
        }
    }
}

/// Short message for the host to toast after a transition.
#[derive(Debug, Clone, PartialEq)]
struct Notice {
    kind: &'static str,
    message: String,
}

pub struct Explorer {
    config: ViewConfig,
    universe: Universe,
    galaxy: Option<GalaxyId>,
    system: Option<SystemKey>,
    planet: Option<PlanetId>,
    tab: Tab,
    planet_viewer: PlanetViewer,
    map: MapView,
    warp_target: Option<GalaxyId>,
    /// Id serial to continue from when scanning for new planets.
    serial: u32,
    notice: Option<Notice>,
}

impl Explorer {
    pub fn new() -> Self {
        let config = ViewConfig::default();
        Self {
            planet_viewer: PlanetViewer::new(&config),
            map: MapView::new(&config),
            config,
            universe: Universe::new(),
            galaxy: None,
            system: None,
            planet: None,
            tab: Tab::Planet,
            warp_target: None,
            serial: 0,
            notice: None,
        }
    }

    fn notify(&mut self, kind: &'static str, message: String) {
        log::debug!("{kind}: {message}");
        self.notice = Some(Notice { kind, message });
    }

    fn show(&mut self, tab: Tab) {
        if self.tab != tab {
            self.tab = tab;
            self.map.pointer_leave();
            self.map.invalidate();
        }
    }

    /// Make `key` the current system and its first planet the current planet.
    fn enter_system(&mut self, key: SystemKey) -> bool {
        let Some(system) = self.universe.system(key) else {
            return false;
        };
        let Some(galaxy) = self.universe.galaxy_of(key) else {
            return false;
        };
        self.galaxy = Some(galaxy.id.clone());
        self.planet = system.planets.first().map(|p| p.id.clone());
        self.system = Some(key);
        self.map.invalidate();
        true
    }

    /// First discovered system of a galaxy, else its first system.
    fn landing_system(&self, galaxy: &GalaxyId) -> Option<SystemKey> {
        let galaxy = self.universe.galaxy(galaxy)?;
        galaxy
            .systems
            .iter()
            .copied()
            .find(|key| self.universe.system(*key).is_some_and(|s| s.discovered))
            .or_else(|| galaxy.systems.first().copied())
    }

    /// Apply a selection. Returns true if it changed anything.
    fn select(&mut self, event: &SelectionEvent) -> bool {
        match event {
            SelectionEvent::SelectPlanet { planet_id } => {
                let Some(name) = self.universe.find_planet(planet_id).map(|p| p.name.clone()) else {
                    log::warn!("unknown planet {planet_id}");
                    return false;
                };
                let holds = |key: SystemKey| {
                    self.universe
                        .system(key)
                        .is_some_and(|s| s.planets.iter().any(|p| &p.id == planet_id))
                };
                if !self.system.is_some_and(holds) {
                    let owner = (0..self.universe.system_count()).map(SystemKey).find(|k| holds(*k));
                    if let Some(key) = owner {
                        self.enter_system(key);
                    }
                }
                self.planet = Some(planet_id.clone());
                self.show(Tab::Planet);
                self.notify("success", format!("Navigating to {name}"));
                true
            }
            SelectionEvent::SelectSystem { system_id, galaxy_id } => {
                let Some((key, _)) = self.universe.find_system(system_id) else {
                    log::warn!("unknown system {system_id} in {galaxy_id}");
                    return false;
                };
                self.universe.discover_system(key);
                self.enter_system(key);
                if let Some(system) = self.universe.system(key) {
                    let message = format!("Arrived at {}", system.name);
                    self.notify("success", message);
                }
                true
            }
            SelectionEvent::SelectGalaxy { galaxy_id } => {
                let Some(galaxy) = self.universe.galaxy(galaxy_id) else {
                    log::warn!("unknown galaxy {galaxy_id}");
                    return false;
                };
                if !galaxy.unlocked {
                    log::warn!("galaxy {galaxy_id} is locked");
                    return false;
                }
                let name = galaxy.name;
                let Some(key) = self.landing_system(galaxy_id) else {
                    return false;
                };
                self.enter_system(key);
                self.notify("success", format!("Navigated to {name} Galaxy"));
                true
            }
            SelectionEvent::InitiateWarp { galaxy_id } => {
                if self.universe.galaxy(galaxy_id).is_none() {
                    return false;
                }
                self.warp_target = Some(galaxy_id.clone());
                self.notify("info", format!("Warp drive charging for {galaxy_id}"));
                true
            }
        }
    }

    fn complete_warp(&mut self) {
        let Some(target) = self.warp_target.take() else {
            return;
        };
        self.universe.unlock_galaxy(&target);
        let first = self
            .universe
            .galaxy(&target)
            .and_then(|g| g.systems.first().copied());
        if let Some(key) = first {
            self.enter_system(key);
        }
        if let Some(galaxy) = self.universe.galaxy(&target) {
            let message = format!("Warp complete: welcome to {}", galaxy.name);
            self.notify("success", message);
        }
    }

    fn cancel_warp(&mut self) {
        if self.warp_target.take().is_some() {
            self.notify("error", "Warp drive sequence aborted".to_owned());
        }
    }

    fn scan_for_planet(&mut self, rng: &mut Rng) {
        let Some(key) = self.system else {
            return;
        };
        let mut gen = Generator::with_serial(rng, self.serial);
        let planet = gen.starter_planet();
        self.serial = gen.serial();
        let id = planet.id.clone();
        if self.universe.add_planet(key, planet) {
            self.planet = Some(id);
            self.show(Tab::Planet);
            self.map.invalidate();
            self.notify("info", "New planet discovered!".to_owned());
        }
    }

    fn custom(&mut self, ctx: &mut ViewContext, kind: u32, a: f32) {
        match kind {
            CUSTOM_SHOW_PLANET => self.show(Tab::Planet),
            CUSTOM_SHOW_SYSTEMS => self.show(Tab::Systems),
            CUSTOM_SHOW_PLANETS => self.show(Tab::Planets),
            CUSTOM_SELECT_GALAXY => {
                let event = match self.universe.galaxy_by_index(a.max(0.0) as usize) {
                    Some(galaxy) => Interaction::galaxy_event(galaxy),
                    None => return,
                };
                if self.select(&event) {
                    ctx.emit_event(event);
                }
            }
            CUSTOM_WARP_COMPLETE => self.complete_warp(),
            CUSTOM_WARP_CANCEL => self.cancel_warp(),
            CUSTOM_NEW_PLANET => self.scan_for_planet(&mut ctx.rng),
            CUSTOM_DETACH => {
                self.planet_viewer.detach();
                self.map.detach();
            }
            _ => {}
        }
    }

    fn current_planet(&self) -> Option<&Planet> {
        self.planet.as_ref().and_then(|id| self.universe.find_planet(id))
    }

    fn current_system(&self) -> Option<&StarSystem> {
        self.system.and_then(|key| self.universe.system(key))
    }
}

impl Default for Explorer {
    fn default() -> Self {
        Self::new()
    }
}

impl View for Explorer {
    fn config(&self) -> ViewConfig {
        self.config.clone()
    }

    fn init(&mut self, ctx: &mut ViewContext) {
        let mut gen = Generator::new(&mut ctx.rng);
        self.universe = gen.initial_universe();
        self.serial = gen.serial();

        let start = self
            .universe
            .galaxy_by_index(0)
            .map(|g| g.id.clone())
            .and_then(|id| self.landing_system(&id));
        if let Some(key) = start {
            self.enter_system(key);
        }
        self.tab = Tab::Planet;
    }

    fn update(&mut self, ctx: &mut ViewContext, input: &InputQueue) {
        self.notice = None;
        for event in input.iter() {
            match *event {
                InputEvent::Resize { width, height, pixel_ratio } => {
                    let size = SurfaceSize::new(width, height).with_pixel_ratio(pixel_ratio);
                    self.planet_viewer.resize(size);
                    self.map.resize(size);
                }
                InputEvent::PointerDown { x, y } if self.tab != Tab::Planet => {
                    if let Some(selection) = self.map.click(Vec2::new(x, y)) {
                        if self.select(&selection) {
                            ctx.emit_event(selection);
                        }
                    }
                }
                InputEvent::PointerMove { x, y } if self.tab != Tab::Planet => {
                    self.map.pointer_move(Vec2::new(x, y));
                }
                InputEvent::PointerLeave => {
                    self.map.pointer_leave();
                }
                InputEvent::Custom { kind, a, .. } => self.custom(ctx, kind, a),
                _ => {}
            }
        }
        ctx.cursor = match self.tab {
            Tab::Planet => Cursor::Default,
            Tab::Systems | Tab::Planets => self.map.cursor(),
        };
    }

    fn render(&mut self, ctx: &mut ViewContext) -> Option<Frame> {
        match self.tab {
            Tab::Planet => {
                let planet = self
                    .planet
                    .as_ref()
                    .and_then(|id| self.universe.find_planet(id))?;
                self.planet_viewer.frame(planet, &mut ctx.rng)
            }
            Tab::Systems => {
                if !self.map.is_dirty() {
                    return None;
                }
                let galaxy = self.galaxy.as_ref().and_then(|id| self.universe.galaxy(id))?;
                let current = self.system.and_then(|key| self.universe.system(key));
                let source = MapSource::Systems { universe: &self.universe, galaxy };
                self.map
                    .render(source, current.map(|s| s.id.as_str()), &mut ctx.rng)
                    .map(|m| m.frame)
            }
            Tab::Planets => {
                if !self.map.is_dirty() {
                    return None;
                }
                let system = self.system.and_then(|key| self.universe.system(key))?;
                let current = self.planet.as_ref().map(|id| id.as_str());
                self.map
                    .render(MapSource::Planets(&system.planets), current, &mut ctx.rng)
                    .map(|m| m.frame)
            }
        }
    }

    fn snapshot(&self) -> serde_json::Value {
        let galaxies: Vec<_> = self
            .universe
            .galaxies()
            .iter()
            .map(|g| {
                json!({
                    "id": g.id,
                    "name": g.name,
                    "unlocked": g.unlocked,
                    "systemCount": g.systems.len(),
                    "current": self.galaxy.as_ref() == Some(&g.id),
                })
            })
            .collect();
        let system = self.current_system().map(|s| {
            json!({
                "id": s.id,
                "name": s.name,
                "type": s.kind,
                "discovered": s.discovered,
                "planetCount": s.planets.len(),
            })
        });
        let notice = self
            .notice
            .as_ref()
            .map(|n| json!({ "kind": n.kind, "message": n.message }));
        json!({
            "tab": self.tab.name(),
            "galaxies": galaxies,
            "system": system,
            "planet": self.current_planet(),
            "hovered": self.map.hovered().map(NodeId::as_str),
            "warpTarget": self.warp_target,
            "notice": notice,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> (Explorer, ViewContext) {
        let mut ctx = ViewContext::new(2024);
        let mut explorer = Explorer::new();
        explorer.init(&mut ctx);
        (explorer, ctx)
    }

    fn send(explorer: &mut Explorer, ctx: &mut ViewContext, events: &[InputEvent]) {
        let mut input = InputQueue::new();
        for e in events {
            input.push(*e);
        }
        ctx.clear_frame_data();
        explorer.update(ctx, &input);
    }

    fn custom(kind: u32, a: f32) -> InputEvent {
        InputEvent::Custom { kind, a, b: 0.0, c: 0.0 }
    }

    const RESIZE: InputEvent = InputEvent::Resize { width: 800.0, height: 600.0, pixel_ratio: 1.0 };

    #[test]
    fn starts_in_first_galaxy_on_a_planet() {
        let (explorer, _) = started();
        let g1 = explorer.universe.galaxy_by_index(0).unwrap();
        assert_eq!(explorer.galaxy.as_ref(), Some(&g1.id));
        let system = explorer.current_system().unwrap();
        assert!(g1.systems.contains(&explorer.system.unwrap()));
        let first_discovered = explorer.universe.systems_in(g1).find(|s| s.discovered);
        if let Some(expected) = first_discovered {
            assert_eq!(system.id, expected.id);
        }
        assert_eq!(explorer.current_planet().unwrap().id, system.planets[0].id);
        assert_eq!(explorer.tab, Tab::Planet);
    }

    #[test]
    fn planet_tab_skips_until_resized() {
        let (mut explorer, mut ctx) = started();
        assert!(explorer.render(&mut ctx).is_none());
        send(&mut explorer, &mut ctx, &[RESIZE]);
        assert!(explorer.render(&mut ctx).is_some());
    }

    #[test]
    fn system_map_redraws_only_when_dirty() {
        let (mut explorer, mut ctx) = started();
        send(&mut explorer, &mut ctx, &[RESIZE, custom(CUSTOM_SHOW_SYSTEMS, 0.0)]);
        assert!(explorer.render(&mut ctx).is_some());
        assert!(explorer.render(&mut ctx).is_none());
        send(&mut explorer, &mut ctx, &[InputEvent::PointerMove { x: -500.0, y: -500.0 }]);
        assert!(explorer.render(&mut ctx).is_none());
    }

    #[test]
    fn clicking_a_system_discovers_and_enters_it() {
        let (mut explorer, mut ctx) = started();
        send(&mut explorer, &mut ctx, &[RESIZE, custom(CUSTOM_SHOW_SYSTEMS, 0.0)]);
        explorer.render(&mut ctx).unwrap();

        let galaxy = explorer.universe.galaxy_by_index(0).unwrap().clone();
        let last_key = *galaxy.systems.last().unwrap();
        let target = explorer.universe.system(last_key).unwrap().clone();
        let center = MapRenderer::new(&explorer.config)
            .layout(
                &MapScene {
                    source: MapSource::Systems { universe: &explorer.universe, galaxy: &galaxy },
                    current: None,
                    hovered: None,
                },
                &SurfaceSize::new(800.0, 600.0),
            )
            .nodes
            .iter()
            .find(|n| n.id.as_str() == target.id.as_str())
            .unwrap()
            .center;
        // An earlier node may overlap; whichever is hit first gets entered.
        send(&mut explorer, &mut ctx, &[InputEvent::PointerDown { x: center.x, y: center.y }]);
        assert_eq!(ctx.events.len(), 1);
        let SelectionEvent::SelectSystem { system_id, galaxy_id } = &ctx.events[0] else {
            panic!("expected system selection");
        };
        assert_eq!(galaxy_id, &galaxy.id);
        let (key, system) = explorer.universe.find_system(system_id).unwrap();
        assert!(system.discovered);
        assert_eq!(explorer.system, Some(key));
        assert_eq!(explorer.current_planet().unwrap().id, system.planets[0].id);
    }

    #[test]
    fn locked_galaxy_warps_then_unlocks() {
        let (mut explorer, mut ctx) = started();
        send(&mut explorer, &mut ctx, &[custom(CUSTOM_SELECT_GALAXY, 2.0)]);
        assert_eq!(
            ctx.events,
            vec![SelectionEvent::InitiateWarp { galaxy_id: GalaxyId::from("g3") }]
        );
        assert_eq!(explorer.warp_target, Some(GalaxyId::from("g3")));

        send(&mut explorer, &mut ctx, &[custom(CUSTOM_WARP_COMPLETE, 0.0)]);
        let g3 = explorer.universe.galaxy(&GalaxyId::from("g3")).unwrap();
        assert!(g3.unlocked);
        assert_eq!(explorer.system, g3.systems.first().copied());
        assert_eq!(explorer.galaxy, Some(GalaxyId::from("g3")));
        assert!(explorer.warp_target.is_none());

        send(&mut explorer, &mut ctx, &[custom(CUSTOM_SELECT_GALAXY, 2.0)]);
        assert_eq!(
            ctx.events,
            vec![SelectionEvent::SelectGalaxy { galaxy_id: GalaxyId::from("g3") }]
        );
    }

    #[test]
    fn cancelled_warp_leaves_galaxy_locked() {
        let (mut explorer, mut ctx) = started();
        send(&mut explorer, &mut ctx, &[custom(CUSTOM_SELECT_GALAXY, 4.0), custom(CUSTOM_WARP_CANCEL, 0.0)]);
        assert!(!explorer.universe.galaxy(&GalaxyId::from("g5")).unwrap().unlocked);
        assert_eq!(explorer.notice.as_ref().map(|n| n.kind), Some("error"));
    }

    #[test]
    fn scanning_adds_a_lush_planet_to_current_system() {
        let (mut explorer, mut ctx) = started();
        let before = explorer.current_system().unwrap().planets.len();
        send(&mut explorer, &mut ctx, &[custom(CUSTOM_SHOW_PLANETS, 0.0), custom(CUSTOM_NEW_PLANET, 0.0)]);
        let system = explorer.current_system().unwrap();
        assert_eq!(system.planets.len(), before + 1);
        let planet = explorer.current_planet().unwrap();
        assert_eq!(planet.kind, PlanetKind::Lush);
        assert_eq!(planet.name, "Alixia Prime");
        assert_eq!(explorer.tab, Tab::Planet);
    }

    #[test]
    fn snapshot_reports_navigation_state() {
        let (mut explorer, mut ctx) = started();
        send(&mut explorer, &mut ctx, &[custom(CUSTOM_SHOW_SYSTEMS, 0.0)]);
        let snap = explorer.snapshot();
        assert_eq!(snap["tab"], "systems");
        assert_eq!(snap["galaxies"].as_array().unwrap().len(), 5);
        assert_eq!(snap["galaxies"][0]["current"], true);
        assert_eq!(snap["galaxies"][0]["name"], "Euclid");
        assert!(snap["planet"]["mainColor"].is_string());
        assert!(snap["warpTarget"].is_null());
    }
}
