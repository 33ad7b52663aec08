use serde::{Deserialize, Serialize};

use crate::api::types::{Cursor, SelectionEvent};
use crate::core::rng::Rng;
use crate::draw::frame::Frame;
use crate::input::queue::InputQueue;

/// Tunables shared by the renderers and view components.
/// Every field has a default, so a host may send a partial JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Stars scattered behind the planet each frame (default: 30).
    pub planet_stars: usize,
    /// Stars scattered across the map each redraw (default: 100).
    pub map_stars: usize,
    /// Soft nebula blobs on the map (default: 3).
    pub nebulae: usize,
    /// Radians the planet turns per animation frame (default: 0.001).
    pub rotation_step: f32,
    /// Planet radius as a fraction of the surface's shorter side (default: 0.35).
    pub planet_radius_factor: f32,
    /// Inset for id-derived planet positions (default: 80px).
    pub planet_map_margin: f32,
    /// Inset for stored system positions (default: 60px).
    pub system_map_margin: f32,
    /// Pointer detection radius on the planet list map (default: 20px).
    pub planet_hit_radius: f32,
    /// Pointer detection radius on the system map (default: 30px).
    pub system_hit_radius: f32,
    /// Label font size in layout pixels (default: 12).
    pub label_font_size: f32,
    /// Average glyph advance as a fraction of the font size, used to size
    /// label backdrops. Hosts can send a value measured from their font (default: 0.55).
    pub label_advance: f32,
    /// Outbound links per discovered system (default: 2).
    pub neighbor_links: usize,
    /// Maximum number of tessellated vertices per frame (default: 65536).
    pub max_vector_vertices: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            planet_stars: 30,
            map_stars: 100,
            nebulae: 3,
            rotation_step: 0.001,
            planet_radius_factor: 0.35,
            planet_map_margin: 80.0,
            system_map_margin: 60.0,
            planet_hit_radius: 20.0,
            system_hit_radius: 30.0,
            label_font_size: 12.0,
            label_advance: 0.55,
            neighbor_links: 2,
            max_vector_vertices: 65536,
        }
    }
}

impl ViewConfig {
    /// Parse a config from a JSON string. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The contract a concrete front-end view fulfils for the web runner.
pub trait View {
    /// Return view configuration. Called once before init.
    fn config(&self) -> ViewConfig {
        ViewConfig::default()
    }

    /// Build initial state (generate the universe, pick the start planet).
    fn init(&mut self, ctx: &mut ViewContext);

    /// Handle this tick's pointer, resize and host events.
    fn update(&mut self, ctx: &mut ViewContext, input: &InputQueue);

    /// Produce this tick's frame. `None` skips the frame.
    fn render(&mut self, ctx: &mut ViewContext) -> Option<Frame>;

    /// JSON snapshot of view state for the host UI.
    fn snapshot(&self) -> serde_json::Value {
        serde_json::Value::Null
    }
}

/// Mutable per-session state handed to every `View` callback.
pub struct ViewContext {
    pub rng: Rng,
    pub events: Vec<SelectionEvent>,
    pub cursor: Cursor,
}

impl ViewContext {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Rng::new(seed),
            events: Vec::new(),
            cursor: Cursor::Default,
        }
    }

    /// Emit a selection event to be forwarded to the host.
    pub fn emit_event(&mut self, event: SelectionEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::GalaxyId;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ViewConfig::from_json(r#"{ "map_stars": 40, "system_hit_radius": 24.0 }"#).unwrap();
        assert_eq!(config.map_stars, 40);
        assert_eq!(config.system_hit_radius, 24.0);
        assert_eq!(config.planet_stars, 30);
        assert_eq!(config.planet_map_margin, 80.0);
        assert_eq!(config.label_advance, 0.55);
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(ViewConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn frame_data_is_cleared() {
        let mut ctx = ViewContext::new(1);
        ctx.emit_event(SelectionEvent::SelectGalaxy { galaxy_id: GalaxyId::from("g2") });
        assert_eq!(ctx.events.len(), 1);
        ctx.clear_frame_data();
        assert!(ctx.events.is_empty());
    }
}
