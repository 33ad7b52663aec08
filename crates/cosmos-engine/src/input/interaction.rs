//! Pointer interaction over the last-drawn map nodes.

use glam::Vec2;

use crate::api::types::{Cursor, GalaxyId, NodeId, SelectionEvent};
use crate::render::map::NodeLayout;
use crate::universe::model::Galaxy;

use super::hit_test::hit_test;

/// Hover state and hit geometry for one map surface.
#[derive(Debug, Clone)]
pub struct Interaction {
    nodes: Vec<NodeLayout>,
    pixel_ratio: f32,
    radius: f32,
    /// Galaxy owning the drawn systems, attached to `SelectSystem`.
    galaxy: Option<GalaxyId>,
    hovered: Option<NodeId>,
}

impl Interaction {
    pub fn new(radius: f32) -> Self {
        Self {
            nodes: Vec::new(),
            pixel_ratio: 1.0,
            radius,
            galaxy: None,
            hovered: None,
        }
    }

    /// Replace the hit geometry with the nodes of the latest redraw.
    /// A hovered node that is no longer drawn is forgotten.
    pub fn set_layout(&mut self, nodes: Vec<NodeLayout>, pixel_ratio: f32, radius: f32, galaxy: Option<GalaxyId>) {
        self.nodes = nodes;
        self.pixel_ratio = pixel_ratio;
        self.radius = radius;
        self.galaxy = galaxy;
        if let Some(hovered) = &self.hovered {
            if !self.nodes.iter().any(|n| &n.id == hovered) {
                self.hovered = None;
            }
        }
    }

    pub fn nodes(&self) -> &[NodeLayout] {
        &self.nodes
    }

    /// Resolve a click into at most one selection.
    pub fn click(&self, point: Vec2) -> Option<SelectionEvent> {
        let node = hit_test(&self.nodes, point, self.pixel_ratio, self.radius)?;
        match &node.id {
            NodeId::Planet(planet_id) => Some(SelectionEvent::SelectPlanet {
                planet_id: planet_id.clone(),
            }),
            NodeId::System(system_id) => match &self.galaxy {
                Some(galaxy_id) => Some(SelectionEvent::SelectSystem {
                    system_id: system_id.clone(),
                    galaxy_id: galaxy_id.clone(),
                }),
                None => {
                    log::warn!("system {system_id} clicked without an owning galaxy");
                    None
                }
            },
        }
    }

    /// Update the hover target. Returns true when its identity changed.
    pub fn hover(&mut self, point: Vec2) -> bool {
        let hit = hit_test(&self.nodes, point, self.pixel_ratio, self.radius).map(|n| n.id.clone());
        if hit == self.hovered {
            return false;
        }
        self.hovered = hit;
        true
    }

    /// Pointer left the surface. Returns true if something was hovered.
    pub fn leave(&mut self) -> bool {
        self.hovered.take().is_some()
    }

    pub fn hovered(&self) -> Option<&NodeId> {
        self.hovered.as_ref()
    }

    pub fn cursor(&self) -> Cursor {
        if self.hovered.is_some() {
            Cursor::Pointer
        } else {
            Cursor::Default
        }
    }

    /// Activating a galaxy entry: navigate if unlocked, otherwise warp.
    pub fn galaxy_event(galaxy: &Galaxy) -> SelectionEvent {
        let galaxy_id = galaxy.id.clone();
        if galaxy.unlocked {
            SelectionEvent::SelectGalaxy { galaxy_id }
        } else {
            SelectionEvent::InitiateWarp { galaxy_id }
        }
    }
}
