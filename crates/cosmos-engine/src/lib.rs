pub mod api;
pub mod core;
pub mod draw;
pub mod input;
pub mod layout;
pub mod render;
pub mod universe;
pub mod views;

// Re-export key types at crate root for convenience
pub use api::types::{Cursor, GalaxyId, NodeId, PlanetId, SelectionEvent, SystemId};
pub use api::view::{View, ViewConfig, ViewContext};
pub use core::rng::{RandomSource, Rng, SequenceRng};
pub use core::rotation::Rotation;
pub use core::surface::SurfaceSize;
pub use draw::{Color, DrawCommand, Frame, GradientStop, Paint};
pub use input::interaction::Interaction;
pub use input::queue::{InputEvent, InputQueue};
pub use render::map::{MapFrame, MapLayout, MapRenderer, MapScene, MapSource, NodeLayout};
pub use render::planet::{PlanetRenderer, PlanetStyle};
pub use universe::generator::Generator;
pub use universe::model::{
    Atmosphere, Fauna, Flora, Galaxy, GalaxyName, Planet, PlanetKind, Rarity, Resource,
    StarKind, StarSystem, SystemKey, Temperature, Universe,
};
pub use views::map_view::MapView;
pub use views::planet_viewer::PlanetViewer;

#[cfg(feature = "vectors")]
pub use draw::{Tessellator, VectorVertex};
