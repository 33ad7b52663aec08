use std::fmt;

use serde::Serialize;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Stable planet identifier, unique within a universe.
    PlanetId
);
string_id!(
    /// Stable star system identifier.
    SystemId
);
string_id!(
    /// Galaxy identifier (`g1`..`g5` for a generated universe).
    GalaxyId
);

/// Something drawn on a map that the pointer can hit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeId {
    Planet(PlanetId),
    System(SystemId),
}

impl NodeId {
    pub fn as_str(&self) -> &str {
        match self {
            NodeId::Planet(id) => id.as_str(),
            NodeId::System(id) => id.as_str(),
        }
    }
}

/// Selection raised by the interaction layer, at most one per click.
/// Forwarded to the host as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SelectionEvent {
    #[serde(rename_all = "camelCase")]
    SelectPlanet { planet_id: PlanetId },
    #[serde(rename_all = "camelCase")]
    SelectSystem { system_id: SystemId, galaxy_id: GalaxyId },
    #[serde(rename_all = "camelCase")]
    SelectGalaxy { galaxy_id: GalaxyId },
    #[serde(rename_all = "camelCase")]
    InitiateWarp { galaxy_id: GalaxyId },
}

/// Pointer affordance the host should show over a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
}

impl Cursor {
    /// CSS `cursor` value.
    pub fn css(self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Pointer => "pointer",
        }
    }
}
