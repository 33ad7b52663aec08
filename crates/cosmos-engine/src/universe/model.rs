//! Universe entities.
//!
//! Planets are immutable value data. Star systems live in one arena owned by
//! [`Universe`]; galaxies refer to them by [`SystemKey`], so flipping a
//! system's `discovered` flag is an indexed update instead of a tree rebuild.

use std::fmt;
use std::ops::RangeInclusive;

use glam::Vec2;
use serde::{Serialize, Serializer};

use crate::api::types::{GalaxyId, PlanetId, SystemId};
use crate::draw::color::Color;

/// Planet classification. Drives palette, surface features, atmosphere,
/// rings and whether life is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlanetKind {
    Lush,
    Desert,
    Toxic,
    Irradiated,
    Frozen,
    Barren,
    Exotic,
    Ocean,
    Volcanic,
}

impl PlanetKind {
    pub const ALL: [PlanetKind; 9] = [
        Self::Lush, Self::Desert, Self::Toxic, Self::Irradiated, Self::Frozen,
        Self::Barren, Self::Exotic, Self::Ocean, Self::Volcanic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Lush => "Lush",
            Self::Desert => "Desert",
            Self::Toxic => "Toxic",
            Self::Irradiated => "Irradiated",
            Self::Frozen => "Frozen",
            Self::Barren => "Barren",
            Self::Exotic => "Exotic",
            Self::Ocean => "Ocean",
            Self::Volcanic => "Volcanic",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Lush => "A vibrant world teeming with life and abundant resources.",
            Self::Desert => "An arid planet with vast expanses of sand and minimal vegetation.",
            Self::Toxic => "A hazardous world with poisonous atmosphere and dangerous flora.",
            Self::Irradiated => "A radiation-soaked planet with unique mutated lifeforms.",
            Self::Frozen => "A frigid world covered in ice and snow with rare crystalline formations.",
            Self::Barren => "A lifeless rock with minimal atmosphere but potential mineral wealth.",
            Self::Exotic => "A strange anomalous planet defying conventional classification.",
            Self::Ocean => "A world covered almost entirely by vast seas and scattered islands.",
            Self::Volcanic => "An unstable planet with active volcanoes and rivers of magma.",
        }
    }

    /// Main and secondary surface colors.
    pub fn palette(self) -> (Color, Color) {
        let (main, secondary) = match self {
            Self::Lush => (0x4ade80, 0x22c55e),
            Self::Desert => (0xfbbf24, 0xf59e0b),
            Self::Toxic => (0x84cc16, 0x65a30d),
            Self::Irradiated => (0xfb923c, 0xf97316),
            Self::Frozen => (0x93c5fd, 0x60a5fa),
            Self::Barren => (0xa8a29e, 0x78716c),
            Self::Exotic => (0xc084fc, 0xa855f7),
            Self::Ocean => (0x38bdf8, 0x0ea5e9),
            Self::Volcanic => (0xf87171, 0xef4444),
        };
        (Color::from_rgb_u32(main), Color::from_rgb_u32(secondary))
    }

    /// Surface temperature range in °C.
    pub fn temperature_range(self) -> RangeInclusive<i32> {
        match self {
            Self::Frozen => -200..=-101,
            Self::Lush => 15..=29,
            Self::Desert | Self::Volcanic => 40..=139,
            _ => -20..=59,
        }
    }

    /// Barren worlds carry no flora, fauna or atmosphere.
    pub fn supports_life(self) -> bool {
        self != Self::Barren
    }
}

impl fmt::Display for PlanetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    #[serde(rename = "Ultra-rare")]
    UltraRare,
}

impl Rarity {
    pub const ALL: [Rarity; 4] = [Self::Common, Self::Uncommon, Self::Rare, Self::UltraRare];

    pub fn icon(self) -> &'static str {
        match self {
            Self::Common => "🔹",
            Self::Uncommon => "🔸",
            Self::Rare => "💎",
            Self::UltraRare => "✨",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource {
    pub name: String,
    pub rarity: Rarity,
    pub icon: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FloraPrevalence {
    Abundant,
    Common,
    Infrequent,
    Sparse,
    None,
}

impl FloraPrevalence {
    pub const ALL: [FloraPrevalence; 5] = [
        Self::Abundant, Self::Common, Self::Infrequent, Self::Sparse, Self::None,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Temperament {
    Docile,
    Skittish,
    Defensive,
    Aggressive,
    None,
}

impl Temperament {
    pub const ALL: [Temperament; 5] = [
        Self::Docile, Self::Skittish, Self::Defensive, Self::Aggressive, Self::None,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FaunaPrevalence {
    Flourishing,
    Ample,
    Irregular,
    Limited,
    None,
}

impl FaunaPrevalence {
    pub const ALL: [FaunaPrevalence; 5] = [
        Self::Flourishing, Self::Ample, Self::Irregular, Self::Limited, Self::None,
    ];
}

/// Sentinel used for every lifeless field.
pub const NONE_SENTINEL: &str = "None";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flora {
    pub name: String,
    pub description: String,
    pub prevalence: FloraPrevalence,
}

impl Flora {
    pub fn none() -> Self {
        Self {
            name: NONE_SENTINEL.to_owned(),
            description: NONE_SENTINEL.to_owned(),
            prevalence: FloraPrevalence::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fauna {
    pub name: String,
    pub temperament: Temperament,
    pub prevalence: FaunaPrevalence,
}

impl Fauna {
    pub fn none() -> Self {
        Self {
            name: NONE_SENTINEL.to_owned(),
            temperament: Temperament::None,
            prevalence: FaunaPrevalence::None,
        }
    }
}

pub const ABSENT_ATMOSPHERE: &str = "Absent";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Atmosphere {
    #[serde(rename = "type")]
    pub kind: String,
    pub weather: String,
    pub color: Color,
}

/// Surface temperature in whole degrees Celsius, displayed as `-150°C`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Temperature(pub i32);

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°C", self.0)
    }
}

impl Serialize for Temperature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Planet {
    pub id: PlanetId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PlanetKind,
    pub description: &'static str,
    /// 1-10 scale.
    pub size: u8,
    pub resources: Vec<Resource>,
    pub flora: Flora,
    pub fauna: Fauna,
    pub atmosphere: Atmosphere,
    pub temperature: Temperature,
    pub main_color: Color,
    pub secondary_color: Color,
}

/// Star class; sets the node color of a discovered system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StarKind {
    Yellow,
    Red,
    Green,
    Blue,
    Anomaly,
}

impl StarKind {
    pub const ALL: [StarKind; 5] = [Self::Yellow, Self::Red, Self::Green, Self::Blue, Self::Anomaly];

    pub fn name(self) -> &'static str {
        match self {
            Self::Yellow => "Yellow",
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Blue => "Blue",
            Self::Anomaly => "Anomaly",
        }
    }

    pub fn color(self) -> Color {
        Color::from_rgb_u32(match self {
            Self::Yellow => 0xfacc15,
            Self::Red => 0xef4444,
            Self::Green => 0x22c55e,
            Self::Blue => 0x3b82f6,
            Self::Anomaly => 0xc084fc,
        })
    }
}

impl fmt::Display for StarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StarSystem {
    pub id: SystemId,
    pub name: String,
    /// Percentage space, both axes in `[0, 100]`.
    pub position: Vec2,
    #[serde(rename = "type")]
    pub kind: StarKind,
    pub discovered: bool,
    /// Never empty for generated systems.
    pub planets: Vec<Planet>,
}

/// The five galaxies of a universe. Name and type share this enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GalaxyName {
    Euclid,
    Hilbert,
    Calypso,
    Hesperius,
    Hyades,
}

impl GalaxyName {
    pub const ALL: [GalaxyName; 5] = [
        Self::Euclid, Self::Hilbert, Self::Calypso, Self::Hesperius, Self::Hyades,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Euclid => "Euclid",
            Self::Hilbert => "Hilbert",
            Self::Calypso => "Calypso",
            Self::Hesperius => "Hesperius",
            Self::Hyades => "Hyades",
        }
    }
}

impl fmt::Display for GalaxyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Index of a star system in the universe arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SystemKey(pub usize);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Galaxy {
    pub id: GalaxyId,
    pub name: GalaxyName,
    #[serde(rename = "type")]
    pub kind: GalaxyName,
    pub systems: Vec<SystemKey>,
    pub unlocked: bool,
}

/// A freshly generated galaxy whose systems are not yet in an arena.
#[derive(Debug, Clone, PartialEq)]
pub struct GalaxyDraft {
    pub id: GalaxyId,
    pub name: GalaxyName,
    pub systems: Vec<StarSystem>,
    pub unlocked: bool,
}

/// The whole generated universe: galaxies plus the system arena.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Universe {
    galaxies: Vec<Galaxy>,
    systems: Vec<StarSystem>,
}

impl Universe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move a draft's systems into the arena and register the galaxy.
    pub fn insert_galaxy(&mut self, draft: GalaxyDraft) -> &Galaxy {
        let start = self.systems.len();
        let count = draft.systems.len();
        self.systems.extend(draft.systems);
        self.galaxies.push(Galaxy {
            id: draft.id,
            name: draft.name,
            kind: draft.name,
            systems: (start..start + count).map(SystemKey).collect(),
            unlocked: draft.unlocked,
        });
        &self.galaxies[self.galaxies.len() - 1]
    }

    pub fn galaxies(&self) -> &[Galaxy] {
        &self.galaxies
    }

    pub fn galaxy(&self, id: &GalaxyId) -> Option<&Galaxy> {
        self.galaxies.iter().find(|g| &g.id == id)
    }

    pub fn galaxy_by_index(&self, index: usize) -> Option<&Galaxy> {
        self.galaxies.get(index)
    }

    pub fn system(&self, key: SystemKey) -> Option<&StarSystem> {
        self.systems.get(key.0)
    }

    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Systems of `galaxy`, in generation order.
    pub fn systems_in<'a>(&'a self, galaxy: &'a Galaxy) -> impl Iterator<Item = &'a StarSystem> + 'a {
        galaxy.systems.iter().filter_map(move |key| self.system(*key))
    }

    pub fn find_system(&self, id: &SystemId) -> Option<(SystemKey, &StarSystem)> {
        self.systems
            .iter()
            .enumerate()
            .find(|(_, s)| &s.id == id)
            .map(|(i, s)| (SystemKey(i), s))
    }

    /// Galaxy whose system list contains `key`.
    pub fn galaxy_of(&self, key: SystemKey) -> Option<&Galaxy> {
        self.galaxies.iter().find(|g| g.systems.contains(&key))
    }

    pub fn find_planet(&self, id: &PlanetId) -> Option<&Planet> {
        self.systems
            .iter()
            .flat_map(|s| s.planets.iter())
            .find(|p| &p.id == id)
    }

    /// Mark a system discovered. Returns true only on the false→true flip.
    pub fn discover_system(&mut self, key: SystemKey) -> bool {
        match self.systems.get_mut(key.0) {
            Some(system) if !system.discovered => {
                system.discovered = true;
                log::debug!("system {} discovered", system.id);
                true
            }
            _ => false,
        }
    }

    /// Unlock a galaxy. Returns true only on the false→true flip.
    pub fn unlock_galaxy(&mut self, id: &GalaxyId) -> bool {
        match self.galaxies.iter_mut().find(|g| &g.id == id) {
            Some(galaxy) if !galaxy.unlocked => {
                galaxy.unlocked = true;
                log::debug!("galaxy {} unlocked", galaxy.id);
                true
            }
            _ => false,
        }
    }

    /// Append a planet to a system. Duplicate planet ids are rejected.
    pub fn add_planet(&mut self, key: SystemKey, planet: Planet) -> bool {
        if self.find_planet(&planet.id).is_some() {
            log::warn!("rejecting duplicate planet id {}", planet.id);
            return false;
        }
        match self.systems.get_mut(key.0) {
            Some(system) => {
                system.planets.push(planet);
                true
            }
            None => false,
        }
    }
}
