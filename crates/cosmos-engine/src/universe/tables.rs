//! Fixed vocabularies the generator draws from.

use super::model::GalaxyName;

pub const PLANET_PREFIXES: [&str; 10] = ["Al", "No", "Ke", "Zo", "Ek", "Ix", "Ur", "Ty", "Vi", "Ra"];
pub const PLANET_MIDDLES: [&str; 10] = ["ta", "vi", "ku", "lo", "ni", "sha", "ma", "ra", "di", "xi"];
pub const PLANET_SUFFIXES: [&str; 10] = [
    "lar", "mus", "rin", "phor", "tis", "gon", "lex", "dor", "kan", "plex",
];

pub const RESOURCE_NAMES: [&str; 24] = [
    "Copper", "Emeril", "Indium", "Gold", "Silver", "Platinum",
    "Uranium", "Dioxite", "Ammonia", "Phosphorus", "Pyrite",
    "Cadmium", "Activated Copper", "Activated Emeril",
    "Activated Indium", "Magnetized Ferrite", "Rusted Metal",
    "Star Bulb", "Frost Crystal", "Cactus Flesh", "Solanium",
    "Gravitino Ball", "Storm Crystal", "Hexite",
];

pub const FLORA_DESCRIPTIONS: [&str; 10] = [
    "Bioluminescent plants that glow with ethereal light",
    "Mushroom-like structures with vibrant caps",
    "Tall, slender crystalline formations that shimmer",
    "Low-lying moss that pulses with electric energy",
    "Floating seed pods that drift through the air",
    "Tentacle-like vines that sway in the breeze",
    "Bubble-producing fungi that pop with musical tones",
    "Palm-like trees with spiral growth patterns",
    "Carnivorous plants with slowly moving appendages",
    "Grass that changes color according to temperature",
];

pub const WEATHER_TYPES: [&str; 17] = [
    "Boiling Monsoons", "Firestorms", "Freezing", "Toxic Rain",
    "Radioactive Storms", "Scalding Heat", "Pleasant",
    "Refreshing Breeze", "Humid", "Dusty", "Foggy",
    "Superheated Rain", "Extreme Wind", "Blissful",
    "Anomalous", "Clear", "Corrupted Blood Storms",
];

/// Contains `Absent` itself, so a living world may still roll no atmosphere.
pub const ATMOSPHERE_TYPES: [&str; 11] = [
    "Nitrogen-rich", "Oxygen-abundant", "Neon-infused",
    "Argon-heavy", "Methane-dense", "Helium-rich",
    "Sulfuric", "Carbon-rich", "Chlorine-heavy",
    "Ammonia-dense", "Absent",
];

pub const SYSTEM_PREFIXES: [&str; 7] = ["Al", "Uy", "Ge", "No", "Ka", "Ix", "Su"];
pub const SYSTEM_SUFFIXES: [&str; 8] = [
    "III", "IV", "VII", "-16", "-42b", " Sigma", " Tau", " Prime",
];

pub const STARTER_PLANET_NAME: &str = "Alixia Prime";

pub const FLORA_SUFFIX: &str = "weed";
pub const FAUNA_SUFFIX: &str = "oid";

/// One row per galaxy of a fresh universe: id, name, system count, unlocked.
pub const GALAXY_PLAN: [(&str, GalaxyName, usize, bool); 5] = [
    ("g1", GalaxyName::Euclid, 8, true),
    ("g2", GalaxyName::Hilbert, 6, false),
    ("g3", GalaxyName::Calypso, 7, false),
    ("g4", GalaxyName::Hesperius, 9, false),
    ("g5", GalaxyName::Hyades, 12, false),
];

pub const ID_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
pub const PLANET_ID_LEN: usize = 8;
pub const SYSTEM_ID_LEN: usize = 6;

pub const MIN_RESOURCES: u32 = 2;
pub const MAX_RESOURCES: u32 = 4;
pub const MIN_PLANETS: u32 = 1;
pub const MAX_PLANETS: u32 = 4;

/// Probability of a three-morpheme planet name.
pub const THREE_PART_NAME_CHANCE: f32 = 0.3;
/// Probability that a new system starts out discovered.
pub const DISCOVERED_CHANCE: f32 = 0.3;
