//! Procedural generator: planets, star systems, galaxies and the initial
//! universe, drawn from the tables in [`super::tables`].

use glam::Vec2;

use crate::api::types::{GalaxyId, PlanetId, SystemId};
use crate::core::rng::RandomSource;

use super::model::{
    Atmosphere, Fauna, FaunaPrevalence, Flora, FloraPrevalence, GalaxyDraft, GalaxyName, Planet,
    PlanetKind, Rarity, Resource, StarKind, StarSystem, Temperament, Temperature, Universe,
    ABSENT_ATMOSPHERE,
};
use super::tables::*;

/// Generates universe entities from an injected random source.
///
/// The serial counter is appended to every id so two entities from the same
/// generator never collide, even when the random prefix does.
pub struct Generator<'a, R: RandomSource> {
    rng: &'a mut R,
    serial: u32,
}

impl<'a, R: RandomSource> Generator<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        Self::with_serial(rng, 0)
    }

    /// Continue id numbering where an earlier generator stopped.
    pub fn with_serial(rng: &'a mut R, serial: u32) -> Self {
        Self { rng, serial }
    }

    /// Serial the next generated id will carry.
    pub fn serial(&self) -> u32 {
        self.serial
    }

    /// A planet of uniformly random kind.
    pub fn planet(&mut self) -> Planet {
        let kind = *self.rng.pick(&PlanetKind::ALL);
        self.planet_of_kind(kind)
    }

    /// A planet of the given kind; every dependent field follows `kind`.
    pub fn planet_of_kind(&mut self, kind: PlanetKind) -> Planet {
        let id = PlanetId::new(self.next_id(PLANET_ID_LEN));
        let name = self.planet_name();
        let (main_color, secondary_color) = kind.palette();
        let size = self.rng.range_inclusive(1, 10) as u8;

        let resource_count = self.rng.range_inclusive(MIN_RESOURCES as i32, MAX_RESOURCES as i32);
        let resources = (0..resource_count).map(|_| self.resource()).collect();

        let (flora, fauna) = if kind.supports_life() {
            (self.flora(), self.fauna())
        } else {
            (Flora::none(), Fauna::none())
        };

        let atmosphere_kind = if kind.supports_life() {
            (*self.rng.pick(&ATMOSPHERE_TYPES)).to_owned()
        } else {
            ABSENT_ATMOSPHERE.to_owned()
        };
        let atmosphere = Atmosphere {
            kind: atmosphere_kind,
            weather: (*self.rng.pick(&WEATHER_TYPES)).to_owned(),
            color: main_color,
        };

        let range = kind.temperature_range();
        let temperature = Temperature(self.rng.range_inclusive(*range.start(), *range.end()));

        Planet {
            id,
            name,
            kind,
            description: kind.description(),
            size,
            resources,
            flora,
            fauna,
            atmosphere,
            temperature,
            main_color,
            secondary_color,
        }
    }

    /// The player's entry point: always Lush, always named the same.
    pub fn starter_planet(&mut self) -> Planet {
        let mut planet = self.planet_of_kind(PlanetKind::Lush);
        planet.name = STARTER_PLANET_NAME.to_owned();
        planet
    }

    pub fn planets(&mut self, count: usize) -> Vec<Planet> {
        (0..count).map(|_| self.planet()).collect()
    }

    pub fn star_system(&mut self) -> StarSystem {
        let kind = *self.rng.pick(&StarKind::ALL);
        let name = format!(
            "{}{}",
            self.rng.pick(&SYSTEM_PREFIXES),
            self.rng.pick(&SYSTEM_SUFFIXES)
        );
        let position = Vec2::new(self.rng.range(0.0, 100.0), self.rng.range(0.0, 100.0));
        let count = self.rng.range_inclusive(MIN_PLANETS as i32, MAX_PLANETS as i32) as usize;
        let planets = self.planets(count);
        let id = SystemId::new(self.next_id(SYSTEM_ID_LEN));
        StarSystem {
            id,
            name,
            position,
            kind,
            discovered: self.rng.chance(DISCOVERED_CHANCE),
            planets,
        }
    }

    pub fn galaxy(
        &mut self,
        id: impl Into<GalaxyId>,
        name: GalaxyName,
        system_count: usize,
        unlocked: bool,
    ) -> GalaxyDraft {
        GalaxyDraft {
            id: id.into(),
            name,
            systems: (0..system_count).map(|_| self.star_system()).collect(),
            unlocked,
        }
    }

    /// The five fixed galaxies, only the first unlocked.
    pub fn initial_universe(&mut self) -> Universe {
        let mut universe = Universe::new();
        for (id, name, count, unlocked) in GALAXY_PLAN {
            let draft = self.galaxy(id, name, count, unlocked);
            universe.insert_galaxy(draft);
        }
        let planets: usize = universe
            .galaxies()
            .iter()
            .flat_map(|g| universe.systems_in(g))
            .map(|s| s.planets.len())
            .sum();
        log::info!(
            "Generated universe: {} galaxies, {} systems, {} planets",
            universe.galaxies().len(),
            universe.system_count(),
            planets
        );
        universe
    }

    fn planet_name(&mut self) -> String {
        let mut name = String::from(*self.rng.pick(&PLANET_PREFIXES));
        if self.rng.chance(THREE_PART_NAME_CHANCE) {
            name.push_str(*self.rng.pick(&PLANET_MIDDLES));
        }
        name.push_str(*self.rng.pick(&PLANET_SUFFIXES));
        name
    }

    fn resource(&mut self) -> Resource {
        let rarity = *self.rng.pick(&Rarity::ALL);
        Resource {
            name: (*self.rng.pick(&RESOURCE_NAMES)).to_owned(),
            rarity,
            icon: rarity.icon(),
        }
    }

    fn flora(&mut self) -> Flora {
        Flora {
            name: self.planet_name() + FLORA_SUFFIX,
            description: (*self.rng.pick(&FLORA_DESCRIPTIONS)).to_owned(),
            prevalence: *self.rng.pick(&FloraPrevalence::ALL),
        }
    }

    fn fauna(&mut self) -> Fauna {
        Fauna {
            name: self.planet_name() + FAUNA_SUFFIX,
            temperament: *self.rng.pick(&Temperament::ALL),
            prevalence: *self.rng.pick(&FaunaPrevalence::ALL),
        }
    }

    fn next_id(&mut self, len: usize) -> String {
        let mut id: String = (0..len)
            .map(|_| char::from(*self.rng.pick(ID_ALPHABET)))
            .collect();
        id.push('-');
        id.push_str(&self.serial.to_string());
        self.serial += 1;
        id
    }
}
