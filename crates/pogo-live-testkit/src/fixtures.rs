//! Test fixtures and helpers.
//!
//! Builders for the payloads a scripted session answers with, and a
//! ready-to-start client wired to that session.

use std::sync::Arc;

use tokio::sync::mpsc;

use pogo_live::{ClientConfig, GameClient};
use pogo_live_core::{
    EggIncubator, EncounterId, FortData, FortId, FortKind, IncenseEncounter, IncenseResult,
    IncubatorId, InventoryDelta, InventoryRecord, ItemKind, ItemStack, MapCell, MapObjects,
    MapPokemon, NearbyPokemon, PlayerStats, PokemonId, PokemonRecord, Position, SpeciesId,
};
use pogo_live_settings::MemorySettings;
use pogo_live_sync::session::memory::MemorySession;

/// A fixed position in a park.
pub fn position() -> Position {
    Position::new(40.7829, -73.9654, 10.0)
}

pub fn map_pokemon(id: u64) -> MapPokemon {
    MapPokemon {
        encounter_id: EncounterId(id),
        species: SpeciesId((id % 151) as u16 + 1),
        expiration_timestamp_ms: 1_700_000_000_000 + id as i64,
        latitude: 40.78,
        longitude: -73.96,
        spawn_point_id: format!("spawn-{id}"),
    }
}

pub fn nearby_pokemon(id: u64, distance_in_meters: f32) -> NearbyPokemon {
    NearbyPokemon {
        encounter_id: EncounterId(id),
        species: SpeciesId((id % 151) as u16 + 1),
        distance_in_meters,
    }
}

pub fn fort(id: &str, kind: FortKind) -> FortData {
    FortData {
        id: FortId::new(id),
        kind,
        latitude: 40.78,
        longitude: -73.96,
        enabled: true,
        cooldown_complete_timestamp_ms: 0,
        lure_expires_timestamp_ms: None,
        last_modified_timestamp_ms: 0,
    }
}

/// An incense response carrying encounter `id`.
pub fn incense_encounter(id: u64) -> IncenseEncounter {
    IncenseEncounter {
        result: IncenseResult::IncenseEncounterAvailable,
        encounter_id: EncounterId(id),
        species: SpeciesId(133),
        disappear_timestamp_ms: 1_700_000_000_000,
        latitude: 40.78,
        longitude: -73.96,
        encounter_location: "incense".into(),
    }
}

/// Builds a [`MapObjects`] one cell at a time.
#[derive(Debug, Default)]
pub struct MapBuilder {
    cells: Vec<MapCell>,
    current: MapCell,
}

impl MapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catchable(mut self, id: u64) -> Self {
        self.current.catchable_pokemons.push(map_pokemon(id));
        self
    }

    pub fn nearby(mut self, id: u64, distance_in_meters: f32) -> Self {
        self.current
            .nearby_pokemons
            .push(nearby_pokemon(id, distance_in_meters));
        self
    }

    pub fn checkpoint(mut self, id: &str) -> Self {
        self.current.forts.push(fort(id, FortKind::Checkpoint));
        self
    }

    pub fn gym(mut self, id: &str) -> Self {
        self.current.forts.push(fort(id, FortKind::Gym));
        self
    }

    /// Close the current cell and start a new one.
    pub fn next_cell(mut self) -> Self {
        let id = self.cells.len() as u64 + 1;
        let mut cell = std::mem::take(&mut self.current);
        cell.s2_cell_id = id;
        self.cells.push(cell);
        self
    }

    pub fn build(self) -> MapObjects {
        let mut map_cells = self.cells;
        let mut last = self.current;
        last.s2_cell_id = map_cells.len() as u64 + 1;
        map_cells.push(last);
        MapObjects { map_cells }
    }
}

/// Builds an [`InventoryDelta`] record by record.
#[derive(Debug, Default)]
pub struct InventoryBuilder {
    records: Vec<InventoryRecord>,
    incubators: Vec<EggIncubator>,
}

impl InventoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item(mut self, kind: ItemKind, count: u32) -> Self {
        self.records
            .push(InventoryRecord::Item(ItemStack::new(kind, count)));
        self
    }

    pub fn stats(mut self, level: u32) -> Self {
        self.records.push(InventoryRecord::PlayerStats(PlayerStats {
            level,
            experience: i64::from(level) * 1_000,
            ..Default::default()
        }));
        self
    }

    pub fn incubator(mut self, id: &str, start_km_walked: f64, target_km_walked: f64) -> Self {
        self.incubators.push(EggIncubator {
            id: IncubatorId::new(id),
            item_kind: ItemKind::ItemIncubatorBasicUnlimited,
            pokemon_id: None,
            start_km_walked,
            target_km_walked,
            uses_remaining: None,
        });
        self
    }

    pub fn idle_incubator(self, id: &str) -> Self {
        self.incubator(id, 0.0, 0.0)
    }

    pub fn ready_incubator(self, id: &str) -> Self {
        self.incubator(id, 5.0, 5.0)
    }

    /// An egg, optionally already linked to an incubator.
    pub fn egg(mut self, id: u64, incubator: Option<&str>) -> Self {
        self.records.push(InventoryRecord::Pokemon(PokemonRecord {
            id: PokemonId(id),
            species: SpeciesId(0),
            is_egg: true,
            egg_incubator_id: incubator.map(IncubatorId::new),
            egg_km_walked_target: 5.0,
        }));
        self
    }

    pub fn pokemon(mut self, id: u64, species: u16) -> Self {
        self.records.push(InventoryRecord::Pokemon(PokemonRecord {
            id: PokemonId(id),
            species: SpeciesId(species),
            is_egg: false,
            egg_incubator_id: None,
            egg_km_walked_target: 0.0,
        }));
        self
    }

    pub fn build(self) -> InventoryDelta {
        let mut records = self.records;
        if !self.incubators.is_empty() {
            records.push(InventoryRecord::EggIncubators(self.incubators));
        }
        InventoryDelta {
            original_timestamp_ms: 0,
            new_timestamp_ms: 1_700_000_000_000,
            records,
        }
    }
}

/// A client over a scripted session and in-memory settings.
pub struct ClientFixture {
    pub session: Arc<MemorySession>,
    pub client: GameClient<Arc<MemorySession>, MemorySettings>,
    pub sensor: mpsc::Sender<Position>,
    receiver: Option<mpsc::Receiver<Position>>,
}

impl ClientFixture {
    /// A fixture whose session reports a level 1 player and an empty map.
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Self {
        let session = Arc::new(MemorySession::new());
        session.set_inventory(InventoryBuilder::new().stats(1).build());
        let client = GameClient::new(
            Arc::clone(&session),
            MemorySettings::with_auth_token("fixture-token"),
            config,
        );
        let (sensor, receiver) = mpsc::channel(16);
        Self {
            session,
            client,
            sensor,
            receiver: Some(receiver),
        }
    }

    /// Hand the position stream to the client, with [`position`] as the
    /// first fix. Returns `None` if already started once.
    pub fn take_sensor(&mut self) -> Option<mpsc::Receiver<Position>> {
        let receiver = self.receiver.take()?;
        // Capacity is 16 and nothing else was sent yet.
        let _ = self.sensor.try_send(position());
        Some(receiver)
    }
}

impl Default for ClientFixture {
    fn default() -> Self {
        Self::new()
    }
}
