//! Player stats and their published snapshot.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Player stats record as carried by an inventory delta.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub level: u32,
    pub experience: i64,
    pub prev_level_xp: i64,
    pub next_level_xp: i64,
    pub km_walked: f32,
    pub pokemons_encountered: i32,
    pub unique_pokedex_entries: i32,
    pub pokemons_captured: i32,
    pub evolutions: i32,
    pub poke_stop_visits: i32,
    pub pokeballs_thrown: i32,
    pub eggs_hatched: i32,
    pub big_magikarp_caught: i32,
    pub battle_attack_won: i32,
    pub battle_attack_total: i32,
    pub battle_defended_won: i32,
    pub battle_training_won: i32,
    pub battle_training_total: i32,
    pub prestige_raised_total: i32,
    pub prestige_dropped_total: i32,
    pub pokemon_deployed: i32,
    /// Opaque per-type capture counters.
    pub pokemon_caught_by_type: Bytes,
    pub small_rattata_caught: i32,
}

/// Every attribute of [`StatsSnapshot`] a consumer can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatField {
    Level,
    Experience,
    PrevLevelXp,
    NextLevelXp,
    KmWalked,
    PokemonsEncountered,
    UniquePokedexEntries,
    PokemonsCaptured,
    Evolutions,
    PokeStopVisits,
    PokeballsThrown,
    EggsHatched,
    BigMagikarpCaught,
    BattleAttackWon,
    BattleAttackTotal,
    BattleDefendedWon,
    BattleTrainingWon,
    BattleTrainingTotal,
    PrestigeRaisedTotal,
    PrestigeDroppedTotal,
    PokemonDeployed,
    PokemonCaughtByType,
    SmallRattataCaught,
}

impl StatField {
    /// All fields, in notification order.
    pub const ALL: [StatField; 23] = [
        StatField::Level,
        StatField::Experience,
        StatField::PrevLevelXp,
        StatField::NextLevelXp,
        StatField::KmWalked,
        StatField::PokemonsEncountered,
        StatField::UniquePokedexEntries,
        StatField::PokemonsCaptured,
        StatField::Evolutions,
        StatField::PokeStopVisits,
        StatField::PokeballsThrown,
        StatField::EggsHatched,
        StatField::BigMagikarpCaught,
        StatField::BattleAttackWon,
        StatField::BattleAttackTotal,
        StatField::BattleDefendedWon,
        StatField::BattleTrainingWon,
        StatField::BattleTrainingTotal,
        StatField::PrestigeRaisedTotal,
        StatField::PrestigeDroppedTotal,
        StatField::PokemonDeployed,
        StatField::PokemonCaughtByType,
        StatField::SmallRattataCaught,
    ];
}

/// The published stats of the current player.
///
/// The inner record is swapped wholesale on every refresh and every field
/// is reported as changed, whether or not its value moved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsSnapshot {
    stats: PlayerStats,
}

impl StatsSnapshot {
    pub fn new(stats: PlayerStats) -> Self {
        Self { stats }
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    pub fn level(&self) -> u32 {
        self.stats.level
    }

    /// False until the first stats record of the session has been applied.
    pub fn is_initialized(&self) -> bool {
        self.stats.level > 0
    }

    /// Replace the record and return the fields to notify.
    pub fn replace(&mut self, stats: PlayerStats) -> Vec<StatField> {
        self.stats = stats;
        StatField::ALL.to_vec()
    }

    /// Back to the uninitialized state.
    pub fn reset(&mut self) {
        self.stats = PlayerStats::default();
    }
}
