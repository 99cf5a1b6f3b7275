//! Player-level responses: profile, level-up rewards and egg operations.

use serde::{Deserialize, Serialize};

use crate::inventory::EggIncubator;
use crate::types::{ItemKind, PokemonId};

/// An in-game currency balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub name: String,
    pub amount: i64,
}

/// Response to a profile query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub username: String,
    pub creation_timestamp_ms: i64,
    pub max_pokemon_storage: u32,
    pub max_item_storage: u32,
    pub currencies: Vec<Currency>,
}

/// Result code of a level-up rewards query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardsResult {
    Unset,
    Success,
    AwardedAlready,
}

/// A number of items granted at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAward {
    pub item: ItemKind,
    pub count: u32,
}

/// Response to a level-up rewards query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUpRewards {
    pub result: RewardsResult,
    pub items_awarded: Vec<ItemAward>,
    pub items_unlocked: Vec<ItemKind>,
}

impl LevelUpRewards {
    pub fn is_success(&self) -> bool {
        self.result == RewardsResult::Success
    }
}

/// Result code of placing an egg in an incubator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignEggStatus {
    Unset,
    Success,
    IncubatorNotFound,
    IncubatorAlreadyInUse,
    EggNotFound,
    NotAnEgg,
    PokemonAlreadyIncubating,
    IncubatorNoUsesRemaining,
}

/// Response to placing an egg in an incubator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignEggResult {
    pub status: AssignEggStatus,
    /// The incubator after assignment, carrying the distance target.
    pub incubator: Option<EggIncubator>,
}

/// Response to a hatch query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HatchedEggs {
    pub pokemon_ids: Vec<PokemonId>,
    pub experience_awarded: Vec<i32>,
    pub candy_awarded: Vec<i32>,
    pub stardust_awarded: Vec<i32>,
}

impl HatchedEggs {
    pub fn is_empty(&self) -> bool {
        self.pokemon_ids.is_empty()
    }
}
