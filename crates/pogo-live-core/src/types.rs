//! Strong type definitions for pogo-live.
//!
//! All identifiers are newtypes to prevent misuse at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned identifier of a single spawn encounter.
///
/// Unique among the creatures currently visible to the player; used as the
/// identity key when reconciling catchable and proximity collections.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EncounterId(pub u64);

impl EncounterId {
    /// Create an encounter id from its raw value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw value.
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EncounterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncounterId({:016x})", self.0)
    }
}

impl fmt::Display for EncounterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl From<u64> for EncounterId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Identifier of a fort (checkpoint or gym).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FortId(pub String);

impl FortId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for FortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FortId({})", self.0)
    }
}

impl fmt::Display for FortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of an egg incubator in the player's inventory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IncubatorId(pub String);

impl IncubatorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IncubatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a pokemon (or egg) owned by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PokemonId(pub u64);

impl fmt::Display for PokemonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pokedex number of a species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpeciesId(pub u16);

/// Kind of a stackable inventory item.
///
/// Discriminants follow the service's numeric item ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u16)]
pub enum ItemKind {
    ItemPokeBall = 1,
    ItemGreatBall = 2,
    ItemUltraBall = 3,
    ItemMasterBall = 4,
    ItemPotion = 101,
    ItemSuperPotion = 102,
    ItemHyperPotion = 103,
    ItemMaxPotion = 104,
    ItemRevive = 201,
    ItemMaxRevive = 202,
    ItemLuckyEgg = 301,
    ItemIncenseOrdinary = 401,
    ItemTroyDisk = 501,
    ItemRazzBerry = 701,
    ItemIncubatorBasicUnlimited = 901,
    ItemIncubatorBasic = 902,
    ItemPokemonStorageUpgrade = 1001,
    ItemItemStorageUpgrade = 1002,
}

impl ItemKind {
    /// Convert from the service's numeric item id.
    pub fn from_u16(value: u16) -> Option<Self> {
        use ItemKind::*;
        let kind = match value {
            1 => ItemPokeBall,
            2 => ItemGreatBall,
            3 => ItemUltraBall,
            4 => ItemMasterBall,
            101 => ItemPotion,
            102 => ItemSuperPotion,
            103 => ItemHyperPotion,
            104 => ItemMaxPotion,
            201 => ItemRevive,
            202 => ItemMaxRevive,
            301 => ItemLuckyEgg,
            401 => ItemIncenseOrdinary,
            501 => ItemTroyDisk,
            701 => ItemRazzBerry,
            901 => ItemIncubatorBasicUnlimited,
            902 => ItemIncubatorBasic,
            1001 => ItemPokemonStorageUpgrade,
            1002 => ItemItemStorageUpgrade,
            _ => return None,
        };
        Some(kind)
    }

    /// Numeric item id.
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    /// Name shown to the player: the variant name without its `Item` prefix.
    pub fn display_name(self) -> String {
        format!("{:?}", self).replace("Item", "")
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encounter_id_display() {
        let id = EncounterId::new(0xabcd);
        assert_eq!(format!("{}", id), "000000000000abcd");
        assert!(format!("{:?}", id).starts_with("EncounterId("));
    }

    #[test]
    fn test_item_kind_numeric_roundtrip() {
        for kind in [ItemKind::ItemPokeBall, ItemKind::ItemPotion, ItemKind::ItemIncubatorBasic] {
            assert_eq!(ItemKind::from_u16(kind.as_u16()), Some(kind));
        }
        assert_eq!(ItemKind::from_u16(9999), None);
    }

    #[test]
    fn test_item_kind_display_name() {
        assert_eq!(ItemKind::ItemPotion.display_name(), "Potion");
        // every occurrence of the prefix goes, not just the leading one
        assert_eq!(ItemKind::ItemItemStorageUpgrade.display_name(), "StorageUpgrade");
    }
}
