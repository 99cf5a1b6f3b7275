//! Proptest generators for property-based testing.

use proptest::prelude::*;

use pogo_live_core::{
    EncounterId, FortData, FortKind, ItemKind, ItemStack, MapCell, MapObjects, MapPokemon,
    NearbyPokemon,
};

use crate::fixtures;

/// Encounter ids from a small space so fetches overlap.
pub fn encounter_id() -> impl Strategy<Value = EncounterId> {
    (0u64..32).prop_map(EncounterId)
}

pub fn map_pokemon() -> impl Strategy<Value = MapPokemon> {
    (0u64..32).prop_map(fixtures::map_pokemon)
}

pub fn nearby_pokemon() -> impl Strategy<Value = NearbyPokemon> {
    (0u64..32, 0.0f32..500.0).prop_map(|(id, distance)| fixtures::nearby_pokemon(id, distance))
}

pub fn fort() -> impl Strategy<Value = FortData> {
    (0u8..16, any::<bool>()).prop_map(|(id, gym)| {
        let kind = if gym { FortKind::Gym } else { FortKind::Checkpoint };
        fixtures::fort(&format!("fort-{id}"), kind)
    })
}

pub fn map_cell() -> impl Strategy<Value = MapCell> {
    (
        any::<u64>(),
        prop::collection::vec(map_pokemon(), 0..6),
        prop::collection::vec(nearby_pokemon(), 0..6),
        prop::collection::vec(fort(), 0..4),
    )
        .prop_map(
            |(s2_cell_id, catchable_pokemons, nearby_pokemons, forts)| MapCell {
                s2_cell_id,
                catchable_pokemons,
                nearby_pokemons,
                forts,
            },
        )
}

pub fn map_objects() -> impl Strategy<Value = MapObjects> {
    prop::collection::vec(map_cell(), 0..4).prop_map(|map_cells| MapObjects { map_cells })
}

pub fn item_kind() -> impl Strategy<Value = ItemKind> {
    prop_oneof![
        Just(ItemKind::ItemPokeBall),
        Just(ItemKind::ItemGreatBall),
        Just(ItemKind::ItemPotion),
        Just(ItemKind::ItemRevive),
        Just(ItemKind::ItemRazzBerry),
        Just(ItemKind::ItemIncenseOrdinary),
    ]
}

pub fn item_stack() -> impl Strategy<Value = ItemStack> {
    (item_kind(), 0u32..1_000).prop_map(|(kind, count)| ItemStack::new(kind, count))
}
