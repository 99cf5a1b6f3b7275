//! Properties of map and inventory processing over generated payloads.

use std::collections::HashSet;

use proptest::prelude::*;

use pogo_live_core::{
    collapse_items, update_by_index_with, update_with, CatchableEntity, EncounterId, FortKind,
    InventoryDelta, InventoryRecord, ObservableCollection, PointOfInterest, ProximityEntity,
};
use pogo_live_sync::{MapFetch, WorldState};
use pogo_live_testkit::fixtures::map_pokemon;
use pogo_live_testkit::generators::{encounter_id, item_stack, map_objects};

proptest! {
    #[test]
    fn checkpoints_never_include_gyms(map in map_objects()) {
        prop_assert!(map.checkpoints().iter().all(|fort| fort.kind == FortKind::Checkpoint));
    }

    #[test]
    fn consecutive_fetches_converge(first in map_objects(), second in map_objects()) {
        let mut world = WorldState::default();
        for map in [&first, &second] {
            world.apply_map(&MapFetch {
                catchables: map.catchable_pokemons(),
                nearby: map.nearby_pokemons(),
                checkpoints: map.checkpoints(),
            });
        }

        let expected: HashSet<EncounterId> = second
            .catchable_pokemons()
            .iter()
            .map(|raw| raw.encounter_id)
            .collect();
        let published: Vec<EncounterId> = world
            .catchables
            .iter()
            .map(|entity| entity.encounter_id)
            .collect();
        prop_assert_eq!(published.len(), expected.len());
        prop_assert_eq!(published.into_iter().collect::<HashSet<_>>(), expected);

        let nearby: Vec<ProximityEntity> = second
            .nearby_pokemons()
            .iter()
            .map(ProximityEntity::from_raw)
            .collect();
        prop_assert_eq!(world.proximity.snapshot(), nearby);

        let stops: HashSet<_> = second.checkpoints().into_iter().map(|fort| fort.id).collect();
        let published_stops: HashSet<_> = world
            .points_of_interest
            .iter()
            .map(|poi: &PointOfInterest| poi.id.clone())
            .collect();
        prop_assert_eq!(published_stops, stops);
    }

    #[test]
    fn survivors_are_never_rebuilt(
        before in prop::collection::vec(encounter_id(), 0..16),
        after in prop::collection::vec(encounter_id(), 0..16),
    ) {
        let old: Vec<_> = before.iter().map(|id| map_pokemon(id.get())).collect();
        let mut collection: ObservableCollection<CatchableEntity> = ObservableCollection::new();
        update_with(&mut collection, &old, CatchableEntity::from_raw, CatchableEntity::is_same);
        let mut marked = collection.snapshot();
        // Tag every original entry so a rebuild would show.
        for entity in &mut marked {
            entity.spawn_point_id = "original".into();
        }
        let mut collection: ObservableCollection<CatchableEntity> = marked.into_iter().collect();

        let fresh: Vec<_> = after.iter().map(|id| map_pokemon(id.get())).collect();
        update_with(&mut collection, &fresh, CatchableEntity::from_raw, CatchableEntity::is_same);

        let before_ids: HashSet<_> = before.iter().copied().collect();
        for entity in collection.iter() {
            let survived = before_ids.contains(&entity.encounter_id);
            prop_assert_eq!(entity.spawn_point_id == "original", survived);
        }
    }

    #[test]
    fn index_mode_length_follows_fetch(
        before in 0u64..20,
        after in 0u64..20,
    ) {
        let old: Vec<_> = (0..before)
            .map(|id| pogo_live_testkit::fixtures::nearby_pokemon(id, 1.0))
            .collect();
        let new: Vec<_> = (0..after)
            .map(|id| pogo_live_testkit::fixtures::nearby_pokemon(id + 100, 2.0))
            .collect();
        let mut collection: ObservableCollection<ProximityEntity> =
            old.iter().map(ProximityEntity::from_raw).collect();

        update_by_index_with(&mut collection, &new, ProximityEntity::from_raw);

        prop_assert_eq!(collection.len(), new.len());
    }

    #[test]
    fn collapsed_inventory_has_one_stack_per_kind(
        stacks in prop::collection::vec(item_stack(), 0..24),
    ) {
        let delta = InventoryDelta {
            records: stacks.iter().cloned().map(InventoryRecord::Item).collect(),
            ..Default::default()
        };

        let collapsed = collapse_items(&delta);

        let kinds: HashSet<_> = collapsed.iter().map(|stack| stack.kind).collect();
        prop_assert_eq!(kinds.len(), collapsed.len());
        for stack in &collapsed {
            let first = stacks.iter().find(|s| s.kind == stack.kind);
            prop_assert_eq!(Some(stack), first);
        }
    }
}
