//! Change notifications published by the scheduler.

use pogo_live_core::{
    AssignEggResult, CollectionChange, HatchedEggs, IncubatorId, PokemonId, Position, StatField,
};

/// One of the published map collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Catchables,
    Proximity,
    PointsOfInterest,
}

/// An event observed by subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    /// A new position fix was accepted.
    PositionUpdated(Position),

    /// The number of catchable creatures changed.
    NewFindings { count: usize },

    /// The proximity list grew or shrank.
    NearbyCountChanged { previous: usize, current: usize },

    /// Fine-grained changes to one collection, in application order.
    CollectionChanged {
        collection: CollectionKind,
        changes: Vec<CollectionChange>,
    },

    /// The item list was replaced.
    InventoryReplaced { stacks: usize },

    /// The stats record was replaced; every field is listed.
    StatsChanged { fields: Vec<StatField> },

    EggHatched(HatchedEggs),

    EggAssigned {
        incubator_id: IncubatorId,
        egg_id: PokemonId,
        result: AssignEggResult,
    },

    /// A cycle completed and its results are visible.
    CycleCompleted { cycle: u64 },

    /// A cycle failed fatally; the timer is stopped.
    CycleFailed { message: String, requires_login: bool },
}
