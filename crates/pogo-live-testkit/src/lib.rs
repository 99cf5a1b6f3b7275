//! # pogo-live testkit
//!
//! Testing utilities for pogo-live.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: Payload builders and a client wired to a scripted session
//! - **Generators**: Proptest strategies for map and inventory payloads
//! - **Golden vectors**: Pinned encodings of persisted settings
//!
//! ## Test Fixtures
//!
//! ```rust
//! use pogo_live_testkit::fixtures::{InventoryBuilder, MapBuilder};
//! use pogo_live_core::ItemKind;
//!
//! let map = MapBuilder::new().catchable(1).nearby(2, 30.0).checkpoint("stop").build();
//! let inventory = InventoryBuilder::new()
//!     .item(ItemKind::ItemPokeBall, 20)
//!     .idle_incubator("inc-1")
//!     .egg(7, None)
//!     .stats(5)
//!     .build();
//! assert_eq!(map.catchable_pokemons().len(), 1);
//! assert_eq!(inventory.eggs().count(), 1);
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use pogo_live_testkit::generators::map_objects;
//!
//! proptest! {
//!     #[test]
//!     fn checkpoints_never_include_gyms(map in map_objects()) {
//!         prop_assert!(map.checkpoints().iter().all(|fort| fort.kind == FortKind::Checkpoint));
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{ClientFixture, InventoryBuilder, MapBuilder};
