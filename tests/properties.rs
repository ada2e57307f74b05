//! Property tests for the turn engine's structural invariants.

use proptest::prelude::*;

use hegemon::config::GameConfig;
use hegemon::processor::TurnProcessor;
use hegemon::rng::PhaseRng;
use hegemon::store::{MemStore, Store};
use hegemon::world::{Coord, EmpireId, OrderKind, WorldState};
use hegemon::worldgen;

fn store_with_empires(seed: &str, count: u32) -> (GameConfig, MemStore) {
    let cfg = GameConfig { world_seed: seed.to_string(), ..GameConfig::default() };
    let store = MemStore::new();
    let mut world = WorldState::empty(0, 0);
    worldgen::generate_map(&mut world, &cfg);
    for i in 0..count {
        worldgen::found_empire(&mut world, &cfg, &format!("Empire{}", i), "#404040").unwrap();
    }
    store.replace_world(world).unwrap();
    (cfg, store)
}

/// A raw order submission the generator can produce: kind tag, target
/// coordinates, and an attack commitment.
fn arb_order() -> impl Strategy<Value = (u8, u16, u16, u32)> {
    (0u8..5, 0u16..20, 0u16..20, 1u32..6)
}

fn to_kind(raw: (u8, u16, u16, u32)) -> OrderKind {
    let (tag, x, y, commit) = raw;
    let target = Coord::new(x, y);
    match tag {
        0 => OrderKind::Expand { target },
        1 => OrderKind::Attack { target, commit },
        2 => OrderKind::Build { target },
        3 => OrderKind::Defend { target },
        _ => OrderKind::Trade,
    }
}

proptest! {
    // Orders are inserted raw, without the validator, so the pipeline's own
    // re-checks are the only guard. Whatever happens, the world must stay
    // structurally sound.
    #[test]
    fn prop_arbitrary_orders_never_corrupt_the_world(
        seed in "[a-z]{4,12}",
        raw_orders in proptest::collection::vec(arb_order(), 0..12),
        turns in 1u32..4,
    ) {
        let (cfg, store) = store_with_empires(&seed, 3);
        for (i, raw) in raw_orders.iter().enumerate() {
            let empire = EmpireId(1 + (i as u32 % 3));
            store.insert_order(empire, 1, to_kind(*raw)).unwrap();
        }

        let processor = TurnProcessor::new(&store, &cfg);
        processor.catch_up(turns).unwrap();

        let world = store.world().unwrap();
        prop_assert_eq!(world.tiles.len(), 400);
        for (id, empire) in &world.empires {
            prop_assert_eq!(empire.tiles_owned, world.count_owned(*id));
            if empire.eliminated {
                prop_assert_eq!(empire.army, 0);
            }
            for coord in world.tiles_of(*id) {
                let tile = world.tile(coord).unwrap();
                prop_assert!(tile.level >= 1 && tile.level <= 3);
            }
        }
    }

    #[test]
    fn prop_same_inputs_same_outcome(
        seed in "[a-z]{4,12}",
        raw_orders in proptest::collection::vec(arb_order(), 0..8),
    ) {
        let run = || {
            let (cfg, store) = store_with_empires(&seed, 2);
            for (i, raw) in raw_orders.iter().enumerate() {
                let empire = EmpireId(1 + (i as u32 % 2));
                store.insert_order(empire, 1, to_kind(*raw)).unwrap();
            }
            let processor = TurnProcessor::new(&store, &cfg);
            processor.catch_up(2).unwrap();
            (store.world().unwrap(), store.logs().unwrap())
        };
        prop_assert_eq!(run(), run());
    }

    #[test]
    fn prop_phase_streams_stay_in_range(
        seed in "[a-z]{1,16}",
        turn in 0u32..10_000,
        lo in 0i64..50,
        span in 0i64..50,
    ) {
        let mut rng = PhaseRng::from_key(&seed, turn, "expansion");
        for _ in 0..32 {
            let f = rng.next_f64();
            prop_assert!((0.0..1.0).contains(&f));
            let n = rng.next_int(lo, lo + span);
            prop_assert!(n >= lo && n <= lo + span);
        }
    }
}
