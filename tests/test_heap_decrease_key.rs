// tests/test_heap_decrease_key.rs
// Indexed heap stress tests: comparator ordering, decrease-key behavior, and
// the id<->slot bookkeeping that every swap must maintain.
// RELEVANT FILES:src/heap.rs

use quadnav::IndexedHeap;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

#[test]
fn drains_shuffled_priorities_in_order() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    let mut priorities: Vec<u32> = (0..500).collect();
    priorities.shuffle(&mut rng);

    let mut heap = IndexedHeap::new(|a: &u32, b: &u32| a < b);
    for (id, &p) in priorities.iter().enumerate() {
        assert!(heap.push(p, id as u32));
    }
    for expected in 0..500u32 {
        assert_eq!(*heap.top_value(), expected);
        heap.pop();
    }
    assert!(heap.is_empty());
}

#[test]
fn decrease_key_moves_entry_to_the_front() {
    let mut heap = IndexedHeap::new(|a: &u32, b: &u32| a < b);
    for id in 0..10u32 {
        heap.push(100 + id, id);
    }
    // Improving the worst entry makes it the best; its id follows it.
    assert!(heap.push(1, 9));
    assert_eq!(heap.top_id(), 9);
    assert_eq!(*heap.top_value(), 1);
    assert_eq!(heap.len(), 10, "decrease-key must not grow the heap");

    heap.pop();
    assert_eq!(*heap.top_value(), 100);
    assert_eq!(heap.top_id(), 0);
}

#[test]
fn interleaved_ops_match_reference_model() {
    // Random pushes, improvements, and pops against a flat reference map.
    // Unique priorities keep the expected pop order unambiguous.
    let mut rng = rand::rngs::StdRng::seed_from_u64(0xc0ffee);
    let mut fresh: Vec<u64> = (0..4_000).collect();
    fresh.shuffle(&mut rng);

    let mut heap = IndexedHeap::new(|a: &u64, b: &u64| a < b);
    let mut model: Vec<Option<u64>> = vec![None; 256];

    for _ in 0..2_000 {
        match rng.gen_range(0..3) {
            0 | 1 => {
                let id = rng.gen_range(0..256u32);
                let value = fresh.pop().unwrap();
                let updated = heap.push(value, id);
                let expect_update = model[id as usize].map_or(true, |old| value < old);
                assert_eq!(updated, expect_update, "push report wrong for id {id}");
                if expect_update {
                    model[id as usize] = Some(value);
                }
            }
            _ => {
                let best = model
                    .iter()
                    .enumerate()
                    .filter_map(|(id, v)| v.map(|v| (v, id)))
                    .min();
                match best {
                    None => assert!(heap.is_empty()),
                    Some((value, id)) => {
                        assert_eq!(heap.len(), model.iter().flatten().count());
                        assert_eq!(*heap.top_value(), value);
                        assert_eq!(heap.top_id(), id as u32);
                        heap.pop();
                        model[id] = None;
                    }
                }
            }
        }
    }
}

#[test]
fn reinserting_a_popped_id_is_a_fresh_entry() {
    let mut heap = IndexedHeap::new(|a: &u32, b: &u32| a < b);
    heap.push(5, 1);
    heap.push(6, 2);
    heap.pop(); // removes id 1
    assert!(
        heap.push(50, 1),
        "a popped id must insert even with a worse value than before"
    );
    assert_eq!(heap.len(), 2);
    assert_eq!(heap.top_id(), 2);
}
