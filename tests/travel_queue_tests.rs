//! Tests for the travel queue ordering rules

use house_elevator_simulator::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn queue_of(floors: &[u32]) -> TravelQueue {
    let mut queue = TravelQueue::new();
    for floor in floors {
        queue.push_back(FloorId(*floor));
    }
    queue
}

#[test]
fn test_calls_never_preempt() {
    let mut queue = queue_of(&[4, 2]);
    queue.push_back(FloorId(7));
    assert_eq!(queue.head(), Some(FloorId(4)));
    assert_eq!(queue.to_vec(), vec![FloorId(4), FloorId(2), FloorId(7)]);
}

#[test]
fn test_selection_jumps_the_queue() {
    let mut queue = queue_of(&[4, 2, 7]);
    queue.move_to_front(FloorId(7));
    assert_eq!(queue.to_vec(), vec![FloorId(7), FloorId(4), FloorId(2)]);
    assert_eq!(queue.len(), 3);
}

#[test]
fn test_latched_head_survives_selection() {
    let mut queue = queue_of(&[4, 2, 7]);
    queue.insert_after_head(FloorId(7));
    assert_eq!(queue.to_vec(), vec![FloorId(4), FloorId(7), FloorId(2)]);
}

#[test]
fn test_mixed_operations_never_duplicate() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut queue = TravelQueue::new();

    for _ in 0..1_000 {
        let floor = FloorId(rng.gen_range(1..=8));
        match rng.gen_range(0..4) {
            0 => {
                queue.push_back(floor);
            }
            1 => queue.move_to_front(floor),
            2 => queue.insert_after_head(floor),
            _ => {
                queue.pop_front();
            }
        }

        let mut floors = queue.to_vec();
        floors.sort();
        floors.dedup();
        assert_eq!(floors.len(), queue.len());
        assert!(queue.len() <= 8);
    }
}

#[test]
fn test_queue_json_is_visiting_order() {
    let queue = queue_of(&[5, 1, 3]);
    let json = serde_json::to_string(&queue).unwrap();
    assert_eq!(json, "[5,1,3]");
}
