use crate::queue::RequestQueue;
use crate::request::{shared_buffer, ClientMessage, Request, WRITE_OP_CODE};

fn request(request_number: i32, block_number: i32) -> Request {
    Request::from_message(&ClientMessage {
        operation_code: WRITE_OP_CODE,
        request_number,
        block_number,
        block_size: 512,
        data: Some(shared_buffer(&[0u8; 512])),
    })
}

fn cylinders(queue: &RequestQueue) -> Vec<i32> {
    queue.iter().map(|entry| entry.geometry.cylinder).collect()
}

fn request_numbers(queue: &RequestQueue) -> Vec<i32> {
    queue.iter().map(|entry| entry.request_number).collect()
}

#[test]
fn empty_queue() {
    let queue = RequestQueue::new();
    assert!(queue.is_empty());
    assert_eq!(queue.count_pending(), 0);
    assert!(queue.next_request(0).is_none());
}

#[test]
fn inserts_keep_cylinder_order() {
    let mut queue = RequestQueue::new();
    for (id, block) in [(1, 100), (2, 5), (3, 200), (4, 50), (5, 51), (6, 300), (7, 1)] {
        queue.insert(request(id, block));

        // The sortedness invariant holds after every insert, not just at
        // the end.
        let order = cylinders(&queue);
        let mut sorted = order.clone();
        sorted.sort_unstable();
        assert_eq!(order, sorted);
    }
    assert_eq!(queue.count_pending(), 7);
}

#[test]
fn equal_cylinders_keep_arrival_order() {
    let mut queue = RequestQueue::new();
    // Blocks 10, 11, and 12 all map to cylinder 1.
    queue.insert(request(1, 10));
    queue.insert(request(2, 11));
    queue.insert(request(3, 12));

    assert_eq!(cylinders(&queue), vec![1, 1, 1]);
    assert_eq!(request_numbers(&queue), vec![1, 2, 3]);
}

#[test]
fn remove_existing_entry() {
    let mut queue = RequestQueue::new();
    queue.insert(request(1, 50));
    queue.insert(request(2, 10));
    queue.insert(request(3, 30));

    let removed = queue.remove(3);
    assert_eq!(removed.map(|entry| entry.block_number), Some(30));
    assert_eq!(queue.count_pending(), 2);
    assert_eq!(request_numbers(&queue), vec![2, 1]);
}

#[test]
fn remove_missing_entry_is_a_no_op() {
    let mut queue = RequestQueue::new();
    queue.insert(request(1, 50));
    queue.insert(request(2, 10));
    let before = request_numbers(&queue);

    assert!(queue.remove(99).is_none());
    assert_eq!(queue.count_pending(), 2);
    assert_eq!(request_numbers(&queue), before);
}

#[test]
fn arena_slots_are_recycled() {
    let mut queue = RequestQueue::new();
    for round in 0..3 {
        for id in 1..=5 {
            queue.insert(request(id, 10 + id));
        }
        for id in 1..=5 {
            assert!(queue.remove(id).is_some(), "round {} id {}", round, id);
        }
        assert!(queue.is_empty());
    }
}
