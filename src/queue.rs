use crate::geometry::disk_constants::CYLINDERS;
use crate::request::Request;

// Sentinel cylinder bounds. The head sits below every reachable cylinder
// and the tail above; neither is ever dispatched or removed.
const LIST_HEADER_CYLINDER: i32 = -1;
const LIST_TRAILER_CYLINDER: i32 = CYLINDERS;

// Sentinels occupy fixed arena slots.
const HEAD: usize = 0;
const TAIL: usize = 1;

struct Node {
    // None for the two sentinels, Some for live entries.
    entry: Option<Request>,
    cylinder: i32,
    next: usize,
}

/// Pending requests kept sorted ascending by cylinder number.
///
/// Arena-backed singly linked list: nodes live in a `Vec`, links are
/// indices, and vacated slots are recycled through a free list. The
/// sentinel pair makes insertion, removal, and the scan walk edge-case
/// free, exactly as in the pointer-linked original.
pub struct RequestQueue {
    nodes: Vec<Node>,
    free: Vec<usize>,
}

impl RequestQueue {
    pub fn new() -> Self {
        let nodes = vec![
            Node {
                entry: None,
                cylinder: LIST_HEADER_CYLINDER,
                next: TAIL,
            },
            Node {
                entry: None,
                cylinder: LIST_TRAILER_CYLINDER,
                next: TAIL,
            },
        ];
        Self {
            nodes,
            free: Vec::new(),
        }
    }

    /// Number of live entries, by traversal.
    pub fn count_pending(&self) -> usize {
        let mut count = 0;
        let mut current = self.nodes[HEAD].next;
        while current != TAIL {
            count += 1;
            current = self.nodes[current].next;
        }
        count
    }

    pub fn is_empty(&self) -> bool {
        self.nodes[HEAD].next == TAIL
    }

    /// Splices the request in before the first entry with a strictly
    /// greater cylinder number, so equal cylinders keep arrival order.
    pub fn insert(&mut self, request: Request) {
        let cylinder = request.geometry.cylinder;

        let mut previous = HEAD;
        let mut current = self.nodes[HEAD].next;
        while current != TAIL && self.nodes[current].cylinder <= cylinder {
            previous = current;
            current = self.nodes[current].next;
        }

        let node = Node {
            entry: Some(request),
            cylinder,
            next: current,
        };
        let slot = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };
        self.nodes[previous].next = slot;
    }

    /// Unlinks the entry with the given request number and returns it.
    /// Returns `None` when no entry matches, leaving the queue untouched.
    pub fn remove(&mut self, request_number: i32) -> Option<Request> {
        let mut previous = HEAD;
        let mut current = self.nodes[HEAD].next;
        while current != TAIL {
            let found = self.nodes[current]
                .entry
                .as_ref()
                .is_some_and(|entry| entry.request_number == request_number);
            if found {
                break;
            }
            previous = current;
            current = self.nodes[current].next;
        }
        if current == TAIL {
            return None;
        }

        self.nodes[previous].next = self.nodes[current].next;
        let request = self.nodes[current].entry.take();
        self.nodes[current].next = TAIL;
        self.free.push(current);
        request
    }

    /// One-directional circular scan: the first entry at or past the
    /// current head position, wrapping to the lowest cylinder when the
    /// walk runs off the end. `None` only on an empty queue.
    pub fn next_request(&self, current_cylinder: i32) -> Option<&Request> {
        let mut current = self.nodes[HEAD].next;
        while current != TAIL && self.nodes[current].cylinder < current_cylinder {
            current = self.nodes[current].next;
        }
        if current == TAIL {
            current = self.nodes[HEAD].next;
        }
        if current == TAIL {
            return None;
        }
        self.nodes[current].entry.as_ref()
    }

    /// Live entries in queue order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            queue: self,
            cursor: self.nodes[HEAD].next,
        }
    }
}

impl Default for RequestQueue {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Iter<'a> {
    queue: &'a RequestQueue,
    cursor: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Request;

    fn next(&mut self) -> Option<&'a Request> {
        if self.cursor == TAIL {
            return None;
        }
        let node = &self.queue.nodes[self.cursor];
        self.cursor = node.next;
        node.entry.as_ref()
    }
}
