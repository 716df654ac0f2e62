//! Recency List Module
//!
//! An arena-backed doubly linked list tracking cache entries from least
//! recently used (front) to most recently used (back).
//!
//! Nodes live in a `Vec` arena and link to each other by index, so the list
//! supports O(1) append, O(1) removal given an index, and O(1) pop-front
//! without the ownership cycles of pointer-based nodes. Freed slots are
//! recycled through a free list to avoid allocation churn.

// == Node Index ==
/// Stable index of a node in the arena. Handles stay valid until the node
/// is removed from the list.
pub type NodeIndex = usize;

/// Sentinel for absent links.
const NIL: NodeIndex = usize::MAX;

// == Node ==
/// A single entry threaded into the recency order.
#[derive(Debug)]
struct Node {
    key: String,
    value: i64,
    prev: NodeIndex,
    next: NodeIndex,
}

// == Recency List ==
/// Ordered sequence of cache entries by recency of use.
///
/// Front = least recently used, back = most recently used.
#[derive(Debug, Default)]
pub struct RecencyList {
    /// Contiguous node storage
    arena: Vec<Node>,
    /// Recycled arena slots
    free: Vec<NodeIndex>,
    /// Least recently used node
    head: NodeIndex,
    /// Most recently used node
    tail: NodeIndex,
    /// Number of linked nodes
    len: usize,
}

impl RecencyList {
    // == Constructor ==
    /// Creates a new empty recency list.
    pub fn new() -> Self {
        Self {
            arena: Vec::new(),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
            len: 0,
        }
    }

    // == Push Back ==
    /// Appends an entry at the most-recently-used end.
    ///
    /// Returns a stable index for later `move_to_back`/`remove` calls.
    pub fn push_back(&mut self, key: String, value: i64) -> NodeIndex {
        let index = match self.free.pop() {
            Some(slot) => {
                let node = &mut self.arena[slot];
                node.key = key;
                node.value = value;
                slot
            }
            None => {
                self.arena.push(Node {
                    key,
                    value,
                    prev: NIL,
                    next: NIL,
                });
                self.arena.len() - 1
            }
        };
        self.attach_back(index);
        self.len += 1;
        index
    }

    // == Move To Back ==
    /// Re-links an entry at the most-recently-used end.
    pub fn move_to_back(&mut self, index: NodeIndex) {
        if self.tail == index {
            return;
        }
        self.unlink(index);
        self.attach_back(index);
    }

    // == Remove ==
    /// Unlinks the entry at `index` and returns its key and value.
    ///
    /// Passing an index that is not currently linked is a programming error.
    pub fn remove(&mut self, index: NodeIndex) -> (String, i64) {
        assert!(index < self.arena.len(), "node index out of bounds");
        self.unlink(index);
        self.free.push(index);
        self.len -= 1;
        let node = &mut self.arena[index];
        (std::mem::take(&mut node.key), node.value)
    }

    // == Pop Front ==
    /// Removes and returns the least-recently-used entry.
    ///
    /// # Panics
    /// Panics if the list is empty; popping an empty list is a programming
    /// error, distinct from a key lookup miss.
    pub fn pop_front(&mut self) -> (String, i64) {
        assert!(self.head != NIL, "pop_front on empty recency list");
        self.remove(self.head)
    }

    // == Front ==
    /// Returns the least-recently-used entry without removing it.
    pub fn front(&self) -> Option<(&str, i64)> {
        if self.head == NIL {
            return None;
        }
        let node = &self.arena[self.head];
        Some((node.key.as_str(), node.value))
    }

    // == Value ==
    /// Returns the value stored at `index`.
    pub fn value(&self, index: NodeIndex) -> i64 {
        self.arena[index].value
    }

    // == Length ==
    /// Returns the number of linked entries.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Internal Linking ==
    /// Links an unlinked node at the tail.
    fn attach_back(&mut self, index: NodeIndex) {
        let old_tail = self.tail;
        {
            let node = &mut self.arena[index];
            node.prev = old_tail;
            node.next = NIL;
        }
        if old_tail == NIL {
            self.head = index;
        } else {
            self.arena[old_tail].next = index;
        }
        self.tail = index;
    }

    /// Detaches a node from its neighbors, fixing up head/tail.
    fn unlink(&mut self, index: NodeIndex) {
        let (prev, next) = {
            let node = &self.arena[index];
            (node.prev, node.next)
        };
        if prev == NIL {
            self.head = next;
        } else {
            self.arena[prev].next = next;
        }
        if next == NIL {
            self.tail = prev;
        } else {
            self.arena[next].prev = prev;
        }
        let node = &mut self.arena[index];
        node.prev = NIL;
        node.next = NIL;
    }
}
