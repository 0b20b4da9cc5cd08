//! Index-based intrusive doubly-linked lists.
//!
//! Every gain link and every list head is a node in one [`LinkArena`]. Item
//! nodes occupy the first `num_items` slots so that callers can address them
//! by a dense index; list heads (sentinels) are appended behind them with
//! [`LinkArena::alloc_head`]. A detached node points at itself.

/// Membership state of an arena node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// Not a member of any list.
    Detached,
    /// Member of a bucket or of the waiting list.
    Linked,
    /// Detached and immune to key updates until re-inserted.
    Locked,
}

#[derive(Debug, Clone)]
struct Node {
    prev: usize,
    next: usize,
    key: i32,
    state: LinkState,
}

impl Node {
    fn detached(index: usize) -> Self {
        Self {
            prev: index,
            next: index,
            key: 0,
            state: LinkState::Detached,
        }
    }
}

/// Dense arena of list nodes addressed by index.
#[derive(Debug, Clone)]
pub struct LinkArena {
    nodes: Vec<Node>,
    num_items: usize,
}

impl LinkArena {
    /// Creates an arena holding `num_items` detached item nodes.
    pub fn new(num_items: usize) -> Self {
        Self {
            nodes: (0..num_items).map(Node::detached).collect(),
            num_items,
        }
    }

    /// Returns the number of item nodes.
    pub fn num_items(&self) -> usize {
        self.num_items
    }

    /// Appends a self-looped node behind the items and returns its index.
    ///
    /// Used both for list heads and for sentinel members.
    pub fn alloc_head(&mut self) -> usize {
        let index = self.nodes.len();
        self.nodes.push(Node::detached(index));
        index
    }

    /// Returns the key stored on `item`.
    pub fn key(&self, item: usize) -> i32 {
        self.nodes[item].key
    }

    /// Overwrites the key stored on `item` without moving it.
    pub fn set_key(&mut self, item: usize, key: i32) {
        self.nodes[item].key = key;
    }

    /// Adds `delta` to the key stored on `item` without moving it.
    pub fn add_key(&mut self, item: usize, delta: i32) {
        self.nodes[item].key += delta;
    }

    /// Returns the membership state of `item`.
    pub fn state(&self, item: usize) -> LinkState {
        self.nodes[item].state
    }

    /// Returns whether `item` is locked.
    pub fn is_locked(&self, item: usize) -> bool {
        self.nodes[item].state == LinkState::Locked
    }

    /// Returns whether the list headed by `head` has no members.
    pub fn is_empty(&self, head: usize) -> bool {
        self.nodes[head].next == head
    }

    /// Returns the first member of the list headed by `head`.
    pub fn front(&self, head: usize) -> Option<usize> {
        let next = self.nodes[head].next;
        (next != head).then_some(next)
    }

    /// Inserts `item` at the back of the list headed by `head`.
    pub fn push_back(&mut self, head: usize, item: usize) {
        let last = self.nodes[head].prev;
        self.link_between(last, head, item);
    }

    /// Inserts `item` at the front of the list headed by `head`.
    pub fn push_front(&mut self, head: usize, item: usize) {
        let first = self.nodes[head].next;
        self.link_between(head, first, item);
    }

    fn link_between(&mut self, prev: usize, next: usize, item: usize) {
        debug_assert_ne!(self.nodes[item].state, LinkState::Linked);
        self.nodes[item].prev = prev;
        self.nodes[item].next = next;
        self.nodes[item].state = LinkState::Linked;
        self.nodes[prev].next = item;
        self.nodes[next].prev = item;
    }

    /// Removes `item` from whatever list it belongs to.
    ///
    /// Detaching a node that is not linked leaves it unchanged apart from the
    /// state flag.
    pub fn detach(&mut self, item: usize) {
        let Node { prev, next, .. } = self.nodes[item];
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        self.nodes[item].prev = item;
        self.nodes[item].next = item;
        self.nodes[item].state = LinkState::Detached;
    }

    /// Detaches `item` and marks it locked.
    pub fn lock(&mut self, item: usize) {
        self.detach(item);
        self.nodes[item].state = LinkState::Locked;
    }

    /// Removes and returns the first member of the list headed by `head`.
    pub fn pop_front(&mut self, head: usize) -> Option<usize> {
        let item = self.front(head)?;
        self.detach(item);
        Some(item)
    }

    /// Detaches every member of the list headed by `head`.
    pub fn clear(&mut self, head: usize) {
        while self.pop_front(head).is_some() {}
    }

    /// Iterates over the members of the list headed by `head`, front to back.
    pub fn iter(&self, head: usize) -> impl Iterator<Item = usize> + '_ {
        let mut cursor = self.nodes[head].next;
        std::iter::from_fn(move || {
            if cursor == head {
                return None;
            }
            let item = cursor;
            cursor = self.nodes[item].next;
            Some(item)
        })
    }
}
