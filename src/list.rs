//! Arena-backed doubly linked list with sentinel head and tail.
//!
//! Nodes live in a contiguous `Vec` and link to each other by index, so the
//! list needs no raw pointers and no reference counting. Two slots are
//! reserved for the head and tail sentinels, which keeps every attach and
//! detach free of edge cases. Freed slots are recycled through a free list.
//!
//! ```text
//!   nodes: [HEAD] [TAIL] [ a ] [ b ] [free] [ c ]
//!
//!   HEAD ─► a ◄──► c ◄──► b ◄── TAIL
//!   front                      back
//! ```
//!
//! A [`NodeId`] stays valid until its node is removed. Callers keep ids in
//! their own maps and must drop an id when they remove its node.

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

const HEAD: usize = 0;
const TAIL: usize = 1;

/// Stable handle to a node in a [`List`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

struct Node<T> {
    /// `None` for sentinels and free slots.
    val: Option<T>,
    prev: usize,
    next: usize,
}

/// Doubly linked list over an index arena.
pub(crate) struct List<T> {
    nodes: Vec<Node<T>>,
    free: Vec<usize>,
    len: usize,
}

impl<T> List<T> {
    /// Creates an empty list.
    pub(crate) fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `cap` nodes before reallocating.
    pub(crate) fn with_capacity(cap: usize) -> Self {
        let mut nodes = Vec::with_capacity(cap + 2);
        nodes.push(Node {
            val: None,
            prev: HEAD,
            next: TAIL,
        });
        nodes.push(Node {
            val: None,
            prev: HEAD,
            next: TAIL,
        });
        List {
            nodes,
            free: Vec::new(),
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Id of the first node, if any.
    #[inline]
    pub(crate) fn first_id(&self) -> Option<NodeId> {
        let first = self.nodes[HEAD].next;
        (first != TAIL).then_some(NodeId(first))
    }

    /// Id of the last node, if any.
    #[inline]
    pub(crate) fn last_id(&self) -> Option<NodeId> {
        let last = self.nodes[TAIL].prev;
        (last != HEAD).then_some(NodeId(last))
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id.0).and_then(|node| node.val.as_ref())
    }

    /// Inserts `val` at the front and returns its id.
    pub(crate) fn push_front(&mut self, val: T) -> NodeId {
        let idx = self.alloc(val);
        self.attach_after(idx, HEAD);
        self.len += 1;
        NodeId(idx)
    }

    /// Inserts `val` at the back and returns its id.
    pub(crate) fn push_back(&mut self, val: T) -> NodeId {
        let idx = self.alloc(val);
        let last = self.nodes[TAIL].prev;
        self.attach_after(idx, last);
        self.len += 1;
        NodeId(idx)
    }

    /// Removes the node `id` and returns its value.
    ///
    /// Returns `None` if `id` does not name a live node.
    pub(crate) fn remove(&mut self, id: NodeId) -> Option<T> {
        if !self.is_live(id.0) {
            return None;
        }
        self.detach(id.0);
        self.len -= 1;
        self.free.push(id.0);
        self.nodes[id.0].val.take()
    }

    /// Removes and returns the first value.
    pub(crate) fn remove_first(&mut self) -> Option<T> {
        let id = self.first_id()?;
        self.remove(id)
    }

    /// Removes and returns the last value.
    pub(crate) fn remove_last(&mut self) -> Option<T> {
        let id = self.last_id()?;
        self.remove(id)
    }

    /// Moves a live node to the front. Returns `false` if `id` is not live.
    pub(crate) fn move_to_front(&mut self, id: NodeId) -> bool {
        if !self.is_live(id.0) {
            return false;
        }
        if self.nodes[HEAD].next != id.0 {
            self.detach(id.0);
            self.attach_after(id.0, HEAD);
        }
        true
    }

    /// Iterates values from front to back.
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.nodes[HEAD].next,
            remaining: self.len,
        }
    }

    #[inline]
    fn is_live(&self, idx: usize) -> bool {
        idx > TAIL && self.nodes.get(idx).is_some_and(|node| node.val.is_some())
    }

    fn alloc(&mut self, val: T) -> usize {
        let node = Node {
            val: Some(val),
            prev: HEAD,
            next: TAIL,
        };
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn detach(&mut self, idx: usize) {
        let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
    }

    fn attach_after(&mut self, idx: usize, after: usize) {
        let next = self.nodes[after].next;
        self.nodes[idx].prev = after;
        self.nodes[idx].next = next;
        self.nodes[after].next = idx;
        self.nodes[next].prev = idx;
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Front-to-back iterator over a [`List`].
pub(crate) struct Iter<'a, T> {
    list: &'a List<T>,
    current: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.current == TAIL {
            return None;
        }
        let node = &self.list.nodes[self.current];
        self.current = node.next;
        self.remaining -= 1;
        node.val.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
