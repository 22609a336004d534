//! DOM Tree (arena-based allocation)
//!
//! Containers own their children through the arena; every link stored in a
//! [`Node`] is a plain index. The linking primitives here keep
//! `first_child`/`last_child` and the sibling chain consistent and do no
//! validation: callers in `operations.rs` check hierarchy rules first.

use crate::generation::Generation;
use crate::{Node, NodeId};

#[derive(Debug)]
struct Slot {
    generation: Generation,
    node: Option<Node>,
}

/// Arena-based DOM tree for memory efficiency
#[derive(Debug, Default)]
pub struct DomTree {
    slots: Vec<Slot>,
    /// Indices of released slots, reused before growing
    free: Vec<u32>,
    live: usize,
}

impl DomTree {
    /// Create a new empty DOM tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a node and return its id
    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: Generation::INITIAL,
            node: Some(node),
        });
        NodeId {
            index,
            generation: Generation::INITIAL,
        }
    }

    /// Drop a node and recycle its slot; outstanding ids become stale
    pub(crate) fn free(&mut self, id: NodeId) -> Option<Node> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let node = slot.node.take()?;
        slot.generation = slot.generation.next();
        self.free.push(id.index);
        self.live -= 1;
        Some(node)
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    /// Get a mutable node by ID
    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Is this id live
    pub fn contains_id(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.live
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Parent of a node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// First child of a node
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.first_child)
    }

    /// Last child of a node
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.last_child)
    }

    /// Next sibling of a node
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Previous sibling of a node
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Iterate children in order
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.first_child(id),
        }
    }

    /// Iterate ancestors, from parent to root
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Pre-order walk of the subtree rooted at `root`, including `root`
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            root,
            next: self.get(root).map(|_| root),
        }
    }

    /// Is `ancestor` equal to `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        node == ancestor || self.ancestors(node).any(|id| id == ancestor)
    }

    /// Link a detached `child` into `parent` before `reference` (or at the end)
    pub(crate) fn link_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        let prev = match reference {
            Some(r) => self.prev_sibling(r),
            None => self.last_child(parent),
        };

        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
            node.prev_sibling = prev;
            node.next_sibling = reference;
        }

        match prev {
            Some(p) => {
                if let Some(node) = self.get_mut(p) {
                    node.next_sibling = Some(child);
                }
            }
            None => {
                if let Some(node) = self.get_mut(parent) {
                    node.first_child = Some(child);
                }
            }
        }

        match reference {
            Some(r) => {
                if let Some(node) = self.get_mut(r) {
                    node.prev_sibling = Some(child);
                }
            }
            None => {
                if let Some(node) = self.get_mut(parent) {
                    node.last_child = Some(child);
                }
            }
        }
    }

    /// Detach `child` from its parent, closing the gap in the sibling chain
    pub(crate) fn unlink(&mut self, child: NodeId) {
        let Some(node) = self.get_mut(child) else {
            return;
        };
        let Some(parent) = node.parent.take() else {
            return;
        };
        let prev = node.prev_sibling.take();
        let next = node.next_sibling.take();

        match prev {
            Some(p) => {
                if let Some(node) = self.get_mut(p) {
                    node.next_sibling = next;
                }
            }
            None => {
                if let Some(node) = self.get_mut(parent) {
                    node.first_child = next;
                }
            }
        }
        match next {
            Some(n) => {
                if let Some(node) = self.get_mut(n) {
                    node.prev_sibling = prev;
                }
            }
            None => {
                if let Some(node) = self.get_mut(parent) {
                    node.last_child = prev;
                }
            }
        }
    }

    /// Move the whole child run of `from` into `parent` before `reference`
    ///
    /// Only the two boundary links on each side are rewritten, plus the
    /// parent pointer of every moved child. Returns the moved children in
    /// order; `from` is left empty.
    pub(crate) fn splice_children(
        &mut self,
        from: NodeId,
        parent: NodeId,
        reference: Option<NodeId>,
    ) -> Vec<NodeId> {
        let moved: Vec<NodeId> = self.children(from).collect();
        let (Some(&first), Some(&last)) = (moved.first(), moved.last()) else {
            return moved;
        };

        if let Some(node) = self.get_mut(from) {
            node.first_child = None;
            node.last_child = None;
        }
        for &child in &moved {
            if let Some(node) = self.get_mut(child) {
                node.parent = Some(parent);
            }
        }

        let prev = match reference {
            Some(r) => self.prev_sibling(r),
            None => self.last_child(parent),
        };

        if let Some(node) = self.get_mut(first) {
            node.prev_sibling = prev;
        }
        if let Some(node) = self.get_mut(last) {
            node.next_sibling = reference;
        }
        match prev {
            Some(p) => {
                if let Some(node) = self.get_mut(p) {
                    node.next_sibling = Some(first);
                }
            }
            None => {
                if let Some(node) = self.get_mut(parent) {
                    node.first_child = Some(first);
                }
            }
        }
        match reference {
            Some(r) => {
                if let Some(node) = self.get_mut(r) {
                    node.prev_sibling = Some(last);
                }
            }
            None => {
                if let Some(node) = self.get_mut(parent) {
                    node.last_child = Some(last);
                }
            }
        }
        moved
    }

    /// Approximate bytes held by the arena
    pub fn memory_usage(&self) -> usize {
        self.slots.capacity() * std::mem::size_of::<Slot>()
            + self.free.capacity() * std::mem::size_of::<u32>()
    }
}

/// Iterator over children of a node
pub struct Children<'a> {
    tree: &'a DomTree,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = self.tree.next_sibling(id);
        Some(id)
    }
}

/// Iterator over ancestors of a node
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = self.tree.parent(id);
        Some(id)
    }
}

/// Pre-order iterator over a subtree
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: Option<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = match self.tree.first_child(id) {
            Some(child) => Some(child),
            None => {
                // Climb until a node with a next sibling, stopping at the root
                let mut current = id;
                loop {
                    if current == self.root {
                        break None;
                    }
                    if let Some(sibling) = self.tree.next_sibling(current) {
                        break Some(sibling);
                    }
                    match self.tree.parent(current) {
                        Some(parent) => current = parent,
                        None => break None,
                    }
                }
            }
        };
        Some(id)
    }
}
