//! Breadth-first selector search
//!
//! ```text
//! "A B" → [Stage A, Stage B]
//!
//! working = {root}
//! working = ⋃ below(n, A) for n in working   (every A under root)
//! working = ⋃ below(n, B) for n in working   (every B under some A)
//! ```
//!
//! Each stage searches strictly below the nodes it starts from, through
//! their whole subtrees, so `"A B"` is a descendant query, never a
//! direct-child one and never a self-match. Searches only read the arena.

use crate::arena::DomArena;
use crate::queue::NodeQueue;
use crate::selector::{Selector, Stage};
use crate::types::{DomNode, NodeId};
use tracing::{debug, trace, warn};

/// Collect every node under `root` (inclusive) that passes `predicate`
///
/// Results come back in breadth-first order: the root, then each level
/// left to right. An absent root yields nothing.
pub fn find<F>(arena: &DomArena, root: Option<NodeId>, predicate: F) -> Vec<NodeId>
where
    F: Fn(&DomNode) -> bool,
{
    let mut queue = NodeQueue::new();

    if let Some(root_id) = root {
        queue.enqueue(root_id);
    }

    drain_matching(arena, queue, &predicate)
}

/// Like [`find`] but the start node itself is never tested
pub fn find_descendants<F>(arena: &DomArena, node_id: NodeId, predicate: F) -> Vec<NodeId>
where
    F: Fn(&DomNode) -> bool,
{
    let mut queue = NodeQueue::new();

    match arena.get(node_id) {
        Ok(node) => queue.enqueue_slice(&node.children_ids),
        Err(_) => warn!(node_id, "skipping dangling node reference"),
    }

    drain_matching(arena, queue, &predicate)
}

fn drain_matching<F>(arena: &DomArena, mut queue: NodeQueue, predicate: &F) -> Vec<NodeId>
where
    F: Fn(&DomNode) -> bool,
{
    let mut found = Vec::new();

    while let Some(node_id) = queue.dequeue() {
        let Ok(node) = arena.get(node_id) else {
            warn!(node_id, "skipping dangling child reference");
            continue;
        };

        if predicate(node) {
            found.push(node_id);
        }

        queue.enqueue_slice(&node.children_ids);
    }

    found
}

/// Apply `stages` in order, each one searching beneath the previous matches
///
/// The first stage searches below `root`. An empty stage list returns just
/// the root.
pub fn find_nested(arena: &DomArena, root: Option<NodeId>, stages: &[Stage]) -> Vec<NodeId> {
    let mut working: Vec<NodeId> = root.into_iter().collect();

    for (depth, stage) in stages.iter().enumerate() {
        let mut next = NodeQueue::new();

        for &node_id in &working {
            let matches = find_descendants(arena, node_id, |node| stage.matches(node));
            trace!(node_id, %stage, matches = matches.len(), "expanded node");
            next.enqueue_slice(&matches);
        }

        working = next.drain();
        debug!(depth, %stage, matches = working.len(), "applied selector stage");

        if working.is_empty() {
            break;
        }
    }

    working
}

/// Tokenize `selector` and run it from `root`
///
/// An absent root, an empty selector, or one made only of spaces matches
/// nothing.
pub fn find_j(arena: &DomArena, root: Option<NodeId>, selector: &str) -> Vec<NodeId> {
    if root.is_none() || selector.is_empty() {
        return Vec::new();
    }

    let selector = Selector::parse(selector);
    if selector.is_empty() {
        return Vec::new();
    }

    debug!(%selector, "running selector");
    find_nested(arena, root, selector.stages())
}

/// Elements under `root` with the given tag name
pub fn find_tags(arena: &DomArena, root: Option<NodeId>, tag: &str) -> Vec<NodeId> {
    let stage = Stage::Tag(tag.to_string());
    find(arena, root, |node| stage.matches(node))
}

/// Elements under `root` carrying the given class
pub fn find_class(arena: &DomArena, root: Option<NodeId>, class: &str) -> Vec<NodeId> {
    let stage = Stage::Class(class.to_string());
    find(arena, root, |node| stage.matches(node))
}

/// Text nodes under `root`
pub fn find_text(arena: &DomArena, root: Option<NodeId>) -> Vec<NodeId> {
    find(arena, root, |node| Stage::Text.matches(node))
}

impl DomArena {
    /// Run `selector` from the arena root
    pub fn select(&self, selector: &str) -> Vec<NodeId> {
        find_j(self, self.root_id(), selector)
    }
}
