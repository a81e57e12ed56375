// src/services/expander.rs

//! Subtree expansion.
//!
//! Turns an edit root into a tree holding every descendant reachable through
//! child listings. The walk is breadth-first over an index arena; the owned
//! tree is assembled once the walk is done.
//!
//! ```text
//!        root_1            root_2    ...    root_n
//!          |                 |                 |
//!     +----+----+        +---+---+            ...
//!     |    |    |        |       |
//!     A    B    C        J       K
//!    / \   |            /|\
//!   D   E  F           L M N
//! ```

use std::collections::{HashSet, VecDeque};

use crate::error::Result;
use crate::models::{ContentUnit, Forest, UnitId, UnitTree, VisitedSet};
use crate::services::fetch_all_children;
use crate::source::ContentSource;

/// A node under construction: its unit and the arena indices of its children.
struct ArenaNode {
    unit: ContentUnit,
    children: Vec<usize>,
}

/// Service for expanding edit roots into trees.
pub struct SubtreeExpander<'a> {
    source: &'a dyn ContentSource,
}

impl<'a> SubtreeExpander<'a> {
    pub fn new(source: &'a dyn ContentSource) -> Self {
        Self { source }
    }

    /// Expand `root` into a tree of all its reachable, non-empty descendants.
    ///
    /// Units already in `visited` are left out. Empty descendants are pruned
    /// together with everything below them; their children are never
    /// fetched. The root itself is kept whatever its text.
    pub async fn expand(&self, root: ContentUnit, visited: &mut VisitedSet) -> Result<UnitTree> {
        let mut arena = vec![ArenaNode {
            unit: root,
            children: Vec::new(),
        }];
        let mut queue = VecDeque::from([0usize]);
        // Units attached but not yet dequeued; keeps a unit listed under two
        // parents from being attached twice within one expansion.
        let mut pending: HashSet<UnitId> = HashSet::new();

        while let Some(index) = queue.pop_front() {
            let unit = &arena[index].unit;
            log::debug!("Expanding unit {} ({:?})", unit.id(), unit.plain_text());

            if !visited.insert(unit.id()) {
                log::trace!("Already visited unit {}, skipping it", unit.id());
                continue;
            }
            if !unit.has_children() {
                continue;
            }

            let (parent_id, document_id) = (unit.id().clone(), unit.document_id().clone());
            log::trace!("Unit {} has children, fetching them", parent_id);
            let children = fetch_all_children(self.source, &parent_id, &document_id).await?;

            for child in children {
                if visited.contains(child.id()) || pending.contains(child.id()) {
                    log::trace!("Already visited child unit {}, skipping it", child.id());
                    continue;
                }
                if child.is_empty() {
                    continue;
                }

                pending.insert(child.id().clone());
                let child_index = arena.len();
                arena.push(ArenaNode {
                    unit: child,
                    children: Vec::new(),
                });
                arena[index].children.push(child_index);
                queue.push_back(child_index);
            }
        }

        Ok(assemble(arena))
    }

    /// Expand each root in turn, sharing `visited` across all of them.
    ///
    /// A unit reachable from two roots ends up under whichever root reaches
    /// it first. A root that was already visited when its turn comes is
    /// dropped, so no unit appears twice in the forest.
    pub async fn expand_all(
        &self,
        roots: Vec<ContentUnit>,
        visited: &mut VisitedSet,
    ) -> Result<Forest> {
        let mut forest = Vec::with_capacity(roots.len());
        for root in roots {
            if visited.contains(root.id()) {
                log::trace!("Edit root {} already expanded elsewhere, skipping it", root.id());
                continue;
            }
            forest.push(self.expand(root, visited).await?);
        }
        Ok(forest)
    }
}

/// Turn the arena into an owned tree rooted at index 0.
///
/// Children always sit at higher indices than their parent, so building from
/// the back finishes every subtree before its parent needs it.
fn assemble(arena: Vec<ArenaNode>) -> UnitTree {
    let mut built: Vec<Option<UnitTree>> = Vec::with_capacity(arena.len());
    built.resize_with(arena.len(), || None);

    for (index, node) in arena.into_iter().enumerate().rev() {
        let children = node
            .children
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();
        built[index] = Some(UnitTree {
            unit: node.unit,
            children,
        });
    }

    built
        .into_iter()
        .next()
        .flatten()
        .expect("arena always holds the root")
}
