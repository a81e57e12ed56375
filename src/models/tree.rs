// src/models/tree.rs

//! Expanded edit roots and the visited-unit bookkeeping used while building them.

use std::collections::HashSet;

use serde::Serialize;

use crate::models::{ContentUnit, UnitId};

/// One edit root with all of its kept descendants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitTree {
    pub unit: ContentUnit,
    pub children: Vec<UnitTree>,
}

/// Expanded edit roots, in the order the roots were discovered.
pub type Forest = Vec<UnitTree>;

impl UnitTree {
    pub fn leaf(unit: ContentUnit) -> Self {
        Self {
            unit,
            children: Vec::new(),
        }
    }

    /// Number of nodes in this tree, root included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(UnitTree::node_count).sum::<usize>()
    }

    /// Unit IDs in pre-order.
    pub fn unit_ids(&self) -> Vec<&UnitId> {
        let mut ids = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            ids.push(node.unit.id());
            stack.extend(node.children.iter().rev());
        }
        ids
    }
}

/// Unit IDs already processed by a scan or an expansion.
///
/// Guards traversal against cycles and duplicate parent/child links in the
/// source data. Not thread-safe by itself; hand it between sequential steps.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    ids: HashSet<UnitId>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `id` as visited. Returns `false` if it already was.
    pub fn insert(&mut self, id: &UnitId) -> bool {
        if self.ids.contains(id) {
            return false;
        }
        self.ids.insert(id.clone())
    }

    pub fn contains(&self, id: &UnitId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
