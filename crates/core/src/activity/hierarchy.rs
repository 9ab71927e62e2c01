//! Activity group forest, built from the flat list storage returns
//!
//! Nodes live in one arena `Vec`; parents hold the arena indices of their
//! children. A group that declares `match_response_text` and also has child
//! groups gets an extra synthetic child standing for responses that match
//! the group's text exactly. The synthetic node exists only here and in the
//! aggregation tree built from it.

use std::cmp::Ordering;

use ahash::{AHashMap as HashMap, AHashSet as HashSet};
use tallyline_domain::ActivityGroupNode;
use tracing::warn;
use uuid::Uuid;

/// What a hierarchy node stands for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HierarchyNodeKind {
    Group(ActivityGroupNode),
    /// Literal matches of the parent group's own text
    ExactParentMatch { parent_group_id: Uuid, response_text: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyNode {
    pub kind: HierarchyNodeKind,
    children: Vec<usize>,
}

impl HierarchyNode {
    /// Arena indices of the children, in display order
    pub fn children(&self) -> &[usize] {
        &self.children
    }

    pub fn group(&self) -> Option<&ActivityGroupNode> {
        match &self.kind {
            HierarchyNodeKind::Group(group) => Some(group),
            HierarchyNodeKind::ExactParentMatch { .. } => None,
        }
    }

    pub fn is_exact_parent_match(&self) -> bool {
        matches!(self.kind, HierarchyNodeKind::ExactParentMatch { .. })
    }

    /// Response text this node captures, if any
    pub fn match_response_text(&self) -> Option<&str> {
        match &self.kind {
            HierarchyNodeKind::Group(group) => group.match_response_text.as_deref(),
            HierarchyNodeKind::ExactParentMatch { response_text, .. } => Some(response_text),
        }
    }
}

/// Forest of activity groups
#[derive(Debug, Clone, Default)]
pub struct ActivityHierarchy {
    nodes: Vec<HierarchyNode>,
    roots: Vec<usize>,
    by_group: HashMap<Uuid, usize>,
}

impl ActivityHierarchy {
    /// Build the forest.
    ///
    /// Groups whose parent is not in `groups` become roots. Duplicate ids
    /// keep the first occurrence. Cycles are not detected; groups on a
    /// cycle are unreachable from any root.
    pub fn build(groups: Vec<ActivityGroupNode>) -> Self {
        let mut hierarchy = Self::default();

        for group in groups {
            if hierarchy.by_group.contains_key(&group.id) {
                warn!(group_id = %group.id, "Duplicate activity group id; keeping first");
                continue;
            }
            hierarchy.by_group.insert(group.id, hierarchy.nodes.len());
            hierarchy.nodes.push(HierarchyNode { kind: HierarchyNodeKind::Group(group), children: Vec::new() });
        }

        for idx in 0..hierarchy.nodes.len() {
            let (group_id, parent_id) = match hierarchy.nodes[idx].group() {
                Some(group) => (group.id, group.parent_id),
                None => continue,
            };
            let parent_idx = match parent_id {
                None => None,
                Some(parent_id) if parent_id == group_id => {
                    warn!(group_id = %group_id, "Activity group is its own parent; treating as root");
                    None
                }
                Some(parent_id) => {
                    let found = hierarchy.by_group.get(&parent_id).copied();
                    if found.is_none() {
                        warn!(group_id = %group_id, parent_id = %parent_id, "Parent activity group missing; treating as root");
                    }
                    found
                }
            };
            match parent_idx {
                Some(parent_idx) => hierarchy.nodes[parent_idx].children.push(idx),
                None => hierarchy.roots.push(idx),
            }
        }

        let group_count = hierarchy.nodes.len();
        for idx in 0..group_count {
            hierarchy.sort_children(idx);
            hierarchy.add_exact_match_child(idx);
        }
        let mut roots = std::mem::take(&mut hierarchy.roots);
        roots.sort_by(|a, b| hierarchy.sibling_order(*a, *b));
        hierarchy.roots = roots;

        hierarchy
    }

    fn sibling_order(&self, a: usize, b: usize) -> Ordering {
        match (self.nodes[a].group(), self.nodes[b].group()) {
            (Some(a), Some(b)) => a.position.cmp(&b.position).then_with(|| a.name.cmp(&b.name)),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }

    fn sort_children(&mut self, idx: usize) {
        let mut children = std::mem::take(&mut self.nodes[idx].children);
        children.sort_by(|a, b| self.sibling_order(*a, *b));
        self.nodes[idx].children = children;
    }

    fn add_exact_match_child(&mut self, idx: usize) {
        let synthetic = match self.nodes[idx].group() {
            Some(group) if !self.nodes[idx].children.is_empty() => group.match_response_text.as_ref().map(|text| {
                HierarchyNodeKind::ExactParentMatch { parent_group_id: group.id, response_text: text.clone() }
            }),
            _ => None,
        };
        if let Some(kind) = synthetic {
            let child = self.nodes.len();
            self.nodes.push(HierarchyNode { kind, children: Vec::new() });
            self.nodes[idx].children.insert(0, child);
        }
    }

    /// Arena indices of the top-level nodes, in display order
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    pub fn node(&self, idx: usize) -> Option<&HierarchyNode> {
        self.nodes.get(idx)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Arena index of the node for `group_id`
    pub fn find_group(&self, group_id: Uuid) -> Option<usize> {
        self.by_group.get(&group_id).copied()
    }

    pub fn group(&self, group_id: Uuid) -> Option<&ActivityGroupNode> {
        self.find_group(group_id).and_then(|idx| self.nodes[idx].group())
    }

    /// Ids of the ancestors of `group_id`, nearest first. Stops at the first
    /// missing parent or repeated id.
    pub fn ancestors_of(&self, group_id: Uuid) -> Vec<Uuid> {
        let mut ancestors = Vec::new();
        let mut seen = HashSet::new();
        seen.insert(group_id);

        let mut current = self.group(group_id).and_then(|group| group.parent_id);
        while let Some(parent_id) = current {
            let Some(parent) = self.group(parent_id) else { break };
            if !seen.insert(parent_id) {
                break;
            }
            ancestors.push(parent_id);
            current = parent.parent_id;
        }
        ancestors
    }

    /// Whether moving `group_id` under `new_parent_id` would make the group
    /// its own ancestor
    pub fn would_create_cycle(&self, group_id: Uuid, new_parent_id: Option<Uuid>) -> bool {
        match new_parent_id {
            None => false,
            Some(parent_id) if parent_id == group_id => true,
            Some(parent_id) => self.ancestors_of(parent_id).contains(&group_id),
        }
    }
}
