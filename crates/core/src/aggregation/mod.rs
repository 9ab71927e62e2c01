//! Aggregation tree mirroring the activity hierarchy
//!
//! The tree is built once per report from an [`ActivityHierarchy`], then
//! filled by looking up each visible entry's text with
//! [`AggregationHierarchy::get_or_add_activity`]. Text no group claims gets
//! an uncategorized root created on demand. Once every entry is in,
//! [`AggregationHierarchy::recalculate_time_totals`] rolls leaf totals up
//! into their folders and [`AggregationHierarchy::prune_empty_leafs`] drops
//! the leaves that saw no time.
//!
//! Generic over [`TimeTotals`] so the same tree serves the per-period
//! summary and the single-figure totals report.

use ahash::AHashMap as HashMap;
use chrono::Duration;
use tallyline_domain::{AggregationNode, TimeTotals};
use tracing::warn;
use uuid::Uuid;

use crate::activity::{ActivityHierarchy, HierarchyNodeKind};

#[derive(Debug, Clone)]
struct Slot<T> {
    /// Always has `children: None`; the tree shape lives in `children` below
    node: AggregationNode<T>,
    children: Vec<usize>,
}

/// Report tree accumulating time per activity
#[derive(Debug, Clone)]
pub struct AggregationHierarchy<T: TimeTotals> {
    slots: Vec<Slot<T>>,
    roots: Vec<usize>,
    by_text: HashMap<String, usize>,
    num_periods: usize,
}

impl<T: TimeTotals> AggregationHierarchy<T> {
    /// Empty tree with one node per hierarchy node and zeroed totals
    pub fn build(hierarchy: &ActivityHierarchy, num_periods: usize) -> Self {
        let mut tree = Self { slots: Vec::with_capacity(hierarchy.len()), roots: Vec::new(), by_text: HashMap::new(), num_periods };
        for root in hierarchy.roots() {
            if let Some(slot) = tree.add_subtree(hierarchy, *root, None) {
                tree.roots.push(slot);
            }
        }
        tree
    }

    fn add_subtree(&mut self, hierarchy: &ActivityHierarchy, idx: usize, parent_group_id: Option<Uuid>) -> Option<usize> {
        let source = hierarchy.node(idx)?;
        let node = match &source.kind {
            HierarchyNodeKind::Group(group) => AggregationNode::for_group(
                group.id,
                group.name.clone(),
                parent_group_id,
                group.position,
                group.match_response_text.is_some() && source.children().is_empty(),
                self.num_periods,
            ),
            HierarchyNodeKind::ExactParentMatch { parent_group_id, response_text } => {
                AggregationNode::exact_parent_match(*parent_group_id, response_text.clone(), self.num_periods)
            }
        };

        let slot = self.slots.len();
        if node.tracks_poll_response_text {
            if let Some(text) = source.match_response_text() {
                self.claim_text(text, slot);
            }
        }
        let group_id = node.activity_group_id;
        self.slots.push(Slot { node, children: Vec::new() });

        for child in source.children() {
            if let Some(child_slot) = self.add_subtree(hierarchy, *child, group_id) {
                self.slots[slot].children.push(child_slot);
            }
        }
        Some(slot)
    }

    fn claim_text(&mut self, text: &str, slot: usize) {
        if self.by_text.contains_key(text) {
            warn!(response_text = %text, "Response text claimed by several activity groups; keeping first");
            return;
        }
        self.by_text.insert(text.to_string(), slot);
    }

    pub fn num_periods(&self) -> usize {
        self.num_periods
    }

    /// Node collecting time for `response_text`, creating an uncategorized
    /// root when no group claims the text
    pub fn get_or_add_activity(&mut self, response_text: &str) -> &mut AggregationNode<T> {
        let slot = match self.by_text.get(response_text) {
            Some(slot) => *slot,
            None => {
                let slot = self.slots.len();
                self.slots.push(Slot {
                    node: AggregationNode::uncategorized(response_text, self.num_periods),
                    children: Vec::new(),
                });
                self.roots.push(slot);
                self.by_text.insert(response_text.to_string(), slot);
                slot
            }
        };
        &mut self.slots[slot].node
    }

    /// Add `amount` to the node for `response_text` in period
    /// `period_index`. Returns `false` when the index has no slot.
    pub fn add_time(&mut self, response_text: &str, period_index: usize, amount: Duration) -> bool {
        self.get_or_add_activity(response_text).totals.add(period_index, amount)
    }

    /// Node currently collecting `response_text`, if any
    pub fn activity_for(&self, response_text: &str) -> Option<&AggregationNode<T>> {
        self.by_text.get(response_text).map(|slot| &self.slots[*slot].node)
    }

    /// Replace every folder's totals with the sum of its children
    pub fn recalculate_time_totals(&mut self) {
        for root in self.roots.clone() {
            self.sum_subtree(root);
        }
    }

    fn sum_subtree(&mut self, slot: usize) {
        let children = self.slots[slot].children.clone();
        if children.is_empty() {
            return;
        }
        let mut totals = T::zeroed(self.num_periods);
        for child in children {
            self.sum_subtree(child);
            totals.accumulate(&self.slots[child].node.totals);
        }
        self.slots[slot].node.totals = totals;
    }

    /// Remove text-tracking leaves with no time, bottom up, then sort every
    /// sibling list: uncategorized last, then by name ignoring case
    pub fn prune_empty_leafs(&mut self) {
        let roots = std::mem::take(&mut self.roots);
        self.roots = self.prune_list(roots);

        let slots = &self.slots;
        let live: Vec<bool> = {
            let mut live = vec![false; slots.len()];
            let mut stack = self.roots.clone();
            while let Some(slot) = stack.pop() {
                live[slot] = true;
                stack.extend_from_slice(&slots[slot].children);
            }
            live
        };
        self.by_text.retain(|_, slot| live[*slot]);
    }

    fn prune_list(&mut self, list: Vec<usize>) -> Vec<usize> {
        let mut kept = Vec::with_capacity(list.len());
        for slot in list {
            let children = std::mem::take(&mut self.slots[slot].children);
            let children = self.prune_list(children);
            let node = &self.slots[slot].node;
            let empty_leaf = node.tracks_poll_response_text && children.is_empty() && node.totals.is_zero();
            self.slots[slot].children = children;
            if !empty_leaf {
                kept.push(slot);
            }
        }
        kept.sort_by_cached_key(|slot| {
            let node = &self.slots[*slot].node;
            (node.is_uncategorized(), node.name.to_lowercase())
        });
        kept
    }

    /// The tree as nested nodes
    pub fn activities(&self) -> Vec<AggregationNode<T>> {
        self.roots.iter().map(|slot| self.materialize(*slot)).collect()
    }

    /// Consume the tree into nested nodes
    pub fn into_activities(self) -> Vec<AggregationNode<T>> {
        self.activities()
    }

    fn materialize(&self, slot: usize) -> AggregationNode<T> {
        let Slot { node, children } = &self.slots[slot];
        let mut node = node.clone();
        if !children.is_empty() {
            node.children = Some(children.iter().map(|child| self.materialize(*child)).collect());
        }
        node
    }
}
