//! Scorer (`spec.md` §4.3).
//!
//! Walks the normalized DOM once, classifying every node (unlikely / bad
//! link / scorable) and, for the scorable ones with enough text, pushing a
//! score up to the parent (full weight) and grandparent (half weight). The
//! pass never mutates the tree — unlikely/bad-link nodes are only
//! *recorded* into the [`DropList`], to be removed by the caller once
//! scoring is done.

use crate::classifier::{class_weight, is_bad_link, is_unlikely, link_density};
use crate::dom::{self, node_id, parent as dom_parent, NodeId};
use markup5ever_rcdom::{Handle, NodeData};
use std::cell::Cell;
use std::collections::HashMap;

pub const SCORABLE_TAGS: [&str; 5] = ["div", "p", "td", "pre", "article"];

pub type DropList = Vec<Handle>;

#[derive(Debug)]
pub struct Candidate {
    pub node: Handle,
    pub content_score: Cell<f32>,
    pub initial_tag: String,
    /// Document-order position, used only to break score ties in the
    /// winner selector (earlier node wins).
    pub doc_order: u64,
}

pub type CandidateIndex = HashMap<NodeId, Candidate>;

pub struct ScoringOutput {
    pub candidates: CandidateIndex,
    pub drop_list: DropList,
}

/// §4.3.4 — tag-based seed contribution to a newly-created candidate.
pub fn tag_seed(handle: &Handle) -> f32 {
    match dom::get_tag_name(handle).unwrap_or_default().as_str() {
        "div" => 5.0,
        "pre" | "td" | "blockquote" => 3.0,
        "address" | "ol" | "ul" | "dl" | "dd" | "dt" | "li" | "form" => -3.0,
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "th" => -5.0,
        _ => 0.0,
    }
}

fn base_score(text: &str) -> f32 {
    let commas = text.matches(',').count() as f32;
    let length_bonus = (text.chars().count() as f32 / 100.0).floor().min(3.0);
    1.0 + commas + length_bonus
}

fn assign_doc_order(handle: &Handle, table: &mut HashMap<NodeId, u64>, counter: &mut u64) {
    if matches!(handle.data, NodeData::Element { .. } | NodeData::Document) {
        table.insert(node_id(handle), *counter);
        *counter += 1;
    }
    for child in handle.children.borrow().iter() {
        assign_doc_order(child, table, counter);
    }
}

fn collect(handle: &Handle, scorable: &mut Vec<Handle>, drop_list: &mut DropList) {
    for child in handle.children.borrow().iter() {
        if matches!(child.data, NodeData::Element { .. }) {
            let tag = dom::get_tag_name(child).unwrap_or_default();
            if is_unlikely(child) {
                drop_list.push(child.clone());
            } else if tag == "a" && is_bad_link(child) {
                drop_list.push(child.clone());
            } else if SCORABLE_TAGS.contains(&tag.as_str()) {
                scorable.push(child.clone());
            }
        }
        collect(child, scorable, drop_list);
    }
}

fn seed_or_add(
    handle: &Handle,
    amount: f32,
    candidates: &mut CandidateIndex,
    doc_order: &HashMap<NodeId, u64>,
) {
    let id = node_id(handle);
    let candidate = candidates.entry(id).or_insert_with(|| Candidate {
        node: handle.clone(),
        content_score: Cell::new(class_weight(handle) as f32 + tag_seed(handle)),
        initial_tag: dom::get_tag_name(handle).unwrap_or_default(),
        doc_order: *doc_order.get(&id).unwrap_or(&0),
    });
    candidate.content_score.set(candidate.content_score.get() + amount);
}

/// Runs the full scoring pass described in `spec.md` §4.3 over `root`.
pub fn score(root: &Handle) -> ScoringOutput {
    let mut doc_order = HashMap::new();
    let mut counter = 0u64;
    assign_doc_order(root, &mut doc_order, &mut counter);

    let mut scorable = vec![];
    let mut drop_list = vec![];
    collect(root, &mut scorable, &mut drop_list);

    let mut candidates: CandidateIndex = HashMap::new();

    for node in &scorable {
        let text = dom::text_content(node);
        let text = text.trim();
        if text.chars().count() < 25 {
            continue;
        }
        let base = base_score(text);

        if let Some(p) = dom_parent(node) {
            seed_or_add(&p, base, &mut candidates, &doc_order);
            if let Some(gp) = dom_parent(&p) {
                seed_or_add(&gp, base / 2.0, &mut candidates, &doc_order);
            }
        }
    }

    for candidate in candidates.values() {
        let density = link_density(&candidate.node);
        let deflated = candidate.content_score.get() * (1.0 - density);
        candidate.content_score.set(deflated);
    }

    ScoringOutput {
        candidates,
        drop_list,
    }
}
