//! Winner Selector and sibling extension (`spec.md` §4.4).

use crate::classifier::link_density;
use crate::dom::{self, get_attr, node_id, parent as dom_parent, retag};
use crate::scorer::{Candidate, CandidateIndex};
use html5ever::tree_builder::{NodeOrText, TreeSink};
use log::{debug, trace};
use markup5ever_rcdom::{Handle, RcDom};

/// Picks the highest-scoring candidate; ties go to the node that appears
/// earlier in document order (`spec.md` §4.3 "Ties").
pub fn select_winner(candidates: &CandidateIndex) -> Option<&Candidate> {
    let mut best: Option<&Candidate> = None;
    for candidate in candidates.values() {
        best = Some(match best {
            None => candidate,
            Some(current) => {
                let score = candidate.content_score.get();
                let current_score = current.content_score.get();
                if score > current_score
                    || (score == current_score && candidate.doc_order < current.doc_order)
                {
                    candidate
                } else {
                    current
                }
            }
        });
    }
    best
}

/// Extends `winner` by absorbing qualifying siblings of its parent, per
/// `spec.md` §4.4. Mutates `dom` in place: siblings are detached from their
/// original position and appended as children of the winner node.
pub fn extend_with_siblings(dom: &mut RcDom, winner: &Candidate, candidates: &CandidateIndex) {
    let Some(parent) = dom_parent(&winner.node) else {
        trace!("selector: winner has no parent, nothing to extend");
        return;
    };

    let threshold = (winner.content_score.get() * 0.2).max(10.0);
    let winner_class = get_attr("class", &winner.node).filter(|c| !c.is_empty());
    let winner_id = node_id(&winner.node);

    // Scan phase: decide which siblings qualify using a snapshot of the
    // parent's current children, before any mutation happens.
    let siblings: Vec<Handle> = parent.children.borrow().clone();
    let mut to_include: Vec<Handle> = vec![];

    for sibling in &siblings {
        if node_id(sibling) == winner_id {
            continue;
        }

        let mut bonus = 0.0;
        if let Some(ref winner_class) = winner_class {
            if get_attr("class", sibling).as_ref() == Some(winner_class) {
                bonus = winner.content_score.get() * 0.2;
            }
        }

        let mut include = false;
        if let Some(candidate) = candidates.get(&node_id(sibling)) {
            if candidate.content_score.get() + bonus >= threshold {
                include = true;
            }
        }

        if dom::is_tag(sibling, "p") {
            let text = dom::text_content(sibling);
            let text = text.trim();
            let density = link_density(sibling);
            if text.chars().count() > 80 && density < 0.25 {
                include = true;
            } else if text.chars().count() <= 80 && density == 0.0 && text.contains(". ") {
                include = true;
            }
        }

        if include {
            to_include.push(sibling.clone());
        }
    }

    debug!("selector: absorbing {} sibling(s) into the winner", to_include.len());

    // Mutate phase: rewrite non-div/p siblings to <div>, then move each
    // into the winner, preserving document order.
    for sibling in to_include {
        let moved = if dom::is_tag(&sibling, "div") || dom::is_tag(&sibling, "p") {
            sibling
        } else {
            retag(dom, &sibling, "div")
        };
        dom::remove(dom, &moved);
        dom.append(&winner.node, NodeOrText::AppendNode(moved));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::score;
    use html5ever::tendril::TendrilSink;
    use html5ever::{parse_document, ParseOpts};

    fn parse(html: &str) -> RcDom {
        parse_document(RcDom::default(), ParseOpts::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())
            .unwrap()
    }

    #[test]
    fn picks_highest_scoring_candidate() {
        let commas = ",".repeat(12);
        let html = format!(
            "<html><body><div><p>short text here, not much going on at all{commas}</p></div>\
             <div><p>tiny</p></div></body></html>"
        );
        let dom = parse(&html);
        let out = score(&dom.document);
        let winner = select_winner(&out.candidates).unwrap();
        assert_eq!(winner.initial_tag, "div");
    }

    #[test]
    fn long_dense_p_sibling_is_absorbed() {
        let long_text = format!("Paragraph text. {}", "word ".repeat(30));
        let html = format!(
            "<html><body><div class=\"content\"><p>{long_text}</p></div>\
             <p>{long_text}</p></body></html>"
        );
        let mut dom = parse(&html);
        let root = dom.document.clone();
        let out = score(&root);
        let winner = select_winner(&out.candidates).unwrap();
        let winner_node = winner.node.clone();
        extend_with_siblings(&mut dom, winner, &out.candidates);
        assert!(dom::count_nodes(&winner_node, "p") >= 1);
    }
}
