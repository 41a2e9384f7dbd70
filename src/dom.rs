//! DOM helpers built directly on [`markup5ever_rcdom`]. No wrapper node type
//! is introduced: `markup5ever_rcdom::Node` already carries the parent
//! back-reference, ordered children, and element/text data the data model
//! calls for.

use html5ever::tendril::StrTendril;
use html5ever::tree_builder::{ElementFlags, NodeOrText, TreeSink};
use html5ever::{Attribute, LocalName, QualName};
pub use markup5ever_rcdom::{Handle, Node, NodeData, RcDom};
use std::rc::Rc;
use std::str::FromStr;

/// A stable identity for a node across a single extraction pass.
///
/// `Rc::as_ptr` is unique and constant for as long as the `Rc` (and thus the
/// node) is alive, which covers exactly the lifetime the candidate index
/// needs: created during scoring, consumed by winner selection, discarded at
/// the end of the pass.
pub type NodeId = usize;

pub fn node_id(handle: &Handle) -> NodeId {
    Rc::as_ptr(handle) as usize
}

pub fn parent(handle: &Handle) -> Option<Handle> {
    handle.parent.take().and_then(|weak| {
        let upgraded = weak.upgrade();
        handle.parent.set(Some(weak));
        upgraded
    })
}

pub fn attr(attr_name: &str, attrs: &[Attribute]) -> Option<String> {
    attrs
        .iter()
        .find(|attr| attr.name.local.as_ref() == attr_name)
        .map(|attr| attr.value.to_string())
}

pub fn get_attr(name: &str, handle: &Handle) -> Option<String> {
    match handle.data {
        NodeData::Element { ref attrs, .. } => attr(name, &attrs.borrow()),
        _ => None,
    }
}

pub fn set_attr(attr_name: &str, value: &str, handle: &Handle) {
    if let NodeData::Element { ref attrs, .. } = handle.data {
        let attrs = &mut attrs.borrow_mut();
        match attrs
            .iter()
            .position(|attr| attr.name.local.as_ref() == attr_name)
        {
            Some(index) => {
                if let Ok(value) = StrTendril::from_str(value) {
                    attrs[index] = Attribute {
                        name: attrs[index].name.clone(),
                        value,
                    }
                }
            }
            None => {
                if let Ok(value) = StrTendril::from_str(value) {
                    attrs.push(Attribute {
                        name: QualName::new(None, ns!(), LocalName::from(attr_name)),
                        value,
                    });
                }
            }
        }
    }
}

pub fn clean_attr(attr_name: &str, attrs: &mut Vec<Attribute>) {
    if let Some(index) = attrs
        .iter()
        .position(|attr| attr.name.local.as_ref() == attr_name)
    {
        attrs.remove(index);
    }
}

pub fn get_tag_name(handle: &Handle) -> Option<String> {
    match handle.data {
        NodeData::Element { ref name, .. } => Some(name.local.as_ref().to_lowercase()),
        _ => None,
    }
}

pub fn is_tag(handle: &Handle, tag: &str) -> bool {
    get_tag_name(handle).as_deref() == Some(tag)
}

/// Concatenates descendant text content. `normalize` trims each text run.
pub fn extract_text(handle: &Handle, buf: &mut String, normalize: bool) {
    for child in handle.children.borrow().iter() {
        match child.data {
            NodeData::Text { ref contents } => {
                let contents = contents.borrow();
                let piece: &str = if normalize {
                    contents.trim()
                } else {
                    &contents
                };
                if !piece.is_empty() {
                    buf.push_str(piece);
                }
            }
            NodeData::Element { .. } => extract_text(child, buf, normalize),
            _ => (),
        }
    }
}

pub fn text_content(handle: &Handle) -> String {
    let mut buf = String::new();
    extract_text(handle, &mut buf, false);
    buf
}

/// Total descendant text length, trimming each text run (matches the
/// heuristic's notion of "content length", which ignores pure whitespace
/// runs between tags).
pub fn text_len(handle: &Handle) -> usize {
    let mut len = 0;
    for child in handle.children.borrow().iter() {
        match child.data {
            NodeData::Text { ref contents } => {
                len += contents.borrow().trim().chars().count();
            }
            NodeData::Element { .. } => len += text_len(child),
            _ => (),
        }
    }
    len
}

/// Collects all descendants (not just direct children) with the given tag
/// name, in document order.
pub fn find_nodes(handle: &Handle, tag_name: &str, out: &mut Vec<Handle>) {
    for child in handle.children.borrow().iter() {
        if is_tag(child, tag_name) {
            out.push(child.clone());
        }
        if matches!(child.data, NodeData::Element { .. }) {
            find_nodes(child, tag_name, out);
        }
    }
}

pub fn count_nodes(handle: &Handle, tag_name: &str) -> usize {
    let mut out = vec![];
    find_nodes(handle, tag_name, &mut out);
    out.len()
}

/// True if any direct or transitive descendant has one of the given tags.
pub fn has_nodes(handle: &Handle, tag_names: &[&str]) -> bool {
    for child in handle.children.borrow().iter() {
        let tag = get_tag_name(child).unwrap_or_default();
        if tag_names.iter().any(|&n| n == tag) {
            return true;
        }
        if matches!(child.data, NodeData::Element { .. }) && has_nodes(child, tag_names) {
            return true;
        }
    }
    false
}

/// True if `handle` has at least one direct child that is itself an element
/// with one of the given tags. Unlike [`has_nodes`] this does not recurse —
/// it is the "direct children only" test the normalizer's leaf-div rule
/// needs.
pub fn has_direct_child_tag(handle: &Handle, tag_names: &[&str]) -> bool {
    handle.children.borrow().iter().any(|child| {
        get_tag_name(child)
            .map(|tag| tag_names.iter().any(|&n| n == tag))
            .unwrap_or(false)
    })
}

/// Replaces `handle`'s tag with `new_tag`, preserving attributes and
/// children, and splices the replacement into `handle`'s former position.
/// `handle` itself is detached from the tree afterward, so any
/// `CandidateIndex` entry keyed by its identity becomes unreachable — this
/// is intentional, matching the data model's note that a candidate is only
/// reachable while its node handle remains in the tree.
pub fn retag(dom: &mut RcDom, handle: &Handle, new_tag: &str) -> Handle {
    let attrs = match &handle.data {
        NodeData::Element { attrs, .. } => attrs.borrow().clone(),
        _ => vec![],
    };
    let name = QualName::new(None, ns!(), LocalName::from(new_tag));
    let replacement = dom.create_element(name, attrs, ElementFlags::default());

    let children: Vec<Handle> = handle.children.borrow_mut().drain(..).collect();
    for child in children {
        dom.append(&replacement, NodeOrText::AppendNode(child));
    }

    // `handle` may already be the detached root of an extracted subtree
    // (no parent to splice a sibling into); only perform the splice when
    // there is a position to take over.
    if parent(handle).is_some() {
        dom.append_before_sibling(handle, NodeOrText::AppendNode(replacement.clone()));
        dom.remove_from_parent(handle);
    }
    replacement
}

/// Detaches `handle` from its parent if it still has one; a no-op if the
/// node (or an ancestor) was already removed.
pub fn remove(dom: &mut RcDom, handle: &Handle) {
    if parent(handle).is_some() {
        dom.remove_from_parent(handle);
    }
}
