//! HTML Cleaner — the sanitization collaborator named in `spec.md` §6.
//!
//! Grounded in `breadability`'s `lxml.html.clean.Cleaner` configuration
//! (`examples/original_source/breadability/readable.py`):
//! `kill_tags=("noscript", "iframe")`, `scripts=True`, `style=True`,
//! `comments=True`, `processing_instructions=True`, while `meta`, `object`,
//! `embed`, `form`, and `frame` are left alone (`embedded=False`,
//! `forms=False`, `meta=False`, `frames=False`, `add_nofollow=False`).
//!
//! Implemented as a deferred scan-then-mutate pass, matching the mutation
//! discipline every component in this crate follows: collect a drop list
//! during traversal, apply it afterward.

use crate::dom::{get_tag_name, remove};
use log::{debug, trace};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Tags whose entire subtree is removed outright.
const KILLED_TAGS: [&str; 2] = ["noscript", "iframe"];
/// Tags stripped but never `meta`/`object`/`embed`/`form`/`frame`, which the
/// spec requires the cleaner to preserve.
const STRIPPED_TAGS: [&str; 2] = ["script", "style"];

#[derive(Debug, Clone)]
pub struct CleanerConfig {
    killed_tags: Vec<&'static str>,
    stripped_tags: Vec<&'static str>,
    strip_comments: bool,
    strip_processing_instructions: bool,
    strip_event_handlers: bool,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            killed_tags: KILLED_TAGS.to_vec(),
            stripped_tags: STRIPPED_TAGS.to_vec(),
            strip_comments: true,
            strip_processing_instructions: true,
            strip_event_handlers: true,
        }
    }
}

/// Removes scripts/styles/comments/disallowed-embed subtrees in place.
pub fn clean(dom: &mut RcDom, handle: &Handle, config: &CleanerConfig) {
    let mut drop_list = vec![];
    collect_unsafe_nodes(handle, config, &mut drop_list);
    debug!("cleaner: dropping {} unsafe node(s)", drop_list.len());
    for node in &drop_list {
        trace!("cleaner: dropping <{}>", get_tag_name(node).unwrap_or_default());
        remove(dom, node);
    }
    strip_event_handler_attrs(handle, config);
}

fn collect_unsafe_nodes(handle: &Handle, config: &CleanerConfig, drop_list: &mut Vec<Handle>) {
    for child in handle.children.borrow().iter() {
        let drop_child = match &child.data {
            NodeData::Comment { .. } => config.strip_comments,
            NodeData::ProcessingInstruction { .. } => config.strip_processing_instructions,
            NodeData::Element { .. } => {
                let tag = get_tag_name(child).unwrap_or_default();
                config.killed_tags.contains(&tag.as_str())
                    || config.stripped_tags.contains(&tag.as_str())
            }
            _ => false,
        };
        if drop_child {
            drop_list.push(child.clone());
        } else {
            collect_unsafe_nodes(child, config, drop_list);
        }
    }
}

fn strip_event_handler_attrs(handle: &Handle, config: &CleanerConfig) {
    if !config.strip_event_handlers {
        return;
    }
    if let NodeData::Element { ref attrs, .. } = handle.data {
        attrs
            .borrow_mut()
            .retain(|attr| !attr.name.local.as_ref().starts_with("on"));
    }
    for child in handle.children.borrow().iter() {
        strip_event_handler_attrs(child, config);
    }
}
