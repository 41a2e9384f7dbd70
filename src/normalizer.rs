//! DOM Normalizer (`spec.md` §4.1).
//!
//! Two passes, in order:
//! 1. Delegate to the [`crate::cleaner`] to strip scripts/styles/comments and
//!    `noscript`/`iframe` subtrees.
//! 2. Retag every leaf `<div>` (one with no direct `<div>` child) to `<p>`.
//!
//! Pass 2 respects the scan-then-mutate discipline: the set of divs to
//! retag is decided from a snapshot taken before any node is touched, so a
//! `<div>` that itself contains a `<div>` is judged by the *original* tree,
//! never by a sibling's already-rewritten tag.

use crate::cleaner::{self, CleanerConfig};
use crate::dom::{find_nodes, has_direct_child_tag, retag};
use log::debug;
use markup5ever_rcdom::{Handle, RcDom};

pub fn normalize(dom: &mut RcDom, root: &Handle, cleaner_config: &CleanerConfig) {
    cleaner::clean(dom, root, cleaner_config);

    let mut divs = vec![];
    find_nodes(root, "div", &mut divs);

    let leaves: Vec<Handle> = divs
        .into_iter()
        .filter(|div| !has_direct_child_tag(div, &["div"]))
        .collect();

    debug!("normalizer: retagging {} leaf <div> node(s) to <p>", leaves.len());
    for leaf in leaves {
        retag(dom, &leaf, "p");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::count_nodes;
    use html5ever::tendril::TendrilSink;
    use html5ever::{parse_document, ParseOpts};

    fn parse(html: &str) -> RcDom {
        parse_document(RcDom::default(), ParseOpts::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())
            .unwrap()
    }

    #[test]
    fn leaf_div_becomes_p() {
        let html = "<html><body><div>just text</div></body></html>";
        let mut dom = parse(html);
        let root = dom.document.clone();
        normalize(&mut dom, &root, &CleanerConfig::default());
        assert_eq!(count_nodes(&root, "div"), 0);
        assert_eq!(count_nodes(&root, "p"), 1);
    }

    #[test]
    fn div_with_div_child_is_left_alone() {
        let html = "<html><body><div><div>inner</div></div></body></html>";
        let mut dom = parse(html);
        let root = dom.document.clone();
        normalize(&mut dom, &root, &CleanerConfig::default());
        // The outer div has a div child so it is not retagged; the inner
        // div is itself a leaf and becomes a <p>.
        assert_eq!(count_nodes(&root, "div"), 1);
        assert_eq!(count_nodes(&root, "p"), 1);
    }

    #[test]
    fn script_and_style_removed_before_leaf_check() {
        let html =
            "<html><body><div><script>x()</script>hello</div></body></html>";
        let mut dom = parse(html);
        let root = dom.document.clone();
        normalize(&mut dom, &root, &CleanerConfig::default());
        assert_eq!(count_nodes(&root, "script"), 0);
        assert_eq!(count_nodes(&root, "div"), 0);
        assert_eq!(count_nodes(&root, "p"), 1);
    }
}
