//! Envelope Builder (`spec.md` §4.6).

use crate::dom::{self, retag};
use html5ever::tendril::StrTendril;
use html5ever::tree_builder::{ElementFlags, NodeOrText, TreeSink};
use html5ever::{Attribute, LocalName, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use std::str::FromStr;

const READABILITY_BODY_ID: &str = "readabilityBody";

fn tendril(s: &str) -> StrTendril {
    StrTendril::from_str(s).unwrap_or_default()
}

fn element(dom: &mut RcDom, tag: &str, attrs: Vec<Attribute>) -> Handle {
    let name = QualName::new(None, ns!(), LocalName::from(tag));
    dom.create_element(name, attrs, ElementFlags::default())
}

/// Wraps the cleaned subtree `content` in the stable `<div
/// id="readabilityBody">` container, per `spec.md` §4.6. If `fragment` is
/// `false`, the result is embedded as the sole child of `<body>` in a
/// minimal HTML shell; the literal `<!DOCTYPE html>` prefix is applied by
/// the serializer-calling layer (see `extractor::extract_with_options`),
/// since it is textual framing, not a DOM node this envelope owns.
pub fn build(dom: &mut RcDom, content: Handle, fragment: bool) -> Handle {
    let wrapped = if dom::is_tag(&content, "body") {
        retag(dom, &content, "div")
    } else if let Some(body) = find_body_descendant(&content) {
        retag(dom, &body, "div")
    } else {
        wrap_in_div(dom, content)
    };

    dom::set_attr("id", READABILITY_BODY_ID, &wrapped);

    if fragment {
        wrapped
    } else {
        embed_in_shell(dom, wrapped)
    }
}

/// The empty envelope produced when extraction fails entirely (`spec.md`
/// §4.6/§7): a well-formed, empty `<div id="readabilityBody"
/// class="parsing-error">`.
pub fn build_error(dom: &mut RcDom, fragment: bool) -> Handle {
    let error_div = element(dom, "div", vec![]);
    dom::set_attr("id", READABILITY_BODY_ID, &error_div);
    dom::set_attr("class", "parsing-error", &error_div);

    if fragment {
        error_div
    } else {
        embed_in_shell(dom, error_div)
    }
}

fn find_body_descendant(handle: &Handle) -> Option<Handle> {
    if dom::is_tag(handle, "body") {
        return Some(handle.clone());
    }
    for child in handle.children.borrow().iter() {
        if matches!(child.data, NodeData::Element { .. }) {
            if let Some(found) = find_body_descendant(child) {
                return Some(found);
            }
        }
    }
    None
}

fn wrap_in_div(dom: &mut RcDom, content: Handle) -> Handle {
    let div = element(dom, "div", vec![]);
    dom::remove(dom, &content);
    dom.append(&div, NodeOrText::AppendNode(content));
    div
}

/// Builds `<html><head><meta http-equiv="Content-Type" ...></head><body>{node}</body></html>`
/// and returns the root `<html>` handle with `node` embedded.
fn embed_in_shell(dom: &mut RcDom, node: Handle) -> Handle {
    let html = element(dom, "html", vec![]);
    let head = element(dom, "head", vec![]);
    let meta = element(
        dom,
        "meta",
        vec![
            Attribute {
                name: QualName::new(None, ns!(), LocalName::from("http-equiv")),
                value: tendril("Content-Type"),
            },
            Attribute {
                name: QualName::new(None, ns!(), LocalName::from("content")),
                value: tendril("text/html;charset=UTF-8"),
            },
        ],
    );
    dom.append(&head, NodeOrText::AppendNode(meta));

    let body = element(dom, "body", vec![]);
    dom::remove(dom, &node);
    dom.append(&body, NodeOrText::AppendNode(node));

    dom.append(&html, NodeOrText::AppendNode(head));
    dom.append(&html, NodeOrText::AppendNode(body));
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use html5ever::tendril::TendrilSink;
    use html5ever::{parse_document, ParseOpts};

    fn parse(html: &str) -> RcDom {
        parse_document(RcDom::default(), ParseOpts::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())
            .unwrap()
    }

    #[test]
    fn body_descendant_is_rewritten_and_tagged() {
        let mut dom = parse("<html><body><p>hi</p></body></html>");
        let body = find_body_descendant(&dom.document).unwrap();
        let out = build(&mut dom, body, true);
        assert_eq!(dom::get_tag_name(&out).as_deref(), Some("div"));
        assert_eq!(
            dom::get_attr("id", &out).as_deref(),
            Some("readabilityBody")
        );
    }

    #[test]
    fn no_body_wraps_content_fresh() {
        let mut dom = parse("<div><p>hi</p></div>");
        let mut divs = vec![];
        dom::find_nodes(&dom.document, "div", &mut divs);
        let content = divs.into_iter().next().unwrap();
        let out = build(&mut dom, content, true);
        assert_eq!(dom::get_tag_name(&out).as_deref(), Some("div"));
        assert_eq!(
            dom::get_attr("id", &out).as_deref(),
            Some("readabilityBody")
        );
    }

    #[test]
    fn error_envelope_has_parsing_error_class() {
        let mut dom = parse("<html></html>");
        let out = build_error(&mut dom, true);
        assert_eq!(
            dom::get_attr("class", &out).as_deref(),
            Some("parsing-error")
        );
        assert_eq!(
            dom::get_attr("id", &out).as_deref(),
            Some("readabilityBody")
        );
    }

    #[test]
    fn full_document_wraps_in_html_shell() {
        let mut dom = parse("<html><body><p>hi</p></body></html>");
        let body = find_body_descendant(&dom.document).unwrap();
        let out = build(&mut dom, body, false);
        assert_eq!(dom::get_tag_name(&out).as_deref(), Some("html"));
        assert_eq!(dom::count_nodes(&out, "meta"), 1);
        assert_eq!(dom::count_nodes(&out, "div"), 1);
    }
}
