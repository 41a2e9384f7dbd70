//! Conditional Cleaner (`spec.md` §4.5).
//!
//! Runs on the already-extracted subtree. A single traversal evaluates
//! every descendant and schedules low-value nodes for removal; the removal
//! itself is applied only after the traversal ends (`spec.md` §4.5
//! "Removal application").

use crate::classifier::{class_weight, embedded_video_count, link_density, ok_embedded_video, p_count};
use crate::dom::{self, count_nodes};
use log::{debug, trace};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

const CONDITIONAL_TAGS: [&str; 5] = ["form", "table", "ul", "div", "p"];

pub fn clean(dom: &mut RcDom, root: &Handle) {
    let mut clean_list: Vec<&str> = vec!["object", "h1"];
    if count_nodes(root, "h2") == 1 {
        clean_list.push("h2");
        trace!("conditional_cleaner: single <h2> in tree, added to clean_list");
    }

    let mut drop_list = vec![];
    walk(root, &clean_list, &mut drop_list);

    debug!("conditional_cleaner: dropping {} node(s)", drop_list.len());
    for node in &drop_list {
        trace!("conditional_cleaner: dropping <{}>", dom::get_tag_name(node).unwrap_or_default());
        dom::remove(dom, node);
    }
}

fn walk(handle: &Handle, clean_list: &[&str], drop_list: &mut Vec<Handle>) {
    for child in handle.children.borrow().iter() {
        if matches!(child.data, NodeData::Element { .. }) {
            clear_style(child);

            if should_drop(child, clean_list) {
                drop_list.push(child.clone());
            }
        }
        walk(child, clean_list, drop_list);
    }
}

fn clear_style(handle: &Handle) {
    if dom::get_attr("style", handle).is_some() {
        dom::set_attr("style", "", handle);
    }
}

fn should_drop(handle: &Handle, clean_list: &[&str]) -> bool {
    let tag = dom::get_tag_name(handle).unwrap_or_default();

    if clean_list.contains(&tag.as_str()) {
        let is_embeddable = tag == "object" || tag == "embed";
        let keep = is_embeddable && ok_embedded_video(handle);
        if !keep {
            return true;
        }
    }

    if matches!(tag.as_str(), "h1" | "h2" | "h3" | "h4") {
        if class_weight(handle) < 0 || link_density(handle) > 0.33 {
            trace!("conditional_cleaner: dropping heading <{tag}>, negative weight or high link density");
            return true;
        }
    }

    if tag == "p" && handle.children.borrow().is_empty() && dom::text_content(handle).chars().count() < 5 {
        trace!("conditional_cleaner: dropping empty short <p>");
        return true;
    }

    conditional_drop(handle)
}

/// §4.5 "conditional_drop" — only applies to `form`/`table`/`ul`/`div`/`p`.
fn conditional_drop(handle: &Handle) -> bool {
    let tag = dom::get_tag_name(handle).unwrap_or_default();
    if !CONDITIONAL_TAGS.contains(&tag.as_str()) {
        return false;
    }

    let weight = class_weight(handle);
    // The scorer's content score is deliberately not re-consulted here —
    // preserve the zero (see DESIGN.md).
    let content_score = 0;
    if weight + content_score < 0 {
        return true;
    }

    let text = dom::text_content(handle);
    if text.matches(',').count() >= 10 {
        return false;
    }

    let p = p_count(handle);
    let img = count_nodes(handle, "img");
    let li = count_nodes(handle, "li") as i64 - 100;
    let inputs = count_nodes(handle, "input");
    let embed = embedded_video_count(handle);

    let ld = link_density(handle);
    let cl = text.chars().count();

    if li > p as i64 && tag != "ul" && tag != "ol" {
        trace!("conditional_cleaner: conditional drop <{tag}>, too many <li>");
        return true;
    }
    if inputs as f32 > p as f32 / 3.0 {
        trace!("conditional_cleaner: conditional drop <{tag}>, too many <input>");
        return true;
    }
    if cl < 25 && (img == 0 || img > 2) {
        trace!("conditional_cleaner: conditional drop <{tag}>, too little text for its image count");
        return true;
    }
    if weight < 25 && ld > 0.2 {
        trace!("conditional_cleaner: conditional drop <{tag}>, low weight and high link density");
        return true;
    }
    if weight >= 25 && ld > 0.5 {
        trace!("conditional_cleaner: conditional drop <{tag}>, high link density despite positive weight");
        return true;
    }
    if (embed == 1 && cl < 75) || embed > 1 {
        trace!("conditional_cleaner: conditional drop <{tag}>, embed count/text length mismatch");
        return true;
    }

    false
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
    fn lone_h2_is_stripped() {
        let html = "<div><h2>Title</h2><p>body text that is plenty long enough, yes indeed</p></div>";
        let mut dom = parse(html);
        let root = dom.document.clone();
        clean(&mut dom, &root);
        assert_eq!(count_nodes(&root, "h2"), 0);
    }

    #[test]
    fn two_h2s_both_survive() {
        let html = "<div><h2>One</h2><h2>Two</h2><p>body text long enough to matter here</p></div>";
        let mut dom = parse(html);
        let root = dom.document.clone();
        clean(&mut dom, &root);
        assert_eq!(count_nodes(&root, "h2"), 2);
    }

    #[test]
    fn youtube_object_survives() {
        let html = r#"<div><object data="https://youtube.com/embed/x">video</object>
            <p>body text that is plenty long enough to matter here, yes</p></div>"#;
        let mut dom = parse(html);
        let root = dom.document.clone();
        clean(&mut dom, &root);
        assert_eq!(count_nodes(&root, "object"), 1);
    }

    #[test]
    fn plain_object_is_dropped() {
        let html = r#"<div><object data="thing.swf">flash</object>
            <p>body text that is plenty long enough to matter here, yes</p></div>"#;
        let mut dom = parse(html);
        let root = dom.document.clone();
        clean(&mut dom, &root);
        assert_eq!(count_nodes(&root, "object"), 0);
    }

    #[test]
    fn empty_short_p_is_dropped() {
        let html = "<div><p></p><p>long enough content to survive cleaning, really</p></div>";
        let mut dom = parse(html);
        let root = dom.document.clone();
        clean(&mut dom, &root);
        assert_eq!(count_nodes(&root, "p"), 1);
    }

    #[test]
    fn input_heavy_div_is_dropped() {
        let html = "<div><input><input><input><p>x</p></div>";
        let mut dom = parse(html);
        let root = dom.document.clone();
        clean(&mut dom, &root);
        assert_eq!(count_nodes(&root, "input"), 0);
    }
}
