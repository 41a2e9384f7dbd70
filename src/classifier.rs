//! Node Classifier (`spec.md` §4.2): unlikely-node test, bad-link test,
//! class weight, and link density.

use crate::dom::{count_nodes, find_nodes, get_attr, get_tag_name, is_tag, text_len};
use crate::patterns::{MAYBE, NEGATIVE, POSITIVE, UNLIKELY};
use log::trace;
use markup5ever_rcdom::Handle;

/// §4.2.1 — unlikely if `UNLIKELY` matches and `MAYBE` does not, and the tag
/// is not `html`/`body`.
pub fn is_unlikely(handle: &Handle) -> bool {
    let tag = get_tag_name(handle).unwrap_or_default();
    if tag == "html" || tag == "body" {
        return false;
    }
    let mut haystack = String::new();
    if let Some(class) = get_attr("class", handle) {
        haystack.push_str(&class);
        haystack.push(' ');
    }
    if let Some(id) = get_attr("id", handle) {
        haystack.push_str(&id);
    }
    if haystack.trim().is_empty() {
        return false;
    }
    let unlikely = UNLIKELY.is_match(&haystack) && !MAYBE.is_match(&haystack);
    if unlikely {
        trace!("classifier: <{tag}> unlikely, class/id={haystack:?}");
    }
    unlikely
}

/// §4.2.2 — a bad `<a>`: has `name` but no `href`, or its `href` fragment
/// exceeds 25 characters. Mirrors `breadability`'s `href.split('#')` check,
/// which only flags a fragment when the `href` contains exactly one `#`.
pub fn is_bad_link(handle: &Handle) -> bool {
    if !is_tag(handle, "a") {
        return false;
    }
    let name = get_attr("name", handle);
    let href = get_attr("href", handle);

    if name.is_some() && href.is_none() {
        trace!("classifier: bad link, name without href");
        return true;
    }

    if let Some(href) = href {
        if href.matches('#').count() == 1 {
            if let Some((_, fragment)) = href.split_once('#') {
                if fragment.chars().count() > 25 {
                    trace!("classifier: bad link, fragment too long: {href:?}");
                    return true;
                }
            }
        }
    }
    false
}

/// §4.2.3 — integer bias from `class`+`id` text, `-50..+50`.
pub fn class_weight(handle: &Handle) -> i32 {
    let mut weight = 0;
    for attr_name in ["class", "id"] {
        if let Some(value) = get_attr(attr_name, handle) {
            if POSITIVE.is_match(&value) {
                weight += 25;
            }
            if NEGATIVE.is_match(&value) {
                weight -= 25;
            }
        }
    }
    weight
}

/// §4.2.4 — ratio of anchor text length to total text length, `[0, 1]`.
pub fn link_density(handle: &Handle) -> f32 {
    let total = text_len(handle) as f32;
    if total == 0.0 {
        return 0.0;
    }
    let mut links = vec![];
    find_nodes(handle, "a", &mut links);
    let link_text: f32 = links.iter().map(|link| text_len(link) as f32).sum();
    link_text / total
}

pub fn embedded_video_count(handle: &Handle) -> usize {
    let mut embeds = vec![];
    find_nodes(handle, "embed", &mut embeds);
    embeds.iter().filter(|e| ok_embedded_video(e)).count()
}

/// Keeps `<object>`/`<embed>` nodes whose serialized form mentions a known
/// video host, per `spec.md` §4.5 step 3.
pub fn ok_embedded_video(handle: &Handle) -> bool {
    const GOOD_KEYWORDS: [&str; 3] = ["youtube", "blip.tv", "vimeo"];
    let mut haystack = String::new();
    if let Some(src) = get_attr("src", handle) {
        haystack.push_str(&src);
        haystack.push(' ');
    }
    if let Some(data) = get_attr("data", handle) {
        haystack.push_str(&data);
        haystack.push(' ');
    }
    crate::dom::extract_text(handle, &mut haystack, false);
    let haystack = haystack.to_lowercase();
    GOOD_KEYWORDS.iter().any(|kw| haystack.contains(kw))
}

pub fn p_count(handle: &Handle) -> usize {
    count_nodes(handle, "p")
}

#[cfg(test)]
mod tests {
    use super::*;
    use html5ever::tendril::TendrilSink;
    use html5ever::{parse_document, ParseOpts};
    use markup5ever_rcdom::RcDom;

    fn parse(html: &str) -> RcDom {
        parse_document(RcDom::default(), ParseOpts::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())
            .unwrap()
    }

    fn first_tag(dom: &RcDom, tag: &str) -> Handle {
        let mut out = vec![];
        find_nodes(&dom.document, tag, &mut out);
        out.into_iter().next().unwrap()
    }

    #[test]
    fn sidebar_is_unlikely() {
        let dom = parse(r#"<html><body><div class="sidebar-widget">x</div></body></html>"#);
        assert!(is_unlikely(&first_tag(&dom, "div")));
    }

    #[test]
    fn maybe_rescues_sidebar_with_article() {
        let dom =
            parse(r#"<html><body><div class="sidebar article">x</div></body></html>"#);
        assert!(!is_unlikely(&first_tag(&dom, "div")));
    }

    #[test]
    fn html_and_body_are_never_unlikely() {
        let dom = parse(r#"<html class="sidebar"><body class="sidebar">x</body></html>"#);
        assert!(!is_unlikely(&dom.document));
    }

    #[test]
    fn bad_link_long_fragment() {
        let dom = parse(
            r#"<html><body><a href="page#very_long_fragment_over_25_characters">x</a></body></html>"#,
        );
        assert!(is_bad_link(&first_tag(&dom, "a")));
    }

    #[test]
    fn bad_link_name_without_href() {
        let dom = parse(r#"<html><body><a name="anchor">x</a></body></html>"#);
        assert!(is_bad_link(&first_tag(&dom, "a")));
    }

    #[test]
    fn ok_link_short_fragment() {
        let dom = parse(r#"<html><body><a href="page#top">x</a></body></html>"#);
        assert!(!is_bad_link(&first_tag(&dom, "a")));
    }

    #[test]
    fn class_weight_sums_class_and_id() {
        let dom = parse(r#"<html><body><div class="content" id="comment">x</div></body></html>"#);
        assert_eq!(class_weight(&first_tag(&dom, "div")), 0);
    }
}
