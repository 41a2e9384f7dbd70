//! Orchestration: wires the Normalizer, Scorer, Winner Selector, and
//! Conditional Cleaner into the single entry point described by `spec.md`
//! §9 "Cached read-once accessors" — one function, no lazily-memoized
//! façade.

use crate::cleaner::CleanerConfig;
use crate::conditional_cleaner;
use crate::dom::{self, node_id};
use crate::envelope;
use crate::error::ExtractError;
use crate::normalizer;
use crate::scorer;
use crate::selector;
use crate::utils;
use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, serialize, ParseOpts};
use log::{debug, trace};
use markup5ever_rcdom::{Handle, RcDom, SerializableHandle};
use std::io::Read;
use url::Url;

/// Tunables for a single extraction pass (`spec.md` §6 "Configuration options").
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// `true` returns a bare `<div id="readabilityBody">`; `false` embeds it
    /// in a minimal HTML document.
    pub fragment: bool,
    /// Passed through for the caller's own link resolution. Never read by
    /// the pipeline itself (`spec.md` §6).
    pub url: Option<Url>,
    pub cleaner: CleanerConfig,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            fragment: true,
            url: None,
            cleaner: CleanerConfig::default(),
        }
    }
}

impl ExtractOptions {
    /// Parses `url` and attaches it as the passthrough URL (`spec.md` §6).
    pub fn with_url(mut self, url: &str) -> Result<Self, ExtractError> {
        self.url = Some(Url::parse(url).map_err(ExtractError::ParseUrl)?);
        Ok(self)
    }
}

#[derive(Debug)]
pub struct Output {
    pub html: String,
}

/// Extracts with default options (`fragment = true`).
pub fn extract<R>(input: &mut R) -> Result<Output, ExtractError>
where
    R: Read,
{
    extract_with_options(input, &ExtractOptions::default())
}

/// Runs the full pipeline described in `spec.md` §2 over `input`.
///
/// Per the error taxonomy in `spec.md` §7, a failure to read the input, a
/// parser that could only produce a degenerate tree, or a document with no
/// body and no children are all recovered from *inside* this function: each
/// yields `Ok` with the well-formed empty `class="parsing-error"` envelope
/// (`spec.md` §4.6), never a bare `Err` with nothing produced. `ExtractError`
/// remains the return type's error half for API stability and for the
/// genuinely caller-side failure [`ExtractOptions::with_url`] can raise.
pub fn extract_with_options<R>(
    input: &mut R,
    options: &ExtractOptions,
) -> Result<Output, ExtractError>
where
    R: Read,
{
    let mut dom = match parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .read_from(input)
    {
        Ok(dom) => dom,
        Err(io_err) => {
            let cause = ExtractError::ReadHtml(io_err);
            debug!("could not read input ({cause}), emitting the parsing-error envelope");
            return Ok(error_output(options.fragment));
        }
    };

    if !dom.errors.is_empty() {
        trace!(
            "parser reported {} recoverable issue(s): {:?}",
            dom.errors.len(),
            dom.errors
        );
    }

    let root = dom.document.clone();

    // `parse_document` always synthesizes `<html><head></head><body></body></html>`
    // around fragmentary input, so "no body and no children" (`spec.md` §7) shows
    // up as a present-but-childless `<body>` rather than a bare root.
    let mut bodies = vec![];
    dom::find_nodes(&root, "body", &mut bodies);
    let body_is_empty = bodies
        .first()
        .map(|body| body.children.borrow().is_empty())
        .unwrap_or(true);

    if root.children.borrow().is_empty() || body_is_empty {
        let cause = if !dom.errors.is_empty() {
            ExtractError::ParseHtml(dom.errors.clone())
        } else {
            ExtractError::EmptyDocument
        };
        debug!("extraction cannot proceed ({cause}), emitting the parsing-error envelope");
        return Ok(error_output(options.fragment));
    }

    normalizer::normalize(&mut dom, &root, &options.cleaner);

    let scoring = scorer::score(&root);
    for dropped in &scoring.drop_list {
        dom::remove(&mut dom, dropped);
    }

    debug!("found {} candidate(s)", scoring.candidates.len());
    trace!("candidates: {:?}", utils::debug_candidates(&scoring.candidates));

    // §7 "NoCandidates": fall back to the full document when nothing scored.
    let content = match selector::select_winner(&scoring.candidates) {
        Some(winner) => {
            debug!(
                "winning candidate: <{}> score={}",
                winner.initial_tag,
                winner.content_score.get()
            );
            selector::extend_with_siblings(&mut dom, winner, &scoring.candidates);
            winner.node.clone()
        }
        None => {
            debug!("no candidates scored, falling back to the full document");
            root.clone()
        }
    };

    conditional_cleaner::clean(&mut dom, &content);

    // §7 "WinnerProducedNothing": the winner survived cleaning with nothing
    // left in it. Recover exactly as NoCandidates — clean and use the whole
    // document instead. A fallback that was already the root has nowhere
    // further to fall back to.
    let content = if dom::text_content(&content).trim().is_empty() && node_id(&content) != node_id(&root) {
        debug!("winner produced no content after cleaning, falling back to the full document");
        conditional_cleaner::clean(&mut dom, &root);
        root
    } else {
        content
    };

    let wrapped = envelope::build(&mut dom, content, options.fragment);

    let html = serialize_node(&wrapped, options.fragment);

    Ok(Output { html })
}

/// Builds and serializes the empty `class="parsing-error"` envelope
/// (`spec.md` §4.6/§7) for use when extraction cannot proceed at all.
fn error_output(fragment: bool) -> Output {
    let mut dom = RcDom::default();
    let error_div = envelope::build_error(&mut dom, fragment);
    Output {
        html: serialize_node(&error_div, fragment),
    }
}

fn serialize_node(handle: &Handle, fragment: bool) -> String {
    let mut bytes = vec![];
    serialize(
        &mut bytes,
        &SerializableHandle::from(handle.clone()),
        Default::default(),
    )
    .ok();
    let body = String::from_utf8(bytes).unwrap_or_default();
    if fragment {
        body
    } else {
        format!("<!DOCTYPE html>\n{body}")
    }
}
