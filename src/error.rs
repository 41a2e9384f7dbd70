use std::borrow::Cow;
use std::io;
use thiserror::Error;

/// Errors the pipeline can encounter.
///
/// Per the error taxonomy's propagation policy (`spec.md` §7), `ReadHtml`,
/// `ParseHtml`, and `EmptyDocument` never reach a caller of
/// [`crate::extractor::extract_with_options`] as an `Err`: that function
/// constructs the matching variant only to describe the failure in a log
/// record, then always returns `Ok` with the empty `class="parsing-error"`
/// envelope. `ParseUrl` is the one variant actually returned as an `Err`,
/// from [`crate::extractor::ExtractOptions::with_url`] — a genuine
/// caller-input failure, not something the pipeline can recover from on its
/// own.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("can't parse url: {0:?}")]
    ParseUrl(#[from] url::ParseError),
    #[error("can't parse html: {0:?}")]
    ParseHtml(Vec<Cow<'static, str>>),
    #[error("can't read html: {0:?}")]
    ReadHtml(#[from] io::Error),
    #[error("document has no body and no children")]
    EmptyDocument,
}
