#[macro_use]
extern crate html5ever;
#[macro_use]
extern crate lazy_static;
extern crate log;
extern crate markup5ever_rcdom;
extern crate regex;
extern crate url;

pub mod classifier;
pub mod cleaner;
pub mod conditional_cleaner;
pub mod dom;
pub mod envelope;
pub mod error;
pub mod extractor;
pub mod normalizer;
pub mod patterns;
pub mod scorer;
pub mod selector;
pub mod utils;

pub use error::ExtractError;
pub use extractor::{extract, extract_with_options, ExtractOptions, Output};
