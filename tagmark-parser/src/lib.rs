//! Parser for the tagmark lightweight markup language.
//!
//! Tagmark documents are plain text built from a small set of line-shaped
//! constructs (paragraphs, bullet lists, pipe tables, fenced raw and
//! parsed blocks, and `#` headings), annotated with `[tag][content]`
//! inline spans. Parsing happens in two stages: a PEG grammar produces a
//! raw parse tree, and a transform normalizes that tree into the document
//! model of `{parameters, body}` nodes that renderers consume.
//!
//! ```
//! use tagmark_parser::parse_without_tags;
//!
//! let body = parse_without_tags("# Title\n\nBody text.")?;
//! assert_eq!(body.len(), 2);
//! # Ok::<(), tagmark_parser::Error>(())
//! ```
//!
//! The conventional document header, a first line of space-separated
//! document tags, is handled by [`parse`]:
//!
//! ```
//! use tagmark_parser::parse;
//!
//! let document = parse("draft notes\n\nHello.")?;
//! assert_eq!(document.tags, vec!["draft".to_string(), "notes".to_string()]);
//! # Ok::<(), tagmark_parser::Error>(())
//! ```

mod error;
mod grammar;
mod model;
mod options;
mod transform;

pub use error::Error;
pub use model::{Item, Node, Parameters, TaggedDocument, Value};
pub use options::{Options, OptionsBuilder};

use tracing::instrument;

/// Parses a document whose first line carries space-separated document
/// tags; the rest of the text is the body.
///
/// # Errors
///
/// Returns [`Error::Parse`] if the body does not match the grammar, or
/// [`Error::OrphanListItem`] if a list item's indentation level has no
/// parent to attach to.
#[instrument(skip(text))]
pub fn parse(text: &str) -> Result<TaggedDocument, Error> {
    parse_with_options(text, &Options::default())
}

/// Like [`parse`], with explicit transform options.
///
/// # Errors
///
/// Same failure modes as [`parse`].
#[instrument(skip(text, options))]
pub fn parse_with_options(text: &str, options: &Options) -> Result<TaggedDocument, Error> {
    // Input without any newline has no tags line; it is all body.
    let (tags_line, body_text) = text.split_once('\n').unwrap_or(("", text));

    let tags = tags_line
        .split(' ')
        .filter(|tag| !tag.is_empty())
        .map(ToString::to_string)
        .collect();
    let body = parse_without_tags_with_options(body_text, options)?;
    Ok(TaggedDocument { tags, body })
}

/// Parses text directly as a document body, without the tags-line
/// convention. Leading and trailing newlines are ignored.
///
/// # Errors
///
/// Same failure modes as [`parse`].
#[instrument(skip(text))]
pub fn parse_without_tags(text: &str) -> Result<Vec<Node>, Error> {
    parse_without_tags_with_options(text, &Options::default())
}

/// Like [`parse_without_tags`], with explicit transform options.
///
/// # Errors
///
/// Same failure modes as [`parse`].
#[instrument(skip(text, options))]
pub fn parse_without_tags_with_options(text: &str, options: &Options) -> Result<Vec<Node>, Error> {
    let trimmed = text.trim_matches('\n');
    let tree = grammar::document_parser::document(trimmed)?;
    tracing::trace!(elements = tree.elements.len(), "parsed raw tree");
    transform::document(tree, options)
}
