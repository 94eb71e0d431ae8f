//! Raw parse-tree types produced by the grammar.
//!
//! The parse tree mirrors the grammar's productions one-to-one and still
//! carries raw captured text (escape sequences intact, indentation as the
//! captured string). It is an intermediate representation: built once per
//! parse, consumed by the transform, never exposed to callers.

/// A single captured tag: a bare key, or a key with a quoted value.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct RawTag {
    pub(crate) name: String,
    pub(crate) value: Option<String>,
}

/// One piece of inline-level content: a tagged span or a raw text run.
///
/// Text runs keep their escape sequences; the transform unescapes them with
/// the character set appropriate to the enclosing construct.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Segment {
    Inline { tags: Vec<RawTag>, content: String },
    Text(String),
}

/// A list line with its captured indentation run (tabs or 4-space groups).
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ListLine {
    pub(crate) indentation: String,
    pub(crate) content: Vec<Segment>,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct TableCell {
    pub(crate) content: Vec<Segment>,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct TableRow {
    pub(crate) cells: Vec<TableCell>,
}

/// One inline-parsed line inside a quadruple-fence block.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct BlockLine {
    pub(crate) content: Vec<Segment>,
}

/// A top-level construct. The grammar commits to the first variant that
/// matches, in declaration order.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Part {
    Paragraph {
        content: Vec<Segment>,
    },
    List {
        tags: Vec<RawTag>,
        lines: Vec<ListLine>,
    },
    Table {
        tags: Vec<RawTag>,
        rows: Vec<TableRow>,
    },
    /// Triple-fence region; lines are verbatim, never inline-parsed.
    RawBlock {
        tags: Vec<RawTag>,
        lines: Vec<String>,
    },
    /// Quadruple-fence region; lines are inline-parsed.
    Block {
        tags: Vec<RawTag>,
        lines: Vec<BlockLine>,
    },
    Heading {
        /// The captured `#` run; its length is the heading level.
        marker: String,
        content: Vec<Segment>,
    },
}

/// A document element: a part, or a blank-line run between parts.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Element {
    Part(Part),
    Blank,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ParseTree {
    pub(crate) elements: Vec<Element>,
}
