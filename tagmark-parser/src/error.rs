#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The input did not match the grammar. There is no recovery and no
    /// partial tree; the wrapped error carries the failure position.
    #[error("parsing error: {0}")]
    Parse(#[from] peg::error::ParseError<peg::str::LineCol>),

    /// A list item's indentation level had no parent item to attach to:
    /// either the first item sat deeper than the base level, or the item
    /// dropped into a level that an earlier jump skipped over.
    #[error("list item at indentation level {level} has no parent list")]
    OrphanListItem { level: usize },
}

impl Error {
    /// Byte offset of the parse failure, when one is known.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::Parse(error) => Some(error.location.offset),
            Self::OrphanListItem { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn orphan_list_item_display() {
        let error = Error::OrphanListItem { level: 2 };
        assert_eq!(
            format!("{error}"),
            "list item at indentation level 2 has no parent list"
        );
        assert_eq!(error.offset(), None);
    }
}
