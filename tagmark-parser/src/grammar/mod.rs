mod document;
pub(crate) mod tree;

pub(crate) use document::document_parser;
