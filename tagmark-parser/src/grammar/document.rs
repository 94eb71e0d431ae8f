use crate::grammar::tree::{
    BlockLine, Element, ListLine, ParseTree, Part, RawTag, Segment, TableCell, TableRow,
};

// The tagmark grammar. Alternatives commit to the first match; there is
// no longest-match comparison between them.
peg::parser! {
    pub(crate) grammar document_parser() for str {

        pub(crate) rule document() -> ParseTree
            = elements:(part() / blank_run())* ![_] {
                ParseTree { elements }
            }

        rule part() -> Element
            = value:(list() / table() / raw_block() / block() / heading() / paragraph()) {
                Element::Part(value)
            }

        /// Two or more consecutive newlines. Captured as an element so the
        /// transform can drop it; nothing of it survives in the output.
        rule blank_run() -> Element
            = "\n" "\n"+ { Element::Blank }

        // --- tags ---------------------------------------------------------

        pub(crate) rule tag() -> RawTag
            = name:$(['a'..='z' | 'A'..='Z' | '0'..='9' | '_']+) value:tag_value()? {
                RawTag { name: name.to_string(), value }
            }

        rule tag_value() -> String
            = "\"" value:$([^ '"']*) "\"" { value.to_string() }
            / "'" value:$([^ '\'']*) "'" { value.to_string() }

        /// Space-separated tags. The list may be empty.
        rule tag_list() -> Vec<RawTag>
            = " "* tags:(tag() ** (" "+)) " "* { tags }

        // --- inline spans -------------------------------------------------

        pub(crate) rule inline() -> Segment
            = "[" tags:tag_list() "]" "[" content:$(inline_char()*) "]" {
                Segment::Inline { tags, content: content.to_string() }
            }

        rule inline_char()
            = "\\[" / "\\]" / [^ '\n' | '[' | ']']

        /// One line of text: no newlines, no unescaped brackets.
        rule line_char()
            = "\\[" / "\\]" / [^ '\n' | '[' | ']']

        // --- paragraphs ---------------------------------------------------

        pub(crate) rule paragraph() -> Part
            = paragraph_gate() content:(inline() / paragraph_text())+ {
                Part::Paragraph { content }
            }

        /// A paragraph may not begin where a list bullet, table line, or
        /// fence line begins.
        rule paragraph_gate()
            = !("\t"+ "*" / ("    ")+ "*" / "|" / "```" !"`" / "````" !"`")

        rule paragraph_text() -> Segment
            = content:$(paragraph_char()+) { Segment::Text(content.to_string()) }

        /// Paragraph text additionally accepts a lone newline as a soft
        /// continuation; a blank line ends the paragraph.
        rule paragraph_char()
            = "\\[" / "\\]" / [^ '\n' | '[' | ']'] / "\n" !"\n"

        // --- lists --------------------------------------------------------

        pub(crate) rule list() -> Part
            = list_gate()
              tags:list_directive()?
              first:list_line() rest:("\n" line:list_line() { line })* {
                let mut lines = vec![first];
                lines.extend(rest);
                Part::List { tags: tags.unwrap_or_default(), lines }
            }

        rule list_gate()
            = &(list_indent() "*")

        /// `indentation * !: tag tag…` on its own line, supplying tags for
        /// the list as a whole.
        rule list_directive() -> Vec<RawTag>
            = list_indent() "*" [' ' | '\t']* "!:" tags:tag_list() "\n" { tags }

        rule list_line() -> ListLine
            = indentation:list_indent() "*" " "* content:(inline() / list_line_text())+ {
                ListLine { indentation: indentation.to_string(), content }
            }

        /// Indentation is a run of tabs or a run of 4-space groups, never
        /// mixed within one capture.
        rule list_indent() -> &'input str
            = $("\t"+)
            / $(("    ")+)

        rule list_line_text() -> Segment
            = content:$(line_char()+) { Segment::Text(content.to_string()) }

        // --- tables -------------------------------------------------------

        pub(crate) rule table() -> Part
            = tags:table_directive()?
              first:table_line() rest:("\n" line:table_line() { line })* {
                let mut rows = vec![first];
                rows.extend(rest);
                Part::Table { tags: tags.unwrap_or_default(), rows }
            }

        /// `|!: tag tag…` on its own line, supplying tags for the table.
        rule table_directive() -> Vec<RawTag>
            = "|" [' ' | '\t']* "!:" tags:tag_list() "\n" { tags }

        rule table_line() -> TableRow
            = table_gate() cells:(("|" { None }) / (cell:table_cell() { Some(cell) }))+ {
                TableRow { cells: cells.into_iter().flatten().collect() }
            }

        /// A table line starts and ends with `|`. A greedy scan cannot be
        /// followed by a literal in PEG, so the trailing pipe is checked in
        /// a guard over the rest of the line.
        rule table_gate()
            = &table_line_shape()

        rule table_line_shape()
            = "|" rest:$([^ '\n']*) {?
                if rest.ends_with('|') { Ok(()) } else { Err("table line") }
            }

        rule table_cell() -> TableCell
            = content:(inline() / table_cell_text())+ { TableCell { content } }

        rule table_cell_text() -> Segment
            = content:$(table_cell_char()+) { Segment::Text(content.to_string()) }

        rule table_cell_char()
            = "\\[" / "\\]" / "\\|" / [^ '\n' | '[' | ']' | '|']

        // --- fenced blocks ------------------------------------------------

        pub(crate) rule raw_block() -> Part
            = "```" tags:fence_tags()
              lines:raw_block_line()*
              "\n```" line_end() {
                Part::RawBlock { tags, lines }
            }

        /// The rest of an opening fence line: nothing, or `!: tag tag…`.
        rule fence_tags() -> Vec<RawTag>
            = &"\n" { Vec::new() }
            / [' ' | '\t']* "!:" tags:tag_list() &"\n" { tags }

        /// A verbatim line; stops before the line that closes the fence.
        rule raw_block_line() -> String
            = "\n" !("```" line_end()) content:$([^ '\n']*) { content.to_string() }

        pub(crate) rule block() -> Part
            = "````" tags:fence_tags()
              lines:(("\n" { None }) / (line:block_line() { Some(line) }))+
              "````" line_end() {
                Part::Block { tags, lines: lines.into_iter().flatten().collect() }
            }

        rule block_line() -> BlockLine
            = !("````" line_end()) content:(inline() / block_text())+ {
                BlockLine { content }
            }

        rule block_text() -> Segment
            = content:$(line_char()+) { Segment::Text(content.to_string()) }

        // --- headings -----------------------------------------------------

        pub(crate) rule heading() -> Part
            = marker:$("#"+) " "* content:(inline() / heading_text())+ {
                Part::Heading { marker: marker.to_string(), content }
            }

        rule heading_text() -> Segment
            = content:$(line_char()+) { Segment::Text(content.to_string()) }

        // ------------------------------------------------------------------

        rule line_end()
            = &"\n" / ![_]
    }
}
