//! Conversion of the raw parse tree into the document model.
//!
//! One recursive pass, dispatching on node variant: tag sequences fold
//! left-to-right into parameter mappings, leaf text is unescaped, tables
//! get their first row promoted to a head row, and flat list lines are
//! rebuilt into nested lists.

mod list;

use tracing::trace;

use crate::{
    Error,
    grammar::tree::{BlockLine, Element, ListLine, ParseTree, Part, RawTag, Segment, TableRow},
    model::{Item, Node, Parameters, Value},
    options::Options,
};

/// Transforms a parse tree into the document model. Blank-line runs are
/// dropped here; only parts survive.
pub(crate) fn document(tree: ParseTree, options: &Options) -> Result<Vec<Node>, Error> {
    let mut nodes = Vec::new();
    for element in tree.elements {
        match element {
            Element::Blank => {}
            Element::Part(value) => nodes.push(part(value, options)?),
        }
    }
    trace!(parts = nodes.len(), "transformed document");
    Ok(nodes)
}

fn part(part: Part, options: &Options) -> Result<Node, Error> {
    match part {
        Part::Paragraph { content } => Ok(Node {
            parameters: flag_parameters("paragraph"),
            body: segments(content, options),
        }),
        Part::Heading { marker, content } => Ok(heading(&marker, content, options)),
        Part::List { tags, lines } => list_part(tags, lines, options),
        Part::Table { tags, rows } => Ok(table(tags, rows, options)),
        Part::RawBlock { tags, lines } => Ok(raw_block(tags, &lines)),
        Part::Block { tags, lines } => Ok(block(tags, lines, options)),
    }
}

fn heading(marker: &str, content: Vec<Segment>, options: &Options) -> Node {
    let level = i64::try_from(marker.len()).unwrap_or(i64::MAX);
    let mut parameters = Parameters::new();
    parameters.insert("heading".to_string(), Value::Integer(level));
    Node {
        parameters,
        body: segments(content, options),
    }
}

fn list_part(tags: Vec<RawTag>, lines: Vec<ListLine>, options: &Options) -> Result<Node, Error> {
    let items = lines
        .into_iter()
        .map(|line| {
            let level = indentation_level(&line.indentation);
            let item = Node {
                parameters: flag_parameters("listitem"),
                body: segments(line.content, options),
            };
            (level, item)
        })
        .collect();

    let body = list::nest(items)?;
    let mut parameters = merge_tags(tags);
    insert_flag(&mut parameters, "list");
    Ok(Node { parameters, body })
}

/// A single tab, or a single 4-space group, is level 0.
fn indentation_level(indentation: &str) -> usize {
    if indentation.starts_with(' ') {
        indentation.len() / 4 - 1
    } else {
        indentation.len() - 1
    }
}

fn table(tags: Vec<RawTag>, rows: Vec<TableRow>, options: &Options) -> Node {
    let mut body: Vec<Item> = rows
        .into_iter()
        .map(|row| Item::Node(table_row(row, options)))
        .collect();

    // The first row is always the table head.
    if let Some(Item::Node(head)) = body.first_mut() {
        head.parameters.remove("tablerow");
        insert_flag(&mut head.parameters, "tablehead");
    }

    let mut parameters = merge_tags(tags);
    insert_flag(&mut parameters, "table");
    Node { parameters, body }
}

fn table_row(row: TableRow, options: &Options) -> Node {
    let body = row
        .cells
        .into_iter()
        .map(|cell| {
            let content = cell
                .content
                .into_iter()
                .map(|segment| match segment {
                    Segment::Text(text) => Item::Text(unescape_cell(&text)),
                    Segment::Inline { tags, content } => {
                        Item::Node(inline(tags, &content, options))
                    }
                })
                .collect();
            Item::Node(Node {
                parameters: flag_parameters("tablecell"),
                body: content,
            })
        })
        .collect();

    Node {
        parameters: flag_parameters("tablerow"),
        body,
    }
}

fn raw_block(tags: Vec<RawTag>, lines: &[String]) -> Node {
    let mut parameters = merge_tags(tags);
    insert_flag(&mut parameters, "rawblock");
    let content = lines.join("\n").trim().to_string();
    Node {
        parameters,
        body: vec![Item::Text(content)],
    }
}

fn block(tags: Vec<RawTag>, lines: Vec<BlockLine>, options: &Options) -> Node {
    let body = lines
        .into_iter()
        .map(|line| {
            Item::Node(Node {
                parameters: flag_parameters("inline"),
                body: segments(line.content, options),
            })
        })
        .collect();

    let mut parameters = merge_tags(tags);
    insert_flag(&mut parameters, "block");
    Node { parameters, body }
}

fn segments(content: Vec<Segment>, options: &Options) -> Vec<Item> {
    content
        .into_iter()
        .map(|segment| match segment {
            Segment::Text(text) => Item::Text(unescape_brackets(&text)),
            Segment::Inline { tags, content } => Item::Node(inline(tags, &content, options)),
        })
        .collect()
}

fn inline(tags: Vec<RawTag>, content: &str, options: &Options) -> Node {
    let mut parameters = merge_tags(tags);
    if !parameters
        .keys()
        .any(|key| options.inline_flag_excludes.contains(key))
    {
        insert_flag(&mut parameters, "inline");
    }
    Node {
        parameters,
        body: vec![Item::Text(unescape_brackets(content))],
    }
}

/// Folds a tag sequence into a parameter mapping. A bare tag is `true`;
/// later tags overwrite earlier ones on the same key.
fn merge_tags(tags: Vec<RawTag>) -> Parameters {
    let mut parameters = Parameters::new();
    for tag in tags {
        let value = tag.value.map_or(Value::Bool(true), Value::String);
        parameters.insert(tag.name, value);
    }
    parameters
}

pub(super) fn flag_parameters(flag: &str) -> Parameters {
    let mut parameters = Parameters::new();
    insert_flag(&mut parameters, flag);
    parameters
}

fn insert_flag(parameters: &mut Parameters, flag: &str) {
    parameters.insert(flag.to_string(), Value::Bool(true));
}

/// Unescapes `\[` and `\]`. Only the first occurrence of each escape is
/// replaced within a single text run.
fn unescape_brackets(text: &str) -> String {
    text.replacen("\\[", "[", 1).replacen("\\]", "]", 1)
}

/// Table cells additionally unescape `\|`, with the same first-occurrence
/// limit.
fn unescape_cell(text: &str) -> String {
    unescape_brackets(text).replacen("\\|", "|", 1)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]

    use pretty_assertions::assert_eq;

    use super::{document, flag_parameters, merge_tags, unescape_brackets, unescape_cell};
    use crate::{
        Error,
        grammar::document_parser,
        model::{Item, Node, Value},
        options::Options,
    };

    fn parse(input: &str) -> Result<Vec<Node>, Error> {
        let tree = document_parser::document(input)?;
        document(tree, &Options::default())
    }

    fn tag(name: &str, value: Option<&str>) -> crate::grammar::tree::RawTag {
        crate::grammar::tree::RawTag {
            name: name.to_string(),
            value: value.map(ToString::to_string),
        }
    }

    #[test]
    fn bare_tag_merges_to_true() {
        let parameters = merge_tags(vec![tag("bold", None)]);
        assert_eq!(parameters.get("bold"), Some(&Value::Bool(true)));
    }

    #[test]
    fn quoted_tag_merges_to_string() {
        let parameters = merge_tags(vec![tag("code", Some("python"))]);
        assert_eq!(parameters.get("code"), Some(&Value::from("python")));
    }

    #[test]
    fn later_tags_overwrite_earlier_ones() {
        let parameters = merge_tags(vec![tag("code", Some("python")), tag("code", None)]);
        assert_eq!(parameters.get("code"), Some(&Value::Bool(true)));
    }

    #[test]
    fn unescaping_replaces_first_occurrence_only() {
        assert_eq!(unescape_brackets("a\\[b\\]c"), "a[b]c");
        assert_eq!(unescape_brackets("\\[x\\["), "[x\\[");
        assert_eq!(unescape_cell("a\\|b\\|"), "a|b\\|");
    }

    #[test]
    fn inline_without_excluded_tags_gets_inline_flag() {
        let nodes = parse("[bold][Hi]").unwrap();
        let Some(Item::Node(span)) = nodes.first().and_then(|node| node.body.first()) else {
            panic!("expected an inline node");
        };
        assert_eq!(span.parameters.get("inline"), Some(&Value::Bool(true)));
        assert_eq!(span.parameters.get("bold"), Some(&Value::Bool(true)));
        assert_eq!(span.body, vec![Item::from("Hi")]);
    }

    #[test]
    fn excluded_tag_suppresses_inline_flag() {
        let nodes = parse("[mathinline][x^2]").unwrap();
        let Some(Item::Node(span)) = nodes.first().and_then(|node| node.body.first()) else {
            panic!("expected an inline node");
        };
        assert_eq!(span.parameters.get("inline"), None);
        assert_eq!(span.parameters.get("mathinline"), Some(&Value::Bool(true)));
    }

    #[test]
    fn empty_exclusion_set_always_injects_inline_flag() {
        let tree = document_parser::document("[mathinline][x^2]").unwrap();
        let options = Options::builder().with_no_inline_flag_excludes().build();
        let nodes = document(tree, &options).unwrap();
        let Some(Item::Node(span)) = nodes.first().and_then(|node| node.body.first()) else {
            panic!("expected an inline node");
        };
        assert_eq!(span.parameters.get("inline"), Some(&Value::Bool(true)));
    }

    #[test]
    fn paragraph_node_shape() {
        let nodes = parse("Body text.").unwrap();
        assert_eq!(
            nodes,
            vec![Node {
                parameters: flag_parameters("paragraph"),
                body: vec![Item::from("Body text.")],
            }]
        );
    }

    #[test]
    fn heading_level_is_marker_length() {
        let nodes = parse("### Deep").unwrap();
        assert_eq!(
            nodes.first().and_then(|node| node.parameters.get("heading")),
            Some(&Value::Integer(3))
        );
    }

    #[test]
    fn first_table_row_becomes_head() {
        let nodes = parse("|h1|h2|\n|v1|v2|").unwrap();
        let rows = &nodes.first().unwrap().body;
        let Some(Item::Node(head)) = rows.first() else {
            panic!("expected a head row");
        };
        let Some(Item::Node(second)) = rows.get(1) else {
            panic!("expected a body row");
        };
        assert_eq!(head.parameters.get("tablehead"), Some(&Value::Bool(true)));
        assert_eq!(head.parameters.get("tablerow"), None);
        assert_eq!(second.parameters.get("tablerow"), Some(&Value::Bool(true)));
        assert_eq!(second.parameters.get("tablehead"), None);
    }

    #[test]
    fn table_cells_unescape_pipes() {
        let nodes = parse("|a\\|b|").unwrap();
        let Some(Item::Node(row)) = nodes.first().unwrap().body.first() else {
            panic!("expected a row");
        };
        let Some(Item::Node(cell)) = row.body.first() else {
            panic!("expected a cell");
        };
        assert_eq!(cell.body, vec![Item::from("a|b")]);
    }

    #[test]
    fn raw_block_joins_and_trims() {
        let nodes = parse("```\nline one\nline two\n```").unwrap();
        assert_eq!(
            nodes.first().unwrap().body,
            vec![Item::from("line one\nline two")]
        );
        assert_eq!(
            nodes.first().unwrap().parameters.get("rawblock"),
            Some(&Value::Bool(true))
        );
    }

    #[test]
    fn raw_block_content_is_not_inline_parsed() {
        let nodes = parse("```\nliteral [brackets] stay\n```").unwrap();
        assert_eq!(
            nodes.first().unwrap().body,
            vec![Item::from("literal [brackets] stay")]
        );
    }

    #[test]
    fn raw_block_merges_fence_tags() {
        let nodes = parse("```!:code\"rust\"\nfn main() {}\n```").unwrap();
        assert_eq!(
            nodes.first().unwrap().parameters.get("code"),
            Some(&Value::from("rust"))
        );
    }

    #[test]
    fn block_lines_wrap_as_inline_nodes() {
        let nodes = parse("````\nfirst\nsecond [b][x]\n````").unwrap();
        let body = &nodes.first().unwrap().body;
        assert_eq!(body.len(), 2);
        let Some(Item::Node(line)) = body.first() else {
            panic!("expected a line node");
        };
        assert_eq!(line.parameters.get("inline"), Some(&Value::Bool(true)));
        assert_eq!(line.body, vec![Item::from("first")]);
    }

    #[test]
    fn blank_runs_leave_no_trace() {
        let nodes = parse("one\n\n\n\ntwo").unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes.first().unwrap().body, vec![Item::from("one")]);
        assert_eq!(nodes.get(1).unwrap().body, vec![Item::from("two")]);
    }

    #[test]
    fn list_levels_count_tabs_and_space_groups() {
        assert_eq!(super::indentation_level("\t"), 0);
        assert_eq!(super::indentation_level("\t\t\t"), 2);
        assert_eq!(super::indentation_level("    "), 0);
        assert_eq!(super::indentation_level("        "), 1);
    }
}
