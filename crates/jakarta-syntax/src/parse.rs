use std::cell::RefCell;

use jakarta_types::Span;
use thiserror::Error;
use tree_sitter::{Node, Parser, Tree};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("tree-sitter-java language load failed")]
    Language,
    #[error("tree-sitter parser is already in use")]
    ParserBusy,
    #[error("tree-sitter failed to produce a syntax tree")]
    NoTree,
}

thread_local! {
    static JAVA_PARSER: RefCell<Option<Parser>> = RefCell::new({
        let mut parser = Parser::new();
        match parser.set_language(tree_sitter_java::language()) {
            Ok(()) => Some(parser),
            Err(_) => None,
        }
    });
}

/// Parse Java source text with `tree-sitter-java`.
pub fn parse_java(source: &str) -> Result<Tree, ParseError> {
    JAVA_PARSER.with(|parser_cell| {
        let mut parser = parser_cell
            .try_borrow_mut()
            .map_err(|_| ParseError::ParserBusy)?;
        let parser = parser.as_mut().ok_or(ParseError::Language)?;
        parser.parse(source, None).ok_or(ParseError::NoTree)
    })
}

/// Visit a node and all its descendants in pre-order.
///
/// The walk keeps its position in a cursor rather than on the call stack, so
/// deeply nested expressions cannot overflow the thread.
pub(crate) fn visit_nodes<'a, F: FnMut(Node<'a>)>(node: Node<'a>, f: &mut F) {
    let mut cursor = node.walk();
    loop {
        f(cursor.node());
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.node() == node {
                return;
            }
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

/// Find the first named child with the given kind.
pub(crate) fn find_named_child<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    let result = node
        .named_children(&mut cursor)
        .find(|child| child.kind() == kind);
    result
}

/// Best-effort helper to fetch a node's `modifiers` field, falling back to a named child.
pub(crate) fn modifier_node(node: Node<'_>) -> Option<Node<'_>> {
    node.child_by_field_name("modifiers")
        .or_else(|| find_named_child(node, "modifiers"))
}

/// Return the byte slice for `node` within `source`.
pub(crate) fn node_text<'a>(source: &'a str, node: Node<'_>) -> &'a str {
    &source[node.byte_range()]
}

pub(crate) fn node_span(node: Node<'_>) -> Span {
    Span::new(node.start_byte(), node.end_byte())
}
