//! DOM Serializer - Render a tree (or search results) back to HTML
//!
//! Follows the HTML fragment serialization rules:
//! - Void elements get no end tag
//! - Text under raw-text elements (`script`, `style`, ...) is not escaped
//! - Attribute values are always double-quoted

use crate::arena::DomArena;
use crate::error::Result;
use crate::types::*;

/// Elements that never have an end tag
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Elements whose text children are emitted verbatim
pub const RAW_TEXT_ELEMENTS: &[&str] = &[
    "iframe",
    "noembed",
    "noframes",
    "noscript",
    "plaintext",
    "script",
    "style",
    "xmp",
];

/// Serializer configuration
#[derive(Debug, Clone, Default)]
pub struct SerializerConfig {
    pub skip_comments: bool,
}

/// DOM Tree Serializer
pub struct DomSerializer {
    config: SerializerConfig,
}

impl DomSerializer {
    pub fn new() -> Self {
        Self::with_config(SerializerConfig::default())
    }

    pub fn with_config(config: SerializerConfig) -> Self {
        Self { config }
    }

    /// Render the arena root; an arena without root renders as `""`
    pub fn render_html(&self, arena: &DomArena) -> Result<String> {
        match arena.root_id() {
            Some(root_id) => self.render(arena, root_id),
            None => Ok(String::new()),
        }
    }

    /// Render one node and its subtree
    pub fn render(&self, arena: &DomArena, node_id: NodeId) -> Result<String> {
        let mut output = String::with_capacity(256);
        self.serialize_node(arena, node_id, &mut output)?;
        Ok(output)
    }

    /// Render each node in turn, concatenated (e.g. a search result)
    pub fn render_nodes(&self, arena: &DomArena, node_ids: &[NodeId]) -> Result<String> {
        let mut output = String::with_capacity(256);
        for &node_id in node_ids {
            self.serialize_node(arena, node_id, &mut output)?;
        }
        Ok(output)
    }

    /// Serialize a node and its subtree (iterative, no recursion)
    fn serialize_node(&self, arena: &DomArena, node_id: NodeId, output: &mut String) -> Result<()> {
        let mut stack = vec![Step::Open(node_id)];

        while let Some(step) = stack.pop() {
            let node_id = match step {
                Step::Open(node_id) => node_id,
                Step::Close(node_id) => {
                    output.push_str("</");
                    output.push_str(&arena.get(node_id)?.node_name);
                    output.push('>');
                    continue;
                }
            };
            let node = arena.get(node_id)?;

            match node.node_type {
                NodeType::Element => {
                    output.push('<');
                    output.push_str(&node.node_name);
                    for attr in &node.attributes {
                        output.push(' ');
                        output.push_str(&attr.name);
                        output.push_str("=\"");
                        escape_into(&attr.value, true, output);
                        output.push('"');
                    }
                    output.push('>');

                    if is_void(&node.node_name) {
                        continue;
                    }

                    stack.push(Step::Close(node_id));
                    push_children(&mut stack, node);
                }
                NodeType::Text => {
                    let raw = arena
                        .parent(node_id)?
                        .and_then(|parent| parent.tag_name())
                        .is_some_and(is_raw_text);

                    if raw {
                        output.push_str(&node.node_value);
                    } else {
                        escape_into(&node.node_value, false, output);
                    }
                }
                NodeType::Comment => {
                    if !self.config.skip_comments {
                        output.push_str("<!--");
                        output.push_str(&node.node_value);
                        output.push_str("-->");
                    }
                }
                NodeType::DocumentType => {
                    output.push_str("<!DOCTYPE ");
                    output.push_str(&node.node_name);
                    output.push('>');
                }
                NodeType::ProcessingInstruction => {
                    output.push_str("<?");
                    output.push_str(&node.node_name);
                    output.push(' ');
                    output.push_str(&node.node_value);
                    output.push('>');
                }
                NodeType::Document => {
                    // For document nodes, just serialize children
                    push_children(&mut stack, node);
                }
            }
        }

        Ok(())
    }
}

/// Pending work for the serializer stack
enum Step {
    Open(NodeId),
    /// End tag of an element whose children are already emitted
    Close(NodeId),
}

/// Push children in reverse order (so they're emitted left-to-right)
fn push_children(stack: &mut Vec<Step>, node: &DomNode) {
    for &child_id in node.children_ids.iter().rev() {
        stack.push(Step::Open(child_id));
    }
}

impl Default for DomSerializer {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a node with the default configuration
pub fn render_node_as_html(arena: &DomArena, node_id: NodeId) -> Result<String> {
    DomSerializer::new().render(arena, node_id)
}

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| tag.eq_ignore_ascii_case(v))
}

fn is_raw_text(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.iter().any(|r| tag.eq_ignore_ascii_case(r))
}

fn escape_into(text: &str, attr_mode: bool, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            '"' if attr_mode => output.push_str("&quot;"),
            '<' if !attr_mode => output.push_str("&lt;"),
            '>' if !attr_mode => output.push_str("&gt;"),
            c => output.push(c),
        }
    }
}
