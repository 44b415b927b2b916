//! DOM Service - Main entry point for building a searchable tree
//!
//! This handles:
//! - HTML5 parsing (html5ever, browser-compatible error recovery)
//! - Flattening the parsed `RcDom` into the arena
//!
//! ```text
//! &str / Read → html5ever → RcDom (Rc links) → DomArena (u32 indices)
//! ```

use crate::arena::DomArena;
use crate::error::Result;
use crate::types::*;
use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use std::io::Read;
use tracing::debug;

/// Configuration for DOM service
#[derive(Debug, Clone)]
pub struct DomServiceConfig {
    /// Initial arena capacity, in nodes
    pub arena_capacity: usize,
    /// Skip text nodes that hold only whitespace
    pub drop_whitespace_text: bool,
}

impl Default for DomServiceConfig {
    fn default() -> Self {
        Self {
            arena_capacity: 1024, // Pre-allocate for typical page
            drop_whitespace_text: false,
        }
    }
}

/// Main DOM service
pub struct DomService {
    config: DomServiceConfig,
    arena: DomArena,
}

impl DomService {
    /// Create new DOM service with default config
    pub fn new() -> Self {
        Self::with_config(DomServiceConfig::default())
    }

    /// Create DOM service with custom config
    pub fn with_config(config: DomServiceConfig) -> Self {
        Self {
            arena: DomArena::with_capacity(config.arena_capacity),
            config,
        }
    }

    /// Get reference to internal arena
    pub fn arena(&self) -> &DomArena {
        &self.arena
    }

    /// Consume the service, keeping the parsed tree
    pub fn into_arena(self) -> DomArena {
        self.arena
    }

    /// Parse an HTML document and rebuild the arena from it
    ///
    /// The document node becomes the arena root and its ID is returned.
    /// The usual implied elements are created, so `"hi"` parses to
    /// `#document > html > (head, body > "hi")`.
    pub fn parse_html(&mut self, html: &str) -> Result<NodeId> {
        self.parse_reader(&mut html.as_bytes())
    }

    /// Parse UTF-8 HTML from a reader
    pub fn parse_reader<R: Read>(&mut self, reader: &mut R) -> Result<NodeId> {
        let dom = parse_document(RcDom::default(), ParseOpts::default())
            .from_utf8()
            .read_from(reader)?;

        self.arena.clear();
        let root_id = self.import(&dom.document)?;
        self.arena.set_root(root_id)?;

        debug!(nodes = self.arena.len(), "parsed html document");
        Ok(root_id)
    }

    /// Copy an `RcDom` subtree into the arena (iterative, no recursion)
    fn import(&mut self, document: &Handle) -> Result<NodeId> {
        let root_id = self.arena.add_node(DomNode::document());

        let mut stack: Vec<(Handle, NodeId)> = Vec::new();
        push_children(&mut stack, document, root_id);

        while let Some((handle, parent_id)) = stack.pop() {
            let Some(node) = self.convert(&handle) else {
                continue;
            };

            let node_id = self.arena.add_child(parent_id, node)?;
            push_children(&mut stack, &handle, node_id);
        }

        Ok(root_id)
    }

    fn convert(&self, handle: &Handle) -> Option<DomNode> {
        let node = match &handle.data {
            NodeData::Document => DomNode::document(),
            NodeData::Doctype { name, .. } => DomNode::new(NodeType::DocumentType, name.to_string()),
            NodeData::Text { contents } => {
                let contents = contents.borrow();
                if self.config.drop_whitespace_text && contents.trim().is_empty() {
                    return None;
                }
                DomNode::text(contents.to_string())
            }
            NodeData::Comment { contents } => DomNode::comment(contents.to_string()),
            NodeData::Element { name, attrs, .. } => {
                let mut node = DomNode::element(name.local.to_string());
                node.attributes = attrs
                    .borrow()
                    .iter()
                    .map(|a| Attribute::new(attribute_name(&a.name), a.value.to_string()))
                    .collect();
                node
            }
            NodeData::ProcessingInstruction { target, contents } => {
                let mut node = DomNode::new(NodeType::ProcessingInstruction, target.to_string());
                node.node_value = contents.to_string();
                node
            }
        };

        Some(node)
    }
}

/// `prefix:local` for foreign attributes (`xlink:href`, `xml:lang`)
fn attribute_name(name: &QualName) -> String {
    match &name.prefix {
        Some(prefix) => format!("{}:{}", prefix, name.local),
        None => name.local.to_string(),
    }
}

/// Queue `handle`'s children for import, last child on the bottom
///
/// `<template>` keeps its content in a separate fragment; it is imported
/// as the element's children.
fn push_children(stack: &mut Vec<(Handle, NodeId)>, handle: &Handle, parent_id: NodeId) {
    let mut children: Vec<Handle> = handle.children.borrow().clone();

    if let NodeData::Element {
        template_contents, ..
    } = &handle.data
    {
        if let Some(fragment) = template_contents.borrow().as_ref() {
            children.extend(fragment.children.borrow().iter().cloned());
        }
    }

    // Pop order must follow sibling order
    for child in children.into_iter().rev() {
        stack.push((child, parent_id));
    }
}

impl Default for DomService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(arena: &DomArena, node_id: NodeId, out: &mut Vec<String>, depth: usize) {
        let node = arena.get(node_id).unwrap();
        let label = match node.node_type {
            NodeType::Text | NodeType::Comment => format!("{:?}", node.node_value),
            _ => node.node_name.clone(),
        };
        out.push(format!("{}{}", "  ".repeat(depth), label));
        for &child in &node.children_ids {
            tree(arena, child, out, depth + 1);
        }
    }

    fn outline(arena: &DomArena) -> Vec<String> {
        let mut out = Vec::new();
        tree(arena, arena.root_id().unwrap(), &mut out, 0);
        out
    }

    #[test]
    fn test_parse_simple_dom() {
        let mut service = DomService::new();
        let root_id = service.parse_html("hi").unwrap();

        assert_eq!(root_id, 0);
        assert_eq!(
            outline(service.arena()),
            vec!["#document", "  html", "    head", "    body", "      \"hi\""]
        );
    }

    #[test]
    fn test_parse_empty_document() {
        let mut service = DomService::new();
        service.parse_html("").unwrap();

        assert_eq!(
            outline(service.arena()),
            vec!["#document", "  html", "    head", "    body"]
        );
    }

    #[test]
    fn test_parse_attributes_and_links() {
        let mut service = DomService::new();
        service
            .parse_html(r#"<DIV Class="one two" id=x><p>a</p><p>b</p></DIV>"#)
            .unwrap();
        let arena = service.arena();

        let div = arena.iter().find(|n| n.tag_name() == Some("div")).unwrap();
        assert_eq!(div.attr("class"), Some("one two"));
        assert_eq!(div.attr("id"), Some("x"));
        assert_eq!(div.attributes[0].name, "class");

        let paragraphs = arena.children(div.node_id).unwrap();
        assert_eq!(paragraphs.len(), 2);
        assert!(paragraphs.iter().all(|p| p.parent_id == Some(div.node_id)));
        assert_eq!(arena.children(paragraphs[1].node_id).unwrap()[0].node_value, "b");
    }

    #[test]
    fn test_parse_keeps_attribute_prefixes() {
        let mut service = DomService::new();
        service
            .parse_html(
                r##"<svg xmlns:xlink="http://www.w3.org/1999/xlink" xml:lang="en"><use xlink:href="#a"/></svg>"##,
            )
            .unwrap();
        let arena = service.arena();

        let svg = arena.iter().find(|n| n.tag_name() == Some("svg")).unwrap();
        assert_eq!(svg.attr("xmlns:xlink"), Some("http://www.w3.org/1999/xlink"));
        assert_eq!(svg.attr("xml:lang"), Some("en"));

        let use_el = arena.iter().find(|n| n.tag_name() == Some("use")).unwrap();
        assert_eq!(use_el.attr("xlink:href"), Some("#a"));
        assert_eq!(use_el.attr("href"), None);
    }

    #[test]
    fn test_parse_doctype_and_comment() {
        let mut service = DomService::new();
        service
            .parse_html("<!DOCTYPE html><!-- note --><p>x</p>")
            .unwrap();
        let root = service.arena().root().unwrap();
        let kinds: Vec<_> = service
            .arena()
            .children(root.node_id)
            .unwrap()
            .iter()
            .map(|n| n.node_type)
            .collect();

        assert_eq!(
            kinds,
            vec![NodeType::DocumentType, NodeType::Comment, NodeType::Element]
        );
    }

    #[test]
    fn test_template_contents_become_children() {
        let mut service = DomService::new();
        service
            .parse_html("<template><span>inside</span></template>")
            .unwrap();
        let arena = service.arena();

        let template = arena
            .iter()
            .find(|n| n.tag_name() == Some("template"))
            .unwrap();
        let children = arena.children(template.node_id).unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].node_name, "span");
    }

    #[test]
    fn test_drop_whitespace_text() {
        let html = "<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>";

        let mut keep = DomService::new();
        keep.parse_html(html).unwrap();

        let mut drop = DomService::with_config(DomServiceConfig {
            drop_whitespace_text: true,
            ..Default::default()
        });
        drop.parse_html(html).unwrap();

        let texts = |arena: &DomArena| arena.iter().filter(|n| n.is_text()).count();
        assert_eq!(texts(drop.arena()), 2);
        assert!(texts(keep.arena()) > 2);
    }

    #[test]
    fn test_reparse_replaces_tree() {
        let mut service = DomService::new();
        service.parse_html("<p>one</p><p>two</p>").unwrap();
        let first = service.arena().len();

        service.parse_html("").unwrap();
        assert!(service.arena().len() < first);
        assert_eq!(service.arena().root_id(), Some(0));
    }

    #[test]
    fn test_reader_io_error() {
        struct Broken;

        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "boom"))
            }
        }

        let mut service = DomService::new();
        let err = service.parse_reader(&mut Broken).unwrap_err();
        assert!(matches!(err, crate::DomError::Io(_)));
    }
}
