//! Selector search over parsed HTML trees
//!
//! Breadth-first lookup of nodes with a tiny descendant-only selector
//! language: `div`, `.class`, `*` (text), chained with spaces.
//!
//! ## Core Design
//!
//! ```text
//! HTML → html5ever → DomArena (owned) ──┐
//!                         ↓             │
//!                    NodeId (u32)       │
//!                                       ↓
//! ".one script *" → Selector → [Stage] → find_nested → Vec<NodeId> → DomSerializer
//! ```
//!
//! ```
//! use htmlfind::{find_j, DomService};
//!
//! let mut service = DomService::new();
//! let root = service.parse_html(r#"<div class="one"><p>a</p><p>b</p></div>"#)?;
//!
//! let found = find_j(service.arena(), Some(root), ".one p *");
//! assert_eq!(found.len(), 2);
//! # Ok::<(), htmlfind::DomError>(())
//! ```

pub mod arena;
pub mod error;
pub mod find;
pub mod queue;
pub mod selector;
pub mod serializer;
pub mod service;
pub mod types;
pub mod utils;

pub use arena::DomArena;
pub use error::{DomError, Result};
pub use find::{find, find_class, find_descendants, find_j, find_nested, find_tags, find_text};
pub use queue::NodeQueue;
pub use selector::{Selector, Stage};
pub use serializer::{render_node_as_html, DomSerializer, SerializerConfig};
pub use service::{DomService, DomServiceConfig};
pub use types::*;
pub use utils::text_content;
