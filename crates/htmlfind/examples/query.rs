//! Query example - parse a page, run a selector, print the matches
//!
//! Usage: cargo run --example query -- ".one script" [page.html]

use htmlfind::{find_j, text_content, DomSerializer, DomService};
use std::fs::File;

const SAMPLE: &str = r#"<div class="one two">
  <script>alert(1)</script>
  <script>alert(2)</script>
</div>"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing (RUST_LOG=debug shows per-stage match counts)
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let selector = args.next().unwrap_or_else(|| ".one script".to_string());

    let mut service = DomService::new();
    let root = match args.next() {
        Some(path) => service.parse_reader(&mut File::open(path)?)?,
        None => service.parse_html(SAMPLE)?,
    };
    let arena = service.arena();

    let found = find_j(arena, Some(root), &selector);
    println!("{} match(es) for {:?}", found.len(), selector);

    let serializer = DomSerializer::new();
    for node_id in found {
        println!("#{}: {}", node_id, serializer.render(arena, node_id)?);
        println!("    text: {:?}", text_content(arena, node_id)?);
    }

    Ok(())
}
