//! Selector parsing
//!
//! A selector is a space-separated list of tokens, each compiled to one
//! [`Stage`]:
//!
//! ```text
//! ".one script *"  →  [Class("one"), Tag("script"), Text]
//! ```
//!
//! Stages are plain data, matched against a node with a `match`, so a
//! compiled selector can be compared, printed and serialized.

use crate::types::DomNode;
use crate::utils::eq_ignore_case;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// One filtering step of a selector
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum Stage {
    /// Element whose tag name equals the token (case-insensitive)
    Tag(String),
    /// Element whose `class` list contains the name (case-insensitive)
    Class(String),
    /// Any text node
    Text,
}

impl Stage {
    /// Compile a single non-empty token
    ///
    /// `.name` is a class, `*` (anything after it is ignored) is text,
    /// everything else is a tag name.
    pub fn from_token(token: &str) -> Self {
        if let Some(class) = token.strip_prefix('.') {
            Stage::Class(class.to_string())
        } else if token.starts_with('*') {
            Stage::Text
        } else {
            Stage::Tag(token.to_string())
        }
    }

    pub fn matches(&self, node: &DomNode) -> bool {
        match self {
            Stage::Tag(name) => node.tag_name().is_some_and(|tag| eq_ignore_case(tag, name)),
            Stage::Class(name) => node.has_class(name),
            Stage::Text => node.is_text(),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Tag(name) => f.write_str(name),
            Stage::Class(name) => write!(f, ".{}", name),
            Stage::Text => f.write_str("*"),
        }
    }
}

/// Split a selector on single spaces, dropping empty tokens
pub fn tokenize(selector: &str) -> impl Iterator<Item = &str> {
    selector.split(' ').filter(|token| !token.is_empty())
}

/// Ordered stage list; later stages search beneath matches of earlier ones
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selector {
    stages: Vec<Stage>,
}

impl Selector {
    pub fn parse(selector: &str) -> Self {
        tokenize(selector).map(Stage::from_token).collect()
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl FromIterator<Stage> for Selector {
    fn from_iter<I: IntoIterator<Item = Stage>>(iter: I) -> Self {
        Self {
            stages: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Stage>> for Selector {
    fn from(stages: Vec<Stage>) -> Self {
        Self { stages }
    }
}

impl FromStr for Selector {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stage) in self.stages.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", stage)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_dispatch() {
        assert_eq!(Stage::from_token("div"), Stage::Tag("div".to_string()));
        assert_eq!(Stage::from_token(".one"), Stage::Class("one".to_string()));
        assert_eq!(Stage::from_token("*"), Stage::Text);
        assert_eq!(Stage::from_token("*ignored"), Stage::Text);
        assert_eq!(Stage::from_token("."), Stage::Class(String::new()));
    }

    #[test]
    fn test_tokenize_skips_empty_tokens() {
        let tokens: Vec<_> = tokenize("  div   .a *  ").collect();
        assert_eq!(tokens, vec!["div", ".a", "*"]);
        assert_eq!(tokenize("").count(), 0);
        assert_eq!(tokenize("   ").count(), 0);
    }

    #[test]
    fn test_tab_is_not_a_separator() {
        let selector = Selector::parse("div\tspan");
        assert_eq!(selector.stages(), &[Stage::Tag("div\tspan".to_string())]);
    }

    #[test]
    fn test_parse_preserves_order() {
        let selector: Selector = ".one  script *".parse().unwrap();

        assert_eq!(
            selector.stages(),
            &[
                Stage::Class("one".to_string()),
                Stage::Tag("script".to_string()),
                Stage::Text,
            ]
        );
        assert_eq!(selector.to_string(), ".one script *");
    }

    #[test]
    fn test_empty_selector() {
        assert!(Selector::parse("").is_empty());
        assert!(Selector::parse("    ").is_empty());
        assert_eq!(Selector::parse(" a ").len(), 1);
    }

    #[test]
    fn test_stage_matching() {
        let div = DomNode::element("DIV").with_attr("class", "Alpha beta");
        let text = DomNode::text("hi");
        let comment = DomNode::comment("hi");

        assert!(Stage::Tag("div".to_string()).matches(&div));
        assert!(Stage::Tag("Div".to_string()).matches(&div));
        assert!(!Stage::Tag("span".to_string()).matches(&div));
        assert!(!Stage::Tag("#text".to_string()).matches(&text));

        assert!(Stage::Class("alpha".to_string()).matches(&div));
        assert!(Stage::Class("BETA".to_string()).matches(&div));
        assert!(!Stage::Class("alpha beta".to_string()).matches(&div));

        assert!(Stage::Text.matches(&text));
        assert!(!Stage::Text.matches(&comment));
        assert!(!Stage::Text.matches(&div));
    }

    #[test]
    fn test_serde_stage_list() {
        let selector = Selector::parse(".one div *");
        let json = serde_json::to_string(&selector).unwrap();

        assert_eq!(
            json,
            r#"[{"kind":"class","name":"one"},{"kind":"tag","name":"div"},{"kind":"text"}]"#
        );

        let back: Selector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, selector);
    }
}
