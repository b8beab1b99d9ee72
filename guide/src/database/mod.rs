pub mod node;
pub mod paragraph;
pub mod style;

use std::collections::HashMap;

use crate::database::node::Node;

/// Name of the node a guide viewer opens first.
pub const MAIN_NODE: &str = "MAIN";

/// The in-memory guide: a named set of nodes kept in creation order.
#[derive(Debug, Clone, Default)]
pub struct GuideDatabase {
    /// Name written into the `@database` header.
    pub name: String,
    nodes: Vec<Node>,
    /// Canonical node name → position in `nodes`.
    index: HashMap<String, usize>,
}

/// Stands in for a name with nothing left after cleaning.
pub const UNNAMED_NODE: &str = "UNNAMED";

/// Canonical form of a node name: a single ASCII word in uppercase.
///
/// Surrounding whitespace is removed and inner whitespace becomes `_`.
/// Quotes, `@`, `\`, control and non-ASCII characters are dropped, since
/// the name is written bare into the `@node` header.
pub fn canonical_name(name: &str) -> String {
    let canonical: String = name
        .trim()
        .chars()
        .filter_map(|ch| match ch {
            ch if ch.is_whitespace() => Some('_'),
            '"' | '@' | '\\' => None,
            ch if ch.is_ascii_graphic() => Some(ch.to_ascii_uppercase()),
            _ => None,
        })
        .collect();

    if canonical.is_empty() {
        UNNAMED_NODE.to_string()
    } else {
        canonical
    }
}

impl GuideDatabase {
    pub fn new(name: impl Into<String>) -> Self {
        GuideDatabase {
            name: name.into(),
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Fetch the node with this name, creating an empty one if it is new.
    pub fn get_or_create(&mut self, name: &str) -> &mut Node {
        let name = canonical_name(name);
        let position = match self.index.get(&name) {
            Some(&position) => position,
            None => {
                self.nodes.push(Node::new(name.clone()));
                self.index.insert(name, self.nodes.len() - 1);
                self.nodes.len() - 1
            }
        };
        &mut self.nodes[position]
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.index
            .get(&canonical_name(name))
            .map(|&position| &self.nodes[position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(&canonical_name(name))
    }

    /// Nodes in the order they were first created.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_case_insensitive() {
        let mut db = GuideDatabase::new("test.guide");
        db.get_or_create("intro").title = "Intro".into();
        assert_eq!(db.get_or_create("INTRO").title, "Intro");
        assert_eq!(db.len(), 1);
        assert_eq!(db.get("Intro").map(Node::name), Some("INTRO"));
        assert!(db.contains("iNtRo"));
        assert!(db.get("missing").is_none());
    }

    #[test]
    fn creation_order_is_kept() {
        let mut db = GuideDatabase::new("test.guide");
        for name in ["zeta", "alpha", "main", "alpha"] {
            db.get_or_create(name);
        }
        let names: Vec<&str> = db.nodes().iter().map(Node::name).collect();
        assert_eq!(names, vec!["ZETA", "ALPHA", "MAIN"]);
    }

    #[test]
    fn names_are_bare_ascii_words() {
        assert_eq!(canonical_name("  my page "), "MY_PAGE");
        assert_eq!(canonical_name("caf\u{e9}"), "CAF");
        assert_eq!(canonical_name("say \"hi\"@home\\x"), "SAY_HIHOMEX");
        assert_eq!(canonical_name("tab\there"), "TAB_HERE");
        assert_eq!(canonical_name("\u{e9}\u{e8}"), UNNAMED_NODE);
        assert_eq!(canonical_name("Getting-Started.v2"), "GETTING-STARTED.V2");
    }

    #[test]
    fn cleaned_names_share_a_node() {
        let mut db = GuideDatabase::new("test.guide");
        db.get_or_create("my page").title = "Page".into();
        assert!(db.contains("MY_PAGE"));
        assert_eq!(db.get_or_create("My Page").title, "Page");
        assert_eq!(db.len(), 1);
    }

    #[test]
    fn new_node_is_empty() {
        let mut db = GuideDatabase::new("test.guide");
        let node = db.get_or_create("x");
        assert!(node.is_empty());
        assert!(node.title.is_empty());
        node.paragraph();
        assert!(node.is_empty());
    }
}
