use serde::{Deserialize, Serialize};

use super::{BlockType, Element, Leaf};
use crate::error::{Error, Result};

/// Index path from the document root to a node
pub type Path = Vec<usize>;

/// Either a structural element or a text leaf
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Node {
    Element(Element),
    Leaf(Leaf),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::Element(_) => None,
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl From<Leaf> for Node {
    fn from(leaf: Leaf) -> Self {
        Node::Leaf(leaf)
    }
}

/// The document tree. Serializes as the bare array of top-level nodes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Document {
    pub children: Vec<Node>,
}

impl Document {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    /// The editor's starting value: one paragraph
    pub fn starter() -> Self {
        Self::new(vec![Element::paragraph("A line of text in a paragraph.").into()])
    }

    /// One paragraph per line of plain text
    pub fn from_plain_text(content: &str) -> Self {
        let mut children: Vec<Node> = content
            .lines()
            .map(|line| Element::paragraph(line).into())
            .collect();
        if children.is_empty() {
            children.push(Element::paragraph("").into());
        }
        Self::new(children)
    }

    /// Parse the JSON value shape. Top-level leaves are not allowed.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: Document = serde_json::from_str(json)?;
        if doc.children.is_empty() {
            return Err(Error::EmptyDocument);
        }
        if doc.children.iter().any(|c| matches!(c, Node::Leaf(_))) {
            return Err(Error::TopLevelLeaf);
        }
        Ok(doc)
    }

    pub fn get(&self, path: &[usize]) -> Option<&Node> {
        let (first, rest) = path.split_first()?;
        let mut node = self.children.get(*first)?;
        for &i in rest {
            node = match node {
                Node::Element(el) => el.children.get(i)?,
                Node::Leaf(_) => return None,
            };
        }
        Some(node)
    }

    pub fn get_mut(&mut self, path: &[usize]) -> Option<&mut Node> {
        let (first, rest) = path.split_first()?;
        let mut node = self.children.get_mut(*first)?;
        for &i in rest {
            node = match node {
                Node::Element(el) => el.children.get_mut(i)?,
                Node::Leaf(_) => return None,
            };
        }
        Some(node)
    }

    /// Lowest blocks in document order with their paths.
    /// The position in the returned vector is the block ordinal.
    pub fn lowest_blocks(&self) -> Vec<(Path, &Element)> {
        fn walk<'a>(nodes: &'a [Node], prefix: &mut Path, out: &mut Vec<(Path, &'a Element)>) {
            for (i, node) in nodes.iter().enumerate() {
                if let Node::Element(el) = node {
                    prefix.push(i);
                    if el.is_lowest_block() {
                        out.push((prefix.clone(), el));
                    } else {
                        walk(&el.children, prefix, out);
                    }
                    prefix.pop();
                }
            }
        }

        let mut out = Vec::new();
        walk(&self.children, &mut Vec::new(), &mut out);
        out
    }

    pub fn block_count(&self) -> usize {
        self.children
            .iter()
            .filter_map(Node::as_element)
            .map(Element::lowest_block_count)
            .sum()
    }

    /// Text of each lowest block, one entry per block ordinal
    pub fn block_texts(&self) -> Vec<String> {
        self.lowest_blocks().into_iter().map(|(_, el)| el.text()).collect()
    }

    /// Nearest list container enclosing the node at `path`, if any
    pub fn list_container_of(&self, path: &[usize]) -> Option<&BlockType> {
        (1..path.len())
            .rev()
            .filter_map(|len| self.get(&path[..len]))
            .filter_map(Node::as_element)
            .filter_map(|el| el.kind.as_ref())
            .find(|kind| kind.is_list())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested() -> Document {
        Document::from_json(
            r#"[
                {"type":"paragraph","children":[{"text":"one"}]},
                {"type":"bulleted-list","children":[
                    {"type":"list-item","children":[{"text":"two"}]},
                    {"type":"list-item","children":[{"text":"three"}]}
                ]}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_lowest_blocks_in_order() {
        let doc = nested();
        let blocks = doc.lowest_blocks();
        let paths: Vec<Path> = blocks.iter().map(|(p, _)| p.clone()).collect();
        assert_eq!(paths, vec![vec![0], vec![1, 0], vec![1, 1]]);
        assert_eq!(doc.block_count(), 3);
        assert_eq!(doc.block_texts(), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_list_container_of() {
        let doc = nested();
        assert_eq!(doc.list_container_of(&[1, 0]), Some(&BlockType::BulletedList));
        assert_eq!(doc.list_container_of(&[0]), None);
    }

    #[test]
    fn test_from_json_rejects_empty_and_leaves() {
        assert!(matches!(Document::from_json("[]"), Err(Error::EmptyDocument)));
        assert!(matches!(
            Document::from_json(r#"[{"text":"x"}]"#),
            Err(Error::TopLevelLeaf)
        ));
        assert!(matches!(Document::from_json("{"), Err(Error::Parse(_))));
    }

    #[test]
    fn test_from_plain_text() {
        let doc = Document::from_plain_text("a\nb\n");
        assert_eq!(doc.block_texts(), vec!["a", "b"]);
        assert_eq!(Document::from_plain_text("").block_count(), 1);
    }
}
