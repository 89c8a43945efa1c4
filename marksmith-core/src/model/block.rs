use serde::{Deserialize, Serialize};

use super::{Leaf, Node};

/// Block type tag.
///
/// Unknown tags are preserved as [`BlockType::Other`] so a loaded document
/// round-trips; they render with the default paragraph template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockType {
    Paragraph,
    Heading,
    HeadingOne,
    HeadingTwo,
    BlockQuote,
    Code,
    Question,
    Section,
    ListItem,
    BulletedList,
    NumberedList,
    Other(String),
}

impl BlockType {
    /// Container types that [`crate::toggle::toggle_list_block`] unwraps
    pub const LIST_TYPES: [BlockType; 2] = [BlockType::NumberedList, BlockType::BulletedList];

    pub fn as_str(&self) -> &str {
        match self {
            BlockType::Paragraph => "paragraph",
            BlockType::Heading => "heading",
            BlockType::HeadingOne => "heading-one",
            BlockType::HeadingTwo => "heading-two",
            BlockType::BlockQuote => "block-quote",
            BlockType::Code => "code",
            BlockType::Question => "question",
            BlockType::Section => "section",
            BlockType::ListItem => "list-item",
            BlockType::BulletedList => "bulleted-list",
            BlockType::NumberedList => "numbered-list",
            BlockType::Other(s) => s,
        }
    }

    pub fn is_list(&self) -> bool {
        Self::LIST_TYPES.contains(self)
    }
}

impl From<String> for BlockType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "paragraph" => BlockType::Paragraph,
            "heading" => BlockType::Heading,
            "heading-one" => BlockType::HeadingOne,
            "heading-two" => BlockType::HeadingTwo,
            "block-quote" => BlockType::BlockQuote,
            "code" => BlockType::Code,
            "question" => BlockType::Question,
            "section" => BlockType::Section,
            "list-item" => BlockType::ListItem,
            "bulleted-list" => BlockType::BulletedList,
            "numbered-list" => BlockType::NumberedList,
            _ => BlockType::Other(s),
        }
    }
}

impl From<BlockType> for String {
    fn from(kind: BlockType) -> Self {
        match kind {
            BlockType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structural node. `kind` is `None` for an untyped block.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Element {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<BlockType>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(kind: Option<BlockType>, children: Vec<Node>) -> Self {
        Self { kind, children }
    }

    /// A block holding a single text leaf
    pub fn text_block(kind: Option<BlockType>, text: impl Into<String>) -> Self {
        Self::new(kind, vec![Node::Leaf(Leaf::new(text))])
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::text_block(Some(BlockType::Paragraph), text)
    }

    pub fn is_kind(&self, kind: &BlockType) -> bool {
        self.kind.as_ref() == Some(kind)
    }

    /// Lowest block-level node: every child is a leaf
    pub fn is_lowest_block(&self) -> bool {
        self.children.iter().all(|c| matches!(c, Node::Leaf(_)))
    }

    pub fn leaves(&self) -> impl Iterator<Item = &Leaf> {
        self.children.iter().filter_map(|c| match c {
            Node::Leaf(leaf) => Some(leaf),
            Node::Element(_) => None,
        })
    }

    /// Concatenated text of all descendant leaves
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                Node::Leaf(leaf) => out.push_str(&leaf.text),
                Node::Element(el) => out.push_str(&el.text()),
            }
        }
        out
    }

    pub fn text_len(&self) -> usize {
        self.children
            .iter()
            .map(|c| match c {
                Node::Leaf(leaf) => leaf.len(),
                Node::Element(el) => el.text_len(),
            })
            .sum()
    }

    /// Number of lowest blocks at or below this element
    pub fn lowest_block_count(&self) -> usize {
        if self.is_lowest_block() {
            return 1;
        }
        self.children
            .iter()
            .map(|c| match c {
                Node::Element(el) => el.lowest_block_count(),
                Node::Leaf(_) => 0,
            })
            .sum()
    }
}
