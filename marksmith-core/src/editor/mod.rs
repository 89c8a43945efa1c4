//! Editing primitives over a [`Document`] and its [`Selection`].
//!
//! The toggle engine only talks to the document through this layer:
//! a node query with universal/existential matching, attribute setters
//! (optionally splitting leaves at the selection edges), wrap/unwrap of
//! container elements, and the lowest-block predicate. Every mutation
//! leaves the tree normalized.
//!
//! Selections are stored as block ordinals and char offsets. No transform
//! here adds or removes text, so a selection stays valid across all of
//! them without remapping.

mod normalize;
mod transforms;

use std::sync::Arc;

use crate::model::{BlockPoint, Document, Element, Node, Path, Selection};

pub use normalize::normalize;

/// How [`Editor::nodes`] treats the intersecting leaves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Every match is returned
    Existential,
    /// Matches are returned only if each intersecting leaf is matched by
    /// itself or one of its ancestors
    Universal,
}

/// A node together with its path
#[derive(Debug, Clone)]
pub struct NodeEntry<'a> {
    pub path: Path,
    pub node: &'a Node,
}

/// Immutable view of the editor after a mutation
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub revision: u64,
    pub document: Arc<Document>,
    pub selection: Option<Selection>,
}

/// Exclusively-owned editing session state.
///
/// The document is shared copy-on-write with every [`Snapshot`] handed out,
/// so a snapshot never observes later mutations.
#[derive(Debug, Clone)]
pub struct Editor {
    document: Arc<Document>,
    selection: Option<Selection>,
    revision: u64,
}

impl Editor {
    pub fn new(mut document: Document) -> Self {
        normalize(&mut document);
        Self {
            document: Arc::new(document),
            selection: None,
            revision: 0,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the selection, clamping points to existing blocks
    pub fn set_selection(&mut self, selection: Option<Selection>) {
        self.selection = selection.map(|sel| self.clamp(sel));
    }

    /// Swap in a whole new document. The selection is dropped.
    pub fn replace_document(&mut self, mut document: Document) -> Snapshot {
        normalize(&mut document);
        self.document = Arc::new(document);
        self.selection = None;
        self.commit()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            revision: self.revision,
            document: Arc::clone(&self.document),
            selection: self.selection,
        }
    }

    /// Close a batch of primitive mutations into a new revision
    pub fn commit(&mut self) -> Snapshot {
        self.revision += 1;
        self.snapshot()
    }

    pub fn is_lowest_block(&self, element: &Element) -> bool {
        element.is_lowest_block()
    }

    /// Nodes intersecting the selection, in document order, that satisfy
    /// `matcher`. The document root itself is never a candidate.
    pub fn nodes<F>(&self, matcher: F, mode: Mode) -> Vec<NodeEntry<'_>>
    where
        F: Fn(&Node) -> bool,
    {
        let Some(selection) = self.selection else {
            return Vec::new();
        };

        let mut intersecting = Vec::new();
        collect_intersecting(
            &self.document.children,
            &mut Vec::new(),
            &mut 0,
            &selection,
            self.cursor_leaf().as_deref(),
            &mut intersecting,
        );

        let matches: Vec<NodeEntry<'_>> = intersecting
            .iter()
            .filter(|(_, node)| matcher(node))
            .map(|(path, node)| NodeEntry {
                path: path.clone(),
                node: *node,
            })
            .collect();

        if mode == Mode::Universal {
            let leaves: Vec<&Path> = intersecting
                .iter()
                .filter(|(_, node)| matches!(node, Node::Leaf(_)))
                .map(|(path, _)| path)
                .collect();
            if leaves.is_empty() {
                return Vec::new();
            }
            let all_covered = leaves
                .iter()
                .all(|leaf| matches.iter().any(|m| leaf.starts_with(&m.path)));
            if !all_covered {
                return Vec::new();
            }
        }

        matches
    }

    /// Path of the leaf holding a collapsed cursor (backward affinity)
    pub(crate) fn cursor_leaf(&self) -> Option<Path> {
        let selection = self.selection?;
        if !selection.is_collapsed() {
            return None;
        }
        let point = selection.anchor;
        let blocks = self.document.lowest_blocks();
        let (path, block) = blocks.get(point.block)?;

        let mut end = 0;
        let mut index = block.children.len().saturating_sub(1);
        for (i, leaf) in block.leaves().enumerate() {
            end += leaf.len();
            if point.offset <= end {
                index = i;
                break;
            }
        }
        let mut leaf_path = path.clone();
        leaf_path.push(index);
        Some(leaf_path)
    }

    fn clamp(&self, selection: Selection) -> Selection {
        let blocks = self.document.block_texts();
        let clamp_point = |mut point: BlockPoint| {
            if blocks.is_empty() {
                return BlockPoint::default();
            }
            point.block = point.block.min(blocks.len() - 1);
            point.offset = point.offset.min(blocks[point.block].chars().count());
            point
        };
        Selection::new(clamp_point(selection.anchor), clamp_point(selection.focus))
    }

    pub(crate) fn document_mut(&mut self) -> &mut Document {
        Arc::make_mut(&mut self.document)
    }
}

/// Leaf intersection for an expanded selection: the char span of the leaf
/// overlaps `[from, to)`, or a zero-width leaf lies inside it.
pub(crate) fn leaf_intersects(start: usize, end: usize, from: usize, to: usize) -> bool {
    if start == end {
        from <= start && end <= to
    } else {
        start < to && end > from
    }
}

fn collect_intersecting<'a>(
    nodes: &'a [Node],
    prefix: &mut Path,
    ordinal: &mut usize,
    selection: &Selection,
    cursor_leaf: Option<&[usize]>,
    out: &mut Vec<(Path, &'a Node)>,
) {
    let (start, end) = selection.edges();
    for (i, node) in nodes.iter().enumerate() {
        let Node::Element(el) = node else {
            continue;
        };
        prefix.push(i);
        let first = *ordinal;
        let count = el.lowest_block_count();
        let intersects = count > 0 && first <= end.block && first + count > start.block;

        if !intersects {
            *ordinal += count;
        } else if el.is_lowest_block() {
            out.push((prefix.clone(), node));
            let len = el.text_len();
            let span = selection.span_in_block(first, len);
            let mut offset = 0;
            for (j, child) in el.children.iter().enumerate() {
                let Node::Leaf(leaf) = child else {
                    continue;
                };
                let leaf_start = offset;
                offset += leaf.len();
                prefix.push(j);
                let hit = match (cursor_leaf, span) {
                    (Some(cursor), _) => cursor == prefix.as_slice(),
                    (None, Some((from, to))) => leaf_intersects(leaf_start, offset, from, to),
                    (None, None) => false,
                };
                if hit {
                    out.push((prefix.clone(), child));
                }
                prefix.pop();
            }
            *ordinal += 1;
        } else {
            out.push((prefix.clone(), node));
            collect_intersecting(&el.children, prefix, ordinal, selection, cursor_leaf, out);
        }
        prefix.pop();
    }
}
