use tracing::trace;

use super::{leaf_intersects, normalize, Editor};
use crate::model::{BlockType, Element, Leaf, Mark, Node};

impl Editor {
    /// Set `mark` to `value` on the leaves intersecting the selection.
    ///
    /// With `split`, leaves straddling a selection edge are split so only
    /// the selected part changes; a collapsed selection inside non-empty
    /// text changes nothing. Without `split`, whole leaves change.
    pub fn set_marks(&mut self, mark: Mark, value: Option<bool>, split: bool) {
        let Some(selection) = self.selection else {
            return;
        };

        if selection.is_collapsed() {
            let Some(path) = self.cursor_leaf() else {
                return;
            };
            let doc = self.document_mut();
            if let Some(Node::Leaf(leaf)) = doc.get_mut(&path) {
                if split && !leaf.is_empty() {
                    trace!(mark = mark.as_str(), "collapsed split selection, nothing to mark");
                    return;
                }
                leaf.set_mark(mark, value);
            }
            trace!(mark = mark.as_str(), ?value, ?path, "set mark at cursor");
            normalize(doc);
            return;
        }

        let doc = self.document_mut();
        for_each_block_mut(&mut doc.children, &mut 0, &mut |ordinal: usize, block: &mut Element| {
            let Some((from, to)) = selection.span_in_block(ordinal, block.text_len()) else {
                return;
            };
            let children = std::mem::take(&mut block.children);
            block.children = restyle(children, from, to, split, |leaf| leaf.set_mark(mark, value));
        });
        trace!(mark = mark.as_str(), ?value, split, "set marks");
        normalize(doc);
    }

    /// Set the type of every lowest block intersecting the selection
    pub fn set_block_kind(&mut self, kind: Option<BlockType>) {
        let Some(selection) = self.selection else {
            return;
        };
        let doc = self.document_mut();
        for_each_block_mut(&mut doc.children, &mut 0, &mut |ordinal: usize, block: &mut Element| {
            if selection.covers_block(ordinal) {
                block.kind = kind.clone();
            }
        });
        trace!(?kind, "set block kind");
    }

    /// Remove every container matching `matcher` around the selected
    /// blocks. A container that also holds unselected blocks is split, and
    /// the unselected runs before and after stay wrapped.
    pub fn unwrap_nodes<F>(&mut self, matcher: F)
    where
        F: Fn(&Element) -> bool,
    {
        let Some(selection) = self.selection else {
            return;
        };
        let (start, end) = selection.edges();
        let doc = self.document_mut();
        let children = std::mem::take(&mut doc.children);
        doc.children = unwrap_in(children, &mut 0, (start.block, end.block), &matcher);
        trace!(from = start.block, to = end.block, "unwrapped containers");
        normalize(doc);
    }

    /// Wrap the selected blocks in one new element of `kind`.
    ///
    /// The wrapper is inserted in the deepest common ancestor of the first
    /// and last selected block, and takes every child of that ancestor
    /// between them.
    pub fn wrap_nodes(&mut self, kind: BlockType) {
        let Some(selection) = self.selection else {
            return;
        };
        let (start, end) = selection.edges();
        let (first, last) = {
            let blocks = self.document.lowest_blocks();
            match (blocks.get(start.block), blocks.get(end.block)) {
                (Some((first, _)), Some((last, _))) => (first.clone(), last.clone()),
                _ => return,
            }
        };

        let common: Vec<usize> = if first == last {
            first[..first.len() - 1].to_vec()
        } else {
            first
                .iter()
                .zip(last.iter())
                .take_while(|(a, b)| a == b)
                .map(|(a, _)| *a)
                .collect()
        };
        let depth = common.len();
        let (lo, hi) = (first[depth], last[depth]);

        let doc = self.document_mut();
        let siblings = if common.is_empty() {
            &mut doc.children
        } else {
            match doc.get_mut(&common) {
                Some(Node::Element(el)) => &mut el.children,
                _ => return,
            }
        };
        let wrapped: Vec<Node> = siblings.drain(lo..=hi).collect();
        siblings.insert(lo, Node::Element(Element::new(Some(kind.clone()), wrapped)));
        trace!(%kind, ?common, lo, hi, "wrapped blocks");
        normalize(doc);
    }
}

/// Visit lowest blocks in document order with their ordinals
pub(crate) fn for_each_block_mut(
    nodes: &mut [Node],
    ordinal: &mut usize,
    f: &mut dyn FnMut(usize, &mut Element),
) {
    for node in nodes.iter_mut() {
        if let Node::Element(el) = node {
            if el.is_lowest_block() {
                f(*ordinal, el);
                *ordinal += 1;
            } else {
                for_each_block_mut(&mut el.children, ordinal, f);
            }
        }
    }
}

/// Apply `apply` to the leaves of one block that intersect `[from, to)`
fn restyle<F>(children: Vec<Node>, from: usize, to: usize, split: bool, apply: F) -> Vec<Node>
where
    F: Fn(&mut Leaf),
{
    let mut out = Vec::with_capacity(children.len() + 2);
    let mut offset = 0;

    for child in children {
        let Node::Leaf(mut leaf) = child else {
            out.push(child);
            continue;
        };
        let start = offset;
        let end = start + leaf.len();
        offset = end;

        if !leaf_intersects(start, end, from, to) {
            out.push(Node::Leaf(leaf));
        } else if !split || (from <= start && end <= to) {
            apply(&mut leaf);
            out.push(Node::Leaf(leaf));
        } else {
            let cut_start = from.max(start) - start;
            let cut_end = to.min(end) - start;
            let (before, rest) = leaf.split_at(cut_start);
            let (mut selected, after) = rest.split_at(cut_end - cut_start);
            apply(&mut selected);
            for part in [before, selected, after] {
                if !part.is_empty() {
                    out.push(Node::Leaf(part));
                }
            }
        }
    }
    out
}

fn unwrap_in<F>(nodes: Vec<Node>, ordinal: &mut usize, range: (usize, usize), matcher: &F) -> Vec<Node>
where
    F: Fn(&Element) -> bool,
{
    let mut out = Vec::with_capacity(nodes.len());

    for node in nodes {
        let mut el = match node {
            Node::Element(el) if !el.is_lowest_block() => el,
            Node::Element(el) => {
                *ordinal += 1;
                out.push(Node::Element(el));
                continue;
            }
            leaf => {
                out.push(leaf);
                continue;
            }
        };

        let first = *ordinal;
        let count = el.lowest_block_count();
        let overlaps = count > 0 && first <= range.1 && first + count > range.0;

        if !overlaps {
            *ordinal += count;
            out.push(Node::Element(el));
        } else if matcher(&el) {
            let mut before = Vec::new();
            let mut selected = Vec::new();
            let mut after = Vec::new();
            for child in el.children {
                let child_count = match &child {
                    Node::Element(c) => c.lowest_block_count(),
                    Node::Leaf(_) => 0,
                };
                let child_first = *ordinal;
                if child_count == 0 {
                    if selected.is_empty() {
                        before.push(child);
                    } else {
                        after.push(child);
                    }
                } else if child_first + child_count <= range.0 {
                    *ordinal += child_count;
                    before.push(child);
                } else if child_first > range.1 {
                    *ordinal += child_count;
                    after.push(child);
                } else {
                    selected.extend(unwrap_in(vec![child], ordinal, range, matcher));
                }
            }
            if !before.is_empty() {
                out.push(Node::Element(Element::new(el.kind.clone(), before)));
            }
            out.extend(selected);
            if !after.is_empty() {
                out.push(Node::Element(Element::new(el.kind, after)));
            }
        } else {
            el.children = unwrap_in(el.children, ordinal, range, matcher);
            out.push(Node::Element(el));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::Mode;
    use crate::model::{BlockPoint, Document, Selection};

    fn doc(json: &str) -> Document {
        Document::from_json(json).unwrap()
    }

    fn editor_with(json: &str, selection: Selection) -> Editor {
        let mut editor = Editor::new(doc(json));
        editor.set_selection(Some(selection));
        editor
    }

    #[test]
    fn test_set_marks_splits_at_edges() {
        let mut editor = editor_with(
            r#"[{"type":"paragraph","children":[{"text":"hello world"}]}]"#,
            Selection::within(0, 6, 11),
        );
        editor.set_marks(Mark::Bold, Some(true), true);

        let expected = doc(
            r#"[{"type":"paragraph","children":[{"text":"hello "},{"text":"world","bold":true}]}]"#,
        );
        assert_eq!(editor.document(), &expected);
    }

    #[test]
    fn test_set_marks_without_split_marks_whole_leaf() {
        let mut editor = editor_with(
            r#"[{"type":"paragraph","children":[{"text":"hello world"}]}]"#,
            Selection::within(0, 6, 8),
        );
        editor.set_marks(Mark::Question, Some(true), false);

        let expected =
            doc(r#"[{"type":"paragraph","children":[{"text":"hello world","question":true}]}]"#);
        assert_eq!(editor.document(), &expected);
    }

    #[test]
    fn test_set_marks_collapsed_split_is_noop() {
        let mut editor = editor_with(
            r#"[{"type":"paragraph","children":[{"text":"hello"}]}]"#,
            Selection::collapsed(BlockPoint::new(0, 2)),
        );
        let before = editor.document().clone();
        editor.set_marks(Mark::Bold, Some(true), true);
        assert_eq!(editor.document(), &before);
    }

    #[test]
    fn test_set_marks_across_blocks() {
        let mut editor = editor_with(
            r#"[
                {"type":"paragraph","children":[{"text":"abc"}]},
                {"type":"paragraph","children":[{"text":"def"}]}
            ]"#,
            Selection::new(BlockPoint::new(0, 1), BlockPoint::new(1, 2)),
        );
        editor.set_marks(Mark::Italic, Some(true), true);

        let expected = doc(
            r#"[
                {"type":"paragraph","children":[{"text":"a"},{"text":"bc","italic":true}]},
                {"type":"paragraph","children":[{"text":"de","italic":true},{"text":"f"}]}
            ]"#,
        );
        assert_eq!(editor.document(), &expected);
    }

    #[test]
    fn test_unwrap_splits_container() {
        let mut editor = editor_with(
            r#"[{"type":"bulleted-list","children":[
                {"type":"list-item","children":[{"text":"a"}]},
                {"type":"list-item","children":[{"text":"b"}]},
                {"type":"list-item","children":[{"text":"c"}]}
            ]}]"#,
            Selection::within(1, 0, 1),
        );
        editor.unwrap_nodes(|el| el.kind.as_ref().is_some_and(BlockType::is_list));

        let expected = doc(
            r#"[
                {"type":"bulleted-list","children":[{"type":"list-item","children":[{"text":"a"}]}]},
                {"type":"list-item","children":[{"text":"b"}]},
                {"type":"bulleted-list","children":[{"type":"list-item","children":[{"text":"c"}]}]}
            ]"#,
        );
        assert_eq!(editor.document(), &expected);
    }

    #[test]
    fn test_wrap_uses_common_ancestor() {
        let mut editor = editor_with(
            r#"[
                {"type":"paragraph","children":[{"text":"a"}]},
                {"type":"paragraph","children":[{"text":"b"}]},
                {"type":"paragraph","children":[{"text":"c"}]}
            ]"#,
            Selection::new(BlockPoint::new(0, 0), BlockPoint::new(1, 1)),
        );
        editor.wrap_nodes(BlockType::NumberedList);

        let expected = doc(
            r#"[
                {"type":"numbered-list","children":[
                    {"type":"paragraph","children":[{"text":"a"}]},
                    {"type":"paragraph","children":[{"text":"b"}]}
                ]},
                {"type":"paragraph","children":[{"text":"c"}]}
            ]"#,
        );
        assert_eq!(editor.document(), &expected);
    }

    #[test]
    fn test_nodes_universal_requires_every_leaf() {
        let editor = editor_with(
            r#"[{"type":"paragraph","children":[{"text":"ab","bold":true},{"text":"cd"}]}]"#,
            Selection::within(0, 0, 4),
        );
        let bold = |n: &Node| n.as_leaf().is_some_and(|l| l.has_mark(Mark::Bold));
        assert!(editor.nodes(bold, Mode::Universal).is_empty());
        assert_eq!(editor.nodes(bold, Mode::Existential).len(), 1);
    }
}
