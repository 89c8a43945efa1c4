use crate::model::{Document, Element, Leaf, Node};

/// Bring a document back to canonical shape after a transform.
///
/// - every element has at least one child
/// - adjacent leaves with identical marks are merged
/// - empty leaves are dropped when the block has other leaves
///
/// Block text is never changed.
pub fn normalize(doc: &mut Document) {
    for node in doc.children.iter_mut() {
        if let Node::Element(el) = node {
            normalize_element(el);
        }
    }
}

fn normalize_element(el: &mut Element) {
    if el.children.is_empty() {
        el.children.push(Node::Leaf(Leaf::new("")));
        return;
    }

    if !el.is_lowest_block() {
        for child in el.children.iter_mut() {
            if let Node::Element(child) = child {
                normalize_element(child);
            }
        }
        return;
    }

    let mut merged: Vec<Node> = Vec::with_capacity(el.children.len());
    for child in std::mem::take(&mut el.children) {
        let Node::Leaf(leaf) = child else {
            merged.push(child);
            continue;
        };
        match merged.last_mut() {
            Some(Node::Leaf(prev)) if prev.same_marks(&leaf) || prev.is_empty() || leaf.is_empty() => {
                if prev.is_empty() && !leaf.is_empty() {
                    *prev = leaf;
                } else {
                    prev.text.push_str(&leaf.text);
                }
            }
            _ => merged.push(Node::Leaf(leaf)),
        }
    }
    el.children = merged;
}
