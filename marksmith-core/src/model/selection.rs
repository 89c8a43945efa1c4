use serde::{Deserialize, Serialize};

/// A position as (lowest-block ordinal, char offset within that block)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct BlockPoint {
    pub block: usize,
    pub offset: usize,
}

impl BlockPoint {
    pub fn new(block: usize, offset: usize) -> Self {
        Self { block, offset }
    }
}

/// Anchor/focus pair. The anchor may come after the focus.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Selection {
    pub anchor: BlockPoint,
    pub focus: BlockPoint,
}

impl Selection {
    pub fn new(anchor: BlockPoint, focus: BlockPoint) -> Self {
        Self { anchor, focus }
    }

    pub fn collapsed(at: BlockPoint) -> Self {
        Self::new(at, at)
    }

    /// Selection covering a single block from `start` to `end`
    pub fn within(block: usize, start: usize, end: usize) -> Self {
        Self::new(BlockPoint::new(block, start), BlockPoint::new(block, end))
    }

    /// (start, end) in document order
    pub fn edges(&self) -> (BlockPoint, BlockPoint) {
        if self.anchor <= self.focus {
            (self.anchor, self.focus)
        } else {
            (self.focus, self.anchor)
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// Whether the block ordinal lies within the selection
    pub fn covers_block(&self, block: usize) -> bool {
        let (start, end) = self.edges();
        block >= start.block && block <= end.block
    }

    /// Selected char span `[from, to)` of a block of length `len`,
    /// or `None` when the block is outside the selection
    pub fn span_in_block(&self, block: usize, len: usize) -> Option<(usize, usize)> {
        if !self.covers_block(block) {
            return None;
        }
        let (start, end) = self.edges();
        let from = if block == start.block { start.offset.min(len) } else { 0 };
        let to = if block == end.block { end.offset.min(len) } else { len };
        Some((from, to.max(from)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_normalize_backward_selection() {
        let sel = Selection::new(BlockPoint::new(2, 1), BlockPoint::new(0, 4));
        assert_eq!(sel.edges(), (BlockPoint::new(0, 4), BlockPoint::new(2, 1)));
        assert!(sel.covers_block(1));
        assert!(!sel.covers_block(3));
    }

    #[test]
    fn test_span_in_block() {
        let sel = Selection::new(BlockPoint::new(0, 3), BlockPoint::new(2, 2));
        assert_eq!(sel.span_in_block(0, 5), Some((3, 5)));
        assert_eq!(sel.span_in_block(1, 4), Some((0, 4)));
        assert_eq!(sel.span_in_block(2, 9), Some((0, 2)));
        assert_eq!(sel.span_in_block(3, 9), None);
        // offsets past the end clamp to the block length
        assert_eq!(Selection::within(0, 1, 40).span_in_block(0, 3), Some((1, 3)));
    }
}
