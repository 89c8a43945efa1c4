//! Mark and block-type toggling.
//!
//! Mark queries are universal (every selected leaf must carry the mark),
//! block queries are existential (one matching block is enough). Every
//! toggle commits a new revision and returns its [`Snapshot`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::editor::{Editor, Mode, Snapshot};
use crate::model::{BlockType, Mark, Node};

/// List container flavour for [`toggle_list_block`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ListFormat {
    BulletedList,
    NumberedList,
}

impl ListFormat {
    pub fn kind(&self) -> BlockType {
        match self {
            ListFormat::BulletedList => BlockType::BulletedList,
            ListFormat::NumberedList => BlockType::NumberedList,
        }
    }
}

pub fn is_mark_active(editor: &Editor, mark: Mark) -> bool {
    let matches = editor.nodes(
        |node| node.as_leaf().is_some_and(|leaf| leaf.has_mark(mark)),
        Mode::Universal,
    );
    !matches.is_empty()
}

/// Clear `mark` if every selected leaf has it, otherwise set it.
///
/// Leaves are split at the selection edges, except for the question mark
/// which always applies to whole leaves.
pub fn toggle_mark(editor: &mut Editor, mark: Mark) -> Snapshot {
    if editor.selection().is_none() {
        return editor.snapshot();
    }
    let active = is_mark_active(editor, mark);
    let value = if active { None } else { Some(true) };
    editor.set_marks(mark, value, mark != Mark::Question);

    let snapshot = editor.commit();
    debug!(mark = mark.as_str(), active = !active, revision = snapshot.revision, "toggled mark");
    snapshot
}

pub fn is_block_active(editor: &Editor, kind: &BlockType) -> bool {
    let matches = editor.nodes(
        |node| node.as_element().is_some_and(|el| el.is_kind(kind)),
        Mode::Existential,
    );
    !matches.is_empty()
}

/// Reset the selected blocks to untyped if any of them is `kind`,
/// otherwise make them all `kind`
pub fn toggle_block(editor: &mut Editor, kind: BlockType) -> Snapshot {
    if editor.selection().is_none() {
        return editor.snapshot();
    }
    let active = is_block_active(editor, &kind);
    editor.set_block_kind(if active { None } else { Some(kind.clone()) });

    let snapshot = editor.commit();
    debug!(%kind, active = !active, revision = snapshot.revision, "toggled block");
    snapshot
}

/// Whether a selected list item already sits in a `format` container
pub fn is_list_block_active(editor: &Editor, format: ListFormat) -> bool {
    let kind = format.kind();
    let doc = editor.document();
    editor
        .nodes(
            |node: &Node| node.as_element().is_some_and(|el| el.is_kind(&BlockType::ListItem)),
            Mode::Existential,
        )
        .iter()
        .any(|entry| doc.list_container_of(&entry.path) == Some(&kind))
}

/// Toggle list formatting.
///
/// Existing list containers around the selection are always unwrapped
/// first, so switching between list formats leaves a single container of
/// the new format.
pub fn toggle_list_block(editor: &mut Editor, format: ListFormat) -> Snapshot {
    if editor.selection().is_none() {
        return editor.snapshot();
    }
    let active = is_list_block_active(editor, format);

    editor.unwrap_nodes(|el| el.kind.as_ref().is_some_and(BlockType::is_list));
    editor.set_block_kind(Some(if active {
        BlockType::Paragraph
    } else {
        BlockType::ListItem
    }));
    if !active {
        editor.wrap_nodes(format.kind());
    }

    let snapshot = editor.commit();
    debug!(format = %format.kind(), active = !active, revision = snapshot.revision, "toggled list");
    snapshot
}

pub fn is_bold_mark_active(editor: &Editor) -> bool {
    is_mark_active(editor, Mark::Bold)
}

pub fn is_italic_mark_active(editor: &Editor) -> bool {
    is_mark_active(editor, Mark::Italic)
}

pub fn is_underline_mark_active(editor: &Editor) -> bool {
    is_mark_active(editor, Mark::Underline)
}

pub fn is_question_mark_active(editor: &Editor) -> bool {
    is_mark_active(editor, Mark::Question)
}

pub fn toggle_bold_mark(editor: &mut Editor) -> Snapshot {
    toggle_mark(editor, Mark::Bold)
}

pub fn toggle_italic_mark(editor: &mut Editor) -> Snapshot {
    toggle_mark(editor, Mark::Italic)
}

pub fn toggle_underline_mark(editor: &mut Editor) -> Snapshot {
    toggle_mark(editor, Mark::Underline)
}

pub fn toggle_question_mark(editor: &mut Editor) -> Snapshot {
    toggle_mark(editor, Mark::Question)
}

pub fn is_heading_block_active(editor: &Editor) -> bool {
    is_block_active(editor, &BlockType::Heading)
}

pub fn is_code_block_active(editor: &Editor) -> bool {
    is_block_active(editor, &BlockType::Code)
}

pub fn is_question_block_active(editor: &Editor) -> bool {
    is_block_active(editor, &BlockType::Question)
}

pub fn is_section_block_active(editor: &Editor) -> bool {
    is_block_active(editor, &BlockType::Section)
}

pub fn toggle_heading_block(editor: &mut Editor) -> Snapshot {
    toggle_block(editor, BlockType::Heading)
}

pub fn toggle_code_block(editor: &mut Editor) -> Snapshot {
    toggle_block(editor, BlockType::Code)
}

pub fn toggle_question_block(editor: &mut Editor) -> Snapshot {
    toggle_block(editor, BlockType::Question)
}

pub fn toggle_section_block(editor: &mut Editor) -> Snapshot {
    toggle_block(editor, BlockType::Section)
}
