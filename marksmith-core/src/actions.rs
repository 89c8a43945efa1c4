//! User-facing commands, the toolbar and the keyboard chords that trigger them.

use crate::config::{KeymapConfig, QuestionChord};
use crate::editor::{Editor, Snapshot};
use crate::model::Mark;
use crate::toggle::{self, ListFormat};

/// Something a toolbar button or chord asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleBold,
    ToggleItalic,
    ToggleUnderline,
    ToggleQuestionMark,
    ToggleList(ListFormat),
    ToggleHeading,
    ToggleQuestionBlock,
    ToggleCodeBlock,
    ToggleSection,
    Reset,
    PrintState,
}

impl Command {
    pub fn label(&self) -> &'static str {
        match self {
            Command::ToggleBold => "Bold",
            Command::ToggleItalic => "Italic",
            Command::ToggleUnderline => "Underline",
            Command::ToggleQuestionMark => "Question",
            Command::ToggleList(ListFormat::BulletedList) => "List",
            Command::ToggleList(ListFormat::NumberedList) => "Numbered List",
            Command::ToggleHeading => "Heading",
            Command::ToggleQuestionBlock => "Question Block",
            Command::ToggleCodeBlock => "Code Block",
            Command::ToggleSection => "Section",
            Command::Reset => "Reset",
            Command::PrintState => "Print State",
        }
    }

    /// Formatting commands go through the toggle engine; the rest are
    /// handled by the session
    pub fn is_format(&self) -> bool {
        !matches!(self, Command::Reset | Command::PrintState)
    }

    /// Apply a formatting command. Session commands leave the editor alone.
    pub fn apply(&self, editor: &mut Editor) -> Snapshot {
        match self {
            Command::ToggleBold => toggle::toggle_mark(editor, Mark::Bold),
            Command::ToggleItalic => toggle::toggle_mark(editor, Mark::Italic),
            Command::ToggleUnderline => toggle::toggle_mark(editor, Mark::Underline),
            Command::ToggleQuestionMark => toggle::toggle_mark(editor, Mark::Question),
            Command::ToggleList(format) => toggle::toggle_list_block(editor, *format),
            Command::ToggleHeading => toggle::toggle_heading_block(editor),
            Command::ToggleQuestionBlock => toggle::toggle_question_block(editor),
            Command::ToggleCodeBlock => toggle::toggle_code_block(editor),
            Command::ToggleSection => toggle::toggle_section_block(editor),
            Command::Reset | Command::PrintState => editor.snapshot(),
        }
    }

    /// Whether the format this command toggles is active on the selection
    pub fn is_active(&self, editor: &Editor) -> bool {
        match self {
            Command::ToggleBold => toggle::is_bold_mark_active(editor),
            Command::ToggleItalic => toggle::is_italic_mark_active(editor),
            Command::ToggleUnderline => toggle::is_underline_mark_active(editor),
            Command::ToggleQuestionMark => toggle::is_question_mark_active(editor),
            Command::ToggleList(format) => toggle::is_list_block_active(editor, *format),
            Command::ToggleHeading => toggle::is_heading_block_active(editor),
            Command::ToggleQuestionBlock => toggle::is_question_block_active(editor),
            Command::ToggleCodeBlock => toggle::is_code_block_active(editor),
            Command::ToggleSection => toggle::is_section_block_active(editor),
            Command::Reset | Command::PrintState => false,
        }
    }
}

/// Toolbar buttons in display order. Front ends bind them to F1..F11.
pub const TOOLBAR: [Command; 11] = [
    Command::ToggleBold,
    Command::ToggleItalic,
    Command::ToggleUnderline,
    Command::ToggleList(ListFormat::BulletedList),
    Command::ToggleList(ListFormat::NumberedList),
    Command::ToggleHeading,
    Command::ToggleQuestionBlock,
    Command::ToggleCodeBlock,
    Command::ToggleSection,
    Command::Reset,
    Command::PrintState,
];

/// Button for a 1-based function key number
pub fn toolbar_button(function_key: u8) -> Option<Command> {
    let index = usize::from(function_key).checked_sub(1)?;
    TOOLBAR.get(index).copied()
}

/// Ctrl+key chords
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    question: Command,
}

impl Keymap {
    pub fn new(config: &KeymapConfig) -> Self {
        let question = match config.question_chord {
            QuestionChord::Block => Command::ToggleQuestionBlock,
            QuestionChord::Mark => Command::ToggleQuestionMark,
        };
        Self { question }
    }

    /// Command bound to Ctrl+`key`
    pub fn chord(&self, key: char) -> Option<Command> {
        match key {
            '`' => Some(Command::ToggleCodeBlock),
            'b' => Some(Command::ToggleBold),
            '/' => Some(self.question),
            _ => None,
        }
    }

    /// (chord, label) pairs for the help screen
    pub fn bindings(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            ("Ctrl+`", Command::ToggleCodeBlock.label()),
            ("Ctrl+b", Command::ToggleBold.label()),
            ("Ctrl+/", self.question.label()),
        ]
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new(&KeymapConfig::default())
    }
}
