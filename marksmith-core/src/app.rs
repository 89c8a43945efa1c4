use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::actions::{Command, Keymap, TOOLBAR};
use crate::config::Config;
use crate::cursor::CursorState;
use crate::editor::{Editor, Snapshot};
use crate::export;
use crate::model::{BlockPoint, Document, Selection};

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Visual,
    Input,
    State,
    Help,
}

/// Where the current document came from
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub title: String,
    pub filename: Option<String>,
    pub filepath: Option<String>,
    pub opened_at: DateTime<Utc>,
}

impl Session {
    pub fn new(title: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            filename: None,
            filepath: None,
            opened_at: Utc::now(),
        }
    }

    /// Session with filename metadata (used by the CLI when loading from file)
    pub fn with_file_info(title: String, filepath: String, filename: String) -> Self {
        let mut session = Self::new(title);
        session.filepath = Some(filepath);
        session.filename = Some(filename);
        session
    }
}

/// Platform-agnostic application state. The editor is owned here and
/// every command runs against it.
pub struct App {
    pub editor: Editor,
    pub session: Session,
    initial: Document,
    pub cursor: CursorState,
    pub mode: Mode,
    pub running: bool,
    pub keymap: Keymap,

    // Selection state
    pub selection_start: Option<(usize, usize)>, // (row, col)
    pub selection_end: Option<(usize, usize)>,

    // Input state
    pub input_buffer: String,

    // Last "Print State" output
    pub state_dump: Option<String>,

    pub status_message: Option<String>,
}

impl App {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        let editor = Editor::new(Document::starter());
        let mut cursor = CursorState::new();
        cursor.set_content(editor.document().block_texts());
        Self {
            initial: editor.document().clone(),
            editor,
            session: Session::new("Untitled".to_string()),
            cursor,
            mode: Mode::Normal,
            running: true,
            keymap: Keymap::new(&config.keymap),

            selection_start: None,
            selection_end: None,

            input_buffer: String::new(),
            state_dump: None,
            status_message: None,
        }
    }

    pub fn load_document(&mut self, doc: Document, session: Session) {
        info!(session = %session.id, title = %session.title, blocks = doc.block_count(), "document loaded");
        self.editor = Editor::new(doc);
        self.initial = self.editor.document().clone();
        self.cursor.set_content(self.editor.document().block_texts());
        self.session = session;
        self.mode = Mode::Normal;
        self.selection_start = None;
        self.selection_end = None;
    }

    pub fn snapshot(&self) -> Snapshot {
        self.editor.snapshot()
    }

    /// Get cursor position as (row, col)
    pub fn cursor_pos(&self) -> (usize, usize) {
        self.cursor.cursor()
    }

    // Cursor movement methods
    pub fn move_up(&mut self) {
        self.cursor.move_up();
    }

    pub fn move_down(&mut self) {
        self.cursor.move_down();
    }

    pub fn move_left(&mut self) {
        self.cursor.move_left();
    }

    pub fn move_right(&mut self) {
        self.cursor.move_right();
    }

    pub fn move_to_start(&mut self) {
        self.cursor.move_to_start();
    }

    pub fn move_to_end(&mut self) {
        self.cursor.move_to_end();
    }

    pub fn move_to_top(&mut self) {
        self.cursor.move_to_top();
    }

    pub fn move_to_bottom(&mut self) {
        self.cursor.move_to_bottom();
    }

    pub fn move_word_forward(&mut self) {
        self.cursor.move_word_forward();
    }

    pub fn move_word_back(&mut self) {
        self.cursor.move_word_back();
    }

    /// Enter visual/selection mode
    pub fn enter_visual_mode(&mut self) {
        self.mode = Mode::Visual;
        let cursor = self.cursor.cursor();
        self.selection_start = Some(cursor);
        self.selection_end = Some(cursor);
    }

    /// Leave visual mode, dropping the selection
    pub fn exit_visual_mode(&mut self) {
        if self.mode == Mode::Visual {
            self.mode = Mode::Normal;
        }
        self.selection_start = None;
        self.selection_end = None;
    }

    /// Dismiss the help or state overlay and return to normal mode
    pub fn close_overlay(&mut self) {
        self.state_dump = None;
        self.input_buffer.clear();
        self.mode = Mode::Normal;
        self.exit_visual_mode();
    }

    /// Update selection end position
    pub fn update_selection(&mut self) {
        if self.mode == Mode::Visual {
            self.selection_end = Some(self.cursor.cursor());
        }
    }

    /// Visual-mode selection, if any
    pub fn get_selection_range(&self) -> Option<Selection> {
        if self.mode != Mode::Visual {
            return None;
        }
        let (start_row, start_col) = self.selection_start?;
        let (end_row, end_col) = self.selection_end?;
        Some(Selection::new(
            BlockPoint::new(start_row, start_col),
            BlockPoint::new(end_row, end_col),
        ))
    }

    /// Selection commands act on: the visual range, or the cursor
    pub fn current_selection(&self) -> Selection {
        self.get_selection_range()
            .unwrap_or_else(|| Selection::collapsed(self.cursor.point()))
    }

    /// Run a toolbar or chord command
    pub fn run_command(&mut self, command: Command) -> Snapshot {
        match command {
            Command::Reset => return self.reset(),
            Command::PrintState => {
                self.print_state();
                return self.snapshot();
            }
            _ => {}
        }

        let selection = self.current_selection();
        self.editor.set_selection(Some(selection));
        let is_mark = matches!(
            command,
            Command::ToggleBold | Command::ToggleItalic | Command::ToggleUnderline
        );
        if is_mark && selection.is_collapsed() {
            self.set_status("Select some text first (v)");
            return self.snapshot();
        }

        let snapshot = command.apply(&mut self.editor);
        self.cursor.sync_content(snapshot.document.block_texts());

        let state = if command.is_active(&self.editor) { "on" } else { "off" };
        self.set_status(&format!("{} {}", command.label(), state));
        snapshot
    }

    /// Restore the document the session started with
    pub fn reset(&mut self) -> Snapshot {
        let snapshot = self.editor.replace_document(self.initial.clone());
        self.cursor.set_content(snapshot.document.block_texts());
        self.exit_visual_mode();
        info!(session = %self.session.id, revision = snapshot.revision, "document reset");
        self.set_status("Document reset");
        snapshot
    }

    fn print_state(&mut self) {
        self.editor.set_selection(self.get_selection_range());
        match export::to_json(self) {
            Ok(json) => {
                info!(session = %self.session.id, bytes = json.len(), "state printed");
                self.state_dump = Some(json);
                self.mode = Mode::State;
            }
            Err(e) => {
                warn!(error = %e, "failed to serialize state");
                self.set_status(&format!("Serialization failed: {}", e));
            }
        }
    }

    /// Toolbar commands whose format is active at the current selection
    pub fn active_commands(&self) -> Vec<Command> {
        let mut view = self.editor.clone();
        view.set_selection(Some(self.current_selection()));
        TOOLBAR
            .iter()
            .copied()
            .filter(|c| c.is_format() && c.is_active(&view))
            .collect()
    }

    /// Set status message
    pub fn set_status(&mut self, msg: &str) {
        self.status_message = Some(msg.to_string());
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Get title for display
    pub fn title(&self) -> String {
        self.session
            .filename
            .clone()
            .unwrap_or_else(|| self.session.title.clone())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlockType;

    fn app_with(json: &str) -> App {
        let mut app = App::new();
        app.load_document(Document::from_json(json).unwrap(), Session::new("test".to_string()));
        app
    }

    #[test]
    fn test_visual_selection_bold() {
        let mut app = app_with(r#"[{"type":"paragraph","children":[{"text":"hello"}]}]"#);
        app.enter_visual_mode();
        app.move_to_end();
        app.update_selection();

        app.run_command(Command::ToggleBold);
        let leaf = app.editor.document().children[0].as_element().unwrap().children[0]
            .as_leaf()
            .unwrap()
            .clone();
        assert_eq!(leaf.bold, Some(true));
        assert_eq!(app.mode, Mode::Visual);
        assert_eq!(app.status_message.as_deref(), Some("Bold on"));
        assert!(app.active_commands().contains(&Command::ToggleBold));
    }

    #[test]
    fn test_mark_with_cursor_only_asks_for_selection() {
        let mut app = app_with(r#"[{"type":"paragraph","children":[{"text":"hello"}]}]"#);
        let revision = app.editor.revision();
        app.run_command(Command::ToggleItalic);
        assert_eq!(app.editor.revision(), revision);
        assert_eq!(app.status_message.as_deref(), Some("Select some text first (v)"));
    }

    #[test]
    fn test_block_command_uses_cursor_block() {
        let mut app = app_with(
            r#"[
                {"type":"paragraph","children":[{"text":"a"}]},
                {"type":"paragraph","children":[{"text":"b"}]}
            ]"#,
        );
        app.move_down();
        app.run_command(Command::ToggleCodeBlock);
        let kinds: Vec<_> = app
            .editor
            .document()
            .lowest_blocks()
            .into_iter()
            .map(|(_, el)| el.kind.clone())
            .collect();
        assert_eq!(kinds, vec![Some(BlockType::Paragraph), Some(BlockType::Code)]);
    }

    #[test]
    fn test_reset_restores_initial_document() {
        let mut app = app_with(r#"[{"type":"paragraph","children":[{"text":"a"}]}]"#);
        app.run_command(Command::ToggleHeading);
        assert_ne!(app.editor.document(), &app.initial);

        app.run_command(Command::Reset);
        assert_eq!(app.editor.document(), &app.initial);
        assert_eq!(app.status_message.as_deref(), Some("Document reset"));
    }

    #[test]
    fn test_print_state_exports_live_selection() {
        let mut app = app_with(r#"[{"type":"paragraph","children":[{"text":"hello"}]}]"#);
        app.enter_visual_mode();
        app.move_to_end();
        app.update_selection();
        app.run_command(Command::ToggleBold);
        app.exit_visual_mode();

        app.run_command(Command::PrintState);
        let value: serde_json::Value =
            serde_json::from_str(app.state_dump.as_deref().unwrap()).unwrap();
        assert!(value.get("selection").is_none());

        app.mode = Mode::Normal;
        app.enter_visual_mode();
        app.move_left();
        app.update_selection();
        app.run_command(Command::PrintState);
        let value: serde_json::Value =
            serde_json::from_str(app.state_dump.as_deref().unwrap()).unwrap();
        assert_eq!(value["selection"]["anchor"]["offset"], 5);
        assert_eq!(value["selection"]["focus"]["offset"], 4);
    }

    #[test]
    fn test_print_state_opens_overlay() {
        let mut app = App::new();
        app.run_command(Command::PrintState);
        assert_eq!(app.mode, Mode::State);
        assert!(app.state_dump.as_deref().unwrap().contains("\"document\""));
    }

    #[test]
    fn test_close_overlay_returns_to_normal_from_every_overlay() {
        for mode in [Mode::State, Mode::Help, Mode::Input] {
            let mut app = App::new();
            app.run_command(Command::PrintState);
            app.input_buffer.push_str("notes.json");
            app.mode = mode;
            app.close_overlay();
            assert_eq!(app.mode, Mode::Normal);
            assert!(app.state_dump.is_none());
            assert!(app.input_buffer.is_empty());
            assert!(app.get_selection_range().is_none());
        }
    }
}
