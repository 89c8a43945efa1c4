//! Marksmith Web - WebAssembly version of the formatting editor
//!
//! This crate provides a browser-based version of Marksmith using Ratzilla
//! for terminal rendering in the DOM.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::event::{KeyCode, KeyEvent};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use wasm_bindgen::prelude::*;

use marksmith_core::{toolbar_button, App, Command, Config, Document, Mode, Session};

mod ui;

/// Sample document for the demo
const SAMPLE_DOCUMENT: &str = r#"[
  {"type":"heading","children":[{"text":"Welcome to Marksmith"}]},
  {"type":"paragraph","children":[
    {"text":"Select text with "},
    {"text":"v","code":true},
    {"text":" and press "},
    {"text":"F1","bold":true},
    {"text":" to make it bold, or "},
    {"text":"F2","italic":true},
    {"text":" for italics."}
  ]},
  {"type":"bulleted-list","children":[
    {"type":"list-item","children":[{"text":"F4 toggles a bulleted list"}]},
    {"type":"list-item","children":[{"text":"F5 switches it to a numbered list"}]}
  ]},
  {"type":"question","children":[{"text":"What does Ctrl+/ toggle here?"}]},
  {"type":"code","children":[{"text":"let answer = 42;"}]},
  {"type":"section","children":[{"text":"F10 resets the document, F11 prints the state to the console."}]}
]"#;

/// Initialize the Marksmith web application
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    let config = Config::default();
    let mut app = App::with_config(&config);
    let doc = Document::from_json(SAMPLE_DOCUMENT)
        .map_err(|e| JsValue::from_str(&format!("Invalid sample document: {}", e)))?;
    app.load_document(doc, Session::new("Demo Document".to_string()));
    app.set_status("Welcome to Marksmith! Press 'v' to start selecting, '?' for help");

    // Wrap in Rc<RefCell> for shared state
    let app_state = Rc::new(RefCell::new(app));

    // Create terminal with DOM backend
    let backend = DomBackend::new()
        .map_err(|e| JsValue::from_str(&format!("Failed to create backend: {:?}", e)))?;
    let mut terminal = Terminal::new(backend)
        .map_err(|e| JsValue::from_str(&format!("Failed to create terminal: {:?}", e)))?;

    // Set up keyboard handler
    terminal.on_key_event({
        let app_state_cloned = app_state.clone();
        move |event| {
            let mut app = app_state_cloned.borrow_mut();
            app.clear_status();

            let mode = app.mode;
            match mode {
                Mode::Normal | Mode::Visual if handle_command_key(&mut app, &event) => {}
                Mode::Normal => handle_normal_mode(&mut app, event.code),
                Mode::Visual => handle_visual_mode(&mut app, event.code),
                Mode::Input | Mode::State | Mode::Help => app.close_overlay(),
            }
        }
    });

    // Draw loop
    terminal.draw_web(move |frame| {
        let app = app_state.borrow();
        ui::draw(frame, &app, &config.palette);
    });

    web_sys::console::log_1(&"Marksmith WASM initialized".into());

    Ok(())
}

fn handle_command_key(app: &mut App, event: &KeyEvent) -> bool {
    let command = match event.code {
        KeyCode::F(n) => toolbar_button(n),
        KeyCode::Char(c) if event.ctrl => app.keymap.chord(c.to_ascii_lowercase()),
        _ => None,
    };
    let Some(command) = command else {
        return false;
    };

    app.run_command(command);
    if command == Command::PrintState {
        if let Some(json) = &app.state_dump {
            log_state(json);
        }
    }
    true
}

/// Print the state dump to the browser console as an object
fn log_state(json: &str) {
    let value = js_sys::JSON::parse(json).unwrap_or_else(|_| JsValue::from_str(json));
    web_sys::console::log_1(&value);
}

fn handle_normal_mode(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('?') => app.mode = Mode::Help,

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('h') | KeyCode::Left => app.move_left(),
        KeyCode::Char('l') | KeyCode::Right => app.move_right(),
        KeyCode::Char('w') => app.move_word_forward(),
        KeyCode::Char('b') => app.move_word_back(),
        KeyCode::Char('0') | KeyCode::Home => app.move_to_start(),
        KeyCode::Char('$') | KeyCode::End => app.move_to_end(),
        KeyCode::Char('g') => app.move_to_top(),
        KeyCode::Char('G') => app.move_to_bottom(),

        // Visual mode
        KeyCode::Char('v') => app.enter_visual_mode(),

        _ => {}
    }
}

fn handle_visual_mode(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc | KeyCode::Char('v') => app.exit_visual_mode(),
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('h') | KeyCode::Left => app.move_left(),
        KeyCode::Char('l') | KeyCode::Right => app.move_right(),
        KeyCode::Char('w') => app.move_word_forward(),
        KeyCode::Char('b') => app.move_word_back(),
        KeyCode::Char('0') | KeyCode::Home => app.move_to_start(),
        KeyCode::Char('$') | KeyCode::End => app.move_to_end(),
        KeyCode::Char('g') => app.move_to_top(),
        KeyCode::Char('G') => app.move_to_bottom(),
        _ => return,
    }
    app.update_selection();
}
