//! Marksmith CLI - terminal rich-text formatting editor
//!
//! # Usage
//!
//! ```bash
//! marksmith notes.json
//! marksmith --question-chord mark draft.txt
//! RUST_LOG=marksmith_core=debug marksmith --log-file marksmith.log
//! ```

mod io;
mod ui;

use std::fs::File;
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing_subscriber::EnvFilter;

use marksmith_core::{toolbar_button, App, Mode, Palette, QuestionChord};

/// A terminal rich-text formatting editor
#[derive(Parser, Debug)]
#[command(name = "marksmith", version, about, long_about = None)]
struct Cli {
    /// Document to open (.json document, or plain text)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Config file (defaults to <config dir>/marksmith/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// What Ctrl+/ toggles: the question block or the question mark
    #[arg(long, value_name = "block|mark")]
    question_chord: Option<QuestionChord>,

    /// Write log events to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let mut config = match cli.config.clone().or_else(io::config_path) {
        Some(path) => io::load_config(&path)?,
        None => Default::default(),
    };
    if let Some(chord) = cli.question_chord {
        config.keymap.question_chord = chord;
    }

    let mut app = App::with_config(&config);

    // Load file if provided
    if let Some(path) = &cli.file {
        let path = path.to_string_lossy();
        match io::load_file(&path) {
            Ok((doc, session)) => {
                app.load_document(doc, session);
                app.set_status(&format!("Loaded {}", path));
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load document");
                app.set_status(&format!("Error: {:#}", e));
            }
        }
    } else {
        app.set_status("Sample document. Press 'v' to select, F1-F11 for the toolbar, '?' for help");
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app, &config.palette);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = res {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, palette: &Palette) -> Result<()> {
    while app.running {
        terminal.draw(|f| ui::draw(f, app, palette))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            // Clear status on any key
            app.clear_status();

            let mode = app.mode;
            match mode {
                Mode::Normal | Mode::Visual if handle_command_key(app, key) => {}
                Mode::Normal => handle_normal_mode(app, key.code),
                Mode::Visual => handle_visual_mode(app, key.code),
                Mode::Input => handle_input_mode(app, key.code),
                Mode::State | Mode::Help => app.close_overlay(),
            }
        }
    }
    Ok(())
}

/// Toolbar function keys and Ctrl chords. Returns true when the key was used.
fn handle_command_key(app: &mut App, key: KeyEvent) -> bool {
    let command = match key.code {
        KeyCode::F(n) => toolbar_button(n),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
            return true;
        }
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.keymap.chord(chord_char(c))
        }
        _ => None,
    };
    match command {
        Some(command) => {
            app.run_command(command);
            true
        }
        None => false,
    }
}

// Legacy terminals deliver Ctrl+/ as 0x1F and Ctrl+` as NUL
fn chord_char(c: char) -> char {
    match c {
        '7' | '_' => '/',
        ' ' | '@' | '2' => '`',
        c => c.to_ascii_lowercase(),
    }
}

fn handle_normal_mode(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') => app.running = false,
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

        // Open file
        KeyCode::Char('o') => {
            app.input_buffer.clear();
            app.mode = Mode::Input;
        }

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

fn handle_input_mode(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => {
            app.mode = Mode::Normal;
            app.input_buffer.clear();
        }
        KeyCode::Enter => {
            let path = app.input_buffer.trim().to_string();
            match io::load_file(&path) {
                Ok((doc, session)) => {
                    app.load_document(doc, session);
                    app.set_status(&format!("Loaded {}", path));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to load document");
                    app.set_status(&format!("Error: {:#}", e));
                }
            }
            app.input_buffer.clear();
            app.mode = Mode::Normal;
        }
        KeyCode::Backspace => {
            app.input_buffer.pop();
        }
        KeyCode::Char(c) => {
            app.input_buffer.push(c);
        }
        _ => {}
    }
}
