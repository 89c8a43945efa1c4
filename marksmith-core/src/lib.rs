//! Marksmith Core - rich-text formatting toolkit
//!
//! This crate holds the document model, the editing primitives, the mark
//! and block toggles, and the render dispatch shared by the terminal and
//! browser front ends. It's designed to work both in native CLI and WASM
//! environments.

pub mod actions;
pub mod app;
pub mod config;
pub mod cursor;
pub mod editor;
pub mod error;
pub mod export;
pub mod model;
pub mod render;
pub mod toggle;

pub use actions::{toolbar_button, Command, Keymap, TOOLBAR};
pub use app::{App, Mode, Session};
pub use config::{Config, KeymapConfig, Palette, QuestionChord, Rgb};
pub use cursor::CursorState;
pub use editor::{Editor, NodeEntry, Snapshot};
pub use error::{Error, Result};
pub use export::{to_json, StateExport};
pub use model::{BlockPoint, BlockType, Document, Element, Leaf, Mark, Node, Selection};
pub use render::{render_element, render_leaf, Accent, ElementTemplate, LeafPresentation, LeafWrapper};
pub use toggle::ListFormat;
