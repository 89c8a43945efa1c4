//! Terminal UI rendering for Marksmith Web
//!
//! This module mirrors marksmith-cli's UI but uses ratzilla's rendering.

use ratzilla::ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use marksmith_core::render::SECTION_RULE;
use marksmith_core::{
    render_element, render_leaf, Accent, App, Element, ElementTemplate, LeafWrapper, Mode, Node,
    Palette, Rgb, Selection, TOOLBAR,
};

// Catppuccin Mocha colors
const BASE: Color = Color::Rgb(30, 30, 46);
const SURFACE0: Color = Color::Rgb(49, 50, 68);
const SURFACE1: Color = Color::Rgb(69, 71, 90);
const TEXT: Color = Color::Rgb(205, 214, 244);
const SUBTEXT0: Color = Color::Rgb(166, 173, 200);
const BLUE: Color = Color::Rgb(137, 180, 250);
const MAUVE: Color = Color::Rgb(203, 166, 247);

pub fn draw(frame: &mut Frame, app: &App, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Length(1), // Toolbar
            Constraint::Min(0),    // Editor
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_title_bar(frame, app, chunks[0]);
    draw_toolbar(frame, app, chunks[1]);
    draw_editor(frame, app, palette, chunks[2]);
    draw_status_bar(frame, app, chunks[3]);

    // Draw popups/overlays
    match app.mode {
        Mode::State => draw_state(frame, app),
        Mode::Help => draw_help(frame, app),
        _ => {}
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

fn draw_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title_text = format!(
        " Marksmith - {} [{} blocks, rev {}]",
        app.title(),
        app.editor.document().block_count(),
        app.editor.revision()
    );

    let title_bar = Paragraph::new(title_text).style(Style::default().fg(TEXT).bg(SURFACE0));
    frame.render_widget(title_bar, area);
}

fn draw_toolbar(frame: &mut Frame, app: &App, area: Rect) {
    let active = app.active_commands();
    let mut spans = Vec::new();
    for (i, command) in TOOLBAR.iter().enumerate() {
        let style = if active.contains(command) {
            Style::default().fg(BASE).bg(BLUE).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(SUBTEXT0)
        };
        spans.push(Span::styled(format!("F{}", i + 1), Style::default().fg(MAUVE)));
        spans.push(Span::styled(format!(" {} ", command.label()), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_editor(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let mode_indicator = match app.mode {
        Mode::Visual => " [VISUAL]",
        _ => "",
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BLUE))
        .title(format!("Editor{}", mode_indicator));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut builder = LineBuilder {
        palette,
        selection: app.get_selection_range(),
        cursor: app.cursor_pos(),
        ordinal: 0,
        cursor_line: 0,
        lines: Vec::new(),
    };
    builder.push_nodes(&app.editor.document().children, None);

    // Calculate scroll offset based on cursor
    let visible_height = inner.height as usize;
    let scroll_offset = if builder.cursor_line >= visible_height {
        builder.cursor_line - visible_height + 1
    } else {
        0
    };

    let paragraph = Paragraph::new(builder.lines)
        .scroll((scroll_offset as u16, 0))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}

/// Turns the document tree into styled lines, one per lowest block
/// (plus rules for section blocks).
struct LineBuilder<'a> {
    palette: &'a Palette,
    selection: Option<Selection>,
    cursor: (usize, usize),
    ordinal: usize,
    cursor_line: usize,
    lines: Vec<Line<'static>>,
}

impl LineBuilder<'_> {
    fn push_nodes(&mut self, nodes: &[Node], container: Option<ElementTemplate>) {
        let mut item = 0;
        for node in nodes {
            let Node::Element(element) = node else {
                continue;
            };
            let template = render_element(element);
            if element.is_lowest_block() {
                item += 1;
                self.push_block(element, template, container, item);
            } else {
                self.push_nodes(&element.children, Some(template));
            }
        }
    }

    fn block_style(&self, template: ElementTemplate) -> Style {
        let mut style = Style::default().fg(TEXT);
        if let Some(accent) = template.accent() {
            style = style.fg(color(self.palette.accent(accent)));
        }
        match template {
            ElementTemplate::HeadingOne | ElementTemplate::HeadingTwo | ElementTemplate::Heading => {
                style.add_modifier(Modifier::BOLD)
            }
            ElementTemplate::Code => style.bg(color(self.palette.code_background)),
            ElementTemplate::BlockQuote => style.fg(SUBTEXT0).add_modifier(Modifier::ITALIC),
            _ => style,
        }
    }

    fn push_block(
        &mut self,
        element: &Element,
        template: ElementTemplate,
        container: Option<ElementTemplate>,
        item: usize,
    ) {
        let block_style = self.block_style(template);
        let mut spans = Vec::new();

        if template == ElementTemplate::Section {
            self.lines
                .push(Line::from(Span::styled(SECTION_RULE, Style::default().fg(SUBTEXT0))));
        }

        let bullet = match (template, container) {
            (ElementTemplate::ListItem, Some(ElementTemplate::NumberedList)) => Some(format!("{}. ", item)),
            (ElementTemplate::ListItem, _) => Some("• ".to_string()),
            (_, Some(ElementTemplate::BlockQuote)) | (ElementTemplate::BlockQuote, _) => {
                Some("│ ".to_string())
            }
            _ => None,
        };
        if let Some(bullet) = bullet {
            spans.push(Span::styled(bullet, Style::default().fg(MAUVE)));
        }
        if template == ElementTemplate::Question {
            if let Some(marker) = template.prefix() {
                spans.push(Span::styled(format!("{} ", marker), block_style));
            }
        }

        let selected = self
            .selection
            .and_then(|sel| sel.span_in_block(self.ordinal, element.text_len()));
        let cursor_col = (self.cursor.0 == self.ordinal).then_some(self.cursor.1);
        if cursor_col.is_some() {
            self.cursor_line = self.lines.len();
        }

        let mut offset = 0;
        for leaf in element.leaves() {
            let presentation = render_leaf(leaf);
            let mut style = block_style;
            for wrapper in &presentation.wrappers {
                style = match wrapper {
                    LeafWrapper::Strong => style.add_modifier(Modifier::BOLD),
                    LeafWrapper::Emphasis => style.add_modifier(Modifier::ITALIC),
                    LeafWrapper::Underline => style.add_modifier(Modifier::UNDERLINED),
                    LeafWrapper::Code => style.bg(color(self.palette.code_background)),
                };
            }
            if let Some(Accent::QuestionLeaf) = presentation.accent {
                style = style.fg(color(self.palette.question_leaf));
            }

            for ch in presentation.text.chars() {
                let mut ch_style = style;
                if selected.is_some_and(|(from, to)| offset >= from && offset < to) {
                    ch_style = ch_style.bg(SURFACE1);
                }
                if cursor_col == Some(offset) {
                    ch_style = ch_style.add_modifier(Modifier::REVERSED);
                }
                spans.push(Span::styled(ch.to_string(), ch_style));
                offset += 1;
            }
        }

        if cursor_col.is_some_and(|col| col >= offset) {
            spans.push(Span::styled(" ", Style::default().add_modifier(Modifier::REVERSED)));
        }

        self.lines.push(Line::from(spans).style(block_style));
        self.ordinal += 1;
    }
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mode_str = match app.mode {
        Mode::Normal => "NORMAL",
        Mode::Visual => "VISUAL",
        Mode::Input => "INPUT",
        Mode::State => "STATE",
        Mode::Help => "HELP",
    };

    let status = app.status_message.as_deref().unwrap_or("");
    let help_hint = "hjkl move | v select | F1-F11 toolbar | ? help";

    let status_text = format!(
        " {} | {}",
        mode_str,
        if status.is_empty() { help_hint } else { status },
    );

    let status_bar = Paragraph::new(status_text).style(Style::default().fg(SUBTEXT0).bg(SURFACE0));
    frame.render_widget(status_bar, area);
}

fn draw_state(frame: &mut Frame, app: &App) {
    let screen = frame.area();
    let area = centered_rect(
        screen.width.saturating_sub(8),
        screen.height.saturating_sub(4),
        screen,
    );
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(MAUVE))
        .title("State (press any key to close)");

    let text = app.state_dump.as_deref().unwrap_or("");
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(TEXT))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn draw_help(frame: &mut Frame, app: &App) {
    let heading = Style::default().fg(MAUVE).add_modifier(Modifier::BOLD);

    let mut help_text = vec![
        Line::from(Span::styled("Navigation", heading)),
        Line::from("  h/j/k/l  Move cursor"),
        Line::from("  w/b      Next/prev word"),
        Line::from("  0/$      Start/end of block"),
        Line::from("  g/G      Go to top/bottom"),
        Line::from("  v        Visual selection"),
        Line::from(""),
        Line::from(Span::styled("Toolbar", heading)),
    ];
    for (i, command) in TOOLBAR.iter().enumerate() {
        help_text.push(Line::from(format!("  F{:<8}{}", i + 1, command.label())));
    }
    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled("Chords", heading)));
    for (chord, label) in app.keymap.bindings() {
        help_text.push(Line::from(format!("  {:<9}{}", chord, label)));
    }
    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled("Press any key to close", Style::default().fg(SUBTEXT0))));

    let area = centered_rect(50, help_text.len() as u16 + 2, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BLUE))
        .title("Help (press any key to close)");

    let paragraph = Paragraph::new(help_text).block(block);
    frame.render_widget(paragraph, area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
