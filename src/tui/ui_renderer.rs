use super::app_logic::TuiApp;
use super::app_state::AppMode;
use crate::entry::Entry;
use crate::markup::{ALERT_BACKGROUND, MILD_BACKGROUND, Segment};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};
use std::path::Path;

fn background(hex: &str, fallback: Color) -> Style {
    let color: Color = hex.parse().unwrap_or(fallback);
    Style::default().bg(color).fg(Color::White)
}

/// Turn an entry's markup into spans, followed by its directory (dimmed).
fn entry_line(entry: &Entry, root: Option<&Path>) -> Line<'static> {
    let mild = background(MILD_BACKGROUND, Color::Green);
    let alert = background(ALERT_BACKGROUND, Color::Red);

    let mut spans: Vec<Span<'static>> = entry
        .markup()
        .segments()
        .iter()
        .map(|segment| match segment {
            Segment::Text(text) => Span::raw(text.clone()),
            Segment::MildSpace => Span::styled(" ", mild),
            Segment::AlertSpaces(n) => Span::styled(" ".repeat(*n), alert),
        })
        .collect();

    if let (Some(root), Some(parent)) = (root, entry.full_path().parent()) {
        if parent != root {
            spans.push(Span::styled(
                format!("  {}", crate::utils::relative_display(parent, root)),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }
    Line::from(spans)
}

fn draw_help_block(f: &mut Frame, _app: &TuiApp, area: Rect) {
    let help_text_lines_content = vec![
        Line::from("Arrows/jk: Nav | PgUp/PgDn: Page | F2/Enter: Rename | r: Rescan | q/Esc: Quit"),
        Line::from(vec![
            Span::raw("o: Open directory | "),
            Span::styled("  ", background(ALERT_BACKGROUND, Color::Red)),
            Span::raw(" repeated spaces | "),
            Span::styled(" ", background(MILD_BACKGROUND, Color::Green)),
            Span::raw(" single space"),
        ]),
    ];
    let help_paragraph = Paragraph::new(help_text_lines_content).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Spacecheck"),
    );
    f.render_widget(help_paragraph, area);
}

fn draw_input_block(f: &mut Frame, app: &TuiApp, area: Rect) {
    let title = match app.mode {
        AppMode::PickingRoot => "Directory to scan (Enter to open, Esc to cancel)",
        _ => "New name (Enter to apply, Esc to cancel)",
    };
    let input_paragraph = Paragraph::new(app.input.text().to_string())
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(input_paragraph, area);
    f.set_cursor_position((area.x + 1 + app.input.cursor_width() as u16, area.y + 1));
}

fn draw_main_list_block(f: &mut Frame, app: &mut TuiApp, area: Rect) {
    app.list_viewport_height = area.height.saturating_sub(2) as usize;
    app.clamp_selection();
    app.ensure_selection_is_visible_in_viewport();

    let root = app.session.root();
    let entries = app.session.entries();
    let end = (app.scroll_offset + app.list_viewport_height).min(entries.len());

    let list_items: Vec<ListItem> = entries
        .get(app.scroll_offset..end)
        .unwrap_or(&[])
        .iter()
        .map(|entry| ListItem::new(entry_line(entry, root)))
        .collect();

    let list_title = match root {
        Some(root) => format!(
            "{} ({} files, {} flagged)",
            root.display(),
            entries.len(),
            app.session.flagged_count()
        ),
        None => "No directory selected (press o)".to_string(),
    };

    let list_widget = List::new(list_items)
        .block(Block::default().borders(Borders::ALL).title(list_title))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("❯ ");

    let mut list_state_for_view = ratatui::widgets::ListState::default();
    if !entries.is_empty() {
        list_state_for_view.select(Some(app.current_selection_idx - app.scroll_offset));
    }
    f.render_stateful_widget(list_widget, area, &mut list_state_for_view);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw_alert_block(f: &mut Frame, app: &TuiApp) {
    let area = centered_rect(60, 7, f.area());
    let alert = Paragraph::new(vec![
        Line::from(app.alert_message.clone()),
        Line::from(""),
        Line::from(Span::styled("[ OK ]", Style::default().add_modifier(Modifier::BOLD))),
    ])
    .wrap(Wrap { trim: false })
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title("Error"),
    );
    f.render_widget(Clear, area);
    f.render_widget(alert, area);
}

pub(super) fn ui_frame(frame: &mut Frame, app: &mut TuiApp) {
    let help_lines = 2;
    let editing = matches!(app.mode, AppMode::Renaming | AppMode::PickingRoot);
    let input_height = if editing { 3 } else { 0 };

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(help_lines + 2),
            Constraint::Length(input_height),
            Constraint::Min(0),
        ])
        .split(frame.area());

    draw_help_block(frame, app, main_chunks[0]);
    if editing {
        draw_input_block(frame, app, main_chunks[1]);
    }
    draw_main_list_block(frame, app, main_chunks[2]);

    if app.mode == AppMode::Alert {
        draw_alert_block(frame, app);
    }
}
