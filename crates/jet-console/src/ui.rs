//! UI rendering for the Appjet console.

use jet_tree::{DisplayRow, ExpansionState};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs},
    Frame,
};
use serde_json::Value;

use crate::app::{App, LoginField, Panel, Screen};

/// Main rendering entry point.
pub fn draw(frame: &mut Frame, app: &App) {
    match app.screen {
        Screen::Login => draw_login(frame, app),
        Screen::Home => draw_home(frame, app),
    }
}

fn draw_login(frame: &mut Frame, app: &App) {
    let area = centered_rect(46, 10, frame.area());
    let form = &app.login;

    let mut lines = vec![
        Line::from(""),
        field_line("Username", &form.username, form.focus == LoginField::Username),
        field_line(
            "Password",
            &"*".repeat(form.password.chars().count()),
            form.focus == LoginField::Password,
        ),
        Line::from(""),
    ];
    if form.pending {
        lines.push(Line::from(Span::styled(
            "  logging in...",
            Style::default().add_modifier(Modifier::DIM),
        )));
    } else if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            format!("  {error}"),
            Style::default().fg(Color::Red),
        )));
    } else {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "  Enter login · Tab switch field · Esc quit",
        Style::default().add_modifier(Modifier::DIM),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" APPJET ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn field_line<'a>(label: &'a str, value: &str, focused: bool) -> Line<'a> {
    let style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let cursor = if focused { "_" } else { "" };
    Line::from(vec![
        Span::raw(format!("  {label:<9} ")),
        Span::styled(format!("{value}{cursor}"), style),
    ])
}

fn draw_home(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Active panel
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    match app.panel {
        Panel::Documentation => {
            let rows = app.visible_rows();
            draw_tree(
                frame,
                chunks[1],
                &rows,
                &app.docs_expansion,
                app.docs_selected,
                " Documentation ",
                "no documentation entries",
            );
        }
        Panel::Monitoring => draw_monitoring(frame, app, chunks[1]),
    }
    draw_footer(frame, app, chunks[2]);
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let selected = match app.panel {
        Panel::Documentation => 0,
        Panel::Monitoring => 1,
    };
    let tabs = Tabs::new(vec!["Documentation", "Monitoring"])
        .block(
            Block::default().borders(Borders::ALL).title(format!(
                " APPJET | logged in as: {} ",
                app.session.display_name
            )),
        )
        .select(selected)
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, area);
}

fn draw_monitoring(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let rows = app.visible_rows();
    let empty_hint = if app.monitor.fetching {
        "fetching cluster state..."
    } else {
        "no cluster state yet — press r to refresh"
    };
    draw_tree(
        frame,
        chunks[0],
        &rows,
        &app.monitor.expansion,
        app.monitor.selected,
        " Cluster State ",
        empty_hint,
    );
    draw_report(frame, app, chunks[1]);
}

fn draw_tree(
    frame: &mut Frame,
    area: Rect,
    rows: &[DisplayRow],
    expansion: &ExpansionState,
    selected: usize,
    title: &str,
    empty_hint: &str,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .title_style(Style::default().fg(Color::Green));

    if rows.is_empty() {
        let hint = Paragraph::new(Line::from(Span::styled(
            format!("  {empty_hint}"),
            Style::default().add_modifier(Modifier::DIM),
        )))
        .block(block);
        frame.render_widget(hint, area);
        return;
    }

    // Keep the selection inside the visible window.
    let height = area.height.saturating_sub(2).max(1) as usize;
    let offset = selected.saturating_sub(height - 1);

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(index, row)| {
            let indent = "  ".repeat(row.depth());
            let line = match &row.value {
                Some(value) => Line::from(vec![
                    Span::raw(format!("  {indent}  ")),
                    Span::raw(format!("{}: ", row.label)),
                    Span::styled(scalar_text(value), Style::default().fg(Color::Cyan)),
                ]),
                None => {
                    let marker = if expansion.is_expanded(&row.path) {
                        "▼"
                    } else {
                        "▶"
                    };
                    Line::from(Span::raw(format!("  {indent}{marker} {}", row.label)))
                }
            };
            let item = ListItem::new(line);
            if index == selected {
                item.style(Style::default().add_modifier(Modifier::REVERSED))
            } else {
                item
            }
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn draw_report(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Availability ")
        .title_style(Style::default().fg(Color::Green));

    let mut items: Vec<ListItem> = Vec::new();
    if let Some(error) = &app.monitor.error {
        items.push(ListItem::new(Line::from(Span::styled(
            format!("  {error}"),
            Style::default().fg(Color::Red),
        ))));
    }
    for entry in &app.monitor.entries {
        let color = match (entry.app_online, entry.database_online) {
            (true, true) => Color::Green,
            (false, false) => Color::Red,
            _ => Color::Yellow,
        };
        items.push(ListItem::new(Line::from(Span::styled(
            format!("  {entry}"),
            Style::default().fg(color),
        ))));
    }
    if items.is_empty() {
        items.push(ListItem::new(Line::from(Span::styled(
            "  no hosts reported",
            Style::default().add_modifier(Modifier::DIM),
        ))));
    }

    frame.render_widget(List::new(items).block(block), area);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        " d docs · m monitoring · ↑↓ move · Enter expand · r refresh · l logout · q quit",
        Style::default().add_modifier(Modifier::DIM),
    )];
    if app.monitor.fetching {
        spans.push(Span::styled(
            "  refreshing...",
            Style::default().fg(Color::Yellow),
        ));
    }
    let footer =
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

/// Render a scalar without JSON string quoting.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
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
