use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Row, Table, Wrap},
    Frame,
};

use super::app::{App, InputMode};
use super::item::task_row;
use crate::modal::{AddTaskModal, ModalField};

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30), // Header
            Constraint::Min(0),         // Tasks
            Constraint::Length(3),      // Help
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_tasks(f, app, chunks[1]);
    render_footer(f, app, chunks[2]);

    match app.input_mode() {
        InputMode::Modal => {
            if let Some(modal) = &app.modal {
                render_modal(f, app, modal);
            }
        }
        InputMode::Drawer => render_drawer(f, app),
        InputMode::Alert => render_alert(f, app),
        InputMode::Normal => {}
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let screen = app.screen();
    let theme = screen.horizon().theme();
    let fg = Style::default().fg(Color::White).bg(theme.background);

    f.render_widget(Block::default().style(fg), area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1), Constraint::Length(1)])
        .horizontal_margin(2)
        .vertical_margin(1)
        .split(area);

    let eye = if screen.show_done_tasks() { "◉ c" } else { "◌ c" };
    let icons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    f.render_widget(Paragraph::new("≡ m").style(fg), icons[0]);
    f.render_widget(Paragraph::new(eye).style(fg).alignment(Alignment::Right), icons[1]);

    f.render_widget(
        Paragraph::new(screen.title()).style(fg.add_modifier(Modifier::BOLD)),
        rows[2],
    );
    f.render_widget(
        Paragraph::new(app.messages.long_date(&Local::now())).style(fg),
        rows[3],
    );
}

fn render_tasks(f: &mut Frame, app: &mut App, area: Rect) {
    let screen = &app.screens[app.current];
    let accent = screen.horizon().theme().accent;
    let block = Block::default().borders(Borders::ALL);

    if screen.visible_tasks().is_empty() {
        let empty = Paragraph::new(app.messages.no_tasks)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let rows: Vec<Row> = screen
        .visible_tasks()
        .iter()
        .map(|t| task_row(t, app.messages, accent))
        .collect();

    let widths = [Constraint::Length(3), Constraint::Min(20), Constraint::Length(24)];

    let table = Table::new(rows, widths)
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let accent = app.screen().horizon().theme().accent;
    let line = match &app.status {
        Some(message) => Line::from(Span::styled(message.as_str(), Style::default().fg(Color::Red))),
        None => {
            let help = match app.input_mode() {
                InputMode::Normal => " q: Quit | m: Menu | c: Toggle Done | Space: Done | d: Del | r: Reload",
                InputMode::Modal => " Enter: Save | Tab: Next Field | Esc: Cancel",
                InputMode::Drawer => " Enter: Open | Esc: Close",
                InputMode::Alert => " Any key: Close",
            };
            Line::from(vec![
                Span::styled(" + a ", Style::default().fg(Color::White).bg(accent).add_modifier(Modifier::BOLD)),
                Span::styled(help, Style::default().fg(Color::Gray)),
            ])
        }
    };

    f.render_widget(Paragraph::new(line).block(Block::default().borders(Borders::ALL)), area);
}

fn render_modal(f: &mut Frame, app: &App, modal: &AddTaskModal) {
    let accent = app.screen().horizon().theme().accent;
    let area = centered_rect(60, 8, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {} ", app.messages.new_task),
            Style::default().fg(Color::White).bg(accent).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let fields = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3)])
        .split(inner);

    let style_for = |field: ModalField| {
        if modal.field == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    };

    let desc = Paragraph::new(modal.desc.as_str())
        .style(style_for(ModalField::Desc))
        .block(Block::default().borders(Borders::ALL).title(app.messages.desc_label));
    f.render_widget(desc, fields[0]);

    let date_title = if modal.date_error {
        format!("{} - {}", app.messages.date_label, app.messages.invalid_date)
    } else {
        app.messages.date_label.to_string()
    };
    let date_style = if modal.date_error {
        Style::default().fg(Color::Red)
    } else {
        style_for(ModalField::Date)
    };
    let date = Paragraph::new(modal.date.as_str())
        .style(date_style)
        .block(Block::default().borders(Borders::ALL).title(date_title));
    f.render_widget(date, fields[1]);
}

fn render_drawer(f: &mut Frame, app: &mut App) {
    let area = Rect {
        width: f.area().width.min(24),
        ..f.area()
    };
    f.render_widget(Clear, area);

    let items: Vec<ListItem> = app
        .screens
        .iter()
        .map(|s| {
            let theme = s.horizon().theme();
            ListItem::new(Line::from(vec![
                Span::styled("  ", Style::default().bg(theme.accent)),
                Span::raw(" "),
                Span::raw(s.title().to_string()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol("> ");

    f.render_stateful_widget(list, area, &mut app.drawer_state);
}

fn render_alert(f: &mut Frame, app: &App) {
    let Some((title, message)) = &app.alert else {
        return;
    };
    let area = centered_rect(50, 5, f.area());
    f.render_widget(Clear, area);

    let alert = Paragraph::new(message.as_str())
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(title.as_str()),
        );
    f.render_widget(alert, area);
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(r.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Length(r.height.saturating_sub(height) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
