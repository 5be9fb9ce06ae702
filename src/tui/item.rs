//! Rendering of a single task row.

use chrono::Local;
use crossterm::event::KeyCode;
use ratatui::{
    style::{Color, Modifier, Style},
    widgets::{Cell, Row},
};

use crate::i18n::Messages;
use crate::models::{Task, TaskId};

/// What a key press on a task row asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemAction {
    Toggle(TaskId),
    Delete(TaskId),
}

pub fn item_action(id: TaskId, code: KeyCode) -> Option<ItemAction> {
    match code {
        KeyCode::Char(' ') => Some(ItemAction::Toggle(id)),
        KeyCode::Char('d') | KeyCode::Delete => Some(ItemAction::Delete(id)),
        _ => None,
    }
}

/// Check mark, description and date. Completed tasks are struck through and
/// show the day they were done on.
pub fn task_row<'a>(task: &'a Task, messages: &Messages, accent: Color) -> Row<'a> {
    let (check, desc_style, when) = match task.done_at {
        Some(done) => (
            Cell::from("[x]").style(Style::default().fg(accent)),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),
            done,
        ),
        None => ("[ ]".into(), Style::default(), task.estimate_at),
    };

    Row::new(vec![
        check,
        Cell::from(task.desc.as_str()).style(desc_style),
        Cell::from(messages.long_date(&when.with_timezone(&Local))).style(Style::default().fg(Color::Gray)),
    ])
}
