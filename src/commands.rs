use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::client::TaskService;
use crate::horizon::Horizon;
use crate::i18n::Messages;
use crate::modal::day_at;
use crate::models::{valid_desc, visible_tasks, NewTask, Task, TaskId};

/// Lists the tasks of a horizon in a formatted table.
///
/// By default, hides completed tasks unless `all` is true.
pub fn cmd_list(service: &dyn TaskService, horizon: Horizon, all: bool, messages: &Messages) -> Result<()> {
    let tasks = service
        .list_tasks(horizon.cutoff_now())
        .context("failed to fetch tasks")?;
    let tasks = visible_tasks(&tasks, all);
    if tasks.is_empty() {
        println!("{}.", messages.no_tasks);
        return Ok(());
    }
    println!("{}", task_table(&tasks, messages));
    Ok(())
}

pub fn task_table(tasks: &[Task], messages: &Messages) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new(messages.desc_label).add_attribute(Attribute::Bold),
            Cell::new("Estimate").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

    for t in tasks {
        let estimate = messages.long_date(&t.estimate_at.with_timezone(&Local));
        let (status, status_color) = match t.done_at {
            Some(done) => (
                format!("Done {}", messages.long_date(&done.with_timezone(&Local))),
                Color::Green,
            ),
            None => ("Pending".to_string(), Color::Yellow),
        };
        table.add_row(vec![
            Cell::new(t.id),
            Cell::new(&t.desc),
            Cell::new(estimate),
            Cell::new(status).fg(status_color),
        ]);
    }
    table
}

/// Creates a task due on `date` (YYYY-MM-DD, default today).
pub fn cmd_add(service: &dyn TaskService, desc: String, date: Option<String>, messages: &Messages) -> Result<()> {
    let Some(desc) = valid_desc(&desc) else {
        bail!("{}: {}", messages.invalid_title, messages.invalid_desc);
    };

    let now = Local::now();
    let day = match date {
        Some(d) => NaiveDate::parse_from_str(&d, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}'. Use YYYY-MM-DD.", d))?,
        None => now.date_naive(),
    };
    let Some(estimate_at) = day_at(day, &now) else {
        bail!("{} '{}'", messages.invalid_date, day);
    };

    let new_task = NewTask {
        desc: desc.to_string(),
        estimate_at,
    };
    match service.create_task(&new_task).context("failed to create task")? {
        Some(task) => println!("Task added (id = {})", task.id),
        None => println!("Task added."),
    }
    Ok(())
}

/// Flips the completion state of a task.
pub fn cmd_toggle(service: &dyn TaskService, id: TaskId) -> Result<()> {
    service
        .toggle_task(id)
        .with_context(|| format!("failed to toggle task {}", id))?;
    println!("Task {} toggled.", id);
    Ok(())
}

/// Removes a task by ID.
pub fn cmd_delete(service: &dyn TaskService, id: TaskId) -> Result<()> {
    service
        .delete_task(id)
        .with_context(|| format!("failed to delete task {}", id))?;
    println!("Task {} removed.", id);
    Ok(())
}
