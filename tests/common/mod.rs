#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use chrono::{DateTime, Duration, Local, NaiveDateTime, Utc};
use tasklist::client::{ServiceError, TaskService};
use tasklist::models::{NewTask, Task, TaskId};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(NaiveDateTime),
    Create(NewTask),
    Toggle(TaskId),
    Delete(TaskId),
}

/// In-memory task service that records every call.
#[derive(Default)]
pub struct FakeService {
    pub tasks: RefCell<Vec<Task>>,
    pub calls: RefCell<Vec<Call>>,
    pub failing: Cell<bool>,
}

impl FakeService {
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: RefCell::new(tasks),
            ..Self::default()
        }
    }

    pub fn fail(&self, failing: bool) {
        self.failing.set(failing);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn check(&self) -> Result<(), ServiceError> {
        if self.failing.get() {
            Err(ServiceError::Status {
                status: 500,
                body: "boom".into(),
            })
        } else {
            Ok(())
        }
    }
}

impl TaskService for FakeService {
    fn list_tasks(&self, until: NaiveDateTime) -> Result<Vec<Task>, ServiceError> {
        self.calls.borrow_mut().push(Call::List(until));
        self.check()?;
        Ok(self
            .tasks
            .borrow()
            .iter()
            .filter(|t| t.estimate_at.with_timezone(&Local).naive_local() <= until)
            .cloned()
            .collect())
    }

    fn create_task(&self, task: &NewTask) -> Result<Option<Task>, ServiceError> {
        self.calls.borrow_mut().push(Call::Create(task.clone()));
        self.check()?;
        let mut tasks = self.tasks.borrow_mut();
        let id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let created = Task {
            id,
            desc: task.desc.clone(),
            estimate_at: task.estimate_at,
            done_at: None,
        };
        tasks.push(created.clone());
        Ok(Some(created))
    }

    fn toggle_task(&self, id: TaskId) -> Result<(), ServiceError> {
        self.calls.borrow_mut().push(Call::Toggle(id));
        self.check()?;
        if let Some(t) = self.tasks.borrow_mut().iter_mut().find(|t| t.id == id) {
            t.done_at = match t.done_at {
                Some(_) => None,
                None => Some(Utc::now()),
            };
        }
        Ok(())
    }

    fn delete_task(&self, id: TaskId) -> Result<(), ServiceError> {
        self.calls.borrow_mut().push(Call::Delete(id));
        self.check()?;
        self.tasks.borrow_mut().retain(|t| t.id != id);
        Ok(())
    }
}

/// A task due `days` from now, optionally already done.
pub fn task(id: TaskId, desc: &str, days: i64, done: bool) -> Task {
    let now: DateTime<Utc> = Utc::now();
    Task {
        id,
        desc: desc.into(),
        estimate_at: now + Duration::days(days),
        done_at: if done { Some(now) } else { None },
    }
}

/// Two pending tasks around one done task, all due today.
pub fn mixed_tasks() -> Vec<Task> {
    vec![
        task(1, "Read book", 0, false),
        task(2, "Pay bills", 0, true),
        task(3, "Walk dog", 0, false),
    ]
}
