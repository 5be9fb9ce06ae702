use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type TaskId = u64;

/// A single task as served by the remote task service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier, stable across requests.
    pub id: TaskId,
    /// The description of the task.
    pub desc: String,
    /// Target date for completion.
    pub estimate_at: DateTime<Utc>,
    /// When the task was completed. `None` means the task is still pending.
    #[serde(default)]
    pub done_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn is_pending(&self) -> bool {
        self.done_at.is_none()
    }
}

/// Body of `POST /tasks`.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub desc: String,
    pub estimate_at: DateTime<Utc>,
}

/// What the add-task modal yields on confirm.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskInput {
    pub desc: String,
    pub date: DateTime<Utc>,
}

impl TaskInput {
    /// Returns the description when it is present and not only whitespace.
    pub fn valid_desc(&self) -> Option<&str> {
        valid_desc(&self.desc)
    }
}

pub fn valid_desc(desc: &str) -> Option<&str> {
    if desc.trim().is_empty() {
        None
    } else {
        Some(desc)
    }
}

/// Display preference persisted under the `state` key.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub show_done_tasks: bool,
}

impl Preferences {
    /// Parses a stored value, falling back to the default for anything that
    /// is missing, malformed, or not an object.
    pub fn parse(raw: Option<&str>) -> Preferences {
        match raw.and_then(|s| serde_json::from_str::<serde_json::Value>(s).ok()) {
            Some(value @ serde_json::Value::Object(_)) => {
                serde_json::from_value(value).unwrap_or_default()
            }
            _ => Preferences::default(),
        }
    }
}

/// Returns the tasks to display for the given filter flag, preserving order.
pub fn visible_tasks(tasks: &[Task], show_done_tasks: bool) -> Vec<Task> {
    if show_done_tasks {
        tasks.to_vec()
    } else {
        tasks.iter().filter(|t| t.is_pending()).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_uses_camel_case_wire_names() {
        let json = r#"{"id":3,"desc":"Read","estimateAt":"2026-10-16T12:00:00.000Z","doneAt":null,"userId":1}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, 3);
        assert!(task.is_pending());

        let body = serde_json::to_value(NewTask {
            desc: "Read".into(),
            estimate_at: task.estimate_at,
        })
        .unwrap();
        assert!(body.get("estimateAt").is_some());
    }

    #[test]
    fn preferences_fall_back_to_default() {
        assert_eq!(Preferences::parse(None), Preferences::default());
        assert_eq!(Preferences::parse(Some("null")), Preferences::default());
        assert_eq!(Preferences::parse(Some("not json")), Preferences::default());
        assert_eq!(Preferences::parse(Some("[true]")), Preferences::default());
        assert_eq!(
            Preferences::parse(Some(r#"{"showDoneTasks":"yes"}"#)),
            Preferences::default()
        );
        assert!(Preferences::parse(Some(r#"{"showDoneTasks":true}"#)).show_done_tasks);
    }

    #[test]
    fn blank_descriptions_are_rejected() {
        assert_eq!(valid_desc(""), None);
        assert_eq!(valid_desc(" \t "), None);
        assert_eq!(valid_desc("Buy milk"), Some("Buy milk"));
    }
}
