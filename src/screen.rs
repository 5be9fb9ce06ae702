//! The task list screen: fetch, filter, create, toggle and delete tasks for
//! one horizon.
//!
//! Every mutation is a single call to the [`TaskService`] followed by a full
//! reload. Failures leave the in-memory lists untouched and are reported
//! through [`Notice`].

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::client::{ServiceError, TaskService};
use crate::horizon::Horizon;
use crate::i18n::Messages;
use crate::models::{visible_tasks, NewTask, Preferences, Task, TaskId, TaskInput};
use crate::storage::{load_preferences, save_preferences, PreferenceStore};

/// Something the user has to be told about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Non-blocking notification of a failed service call.
    Error(String),
    /// Blocking alert, dismissed by the user.
    Alert { title: String, message: String },
}

#[derive(Debug, Clone)]
pub struct ScreenConfig {
    pub title: String,
    pub horizon: Horizon,
    /// Preference store key for `{showDoneTasks}`.
    pub pref_key: String,
}

pub struct TaskListScreen {
    config: ScreenConfig,
    messages: &'static Messages,
    tasks: Vec<Task>,
    visible_tasks: Vec<Task>,
    show_done_tasks: bool,
    show_modal: bool,
    mounted: bool,
    notice: Option<Notice>,
}

impl TaskListScreen {
    pub fn new(config: ScreenConfig, messages: &'static Messages) -> Self {
        Self {
            config,
            messages,
            tasks: Vec::new(),
            visible_tasks: Vec::new(),
            show_done_tasks: false,
            show_modal: false,
            mounted: false,
            notice: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.config.title
    }

    pub fn horizon(&self) -> Horizon {
        self.config.horizon
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn visible_tasks(&self) -> &[Task] {
        &self.visible_tasks
    }

    pub fn show_done_tasks(&self) -> bool {
        self.show_done_tasks
    }

    pub fn show_modal(&self) -> bool {
        self.show_modal
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Restores the persisted filter flag and loads the tasks.
    #[tracing::instrument(skip_all, fields(horizon = %self.config.horizon))]
    pub fn mount(&mut self, service: &dyn TaskService, prefs: &mut dyn PreferenceStore) {
        let restored = load_preferences(prefs, &self.config.pref_key);
        debug!(show_done_tasks = restored.show_done_tasks, "preferences restored");
        self.show_done_tasks = restored.show_done_tasks;
        self.mounted = true;
        self.load_tasks(service, prefs);
    }

    pub fn load_tasks(&mut self, service: &dyn TaskService, prefs: &mut dyn PreferenceStore) {
        self.load_tasks_at(service, prefs, Local::now());
    }

    /// Fetches every task due up to the end of the horizon as seen from `now`.
    pub fn load_tasks_at(
        &mut self,
        service: &dyn TaskService,
        prefs: &mut dyn PreferenceStore,
        now: DateTime<Local>,
    ) -> bool {
        let cutoff = self.config.horizon.cutoff(&now);
        match service.list_tasks(cutoff) {
            Ok(tasks) => {
                debug!(count = tasks.len(), %cutoff, "tasks loaded");
                self.tasks = tasks;
                self.filter_tasks(prefs);
                true
            }
            Err(e) => {
                self.report(e);
                false
            }
        }
    }

    /// Recomputes the visible list and persists the filter flag.
    pub fn filter_tasks(&mut self, prefs: &mut dyn PreferenceStore) {
        self.visible_tasks = visible_tasks(&self.tasks, self.show_done_tasks);

        let current = Preferences {
            show_done_tasks: self.show_done_tasks,
        };
        if let Err(e) = save_preferences(prefs, &self.config.pref_key, current) {
            warn!(key = %self.config.pref_key, error = %e, "failed to persist preferences");
        }
    }

    pub fn toggle_filter(&mut self, prefs: &mut dyn PreferenceStore) {
        self.show_done_tasks = !self.show_done_tasks;
        self.filter_tasks(prefs);
    }

    pub fn toggle_task(&mut self, id: TaskId, service: &dyn TaskService, prefs: &mut dyn PreferenceStore) {
        match service.toggle_task(id) {
            Ok(()) => self.load_tasks(service, prefs),
            Err(e) => self.report(e),
        }
    }

    /// Creates a task from the modal's input. A blank description raises an
    /// alert and never reaches the service.
    pub fn add_task(&mut self, input: TaskInput, service: &dyn TaskService, prefs: &mut dyn PreferenceStore) {
        let Some(desc) = input.valid_desc() else {
            info!("rejected task without description");
            self.notice = Some(Notice::Alert {
                title: self.messages.invalid_title.to_string(),
                message: self.messages.invalid_desc.to_string(),
            });
            return;
        };

        let new_task = NewTask {
            desc: desc.to_string(),
            estimate_at: input.date,
        };
        match service.create_task(&new_task) {
            Ok(_) => {
                self.show_modal = false;
                self.load_tasks(service, prefs);
            }
            Err(e) => self.report(e),
        }
    }

    pub fn delete_task(&mut self, id: TaskId, service: &dyn TaskService, prefs: &mut dyn PreferenceStore) {
        match service.delete_task(id) {
            Ok(()) => self.load_tasks(service, prefs),
            Err(e) => self.report(e),
        }
    }

    pub fn open_modal(&mut self) {
        self.show_modal = true;
    }

    pub fn close_modal(&mut self) {
        self.show_modal = false;
    }

    fn report(&mut self, err: ServiceError) {
        warn!(horizon = %self.config.horizon, error = %err, "task service call failed");
        self.notice = Some(Notice::Error(format!("{} {}", self.messages.error_title, err)));
    }
}
