mod common;

use std::rc::Rc;

use common::{mixed_tasks, Call, FakeService};
use crossterm::event::KeyCode;
use chrono::NaiveDateTime;
use tasklist::client::{ServiceError, TaskService};
use tasklist::config::PreferenceScope;
use tasklist::horizon::Horizon;
use tasklist::i18n::Language;
use tasklist::models::{NewTask, Task, TaskId};
use tasklist::storage::{MemoryPreferenceStore, PreferenceStore};
use tasklist::tui::app::{App, InputMode};

/// Lets the test keep a handle on the service the app owns.
struct Shared(Rc<FakeService>);

impl TaskService for Shared {
    fn list_tasks(&self, until: NaiveDateTime) -> Result<Vec<Task>, ServiceError> {
        self.0.list_tasks(until)
    }
    fn create_task(&self, task: &NewTask) -> Result<Option<Task>, ServiceError> {
        self.0.create_task(task)
    }
    fn toggle_task(&self, id: TaskId) -> Result<(), ServiceError> {
        self.0.toggle_task(id)
    }
    fn delete_task(&self, id: TaskId) -> Result<(), ServiceError> {
        self.0.delete_task(id)
    }
}

fn app_with(service: Rc<FakeService>, prefs: MemoryPreferenceStore, scope: PreferenceScope) -> App {
    let mut app = App::new(
        Box::new(Shared(service)),
        Box::new(prefs),
        Language::En.messages(),
        scope,
        Horizon::Today,
    );
    app.ensure_mounted();
    app
}

fn app(service: Rc<FakeService>) -> App {
    app_with(service, MemoryPreferenceStore::new(), PreferenceScope::Shared)
}

fn press(app: &mut App, keys: &str) {
    for c in keys.chars() {
        app.handle_key(KeyCode::Char(c));
    }
}

#[test]
fn test_mounts_initial_screen_only() {
    let service = Rc::new(FakeService::with_tasks(mixed_tasks()));
    let app = app(service.clone());

    assert_eq!(app.screen().title(), "Today");
    assert!(app.screens[0].is_mounted());
    assert!(app.screens[1..].iter().all(|s| !s.is_mounted()));
    assert_eq!(service.calls().len(), 1);
    assert_eq!(app.state.selected(), Some(0));
}

#[test]
fn test_space_toggles_selected_task() {
    let service = Rc::new(FakeService::with_tasks(mixed_tasks()));
    let mut app = app(service.clone());
    service.clear_calls();

    app.handle_key(KeyCode::Down);
    assert_eq!(app.selected_task_id(), Some(3));
    app.handle_key(KeyCode::Char(' '));

    assert!(matches!(service.calls().as_slice(), [Call::Toggle(3), Call::List(_)]));
    assert_eq!(app.screen().visible_tasks().len(), 1);
    assert_eq!(app.state.selected(), Some(0));
}

#[test]
fn test_add_flow_through_modal() {
    let service = Rc::new(FakeService::with_tasks(mixed_tasks()));
    let mut app = app(service.clone());

    press(&mut app, "a");
    assert_eq!(app.input_mode(), InputMode::Modal);
    press(&mut app, "Buy milk");
    app.handle_key(KeyCode::Enter);

    assert_eq!(app.input_mode(), InputMode::Normal);
    assert!(app.modal.is_none());
    assert!(app.screen().visible_tasks().iter().any(|t| t.desc == "Buy milk"));
}

#[test]
fn test_blank_add_shows_alert_and_keeps_modal() {
    let service = Rc::new(FakeService::with_tasks(mixed_tasks()));
    let mut app = app(service.clone());
    service.clear_calls();

    press(&mut app, "a   ");
    app.handle_key(KeyCode::Enter);

    assert_eq!(app.input_mode(), InputMode::Alert);
    assert_eq!(
        app.alert,
        Some(("Invalid data".to_string(), "Description not provided".to_string()))
    );
    assert!(service.calls().is_empty());

    app.handle_key(KeyCode::Char('x'));
    assert_eq!(app.input_mode(), InputMode::Modal);
    assert_eq!(app.modal.as_ref().map(|m| m.desc.as_str()), Some("   "));

    app.handle_key(KeyCode::Esc);
    assert_eq!(app.input_mode(), InputMode::Normal);
    assert!(app.modal.is_none());
}

#[test]
fn test_service_error_goes_to_status_line() {
    let service = Rc::new(FakeService::with_tasks(mixed_tasks()));
    let mut app = app(service.clone());

    service.fail(true);
    press(&mut app, "r");
    assert!(app.status.as_deref().is_some_and(|s| s.contains("500")));
    assert_eq!(app.screen().visible_tasks().len(), 2);

    service.fail(false);
    press(&mut app, "j");
    assert!(app.status.is_none());
}

#[test]
fn test_drawer_navigates_and_mounts() {
    let service = Rc::new(FakeService::with_tasks(mixed_tasks()));
    let mut app = app(service.clone());

    press(&mut app, "m");
    assert_eq!(app.input_mode(), InputMode::Drawer);
    press(&mut app, "jj");
    app.handle_key(KeyCode::Enter);

    assert_eq!(app.input_mode(), InputMode::Normal);
    assert_eq!(app.screen().horizon(), Horizon::Week);
    assert_eq!(app.screen().title(), "Week");
    assert!(app.screen().is_mounted());
}

#[test]
fn test_shared_key_is_seen_by_other_screens() {
    let service = Rc::new(FakeService::with_tasks(mixed_tasks()));
    let mut app = app(service);

    press(&mut app, "c");
    assert!(app.screen().show_done_tasks());

    press(&mut app, "m");
    app.handle_key(KeyCode::Down);
    app.handle_key(KeyCode::Enter);
    assert_eq!(app.screen().horizon(), Horizon::Tomorrow);
    assert!(app.screen().show_done_tasks());
}

#[test]
fn test_per_screen_keys_are_independent() {
    let service = Rc::new(FakeService::with_tasks(mixed_tasks()));
    let mut prefs = MemoryPreferenceStore::new();
    prefs.set_item("state.tomorrow", r#"{"showDoneTasks":true}"#).unwrap();
    let mut app = app_with(service, prefs, PreferenceScope::PerScreen);

    assert!(!app.screen().show_done_tasks());

    press(&mut app, "m");
    app.handle_key(KeyCode::Down);
    app.handle_key(KeyCode::Enter);
    assert!(app.screen().show_done_tasks());
}

#[test]
fn test_quit() {
    let service = Rc::new(FakeService::default());
    let mut app = app(service);
    assert!(!app.handle_key(KeyCode::Char('j')));
    assert!(app.handle_key(KeyCode::Char('q')));
}
