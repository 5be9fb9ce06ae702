use chrono::Local;
use crossterm::event::KeyCode;
use ratatui::widgets::{ListState, TableState};

use crate::client::TaskService;
use crate::config::PreferenceScope;
use crate::horizon::Horizon;
use crate::i18n::Messages;
use crate::modal::AddTaskModal;
use crate::models::TaskId;
use crate::screen::{Notice, ScreenConfig, TaskListScreen};
use crate::storage::PreferenceStore;

use super::item::{item_action, ItemAction};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InputMode {
    Normal,
    Modal,
    Drawer,
    Alert,
}

/// The application shell: one screen per horizon plus the drawer used to
/// move between them.
pub struct App {
    pub screens: Vec<TaskListScreen>,
    pub current: usize,
    pub state: TableState,
    pub drawer_state: ListState,
    pub drawer_open: bool,
    pub modal: Option<AddTaskModal>,
    /// Last error notification, shown in the footer until the next key.
    pub status: Option<String>,
    /// Blocking alert: (title, message).
    pub alert: Option<(String, String)>,
    pub messages: &'static Messages,
    service: Box<dyn TaskService>,
    prefs: Box<dyn PreferenceStore>,
}

impl App {
    pub fn new(
        service: Box<dyn TaskService>,
        prefs: Box<dyn PreferenceStore>,
        messages: &'static Messages,
        scope: PreferenceScope,
        initial: Horizon,
    ) -> App {
        let screens: Vec<TaskListScreen> = Horizon::ALL
            .iter()
            .map(|&horizon| {
                TaskListScreen::new(
                    ScreenConfig {
                        title: messages.title(horizon).to_string(),
                        horizon,
                        pref_key: scope.key(horizon),
                    },
                    messages,
                )
            })
            .collect();
        let current = Horizon::ALL.iter().position(|&h| h == initial).unwrap_or(0);

        let mut drawer_state = ListState::default();
        drawer_state.select(Some(current));

        App {
            screens,
            current,
            state: TableState::default(),
            drawer_state,
            drawer_open: false,
            modal: None,
            status: None,
            alert: None,
            messages,
            service,
            prefs,
        }
    }

    pub fn screen(&self) -> &TaskListScreen {
        &self.screens[self.current]
    }

    pub fn input_mode(&self) -> InputMode {
        if self.alert.is_some() {
            InputMode::Alert
        } else if self.drawer_open {
            InputMode::Drawer
        } else if self.screen().show_modal() {
            InputMode::Modal
        } else {
            InputMode::Normal
        }
    }

    /// Mounts the current screen the first time it is shown.
    pub fn ensure_mounted(&mut self) {
        if !self.screens[self.current].is_mounted() {
            self.screens[self.current].mount(self.service.as_ref(), self.prefs.as_mut());
            self.after_update();
        }
    }

    /// Picks up the screen's notice and keeps the selection in range.
    fn after_update(&mut self) {
        match self.screens[self.current].take_notice() {
            Some(Notice::Error(message)) => self.status = Some(message),
            Some(Notice::Alert { title, message }) => self.alert = Some((title, message)),
            None => {}
        }

        let len = self.screen().visible_tasks().len();
        if len == 0 {
            self.state.select(None);
        } else if let Some(i) = self.state.selected() {
            if i >= len {
                self.state.select(Some(len - 1));
            }
        } else {
            self.state.select(Some(0));
        }
    }

    /// Selects the next task in the list.
    pub fn next(&mut self) {
        let len = self.screen().visible_tasks().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    /// Selects the previous task in the list.
    pub fn previous(&mut self) {
        let len = self.screen().visible_tasks().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn selected_task_id(&self) -> Option<TaskId> {
        self.state
            .selected()
            .and_then(|i| self.screen().visible_tasks().get(i))
            .map(|t| t.id)
    }

    pub fn on_toggle_task(&mut self, id: TaskId) {
        self.screens[self.current].toggle_task(id, self.service.as_ref(), self.prefs.as_mut());
        self.after_update();
    }

    pub fn on_delete(&mut self, id: TaskId) {
        self.screens[self.current].delete_task(id, self.service.as_ref(), self.prefs.as_mut());
        self.after_update();
    }

    pub fn toggle_filter(&mut self) {
        self.screens[self.current].toggle_filter(self.prefs.as_mut());
        self.after_update();
    }

    pub fn reload(&mut self) {
        self.screens[self.current].load_tasks(self.service.as_ref(), self.prefs.as_mut());
        self.after_update();
    }

    pub fn start_add(&mut self) {
        self.screens[self.current].open_modal();
        self.modal = Some(AddTaskModal::new(Local::now().date_naive()));
    }

    pub fn cancel_add(&mut self) {
        self.screens[self.current].close_modal();
        self.modal = None;
    }

    /// Hands the modal's `{desc, date}` to the screen. The modal stays open
    /// when the date is invalid or the screen keeps it open.
    pub fn confirm_add(&mut self) {
        let Some(modal) = self.modal.as_mut() else {
            return;
        };
        let Some(input) = modal.confirm(Local::now()) else {
            return;
        };
        self.screens[self.current].add_task(input, self.service.as_ref(), self.prefs.as_mut());
        if !self.screen().show_modal() {
            self.modal = None;
        }
        self.after_update();
    }

    pub fn open_drawer(&mut self) {
        self.drawer_state.select(Some(self.current));
        self.drawer_open = true;
    }

    pub fn drawer_next(&mut self) {
        let i = self.drawer_state.selected().map_or(0, |i| (i + 1) % self.screens.len());
        self.drawer_state.select(Some(i));
    }

    pub fn drawer_previous(&mut self) {
        let len = self.screens.len();
        let i = self.drawer_state.selected().map_or(0, |i| (i + len - 1) % len);
        self.drawer_state.select(Some(i));
    }

    /// Switches to the screen highlighted in the drawer.
    pub fn navigate(&mut self) {
        self.drawer_open = false;
        if let Some(i) = self.drawer_state.selected() {
            if i != self.current {
                self.current = i;
                self.state.select(None);
            }
        }
        self.ensure_mounted();
        self.after_update();
    }

    /// Handles one key press. Returns `true` when the app should quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match self.input_mode() {
            InputMode::Alert => {
                self.alert = None;
            }
            InputMode::Drawer => match code {
                KeyCode::Down | KeyCode::Char('j') => self.drawer_next(),
                KeyCode::Up | KeyCode::Char('k') => self.drawer_previous(),
                KeyCode::Enter => self.navigate(),
                KeyCode::Esc | KeyCode::Char('m') => self.drawer_open = false,
                _ => {}
            },
            InputMode::Modal => match code {
                KeyCode::Enter => self.confirm_add(),
                KeyCode::Esc => self.cancel_add(),
                KeyCode::Tab | KeyCode::BackTab => {
                    if let Some(modal) = self.modal.as_mut() {
                        modal.next_field();
                    }
                }
                KeyCode::Char(c) => {
                    if let Some(modal) = self.modal.as_mut() {
                        modal.push(c);
                    }
                }
                KeyCode::Backspace => {
                    if let Some(modal) = self.modal.as_mut() {
                        modal.pop();
                    }
                }
                _ => {}
            },
            InputMode::Normal => {
                self.status = None;
                if let Some(action) = self.selected_task_id().and_then(|id| item_action(id, code)) {
                    match action {
                        ItemAction::Toggle(id) => self.on_toggle_task(id),
                        ItemAction::Delete(id) => self.on_delete(id),
                    }
                    return false;
                }
                match code {
                    KeyCode::Char('q') => return true,
                    KeyCode::Down | KeyCode::Char('j') => self.next(),
                    KeyCode::Up | KeyCode::Char('k') => self.previous(),
                    KeyCode::Char('a') => self.start_add(),
                    KeyCode::Char('c') => self.toggle_filter(),
                    KeyCode::Char('m') => self.open_drawer(),
                    KeyCode::Char('r') => self.reload(),
                    _ => {}
                }
            }
        }
        false
    }
}
