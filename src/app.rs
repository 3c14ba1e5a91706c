use anyhow::Result;
use chrono::{Local, NaiveDate};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use crate::action::Action;
use crate::components::action_hud::ActionHud;
use crate::components::calendar::render_calendar_overlay;
use crate::components::edit_modal::render_edit_modal;
use crate::components::home::HomeView;
use crate::components::launch::LaunchView;
use crate::components::settings_view::SettingsView;
use crate::components::Component;
use crate::config::{self, LiftLogConfig};
use crate::event::{map_key_to_action, Event, EventReader, KeyContext};
use crate::state::calendar::apply_step;
use crate::state::dashboard::HomeState;
use crate::state::edit_session::EditTarget;
use crate::state::profile::ImageLoader;
use crate::state::settings_rows::{RowKind, SettingsViewState};
use crate::state::settings_store::SubscriptionId;
use crate::state::{AppState, Screen, SettingsStore};
use crate::tui::Tui;

/// ~3 seconds at the 50ms tick rate.
const STATUS_TICKS: u32 = 60;

pub struct App {
    state: AppState,
    loader: Box<dyn ImageLoader>,
    config_path: PathBuf,
    /// Set by the store subscription whenever a setting changes.
    dirty: Rc<Cell<bool>>,
    /// Change tracking for the signed-in session; `None` while signed out.
    session: Option<SubscriptionId>,
    status_clear_countdown: u32,
}

impl App {
    pub fn new(config: LiftLogConfig, loader: Box<dyn ImageLoader>, open_settings: bool) -> Self {
        let mut store = SettingsStore::new(config.settings);
        let dirty = Rc::new(Cell::new(false));
        let session = Some(track_changes(&mut store, &dirty));

        let mut state = AppState::new(config.theme, store, config.profile, loader.as_ref(), today());
        if open_settings {
            state.screen = Screen::Settings;
        }

        Self {
            state,
            loader,
            config_path: config.path,
            dirty,
            session,
            status_clear_countdown: 0,
        }
    }

    pub async fn run(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut events = EventReader::new(Duration::from_millis(50));

        loop {
            terminal.draw(|frame| render(frame, &self.state))?;

            // Wait for at least one event, then drain all pending events
            let first = events.next().await;
            let mut pending = Vec::new();
            if let Some(ev) = first {
                pending.push(ev);
            }
            while let Some(ev) = events.try_next() {
                pending.push(ev);
            }

            for event in pending {
                // Context is rebuilt per event: an earlier key may have opened a modal.
                let ctx = self.key_context();
                let action = match event {
                    Event::Key(key) => map_key_to_action(key, &ctx),
                    Event::Resize => Some(Action::Resize),
                    Event::Tick => Some(Action::Tick),
                };
                if let Some(action) = action {
                    self.update(action);
                }
            }

            if self.state.should_quit {
                break;
            }
        }

        self.persist_if_dirty();
        Ok(())
    }

    fn key_context(&self) -> KeyContext {
        KeyContext {
            screen: self.state.screen,
            modal: self.state.modal.target(),
            calendar_open: self.state.home.calendar_open,
        }
    }

    fn update(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.state.should_quit = true;
            }
            Action::Tick => {
                if self.status_clear_countdown > 0 {
                    self.status_clear_countdown -= 1;
                    if self.status_clear_countdown == 0 {
                        self.state.status_message = None;
                    }
                }
            }
            Action::Resize => {}

            Action::ShowHome => {
                if self.state.screen == Screen::Settings {
                    self.persist_if_dirty();
                }
                self.state.screen = Screen::Home;
            }
            Action::ShowSettings => {
                self.state.screen = Screen::Settings;
                self.state.settings_view = SettingsViewState::default();
            }
            Action::StartSession => {
                tracing::info!("new session started");
                if self.session.is_none() {
                    self.session = Some(track_changes(&mut self.state.store, &self.dirty));
                }
                self.state.home = HomeState::new(today());
                self.state.settings_view = SettingsViewState::default();
                self.state.screen = Screen::Home;
            }

            Action::ToggleCalendar => {
                self.state.home.calendar_open = !self.state.home.calendar_open;
            }
            Action::CloseCalendar => {
                self.state.home.calendar_open = false;
            }
            Action::CalendarStep(step) => {
                self.state.home.selected_date = apply_step(self.state.home.selected_date, step);
            }
            Action::ToggleDetails => {
                self.state.home.details_open = !self.state.home.details_open;
            }

            Action::SettingsUp => self.state.settings_view.select_up(),
            Action::SettingsDown => self.state.settings_view.select_down(),
            Action::ActivateRow => {
                let kind = self.state.settings_view.selected().kind;
                match kind {
                    RowKind::Toggle(field) => {
                        let value = self.state.store.toggle(field);
                        tracing::info!(?field, value, "preference toggled");
                    }
                    RowKind::Edit(target) => {
                        self.state
                            .modal
                            .open(target, &self.state.store, &self.state.profile, today());
                    }
                    RowKind::Logout => self.logout(),
                }
            }
            Action::Logout => self.logout(),

            Action::Modal(input) => self.state.modal.handle_input(input),
            Action::SaveModal => {
                match self.state.modal.save(&mut self.state.store, &mut self.state.profile) {
                    Ok(Some(commit)) => {
                        if commit.target == EditTarget::Profile && commit.changed {
                            self.state.refresh_avatar(self.loader.as_ref());
                            self.dirty.set(true);
                        }
                        let label = commit.target.title().trim_start_matches("Edit ");
                        self.set_status(format!("{label} saved"), false);
                    }
                    Ok(None) => {}
                    Err(e) => self.set_status(e.to_string(), true),
                }
            }
            Action::CancelModal => {
                self.state.modal.cancel();
            }
        }
    }

    /// Drop any open modal, persist, and hand over to the signed-out screen.
    fn logout(&mut self) {
        self.state.modal.cancel();
        self.persist_if_dirty();
        if let Some(id) = self.session.take() {
            self.state.store.unsubscribe(id);
        }
        self.state.home.calendar_open = false;
        self.state.status_message = None;
        self.state.screen = Screen::Launch;
        tracing::info!("logout requested");
    }

    fn persist_if_dirty(&mut self) {
        if !self.dirty.get() {
            return;
        }
        let snapshot = self.state.store.snapshot();
        match config::save_state(&self.config_path, &snapshot, &self.state.profile) {
            Ok(()) => self.dirty.set(false),
            Err(e) => {
                tracing::warn!(error = %e, "failed to save settings");
                self.set_status(format!("Could not save settings: {e}"), true);
            }
        }
    }

    fn set_status(&mut self, msg: String, is_error: bool) {
        self.state.status_message = Some((msg, is_error));
        self.status_clear_countdown = STATUS_TICKS;
    }
}

/// Mark `dirty` on every effective store change.
fn track_changes(store: &mut SettingsStore, dirty: &Rc<Cell<bool>>) -> SubscriptionId {
    let flag = Rc::clone(dirty);
    store.subscribe(move |_, _| flag.set(true))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Draw the whole UI for the current state.
pub fn render(frame: &mut Frame, state: &AppState) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    match state.screen {
        Screen::Home => HomeView.render(frame, outer[0], state),
        Screen::Settings => SettingsView.render(frame, outer[0], state),
        Screen::Launch => LaunchView.render(frame, outer[0], state),
    }
    ActionHud.render(frame, outer[1], state);

    // Overlays
    if state.screen == Screen::Home && state.home.calendar_open {
        render_calendar_overlay(frame, state);
    }
    render_edit_modal(frame, state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::edit_session::ModalInput;
    use crate::state::profile::{ImageRef, UserProfile};
    use crate::state::settings_store::{Settings, TextField, ToggleField};
    use crate::state::settings_rows::SETTINGS_ROWS;
    use crate::theme::Theme;
    use ratatui::style::Modifier;
    use ratatui::{backend::TestBackend, Terminal};

    struct NoImages;

    impl ImageLoader for NoImages {
        fn load(&self, _: &ImageRef) -> Option<Vec<u8>> {
            None
        }
    }

    fn app(dir: &tempfile::TempDir) -> App {
        let config = LiftLogConfig {
            path: dir.path().join("config.toml"),
            theme: Theme::from_name("ember"),
            settings: Settings {
                weight: "140".to_string(),
                gender: "Female".to_string(),
                birthday: "12/25/1990".to_string(),
                username: "janedoe".to_string(),
                password: "hunter2".to_string(),
                ..Settings::default()
            },
            profile: UserProfile::new("Jane Doe", ImageRef::new("jane.png")),
        };
        App::new(config, Box::new(NoImages), true)
    }

    fn select_row(app: &mut App, kind: RowKind) {
        let idx = SETTINGS_ROWS.iter().position(|r| r.kind == kind).unwrap();
        app.state.settings_view.selected_row = idx;
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.update(Action::Modal(ModalInput::Char(c)));
        }
    }

    fn screen_text(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_toggle_row_writes_through_and_marks_dirty() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        select_row(&mut app, RowKind::Toggle(ToggleField::Notifications));
        app.update(Action::ActivateRow);
        assert!(app.state.store.flag(ToggleField::Notifications));
        assert!(app.dirty.get());
        assert!(!app.state.modal.is_open());
    }

    #[test]
    fn test_edit_row_opens_single_modal() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        select_row(&mut app, RowKind::Edit(EditTarget::Gender));
        app.update(Action::ActivateRow);
        assert_eq!(app.state.modal.target(), Some(EditTarget::Gender));

        // Keys now route to the modal, so activating again cannot stack modals
        select_row(&mut app, RowKind::Edit(EditTarget::Username));
        app.update(Action::ActivateRow);
        assert_eq!(app.state.modal.target(), Some(EditTarget::Gender));
    }

    #[test]
    fn test_password_flow_reports_mismatch_then_saves() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        select_row(&mut app, RowKind::Edit(EditTarget::Password));
        app.update(Action::ActivateRow);

        type_text(&mut app, "abc");
        app.update(Action::Modal(ModalInput::NextField));
        type_text(&mut app, "abd");
        app.update(Action::SaveModal);
        assert!(app.state.modal.is_open());
        assert_eq!(
            app.state.status_message,
            Some(("Passwords do not match".to_string(), true))
        );
        assert_eq!(app.state.store.text(TextField::Password), "hunter2");

        app.update(Action::Modal(ModalInput::Backspace));
        type_text(&mut app, "c");
        app.update(Action::SaveModal);
        assert!(!app.state.modal.is_open());
        assert_eq!(app.state.store.text(TextField::Password), "abc");
        assert_eq!(app.state.status_message, Some(("Password saved".to_string(), false)));
    }

    #[test]
    fn test_cancel_leaves_store_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        let before = app.state.store.snapshot();
        select_row(&mut app, RowKind::Edit(EditTarget::Username));
        app.update(Action::ActivateRow);
        type_text(&mut app, "xyz");
        app.update(Action::CancelModal);
        assert_eq!(app.state.store.snapshot(), before);
        assert!(!app.dirty.get());
    }

    #[test]
    fn test_leaving_settings_persists_changes() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        select_row(&mut app, RowKind::Toggle(ToggleField::ProfilePublic));
        app.update(Action::ActivateRow);
        app.update(Action::ShowHome);

        assert!(!app.dirty.get());
        let saved = config::load_config(&dir.path().join("config.toml"));
        assert!(saved.settings.profile_public);
        assert_eq!(saved.settings.username, "janedoe");
        assert_eq!(app.state.screen, Screen::Home);
    }

    #[test]
    fn test_logout_closes_modal_and_shows_launch() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        select_row(&mut app, RowKind::Edit(EditTarget::Weight));
        app.update(Action::ActivateRow);
        app.update(Action::Logout);
        assert!(!app.state.modal.is_open());
        assert_eq!(app.state.screen, Screen::Launch);

        app.update(Action::StartSession);
        assert_eq!(app.state.screen, Screen::Home);
        assert_eq!(app.state.store.text(TextField::Weight), "140");
    }

    #[test]
    fn test_change_tracking_is_per_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.update(Action::Logout);
        assert!(app.session.is_none());

        // Signed out: the store has no tracking listener left
        app.state.store.toggle(ToggleField::WorkoutReminders);
        assert!(!app.dirty.get());

        app.update(Action::StartSession);
        assert!(app.session.is_some());
        app.state.store.toggle(ToggleField::WorkoutReminders);
        assert!(app.dirty.get());
    }

    #[test]
    fn test_profile_save_refreshes_avatar() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        select_row(&mut app, RowKind::Edit(EditTarget::Profile));
        app.update(Action::ActivateRow);
        app.update(Action::Modal(ModalInput::DeleteWord));
        type_text(&mut app, "Smith");
        app.update(Action::SaveModal);
        assert_eq!(app.state.profile.name, "Jane Smith");
        assert_eq!(
            app.state.avatar,
            crate::state::profile::Avatar::Placeholder {
                initials: "JS".to_string()
            }
        );
        assert!(app.dirty.get());
    }

    #[test]
    fn test_calendar_overlay_moves_home_date() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.update(Action::ShowHome);
        let start = app.state.home.selected_date;
        app.update(Action::ToggleCalendar);
        app.update(Action::CalendarStep(crate::state::calendar::DateStep::NextDay));
        app.update(Action::CloseCalendar);
        assert!(!app.state.home.calendar_open);
        assert_eq!(app.state.home.selected_date, start.succ_opt().unwrap());
    }

    #[test]
    fn test_status_message_clears_after_ticks() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.set_status("hi".to_string(), false);
        for _ in 0..STATUS_TICKS {
            app.update(Action::Tick);
        }
        assert_eq!(app.state.status_message, None);
    }

    #[test]
    fn test_settings_screen_masks_password() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir);
        let text = screen_text(&app.state);
        assert!(text.contains("Username"));
        assert!(text.contains("janedoe"));
        assert!(text.contains("140 lbs"));
        assert!(!text.contains("hunter2"));
    }

    #[test]
    fn test_password_modal_renders_masked_draft() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        select_row(&mut app, RowKind::Edit(EditTarget::Password));
        app.update(Action::ActivateRow);
        type_text(&mut app, "zq9zq9");
        let text = screen_text(&app.state);
        assert!(text.contains("Edit Password"));
        assert!(!text.contains("zq9zq9"));

        app.update(Action::Modal(ModalInput::ToggleVisibility));
        let text = screen_text(&app.state);
        assert!(text.contains("zq9zq9"));
        assert!(text.contains("Passwords do not match"));
    }

    #[test]
    fn test_empty_password_modal_shows_disabled_save() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        select_row(&mut app, RowKind::Edit(EditTarget::Password));
        app.update(Action::ActivateRow);
        assert!(!app.state.modal.can_save());

        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| render(frame, &app.state)).unwrap();
        let buffer = terminal.backend().buffer();

        // The modal's hint row sits above the bottom bar, so the first match is the modal's
        let hint = "[Enter]save";
        let width = buffer.area.width - hint.len() as u16;
        let (x, y) = (0..buffer.area.height)
            .find_map(|y| {
                (0..width)
                    .find(|&x| {
                        hint.chars()
                            .enumerate()
                            .all(|(i, c)| buffer[(x + i as u16, y)].symbol() == c.to_string())
                    })
                    .map(|x| (x, y))
            })
            .expect("save hint rendered");
        assert!(buffer[(x, y)].modifier.contains(Modifier::CROSSED_OUT));

        let text = screen_text(&app.state);
        assert!(!text.contains("Password cannot be empty"));

        // Typing makes the error explicit and Save stays disabled
        type_text(&mut app, "a");
        app.update(Action::Modal(ModalInput::Backspace));
        app.update(Action::Modal(ModalInput::NextField));
        type_text(&mut app, "b");
        let text = screen_text(&app.state);
        assert!(text.contains("Password cannot be empty"));
    }

    #[test]
    fn test_home_renders_greeting_and_stats() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.update(Action::ShowHome);
        let text = screen_text(&app.state);
        assert!(text.contains("Hello Jane!"));
        assert!(text.contains("1,883"));
        assert!(text.contains("Lower Strength"));
    }
}
