use chrono::NaiveDate;

use super::dashboard::HomeState;
use super::edit_session::ActiveModal;
use super::profile::{Avatar, ImageLoader, UserProfile};
use super::settings_rows::SettingsViewState;
use super::settings_store::SettingsStore;
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Settings,
    /// Unauthenticated entry screen shown after logout.
    Launch,
}

pub struct AppState {
    pub screen: Screen,
    pub theme: Theme,
    pub store: SettingsStore,
    pub profile: UserProfile,
    /// Resolved once per profile change so rendering never touches the disk.
    pub avatar: Avatar,
    pub home: HomeState,
    pub settings_view: SettingsViewState,
    pub modal: ActiveModal,
    pub should_quit: bool,
    pub status_message: Option<(String, bool)>, // (message, is_error)
}

impl AppState {
    pub fn new(
        theme: Theme,
        store: SettingsStore,
        profile: UserProfile,
        loader: &dyn ImageLoader,
        today: NaiveDate,
    ) -> Self {
        let avatar = profile.avatar(loader);
        Self {
            screen: Screen::Home,
            theme,
            store,
            profile,
            avatar,
            home: HomeState::new(today),
            settings_view: SettingsViewState::default(),
            modal: ActiveModal::None,
            should_quit: false,
            status_message: None,
        }
    }

    pub fn refresh_avatar(&mut self, loader: &dyn ImageLoader) {
        self.avatar = self.profile.avatar(loader);
    }
}
