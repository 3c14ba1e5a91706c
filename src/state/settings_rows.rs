use super::edit_session::EditTarget;
use super::profile::UserProfile;
use super::settings_store::{Settings, ToggleField};

/// Fixed mask shown by the password row regardless of the stored value.
pub const PASSWORD_MASK: &str = "\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Toggle(ToggleField),
    Edit(EditTarget),
    Logout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Profile,
    Settings,
    Account,
}

impl Section {
    pub fn title(self) -> &'static str {
        match self {
            Section::Profile => "Profile",
            Section::Settings => "Settings",
            Section::Account => "Account",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsRow {
    pub icon: &'static str,
    pub label: &'static str,
    pub kind: RowKind,
    pub section: Section,
}

const fn row(icon: &'static str, label: &'static str, kind: RowKind, section: Section) -> SettingsRow {
    SettingsRow {
        icon,
        label,
        kind,
        section,
    }
}

pub const SETTINGS_ROWS: &[SettingsRow] = &[
    row("\u{263a}", "Profile", RowKind::Edit(EditTarget::Profile), Section::Profile),
    row("\u{25c9}", "Profile Public", RowKind::Toggle(ToggleField::ProfilePublic), Section::Settings),
    row("\u{21ea}", "Auto Share Workouts", RowKind::Toggle(ToggleField::AutoShareWorkouts), Section::Settings),
    row("\u{266a}", "Notifications", RowKind::Toggle(ToggleField::Notifications), Section::Settings),
    row("\u{263e}", "Rest Day Reminders", RowKind::Toggle(ToggleField::RestDayReminders), Section::Settings),
    row("\u{2248}", "Water Intake Reminders", RowKind::Toggle(ToggleField::WaterIntakeReminders), Section::Settings),
    row("\u{266a}", "Daily Workout Reminders", RowKind::Toggle(ToggleField::WorkoutReminders), Section::Settings),
    row("\u{2696}", "Weight", RowKind::Edit(EditTarget::Weight), Section::Settings),
    row("\u{26a5}", "Gender", RowKind::Edit(EditTarget::Gender), Section::Settings),
    row("\u{2740}", "Birthday", RowKind::Edit(EditTarget::Birthday), Section::Account),
    row("\u{263a}", "Username", RowKind::Edit(EditTarget::Username), Section::Account),
    row("\u{26bf}", "Password", RowKind::Edit(EditTarget::Password), Section::Account),
    row("\u{23fb}", "LOGOUT", RowKind::Logout, Section::Account),
];

pub const SETTINGS_ROW_COUNT: usize = SETTINGS_ROWS.len();

impl SettingsRow {
    /// Text shown on the right of the row.
    pub fn display_value(&self, settings: &Settings, profile: &UserProfile) -> String {
        match self.kind {
            RowKind::Toggle(field) => {
                if settings.flag(field) {
                    "[on ]".to_string()
                } else {
                    "[off]".to_string()
                }
            }
            RowKind::Edit(EditTarget::Profile) => profile.name.clone(),
            RowKind::Edit(EditTarget::Weight) => format!("{} lbs", settings.weight),
            RowKind::Edit(EditTarget::Gender) => settings.gender.clone(),
            RowKind::Edit(EditTarget::Birthday) => settings.birthday.clone(),
            RowKind::Edit(EditTarget::Username) => settings.username.clone(),
            RowKind::Edit(EditTarget::Password) => PASSWORD_MASK.to_string(),
            RowKind::Logout => String::new(),
        }
    }
}

/// Cursor over [`SETTINGS_ROWS`].
#[derive(Debug, Clone, Default)]
pub struct SettingsViewState {
    pub selected_row: usize,
}

impl SettingsViewState {
    pub fn select_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    pub fn select_down(&mut self) {
        self.selected_row = (self.selected_row + 1).min(SETTINGS_ROW_COUNT - 1);
    }

    pub fn selected(&self) -> &'static SettingsRow {
        &SETTINGS_ROWS[self.selected_row.min(SETTINGS_ROW_COUNT - 1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::settings_store::TOGGLE_FIELDS;

    fn settings() -> Settings {
        Settings {
            weight: "140".to_string(),
            password: "x".to_string(),
            ..Settings::default()
        }
    }

    #[test]
    fn test_password_row_always_masked() {
        let profile = UserProfile::new("Jane", None);
        let row = SETTINGS_ROWS
            .iter()
            .find(|r| r.kind == RowKind::Edit(EditTarget::Password))
            .unwrap();
        for password in ["", "x", "a much longer password than the mask"] {
            let s = Settings {
                password: password.to_string(),
                ..settings()
            };
            assert_eq!(row.display_value(&s, &profile), PASSWORD_MASK);
        }
    }

    #[test]
    fn test_weight_row_has_unit() {
        let profile = UserProfile::new("Jane", None);
        let row = SETTINGS_ROWS.iter().find(|r| r.label == "Weight").unwrap();
        assert_eq!(row.display_value(&settings(), &profile), "140 lbs");
    }

    #[test]
    fn test_every_toggle_field_has_a_row() {
        for field in TOGGLE_FIELDS {
            assert!(SETTINGS_ROWS.iter().any(|r| r.kind == RowKind::Toggle(*field)));
        }
    }

    #[test]
    fn test_selection_clamps() {
        let mut view = SettingsViewState::default();
        view.select_up();
        assert_eq!(view.selected_row, 0);
        for _ in 0..100 {
            view.select_down();
        }
        assert_eq!(view.selected().kind, RowKind::Logout);
    }
}
