use std::fmt;

/// All user preferences and account fields shown on the settings screen.
///
/// Every field always holds a value; text fields default to an empty string
/// so rows never need to handle an absent value.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub profile_public: bool,
    pub auto_share_workouts: bool,
    pub notifications: bool,
    pub rest_day_reminders: bool,
    pub water_intake_reminders: bool,
    pub workout_reminders: bool,
    pub weight: String,
    pub gender: String,
    pub birthday: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("profile_public", &self.profile_public)
            .field("auto_share_workouts", &self.auto_share_workouts)
            .field("notifications", &self.notifications)
            .field("rest_day_reminders", &self.rest_day_reminders)
            .field("water_intake_reminders", &self.water_intake_reminders)
            .field("workout_reminders", &self.workout_reminders)
            .field("weight", &self.weight)
            .field("gender", &self.gender)
            .field("birthday", &self.birthday)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Boolean preferences, written through immediately by toggle rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleField {
    ProfilePublic,
    AutoShareWorkouts,
    Notifications,
    RestDayReminders,
    WaterIntakeReminders,
    WorkoutReminders,
}

#[cfg(test)]
pub const TOGGLE_FIELDS: &[ToggleField] = &[
    ToggleField::ProfilePublic,
    ToggleField::AutoShareWorkouts,
    ToggleField::Notifications,
    ToggleField::RestDayReminders,
    ToggleField::WaterIntakeReminders,
    ToggleField::WorkoutReminders,
];

/// String-valued fields, written only by an edit modal's commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Weight,
    Gender,
    Birthday,
    Username,
    Password,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Toggle(ToggleField),
    Text(TextField),
}

impl From<ToggleField> for SettingsField {
    fn from(field: ToggleField) -> Self {
        SettingsField::Toggle(field)
    }
}

impl From<TextField> for SettingsField {
    fn from(field: TextField) -> Self {
        SettingsField::Text(field)
    }
}

impl Settings {
    pub fn flag(&self, field: ToggleField) -> bool {
        match field {
            ToggleField::ProfilePublic => self.profile_public,
            ToggleField::AutoShareWorkouts => self.auto_share_workouts,
            ToggleField::Notifications => self.notifications,
            ToggleField::RestDayReminders => self.rest_day_reminders,
            ToggleField::WaterIntakeReminders => self.water_intake_reminders,
            ToggleField::WorkoutReminders => self.workout_reminders,
        }
    }

    fn flag_mut(&mut self, field: ToggleField) -> &mut bool {
        match field {
            ToggleField::ProfilePublic => &mut self.profile_public,
            ToggleField::AutoShareWorkouts => &mut self.auto_share_workouts,
            ToggleField::Notifications => &mut self.notifications,
            ToggleField::RestDayReminders => &mut self.rest_day_reminders,
            ToggleField::WaterIntakeReminders => &mut self.water_intake_reminders,
            ToggleField::WorkoutReminders => &mut self.workout_reminders,
        }
    }

    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Weight => &self.weight,
            TextField::Gender => &self.gender,
            TextField::Birthday => &self.birthday,
            TextField::Username => &self.username,
            TextField::Password => &self.password,
        }
    }

    fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::Weight => &mut self.weight,
            TextField::Gender => &mut self.gender,
            TextField::Birthday => &mut self.birthday,
            TextField::Username => &mut self.username,
            TextField::Password => &mut self.password,
        }
    }
}

/// Handle returned by [`SettingsStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(SettingsField, &Settings)>;

/// Single owner of the [`Settings`] value.
///
/// Reads go through [`SettingsStore::settings`]; writes only through the
/// mutation methods, which notify subscribers after every effective change.
/// Setting a field to its current value is a no-op and notifies nobody.
pub struct SettingsStore {
    settings: Settings,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsStore")
            .field("settings", &self.settings)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl SettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Copy of the current values, for handing to external persistence.
    pub fn snapshot(&self) -> Settings {
        self.settings.clone()
    }

    pub fn flag(&self, field: ToggleField) -> bool {
        self.settings.flag(field)
    }

    pub fn text(&self, field: TextField) -> &str {
        self.settings.text(field)
    }

    /// Flip a boolean preference. Returns the new value.
    pub fn toggle(&mut self, field: ToggleField) -> bool {
        let value = !self.settings.flag(field);
        self.set_flag(field, value);
        value
    }

    /// Returns `true` if the stored value changed.
    pub fn set_flag(&mut self, field: ToggleField, value: bool) -> bool {
        let slot = self.settings.flag_mut(field);
        if *slot == value {
            return false;
        }
        *slot = value;
        self.notify(field.into());
        true
    }

    /// Store any string unconditionally. Returns `true` if the stored value changed.
    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) -> bool {
        let value = value.into();
        let slot = self.settings.text_mut(field);
        if *slot == value {
            return false;
        }
        *slot = value;
        self.notify(field.into());
        true
    }

    pub fn subscribe(&mut self, listener: impl FnMut(SettingsField, &Settings) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, field: SettingsField) {
        tracing::debug!(?field, "settings field changed");
        let settings = &self.settings;
        for (_, listener) in self.listeners.iter_mut() {
            listener(field, settings);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn sample() -> Settings {
        Settings {
            profile_public: true,
            auto_share_workouts: false,
            notifications: true,
            rest_day_reminders: false,
            water_intake_reminders: true,
            workout_reminders: false,
            weight: "140".to_string(),
            gender: "Female".to_string(),
            birthday: "12/25/1990".to_string(),
            username: "janedoe".to_string(),
            password: "hunter2".to_string(),
        }
    }

    #[test]
    fn test_toggle_changes_only_that_field() {
        for &field in TOGGLE_FIELDS {
            let mut store = SettingsStore::new(sample());
            let before = store.snapshot();
            let new_value = store.toggle(field);
            assert_eq!(new_value, !before.flag(field));
            assert_eq!(store.flag(field), new_value);

            for &other in TOGGLE_FIELDS.iter().filter(|&&f| f != field) {
                assert_eq!(store.flag(other), before.flag(other), "{other:?} changed");
            }
            assert_eq!(store.settings().weight, before.weight);
            assert_eq!(store.settings().gender, before.gender);
            assert_eq!(store.settings().birthday, before.birthday);
            assert_eq!(store.settings().username, before.username);
            assert_eq!(store.settings().password, before.password);
        }
    }

    #[test]
    fn test_set_text_accepts_any_string() {
        let mut store = SettingsStore::new(sample());
        assert!(store.set_text(TextField::Gender, "Alien"));
        assert_eq!(store.text(TextField::Gender), "Alien");
        assert!(store.set_text(TextField::Weight, ""));
        assert_eq!(store.text(TextField::Weight), "");
    }

    #[test]
    fn test_set_same_value_is_noop() {
        let mut store = SettingsStore::new(sample());
        let before = store.snapshot();
        assert!(!store.set_text(TextField::Username, "janedoe"));
        assert!(!store.set_flag(ToggleField::ProfilePublic, true));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_listeners_fire_once_per_effective_change() {
        let mut store = SettingsStore::new(sample());
        let seen: Rc<RefCell<Vec<SettingsField>>> = Rc::default();
        let sink = Rc::clone(&seen);
        store.subscribe(move |field, _| sink.borrow_mut().push(field));

        store.toggle(ToggleField::Notifications);
        store.set_text(TextField::Username, "janedoe"); // unchanged
        store.set_text(TextField::Username, "jane");

        assert_eq!(
            *seen.borrow(),
            vec![
                SettingsField::Toggle(ToggleField::Notifications),
                SettingsField::Text(TextField::Username),
            ]
        );
    }

    #[test]
    fn test_listener_sees_new_value() {
        let mut store = SettingsStore::new(sample());
        let seen = Rc::new(RefCell::new(String::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |_, settings| *sink.borrow_mut() = settings.username.clone());
        store.set_text(TextField::Username, "lifter");
        assert_eq!(*seen.borrow(), "lifter");
    }

    #[test]
    fn test_unsubscribe() {
        let mut store = SettingsStore::new(sample());
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let id = store.subscribe(move |_, _| *sink.borrow_mut() += 1);

        store.toggle(ToggleField::ProfilePublic);
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.toggle(ToggleField::ProfilePublic);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_debug_redacts_password() {
        let store = SettingsStore::new(sample());
        let rendered = format!("{store:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
